#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Wave scheduler that emits enemy spawn commands at a fixed cadence.
//!
//! Waves are numbered from one. The manager starts wave one on its first
//! update, spawns that wave's quota one enemy per interval, and moves on to
//! the next wave once the quota is spawned and no enemy remains alive. The
//! spawn counter restarts for every wave.

use glam::Vec2;
use hero_battle_core::{units::UNIT_SIZE, ArenaBounds, Command, WaveTable};

/// Configuration parameters required to construct the wave manager.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    spawn_interval: u32,
    arena: ArenaBounds,
}

impl Config {
    /// Creates a new configuration.
    ///
    /// `spawn_interval` is the number of frames between consecutive spawns of
    /// the same wave; zero is treated as one.
    #[must_use]
    pub fn new(spawn_interval: u32, arena: ArenaBounds) -> Self {
        Self {
            spawn_interval: spawn_interval.max(1),
            arena,
        }
    }

    /// Frames between consecutive spawns.
    #[must_use]
    pub const fn spawn_interval(&self) -> u32 {
        self.spawn_interval
    }

    /// Arena whose edges enemies spawn along.
    #[must_use]
    pub const fn arena(&self) -> ArenaBounds {
        self.arena
    }
}

/// Wave progression state machine.
#[derive(Clone, Debug)]
pub struct WaveManager {
    table: WaveTable,
    config: Config,
    current_wave: u32,
    spawned_in_wave: u32,
    spawn_delay: u32,
}

impl WaveManager {
    /// Creates a manager that has not started any wave yet.
    #[must_use]
    pub fn new(table: WaveTable, config: Config) -> Self {
        Self {
            table,
            config,
            current_wave: 0,
            spawned_in_wave: 0,
            spawn_delay: 0,
        }
    }

    /// Advances wave progression by one frame and queues spawn commands.
    ///
    /// `live_enemies` is the number of enemies currently in the arena.
    pub fn handle(&mut self, live_enemies: usize, out: &mut Vec<Command>) {
        if self.current_wave == 0 {
            self.begin_wave(1);
        } else if !self.is_game_complete() && self.is_wave_complete(live_enemies) {
            log::info!("wave {} cleared", self.current_wave);
            self.begin_wave(self.current_wave + 1);
        }

        if self.is_game_complete() || self.spawned_in_wave >= self.wave_quota() {
            return;
        }

        self.spawn_delay = self.spawn_delay.saturating_sub(1);
        if self.spawn_delay > 0 {
            return;
        }

        let Some(kind) = self.table.kind_at(self.current_wave, self.spawned_in_wave) else {
            return;
        };
        let position = spawn_position(self.config.arena, self.spawned_in_wave);
        log::debug!(
            "wave {} spawning {:?} #{} at ({:.0}, {:.0})",
            self.current_wave,
            kind,
            self.spawned_in_wave + 1,
            position.x,
            position.y
        );
        out.push(Command::SpawnEnemy { kind, position });
        self.spawned_in_wave += 1;
        self.spawn_delay = self.config.spawn_interval;
    }

    /// Reports whether the current wave spawned its full quota and nothing is left alive.
    #[must_use]
    pub fn is_wave_complete(&self, live_enemies: usize) -> bool {
        self.current_wave > 0 && self.spawned_in_wave >= self.wave_quota() && live_enemies == 0
    }

    /// Reports whether progression moved past the final wave.
    #[must_use]
    pub fn is_game_complete(&self) -> bool {
        self.current_wave > self.table.len()
    }

    /// One-based number of the current wave, zero before the first update.
    #[must_use]
    pub const fn current_wave(&self) -> u32 {
        self.current_wave
    }

    /// Number of waves in the table.
    #[must_use]
    pub fn max_waves(&self) -> u32 {
        self.table.len()
    }

    /// Enemies spawned so far in the current wave.
    #[must_use]
    pub const fn spawned_in_wave(&self) -> u32 {
        self.spawned_in_wave
    }

    /// Enemy quota of the current wave, zero when no wave is active.
    #[must_use]
    pub fn wave_quota(&self) -> u32 {
        self.table.enemy_count(self.current_wave)
    }

    fn begin_wave(&mut self, wave: u32) {
        self.current_wave = wave;
        self.spawned_in_wave = 0;
        self.spawn_delay = 0;
        if self.is_game_complete() {
            log::info!("all {} waves cleared", self.table.len());
        } else {
            log::info!(
                "wave {} of {} started with {} enemies",
                wave,
                self.table.len(),
                self.wave_quota()
            );
        }
    }
}

/// Upper-left spawn point of the `index`-th enemy of a wave, cycling the four arena edges.
#[must_use]
pub fn spawn_position(arena: ArenaBounds, index: u32) -> Vec2 {
    let step = index as f32;
    let along_x = (step * 100.0) % arena.width();
    let along_y = (step * 80.0) % arena.height();
    match index % 4 {
        0 => Vec2::new(along_x, 0.0),
        1 => Vec2::new(arena.width() - UNIT_SIZE, along_y),
        2 => Vec2::new(along_x, arena.height() - UNIT_SIZE),
        _ => Vec2::new(0.0, along_y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_positions_cycle_arena_edges() {
        let arena = ArenaBounds::default();
        assert_eq!(spawn_position(arena, 0), Vec2::new(0.0, 0.0));
        assert_eq!(spawn_position(arena, 1), Vec2::new(768.0, 80.0));
        assert_eq!(spawn_position(arena, 2), Vec2::new(200.0, 568.0));
        assert_eq!(spawn_position(arena, 3), Vec2::new(0.0, 240.0));
        assert_eq!(spawn_position(arena, 8), Vec2::new(0.0, 0.0));
        assert_eq!(spawn_position(arena, 9), Vec2::new(768.0, 120.0));
    }

    #[test]
    fn zero_interval_is_clamped() {
        let config = Config::new(0, ArenaBounds::default());
        assert_eq!(config.spawn_interval(), 1);
    }

    #[test]
    fn first_update_starts_wave_one_and_spawns() {
        let mut manager = WaveManager::new(
            WaveTable::standard(),
            Config::new(60, ArenaBounds::default()),
        );
        assert_eq!(manager.current_wave(), 0);
        assert!(!manager.is_wave_complete(0));

        let mut commands = Vec::new();
        manager.handle(0, &mut commands);
        assert_eq!(manager.current_wave(), 1);
        assert_eq!(commands.len(), 1);
        assert_eq!(manager.spawned_in_wave(), 1);
    }
}
