//! Session configuration consumed when a world is created or restarted.

use hero_battle_core::{ArenaBounds, WaveTable};

/// Frames between consecutive spawns of the same wave.
pub const DEFAULT_SPAWN_INTERVAL: u32 = 60;

/// Seed of the damage variance source when none is configured.
pub const DEFAULT_DAMAGE_SEED: u64 = 0x4865_726f_4261_7474;

/// Tunable parameters of a session.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    arena: ArenaBounds,
    waves: WaveTable,
    spawn_interval: u32,
    damage_seed: u64,
}

impl Config {
    /// Creates a configuration from explicit parameters.
    #[must_use]
    pub fn new(
        arena: ArenaBounds,
        waves: WaveTable,
        spawn_interval: u32,
        damage_seed: u64,
    ) -> Self {
        Self {
            arena,
            waves,
            spawn_interval,
            damage_seed,
        }
    }

    /// Replaces the arena bounds.
    #[must_use]
    pub fn with_arena(mut self, arena: ArenaBounds) -> Self {
        self.arena = arena;
        self
    }

    /// Replaces the wave table.
    #[must_use]
    pub fn with_waves(mut self, waves: WaveTable) -> Self {
        self.waves = waves;
        self
    }

    /// Replaces the spawn interval.
    #[must_use]
    pub fn with_spawn_interval(mut self, frames: u32) -> Self {
        self.spawn_interval = frames;
        self
    }

    /// Replaces the damage seed.
    #[must_use]
    pub fn with_damage_seed(mut self, seed: u64) -> Self {
        self.damage_seed = seed;
        self
    }

    /// Arena the session is played in.
    #[must_use]
    pub const fn arena(&self) -> ArenaBounds {
        self.arena
    }

    /// Waves the session is made of.
    #[must_use]
    pub const fn waves(&self) -> &WaveTable {
        &self.waves
    }

    /// Frames between consecutive spawns.
    #[must_use]
    pub const fn spawn_interval(&self) -> u32 {
        self.spawn_interval
    }

    /// Seed of the damage variance source.
    #[must_use]
    pub const fn damage_seed(&self) -> u64 {
        self.damage_seed
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(
            ArenaBounds::default(),
            WaveTable::standard(),
            DEFAULT_SPAWN_INTERVAL,
            DEFAULT_DAMAGE_SEED,
        )
    }
}
