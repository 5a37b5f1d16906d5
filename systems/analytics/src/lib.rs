#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic session statistics folded from the world's event stream.

use hero_battle_core::{EntityId, Event, GameState};
use serde::Serialize;

/// Aggregated statistics of the current session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    /// Frames simulated.
    pub frames: u64,
    /// Active abilities cast successfully.
    pub casts: u32,
    /// Ultimates cast successfully.
    pub ultimates: u32,
    /// Cast requests refused by cooldown or mana gating.
    pub rejected_casts: u32,
    /// Projectiles launched by heroes.
    pub projectiles_launched: u32,
    /// Enemies that entered the arena.
    pub enemies_spawned: u32,
    /// Enemies defeated.
    pub kills: u32,
    /// Health removed from enemies.
    pub damage_dealt: u32,
    /// Health removed from heroes.
    pub damage_taken: u32,
    /// Waves fully cleared.
    pub waves_cleared: u32,
    /// Final outcome, once the session ended.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<GameState>,
}

/// Pure analytics system folding events into [`SessionStats`].
#[derive(Debug, Default)]
pub struct Analytics {
    stats: SessionStats,
    sessions: u32,
}

impl Analytics {
    /// Creates an analytics system with empty statistics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Statistics of the session currently being played.
    #[must_use]
    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Number of sessions observed, counting the current one.
    #[must_use]
    pub fn sessions(&self) -> u32 {
        self.sessions + 1
    }

    /// Consumes world events. `heroes` identifies the roster so that damage
    /// can be attributed to the right side.
    pub fn handle(&mut self, events: &[Event], heroes: &[EntityId]) {
        for event in events {
            match event {
                Event::FrameAdvanced { frame } => self.stats.frames = *frame,
                Event::AbilityCast { .. } => self.stats.casts += 1,
                Event::UltimateCast { .. } => self.stats.ultimates += 1,
                Event::CastRejected { reason, .. } => {
                    if reason.is_gating() {
                        self.stats.rejected_casts += 1;
                    }
                }
                Event::ProjectileLaunched { .. } => self.stats.projectiles_launched += 1,
                Event::EnemySpawned { .. } => self.stats.enemies_spawned += 1,
                Event::EnemyDied { .. } => self.stats.kills += 1,
                Event::HealthChanged {
                    target, old, new, ..
                } => {
                    let amount = old.saturating_sub(*new);
                    if heroes.contains(target) {
                        self.stats.damage_taken += amount;
                    } else {
                        self.stats.damage_dealt += amount;
                    }
                }
                Event::WaveCompleted { wave } => {
                    self.stats.waves_cleared = self.stats.waves_cleared.max(*wave);
                }
                Event::GameStateChanged { state } => {
                    if state.is_over() {
                        self.stats.outcome = Some(*state);
                    }
                }
                Event::SessionRestarted => {
                    self.sessions += 1;
                    self.stats = SessionStats::default();
                }
                Event::HeroSwitched { .. }
                | Event::WaveStarted { .. }
                | Event::ProjectileResolved { .. } => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hero_battle_core::{AbilityError, EnemyKind};

    #[test]
    fn damage_is_attributed_by_roster_membership() {
        let hero = EntityId::new(1);
        let enemy = EntityId::new(9);
        let mut analytics = Analytics::new();

        analytics.handle(
            &[
                Event::HealthChanged {
                    target: hero,
                    source: Some(enemy),
                    old: 60,
                    new: 52,
                },
                Event::HealthChanged {
                    target: enemy,
                    source: Some(hero),
                    old: 50,
                    new: 25,
                },
                Event::EnemyDied {
                    enemy,
                    kind: EnemyKind::Melee,
                },
            ],
            &[hero],
        );

        let stats = analytics.stats();
        assert_eq!(stats.damage_taken, 8);
        assert_eq!(stats.damage_dealt, 25);
        assert_eq!(stats.kills, 1);
    }

    #[test]
    fn precondition_rejections_are_not_counted() {
        let hero = EntityId::new(1);
        let mut analytics = Analytics::new();
        analytics.handle(
            &[
                Event::CastRejected {
                    hero,
                    reason: AbilityError::UnknownSlot { slot: 4 },
                },
                Event::CastRejected {
                    hero,
                    reason: AbilityError::OnCooldown { remaining: 12 },
                },
            ],
            &[hero],
        );
        assert_eq!(analytics.stats().rejected_casts, 1);
    }

    #[test]
    fn restart_resets_statistics() {
        let mut analytics = Analytics::new();
        analytics.handle(
            &[
                Event::FrameAdvanced { frame: 400 },
                Event::GameStateChanged {
                    state: GameState::Defeat,
                },
            ],
            &[],
        );
        assert_eq!(analytics.stats().outcome, Some(GameState::Defeat));

        analytics.handle(&[Event::SessionRestarted], &[]);
        assert_eq!(analytics.stats(), &SessionStats::default());
        assert_eq!(analytics.sessions(), 2);
    }
}
