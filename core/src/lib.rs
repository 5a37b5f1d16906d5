#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Vocabulary of the Hero Battle arena: heroes, enemies, projectiles and the
//! messages that move them.
//!
//! An input source turns key presses into a [`FrameInput`]; the world turns
//! that into [`Command`] values, simulates one frame, and reports what
//! happened (casts, hits, deaths, wave progress) as [`Event`] values. Ability
//! code never sees the world itself, only the [`GameFacade`] it is handed
//! while a cast runs. Cast refusals travel as [`AbilityError`] and never abort
//! a frame.

pub mod entity;
pub mod geometry;
pub mod units;
pub mod waves;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use entity::{Body, Entity, EntityId, Health, Mana, SpriteKey};
pub use units::{
    Caster, Effect, EffectKind, EffectSpawn, Enemy, EnemyKind, EnemyStats, HeroClass, Projectile,
    ProjectileLaunch, ULTIMATE_ENERGY_MAX,
};
pub use waves::{WaveDefinition, WaveTable, WaveTableError};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Hero Battle.";

/// Fixed simulation rate. Every per-frame quantity assumes this many frames per second.
pub const FRAMES_PER_SECOND: f32 = 60.0;

/// Ultimate energy gained by every successful active-ability cast.
pub const ULTIMATE_ENERGY_PER_CAST: u32 = 5;

/// Distance a hero moves per frame while a movement command is held.
pub const HERO_MOVE_SPEED: f32 = 200.0 / FRAMES_PER_SECOND;

/// Overall outcome of the session. Transitions only away from `Playing`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    /// Waves are still being fought.
    Playing,
    /// Every wave has been cleared.
    Victory,
    /// Every hero has been defeated.
    Defeat,
}

impl GameState {
    /// Reports whether the session has ended.
    #[must_use]
    pub const fn is_over(self) -> bool {
        !matches!(self, Self::Playing)
    }
}

/// Cardinal directions used for hero movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Towards negative y.
    Up,
    /// Towards positive y.
    Down,
    /// Towards negative x.
    Left,
    /// Towards positive x.
    Right,
}

impl Direction {
    /// Velocity applied to the active hero while moving in this direction.
    #[must_use]
    pub fn velocity(self) -> Vec2 {
        match self {
            Self::Up => Vec2::new(0.0, -HERO_MOVE_SPEED),
            Self::Down => Vec2::new(0.0, HERO_MOVE_SPEED),
            Self::Left => Vec2::new(-HERO_MOVE_SPEED, 0.0),
            Self::Right => Vec2::new(HERO_MOVE_SPEED, 0.0),
        }
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Makes another hero of the roster active, wrapping around its ends.
    SwitchHero {
        /// Signed step through the roster, typically `-1` or `1`.
        offset: i32,
    },
    /// Casts the active hero's ability in the provided slot.
    CastAbility {
        /// Zero-based active ability slot.
        slot: usize,
    },
    /// Casts the active hero's ultimate ability.
    CastUltimate,
    /// Moves the active hero along one axis for the next tick.
    MoveHero {
        /// Direction of travel.
        direction: Direction,
    },
    /// Introduces an enemy into the arena.
    SpawnEnemy {
        /// Archetype of the spawned enemy.
        kind: EnemyKind,
        /// Upper-left spawn position.
        position: Vec2,
    },
    /// Advances the simulation by one frame.
    Tick,
    /// Discards a finished session and starts a fresh one.
    Restart,
}

/// Discrete, mutually exclusive actions an input source may request per frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionCommand {
    /// Cycles the active hero.
    SwitchHero {
        /// Signed step through the roster.
        offset: i32,
    },
    /// Casts an active ability.
    CastAbility {
        /// Zero-based ability slot.
        slot: usize,
    },
    /// Casts the ultimate ability.
    CastUltimate,
}

impl From<ActionCommand> for Command {
    fn from(action: ActionCommand) -> Self {
        match action {
            ActionCommand::SwitchHero { offset } => Self::SwitchHero { offset },
            ActionCommand::CastAbility { slot } => Self::CastAbility { slot },
            ActionCommand::CastUltimate => Self::CastUltimate,
        }
    }
}

/// Everything an input collaborator produces for a single frame.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameInput {
    /// At most one discrete action.
    pub action: Option<ActionCommand>,
    /// Movement directions held during the frame.
    pub movement: Vec<Direction>,
    /// Whether a restart was requested. Only honoured once the session is over.
    pub restart: bool,
}

impl FrameInput {
    /// Input requesting nothing.
    #[must_use]
    pub fn idle() -> Self {
        Self::default()
    }

    /// Input performing a single discrete action.
    #[must_use]
    pub fn action(action: ActionCommand) -> Self {
        Self {
            action: Some(action),
            ..Self::default()
        }
    }

    /// Input holding the provided movement directions.
    #[must_use]
    pub fn moving(movement: Vec<Direction>) -> Self {
        Self {
            movement,
            ..Self::default()
        }
    }

    /// Input requesting a restart.
    #[must_use]
    pub fn restart() -> Self {
        Self {
            restart: true,
            ..Self::default()
        }
    }
}

/// Reasons an ability cast is refused. Failed casts mutate nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum AbilityError {
    /// The ability is still recharging.
    #[error("ability is on cooldown for {remaining} more frames")]
    OnCooldown {
        /// Frames left before the ability is ready.
        remaining: u32,
    },
    /// The hero cannot pay the mana cost.
    #[error("ability needs {required} mana but only {available} is available")]
    InsufficientMana {
        /// Mana cost of the ability.
        required: u32,
        /// Mana the hero currently holds.
        available: u32,
    },
    /// No active ability occupies the requested slot.
    #[error("no ability in slot {slot}")]
    UnknownSlot {
        /// Requested slot.
        slot: usize,
    },
    /// The ultimate gauge is not full yet.
    #[error("ultimate needs full energy, only {energy} charged")]
    UltimateNotCharged {
        /// Energy currently stored.
        energy: u32,
    },
}

impl AbilityError {
    /// Reports whether the error stems from resource gating rather than a bad request.
    #[must_use]
    pub const fn is_gating(&self) -> bool {
        matches!(self, Self::OnCooldown { .. } | Self::InsufficientMana { .. })
    }
}

/// Rectangular play area anchored at the origin.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArenaBounds {
    width: f32,
    height: f32,
}

impl ArenaBounds {
    /// Creates arena bounds with the provided dimensions.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width of the arena in world units.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Height of the arena in world units.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Keeps the body fully inside the arena.
    pub fn clamp_body(&self, body: &mut Body) {
        let max_x = (self.width - body.size.x).max(0.0);
        let max_y = (self.height - body.size.y).max(0.0);
        body.position.x = body.position.x.clamp(0.0, max_x);
        body.position.y = body.position.y.clamp(0.0, max_y);
    }
}

impl Default for ArenaBounds {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// Narrow view of the world that abilities act through.
///
/// Abilities never see the orchestrator itself: they launch projectiles,
/// inspect and damage enemies, and request visual effects only through this
/// capability, which the world hands them for the duration of a cast.
pub trait GameFacade {
    /// Registers a projectile and returns the identifier assigned to it.
    fn add_projectile(&mut self, launch: ProjectileLaunch) -> EntityId;

    /// Enemies currently in the arena, in spawn order.
    fn enemies(&self) -> &[Enemy];

    /// Mutable access to the enemies for direct damage and status effects.
    fn enemies_mut(&mut self) -> &mut [Enemy];

    /// Registers a visual effect and returns the identifier assigned to it.
    fn add_effect(&mut self, spawn: EffectSpawn) -> EntityId;
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation advanced by one frame.
    FrameAdvanced {
        /// Number of frames simulated so far in the session.
        frame: u64,
    },
    /// Confirms that control passed to another hero.
    HeroSwitched {
        /// Hero that became active.
        hero: EntityId,
    },
    /// Confirms that an active ability was cast.
    AbilityCast {
        /// Caster.
        hero: EntityId,
        /// Name of the ability.
        ability: &'static str,
    },
    /// Confirms that an ultimate ability was cast.
    UltimateCast {
        /// Caster.
        hero: EntityId,
        /// Name of the ultimate.
        ability: &'static str,
    },
    /// Reports that a cast request was refused.
    CastRejected {
        /// Hero that attempted the cast.
        hero: EntityId,
        /// Reason for the refusal.
        reason: AbilityError,
    },
    /// Announces that a wave started spawning.
    WaveStarted {
        /// One-based wave number.
        wave: u32,
    },
    /// Announces that every enemy of a wave was spawned and defeated.
    WaveCompleted {
        /// One-based wave number.
        wave: u32,
    },
    /// Confirms that an enemy entered the arena.
    EnemySpawned {
        /// Identifier assigned to the enemy.
        enemy: EntityId,
        /// Archetype of the enemy.
        kind: EnemyKind,
        /// Upper-left spawn position.
        position: Vec2,
    },
    /// Reports that an enemy reached zero health and was removed.
    EnemyDied {
        /// Identifier of the removed enemy.
        enemy: EntityId,
        /// Archetype of the removed enemy.
        kind: EnemyKind,
    },
    /// Confirms that a projectile was launched.
    ProjectileLaunched {
        /// Identifier assigned to the projectile.
        projectile: EntityId,
        /// Hero credited with the projectile.
        owner: EntityId,
    },
    /// Reports that a projectile left the arena after hitting or expiring.
    ProjectileResolved {
        /// Identifier of the removed projectile.
        projectile: EntityId,
        /// Number of enemies the projectile damaged.
        hits: u32,
    },
    /// Reports a change to an entity's health.
    HealthChanged {
        /// Entity whose health changed.
        target: EntityId,
        /// Entity responsible for the change, when known.
        source: Option<EntityId>,
        /// Health before the change.
        old: u32,
        /// Health after the change.
        new: u32,
    },
    /// Announces a transition of the overall game state.
    GameStateChanged {
        /// State the session entered.
        state: GameState,
    },
    /// Confirms that a fresh session replaced a finished one.
    SessionRestarted,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn entity_id_round_trips_through_bincode() {
        assert_round_trip(&EntityId::new(42));
    }

    #[test]
    fn ability_error_round_trips_through_bincode() {
        assert_round_trip(&AbilityError::InsufficientMana {
            required: 20,
            available: 3,
        });
    }

    #[test]
    fn frame_input_round_trips_through_bincode() {
        let input = FrameInput {
            action: Some(ActionCommand::CastAbility { slot: 2 }),
            movement: vec![Direction::Left, Direction::Up],
            restart: false,
        };
        assert_round_trip(&input);
    }

    #[test]
    fn wave_table_round_trip_revalidates() {
        assert_round_trip(&WaveTable::standard());
        let empty: Vec<WaveDefinition> = Vec::new();
        let bytes = bincode::serialize(&empty).expect("serialize");
        assert!(bincode::deserialize::<WaveTable>(&bytes).is_err());
    }

    #[test]
    fn arena_clamps_bodies_inside_bounds() {
        let arena = ArenaBounds::default();
        let mut body = Body::new(Vec2::new(-12.0, 590.0), Vec2::splat(32.0));
        arena.clamp_body(&mut body);
        assert_eq!(body.position, Vec2::new(0.0, 568.0));
    }

    #[test]
    fn only_cooldown_and_mana_are_gating_errors() {
        assert!(AbilityError::OnCooldown { remaining: 3 }.is_gating());
        assert!(!AbilityError::UnknownSlot { slot: 7 }.is_gating());
        assert!(!AbilityError::UltimateNotCharged { energy: 40 }.is_gating());
    }

    #[test]
    fn game_state_is_over_outside_playing() {
        assert!(!GameState::Playing.is_over());
        assert!(GameState::Victory.is_over());
        assert!(GameState::Defeat.is_over());
    }

    #[test]
    fn diagonal_movement_composes_axes() {
        let velocity = Direction::Up.velocity() + Direction::Right.velocity();
        assert!((velocity.x - HERO_MOVE_SPEED).abs() < f32::EPSILON);
        assert!((velocity.y + HERO_MOVE_SPEED).abs() < f32::EPSILON);
    }
}
