//! Heroes, enemies, projectiles and effects layered on top of [`Entity`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::entity::{Body, Entity, EntityId, Health, Mana, SpriteKey};
use crate::geometry;
use crate::FRAMES_PER_SECOND;

/// Side length shared by hero and enemy bodies.
pub const UNIT_SIZE: f32 = 32.0;
/// Side length of every projectile body.
pub const PROJECTILE_SIZE: f32 = 8.0;
/// Number of frames a projectile survives before expiring.
pub const PROJECTILE_MAX_LIFETIME: u32 = 300;
/// Distance to the aim point below which a projectile counts as arrived.
pub const PROJECTILE_ARRIVAL_RADIUS: f32 = 10.0;
/// Upper bound of the ultimate-energy counter.
pub const ULTIMATE_ENERGY_MAX: u32 = 100;

/// Playable hero archetypes composing the fixed roster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeroClass {
    /// Fragile caster with explosive and area spells.
    Mage,
    /// Durable melee fighter.
    Knight,
    /// Ranged marksman.
    Archer,
}

impl HeroClass {
    /// Display name of the class.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mage => "Mage",
            Self::Knight => "Knight",
            Self::Archer => "Archer",
        }
    }

    /// Sprite requested for heroes of this class.
    #[must_use]
    pub const fn sprite(self) -> SpriteKey {
        match self {
            Self::Mage => SpriteKey::Mage,
            Self::Knight => SpriteKey::Knight,
            Self::Archer => SpriteKey::Archer,
        }
    }
}

/// The part of a hero that abilities read and mutate while executing.
///
/// Ability bookkeeping lives beside it so that an executing ability can borrow
/// the caster mutably without aliasing itself.
#[derive(Clone, Debug, PartialEq)]
pub struct Caster {
    /// Shared entity record.
    pub entity: Entity,
    /// Archetype of the hero.
    pub class: HeroClass,
    /// Mana pool spent by abilities.
    pub mana: Mana,
    /// Base attack rating.
    pub attack: u32,
    /// Base defense rating.
    pub defense: u32,
    ultimate_energy: u32,
}

impl Caster {
    /// Creates a caster with full health and mana and an empty ultimate gauge.
    #[must_use]
    pub fn new(
        id: EntityId,
        class: HeroClass,
        position: Vec2,
        max_health: u32,
        max_mana: u32,
        attack: u32,
        defense: u32,
    ) -> Self {
        Self {
            entity: Entity::new(
                id,
                Body::new(position, Vec2::splat(UNIT_SIZE)),
                Some(Health::full(max_health)),
                class.sprite(),
            ),
            class,
            mana: Mana::full(max_mana),
            attack,
            defense,
            ultimate_energy: 0,
        }
    }

    /// Display name of the hero.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.class.name()
    }

    /// Current ultimate energy in `0..=100`.
    #[must_use]
    pub const fn ultimate_energy(&self) -> u32 {
        self.ultimate_energy
    }

    /// Reports whether the ultimate gauge is full.
    #[must_use]
    pub const fn ultimate_charged(&self) -> bool {
        self.ultimate_energy >= ULTIMATE_ENERGY_MAX
    }

    /// Adds energy to the ultimate gauge, saturating at the maximum.
    pub fn gain_ultimate_energy(&mut self, amount: u32) {
        self.ultimate_energy = self
            .ultimate_energy
            .saturating_add(amount)
            .min(ULTIMATE_ENERGY_MAX);
    }

    /// Empties the ultimate gauge.
    pub fn drain_ultimate_energy(&mut self) {
        self.ultimate_energy = 0;
    }

    /// Reports whether the hero has been defeated.
    #[must_use]
    pub fn is_defeated(&self) -> bool {
        !self.entity.is_alive()
    }
}

/// Enemy archetypes introduced by waves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Close-range brawler.
    Melee,
    /// Fragile attacker with a long reach.
    Ranged,
    /// Slow, heavily armoured attacker.
    Tank,
}

/// Tunable statistics describing an enemy archetype.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyStats {
    /// Maximum hit points.
    pub max_health: u32,
    /// Damage dealt per attack before variance.
    pub attack: u32,
    /// Defense rating.
    pub defense: u32,
    /// Movement per frame while approaching.
    pub speed: f32,
    /// Distance at which the enemy stops and attacks.
    pub attack_range: f32,
    /// Distance at which the enemy notices the active hero.
    pub view_range: f32,
    /// Frames between consecutive attacks.
    pub attack_cooldown: u32,
}

impl EnemyKind {
    /// Statistics assigned to freshly spawned enemies of this kind.
    #[must_use]
    pub fn stats(self) -> EnemyStats {
        let base = EnemyStats {
            max_health: 50,
            attack: 5,
            defense: 2,
            speed: 100.0 / FRAMES_PER_SECOND,
            attack_range: 50.0,
            view_range: 300.0,
            attack_cooldown: 120,
        };
        match self {
            Self::Melee => EnemyStats {
                max_health: 50,
                attack: 8,
                defense: 3,
                ..base
            },
            Self::Ranged => EnemyStats {
                max_health: 30,
                attack: 6,
                defense: 1,
                attack_range: 200.0,
                ..base
            },
            Self::Tank => EnemyStats {
                max_health: 100,
                attack: 10,
                defense: 8,
                speed: 50.0 / FRAMES_PER_SECOND,
                ..base
            },
        }
    }

    /// Sprite requested for enemies of this kind.
    #[must_use]
    pub const fn sprite(self) -> SpriteKey {
        match self {
            Self::Melee => SpriteKey::Melee,
            Self::Ranged => SpriteKey::Ranged,
            Self::Tank => SpriteKey::Tank,
        }
    }
}

/// AI-controlled opponent.
#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    /// Shared entity record.
    pub entity: Entity,
    /// Archetype tag.
    pub kind: EnemyKind,
    /// Damage dealt per attack before variance.
    pub attack: u32,
    /// Defense rating.
    pub defense: u32,
    /// Movement per frame while approaching.
    pub speed: f32,
    /// Distance at which the enemy stops and attacks.
    pub attack_range: f32,
    /// Distance at which the enemy notices the active hero.
    pub view_range: f32,
    /// Frames between consecutive attacks.
    pub attack_cooldown: u32,
    remaining_cooldown: u32,
}

impl Enemy {
    /// Spawns an enemy of `kind` with its archetype statistics.
    #[must_use]
    pub fn spawn(id: EntityId, kind: EnemyKind, position: Vec2) -> Self {
        let stats = kind.stats();
        Self {
            entity: Entity::new(
                id,
                Body::new(position, Vec2::splat(UNIT_SIZE)),
                Some(Health::full(stats.max_health)),
                kind.sprite(),
            ),
            kind,
            attack: stats.attack,
            defense: stats.defense,
            speed: stats.speed,
            attack_range: stats.attack_range,
            view_range: stats.view_range,
            attack_cooldown: stats.attack_cooldown,
            remaining_cooldown: 0,
        }
    }

    /// Frames left before the enemy may attack again.
    #[must_use]
    pub const fn remaining_cooldown(&self) -> u32 {
        self.remaining_cooldown
    }

    /// Reports whether the attack cooldown has elapsed.
    #[must_use]
    pub const fn ready_to_attack(&self) -> bool {
        self.remaining_cooldown == 0
    }

    /// Restarts the attack cooldown after a successful attack.
    pub fn reset_attack_cooldown(&mut self) {
        self.remaining_cooldown = self.attack_cooldown;
    }

    /// Prevents the enemy from attacking for `frames` frames.
    pub fn stun(&mut self, frames: u32) {
        self.remaining_cooldown = frames;
    }

    /// Moves the enemy by its velocity and counts the attack cooldown down.
    pub fn integrate(&mut self) {
        self.entity.body.integrate();
        self.remaining_cooldown = self.remaining_cooldown.saturating_sub(1);
    }
}

/// Description of a projectile handed to the world by an ability.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileLaunch {
    /// Upper-left position the projectile starts from.
    pub origin: Vec2,
    /// Point the projectile flies towards.
    pub target: Vec2,
    /// Travel speed in world units per second.
    pub speed: f32,
    /// Damage applied to each enemy hit.
    pub damage: u32,
    /// Radius of the explosion for explosive projectiles.
    pub aoe_radius: f32,
    /// Whether the projectile damages every enemy within `aoe_radius`.
    pub explosive: bool,
    /// Visual resource for the projectile.
    pub sprite: SpriteKey,
    /// Hero that fired the projectile. Attribution only, never ownership.
    pub owner: EntityId,
}

impl ProjectileLaunch {
    /// Creates a single-target projectile launch.
    #[must_use]
    pub const fn new(origin: Vec2, target: Vec2, speed: f32, damage: u32, owner: EntityId) -> Self {
        Self {
            origin,
            target,
            speed,
            damage,
            aoe_radius: 0.0,
            explosive: false,
            sprite: SpriteKey::Fireball,
            owner,
        }
    }

    /// Turns the launch into an explosive projectile with the provided radius.
    #[must_use]
    pub const fn explosive(mut self, radius: f32) -> Self {
        self.aoe_radius = radius;
        self.explosive = true;
        self
    }

    /// Overrides the sprite used by the projectile.
    #[must_use]
    pub const fn with_sprite(mut self, sprite: SpriteKey) -> Self {
        self.sprite = sprite;
        self
    }
}

/// Projectile in flight.
#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    /// Shared entity record. Projectiles carry no health.
    pub entity: Entity,
    /// Point the projectile flies towards.
    pub target: Vec2,
    /// Travel speed in world units per second.
    pub speed: f32,
    /// Damage applied to each enemy hit.
    pub damage: u32,
    /// Radius of the explosion for explosive projectiles.
    pub aoe_radius: f32,
    /// Whether the projectile damages every enemy within `aoe_radius`.
    pub explosive: bool,
    /// Hero that fired the projectile. Attribution only, never ownership.
    pub owner: EntityId,
    /// Frames the projectile has been alive.
    pub lifetime: u32,
    /// Frame count after which the projectile expires.
    pub max_lifetime: u32,
}

impl Projectile {
    /// Materialises a launch into a projectile travelling towards its target.
    ///
    /// A launch whose origin equals its target gets no velocity and expires on
    /// its first update.
    #[must_use]
    pub fn from_launch(id: EntityId, launch: ProjectileLaunch) -> Self {
        let mut body = Body::new(launch.origin, Vec2::splat(PROJECTILE_SIZE));
        if let Some(direction) = geometry::direction_towards(launch.origin, launch.target) {
            body.velocity = direction * (launch.speed / FRAMES_PER_SECOND);
        }
        Self {
            entity: Entity::new(id, body, None, launch.sprite),
            target: launch.target,
            speed: launch.speed,
            damage: launch.damage,
            aoe_radius: launch.aoe_radius,
            explosive: launch.explosive,
            owner: launch.owner,
            lifetime: 0,
            max_lifetime: PROJECTILE_MAX_LIFETIME,
        }
    }

    /// Reports whether the projectile has run out of lifetime or arrived.
    #[must_use]
    pub const fn is_expired(&self) -> bool {
        self.lifetime >= self.max_lifetime
    }

    /// Moves the projectile one frame and updates its expiry.
    pub fn advance(&mut self) {
        self.entity.body.integrate();
        self.lifetime = self.lifetime.saturating_add(1);
        if self.is_expired() {
            return;
        }
        if geometry::distance(self.entity.position(), self.target) < PROJECTILE_ARRIVAL_RADIUS {
            self.lifetime = self.max_lifetime;
        }
    }
}

/// Categories of temporary visual effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    /// Flash left behind by an exploding projectile.
    Impact,
}

impl EffectKind {
    /// Sprite requested for the effect.
    #[must_use]
    pub const fn sprite(self) -> SpriteKey {
        match self {
            Self::Impact => SpriteKey::Impact,
        }
    }
}

/// Description of an effect handed to the world.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectSpawn {
    /// Category of the effect.
    pub kind: EffectKind,
    /// Upper-left position and extent.
    pub body: Body,
    /// Frames the effect stays visible.
    pub duration: u32,
    /// Entity the effect is attached to, if any.
    pub anchor: Option<EntityId>,
}

/// Temporary visual entity.
#[derive(Clone, Debug, PartialEq)]
pub struct Effect {
    /// Shared entity record.
    pub entity: Entity,
    /// Category of the effect.
    pub kind: EffectKind,
    /// Frames left before the effect disappears.
    pub remaining: u32,
    /// Entity the effect is attached to, if any.
    pub anchor: Option<EntityId>,
}

impl Effect {
    /// Materialises an effect from its spawn description.
    #[must_use]
    pub fn from_spawn(id: EntityId, spawn: EffectSpawn) -> Self {
        Self {
            entity: Entity::new(id, spawn.body, None, spawn.kind.sprite()),
            kind: spawn.kind,
            remaining: spawn.duration,
            anchor: spawn.anchor,
        }
    }

    /// Moves the effect and counts its duration down.
    pub fn integrate(&mut self) {
        self.entity.body.integrate();
        self.remaining = self.remaining.saturating_sub(1);
    }

    /// Reports whether the effect has run its course.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.remaining == 0
    }
}
