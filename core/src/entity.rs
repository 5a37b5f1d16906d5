//! Entity record shared by heroes, enemies, projectiles and effects.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// Unique identifier assigned to every simulated entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(u32);

impl EntityId {
    /// Creates a new entity identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Spatial state of an entity: upper-left position, extent and per-frame velocity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    /// Upper-left corner in world units.
    pub position: Vec2,
    /// Width and height in world units.
    pub size: Vec2,
    /// Displacement applied on every integration step.
    pub velocity: Vec2,
}

impl Body {
    /// Creates a stationary body at the provided position.
    #[must_use]
    pub const fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            size,
            velocity: Vec2::ZERO,
        }
    }

    /// Geometric center of the body.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        self.position + self.size * 0.5
    }

    /// Axis-aligned bounds of the body.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.position, self.size)
    }

    /// Half of the body's width, used as its circular hit radius.
    #[must_use]
    pub fn half_width(&self) -> f32 {
        self.size.x * 0.5
    }

    /// Advances the position by one frame of velocity.
    pub fn integrate(&mut self) {
        self.position += self.velocity;
    }
}

/// Health pool whose current value always stays within `0..=max`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Health {
    current: u32,
    max: u32,
}

impl Health {
    /// Creates a full health pool.
    #[must_use]
    pub const fn full(max: u32) -> Self {
        Self { current: max, max }
    }

    /// Current hit points.
    #[must_use]
    pub const fn current(&self) -> u32 {
        self.current
    }

    /// Maximum hit points.
    #[must_use]
    pub const fn max(&self) -> u32 {
        self.max
    }

    /// Reports whether no hit points remain.
    #[must_use]
    pub const fn is_depleted(&self) -> bool {
        self.current == 0
    }

    /// Subtracts `amount`, clamping at zero, and returns `(old, new)`.
    pub fn take(&mut self, amount: u32) -> (u32, u32) {
        let old = self.current;
        self.current = self.current.saturating_sub(amount);
        (old, self.current)
    }
}

/// Mana pool spent by abilities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Mana {
    current: u32,
    max: u32,
}

impl Mana {
    /// Creates a full mana pool.
    #[must_use]
    pub const fn full(max: u32) -> Self {
        Self { current: max, max }
    }

    /// Creates a pool with an explicit current value, clamped to `max`.
    #[must_use]
    pub fn with_current(current: u32, max: u32) -> Self {
        Self {
            current: current.min(max),
            max,
        }
    }

    /// Mana currently available.
    #[must_use]
    pub const fn current(&self) -> u32 {
        self.current
    }

    /// Capacity of the pool.
    #[must_use]
    pub const fn max(&self) -> u32 {
        self.max
    }

    /// Reports whether the pool can cover `cost`.
    #[must_use]
    pub const fn covers(&self, cost: u32) -> bool {
        self.current >= cost
    }

    /// Deducts `cost` from the pool. Callers check [`Mana::covers`] first.
    pub fn spend(&mut self, cost: u32) {
        self.current = self.current.saturating_sub(cost);
    }

    /// Restores `amount` mana without exceeding the capacity.
    pub fn regenerate(&mut self, amount: u32) {
        self.current = self.current.saturating_add(amount).min(self.max);
    }
}

/// Key naming the visual resource an entity asks the asset collaborator for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpriteKey {
    /// Mage hero portrait.
    Mage,
    /// Knight hero portrait.
    Knight,
    /// Archer hero portrait.
    Archer,
    /// Melee enemy.
    Melee,
    /// Ranged enemy.
    Ranged,
    /// Tank enemy.
    Tank,
    /// Explosive magic projectile.
    Fireball,
    /// Arrow projectile.
    Arrow,
    /// Short-lived impact flash.
    Impact,
}

impl SpriteKey {
    /// Every sprite key, in manifest order.
    pub const ALL: [SpriteKey; 9] = [
        SpriteKey::Mage,
        SpriteKey::Knight,
        SpriteKey::Archer,
        SpriteKey::Melee,
        SpriteKey::Ranged,
        SpriteKey::Tank,
        SpriteKey::Fireball,
        SpriteKey::Arrow,
        SpriteKey::Impact,
    ];

    /// String key used when looking the sprite up in an asset catalog.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mage => "mage",
            Self::Knight => "knight",
            Self::Archer => "archer",
            Self::Melee => "melee",
            Self::Ranged => "ranged",
            Self::Tank => "tank",
            Self::Fireball => "fireball",
            Self::Arrow => "arrow",
            Self::Impact => "impact",
        }
    }
}

/// Common record carried by every simulated entity.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    /// Identifier allocated by the world.
    pub id: EntityId,
    /// Position, extent and velocity.
    pub body: Body,
    /// Hit points, absent for entities that cannot be damaged.
    pub health: Option<Health>,
    /// Visual resource requested from the asset collaborator.
    pub sprite: SpriteKey,
}

impl Entity {
    /// Creates a new entity record.
    #[must_use]
    pub const fn new(id: EntityId, body: Body, health: Option<Health>, sprite: SpriteKey) -> Self {
        Self {
            id,
            body,
            health,
            sprite,
        }
    }

    /// Reports whether the entity has health and at least one hit point left.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.health.map_or(false, |health| !health.is_depleted())
    }

    /// Upper-left position of the entity.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.body.position
    }

    /// Geometric center of the entity.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        self.body.center()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_take_clamps_at_zero() {
        let mut health = Health::full(30);
        assert_eq!(health.take(12), (30, 18));
        assert_eq!(health.take(50), (18, 0));
        assert!(health.is_depleted());
        assert_eq!(health.max(), 30);
    }

    #[test]
    fn mana_regenerates_up_to_capacity() {
        let mut mana = Mana::with_current(95, 100);
        mana.regenerate(3);
        assert_eq!(mana.current(), 98);
        mana.regenerate(10);
        assert_eq!(mana.current(), 100);
    }

    #[test]
    fn entity_without_health_is_never_alive() {
        let entity = Entity::new(
            EntityId::new(1),
            Body::new(Vec2::ZERO, Vec2::splat(8.0)),
            None,
            SpriteKey::Arrow,
        );
        assert!(!entity.is_alive());
    }

    #[test]
    fn body_center_accounts_for_size() {
        let body = Body::new(Vec2::new(10.0, 20.0), Vec2::splat(32.0));
        assert_eq!(body.center(), Vec2::new(26.0, 36.0));
        assert!((body.half_width() - 16.0).abs() < f32::EPSILON);
    }
}
