#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure steering system choosing each enemy's velocity from its distance to the active hero.

use glam::Vec2;
use hero_battle_core::{geometry, Enemy, Entity};

/// Behaviour an enemy settles on for the current frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stance {
    /// No hero in sight; the enemy stands still.
    Idle,
    /// The hero is visible but out of reach; the enemy closes in.
    Approach,
    /// The hero is within attack range; the enemy stops to attack.
    Engage,
}

/// Enemy steering system.
#[derive(Debug, Default)]
pub struct EnemyAi;

impl EnemyAi {
    /// Creates the steering system.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Picks the stance of a single enemy and sets its velocity accordingly.
    ///
    /// Distances are measured between upper-left positions. An absent or
    /// defeated hero leaves the enemy idle.
    pub fn steer(&self, enemy: &mut Enemy, hero: Option<&Entity>) -> Stance {
        let Some(hero) = hero.filter(|hero| hero.is_alive()) else {
            enemy.entity.body.velocity = Vec2::ZERO;
            return Stance::Idle;
        };

        let from = enemy.entity.position();
        let to = hero.position();
        let distance = geometry::distance(from, to);

        if distance > enemy.view_range {
            enemy.entity.body.velocity = Vec2::ZERO;
            return Stance::Idle;
        }
        if distance <= enemy.attack_range {
            enemy.entity.body.velocity = Vec2::ZERO;
            return Stance::Engage;
        }

        let direction = geometry::direction_towards(from, to).unwrap_or(Vec2::ZERO);
        enemy.entity.body.velocity = direction * enemy.speed;
        Stance::Approach
    }

    /// Steers every enemy against the active hero.
    pub fn handle(&self, enemies: &mut [Enemy], hero: Option<&Entity>) {
        for enemy in enemies {
            let _ = self.steer(enemy, hero);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hero_battle_core::{Body, EnemyKind, EntityId, Health, SpriteKey};

    fn hero_at(position: Vec2, health: u32) -> Entity {
        let mut pool = Health::full(100);
        let _ = pool.take(100 - health);
        Entity::new(
            EntityId::new(1),
            Body::new(position, Vec2::splat(32.0)),
            Some(pool),
            SpriteKey::Mage,
        )
    }

    #[test]
    fn defeated_hero_leaves_enemies_idle() {
        let ai = EnemyAi::new();
        let mut enemy = Enemy::spawn(EntityId::new(2), EnemyKind::Melee, Vec2::new(100.0, 0.0));
        enemy.entity.body.velocity = Vec2::ONE;
        let hero = hero_at(Vec2::ZERO, 0);

        assert_eq!(ai.steer(&mut enemy, Some(&hero)), Stance::Idle);
        assert_eq!(enemy.entity.body.velocity, Vec2::ZERO);
        assert_eq!(ai.steer(&mut enemy, None), Stance::Idle);
    }

    #[test]
    fn view_range_boundary_still_approaches() {
        let ai = EnemyAi::new();
        let mut enemy = Enemy::spawn(EntityId::new(2), EnemyKind::Melee, Vec2::new(300.0, 0.0));
        let hero = hero_at(Vec2::ZERO, 50);

        assert_eq!(ai.steer(&mut enemy, Some(&hero)), Stance::Approach);
        assert!(enemy.entity.body.velocity.x < 0.0);
    }
}
