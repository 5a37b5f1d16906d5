#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Projectile flight, hit resolution and removal of the dead.
//!
//! Removal is always two-phase: a pass over the live collection records the
//! identifiers to drop, and only then is the collection rebuilt. Nothing is
//! removed from a collection while it is being iterated.

use glam::Vec2;
use hero_battle_core::{geometry, Enemy, EntityId, Projectile};

/// Damage one projectile dealt to one enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ProjectileHit {
    /// Projectile that hit.
    pub projectile: EntityId,
    /// Hero credited with the projectile.
    pub owner: EntityId,
    /// Enemy that was hit.
    pub enemy: EntityId,
    /// Enemy health before the hit.
    pub old: u32,
    /// Enemy health after the hit.
    pub new: u32,
}

/// Projectile removed from the arena during resolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedProjectile {
    /// Identifier of the removed projectile.
    pub projectile: EntityId,
    /// Number of enemies it damaged.
    pub hits: u32,
    /// Center of the projectile when it was removed.
    pub position: Vec2,
    /// Whether it exploded over one or more enemies.
    pub detonated: bool,
}

/// Outcome of a resolution pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Resolution {
    /// Every hit in resolution order.
    pub hits: Vec<ProjectileHit>,
    /// Every projectile removed, in collection order.
    pub resolved: Vec<ResolvedProjectile>,
}

impl Resolution {
    /// Creates an empty resolution buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empties the buffer for reuse.
    pub fn clear(&mut self) {
        self.hits.clear();
        self.resolved.clear();
    }
}

/// Projectile engine with reusable scratch buffers.
#[derive(Debug, Default)]
pub struct ProjectileEngine {
    removals: Vec<EntityId>,
}

impl ProjectileEngine {
    /// Creates an engine with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves every projectile one frame and updates its expiry.
    pub fn advance(&mut self, projectiles: &mut [Projectile]) {
        for projectile in projectiles {
            projectile.advance();
        }
    }

    /// Resolves hits and removes expired or spent projectiles.
    ///
    /// Expired projectiles are removed without hitting anything. A regular
    /// projectile damages the first living enemy whose hit circle contains it
    /// and is removed. An explosive projectile damages every living enemy
    /// within its radius and is removed once it has hit at least one.
    /// Projectiles that neither expired nor hit keep flying.
    pub fn resolve(
        &mut self,
        projectiles: &mut Vec<Projectile>,
        enemies: &mut [Enemy],
        out: &mut Resolution,
    ) {
        self.removals.clear();

        for projectile in projectiles.iter() {
            let center = projectile.entity.center();
            if projectile.is_expired() {
                self.removals.push(projectile.entity.id);
                out.resolved.push(ResolvedProjectile {
                    projectile: projectile.entity.id,
                    hits: 0,
                    position: center,
                    detonated: false,
                });
                continue;
            }

            let hits = if projectile.explosive {
                explode(projectile, center, enemies, out)
            } else {
                strike(projectile, center, enemies, out)
            };
            if hits == 0 {
                continue;
            }

            self.removals.push(projectile.entity.id);
            out.resolved.push(ResolvedProjectile {
                projectile: projectile.entity.id,
                hits,
                position: center,
                detonated: projectile.explosive,
            });
        }

        if self.removals.is_empty() {
            return;
        }
        self.removals.sort_unstable();
        let removals = &self.removals;
        projectiles.retain(|projectile| removals.binary_search(&projectile.entity.id).is_err());
    }
}

fn strike(
    projectile: &Projectile,
    center: Vec2,
    enemies: &mut [Enemy],
    out: &mut Resolution,
) -> u32 {
    let reach = projectile.entity.body.half_width();
    let bounds = projectile.entity.body.rect();
    for enemy in enemies.iter_mut() {
        if !enemy.entity.is_alive() {
            continue;
        }
        // Square bodies: each box encloses its hit circle.
        if !bounds.overlaps(&enemy.entity.body.rect()) {
            continue;
        }
        let radius = enemy.entity.body.half_width();
        if !geometry::circles_overlap(center, reach, enemy.entity.center(), radius) {
            continue;
        }
        record_hit(projectile, enemy, out);
        return 1;
    }
    0
}

fn explode(
    projectile: &Projectile,
    center: Vec2,
    enemies: &mut [Enemy],
    out: &mut Resolution,
) -> u32 {
    let mut hits = 0;
    for enemy in enemies.iter_mut() {
        if !enemy.entity.is_alive() {
            continue;
        }
        if geometry::distance(center, enemy.entity.center()) > projectile.aoe_radius {
            continue;
        }
        record_hit(projectile, enemy, out);
        hits += 1;
    }
    hits
}

fn record_hit(projectile: &Projectile, enemy: &mut Enemy, out: &mut Resolution) {
    let Some(health) = enemy.entity.health.as_mut() else {
        return;
    };
    let (old, new) = health.take(projectile.damage);
    out.hits.push(ProjectileHit {
        projectile: projectile.entity.id,
        owner: projectile.owner,
        enemy: enemy.entity.id,
        old,
        new,
    });
}

/// Moves every enemy without health left from `enemies` into `removed`, preserving order.
pub fn prune_dead(enemies: &mut Vec<Enemy>, removed: &mut Vec<Enemy>) {
    if enemies.iter().all(|enemy| enemy.entity.is_alive()) {
        return;
    }
    let (alive, dead): (Vec<Enemy>, Vec<Enemy>) = enemies
        .drain(..)
        .partition(|enemy| enemy.entity.is_alive());
    *enemies = alive;
    removed.extend(dead);
}

#[cfg(test)]
mod tests {
    use super::*;
    use hero_battle_core::{EnemyKind, ProjectileLaunch};

    fn projectile_at(id: u32, position: Vec2, target: Vec2) -> Projectile {
        Projectile::from_launch(
            EntityId::new(id),
            ProjectileLaunch::new(position, target, 60.0, 10, EntityId::new(1)),
        )
    }

    #[test]
    fn expired_projectiles_are_removed_without_hits() {
        let mut engine = ProjectileEngine::new();
        let mut projectile = projectile_at(20, Vec2::ZERO, Vec2::new(500.0, 0.0));
        projectile.lifetime = projectile.max_lifetime;
        let mut projectiles = vec![projectile];
        let mut enemies = vec![Enemy::spawn(EntityId::new(5), EnemyKind::Melee, Vec2::ZERO)];
        let mut resolution = Resolution::new();

        engine.resolve(&mut projectiles, &mut enemies, &mut resolution);

        assert!(projectiles.is_empty());
        assert!(resolution.hits.is_empty());
        assert_eq!(resolution.resolved[0].hits, 0);
        assert_eq!(enemies[0].entity.health.map(|h| h.current()), Some(50));
    }

    #[test]
    fn regular_projectile_hits_only_first_enemy() {
        let mut engine = ProjectileEngine::new();
        let mut projectiles = vec![projectile_at(20, Vec2::new(12.0, 12.0), Vec2::new(500.0, 0.0))];
        let mut enemies = vec![
            Enemy::spawn(EntityId::new(5), EnemyKind::Melee, Vec2::ZERO),
            Enemy::spawn(EntityId::new(6), EnemyKind::Melee, Vec2::ZERO),
        ];
        let mut resolution = Resolution::new();

        engine.resolve(&mut projectiles, &mut enemies, &mut resolution);

        assert_eq!(resolution.hits.len(), 1);
        assert_eq!(resolution.hits[0].enemy, EntityId::new(5));
        assert_eq!(enemies[1].entity.health.map(|h| h.current()), Some(50));
    }

    #[test]
    fn prune_moves_dead_enemies_in_order() {
        let mut enemies: Vec<Enemy> = (0..4)
            .map(|index| Enemy::spawn(EntityId::new(index), EnemyKind::Ranged, Vec2::ZERO))
            .collect();
        for index in [1, 3] {
            if let Some(health) = enemies[index].entity.health.as_mut() {
                let _ = health.take(1_000);
            }
        }
        let mut removed = Vec::new();

        prune_dead(&mut enemies, &mut removed);

        let alive: Vec<u32> = enemies.iter().map(|enemy| enemy.entity.id.get()).collect();
        let dead: Vec<u32> = removed.iter().map(|enemy| enemy.entity.id.get()).collect();
        assert_eq!(alive, vec![0, 2]);
        assert_eq!(dead, vec![1, 3]);
    }
}
