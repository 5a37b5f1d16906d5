use glam::Vec2;
use hero_battle_core::{Enemy, EnemyKind, EntityId, Projectile, ProjectileLaunch};
use hero_battle_system_projectiles::{prune_dead, ProjectileEngine, Resolution};

const HERO: EntityId = EntityId::new(1);

fn health(enemy: &Enemy) -> u32 {
    enemy.entity.health.map_or(0, |health| health.current())
}

fn frame(
    engine: &mut ProjectileEngine,
    projectiles: &mut Vec<Projectile>,
    enemies: &mut Vec<Enemy>,
) -> Resolution {
    let mut resolution = Resolution::new();
    engine.advance(projectiles);
    engine.resolve(projectiles, enemies, &mut resolution);
    let mut removed = Vec::new();
    prune_dead(enemies, &mut removed);
    resolution
}

#[test]
fn single_target_projectile_damages_exactly_one_enemy_and_disappears() {
    let mut engine = ProjectileEngine::new();
    let mut enemies = vec![Enemy::spawn(
        EntityId::new(10),
        EnemyKind::Tank,
        Vec2::new(100.0, 0.0),
    )];
    let launch = ProjectileLaunch::new(
        Vec2::new(60.0, 12.0),
        Vec2::new(116.0, 16.0),
        600.0,
        15,
        HERO,
    );
    let mut projectiles = vec![Projectile::from_launch(EntityId::new(20), launch)];

    let mut frames = 0;
    while !projectiles.is_empty() {
        let resolution = frame(&mut engine, &mut projectiles, &mut enemies);
        frames += 1;
        assert!(frames < 30, "projectile never resolved");
        if let Some(hit) = resolution.hits.first() {
            assert_eq!(hit.enemy, EntityId::new(10));
            assert_eq!(hit.owner, HERO);
            assert_eq!((hit.old, hit.new), (100, 85));
            assert!(projectiles.is_empty(), "projectile disappears with its hit");
        }
    }

    assert_eq!(health(&enemies[0]), 85);
}

#[test]
fn explosive_projectile_damages_everything_in_radius_then_disappears() {
    let mut engine = ProjectileEngine::new();
    let mut enemies = vec![
        Enemy::spawn(EntityId::new(10), EnemyKind::Tank, Vec2::new(200.0, 0.0)),
        Enemy::spawn(EntityId::new(11), EnemyKind::Tank, Vec2::new(200.0, 40.0)),
        Enemy::spawn(EntityId::new(12), EnemyKind::Tank, Vec2::new(200.0, 300.0)),
    ];
    let launch = ProjectileLaunch::new(Vec2::ZERO, Vec2::new(216.0, 16.0), 400.0, 25, HERO)
        .explosive(50.0);
    let mut projectiles = vec![Projectile::from_launch(EntityId::new(20), launch)];

    let mut detonation = None;
    for _ in 0..60 {
        let resolution = frame(&mut engine, &mut projectiles, &mut enemies);
        if !resolution.hits.is_empty() {
            detonation = Some(resolution);
            break;
        }
    }

    let detonation = detonation.expect("fireball reached its targets");
    assert!(projectiles.is_empty());
    assert_eq!(detonation.resolved.len(), 1);
    assert!(detonation.resolved[0].detonated);
    assert_eq!(detonation.resolved[0].hits as usize, detonation.hits.len());
    assert!(detonation.hits.iter().all(|hit| hit.old - hit.new == 25));
    assert_eq!(health(&enemies[2]), 100, "far enemy is outside the blast");
}

#[test]
fn explosive_projectile_without_targets_keeps_flying() {
    let mut engine = ProjectileEngine::new();
    let mut enemies = vec![Enemy::spawn(
        EntityId::new(10),
        EnemyKind::Melee,
        Vec2::new(700.0, 500.0),
    )];
    let launch =
        ProjectileLaunch::new(Vec2::ZERO, Vec2::new(400.0, 0.0), 400.0, 25, HERO).explosive(50.0);
    let mut projectiles = vec![Projectile::from_launch(EntityId::new(20), launch)];

    let resolution = frame(&mut engine, &mut projectiles, &mut enemies);

    assert!(resolution.resolved.is_empty());
    assert_eq!(projectiles.len(), 1);
}

#[test]
fn lethal_hits_prune_the_enemy() {
    let mut engine = ProjectileEngine::new();
    let mut enemies = vec![Enemy::spawn(
        EntityId::new(10),
        EnemyKind::Ranged,
        Vec2::new(40.0, 0.0),
    )];
    let launch = ProjectileLaunch::new(
        Vec2::new(40.0, 0.0),
        Vec2::new(400.0, 0.0),
        60.0,
        500,
        HERO,
    );
    let mut projectiles = vec![Projectile::from_launch(EntityId::new(20), launch)];

    let resolution = frame(&mut engine, &mut projectiles, &mut enemies);

    assert_eq!(resolution.hits[0].new, 0);
    assert!(enemies.is_empty());
}

#[test]
fn overlapping_boxes_still_need_overlapping_hit_circles() {
    let mut engine = ProjectileEngine::new();
    let mut enemies = vec![Enemy::spawn(
        EntityId::new(10),
        EnemyKind::Melee,
        Vec2::new(100.0, 100.0),
    )];
    let corner = ProjectileLaunch::new(
        Vec2::new(95.0, 95.0),
        Vec2::new(400.0, 400.0),
        400.0,
        15,
        HERO,
    );
    let mut projectiles = vec![Projectile::from_launch(EntityId::new(20), corner)];
    let mut resolution = Resolution::new();

    engine.resolve(&mut projectiles, &mut enemies, &mut resolution);
    assert!(resolution.hits.is_empty(), "corner graze is not a hit");
    assert_eq!(projectiles.len(), 1);

    let inside = ProjectileLaunch::new(
        Vec2::new(101.0, 101.0),
        Vec2::new(400.0, 400.0),
        400.0,
        15,
        HERO,
    );
    projectiles = vec![Projectile::from_launch(EntityId::new(21), inside)];
    engine.resolve(&mut projectiles, &mut enemies, &mut resolution);
    assert_eq!(resolution.hits.len(), 1);
    assert_eq!((resolution.hits[0].old, resolution.hits[0].new), (50, 35));
    assert!(projectiles.is_empty());
}
