use glam::Vec2;
use hero_battle_core::{Body, Enemy, EnemyKind, Entity, EntityId, Health, SpriteKey};
use hero_battle_system_enemy_ai::{EnemyAi, Stance};

fn hero_at(position: Vec2) -> Entity {
    Entity::new(
        EntityId::new(1),
        Body::new(position, Vec2::splat(32.0)),
        Some(Health::full(80)),
        SpriteKey::Archer,
    )
}

#[test]
fn enemy_beyond_view_range_stays_still() {
    let ai = EnemyAi::new();
    let hero = hero_at(Vec2::new(100.0, 300.0));
    let mut enemy = Enemy::spawn(EntityId::new(7), EnemyKind::Melee, Vec2::new(500.0, 300.0));
    enemy.entity.body.velocity = Vec2::new(3.0, 3.0);

    assert_eq!(ai.steer(&mut enemy, Some(&hero)), Stance::Idle);
    assert_eq!(enemy.entity.body.velocity, Vec2::ZERO);
}

#[test]
fn enemy_in_attack_range_stops() {
    let ai = EnemyAi::new();
    let hero = hero_at(Vec2::new(100.0, 300.0));
    let mut enemy = Enemy::spawn(EntityId::new(7), EnemyKind::Ranged, Vec2::new(250.0, 300.0));
    enemy.entity.body.velocity = Vec2::new(-1.0, 0.0);

    assert_eq!(ai.steer(&mut enemy, Some(&hero)), Stance::Engage);
    assert_eq!(enemy.entity.body.velocity, Vec2::ZERO);
}

#[test]
fn enemy_between_ranges_moves_towards_hero_at_its_speed() {
    let ai = EnemyAi::new();
    let hero = hero_at(Vec2::new(100.0, 100.0));
    let mut enemy = Enemy::spawn(EntityId::new(7), EnemyKind::Tank, Vec2::new(220.0, 260.0));

    assert_eq!(ai.steer(&mut enemy, Some(&hero)), Stance::Approach);

    let velocity = enemy.entity.body.velocity;
    assert!((velocity.length() - enemy.speed).abs() < 1e-5);
    let expected = Vec2::new(-120.0, -160.0).normalize() * enemy.speed;
    assert!((velocity - expected).length() < 1e-5);
}

#[test]
fn handle_steers_every_enemy() {
    let ai = EnemyAi::new();
    let hero = hero_at(Vec2::ZERO);
    let mut enemies = vec![
        Enemy::spawn(EntityId::new(2), EnemyKind::Melee, Vec2::new(40.0, 0.0)),
        Enemy::spawn(EntityId::new(3), EnemyKind::Melee, Vec2::new(200.0, 0.0)),
        Enemy::spawn(EntityId::new(4), EnemyKind::Melee, Vec2::new(700.0, 0.0)),
    ];

    ai.handle(&mut enemies, Some(&hero));

    assert_eq!(enemies[0].entity.body.velocity, Vec2::ZERO);
    assert!(enemies[1].entity.body.velocity.x < 0.0);
    assert_eq!(enemies[2].entity.body.velocity, Vec2::ZERO);
}
