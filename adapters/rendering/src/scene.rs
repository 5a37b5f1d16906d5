//! Frame snapshots handed to rendering backends.

use glam::Vec2;
use hero_battle_core::{ArenaBounds, Entity, EntityId, GameState, Health, SpriteKey};
use hero_battle_system_abilities::Hero;
use hero_battle_world::{query, World};

/// Draw order bucket of a scene entity, back to front.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Layer {
    /// Player-controlled heroes.
    Hero,
    /// AI-controlled enemies.
    Enemy,
    /// Projectiles in flight.
    Projectile,
    /// Temporary visual effects.
    Effect,
}

/// Immutable snapshot of a single visual entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneEntity {
    /// Identifier allocated by the world.
    pub id: EntityId,
    /// Upper-left corner in world units.
    pub position: Vec2,
    /// Width and height in world units.
    pub size: Vec2,
    /// Hit points, drawn as a health bar when present.
    pub health: Option<Health>,
    /// Visual resource requested from the asset catalog.
    pub sprite: SpriteKey,
    /// Draw order bucket.
    pub layer: Layer,
    /// Whether the entity is the hero currently under player control.
    pub highlighted: bool,
}

impl SceneEntity {
    fn from_entity(entity: &Entity, layer: Layer) -> Self {
        Self {
            id: entity.id,
            position: entity.body.position,
            size: entity.body.size,
            health: entity.health,
            sprite: entity.sprite,
            layer,
            highlighted: false,
        }
    }
}

/// Cooldown state of one active ability.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AbilityCooldown {
    /// Ability name.
    pub name: &'static str,
    /// Frames until the ability is ready again.
    pub remaining: u32,
    /// Full cooldown length in frames.
    pub length: u32,
}

/// Status panel of the active hero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeroHud {
    /// Hero name.
    pub name: &'static str,
    /// Mana currently available.
    pub mana: u32,
    /// Mana capacity.
    pub max_mana: u32,
    /// Accumulated ultimate energy.
    pub ultimate_energy: u32,
    /// Active abilities in slot order.
    pub cooldowns: Vec<AbilityCooldown>,
}

impl HeroHud {
    fn from_hero(hero: &Hero) -> Self {
        let cooldowns = hero
            .kit()
            .actives()
            .iter()
            .map(|ability| AbilityCooldown {
                name: ability.name(),
                remaining: ability.current_cooldown(),
                length: ability.cooldown(),
            })
            .collect();
        Self {
            name: hero.name(),
            mana: hero.caster.mana.current(),
            max_mana: hero.caster.mana.max(),
            ultimate_energy: hero.caster.ultimate_energy(),
            cooldowns,
        }
    }
}

/// Heads-up display data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hud {
    /// Wave shown to the player, never beyond `max_waves`.
    pub wave: u32,
    /// Number of waves in the session.
    pub max_waves: u32,
    /// Enemies currently alive.
    pub enemy_count: usize,
    /// Active hero panel, absent when the roster is empty.
    pub active_hero: Option<HeroHud>,
}

/// Scene description combining every visual entity and the HUD.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Arena the entities live in.
    pub arena: ArenaBounds,
    /// Frame the snapshot was taken at.
    pub frame: u64,
    /// Visual entities sorted by layer.
    pub entities: Vec<SceneEntity>,
    /// Heads-up display.
    pub hud: Hud,
    /// Session outcome.
    pub state: GameState,
}

impl Scene {
    /// Captures the current world state.
    #[must_use]
    pub fn capture(world: &World) -> Self {
        let active = query::active_hero_index(world);
        let heroes = query::heroes(world);
        let enemies = query::enemies(world);

        let mut entities = Vec::with_capacity(
            heroes.len() + enemies.len() + query::projectiles(world).len(),
        );
        for (index, hero) in heroes.iter().enumerate() {
            let mut entity = SceneEntity::from_entity(&hero.caster.entity, Layer::Hero);
            entity.highlighted = index == active;
            entities.push(entity);
        }
        entities.extend(
            enemies
                .iter()
                .map(|enemy| SceneEntity::from_entity(&enemy.entity, Layer::Enemy)),
        );
        entities.extend(
            query::projectiles(world)
                .iter()
                .map(|projectile| SceneEntity::from_entity(&projectile.entity, Layer::Projectile)),
        );
        entities.extend(
            query::effects(world)
                .iter()
                .map(|effect| SceneEntity::from_entity(&effect.entity, Layer::Effect)),
        );

        let progress = query::wave_progress(world);
        Self {
            arena: query::arena(world),
            frame: query::frame(world),
            entities,
            hud: Hud {
                wave: progress.display_wave(),
                max_waves: progress.total,
                enemy_count: enemies.len(),
                active_hero: query::active_hero(world).map(HeroHud::from_hero),
            },
            state: query::game_state(world),
        }
    }

    /// Entities of a single layer.
    pub fn layer(&self, layer: Layer) -> impl Iterator<Item = &SceneEntity> + '_ {
        self.entities
            .iter()
            .filter(move |entity| entity.layer == layer)
    }
}
