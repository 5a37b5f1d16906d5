#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Hero Battle.
//!
//! The world owns every entity collection. Mutations arrive exclusively as
//! [`Command`] values through [`apply`]; [`step`] composes one full frame out
//! of the commands an input source produced. Everything the world did is
//! reported back as [`Event`] values, and read access goes through [`query`].

mod arena;
mod config;
mod relay;

pub use config::{Config, DEFAULT_DAMAGE_SEED, DEFAULT_SPAWN_INTERVAL};

use glam::Vec2;
use hero_battle_core::{
    geometry, AbilityError, Body, Command, Direction, Effect, EffectKind, EffectSpawn, Enemy,
    EnemyKind, EntityId, Event, FrameInput, GameFacade, GameState, Projectile, WELCOME_BANNER,
};
use hero_battle_system_abilities::{roster, Hero};
use hero_battle_system_combat::CombatResolver;
use hero_battle_system_enemy_ai::EnemyAi;
use hero_battle_system_projectiles::{prune_dead, ProjectileEngine, Resolution};
use hero_battle_system_waves::{self as waves, WaveManager};

use arena::{Arena, IdAllocator};
use relay::HealthRelay;

/// Frames an impact flash stays visible.
pub const IMPACT_DURATION: u32 = 15;

const IMPACT_SIZE: f32 = 32.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Cast {
    Active(usize),
    Ultimate,
}

#[derive(Debug, Default)]
struct Scratch {
    commands: Vec<Command>,
    resolution: Resolution,
    removed: Vec<Enemy>,
    launched: Vec<(EntityId, EntityId)>,
    health_before: Vec<u32>,
}

/// Represents the authoritative Hero Battle session state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    config: Config,
    roster: Vec<Hero>,
    heroes: Vec<Hero>,
    active_hero: usize,
    enemies: Vec<Enemy>,
    projectiles: Vec<Projectile>,
    effects: Vec<Effect>,
    combat: CombatResolver,
    health_relay: HealthRelay,
    enemy_ai: EnemyAi,
    waves: WaveManager,
    projectile_engine: ProjectileEngine,
    state: GameState,
    ids: IdAllocator,
    frame: u64,
    scratch: Scratch,
}

impl World {
    /// Creates a session with the default configuration and the standard roster.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates a session with the provided configuration and the standard roster.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self::with_roster(config, roster(1))
    }

    /// Creates a session with a custom roster. Restarts bring the same roster back.
    ///
    /// An empty roster leaves nothing to defend and ends in defeat on the first tick.
    #[must_use]
    pub fn with_roster(config: Config, heroes: Vec<Hero>) -> Self {
        let first_free = heroes
            .iter()
            .map(|hero| hero.id().get())
            .max()
            .map_or(1, |id| id.saturating_add(1));
        let waves = WaveManager::new(
            config.waves().clone(),
            waves::Config::new(config.spawn_interval(), config.arena()),
        );
        let health_relay = HealthRelay::default();
        let mut combat = CombatResolver::new(config.damage_seed());
        combat.subscribe(Box::new(health_relay.clone()));
        Self {
            banner: WELCOME_BANNER,
            combat,
            health_relay,
            enemy_ai: EnemyAi::new(),
            waves,
            projectile_engine: ProjectileEngine::new(),
            roster: heroes.clone(),
            heroes,
            active_hero: 0,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            effects: Vec::new(),
            state: GameState::Playing,
            ids: IdAllocator::starting_at(first_free),
            frame: 0,
            scratch: Scratch::default(),
            config,
        }
    }

    fn switch_hero(&mut self, offset: i32, out_events: &mut Vec<Event>) {
        let count = self.heroes.len() as i64;
        if count == 0 {
            return;
        }
        let next = (self.active_hero as i64 + i64::from(offset)).rem_euclid(count) as usize;
        if next == self.active_hero {
            return;
        }
        if let Some(previous) = self.heroes.get_mut(self.active_hero) {
            previous.caster.entity.body.velocity = Vec2::ZERO;
        }
        self.active_hero = next;
        if let Some(hero) = self.heroes.get(next) {
            log::debug!("switched to {}", hero.name());
            out_events.push(Event::HeroSwitched { hero: hero.id() });
        }
    }

    fn cast(&mut self, cast: Cast, out_events: &mut Vec<Event>) {
        let Some(hero) = self.heroes.get_mut(self.active_hero) else {
            return;
        };

        self.scratch.health_before.clear();
        self.scratch.health_before.extend(
            self.enemies
                .iter()
                .map(|enemy| enemy.entity.health.map_or(0, |health| health.current())),
        );
        self.scratch.launched.clear();

        let mut arena = Arena {
            enemies: &mut self.enemies,
            projectiles: &mut self.projectiles,
            effects: &mut self.effects,
            ids: &mut self.ids,
            launched: &mut self.scratch.launched,
        };
        let result = match cast {
            Cast::Active(slot) => hero.cast_ability(slot, &mut arena),
            Cast::Ultimate => hero.cast_ultimate(&mut arena),
        };
        let caster = hero.id();

        let ability = match result {
            Ok(ability) => ability,
            Err(reason) => {
                log_rejection(hero, reason);
                out_events.push(Event::CastRejected {
                    hero: caster,
                    reason,
                });
                return;
            }
        };

        log::debug!("{} cast {}", hero.name(), ability);
        out_events.push(match cast {
            Cast::Active(_) => Event::AbilityCast {
                hero: caster,
                ability,
            },
            Cast::Ultimate => Event::UltimateCast {
                hero: caster,
                ability,
            },
        });
        for (projectile, owner) in self.scratch.launched.drain(..) {
            out_events.push(Event::ProjectileLaunched { projectile, owner });
        }
        for (enemy, old) in self.enemies.iter().zip(&self.scratch.health_before) {
            let new = enemy.entity.health.map_or(0, |health| health.current());
            if new != *old {
                out_events.push(Event::HealthChanged {
                    target: enemy.entity.id,
                    source: Some(caster),
                    old: *old,
                    new,
                });
            }
        }
    }

    fn move_active_hero(&mut self, direction: Direction) {
        let Some(hero) = self.heroes.get_mut(self.active_hero) else {
            return;
        };
        let velocity = direction.velocity();
        let body = &mut hero.caster.entity.body;
        match direction {
            Direction::Up | Direction::Down => body.velocity.y = velocity.y,
            Direction::Left | Direction::Right => body.velocity.x = velocity.x,
        }
    }

    fn halt_active_hero(&mut self) {
        if let Some(hero) = self.heroes.get_mut(self.active_hero) {
            hero.caster.entity.body.velocity = Vec2::ZERO;
        }
    }

    fn spawn_enemy(&mut self, kind: EnemyKind, position: Vec2, out_events: &mut Vec<Event>) {
        let id = self.ids.allocate();
        self.enemies.push(Enemy::spawn(id, kind, position));
        out_events.push(Event::EnemySpawned {
            enemy: id,
            kind,
            position,
        });
    }

    fn tick(&mut self, out_events: &mut Vec<Event>) {
        self.frame = self.frame.saturating_add(1);
        out_events.push(Event::FrameAdvanced { frame: self.frame });

        let arena = self.config.arena();
        if let Some(hero) = self.heroes.get_mut(self.active_hero) {
            arena.clamp_body(&mut hero.caster.entity.body);
        }

        self.advance_waves(out_events);

        let target = self
            .heroes
            .get(self.active_hero)
            .map(|hero| &hero.caster.entity);
        self.enemy_ai.handle(&mut self.enemies, target);

        for hero in &mut self.heroes {
            hero.integrate();
        }
        for enemy in &mut self.enemies {
            enemy.integrate();
        }
        self.projectile_engine.advance(&mut self.projectiles);
        for effect in &mut self.effects {
            effect.integrate();
        }
        self.effects.retain(|effect| !effect.is_finished());

        self.resolve_enemy_attacks(out_events);
        self.resolve_projectiles(out_events);
        self.update_game_state(out_events);
    }

    fn advance_waves(&mut self, out_events: &mut Vec<Event>) {
        let before = self.waves.current_wave();
        let mut commands = std::mem::take(&mut self.scratch.commands);
        self.waves.handle(self.enemies.len(), &mut commands);

        let after = self.waves.current_wave();
        if after != before {
            if before > 0 {
                out_events.push(Event::WaveCompleted { wave: before });
            }
            if after <= self.waves.max_waves() {
                out_events.push(Event::WaveStarted { wave: after });
            }
        }

        for command in commands.drain(..) {
            if let Command::SpawnEnemy { kind, position } = command {
                self.spawn_enemy(kind, position, out_events);
            }
        }
        self.scratch.commands = commands;
    }

    fn resolve_enemy_attacks(&mut self, out_events: &mut Vec<Event>) {
        let Some(hero) = self.heroes.get_mut(self.active_hero) else {
            return;
        };
        for enemy in &mut self.enemies {
            if !hero.caster.entity.is_alive() {
                break;
            }
            if !enemy.entity.is_alive() || !enemy.ready_to_attack() {
                continue;
            }
            let distance =
                geometry::distance(enemy.entity.position(), hero.caster.entity.position());
            if distance > enemy.attack_range {
                continue;
            }
            let attacker = Some(enemy.entity.id);
            let _ = self
                .combat
                .damage_entity(&mut hero.caster.entity, enemy.attack, attacker);
            enemy.reset_attack_cooldown();
        }
        self.health_relay.drain_into(out_events);
    }

    fn resolve_projectiles(&mut self, out_events: &mut Vec<Event>) {
        self.scratch.resolution.clear();
        self.projectile_engine.resolve(
            &mut self.projectiles,
            &mut self.enemies,
            &mut self.scratch.resolution,
        );

        for hit in &self.scratch.resolution.hits {
            out_events.push(Event::HealthChanged {
                target: hit.enemy,
                source: Some(hit.owner),
                old: hit.old,
                new: hit.new,
            });
        }
        let mut impacts = Vec::new();
        for resolved in &self.scratch.resolution.resolved {
            out_events.push(Event::ProjectileResolved {
                projectile: resolved.projectile,
                hits: resolved.hits,
            });
            if resolved.detonated {
                impacts.push(resolved.position);
            }
        }
        let mut arena = Arena {
            enemies: &mut self.enemies,
            projectiles: &mut self.projectiles,
            effects: &mut self.effects,
            ids: &mut self.ids,
            launched: &mut self.scratch.launched,
        };
        let size = Vec2::splat(IMPACT_SIZE);
        for center in impacts {
            let _ = arena.add_effect(EffectSpawn {
                kind: EffectKind::Impact,
                body: Body::new(center - size * 0.5, size),
                duration: IMPACT_DURATION,
                anchor: None,
            });
        }

        prune_dead(&mut self.enemies, &mut self.scratch.removed);
        for enemy in self.scratch.removed.drain(..) {
            log::debug!("{:?} {} defeated", enemy.kind, enemy.entity.id.get());
            out_events.push(Event::EnemyDied {
                enemy: enemy.entity.id,
                kind: enemy.kind,
            });
        }
    }

    fn update_game_state(&mut self, out_events: &mut Vec<Event>) {
        if self.state.is_over() {
            return;
        }
        let next = if self.heroes.iter().all(|hero| hero.caster.is_defeated()) {
            GameState::Defeat
        } else if self.waves.is_game_complete() && self.enemies.is_empty() {
            GameState::Victory
        } else {
            return;
        };
        log::info!("session ended in {:?} after {} frames", next, self.frame);
        self.state = next;
        out_events.push(Event::GameStateChanged { state: next });
    }

    fn restart(&mut self, out_events: &mut Vec<Event>) {
        let config = self.config.clone();
        let heroes = std::mem::take(&mut self.roster);
        *self = Self::with_roster(config, heroes);
        log::info!("session restarted");
        out_events.push(Event::SessionRestarted);
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

fn log_rejection(hero: &Hero, reason: AbilityError) {
    if reason.is_gating() {
        log::debug!("{} cast rejected: {}", hero.name(), reason);
    } else {
        log::trace!("{} ignored request: {}", hero.name(), reason);
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Once the session is over every command except [`Command::Restart`] is
/// ignored, and a restart is only honoured once the session is over.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    if world.state.is_over() {
        if command == Command::Restart {
            world.restart(out_events);
        }
        return;
    }

    match command {
        Command::SwitchHero { offset } => world.switch_hero(offset, out_events),
        Command::CastAbility { slot } => world.cast(Cast::Active(slot), out_events),
        Command::CastUltimate => world.cast(Cast::Ultimate, out_events),
        Command::MoveHero { direction } => world.move_active_hero(direction),
        Command::SpawnEnemy { kind, position } => world.spawn_enemy(kind, position, out_events),
        Command::Tick => world.tick(out_events),
        Command::Restart => log::debug!("restart ignored while the session is running"),
    }
}

/// Runs one full frame from the input an input source produced.
///
/// The active hero stops, performs at most one discrete action, picks up the
/// held movement directions, and then the simulation ticks. A finished session
/// only reacts to a restart request.
pub fn step(world: &mut World, input: &FrameInput, out_events: &mut Vec<Event>) {
    if world.state.is_over() {
        if input.restart {
            apply(world, Command::Restart, out_events);
        }
        return;
    }

    world.halt_active_hero();
    if let Some(action) = input.action {
        apply(world, action.into(), out_events);
    }
    for direction in &input.movement {
        apply(
            world,
            Command::MoveHero {
                direction: *direction,
            },
            out_events,
        );
    }
    apply(world, Command::Tick, out_events);
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use hero_battle_core::{ArenaBounds, Effect, Enemy, EntityId, GameState, Projectile};
    use hero_battle_system_abilities::Hero;

    use super::{Config, World};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Configuration the session was created with.
    #[must_use]
    pub fn config(world: &World) -> &Config {
        &world.config
    }

    /// Bounds of the arena.
    #[must_use]
    pub fn arena(world: &World) -> ArenaBounds {
        world.config.arena()
    }

    /// The whole roster in roster order, defeated heroes included.
    #[must_use]
    pub fn heroes(world: &World) -> &[Hero] {
        &world.heroes
    }

    /// Identifiers of every hero in the roster.
    #[must_use]
    pub fn hero_ids(world: &World) -> Vec<EntityId> {
        world.heroes.iter().map(Hero::id).collect()
    }

    /// Position of the active hero within the roster.
    #[must_use]
    pub fn active_hero_index(world: &World) -> usize {
        world.active_hero
    }

    /// The hero currently under player control.
    #[must_use]
    pub fn active_hero(world: &World) -> Option<&Hero> {
        world.heroes.get(world.active_hero)
    }

    /// Enemies in the arena, in spawn order.
    #[must_use]
    pub fn enemies(world: &World) -> &[Enemy] {
        &world.enemies
    }

    /// Projectiles in flight, in launch order.
    #[must_use]
    pub fn projectiles(world: &World) -> &[Projectile] {
        &world.projectiles
    }

    /// Visual effects currently shown.
    #[must_use]
    pub fn effects(world: &World) -> &[Effect] {
        &world.effects
    }

    /// Overall state of the session.
    #[must_use]
    pub fn game_state(world: &World) -> GameState {
        world.state
    }

    /// Frames simulated since the session started.
    #[must_use]
    pub fn frame(world: &World) -> u64 {
        world.frame
    }

    /// Captures the progress of wave spawning.
    #[must_use]
    pub fn wave_progress(world: &World) -> WaveProgress {
        WaveProgress {
            current: world.waves.current_wave(),
            total: world.waves.max_waves(),
            spawned: world.waves.spawned_in_wave(),
            quota: world.waves.wave_quota(),
        }
    }

    /// Snapshot of wave spawning progress.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct WaveProgress {
        /// One-based current wave. Zero before the first tick, `total + 1` once all are cleared.
        pub current: u32,
        /// Number of waves in the session.
        pub total: u32,
        /// Enemies spawned so far in the current wave.
        pub spawned: u32,
        /// Enemy quota of the current wave.
        pub quota: u32,
    }

    impl WaveProgress {
        /// Wave number clamped for display, never beyond `total`.
        #[must_use]
        pub fn display_wave(&self) -> u32 {
            self.current.min(self.total)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hero_battle_core::HERO_MOVE_SPEED;

    #[test]
    fn switching_wraps_around_roster() {
        let mut world = World::new();
        let mut events = Vec::new();

        apply(&mut world, Command::SwitchHero { offset: -1 }, &mut events);
        assert_eq!(query::active_hero_index(&world), 2);
        apply(&mut world, Command::SwitchHero { offset: 1 }, &mut events);
        assert_eq!(query::active_hero_index(&world), 0);
        apply(&mut world, Command::SwitchHero { offset: 3 }, &mut events);
        assert_eq!(query::active_hero_index(&world), 0);

        let switched = events
            .iter()
            .filter(|event| matches!(event, Event::HeroSwitched { .. }))
            .count();
        assert_eq!(switched, 2);
    }

    #[test]
    fn held_directions_combine_into_diagonal_movement() {
        let mut world = World::new();
        let mut events = Vec::new();
        let start = world.heroes[0].caster.entity.position();

        step(
            &mut world,
            &FrameInput::moving(vec![Direction::Down, Direction::Right]),
            &mut events,
        );

        let moved = world.heroes[0].caster.entity.position() - start;
        assert!((moved.x - HERO_MOVE_SPEED).abs() < 1e-4);
        assert!((moved.y - HERO_MOVE_SPEED).abs() < 1e-4);

        step(&mut world, &FrameInput::idle(), &mut events);
        let rested = world.heroes[0].caster.entity.position() - start;
        assert!((rested - moved).length() < 1e-4, "released keys stop the hero");
    }

    #[test]
    fn idle_heroes_do_not_move_after_switching() {
        let mut world = World::new();
        let mut events = Vec::new();
        step(
            &mut world,
            &FrameInput::moving(vec![Direction::Up]),
            &mut events,
        );
        apply(&mut world, Command::SwitchHero { offset: 1 }, &mut events);
        let parked = world.heroes[0].caster.entity.position();

        apply(&mut world, Command::Tick, &mut events);
        assert_eq!(world.heroes[0].caster.entity.position(), parked);
    }

    #[test]
    fn active_hero_is_clamped_into_arena() {
        let mut world = World::new();
        let mut events = Vec::new();
        world.heroes[0].caster.entity.body.position = Vec2::new(-50.0, 900.0);

        apply(&mut world, Command::Tick, &mut events);

        let position = world.heroes[0].caster.entity.position();
        assert_eq!(position, Vec2::new(0.0, 568.0));
    }

    #[test]
    fn restart_is_ignored_while_playing() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(&mut world, Command::Tick, &mut events);
        events.clear();

        apply(&mut world, Command::Restart, &mut events);
        assert!(events.is_empty());
        assert_eq!(query::frame(&world), 1);
    }
}
