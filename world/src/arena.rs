//! The capability abilities act through while a cast is executing.

use hero_battle_core::{
    Effect, EffectSpawn, Enemy, EntityId, GameFacade, Projectile, ProjectileLaunch,
};

/// Monotonic entity identifier source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    pub(crate) const fn starting_at(next: u32) -> Self {
        Self { next }
    }

    pub(crate) fn allocate(&mut self) -> EntityId {
        let id = EntityId::new(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// Borrowed view of the world's entity collections handed to abilities.
pub(crate) struct Arena<'a> {
    pub(crate) enemies: &'a mut Vec<Enemy>,
    pub(crate) projectiles: &'a mut Vec<Projectile>,
    pub(crate) effects: &'a mut Vec<Effect>,
    pub(crate) ids: &'a mut IdAllocator,
    /// Projectiles launched during the cast as `(projectile, owner)`.
    pub(crate) launched: &'a mut Vec<(EntityId, EntityId)>,
}

impl GameFacade for Arena<'_> {
    fn add_projectile(&mut self, launch: ProjectileLaunch) -> EntityId {
        let id = self.ids.allocate();
        self.projectiles.push(Projectile::from_launch(id, launch));
        self.launched.push((id, launch.owner));
        id
    }

    fn enemies(&self) -> &[Enemy] {
        self.enemies.as_slice()
    }

    fn enemies_mut(&mut self) -> &mut [Enemy] {
        self.enemies.as_mut_slice()
    }

    fn add_effect(&mut self, spawn: EffectSpawn) -> EntityId {
        let id = self.ids.allocate();
        self.effects.push(Effect::from_spawn(id, spawn));
        id
    }
}
