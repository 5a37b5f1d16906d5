//! Health notifications from the combat resolver, relayed as world events.

use std::{cell::RefCell, rc::Rc};

use hero_battle_core::Event;
use hero_battle_system_combat::{HealthChange, HealthListener};

/// Listener queueing every health change until the world drains it.
///
/// Clones share one queue: the resolver owns one clone, the world keeps another.
#[derive(Clone, Debug, Default)]
pub(crate) struct HealthRelay {
    pending: Rc<RefCell<Vec<HealthChange>>>,
}

impl HealthRelay {
    /// Moves every queued change into `out_events` as [`Event::HealthChanged`].
    pub(crate) fn drain_into(&self, out_events: &mut Vec<Event>) {
        out_events.extend(
            self.pending
                .borrow_mut()
                .drain(..)
                .map(|change| Event::HealthChanged {
                    target: change.target,
                    source: change.source,
                    old: change.old,
                    new: change.new,
                }),
        );
    }
}

impl HealthListener for HealthRelay {
    fn on_health_changed(&mut self, change: &HealthChange) {
        self.pending.borrow_mut().push(*change);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use hero_battle_core::{Body, Entity, EntityId, Health, SpriteKey};
    use hero_battle_system_combat::CombatResolver;

    #[test]
    fn resolver_damage_reaches_the_event_stream_once() {
        let relay = HealthRelay::default();
        let mut resolver = CombatResolver::new(3);
        resolver.subscribe(Box::new(relay.clone()));
        let mut knight = Entity::new(
            EntityId::new(2),
            Body::new(Vec2::ZERO, Vec2::splat(32.0)),
            Some(Health::full(120)),
            SpriteKey::Knight,
        );

        let change = resolver
            .damage_entity(&mut knight, 10, Some(EntityId::new(7)))
            .expect("knight has health");
        let mut events = Vec::new();
        relay.drain_into(&mut events);
        relay.drain_into(&mut events);

        assert_eq!(
            events,
            vec![Event::HealthChanged {
                target: EntityId::new(2),
                source: Some(EntityId::new(7)),
                old: 120,
                new: change.new,
            }]
        );
    }
}
