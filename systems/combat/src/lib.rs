#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Damage application with seeded variance.
//!
//! The resolver is the only source of randomness in the simulation. It owns a
//! [`ChaCha8Rng`] seeded from configuration, so two sessions started with the
//! same seed roll identical damage.

use std::fmt;

use hero_battle_core::{Entity, EntityId};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Lower bound of the damage multiplier.
pub const VARIANCE_MIN: f64 = 0.9;
/// Upper bound of the damage multiplier.
pub const VARIANCE_MAX: f64 = 1.1;

/// Health transition reported to listeners.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HealthChange {
    /// Entity that took the damage.
    pub target: EntityId,
    /// Entity that dealt the damage, when known.
    pub source: Option<EntityId>,
    /// Health before the hit.
    pub old: u32,
    /// Health after the hit.
    pub new: u32,
}

impl HealthChange {
    /// Hit points removed by the change.
    #[must_use]
    pub const fn amount(&self) -> u32 {
        self.old.saturating_sub(self.new)
    }

    /// Reports whether the change left the target without health.
    #[must_use]
    pub const fn is_lethal(&self) -> bool {
        self.new == 0
    }
}

/// Observer notified after every damage application.
pub trait HealthListener {
    /// Receives the health transition of a damaged entity.
    fn on_health_changed(&mut self, change: &HealthChange);
}

/// Applies randomised damage and notifies subscribed listeners.
pub struct CombatResolver {
    rng: ChaCha8Rng,
    listeners: Vec<Box<dyn HealthListener>>,
}

impl fmt::Debug for CombatResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CombatResolver")
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl CombatResolver {
    /// Creates a resolver whose variance is drawn from `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            listeners: Vec::new(),
        }
    }

    /// Registers a listener notified after every damage application.
    pub fn subscribe(&mut self, listener: Box<dyn HealthListener>) {
        self.listeners.push(listener);
    }

    /// Rolls the damage actually dealt for a nominal `amount`.
    ///
    /// The amount is scaled by a uniform multiplier in `[0.9, 1.1]`, truncated,
    /// and never drops below one.
    pub fn roll_damage(&mut self, amount: u32) -> u32 {
        let multiplier = self.rng.gen_range(VARIANCE_MIN..=VARIANCE_MAX);
        let rolled = (f64::from(amount) * multiplier) as u32;
        rolled.max(1)
    }

    /// Applies `amount` of damage with variance to `target`.
    ///
    /// Targets without health are left alone and produce `None`. Otherwise the
    /// health is reduced, clamped at zero, and every listener is notified.
    pub fn damage_entity(
        &mut self,
        target: &mut Entity,
        amount: u32,
        source: Option<EntityId>,
    ) -> Option<HealthChange> {
        if target.health.is_none() {
            return None;
        }
        let damage = self.roll_damage(amount);
        let health = target.health.as_mut()?;
        let (old, new) = health.take(damage);
        let change = HealthChange {
            target: target.id,
            source,
            old,
            new,
        };
        for listener in &mut self.listeners {
            listener.on_health_changed(&change);
        }
        Some(change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rolled_damage_stays_within_variance() {
        let mut resolver = CombatResolver::new(7);
        for _ in 0..1_000 {
            let damage = resolver.roll_damage(10);
            assert!((9..=11).contains(&damage), "rolled {damage}");
        }
    }

    #[test]
    fn rolled_damage_is_at_least_one() {
        let mut resolver = CombatResolver::new(11);
        for _ in 0..100 {
            assert_eq!(resolver.roll_damage(0), 1);
        }
    }

    #[test]
    fn same_seed_rolls_same_sequence() {
        let mut first = CombatResolver::new(0xfeed);
        let mut second = CombatResolver::new(0xfeed);
        let a: Vec<u32> = (0..32).map(|_| first.roll_damage(100)).collect();
        let b: Vec<u32> = (0..32).map(|_| second.roll_damage(100)).collect();
        assert_eq!(a, b);
    }
}
