//! Heroes: a caster plus the ability kit it casts from.

use glam::Vec2;
use hero_battle_core::{
    AbilityError, Caster, EntityId, GameFacade, HeroClass, ULTIMATE_ENERGY_PER_CAST,
};

use crate::{Ability, AbilityKind};

/// Maximum number of active abilities a kit holds.
pub const MAX_ACTIVE_ABILITIES: usize = 3;

/// Upper-left starting positions of the roster, in roster order.
pub const ROSTER_POSITIONS: [Vec2; 3] = [
    Vec2::new(100.0, 300.0),
    Vec2::new(200.0, 300.0),
    Vec2::new(300.0, 300.0),
];

/// Abilities carried by a hero.
#[derive(Clone, Debug, PartialEq)]
pub struct Kit {
    actives: Vec<Ability>,
    passive: Ability,
    ultimate: Ability,
}

impl Kit {
    /// Assembles a kit. Actives beyond [`MAX_ACTIVE_ABILITIES`] are dropped.
    #[must_use]
    pub fn new(mut actives: Vec<AbilityKind>, passive: AbilityKind, ultimate: AbilityKind) -> Self {
        actives.truncate(MAX_ACTIVE_ABILITIES);
        Self {
            actives: actives.into_iter().map(Ability::new).collect(),
            passive: Ability::new(passive),
            ultimate: Ability::new(ultimate),
        }
    }

    /// The kit every hero of `class` starts with.
    #[must_use]
    pub fn for_class(class: HeroClass) -> Self {
        use AbilityKind::*;

        match class {
            HeroClass::Mage => Self::new(
                vec![Fireball, FrostNova, ArcaneShield],
                ManaRegeneration,
                MeteorStorm,
            ),
            HeroClass::Knight => {
                Self::new(vec![Slash, ShieldBash, Charge], ArmorUp, BerserkerRage)
            }
            HeroClass::Archer => Self::new(
                vec![QuickShot, ArrowRain, Evasion],
                CriticalStrike,
                PerfectShot,
            ),
        }
    }

    /// Active abilities in slot order.
    #[must_use]
    pub fn actives(&self) -> &[Ability] {
        &self.actives
    }

    /// Passive ability.
    #[must_use]
    pub const fn passive(&self) -> &Ability {
        &self.passive
    }

    /// Ultimate ability.
    #[must_use]
    pub const fn ultimate(&self) -> &Ability {
        &self.ultimate
    }

    /// Counts every cooldown in the kit down by one frame.
    pub fn update(&mut self) {
        for ability in &mut self.actives {
            ability.update();
        }
        self.passive.update();
        self.ultimate.update();
    }
}

/// Player-controlled combatant. Heroes are never removed from the roster.
#[derive(Clone, Debug, PartialEq)]
pub struct Hero {
    /// Vitals, resources and entity record.
    pub caster: Caster,
    kit: Kit,
}

impl Hero {
    /// Creates a hero from its vitals and kit.
    #[must_use]
    pub const fn new(caster: Caster, kit: Kit) -> Self {
        Self { caster, kit }
    }

    /// Creates a hero of `class` with its standard statistics and kit.
    #[must_use]
    pub fn of_class(class: HeroClass, id: EntityId, position: Vec2) -> Self {
        let (health, mana, attack, defense) = match class {
            HeroClass::Mage => (60, 100, 8, 3),
            HeroClass::Knight => (120, 40, 12, 8),
            HeroClass::Archer => (80, 60, 10, 4),
        };
        Self::new(
            Caster::new(id, class, position, health, mana, attack, defense),
            Kit::for_class(class),
        )
    }

    /// Identifier of the hero's entity.
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.caster.entity.id
    }

    /// Display name of the hero.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.caster.name()
    }

    /// Abilities carried by the hero.
    #[must_use]
    pub const fn kit(&self) -> &Kit {
        &self.kit
    }

    /// Casts the active ability in `slot`, charging the ultimate on success.
    ///
    /// Returns the name of the cast ability.
    pub fn cast_ability(
        &mut self,
        slot: usize,
        game: &mut dyn GameFacade,
    ) -> Result<&'static str, AbilityError> {
        let ability = self
            .kit
            .actives
            .get_mut(slot)
            .ok_or(AbilityError::UnknownSlot { slot })?;
        ability.execute(&mut self.caster, game)?;
        self.caster.gain_ultimate_energy(ULTIMATE_ENERGY_PER_CAST);
        Ok(ability.name())
    }

    /// Casts the ultimate ability once the gauge is full, draining it on success.
    pub fn cast_ultimate(
        &mut self,
        game: &mut dyn GameFacade,
    ) -> Result<&'static str, AbilityError> {
        if !self.caster.ultimate_charged() {
            return Err(AbilityError::UltimateNotCharged {
                energy: self.caster.ultimate_energy(),
            });
        }
        self.kit.ultimate.execute(&mut self.caster, game)?;
        self.caster.drain_ultimate_energy();
        Ok(self.kit.ultimate.name())
    }

    /// Moves the hero one frame, ticks its cooldowns and applies its passive.
    pub fn integrate(&mut self) {
        self.caster.entity.body.integrate();
        self.kit.update();
        let regeneration = self.kit.passive.kind().mana_per_frame();
        if regeneration > 0 {
            self.caster.mana.regenerate(regeneration);
        }
    }
}

/// The fixed roster of three heroes with consecutive identifiers from `first_id`.
#[must_use]
pub fn roster(first_id: u32) -> Vec<Hero> {
    [HeroClass::Mage, HeroClass::Knight, HeroClass::Archer]
        .into_iter()
        .zip(ROSTER_POSITIONS)
        .zip(first_id..)
        .map(|((class, position), id)| Hero::of_class(class, EntityId::new(id), position))
        .collect()
}
