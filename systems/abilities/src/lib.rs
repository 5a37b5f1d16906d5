#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Hero abilities: cooldown and mana gating plus the effects they apply.
//!
//! Every ability shares one contract. [`Ability::execute`] refuses the cast
//! with [`AbilityError::OnCooldown`] or [`AbilityError::InsufficientMana`]
//! without touching any state, otherwise it pays the mana cost, restarts the
//! cooldown and applies its [`AbilityEffect`] through the [`GameFacade`].

mod hero;

pub use hero::{roster, Hero, Kit, MAX_ACTIVE_ABILITIES, ROSTER_POSITIONS};

use glam::Vec2;
use hero_battle_core::{
    geometry, AbilityError, Caster, GameFacade, ProjectileLaunch, SpriteKey,
};

/// Extra reach single-projectile abilities search beyond their nominal range.
pub const TARGET_SEARCH_MARGIN: f32 = 100.0;

/// Frame-counted cooldown embedded in every ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cooldown {
    length: u32,
    remaining: u32,
}

impl Cooldown {
    /// Creates a ready cooldown of the provided length.
    #[must_use]
    pub const fn new(length: u32) -> Self {
        Self {
            length,
            remaining: 0,
        }
    }

    /// Full length of the cooldown in frames.
    #[must_use]
    pub const fn length(&self) -> u32 {
        self.length
    }

    /// Frames left before the cooldown elapses.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Reports whether the cooldown has elapsed.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.remaining == 0
    }

    /// Restarts the cooldown at its full length.
    pub fn trigger(&mut self) {
        self.remaining = self.length;
    }

    /// Counts one frame down, never below zero.
    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }
}

/// Payload an ability applies once its gate has been passed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AbilityEffect {
    /// Launches one projectile at the nearest enemy, or straight ahead.
    SingleProjectile {
        /// Damage dealt on hit.
        damage: u32,
        /// Nominal range; targets are searched within this plus a margin.
        range: f32,
        /// Projectile speed in units per second.
        speed: f32,
        /// Explosion radius for explosive projectiles.
        aoe_radius: Option<f32>,
        /// Projectile sprite.
        sprite: SpriteKey,
    },
    /// Damages every enemy within the radius of the caster immediately.
    AoeInstant {
        /// Damage dealt to each enemy.
        damage: u32,
        /// Radius around the caster's center.
        radius: f32,
    },
    /// Launches one projectile at every enemy within the radius.
    AoeProjectile {
        /// Damage dealt by each projectile.
        damage: u32,
        /// Radius around the caster's center.
        radius: f32,
        /// Projectile speed in units per second.
        speed: f32,
        /// Projectile sprite.
        sprite: SpriteKey,
    },
    /// Strikes every enemy within reach, optionally stunning them.
    Melee {
        /// Damage dealt to each enemy.
        damage: u32,
        /// Reach measured between centers.
        range: f32,
        /// Frames the struck enemies are prevented from attacking.
        stun_frames: Option<u32>,
    },
    /// Passes the gate without any further effect.
    Inert,
}

/// Every ability available to the hero roster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AbilityKind {
    /// Mage: explosive projectile.
    Fireball,
    /// Mage: freezing burst around the caster.
    FrostNova,
    /// Mage: protective ward.
    ArcaneShield,
    /// Mage passive: restores mana every frame.
    ManaRegeneration,
    /// Mage ultimate.
    MeteorStorm,
    /// Knight: close sweep.
    Slash,
    /// Knight: strike that stuns.
    ShieldBash,
    /// Knight: dash forward.
    Charge,
    /// Knight passive.
    ArmorUp,
    /// Knight ultimate.
    BerserkerRage,
    /// Archer: fast arrow.
    QuickShot,
    /// Archer: volley at every nearby enemy.
    ArrowRain,
    /// Archer: dodge.
    Evasion,
    /// Archer passive.
    CriticalStrike,
    /// Archer ultimate.
    PerfectShot,
}

impl AbilityKind {
    /// Every ability, grouped by hero.
    pub const ALL: [AbilityKind; 15] = [
        AbilityKind::Fireball,
        AbilityKind::FrostNova,
        AbilityKind::ArcaneShield,
        AbilityKind::ManaRegeneration,
        AbilityKind::MeteorStorm,
        AbilityKind::Slash,
        AbilityKind::ShieldBash,
        AbilityKind::Charge,
        AbilityKind::ArmorUp,
        AbilityKind::BerserkerRage,
        AbilityKind::QuickShot,
        AbilityKind::ArrowRain,
        AbilityKind::Evasion,
        AbilityKind::CriticalStrike,
        AbilityKind::PerfectShot,
    ];

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fireball => "Fireball",
            Self::FrostNova => "Frost Nova",
            Self::ArcaneShield => "Arcane Shield",
            Self::ManaRegeneration => "Mana Regeneration",
            Self::MeteorStorm => "Meteor Storm",
            Self::Slash => "Slash",
            Self::ShieldBash => "Shield Bash",
            Self::Charge => "Charge",
            Self::ArmorUp => "Armor Up",
            Self::BerserkerRage => "Berserker Rage",
            Self::QuickShot => "Quick Shot",
            Self::ArrowRain => "Arrow Rain",
            Self::Evasion => "Evasion",
            Self::CriticalStrike => "Critical Strike",
            Self::PerfectShot => "Perfect Shot",
        }
    }

    /// Cooldown length in frames.
    #[must_use]
    pub const fn cooldown(self) -> u32 {
        match self {
            Self::Fireball => 60,
            Self::FrostNova => 180,
            Self::ArcaneShield => 300,
            Self::Slash => 30,
            Self::ShieldBash => 120,
            Self::Charge => 180,
            Self::QuickShot => 20,
            Self::ArrowRain => 240,
            Self::Evasion => 600,
            Self::MeteorStorm | Self::BerserkerRage | Self::PerfectShot => 600,
            Self::ManaRegeneration | Self::ArmorUp | Self::CriticalStrike => 0,
        }
    }

    /// Mana paid on every successful cast.
    #[must_use]
    pub const fn mana_cost(self) -> u32 {
        match self {
            Self::Fireball => 20,
            Self::FrostNova => 30,
            Self::ArcaneShield => 25,
            Self::Slash => 10,
            Self::ShieldBash => 15,
            Self::Charge => 20,
            Self::QuickShot => 8,
            Self::ArrowRain => 25,
            Self::Evasion => 20,
            Self::MeteorStorm
            | Self::BerserkerRage
            | Self::PerfectShot
            | Self::ManaRegeneration
            | Self::ArmorUp
            | Self::CriticalStrike => 0,
        }
    }

    /// Effect applied after a successful gate.
    #[must_use]
    pub const fn effect(self) -> AbilityEffect {
        match self {
            Self::Fireball => AbilityEffect::SingleProjectile {
                damage: 25,
                range: 300.0,
                speed: 400.0,
                aoe_radius: Some(50.0),
                sprite: SpriteKey::Fireball,
            },
            Self::FrostNova => AbilityEffect::AoeInstant {
                damage: 15,
                radius: 100.0,
            },
            Self::Slash => AbilityEffect::Melee {
                damage: 20,
                range: 50.0,
                stun_frames: None,
            },
            Self::ShieldBash => AbilityEffect::Melee {
                damage: 25,
                range: 60.0,
                stun_frames: Some(60),
            },
            Self::QuickShot => AbilityEffect::SingleProjectile {
                damage: 15,
                range: 400.0,
                speed: 500.0,
                aoe_radius: None,
                sprite: SpriteKey::Arrow,
            },
            Self::ArrowRain => AbilityEffect::AoeProjectile {
                damage: 12,
                radius: 120.0,
                speed: 400.0,
                sprite: SpriteKey::Arrow,
            },
            Self::ArcaneShield
            | Self::Charge
            | Self::Evasion
            | Self::ManaRegeneration
            | Self::ArmorUp
            | Self::CriticalStrike
            | Self::MeteorStorm
            | Self::BerserkerRage
            | Self::PerfectShot => AbilityEffect::Inert,
        }
    }

    /// Mana restored to the holder every frame while this passive is equipped.
    #[must_use]
    pub const fn mana_per_frame(self) -> u32 {
        match self {
            Self::ManaRegeneration => 1,
            _ => 0,
        }
    }
}

/// Ability instance: fixed identity plus its own cooldown counter.
#[derive(Clone, Debug, PartialEq)]
pub struct Ability {
    kind: AbilityKind,
    cooldown: Cooldown,
}

impl Ability {
    /// Creates a ready ability of the provided kind.
    #[must_use]
    pub const fn new(kind: AbilityKind) -> Self {
        Self {
            kind,
            cooldown: Cooldown::new(kind.cooldown()),
        }
    }

    /// Kind of the ability.
    #[must_use]
    pub const fn kind(&self) -> AbilityKind {
        self.kind
    }

    /// Display name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Full cooldown length in frames.
    #[must_use]
    pub const fn cooldown(&self) -> u32 {
        self.cooldown.length()
    }

    /// Frames left before the ability can be cast again.
    #[must_use]
    pub const fn current_cooldown(&self) -> u32 {
        self.cooldown.remaining()
    }

    /// Mana paid on every successful cast.
    #[must_use]
    pub const fn mana_cost(&self) -> u32 {
        self.kind.mana_cost()
    }

    /// Reports whether the cooldown has elapsed.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.cooldown.is_ready()
    }

    /// Counts the cooldown down by one frame.
    pub fn update(&mut self) {
        self.cooldown.tick();
    }

    /// Gates the cast on cooldown and mana, then applies the effect.
    ///
    /// A refused cast leaves the caster, the ability and the game untouched.
    pub fn execute(
        &mut self,
        caster: &mut Caster,
        game: &mut dyn GameFacade,
    ) -> Result<(), AbilityError> {
        if !self.cooldown.is_ready() {
            return Err(AbilityError::OnCooldown {
                remaining: self.cooldown.remaining(),
            });
        }
        let cost = self.mana_cost();
        if !caster.mana.covers(cost) {
            return Err(AbilityError::InsufficientMana {
                required: cost,
                available: caster.mana.current(),
            });
        }

        caster.mana.spend(cost);
        self.cooldown.trigger();
        apply_effect(self.kind.effect(), caster, game);
        Ok(())
    }
}

fn apply_effect(effect: AbilityEffect, caster: &Caster, game: &mut dyn GameFacade) {
    match effect {
        AbilityEffect::SingleProjectile {
            damage,
            range,
            speed,
            aoe_radius,
            sprite,
        } => {
            let origin = caster.entity.position();
            let target = nearest_target(origin, range, game)
                .unwrap_or_else(|| origin + Vec2::new(range, 0.0));
            let mut launch = ProjectileLaunch::new(origin, target, speed, damage, caster.entity.id)
                .with_sprite(sprite);
            if let Some(radius) = aoe_radius {
                launch = launch.explosive(radius);
            }
            let _ = game.add_projectile(launch);
        }
        AbilityEffect::AoeInstant { damage, radius } => {
            let center = caster.entity.center();
            for enemy in game.enemies_mut() {
                if !enemy.entity.is_alive() {
                    continue;
                }
                if geometry::distance(center, enemy.entity.center()) <= radius {
                    if let Some(health) = enemy.entity.health.as_mut() {
                        let _ = health.take(damage);
                    }
                }
            }
        }
        AbilityEffect::AoeProjectile {
            damage,
            radius,
            speed,
            sprite,
        } => {
            let center = caster.entity.center();
            let targets: Vec<Vec2> = game
                .enemies()
                .iter()
                .filter(|enemy| enemy.entity.is_alive())
                .map(|enemy| enemy.entity.center())
                .filter(|target| geometry::distance(center, *target) <= radius)
                .collect();
            let origin = caster.entity.position();
            for target in targets {
                let launch =
                    ProjectileLaunch::new(origin, target, speed, damage, caster.entity.id)
                        .with_sprite(sprite);
                let _ = game.add_projectile(launch);
            }
        }
        AbilityEffect::Melee {
            damage,
            range,
            stun_frames,
        } => {
            let center = caster.entity.center();
            for enemy in game.enemies_mut() {
                if !enemy.entity.is_alive() {
                    continue;
                }
                if geometry::distance(center, enemy.entity.center()) > range {
                    continue;
                }
                if let Some(health) = enemy.entity.health.as_mut() {
                    let _ = health.take(damage);
                }
                if let Some(frames) = stun_frames {
                    enemy.stun(frames);
                }
            }
        }
        AbilityEffect::Inert => {}
    }
}

/// Center of the living enemy closest to `origin`, searched within `range` plus a margin.
///
/// Ties keep the first enemy encountered.
fn nearest_target(origin: Vec2, range: f32, game: &dyn GameFacade) -> Option<Vec2> {
    let mut best_distance = range + TARGET_SEARCH_MARGIN;
    let mut best = None;
    for enemy in game.enemies() {
        if !enemy.entity.is_alive() {
            continue;
        }
        let distance = geometry::distance(origin, enemy.entity.position());
        if distance < best_distance {
            best_distance = distance;
            best = Some(enemy.entity.center());
        }
    }
    best
}
