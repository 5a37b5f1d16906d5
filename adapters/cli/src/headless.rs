//! Rendering backend that presents frames to the log instead of a window.

use anyhow::Result as AnyResult;
use hero_battle_rendering::{entity_visual, AssetCatalog, Layer, RenderingBackend, Scene, Visual};
use log::{info, trace};

/// Logs a HUD line every `hud_every` frames and tallies the visuals it would draw.
#[derive(Debug)]
pub(crate) struct HeadlessBackend<C> {
    catalog: C,
    hud_every: u64,
    presented: u64,
    placeholders: u64,
}

impl<C: AssetCatalog> HeadlessBackend<C> {
    /// Creates a backend resolving sprites through `catalog`. A `hud_every`
    /// of zero disables the HUD lines.
    pub(crate) fn new(catalog: C, hud_every: u64) -> Self {
        Self {
            catalog,
            hud_every,
            presented: 0,
            placeholders: 0,
        }
    }

    /// Frames presented so far.
    pub(crate) fn presented(&self) -> u64 {
        self.presented
    }

    /// Entities drawn with a placeholder because their asset was missing.
    pub(crate) fn placeholders(&self) -> u64 {
        self.placeholders
    }

    fn log_hud(&self, scene: &Scene) {
        let hud = &scene.hud;
        let hero = hud.active_hero.as_ref().map_or_else(
            || "no hero".to_owned(),
            |hero| {
                let cooldowns: Vec<String> = hero
                    .cooldowns
                    .iter()
                    .map(|cooldown| format!("{}:{}", cooldown.name, cooldown.remaining))
                    .collect();
                format!(
                    "{} mana {}/{} ultimate {} [{}]",
                    hero.name,
                    hero.mana,
                    hero.max_mana,
                    hero.ultimate_energy,
                    cooldowns.join(" ")
                )
            },
        );
        info!(
            "frame {} wave {}/{} enemies {} | {}",
            scene.frame, hud.wave, hud.max_waves, hud.enemy_count, hero
        );
    }
}

impl<C: AssetCatalog> RenderingBackend for HeadlessBackend<C> {
    fn present(&mut self, scene: &Scene) -> AnyResult<()> {
        self.presented += 1;
        for entity in &scene.entities {
            if let Visual::Placeholder(_) = entity_visual(&self.catalog, entity) {
                self.placeholders += 1;
            }
        }
        trace!(
            "frame {}: {} heroes, {} enemies, {} projectiles, {} effects",
            scene.frame,
            scene.layer(Layer::Hero).count(),
            scene.layer(Layer::Enemy).count(),
            scene.layer(Layer::Projectile).count(),
            scene.layer(Layer::Effect).count(),
        );
        if self.hud_every > 0 && scene.frame % self.hud_every == 0 {
            self.log_hud(scene);
        }
        Ok(())
    }
}
