#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Hero Battle adapters.

mod manifest;
mod scene;

pub use manifest::SpriteManifest;
pub use scene::{AbilityCooldown, HeroHud, Hud, Layer, Scene, SceneEntity};

use anyhow::Result as AnyResult;
use hero_battle_core::{FrameInput, SpriteKey};
use std::path::{Path, PathBuf};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Solid colour drawn for a sprite whose asset is unavailable.
#[must_use]
pub const fn placeholder_color(sprite: SpriteKey) -> Color {
    match sprite {
        SpriteKey::Mage => Color::from_rgb_u8(100, 50, 200),
        SpriteKey::Knight => Color::from_rgb_u8(150, 150, 150),
        SpriteKey::Archer => Color::from_rgb_u8(150, 100, 50),
        SpriteKey::Melee => Color::from_rgb_u8(200, 50, 50),
        SpriteKey::Ranged => Color::from_rgb_u8(50, 200, 50),
        SpriteKey::Tank => Color::from_rgb_u8(50, 50, 200),
        SpriteKey::Fireball => Color::from_rgb_u8(255, 255, 100),
        SpriteKey::Arrow => Color::from_rgb_u8(150, 75, 0),
        SpriteKey::Impact => Color::from_rgb_u8(128, 128, 128),
    }
}

/// Supplier of visual resources keyed by sprite name.
pub trait AssetCatalog {
    /// Location of the asset registered for `key`, if any.
    fn lookup(&self, key: &str) -> Option<&Path>;
}

/// Visual chosen for a sprite after consulting the asset catalog.
#[derive(Clone, Debug, PartialEq)]
pub enum Visual {
    /// Asset file provided by the catalog.
    Asset(PathBuf),
    /// Deterministic fallback colour.
    Placeholder(Color),
}

/// Resolves the visual for `sprite`. Missing assets degrade to a placeholder.
#[must_use]
pub fn resolve_visual(catalog: &dyn AssetCatalog, sprite: SpriteKey) -> Visual {
    match catalog.lookup(sprite.as_str()) {
        Some(path) => Visual::Asset(path.to_path_buf()),
        None => Visual::Placeholder(placeholder_color(sprite)),
    }
}

/// How far the active hero's placeholder is lightened towards white.
pub const HIGHLIGHT_LIGHTEN: f32 = 0.35;

/// Resolves the visual of a scene entity. The active hero's placeholder is
/// drawn lighter so it stands out from the idle heroes.
#[must_use]
pub fn entity_visual(catalog: &dyn AssetCatalog, entity: &SceneEntity) -> Visual {
    match resolve_visual(catalog, entity.sprite) {
        Visual::Placeholder(color) if entity.highlighted => {
            Visual::Placeholder(color.lighten(HIGHLIGHT_LIGHTEN))
        }
        visual => visual,
    }
}

/// Source of per-frame player input.
pub trait InputSource {
    /// Produces the input for the next frame after looking at the latest scene.
    ///
    /// Returns `None` once the source wants the session to stop.
    fn poll(&mut self, scene: &Scene) -> Option<FrameInput>;
}

/// Rendering backend capable of presenting Hero Battle scenes.
pub trait RenderingBackend {
    /// Presents a single captured frame.
    fn present(&mut self, scene: &Scene) -> AnyResult<()>;
}
