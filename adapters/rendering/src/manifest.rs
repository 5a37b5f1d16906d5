//! TOML manifest mapping sprite keys to asset files.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result as AnyResult};
use serde::Deserialize;

use crate::AssetCatalog;

/// Asset catalog read from a `[sprites]` table.
///
/// ```toml
/// [sprites]
/// mage = "assets/mage.png"
/// fireball = "assets/fireball.png"
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct SpriteManifest {
    #[serde(default)]
    sprites: BTreeMap<String, PathBuf>,
}

impl SpriteManifest {
    /// Parses a manifest from TOML text.
    pub fn from_toml_str(text: &str) -> AnyResult<Self> {
        toml::from_str(text).context("failed to parse sprite manifest")
    }

    /// Loads a manifest from disk. Relative asset paths resolve against the
    /// manifest's directory.
    pub fn load(path: &Path) -> AnyResult<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read sprite manifest {}", path.display()))?;
        let mut manifest = Self::from_toml_str(&text)
            .with_context(|| format!("invalid sprite manifest {}", path.display()))?;
        if let Some(base) = path.parent() {
            for asset in manifest.sprites.values_mut() {
                if asset.is_relative() {
                    *asset = base.join(&*asset);
                }
            }
        }
        Ok(manifest)
    }

    /// Number of catalogued sprites.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    /// Reports whether no sprite is catalogued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}

impl AssetCatalog for SpriteManifest {
    fn lookup(&self, key: &str) -> Option<&Path> {
        self.sprites.get(key).map(PathBuf::as_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{resolve_visual, Visual};
    use hero_battle_core::SpriteKey;

    #[test]
    fn manifest_lists_sprites_by_key() {
        let manifest = SpriteManifest::from_toml_str(
            r#"
            [sprites]
            mage = "art/mage.png"
            arrow = "art/arrow.png"
            "#,
        )
        .expect("valid manifest");

        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest.lookup("mage"), Some(Path::new("art/mage.png")));
        assert_eq!(manifest.lookup("knight"), None);
    }

    #[test]
    fn empty_manifest_places_every_sprite_as_placeholder() {
        let manifest = SpriteManifest::from_toml_str("").expect("empty manifest");

        assert!(manifest.is_empty());
        for sprite in SpriteKey::ALL {
            assert!(matches!(
                resolve_visual(&manifest, sprite),
                Visual::Placeholder(_)
            ));
        }
    }

    #[test]
    fn malformed_manifest_is_an_error() {
        assert!(SpriteManifest::from_toml_str("[sprites]\nmage = 3").is_err());
    }

    #[test]
    fn missing_manifest_file_is_an_error() {
        assert!(SpriteManifest::load(Path::new("does/not/exist.toml")).is_err());
    }
}
