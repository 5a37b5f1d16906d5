//! Session configuration file.
//!
//! ```toml
//! [arena]
//! width = 800.0
//! height = 600.0
//!
//! [[waves.table]]
//! enemy_count = 5
//! roster = ["Melee"]
//!
//! [simulation]
//! spawn_interval = 60
//! seed = 7
//! frames = 3600
//! ```

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use hero_battle_core::{ArenaBounds, WaveDefinition, WaveTable, WaveTableError};
use hero_battle_world::Config;
use serde::Deserialize;
use thiserror::Error;

/// Reasons a configuration file is refused at startup.
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {path}")]
    Read {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The file is not valid TOML or does not match the expected layout.
    #[error("malformed configuration")]
    Parse(#[from] toml::de::Error),
    /// The arena has a non-positive or non-finite dimension.
    #[error("arena dimensions must be positive, got {width}x{height}")]
    Arena {
        /// Configured width.
        width: f32,
        /// Configured height.
        height: f32,
    },
    /// The wave table is unusable.
    #[error("invalid wave table")]
    Waves(#[from] WaveTableError),
    /// Spawning needs at least one frame between enemies.
    #[error("spawn interval must be at least one frame")]
    SpawnInterval,
}

/// Settings assembled from a configuration file.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Settings {
    /// World configuration.
    pub(crate) world: Config,
    /// Frame budget requested by the file.
    pub(crate) frames: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SessionFile {
    arena: Option<ArenaSection>,
    waves: Option<WavesSection>,
    #[serde(default)]
    simulation: SimulationSection,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ArenaSection {
    width: f32,
    height: f32,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct WavesSection {
    table: Vec<WaveDefinition>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SimulationSection {
    spawn_interval: Option<u32>,
    seed: Option<u64>,
    frames: Option<u64>,
}

/// Reads and validates the configuration file at `path`.
pub(crate) fn load(path: &Path) -> Result<Settings, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&text)
}

/// Validates configuration text. Sections that are left out keep their defaults.
pub(crate) fn parse(text: &str) -> Result<Settings, ConfigError> {
    let file: SessionFile = toml::from_str(text)?;
    let mut world = Config::default();

    if let Some(ArenaSection { width, height }) = file.arena {
        let valid = |value: f32| value.is_finite() && value > 0.0;
        if !valid(width) || !valid(height) {
            return Err(ConfigError::Arena { width, height });
        }
        world = world.with_arena(ArenaBounds::new(width, height));
    }
    if let Some(waves) = file.waves {
        world = world.with_waves(WaveTable::new(waves.table)?);
    }
    if let Some(interval) = file.simulation.spawn_interval {
        if interval == 0 {
            return Err(ConfigError::SpawnInterval);
        }
        world = world.with_spawn_interval(interval);
    }
    if let Some(seed) = file.simulation.seed {
        world = world.with_damage_seed(seed);
    }

    Ok(Settings {
        world,
        frames: file.simulation.frames,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hero_battle_core::EnemyKind;

    #[test]
    fn empty_file_keeps_defaults() {
        let settings = parse("").expect("empty configuration");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn sections_override_defaults() {
        let settings = parse(
            r#"
            [arena]
            width = 640.0
            height = 480.0

            [[waves.table]]
            enemy_count = 2
            roster = ["Tank", "Ranged"]

            [simulation]
            spawn_interval = 30
            seed = 42
            frames = 900
            "#,
        )
        .expect("valid configuration");

        let world = &settings.world;
        assert_eq!(world.arena(), ArenaBounds::new(640.0, 480.0));
        assert_eq!(world.waves().len(), 1);
        assert_eq!(world.waves().kind_at(1, 1), Some(EnemyKind::Ranged));
        assert_eq!(world.spawn_interval(), 30);
        assert_eq!(world.damage_seed(), 42);
        assert_eq!(settings.frames, Some(900));
    }

    #[test]
    fn empty_wave_table_is_rejected() {
        let error = parse("[waves]\ntable = []").expect_err("no waves");
        assert!(matches!(error, ConfigError::Waves(WaveTableError::Empty)));
    }

    #[test]
    fn zero_count_wave_is_rejected() {
        let error = parse(
            r#"
            [[waves.table]]
            enemy_count = 0
            roster = ["Melee"]
            "#,
        )
        .expect_err("zero count");
        assert!(matches!(
            error,
            ConfigError::Waves(WaveTableError::ZeroCount { wave: 1 })
        ));
    }

    #[test]
    fn degenerate_arena_is_rejected() {
        let error = parse("[arena]\nwidth = 0.0\nheight = 600.0").expect_err("zero width");
        assert!(matches!(error, ConfigError::Arena { .. }));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            parse("[simulation]\nspeed = 2"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn zero_spawn_interval_is_rejected() {
        assert!(matches!(
            parse("[simulation]\nspawn_interval = 0"),
            Err(ConfigError::SpawnInterval)
        ));
    }
}
