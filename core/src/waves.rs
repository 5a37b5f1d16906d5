//! Declarative wave table describing which enemies every wave introduces.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::units::EnemyKind;

/// Enemy quota and spawn order of a single wave.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveDefinition {
    /// Number of enemies the wave spawns in total.
    pub enemy_count: u32,
    /// Ordered enemy kinds, cycled when shorter than `enemy_count`.
    pub roster: Vec<EnemyKind>,
}

impl WaveDefinition {
    /// Creates a wave definition.
    #[must_use]
    pub fn new(enemy_count: u32, roster: Vec<EnemyKind>) -> Self {
        Self {
            enemy_count,
            roster,
        }
    }
}

/// Reasons a wave table is rejected at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum WaveTableError {
    /// The table declares no waves at all.
    #[error("wave table must contain at least one wave")]
    Empty,
    /// A wave lists no enemy kinds to spawn.
    #[error("wave {wave} has an empty roster")]
    EmptyRoster {
        /// One-based index of the offending wave.
        wave: u32,
    },
    /// A wave declares a quota of zero enemies.
    #[error("wave {wave} spawns no enemies")]
    ZeroCount {
        /// One-based index of the offending wave.
        wave: u32,
    },
}

/// Validated, non-empty list of waves.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<WaveDefinition>", into = "Vec<WaveDefinition>")]
pub struct WaveTable {
    waves: Vec<WaveDefinition>,
}

impl WaveTable {
    /// Validates and wraps the provided waves.
    pub fn new(waves: Vec<WaveDefinition>) -> Result<Self, WaveTableError> {
        if waves.is_empty() {
            return Err(WaveTableError::Empty);
        }
        for (index, wave) in waves.iter().enumerate() {
            let number = index as u32 + 1;
            if wave.roster.is_empty() {
                return Err(WaveTableError::EmptyRoster { wave: number });
            }
            if wave.enemy_count == 0 {
                return Err(WaveTableError::ZeroCount { wave: number });
            }
        }
        Ok(Self { waves })
    }

    /// The five-wave table the arena ships with.
    #[must_use]
    pub fn standard() -> Self {
        use EnemyKind::{Melee, Ranged, Tank};

        Self {
            waves: vec![
                WaveDefinition::new(5, vec![Melee; 5]),
                WaveDefinition::new(5, vec![Melee, Melee, Melee, Ranged, Ranged]),
                WaveDefinition::new(6, vec![Melee, Melee, Ranged, Ranged, Tank]),
                WaveDefinition::new(7, vec![Ranged, Ranged, Ranged, Tank, Tank]),
                WaveDefinition::new(
                    8,
                    vec![Melee, Melee, Ranged, Ranged, Tank, Tank, Tank, Tank],
                ),
            ],
        }
    }

    /// Number of waves in the table.
    #[must_use]
    pub fn len(&self) -> u32 {
        self.waves.len() as u32
    }

    /// Always false; tables are validated to hold at least one wave.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.waves.is_empty()
    }

    /// Definition of the wave with the provided one-based number.
    #[must_use]
    pub fn wave(&self, number: u32) -> Option<&WaveDefinition> {
        let index = number.checked_sub(1)?;
        self.waves.get(index as usize)
    }

    /// Enemy quota of the wave with the provided one-based number, zero when absent.
    #[must_use]
    pub fn enemy_count(&self, number: u32) -> u32 {
        self.wave(number).map_or(0, |wave| wave.enemy_count)
    }

    /// Kind of the `spawn_index`-th enemy of wave `number`.
    #[must_use]
    pub fn kind_at(&self, number: u32, spawn_index: u32) -> Option<EnemyKind> {
        let wave = self.wave(number)?;
        let slot = spawn_index as usize % wave.roster.len();
        wave.roster.get(slot).copied()
    }

    /// Iterates the wave definitions in order.
    pub fn iter(&self) -> impl Iterator<Item = &WaveDefinition> {
        self.waves.iter()
    }
}

impl Default for WaveTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl TryFrom<Vec<WaveDefinition>> for WaveTable {
    type Error = WaveTableError;

    fn try_from(waves: Vec<WaveDefinition>) -> Result<Self, Self::Error> {
        Self::new(waves)
    }
}

impl From<WaveTable> for Vec<WaveDefinition> {
    fn from(table: WaveTable) -> Self {
        table.waves
    }
}
