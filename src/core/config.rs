//! Game configuration types.
//!
//! Games describe themselves to the engine with a `GameConfig`. The engine
//! only reads the player limits; everything else is game-owned configuration
//! kept next to the game (see `RelayConfig`, `DiceConfig`, `GridConfig`).

use serde::{Deserialize, Serialize};

use super::error::SetupError;

/// Inclusive bounds on the number of seated players.
///
/// Deserialization runs the same checks as `try_new`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLimits")]
pub struct PlayerLimits {
    /// Fewest players a game may run with. Dropping below ends the game.
    pub min: usize,
    /// Most players that may be seated at once.
    pub max: usize,
}

impl PlayerLimits {
    /// Create limits, panicking on an empty range.
    #[must_use]
    pub const fn new(min: usize, max: usize) -> Self {
        assert!(min > 0, "Must allow at least 1 player");
        assert!(min <= max, "Minimum player count exceeds maximum");
        Self { min, max }
    }

    /// Create limits, rejecting an empty range.
    pub fn try_new(min: usize, max: usize) -> Result<Self, SetupError> {
        if min == 0 || min > max {
            return Err(SetupError::InvalidLimits { min, max });
        }
        Ok(Self { min, max })
    }

    /// Check a starting player count.
    pub fn check(&self, count: usize) -> Result<(), SetupError> {
        if (self.min..=self.max).contains(&count) {
            Ok(())
        } else {
            Err(SetupError::PlayerCount {
                min: self.min,
                max: self.max,
                got: count,
            })
        }
    }
}

#[derive(Deserialize)]
struct RawLimits {
    min: usize,
    max: usize,
}

impl TryFrom<RawLimits> for PlayerLimits {
    type Error = SetupError;

    fn try_from(raw: RawLimits) -> Result<Self, Self::Error> {
        Self::try_new(raw.min, raw.max)
    }
}

impl Default for PlayerLimits {
    fn default() -> Self {
        Self::new(2, 8)
    }
}

/// Engine-facing description of a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Human-readable name (for logs).
    pub name: String,

    /// Seating limits.
    pub limits: PlayerLimits,
}

impl GameConfig {
    /// Create a new game configuration.
    pub fn new(name: impl Into<String>, limits: PlayerLimits) -> Self {
        Self {
            name: name.into(),
            limits,
        }
    }
}
