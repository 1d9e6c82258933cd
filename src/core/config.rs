//! Game configuration.
//!
//! The rules of Knock Out! are fixed, but the table they are played on is
//! not: die size, winning score and the default random source can all be
//! adjusted. Everything defaults to the classic game.

use serde::{Deserialize, Serialize};

use super::error::{GameError, Result};
use super::rng::DEFAULT_SOURCE_RANGE;

/// Largest die size whose two faces still sum within a `u32`.
pub const MAX_DIE_SIDES: u32 = u32::MAX / 2;

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Sides on each of the two dice (default: 6).
    pub die_sides: u32,

    /// Score that ends the game (default: 100).
    pub target_score: u32,

    /// Upper bound of the default random source (default: 10).
    /// Ignored when a source is injected.
    pub source_range: u32,

    /// Seed for the default random source.
    /// Same seed produces the same game.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            die_sides: 6,
            target_score: 100,
            source_range: DEFAULT_SOURCE_RANGE,
            seed: 42,
        }
    }
}

impl GameConfig {
    /// Parse a JSON configuration and validate it.
    ///
    /// Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every setting is usable.
    pub fn validate(&self) -> Result<()> {
        if self.die_sides == 0 {
            return Err(GameError::Configuration("die_sides must be positive".into()));
        }
        if self.die_sides > MAX_DIE_SIDES {
            return Err(GameError::Configuration(format!(
                "die_sides must be at most {MAX_DIE_SIDES}, got {}",
                self.die_sides
            )));
        }
        if self.target_score == 0 {
            return Err(GameError::Configuration("target_score must be positive".into()));
        }
        if self.source_range == 0 {
            return Err(GameError::Configuration("source_range must be positive".into()));
        }
        Ok(())
    }

    /// Set the number of sides per die.
    #[must_use]
    pub fn with_die_sides(mut self, sides: u32) -> Self {
        self.die_sides = sides;
        self
    }

    /// Set the winning score.
    #[must_use]
    pub fn with_target_score(mut self, score: u32) -> Self {
        self.target_score = score;
        self
    }

    /// Set the default source's range.
    #[must_use]
    pub fn with_source_range(mut self, range: u32) -> Self {
        self.source_range = range;
        self
    }

    /// Set the default source's seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
