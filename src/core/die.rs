//! Dice backed by a shared random source.
//!
//! ## Distribution
//!
//! A roll is `(source.next() % sides) + 1`. The result is always in
//! `[1, sides]`, but it is exactly uniform only when the source is uniform
//! and its range is an integer multiple of `sides`. With the reference
//! `[1, 10]` source and a six-sided die the mapping is:
//!
//! | source value | 1 | 2 | 3 | 4 | 5 | 6 | 7 | 8 | 9 | 10 |
//! |--------------|---|---|---|---|---|---|---|---|---|----|
//! | face         | 2 | 3 | 4 | 5 | 6 | 1 | 2 | 3 | 4 | 5  |
//!
//! Faces 2 through 5 each have probability 2/10, faces 1 and 6 each 1/10.
//! The bias is kept as-is.

use std::fmt;
use std::sync::Arc;

use super::error::{GameError, Result};
use super::rng::RandomSource;

/// A die with a fixed number of sides.
#[derive(Clone)]
pub struct Die {
    sides: u32,
    source: Arc<dyn RandomSource>,
}

impl Die {
    /// Create a die drawing from `source`.
    ///
    /// Fails with [`GameError::Configuration`] when `sides` is zero.
    pub fn new(sides: u32, source: Arc<dyn RandomSource>) -> Result<Self> {
        if sides == 0 {
            return Err(GameError::Configuration(
                "a die needs at least one side".into(),
            ));
        }
        Ok(Self { sides, source })
    }

    /// Number of sides.
    #[must_use]
    pub fn sides(&self) -> u32 {
        self.sides
    }

    /// Roll the die, yielding a value in `[1, sides]`.
    pub fn roll(&self) -> u32 {
        (self.source.next() % self.sides) + 1
    }
}

impl fmt::Debug for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Die").field("sides", &self.sides).finish_non_exhaustive()
    }
}
