//! Core engine types: errors, random sources, dice, players, configuration.
//!
//! This module contains the building blocks that every dice game needs.
//! Game rules live in `games`; the pieces here know nothing about them.

pub mod config;
pub mod die;
pub mod error;
pub mod player;
pub mod rng;

pub use config::{GameConfig, MAX_DIE_SIDES};
pub use die::Die;
pub use error::{GameError, ObserverError, Result};
pub use player::{KnockOutNumber, Player, PlayerId, RollOutcome};
pub use rng::{FixedSource, RandomSource, SequenceSource, SourceState, UniformSource};
