//! Dice game trait for game implementations.
//!
//! Games implement `DiceGame` to define:
//! - Which dice are rolled
//! - How a turn is played
//! - When the game ends and who won
//!
//! `DiceGame::play` drives any implementation to completion.

pub mod engine;

pub use engine::{DiceGame, GameOutcome};
