//! The dice game trait and game outcomes.
//!
//! Games implement `DiceGame` to expose:
//! - The dice they roll
//! - How a game starts and how a single turn is played
//! - When the game is over and who won

use serde::{Deserialize, Serialize};

use crate::core::die::Die;
use crate::core::error::Result;
use crate::core::player::PlayerId;

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    /// Every remaining player tied at the highest score.
    /// A single entry for an outright win.
    Winners(Vec<PlayerId>),
    /// Everybody was knocked out.
    NoWinner,
}

impl GameOutcome {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        self.winners().contains(&player)
    }

    /// The winning players, empty when nobody won.
    #[must_use]
    pub fn winners(&self) -> &[PlayerId] {
        match self {
            GameOutcome::Winners(ps) => ps,
            GameOutcome::NoWinner => &[],
        }
    }
}

impl std::fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameOutcome::NoWinner => write!(f, "no winner"),
            GameOutcome::Winners(ps) => {
                let names: Vec<_> = ps.iter().map(ToString::to_string).collect();
                write!(f, "won by {}", names.join(", "))
            }
        }
    }
}

/// Dice game trait.
///
/// ## Implementation Notes
///
/// - `start`: must fail if the game cannot be played
/// - `play_turn`: must fail once the game is over, without changing state
/// - `outcome`: `None` until the game has finished
pub trait DiceGame {
    /// Report of a single turn.
    type Turn;

    /// The dice this game rolls.
    fn dice(&self) -> &[Die];

    /// Begin the game.
    fn start(&mut self) -> Result<()>;

    /// Has `start` been called?
    fn is_started(&self) -> bool;

    /// Play one turn.
    fn play_turn(&mut self) -> Result<Self::Turn>;

    /// The result, once the game has finished.
    fn outcome(&self) -> Option<&GameOutcome>;

    // === Convenience Methods ===

    /// Is the game over?
    fn is_over(&self) -> bool {
        self.outcome().is_some()
    }

    /// Start the game if needed and play until it finishes.
    fn play(&mut self) -> Result<GameOutcome> {
        if !self.is_started() {
            self.start()?;
        }
        loop {
            if let Some(outcome) = self.outcome() {
                return Ok(outcome.clone());
            }
            self.play_turn()?;
        }
    }
}
