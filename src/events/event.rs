//! Game event types.
//!
//! Events describe what happened during a game. The engine emits them in
//! a fixed order within a turn: `TurnEnded`, then `PlayerKnockedOut` if the
//! roll eliminated the player, then `GameEnded` if the turn finished the
//! game.

use serde::{Deserialize, Serialize};

use crate::core::player::{Player, PlayerId};
use crate::rules::GameOutcome;

/// A game lifecycle event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameEvent {
    /// The game has started. Carries the players in turn order.
    GameStarted { players: Vec<Player> },

    /// A player rolled. `roll` is the two-dice total and `new_score` the
    /// player's score afterwards.
    TurnEnded {
        player: PlayerId,
        roll: u32,
        new_score: u32,
    },

    /// A player rolled their knock-out number.
    PlayerKnockedOut { player: PlayerId },

    /// The game is over.
    GameEnded { outcome: GameOutcome },
}

impl GameEvent {
    /// Short name of the event kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            GameEvent::GameStarted { .. } => "game_started",
            GameEvent::TurnEnded { .. } => "turn_ended",
            GameEvent::PlayerKnockedOut { .. } => "player_knocked_out",
            GameEvent::GameEnded { .. } => "game_ended",
        }
    }

    /// The player the event is about, if any.
    #[must_use]
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            GameEvent::TurnEnded { player, .. } | GameEvent::PlayerKnockedOut { player } => {
                Some(*player)
            }
            GameEvent::GameStarted { .. } | GameEvent::GameEnded { .. } => None,
        }
    }
}
