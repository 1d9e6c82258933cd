//! Knock Out!, a dice elimination game.
//!
//! - Each player picks a knock-out number: 6, 7, 8 or 9
//! - On their turn a player throws both dice and adds the total to their
//!   score
//! - Rolling your own knock-out number knocks you out (nothing is added)
//! - Play ends when everyone is out, or someone reaches 100 points
//!
//! Supports any number of players from 1 to 256.

mod game;

pub use game::{GamePhase, KnockOutGame, KnockOutGameBuilder, TurnReport, MAX_PLAYERS};
