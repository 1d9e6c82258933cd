//! # knockout-dice
//!
//! A turn-based dice elimination engine for the game *Knock Out!*.
//!
//! ## Design Principles
//!
//! 1. **Pluggable Randomness**: Dice draw from a shared [`RandomSource`].
//!    Swap in a fixed or scripted source and the whole game becomes
//!    deterministic.
//!
//! 2. **Observable**: Every start, turn, elimination and finish is pushed
//!    to registered [`GameObserver`]s, synchronously and in order.
//!
//! 3. **Fail at Setup**: Bad knock-out numbers, zero-sided dice and empty
//!    games are rejected before any turn is played.
//!
//! ## Example
//!
//! ```
//! use knockout_dice::{DiceGame, GameTracker, KnockOutGame};
//!
//! let tracker = GameTracker::new();
//! let mut game = KnockOutGame::builder()
//!     .players([6, 7, 9])
//!     .seed(42)
//!     .build()
//!     .unwrap();
//! game.register_observer(tracker.clone());
//!
//! let outcome = game.play().unwrap();
//! assert_eq!(tracker.stats().outcome, Some(outcome));
//! ```
//!
//! ## Modules
//!
//! - `core`: Errors, random sources, dice, players, configuration
//! - `rules`: `DiceGame` trait and game outcomes
//! - `events`: Game events, observers and ready-made trackers
//! - `games`: The Knock Out! game itself

pub mod core;
pub mod events;
pub mod games;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    Die, FixedSource, GameConfig, GameError, KnockOutNumber, Player, PlayerId, RandomSource,
    Result, RollOutcome, SequenceSource, SourceState, UniformSource,
};

pub use crate::events::{EventLog, GameEvent, GameObserver, GameTracker, ObserverRegistry, TrackerStats};

pub use crate::rules::{DiceGame, GameOutcome};

pub use crate::games::knockout::{GamePhase, KnockOutGame, KnockOutGameBuilder, TurnReport};
