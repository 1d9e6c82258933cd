//! Observer trait and registry.
//!
//! Observers are trusted, in-process listeners. The registry calls them
//! synchronously in registration order; the first failure stops delivery
//! of that event and is handed back to the caller.

use crate::core::error::{GameError, ObserverError, Result};
use crate::core::player::{Player, PlayerId};
use crate::rules::GameOutcome;

use super::event::GameEvent;

/// Result returned by observer handlers.
pub type ObserverResult = std::result::Result<(), ObserverError>;

/// Listener for game lifecycle events.
///
/// Every handler defaults to doing nothing, so implementations only
/// override the events they care about. [`GameObserver::on_event`] routes
/// an event to its handler; override it to see every event in one place.
pub trait GameObserver {
    /// The game has started.
    fn game_started(&mut self, _players: &[Player]) -> ObserverResult {
        Ok(())
    }

    /// A player finished a turn.
    fn turn_ended(&mut self, _player: PlayerId, _roll: u32, _new_score: u32) -> ObserverResult {
        Ok(())
    }

    /// A player was knocked out.
    fn player_knocked_out(&mut self, _player: PlayerId) -> ObserverResult {
        Ok(())
    }

    /// The game is over.
    fn game_ended(&mut self, _outcome: &GameOutcome) -> ObserverResult {
        Ok(())
    }

    /// Route an event to its handler.
    fn on_event(&mut self, event: &GameEvent) -> ObserverResult {
        match event {
            GameEvent::GameStarted { players } => self.game_started(players),
            GameEvent::TurnEnded {
                player,
                roll,
                new_score,
            } => self.turn_ended(*player, *roll, *new_score),
            GameEvent::PlayerKnockedOut { player } => self.player_knocked_out(*player),
            GameEvent::GameEnded { outcome } => self.game_ended(outcome),
        }
    }
}

/// Ordered set of observers.
///
/// No duplicate protection: registering the same kind of observer twice
/// delivers every event to it twice.
#[derive(Default)]
pub struct ObserverRegistry {
    observers: Vec<Box<dyn GameObserver>>,
}

impl ObserverRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an observer after all existing ones.
    pub fn register(&mut self, observer: impl GameObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Deliver an event to every observer in registration order.
    pub fn dispatch(&mut self, event: &GameEvent) -> Result<()> {
        for observer in &mut self.observers {
            observer.on_event(event).map_err(GameError::Observer)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.observers.len())
            .finish()
    }
}
