//! Ready-made observers.
//!
//! - [`GameTracker`]: reports progress through `tracing` and keeps
//!   running statistics
//! - [`EventLog`]: records every event verbatim
//!
//! Both are cheap handles over shared state: register a clone with the
//! game and keep the original to read from afterwards.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::player::{Player, PlayerId};
use crate::rules::GameOutcome;

use super::event::GameEvent;
use super::observer::{GameObserver, ObserverResult};

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Statistics collected by a [`GameTracker`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerStats {
    /// Number of players at the start.
    pub players: usize,
    /// Turns played so far.
    pub turns: u32,
    /// Highest two-dice total seen.
    pub best_roll: u32,
    /// Players knocked out, in the order it happened.
    pub knocked_out: Vec<PlayerId>,
    /// Final result, once the game is over.
    pub outcome: Option<GameOutcome>,
}

/// Tracks the status of a game and logs it.
#[derive(Clone, Debug, Default)]
pub struct GameTracker {
    stats: Arc<Mutex<TrackerStats>>,
}

impl GameTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the statistics so far.
    #[must_use]
    pub fn stats(&self) -> TrackerStats {
        lock(&self.stats).clone()
    }
}

impl GameObserver for GameTracker {
    fn game_started(&mut self, players: &[Player]) -> ObserverResult {
        let mut stats = lock(&self.stats);
        *stats = TrackerStats {
            players: players.len(),
            ..TrackerStats::default()
        };
        info!(players = players.len(), "Started a new game of Knock Out!");
        for player in players {
            debug!(player = %player, knock_out = %player.knock_out_number(), "Player joined");
        }
        Ok(())
    }

    fn turn_ended(&mut self, player: PlayerId, roll: u32, new_score: u32) -> ObserverResult {
        let mut stats = lock(&self.stats);
        stats.turns += 1;
        stats.best_roll = stats.best_roll.max(roll);
        debug!(turn = stats.turns, %player, roll, score = new_score, "Turn ended");
        Ok(())
    }

    fn player_knocked_out(&mut self, player: PlayerId) -> ObserverResult {
        lock(&self.stats).knocked_out.push(player);
        info!(%player, "Knocked out");
        Ok(())
    }

    fn game_ended(&mut self, outcome: &GameOutcome) -> ObserverResult {
        let mut stats = lock(&self.stats);
        stats.outcome = Some(outcome.clone());
        info!(turns = stats.turns, %outcome, "The game lasted {} turns", stats.turns);
        Ok(())
    }
}

/// Records every event it receives.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<GameEvent>>>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all events received so far.
    #[must_use]
    pub fn events(&self) -> Vec<GameEvent> {
        lock(&self.events).clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        lock(&self.events).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        lock(&self.events).is_empty()
    }

    /// The log as a JSON array.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&*lock(&self.events))
    }
}

impl GameObserver for EventLog {
    fn on_event(&mut self, event: &GameEvent) -> ObserverResult {
        lock(&self.events).push(event.clone());
        Ok(())
    }
}
