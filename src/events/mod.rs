//! Game events and the observers that receive them.
//!
//! ## Design
//!
//! The engine pushes [`GameEvent`]s to every registered [`GameObserver`],
//! synchronously and in registration order. Observers are trusted
//! collaborators: a failing observer aborts the call that emitted the
//! event, after the game state has already changed.
//!
//! ## Example Usage
//!
//! ```
//! use knockout_dice::events::{EventLog, GameEvent, ObserverRegistry};
//!
//! let log = EventLog::new();
//! let mut registry = ObserverRegistry::new();
//! registry.register(log.clone());
//!
//! registry.dispatch(&GameEvent::GameStarted { players: vec![] }).unwrap();
//! assert_eq!(log.len(), 1);
//! ```

pub mod event;
pub mod observer;
pub mod tracker;

pub use event::GameEvent;
pub use observer::{GameObserver, ObserverRegistry, ObserverResult};
pub use tracker::{EventLog, GameTracker, TrackerStats};
