//! Error types for game setup and play.
//!
//! Every failure is synchronous and fatal for the call that raised it.
//! Nothing here is transient, so nothing is retried.

/// Error reported by an observer while handling an event.
pub type ObserverError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised by the engine.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    /// Invalid engine configuration (e.g. a die with zero sides).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A knock-out number outside the allowed set.
    #[error("invalid rule: knock-out number {0} is not one of 6, 7, 8 or 9")]
    InvalidRule(u8),

    /// The game cannot be started or played in its current setup.
    #[error("setup error: {0}")]
    Setup(String),

    /// The game has finished; no more turns are processed.
    #[error("game is over")]
    GameOver,

    /// An observer failed while handling an event.
    #[error("observer failed: {0}")]
    Observer(#[source] ObserverError),

    /// Configuration text could not be parsed.
    #[error("invalid config: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GameError>;
