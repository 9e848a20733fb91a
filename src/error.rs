//! Error types for the qlearner crate

use thiserror::Error;

/// Main error type for the qlearner crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("state {state} is out of range (num_states = {num_states})")]
    StateOutOfRange { state: usize, num_states: usize },

    #[error("action {action} is out of range (num_actions = {num_actions})")]
    ActionOutOfRange { action: usize, num_actions: usize },

    #[error("query called before querysetstate: learner has no current state")]
    NotTracking,

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("environment error: {message}")]
    Environment { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;
