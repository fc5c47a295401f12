//! Error types for card-rl.
//!
//! Recoverable game-level conditions (illegal actions, empty masks) are not
//! errors: the environment reports them through rewards and `StepInfo`. The
//! variants here cover configuration mistakes and contract violations.

use thiserror::Error;

/// Main error type.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("no legal actions in the current state")]
    NoLegalActions,

    #[error("action {action} is out of range for an action space of {action_count}")]
    ActionOutOfRange { action: usize, action_count: usize },

    #[error("non-finite {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("episode already finished; call reset() first")]
    EpisodeFinished,

    #[error("engine error: {0}")]
    Engine(#[from] EngineError),
}

impl Error {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Error::InvalidConfig {
            message: message.into(),
        }
    }
}

/// Errors reported by a `CardEngine` when it refuses an action.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EngineError {
    #[error("action index {0} does not exist in the action space")]
    InvalidIndex(usize),

    #[error("action index {0} is masked out in the current state")]
    MaskedAction(usize),

    #[error("action index {0} does not map to a concrete action")]
    InvalidActionConversion(usize),

    #[error("action not valid in the current stage")]
    InvalidStage,
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_converts() {
        let err: Error = EngineError::MaskedAction(3).into();
        assert_eq!(err, Error::Engine(EngineError::MaskedAction(3)));
        assert_eq!(
            err.to_string(),
            "engine error: action index 3 is masked out in the current state"
        );
    }

    #[test]
    fn test_config_error_message() {
        let err = Error::config("learning_rate must be in (0, 1]");
        assert_eq!(
            err.to_string(),
            "invalid configuration: learning_rate must be in (0, 1]"
        );
    }
}
