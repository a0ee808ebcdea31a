//! Structural error taxonomy.
//!
//! Rule validation failures (unaffordable, card not in hand, wonder
//! complete) are not errors; those operations return `bool`. The variants
//! here are conditions a caller must surface: a missing game or player, an
//! operation issued in the wrong lifecycle state, or a failing gateway.

use thiserror::Error;

use crate::core::{ConfigError, GameId, Seat};
use crate::store::StoreError;

/// Errors raised by lifecycle, turn and session operations.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{0} not found")]
    GameNotFound(GameId),

    #[error("no player at {seat} in {game}")]
    PlayerNotFound { game: GameId, seat: Seat },

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

impl EngineError {
    /// Shorthand for an `InvalidState` error.
    pub fn invalid(message: impl Into<String>) -> Self {
        EngineError::InvalidState(message.into())
    }
}

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            EngineError::GameNotFound(GameId::new(3)).to_string(),
            "Game(3) not found"
        );
        assert_eq!(
            EngineError::PlayerNotFound {
                game: GameId::new(3),
                seat: Seat::new(5)
            }
            .to_string(),
            "no player at Seat 5 in Game(3)"
        );
        assert_eq!(
            EngineError::invalid("game already started").to_string(),
            "invalid state: game already started"
        );
    }

    #[test]
    fn test_config_error_converts() {
        let err: EngineError = ConfigError::Parse("bad".into()).into();
        assert!(matches!(err, EngineError::Config(_)));
    }
}
