//! Persistence gateway.

use thiserror::Error;

use crate::core::{Game, GameId};

/// Failures reported by a [`GameStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to encode {game}: {source}")]
    Encode {
        game: GameId,
        #[source]
        source: bincode::Error,
    },

    #[error("failed to decode {game}: {source}")]
    Decode {
        game: GameId,
        #[source]
        source: bincode::Error,
    },

    #[error("store lock poisoned")]
    Poisoned,

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Load/save access to persisted games.
///
/// Implementations are shared between threads; per-game ordering is the
/// caller's concern (see `GameSessions`).
pub trait GameStore: Send + Sync {
    /// Load a game, or `None` if no game has this id.
    fn load_game(&self, id: GameId) -> Result<Option<Game>, StoreError>;

    /// Insert or replace a game.
    fn save_game(&self, game: &Game) -> Result<(), StoreError>;

    /// Reserve a fresh game id.
    fn next_game_id(&self) -> GameId;
}
