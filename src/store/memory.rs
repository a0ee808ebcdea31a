//! In-memory game store.
//!
//! Games are kept as `bincode` snapshots, so every load hands out an
//! independent copy and a caller can never mutate stored state in place.

use rustc_hash::FxHashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use super::gateway::{GameStore, StoreError};
use crate::core::{Game, GameId};

/// Process-local store backed by encoded snapshots.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    games: Mutex<FxHashMap<GameId, Vec<u8>>>,
    next_id: AtomicU64,
}

impl InMemoryStore {
    /// Create an empty store. Ids start at 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored games.
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.games.lock().map_err(|_| StoreError::Poisoned)?.len())
    }

    /// Check if the store holds no games.
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

impl GameStore for InMemoryStore {
    fn load_game(&self, id: GameId) -> Result<Option<Game>, StoreError> {
        let games = self.games.lock().map_err(|_| StoreError::Poisoned)?;
        games
            .get(&id)
            .map(|bytes| bincode::deserialize(bytes).map_err(|source| StoreError::Decode { game: id, source }))
            .transpose()
    }

    fn save_game(&self, game: &Game) -> Result<(), StoreError> {
        let bytes = bincode::serialize(game).map_err(|source| StoreError::Encode {
            game: game.id,
            source,
        })?;
        self.games
            .lock()
            .map_err(|_| StoreError::Poisoned)?
            .insert(game.id, bytes);
        Ok(())
    }

    fn next_game_id(&self) -> GameId {
        GameId::new(self.next_id.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EngineConfig, PlayerRing, PlayerState, Seat, UserId};

    #[test]
    fn test_save_and_load() {
        let store = InMemoryStore::new();
        let config = EngineConfig::default();
        let mut game = Game::new(store.next_game_id(), 3);
        game.players = PlayerRing::new(3, |s| PlayerState::new(UserId::new(s.index() as u64), s, &config));
        game.players[Seat::new(1)].coins = 9;

        store.save_game(&game).unwrap();
        assert_eq!(store.load_game(game.id).unwrap(), Some(game.clone()));
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_load_returns_copies() {
        let store = InMemoryStore::new();
        let game = Game::new(store.next_game_id(), 0);
        store.save_game(&game).unwrap();

        let mut copy = store.load_game(game.id).unwrap().unwrap();
        copy.users.push(UserId::new(1));
        assert!(store.load_game(game.id).unwrap().unwrap().users.is_empty());
    }

    #[test]
    fn test_ids_are_fresh() {
        let store = InMemoryStore::new();
        let a = store.next_game_id();
        let b = store.next_game_id();
        assert_ne!(a, b);
        assert!(store.load_game(a).unwrap().is_none());
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_ids_start_at_one() {
        let store = InMemoryStore::default();
        assert_eq!(store.next_game_id(), GameId::new(1));
        assert_eq!(store.next_game_id(), GameId::new(2));
    }
}
