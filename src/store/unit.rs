//! Scoped unit of work over one game.
//!
//! A unit loads a game into a working copy. Changes reach the store only
//! through [`UnitOfWork::commit`]; a unit dropped without committing (early
//! return, error, panic) leaves the stored game as it was.

use tracing::debug;

use super::gateway::GameStore;
use crate::core::{Game, GameId};
use crate::error::{EngineError, Result};

/// Working copy of one game bound to its store.
pub struct UnitOfWork<'s, S: GameStore + ?Sized> {
    store: &'s S,
    game: Game,
    committed: bool,
}

impl<'s, S: GameStore + ?Sized> UnitOfWork<'s, S> {
    /// Load `id` into a new unit.
    pub fn begin(store: &'s S, id: GameId) -> Result<Self> {
        let game = store.load_game(id)?.ok_or(EngineError::GameNotFound(id))?;
        debug!(game = %id, "unit of work started");
        Ok(Self {
            store,
            game,
            committed: false,
        })
    }

    /// Start a unit for a game not yet in the store.
    pub fn create(store: &'s S, game: Game) -> Self {
        debug!(game = %game.id, "unit of work started for new game");
        Self {
            store,
            game,
            committed: false,
        }
    }

    /// The working copy.
    #[must_use]
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// The working copy, mutably.
    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    /// Save the working copy and return it.
    pub fn commit(mut self) -> Result<Game> {
        self.store.save_game(&self.game)?;
        self.committed = true;
        debug!(game = %self.game.id, "unit of work committed");
        Ok(self.game.clone())
    }
}

impl<S: GameStore + ?Sized> Drop for UnitOfWork<'_, S> {
    fn drop(&mut self) {
        if !self.committed {
            debug!(game = %self.game.id, "unit of work rolled back");
        }
    }
}
