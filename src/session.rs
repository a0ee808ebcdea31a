//! Serialized access to games.
//!
//! `GameSessions` is the entry point for callers sharing games between
//! threads. Each live game id has its own mutex, held for the whole of an
//! operation: load, action, effects, end-of-turn, commit. Operations on
//! different games never wait on each other. A game's mutex is dropped once
//! the game is finished or cancelled.
//!
//! Every operation runs inside a [`UnitOfWork`]. An operation that fails
//! (or panics) part-way drops its unit uncommitted, so the stored game is
//! left as it was before the call.
//!
//! ```
//! use wonders_engine::cards::Catalog;
//! use wonders_engine::core::{EngineConfig, UserId};
//! use wonders_engine::session::GameSessions;
//! use wonders_engine::store::InMemoryStore;
//!
//! let sessions = GameSessions::new(InMemoryStore::new(), Catalog::new(), EngineConfig::default()).unwrap();
//! let id = sessions.create_game(42).unwrap();
//! sessions.join_game(id, UserId::new(1)).unwrap();
//! assert_eq!(sessions.game(id).unwrap().users, vec![UserId::new(1)]);
//! ```

use rustc_hash::FxHashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info, instrument};

use crate::cards::{CardId, Catalog};
use crate::core::{Action, EngineConfig, Game, GameId, GameRng, Seat, UserId};
use crate::draft::DealReport;
use crate::error::{EngineError, Result};
use crate::store::{GameStore, UnitOfWork};
use crate::turn::{Lifecycle, Submission, TurnOutcome};

/// Games behind a store, one writer per game at a time.
pub struct GameSessions<S: GameStore> {
    store: S,
    catalog: Catalog,
    config: EngineConfig,
    locks: Mutex<FxHashMap<GameId, Arc<Mutex<()>>>>,
}

impl<S: GameStore> GameSessions<S> {
    /// Create sessions over `store`. Fails if `config` is invalid.
    pub fn new(store: S, catalog: Catalog, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        info!(
            cards = catalog.cards.len(),
            wonders = catalog.wonders.len(),
            effects = catalog.effects.len(),
            "sessions ready"
        );
        Ok(Self {
            store,
            catalog,
            config,
            locks: Mutex::new(FxHashMap::default()),
        })
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Create a waiting game and return its id.
    #[instrument(skip_all, fields(seed = seed))]
    pub fn create_game(&self, seed: u64) -> Result<GameId> {
        let id = self.store.next_game_id();
        let game = self.lifecycle().create_game(id, seed);
        UnitOfWork::create(&self.store, game).commit()?;
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, Arc::default());
        Ok(id)
    }

    /// Snapshot of a game's current state.
    ///
    /// Takes no game lock: operations commit with a single save.
    pub fn game(&self, id: GameId) -> Result<Game> {
        Ok(UnitOfWork::begin(&self.store, id)?.game().clone())
    }

    #[instrument(skip_all, fields(game = %id, user = %user))]
    pub fn join_game(&self, id: GameId, user: UserId) -> Result<()> {
        self.with_game(id, |lifecycle, game, _| lifecycle.join_game(game, user))
    }

    #[instrument(skip_all, fields(game = %id, user = %user))]
    pub fn leave_game(&self, id: GameId, user: UserId) -> Result<()> {
        self.with_game(id, |lifecycle, game, _| lifecycle.leave_game(game, user))
    }

    #[instrument(skip_all, fields(game = %id))]
    pub fn start_game(&self, id: GameId) -> Result<DealReport> {
        self.with_game(id, |lifecycle, game, rng| lifecycle.start_game(game, rng))
    }

    #[instrument(skip_all, fields(game = %id))]
    pub fn cancel_game(&self, id: GameId) -> Result<()> {
        self.with_game(id, |lifecycle, game, _| lifecycle.cancel_game(game))
    }

    /// Submit a round action for `seat`.
    #[instrument(skip_all, fields(game = %id, seat = %seat, action = ?action))]
    pub fn submit_action(&self, id: GameId, seat: Seat, action: Action) -> Result<Submission> {
        self.with_game(id, |lifecycle, game, rng| {
            lifecycle.submit_action(game, seat, action, rng)
        })
    }

    /// Answer `seat`'s discard decision with `card`.
    #[instrument(skip_all, fields(game = %id, seat = %seat, card = %card))]
    pub fn build_from_discard(&self, id: GameId, seat: Seat, card: CardId) -> Result<Submission> {
        self.with_game(id, |lifecycle, game, rng| {
            lifecycle.build_from_discard(game, seat, card, rng)
        })
    }

    /// Decline `seat`'s discard decision.
    #[instrument(skip_all, fields(game = %id, seat = %seat))]
    pub fn pass_decision(&self, id: GameId, seat: Seat) -> Result<TurnOutcome> {
        self.with_game(id, |lifecycle, game, rng| lifecycle.pass_decision(game, seat, rng))
    }

    fn lifecycle(&self) -> Lifecycle<'_> {
        Lifecycle::new(&self.catalog, &self.config)
    }

    /// Lock for `id`. Live games stored by someone else get a lock on first
    /// use; finished or cancelled games get an untracked one.
    fn lock_for(&self, id: GameId) -> Result<Arc<Mutex<()>>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(lock) = locks.get(&id) {
            return Ok(Arc::clone(lock));
        }
        match self.store.load_game(id)? {
            None => Err(EngineError::GameNotFound(id)),
            Some(game) if game.status.is_terminal() => Ok(Arc::default()),
            Some(_) => Ok(Arc::clone(locks.entry(id).or_default())),
        }
    }

    fn release(&self, id: GameId) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        if locks.remove(&id).is_some() {
            debug!(game = %id, "game lock released");
        }
    }

    /// Run `op` on a working copy of `id` and commit if it succeeds.
    fn with_game<T>(
        &self,
        id: GameId,
        op: impl FnOnce(&Lifecycle<'_>, &mut Game, &mut GameRng) -> Result<T>,
    ) -> Result<T> {
        let lock = self.lock_for(id)?;
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut unit = UnitOfWork::begin(&self.store, id)?;
        let game = unit.game_mut();
        let mut rng = game.rng();
        let out = op(&self.lifecycle(), game, &mut rng)?;
        game.store_rng(&rng);
        let saved = unit.commit()?;
        // Terminal games reject every write, so nothing needs their lock.
        if saved.status.is_terminal() {
            self.release(id);
        }
        Ok(out)
    }
}
