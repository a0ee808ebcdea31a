//! # wonders-engine
//!
//! Rules engine for a three-age card drafting game with wonder boards.
//!
//! ## Design Principles
//!
//! 1. **N-Player Ring**: Players sit in a ring of 3 to 7 seats. Neighbours
//!    are derived from seat positions, never stored as references.
//!
//! 2. **One Authority per Rule**: Affordability is decided in one place
//!    (`rules::affordability`) and every play, build and discard goes
//!    through one `ActionExecutor`.
//!
//! 3. **Typed Effects**: Effect parameter strings are parsed into
//!    `Instruction`s once, then interpreted.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: Hands, tableaus, decks and the discard
//!   pile are `im` vectors, so a unit of work clones a game in O(1).
//!
//! - **Injectable Randomness**: Every shuffle takes a `GameRng`. The stream
//!   position is saved with the game, so a stored game reshuffles the same
//!   way after a reload.
//!
//! - **Single Writer per Game**: `GameSessions` serializes operations on each
//!   game and commits them through a `UnitOfWork`.
//!
//! ## Modules
//!
//! - `core`: ids, seats, ages, actions, RNG, configuration, game aggregate
//! - `resources`: resource and science kinds, counts, costs
//! - `cards`: card and wonder definitions, registries
//! - `effects`: effect definitions, instruction parser, resolver
//! - `rules`: affordability and the action executor
//! - `draft`: dealing and hand rotation
//! - `turn`: end-of-turn state machine and game lifecycle
//! - `store`: persistence gateway and units of work
//! - `session`: per-game serialized access
//! - `error`: structural error taxonomy

pub mod cards;
pub mod core;
pub mod draft;
pub mod effects;
pub mod error;
pub mod resources;
pub mod rules;
pub mod session;
pub mod store;
pub mod turn;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord, Age, EngineConfig, Game, GameId, GameRng, RngCursor, GameStatus,
    PlayerRing, PlayerState, Seat, TradePolicy, UserId,
};

pub use crate::resources::{Cost, ResourceClass, ResourceKind, ResourcePair, ScienceKind};

pub use crate::cards::{CardColor, CardDefinition, CardId, Catalog, Wonder, WonderFace, WonderId};

pub use crate::effects::{EffectDefinition, EffectId, EffectResolver, EffectTiming, Instruction};

pub use crate::rules::{can_afford, ActionExecutor, Payment};

pub use crate::draft::{distribute_cards, rotate_hands, DealReport};

pub use crate::turn::{Lifecycle, Submission, TurnManager, TurnOutcome};

pub use crate::store::{GameStore, InMemoryStore, StoreError, UnitOfWork};

pub use crate::session::GameSessions;

pub use crate::error::{EngineError, Result};
