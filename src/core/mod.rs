//! Core engine types: ids, seats, ages, actions, RNG, configuration, and the
//! game aggregate.
//!
//! Everything the rules mutate lives in `Game`; the rest of this module is
//! the vocabulary `Game` is written in.

pub mod action;
pub mod age;
pub mod config;
pub mod ids;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Action, ActionRecord};
pub use age::{passes_clockwise, Age};
pub use config::{ConfigError, EngineConfig, TradePolicy};
pub use ids::{GameId, UserId};
pub use player::{PlayerRing, Seat};
pub use rng::{GameRng, RngCursor};
pub use state::{unix_now, Game, GameStatus, PlayerState, Side, Timestamps, TradePrices};
