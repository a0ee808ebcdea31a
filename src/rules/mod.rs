//! Action rules: affordability and the action executor.
//!
//! `affordability` answers whether a seat can pay a cost given its own
//! production, its wildcards and pairs, and what its two neighbours make.
//! `ActionExecutor` is the only code that plays, builds or discards cards.

pub mod affordability;
pub mod executor;

pub use affordability::{can_afford, quote, settle, Payment, TradeQuote};
pub use executor::ActionExecutor;
