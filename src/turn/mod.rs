//! Round and age progression, and the game lifecycle around it.
//!
//! `TurnManager` is the end-of-turn state machine. `Lifecycle` wraps it with
//! game creation, joining, starting, cancelling and action submission.

pub mod lifecycle;
pub mod machine;

pub use lifecycle::{Lifecycle, Submission};
pub use machine::{TurnManager, TurnOutcome};
