//! Distribution and rotation of hands.
//!
//! `distribute_cards` deals a fresh age; `rotate_hands` passes hands between
//! rounds of the same age. Both take the shuffling source per call.

mod deal;
mod rotation;

pub use deal::{age_pool, distribute_cards, DealReport};
pub use rotation::rotate_hands;
