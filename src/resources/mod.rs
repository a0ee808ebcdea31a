//! Resource model: the static vocabulary every cost check is written in.
//!
//! - `ResourceKind`: nine kinds, each in exactly one `ResourceClass`
//! - `ScienceKind`: four science symbols
//! - `ResourcePair`: six "one of two base kinds" productions
//! - `Tally`: kind-to-count mapping, and `Cost`

mod kind;
mod tally;

pub use kind::{
    ResourceClass, ResourceKind, ResourcePair, ScienceKind, RESOURCE_ORDER, SCIENCE_ORDER,
};
pub use tally::{Cost, PairCounts, ResourceCounts, ScienceCounts, Tally};
