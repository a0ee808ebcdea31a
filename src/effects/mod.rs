//! Effect interpreter for card and wonder-stage effects.
//!
//! - `EffectDefinition`: an id, a timing, and a parameter string
//! - `Instruction`: one parsed parameter segment
//! - `EffectResolver`: applies instructions, queues timed effects, and fires
//!   queued effects when their timing comes up
//!
//! A parameter string is split on `|` and each segment is parsed just
//! before it is applied. A malformed segment stops the effect there, with
//! earlier segments left applied. `Instruction::parse` needs no game
//! state, so the grammar is tested on its own.

mod effect;
mod instruction;
mod resolver;

pub use effect::{EffectDefinition, EffectId, EffectRegistry, EffectTiming};
pub use instruction::{Instruction, Keyword, ParseError, PriceSide, SCIENCE_INDEX_OFFSET};
pub use resolver::{count_color, EffectResolver};
