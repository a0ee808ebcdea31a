//! Static reference data: cards, wonder boards and their registries.
//!
//! ## Key Types
//!
//! - `CardId`, `CardDefinition`: a card's color, age, cost and effect
//! - `Wonder`: a board's starting production and ordered stages
//! - `CardRegistry`, `WonderRegistry`: lookup by ID
//! - `Catalog`: every registry a game consults, effects included

pub mod definition;
pub mod registry;
pub mod wonder;

pub use definition::{CardColor, CardDefinition, CardId};
pub use registry::{CardRegistry, Catalog, WonderRegistry};
pub use wonder::{Wonder, WonderFace, WonderId, WonderStage};
