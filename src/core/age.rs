//! The three play ages.

use serde::{Deserialize, Serialize};

/// One of three sequential play phases, each with its own card pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Age {
    I,
    II,
    III,
}

impl Age {
    /// All ages in play order.
    pub const ALL: [Age; 3] = [Age::I, Age::II, Age::III];

    /// The age after this one. `None` after age III.
    #[must_use]
    pub const fn next(self) -> Option<Age> {
        match self {
            Age::I => Some(Age::II),
            Age::II => Some(Age::III),
            Age::III => None,
        }
    }

    /// Hands pass clockwise in ages I and III, counter-clockwise in age II.
    #[must_use]
    pub const fn passes_clockwise(self) -> bool {
        !matches!(self, Age::II)
    }

    /// Position in `Age::ALL`.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Rotation direction for an optional current age.
///
/// Outside any age (before start, after the last age) hands pass clockwise.
#[must_use]
pub fn passes_clockwise(age: Option<Age>) -> bool {
    age.map_or(true, Age::passes_clockwise)
}

impl std::fmt::Display for Age {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Age::I => write!(f, "Age I"),
            Age::II => write!(f, "Age II"),
            Age::III => write!(f, "Age III"),
        }
    }
}
