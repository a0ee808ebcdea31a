//! Resource, science and mutable-pair vocabularies.
//!
//! The order of `RESOURCE_ORDER` and `SCIENCE_ORDER` is part of the effect
//! grammar: instruction `4:1` grants one unit of `RESOURCE_ORDER[4]`, and
//! index `9 + i` grants `SCIENCE_ORDER[i]`. Never reorder these tables.

use serde::{Deserialize, Serialize};

/// Cost-checking class of a resource kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceClass {
    /// Raw materials: stone, wood, ore, brick.
    Base,
    /// Manufactured goods: glass, paper, textile.
    Advanced,
    /// Generic units standing in for any kind of one class.
    Wildcard,
}

/// A resource kind a player can produce or a cost can require.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceKind {
    Stone,
    Wood,
    Ore,
    Brick,
    Glass,
    Paper,
    Textile,
    /// Substitutes for any one base kind.
    MutableBase,
    /// Substitutes for any one advanced kind.
    MutableAdvanced,
}

/// Positional resource table used by effect grants (indices 0-8).
pub const RESOURCE_ORDER: [ResourceKind; 9] = [
    ResourceKind::Stone,
    ResourceKind::Wood,
    ResourceKind::Ore,
    ResourceKind::Brick,
    ResourceKind::Glass,
    ResourceKind::Paper,
    ResourceKind::Textile,
    ResourceKind::MutableBase,
    ResourceKind::MutableAdvanced,
];

impl ResourceKind {
    /// Classify this kind. Total over every variant.
    #[must_use]
    pub const fn class(self) -> ResourceClass {
        match self {
            ResourceKind::Stone | ResourceKind::Wood | ResourceKind::Ore | ResourceKind::Brick => {
                ResourceClass::Base
            }
            ResourceKind::Glass | ResourceKind::Paper | ResourceKind::Textile => {
                ResourceClass::Advanced
            }
            ResourceKind::MutableBase | ResourceKind::MutableAdvanced => ResourceClass::Wildcard,
        }
    }

    /// True for real (non-wildcard) kinds.
    #[must_use]
    pub const fn is_real(self) -> bool {
        !matches!(self.class(), ResourceClass::Wildcard)
    }

    /// Position of this kind in `RESOURCE_ORDER`.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Look up a kind by its `RESOURCE_ORDER` position.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        RESOURCE_ORDER.get(index).copied()
    }
}

impl ResourceClass {
    /// The wildcard kind that covers shortfalls of this class.
    ///
    /// `None` for the wildcard class itself.
    #[must_use]
    pub const fn wildcard(self) -> Option<ResourceKind> {
        match self {
            ResourceClass::Base => Some(ResourceKind::MutableBase),
            ResourceClass::Advanced => Some(ResourceKind::MutableAdvanced),
            ResourceClass::Wildcard => None,
        }
    }
}

/// Science symbol kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScienceKind {
    Tablet,
    Compass,
    Gear,
    /// Counts as any one symbol at scoring time.
    Mutable,
}

/// Positional science table used by effect grants (indices 9-12).
pub const SCIENCE_ORDER: [ScienceKind; 4] = [
    ScienceKind::Tablet,
    ScienceKind::Compass,
    ScienceKind::Gear,
    ScienceKind::Mutable,
];

impl ScienceKind {
    /// Look up a kind by its `SCIENCE_ORDER` position.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        SCIENCE_ORDER.get(index).copied()
    }
}

/// Production of exactly one of two base kinds, chosen at payment time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourcePair {
    StoneWood,
    StoneOre,
    StoneBrick,
    WoodOre,
    WoodBrick,
    OreBrick,
}

impl ResourcePair {
    /// All pairs, in a fixed order.
    pub const ALL: [ResourcePair; 6] = [
        ResourcePair::StoneWood,
        ResourcePair::StoneOre,
        ResourcePair::StoneBrick,
        ResourcePair::WoodOre,
        ResourcePair::WoodBrick,
        ResourcePair::OreBrick,
    ];

    /// Map two base-resource indices (0-3, either order) to a pair.
    ///
    /// Equal or out-of-range indices have no pair.
    #[must_use]
    pub fn from_indices(a: usize, b: usize) -> Option<Self> {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        match (lo, hi) {
            (0, 1) => Some(ResourcePair::StoneWood),
            (0, 2) => Some(ResourcePair::StoneOre),
            (0, 3) => Some(ResourcePair::StoneBrick),
            (1, 2) => Some(ResourcePair::WoodOre),
            (1, 3) => Some(ResourcePair::WoodBrick),
            (2, 3) => Some(ResourcePair::OreBrick),
            _ => None,
        }
    }

    /// The two base kinds this pair can produce.
    #[must_use]
    pub const fn options(self) -> [ResourceKind; 2] {
        match self {
            ResourcePair::StoneWood => [ResourceKind::Stone, ResourceKind::Wood],
            ResourcePair::StoneOre => [ResourceKind::Stone, ResourceKind::Ore],
            ResourcePair::StoneBrick => [ResourceKind::Stone, ResourceKind::Brick],
            ResourcePair::WoodOre => [ResourceKind::Wood, ResourceKind::Ore],
            ResourcePair::WoodBrick => [ResourceKind::Wood, ResourceKind::Brick],
            ResourcePair::OreBrick => [ResourceKind::Ore, ResourceKind::Brick],
        }
    }
}
