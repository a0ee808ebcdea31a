//! Kind-to-count mappings and costs.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::hash::Hash;

use super::kind::{ResourceKind, ResourcePair, ScienceKind};

/// Counts per kind. Missing kinds read as zero.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally<K: Eq + Hash> {
    counts: FxHashMap<K, i32>,
}

/// Resource production or requirement per kind.
pub type ResourceCounts = Tally<ResourceKind>;

/// Science symbols per kind.
pub type ScienceCounts = Tally<ScienceKind>;

/// Mutable-pair production per pair.
pub type PairCounts = Tally<ResourcePair>;

impl<K: Copy + Eq + Hash> Default for Tally<K> {
    fn default() -> Self {
        Self {
            counts: FxHashMap::default(),
        }
    }
}

impl<K: Copy + Eq + Hash> Tally<K> {
    /// Create an empty tally.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set a count.
    #[must_use]
    pub fn with(mut self, kind: K, count: i32) -> Self {
        self.set(kind, count);
        self
    }

    /// Count for a kind (zero if absent).
    #[must_use]
    pub fn get(&self, kind: K) -> i32 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Set a count. Zero removes the entry.
    pub fn set(&mut self, kind: K, count: i32) {
        if count == 0 {
            self.counts.remove(&kind);
        } else {
            self.counts.insert(kind, count);
        }
    }

    /// Add `delta` to a kind's count.
    pub fn add(&mut self, kind: K, delta: i32) {
        let current = self.get(kind);
        self.set(kind, current + delta);
    }

    /// Add every count of `other` into this tally.
    pub fn merge(&mut self, other: &Tally<K>) {
        for (kind, count) in other.iter() {
            self.add(kind, count);
        }
    }

    /// Iterate over non-zero (kind, count) entries.
    pub fn iter(&self) -> impl Iterator<Item = (K, i32)> + '_ {
        self.counts.iter().map(|(&k, &v)| (k, v))
    }

    /// Check if every count is zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    #[must_use]
    pub fn total(&self) -> i32 {
        self.counts.values().sum()
    }
}

impl<K: Copy + Eq + Hash> FromIterator<(K, i32)> for Tally<K> {
    fn from_iter<I: IntoIterator<Item = (K, i32)>>(iter: I) -> Self {
        let mut tally = Self::new();
        for (kind, count) in iter {
            tally.add(kind, count);
        }
        tally
    }
}

/// What it takes to play a card or build a wonder stage.
///
/// Resource and coin costs are mutually exclusive.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cost {
    /// Resource units per kind. Empty means free.
    Resources(ResourceCounts),
    /// A flat coin price, paid to the bank.
    Coins(i32),
}

impl Cost {
    /// A cost of nothing.
    #[must_use]
    pub fn free() -> Self {
        Cost::Resources(ResourceCounts::new())
    }

    /// A resource cost from (kind, count) pairs.
    #[must_use]
    pub fn resources(entries: impl IntoIterator<Item = (ResourceKind, i32)>) -> Self {
        Cost::Resources(entries.into_iter().collect())
    }

    /// A flat coin price.
    #[must_use]
    pub fn coins(amount: i32) -> Self {
        Cost::Coins(amount)
    }

    /// Check if nothing is owed.
    #[must_use]
    pub fn is_free(&self) -> bool {
        match self {
            Cost::Resources(counts) => counts.is_empty(),
            Cost::Coins(amount) => *amount <= 0,
        }
    }
}

impl Default for Cost {
    fn default() -> Self {
        Cost::free()
    }
}
