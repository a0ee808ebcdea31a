//! Reference-data registries.
//!
//! `CardRegistry` and `WonderRegistry` store the static definitions loaded
//! once per engine. `Catalog` bundles them with the effect registry so the
//! rules can resolve every id a game refers to.

use rustc_hash::FxHashMap;

use super::definition::{CardColor, CardDefinition, CardId};
use super::wonder::{Wonder, WonderFace, WonderId};
use crate::core::Age;
use crate::effects::EffectRegistry;

/// Every card printed for any age, keyed by id.
///
/// ```
/// use wonders_engine::cards::{CardColor, CardDefinition, CardId, CardRegistry};
/// use wonders_engine::core::Age;
///
/// let mut registry = CardRegistry::new();
/// registry.register(CardDefinition::new(CardId::new(1), "Lumber Yard", CardColor::Brown, Age::I));
///
/// assert_eq!(registry.get(CardId::new(1)).unwrap().name, "Lumber Yard");
/// assert_eq!(registry.by_age(Age::I).count(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, CardDefinition>,
}

impl CardRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a card. A card already stored under the same id is replaced and returned.
    pub fn register(&mut self, card: CardDefinition) -> Option<CardDefinition> {
        self.cards.insert(card.id, card)
    }

    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardDefinition> {
        self.cards.get(&id)
    }

    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Definitions in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values()
    }

    /// Cards belonging to an age.
    pub fn by_age(&self, age: Age) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values().filter(move |c| c.age == age)
    }

    /// Color of a card, if registered.
    #[must_use]
    pub fn color_of(&self, id: CardId) -> Option<CardColor> {
        self.get(id).map(|c| c.color)
    }

    /// The full pool of an age, sorted by ID so deals depend only on the rng.
    #[must_use]
    pub fn age_pool(&self, age: Age) -> Vec<CardId> {
        let mut pool: Vec<CardId> = self.by_age(age).map(|c| c.id).collect();
        pool.sort_unstable();
        pool
    }
}

/// Registry of wonder boards.
#[derive(Clone, Debug, Default)]
pub struct WonderRegistry {
    wonders: FxHashMap<WonderId, Wonder>,
}

impl WonderRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a board, returning any board it replaces.
    pub fn register(&mut self, wonder: Wonder) -> Option<Wonder> {
        self.wonders.insert(wonder.id, wonder)
    }

    /// Get a board by ID.
    #[must_use]
    pub fn get(&self, id: WonderId) -> Option<&Wonder> {
        self.wonders.get(&id)
    }

    /// Get the number of registered boards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.wonders.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.wonders.is_empty()
    }

    /// Distinct wonder names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.wonders.values().map(|w| w.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    /// Find a board by name and face.
    #[must_use]
    pub fn find(&self, name: &str, face: WonderFace) -> Option<&Wonder> {
        self.wonders
            .values()
            .find(|w| w.name == name && w.face == face)
    }
}

/// All static reference data a game needs.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    pub cards: CardRegistry,
    pub wonders: WonderRegistry,
    pub effects: EffectRegistry,
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
