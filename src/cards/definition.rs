//! Card definitions: static card data.
//!
//! A `CardDefinition` never changes during play. Where a card currently sits
//! (a hand, a tableau, under a wonder, the discard pile) is tracked by the
//! game state, which only stores `CardId`s.

use serde::{Deserialize, Serialize};

use crate::core::Age;
use crate::effects::EffectId;
use crate::resources::{Cost, ResourceKind};

/// Unique identifier for a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Card category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardColor {
    /// Raw materials.
    Brown,
    /// Manufactured goods.
    Grey,
    /// Civilian buildings.
    Blue,
    /// Commercial buildings.
    Yellow,
    /// Military buildings.
    Red,
    /// Scientific buildings.
    Green,
    /// Guilds. Only dealt in age III.
    Violet,
}

/// Static card definition.
///
/// ```
/// use wonders_engine::cards::{CardColor, CardDefinition, CardId};
/// use wonders_engine::core::Age;
/// use wonders_engine::resources::ResourceKind;
///
/// let baths = CardDefinition::new(CardId::new(7), "Baths", CardColor::Blue, Age::I)
///     .with_resource_cost([(ResourceKind::Stone, 1)])
///     .with_min_players(3);
///
/// assert_eq!(baths.min_player_count, 3);
/// assert!(!baths.cost.is_free());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub id: CardId,
    pub name: String,
    pub color: CardColor,
    pub age: Age,
    /// Either a resource cost or a coin cost, never both.
    pub cost: Cost,
    /// Card is left out of decks at tables smaller than this.
    pub min_player_count: usize,
    /// Effect fired when the card is played.
    pub effect: Option<EffectId>,
}

impl CardDefinition {
    /// Create a free card playable at any table size.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, color: CardColor, age: Age) -> Self {
        Self {
            id,
            name: name.into(),
            color,
            age,
            cost: Cost::free(),
            min_player_count: 0,
            effect: None,
        }
    }

    /// Set a resource cost.
    #[must_use]
    pub fn with_resource_cost(mut self, cost: impl IntoIterator<Item = (ResourceKind, i32)>) -> Self {
        self.cost = Cost::resources(cost);
        self
    }

    /// Set a coin cost. Replaces any resource cost.
    #[must_use]
    pub fn with_coin_cost(mut self, coins: i32) -> Self {
        self.cost = Cost::coins(coins);
        self
    }

    /// Set the minimum table size.
    #[must_use]
    pub fn with_min_players(mut self, count: usize) -> Self {
        self.min_player_count = count;
        self
    }

    /// Attach an effect.
    #[must_use]
    pub fn with_effect(mut self, effect: impl Into<EffectId>) -> Self {
        self.effect = Some(effect.into());
        self
    }

    /// Check if this card is dealt at a table of `player_count`.
    #[must_use]
    pub fn in_deck_for(&self, player_count: usize) -> bool {
        self.min_player_count <= player_count
    }
}
