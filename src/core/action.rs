//! Player actions and the per-game action history.
//!
//! Each round every seated player submits exactly one of:
//! - `Play`: put a card from hand into the tableau
//! - `BuildWonder`: spend a card from hand to build the next wonder stage
//! - `Discard`: trade a card from hand for coins
//!
//! `BuildFromDiscard` is the answer to a pending decision, not a round
//! action: it plays a card out of the game's discard pile.

use serde::{Deserialize, Serialize};

use super::age::Age;
use super::player::Seat;
use crate::cards::CardId;

/// An action naming the card it uses.
///
/// ```
/// use wonders_engine::cards::CardId;
/// use wonders_engine::core::Action;
///
/// let play = Action::Play(CardId::new(12));
/// assert_eq!(play.card(), CardId::new(12));
/// assert!(play.is_round_action());
/// assert!(!Action::BuildFromDiscard(CardId::new(3)).is_round_action());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Play(CardId),
    BuildWonder(CardId),
    Discard(CardId),
    BuildFromDiscard(CardId),
}

impl Action {
    /// The card this action uses.
    #[must_use]
    pub const fn card(self) -> CardId {
        match self {
            Action::Play(card)
            | Action::BuildWonder(card)
            | Action::Discard(card)
            | Action::BuildFromDiscard(card) => card,
        }
    }

    /// Check if this is one of the three per-round actions.
    #[must_use]
    pub const fn is_round_action(self) -> bool {
        !matches!(self, Action::BuildFromDiscard(_))
    }
}

/// A recorded action with its outcome.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The seat that acted.
    pub seat: Seat,

    /// The action taken.
    pub action: Action,

    /// Age in which the action was taken.
    pub age: Option<Age>,

    /// Whether the rules accepted and applied it.
    pub applied: bool,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(seat: Seat, action: Action, age: Option<Age>, applied: bool) -> Self {
        Self {
            seat,
            action,
            age,
            applied,
        }
    }
}
