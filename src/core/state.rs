//! Game aggregate: the game record and its per-seat player states.
//!
//! ## Game
//!
//! Owns everything that changes during a session: status, current age, the
//! seat ring, the per-age decks, the discard pile, the action history and
//! the shuffling stream position.
//!
//! ## PlayerState
//!
//! One per seat. Neighbours are not stored; they are derived from the seat
//! position through `PlayerRing::neighbors`.
//!
//! Card lists (`hand`, `played_cards`, `wonder_cards`, `discard`, decks) are
//! `im` persistent vectors so a unit of work can clone a whole game in O(1).
//! They are mutated only through the methods here, which keep every card in
//! at most one list of each kind.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::time::{SystemTime, UNIX_EPOCH};

use super::action::ActionRecord;
use super::age::Age;
use super::config::EngineConfig;
use super::ids::{GameId, UserId};
use super::player::{PlayerRing, Seat};
use super::rng::{GameRng, RngCursor};
use crate::cards::{CardId, WonderId};
use crate::effects::EffectId;
use crate::resources::{PairCounts, ResourceClass, ResourceCounts, ScienceCounts};

/// Lifecycle status of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Accepting players.
    Waiting,
    /// Seats and boards being assigned.
    Starting,
    AgeI,
    AgeII,
    AgeIII,
    /// All ages complete.
    Finished,
    Cancelled,
}

impl GameStatus {
    /// Status while `age` is being played.
    #[must_use]
    pub const fn for_age(age: Age) -> Self {
        match age {
            Age::I => GameStatus::AgeI,
            Age::II => GameStatus::AgeII,
            Age::III => GameStatus::AgeIII,
        }
    }

    /// Check if actions are currently accepted.
    #[must_use]
    pub const fn is_in_age(self) -> bool {
        matches!(self, GameStatus::AgeI | GameStatus::AgeII | GameStatus::AgeIII)
    }

    /// Check if the game can no longer change.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Finished | GameStatus::Cancelled)
    }
}

/// A neighbour direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Both sides, left first.
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];
}

/// Coins paid per unit bought from a neighbour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradePrices {
    pub left_base: i32,
    pub right_base: i32,
    pub left_advanced: i32,
    pub right_advanced: i32,
}

impl TradePrices {
    /// Same base and advanced price on both sides.
    #[must_use]
    pub const fn uniform(base: i32, advanced: i32) -> Self {
        Self {
            left_base: base,
            right_base: base,
            left_advanced: advanced,
            right_advanced: advanced,
        }
    }

    /// Price of one unit of `class` bought from `side`.
    ///
    /// Wildcards are never traded; they price like base units.
    #[must_use]
    pub const fn price(&self, side: Side, class: ResourceClass) -> i32 {
        match (side, class) {
            (Side::Left, ResourceClass::Advanced) => self.left_advanced,
            (Side::Right, ResourceClass::Advanced) => self.right_advanced,
            (Side::Left, _) => self.left_base,
            (Side::Right, _) => self.right_base,
        }
    }
}

/// One seated player's mutable state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub user: UserId,
    pub seat: Seat,
    pub coins: i32,
    pub military_points: i32,
    pub victory_points: i32,
    pub wonder: Option<WonderId>,
    /// Stages built so far (0 = bare board).
    pub wonder_stage: usize,
    pub resources: ResourceCounts,
    /// Either-or production, kept apart from the nine classified kinds.
    pub pairs: PairCounts,
    pub science: ScienceCounts,
    pub hand: Vector<CardId>,
    pub played_cards: Vector<CardId>,
    /// Cards spent on wonder stages, in build order.
    pub wonder_cards: Vector<CardId>,
    pub has_played_this_turn: bool,
    pub prices: TradePrices,
    /// Effects queued for a later decision point.
    pub pending_effects: SmallVec<[EffectId; 4]>,
}

impl PlayerState {
    /// Create a fresh player at a seat.
    #[must_use]
    pub fn new(user: UserId, seat: Seat, config: &EngineConfig) -> Self {
        Self {
            user,
            seat,
            coins: config.starting_coins,
            military_points: 0,
            victory_points: 0,
            wonder: None,
            wonder_stage: 0,
            resources: ResourceCounts::new(),
            pairs: PairCounts::new(),
            science: ScienceCounts::new(),
            hand: Vector::new(),
            played_cards: Vector::new(),
            wonder_cards: Vector::new(),
            has_played_this_turn: false,
            prices: TradePrices::uniform(config.base_trade_price, config.advanced_trade_price),
            pending_effects: SmallVec::new(),
        }
    }

    /// Check if a card is in hand.
    #[must_use]
    pub fn holds(&self, card: CardId) -> bool {
        self.hand.contains(&card)
    }

    /// Remove a card from hand.
    ///
    /// Returns true if the card was found and removed.
    pub fn take_from_hand(&mut self, card: CardId) -> bool {
        match self.hand.index_of(&card) {
            Some(pos) => {
                self.hand.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Replace the whole hand, returning the previous one.
    pub fn replace_hand(&mut self, hand: Vector<CardId>) -> Vector<CardId> {
        std::mem::replace(&mut self.hand, hand)
    }

    /// Add a card to the tableau. Returns false if already there.
    pub fn add_played(&mut self, card: CardId) -> bool {
        if self.played_cards.contains(&card) {
            return false;
        }
        self.played_cards.push_back(card);
        true
    }

    /// Record a card spent on a wonder stage.
    pub fn add_wonder_card(&mut self, card: CardId) {
        self.wonder_cards.push_back(card);
    }

    /// Queue an effect for later.
    pub fn push_pending(&mut self, effect: EffectId) {
        self.pending_effects.push(effect);
    }

    /// Remove the first pending effect with this ID.
    ///
    /// Returns true if one was found and removed.
    pub fn remove_pending(&mut self, effect: &EffectId) -> bool {
        match self.pending_effects.iter().position(|e| e == effect) {
            Some(pos) => {
                self.pending_effects.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Check if an effect is queued.
    #[must_use]
    pub fn has_pending(&self, effect: &EffectId) -> bool {
        self.pending_effects.contains(effect)
    }
}

/// Unix-second timestamps of lifecycle transitions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamps {
    pub created: u64,
    pub started: Option<u64>,
    pub finished: Option<u64>,
}

/// Seconds since the Unix epoch (0 if the clock is before it).
#[must_use]
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// A game session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub status: GameStatus,
    /// `None` before start and after the last age.
    pub current_age: Option<Age>,
    /// Users in join order. Seats are assigned in this order at start.
    pub users: Vec<UserId>,
    pub players: PlayerRing<PlayerState>,
    decks: [Vector<CardId>; 3],
    discard: Vector<CardId>,
    pub timestamps: Timestamps,
    /// Never set by the engine; scoring lives outside it.
    pub winner: Option<UserId>,
    /// Seat whose end-of-turn handling is paused for a discard decision.
    pub suspended_turn: Option<Seat>,
    history: Vector<ActionRecord>,
    rng: RngCursor,
}

impl Game {
    /// Create a waiting game whose shuffles derive from `seed`.
    #[must_use]
    pub fn new(id: GameId, seed: u64) -> Self {
        Self {
            id,
            status: GameStatus::Waiting,
            current_age: None,
            users: Vec::new(),
            players: PlayerRing::default(),
            decks: Default::default(),
            discard: Vector::new(),
            timestamps: Timestamps {
                created: unix_now(),
                ..Timestamps::default()
            },
            winner: None,
            suspended_turn: None,
            history: Vector::new(),
            rng: RngCursor::start(seed),
        }
    }

    /// Number of seated players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Get a seated player.
    #[must_use]
    pub fn player(&self, seat: Seat) -> Option<&PlayerState> {
        self.players.get(seat)
    }

    /// Get a seated player mutably.
    pub fn player_mut(&mut self, seat: Seat) -> Option<&mut PlayerState> {
        self.players.get_mut(seat)
    }

    /// Seat held by a user, if seated.
    #[must_use]
    pub fn seat_of(&self, user: UserId) -> Option<Seat> {
        self.players
            .iter()
            .find(|(_, p)| p.user == user)
            .map(|(seat, _)| seat)
    }

    /// Check if every seated player has acted this round.
    #[must_use]
    pub fn all_played(&self) -> bool {
        !self.players.is_empty() && self.players.values().all(|p| p.has_played_this_turn)
    }

    /// Check if the round is paused for a player decision.
    #[must_use]
    pub fn awaiting_decision(&self) -> bool {
        self.suspended_turn.is_some()
    }

    // === Decks ===

    /// The card pool loaded for an age.
    #[must_use]
    pub fn deck(&self, age: Age) -> &Vector<CardId> {
        &self.decks[age.index()]
    }

    /// Load an age's card pool.
    pub fn set_deck(&mut self, age: Age, cards: Vector<CardId>) {
        self.decks[age.index()] = cards;
    }

    // === Discard pile ===

    /// The shared discard pile, oldest first.
    #[must_use]
    pub fn discard_pile(&self) -> &Vector<CardId> {
        &self.discard
    }

    /// Add a card to the discard pile. Returns false if already there.
    pub fn push_discard(&mut self, card: CardId) -> bool {
        if self.discard.contains(&card) {
            return false;
        }
        self.discard.push_back(card);
        true
    }

    /// Remove a card from the discard pile.
    ///
    /// Returns true if the card was found and removed.
    pub fn take_from_discard(&mut self, card: CardId) -> bool {
        match self.discard.index_of(&card) {
            Some(pos) => {
                self.discard.remove(pos);
                true
            }
            None => false,
        }
    }

    // === History ===

    /// Record an action in history.
    pub fn record(&mut self, record: ActionRecord) {
        self.history.push_back(record);
    }

    /// Actions submitted so far, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    // === Randomness ===

    /// Resume this game's shuffling stream.
    #[must_use]
    pub fn rng(&self) -> GameRng {
        GameRng::resume(&self.rng)
    }

    /// Save the stream position after shuffling.
    pub fn store_rng(&mut self, rng: &GameRng) {
        self.rng = rng.cursor();
    }
}
