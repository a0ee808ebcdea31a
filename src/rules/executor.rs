//! Action executor: the single authority for play, build and discard.
//!
//! Validation failures (card not in hand, unaffordable, wonder complete)
//! return `false` and leave the game untouched. On success the cost is paid
//! under the configured `TradePolicy`, the card moves, and the card's or
//! stage's effect is dispatched by its timing.

use tracing::{debug, info, warn};

use super::affordability::{quote, settle};
use crate::cards::{CardDefinition, CardId, Catalog};
use crate::core::{EngineConfig, Game, Seat};
use crate::effects::{EffectId, EffectResolver};
use crate::resources::Cost;

/// Applies player actions against a catalog and configuration.
///
/// ```
/// use wonders_engine::cards::{CardColor, CardDefinition, CardId, Catalog};
/// use wonders_engine::core::{Age, EngineConfig, Game, GameId, PlayerRing, PlayerState, Seat, UserId};
/// use wonders_engine::rules::ActionExecutor;
///
/// let mut catalog = Catalog::new();
/// catalog.cards.register(
///     CardDefinition::new(CardId::new(1), "Tavern", CardColor::Yellow, Age::I).with_coin_cost(1),
/// );
/// let config = EngineConfig::default();
///
/// let mut game = Game::new(GameId::new(1), 0);
/// game.players = PlayerRing::new(3, |s| PlayerState::new(UserId::new(s.index() as u64), s, &config));
/// game.players[Seat::new(0)].hand.push_back(CardId::new(1));
///
/// let executor = ActionExecutor::new(&catalog, &config);
/// assert!(executor.play_card(&mut game, Seat::new(0), CardId::new(1)));
/// assert_eq!(game.players[Seat::new(0)].coins, 2);
/// ```
pub struct ActionExecutor<'a> {
    catalog: &'a Catalog,
    config: &'a EngineConfig,
}

impl<'a> ActionExecutor<'a> {
    /// Create an executor.
    #[must_use]
    pub fn new(catalog: &'a Catalog, config: &'a EngineConfig) -> Self {
        Self { catalog, config }
    }

    // === Play ===

    /// Check if the player at `seat` can play `card` from hand.
    #[must_use]
    pub fn can_play_card(&self, game: &Game, seat: Seat, card: CardId) -> bool {
        let Some(definition) = self.playable(game, seat, card) else {
            return false;
        };
        quote(&game.players, seat, &definition.cost, self.config.trade_policy).is_some()
    }

    /// Play `card` from hand into the tableau.
    pub fn play_card(&self, game: &mut Game, seat: Seat, card: CardId) -> bool {
        let Some(definition) = self.playable(game, seat, card) else {
            warn!(%seat, %card, "card cannot be played");
            return false;
        };
        let Some(payment) = quote(&game.players, seat, &definition.cost, self.config.trade_policy)
        else {
            warn!(%seat, %card, "cannot afford card");
            return false;
        };

        settle(&mut game.players, seat, payment);
        let player = &mut game.players[seat];
        player.take_from_hand(card);
        player.add_played(card);
        info!(%seat, card = definition.name.as_str(), ?payment, "card played");

        if let Some(effect) = &definition.effect {
            self.fire(game, seat, effect);
        }
        true
    }

    fn playable(&self, game: &Game, seat: Seat, card: CardId) -> Option<&'a CardDefinition> {
        let player = game.player(seat)?;
        if !player.holds(card) || player.played_cards.contains(&card) {
            return None;
        }
        self.catalog.cards.get(card)
    }

    // === Wonder ===

    /// Check if `card` can be spent on the next stage of the seat's wonder.
    #[must_use]
    pub fn can_build_wonder_stage(&self, game: &Game, seat: Seat, card: CardId) -> bool {
        self.stage_cost(game, seat, card)
            .and_then(|cost| quote(&game.players, seat, cost, self.config.trade_policy))
            .is_some()
    }

    /// Spend `card` to build the next wonder stage.
    pub fn build_wonder_stage(&self, game: &mut Game, seat: Seat, card: CardId) -> bool {
        let Some(cost) = self.stage_cost(game, seat, card) else {
            warn!(%seat, %card, "no wonder stage to build");
            return false;
        };
        let Some(payment) = quote(&game.players, seat, cost, self.config.trade_policy) else {
            warn!(%seat, %card, "cannot afford wonder stage");
            return false;
        };

        settle(&mut game.players, seat, payment);
        let player = &mut game.players[seat];
        let built = player.wonder_stage;
        player.take_from_hand(card);
        player.add_wonder_card(card);
        player.wonder_stage += 1;
        info!(%seat, stage = player.wonder_stage, ?payment, "wonder stage built");

        let effect = player
            .wonder
            .and_then(|id| self.catalog.wonders.get(id))
            .and_then(|wonder| wonder.stages.get(built))
            .and_then(|stage| stage.effect.clone());
        if let Some(effect) = effect {
            self.fire(game, seat, &effect);
        }
        true
    }

    fn stage_cost(&self, game: &Game, seat: Seat, card: CardId) -> Option<&'a Cost> {
        let player = game.player(seat)?;
        if !player.holds(card) {
            return None;
        }
        let wonder = self.catalog.wonders.get(player.wonder?)?;
        wonder.next_stage(player.wonder_stage).map(|stage| &stage.cost)
    }

    // === Discard ===

    /// Discard `card` from hand for the configured coin reward.
    ///
    /// Only fails if the card is not in the seat's hand.
    pub fn discard_card(&self, game: &mut Game, seat: Seat, card: CardId) -> bool {
        let Some(player) = game.players.get_mut(seat) else {
            return false;
        };
        if !player.take_from_hand(card) {
            warn!(%seat, %card, "cannot discard a card not in hand");
            return false;
        }
        player.coins += self.config.discard_reward;
        game.push_discard(card);
        info!(%seat, %card, pile = game.discard_pile().len(), "card discarded");
        true
    }

    /// Play `card` out of the discard pile for free.
    pub fn build_from_discard(&self, game: &mut Game, seat: Seat, card: CardId) -> bool {
        let Some(definition) = self.catalog.cards.get(card) else {
            return false;
        };
        let Some(player) = game.player(seat) else {
            return false;
        };
        if player.played_cards.contains(&card) || !game.discard_pile().contains(&card) {
            warn!(%seat, %card, "card cannot be built from discard");
            return false;
        }

        game.take_from_discard(card);
        game.players[seat].add_played(card);
        info!(%seat, card = definition.name.as_str(), "card built from discard");

        if let Some(effect) = &definition.effect {
            self.fire(game, seat, effect);
        }
        true
    }

    fn fire(&self, game: &mut Game, seat: Seat, effect: &EffectId) {
        match self.catalog.effects.get(effect) {
            Some(definition) => {
                if !EffectResolver::dispatch(&mut game.players, seat, definition, &self.catalog.cards) {
                    warn!(%seat, %effect, "effect was not fully applied");
                }
            }
            None => debug!(%seat, %effect, "effect is not registered"),
        }
    }
}
