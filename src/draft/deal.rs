//! Dealing an age's hands.
//!
//! The pool is the current age's deck minus cards whose minimum table size
//! exceeds the seated player count. In age III the guilds are shuffled
//! separately and only `player_count + extra_guilds` of them are kept. The
//! combined pool is shuffled and cut into equal hands, one per seat in
//! position order. Cards that do not divide evenly are left out of the deal
//! and reported back.

use im::Vector;
use tracing::{info, warn};

use crate::cards::{CardColor, CardId, CardRegistry};
use crate::core::{Age, EngineConfig, Game, GameRng};
use crate::error::{EngineError, Result};

/// Outcome of a deal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DealReport {
    /// Cards per hand.
    pub hand_size: usize,
    /// Pool cards not dealt to anyone.
    pub remainder: Vec<CardId>,
}

/// The filtered, shuffled pool for the game's current age.
pub fn age_pool(
    game: &Game,
    cards: &CardRegistry,
    config: &EngineConfig,
    rng: &mut GameRng,
) -> Result<Vec<CardId>> {
    let age = game
        .current_age
        .ok_or_else(|| EngineError::invalid("cannot deal outside an age"))?;
    let player_count = game.player_count();

    let mut pool = Vec::new();
    let mut guilds = Vec::new();
    for &card in game.deck(age) {
        let Some(definition) = cards.get(card) else {
            warn!(%card, "deck card is not registered");
            continue;
        };
        if !definition.in_deck_for(player_count) {
            continue;
        }
        if age == Age::III && definition.color == CardColor::Violet {
            guilds.push(card);
        } else {
            pool.push(card);
        }
    }

    if age == Age::III {
        rng.shuffle(&mut guilds);
        guilds.truncate(player_count + config.extra_guilds);
        pool.extend(guilds);
    }

    rng.shuffle(&mut pool);
    Ok(pool)
}

/// Deal the current age's hands to every seat, replacing existing hands.
pub fn distribute_cards(
    game: &mut Game,
    cards: &CardRegistry,
    config: &EngineConfig,
    rng: &mut GameRng,
) -> Result<DealReport> {
    let player_count = game.player_count();
    if player_count == 0 {
        return Err(EngineError::invalid("cannot deal with no seated players"));
    }

    let pool = age_pool(game, cards, config, rng)?;
    let hand_size = pool.len() / player_count;

    let mut chunks = pool.chunks_exact(hand_size.max(1));
    for player in game.players.values_mut() {
        let hand: Vector<CardId> = match (hand_size, chunks.next()) {
            (0, _) | (_, None) => Vector::new(),
            (_, Some(chunk)) => chunk.iter().copied().collect(),
        };
        player.replace_hand(hand);
    }
    let remainder = pool[hand_size * player_count..].to_vec();

    info!(
        game = %game.id,
        age = ?game.current_age,
        players = player_count,
        hand_size,
        dropped = remainder.len(),
        "cards distributed"
    );
    Ok(DealReport {
        hand_size,
        remainder,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardDefinition;
    use crate::core::{GameId, PlayerRing, PlayerState, UserId};

    fn seated(n: usize) -> Game {
        let config = EngineConfig::default();
        let mut game = Game::new(GameId::new(1), 0);
        game.players = PlayerRing::new(n, |s| PlayerState::new(UserId::new(s.index() as u64), s, &config));
        game
    }

    #[test]
    fn test_min_player_filter() {
        let mut cards = CardRegistry::new();
        for id in 0..9 {
            let min = if id < 6 { 3 } else { 4 };
            cards.register(
                CardDefinition::new(CardId::new(id), "C", CardColor::Blue, Age::I).with_min_players(min),
            );
        }
        let mut game = seated(3);
        game.current_age = Some(Age::I);
        game.set_deck(Age::I, cards.age_pool(Age::I).into_iter().collect());

        let report =
            distribute_cards(&mut game, &cards, &EngineConfig::default(), &mut GameRng::new(1)).unwrap();
        assert_eq!(report.hand_size, 2);
        assert!(report.remainder.is_empty());
        for player in game.players.values() {
            assert!(player.hand.iter().all(|c| c.raw() < 6));
        }
    }

    #[test]
    fn test_age_three_keeps_limited_guilds() {
        let mut cards = CardRegistry::new();
        for id in 0..12 {
            cards.register(CardDefinition::new(CardId::new(id), "Temple", CardColor::Blue, Age::III));
        }
        for id in 100..110 {
            cards.register(CardDefinition::new(CardId::new(id), "Guild", CardColor::Violet, Age::III));
        }
        let mut game = seated(3);
        game.current_age = Some(Age::III);
        game.set_deck(Age::III, cards.age_pool(Age::III).into_iter().collect());

        let report =
            distribute_cards(&mut game, &cards, &EngineConfig::default(), &mut GameRng::new(5)).unwrap();
        assert_eq!(report.hand_size, (12 + 5) / 3);

        let dealt_guilds = game
            .players
            .values()
            .flat_map(|p| p.hand.iter().copied())
            .chain(report.remainder.iter().copied())
            .filter(|c| c.raw() >= 100)
            .count();
        assert_eq!(dealt_guilds, 5);
    }

    #[test]
    fn test_deal_requires_age_and_players() {
        let cards = CardRegistry::new();
        let config = EngineConfig::default();
        let mut rng = GameRng::new(0);

        let mut empty = Game::new(GameId::new(1), 0);
        empty.current_age = Some(Age::I);
        assert!(distribute_cards(&mut empty, &cards, &config, &mut rng).is_err());

        let mut before_start = seated(3);
        assert!(distribute_cards(&mut before_start, &cards, &config, &mut rng).is_err());
    }

    #[test]
    fn test_small_pool_deals_empty_hands() {
        let mut cards = CardRegistry::new();
        cards.register(CardDefinition::new(CardId::new(1), "Lone", CardColor::Red, Age::II));
        let mut game = seated(3);
        game.current_age = Some(Age::II);
        game.set_deck(Age::II, cards.age_pool(Age::II).into_iter().collect());

        let report =
            distribute_cards(&mut game, &cards, &EngineConfig::default(), &mut GameRng::new(2)).unwrap();
        assert_eq!(report.hand_size, 0);
        assert_eq!(report.remainder, vec![CardId::new(1)]);
        assert!(game.players.values().all(|p| p.hand.is_empty()));
    }
}
