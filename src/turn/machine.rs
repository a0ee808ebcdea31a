//! End-of-turn handling: the age state machine.
//!
//! Runs after every applied round action. Nothing happens until every seat
//! has acted. Then the turn flags reset, due pending effects fire, and the
//! round either pauses for a discard-pile decision, passes hands on, or
//! closes the age:
//!
//! ```text
//! acting hand >= 2          rotate (clockwise unless age II)
//! acting hand <= 1          END_OF_ROUND effects, leftovers to discard,
//!                           next age dealt, or END_OF_GAME and FINISHED
//! ```
//!
//! Before an age closes, a player holding a `PLAY_LAST_CARDS` ability with a
//! card still in hand gets one more turn. Every other seat counts as having
//! played, so the age closes once that card is played.

use im::Vector;
use tracing::{debug, info, instrument};

use crate::cards::{CardId, Catalog};
use crate::core::{passes_clockwise, unix_now, Age, EngineConfig, Game, GameRng, GameStatus, Seat};
use crate::draft::{distribute_cards, rotate_hands};
use crate::effects::{EffectId, EffectResolver, EffectTiming};
use crate::error::{EngineError, Result};

/// What the end-of-turn handler did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Some seats have not acted yet.
    MidRound,
    /// Hands were passed on.
    Rotated { clockwise: bool },
    /// The previous age closed and this one was dealt.
    AgeAdvanced(Age),
    /// The last age closed; the game is finished.
    AgesComplete,
    /// A player must pick a card from the discard pile first.
    AwaitingDecision,
    /// Only this seat may act: it plays its last card before the age closes.
    LastCardTurn(Seat),
}

/// Drives round and age progression for one game.
pub struct TurnManager<'a> {
    catalog: &'a Catalog,
    config: &'a EngineConfig,
}

impl<'a> TurnManager<'a> {
    /// Create a turn manager.
    #[must_use]
    pub fn new(catalog: &'a Catalog, config: &'a EngineConfig) -> Self {
        Self { catalog, config }
    }

    /// Handle the end of `seat`'s turn.
    #[instrument(skip_all, fields(game = %game.id, seat = %seat))]
    pub fn handle_end_of_turn(&self, game: &mut Game, seat: Seat, rng: &mut GameRng) -> Result<TurnOutcome> {
        let remaining = self.hand_size(game, seat)?;
        debug!(remaining, age = ?game.current_age, "end of turn check");

        if !game.all_played() {
            return Ok(TurnOutcome::MidRound);
        }
        info!(age = ?game.current_age, "all players completed turn");

        for player in game.players.values_mut() {
            player.has_played_this_turn = false;
        }
        self.fire(game, &[EffectTiming::Immediate, EffectTiming::EndOfTurn]);

        if let Some((waiting, effect)) = self.pending_decision(game) {
            game.suspended_turn = Some(seat);
            info!(%waiting, %effect, "round paused for a discard decision");
            return Ok(TurnOutcome::AwaitingDecision);
        }

        self.progress(game, remaining, rng)
    }

    /// Continue a round paused by `handle_end_of_turn`.
    ///
    /// Stays paused while any player still holds a decision effect.
    #[instrument(skip_all, fields(game = %game.id))]
    pub fn resume(&self, game: &mut Game, rng: &mut GameRng) -> Result<TurnOutcome> {
        let Some(seat) = game.suspended_turn else {
            return Err(EngineError::invalid("no round is waiting on a decision"));
        };
        if self.pending_decision(game).is_some() {
            return Ok(TurnOutcome::AwaitingDecision);
        }

        game.suspended_turn = None;
        let remaining = self.hand_size(game, seat)?;
        info!(%seat, remaining, "round resumed");
        self.progress(game, remaining, rng)
    }

    /// First seat holding a pending effect that needs a discard-pile pick.
    #[must_use]
    pub fn pending_decision(&self, game: &Game) -> Option<(Seat, EffectId)> {
        game.players.iter().find_map(|(seat, player)| {
            player
                .pending_effects
                .iter()
                .find(|id| {
                    self.catalog
                        .effects
                        .get(id)
                        .is_some_and(EffectResolver::requires_decision)
                })
                .map(|id| (seat, id.clone()))
        })
    }

    /// First seat with a last-card ability and a card left to play.
    #[must_use]
    pub fn last_card_holder(&self, game: &Game) -> Option<Seat> {
        game.players.iter().find_map(|(seat, player)| {
            let holds = player.pending_effects.iter().any(|id| {
                self.catalog
                    .effects
                    .get(id)
                    .is_some_and(EffectResolver::plays_last_card)
            });
            (holds && !player.hand.is_empty()).then_some(seat)
        })
    }

    fn hand_size(&self, game: &Game, seat: Seat) -> Result<usize> {
        game.player(seat)
            .map(|p| p.hand.len())
            .ok_or(EngineError::PlayerNotFound { game: game.id, seat })
    }

    fn progress(&self, game: &mut Game, remaining: usize, rng: &mut GameRng) -> Result<TurnOutcome> {
        if remaining <= 1 {
            if let Some(holder) = self.last_card_holder(game) {
                for (seat, player) in game.players.iter_mut() {
                    player.has_played_this_turn = seat != holder;
                }
                info!(%holder, age = ?game.current_age, "last card turn opened");
                return Ok(TurnOutcome::LastCardTurn(holder));
            }
            return self.close_age(game, rng);
        }

        let clockwise = passes_clockwise(game.current_age);
        rotate_hands(&mut game.players, clockwise);
        info!(clockwise, age = ?game.current_age, "rotating hands");
        Ok(TurnOutcome::Rotated { clockwise })
    }

    fn close_age(&self, game: &mut Game, rng: &mut GameRng) -> Result<TurnOutcome> {
        let Some(age) = game.current_age else {
            return Err(EngineError::invalid("no age in progress"));
        };

        self.fire(game, &[EffectTiming::EndOfRound]);

        let leftovers: Vec<Vector<CardId>> = game
            .players
            .values_mut()
            .map(|p| p.replace_hand(Vector::new()))
            .collect();
        for card in leftovers.into_iter().flatten() {
            game.push_discard(card);
        }

        game.current_age = age.next();
        match game.current_age {
            Some(next) => {
                info!(from = %age, to = %next, "age advanced");
                game.status = GameStatus::for_age(next);
                distribute_cards(game, &self.catalog.cards, self.config, rng)?;
                Ok(TurnOutcome::AgeAdvanced(next))
            }
            None => {
                self.fire(game, &[EffectTiming::EndOfGame]);
                game.status = GameStatus::Finished;
                game.timestamps.finished = Some(unix_now());
                info!(discard = game.discard_pile().len(), "game complete, all ages finished");
                Ok(TurnOutcome::AgesComplete)
            }
        }
    }

    fn fire(&self, game: &mut Game, timings: &[EffectTiming]) {
        let fired = EffectResolver::fire_pending(
            &mut game.players,
            timings,
            &self.catalog.effects,
            &self.catalog.cards,
        );
        if fired > 0 {
            debug!(fired, ?timings, "pending effects applied");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardColor, CardDefinition};
    use crate::core::{GameId, PlayerRing, PlayerState, UserId};
    use crate::effects::EffectDefinition;

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        for age in Age::ALL {
            for k in 0..12u32 {
                let id = CardId::new(age.index() as u32 * 100 + k);
                catalog.cards.register(CardDefinition::new(id, "Card", CardColor::Blue, age));
            }
        }
        catalog
            .effects
            .register(EffectDefinition::new("TURN_COIN", EffectTiming::EndOfTurn, "COINS:1"));
        catalog
            .effects
            .register(EffectDefinition::new("ROUND_VP", EffectTiming::EndOfRound, "VP:2"));
        catalog
            .effects
            .register(EffectDefinition::new("GAME_VP", EffectTiming::EndOfGame, "VP:5"));
        catalog
            .effects
            .register(EffectDefinition::new("PICK", EffectTiming::Deferred, "BUILD_FROM_DISCARD"));
        catalog
            .effects
            .register(EffectDefinition::new("LAST", EffectTiming::Deferred, "PLAY_LAST_CARDS"));
        catalog
    }

    fn game(catalog: &Catalog, age: Age, hand: usize) -> Game {
        let config = EngineConfig::default();
        let mut game = Game::new(GameId::new(9), 1);
        game.players = PlayerRing::new(3, |s| {
            let mut p = PlayerState::new(UserId::new(s.index() as u64), s, &config);
            p.hand = (0..hand as u32)
                .map(|k| CardId::new(age.index() as u32 * 100 + s.index() as u32 * 4 + k))
                .collect();
            p
        });
        for a in Age::ALL {
            game.set_deck(a, catalog.cards.age_pool(a).into_iter().collect());
        }
        game.current_age = Some(age);
        game.status = GameStatus::for_age(age);
        game
    }

    fn everyone_played(game: &mut Game) {
        for p in game.players.values_mut() {
            p.has_played_this_turn = true;
        }
    }

    #[test]
    fn test_mid_round_does_nothing() {
        let catalog = catalog();
        let config = EngineConfig::default();
        let mut g = game(&catalog, Age::I, 3);
        g.players[Seat::new(0)].has_played_this_turn = true;
        let before = g.clone();

        let outcome = TurnManager::new(&catalog, &config)
            .handle_end_of_turn(&mut g, Seat::new(0), &mut GameRng::new(0))
            .unwrap();
        assert_eq!(outcome, TurnOutcome::MidRound);
        assert_eq!(g, before);
    }

    #[test]
    fn test_rotation_direction_follows_age() {
        let catalog = catalog();
        let config = EngineConfig::default();
        let manager = TurnManager::new(&catalog, &config);

        for (age, clockwise) in [(Age::I, true), (Age::II, false), (Age::III, true)] {
            let mut g = game(&catalog, age, 3);
            everyone_played(&mut g);
            let seat0 = g.players[Seat::new(0)].hand.clone();

            let outcome = manager
                .handle_end_of_turn(&mut g, Seat::new(0), &mut GameRng::new(0))
                .unwrap();
            assert_eq!(outcome, TurnOutcome::Rotated { clockwise });
            assert_eq!(g.current_age, Some(age));
            let receiver = if clockwise { Seat::new(1) } else { Seat::new(2) };
            assert_eq!(g.players[receiver].hand, seat0);
            assert!(g.players.values().all(|p| !p.has_played_this_turn));
        }
    }

    #[test]
    fn test_last_card_closes_age() {
        let catalog = catalog();
        let config = EngineConfig::default();
        let mut g = game(&catalog, Age::I, 1);
        everyone_played(&mut g);
        g.players[Seat::new(1)].push_pending(EffectId::from("ROUND_VP"));

        let outcome = TurnManager::new(&catalog, &config)
            .handle_end_of_turn(&mut g, Seat::new(0), &mut GameRng::new(3))
            .unwrap();
        assert_eq!(outcome, TurnOutcome::AgeAdvanced(Age::II));
        assert_eq!(g.discard_pile().len(), 3);
        assert_eq!(g.status, GameStatus::AgeII);
        assert_eq!(g.players[Seat::new(1)].victory_points, 2);
        assert!(g.players.values().all(|p| p.hand.len() == 4));
    }

    #[test]
    fn test_final_age_finishes_game() {
        let catalog = catalog();
        let config = EngineConfig::default();
        let mut g = game(&catalog, Age::III, 1);
        everyone_played(&mut g);
        g.players[Seat::new(2)].push_pending(EffectId::from("GAME_VP"));

        let outcome = TurnManager::new(&catalog, &config)
            .handle_end_of_turn(&mut g, Seat::new(2), &mut GameRng::new(3))
            .unwrap();
        assert_eq!(outcome, TurnOutcome::AgesComplete);
        assert_eq!(g.current_age, None);
        assert_eq!(g.status, GameStatus::Finished);
        assert!(g.timestamps.finished.is_some());
        assert_eq!(g.players[Seat::new(2)].victory_points, 5);
        assert!(g.players.values().all(|p| p.hand.is_empty()));
        assert_eq!(g.winner, None);
    }

    #[test]
    fn test_end_of_turn_effects_fire_once() {
        let catalog = catalog();
        let config = EngineConfig::default();
        let mut g = game(&catalog, Age::I, 3);
        everyone_played(&mut g);
        g.players[Seat::new(0)].push_pending(EffectId::from("TURN_COIN"));

        TurnManager::new(&catalog, &config)
            .handle_end_of_turn(&mut g, Seat::new(0), &mut GameRng::new(0))
            .unwrap();
        assert_eq!(g.players[Seat::new(0)].coins, 4);
        assert!(g.players[Seat::new(0)].pending_effects.is_empty());
    }

    #[test]
    fn test_decision_pauses_and_resumes() {
        let catalog = catalog();
        let config = EngineConfig::default();
        let manager = TurnManager::new(&catalog, &config);
        let mut g = game(&catalog, Age::I, 2);
        everyone_played(&mut g);
        g.players[Seat::new(1)].push_pending(EffectId::from("PICK"));

        let outcome = manager
            .handle_end_of_turn(&mut g, Seat::new(2), &mut GameRng::new(0))
            .unwrap();
        assert_eq!(outcome, TurnOutcome::AwaitingDecision);
        assert_eq!(g.suspended_turn, Some(Seat::new(2)));
        assert_eq!(
            manager.pending_decision(&g),
            Some((Seat::new(1), EffectId::from("PICK")))
        );

        assert_eq!(
            manager.resume(&mut g, &mut GameRng::new(0)).unwrap(),
            TurnOutcome::AwaitingDecision
        );

        g.players[Seat::new(1)].remove_pending(&EffectId::from("PICK"));
        let outcome = manager.resume(&mut g, &mut GameRng::new(0)).unwrap();
        assert_eq!(outcome, TurnOutcome::Rotated { clockwise: true });
        assert!(!g.awaiting_decision());
    }

    #[test]
    fn test_last_card_ability_delays_age_close() {
        let catalog = catalog();
        let config = EngineConfig::default();
        let manager = TurnManager::new(&catalog, &config);
        let mut g = game(&catalog, Age::I, 1);
        everyone_played(&mut g);
        g.players[Seat::new(1)].push_pending(EffectId::from("LAST"));

        let outcome = manager
            .handle_end_of_turn(&mut g, Seat::new(0), &mut GameRng::new(0))
            .unwrap();
        assert_eq!(outcome, TurnOutcome::LastCardTurn(Seat::new(1)));
        assert_eq!(g.current_age, Some(Age::I));
        assert!(g.discard_pile().is_empty());
        assert!(!g.players[Seat::new(1)].has_played_this_turn);
        assert!(g.players[Seat::new(0)].has_played_this_turn);
        assert!(g.players[Seat::new(2)].has_played_this_turn);

        let last = g.players[Seat::new(1)].hand[0];
        assert!(g.players[Seat::new(1)].take_from_hand(last));
        g.players[Seat::new(1)].has_played_this_turn = true;

        let outcome = manager
            .handle_end_of_turn(&mut g, Seat::new(1), &mut GameRng::new(0))
            .unwrap();
        assert_eq!(outcome, TurnOutcome::AgeAdvanced(Age::II));
        assert_eq!(g.discard_pile().len(), 2);
        assert!(g.players[Seat::new(1)].has_pending(&EffectId::from("LAST")));
        assert_eq!(manager.last_card_holder(&g), Some(Seat::new(1)));
    }

    #[test]
    fn test_resume_without_pause_is_invalid() {
        let catalog = catalog();
        let config = EngineConfig::default();
        let mut g = game(&catalog, Age::I, 2);
        let err = TurnManager::new(&catalog, &config)
            .resume(&mut g, &mut GameRng::new(0))
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidState(_)));
    }

    #[test]
    fn test_unknown_seat() {
        let catalog = catalog();
        let config = EngineConfig::default();
        let mut g = game(&catalog, Age::I, 2);
        let err = TurnManager::new(&catalog, &config)
            .handle_end_of_turn(&mut g, Seat::new(7), &mut GameRng::new(0))
            .unwrap_err();
        assert!(matches!(err, EngineError::PlayerNotFound { .. }));
    }
}
