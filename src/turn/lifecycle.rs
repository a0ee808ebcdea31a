//! Game lifecycle and action submission.
//!
//! ```text
//! WAITING --start--> STARTING --deal--> AGE_I --> AGE_II --> AGE_III --> FINISHED
//!    |                   |
//!    +-----cancel--------+--> CANCELLED
//! ```
//!
//! Round actions go through [`Lifecycle::submit_action`], which checks the
//! game is accepting actions, applies the action through the executor, and
//! runs the end-of-turn handler once it was applied.

use tracing::{info, warn};

use super::machine::{TurnManager, TurnOutcome};
use crate::cards::{CardId, Catalog, WonderFace};
use crate::core::{
    unix_now, Action, ActionRecord, Age, EngineConfig, Game, GameId, GameRng, GameStatus, PlayerRing,
    PlayerState, Seat, UserId,
};
use crate::draft::{distribute_cards, DealReport};
use crate::effects::{EffectId, EffectResolver};
use crate::error::{EngineError, Result};
use crate::rules::ActionExecutor;

/// Result of submitting an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Submission {
    /// Whether the rules accepted the action.
    pub applied: bool,
    /// End-of-turn outcome, present only when the action was applied.
    pub turn: Option<TurnOutcome>,
}

impl Submission {
    const REJECTED: Submission = Submission {
        applied: false,
        turn: None,
    };

    fn applied(turn: TurnOutcome) -> Self {
        Self {
            applied: true,
            turn: Some(turn),
        }
    }
}

/// Lifecycle operations over one catalog and configuration.
pub struct Lifecycle<'a> {
    catalog: &'a Catalog,
    config: &'a EngineConfig,
}

impl<'a> Lifecycle<'a> {
    /// Create a lifecycle driver.
    #[must_use]
    pub fn new(catalog: &'a Catalog, config: &'a EngineConfig) -> Self {
        Self { catalog, config }
    }

    /// A new game waiting for players.
    #[must_use]
    pub fn create_game(&self, id: GameId, seed: u64) -> Game {
        info!(game = %id, "game created");
        Game::new(id, seed)
    }

    /// Add a user to a waiting game.
    pub fn join_game(&self, game: &mut Game, user: UserId) -> Result<()> {
        if game.status != GameStatus::Waiting {
            return Err(EngineError::invalid("game has already started"));
        }
        if game.users.contains(&user) {
            return Err(EngineError::invalid(format!("{user} already joined")));
        }
        if game.users.len() >= self.config.max_players {
            return Err(EngineError::invalid("game is full"));
        }
        game.users.push(user);
        info!(game = %game.id, %user, joined = game.users.len(), "user joined");
        Ok(())
    }

    /// Remove a user from a waiting game.
    pub fn leave_game(&self, game: &mut Game, user: UserId) -> Result<()> {
        if game.status != GameStatus::Waiting {
            return Err(EngineError::invalid("game has already started"));
        }
        let Some(pos) = game.users.iter().position(|u| *u == user) else {
            return Err(EngineError::invalid(format!("{user} is not in this game")));
        };
        game.users.remove(pos);
        info!(game = %game.id, %user, "user left");
        Ok(())
    }

    /// Seat the joined users, hand out wonders and deal age I.
    pub fn start_game(&self, game: &mut Game, rng: &mut GameRng) -> Result<DealReport> {
        if game.status != GameStatus::Waiting {
            return Err(EngineError::invalid("game has already started"));
        }
        let count = game.users.len();
        if count < self.config.min_players || count > self.config.max_players {
            return Err(EngineError::invalid(format!(
                "{count} players joined, need {} to {}",
                self.config.min_players, self.config.max_players
            )));
        }

        game.status = GameStatus::Starting;
        game.timestamps.started = Some(unix_now());

        let seats = game
            .users
            .iter()
            .enumerate()
            .map(|(i, user)| PlayerState::new(*user, Seat::new(i as u8), self.config))
            .collect();
        game.players = PlayerRing::from_ordered(seats);

        self.assign_wonders(game, rng);

        for age in Age::ALL {
            game.set_deck(age, self.catalog.cards.age_pool(age).into_iter().collect());
        }
        game.current_age = Some(Age::I);
        let report = distribute_cards(game, &self.catalog.cards, self.config, rng)?;
        game.status = GameStatus::AgeI;

        info!(game = %game.id, players = count, hand_size = report.hand_size, "game started");
        Ok(report)
    }

    /// Cancel a game that has not reached an age.
    pub fn cancel_game(&self, game: &mut Game) -> Result<()> {
        if !matches!(game.status, GameStatus::Waiting | GameStatus::Starting) {
            return Err(EngineError::invalid(format!(
                "cannot cancel a game in {:?}",
                game.status
            )));
        }
        game.status = GameStatus::Cancelled;
        game.timestamps.finished = Some(unix_now());
        info!(game = %game.id, "game cancelled");
        Ok(())
    }

    /// Submit `seat`'s action for the current round.
    pub fn submit_action(
        &self,
        game: &mut Game,
        seat: Seat,
        action: Action,
        rng: &mut GameRng,
    ) -> Result<Submission> {
        if !game.status.is_in_age() {
            return Err(EngineError::invalid(format!(
                "game is not accepting actions in {:?}",
                game.status
            )));
        }
        if game.awaiting_decision() {
            return Err(EngineError::invalid("round is waiting on a discard decision"));
        }
        if !action.is_round_action() {
            return Err(EngineError::invalid("building from discard answers a decision"));
        }
        let player = game
            .player(seat)
            .ok_or(EngineError::PlayerNotFound { game: game.id, seat })?;
        if player.has_played_this_turn {
            return Err(EngineError::invalid(format!("{seat} already played this turn")));
        }

        let executor = ActionExecutor::new(self.catalog, self.config);
        let applied = match action {
            Action::Play(card) => executor.play_card(game, seat, card),
            Action::BuildWonder(card) => executor.build_wonder_stage(game, seat, card),
            Action::Discard(card) => executor.discard_card(game, seat, card),
            Action::BuildFromDiscard(_) => false,
        };
        game.record(ActionRecord::new(seat, action, game.current_age, applied));

        if !applied {
            warn!(game = %game.id, %seat, ?action, "action rejected");
            return Ok(Submission::REJECTED);
        }

        game.players[seat].has_played_this_turn = true;
        let turn = TurnManager::new(self.catalog, self.config).handle_end_of_turn(game, seat, rng)?;
        Ok(Submission::applied(turn))
    }

    /// Answer a discard decision by building `card` from the discard pile.
    pub fn build_from_discard(
        &self,
        game: &mut Game,
        seat: Seat,
        card: CardId,
        rng: &mut GameRng,
    ) -> Result<Submission> {
        let effect = self.decision_effect(game, seat)?;

        let applied = ActionExecutor::new(self.catalog, self.config).build_from_discard(game, seat, card);
        game.record(ActionRecord::new(
            seat,
            Action::BuildFromDiscard(card),
            game.current_age,
            applied,
        ));
        if !applied {
            return Ok(Submission::REJECTED);
        }

        EffectResolver::remove_pending_effect(&mut game.players[seat], &effect);
        let turn = TurnManager::new(self.catalog, self.config).resume(game, rng)?;
        Ok(Submission::applied(turn))
    }

    /// Give up a discard decision without building anything.
    pub fn pass_decision(&self, game: &mut Game, seat: Seat, rng: &mut GameRng) -> Result<TurnOutcome> {
        let effect = self.decision_effect(game, seat)?;
        EffectResolver::remove_pending_effect(&mut game.players[seat], &effect);
        info!(game = %game.id, %seat, %effect, "discard decision passed");
        TurnManager::new(self.catalog, self.config).resume(game, rng)
    }

    fn decision_effect(&self, game: &Game, seat: Seat) -> Result<EffectId> {
        if !game.awaiting_decision() {
            return Err(EngineError::invalid("no discard decision is pending"));
        }
        let player = game
            .player(seat)
            .ok_or(EngineError::PlayerNotFound { game: game.id, seat })?;
        player
            .pending_effects
            .iter()
            .find(|id| {
                self.catalog
                    .effects
                    .get(id)
                    .is_some_and(EffectResolver::requires_decision)
            })
            .cloned()
            .ok_or_else(|| EngineError::invalid(format!("{seat} has no discard decision")))
    }

    fn assign_wonders(&self, game: &mut Game, rng: &mut GameRng) {
        let mut names = self.catalog.wonders.names();
        if names.is_empty() {
            warn!(game = %game.id, "no wonders registered");
            return;
        }
        rng.shuffle(&mut names);

        for (i, player) in game.players.values_mut().enumerate() {
            let name = names[i % names.len()];
            let (face, other) = if rng.flip() {
                (WonderFace::A, WonderFace::B)
            } else {
                (WonderFace::B, WonderFace::A)
            };
            let Some(wonder) = self
                .catalog
                .wonders
                .find(name, face)
                .or_else(|| self.catalog.wonders.find(name, other))
            else {
                continue;
            };
            player.wonder = Some(wonder.id);
            player.resources.merge(&wonder.starting_resources);
            info!(seat = %player.seat, wonder = name, face = ?wonder.face, "wonder assigned");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardColor, CardDefinition, Wonder, WonderId};
    use crate::effects::{EffectDefinition, EffectTiming};
    use crate::resources::ResourceKind;

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        for age in Age::ALL {
            for k in 0..9u32 {
                let id = CardId::new(age.index() as u32 * 100 + k);
                catalog.cards.register(CardDefinition::new(id, "Card", CardColor::Blue, age));
            }
        }
        catalog.cards.register(
            CardDefinition::new(CardId::new(50), "Mausoleum", CardColor::Green, Age::I).with_min_players(5),
        );
        catalog.wonders.register(
            Wonder::new(WonderId::new(1), "Rhodos", WonderFace::A)
                .with_starting_resource(ResourceKind::Ore, 1),
        );
        catalog.wonders.register(
            Wonder::new(WonderId::new(2), "Rhodos", WonderFace::B)
                .with_starting_resource(ResourceKind::Ore, 1),
        );
        catalog
            .effects
            .register(EffectDefinition::new("PICK", EffectTiming::Deferred, "BUILD_FROM_DISCARD"));
        catalog
    }

    fn joined(lifecycle: &Lifecycle<'_>, n: u64) -> Game {
        let mut game = lifecycle.create_game(GameId::new(1), 11);
        for u in 0..n {
            lifecycle.join_game(&mut game, UserId::new(u)).unwrap();
        }
        game
    }

    #[test]
    fn test_join_rules() {
        let catalog = catalog();
        let config = EngineConfig::default().with_player_limits(3, 4);
        let lifecycle = Lifecycle::new(&catalog, &config);
        let mut game = joined(&lifecycle, 4);

        assert!(lifecycle.join_game(&mut game, UserId::new(0)).is_err());
        assert!(lifecycle.join_game(&mut game, UserId::new(9)).is_err());
        lifecycle.leave_game(&mut game, UserId::new(3)).unwrap();
        assert!(lifecycle.leave_game(&mut game, UserId::new(3)).is_err());
        lifecycle.join_game(&mut game, UserId::new(9)).unwrap();
        assert_eq!(game.users.len(), 4);
    }

    #[test]
    fn test_start_game_seats_and_deals() {
        let catalog = catalog();
        let config = EngineConfig::default();
        let lifecycle = Lifecycle::new(&catalog, &config);
        let mut game = joined(&lifecycle, 3);

        let report = lifecycle.start_game(&mut game, &mut GameRng::new(4)).unwrap();
        assert_eq!(report.hand_size, 3);
        assert_eq!(game.status, GameStatus::AgeI);
        assert_eq!(game.current_age, Some(Age::I));
        assert!(game.timestamps.started.is_some());

        for (seat, player) in game.players.iter() {
            assert_eq!(player.user, UserId::new(seat.index() as u64));
            assert_eq!(player.coins, 3);
            assert!(player.wonder.is_some());
            assert_eq!(player.resources.get(ResourceKind::Ore), 1);
            assert!(!player.hand.contains(&CardId::new(50)));
        }

        assert!(lifecycle.join_game(&mut game, UserId::new(7)).is_err());
        assert!(lifecycle.start_game(&mut game, &mut GameRng::new(4)).is_err());
        assert!(lifecycle.cancel_game(&mut game).is_err());
    }

    #[test]
    fn test_start_requires_enough_players() {
        let catalog = catalog();
        let config = EngineConfig::default();
        let lifecycle = Lifecycle::new(&catalog, &config);
        let mut game = joined(&lifecycle, 2);

        let err = lifecycle.start_game(&mut game, &mut GameRng::new(0)).unwrap_err();
        assert!(matches!(err, EngineError::InvalidState(_)));
        assert_eq!(game.status, GameStatus::Waiting);
    }

    #[test]
    fn test_cancel_waiting_game() {
        let catalog = catalog();
        let config = EngineConfig::default();
        let lifecycle = Lifecycle::new(&catalog, &config);
        let mut game = joined(&lifecycle, 1);

        lifecycle.cancel_game(&mut game).unwrap();
        assert_eq!(game.status, GameStatus::Cancelled);
        assert!(game.timestamps.finished.is_some());
        assert!(lifecycle.join_game(&mut game, UserId::new(5)).is_err());
    }

    #[test]
    fn test_submit_runs_round() {
        let catalog = catalog();
        let config = EngineConfig::default();
        let lifecycle = Lifecycle::new(&catalog, &config);
        let mut game = joined(&lifecycle, 3);
        let mut rng = GameRng::new(8);
        lifecycle.start_game(&mut game, &mut rng).unwrap();

        let first = game.players[Seat::new(0)].hand[0];
        let out = lifecycle
            .submit_action(&mut game, Seat::new(0), Action::Discard(first), &mut rng)
            .unwrap();
        assert_eq!(out.turn, Some(TurnOutcome::MidRound));
        assert_eq!(game.players[Seat::new(0)].coins, 6);

        let again = game.players[Seat::new(0)].hand[0];
        assert!(lifecycle
            .submit_action(&mut game, Seat::new(0), Action::Play(again), &mut rng)
            .is_err());

        for seat in [Seat::new(1), Seat::new(2)] {
            let card = game.players[seat].hand[0];
            let out = lifecycle
                .submit_action(&mut game, seat, Action::Play(card), &mut rng)
                .unwrap();
            assert!(out.applied);
        }
        assert!(game.players.values().all(|p| p.hand.len() == 2));
        assert!(game.players.values().all(|p| !p.has_played_this_turn));
        assert_eq!(game.history().len(), 3);
    }

    #[test]
    fn test_rejected_action_keeps_turn() {
        let catalog = catalog();
        let config = EngineConfig::default();
        let lifecycle = Lifecycle::new(&catalog, &config);
        let mut game = joined(&lifecycle, 3);
        let mut rng = GameRng::new(8);
        lifecycle.start_game(&mut game, &mut rng).unwrap();

        let foreign = game.players[Seat::new(1)].hand[0];
        let out = lifecycle
            .submit_action(&mut game, Seat::new(0), Action::Play(foreign), &mut rng)
            .unwrap();
        assert_eq!(out, Submission::REJECTED);
        assert!(!game.players[Seat::new(0)].has_played_this_turn);
        assert_eq!(game.history().len(), 1);
        assert!(!game.history()[0].applied);
    }

    #[test]
    fn test_submit_requires_age_and_seat() {
        let catalog = catalog();
        let config = EngineConfig::default();
        let lifecycle = Lifecycle::new(&catalog, &config);
        let mut game = joined(&lifecycle, 3);
        let mut rng = GameRng::new(0);

        let err = lifecycle
            .submit_action(&mut game, Seat::new(0), Action::Discard(CardId::new(1)), &mut rng)
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidState(_)));

        lifecycle.start_game(&mut game, &mut rng).unwrap();
        let err = lifecycle
            .submit_action(&mut game, Seat::new(6), Action::Discard(CardId::new(1)), &mut rng)
            .unwrap_err();
        assert!(matches!(err, EngineError::PlayerNotFound { .. }));
    }

    #[test]
    fn test_discard_decision_flow() {
        let catalog = catalog();
        let config = EngineConfig::default();
        let lifecycle = Lifecycle::new(&catalog, &config);
        let mut game = joined(&lifecycle, 3);
        let mut rng = GameRng::new(2);
        lifecycle.start_game(&mut game, &mut rng).unwrap();
        game.players[Seat::new(2)].push_pending(EffectId::from("PICK"));

        let mut discarded = Vec::new();
        for seat in game.players.seats().collect::<Vec<_>>() {
            let card = game.players[seat].hand[0];
            discarded.push(card);
            let out = lifecycle
                .submit_action(&mut game, seat, Action::Discard(card), &mut rng)
                .unwrap();
            assert!(out.applied);
        }
        assert!(game.awaiting_decision());
        let next = game.players[Seat::new(0)].hand[0];
        assert!(lifecycle
            .submit_action(&mut game, Seat::new(0), Action::Discard(next), &mut rng)
            .is_err());
        assert!(lifecycle
            .build_from_discard(&mut game, Seat::new(0), discarded[0], &mut rng)
            .is_err());

        let out = lifecycle
            .build_from_discard(&mut game, Seat::new(2), discarded[0], &mut rng)
            .unwrap();
        assert_eq!(out.turn, Some(TurnOutcome::Rotated { clockwise: true }));
        assert!(game.players[Seat::new(2)].played_cards.contains(&discarded[0]));
        assert!(!game.discard_pile().contains(&discarded[0]));
        assert!(!game.awaiting_decision());
    }

    #[test]
    fn test_pass_decision() {
        let catalog = catalog();
        let config = EngineConfig::default();
        let lifecycle = Lifecycle::new(&catalog, &config);
        let mut game = joined(&lifecycle, 3);
        let mut rng = GameRng::new(2);
        lifecycle.start_game(&mut game, &mut rng).unwrap();
        game.players[Seat::new(1)].push_pending(EffectId::from("PICK"));

        for seat in game.players.seats().collect::<Vec<_>>() {
            let card = game.players[seat].hand[0];
            lifecycle
                .submit_action(&mut game, seat, Action::Discard(card), &mut rng)
                .unwrap();
        }
        let outcome = lifecycle.pass_decision(&mut game, Seat::new(1), &mut rng).unwrap();
        assert_eq!(outcome, TurnOutcome::Rotated { clockwise: true });
        assert!(game.players[Seat::new(1)].pending_effects.is_empty());
    }
}
