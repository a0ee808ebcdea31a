//! Shared fixtures for integration tests.

#![allow(dead_code)]

use wonders_engine::cards::{CardColor, CardDefinition, CardId, Catalog, Wonder, WonderFace, WonderId};
use wonders_engine::core::{Age, EngineConfig, Game, GameId, GameStatus, PlayerRing, PlayerState, UserId};
use wonders_engine::effects::{EffectDefinition, EffectTiming};
use wonders_engine::resources::{Cost, ResourceKind};

/// `n` seats with default starting state. User ids match seat positions.
pub fn table(n: usize) -> PlayerRing<PlayerState> {
    let config = EngineConfig::default();
    PlayerRing::new(n, |seat| PlayerState::new(UserId::new(seat.index() as u64), seat, &config))
}

/// A game in `age` with `n` seated players and empty hands.
pub fn game_in_age(n: usize, age: Age) -> Game {
    let mut game = Game::new(GameId::new(1), 7);
    game.players = table(n);
    game.users = game.players.values().map(|p| p.user).collect();
    game.current_age = Some(age);
    game.status = GameStatus::for_age(age);
    game
}

/// Builds a catalog card by card with sequential ids.
pub struct CatalogBuilder {
    catalog: Catalog,
    next_card: u32,
    next_wonder: u32,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self {
            catalog: Catalog::new(),
            next_card: 1,
            next_wonder: 1,
        }
    }

    /// Add `count` free cards of `color` to `age`.
    pub fn with_cards(mut self, age: Age, color: CardColor, count: usize) -> Self {
        for _ in 0..count {
            let id = CardId::new(self.next_card);
            self.next_card += 1;
            self.catalog
                .cards
                .register(CardDefinition::new(id, format!("{color:?} {}", id.raw()), color, age));
        }
        self
    }

    /// Add one fully specified card; its id is overwritten with the next id.
    pub fn with_card(mut self, mut card: CardDefinition) -> Self {
        card.id = CardId::new(self.next_card);
        self.next_card += 1;
        self.catalog.cards.register(card);
        self
    }

    /// Add both faces of a board producing `kind`, with two stages per face.
    pub fn with_wonder(mut self, name: &str, kind: ResourceKind) -> Self {
        for face in [WonderFace::A, WonderFace::B] {
            let id = WonderId::new(self.next_wonder);
            self.next_wonder += 1;
            self.catalog.wonders.register(
                Wonder::new(id, name, face)
                    .with_starting_resource(kind, 1)
                    .with_stage(Cost::resources([(kind, 1)]), None)
                    .with_stage(Cost::resources([(kind, 2)]), None),
            );
        }
        self
    }

    pub fn with_effect(mut self, id: &str, timing: EffectTiming, parameters: &str) -> Self {
        self.catalog
            .effects
            .register(EffectDefinition::new(id, timing, parameters));
        self
    }

    pub fn build(self) -> Catalog {
        self.catalog
    }
}

/// Three ages of seven free cards per player for `players` seats, ten guilds
/// in age III, and three boards.
pub fn full_catalog(players: usize) -> Catalog {
    CatalogBuilder::new()
        .with_cards(Age::I, CardColor::Brown, players * 7)
        .with_cards(Age::II, CardColor::Blue, players * 7)
        .with_cards(Age::III, CardColor::Red, players * 5)
        .with_cards(Age::III, CardColor::Violet, 10)
        .with_wonder("Gizah", ResourceKind::Stone)
        .with_wonder("Rhodos", ResourceKind::Ore)
        .with_wonder("Alexandria", ResourceKind::Glass)
        .build()
}
