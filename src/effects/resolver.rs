//! Effect resolution: applying parsed instructions to player state.
//!
//! Application is best-effort. Segments run in order and the first segment
//! that fails to parse stops the effect with `false`; mutations made by
//! earlier segments stay applied. Callers log and move on rather than
//! relying on atomicity.

use tracing::{debug, warn};

use super::effect::{EffectDefinition, EffectId, EffectRegistry, EffectTiming};
use super::instruction::{Instruction, Keyword, PriceSide};
use crate::cards::{CardColor, CardRegistry};
use crate::core::{PlayerRing, PlayerState, Seat};

/// Applies effects to the players of one game.
pub struct EffectResolver;

impl EffectResolver {
    /// Apply every segment of `effect` to the player at `seat`.
    ///
    /// Returns false if the seat is empty, the effect has no parameters, or
    /// a segment fails to parse.
    pub fn apply(
        players: &mut PlayerRing<PlayerState>,
        seat: Seat,
        effect: &EffectDefinition,
        cards: &CardRegistry,
    ) -> bool {
        if !players.contains(seat) {
            warn!(%seat, effect = %effect.id, "cannot apply effect to an empty seat");
            return false;
        }
        if effect.has_no_parameters() {
            warn!(effect = %effect.id, "effect has no parameters");
            return false;
        }

        for parsed in effect.instructions() {
            match parsed {
                Ok(instruction) => Self::apply_instruction(players, seat, &instruction, cards),
                Err(error) => {
                    warn!(%seat, effect = %effect.id, %error, "failed to parse effect segment");
                    return false;
                }
            }
        }

        debug!(%seat, effect = %effect.id, "effect applied");
        true
    }

    /// Apply one instruction to the player at `seat`.
    ///
    /// Neighbour-dependent amounts are computed before the player is
    /// mutated.
    pub fn apply_instruction(
        players: &mut PlayerRing<PlayerState>,
        seat: Seat,
        instruction: &Instruction,
        cards: &CardRegistry,
    ) {
        let coin_bonus = match instruction {
            Instruction::SpecialKeyword(keyword) => Self::keyword_coins(players, seat, *keyword, cards),
            _ => 0,
        };

        let Some(player) = players.get_mut(seat) else {
            return;
        };

        match instruction {
            Instruction::VictoryPoints(n) => player.victory_points += n,
            Instruction::Coins(n) => player.coins += n,
            Instruction::Military(n) => player.military_points += n,
            Instruction::PriceRule { side, price } => match side {
                PriceSide::LeftBase => player.prices.left_base = *price,
                PriceSide::RightBase => player.prices.right_base = *price,
                PriceSide::BothAdvanced => {
                    player.prices.left_advanced = *price;
                    player.prices.right_advanced = *price;
                }
            },
            Instruction::ResourceGrant { kind, count } => player.resources.add(*kind, *count),
            Instruction::ScienceGrant { kind, count } => player.science.add(*kind, *count),
            Instruction::MutablePairGrant { pair, count } => player.pairs.add(*pair, *count),
            Instruction::SpecialKeyword(_) => player.coins += coin_bonus,
            Instruction::Ignored(segment) => {
                debug!(%seat, segment = segment.as_str(), "ignoring unhandled effect segment");
                return;
            }
        }

        debug!(%seat, ?instruction, "applied instruction");
    }

    fn keyword_coins(
        players: &PlayerRing<PlayerState>,
        seat: Seat,
        keyword: Keyword,
        cards: &CardRegistry,
    ) -> i32 {
        let Some(player) = players.get(seat) else {
            return 0;
        };
        match keyword {
            Keyword::Vineyard => {
                let (left, right) = players.neighbors(seat);
                count_color(player, CardColor::Brown, cards)
                    + count_color(left, CardColor::Brown, cards)
                    + count_color(right, CardColor::Brown, cards)
            }
            Keyword::Lighthouse => count_color(player, CardColor::Yellow, cards),
            Keyword::Haven => count_color(player, CardColor::Brown, cards),
            Keyword::ChamberOfCommerce => 2 * count_color(player, CardColor::Yellow, cards),
            Keyword::BuildFromDiscard | Keyword::PlayLastCards => 0,
        }
    }

    /// Route an effect fired by a played card or a built stage.
    ///
    /// Immediate effects apply now; every other timing is queued on the
    /// player's pending effects.
    pub fn dispatch(
        players: &mut PlayerRing<PlayerState>,
        seat: Seat,
        effect: &EffectDefinition,
        cards: &CardRegistry,
    ) -> bool {
        if effect.timing == EffectTiming::Immediate {
            return Self::apply(players, seat, effect, cards);
        }
        match players.get_mut(seat) {
            Some(player) => {
                player.push_pending(effect.id.clone());
                debug!(%seat, effect = %effect.id, timing = ?effect.timing, "effect queued");
                true
            }
            None => false,
        }
    }

    /// Remove a resolved pending effect by ID.
    pub fn remove_pending_effect(player: &mut PlayerState, effect: &EffectId) -> bool {
        let removed = player.remove_pending(effect);
        if removed {
            debug!(seat = %player.seat, %effect, "removed pending effect");
        }
        removed
    }

    /// Check if an effect asks its owner to pick from the discard pile.
    #[must_use]
    pub fn requires_decision(effect: &EffectDefinition) -> bool {
        effect.instructions().any(|parsed| {
            parsed == Ok(Instruction::SpecialKeyword(Keyword::BuildFromDiscard))
        })
    }

    /// Check if an effect lets its owner play the last card of an age.
    #[must_use]
    pub fn plays_last_card(effect: &EffectDefinition) -> bool {
        effect.instructions().any(|parsed| {
            parsed == Ok(Instruction::SpecialKeyword(Keyword::PlayLastCards))
        })
    }

    /// Apply and remove every pending effect whose timing is in `timings`.
    ///
    /// Seats are processed in position order. Effects that wait on a
    /// discard-pile decision and standing last-card abilities are left
    /// queued. Returns the number applied.
    pub fn fire_pending(
        players: &mut PlayerRing<PlayerState>,
        timings: &[EffectTiming],
        effects: &EffectRegistry,
        cards: &CardRegistry,
    ) -> usize {
        let mut fired = 0;
        let seats: Vec<Seat> = players.seats().collect();

        for seat in seats {
            let due: Vec<EffectDefinition> = players[seat]
                .pending_effects
                .iter()
                .filter_map(|id| match effects.get(id) {
                    Some(effect) => Some(effect),
                    None => {
                        warn!(%seat, effect = %id, "pending effect is not registered");
                        None
                    }
                })
                .filter(|effect| timings.contains(&effect.timing))
                .filter(|effect| !Self::requires_decision(effect))
                .filter(|effect| !Self::plays_last_card(effect))
                .cloned()
                .collect();

            for effect in due {
                Self::apply(players, seat, &effect, cards);
                players[seat].remove_pending(&effect.id);
                fired += 1;
            }
        }

        fired
    }
}

/// Number of played cards of `color` in a player's tableau.
#[must_use]
pub fn count_color(player: &PlayerState, color: CardColor, cards: &CardRegistry) -> i32 {
    player
        .played_cards
        .iter()
        .filter(|&&card| cards.color_of(card) == Some(color))
        .count() as i32
}
