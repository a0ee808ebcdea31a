//! Passing hands around the table.

use im::Vector;
use tracing::debug;

use crate::cards::CardId;
use crate::core::{PlayerRing, PlayerState, Seat};

/// Pass every hand one seat along.
///
/// Clockwise, the hand at position `i` moves to `(i + 1) mod n`;
/// counter-clockwise it moves to `(i - 1 + n) mod n`. No-op below two seats.
///
/// ```
/// use im::Vector;
/// use wonders_engine::cards::CardId;
/// use wonders_engine::core::{EngineConfig, PlayerRing, PlayerState, Seat, UserId};
/// use wonders_engine::draft::rotate_hands;
///
/// let config = EngineConfig::default();
/// let mut players = PlayerRing::new(3, |s| {
///     let mut p = PlayerState::new(UserId::new(s.index() as u64), s, &config);
///     p.hand = Vector::from(vec![CardId::new(s.index() as u32)]);
///     p
/// });
/// rotate_hands(&mut players, true);
/// assert_eq!(players[Seat::new(1)].hand, Vector::from(vec![CardId::new(0)]));
/// ```
pub fn rotate_hands(players: &mut PlayerRing<PlayerState>, clockwise: bool) {
    let n = players.len();
    if n < 2 {
        return;
    }

    let hands: Vec<Vector<CardId>> = players
        .values_mut()
        .map(|p| std::mem::take(&mut p.hand))
        .collect();

    for (from, hand) in hands.into_iter().enumerate() {
        let seat = Seat::new(from as u8);
        let to = if clockwise { seat.right(n) } else { seat.left(n) };
        players[to].replace_hand(hand);
    }

    debug!(players = n, clockwise, "hands rotated");
}
