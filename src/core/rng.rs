//! Seeded shuffling for deals and board assignment.
//!
//! Nothing in the engine reaches for thread-local randomness. Dealing,
//! guild selection and wonder assignment all draw from a `GameRng` passed
//! in by the caller, and a game saves its stream position as a
//! [`RngCursor`] between operations.
//!
//! ```
//! use wonders_engine::core::GameRng;
//!
//! let deal = |seed| {
//!     let mut deck: Vec<u32> = (0..21).collect();
//!     GameRng::new(seed).shuffle(&mut deck);
//!     deck
//! };
//! assert_eq!(deal(7), deal(7));
//! assert_ne!(deal(7), deal(8));
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// ChaCha8 stream bound to the seed a game was created with.
#[derive(Clone, Debug)]
pub struct GameRng {
    stream: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            stream: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Reopen a stream at a saved position.
    #[must_use]
    pub fn resume(cursor: &RngCursor) -> Self {
        let mut rng = Self::new(cursor.seed);
        rng.stream.set_word_pos(cursor.word_pos);
        rng
    }

    /// Where this stream currently stands.
    #[must_use]
    pub fn cursor(&self) -> RngCursor {
        RngCursor {
            seed: self.seed,
            word_pos: self.stream.get_word_pos(),
        }
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform permutation of `items`.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.stream);
    }

    /// Fair coin, used to pick a wonder face.
    pub fn flip(&mut self) -> bool {
        self.stream.gen_bool(0.5)
    }

    /// Index in `0..len`. Panics when `len` is zero.
    pub fn index_below(&mut self, len: usize) -> usize {
        self.stream.gen_range(0..len)
    }
}

/// Persisted stream position: the seed plus ChaCha's 128-bit word counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngCursor {
    pub seed: u64,
    pub word_pos: u128,
}

impl RngCursor {
    /// Position of a stream that has not drawn anything yet.
    #[must_use]
    pub fn start(seed: u64) -> Self {
        Self { seed, word_pos: 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draws(rng: &mut GameRng, n: usize) -> Vec<usize> {
        (0..n).map(|_| rng.index_below(52)).collect()
    }

    #[test]
    fn test_seed_fixes_sequence() {
        assert_eq!(draws(&mut GameRng::new(5), 30), draws(&mut GameRng::new(5), 30));
        assert_ne!(draws(&mut GameRng::new(5), 30), draws(&mut GameRng::new(6), 30));
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut deck: Vec<u32> = (0..49).collect();
        GameRng::new(3).shuffle(&mut deck);
        assert_ne!(deck, (0..49).collect::<Vec<_>>());
        deck.sort_unstable();
        assert_eq!(deck, (0..49).collect::<Vec<_>>());
    }

    #[test]
    fn test_flip_lands_both_ways() {
        let mut rng = GameRng::new(11);
        let heads = (0..200).filter(|_| rng.flip()).count();
        assert!(heads > 0 && heads < 200);
    }

    #[test]
    fn test_resume_continues_stream() {
        let mut rng = GameRng::new(42);
        draws(&mut rng, 17);
        let cursor = rng.cursor();
        let expected = draws(&mut rng, 10);

        let mut resumed = GameRng::resume(&cursor);
        assert_eq!(draws(&mut resumed, 10), expected);
    }

    #[test]
    fn test_fresh_cursor_matches_new() {
        let mut a = GameRng::resume(&RngCursor::start(9));
        let mut b = GameRng::new(9);
        assert_eq!(draws(&mut a, 5), draws(&mut b, 5));
        assert_eq!(GameRng::new(9).cursor(), RngCursor::start(9));
    }

    #[test]
    fn test_cursor_json() {
        let cursor = RngCursor { seed: 42, word_pos: 12_345 };
        let json = serde_json::to_string(&cursor).unwrap();
        assert_eq!(serde_json::from_str::<RngCursor>(&json).unwrap(), cursor);
    }
}
