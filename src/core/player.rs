//! Table seats and the circular player ring.
//!
//! ## Seat
//!
//! Type-safe table position. Seat `i` sits between seat `i - 1` (its left
//! neighbour) and seat `i + 1` (its right neighbour), wrapping around.
//!
//! ## PlayerRing
//!
//! Per-seat storage backed by a `Vec` indexed by position. Neighbour
//! relations are derived from positions, never stored as references, so the
//! ring is always a single cycle of length `len()`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Table position, 0-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Seat(pub u8);

impl Seat {
    /// Create a new seat.
    #[must_use]
    pub const fn new(position: u8) -> Self {
        Self(position)
    }

    /// Get the raw position (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The seat to the left in a table of `player_count` seats.
    #[must_use]
    pub fn left(self, player_count: usize) -> Seat {
        Seat(((self.index() + player_count - 1) % player_count) as u8)
    }

    /// The seat to the right in a table of `player_count` seats.
    #[must_use]
    pub fn right(self, player_count: usize) -> Seat {
        Seat(((self.index() + 1) % player_count) as u8)
    }

    /// Iterate over all seats of a table with `player_count` players.
    ///
    /// ```
    /// use wonders_engine::core::Seat;
    ///
    /// let seats: Vec<_> = Seat::all(3).collect();
    /// assert_eq!(seats, vec![Seat::new(0), Seat::new(1), Seat::new(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = Seat> {
        (0..player_count as u8).map(Seat)
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Seat {}", self.0)
    }
}

/// Circular per-seat storage.
///
/// ```
/// use wonders_engine::core::{PlayerRing, Seat};
///
/// let ring: PlayerRing<i32> = PlayerRing::new(4, |s| s.index() as i32 * 10);
/// let (left, right) = ring.neighbors(Seat::new(0));
/// assert_eq!(*left, 30);
/// assert_eq!(*right, 10);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRing<T> {
    seats: Vec<T>,
}

impl<T> Default for PlayerRing<T> {
    fn default() -> Self {
        Self { seats: Vec::new() }
    }
}

impl<T> PlayerRing<T> {
    /// Create a ring with values from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(Seat) -> T) -> Self {
        assert!(player_count <= 255, "At most 255 seats supported");

        let seats = Seat::all(player_count).map(factory).collect();
        Self { seats }
    }

    /// Build a ring from values already ordered by position.
    pub fn from_ordered(seats: Vec<T>) -> Self {
        assert!(seats.len() <= 255, "At most 255 seats supported");
        Self { seats }
    }

    /// Number of seats.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seats.len()
    }

    /// Check if no one is seated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    /// Check if a seat exists in this ring.
    #[must_use]
    pub fn contains(&self, seat: Seat) -> bool {
        seat.index() < self.seats.len()
    }

    /// Get a seat's value, if seated.
    #[must_use]
    pub fn get(&self, seat: Seat) -> Option<&T> {
        self.seats.get(seat.index())
    }

    /// Get a mutable reference to a seat's value, if seated.
    pub fn get_mut(&mut self, seat: Seat) -> Option<&mut T> {
        self.seats.get_mut(seat.index())
    }

    /// The (left, right) neighbours of a seat.
    ///
    /// In a one-seat ring both neighbours are the seat itself.
    #[must_use]
    pub fn neighbors(&self, seat: Seat) -> (&T, &T) {
        let n = self.len();
        (&self[seat.left(n)], &self[seat.right(n)])
    }

    /// Iterate over (Seat, &T) pairs in position order.
    pub fn iter(&self) -> impl Iterator<Item = (Seat, &T)> {
        self.seats
            .iter()
            .enumerate()
            .map(|(i, v)| (Seat(i as u8), v))
    }

    /// Iterate over (Seat, &mut T) pairs in position order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Seat, &mut T)> {
        self.seats
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (Seat(i as u8), v))
    }

    /// Iterate over values in position order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.seats.iter()
    }

    /// Iterate mutably over values in position order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.seats.iter_mut()
    }

    /// Iterate over all seats.
    pub fn seats(&self) -> impl Iterator<Item = Seat> {
        Seat::all(self.seats.len())
    }
}

impl<T> Index<Seat> for PlayerRing<T> {
    type Output = T;

    fn index(&self, seat: Seat) -> &Self::Output {
        &self.seats[seat.index()]
    }
}

impl<T> IndexMut<Seat> for PlayerRing<T> {
    fn index_mut(&mut self, seat: Seat) -> &mut Self::Output {
        &mut self.seats[seat.index()]
    }
}
