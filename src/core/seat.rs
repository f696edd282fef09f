//! Seat identification and per-seat data storage.
//!
//! ## SeatId
//!
//! Type-safe seat identifier. Seat 0 is always the human; every other seat
//! is driven by the game's bot policy.
//!
//! ## SeatMap
//!
//! Per-seat storage backed by `Vec` for O(1) access.
//! Supports iteration and indexing by `SeatId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Seat identifier, 0-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeatId(pub u8);

impl SeatId {
    /// The human-controlled seat.
    pub const HUMAN: SeatId = SeatId(0);

    /// Create a new seat ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[must_use]
    pub const fn is_human(self) -> bool {
        self.0 == 0
    }

    /// Who controls this seat.
    #[must_use]
    pub const fn kind(self) -> SeatKind {
        if self.is_human() {
            SeatKind::Human
        } else {
            SeatKind::Bot
        }
    }

    /// The seat after this one in a table of `seat_count` seats.
    #[must_use]
    pub fn next(self, seat_count: usize) -> SeatId {
        SeatId(((self.index() + 1) % seat_count) as u8)
    }

    /// Iterate over all seat IDs for a table with `seat_count` seats.
    ///
    /// ```
    /// use wager_games::core::SeatId;
    ///
    /// let seats: Vec<_> = SeatId::all(4).collect();
    /// assert_eq!(seats.len(), 4);
    /// assert_eq!(seats[0], SeatId::HUMAN);
    /// assert_eq!(seats[3], SeatId::new(3));
    /// ```
    pub fn all(seat_count: usize) -> impl Iterator<Item = SeatId> {
        (0..seat_count as u8).map(SeatId)
    }
}

impl std::fmt::Display for SeatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind() {
            SeatKind::Human => write!(f, "Seat {} (human)", self.0),
            SeatKind::Bot => write!(f, "Seat {} (bot)", self.0),
        }
    }
}

/// Who makes the decisions for a seat. A seat is data, not behaviour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeatKind {
    Human,
    Bot,
}

/// Per-seat data storage with O(1) access.
///
/// The seat count is fixed at construction and never changes.
///
/// ```
/// use wager_games::core::{SeatId, SeatMap};
///
/// let mut cash: SeatMap<i64> = SeatMap::with_value(2, 1500);
/// cash[SeatId::new(1)] -= 200;
/// assert_eq!(cash[SeatId::HUMAN], 1500);
/// assert_eq!(cash[SeatId::new(1)], 1300);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeatMap<T> {
    data: Vec<T>,
}

impl<T> SeatMap<T> {
    /// Create a new SeatMap with values from a factory function.
    pub fn new(seat_count: usize, factory: impl Fn(SeatId) -> T) -> Self {
        assert!(seat_count > 0, "Must have at least 1 seat");
        assert!(seat_count <= 255, "At most 255 seats supported");

        let data = (0..seat_count as u8).map(|i| factory(SeatId(i))).collect();

        Self { data }
    }

    /// Create a new SeatMap with all entries set to the same value.
    pub fn with_value(seat_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(seat_count, |_| value.clone())
    }

    /// Create a new SeatMap with default values.
    pub fn with_default(seat_count: usize) -> Self
    where
        T: Default,
    {
        Self::new(seat_count, |_| T::default())
    }

    #[must_use]
    pub fn seat_count(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn get(&self, seat: SeatId) -> &T {
        &self.data[seat.index()]
    }

    pub fn get_mut(&mut self, seat: SeatId) -> &mut T {
        &mut self.data[seat.index()]
    }

    /// Iterate over (SeatId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (SeatId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (SeatId(i as u8), v))
    }

    /// Iterate over (SeatId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (SeatId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (SeatId(i as u8), v))
    }
}

impl<T> Index<SeatId> for SeatMap<T> {
    type Output = T;

    fn index(&self, seat: SeatId) -> &Self::Output {
        self.get(seat)
    }
}

impl<T> IndexMut<SeatId> for SeatMap<T> {
    fn index_mut(&mut self, seat: SeatId) -> &mut Self::Output {
        self.get_mut(seat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_id_basics() {
        let human = SeatId::HUMAN;
        let bot = SeatId::new(1);

        assert_eq!(human.index(), 0);
        assert_eq!(bot.index(), 1);
        assert_eq!(human.kind(), SeatKind::Human);
        assert_eq!(bot.kind(), SeatKind::Bot);
        assert_eq!(format!("{}", bot), "Seat 1 (bot)");
    }

    #[test]
    fn test_seat_next_wraps() {
        assert_eq!(SeatId::new(0).next(2), SeatId::new(1));
        assert_eq!(SeatId::new(1).next(2), SeatId::new(0));
        assert_eq!(SeatId::new(3).next(4), SeatId::new(0));
    }

    #[test]
    fn test_seat_map_new() {
        let map: SeatMap<i32> = SeatMap::new(4, |s| s.index() as i32 * 10);

        assert_eq!(map[SeatId::new(0)], 0);
        assert_eq!(map[SeatId::new(3)], 30);
        assert_eq!(map.seat_count(), 4);
    }

    #[test]
    fn test_seat_map_mutation_and_iter() {
        let mut map: SeatMap<i32> = SeatMap::with_value(3, 0);
        for (seat, value) in map.iter_mut() {
            *value = seat.index() as i32 + 1;
        }

        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs[0], (SeatId::new(0), &1));
        assert_eq!(pairs[2], (SeatId::new(2), &3));
    }

    #[test]
    fn test_seat_map_serialization() {
        let map: SeatMap<i32> = SeatMap::new(2, |s| s.index() as i32 + 1);
        let json = serde_json::to_string(&map).unwrap();
        let deserialized: SeatMap<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }

    #[test]
    #[should_panic(expected = "Must have at least 1 seat")]
    fn test_seat_map_zero_seats() {
        let _: SeatMap<i32> = SeatMap::with_value(0, 0);
    }
}
