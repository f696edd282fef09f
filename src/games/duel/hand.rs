//! Poker hand categories.
//!
//! Only the category is ranked; there is no kicker comparison. Straights
//! are runs of five distinct values with ace high only (no A-2-3-4-5).

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

use crate::cards::{Card, Suit};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandCategory {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
}

impl HandCategory {
    /// Ordinal, 0 (high card) through 8 (straight flush).
    #[must_use]
    pub const fn rank(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            HandCategory::HighCard => "High Card",
            HandCategory::OnePair => "One Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
        }
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Best category among `cards` (hole plus shared cards).
///
/// Returns `None` for fewer than five cards.
#[must_use]
pub fn evaluate(cards: &[Card]) -> Option<HandCategory> {
    if cards.len() < 5 {
        return None;
    }

    let mut value_counts = [0u8; 15];
    for card in cards {
        value_counts[card.rank.value() as usize] += 1;
    }
    let mut counts: SmallVec<[u8; 7]> = value_counts.iter().copied().filter(|&n| n > 0).collect();
    counts.sort_unstable_by(|a, b| b.cmp(a));
    let first = counts[0];
    let second = counts.get(1).copied().unwrap_or(0);

    let flush_suit = Suit::ALL
        .into_iter()
        .find(|&suit| cards.iter().filter(|c| c.suit == suit).count() >= 5);

    let straight = has_straight(cards);

    // Any flush plus any straight ranks as a straight flush; the five
    // straight cards need not share the flush suit.
    let category = if flush_suit.is_some() && straight {
        HandCategory::StraightFlush
    } else if first == 4 {
        HandCategory::FourOfAKind
    } else if first == 3 && second >= 2 {
        HandCategory::FullHouse
    } else if flush_suit.is_some() {
        HandCategory::Flush
    } else if straight {
        HandCategory::Straight
    } else if first == 3 {
        HandCategory::ThreeOfAKind
    } else if first == 2 && second == 2 {
        HandCategory::TwoPair
    } else if first == 2 {
        HandCategory::OnePair
    } else {
        HandCategory::HighCard
    };
    Some(category)
}

/// Sliding window over distinct values, highest first.
fn has_straight(cards: &[Card]) -> bool {
    let mut values: SmallVec<[u8; 7]> = cards.iter().map(|c| c.rank.value()).collect();
    values.sort_unstable_by(|a, b| b.cmp(a));
    values.dedup();
    values.windows(5).any(|w| w[0] - w[4] == 4)
}
