//! Playability and special-rank effects.

use crate::cards::{Card, Rank, Suit};

/// Next player draws two more cards, stacking.
pub const DRAW_TWO: Rank = Rank::Seven;
/// Same seat plays again.
pub const SKIP: Rank = Rank::Eight;
/// Same seat plays again.
pub const EXTRA_TURN: Rank = Rank::Ace;
/// Always playable; its player names the next suit.
pub const WILD: Rank = Rank::Jack;

/// What a played card does to the turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Turn passes normally.
    None,
    /// Add two to the pending penalty, turn passes.
    DrawTwo,
    /// Same seat again.
    Repeat,
    /// Same seat must name a suit before the turn passes.
    Wish,
}

#[must_use]
pub fn effect_of(rank: Rank) -> Effect {
    match rank {
        DRAW_TWO => Effect::DrawTwo,
        SKIP | EXTRA_TURN => Effect::Repeat,
        WILD => Effect::Wish,
        _ => Effect::None,
    }
}

/// Whether `card` may be played on `top`.
///
/// The wild rank is always playable. With a penalty pending only a
/// draw-two (or the wild rank) may be played. Otherwise the card must match
/// the top card's rank, or its suit (the wished suit replaces the top card's
/// suit while a wish is active).
#[must_use]
pub fn is_playable(card: Card, top: Card, wish: Option<Suit>, penalty: u32) -> bool {
    if card.rank == WILD {
        return true;
    }
    if penalty > 0 {
        return card.rank == DRAW_TWO;
    }
    card.rank == top.rank || card.suit == wish.unwrap_or(top.suit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Rank::*;
    use crate::cards::Suit::*;

    #[test]
    fn test_wild_always_playable() {
        for top in [Card::new(Seven, Heart), Card::new(Ace, Club), Card::new(Jack, Spade)] {
            assert!(is_playable(Card::new(Jack, Diamond), top, None, 0));
            assert!(is_playable(Card::new(Jack, Diamond), top, Some(Spade), 4));
        }
    }

    #[test]
    fn test_suit_or_rank_match() {
        let top = Card::new(Nine, Heart);
        assert!(is_playable(Card::new(King, Heart), top, None, 0));
        assert!(is_playable(Card::new(Nine, Club), top, None, 0));
        assert!(!is_playable(Card::new(King, Club), top, None, 0));
    }

    #[test]
    fn test_wish_replaces_top_suit() {
        let top = Card::new(Jack, Heart);
        assert!(is_playable(Card::new(Ten, Spade), top, Some(Spade), 0));
        assert!(!is_playable(Card::new(Ten, Heart), top, Some(Spade), 0));
    }

    #[test]
    fn test_penalty_only_accepts_draw_two() {
        let top = Card::new(Seven, Heart);
        assert!(is_playable(Card::new(Seven, Club), top, None, 2));
        assert!(!is_playable(Card::new(Nine, Heart), top, None, 2));
    }

    #[test]
    fn test_effects() {
        assert_eq!(effect_of(Seven), Effect::DrawTwo);
        assert_eq!(effect_of(Eight), Effect::Repeat);
        assert_eq!(effect_of(Ace), Effect::Repeat);
        assert_eq!(effect_of(Jack), Effect::Wish);
        assert_eq!(effect_of(Queen), Effect::None);
    }
}
