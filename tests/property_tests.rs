//! Property tests for shuffling and race movement.

use proptest::prelude::*;
use std::collections::HashSet;

use wager_games::cards::{Card, Deck, Rank, Suit};
use wager_games::core::GameRng;
use wager_games::games::race::{destination, BASE, HOME};

proptest! {
    #[test]
    fn prop_standard_deck_is_permutation(seed in any::<u64>()) {
        let mut rng = GameRng::new(seed);
        let deck = Deck::standard(&mut rng);
        prop_assert_eq!(deck.len(), 52);

        let unique: HashSet<Card> = deck.cards().iter().copied().collect();
        prop_assert_eq!(unique.len(), 52);
        for suit in Suit::ALL {
            for rank in Rank::FULL {
                prop_assert!(unique.contains(&Card::new(rank, suit)));
            }
        }
    }

    #[test]
    fn prop_reduced_deck_is_permutation(seed in any::<u64>()) {
        let mut rng = GameRng::new(seed);
        let deck = Deck::reduced(&mut rng);
        let unique: HashSet<Card> = deck.cards().iter().copied().collect();
        prop_assert_eq!(deck.len(), 32);
        prop_assert_eq!(unique.len(), 32);
        prop_assert!(unique.iter().all(|c| Rank::REDUCED.contains(&c.rank)));
    }

    #[test]
    fn prop_draws_never_duplicate(seed in any::<u64>(), n in 0usize..=52) {
        let mut rng = GameRng::new(seed);
        let mut deck = Deck::standard(&mut rng);
        let drawn = deck.draw(n).unwrap();
        prop_assert_eq!(drawn.len(), n);
        prop_assert_eq!(deck.len(), 52 - n);
        prop_assert!(drawn.iter().all(|c| !deck.cards().contains(c)));
    }

    #[test]
    fn prop_race_moves_stay_on_track(offset in BASE..=HOME, roll in 1u8..=6) {
        match destination(offset, roll) {
            Some(to) => {
                prop_assert!(to <= HOME);
                prop_assert!(to > offset);
                if offset == BASE {
                    prop_assert_eq!(roll, 6);
                } else {
                    prop_assert_eq!(to, offset + roll as i8);
                }
            }
            None => {
                prop_assert!(offset == BASE && roll != 6 || offset + roll as i8 > HOME);
            }
        }
    }
}
