//! Shuffled decks.
//!
//! A deck is an ordered pile; the top card is the last element, so drawing
//! is a `pop`. Decks never contain duplicates within one shuffle.

use serde::{Deserialize, Serialize};

use super::card::{Card, Rank, Suit};
use crate::core::{EngineError, GameRng};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Uniform random permutation of the full rank × suit product.
    pub fn new_shuffled(ranks: &[Rank], suits: &[Suit], rng: &mut GameRng) -> Self {
        let mut cards = Vec::with_capacity(ranks.len() * suits.len());
        for &suit in suits {
            for &rank in ranks {
                cards.push(Card { rank, suit });
            }
        }
        rng.shuffle(&mut cards);
        Self { cards }
    }

    /// Shuffled 52-card deck.
    pub fn standard(rng: &mut GameRng) -> Self {
        Self::new_shuffled(&Rank::FULL, &Suit::ALL, rng)
    }

    /// Shuffled 32-card deck (ranks 7 through ace).
    pub fn reduced(rng: &mut GameRng) -> Self {
        Self::new_shuffled(&Rank::REDUCED, &Suit::ALL, rng)
    }

    /// Deck with a fixed order; the last card is drawn first.
    #[must_use]
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Remaining cards, bottom first.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Draw `n` cards from the top.
    ///
    /// Fails without drawing anything if fewer than `n` cards remain.
    pub fn draw(&mut self, n: usize) -> Result<Vec<Card>, EngineError> {
        if n > self.cards.len() {
            return Err(EngineError::DeckExhausted {
                requested: n,
                remaining: self.cards.len(),
            });
        }
        let split = self.cards.len() - n;
        let mut drawn = self.cards.split_off(split);
        drawn.reverse();
        Ok(drawn)
    }

    /// Draw the top card, if any.
    pub fn draw_one(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Put cards back under the pile and reshuffle the whole deck.
    pub fn replenish(&mut self, cards: impl IntoIterator<Item = Card>, rng: &mut GameRng) {
        self.cards.extend(cards);
        rng.shuffle(&mut self.cards);
    }
}
