//! Card primitives shared by the card games.
//!
//! ## Key Types
//!
//! - `Suit`, `Rank`, `Card`: immutable card values
//! - `Deck`: a shuffled pile with draw and replenish

pub mod card;
pub mod deck;

pub use card::{Card, Rank, Suit};
pub use deck::Deck;
