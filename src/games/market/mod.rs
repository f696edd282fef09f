//! Elimination market: ten seats call the next price move each round.
//!
//! Bots call at random when the round locks; the human calls before the
//! countdown runs out. Every seat that called it wrong is out. The human
//! wins by being the last seat standing and must claim the payout.

mod game;

pub use game::{
    random_prediction, Market, MarketPhase, MarketState, Prediction, OPENING_PRICES, PRICE_STEP,
    PRICE_WINDOW,
};
