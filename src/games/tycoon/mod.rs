//! Tycoon: a two-seat property game on a 40-space ring.
//!
//! Seats roll two dice, collect a bonus for passing Go, pay tax and rent,
//! and may buy unowned spaces. Doubles roll again, up to three times. The
//! first seat at or below zero cash loses.

mod board;
mod game;

pub use board::{ColorGroup, Space, SpaceKind, BOARD, BOARD_SIZE, FALLBACK_RENT, GO, GO_TO_JAIL, JAIL};
pub use game::{buy_if_affordable, Landing, Tycoon, TycoonAction, TycoonPhase, TycoonState};
