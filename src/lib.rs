//! # wager-games
//!
//! Deterministic rules engines for wagering mini-games played by one human
//! against bots.
//!
//! ## Design Principles
//!
//! 1. **Rules Are Pure State Machines**: every game is a `RulesEngine`.
//!    Input, chance events, bot decisions and win conditions all live in
//!    the game state; nothing reaches out to the outside world.
//!
//! 2. **One Seat Is Human**: seat 0 is the human, every other seat is a bot.
//!    Seat count is fixed when the session starts.
//!
//! 3. **Settle Exactly Once**: a `WagerSession` escrows the stake, drives
//!    the game to its terminal state and applies one outcome to the
//!    balance callback.
//!
//! ## Modules
//!
//! - `core`: seats, RNG, configuration, diagnostics, action history, errors
//! - `cards`: suits, ranks, cards and decks
//! - `rules`: `RulesEngine` trait, results, paced steps
//! - `session`: session lifecycle, pacing, wallet and settlement
//! - `games`: card duel, four-in-a-row, race, shedding, tycoon, market

pub mod core;
pub mod cards;
pub mod rules;
pub mod session;
pub mod games;

// Re-export commonly used types
pub use crate::core::{
    ActionRecord, DiagnosticOverride, Diagnostics, EngineError, GameRng, SeatId, SeatKind,
    SeatMap, SessionConfig,
};

pub use crate::cards::{Card, Deck, Rank, Suit};

pub use crate::rules::{GameResult, RulesEngine, SettlementRoute, Step, StepKind};

pub use crate::session::{
    MemoryWallet, Outcome, OutcomeKind, Pacing, PayoutAuthority, SessionStatus, WagerSession,
    Wallet,
};
