//! Engine error type.
//!
//! Illegal moves are deliberately *not* errors: the rules engine ignores them
//! and reports `false`. Errors cover the session boundary (stakes, settlement,
//! payout authorization) and resource exhaustion.

/// Errors surfaced by sessions, decks and configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("Deck exhausted: requested {requested} cards, {remaining} remaining")]
    DeckExhausted { requested: usize, remaining: usize },

    #[error("Stake {stake} must be a positive, finite amount")]
    InvalidStake { stake: f64 },

    #[error("Stake {stake} exceeds available balance {balance}")]
    InsufficientBalance { stake: f64, balance: f64 },

    #[error("Session is closed")]
    SessionClosed,

    #[error("Diagnostic override was already initialized")]
    DiagnosticsLocked,

    #[error("Payout of {amount} was declined: {reason}")]
    PayoutDeclined { amount: f64, reason: String },

    #[error("No payout is waiting to be claimed")]
    NothingToClaim,

    #[error("{game} does not support {count} seats")]
    SeatCount { game: &'static str, count: usize },
}
