//! Rules engine trait for game implementations.
//!
//! Games implement `RulesEngine` to define:
//! - Legal actions for each game state
//! - How actions modify state
//! - Non-player steps and their pacing
//! - Win/loss conditions and payouts
//!
//! The session calls into `RulesEngine` but never interprets
//! game-specific concepts directly.

pub mod engine;

pub use engine::{GameResult, RulesEngine, SettlementRoute, Step, StepKind};
