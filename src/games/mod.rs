//! Game implementations.
//!
//! Each game is a `RulesEngine` plus its state and a small bot policy.

pub mod connect_four;
pub mod duel;
pub mod market;
pub mod race;
pub mod shedding;
pub mod tycoon;
