//! Core engine types: seats, RNG, configuration, action history, errors.
//!
//! This module contains the building blocks every game shares. Games never
//! modify it; they configure sessions through `SessionConfig`.

pub mod seat;
pub mod rng;
pub mod config;
pub mod action;
pub mod error;

pub use seat::{SeatId, SeatKind, SeatMap};
pub use rng::GameRng;
pub use config::{DiagnosticOverride, Diagnostics, SessionConfig};
pub use action::ActionRecord;
pub use error::EngineError;
