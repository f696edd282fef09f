//! Session orchestration.
//!
//! - `schedule`: step pacing and cancellation
//! - `wallet`: the human's balance collaborator
//! - `settlement`: outcomes, claim authorization, session status
//! - `session`: the `WagerSession` driver

pub mod schedule;
pub mod session;
pub mod settlement;
pub mod wallet;

pub use schedule::{Pacer, Pacing, Scheduler, ThreadSleep, VirtualClock};
pub use session::WagerSession;
pub use settlement::{Outcome, OutcomeKind, PayoutAuthority, SessionStatus};
pub use wallet::{round_amount, MemoryWallet, Wallet};
