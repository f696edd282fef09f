//! Action history records.
//!
//! Every applied action, human or bot, is recorded with the seat that took
//! it and its position in the session, for replay and outcome messaging.

use serde::{Deserialize, Serialize};

use super::seat::SeatId;

/// A recorded action with metadata for history tracking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord<A> {
    /// The seat that took this action.
    pub seat: SeatId,

    /// The action taken.
    pub action: A,

    /// Turn number when the action was taken (starts at 1).
    pub turn: u32,

    /// Sequence number within the session.
    pub sequence: u32,
}

impl<A> ActionRecord<A> {
    #[must_use]
    pub fn new(seat: SeatId, action: A, turn: u32, sequence: u32) -> Self {
        Self {
            seat,
            action,
            turn,
            sequence,
        }
    }
}
