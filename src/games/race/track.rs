//! Track geometry.
//!
//! Each seat measures progress on its own local track: offsets 0..40 are
//! the shared ring (starting at that seat's entry cell), 40..44 the private
//! home stretch, and 44 the final home cell. Pieces in the base sit at -1.

use crate::core::SeatId;

/// Offset of a piece still in its base.
pub const BASE: i8 = -1;

/// Cells on the shared ring.
pub const TRACK_LEN: i8 = 40;

/// Final home cell.
pub const HOME: i8 = 44;

/// Ring distance between consecutive seats' entry cells.
pub const START_SPACING: usize = 10;

pub const PIECES_PER_SEAT: usize = 4;

/// Roll needed to bring a piece out of its base.
pub const LAUNCH_ROLL: u8 = 6;

/// Entry cell of a seat on the shared ring.
#[must_use]
pub fn start_cell(seat: SeatId) -> usize {
    seat.index() * START_SPACING
}

/// Shared-ring cell for a local offset, or `None` off the ring
/// (base, home stretch, home).
#[must_use]
pub fn global_cell(seat: SeatId, offset: i8) -> Option<usize> {
    (0..TRACK_LEN)
        .contains(&offset)
        .then(|| (start_cell(seat) + offset as usize) % TRACK_LEN as usize)
}

/// Where a piece at `offset` ends up after `roll`, or `None` if it cannot move.
#[must_use]
pub fn destination(offset: i8, roll: u8) -> Option<i8> {
    if offset == BASE {
        return (roll == LAUNCH_ROLL).then_some(0);
    }
    if offset >= HOME {
        return None;
    }
    let target = offset + roll as i8;
    (target <= HOME).then_some(target)
}
