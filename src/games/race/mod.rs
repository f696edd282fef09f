//! Dice race (Ludo style).
//!
//! Up to four seats race four pieces each around a shared 40-cell ring and
//! into a private home stretch. A six launches a piece from base; landing on
//! an opposing piece on the ring sends it back. Sixes and captures grant an
//! extra roll. The first seat with all pieces home ends the session.

mod game;
mod track;

pub use game::{furthest_piece, PieceMove, Race, RaceAction, RacePhase, RaceState};
pub use track::{destination, global_cell, start_cell, BASE, HOME, PIECES_PER_SEAT, TRACK_LEN};
