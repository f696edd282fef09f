//! Connect Four against a random bot.
//!
//! - 6 × 7 grid; a piece falls to the lowest empty cell of its column
//! - After each placement, the four axes through the new piece are scanned
//!   for a run of four
//! - The bot picks a uniformly random open column
//! - A full board with no line ends in a draw

mod board;
mod game;

pub use board::{Board, Cell, WinLine, COLS, ROWS};
pub use game::{random_column, ConnectFour, ConnectFourState, DropPiece, Phase};
