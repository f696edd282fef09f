//! Grid and line detection.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::SeatId;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// `(row, column)`; row 0 is the top of the grid.
pub type Cell = (usize, usize);

/// Contiguous same-owner cells forming a win.
pub type WinLine = SmallVec<[Cell; 4]>;

/// Horizontal, vertical, and both diagonals.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [[Option<SeatId>; COLS]; ROWS],
}

impl Board {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, (row, col): Cell) -> Option<SeatId> {
        self.cells[row][col]
    }

    #[must_use]
    pub fn is_column_full(&self, col: usize) -> bool {
        self.cells[0][col].is_some()
    }

    /// Columns that can still take a piece, left to right.
    #[must_use]
    pub fn open_columns(&self) -> Vec<usize> {
        (0..COLS).filter(|&c| !self.is_column_full(c)).collect()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|c| self.is_column_full(c))
    }

    /// Drop a piece into `col`. Returns the cell it landed in, or `None`
    /// (and no change) if the column is full or out of range.
    pub fn drop_piece(&mut self, col: usize, seat: SeatId) -> Option<Cell> {
        if col >= COLS {
            return None;
        }
        let row = (0..ROWS).rev().find(|&r| self.cells[r][col].is_none())?;
        self.cells[row][col] = Some(seat);
        Some((row, col))
    }

    /// Look for a run of four or more through `cell`, owned by whoever
    /// occupies it. Returns the first run found, in board order.
    #[must_use]
    pub fn winning_line_from(&self, cell: Cell) -> Option<WinLine> {
        let owner = self.get(cell)?;

        DIRECTIONS.iter().find_map(|&(dr, dc)| {
            let mut line: WinLine = SmallVec::new();
            let back = self.run_length(cell, owner, -dr, -dc);
            for i in (1..=back).rev() {
                line.push(offset(cell, -dr * i as isize, -dc * i as isize));
            }
            line.push(cell);
            let forward = self.run_length(cell, owner, dr, dc);
            for i in 1..=forward {
                line.push(offset(cell, dr * i as isize, dc * i as isize));
            }
            (line.len() >= 4).then_some(line)
        })
    }

    /// Number of consecutive `owner` cells after `cell` in direction (dr, dc).
    fn run_length(&self, (row, col): Cell, owner: SeatId, dr: isize, dc: isize) -> usize {
        let mut count = 0;
        let (mut r, mut c) = (row as isize + dr, col as isize + dc);
        while (0..ROWS as isize).contains(&r)
            && (0..COLS as isize).contains(&c)
            && self.cells[r as usize][c as usize] == Some(owner)
        {
            count += 1;
            r += dr;
            c += dc;
        }
        count
    }
}

fn offset((row, col): Cell, dr: isize, dc: isize) -> Cell {
    ((row as isize + dr) as usize, (col as isize + dc) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HUMAN: SeatId = SeatId::HUMAN;
    const BOT: SeatId = SeatId::new(1);

    #[test]
    fn test_piece_falls_to_lowest_empty_cell() {
        let mut board = Board::new();
        assert_eq!(board.drop_piece(2, HUMAN), Some((5, 2)));
        assert_eq!(board.drop_piece(2, BOT), Some((4, 2)));
        assert_eq!(board.get((4, 2)), Some(BOT));
    }

    #[test]
    fn test_full_column_is_rejected() {
        let mut board = Board::new();
        for _ in 0..ROWS {
            board.drop_piece(0, HUMAN).unwrap();
        }
        let before = board.clone();

        assert!(board.is_column_full(0));
        assert_eq!(board.drop_piece(0, BOT), None);
        assert_eq!(board, before);
        assert_eq!(board.open_columns(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_horizontal_line_completed_at_the_end() {
        let mut board = Board::new();
        for col in 0..3 {
            board.drop_piece(col, HUMAN);
        }
        assert_eq!(board.winning_line_from((5, 2)), None);

        let cell = board.drop_piece(3, HUMAN).unwrap();
        let line = board.winning_line_from(cell).unwrap();
        assert_eq!(line.as_slice(), &[(5, 0), (5, 1), (5, 2), (5, 3)]);
    }

    #[test]
    fn test_line_completed_in_the_middle() {
        let mut board = Board::new();
        for col in [0, 1, 3] {
            board.drop_piece(col, BOT);
        }
        let cell = board.drop_piece(2, BOT).unwrap();
        let line = board.winning_line_from(cell).unwrap();
        assert_eq!(line.len(), 4);
        assert!(line.iter().all(|&c| board.get(c) == Some(BOT)));
    }

    #[test]
    fn test_vertical_line() {
        let mut board = Board::new();
        for _ in 0..3 {
            board.drop_piece(6, HUMAN);
        }
        let cell = board.drop_piece(6, HUMAN).unwrap();
        assert_eq!(board.winning_line_from(cell).unwrap().len(), 4);
    }

    #[test]
    fn test_diagonal_line() {
        // Staircase rising to the right for the human.
        let mut board = Board::new();
        board.drop_piece(0, HUMAN);
        board.drop_piece(1, BOT);
        board.drop_piece(1, HUMAN);
        board.drop_piece(2, BOT);
        board.drop_piece(2, BOT);
        board.drop_piece(2, HUMAN);
        board.drop_piece(3, BOT);
        board.drop_piece(3, BOT);
        board.drop_piece(3, BOT);
        let cell = board.drop_piece(3, HUMAN).unwrap();

        let line = board.winning_line_from(cell).unwrap();
        assert_eq!(line.as_slice(), &[(2, 3), (3, 2), (4, 1), (5, 0)]);
    }

    #[test]
    fn test_mixed_owners_do_not_win() {
        let mut board = Board::new();
        board.drop_piece(0, HUMAN);
        board.drop_piece(1, HUMAN);
        board.drop_piece(2, BOT);
        let cell = board.drop_piece(3, HUMAN).unwrap();
        assert_eq!(board.winning_line_from(cell), None);
    }
}
