//! Connect Four rules.

use serde::{Deserialize, Serialize};

use super::board::{Board, Cell, WinLine};
use crate::core::{GameRng, SeatId};
use crate::rules::{GameResult, RulesEngine, Step, StepKind};

/// Drop a piece into a column (0-based).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DropPiece(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Matchmaking,
    Playing,
    Finished,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectFourState {
    pub board: Board,
    pub phase: Phase,
    pub to_move: SeatId,
    pub last_move: Option<Cell>,
    pub winner: Option<SeatId>,
    pub winning_line: Option<WinLine>,
}

/// Two-seat Connect Four. The human moves first.
#[derive(Clone, Debug)]
pub struct ConnectFour {
    payout_multiplier: f64,
}

impl Default for ConnectFour {
    fn default() -> Self {
        Self {
            payout_multiplier: 1.95,
        }
    }
}

impl ConnectFour {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn payout_multiplier(mut self, multiplier: f64) -> Self {
        assert!(multiplier > 0.0, "Payout multiplier must be positive");
        self.payout_multiplier = multiplier;
        self
    }
}

/// Bot policy: a uniformly random open column.
pub fn random_column(legal: &[DropPiece], rng: &mut GameRng) -> Option<DropPiece> {
    rng.choose(legal).copied()
}

impl RulesEngine for ConnectFour {
    type State = ConnectFourState;
    type Action = DropPiece;

    fn name(&self) -> &'static str {
        "connect_four"
    }

    fn seat_count(&self) -> usize {
        2
    }

    fn new_state(&self, _rng: GameRng) -> ConnectFourState {
        ConnectFourState {
            board: Board::new(),
            phase: Phase::Matchmaking,
            to_move: SeatId::HUMAN,
            last_move: None,
            winner: None,
            winning_line: None,
        }
    }

    fn active_seat(&self, state: &ConnectFourState) -> Option<SeatId> {
        (state.phase == Phase::Playing).then_some(state.to_move)
    }

    fn legal_actions(&self, state: &ConnectFourState, seat: SeatId) -> Vec<DropPiece> {
        if self.active_seat(state) != Some(seat) {
            return Vec::new();
        }
        state.board.open_columns().into_iter().map(DropPiece).collect()
    }

    fn apply_action(&self, state: &mut ConnectFourState, seat: SeatId, action: &DropPiece) -> bool {
        if self.active_seat(state) != Some(seat) {
            return false;
        }
        let Some(cell) = state.board.drop_piece(action.0, seat) else {
            return false;
        };
        state.last_move = Some(cell);

        if let Some(line) = state.board.winning_line_from(cell) {
            state.winner = Some(seat);
            state.winning_line = Some(line);
            state.phase = Phase::Finished;
        } else if state.board.is_full() {
            state.phase = Phase::Finished;
        } else {
            state.to_move = seat.next(2);
        }
        true
    }

    fn bot_action(
        &self,
        _state: &ConnectFourState,
        _seat: SeatId,
        legal: &[DropPiece],
        rng: &mut GameRng,
    ) -> Option<DropPiece> {
        random_column(legal, rng)
    }

    fn is_terminal(&self, state: &ConnectFourState) -> Option<GameResult> {
        if state.phase != Phase::Finished {
            return None;
        }
        Some(state.winner.map_or(GameResult::Draw, GameResult::Winner))
    }

    fn win_payout(&self, _state: &ConnectFourState, stake: f64) -> f64 {
        stake * self.payout_multiplier
    }

    fn pending_step(&self, state: &ConnectFourState) -> Option<Step> {
        (state.phase == Phase::Matchmaking).then_some(Step::once(StepKind::Matchmaking))
    }

    fn run_step(&self, state: &mut ConnectFourState) {
        if state.phase == Phase::Matchmaking {
            state.phase = Phase::Playing;
        }
    }
}
