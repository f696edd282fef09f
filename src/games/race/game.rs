//! Dice race rules.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::track::{destination, global_cell, BASE, HOME, LAUNCH_ROLL, PIECES_PER_SEAT};
use crate::core::{EngineError, GameRng, SeatId, SeatMap};
use crate::rules::{GameResult, RulesEngine, Step, StepKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RaceAction {
    Roll,
    /// Move the piece with this index (0..4) by the current roll.
    Move(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RacePhase {
    Matchmaking,
    Playing,
    Finished,
}

/// The most recent piece move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceMove {
    pub seat: SeatId,
    pub piece: usize,
    pub from: i8,
    pub to: i8,
    /// Opposing pieces sent back to base.
    pub captured: SmallVec<[(SeatId, usize); 3]>,
}

#[derive(Clone, Debug)]
pub struct RaceState {
    pub pieces: SeatMap<[i8; PIECES_PER_SEAT]>,
    pub phase: RacePhase,
    pub to_move: SeatId,
    /// Die value waiting to be used by `to_move`.
    pub roll: Option<u8>,
    pub last_move: Option<PieceMove>,
    /// Bots that brought every piece home, in finishing order. They no longer take turns.
    pub finished: SmallVec<[SeatId; 3]>,
    pub winner: Option<SeatId>,
    rng: GameRng,
}

impl RaceState {
    /// Pieces of `seat` that can use `roll`.
    #[must_use]
    pub fn movable_pieces(&self, seat: SeatId, roll: u8) -> SmallVec<[usize; PIECES_PER_SEAT]> {
        self.pieces[seat]
            .iter()
            .enumerate()
            .filter(|(_, offset)| destination(**offset, roll).is_some())
            .map(|(i, _)| i)
            .collect()
    }

    #[must_use]
    pub fn is_home(&self, seat: SeatId) -> bool {
        self.pieces[seat].iter().all(|&p| p == HOME)
    }

    fn pass_turn(&mut self) {
        self.roll = None;
        let seats = self.pieces.seat_count();
        let mut next = self.to_move.next(seats);
        while self.finished.contains(&next) {
            next = next.next(seats);
        }
        self.to_move = next;
    }

    /// `seat` just brought its last piece home. The human finishing wins; the
    /// human being the only seat left out loses to the first bot home.
    fn seat_home(&mut self, seat: SeatId) {
        self.roll = None;
        if seat.is_human() {
            self.winner = Some(seat);
            self.phase = RacePhase::Finished;
            return;
        }
        self.finished.push(seat);
        tracing::debug!(%seat, place = self.finished.len(), "race seat finished");
        if self.finished.len() + 1 == self.pieces.seat_count() {
            self.winner = self.finished.first().copied();
            self.phase = RacePhase::Finished;
        } else {
            self.pass_turn();
        }
    }

    /// Send every opposing piece on `seat`'s ring cell back to base.
    fn capture_at(&mut self, seat: SeatId, offset: i8) -> SmallVec<[(SeatId, usize); 3]> {
        let mut captured = SmallVec::new();
        let Some(cell) = global_cell(seat, offset) else {
            return captured;
        };
        for (other, pieces) in self.pieces.iter_mut() {
            if other == seat {
                continue;
            }
            for (i, pos) in pieces.iter_mut().enumerate() {
                if global_cell(other, *pos) == Some(cell) {
                    *pos = BASE;
                    captured.push((other, i));
                }
            }
        }
        captured
    }
}

/// Ludo-style race for 2 to 4 seats, four pieces each.
#[derive(Clone, Debug)]
pub struct Race {
    seats: usize,
    rake: f64,
}

impl Default for Race {
    fn default() -> Self {
        Self { seats: 4, rake: 0.05 }
    }
}

impl Race {
    /// Four-seat table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Table with `seats` seats (2 to 4).
    pub fn with_seats(seats: usize) -> Result<Self, EngineError> {
        if !(2..=4).contains(&seats) {
            return Err(EngineError::SeatCount { game: "race", count: seats });
        }
        Ok(Self {
            seats,
            ..Self::default()
        })
    }
}

/// Bot policy: roll when a roll is due, otherwise move the piece that is
/// furthest along. Ties go to the lowest piece index.
pub fn furthest_piece(state: &RaceState, seat: SeatId, legal: &[RaceAction]) -> Option<RaceAction> {
    if legal.contains(&RaceAction::Roll) {
        return Some(RaceAction::Roll);
    }
    let mut best: Option<(i8, RaceAction)> = None;
    for &action in legal {
        if let RaceAction::Move(piece) = action {
            let offset = state.pieces[seat][piece];
            if best.map_or(true, |(b, _)| offset > b) {
                best = Some((offset, action));
            }
        }
    }
    best.map(|(_, action)| action)
}

impl RulesEngine for Race {
    type State = RaceState;
    type Action = RaceAction;

    fn name(&self) -> &'static str {
        "race"
    }

    fn seat_count(&self) -> usize {
        self.seats
    }

    fn new_state(&self, rng: GameRng) -> RaceState {
        RaceState {
            pieces: SeatMap::with_value(self.seats, [BASE; PIECES_PER_SEAT]),
            phase: RacePhase::Matchmaking,
            to_move: SeatId::HUMAN,
            roll: None,
            last_move: None,
            finished: SmallVec::new(),
            winner: None,
            rng,
        }
    }

    fn active_seat(&self, state: &RaceState) -> Option<SeatId> {
        (state.phase == RacePhase::Playing).then_some(state.to_move)
    }

    fn legal_actions(&self, state: &RaceState, seat: SeatId) -> Vec<RaceAction> {
        if self.active_seat(state) != Some(seat) {
            return Vec::new();
        }
        match state.roll {
            None => vec![RaceAction::Roll],
            Some(roll) => state
                .movable_pieces(seat, roll)
                .into_iter()
                .map(RaceAction::Move)
                .collect(),
        }
    }

    fn apply_action(&self, state: &mut RaceState, seat: SeatId, action: &RaceAction) -> bool {
        if self.active_seat(state) != Some(seat) {
            return false;
        }
        match (*action, state.roll) {
            (RaceAction::Roll, None) => {
                let roll = state.rng.roll_die();
                tracing::debug!(%seat, roll, "race roll");
                if state.movable_pieces(seat, roll).is_empty() {
                    state.pass_turn();
                } else {
                    state.roll = Some(roll);
                }
                true
            }
            (RaceAction::Move(piece), Some(roll)) => {
                let Some(&from) = state.pieces[seat].get(piece) else {
                    return false;
                };
                let Some(to) = destination(from, roll) else {
                    return false;
                };
                state.pieces[seat][piece] = to;
                let captured = state.capture_at(seat, to);
                let extra_roll = roll == LAUNCH_ROLL || !captured.is_empty();
                state.last_move = Some(PieceMove {
                    seat,
                    piece,
                    from,
                    to,
                    captured,
                });

                if state.is_home(seat) {
                    state.seat_home(seat);
                } else if extra_roll {
                    state.roll = None;
                } else {
                    state.pass_turn();
                }
                true
            }
            _ => false,
        }
    }

    fn bot_action(
        &self,
        state: &RaceState,
        seat: SeatId,
        legal: &[RaceAction],
        _rng: &mut GameRng,
    ) -> Option<RaceAction> {
        furthest_piece(state, seat, legal)
    }

    fn is_terminal(&self, state: &RaceState) -> Option<GameResult> {
        state.winner.map(GameResult::Winner)
    }

    fn win_payout(&self, _state: &RaceState, stake: f64) -> f64 {
        stake * self.seats as f64 * (1.0 - self.rake)
    }

    fn pending_step(&self, state: &RaceState) -> Option<Step> {
        (state.phase == RacePhase::Matchmaking).then_some(Step::once(StepKind::Matchmaking))
    }

    fn run_step(&self, state: &mut RaceState) {
        if state.phase == RacePhase::Matchmaking {
            state.phase = RacePhase::Playing;
        }
    }

    fn animation(&self, state: &RaceState, _seat: SeatId, action: &RaceAction) -> Option<Step> {
        match action {
            RaceAction::Roll => Some(Step::once(StepKind::DiceRoll)),
            RaceAction::Move(_) => {
                let mv = state.last_move.as_ref()?;
                let steps = if mv.from == BASE { 1 } else { (mv.to - mv.from) as u32 };
                Some(Step::repeated(StepKind::PieceStep, steps))
            }
        }
    }
}
