//! Tycoon rules.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::board::{SpaceKind, BOARD, BOARD_SIZE, JAIL};
use crate::core::{GameRng, SeatId, SeatMap};
use crate::rules::{GameResult, RulesEngine, Step, StepKind};

const STARTING_CASH: i64 = 1500;
const GO_BONUS: i64 = 200;
const MAX_DOUBLES: u8 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TycoonAction {
    Roll,
    Buy,
    Skip,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TycoonPhase {
    /// The seat to move must roll.
    Rolling,
    /// The seat to move landed on an unowned space and may buy it.
    AwaitingDecision,
    Finished,
}

/// What landing on a space did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Landing {
    Tax { fee: i64 },
    Rent { owner: SeatId, amount: i64 },
    SentToJail,
    Offer { space: usize, price: i64 },
    Nothing,
}

#[derive(Clone, Debug)]
pub struct TycoonState {
    pub cash: SeatMap<i64>,
    pub positions: SeatMap<usize>,
    /// Space index to owner.
    pub owners: FxHashMap<usize, SeatId>,
    pub phase: TycoonPhase,
    pub to_move: SeatId,
    pub dice: Option<(u8, u8)>,
    /// Consecutive doubles rolled this turn.
    pub doubles: u8,
    pub last_landing: Option<Landing>,
    rng: GameRng,
}

impl TycoonState {
    /// First seat at or below zero cash.
    #[must_use]
    pub fn bankrupt_seat(&self) -> Option<SeatId> {
        self.cash.iter().find(|(_, cash)| **cash <= 0).map(|(seat, _)| seat)
    }

    fn rolled_doubles(&self) -> bool {
        self.dice.is_some_and(|(a, b)| a == b)
    }

    /// Advance `seat` by `steps`, paying the Go bonus each time Go is reached.
    fn advance(&mut self, seat: SeatId, steps: usize) {
        let from = self.positions[seat];
        let laps = (from + steps) / BOARD_SIZE;
        self.positions[seat] = (from + steps) % BOARD_SIZE;
        self.cash[seat] += GO_BONUS * laps as i64;
    }

    fn resolve_landing(&mut self, seat: SeatId) -> Landing {
        let pos = self.positions[seat];
        let space = &BOARD[pos];

        if let SpaceKind::Tax { fee } = space.kind {
            self.cash[seat] -= fee;
            return Landing::Tax { fee };
        }
        if let Some(&owner) = self.owners.get(&pos) {
            if owner != seat {
                let amount = space.rent();
                self.cash[seat] -= amount;
                self.cash[owner] += amount;
                return Landing::Rent { owner, amount };
            }
        }
        if space.kind == SpaceKind::GoToJail {
            self.positions[seat] = JAIL;
            return Landing::SentToJail;
        }
        match space.price() {
            Some(price) if !self.owners.contains_key(&pos) => Landing::Offer { space: pos, price },
            _ => Landing::Nothing,
        }
    }

    /// Same seat rolls again after doubles (up to the limit); otherwise the
    /// turn passes.
    fn end_turn(&mut self, allow_extra_roll: bool) {
        self.phase = TycoonPhase::Rolling;
        if allow_extra_roll && self.rolled_doubles() && self.doubles < MAX_DOUBLES {
            return;
        }
        self.doubles = 0;
        self.to_move = self.to_move.next(self.cash.seat_count());
    }

    fn check_bankruptcy(&mut self) {
        if self.bankrupt_seat().is_some() {
            self.phase = TycoonPhase::Finished;
        }
    }
}

/// Two-seat property game on a 40-space ring.
#[derive(Clone, Debug)]
pub struct Tycoon {
    payout_multiplier: f64,
}

impl Default for Tycoon {
    fn default() -> Self {
        Self {
            payout_multiplier: 1.9,
        }
    }
}

impl Tycoon {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Bot policy: buy whenever the purchase is affordable.
pub fn buy_if_affordable(legal: &[TycoonAction]) -> Option<TycoonAction> {
    [TycoonAction::Roll, TycoonAction::Buy, TycoonAction::Skip]
        .into_iter()
        .find(|a| legal.contains(a))
}

impl RulesEngine for Tycoon {
    type State = TycoonState;
    type Action = TycoonAction;

    fn name(&self) -> &'static str {
        "tycoon"
    }

    fn seat_count(&self) -> usize {
        2
    }

    fn new_state(&self, rng: GameRng) -> TycoonState {
        TycoonState {
            cash: SeatMap::with_value(2, STARTING_CASH),
            positions: SeatMap::with_value(2, 0),
            owners: FxHashMap::default(),
            phase: TycoonPhase::Rolling,
            to_move: SeatId::HUMAN,
            dice: None,
            doubles: 0,
            last_landing: None,
            rng,
        }
    }

    fn active_seat(&self, state: &TycoonState) -> Option<SeatId> {
        (state.phase != TycoonPhase::Finished).then_some(state.to_move)
    }

    fn legal_actions(&self, state: &TycoonState, seat: SeatId) -> Vec<TycoonAction> {
        if self.active_seat(state) != Some(seat) {
            return Vec::new();
        }
        match state.phase {
            TycoonPhase::Rolling => vec![TycoonAction::Roll],
            TycoonPhase::AwaitingDecision => {
                let affordable = BOARD[state.positions[seat]]
                    .price()
                    .is_some_and(|price| state.cash[seat] >= price);
                if affordable {
                    vec![TycoonAction::Buy, TycoonAction::Skip]
                } else {
                    vec![TycoonAction::Skip]
                }
            }
            TycoonPhase::Finished => Vec::new(),
        }
    }

    fn apply_action(&self, state: &mut TycoonState, seat: SeatId, action: &TycoonAction) -> bool {
        if !self.is_legal(state, seat, action) {
            return false;
        }
        match action {
            TycoonAction::Roll => {
                let dice = (state.rng.roll_die(), state.rng.roll_die());
                state.dice = Some(dice);
                if dice.0 == dice.1 {
                    state.doubles += 1;
                }
                state.advance(seat, (dice.0 + dice.1) as usize);

                let landing = state.resolve_landing(seat);
                tracing::debug!(%seat, ?dice, position = state.positions[seat], ?landing, "tycoon move");
                state.last_landing = Some(landing);

                match landing {
                    Landing::Offer { .. } => state.phase = TycoonPhase::AwaitingDecision,
                    Landing::SentToJail => state.end_turn(false),
                    _ => state.end_turn(true),
                }
            }
            TycoonAction::Buy => {
                let pos = state.positions[seat];
                if let Some(price) = BOARD[pos].price() {
                    state.cash[seat] -= price;
                    state.owners.insert(pos, seat);
                }
                state.end_turn(true);
            }
            TycoonAction::Skip => state.end_turn(true),
        }
        state.check_bankruptcy();
        true
    }

    fn bot_action(
        &self,
        _state: &TycoonState,
        _seat: SeatId,
        legal: &[TycoonAction],
        _rng: &mut GameRng,
    ) -> Option<TycoonAction> {
        buy_if_affordable(legal)
    }

    fn is_terminal(&self, state: &TycoonState) -> Option<GameResult> {
        if state.phase != TycoonPhase::Finished {
            return None;
        }
        state
            .bankrupt_seat()
            .map(|loser| GameResult::Winner(loser.next(state.cash.seat_count())))
    }

    fn win_payout(&self, _state: &TycoonState, stake: f64) -> f64 {
        stake * self.payout_multiplier
    }

    fn animation(&self, state: &TycoonState, _seat: SeatId, action: &TycoonAction) -> Option<Step> {
        match (action, state.dice) {
            (TycoonAction::Roll, Some((a, b))) => Some(Step::repeated(StepKind::PieceStep, u32::from(a + b))),
            _ => None,
        }
    }
}
