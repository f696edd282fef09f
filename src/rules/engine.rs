//! Rules engine trait for game implementations.
//!
//! Games implement `RulesEngine` to define their rules:
//! - What actions are legal
//! - How actions modify state
//! - Which non-player steps (dealing, reveals, round resolution) are pending
//! - Win/loss conditions and the payout owed to the human

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::time::Duration;

use crate::core::{GameRng, SeatId};

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(SeatId),
    /// No winner.
    Draw,
    /// The seat ran out its turn timer and forfeited.
    Forfeit(SeatId),
}

impl GameResult {
    /// Check if a seat won.
    #[must_use]
    pub fn is_winner(&self, seat: SeatId) -> bool {
        matches!(self, GameResult::Winner(s) if *s == seat)
    }
}

/// Kinds of paced steps. Pacing assigns each kind a delay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepKind {
    Matchmaking,
    Deal,
    Reveal,
    BotThink,
    DiceRoll,
    PieceStep,
    RoundLock,
    RoundResolve,
}

/// A paced step: `count` repetitions of one step kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub kind: StepKind,
    pub count: u32,
}

impl Step {
    #[must_use]
    pub const fn once(kind: StepKind) -> Self {
        Self { kind, count: 1 }
    }

    #[must_use]
    pub const fn repeated(kind: StepKind, count: u32) -> Self {
        Self { kind, count }
    }
}

/// How a human win is paid out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettlementRoute {
    /// Credit the balance callback directly.
    Direct,
    /// Wait for the human to claim; an external authorization must succeed first.
    Claim,
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_actions`: return empty if the seat can't act
/// - `apply_action`: return `false` and leave state untouched for illegal input
/// - `pending_step` / `run_step`: transitions nobody chooses; the session paces
///   each one before running it
/// - `is_terminal`: return `None` while the game continues
pub trait RulesEngine {
    type State: Clone + Debug;
    type Action: Clone + Debug + PartialEq;

    /// Short game name for logs.
    fn name(&self) -> &'static str;

    /// Number of seats at the table (fixed for the session).
    fn seat_count(&self) -> usize;

    /// Build the initial state. The state owns `rng` for its chance events.
    fn new_state(&self, rng: GameRng) -> Self::State;

    /// The seat expected to act, or `None` while a step is pending or the game is over.
    fn active_seat(&self, state: &Self::State) -> Option<SeatId>;

    /// Legal actions for a seat.
    fn legal_actions(&self, state: &Self::State, seat: SeatId) -> Vec<Self::Action>;

    /// Apply an action. Returns `false` (and changes nothing) if it is illegal.
    fn apply_action(&self, state: &mut Self::State, seat: SeatId, action: &Self::Action) -> bool;

    /// Pure bot decision: pick one action from `legal`.
    fn bot_action(
        &self,
        state: &Self::State,
        seat: SeatId,
        legal: &[Self::Action],
        rng: &mut GameRng,
    ) -> Option<Self::Action>;

    /// Check if the game is over.
    fn is_terminal(&self, state: &Self::State) -> Option<GameResult>;

    /// Amount paid to the human on a normal win.
    fn win_payout(&self, state: &Self::State, stake: f64) -> f64;

    /// Next non-player transition, if one is due.
    fn pending_step(&self, _state: &Self::State) -> Option<Step> {
        None
    }

    /// Run the pending non-player transition.
    fn run_step(&self, _state: &mut Self::State) {}

    /// Presentation pacing for an action that was just applied.
    fn animation(&self, _state: &Self::State, _seat: SeatId, _action: &Self::Action) -> Option<Step> {
        None
    }

    /// Advance turn-local countdowns by `elapsed` of human decision time.
    fn elapse(&self, _state: &mut Self::State, _elapsed: Duration) {}

    /// Diagnostic hook: resolve in the human's favour from inside the state machine.
    ///
    /// Games whose resolution step is internal (showdowns, market rounds)
    /// override this; the default leaves resolution to the session.
    fn force_human_win(&self, _state: &mut Self::State) {}

    /// How a human win is paid.
    fn settlement_route(&self) -> SettlementRoute {
        SettlementRoute::Direct
    }

    // === Convenience Methods ===

    /// Check whether an action is currently legal for a seat.
    fn is_legal(&self, state: &Self::State, seat: SeatId, action: &Self::Action) -> bool {
        self.legal_actions(state, seat).contains(action)
    }

    /// Ask the bot policy for a seat's next action.
    fn bot_turn(&self, state: &Self::State, seat: SeatId, rng: &mut GameRng) -> Option<Self::Action> {
        let legal = self.legal_actions(state, seat);
        if legal.is_empty() {
            return None;
        }
        self.bot_action(state, seat, &legal, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_result_is_winner() {
        let result = GameResult::Winner(SeatId::new(1));
        assert!(!result.is_winner(SeatId::new(0)));
        assert!(result.is_winner(SeatId::new(1)));

        assert!(!GameResult::Draw.is_winner(SeatId::new(0)));
        assert!(!GameResult::Forfeit(SeatId::new(0)).is_winner(SeatId::new(0)));
    }

    #[test]
    fn test_step_constructors() {
        assert_eq!(Step::once(StepKind::Deal).count, 1);
        assert_eq!(Step::repeated(StepKind::PieceStep, 4).count, 4);
    }
}
