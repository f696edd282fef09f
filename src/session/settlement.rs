//! Terminal outcomes and settlement.
//!
//! A session produces exactly one `Outcome`. Settlement applies it to the
//! human's balance exactly once, either directly or, for claim-routed games,
//! after an external payout authorization succeeds.

use serde::{Deserialize, Serialize};

use super::wallet::round_amount;
use crate::core::{Diagnostics, SeatId};
use crate::rules::GameResult;

/// How the session ended for the human.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutcomeKind {
    Win,
    Loss,
    Draw,
    /// The human's turn timer ran out. Pays nothing, like a loss.
    TimedOut,
}

/// The single terminal record of a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub kind: OutcomeKind,
    pub result: GameResult,
    pub stake: f64,
    /// Amount credited to the human (zero unless `kind` is `Win`).
    pub payout: f64,
    /// True when the diagnostic override decided or priced the outcome.
    pub forced: bool,
}

impl Outcome {
    /// Map a game result to the human's outcome.
    ///
    /// An armed override turns a loss or draw into a win and replaces the
    /// payout figure. Timeout forfeits are never overridden.
    #[must_use]
    pub fn resolve(result: GameResult, stake: f64, win_payout: f64, diagnostics: &Diagnostics) -> Self {
        let forced_payout = diagnostics.active().map(|o| o.payout);

        let (kind, forced) = match &result {
            GameResult::Forfeit(seat) if seat.is_human() => (OutcomeKind::TimedOut, false),
            GameResult::Forfeit(_) => (OutcomeKind::Win, false),
            GameResult::Winner(seat) if *seat == SeatId::HUMAN => (OutcomeKind::Win, false),
            GameResult::Winner(_) if diagnostics.forces_win() => (OutcomeKind::Win, true),
            GameResult::Winner(_) => (OutcomeKind::Loss, false),
            GameResult::Draw if diagnostics.forces_win() => (OutcomeKind::Win, true),
            GameResult::Draw => (OutcomeKind::Draw, false),
        };

        let (payout, forced) = match (kind, forced_payout) {
            (OutcomeKind::Win, Some(amount)) => (amount, true),
            (OutcomeKind::Win, None) => (win_payout, forced),
            _ => (0.0, forced),
        };

        Self {
            kind,
            result,
            stake,
            payout: round_amount(payout),
            forced,
        }
    }

    #[must_use]
    pub fn is_win(&self) -> bool {
        self.kind == OutcomeKind::Win
    }

    /// Net change to the human's balance over the whole session.
    #[must_use]
    pub fn net(&self) -> f64 {
        round_amount(self.payout - self.stake)
    }
}

/// External payout authorization, used by claim-routed games.
pub trait PayoutAuthority {
    /// Authorize paying `amount` to the human. `Err` carries the decline reason.
    fn authorize(&mut self, amount: f64) -> Result<(), String>;
}

/// Where a session stands with respect to settlement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SessionStatus {
    /// The game is still running.
    InPlay,
    /// The human won a claim-routed game and must claim the payout.
    AwaitingClaim { outcome: Outcome, failed_attempts: u32 },
    /// Settlement has been applied.
    Settled(Outcome),
    /// Torn down before settlement.
    Abandoned,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DiagnosticOverride;

    fn armed(payout: f64) -> Diagnostics {
        let mut diagnostics = Diagnostics::default();
        diagnostics.initialize(DiagnosticOverride::forced_win(payout)).unwrap();
        diagnostics
    }

    #[test]
    fn test_human_win() {
        let outcome = Outcome::resolve(GameResult::Winner(SeatId::HUMAN), 1.0, 1.95, &Diagnostics::default());
        assert_eq!(outcome.kind, OutcomeKind::Win);
        assert_eq!(outcome.payout, 1.95);
        assert_eq!(outcome.net(), 0.95);
        assert!(!outcome.forced);
    }

    #[test]
    fn test_bot_win_is_loss() {
        let outcome = Outcome::resolve(GameResult::Winner(SeatId::new(1)), 1.0, 1.95, &Diagnostics::default());
        assert_eq!(outcome.kind, OutcomeKind::Loss);
        assert_eq!(outcome.payout, 0.0);
    }

    #[test]
    fn test_timeout_is_distinct_from_loss() {
        let outcome = Outcome::resolve(GameResult::Forfeit(SeatId::HUMAN), 2.0, 3.8, &armed(9.0));
        assert_eq!(outcome.kind, OutcomeKind::TimedOut);
        assert_eq!(outcome.payout, 0.0);
        assert_eq!(outcome.net(), -2.0);
    }

    #[test]
    fn test_override_turns_loss_into_win() {
        let outcome = Outcome::resolve(GameResult::Winner(SeatId::new(2)), 1.0, 3.8, &armed(30.0));
        assert_eq!(outcome.kind, OutcomeKind::Win);
        assert_eq!(outcome.payout, 30.0);
        assert!(outcome.forced);
    }

    #[test]
    fn test_override_prices_natural_win() {
        let outcome = Outcome::resolve(GameResult::Winner(SeatId::HUMAN), 1.0, 1.9, &armed(25.4));
        assert_eq!(outcome.payout, 25.4);
        assert!(outcome.forced);
    }

    #[test]
    fn test_draw_pays_nothing() {
        let outcome = Outcome::resolve(GameResult::Draw, 1.0, 1.95, &Diagnostics::default());
        assert_eq!(outcome.kind, OutcomeKind::Draw);
        assert_eq!(outcome.payout, 0.0);
    }

    #[test]
    fn test_outcome_serde() {
        let outcome = Outcome::resolve(GameResult::Winner(SeatId::HUMAN), 1.0, 1.95, &Diagnostics::default());
        let json = serde_json::to_string(&outcome).unwrap();
        let back: Outcome = serde_json::from_str(&json).unwrap();
        assert_eq!(outcome, back);
    }
}
