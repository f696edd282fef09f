//! The wager session: stake escrow, turn driving, and settlement.
//!
//! A `WagerSession` owns one game state and drives it between human inputs:
//! bot turns and non-player steps run one at a time, each paced by the
//! scheduler, until the human must act or the game ends. When the game ends
//! the outcome is settled exactly once.
//!
//! ```
//! use wager_games::games::connect_four::ConnectFour;
//! use wager_games::session::{MemoryWallet, Pacing, WagerSession, Wallet};
//! use wager_games::SessionConfig;
//!
//! let mut wallet = MemoryWallet::new(5.0);
//! let config = SessionConfig::new(1).with_pacing(Pacing::instant());
//! let session = WagerSession::start(ConnectFour::new(), config, 1.0, &mut wallet).unwrap();
//!
//! assert_eq!(wallet.balance(), 4.0);
//! assert!(session.is_human_turn());
//! ```

use im::Vector;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::schedule::Scheduler;
use super::settlement::{Outcome, OutcomeKind, PayoutAuthority, SessionStatus};
use super::wallet::Wallet;
use crate::core::{ActionRecord, Diagnostics, EngineError, GameRng, SeatId, SessionConfig};
use crate::rules::{GameResult, RulesEngine, SettlementRoute, Step, StepKind};

/// One wagered game against bots.
#[derive(Debug)]
pub struct WagerSession<E: RulesEngine> {
    rules: E,
    state: E::State,
    stake: f64,
    diagnostics: Diagnostics,
    scheduler: Scheduler,
    bot_rng: GameRng,
    history: Vector<ActionRecord<E::Action>>,
    turn: u32,
    last_seat: Option<SeatId>,
    status: SessionStatus,
}

impl<E: RulesEngine> WagerSession<E> {
    /// Validate and escrow the stake, build the initial state, and run
    /// until the human is first asked to act.
    pub fn start<W: Wallet + ?Sized>(
        rules: E,
        config: SessionConfig,
        stake: f64,
        wallet: &mut W,
    ) -> Result<Self, EngineError> {
        if !stake.is_finite() || stake <= 0.0 {
            return Err(EngineError::InvalidStake { stake });
        }
        let balance = wallet.balance();
        if stake > balance {
            return Err(EngineError::InsufficientBalance { stake, balance });
        }
        wallet.adjust(-stake);

        let root = GameRng::new(config.seed);
        let mut state = rules.new_state(root.for_context("game"));
        if config.diagnostics.forces_win() {
            debug!(game = rules.name(), "diagnostic override armed");
            rules.force_human_win(&mut state);
        }

        info!(game = rules.name(), seed = config.seed, stake, "session started");

        let mut session = Self {
            rules,
            state,
            stake,
            diagnostics: config.diagnostics,
            scheduler: Scheduler::new(config.pacing),
            bot_rng: root.for_context("bots"),
            history: Vector::new(),
            turn: 0,
            last_seat: None,
            status: SessionStatus::InPlay,
        };
        session.drive(wallet)?;
        Ok(session)
    }

    /// Replace the scheduler (e.g. to pace with real sleeps).
    #[must_use]
    pub fn with_scheduler(mut self, scheduler: Scheduler) -> Self {
        self.scheduler = scheduler;
        self
    }

    /// Submit a human action.
    ///
    /// Returns `Ok(false)` when it is not the human's turn or the action is
    /// illegal; nothing changes in that case.
    pub fn act<W: Wallet + ?Sized>(&mut self, action: E::Action, wallet: &mut W) -> Result<bool, EngineError> {
        self.ensure_in_play()?;
        if !self.is_human_turn() {
            debug!(game = self.rules.name(), ?action, "ignored action out of turn");
            return Ok(false);
        }
        if !self.apply(SeatId::HUMAN, action)? {
            return Ok(false);
        }
        self.drive(wallet)?;
        Ok(true)
    }

    /// Feed human decision time into turn countdowns, then keep driving.
    pub fn advance_time<W: Wallet + ?Sized>(&mut self, elapsed: Duration, wallet: &mut W) -> Result<(), EngineError> {
        self.ensure_in_play()?;
        self.rules.elapse(&mut self.state, elapsed);
        self.drive(wallet)
    }

    /// Claim the payout of a claim-routed win.
    ///
    /// The balance is credited only after `authority` approves. A declined
    /// claim leaves the session awaiting claim so it can be retried.
    pub fn claim<A, W>(&mut self, authority: &mut A, wallet: &mut W) -> Result<f64, EngineError>
    where
        A: PayoutAuthority + ?Sized,
        W: Wallet + ?Sized,
    {
        let (outcome, failed_attempts) = match &mut self.status {
            SessionStatus::AwaitingClaim { outcome, failed_attempts } => (outcome.clone(), failed_attempts),
            SessionStatus::Abandoned => return Err(EngineError::SessionClosed),
            SessionStatus::InPlay | SessionStatus::Settled(_) => return Err(EngineError::NothingToClaim),
        };

        match authority.authorize(outcome.payout) {
            Ok(()) => {
                wallet.adjust(outcome.payout);
                info!(game = self.rules.name(), payout = outcome.payout, "payout claimed");
                let payout = outcome.payout;
                self.status = SessionStatus::Settled(outcome);
                Ok(payout)
            }
            Err(reason) => {
                *failed_attempts += 1;
                warn!(
                    game = self.rules.name(),
                    payout = outcome.payout,
                    attempts = *failed_attempts,
                    %reason,
                    "payout claim declined"
                );
                Err(EngineError::PayoutDeclined {
                    amount: outcome.payout,
                    reason,
                })
            }
        }
    }

    /// Tear the session down. Pending steps are cancelled and no settlement
    /// happens for a game still in play.
    pub fn abandon(&mut self) {
        self.scheduler.cancel();
        if self.status == SessionStatus::InPlay {
            warn!(game = self.rules.name(), "session abandoned");
            self.status = SessionStatus::Abandoned;
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn rules(&self) -> &E {
        &self.rules
    }

    #[must_use]
    pub fn state(&self) -> &E::State {
        &self.state
    }

    #[must_use]
    pub fn stake(&self) -> f64 {
        self.stake
    }

    #[must_use]
    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    /// The terminal outcome, once the game has ended.
    #[must_use]
    pub fn outcome(&self) -> Option<&Outcome> {
        match &self.status {
            SessionStatus::AwaitingClaim { outcome, .. } | SessionStatus::Settled(outcome) => Some(outcome),
            SessionStatus::InPlay | SessionStatus::Abandoned => None,
        }
    }

    /// Every action applied so far, in order.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord<E::Action>> {
        &self.history
    }

    /// Turn counter: increments each time a different seat acts.
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    #[must_use]
    pub fn is_human_turn(&self) -> bool {
        self.status == SessionStatus::InPlay && self.rules.active_seat(&self.state) == Some(SeatId::HUMAN)
    }

    /// Legal actions for the human right now.
    #[must_use]
    pub fn legal_actions(&self) -> Vec<E::Action> {
        if self.is_human_turn() {
            self.rules.legal_actions(&self.state, SeatId::HUMAN)
        } else {
            Vec::new()
        }
    }

    // === Driving ===

    fn ensure_in_play(&self) -> Result<(), EngineError> {
        match self.status {
            SessionStatus::InPlay => Ok(()),
            _ => Err(EngineError::SessionClosed),
        }
    }

    /// Run non-player work until the human must act or the game ends.
    fn drive<W: Wallet + ?Sized>(&mut self, wallet: &mut W) -> Result<(), EngineError> {
        loop {
            if let Some(result) = self.rules.is_terminal(&self.state) {
                self.settle(result, wallet);
                return Ok(());
            }

            if let Some(step) = self.rules.pending_step(&self.state) {
                self.scheduler.pace(step)?;
                debug!(game = self.rules.name(), kind = ?step.kind, "running step");
                self.rules.run_step(&mut self.state);
                continue;
            }

            match self.rules.active_seat(&self.state) {
                Some(seat) if !seat.is_human() => {
                    self.scheduler.pace(Step::once(StepKind::BotThink))?;
                    let Some(action) = self.rules.bot_turn(&self.state, seat, &mut self.bot_rng) else {
                        warn!(game = self.rules.name(), %seat, "bot has no action");
                        return Ok(());
                    };
                    if !self.apply(seat, action)? {
                        warn!(game = self.rules.name(), %seat, "bot chose an illegal action");
                        return Ok(());
                    }
                }
                // Human to act, or waiting on a countdown.
                _ => return Ok(()),
            }
        }
    }

    fn apply(&mut self, seat: SeatId, action: E::Action) -> Result<bool, EngineError> {
        if !self.rules.apply_action(&mut self.state, seat, &action) {
            debug!(game = self.rules.name(), %seat, ?action, "rejected illegal action");
            return Ok(false);
        }

        if self.last_seat != Some(seat) {
            self.turn += 1;
            self.last_seat = Some(seat);
        }
        let sequence = self.history.len() as u32;
        debug!(game = self.rules.name(), %seat, ?action, turn = self.turn, "applied action");
        self.history
            .push_back(ActionRecord::new(seat, action.clone(), self.turn, sequence));

        if let Some(step) = self.rules.animation(&self.state, seat, &action) {
            self.scheduler.pace(step)?;
        }
        Ok(true)
    }

    fn settle<W: Wallet + ?Sized>(&mut self, result: GameResult, wallet: &mut W) {
        let win_payout = self.rules.win_payout(&self.state, self.stake);
        let outcome = Outcome::resolve(result, self.stake, win_payout, &self.diagnostics);
        info!(
            game = self.rules.name(),
            kind = ?outcome.kind,
            payout = outcome.payout,
            forced = outcome.forced,
            "session finished"
        );

        self.status = match self.rules.settlement_route() {
            SettlementRoute::Claim if outcome.kind == OutcomeKind::Win && outcome.payout > 0.0 => {
                SessionStatus::AwaitingClaim {
                    outcome,
                    failed_attempts: 0,
                }
            }
            SettlementRoute::Claim => SessionStatus::Settled(outcome),
            SettlementRoute::Direct => {
                wallet.adjust(outcome.payout);
                SessionStatus::Settled(outcome)
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DiagnosticOverride;
    use crate::session::{MemoryWallet, Pacing};

    /// Two seats take turns adding to a counter; whoever reaches 3 wins.
    #[derive(Clone, Debug)]
    struct Counter {
        route: SettlementRoute,
    }

    #[derive(Clone, Debug)]
    struct CounterState {
        value: u8,
        to_move: SeatId,
        winner: Option<SeatId>,
    }

    impl RulesEngine for Counter {
        type State = CounterState;
        type Action = u8;

        fn name(&self) -> &'static str {
            "counter"
        }

        fn seat_count(&self) -> usize {
            2
        }

        fn new_state(&self, _rng: GameRng) -> CounterState {
            CounterState {
                value: 0,
                to_move: SeatId::HUMAN,
                winner: None,
            }
        }

        fn active_seat(&self, state: &CounterState) -> Option<SeatId> {
            state.winner.is_none().then_some(state.to_move)
        }

        fn legal_actions(&self, state: &CounterState, seat: SeatId) -> Vec<u8> {
            if self.active_seat(state) == Some(seat) {
                vec![1, 2]
            } else {
                Vec::new()
            }
        }

        fn apply_action(&self, state: &mut CounterState, seat: SeatId, action: &u8) -> bool {
            if !self.is_legal(state, seat, action) {
                return false;
            }
            state.value += action;
            if state.value >= 3 {
                state.winner = Some(seat);
            }
            state.to_move = seat.next(2);
            true
        }

        fn bot_action(&self, _: &CounterState, _: SeatId, legal: &[u8], _: &mut GameRng) -> Option<u8> {
            legal.last().copied()
        }

        fn is_terminal(&self, state: &CounterState) -> Option<GameResult> {
            state.winner.map(GameResult::Winner)
        }

        fn win_payout(&self, _: &CounterState, stake: f64) -> f64 {
            stake * 2.0
        }

        fn settlement_route(&self) -> SettlementRoute {
            self.route
        }
    }

    struct Authority {
        declines: u32,
    }

    impl PayoutAuthority for Authority {
        fn authorize(&mut self, _amount: f64) -> Result<(), String> {
            if self.declines > 0 {
                self.declines -= 1;
                Err("network down".to_string())
            } else {
                Ok(())
            }
        }
    }

    fn config() -> SessionConfig {
        SessionConfig::new(3).with_pacing(Pacing::instant())
    }

    fn counter() -> Counter {
        Counter {
            route: SettlementRoute::Direct,
        }
    }

    #[test]
    fn test_start_rejects_bad_stakes() {
        let mut wallet = MemoryWallet::new(1.0);
        let err = WagerSession::start(counter(), config(), 0.0, &mut wallet).unwrap_err();
        assert_eq!(err, EngineError::InvalidStake { stake: 0.0 });

        let err = WagerSession::start(counter(), config(), 2.0, &mut wallet).unwrap_err();
        assert_eq!(err, EngineError::InsufficientBalance { stake: 2.0, balance: 1.0 });
        assert!(wallet.adjustments().is_empty());
    }

    #[test]
    fn test_bot_turns_run_between_human_actions() {
        let mut wallet = MemoryWallet::new(5.0);
        let mut session = WagerSession::start(counter(), config(), 1.0, &mut wallet).unwrap();
        assert!(session.is_human_turn());

        // Human adds 1, bot adds 2 and wins.
        assert!(session.act(1, &mut wallet).unwrap());
        let outcome = session.outcome().unwrap();
        assert_eq!(outcome.kind, OutcomeKind::Loss);
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.turn(), 2);
        assert_eq!(wallet.adjustments(), &[-1.0, 0.0]);
        assert_eq!(wallet.balance(), 4.0);
    }

    #[test]
    fn test_illegal_action_is_ignored() {
        let mut wallet = MemoryWallet::new(5.0);
        let mut session = WagerSession::start(counter(), config(), 1.0, &mut wallet).unwrap();

        assert!(!session.act(7, &mut wallet).unwrap());
        assert!(session.history().is_empty());
        assert!(session.is_human_turn());
    }

    #[test]
    fn test_settled_session_is_closed() {
        let mut wallet = MemoryWallet::new(5.0);
        let mut session = WagerSession::start(counter(), config(), 1.0, &mut wallet).unwrap();
        session.act(1, &mut wallet).unwrap();

        assert_eq!(session.act(1, &mut wallet), Err(EngineError::SessionClosed));
        assert_eq!(wallet.adjustments().len(), 2);
    }

    #[test]
    fn test_forced_override_pays_override_amount() {
        let config = config().with_diagnostic(DiagnosticOverride::forced_win(25.4)).unwrap();
        let mut wallet = MemoryWallet::new(5.0);
        let mut session = WagerSession::start(counter(), config, 1.0, &mut wallet).unwrap();
        session.act(1, &mut wallet).unwrap();

        let outcome = session.outcome().unwrap();
        assert_eq!(outcome.kind, OutcomeKind::Win);
        assert!(outcome.forced);
        assert_eq!(wallet.balance(), 29.4);
    }

    #[test]
    fn test_claim_retries_after_decline() {
        let rules = Counter {
            route: SettlementRoute::Claim,
        };
        let mut wallet = MemoryWallet::new(5.0);
        let mut session = WagerSession::start(rules, config(), 1.0, &mut wallet).unwrap();
        // Human adds 2, bot adds 2 and wins.
        session.act(2, &mut wallet).unwrap();
        assert_eq!(session.outcome().unwrap().kind, OutcomeKind::Loss);
        assert_eq!(session.claim(&mut Authority { declines: 0 }, &mut wallet), Err(EngineError::NothingToClaim));

        let rules = Counter {
            route: SettlementRoute::Claim,
        };
        let config = config().with_diagnostic(DiagnosticOverride::forced_win(2.0)).unwrap();
        let mut wallet = MemoryWallet::new(5.0);
        let mut session = WagerSession::start(rules, config, 1.0, &mut wallet).unwrap();
        session.act(1, &mut wallet).unwrap();
        assert!(matches!(session.status(), SessionStatus::AwaitingClaim { .. }));
        assert_eq!(wallet.balance(), 4.0);

        let mut authority = Authority { declines: 1 };
        let err = session.claim(&mut authority, &mut wallet).unwrap_err();
        assert!(matches!(err, EngineError::PayoutDeclined { .. }));
        assert!(matches!(
            session.status(),
            SessionStatus::AwaitingClaim { failed_attempts: 1, .. }
        ));
        assert_eq!(wallet.balance(), 4.0);

        assert_eq!(session.claim(&mut authority, &mut wallet), Ok(2.0));
        assert_eq!(wallet.balance(), 6.0);
        assert_eq!(session.claim(&mut authority, &mut wallet), Err(EngineError::NothingToClaim));
    }

    #[test]
    fn test_abandon_stops_everything() {
        let mut wallet = MemoryWallet::new(5.0);
        let mut session = WagerSession::start(counter(), config(), 1.0, &mut wallet).unwrap();
        session.abandon();

        assert_eq!(session.status(), &SessionStatus::Abandoned);
        assert!(session.scheduler().is_cancelled());
        assert_eq!(session.act(1, &mut wallet), Err(EngineError::SessionClosed));
        assert_eq!(wallet.adjustments(), &[-1.0]);
    }
}
