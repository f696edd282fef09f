//! Elimination market rules.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::core::{GameRng, SeatId, SeatMap};
use crate::rules::{GameResult, RulesEngine, SettlementRoute, Step, StepKind};

/// Price series shown when the lobby opens.
pub const OPENING_PRICES: [f64; 8] = [122.56, 123.10, 122.80, 123.50, 123.20, 124.10, 123.90, 124.50];
/// Absolute price move per round.
pub const PRICE_STEP: f64 = 0.85;
/// Number of recent prices kept.
pub const PRICE_WINDOW: usize = 16;

/// A binary call on the next price move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Prediction {
    Up,
    Down,
}

impl Prediction {
    pub const ALL: [Prediction; 2] = [Prediction::Up, Prediction::Down];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketPhase {
    /// Waiting for the table to fill.
    Lobby,
    /// Taking the human's prediction while the countdown runs.
    Open,
    /// Predictions are in; the price move is next.
    Locked,
    /// The price has moved; eliminations are next.
    Moving,
    Finished,
}

#[derive(Clone, Debug)]
pub struct MarketState {
    pub alive: SeatMap<bool>,
    pub votes: SeatMap<Option<Prediction>>,
    pub phase: MarketPhase,
    pub round: u32,
    pub countdown: Duration,
    pub prices: Vec<f64>,
    pub last_move: Option<Prediction>,
    /// Seats eliminated in the most recent round.
    pub last_out: Vec<SeatId>,
    /// Outcomes follow the human and the table is cleared after one round.
    pub forced: bool,
    rng: GameRng,
}

impl MarketState {
    #[must_use]
    pub fn survivors(&self) -> Vec<SeatId> {
        self.alive.iter().filter(|(_, alive)| **alive).map(|(seat, _)| seat).collect()
    }

    #[must_use]
    pub fn price(&self) -> f64 {
        self.prices.last().copied().unwrap_or(OPENING_PRICES[OPENING_PRICES.len() - 1])
    }

    fn open_round(&mut self, countdown: Duration) {
        self.phase = MarketPhase::Open;
        self.round += 1;
        self.countdown = countdown;
        for (_, vote) in self.votes.iter_mut() {
            *vote = None;
        }
    }

    /// Move the price once every vote is in.
    fn lock(&mut self) {
        let human_vote = self.votes[SeatId::HUMAN];
        let movement = match (self.forced, human_vote) {
            (true, Some(vote)) => vote,
            _ => random_prediction(&mut self.rng),
        };

        let delta = match movement {
            Prediction::Up => PRICE_STEP,
            Prediction::Down => -PRICE_STEP,
        };
        let next = ((self.price() + delta) * 100.0).round() / 100.0;
        self.prices.push(next);
        if self.prices.len() > PRICE_WINDOW {
            let excess = self.prices.len() - PRICE_WINDOW;
            self.prices.drain(..excess);
        }
        self.last_move = Some(movement);
        self.phase = MarketPhase::Moving;
    }

    /// Eliminate every seat that called it wrong. A missing vote is wrong.
    fn eliminate(&mut self) {
        let movement = self.last_move;
        self.last_out.clear();
        for (seat, alive) in self.alive.iter_mut() {
            if *alive && self.votes[seat] != movement {
                *alive = false;
                self.last_out.push(seat);
            }
        }
        if self.forced {
            for (seat, alive) in self.alive.iter_mut() {
                *alive = seat.is_human();
            }
        }
        tracing::debug!(round = self.round, ?movement, survivors = self.survivors().len(), "market round resolved");
    }

    fn is_decided(&self) -> bool {
        !self.alive[SeatId::HUMAN] || self.survivors().len() <= 1
    }
}

/// Uniform up/down call.
pub fn random_prediction(rng: &mut GameRng) -> Prediction {
    if rng.gen_bool(0.5) {
        Prediction::Up
    } else {
        Prediction::Down
    }
}

/// Ten-seat elimination game over a synthetic price.
#[derive(Clone, Debug)]
pub struct Market {
    seats: usize,
    round_time: Duration,
    rake: f64,
}

impl Default for Market {
    fn default() -> Self {
        Self {
            seats: 10,
            round_time: Duration::from_secs(5),
            rake: 0.05,
        }
    }
}

impl Market {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Entry fees of the whole table.
    #[must_use]
    pub fn pool(&self, stake: f64) -> f64 {
        stake * self.seats as f64
    }
}

impl RulesEngine for Market {
    type State = MarketState;
    type Action = Prediction;

    fn name(&self) -> &'static str {
        "market"
    }

    fn seat_count(&self) -> usize {
        self.seats
    }

    fn new_state(&self, rng: GameRng) -> MarketState {
        MarketState {
            alive: SeatMap::with_value(self.seats, true),
            votes: SeatMap::with_default(self.seats),
            phase: MarketPhase::Lobby,
            round: 0,
            countdown: self.round_time,
            prices: OPENING_PRICES.to_vec(),
            last_move: None,
            last_out: Vec::new(),
            forced: false,
            rng,
        }
    }

    fn active_seat(&self, state: &MarketState) -> Option<SeatId> {
        (state.phase == MarketPhase::Open).then_some(SeatId::HUMAN)
    }

    fn legal_actions(&self, state: &MarketState, seat: SeatId) -> Vec<Prediction> {
        if self.active_seat(state) == Some(seat) && state.votes[seat].is_none() {
            Prediction::ALL.to_vec()
        } else {
            Vec::new()
        }
    }

    fn apply_action(&self, state: &mut MarketState, seat: SeatId, action: &Prediction) -> bool {
        if !self.is_legal(state, seat, action) {
            return false;
        }
        state.votes[seat] = Some(*action);
        state.phase = MarketPhase::Locked;
        true
    }

    fn bot_action(
        &self,
        _state: &MarketState,
        _seat: SeatId,
        legal: &[Prediction],
        rng: &mut GameRng,
    ) -> Option<Prediction> {
        (!legal.is_empty()).then(|| random_prediction(rng))
    }

    fn is_terminal(&self, state: &MarketState) -> Option<GameResult> {
        if state.phase != MarketPhase::Finished {
            return None;
        }
        if state.alive[SeatId::HUMAN] {
            return Some(GameResult::Winner(SeatId::HUMAN));
        }
        // The human is out. If the whole table went out together, the first
        // bot knocked out in that round takes it.
        let winner = state
            .survivors()
            .into_iter()
            .chain(state.last_out.iter().copied())
            .find(|seat| !seat.is_human())
            .unwrap_or(SeatId::new(1));
        Some(GameResult::Winner(winner))
    }

    fn win_payout(&self, _state: &MarketState, stake: f64) -> f64 {
        self.pool(stake) * (1.0 - self.rake)
    }

    fn pending_step(&self, state: &MarketState) -> Option<Step> {
        match state.phase {
            MarketPhase::Lobby => Some(Step::once(StepKind::Matchmaking)),
            MarketPhase::Locked => Some(Step::once(StepKind::RoundLock)),
            MarketPhase::Moving => Some(Step::once(StepKind::RoundResolve)),
            MarketPhase::Open | MarketPhase::Finished => None,
        }
    }

    fn run_step(&self, state: &mut MarketState) {
        match state.phase {
            MarketPhase::Lobby => state.open_round(self.round_time),
            MarketPhase::Locked => {
                // Bots call when the round locks; the human's vote is already in.
                let mut rng = state.rng.clone();
                for seat in state.survivors().into_iter().filter(|s| !s.is_human()) {
                    let vote = self.bot_action(state, seat, &Prediction::ALL, &mut rng);
                    state.votes[seat] = vote;
                }
                state.rng = rng;
                state.lock();
            }
            MarketPhase::Moving => {
                state.eliminate();
                if state.is_decided() {
                    state.phase = MarketPhase::Finished;
                } else {
                    state.open_round(self.round_time);
                }
            }
            MarketPhase::Open | MarketPhase::Finished => {}
        }
    }

    fn elapse(&self, state: &mut MarketState, elapsed: Duration) {
        if state.phase != MarketPhase::Open {
            return;
        }
        state.countdown = state.countdown.saturating_sub(elapsed);
        if state.countdown.is_zero() {
            tracing::debug!(round = state.round, "market countdown expired");
            state.phase = MarketPhase::Locked;
        }
    }

    fn force_human_win(&self, state: &mut MarketState) {
        state.forced = true;
    }

    fn settlement_route(&self) -> SettlementRoute {
        SettlementRoute::Claim
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_game(seed: u64) -> (Market, MarketState) {
        let game = Market::new();
        let mut state = game.new_state(GameRng::new(seed));
        assert_eq!(game.pending_step(&state), Some(Step::once(StepKind::Matchmaking)));
        game.run_step(&mut state);
        (game, state)
    }

    /// Run lock and resolve for the current round.
    fn resolve(game: &Market, state: &mut MarketState) {
        assert_eq!(game.pending_step(state), Some(Step::once(StepKind::RoundLock)));
        game.run_step(state);
        assert_eq!(game.pending_step(state), Some(Step::once(StepKind::RoundResolve)));
        game.run_step(state);
    }

    #[test]
    fn test_lobby_opens_first_round() {
        let (game, state) = open_game(1);
        assert_eq!(state.phase, MarketPhase::Open);
        assert_eq!(state.round, 1);
        assert_eq!(state.survivors().len(), 10);
        assert_eq!(state.price(), 124.50);
        assert_eq!(game.active_seat(&state), Some(SeatId::HUMAN));
        assert_eq!(game.legal_actions(&state, SeatId::HUMAN), Prediction::ALL.to_vec());
        assert!(game.legal_actions(&state, SeatId::new(3)).is_empty());
    }

    #[test]
    fn test_wrong_calls_are_eliminated() {
        let (game, mut state) = open_game(2);
        assert!(game.apply_action(&mut state, SeatId::HUMAN, &Prediction::Up));
        game.run_step(&mut state);
        state.eliminate();

        let movement = state.last_move.unwrap();
        for seat in SeatId::all(10) {
            if state.alive[seat] {
                assert_eq!(state.votes[seat], Some(movement));
            }
        }
        assert_eq!(state.alive[SeatId::HUMAN], movement == Prediction::Up);
        let step = if movement == Prediction::Up { PRICE_STEP } else { -PRICE_STEP };
        assert!((state.price() - (124.50 + step)).abs() < 1e-9);
    }

    #[test]
    fn test_missed_vote_is_wrong() {
        let (game, mut state) = open_game(3);
        game.elapse(&mut state, Duration::from_secs(2));
        assert_eq!(state.phase, MarketPhase::Open);
        game.elapse(&mut state, Duration::from_secs(3));
        assert_eq!(state.phase, MarketPhase::Locked);
        resolve(&game, &mut state);

        assert!(!state.alive[SeatId::HUMAN]);
        assert_eq!(state.phase, MarketPhase::Finished);
        assert_ne!(game.is_terminal(&state), Some(GameResult::Winner(SeatId::HUMAN)));
    }

    #[test]
    fn test_forced_round_clears_table() {
        let (game, mut state) = open_game(4);
        game.force_human_win(&mut state);
        assert!(game.apply_action(&mut state, SeatId::HUMAN, &Prediction::Down));
        resolve(&game, &mut state);

        assert_eq!(state.last_move, Some(Prediction::Down));
        assert_eq!(state.survivors(), vec![SeatId::HUMAN]);
        assert_eq!(game.is_terminal(&state), Some(GameResult::Winner(SeatId::HUMAN)));
    }

    #[test]
    fn test_rounds_continue_while_contested() {
        let game = Market::new();
        for seed in 0..50 {
            let mut state = game.new_state(GameRng::new(seed));
            game.run_step(&mut state);
            let mut rounds = 0;
            while state.phase != MarketPhase::Finished {
                assert!(state.alive[SeatId::HUMAN]);
                assert!(game.apply_action(&mut state, SeatId::HUMAN, &Prediction::Up));
                resolve(&game, &mut state);
                rounds += 1;
                assert!(rounds < 100);
            }
            let result = game.is_terminal(&state).unwrap();
            if state.alive[SeatId::HUMAN] {
                assert_eq!(result, GameResult::Winner(SeatId::HUMAN));
                assert_eq!(state.survivors(), vec![SeatId::HUMAN]);
            }
        }
    }

    #[test]
    fn test_whole_table_out_is_a_loss() {
        let (game, mut state) = open_game(7);
        for seat in SeatId::all(10).skip(2) {
            state.alive[seat] = false;
        }
        state.votes[SeatId::HUMAN] = Some(Prediction::Up);
        state.votes[SeatId::new(1)] = Some(Prediction::Up);
        state.last_move = Some(Prediction::Down);
        state.phase = MarketPhase::Moving;

        game.run_step(&mut state);
        assert!(state.survivors().is_empty());
        assert_eq!(state.phase, MarketPhase::Finished);
        assert_eq!(game.is_terminal(&state), Some(GameResult::Winner(SeatId::new(1))));
    }

    #[test]
    fn test_bots_call_through_policy() {
        let game = Market::new();
        let mut rng = GameRng::new(12);
        let state = game.new_state(GameRng::new(0));
        let calls: Vec<_> = (0..40)
            .filter_map(|_| game.bot_action(&state, SeatId::new(4), &Prediction::ALL, &mut rng))
            .collect();
        assert_eq!(calls.len(), 40);
        assert!(calls.contains(&Prediction::Up));
        assert!(calls.contains(&Prediction::Down));
        assert_eq!(game.bot_action(&state, SeatId::new(4), &[], &mut rng), None);
    }

    #[test]
    fn test_price_window_is_bounded() {
        let (_, mut state) = open_game(5);
        for _ in 0..20 {
            state.lock();
        }
        assert_eq!(state.prices.len(), PRICE_WINDOW);
    }

    #[test]
    fn test_payout_and_route() {
        let game = Market::new();
        let state = game.new_state(GameRng::new(0));
        assert!((game.win_payout(&state, 1.0) - 9.5).abs() < 1e-9);
        assert_eq!(game.settlement_route(), SettlementRoute::Claim);
    }
}
