//! Card-shedding rules.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::rules::{effect_of, is_playable, Effect};
use crate::cards::{Card, Deck, Suit};
use crate::core::{GameRng, SeatId, SeatMap};
use crate::rules::{GameResult, RulesEngine, Step, StepKind};

const HAND_SIZE: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SheddingAction {
    Play(Card),
    /// Draw the pending penalty, or one card, and pass the turn.
    Draw,
    /// Name the suit after playing the wild rank.
    Wish(Suit),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SheddingPhase {
    Matchmaking,
    Playing,
    /// The seat to move just played the wild rank and must name a suit.
    AwaitingWish,
    /// The human's turn timer ran out.
    TimedOut,
    Finished,
}

#[derive(Clone, Debug)]
pub struct SheddingState {
    pub hands: SeatMap<Vec<Card>>,
    pub draw_pile: Deck,
    /// Played cards; the last one is the top card.
    pub discard: Vec<Card>,
    pub phase: SheddingPhase,
    pub to_move: SeatId,
    /// Cards the next drawing seat must take.
    pub penalty: u32,
    pub wish: Option<Suit>,
    /// Human decision time left this turn.
    pub time_left: Duration,
    rng: GameRng,
}

impl SheddingState {
    #[must_use]
    pub fn top_card(&self) -> Option<Card> {
        self.discard.last().copied()
    }

    #[must_use]
    pub fn is_playable(&self, card: Card) -> bool {
        self.top_card()
            .is_some_and(|top| is_playable(card, top, self.wish, self.penalty))
    }

    /// Draw up to `n` cards for `seat`, reshuffling the discard pile (minus
    /// its top card) into the draw pile when it runs short. Returns how many
    /// cards were actually drawn.
    fn draw_cards(&mut self, seat: SeatId, n: usize) -> usize {
        if self.draw_pile.len() < n && self.discard.len() > 1 {
            let top = self.discard.pop();
            let used = std::mem::take(&mut self.discard);
            tracing::debug!(cards = used.len(), "reshuffling discard pile");
            self.draw_pile.replenish(used, &mut self.rng);
            self.discard.extend(top);
        }
        let count = n.min(self.draw_pile.len());
        let drawn = self.draw_pile.draw(count).unwrap_or_default();
        self.hands[seat].extend(drawn);
        count
    }

    fn start_turn(&mut self, seat: SeatId, full_time: Duration) {
        self.to_move = seat;
        self.phase = SheddingPhase::Playing;
        self.time_left = full_time;
    }
}

/// Two-seat Mau Mau with a 32-card deck.
///
/// Sevens make the next seat draw two (stacking), eights and aces give the
/// same seat another turn, and jacks are wild.
#[derive(Clone, Debug)]
pub struct Shedding {
    turn_timeout: Duration,
    payout_multiplier: f64,
}

impl Default for Shedding {
    fn default() -> Self {
        Self {
            turn_timeout: Duration::from_secs(10),
            payout_multiplier: 1.9,
        }
    }
}

impl Shedding {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn turn_timeout(mut self, timeout: Duration) -> Self {
        assert!(!timeout.is_zero(), "Turn timeout must be positive");
        self.turn_timeout = timeout;
        self
    }
}

/// Bot policy: play the first playable card in hand order, name a random
/// suit after a wild, otherwise draw.
pub fn first_playable(legal: &[SheddingAction], rng: &mut GameRng) -> Option<SheddingAction> {
    if legal.iter().any(|a| matches!(a, SheddingAction::Wish(_))) {
        return rng.choose(&Suit::ALL).copied().map(SheddingAction::Wish);
    }
    legal
        .iter()
        .copied()
        .find(|a| matches!(a, SheddingAction::Play(_)))
        .or_else(|| legal.contains(&SheddingAction::Draw).then_some(SheddingAction::Draw))
}

impl RulesEngine for Shedding {
    type State = SheddingState;
    type Action = SheddingAction;

    fn name(&self) -> &'static str {
        "shedding"
    }

    fn seat_count(&self) -> usize {
        2
    }

    fn new_state(&self, mut rng: GameRng) -> SheddingState {
        let draw_pile = Deck::reduced(&mut rng);
        SheddingState {
            hands: SeatMap::with_default(2),
            draw_pile,
            discard: Vec::new(),
            phase: SheddingPhase::Matchmaking,
            to_move: SeatId::HUMAN,
            penalty: 0,
            wish: None,
            time_left: self.turn_timeout,
            rng,
        }
    }

    fn active_seat(&self, state: &SheddingState) -> Option<SeatId> {
        matches!(state.phase, SheddingPhase::Playing | SheddingPhase::AwaitingWish).then_some(state.to_move)
    }

    fn legal_actions(&self, state: &SheddingState, seat: SeatId) -> Vec<SheddingAction> {
        if self.active_seat(state) != Some(seat) {
            return Vec::new();
        }
        if state.phase == SheddingPhase::AwaitingWish {
            return Suit::ALL.into_iter().map(SheddingAction::Wish).collect();
        }
        let mut actions: Vec<_> = state.hands[seat]
            .iter()
            .copied()
            .filter(|&card| state.is_playable(card))
            .map(SheddingAction::Play)
            .collect();
        actions.push(SheddingAction::Draw);
        actions
    }

    fn apply_action(&self, state: &mut SheddingState, seat: SeatId, action: &SheddingAction) -> bool {
        if self.active_seat(state) != Some(seat) {
            return false;
        }
        let other = seat.next(2);

        match (*action, state.phase) {
            (SheddingAction::Wish(suit), SheddingPhase::AwaitingWish) => {
                state.wish = Some(suit);
                state.start_turn(other, self.turn_timeout);
            }
            (SheddingAction::Play(card), SheddingPhase::Playing) => {
                let Some(index) = state.hands[seat].iter().position(|&c| c == card) else {
                    return false;
                };
                if !state.is_playable(card) {
                    return false;
                }
                state.hands[seat].remove(index);
                state.discard.push(card);
                state.wish = None;

                if state.hands[seat].is_empty() {
                    debug_assert!(!state.hands[other].is_empty(), "both hands empty");
                    state.phase = SheddingPhase::Finished;
                    return true;
                }
                match effect_of(card.rank) {
                    Effect::None => state.start_turn(other, self.turn_timeout),
                    Effect::DrawTwo => {
                        state.penalty += 2;
                        state.start_turn(other, self.turn_timeout);
                    }
                    Effect::Repeat => state.start_turn(seat, self.turn_timeout),
                    Effect::Wish => {
                        state.phase = SheddingPhase::AwaitingWish;
                        state.time_left = self.turn_timeout;
                    }
                }
            }
            (SheddingAction::Draw, SheddingPhase::Playing) => {
                let owed = if state.penalty > 0 { state.penalty as usize } else { 1 };
                let drawn = state.draw_cards(seat, owed);
                if drawn < owed {
                    tracing::debug!(%seat, owed, drawn, "draw pile short");
                }
                state.penalty = 0;
                state.start_turn(other, self.turn_timeout);
            }
            _ => return false,
        }
        true
    }

    fn bot_action(
        &self,
        _state: &SheddingState,
        _seat: SeatId,
        legal: &[SheddingAction],
        rng: &mut GameRng,
    ) -> Option<SheddingAction> {
        first_playable(legal, rng)
    }

    fn is_terminal(&self, state: &SheddingState) -> Option<GameResult> {
        match state.phase {
            SheddingPhase::TimedOut => Some(GameResult::Forfeit(SeatId::HUMAN)),
            SheddingPhase::Finished => state
                .hands
                .iter()
                .find(|(_, hand)| hand.is_empty())
                .map(|(seat, _)| GameResult::Winner(seat)),
            _ => None,
        }
    }

    fn win_payout(&self, _state: &SheddingState, stake: f64) -> f64 {
        stake * self.payout_multiplier
    }

    fn pending_step(&self, state: &SheddingState) -> Option<Step> {
        (state.phase == SheddingPhase::Matchmaking).then_some(Step::once(StepKind::Matchmaking))
    }

    fn run_step(&self, state: &mut SheddingState) {
        if state.phase != SheddingPhase::Matchmaking {
            return;
        }
        for seat in SeatId::all(2) {
            state.draw_cards(seat, HAND_SIZE);
        }
        state.discard.extend(state.draw_pile.draw_one());
        state.start_turn(SeatId::HUMAN, self.turn_timeout);
    }

    fn elapse(&self, state: &mut SheddingState, elapsed: Duration) {
        if self.active_seat(state) != Some(SeatId::HUMAN) {
            return;
        }
        state.time_left = state.time_left.saturating_sub(elapsed);
        if state.time_left.is_zero() {
            tracing::info!("shedding turn timer expired");
            state.phase = SheddingPhase::TimedOut;
        }
    }
}
