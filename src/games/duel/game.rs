//! Heads-up card duel.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::hand::{evaluate, HandCategory};
use crate::cards::{Card, Deck};
use crate::core::{GameRng, SeatId};
use crate::rules::{GameResult, RulesEngine, Step, StepKind};

const BOT: SeatId = SeatId::new(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DuelPhase {
    Matchmaking,
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
    Folded,
}

impl DuelPhase {
    /// Betting phase that follows this one, if any.
    #[must_use]
    pub fn next(self) -> Option<DuelPhase> {
        match self {
            DuelPhase::Matchmaking => Some(DuelPhase::Preflop),
            DuelPhase::Preflop => Some(DuelPhase::Flop),
            DuelPhase::Flop => Some(DuelPhase::Turn),
            DuelPhase::Turn => Some(DuelPhase::River),
            DuelPhase::River => Some(DuelPhase::Showdown),
            DuelPhase::Showdown | DuelPhase::Folded => None,
        }
    }

    #[must_use]
    pub fn is_betting(self) -> bool {
        matches!(
            self,
            DuelPhase::Preflop | DuelPhase::Flop | DuelPhase::Turn | DuelPhase::River
        )
    }

    /// Shared cards revealed when entering this phase.
    fn reveals(self) -> usize {
        match self {
            DuelPhase::Flop => 3,
            DuelPhase::Turn | DuelPhase::River => 1,
            _ => 0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DuelAction {
    Fold,
    /// Advance to the next phase. Stakes are fixed at the ante.
    Call,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DuelState {
    pub deck: Deck,
    pub human_hole: SmallVec<[Card; 2]>,
    pub bot_hole: SmallVec<[Card; 2]>,
    pub community: SmallVec<[Card; 5]>,
    pub phase: DuelPhase,
    /// Every phase entered, in order.
    pub phase_log: SmallVec<[DuelPhase; 7]>,
    /// A call is waiting for the next cards to be dealt.
    pub dealing: bool,
    pub human_hand: Option<HandCategory>,
    pub bot_hand: Option<HandCategory>,
    pub forced: bool,
}

impl DuelState {
    /// Winner at showdown: strictly higher category wins, ties go to the bot.
    #[must_use]
    pub fn showdown_winner(&self) -> Option<SeatId> {
        if self.phase != DuelPhase::Showdown {
            return None;
        }
        if self.forced || self.human_hand > self.bot_hand {
            Some(SeatId::HUMAN)
        } else {
            Some(BOT)
        }
    }

    fn enter(&mut self, phase: DuelPhase) {
        self.phase = phase;
        self.phase_log.push(phase);
    }

    fn deal_to(&mut self, n: usize) -> SmallVec<[Card; 5]> {
        match self.deck.draw(n) {
            Ok(cards) => cards.into_iter().collect(),
            Err(err) => {
                tracing::error!(%err, "duel deck exhausted");
                SmallVec::new()
            }
        }
    }
}

/// Texas Hold'em style duel against a passive bot.
///
/// Both seats ante the stake; the pot minus rake goes to the better hand.
#[derive(Clone, Debug)]
pub struct Duel {
    rake: f64,
}

impl Default for Duel {
    fn default() -> Self {
        Self { rake: 0.05 }
    }
}

impl Duel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn rake(mut self, rake: f64) -> Self {
        assert!((0.0..1.0).contains(&rake), "Rake must be in [0, 1)");
        self.rake = rake;
        self
    }

    /// Both antes combined.
    #[must_use]
    pub fn pot(&self, stake: f64) -> f64 {
        stake * 2.0
    }
}

impl RulesEngine for Duel {
    type State = DuelState;
    type Action = DuelAction;

    fn name(&self) -> &'static str {
        "duel"
    }

    fn seat_count(&self) -> usize {
        2
    }

    fn new_state(&self, mut rng: GameRng) -> DuelState {
        let deck = Deck::standard(&mut rng);
        let mut phase_log = SmallVec::new();
        phase_log.push(DuelPhase::Matchmaking);
        DuelState {
            deck,
            human_hole: SmallVec::new(),
            bot_hole: SmallVec::new(),
            community: SmallVec::new(),
            phase: DuelPhase::Matchmaking,
            phase_log,
            dealing: false,
            human_hand: None,
            bot_hand: None,
            forced: false,
        }
    }

    fn active_seat(&self, state: &DuelState) -> Option<SeatId> {
        (state.phase.is_betting() && !state.dealing).then_some(SeatId::HUMAN)
    }

    fn legal_actions(&self, state: &DuelState, seat: SeatId) -> Vec<DuelAction> {
        if self.active_seat(state) == Some(seat) {
            vec![DuelAction::Fold, DuelAction::Call]
        } else {
            Vec::new()
        }
    }

    fn apply_action(&self, state: &mut DuelState, seat: SeatId, action: &DuelAction) -> bool {
        if self.active_seat(state) != Some(seat) {
            return false;
        }
        match action {
            DuelAction::Fold => state.enter(DuelPhase::Folded),
            DuelAction::Call => state.dealing = true,
        }
        true
    }

    /// The bot never holds the action.
    fn bot_action(&self, _: &DuelState, _: SeatId, _: &[DuelAction], _: &mut GameRng) -> Option<DuelAction> {
        None
    }

    fn is_terminal(&self, state: &DuelState) -> Option<GameResult> {
        match state.phase {
            DuelPhase::Folded => Some(GameResult::Winner(BOT)),
            DuelPhase::Showdown => state.showdown_winner().map(GameResult::Winner),
            _ => None,
        }
    }

    fn win_payout(&self, _state: &DuelState, stake: f64) -> f64 {
        self.pot(stake) * (1.0 - self.rake)
    }

    fn pending_step(&self, state: &DuelState) -> Option<Step> {
        match state.phase {
            DuelPhase::Matchmaking => Some(Step::once(StepKind::Matchmaking)),
            DuelPhase::River if state.dealing => Some(Step::once(StepKind::Reveal)),
            _ if state.dealing => Some(Step::once(StepKind::Deal)),
            _ => None,
        }
    }

    fn run_step(&self, state: &mut DuelState) {
        let Some(next) = state.phase.next() else {
            return;
        };
        match state.phase {
            DuelPhase::Matchmaking => {
                state.human_hole = state.deal_to(2).into_iter().collect();
                state.bot_hole = state.deal_to(2).into_iter().collect();
            }
            DuelPhase::River => {
                let human: SmallVec<[Card; 7]> = state.human_hole.iter().chain(&state.community).copied().collect();
                let bot: SmallVec<[Card; 7]> = state.bot_hole.iter().chain(&state.community).copied().collect();
                state.human_hand = evaluate(&human);
                state.bot_hand = evaluate(&bot);
            }
            _ => {
                let cards = state.deal_to(next.reveals());
                state.community.extend(cards);
            }
        }
        state.dealing = false;
        state.enter(next);
        tracing::debug!(phase = ?next, community = state.community.len(), "duel phase");
    }

    fn force_human_win(&self, state: &mut DuelState) {
        state.forced = true;
    }
}
