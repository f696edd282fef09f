//! Step pacing.
//!
//! Presentation delays (dealing, dice, piece movement, bot "thinking") are
//! modelled as a strict sequence of timed steps. Each step finishes before
//! the next state mutation is applied. A cancelled scheduler refuses every
//! further step, which is how tearing a session down stops it.
//!
//! Pacing never touches game timers: only human decision time, fed through
//! `WagerSession::advance_time`, counts against a turn countdown.

use rustc_hash::FxHashMap;
use std::fmt::Debug;
use std::time::Duration;

use crate::core::EngineError;
use crate::rules::{Step, StepKind};

/// Delay per step kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pacing {
    delays: FxHashMap<StepKind, Duration>,
}

impl Default for Pacing {
    fn default() -> Self {
        let mut delays = FxHashMap::default();
        delays.insert(StepKind::Matchmaking, Duration::from_millis(1500));
        delays.insert(StepKind::Deal, Duration::from_millis(1000));
        delays.insert(StepKind::Reveal, Duration::from_millis(1000));
        delays.insert(StepKind::BotThink, Duration::from_millis(1500));
        delays.insert(StepKind::DiceRoll, Duration::from_millis(800));
        delays.insert(StepKind::PieceStep, Duration::from_millis(200));
        delays.insert(StepKind::RoundLock, Duration::from_millis(800));
        delays.insert(StepKind::RoundResolve, Duration::from_millis(1200));
        Self { delays }
    }
}

impl Pacing {
    /// No delays at all.
    #[must_use]
    pub fn instant() -> Self {
        Self {
            delays: FxHashMap::default(),
        }
    }

    /// Override the delay for one step kind.
    #[must_use]
    pub fn with_delay(mut self, kind: StepKind, delay: Duration) -> Self {
        self.delays.insert(kind, delay);
        self
    }

    #[must_use]
    pub fn delay(&self, kind: StepKind) -> Duration {
        self.delays.get(&kind).copied().unwrap_or(Duration::ZERO)
    }

    /// Total delay for a (possibly repeated) step.
    #[must_use]
    pub fn step_delay(&self, step: Step) -> Duration {
        self.delay(step.kind) * step.count
    }

    #[must_use]
    pub fn is_instant(&self) -> bool {
        self.delays.values().all(|d| d.is_zero())
    }
}

/// Something that can wait out a delay.
pub trait Pacer: Debug {
    fn wait(&mut self, delay: Duration);
}

/// Records elapsed time without sleeping.
#[derive(Clone, Debug, Default)]
pub struct VirtualClock {
    pub elapsed: Duration,
}

impl Pacer for VirtualClock {
    fn wait(&mut self, delay: Duration) {
        self.elapsed += delay;
    }
}

/// Blocks the current thread for each delay.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadSleep;

impl Pacer for ThreadSleep {
    fn wait(&mut self, delay: Duration) {
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }
}

/// Runs paced steps one at a time until cancelled.
#[derive(Debug)]
pub struct Scheduler {
    pacing: Pacing,
    pacer: Box<dyn Pacer>,
    cancelled: bool,
    steps_run: u64,
    elapsed: Duration,
}

impl Scheduler {
    /// Scheduler backed by a virtual clock.
    #[must_use]
    pub fn new(pacing: Pacing) -> Self {
        Self::with_pacer(pacing, Box::<VirtualClock>::default())
    }

    #[must_use]
    pub fn with_pacer(pacing: Pacing, pacer: Box<dyn Pacer>) -> Self {
        Self {
            pacing,
            pacer,
            cancelled: false,
            steps_run: 0,
            elapsed: Duration::ZERO,
        }
    }

    /// Wait out one step. Fails once the scheduler has been cancelled.
    pub fn pace(&mut self, step: Step) -> Result<(), EngineError> {
        if self.cancelled {
            return Err(EngineError::SessionClosed);
        }
        let delay = self.pacing.step_delay(step);
        tracing::trace!(kind = ?step.kind, count = step.count, delay_ms = delay.as_millis() as u64, "pacing step");
        self.pacer.wait(delay);
        self.elapsed += delay;
        self.steps_run += u64::from(step.count);
        Ok(())
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Number of individual steps paced so far.
    #[must_use]
    pub fn steps_run(&self) -> u64 {
        self.steps_run
    }

    /// Total presentation time spent so far.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    #[must_use]
    pub fn pacing(&self) -> &Pacing {
        &self.pacing
    }
}
