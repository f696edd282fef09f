//! Session configuration.
//!
//! A session is configured at startup by providing:
//! - a seed (all randomness is derived from it)
//! - `Pacing`: presentation delays between steps
//! - `Diagnostics`: the optional forced-outcome override
//!
//! The rules engines never read configuration directly; the session applies it.

use serde::{Deserialize, Serialize};

use super::error::EngineError;
use crate::session::schedule::Pacing;

/// Fixed outcome and payout used for verification runs.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticOverride {
    /// Resolve the session in the human's favour.
    pub force_win: bool,
    /// Amount paid on a human win instead of the computed payout.
    pub payout: f64,
}

impl DiagnosticOverride {
    /// Override that forces a human win paying `payout`.
    #[must_use]
    pub fn forced_win(payout: f64) -> Self {
        Self { force_win: true, payout }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
enum DiagnosticMode {
    #[default]
    Off,
    Armed(DiagnosticOverride),
    Disabled,
}

/// One-time gate around the diagnostic override.
///
/// Starts off. `initialize` arms it exactly once; `disable` shuts it off for
/// good. Normal play never passes through an armed override unless the
/// caller explicitly initialized one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    mode: DiagnosticMode,
}

impl Diagnostics {
    /// Arm the override. Fails if it was already initialized or disabled.
    pub fn initialize(&mut self, over: DiagnosticOverride) -> Result<(), EngineError> {
        match self.mode {
            DiagnosticMode::Off => {
                self.mode = DiagnosticMode::Armed(over);
                Ok(())
            }
            DiagnosticMode::Armed(_) | DiagnosticMode::Disabled => Err(EngineError::DiagnosticsLocked),
        }
    }

    /// Permanently disable the override.
    pub fn disable(&mut self) {
        self.mode = DiagnosticMode::Disabled;
    }

    /// The armed override, if any.
    #[must_use]
    pub fn active(&self) -> Option<&DiagnosticOverride> {
        match &self.mode {
            DiagnosticMode::Armed(over) => Some(over),
            DiagnosticMode::Off | DiagnosticMode::Disabled => None,
        }
    }

    /// True when the override is armed and forces a human win.
    #[must_use]
    pub fn forces_win(&self) -> bool {
        self.active().is_some_and(|o| o.force_win)
    }
}

/// Complete session configuration.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Seed for every random stream in the session.
    pub seed: u64,

    /// Presentation delays between steps.
    pub pacing: Pacing,

    /// Forced-outcome override (off unless initialized).
    pub diagnostics: Diagnostics,
}

impl SessionConfig {
    /// Create a configuration with default pacing and no override.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            pacing: Pacing::default(),
            diagnostics: Diagnostics::default(),
        }
    }

    /// Set the pacing profile.
    #[must_use]
    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    /// Arm the diagnostic override.
    pub fn with_diagnostic(mut self, over: DiagnosticOverride) -> Result<Self, EngineError> {
        self.diagnostics.initialize(over)?;
        Ok(self)
    }
}
