//! Balance collaborator.
//!
//! The rules engine only ever sees the human's balance through `Wallet`:
//! it reads the balance once to accept a stake and calls `adjust` to escrow
//! the stake and to settle. Ledger mechanics live outside the crate.

use serde::{Deserialize, Serialize};

/// Round an amount to three decimal places, as the ledger stores it.
#[must_use]
pub fn round_amount(amount: f64) -> f64 {
    (amount * 1000.0).round() / 1000.0
}

/// The balance-adjustment callback.
pub trait Wallet {
    /// Current balance.
    fn balance(&self) -> f64;

    /// Apply a signed adjustment.
    fn adjust(&mut self, delta: f64);
}

/// In-memory wallet that keeps a log of every adjustment.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryWallet {
    balance: f64,
    adjustments: Vec<f64>,
}

impl MemoryWallet {
    #[must_use]
    pub fn new(balance: f64) -> Self {
        Self {
            balance: round_amount(balance),
            adjustments: Vec::new(),
        }
    }

    /// Every adjustment applied, oldest first.
    #[must_use]
    pub fn adjustments(&self) -> &[f64] {
        &self.adjustments
    }
}

impl Wallet for MemoryWallet {
    fn balance(&self) -> f64 {
        self.balance
    }

    fn adjust(&mut self, delta: f64) {
        self.balance = round_amount(self.balance + delta);
        self.adjustments.push(delta);
    }
}
