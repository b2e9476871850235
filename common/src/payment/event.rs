use serde::{Deserialize, Serialize};

use crate::crypto::Address;

/// Event emitted by a payment state transition
///
/// Events are returned in emission order from each successful apply call
/// and journaled append-only for off-ledger listeners. Failed calls emit
/// nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentEvent {
    /// A release check ran
    Checked,
    /// Release conditions were met for the first time
    Triggered,
    /// Held funds were paid out to the beneficiary
    FundsSent {
        /// Account credited with the payout
        beneficiary: Address,
        /// Amount paid out, in atomic units
        amount: u64,
    },
}

impl PaymentEvent {
    /// Event name, matching the emitted variant
    pub fn name(&self) -> &'static str {
        match self {
            PaymentEvent::Checked => "Checked",
            PaymentEvent::Triggered => "Triggered",
            PaymentEvent::FundsSent { .. } => "FundsSent",
        }
    }
}
