// Delayed payment accounts
// A payment account holds native funds deposited for a beneficiary and
// releases them at most once, under owner control, after a configured
// release time. The release check is evaluated here against immutable
// state; the ledger commits the outcome atomically.

mod error;
mod event;

pub use error::*;
pub use event::*;

use serde::{Deserialize, Serialize};

use crate::{
    crypto::{Address, Hash},
    time::TimestampSeconds,
};

/// Status of a payment account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Waiting for the release time
    #[default]
    Pending,
    /// Release time reached, payout not sent yet
    Triggered,
    /// Funds sent to the beneficiary
    Completed,
}

impl PaymentStatus {
    /// Get the ID for serialization
    pub fn id(&self) -> u8 {
        match self {
            PaymentStatus::Pending => 0,
            PaymentStatus::Triggered => 1,
            PaymentStatus::Completed => 2,
        }
    }

    /// Check if the release condition has been observed at least once
    pub fn is_triggered(&self) -> bool {
        !matches!(self, PaymentStatus::Pending)
    }

    /// Check if this status represents a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, PaymentStatus::Completed)
    }
}

/// How the payout amount is computed once the release triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PayoutMode {
    /// Send the entire held balance
    #[default]
    FullBalance,
    /// Send the configured target amount, capped by the held balance
    TargetAmount,
}

/// On-ledger payment account state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentAccount {
    /// Payment ID (hash of the creating transaction)
    pub id: Hash,
    /// Account authorized to run the release check
    pub owner: Address,
    /// Account receiving the payout
    pub beneficiary: Address,
    /// Amount expected before release, in atomic units
    pub target_amount: u64,
    /// Timestamp (seconds) after which the payout may be released
    pub release_time: TimestampSeconds,
    /// Payout amount policy
    pub payout_mode: PayoutMode,
    /// Funds currently held by the account
    pub balance: u64,
    /// Current status
    pub status: PaymentStatus,
    /// Timestamp when created
    pub created_at: TimestampSeconds,
}

impl PaymentAccount {
    /// Create a new pending payment account with no held funds
    pub fn new(
        id: Hash,
        owner: Address,
        beneficiary: Address,
        target_amount: u64,
        release_time: TimestampSeconds,
        payout_mode: PayoutMode,
        created_at: TimestampSeconds,
    ) -> Self {
        Self {
            id,
            owner,
            beneficiary,
            target_amount,
            release_time,
            payout_mode,
            balance: 0,
            status: PaymentStatus::Pending,
            created_at,
        }
    }
}

/// Funds movement requested by a release check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payout {
    /// Account to credit
    pub beneficiary: Address,
    /// Amount to move out of the payment account
    pub amount: u64,
}

/// Result of a release check evaluation
///
/// Nothing here has been applied yet. The ledger commits events, payout
/// and the new status together, or discards the whole outcome on error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    /// Events to emit, in order
    pub events: Vec<PaymentEvent>,
    /// Transfer to perform, if the release paid out
    pub payout: Option<Payout>,
    /// Status after the check
    pub status: PaymentStatus,
}

/// Evaluate a release check against an immutable payment account.
///
/// Emits `Checked` on every accepted invocation, `Triggered` the first
/// time the release time is reached, and `FundsSent` when held funds are
/// paid out. Only the owner may check, and a completed payment rejects
/// any further check.
pub fn check_payment(
    payment: &PaymentAccount,
    caller: &Address,
    now: TimestampSeconds,
) -> Result<CheckOutcome, PaymentError> {
    if caller != &payment.owner {
        return Err(PaymentError::Unauthorized);
    }
    if payment.status.is_terminal() {
        return Err(PaymentError::AlreadyCompleted);
    }

    let mut events = vec![PaymentEvent::Checked];
    let mut status = payment.status;
    let mut payout = None;

    if now < payment.release_time {
        return Ok(CheckOutcome {
            events,
            payout,
            status,
        });
    }

    if status == PaymentStatus::Pending {
        status = PaymentStatus::Triggered;
        events.push(PaymentEvent::Triggered);
    }

    if payment.balance > 0 {
        let amount = match payment.payout_mode {
            PayoutMode::FullBalance => payment.balance,
            PayoutMode::TargetAmount => payment.target_amount.min(payment.balance),
        };
        events.push(PaymentEvent::FundsSent {
            beneficiary: payment.beneficiary.clone(),
            amount,
        });
        payout = Some(Payout {
            beneficiary: payment.beneficiary.clone(),
            amount,
        });
        status = PaymentStatus::Completed;
    }

    Ok(CheckOutcome {
        events,
        payout,
        status,
    })
}
