use serde::{Deserialize, Serialize};

use crate::{
    crypto::{Address, Hash},
    payment::PayoutMode,
    time::TimestampSeconds,
};

/// Create a new delayed payment account.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CreatePaymentPayload {
    /// Account authorized to run release checks
    pub owner: Address,
    /// Account receiving the payout
    pub beneficiary: Address,
    /// Amount expected before release, in atomic units
    pub target_amount: u64,
    /// Timestamp after which release may occur
    pub release_time: TimestampSeconds,
    /// Payout amount policy
    pub payout_mode: PayoutMode,
}

/// Deposit funds into an existing payment account.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DepositPayload {
    /// Payment ID
    pub payment_id: Hash,
    /// Amount to deposit
    pub amount: u64,
    /// Asset being deposited (only the native asset is accepted)
    pub asset: Hash,
}

/// Run the release check on a payment account.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CheckPayload {
    /// Payment ID
    pub payment_id: Hash,
}
