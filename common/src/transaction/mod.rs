use serde::{Deserialize, Serialize};

use crate::crypto::Address;

mod payload;

pub mod verify;

pub use payload::*;

// this enum represent all types of operation accepted by the settlement ledger
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    CreatePayment(CreatePaymentPayload),
    Deposit(DepositPayload),
    Check(CheckPayload),
}

/// Transaction submitted to the ledger
///
/// The host environment has already authenticated `source`; ordering and
/// atomicity come from serialized application.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Transaction {
    /// Authenticated sender of the transaction
    pub source: Address,
    /// Operation carried by the transaction
    pub data: TransactionType,
}

impl Transaction {
    // Create a new transaction
    #[inline(always)]
    pub fn new(source: Address, data: TransactionType) -> Self {
        Self { source, data }
    }
}
