// Settlement ledger state
// Transactions are applied one at a time with all-or-nothing semantics:
// a failed apply leaves accounts, payments and the journal untouched.


use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    crypto::{hash, Address, Hash},
    payment::{check_payment, PaymentAccount, PaymentError, PaymentEvent},
    time::TimestampSeconds,
    transaction::{
        verify::{verify_create_payment, verify_deposit},
        CheckPayload, CreatePaymentPayload, DepositPayload, Transaction, TransactionType,
    },
};

// Domain separation prefix for payment account ids
const PAYMENT_ID_PREFIX: &[u8] = b"PAYHOLD_PAYMENT_V1";

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("payment error: {0}")]
    Payment(#[from] PaymentError),
    #[error("payment {0} not found")]
    PaymentNotFound(Hash),
    #[error("payment {0} already exists")]
    PaymentAlreadyExists(Hash),
    #[error("insufficient funds: available {available}, required {required}")]
    InsufficientFunds { available: u64, required: u64 },
    #[error("balance overflow")]
    Overflow,
}

/// Journaled event with its emission context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    /// Index of the transaction that emitted the event
    pub sequence: u64,
    /// Payment account the event belongs to
    pub payment_id: Hash,
    /// The emitted event
    pub event: PaymentEvent,
}

/// Compute the deterministic id a create payment transaction will get
///
/// Formula: blake3(prefix || source || sequence || owner || beneficiary
/// || target_amount || release_time), with the ledger's transaction
/// sequence as the uniqueness source. This lets callers know the id of a
/// payment account before submitting its creation.
pub fn compute_payment_id(
    source: &Address,
    sequence: u64,
    payload: &CreatePaymentPayload,
) -> Hash {
    let mut data = Vec::new();
    data.extend_from_slice(PAYMENT_ID_PREFIX);
    data.extend_from_slice(source.as_bytes());
    data.extend_from_slice(&sequence.to_le_bytes());
    data.extend_from_slice(payload.owner.as_bytes());
    data.extend_from_slice(payload.beneficiary.as_bytes());
    data.extend_from_slice(&payload.target_amount.to_le_bytes());
    data.extend_from_slice(&payload.release_time.to_le_bytes());
    hash(&data)
}

/// In-memory settlement ledger
///
/// Holds native account balances, payment accounts and the append-only
/// event journal. Serialized execution is enforced by `&mut self`: no
/// two transactions can be applied concurrently to the same state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChainState {
    /// Native balances per account
    accounts: IndexMap<Address, u64>,
    /// Payment accounts by id
    payments: IndexMap<Hash, PaymentAccount>,
    /// Append-only event journal
    journal: Vec<EventRecord>,
    /// Count of successfully applied transactions
    sequence: u64,
}

impl ChainState {
    /// Create a new empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit an account with native funds (host funding path)
    pub fn credit_account(&mut self, account: &Address, amount: u64) -> Result<(), LedgerError> {
        let balance = self.accounts.entry(account.clone()).or_insert(0);
        *balance = balance.checked_add(amount).ok_or(LedgerError::Overflow)?;
        Ok(())
    }

    /// Get the native balance of an account (zero when unknown)
    pub fn get_account_balance(&self, account: &Address) -> u64 {
        self.accounts.get(account).copied().unwrap_or(0)
    }

    /// Get a payment account by id
    pub fn get_payment(&self, id: &Hash) -> Option<&PaymentAccount> {
        self.payments.get(id)
    }

    /// Number of payment accounts on the ledger
    pub fn payment_count(&self) -> usize {
        self.payments.len()
    }

    /// Full event journal, oldest first
    pub fn journal(&self) -> &[EventRecord] {
        &self.journal
    }

    /// Events journaled for one payment account, oldest first
    pub fn events_for<'a>(&'a self, id: &'a Hash) -> impl Iterator<Item = &'a EventRecord> + 'a {
        self.journal
            .iter()
            .filter(move |record| &record.payment_id == id)
    }

    /// Count of successfully applied transactions
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Apply a transaction at the given ledger timestamp.
    ///
    /// Returns the events the transaction emitted. Either the whole
    /// transition is applied, or an error is returned and the state is
    /// left exactly as it was.
    pub fn apply(
        &mut self,
        tx: &Transaction,
        now: TimestampSeconds,
    ) -> Result<Vec<PaymentEvent>, LedgerError> {
        match &tx.data {
            TransactionType::CreatePayment(payload) => self.apply_create(&tx.source, payload, now),
            TransactionType::Deposit(payload) => self.apply_deposit(&tx.source, payload),
            TransactionType::Check(payload) => self.apply_check(&tx.source, payload, now),
        }
    }

    fn apply_create(
        &mut self,
        source: &Address,
        payload: &CreatePaymentPayload,
        now: TimestampSeconds,
    ) -> Result<Vec<PaymentEvent>, LedgerError> {
        verify_create_payment(payload)?;

        let id = compute_payment_id(source, self.sequence, payload);
        if self.payments.contains_key(&id) {
            return Err(LedgerError::PaymentAlreadyExists(id));
        }

        let payment = PaymentAccount::new(
            id.clone(),
            payload.owner.clone(),
            payload.beneficiary.clone(),
            payload.target_amount,
            payload.release_time,
            payload.payout_mode,
            now,
        );
        debug!(
            "Created payment {} for beneficiary {} releasing at {}",
            id, payment.beneficiary, payment.release_time
        );
        self.payments.insert(id, payment);
        self.sequence += 1;
        Ok(Vec::new())
    }

    fn apply_deposit(
        &mut self,
        source: &Address,
        payload: &DepositPayload,
    ) -> Result<Vec<PaymentEvent>, LedgerError> {
        verify_deposit(payload)?;

        let available = self.get_account_balance(source);
        if available < payload.amount {
            return Err(LedgerError::InsufficientFunds {
                available,
                required: payload.amount,
            });
        }

        // resolve both sides before mutating anything
        let payment = self
            .payments
            .get(&payload.payment_id)
            .ok_or_else(|| LedgerError::PaymentNotFound(payload.payment_id.clone()))?;
        let held = payment
            .balance
            .checked_add(payload.amount)
            .ok_or(LedgerError::Overflow)?;

        self.accounts
            .insert(source.clone(), available - payload.amount);
        if let Some(payment) = self.payments.get_mut(&payload.payment_id) {
            payment.balance = held;
        }
        debug!(
            "Deposited {} from {} into payment {}",
            payload.amount, source, payload.payment_id
        );
        self.sequence += 1;
        Ok(Vec::new())
    }

    fn apply_check(
        &mut self,
        source: &Address,
        payload: &CheckPayload,
        now: TimestampSeconds,
    ) -> Result<Vec<PaymentEvent>, LedgerError> {
        let payment = self
            .payments
            .get(&payload.payment_id)
            .ok_or_else(|| LedgerError::PaymentNotFound(payload.payment_id.clone()))?;

        let outcome = check_payment(payment, source, now)?;

        // resolve all arithmetic before mutating anything
        let held = match &outcome.payout {
            Some(payout) => payment
                .balance
                .checked_sub(payout.amount)
                .ok_or(LedgerError::Overflow)?,
            None => payment.balance,
        };
        let credited = match &outcome.payout {
            Some(payout) => Some(
                self.get_account_balance(&payout.beneficiary)
                    .checked_add(payout.amount)
                    .ok_or(LedgerError::Overflow)?,
            ),
            None => None,
        };

        let sequence = self.sequence;
        for event in &outcome.events {
            self.journal.push(EventRecord {
                sequence,
                payment_id: payload.payment_id.clone(),
                event: event.clone(),
            });
        }
        if let (Some(payout), Some(credited)) = (&outcome.payout, credited) {
            self.accounts.insert(payout.beneficiary.clone(), credited);
            debug!(
                "Payment {} sent {} to {}",
                payload.payment_id, payout.amount, payout.beneficiary
            );
        }
        if let Some(payment) = self.payments.get_mut(&payload.payment_id) {
            payment.balance = held;
            payment.status = outcome.status;
        }
        self.sequence += 1;
        Ok(outcome.events)
    }
}
