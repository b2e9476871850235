use crate::{
    config::NATIVE_ASSET,
    payment::PaymentError,
    transaction::{CreatePaymentPayload, DepositPayload},
};

/// Verify create payment payload (stateless).
pub fn verify_create_payment(payload: &CreatePaymentPayload) -> Result<(), PaymentError> {
    if payload.target_amount == 0 {
        return Err(PaymentError::InvalidAmount);
    }
    Ok(())
}

/// Verify deposit payload (stateless).
///
/// The asset is checked first: a typed token transfer is refused no
/// matter what the rest of the payload says.
pub fn verify_deposit(payload: &DepositPayload) -> Result<(), PaymentError> {
    if payload.asset != NATIVE_ASSET {
        return Err(PaymentError::UnsupportedDeposit);
    }
    if payload.amount == 0 {
        return Err(PaymentError::InvalidAmount);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        crypto::{Address, Hash},
        payment::PayoutMode,
    };

    fn sample_create() -> CreatePaymentPayload {
        CreatePaymentPayload {
            owner: Address::new([1u8; 32]),
            beneficiary: Address::new([2u8; 32]),
            target_amount: 100,
            release_time: 10_000,
            payout_mode: PayoutMode::FullBalance,
        }
    }

    #[test]
    fn create_rejects_zero_target() {
        let mut payload = sample_create();
        assert!(verify_create_payment(&payload).is_ok());

        payload.target_amount = 0;
        let err = match verify_create_payment(&payload) {
            Ok(_) => panic!("expected error"),
            Err(err) => err,
        };
        assert!(matches!(err, PaymentError::InvalidAmount));
    }

    #[test]
    fn deposit_rejects_token_assets() {
        let payload = DepositPayload {
            payment_id: Hash::zero(),
            amount: 0,
            asset: Hash::max(),
        };
        // asset wins over amount: token transfers are refused outright
        let err = match verify_deposit(&payload) {
            Ok(_) => panic!("expected error"),
            Err(err) => err,
        };
        assert!(matches!(err, PaymentError::UnsupportedDeposit));
    }

    #[test]
    fn deposit_rejects_zero_amount() {
        let payload = DepositPayload {
            payment_id: Hash::zero(),
            amount: 0,
            asset: NATIVE_ASSET,
        };
        let err = match verify_deposit(&payload) {
            Ok(_) => panic!("expected error"),
            Err(err) => err,
        };
        assert!(matches!(err, PaymentError::InvalidAmount));
    }

    #[test]
    fn deposit_accepts_native_asset() {
        let payload = DepositPayload {
            payment_id: Hash::zero(),
            amount: 1,
            asset: NATIVE_ASSET,
        };
        assert!(verify_deposit(&payload).is_ok());
    }
}
