use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PaymentError {
    #[error("unauthorized caller")]
    Unauthorized,
    #[error("payment already completed")]
    AlreadyCompleted,
    #[error("unsupported deposit asset")]
    UnsupportedDeposit,
    #[error("invalid amount")]
    InvalidAmount,
}
