use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoanDcaError {
    #[error("Price series is empty")]
    EmptySeries,

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Insufficient history: window starts {window_start}, earliest sample is {earliest}")]
    InsufficientHistory {
        window_start: NaiveDateTime,
        earliest: NaiveDateTime,
    },

    #[error("Invalid loan term: {0} months")]
    InvalidTerm(i64),

    #[error("Invalid principal: {0}")]
    InvalidPrincipal(Decimal),

    #[error("Invalid rate: {0}% APR")]
    InvalidRate(Decimal),

    #[error("Invalid allocation: {0}")]
    InvalidAllocation(Decimal),

    #[error("Invalid payment day: {0} (must be 1-28)")]
    InvalidPaymentDay(u32),

    #[error("Invalid price {price} at {at}")]
    InvalidPrice { price: Decimal, at: NaiveDateTime },

    #[error("Invalid capital deployed: {0}")]
    InvalidCapital(Decimal),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for LoanDcaError {
    fn from(e: serde_json::Error) -> Self {
        LoanDcaError::SerializationError(e.to_string())
    }
}
