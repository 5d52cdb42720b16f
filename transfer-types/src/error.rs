//! Error types for the transfer service.

use rust_decimal::Decimal;

use crate::domain::{Currency, OwnerId};

/// The closed error taxonomy raised by `perform_transfer`.
///
/// Every variant is surfaced synchronously to the caller; only
/// `ConsistencyConflict` is retry-safe (nothing was committed).
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("Cannot transfer funds to the same account: {0}")]
    InvalidTransfer(OwnerId),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Account with owner id: [{0}] is not found")]
    AccountNotFound(OwnerId),

    #[error("Insufficient balance: {available} for amount: {requested}")]
    InsufficientBalance {
        available: Decimal,
        requested: Decimal,
    },

    #[error("Exchange rate for pair [{from}:{to}] is not found")]
    ExchangeRateNotFound { from: Currency, to: Currency },

    #[error("Exchange rate service unavailable: {0}")]
    ExchangeRateUnavailable(String),

    #[error("Concurrent modification detected, transfer rolled back: {0}")]
    ConsistencyConflict(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Store-adapter errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

/// Rate-source errors.
///
/// Transport-level failures are always mapped to `Unavailable`; the source
/// is never retried by the core.
#[derive(Debug, thiserror::Error)]
pub enum RateError {
    #[error("Exchange rate for pair [{from}:{to}] is not found")]
    NotFound { from: Currency, to: Currency },

    #[error("Exchange rate service unavailable: {0}")]
    Unavailable(String),
}

impl From<StoreError> for TransferError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Database(msg) => TransferError::Storage(msg),
            StoreError::Conflict(msg) => TransferError::ConsistencyConflict(msg),
        }
    }
}

impl From<RateError> for TransferError {
    fn from(err: RateError) -> Self {
        match err {
            RateError::NotFound { from, to } => TransferError::ExchangeRateNotFound { from, to },
            RateError::Unavailable(msg) => TransferError::ExchangeRateUnavailable(msg),
        }
    }
}
