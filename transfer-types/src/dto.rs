//! Data Transfer Objects (DTOs) for requests and responses.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Currency, ExchangeRate, LedgerEntry, LedgerEntryId, OwnerId};

// ─────────────────────────────────────────────────────────────────────────────
// Transfer DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to transfer funds between two accounts.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TransactionRequest {
    /// Owner id of the source account
    #[schema(example = 1)]
    pub account_owner_id: OwnerId,
    /// Owner id of the target account
    #[schema(example = 2)]
    pub target_account_id: OwnerId,
    /// Amount to transfer in the source currency, at most 2 fractional digits
    #[schema(value_type = String, example = "100.00")]
    pub amount: Decimal,
}

/// Response after a successful transfer.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TransactionResponse {
    /// Identifier assigned to the ledger entry
    pub transaction_id: LedgerEntryId,
    pub account_owner_id: OwnerId,
    pub target_account_id: OwnerId,
    /// Transferred amount in the source currency
    #[schema(value_type = String, example = "100.00")]
    pub amount: Decimal,
    pub date_time: DateTime<Utc>,
    #[schema(example = "SUCCESS")]
    pub status: String,
    /// Source balance after the debit
    #[schema(value_type = String, example = "100.00")]
    pub residual_balance: Decimal,
    #[schema(value_type = String, example = "USD")]
    pub base_currency: Currency,
    #[schema(value_type = String, example = "EUR")]
    pub target_currency: Currency,
    /// Applied spot rate; 1 for same-currency transfers
    #[schema(value_type = String, example = "1.10")]
    pub exchange_rate: Decimal,
}

impl From<LedgerEntry> for TransactionResponse {
    fn from(entry: LedgerEntry) -> Self {
        Self {
            transaction_id: entry.id,
            account_owner_id: entry.record.from_owner_id,
            target_account_id: entry.record.to_owner_id,
            amount: entry.record.amount,
            date_time: entry.record.date_time,
            status: entry.record.status.to_string(),
            residual_balance: entry.record.residual_balance,
            base_currency: entry.record.base_currency,
            target_currency: entry.record.target_currency,
            exchange_rate: entry.record.exchange_rate,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Exchange rate DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Response for an exchange rate lookup.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExchangeRateResponse {
    #[schema(value_type = String, example = "USD")]
    pub from_currency: Currency,
    #[schema(value_type = String, example = "EUR")]
    pub to_currency: Currency,
    #[schema(value_type = String, example = "0.92")]
    pub rate: Decimal,
    pub date_time: DateTime<Utc>,
}

impl From<ExchangeRate> for ExchangeRateResponse {
    fn from(rate: ExchangeRate) -> Self {
        Self {
            from_currency: rate.from_currency,
            to_currency: rate.to_currency,
            rate: rate.rate,
            date_time: rate.observed_at,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Error DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Structured error body returned by the API layer.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// HTTP status concatenated with the internal error code, e.g. "4040005"
    #[schema(example = "4040005")]
    pub error_code: String,
    pub error_message: ErrorMessage,
    /// Epoch milliseconds
    #[schema(example = 1700000000000i64)]
    pub timestamp: i64,
}

/// Key/text pair identifying an error kind and its detail.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorMessage {
    #[schema(example = "ACCOUNT_NOT_FOUND_ERROR")]
    pub key: String,
    pub text: String,
}
