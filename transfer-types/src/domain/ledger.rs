//! Ledger entries and the transfer plan handed to the store.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::account::{Account, OwnerId};
use super::money::Currency;

/// Identifier assigned to a ledger entry by the store at append time.
/// Monotonically increasing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct LedgerEntryId(i64);

impl LedgerEntryId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for LedgerEntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome of a persisted transfer.
///
/// No partial-success state is modeled: a persisted entry is always
/// `Success`, failed transfers persist nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Success,
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionStatus::Success => write!(f, "SUCCESS"),
        }
    }
}

/// An unsaved ledger entry: the point-in-time snapshot of one transfer,
/// built by the engine after both new balances are computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLedgerEntry {
    /// Source owner id
    pub from_owner_id: OwnerId,
    /// Target owner id
    pub to_owner_id: OwnerId,
    /// Transferred amount, denominated in the source currency
    pub amount: Decimal,
    /// When the transfer was performed
    pub date_time: DateTime<Utc>,
    pub status: TransactionStatus,
    /// Source balance immediately before the debit
    pub available_balance: Decimal,
    /// Source balance immediately after the debit
    pub residual_balance: Decimal,
    /// Source account currency
    pub base_currency: Currency,
    /// Target account currency
    pub target_currency: Currency,
    /// Applied spot rate; exactly 1 for same-currency transfers
    pub exchange_rate: Decimal,
}

impl NewLedgerEntry {
    /// Builds the snapshot for a transfer from `source` (pre-debit state) to
    /// `target`, with the already-computed residual balance and applied rate.
    pub fn for_transfer(
        source: &Account,
        target: &Account,
        amount: Decimal,
        residual_balance: Decimal,
        exchange_rate: Decimal,
    ) -> Self {
        Self {
            from_owner_id: source.owner_id,
            to_owner_id: target.owner_id,
            amount,
            date_time: Utc::now(),
            status: TransactionStatus::Success,
            available_balance: source.balance,
            residual_balance,
            base_currency: source.currency,
            target_currency: target.currency,
            exchange_rate,
        }
    }
}

/// A persisted, immutable ledger entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: LedgerEntryId,
    #[serde(flatten)]
    pub record: NewLedgerEntry,
}

impl LedgerEntry {
    pub fn from_new(id: LedgerEntryId, record: NewLedgerEntry) -> Self {
        Self { id, record }
    }
}

/// Balance transition for one account within a transfer.
///
/// `observed_balance` is the balance the engine read before computing the
/// outcome; the store must refuse the commit if it no longer matches.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountUpdate {
    pub owner_id: OwnerId,
    pub observed_balance: Decimal,
    pub new_balance: Decimal,
}

/// The complete computed outcome of one transfer, applied atomically by the
/// store: both balance writes and the ledger append commit together or not
/// at all.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferPlan {
    pub source: AccountUpdate,
    pub target: AccountUpdate,
    pub entry: NewLedgerEntry,
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_snapshot_captures_pre_and_post_debit_balances() {
        let usd = Currency::parse("USD").unwrap();
        let source = Account::new(OwnerId::new(1), usd, dec!(200.00));
        let target = Account::new(OwnerId::new(2), usd, dec!(300.00));

        let entry =
            NewLedgerEntry::for_transfer(&source, &target, dec!(100.00), dec!(100.00), dec!(1));

        assert_eq!(entry.available_balance, dec!(200.00));
        assert_eq!(entry.residual_balance, dec!(100.00));
        assert_eq!(entry.status, TransactionStatus::Success);
        assert_eq!(entry.base_currency, usd);
        assert_eq!(entry.exchange_rate, dec!(1));
    }
}
