//! Database row structs and domain conversions.

use std::str::FromStr;

use rust_decimal::Decimal;
use sqlx::FromRow;

use transfer_types::{
    Account, Currency, LedgerEntry, LedgerEntryId, NewLedgerEntry, OwnerId, StoreError,
    TransactionStatus,
};

/// Renders a decimal as normalized scale-2 text for storage.
///
/// Every balance and amount goes through this before hitting a bind, so the
/// `WHERE balance = ?` guard compares like with like.
pub fn to_db_decimal(value: Decimal) -> String {
    let mut v = value;
    v.rescale(2);
    v.to_string()
}

/// Rates keep their native scale; only balances are normalized.
pub fn to_db_rate(value: Decimal) -> String {
    value.to_string()
}

pub fn parse_decimal(s: &str) -> Result<Decimal, StoreError> {
    Decimal::from_str(s).map_err(|e| StoreError::Database(format!("bad decimal {s:?}: {e}")))
}

pub fn parse_currency(s: &str) -> Result<Currency, StoreError> {
    Currency::parse(s).map_err(|e| StoreError::Database(e.to_string()))
}

pub fn parse_status(s: &str) -> Result<TransactionStatus, StoreError> {
    match s {
        "SUCCESS" => Ok(TransactionStatus::Success),
        _ => Err(StoreError::Database(format!("unknown status: {s}"))),
    }
}

fn parse_date_time(s: &str) -> Result<chrono::DateTime<chrono::Utc>, StoreError> {
    chrono::DateTime::parse_from_rfc3339(s)
        .map_err(|e| StoreError::Database(e.to_string()))
        .map(|dt| dt.with_timezone(&chrono::Utc))
}

// ─────────────────────────────────────────────────────────────────────────────
// Row structs
// ─────────────────────────────────────────────────────────────────────────────

/// Account row from database.
#[derive(FromRow)]
pub struct DbAccount {
    pub owner_id: i64,
    pub currency: String,
    pub balance: String,
}

impl DbAccount {
    pub fn into_domain(self) -> Result<Account, StoreError> {
        Ok(Account::new(
            OwnerId::new(self.owner_id),
            parse_currency(&self.currency)?,
            parse_decimal(&self.balance)?,
        ))
    }
}

/// Ledger row from database.
#[derive(FromRow)]
pub struct DbLedgerEntry {
    pub id: i64,
    pub from_owner_id: i64,
    pub to_owner_id: i64,
    pub amount: String,
    pub date_time: String,
    pub status: String,
    pub available_balance: String,
    pub residual_balance: String,
    pub base_currency: String,
    pub target_currency: String,
    pub exchange_rate: String,
}

impl DbLedgerEntry {
    pub fn into_domain(self) -> Result<LedgerEntry, StoreError> {
        let record = NewLedgerEntry {
            from_owner_id: OwnerId::new(self.from_owner_id),
            to_owner_id: OwnerId::new(self.to_owner_id),
            amount: parse_decimal(&self.amount)?,
            date_time: parse_date_time(&self.date_time)?,
            status: parse_status(&self.status)?,
            available_balance: parse_decimal(&self.available_balance)?,
            residual_balance: parse_decimal(&self.residual_balance)?,
            base_currency: parse_currency(&self.base_currency)?,
            target_currency: parse_currency(&self.target_currency)?,
            exchange_rate: parse_decimal(&self.exchange_rate)?,
        };
        Ok(LedgerEntry::from_new(LedgerEntryId::new(self.id), record))
    }
}
