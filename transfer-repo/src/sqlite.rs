//! SQLite store adapter.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;

use transfer_types::{
    Account, Currency, LedgerEntry, LedgerEntryId, OwnerId, StoreError, TransferPlan,
    TransferStore,
};

use crate::types::{DbAccount, DbLedgerEntry, to_db_decimal, to_db_rate};

/// SQLite implementation of the [`TransferStore`] port.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Connects and applies the schema.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;

        let ddl = include_str!("../migrations/0001_create_tables.sql");
        sqlx::query(ddl).execute(&pool).await?;

        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Creates or replaces an account row. Account creation is seed/admin
    /// data, outside the transfer core; this exists for wiring and tests.
    pub async fn upsert_account(
        &self,
        owner_id: OwnerId,
        currency: Currency,
        balance: rust_decimal::Decimal,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r#"INSERT INTO account (owner_id, currency, balance) VALUES (?, ?, ?)
               ON CONFLICT(owner_id) DO UPDATE SET currency = excluded.currency, balance = excluded.balance"#,
        )
        .bind(owner_id.as_i64())
        .bind(currency.as_str())
        .bind(to_db_decimal(balance))
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl TransferStore for SqliteStore {
    async fn get_account(&self, owner_id: OwnerId) -> Result<Option<Account>, StoreError> {
        let row: Option<DbAccount> =
            sqlx::query_as(r#"SELECT owner_id, currency, balance FROM account WHERE owner_id = ?"#)
                .bind(owner_id.as_i64())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| StoreError::Database(e.to_string()))?;

        row.map(DbAccount::into_domain).transpose()
    }

    async fn commit_transfer(&self, plan: &TransferPlan) -> Result<LedgerEntry, StoreError> {
        let mut db_tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        // Both updates are guarded by the balance the engine observed. Zero
        // rows affected means another committed transfer got there first;
        // dropping the transaction rolls everything back.
        for update in [&plan.source, &plan.target] {
            let result =
                sqlx::query(r#"UPDATE account SET balance = ? WHERE owner_id = ? AND balance = ?"#)
                    .bind(to_db_decimal(update.new_balance))
                    .bind(update.owner_id.as_i64())
                    .bind(to_db_decimal(update.observed_balance))
                    .execute(&mut *db_tx)
                    .await
                    .map_err(|e| StoreError::Database(e.to_string()))?;

            if result.rows_affected() == 0 {
                return Err(StoreError::Conflict(format!(
                    "account {} was modified concurrently",
                    update.owner_id
                )));
            }
        }

        let entry = &plan.entry;
        let result = sqlx::query(
            r#"INSERT INTO ledger (from_owner_id, to_owner_id, amount, date_time, status,
                                   available_balance, residual_balance, base_currency,
                                   target_currency, exchange_rate)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(entry.from_owner_id.as_i64())
        .bind(entry.to_owner_id.as_i64())
        .bind(to_db_decimal(entry.amount))
        .bind(entry.date_time.to_rfc3339())
        .bind(entry.status.to_string())
        .bind(to_db_decimal(entry.available_balance))
        .bind(to_db_decimal(entry.residual_balance))
        .bind(entry.base_currency.as_str())
        .bind(entry.target_currency.as_str())
        .bind(to_db_rate(entry.exchange_rate))
        .execute(&mut *db_tx)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        let id = LedgerEntryId::new(result.last_insert_rowid());

        db_tx
            .commit()
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(LedgerEntry::from_new(id, entry.clone()))
    }

    async fn get_entry(&self, id: LedgerEntryId) -> Result<Option<LedgerEntry>, StoreError> {
        let row: Option<DbLedgerEntry> = sqlx::query_as(
            r#"SELECT id, from_owner_id, to_owner_id, amount, date_time, status,
                      available_balance, residual_balance, base_currency, target_currency,
                      exchange_rate
               FROM ledger WHERE id = ?"#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        row.map(DbLedgerEntry::into_domain).transpose()
    }
}
