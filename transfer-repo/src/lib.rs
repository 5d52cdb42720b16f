//! # Transfer Repo
//!
//! Durable store adapter for the account transfer service. Implements the
//! `TransferStore` port over SQLite with the commit discipline the engine
//! relies on: both balance writes and the ledger append land in one database
//! transaction, guarded against concurrent modification.

mod sqlite;
mod types;


pub use sqlite::SqliteStore;

/// Build and initialize a store from a database URL.
///
/// Connects, applies the schema, and returns a ready-to-use [`SqliteStore`].
///
/// # Examples
///
/// ```ignore
/// let store = build_store("sqlite://transfer.db?mode=rwc").await?;
/// ```
pub async fn build_store(database_url: &str) -> anyhow::Result<SqliteStore> {
    SqliteStore::new(database_url).await
}
