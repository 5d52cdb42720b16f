//! Account + ledger store port.
//!
//! One port spans both stores because the atomicity contract does: the two
//! balance writes and the ledger append of a transfer must commit together.
//! Adapters (SQLite, in-memory) implement this trait.

use crate::domain::{Account, LedgerEntry, LedgerEntryId, OwnerId, TransferPlan};
use crate::error::StoreError;

/// Durable store for accounts and the append-only transfer ledger.
#[async_trait::async_trait]
pub trait TransferStore: Send + Sync + 'static {
    /// Loads an account by owner id. Side-effect free.
    async fn get_account(&self, owner_id: OwnerId) -> Result<Option<Account>, StoreError>;

    /// Applies a computed transfer atomically: both balance updates and the
    /// ledger append succeed together, or nothing is committed.
    ///
    /// The plan carries the balances the engine observed; if either account
    /// has been modified since, the implementation must roll back and return
    /// [`StoreError::Conflict`] rather than apply the plan against stale
    /// state. Returns the persisted entry with its assigned identifier.
    async fn commit_transfer(&self, plan: &TransferPlan) -> Result<LedgerEntry, StoreError>;

    /// Reads back a persisted ledger entry. Entries are never updated or
    /// deleted.
    async fn get_entry(&self, id: LedgerEntryId) -> Result<Option<LedgerEntry>, StoreError>;
}
