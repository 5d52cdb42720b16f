//! Pure domain model for account transfers.

mod account;
mod ledger;
mod money;
mod rate;

pub use account::{Account, OwnerId};
pub use ledger::{AccountUpdate, LedgerEntry, LedgerEntryId, NewLedgerEntry, TransactionStatus, TransferPlan};
pub use money::{Currency, convert_amount, validate_amount};
pub use rate::ExchangeRate;
