//! # Transfer Types
//!
//! Domain types and port traits for the account transfer service.
//! This crate has ZERO external IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (Account, LedgerEntry, ExchangeRate)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Domain and adapter error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    Account, AccountUpdate, Currency, ExchangeRate, LedgerEntry, LedgerEntryId, NewLedgerEntry,
    OwnerId, TransactionStatus, TransferPlan, convert_amount, validate_amount,
};
pub use dto::*;
pub use error::{RateError, StoreError, TransferError};
pub use ports::{RateSource, TransferStore};
