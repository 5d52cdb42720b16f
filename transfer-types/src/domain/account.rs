//! Account domain model.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::money::Currency;

/// Unique identifier of an account owner. One account per owner.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct OwnerId(i64);

impl OwnerId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for OwnerId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// An internally held account: a balance in a single, immutable currency.
///
/// The balance is always expressed in the account's own currency; arithmetic
/// never crosses currencies without an explicit conversion step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Owner identifier, immutable
    pub owner_id: OwnerId,
    /// 3-letter currency code, immutable for the account's lifetime
    pub currency: Currency,
    /// Current balance, scale 2, never negative after a completed transfer
    pub balance: Decimal,
}

impl Account {
    pub fn new(owner_id: OwnerId, currency: Currency, balance: Decimal) -> Self {
        Self {
            owner_id,
            currency,
            balance,
        }
    }

    /// True when the balance covers the requested debit.
    pub fn has_sufficient_balance(&self, amount: Decimal) -> bool {
        self.balance >= amount
    }
}
