//! Exchange rate observation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::money::Currency;

/// A spot rate for an ordered currency pair, observed at a point in time.
///
/// Ephemeral: used only within the scope of one transfer, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRate {
    pub from_currency: Currency,
    pub to_currency: Currency,
    /// Multiplier from source to target currency, positive
    pub rate: Decimal,
    pub observed_at: DateTime<Utc>,
}

impl ExchangeRate {
    /// Builds a rate observed now.
    pub fn observed(from_currency: Currency, to_currency: Currency, rate: Decimal) -> Self {
        Self {
            from_currency,
            to_currency,
            rate,
            observed_at: Utc::now(),
        }
    }
}
