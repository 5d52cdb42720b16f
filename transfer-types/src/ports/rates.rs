//! Exchange rate source port.
//!
//! Implementations can be HTTP clients against a live rate API or fixed
//! tables for tests and development.

use crate::domain::{Currency, ExchangeRate};
use crate::error::RateError;

/// Read-only lookup of a spot rate for an ordered currency pair.
///
/// Blocking from the engine's point of view, no internal retry. The rate is
/// fetched fresh for every transfer; callers never cache it.
#[async_trait::async_trait]
pub trait RateSource: Send + Sync + 'static {
    /// Returns the spot rate from `from` to `to`.
    async fn rate(&self, from: Currency, to: Currency) -> Result<ExchangeRate, RateError>;
}
