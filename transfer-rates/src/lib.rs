//! # Transfer Rates
//!
//! [`RateSource`] adapters for the transfer service:
//! - [`ExchangeRateApiClient`] - HTTP client for an exchangerate-api style
//!   endpoint (`GET {base_url}/{FROM}` returning a `conversion_rates` table)
//! - [`FixedRateSource`] - in-memory rate table for tests and development
//!
//! Neither adapter retries: transport failures surface as
//! [`RateError::Unavailable`] and the engine propagates them before any
//! balance mutation.

use std::collections::HashMap;
use std::time::Duration;

use rust_decimal::Decimal;
use serde::Deserialize;

use transfer_types::{Currency, ExchangeRate, RateError, RateSource};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

// ─────────────────────────────────────────────────────────────────────────────
// HTTP client adapter
// ─────────────────────────────────────────────────────────────────────────────

/// Wire format of the rate provider: one base currency and a table of
/// quotes keyed by target currency code. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
struct RateTableResponse {
    #[serde(rename = "base_code")]
    #[allow(dead_code)]
    base: String,
    #[serde(rename = "conversion_rates", default)]
    rates: HashMap<String, Decimal>,
}

/// HTTP rate source backed by an exchangerate-api compatible service.
///
/// Configuration is passed in explicitly; there is no ambient lookup.
pub struct ExchangeRateApiClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl ExchangeRateApiClient {
    /// Creates a client for the given base URL, e.g.
    /// `https://v6.exchangerate-api.com/v6/<key>/latest`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Creates a client reusing an existing `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    fn quote_url(&self, from: Currency) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), from)
    }
}

#[async_trait::async_trait]
impl RateSource for ExchangeRateApiClient {
    async fn rate(&self, from: Currency, to: Currency) -> Result<ExchangeRate, RateError> {
        let url = self.quote_url(from);
        tracing::info!(%from, %to, %url, "fetch latest exchange rate");

        let response = self
            .http
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| RateError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RateError::Unavailable(format!(
                "rate lookup for currency={from} failed with status code={status}"
            )));
        }

        let table: RateTableResponse = response
            .json()
            .await
            .map_err(|e| RateError::Unavailable(format!("malformed rate response: {e}")))?;

        let rate = table
            .rates
            .get(to.as_str())
            .copied()
            .ok_or(RateError::NotFound { from, to })?;

        tracing::info!(%rate, %from, %to, "current exchange rate");
        Ok(ExchangeRate::observed(from, to, rate))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Fixed table adapter
// ─────────────────────────────────────────────────────────────────────────────

/// In-memory rate source with a fixed `(from, to) -> rate` table.
#[derive(Debug, Default, Clone)]
pub struct FixedRateSource {
    rates: HashMap<(Currency, Currency), Decimal>,
}

impl FixedRateSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a quote for an ordered pair. Builder-style.
    pub fn with_rate(mut self, from: Currency, to: Currency, rate: Decimal) -> Self {
        self.rates.insert((from, to), rate);
        self
    }
}

#[async_trait::async_trait]
impl RateSource for FixedRateSource {
    async fn rate(&self, from: Currency, to: Currency) -> Result<ExchangeRate, RateError> {
        self.rates
            .get(&(from, to))
            .copied()
            .map(|rate| ExchangeRate::observed(from, to, rate))
            .ok_or(RateError::NotFound { from, to })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn currency(code: &str) -> Currency {
        Currency::parse(code).unwrap()
    }

    #[test]
    fn test_rate_table_deserialization() {
        let body = r#"{
            "result": "success",
            "base_code": "USD",
            "conversion_rates": { "EUR": 0.92, "GBP": 0.79, "USD": 1 }
        }"#;

        let table: RateTableResponse = serde_json::from_str(body).unwrap();
        assert_eq!(table.rates.get("EUR"), Some(&dec!(0.92)));
        assert_eq!(table.rates.len(), 3);
    }

    #[test]
    fn test_quote_url_strips_trailing_slash() {
        let client = ExchangeRateApiClient::new("https://rates.example/v6/latest/");
        assert_eq!(
            client.quote_url(currency("USD")),
            "https://rates.example/v6/latest/USD"
        );
    }

    #[tokio::test]
    async fn test_fixed_source_returns_configured_rate() {
        let source = FixedRateSource::new().with_rate(currency("USD"), currency("EUR"), dec!(1.10));

        let quote = source.rate(currency("USD"), currency("EUR")).await.unwrap();
        assert_eq!(quote.rate, dec!(1.10));
    }

    #[tokio::test]
    async fn test_fixed_source_is_directional() {
        let source = FixedRateSource::new().with_rate(currency("USD"), currency("EUR"), dec!(1.10));

        let result = source.rate(currency("EUR"), currency("USD")).await;
        assert!(matches!(result, Err(RateError::NotFound { .. })));
    }
}
