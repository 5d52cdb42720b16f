//! Currency codes and fixed-point amount arithmetic.
//!
//! All monetary values are `rust_decimal::Decimal` with 2 fractional digits.
//! Binary floating point never touches a balance.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::TransferError;

/// Number of fractional digits carried by every balance and amount.
pub const AMOUNT_SCALE: u32 = 2;

/// A validated 3-letter ISO-4217-style currency code (e.g. "USD").
///
/// Stored uppercase; accounts keep their currency for their whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency([u8; 3]);

impl Currency {
    /// Parses a currency code, accepting lowercase input.
    pub fn parse(code: &str) -> Result<Self, TransferError> {
        let bytes = code.as_bytes();
        if bytes.len() != 3 || !bytes.iter().all(|b| b.is_ascii_alphabetic()) {
            return Err(TransferError::InvalidAmount(format!(
                "currency code must be 3 letters, got: {code}"
            )));
        }
        Ok(Self([
            bytes[0].to_ascii_uppercase(),
            bytes[1].to_ascii_uppercase(),
            bytes[2].to_ascii_uppercase(),
        ]))
    }

    /// Returns the uppercase code.
    pub fn as_str(&self) -> &str {
        // Invariant: constructed from ASCII letters only.
        std::str::from_utf8(&self.0).unwrap_or("???")
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Currency {
    type Err = TransferError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Currency {
    type Error = TransferError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Currency> for String {
    fn from(value: Currency) -> Self {
        value.as_str().to_owned()
    }
}

/// Validates a transfer amount against the engine preconditions:
/// strictly positive, at most [`AMOUNT_SCALE`] fractional digits.
pub fn validate_amount(amount: Decimal) -> Result<(), TransferError> {
    if amount <= Decimal::ZERO {
        return Err(TransferError::InvalidAmount(format!(
            "transfer amount must be at least 0.01, got: {amount}"
        )));
    }
    if amount.normalize().scale() > AMOUNT_SCALE {
        return Err(TransferError::InvalidAmount(format!(
            "transfer amount can have at most {AMOUNT_SCALE} fractional digits, got: {amount}"
        )));
    }
    Ok(())
}

/// Converts a source-currency amount at the given spot rate.
///
/// Rounds half-up to 2 fractional digits, applied exactly once.
pub fn convert_amount(amount: Decimal, rate: Decimal) -> Decimal {
    (amount * rate).round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_currency_parse_uppercases() {
        let c = Currency::parse("usd").unwrap();
        assert_eq!(c.as_str(), "USD");
        assert_eq!(c, Currency::parse("USD").unwrap());
    }

    #[test]
    fn test_currency_rejects_bad_codes() {
        assert!(Currency::parse("US").is_err());
        assert!(Currency::parse("USDX").is_err());
        assert!(Currency::parse("U2D").is_err());
    }

    #[test]
    fn test_validate_amount_rejects_zero_and_negative() {
        assert!(validate_amount(Decimal::ZERO).is_err());
        assert!(validate_amount(dec!(-0.01)).is_err());
        assert!(validate_amount(dec!(0.01)).is_ok());
    }

    #[test]
    fn test_validate_amount_rejects_sub_cent_precision() {
        assert!(validate_amount(dec!(1.001)).is_err());
        assert!(validate_amount(dec!(1.10)).is_ok());
        // Trailing zeros beyond scale 2 are harmless.
        assert!(validate_amount(dec!(1.1000)).is_ok());
    }

    #[test]
    fn test_convert_rounds_half_up() {
        assert_eq!(convert_amount(dec!(100.00), dec!(1.10)), dec!(110.00));
        // 0.125 -> 0.13 at the half-point
        assert_eq!(convert_amount(dec!(0.25), dec!(0.5)), dec!(0.13));
        assert_eq!(convert_amount(dec!(33.33), dec!(0.9)), dec!(30.00));
    }
}
