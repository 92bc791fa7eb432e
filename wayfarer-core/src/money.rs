use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Error, Result};

/// Monetary amount held as integer minor units (cents). Arithmetic stays in
/// integers so totals are exact; display always carries two fraction digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Per-head multiplication. None on overflow.
    pub fn checked_mul(self, quantity: u32) -> Option<Money> {
        self.0.checked_mul(i64::from(quantity)).map(Money)
    }

    /// Numeric form of an amount, as it arrives in JSON number fields.
    /// Rejects negatives and anything finer than cents.
    pub fn from_number(value: f64) -> Result<Self> {
        if !value.is_finite() || value < 0.0 {
            return Err(Error::InvalidInput(format!(
                "cost must be a non-negative number, got {value}"
            )));
        }
        let cents = (value * 100.0).round();
        if cents > i64::MAX as f64 {
            return Err(Error::InvalidInput("amount out of range".into()));
        }
        if (cents - value * 100.0).abs() > 1e-6 {
            return Err(Error::InvalidInput(
                "amounts carry at most two decimal places".into(),
            ));
        }
        Ok(Money(cents as i64))
    }
}

impl FromStr for Money {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let raw = s.trim();
        let invalid = || Error::InvalidInput(format!("invalid amount: {raw:?}"));
        if raw.starts_with('-') {
            return Err(Error::InvalidInput(format!(
                "amount must not be negative: {raw:?}"
            )));
        }
        let (units, fraction) = match raw.split_once('.') {
            Some((units, fraction)) => (units, fraction),
            None => (raw, ""),
        };
        if units.is_empty() || !units.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if fraction.len() > 2 || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let mut cents = units
            .parse::<i64>()
            .map_err(|_| invalid())?
            .checked_mul(100)
            .ok_or_else(invalid)?;
        if !fraction.is_empty() {
            let mut frac_cents: i64 = fraction.parse().map_err(|_| invalid())?;
            if fraction.len() == 1 {
                frac_cents *= 10;
            }
            cents = cents.checked_add(frac_cents).ok_or_else(invalid)?;
        }
        Ok(Money(cents))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(value) => Money::from_number(value).map_err(serde::de::Error::custom),
            Raw::Text(text) => text.parse().map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_whole_and_fractional_amounts() {
        assert_eq!("15000.00".parse::<Money>().unwrap(), Money::from_cents(1_500_000));
        assert_eq!("15000".parse::<Money>().unwrap(), Money::from_cents(1_500_000));
        assert_eq!("0.5".parse::<Money>().unwrap(), Money::from_cents(50));
        assert_eq!("0".parse::<Money>().unwrap(), Money::ZERO);
    }

    #[test]
    fn rejects_negative_and_malformed_amounts() {
        assert!("-1.00".parse::<Money>().is_err());
        assert!("12.345".parse::<Money>().is_err());
        assert!("abc".parse::<Money>().is_err());
        assert!("".parse::<Money>().is_err());
        assert!("1.2.3".parse::<Money>().is_err());
    }

    #[test]
    fn multiplication_is_exact() {
        let unit: Money = "15000.00".parse().unwrap();
        let total = unit.checked_mul(3).unwrap();
        assert_eq!(total, Money::from_cents(4_500_000));
        assert_eq!(total.to_string(), "45000.00");
    }

    #[test]
    fn serializes_with_two_fraction_digits() {
        let amount: Money = "99.5".parse().unwrap();
        assert_eq!(serde_json::to_string(&amount).unwrap(), "\"99.50\"");
    }

    #[test]
    fn deserializes_from_number_or_text() {
        let from_number: Money = serde_json::from_str("12500.75").unwrap();
        assert_eq!(from_number, Money::from_cents(1_250_075));
        let from_text: Money = serde_json::from_str("\"12500.75\"").unwrap();
        assert_eq!(from_text, Money::from_cents(1_250_075));
        assert!(serde_json::from_str::<Money>("-3").is_err());
    }
}
