//! Money type for representing monetary values.
//!
//! Uses an integer count of the currency's minor unit so that sums of
//! catalog prices are exact. The backend speaks plain decimal numbers in the
//! currency's base unit; [`as_decimal`] converts at the serde boundary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    INR,
    USD,
    EUR,
    GBP,
}

impl Currency {
    /// Get the currency code (e.g., "INR").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::INR => "INR",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
        }
    }

    /// Get the currency symbol (e.g., "₹").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::INR => "\u{20b9}",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        2
    }

    /// Number of minor units in one base unit.
    pub fn minor_per_major(&self) -> i64 {
        10_i64.pow(self.decimal_places())
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "INR" => Some(Currency::INR),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in the smallest currency unit (e.g., paise for INR).
    pub amount_minor: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from minor units.
    pub fn new(amount_minor: i64, currency: Currency) -> Self {
        Self {
            amount_minor,
            currency,
        }
    }

    /// Create a Money value from whole base units (e.g., rupees).
    pub fn from_major(amount: i64, currency: Currency) -> Self {
        Self::new(amount.saturating_mul(currency.minor_per_major()), currency)
    }

    /// Create a Money value from a decimal amount.
    ///
    /// ```
    /// use storefront_commerce::money::{Money, Currency};
    /// let price = Money::from_decimal(49.99, Currency::INR);
    /// assert_eq!(price.amount_minor, 4999);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let amount_minor = (amount * currency.minor_per_major() as f64).round() as i64;
        Self::new(amount_minor, currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_minor == 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount_minor < 0
    }

    /// Convert to a decimal value in base units.
    pub fn to_decimal(&self) -> f64 {
        self.amount_minor as f64 / self.currency.minor_per_major() as f64
    }

    /// Format as a display string (e.g., "₹1,049" or "₹1,049.5").
    ///
    /// Thousands are grouped and a zero fraction is omitted, the way a
    /// locale-formatted number reads.
    pub fn display(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{}{}", sign, self.currency.symbol(), self.display_amount())
    }

    /// Format the absolute amount without symbol (e.g., "1,049.5").
    pub fn display_amount(&self) -> String {
        let per_major = self.currency.minor_per_major().unsigned_abs();
        let abs = self.amount_minor.unsigned_abs();
        let mut out = group_thousands(abs / per_major);
        let minor = abs % per_major;
        if minor != 0 {
            let width = self.currency.decimal_places() as usize;
            let fraction = format!("{:0width$}", minor, width = width);
            out.push('.');
            out.push_str(fraction.trim_end_matches('0'));
        }
        out
    }

    /// Try to add another Money value, returning None on currency mismatch or overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount_minor
            .checked_add(other.amount_minor)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Try to subtract another Money value.
    pub fn try_subtract(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount_minor
            .checked_sub(other.amount_minor)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Multiply by a scalar, returning None on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        self.amount_minor
            .checked_mul(factor)
            .map(|amount| Money::new(amount, self.currency))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Serde adapter for amounts the backend sends as plain decimal numbers.
///
/// Whole amounts are written back as integers. Incoming numbers are read in
/// the default currency.
pub mod as_decimal {
    use super::{Currency, Money};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        let per_major = money.currency.minor_per_major();
        if money.amount_minor % per_major == 0 {
            serializer.serialize_i64(money.amount_minor / per_major)
        } else {
            serializer.serialize_f64(money.to_decimal())
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Ok(Money::from_decimal(amount, Currency::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_major() {
        let m = Money::from_major(999, Currency::INR);
        assert_eq!(m.amount_minor, 99_900);
    }

    #[test]
    fn test_money_from_decimal() {
        let m = Money::from_decimal(49.99, Currency::USD);
        assert_eq!(m.amount_minor, 4999);
    }

    #[test]
    fn test_money_display_groups_thousands() {
        assert_eq!(Money::from_major(1049, Currency::INR).display(), "\u{20b9}1,049");
        assert_eq!(Money::from_major(1_250_000, Currency::INR).display(), "\u{20b9}1,250,000");
        assert_eq!(Money::from_major(50, Currency::INR).display(), "\u{20b9}50");
    }

    #[test]
    fn test_money_display_trims_fraction() {
        assert_eq!(Money::new(104_950, Currency::INR).display(), "\u{20b9}1,049.5");
        assert_eq!(Money::new(4999, Currency::USD).display(), "$49.99");
        assert_eq!(Money::new(1005, Currency::USD).display(), "$10.05");
    }

    #[test]
    fn test_money_display_negative() {
        assert_eq!(Money::from_major(-50, Currency::INR).display(), "-\u{20b9}50");
    }

    #[test]
    fn test_money_checked_arithmetic() {
        let a = Money::from_major(10, Currency::INR);
        let b = Money::from_major(3, Currency::INR);
        assert_eq!(a.try_add(&b).unwrap().amount_minor, 1300);
        assert_eq!(a.try_subtract(&b).unwrap().amount_minor, 700);
        assert_eq!(a.try_multiply(4).unwrap().amount_minor, 4000);
        assert!(Money::new(i64::MAX, Currency::INR).try_multiply(2).is_none());
    }

    #[test]
    fn test_money_currency_mismatch() {
        let inr = Money::from_major(10, Currency::INR);
        let usd = Money::from_major(10, Currency::USD);
        assert!(inr.try_add(&usd).is_none());
    }

    #[test]
    fn test_as_decimal_round_trip_shape() {
        #[derive(Serialize, Deserialize)]
        struct Priced {
            #[serde(with = "as_decimal")]
            price: Money,
        }

        let parsed: Priced = serde_json::from_str(r#"{"price": 1299.5}"#).unwrap();
        assert_eq!(parsed.price.amount_minor, 129_950);

        let whole = Priced {
            price: Money::from_major(1000, Currency::INR),
        };
        assert_eq!(serde_json::to_string(&whole).unwrap(), r#"{"price":1000}"#);
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("inr"), Some(Currency::INR));
        assert_eq!(Currency::from_code("INVALID"), None);
    }
}
