use std::{fmt, str::FromStr};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::{LedgerError, Result};

static AMOUNT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)(?:\.(\d{1,2}))?$").expect("amount pattern compiles"));

/// Non-negative monetary amount stored as integer cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Parses a dollar string with up to two fraction digits, e.g. `10`, `10.5`, `10.50`.
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let captures = AMOUNT_PATTERN
            .captures(trimmed)
            .ok_or_else(|| LedgerError::invalid_format("amount", text))?;
        let whole: i64 = captures[1]
            .parse()
            .map_err(|_| LedgerError::invalid_format("amount", text))?;
        let fraction = match captures.get(2).map(|m| m.as_str()) {
            Some(digits) if digits.len() == 1 => digits.parse::<i64>().unwrap_or(0) * 10,
            Some(digits) => digits.parse::<i64>().unwrap_or(0),
            None => 0,
        };
        whole
            .checked_mul(100)
            .and_then(|cents| cents.checked_add(fraction))
            .map(Self)
            .ok_or_else(|| LedgerError::invalid_format("amount", text))
    }

    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Adds up `amounts`, failing instead of wrapping past the `i64` range.
    pub fn try_sum<I>(amounts: I) -> Result<Money>
    where
        I: IntoIterator<Item = Money>,
    {
        amounts.into_iter().try_fold(Money::zero(), |total, amount| {
            total.checked_add(amount).ok_or(LedgerError::AmountOverflow)
        })
    }

    /// Share of `total` represented by this amount, in percent.
    pub fn percentage_of(self, total: Money) -> f64 {
        if total.is_zero() {
            return 0.0;
        }
        self.0 as f64 * 100.0 / total.0 as f64
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let cents = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", cents / 100, cents % 100)
    }
}

impl FromStr for Money {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
