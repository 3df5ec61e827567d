use std::{fmt, str::FromStr};

use chrono::{Days, Months, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::{LedgerError, Result};

static FREQUENCY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([dDwWmMyY])(\d{1,4})?$").expect("frequency pattern compiles"));

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Day,
    Week,
    Month,
    Year,
}

impl TimeUnit {
    fn symbol(self) -> char {
        match self {
            TimeUnit::Day => 'D',
            TimeUnit::Week => 'W',
            TimeUnit::Month => 'M',
            TimeUnit::Year => 'Y',
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TimeUnit::Day => "Day",
            TimeUnit::Week => "Week",
            TimeUnit::Month => "Month",
            TimeUnit::Year => "Year",
        };
        f.write_str(label)
    }
}

/// A time unit with a multiplier, used to step dates for recurrences and statistics buckets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Frequency {
    pub every: u32,
    pub unit: TimeUnit,
}

impl Frequency {
    pub const fn new(unit: TimeUnit, every: u32) -> Self {
        Self { every, unit }
    }

    pub const fn daily() -> Self {
        Self::new(TimeUnit::Day, 1)
    }

    pub const fn weekly() -> Self {
        Self::new(TimeUnit::Week, 1)
    }

    pub const fn monthly() -> Self {
        Self::new(TimeUnit::Month, 1)
    }

    pub const fn yearly() -> Self {
        Self::new(TimeUnit::Year, 1)
    }

    /// Parses the compact `<unit>[multiplier]` form, e.g. `W1`, `m`, `d14`.
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let captures = FREQUENCY_PATTERN
            .captures(trimmed)
            .ok_or_else(|| LedgerError::invalid_format("frequency", text))?;
        let unit = match captures[1].to_ascii_lowercase().as_str() {
            "d" => TimeUnit::Day,
            "w" => TimeUnit::Week,
            "m" => TimeUnit::Month,
            _ => TimeUnit::Year,
        };
        let every = match captures.get(2) {
            Some(digits) => digits
                .as_str()
                .parse()
                .map_err(|_| LedgerError::invalid_format("frequency", text))?,
            None => 1,
        };
        Ok(Self { every, unit })
    }

    /// Steps `from` forward by `every` units. Month and year steps clamp to the end of the
    /// target month. `None` when the result is past chrono's range.
    pub fn advance(&self, from: NaiveDate) -> Option<NaiveDate> {
        let every = u64::from(self.every);
        match self.unit {
            TimeUnit::Day => from.checked_add_days(Days::new(every)),
            TimeUnit::Week => from.checked_add_days(Days::new(every * 7)),
            TimeUnit::Month => from.checked_add_months(Months::new(self.every)),
            TimeUnit::Year => self
                .every
                .checked_mul(12)
                .and_then(|months| from.checked_add_months(Months::new(months))),
        }
    }

    pub fn label(&self) -> String {
        match (self.every, &self.unit) {
            (1, TimeUnit::Day) => "Daily".into(),
            (1, TimeUnit::Week) => "Weekly".into(),
            (1, TimeUnit::Month) => "Monthly".into(),
            (1, TimeUnit::Year) => "Yearly".into(),
            (n, unit) => format!("Every {} {}{}", n, unit, if n != 1 { "s" } else { "" }),
        }
    }
}

impl Default for Frequency {
    fn default() -> Self {
        Self::monthly()
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.unit.symbol(), self.every)
    }
}

impl FromStr for Frequency {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
