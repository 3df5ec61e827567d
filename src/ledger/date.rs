use std::{fmt, str::FromStr};

use chrono::{Datelike, Duration, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::frequency::Frequency;
use crate::errors::{LedgerError, Result};

static DATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{2})-(\d{2})-(\d{4})$").expect("date pattern compiles"));

const MAX_YEAR: i32 = 9999;

/// A `dd-mm-yyyy` calendar date between years 0 and 9999.
///
/// Validation only checks the shape and the day/month ranges, so `31-02-2019` is accepted.
/// Arithmetic treats such a date as the last real day of its month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CalendarDate {
    // Field order drives the derived ordering: year, month, day.
    year: i32,
    month: u32,
    day: u32,
}

impl CalendarDate {
    pub fn new(day: u32, month: u32, year: i32) -> Result<Self> {
        if !(1..=31).contains(&day) || !(1..=12).contains(&month) || !(0..=MAX_YEAR).contains(&year) {
            return Err(LedgerError::InvalidFormat(format!(
                "date {day:02}-{month:02}-{year:04}"
            )));
        }
        Ok(Self { year, month, day })
    }

    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let captures = DATE_PATTERN
            .captures(trimmed)
            .ok_or_else(|| LedgerError::invalid_format("date", text))?;
        let field = |idx: usize| -> Result<u32> {
            captures[idx]
                .parse()
                .map_err(|_| LedgerError::invalid_format("date", text))
        };
        let (day, month, year) = (field(1)?, field(2)?, field(3)?);
        Self::new(day, month, year as i32).map_err(|_| LedgerError::invalid_format("date", text))
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn before(&self, other: &CalendarDate) -> bool {
        self < other
    }

    pub fn after(&self, other: &CalendarDate) -> bool {
        self > other
    }

    /// Inclusive range check.
    pub fn within(&self, start: &CalendarDate, end: &CalendarDate) -> bool {
        !self.before(start) && !self.after(end)
    }

    /// Real calendar date, clamping an out-of-range day to the end of its month.
    pub fn to_naive(&self) -> NaiveDate {
        let day = self.day.min(days_in_month(self.year, self.month));
        NaiveDate::from_ymd_opt(self.year, self.month, day).unwrap_or(NaiveDate::MIN)
    }

    /// Steps forward by `frequency`. Landing past 31-12-9999 is an `InvalidRange`.
    pub fn step(&self, frequency: &Frequency) -> Result<CalendarDate> {
        frequency
            .advance(self.to_naive())
            .and_then(|next| Self::try_from(next).ok())
            .ok_or_else(|| {
                LedgerError::InvalidRange(format!("{self} plus {frequency} is past year {MAX_YEAR}"))
            })
    }

    /// The previous calendar day, or `self` on the first representable day.
    pub fn pred(&self) -> CalendarDate {
        self.to_naive()
            .pred_opt()
            .and_then(|prev| Self::try_from(prev).ok())
            .unwrap_or(*self)
    }
}

impl TryFrom<NaiveDate> for CalendarDate {
    type Error = LedgerError;

    fn try_from(date: NaiveDate) -> Result<Self> {
        Self::new(date.day(), date.month(), date.year())
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}-{:04}", self.day, self.month, self.year)
    }
}

impl FromStr for CalendarDate {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CalendarDate {
    type Error = LedgerError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<CalendarDate> for String {
    fn from(date: CalendarDate) -> Self {
        date.to_string()
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .map(|first_next| (first_next - Duration::days(1)).day())
        .unwrap_or(28)
}
