use std::fmt;

use serde::{Deserialize, Serialize};

use super::{
    collections::Identity,
    date::CalendarDate,
    expense::{Expense, ExpenseKey},
    frequency::Frequency,
};
use crate::errors::{LedgerError, Result};

pub const MAX_OCCURRENCES: u16 = 999;

/// Number of times a recurring rule fires, between 1 and 999.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Occurrence(u16);

impl Occurrence {
    pub fn new(count: u16) -> Result<Self> {
        if (1..=MAX_OCCURRENCES).contains(&count) {
            Ok(Self(count))
        } else {
            Err(LedgerError::InvalidFormat(format!(
                "occurrence {count} (expected 1-{MAX_OCCURRENCES})"
            )))
        }
    }

    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed.len() > 3 || !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(LedgerError::invalid_format("occurrence", text));
        }
        let count = trimmed
            .parse()
            .map_err(|_| LedgerError::invalid_format("occurrence", text))?;
        Self::new(count)
    }

    pub fn count(&self) -> u16 {
        self.0
    }
}

impl TryFrom<u16> for Occurrence {
    type Error = LedgerError;

    fn try_from(value: u16) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Occurrence> for u16 {
    fn from(value: Occurrence) -> Self {
        value.0
    }
}

impl fmt::Display for Occurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A template expense repeated every `frequency`, `occurrence` times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringRule {
    pub expense: Expense,
    pub frequency: Frequency,
    pub occurrence: Occurrence,
}

impl RecurringRule {
    pub fn new(expense: Expense, frequency: Frequency, occurrence: Occurrence) -> Self {
        Self {
            expense,
            frequency,
            occurrence,
        }
    }

    /// Dates the rule fires on, starting with the template's own date. Each date is the
    /// previous one stepped by the frequency.
    pub fn occurrence_dates(&self) -> Result<Vec<CalendarDate>> {
        let mut dates = Vec::with_capacity(usize::from(self.occurrence.count()));
        let mut current = self.expense.date;
        dates.push(current);
        for _ in 1..self.occurrence.count() {
            current = current.step(&self.frequency)?;
            dates.push(current);
        }
        Ok(dates)
    }

    /// Materializes one expense per occurrence date.
    pub fn generate(&self) -> Result<Vec<Expense>> {
        Ok(self
            .occurrence_dates()?
            .into_iter()
            .map(|date| Expense {
                date,
                ..self.expense.clone()
            })
            .collect())
    }
}

impl Identity for RecurringRule {
    const KIND: &'static str = "Recurring expense";

    fn identity_equals(&self, other: &Self) -> bool {
        self.frequency == other.frequency
            && self.expense.is_same_expense(&other.expense, ExpenseKey::Date)
    }
}
