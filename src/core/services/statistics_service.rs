//! Per-category spending statistics over date windows.
//!
//! All accumulation happens in integer cents; floating point is only used to derive each
//! category's share of the window total.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{LedgerError, Result};
use crate::ledger::{
    category::Category, date::CalendarDate, expense::Expense, frequency::Frequency, money::Money,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatisticsKind {
    Summary,
    Compare,
    Trend,
}

impl fmt::Display for StatisticsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StatisticsKind::Summary => "Summary",
            StatisticsKind::Compare => "Compare",
            StatisticsKind::Trend => "Trend",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatisticsQuery {
    /// Totals inside `[start, end]`.
    Summary { start: CalendarDate, end: CalendarDate },
    /// Side-by-side totals for `[first_start, first_start + frequency]` and the same span
    /// from `second_start`.
    Compare {
        first_start: CalendarDate,
        second_start: CalendarDate,
        frequency: Frequency,
    },
    /// Totals for consecutive `frequency`-long buckets covering `[start, end]`.
    Trend {
        start: CalendarDate,
        end: CalendarDate,
        frequency: Frequency,
    },
}

impl StatisticsQuery {
    /// Builds a query from loosely shaped arguments. `second` is the end date for summary
    /// and trend queries and the second start date for compare queries.
    pub fn from_parts(
        kind: StatisticsKind,
        first: CalendarDate,
        second: Option<CalendarDate>,
        frequency: Option<Frequency>,
    ) -> Result<Self> {
        let second = second.ok_or_else(|| {
            LedgerError::InvalidFormat(format!("{kind} statistics need two dates"))
        })?;
        match (kind, frequency) {
            (StatisticsKind::Summary, None) => Ok(StatisticsQuery::Summary {
                start: first,
                end: second,
            }),
            (StatisticsKind::Summary, Some(_)) => Err(LedgerError::InvalidFormat(
                "Summary statistics do not take a frequency".into(),
            )),
            (StatisticsKind::Compare, Some(frequency)) => Ok(StatisticsQuery::Compare {
                first_start: first,
                second_start: second,
                frequency,
            }),
            (StatisticsKind::Trend, Some(frequency)) => Ok(StatisticsQuery::Trend {
                start: first,
                end: second,
                frequency,
            }),
            (kind, None) => Err(LedgerError::InvalidFormat(format!(
                "{kind} statistics need a frequency"
            ))),
        }
    }

    pub fn kind(&self) -> StatisticsKind {
        match self {
            StatisticsQuery::Summary { .. } => StatisticsKind::Summary,
            StatisticsQuery::Compare { .. } => StatisticsKind::Compare,
            StatisticsQuery::Trend { .. } => StatisticsKind::Trend,
        }
    }

    pub fn frequency(&self) -> Option<Frequency> {
        match self {
            StatisticsQuery::Summary { .. } => None,
            StatisticsQuery::Compare { frequency, .. } | StatisticsQuery::Trend { frequency, .. } => {
                Some(*frequency)
            }
        }
    }
}

/// Inclusive date window a table was computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportWindow {
    pub start: CalendarDate,
    pub end: CalendarDate,
}

impl ReportWindow {
    pub fn is_empty(&self) -> bool {
        self.end.before(&self.start)
    }
}

impl fmt::Display for ReportWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRow {
    pub category: Category,
    pub total: Money,
    pub percentage: f64,
}

/// One row per category, in [`Category::ALL`] order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTable {
    pub window: ReportWindow,
    pub rows: Vec<CategoryRow>,
    pub total: Money,
}

impl CategoryTable {
    pub fn row(&self, category: Category) -> &CategoryRow {
        &self.rows[category.index()]
    }

    pub fn is_blank(&self) -> bool {
        self.total.is_zero()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsReport {
    pub kind: StatisticsKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<Frequency>,
    pub tables: Vec<CategoryTable>,
}

impl StatisticsReport {
    pub fn frequency_label(&self) -> Option<String> {
        self.frequency.map(|frequency| frequency.label())
    }
}

/// Stateless statistics over a caller-selected slice of expenses.
pub struct StatisticsService;

impl StatisticsService {
    pub fn run(expenses: &[Expense], query: &StatisticsQuery) -> Result<StatisticsReport> {
        let tables = match *query {
            StatisticsQuery::Summary { start, end } => vec![Self::summary(expenses, start, end)?],
            StatisticsQuery::Compare {
                first_start,
                second_start,
                frequency,
            } => Self::compare(expenses, first_start, second_start, &frequency)?.to_vec(),
            StatisticsQuery::Trend {
                start,
                end,
                frequency,
            } => Self::trend(expenses, start, end, &frequency)?,
        };
        debug!(
            kind = %query.kind(),
            tables = tables.len(),
            expenses = expenses.len(),
            "statistics computed"
        );
        Ok(StatisticsReport {
            kind: query.kind(),
            frequency: query.frequency(),
            tables,
        })
    }

    /// Totals inside `[start, end]`. A reversed window yields an all-zero table.
    pub fn summary(
        expenses: &[Expense],
        start: CalendarDate,
        end: CalendarDate,
    ) -> Result<CategoryTable> {
        let window = ReportWindow { start, end };
        let mut totals = [Money::zero(); Category::ALL.len()];
        if !window.is_empty() {
            for expense in expenses.iter().filter(|e| e.falls_within(&start, &end)) {
                let slot = &mut totals[expense.category.index()];
                *slot = slot
                    .checked_add(expense.amount)
                    .ok_or(LedgerError::AmountOverflow)?;
            }
        }
        let total = Money::try_sum(totals)?;
        let rows = Category::ALL
            .iter()
            .map(|category| {
                let amount = totals[category.index()];
                CategoryRow {
                    category: *category,
                    total: amount,
                    percentage: amount.percentage_of(total),
                }
            })
            .collect();
        Ok(CategoryTable {
            window,
            rows,
            total,
        })
    }

    /// Two tables, each spanning `[start, start + frequency]`.
    pub fn compare(
        expenses: &[Expense],
        first_start: CalendarDate,
        second_start: CalendarDate,
        frequency: &Frequency,
    ) -> Result<[CategoryTable; 2]> {
        let first = Self::summary(expenses, first_start, first_start.step(frequency)?)?;
        let second = Self::summary(expenses, second_start, second_start.step(frequency)?)?;
        Ok([first, second])
    }

    /// Consecutive buckets from `start`, each ending the day before the next one begins and
    /// the last one clipped to `end`.
    pub fn trend(
        expenses: &[Expense],
        start: CalendarDate,
        end: CalendarDate,
        frequency: &Frequency,
    ) -> Result<Vec<CategoryTable>> {
        if end.before(&start) {
            return Err(LedgerError::InvalidRange(format!(
                "end date {end} is before start date {start}"
            )));
        }
        let mut tables = Vec::new();
        let mut bucket_start = start;
        while !bucket_start.after(&end) {
            let next_start = bucket_start.step(frequency)?;
            if !next_start.after(&bucket_start) {
                return Err(LedgerError::InvalidRange(format!(
                    "frequency {frequency} does not advance past {bucket_start}"
                )));
            }
            let bucket_end = next_start.pred().min(end);
            tables.push(Self::summary(expenses, bucket_start, bucket_end)?);
            bucket_start = next_start;
        }
        Ok(tables)
    }
}
