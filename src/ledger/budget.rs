use serde::{Deserialize, Serialize};

use super::{
    category::Category, collections::Identity, date::CalendarDate, expense::Expense, money::Money,
};
use crate::errors::Result;

pub const DEFAULT_ABOUT_TO_EXCEED_PERCENT: f64 = 90.0;

/// A spending guardrail for one category over an inclusive date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub category: Category,
    pub limit: Money,
    pub start_date: CalendarDate,
    pub end_date: CalendarDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    #[serde(default)]
    total_spent: Money,
    #[serde(default)]
    percentage: f64,
    #[serde(default)]
    about_to_exceed: bool,
}

impl Budget {
    pub fn new(
        category: Category,
        limit: Money,
        start_date: CalendarDate,
        end_date: CalendarDate,
    ) -> Self {
        Self {
            category,
            limit,
            start_date,
            end_date,
            remarks: None,
            total_spent: Money::zero(),
            percentage: 0.0,
            about_to_exceed: false,
        }
    }

    pub fn with_remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = Some(remarks.into());
        self
    }

    pub fn total_spent(&self) -> Money {
        self.total_spent
    }

    pub fn percentage(&self) -> f64 {
        self.percentage
    }

    pub fn is_about_to_exceed(&self) -> bool {
        self.about_to_exceed
    }

    pub fn covers(&self, date: &CalendarDate) -> bool {
        date.within(&self.start_date, &self.end_date)
    }

    /// Same category, limit and period; derived spending is ignored.
    pub fn same_definition(&self, other: &Budget) -> bool {
        self.category == other.category
            && self.limit == other.limit
            && self.start_date == other.start_date
            && self.end_date == other.end_date
    }

    /// Recomputes spending from expenses in this budget's category and period.
    pub fn refresh_spending<'a, I>(&mut self, expenses: I, threshold_percent: f64) -> Result<()>
    where
        I: IntoIterator<Item = &'a Expense>,
    {
        let spent = Money::try_sum(
            expenses
                .into_iter()
                .filter(|expense| expense.category == self.category && self.covers(&expense.date))
                .map(|expense| expense.amount),
        )?;
        self.total_spent = spent;
        self.percentage = if !self.limit.is_zero() {
            self.total_spent.percentage_of(self.limit)
        } else if !self.total_spent.is_zero() {
            100.0
        } else {
            0.0
        };
        self.about_to_exceed = self.percentage >= threshold_percent;
        Ok(())
    }
}

impl Identity for Budget {
    const KIND: &'static str = "Budget";

    fn identity_equals(&self, other: &Self) -> bool {
        self.category == other.category
            && self.start_date == other.start_date
            && self.end_date == other.end_date
    }
}
