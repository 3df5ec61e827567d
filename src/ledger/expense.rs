use serde::{Deserialize, Serialize};

use super::{category::Category, collections::Identity, date::CalendarDate, money::Money};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub name: String,
    pub amount: Money,
    pub date: CalendarDate,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

/// Secondary field consulted when two same-named expenses differ in amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpenseKey {
    #[default]
    Date,
    Category,
    Remarks,
}

impl Expense {
    pub fn new(
        name: impl Into<String>,
        amount: Money,
        date: CalendarDate,
        category: Category,
    ) -> Self {
        Self {
            name: name.into(),
            amount,
            date,
            category,
            remarks: None,
        }
    }

    pub fn with_remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = Some(remarks.into());
        self
    }

    /// Same name and either the same amount or the same `key` field.
    pub fn is_same_expense(&self, other: &Expense, key: ExpenseKey) -> bool {
        if self.name != other.name {
            return false;
        }
        if self.amount == other.amount {
            return true;
        }
        match key {
            ExpenseKey::Date => self.date == other.date,
            ExpenseKey::Category => self.category == other.category,
            ExpenseKey::Remarks => self.remarks == other.remarks,
        }
    }

    pub fn falls_within(&self, start: &CalendarDate, end: &CalendarDate) -> bool {
        self.date.within(start, end)
    }
}

impl Identity for Expense {
    const KIND: &'static str = "Expense";

    fn identity_equals(&self, other: &Self) -> bool {
        self.is_same_expense(other, ExpenseKey::default())
    }
}
