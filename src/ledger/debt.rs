use serde::{Deserialize, Serialize};

use super::{category::Category, collections::Identity, date::CalendarDate, money::Money};

/// Money owed to someone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    pub person_owed: String,
    pub amount: Money,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<CalendarDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl Debt {
    pub fn new(person_owed: impl Into<String>, amount: Money, category: Category) -> Self {
        Self {
            person_owed: person_owed.into(),
            amount,
            category,
            deadline: None,
            remarks: None,
        }
    }

    pub fn with_deadline(mut self, deadline: CalendarDate) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

impl Identity for Debt {
    const KIND: &'static str = "Debt";

    fn identity_equals(&self, other: &Self) -> bool {
        self.person_owed == other.person_owed && self.amount == other.amount
    }
}
