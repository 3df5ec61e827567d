use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::{LedgerError, Result};

/// Closed set of spending categories shared by expenses, debts and budgets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Food,
    Transport,
    Shopping,
    Work,
    Utilities,
    Healthcare,
    Entertainment,
    Travel,
    Others,
}

impl Category {
    /// Every category, in reporting order.
    pub const ALL: [Category; 9] = [
        Category::Food,
        Category::Transport,
        Category::Shopping,
        Category::Work,
        Category::Utilities,
        Category::Healthcare,
        Category::Entertainment,
        Category::Travel,
        Category::Others,
    ];

    pub fn parse(text: &str) -> Result<Self> {
        let wanted = text.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| LedgerError::invalid_format("category", text))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Shopping => "Shopping",
            Category::Work => "Work",
            Category::Utilities => "Utilities",
            Category::Healthcare => "Healthcare",
            Category::Entertainment => "Entertainment",
            Category::Travel => "Travel",
            Category::Others => "Others",
        }
    }

    /// Position within [`Category::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
