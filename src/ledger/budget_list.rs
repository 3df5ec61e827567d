use serde::{Deserialize, Deserializer, Serialize};

use super::{budget::Budget, category::Category, collections::EntityList, expense::Expense};
use crate::core::services::BudgetService;
use crate::errors::Result;

/// Budget collection that keeps same-category periods from overlapping.
///
/// Deserializing runs the same validation as [`BudgetList::replace_all`], so a ledger file
/// with clashing budgets is rejected on load.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BudgetList {
    inner: EntityList<Budget>,
}

impl BudgetList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, candidate: &Budget) -> bool {
        self.inner.contains(candidate)
    }

    pub fn add(&mut self, candidate: Budget) -> Result<()> {
        BudgetService::validate_add(self.inner.as_slice(), &candidate)?;
        self.inner.add(candidate);
        Ok(())
    }

    pub fn replace(&mut self, target: &Budget, edited: Budget) -> Result<()> {
        BudgetService::validate_replace(self.inner.as_slice(), target, &edited)?;
        self.inner.replace(target, edited)
    }

    pub fn remove(&mut self, target: &Budget) -> Result<Budget> {
        self.inner.remove(target)
    }

    /// Swaps in a whole budget set, validating each budget against the ones before it.
    /// On error the list is left as it was.
    pub fn replace_all(&mut self, budgets: Vec<Budget>) -> Result<()> {
        let mut staged = EntityList::new();
        for budget in budgets {
            BudgetService::validate_add(staged.as_slice(), &budget)?;
            staged.add(budget);
        }
        self.inner = staged;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// First budget defined for `category`.
    pub fn get(&self, category: Category) -> Option<&Budget> {
        self.inner.find(|budget| budget.category == category)
    }

    pub fn filtered<P>(&self, predicate: P) -> Vec<&Budget>
    where
        P: Fn(&Budget) -> bool,
    {
        self.inner.filtered(predicate)
    }

    pub fn refresh_spending(
        &mut self,
        expenses: &EntityList<Expense>,
        threshold_percent: f64,
    ) -> Result<()> {
        for budget in self.inner.iter_mut() {
            budget.refresh_spending(expenses, threshold_percent)?;
        }
        Ok(())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Budget> {
        self.inner.iter()
    }

    pub fn as_slice(&self) -> &[Budget] {
        self.inner.as_slice()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<'de> Deserialize<'de> for BudgetList {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let budgets = Vec::<Budget>::deserialize(deserializer)?;
        let mut list = BudgetList::new();
        list.replace_all(budgets).map_err(serde::de::Error::custom)?;
        Ok(list)
    }
}
