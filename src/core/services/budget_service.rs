//! Budget overlap and duplication rules.

use tracing::warn;

use crate::errors::{LedgerError, Result};
use crate::ledger::{budget::Budget, collections::Identity};

/// Stateless validation of budgets against the existing budget collection.
pub struct BudgetService;

impl BudgetService {
    /// Two budgets overlap when they share a category and their inclusive periods intersect.
    /// Periods that only touch on a boundary day overlap.
    pub fn overlaps(a: &Budget, b: &Budget) -> bool {
        if a.category != b.category {
            return false;
        }
        let disjoint = a.end_date.before(&b.start_date) || b.end_date.before(&a.start_date);
        !disjoint
    }

    /// Checks that `candidate` can be appended to `existing`.
    pub fn validate_add(existing: &[Budget], candidate: &Budget) -> Result<()> {
        if existing.iter().any(|budget| budget.same_definition(candidate)) {
            warn!(category = %candidate.category, "rejected duplicate budget");
            return Err(LedgerError::Duplicate(format!(
                "{} budget {} to {}",
                candidate.category, candidate.start_date, candidate.end_date
            )));
        }
        Self::ensure_no_overlap(existing.iter(), candidate)
    }

    /// Checks that `target` exists and that `edited` does not overlap any other budget.
    pub fn validate_replace(existing: &[Budget], target: &Budget, edited: &Budget) -> Result<()> {
        let target_idx = existing
            .iter()
            .position(|budget| budget.identity_equals(target))
            .ok_or_else(|| LedgerError::NotFound(Budget::KIND.to_string()))?;
        let others = existing
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != target_idx)
            .map(|(_, budget)| budget);
        Self::ensure_no_overlap(others, edited)
    }

    fn ensure_no_overlap<'a, I>(others: I, candidate: &Budget) -> Result<()>
    where
        I: IntoIterator<Item = &'a Budget>,
    {
        match others
            .into_iter()
            .find(|budget| Self::overlaps(budget, candidate))
        {
            Some(clash) => {
                warn!(
                    category = %candidate.category,
                    existing_start = %clash.start_date,
                    existing_end = %clash.end_date,
                    "rejected overlapping budget"
                );
                Err(LedgerError::Overlap(candidate.category.to_string()))
            }
            None => Ok(()),
        }
    }
}
