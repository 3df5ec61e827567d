use tracing::{debug, warn};

use super::{
    budget::{Budget, DEFAULT_ABOUT_TO_EXCEED_PERCENT},
    category::Category,
    collections::{EntityList, Identity},
    debt::Debt,
    expense::{Expense, ExpenseKey},
    history::{LedgerSnapshot, SnapshotHistory},
    recurring::RecurringRule,
};
use crate::core::services::{StatisticsQuery, StatisticsReport, StatisticsService};
use crate::errors::{LedgerError, Result};

/// Returned by every successful mutation: the history revision the change was committed as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitReceipt {
    pub revision: usize,
}

/// Versioned ledger of expenses, debts, budgets and recurring rules.
///
/// Mutations run against a staged copy of the live collections. Only when the whole
/// operation succeeds does the copy become live and get committed, so a rejected mutation
/// leaves both state and history untouched.
#[derive(Debug, Clone)]
pub struct Ledger {
    live: LedgerSnapshot,
    history: SnapshotHistory,
    about_to_exceed_percent: f64,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            live: LedgerSnapshot::default(),
            history: SnapshotHistory::default(),
            about_to_exceed_percent: DEFAULT_ABOUT_TO_EXCEED_PERCENT,
        }
    }

    /// Starts a fresh history whose only entry is `snapshot` (e.g. state loaded from disk).
    pub fn from_snapshot(snapshot: LedgerSnapshot) -> Result<Self> {
        Self::with_threshold(snapshot, DEFAULT_ABOUT_TO_EXCEED_PERCENT)
    }

    pub fn with_threshold(
        mut snapshot: LedgerSnapshot,
        about_to_exceed_percent: f64,
    ) -> Result<Self> {
        snapshot
            .budgets
            .refresh_spending(&snapshot.expenses, about_to_exceed_percent)?;
        Ok(Self {
            history: SnapshotHistory::new(snapshot.clone()),
            live: snapshot,
            about_to_exceed_percent,
        })
    }

    pub fn snapshot(&self) -> &LedgerSnapshot {
        &self.live
    }

    pub fn expenses(&self) -> &[Expense] {
        self.live.expenses.as_slice()
    }

    pub fn debts(&self) -> &[Debt] {
        self.live.debts.as_slice()
    }

    pub fn budgets(&self) -> &[Budget] {
        self.live.budgets.as_slice()
    }

    pub fn recurring(&self) -> &[RecurringRule] {
        self.live.recurring.as_slice()
    }

    pub fn has_expense(&self, candidate: &Expense, key: ExpenseKey) -> bool {
        self.live
            .expenses
            .iter()
            .any(|expense| expense.is_same_expense(candidate, key))
    }

    pub fn has_debt(&self, candidate: &Debt) -> bool {
        self.live.debts.contains(candidate)
    }

    pub fn has_budget(&self, candidate: &Budget) -> bool {
        self.live.budgets.contains(candidate)
    }

    pub fn has_recurring(&self, candidate: &RecurringRule) -> bool {
        self.live.recurring.contains(candidate)
    }

    pub fn filtered_expenses<P>(&self, predicate: P) -> Vec<&Expense>
    where
        P: Fn(&Expense) -> bool,
    {
        self.live.expenses.filtered(predicate)
    }

    pub fn filtered_debts<P>(&self, predicate: P) -> Vec<&Debt>
    where
        P: Fn(&Debt) -> bool,
    {
        self.live.debts.filtered(predicate)
    }

    pub fn filtered_budgets<P>(&self, predicate: P) -> Vec<&Budget>
    where
        P: Fn(&Budget) -> bool,
    {
        self.live.budgets.filtered(predicate)
    }

    pub fn filtered_recurring<P>(&self, predicate: P) -> Vec<&RecurringRule>
    where
        P: Fn(&RecurringRule) -> bool,
    {
        self.live.recurring.filtered(predicate)
    }

    pub fn budget_for(&self, category: Category) -> Option<&Budget> {
        self.live.budgets.get(category)
    }

    pub fn about_to_exceed_percent(&self) -> f64 {
        self.about_to_exceed_percent
    }

    /// Runs a statistics query over every expense in the ledger.
    pub fn run_statistics(&self, query: &StatisticsQuery) -> Result<StatisticsReport> {
        StatisticsService::run(self.live.expenses.as_slice(), query)
    }

    pub fn add_expense(&mut self, expense: Expense) -> Result<CommitReceipt> {
        self.mutate("add expense", |staged| add_unique(&mut staged.expenses, expense))
    }

    pub fn edit_expense(&mut self, target: &Expense, edited: Expense) -> Result<CommitReceipt> {
        self.mutate("edit expense", |staged| staged.expenses.replace(target, edited))
    }

    pub fn delete_expense(&mut self, target: &Expense) -> Result<CommitReceipt> {
        self.mutate("delete expense", |staged| {
            staged.expenses.remove(target).map(drop)
        })
    }

    pub fn replace_all_expenses(&mut self, expenses: Vec<Expense>) -> Result<CommitReceipt> {
        self.mutate("replace expenses", |staged| {
            staged.expenses.replace_all(expenses);
            Ok(())
        })
    }

    pub fn clear_expenses(&mut self) -> Result<CommitReceipt> {
        self.mutate("clear expenses", |staged| {
            staged.expenses.clear();
            Ok(())
        })
    }

    pub fn add_debt(&mut self, debt: Debt) -> Result<CommitReceipt> {
        self.mutate("add debt", |staged| add_unique(&mut staged.debts, debt))
    }

    pub fn edit_debt(&mut self, target: &Debt, edited: Debt) -> Result<CommitReceipt> {
        self.mutate("edit debt", |staged| staged.debts.replace(target, edited))
    }

    pub fn delete_debt(&mut self, target: &Debt) -> Result<CommitReceipt> {
        self.mutate("delete debt", |staged| staged.debts.remove(target).map(drop))
    }

    pub fn replace_all_debts(&mut self, debts: Vec<Debt>) -> Result<CommitReceipt> {
        self.mutate("replace debts", |staged| {
            staged.debts.replace_all(debts);
            Ok(())
        })
    }

    pub fn clear_debts(&mut self) -> Result<CommitReceipt> {
        self.mutate("clear debts", |staged| {
            staged.debts.clear();
            Ok(())
        })
    }

    pub fn add_budget(&mut self, budget: Budget) -> Result<CommitReceipt> {
        self.mutate("add budget", |staged| staged.budgets.add(budget))
    }

    pub fn edit_budget(&mut self, target: &Budget, edited: Budget) -> Result<CommitReceipt> {
        self.mutate("edit budget", |staged| staged.budgets.replace(target, edited))
    }

    pub fn delete_budget(&mut self, target: &Budget) -> Result<CommitReceipt> {
        self.mutate("delete budget", |staged| {
            staged.budgets.remove(target).map(drop)
        })
    }

    /// Swaps in a whole budget set. Clashing budgets inside the set are rejected the same way
    /// `add_budget` rejects them.
    pub fn replace_all_budgets(&mut self, budgets: Vec<Budget>) -> Result<CommitReceipt> {
        self.mutate("replace budgets", |staged| staged.budgets.replace_all(budgets))
    }

    pub fn clear_budgets(&mut self) -> Result<CommitReceipt> {
        self.mutate("clear budgets", |staged| {
            staged.budgets.clear();
            Ok(())
        })
    }

    /// Adds a rule once every occurrence date is known to be representable.
    pub fn add_recurring(&mut self, rule: RecurringRule) -> Result<CommitReceipt> {
        self.mutate("add recurring", |staged| {
            rule.occurrence_dates()?;
            add_unique(&mut staged.recurring, rule)
        })
    }

    pub fn edit_recurring(
        &mut self,
        target: &RecurringRule,
        edited: RecurringRule,
    ) -> Result<CommitReceipt> {
        self.mutate("edit recurring", |staged| {
            edited.occurrence_dates()?;
            staged.recurring.replace(target, edited)
        })
    }

    pub fn delete_recurring(&mut self, target: &RecurringRule) -> Result<CommitReceipt> {
        self.mutate("delete recurring", |staged| {
            staged.recurring.remove(target).map(drop)
        })
    }

    pub fn replace_all_recurring(&mut self, rules: Vec<RecurringRule>) -> Result<CommitReceipt> {
        self.mutate("replace recurring", |staged| {
            staged.recurring.replace_all(rules);
            Ok(())
        })
    }

    pub fn clear_recurring(&mut self) -> Result<CommitReceipt> {
        self.mutate("clear recurring", |staged| {
            staged.recurring.clear();
            Ok(())
        })
    }

    /// Adds every expense generated by a stored recurring rule in a single commit.
    pub fn apply_recurring(&mut self, rule: &RecurringRule) -> Result<CommitReceipt> {
        self.mutate("apply recurring", |staged| {
            if !staged.recurring.contains(rule) {
                return Err(LedgerError::NotFound(RecurringRule::KIND.to_string()));
            }
            for expense in rule.generate()? {
                staged.expenses.add(expense);
            }
            Ok(())
        })
    }

    /// Empties all four collections.
    pub fn clear(&mut self) -> Result<CommitReceipt> {
        self.mutate("clear ledger", |staged| {
            *staged = LedgerSnapshot::default();
            Ok(())
        })
    }

    /// Records the live collections as a new history entry.
    pub fn commit(&mut self) -> CommitReceipt {
        CommitReceipt {
            revision: self.history.commit(self.live.clone()),
        }
    }

    pub fn undo(&mut self) -> Result<()> {
        self.live = self.history.undo()?.clone();
        Ok(())
    }

    pub fn redo(&mut self) -> Result<()> {
        self.live = self.history.redo()?.clone();
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn revision(&self) -> usize {
        self.history.cursor()
    }

    /// Drops the newest commit and restores the state before it. Used when a committed change
    /// could not be persisted. Does nothing unless the cursor is on the newest commit.
    pub(crate) fn discard_last_commit(&mut self) {
        if let Some(previous) = self.history.discard_head() {
            self.live = previous.clone();
            debug!(revision = self.history.cursor(), "discarded last commit");
        }
    }

    fn mutate<F>(&mut self, operation: &'static str, apply: F) -> Result<CommitReceipt>
    where
        F: FnOnce(&mut LedgerSnapshot) -> Result<()>,
    {
        let threshold = self.about_to_exceed_percent;
        let mut staged = self.live.clone();
        let outcome = apply(&mut staged).and_then(|()| {
            staged
                .budgets
                .refresh_spending(&staged.expenses, threshold)
        });
        if let Err(err) = outcome {
            warn!(operation, error = %err, "ledger mutation rejected");
            return Err(err);
        }
        self.live = staged;
        let receipt = self.commit();
        debug!(operation, revision = receipt.revision, "ledger mutation applied");
        Ok(receipt)
    }
}

fn add_unique<T: Identity>(list: &mut EntityList<T>, item: T) -> Result<()> {
    if list.contains(&item) {
        return Err(LedgerError::Duplicate(T::KIND.to_lowercase()));
    }
    list.add(item);
    Ok(())
}
