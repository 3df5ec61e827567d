//! Point-in-time ledger snapshots and the linear undo/redo history over them.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    budget_list::BudgetList, collections::EntityList, debt::Debt, expense::Expense,
    recurring::RecurringRule,
};
use crate::errors::{LedgerError, Result};

/// The four ledger collections as they stood after one commit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    #[serde(default)]
    pub expenses: EntityList<Expense>,
    #[serde(default)]
    pub debts: EntityList<Debt>,
    #[serde(default)]
    pub budgets: BudgetList,
    #[serde(default)]
    pub recurring: EntityList<RecurringRule>,
}

impl LedgerSnapshot {
    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
            && self.debts.is_empty()
            && self.budgets.is_empty()
            && self.recurring.is_empty()
    }
}

/// Ordered snapshots plus a cursor at the active one.
///
/// The cursor always indexes a stored snapshot; committing while the cursor is behind the
/// newest snapshot drops the redo branch first.
#[derive(Debug, Clone)]
pub struct SnapshotHistory {
    snapshots: Vec<LedgerSnapshot>,
    cursor: usize,
}

impl SnapshotHistory {
    pub fn new(initial: LedgerSnapshot) -> Self {
        Self {
            snapshots: vec![initial],
            cursor: 0,
        }
    }

    pub fn commit(&mut self, snapshot: LedgerSnapshot) -> usize {
        let discarded = self.snapshots.len() - self.cursor - 1;
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(snapshot);
        self.cursor = self.snapshots.len() - 1;
        debug!(revision = self.cursor, discarded, "committed ledger snapshot");
        self.cursor
    }

    pub fn undo(&mut self) -> Result<&LedgerSnapshot> {
        if !self.can_undo() {
            return Err(LedgerError::NoUndoAvailable);
        }
        self.cursor -= 1;
        debug!(revision = self.cursor, "undo");
        Ok(&self.snapshots[self.cursor])
    }

    pub fn redo(&mut self) -> Result<&LedgerSnapshot> {
        if !self.can_redo() {
            return Err(LedgerError::NoRedoAvailable);
        }
        self.cursor += 1;
        debug!(revision = self.cursor, "redo");
        Ok(&self.snapshots[self.cursor])
    }

    /// Removes the newest snapshot when the cursor is on it and returns the one now current.
    pub(crate) fn discard_head(&mut self) -> Option<&LedgerSnapshot> {
        if self.cursor == 0 || self.cursor + 1 != self.snapshots.len() {
            return None;
        }
        self.snapshots.pop();
        self.cursor -= 1;
        Some(&self.snapshots[self.cursor])
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    pub fn current(&self) -> &LedgerSnapshot {
        &self.snapshots[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

impl Default for SnapshotHistory {
    fn default() -> Self {
        Self::new(LedgerSnapshot::default())
    }
}
