//! Ledger domain models, the versioned snapshot store, and value types.

pub mod budget;
pub mod budget_list;
pub mod category;
pub mod collections;
pub mod date;
pub mod debt;
pub mod expense;
pub mod frequency;
pub mod history;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod money;
pub mod recurring;

pub use budget::Budget;
pub use budget_list::BudgetList;
pub use category::Category;
pub use collections::{EntityList, Identity};
pub use date::CalendarDate;
pub use debt::Debt;
pub use expense::{Expense, ExpenseKey};
pub use frequency::{Frequency, TimeUnit};
pub use history::{LedgerSnapshot, SnapshotHistory};
pub use ledger::{CommitReceipt, Ledger};
pub use money::Money;
pub use recurring::{Occurrence, RecurringRule};
