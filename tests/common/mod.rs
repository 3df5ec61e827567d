#![allow(dead_code)]

use std::sync::Mutex;

use expense_core::{
    config::ConfigManager,
    core::ledger_manager::LedgerManager,
    ledger::{Budget, CalendarDate, Category, Expense, Money},
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a manager and its config store backed by a unique directory.
pub fn setup_test_env() -> (LedgerManager, ConfigManager) {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);

    let configs = ConfigManager::with_base_dir(base).expect("create config manager for temp dir");
    let manager = LedgerManager::from_config(&configs).expect("open ledger manager");
    (manager, configs)
}

pub fn date(text: &str) -> CalendarDate {
    CalendarDate::parse(text).expect("valid test date")
}

pub fn money(text: &str) -> Money {
    Money::parse(text).expect("valid test amount")
}

pub fn expense(name: &str, amount: &str, on: &str, category: Category) -> Expense {
    Expense::new(name, money(amount), date(on), category)
}

pub fn budget(category: Category, limit: &str, start: &str, end: &str) -> Budget {
    Budget::new(category, money(limit), date(start), date(end))
}
