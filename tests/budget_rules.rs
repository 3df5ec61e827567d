mod common;

use common::{budget, date, expense};
use expense_core::{
    errors::LedgerError,
    ledger::{Category, Ledger},
};

#[test]
fn overlapping_budget_in_same_category_is_rejected() {
    let mut ledger = Ledger::new();
    ledger
        .add_budget(budget(Category::Food, "200", "01-01-2019", "31-01-2019"))
        .unwrap();

    let err = ledger
        .add_budget(budget(Category::Food, "150", "15-01-2019", "15-02-2019"))
        .unwrap_err();
    assert!(matches!(err, LedgerError::Overlap(_)), "{err:?}");

    ledger
        .add_budget(budget(Category::Transport, "80", "01-01-2019", "31-01-2019"))
        .unwrap();
    assert_eq!(ledger.budgets().len(), 2);
}

#[test]
fn shared_boundary_day_counts_as_overlap() {
    let mut ledger = Ledger::new();
    ledger
        .add_budget(budget(Category::Utilities, "90", "01-01-2019", "31-01-2019"))
        .unwrap();
    let err = ledger
        .add_budget(budget(Category::Utilities, "90", "31-01-2019", "28-02-2019"))
        .unwrap_err();
    assert!(matches!(err, LedgerError::Overlap(_)));

    ledger
        .add_budget(budget(Category::Utilities, "90", "01-02-2019", "28-02-2019"))
        .unwrap();
}

#[test]
fn equal_budget_reports_duplicate_before_overlap() {
    let mut ledger = Ledger::new();
    ledger
        .add_budget(budget(Category::Travel, "500", "01-06-2019", "30-06-2019"))
        .unwrap();
    let err = ledger
        .add_budget(budget(Category::Travel, "500.00", "01-06-2019", "30-06-2019"))
        .unwrap_err();
    assert!(matches!(err, LedgerError::Duplicate(_)), "{err:?}");

    let err = ledger
        .add_budget(budget(Category::Travel, "750", "01-06-2019", "30-06-2019"))
        .unwrap_err();
    assert!(matches!(err, LedgerError::Overlap(_)), "{err:?}");
}

#[test]
fn editing_a_budget_ignores_its_own_interval() {
    let mut ledger = Ledger::new();
    let march = budget(Category::Shopping, "100", "01-03-2019", "31-03-2019");
    ledger.add_budget(march.clone()).unwrap();
    ledger
        .add_budget(budget(Category::Shopping, "100", "01-05-2019", "31-05-2019"))
        .unwrap();

    let widened = budget(Category::Shopping, "120", "01-03-2019", "15-04-2019");
    ledger.edit_budget(&march, widened).unwrap();

    let march_again = budget(Category::Shopping, "120", "01-03-2019", "15-04-2019");
    let err = ledger
        .edit_budget(
            &march_again,
            budget(Category::Shopping, "120", "01-03-2019", "10-05-2019"),
        )
        .unwrap_err();
    assert!(matches!(err, LedgerError::Overlap(_)));
}

#[test]
fn spending_tracks_expenses_inside_the_window() {
    let mut ledger = Ledger::new();
    ledger
        .add_budget(budget(Category::Entertainment, "50", "01-04-2019", "30-04-2019"))
        .unwrap();
    ledger
        .add_expense(expense("Cinema", "20", "05-04-2019", Category::Entertainment))
        .unwrap();
    ledger
        .add_expense(expense("Concert", "60", "05-05-2019", Category::Entertainment))
        .unwrap();
    ledger
        .add_expense(expense("Dinner", "30", "06-04-2019", Category::Food))
        .unwrap();

    let tracked = ledger.budget_for(Category::Entertainment).unwrap();
    assert_eq!(tracked.total_spent().cents(), 2_000);
    assert_eq!(tracked.percentage(), 40.0);
    assert!(!tracked.is_about_to_exceed());

    ledger
        .add_expense(expense("Games", "26", "20-04-2019", Category::Entertainment))
        .unwrap();
    let tracked = ledger.budget_for(Category::Entertainment).unwrap();
    assert_eq!(tracked.percentage(), 92.0);
    assert!(tracked.is_about_to_exceed());
    assert!(tracked.covers(&date("30-04-2019")));
}
