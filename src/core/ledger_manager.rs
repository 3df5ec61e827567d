use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::{Config, ConfigManager};
use crate::errors::LedgerError;
use crate::ledger::{CommitReceipt, Ledger};
use crate::utils::persistence::{load_snapshot_from_file, save_snapshot_to_file};

/// Facade that keeps a ledger and its backing file in sync.
///
/// The ledger itself never touches disk; this type saves whenever a mutation hands back a
/// commit receipt or the history cursor moves.
pub struct LedgerManager {
    ledger: Ledger,
    path: PathBuf,
}

impl LedgerManager {
    /// Opens the ledger file named by the stored configuration.
    pub fn from_config(configs: &ConfigManager) -> Result<Self, LedgerError> {
        let config = configs.load()?;
        let path = configs.ledger_path(&config);
        Self::open(&config, path)
    }

    /// Loads `path` if it exists, otherwise starts an empty ledger that will be written there.
    pub fn open(config: &Config, path: PathBuf) -> Result<Self, LedgerError> {
        let snapshot = if path.exists() {
            load_snapshot_from_file(&path)?
        } else {
            info!(path = %path.display(), "no ledger file yet, starting empty");
            Default::default()
        };
        Ok(Self {
            ledger: Ledger::with_threshold(snapshot, config.about_to_exceed_percent)?,
            path,
        })
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Runs a ledger mutation and persists the result when it commits. If the save fails
    /// the commit is dropped again, so memory and disk stay in step.
    pub fn apply<F>(&mut self, mutation: F) -> Result<CommitReceipt, LedgerError>
    where
        F: FnOnce(&mut Ledger) -> Result<CommitReceipt, LedgerError>,
    {
        let receipt = mutation(&mut self.ledger)?;
        if let Err(err) = self.save() {
            warn!(revision = receipt.revision, error = %err, "save failed, rolling back commit");
            self.ledger.discard_last_commit();
            return Err(err);
        }
        Ok(receipt)
    }

    pub fn undo(&mut self) -> Result<(), LedgerError> {
        self.ledger.undo()?;
        if let Err(err) = self.save() {
            self.ledger.redo()?;
            return Err(err);
        }
        Ok(())
    }

    pub fn redo(&mut self) -> Result<(), LedgerError> {
        self.ledger.redo()?;
        if let Err(err) = self.save() {
            self.ledger.undo()?;
            return Err(err);
        }
        Ok(())
    }

    pub fn save(&self) -> Result<(), LedgerError> {
        save_snapshot_to_file(self.ledger.snapshot(), &self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{CalendarDate, Category, Debt, Expense, Money};
    use std::fs;
    use tempfile::tempdir;

    fn coffee() -> Expense {
        Expense::new(
            "Coffee",
            Money::from_cents(450),
            CalendarDate::parse("02-03-2019").unwrap(),
            Category::Food,
        )
    }

    #[test]
    fn committed_mutations_are_saved() {
        let temp = tempdir().unwrap();
        let configs = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let mut manager = LedgerManager::from_config(&configs).unwrap();
        assert!(!manager.path().exists());

        manager.apply(|ledger| ledger.add_expense(coffee())).unwrap();
        assert!(manager.path().exists());

        let reopened = LedgerManager::from_config(&configs).unwrap();
        assert_eq!(reopened.ledger().expenses(), &[coffee()]);
        assert!(!reopened.ledger().can_undo());
    }

    #[test]
    fn rejected_mutation_does_not_write() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("ledger.json");
        let mut manager = LedgerManager::open(&Config::default(), path.clone()).unwrap();
        let err = manager
            .apply(|ledger| {
                ledger.delete_debt(&Debt::new("Nobody", Money::from_cents(1), Category::Others))
            })
            .unwrap_err();
        assert!(matches!(err, LedgerError::NotFound(_)));
        assert!(!path.exists());
    }

    #[test]
    fn undo_and_redo_persist_cursor_moves() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("ledger.json");
        let mut manager = LedgerManager::open(&Config::default(), path.clone()).unwrap();
        manager.apply(|ledger| ledger.add_expense(coffee())).unwrap();

        manager.undo().unwrap();
        let on_disk = fs::read_to_string(&path).unwrap();
        assert!(!on_disk.contains("Coffee"));

        manager.redo().unwrap();
        let on_disk = fs::read_to_string(&path).unwrap();
        assert!(on_disk.contains("Coffee"));
    }

    #[test]
    fn failed_save_rolls_back_the_commit() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("ledger.json");
        let mut manager = LedgerManager::open(&Config::default(), path.clone()).unwrap();
        manager.apply(|ledger| ledger.add_expense(coffee())).unwrap();

        fs::create_dir_all(path.with_extension("tmp")).unwrap();
        let tea = Expense::new(
            "Tea",
            Money::from_cents(300),
            CalendarDate::parse("03-03-2019").unwrap(),
            Category::Food,
        );
        let err = manager.apply(|ledger| ledger.add_expense(tea)).unwrap_err();
        assert!(matches!(err, LedgerError::Io(_)), "{err:?}");
        assert_eq!(manager.ledger().expenses(), &[coffee()]);
        assert_eq!(manager.ledger().revision(), 1);

        let err = manager.undo().unwrap_err();
        assert!(matches!(err, LedgerError::Io(_)));
        assert_eq!(manager.ledger().expenses(), &[coffee()]);
        assert!(manager.ledger().can_undo());
    }
}
