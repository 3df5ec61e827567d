use std::{fs, path::Path};

use tracing::info;

use crate::{errors::LedgerError, ledger::LedgerSnapshot};

/// Writes the live ledger collections to disk atomically by staging to a temporary file.
/// Undo history is never persisted.
pub fn save_snapshot_to_file(snapshot: &LedgerSnapshot, path: &Path) -> Result<(), LedgerError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    info!(path = %path.display(), "saved ledger");
    Ok(())
}

/// Loads ledger collections from disk, returning structured errors on failure.
pub fn load_snapshot_from_file(path: &Path) -> Result<LedgerSnapshot, LedgerError> {
    let data = fs::read_to_string(path)?;
    let snapshot = serde_json::from_str(&data)?;
    info!(path = %path.display(), "loaded ledger");
    Ok(snapshot)
}
