use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use thiserror::Error;

use crate::accounting::ledger::Ledger;

/// Word the user must type before the ledger can be wiped.
pub const RESET_CONFIRMATION_WORD: &str = "YES";

const TMP_SUFFIX: &str = "tmp";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("snapshot is corrupt: {0}")]
    SnapshotCorrupt(#[from] serde_json::Error),
    #[error("snapshot io error: {0}")]
    Io(#[from] io::Error),
}

/// Proof that the user explicitly confirmed a reset.
#[derive(Debug)]
pub struct ResetConfirmation(());

impl ResetConfirmation {
    pub fn from_input(input: &str) -> Option<ResetConfirmation> {
        (input == RESET_CONFIRMATION_WORD).then_some(ResetConfirmation(()))
    }
}

/// JSON snapshot file holding the whole ledger.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> SnapshotStore {
        SnapshotStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the snapshot. A missing file is an empty ledger, anything that
    /// cannot be read or parsed is an error.
    pub fn try_load(&self) -> Result<Ledger, StoreError> {
        if !self.path.exists() {
            debug!("no snapshot at {}, starting empty", self.path.display());
            return Ok(Ledger::new());
        }

        let data = fs::read_to_string(&self.path)?;
        let ledger: Ledger = serde_json::from_str(&data)?;
        debug!(
            "loaded snapshot from {}, transactions={}",
            self.path.display(),
            ledger.transactions().len()
        );

        Ok(ledger)
    }

    /// Like [`SnapshotStore::try_load`], but recovers from a bad snapshot by
    /// starting over with an empty ledger.
    pub fn load(&self) -> Ledger {
        match self.try_load() {
            Ok(ledger) => ledger,
            Err(err) => {
                warn!("ignoring snapshot at {}, err={}", self.path.display(), err);
                Ledger::new()
            },
        }
    }

    /// Overwrites the snapshot with the full ledger state.
    pub fn save(&self, ledger: &Ledger) -> Result<(), StoreError> {
        let data = serde_json::to_string_pretty(ledger)?;
        write_atomic(&self.path, &data)?;
        debug!(
            "saved snapshot to {}, transactions={}",
            self.path.display(),
            ledger.transactions().len()
        );

        Ok(())
    }

    pub fn reset(&self, _confirmation: ResetConfirmation) -> Result<Ledger, StoreError> {
        let ledger = Ledger::new();
        self.save(&ledger)?;

        Ok(ledger)
    }
}

fn write_atomic(path: &Path, data: &str) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".");
    tmp_name.push(TMP_SUFFIX);
    let tmp_path = path.with_file_name(tmp_name);

    fs::write(&tmp_path, data)?;
    fs::rename(&tmp_path, path)
}
