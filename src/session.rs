use std::path::Path;

use log::debug;
use thiserror::Error;

use crate::accounting::ledger::Ledger;
use crate::accounting::report::{Report, ReportFilter};
use crate::accounting::timestamp::timestamp_or_now;
use crate::accounting::transactions::{parse_amount, Entry, Expense, Income, Transaction};
use crate::accounting::TransactionError;
use crate::data::{self, ExportError};
use crate::store::{ResetConfirmation, SnapshotStore, StoreError};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("{0}")]
    Transaction(#[from] TransactionError),
    #[error("{0}")]
    Store(#[from] StoreError),
}

/// The single in-memory ledger of a process, bound to its snapshot.
///
/// Every mutation is computed on a copy and persisted before it replaces the
/// current ledger, so a failed operation leaves the session untouched.
#[derive(Debug)]
pub struct Session {
    store: SnapshotStore,
    ledger: Ledger,
}

impl Session {
    /// Loads the ledger from the store, starting empty if the snapshot is
    /// missing or unusable.
    pub fn open(store: SnapshotStore) -> Session {
        let ledger = store.load();
        Session { store, ledger }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    pub fn record_income(&mut self, amount: &str, note: &str, timestamp: Option<&str>) -> Result<&Transaction, SessionError> {
        let amount = parse_amount(amount).inspect_err(|err| debug!("rejected income, err={}", err))?;
        let timestamp = timestamp_or_now(timestamp).inspect_err(|err| debug!("rejected income, err={}", err))?;

        self.commit(Income::new(amount, note, timestamp)?.into())
    }

    pub fn record_expense(&mut self, amount: &str, note: &str, timestamp: Option<&str>) -> Result<&Transaction, SessionError> {
        let amount = parse_amount(amount).inspect_err(|err| debug!("rejected expense, err={}", err))?;
        self.ledger
            .ensure_funds(amount)
            .inspect_err(|err| debug!("rejected expense, err={}", err))?;
        let timestamp = timestamp_or_now(timestamp).inspect_err(|err| debug!("rejected expense, err={}", err))?;

        self.commit(Expense::new(amount, note, timestamp)?.into())
    }

    pub fn report(&self, filter: &ReportFilter) -> Report<'_> {
        self.ledger.filter_report(filter)
    }

    pub fn export(&self, destination: &Path) -> Result<usize, ExportError> {
        data::export_csv_to_path(&self.ledger, destination)
    }

    pub fn reset(&mut self, confirmation: ResetConfirmation) -> Result<(), SessionError> {
        self.ledger = self.store.reset(confirmation)?;
        debug!("ledger reset, snapshot={}", self.store.path().display());

        Ok(())
    }

    fn commit(&mut self, entry: Entry) -> Result<&Transaction, SessionError> {
        let mut next = self.ledger.clone();
        next.execute_entry(entry)?;
        self.store.save(&next)?;
        self.ledger = next;

        let transaction = &self.ledger.transactions()[self.ledger.transactions().len() - 1];
        debug!(
            "recorded {}, amount={}, balance={}",
            transaction.kind.as_str(),
            transaction.amount,
            self.ledger.balance()
        );

        Ok(transaction)
    }
}
