use std::fs::File;
use std::io::Write;
use std::path::Path;

use log::debug;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::accounting::ledger::Ledger;
use crate::accounting::transactions::{Transaction, TransactionKind};

/// Default file name offered when exporting.
pub const DEFAULT_EXPORT_FILE: &str = "report.csv";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no transactions to export")]
    EmptyLedger,
    #[error("failed to export csv: {0}")]
    Io(#[from] csv::Error),
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::Io(err.into())
    }
}

#[derive(Debug, Serialize)]
pub struct TransactionRecord<'a> {
    pub timestamp: &'a str,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub note: &'a str,
}

impl<'a> From<&'a Transaction> for TransactionRecord<'a> {
    fn from(transaction: &'a Transaction) -> Self {
        TransactionRecord {
            timestamp: &transaction.timestamp,
            kind: transaction.kind,
            amount: transaction.amount,
            note: &transaction.note,
        }
    }
}

/// Writes every transaction, unfiltered and in ledger order, as CSV. Returns
/// the number of rows written after the header.
pub fn export_csv<W: Write>(ledger: &Ledger, writer: W) -> Result<usize, ExportError> {
    if ledger.is_empty() {
        return Err(ExportError::EmptyLedger);
    }

    let mut csv_writer = csv::WriterBuilder::new().from_writer(writer);
    for transaction in ledger.transactions() {
        let record: TransactionRecord = transaction.into();
        csv_writer.serialize(record)?;
    }

    csv_writer.flush()?;

    Ok(ledger.transactions().len())
}

pub fn export_csv_to_path(ledger: &Ledger, path: &Path) -> Result<usize, ExportError> {
    // Checked before `File::create` so an empty ledger never creates or
    // truncates the destination.
    if ledger.is_empty() {
        return Err(ExportError::EmptyLedger);
    }

    let file = File::create(path)?;
    let rows = export_csv(ledger, file)?;
    debug!("exported {} transactions to {}", rows, path.display());

    Ok(rows)
}
