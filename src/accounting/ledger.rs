use getset::{CopyGetters, Getters};
use log::warn;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use super::report::{Report, ReportFilter, ReportLine};
use super::transactions::{Entry, Transaction, TransactionKind};
use super::{ExecutableEntry, TransactionError};

/// Running balance, totals and the append-only list of recorded transactions.
///
/// Fields are only reachable through getters; the sole mutation paths are
/// [`Ledger::execute_entry`] and replacing the whole value on reset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Getters, CopyGetters)]
#[serde(default)]
pub struct Ledger {
    #[getset(get_copy = "pub")]
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    balance: Decimal,
    #[getset(get_copy = "pub")]
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    total_income: Decimal,
    #[getset(get_copy = "pub")]
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    total_expense: Decimal,
    #[getset(get = "pub")]
    #[serde(deserialize_with = "skip_malformed_transactions")]
    transactions: Vec<Transaction>,
}

/// Reads the transaction list row by row, dropping rows that do not describe a
/// transaction (e.g. a missing or unknown `kind`) instead of failing the
/// whole snapshot.
fn skip_malformed_transactions<'de, D>(deserializer: D) -> Result<Vec<Transaction>, D::Error>
where
    D: Deserializer<'de>,
{
    let rows = Vec::<serde_json::Value>::deserialize(deserializer)?;

    Ok(rows
        .into_iter()
        .enumerate()
        .filter_map(|(index, row)| match serde_json::from_value(row) {
            Ok(transaction) => Some(transaction),
            Err(err) => {
                warn!("skipping snapshot transaction {}, err={}", index + 1, err);
                None
            },
        })
        .collect())
}

impl Ledger {
    pub fn new() -> Ledger {
        Ledger::default()
    }

    /// Applies the entry and appends its record. Either both happen or, on
    /// error, the ledger is left as it was.
    pub fn execute_entry(&mut self, entry: Entry) -> Result<&Transaction, TransactionError> {
        entry.execute(self)?;
        self.transactions.push(entry.transaction());

        Ok(&self.transactions[self.transactions.len() - 1])
    }

    /// Fails if an expense of `amount` would exceed the current balance.
    pub fn ensure_funds(&self, amount: Decimal) -> Result<(), TransactionError> {
        if amount > self.balance {
            return Err(TransactionError::InsufficientBalance);
        }

        Ok(())
    }

    pub(super) fn credit(&mut self, amount: Decimal) -> Result<(), TransactionError> {
        let balance = self.balance.checked_add(amount).ok_or(TransactionError::InvalidAmount)?;
        let total_income = self.total_income.checked_add(amount).ok_or(TransactionError::InvalidAmount)?;

        self.balance = balance;
        self.total_income = total_income;

        Ok(())
    }

    pub(super) fn debit(&mut self, amount: Decimal) -> Result<(), TransactionError> {
        self.ensure_funds(amount)?;
        let total_expense = self.total_expense.checked_add(amount).ok_or(TransactionError::InvalidAmount)?;

        self.balance -= amount;
        self.total_expense = total_expense;

        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Selects the transactions matching the filter, in ledger order, and sums
    /// them. Entries whose timestamp does not parse are left out.
    pub fn filter_report(&self, filter: &ReportFilter) -> Report<'_> {
        let mut report = Report::new(self.balance);

        for (index, transaction) in self.transactions.iter().enumerate() {
            let Ok(timestamp) = transaction.parsed_timestamp() else {
                continue;
            };
            if !filter.matches(&timestamp) {
                continue;
            }

            match transaction.kind {
                TransactionKind::Income => report.total_income += transaction.amount,
                TransactionKind::Expense => report.total_expense += transaction.amount,
            }
            report.lines.push(ReportLine {
                position: index + 1,
                timestamp,
                transaction,
            });
        }

        report
    }
}
