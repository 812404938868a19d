use enum_dispatch::enum_dispatch;
use thiserror::Error;

pub mod ledger;
pub mod report;
pub mod timestamp;
pub mod transactions;

#[cfg(test)]
mod transaction_tests;

pub use transactions::{Entry, Expense, Income, Transaction, TransactionKind};

#[derive(Debug, PartialEq, Error)]
pub enum TransactionError {
    #[error("invalid amount, expected a number greater than 0")]
    InvalidAmount,
    #[error("invalid date, expected YYYY-MM-DD")]
    InvalidDate,
    #[error("insufficient balance for this expense")]
    InsufficientBalance,
    #[error("invalid month, expected 1-12")]
    InvalidMonth,
    #[error("invalid year, expected YYYY")]
    InvalidYear,
}

#[enum_dispatch]
pub trait ExecutableEntry {
    /// Applies the entry to the ledger balance and totals. Must leave the
    /// ledger untouched when it returns an error.
    fn execute(&self, ledger: &mut ledger::Ledger) -> Result<(), TransactionError>;

    /// The record appended to the ledger once the entry has been executed.
    fn transaction(&self) -> Transaction;
}
