use std::str::FromStr;

use chrono::NaiveDateTime;
use enum_dispatch::enum_dispatch;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::ledger::{self, Ledger};
use super::timestamp::{self, format_timestamp};
use super::{ExecutableEntry, TransactionError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

/// A recorded ledger entry, as stored in the snapshot.
///
/// The timestamp is kept as text: a snapshot edited by hand may carry a value
/// that no longer parses, and such an entry must still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub kind: TransactionKind,
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub timestamp: String,
}

impl Transaction {
    pub fn parsed_timestamp(&self) -> Result<NaiveDateTime, TransactionError> {
        timestamp::parse_timestamp(&self.timestamp)
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }
}

/// Parses user input into a strictly positive amount.
pub fn parse_amount(input: &str) -> Result<Decimal, TransactionError> {
    let amount = Decimal::from_str(input.trim()).map_err(|_| TransactionError::InvalidAmount)?;
    if amount <= dec!(0) {
        return Err(TransactionError::InvalidAmount);
    }

    Ok(amount)
}

#[enum_dispatch(ExecutableEntry)]
#[derive(Debug, Clone)]
pub enum Entry {
    Income,
    Expense,
}

#[derive(Debug, Clone)]
pub struct Income {
    amount: Decimal,
    note: String,
    timestamp: NaiveDateTime,
}

impl Income {
    pub fn new(amount: Decimal, note: impl Into<String>, timestamp: NaiveDateTime) -> Result<Income, TransactionError> {
        if amount <= dec!(0) {
            return Err(TransactionError::InvalidAmount);
        }

        Ok(Income {
            amount,
            note: note.into(),
            timestamp,
        })
    }
}

impl ExecutableEntry for Income {
    fn execute(&self, ledger: &mut Ledger) -> Result<(), TransactionError> {
        ledger.credit(self.amount)
    }

    fn transaction(&self) -> Transaction {
        Transaction {
            kind: TransactionKind::Income,
            amount: self.amount,
            note: self.note.clone(),
            timestamp: format_timestamp(&self.timestamp),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Expense {
    amount: Decimal,
    note: String,
    timestamp: NaiveDateTime,
}

impl Expense {
    pub fn new(amount: Decimal, note: impl Into<String>, timestamp: NaiveDateTime) -> Result<Expense, TransactionError> {
        if amount <= dec!(0) {
            return Err(TransactionError::InvalidAmount);
        }

        Ok(Expense {
            amount,
            note: note.into(),
            timestamp,
        })
    }
}

impl ExecutableEntry for Expense {
    fn execute(&self, ledger: &mut ledger::Ledger) -> Result<(), TransactionError> {
        ledger.debit(self.amount)
    }

    fn transaction(&self) -> Transaction {
        Transaction {
            kind: TransactionKind::Expense,
            amount: self.amount,
            note: self.note.clone(),
            timestamp: format_timestamp(&self.timestamp),
        }
    }
}
