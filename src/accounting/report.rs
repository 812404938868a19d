use chrono::{Datelike, NaiveDateTime};
use rust_decimal::Decimal;

use super::transactions::Transaction;
use super::TransactionError;

/// Optional year and month restriction applied by [`Ledger::filter_report`].
///
/// [`Ledger::filter_report`]: super::ledger::Ledger::filter_report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportFilter {
    year: Option<i32>,
    month: Option<u32>,
}

impl ReportFilter {
    pub fn new(year: Option<i32>, month: Option<u32>) -> Result<ReportFilter, TransactionError> {
        if let Some(month) = month {
            if !(1..=12).contains(&month) {
                return Err(TransactionError::InvalidMonth);
            }
        }

        Ok(ReportFilter { year, month })
    }

    /// Builds a filter from raw prompt input, where a blank value means "all".
    pub fn parse(year: &str, month: &str) -> Result<ReportFilter, TransactionError> {
        let year = match year.trim() {
            "" => None,
            year => Some(year.parse::<i32>().map_err(|_| TransactionError::InvalidYear)?),
        };
        let month = match month.trim() {
            "" => None,
            month => Some(month.parse::<u32>().map_err(|_| TransactionError::InvalidMonth)?),
        };

        ReportFilter::new(year, month)
    }

    pub fn all() -> ReportFilter {
        ReportFilter::default()
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn month(&self) -> Option<u32> {
        self.month
    }

    pub fn matches(&self, timestamp: &NaiveDateTime) -> bool {
        self.year.map_or(true, |year| timestamp.year() == year)
            && self.month.map_or(true, |month| timestamp.month() == month)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportLine<'a> {
    /// 1-based position of the transaction in the ledger.
    pub position: usize,
    pub timestamp: NaiveDateTime,
    pub transaction: &'a Transaction,
}

/// Filtered view of the ledger. Totals cover the matching lines only, the
/// balance is the ledger's global one.
#[derive(Debug, Clone, PartialEq)]
pub struct Report<'a> {
    pub lines: Vec<ReportLine<'a>>,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
}

impl<'a> Report<'a> {
    pub(super) fn new(balance: Decimal) -> Report<'a> {
        Report {
            lines: Vec::new(),
            total_income: Decimal::ZERO,
            total_expense: Decimal::ZERO,
            balance,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn transactions(&self) -> impl Iterator<Item = &'a Transaction> + '_ {
        self.lines.iter().map(|line| line.transaction)
    }
}
