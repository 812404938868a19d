use anyhow::{bail, Result};
use chrono::NaiveDateTime;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::ledger::Ledger;
use super::report::ReportFilter;
use super::timestamp::parse_timestamp;
use super::transactions::parse_amount;
use super::*;

fn at(date: &str) -> NaiveDateTime {
    parse_timestamp(date).unwrap()
}

fn income(amount: Decimal, note: &str, date: &str) -> Result<Entry> {
    Ok(Entry::Income(Income::new(amount, note, at(date))?))
}

fn expense(amount: Decimal, note: &str, date: &str) -> Result<Entry> {
    Ok(Entry::Expense(Expense::new(amount, note, at(date))?))
}

fn assert_ledger(ledger: &Ledger, balance: Decimal, total_income: Decimal, total_expense: Decimal, count: usize) {
    assert_eq!(ledger.balance(), balance);
    assert_eq!(ledger.total_income(), total_income);
    assert_eq!(ledger.total_expense(), total_expense);
    assert_eq!(ledger.transactions().len(), count);
    assert_eq!(ledger.balance(), ledger.total_income() - ledger.total_expense());
}

#[test]
fn test_income() -> Result<()> {
    let mut ledger = Ledger::new();
    let recorded = ledger.execute_entry(income(dec!(1000), "salary", "2024-01-01")?)?.clone();

    assert_ledger(&ledger, dec!(1000), dec!(1000), dec!(0), 1);
    assert_eq!(recorded.kind, TransactionKind::Income);
    assert_eq!(recorded.note, "salary");
    assert_eq!(recorded.timestamp, "2024-01-01T00:00:00");

    Ok(())
}

#[test]
fn test_income_keeps_exact_decimals() -> Result<()> {
    let mut ledger = Ledger::new();
    for _ in 0..10 {
        ledger.execute_entry(income(dec!(0.1), "", "2024-01-01")?)?;
    }
    ledger.execute_entry(expense(dec!(0.3), "", "2024-01-02")?)?;

    assert_ledger(&ledger, dec!(0.7), dec!(1.0), dec!(0.3), 11);

    Ok(())
}

#[test]
fn test_expense() -> Result<()> {
    let mut ledger = Ledger::new();
    ledger.execute_entry(income(dec!(1000), "salary", "2024-01-01")?)?;
    ledger.execute_entry(expense(dec!(200), "food", "2024-01-05")?)?;

    assert_ledger(&ledger, dec!(800), dec!(1000), dec!(200), 2);
    assert_eq!(ledger.transactions()[1].kind, TransactionKind::Expense);

    Ok(())
}

#[test]
fn test_expense_may_empty_the_balance() -> Result<()> {
    let mut ledger = Ledger::new();
    ledger.execute_entry(income(dec!(50), "", "2024-01-01")?)?;
    ledger.execute_entry(expense(dec!(50), "", "2024-01-02")?)?;

    assert_ledger(&ledger, dec!(0), dec!(50), dec!(50), 2);

    Ok(())
}

#[test]
fn test_expense_insufficient_balance() -> Result<()> {
    let mut ledger = Ledger::new();
    ledger.execute_entry(income(dec!(1000), "salary", "2024-01-01")?)?;
    ledger.execute_entry(expense(dec!(200), "food", "2024-01-05")?)?;

    if let Err(err) = ledger.execute_entry(expense(dec!(900), "rent", "2024-01-06")?) {
        assert_eq!(err, TransactionError::InsufficientBalance);
    } else {
        bail!("expense should not be recorded when the balance is insufficient");
    }

    assert_ledger(&ledger, dec!(800), dec!(1000), dec!(200), 2);

    Ok(())
}

#[test]
fn test_expense_on_empty_ledger() -> Result<()> {
    let mut ledger = Ledger::new();
    let result = ledger.execute_entry(expense(dec!(0.01), "", "2024-01-01")?);

    assert_eq!(result, Err(TransactionError::InsufficientBalance));
    assert_eq!(ledger, Ledger::new());

    Ok(())
}

#[test]
fn test_entries_reject_non_positive_amounts() {
    let timestamp = at("2024-01-01");

    assert_eq!(Income::new(dec!(0), "", timestamp).err(), Some(TransactionError::InvalidAmount));
    assert_eq!(Income::new(dec!(-5), "", timestamp).err(), Some(TransactionError::InvalidAmount));
    assert_eq!(Expense::new(dec!(0), "", timestamp).err(), Some(TransactionError::InvalidAmount));
}

#[test]
fn test_parse_amount() {
    assert_eq!(parse_amount("1000"), Ok(dec!(1000)));
    assert_eq!(parse_amount(" 12.50 "), Ok(dec!(12.5)));
    assert_eq!(parse_amount("0.01"), Ok(dec!(0.01)));

    for input in ["", "abc", "0", "-1", "0.00", "12,5"] {
        assert_eq!(parse_amount(input), Err(TransactionError::InvalidAmount), "{input}");
    }
}

#[test]
fn test_balance_invariant_holds_over_sequence() -> Result<()> {
    let mut ledger = Ledger::new();
    let steps = [
        (true, dec!(120.25)),
        (false, dec!(20.25)),
        (false, dec!(500)),
        (true, dec!(0.75)),
        (false, dec!(100.75)),
        (false, dec!(0.01)),
    ];

    for (is_income, amount) in steps {
        let entry = if is_income {
            income(amount, "", "2024-02-01")?
        } else {
            expense(amount, "", "2024-02-01")?
        };
        let _ = ledger.execute_entry(entry);

        assert_eq!(ledger.balance(), ledger.total_income() - ledger.total_expense());
        assert!(ledger.balance() >= dec!(0));
    }

    assert_ledger(&ledger, dec!(0), dec!(121), dec!(121), 4);

    Ok(())
}

fn sample_ledger() -> Result<Ledger> {
    let mut ledger = Ledger::new();
    ledger.execute_entry(income(dec!(1000), "salary", "2024-01-01")?)?;
    ledger.execute_entry(expense(dec!(200), "food", "2024-03-05")?)?;
    ledger.execute_entry(income(dec!(50), "gift", "2023-03-10")?)?;
    ledger.execute_entry(expense(dec!(30), "coffee", "2024-03-20T08:30:00")?)?;
    ledger.execute_entry(income(dec!(300), "bonus", "2024-03-01")?)?;

    Ok(ledger)
}

#[test]
fn test_report_without_filter_matches_totals() -> Result<()> {
    let ledger = sample_ledger()?;
    let report = ledger.filter_report(&ReportFilter::all());

    assert_eq!(report.lines.len(), 5);
    assert_eq!(report.total_income, ledger.total_income());
    assert_eq!(report.total_expense, ledger.total_expense());
    assert_eq!(report.balance, ledger.balance());

    Ok(())
}

#[test]
fn test_report_by_year_and_month() -> Result<()> {
    let ledger = sample_ledger()?;
    let report = ledger.filter_report(&ReportFilter::new(Some(2024), Some(3))?);

    let notes: Vec<&str> = report.transactions().map(|tx| tx.note.as_str()).collect();
    assert_eq!(notes, vec!["food", "coffee", "bonus"]);
    let positions: Vec<usize> = report.lines.iter().map(|line| line.position).collect();
    assert_eq!(positions, vec![2, 4, 5]);
    assert_eq!(report.total_income, dec!(300));
    assert_eq!(report.total_expense, dec!(230));
    assert_eq!(report.balance, dec!(1120));

    Ok(())
}

#[test]
fn test_report_by_month_across_years() -> Result<()> {
    let ledger = sample_ledger()?;
    let report = ledger.filter_report(&ReportFilter::new(None, Some(3))?);

    assert_eq!(report.lines.len(), 4);
    assert_eq!(report.total_income, dec!(350));

    let report = ledger.filter_report(&ReportFilter::new(Some(2023), None)?);
    let notes: Vec<&str> = report.transactions().map(|tx| tx.note.as_str()).collect();
    assert_eq!(notes, vec!["gift"]);

    Ok(())
}

#[test]
fn test_report_no_match_is_empty() -> Result<()> {
    let ledger = sample_ledger()?;
    let report = ledger.filter_report(&ReportFilter::new(Some(1999), Some(12))?);

    assert!(report.is_empty());
    assert_eq!(report.total_income, dec!(0));
    assert_eq!(report.total_expense, dec!(0));
    assert_eq!(report.balance, dec!(1120));

    assert!(Ledger::new().filter_report(&ReportFilter::all()).is_empty());

    Ok(())
}

#[test]
fn test_report_skips_unparseable_timestamps() -> Result<()> {
    let ledger: Ledger = serde_json::from_str(
        r#"{
            "balance": 15,
            "total_income": 15,
            "total_expense": 0,
            "transactions": [
                {"kind": "income", "amount": 10, "note": "ok", "timestamp": "2024-05-01T09:00:00"},
                {"kind": "income", "amount": 5, "note": "broken", "timestamp": "last tuesday"}
            ]
        }"#,
    )?;

    let report = ledger.filter_report(&ReportFilter::all());

    assert_eq!(report.lines.len(), 1);
    assert_eq!(report.lines[0].transaction.note, "ok");
    assert_eq!(report.total_income, dec!(10));
    assert_eq!(report.balance, dec!(15));

    Ok(())
}

#[test]
fn test_report_filter_validation() {
    assert_eq!(ReportFilter::new(None, Some(0)), Err(TransactionError::InvalidMonth));
    assert_eq!(ReportFilter::new(Some(2024), Some(13)), Err(TransactionError::InvalidMonth));
    assert_eq!(ReportFilter::parse("", ""), Ok(ReportFilter::all()));
    assert_eq!(ReportFilter::parse(" 2024 ", "3"), ReportFilter::new(Some(2024), Some(3)));
    assert_eq!(ReportFilter::parse("twenty", ""), Err(TransactionError::InvalidYear));
    assert_eq!(ReportFilter::parse("", "march"), Err(TransactionError::InvalidMonth));
    assert_eq!(ReportFilter::parse("", "-1"), Err(TransactionError::InvalidMonth));
}
