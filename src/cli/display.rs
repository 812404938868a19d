//! Terminal rendering for balances and reports.
//!
//! Everything here works on plain strings; colors are applied after padding
//! so escape codes never distort column widths.

use colored::{Color, Colorize};
use rust_decimal::Decimal;

use crate::accounting::ledger::Ledger;
use crate::accounting::report::Report;
use crate::accounting::transactions::TransactionKind;

const CURRENCY: &str = "Rp";

/// Formats an amount as `Rp 1,234.50`.
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let digits = format!("{:.2}", rounded.abs());
    let (integer, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{CURRENCY} {sign}{grouped}.{fraction}")
}

pub fn kind_color(kind: TransactionKind) -> Color {
    match kind {
        TransactionKind::Income => Color::Green,
        TransactionKind::Expense => Color::Red,
    }
}

fn kind_label(kind: TransactionKind) -> String {
    let icon = match kind {
        TransactionKind::Income => "📈",
        TransactionKind::Expense => "📉",
    };
    format!("{} {}", icon, kind.as_str())
}

#[derive(Debug, Clone)]
pub struct Cell {
    text: String,
    color: Option<Color>,
}

impl Cell {
    pub fn plain(text: impl Into<String>) -> Cell {
        Cell {
            text: text.into(),
            color: None,
        }
    }

    pub fn colored(text: impl Into<String>, color: Color) -> Cell {
        Cell {
            text: text.into(),
            color: Some(color),
        }
    }

    fn width(&self) -> usize {
        self.text.chars().count()
    }

    fn render(&self, width: usize) -> String {
        let padded = format!("{:<width$}", self.text, width = width);
        match self.color {
            Some(color) => padded.color(color).to_string(),
            None => padded,
        }
    }
}

/// Renders a bordered table:
///
/// ```text
/// +-----+-------+
/// | Key | Value |
/// +-----+-------+
/// | a   | 1     |
/// +-----+-------+
/// ```
pub fn render_table(headers: &[&str], rows: &[Vec<Cell>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|header| header.chars().count()).collect();
    for row in rows {
        for (index, cell) in row.iter().enumerate().take(widths.len()) {
            widths[index] = widths[index].max(cell.width());
        }
    }

    let separator = format!(
        "+{}+",
        widths.iter().map(|width| "-".repeat(width + 2)).collect::<Vec<_>>().join("+")
    );
    let header_cells: Vec<Cell> = headers.iter().map(|header| Cell::plain(*header)).collect();

    let mut output = String::new();
    output.push_str(&separator);
    output.push('\n');
    output.push_str(&render_row(&header_cells, &widths));
    output.push_str(&separator);
    output.push('\n');
    for row in rows {
        output.push_str(&render_row(row, &widths));
    }
    output.push_str(&separator);
    output.push('\n');

    output
}

fn render_row(cells: &[Cell], widths: &[usize]) -> String {
    let rendered: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(index, width)| {
            let cell = cells.get(index).cloned().unwrap_or_else(|| Cell::plain(""));
            format!(" {} ", cell.render(*width))
        })
        .collect();

    format!("|{}|\n", rendered.join("|"))
}

pub fn render_balance(ledger: &Ledger) -> String {
    let rows = vec![vec![Cell::plain("Balance"), Cell::plain(format_money(ledger.balance()))]];
    format!("{}\n{}", "--- Current Balance ---".blue().bold(), render_table(&["Item", "Value"], &rows))
}

/// Renders the report table followed by its summary.
pub fn render_report(report: &Report<'_>) -> String {
    let rows: Vec<Vec<Cell>> = report
        .lines
        .iter()
        .map(|line| {
            let transaction = line.transaction;
            vec![
                Cell::plain(line.position.to_string()),
                Cell::plain(line.timestamp.format("%Y-%m-%d").to_string()),
                Cell::plain(kind_label(transaction.kind)),
                Cell::colored(format_money(transaction.amount), kind_color(transaction.kind)),
                Cell::plain(transaction.note.as_str()),
            ]
        })
        .collect();

    let mut output = render_table(&["No", "Date", "Kind", "Amount", "Note"], &rows);
    output.push_str(&format!("{}\n", "Summary:".bold()));
    output.push_str(&format!(
        "{}\n",
        format!("Total income  : {}", format_money(report.total_income)).green()
    ));
    output.push_str(&format!(
        "{}\n",
        format!("Total expense : {}", format_money(report.total_expense)).red()
    ));
    output.push_str(&format!(
        "{}\n",
        format!("Current balance: {}", format_money(report.balance)).blue()
    ));

    output
}
