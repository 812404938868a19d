use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use super::display::{format_money, render_balance, render_report};
use crate::accounting::report::ReportFilter;
use crate::accounting::transactions::parse_amount;
use crate::data::DEFAULT_EXPORT_FILE;
use crate::session::Session;
use crate::store::{ResetConfirmation, RESET_CONFIRMATION_WORD};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    AddIncome,
    AddExpense,
    ShowBalance,
    ShowReport,
    Export,
    Reset,
    Quit,
}

impl Choice {
    fn parse(input: &str) -> Option<Choice> {
        match input.trim() {
            "1" => Some(Choice::AddIncome),
            "2" => Some(Choice::AddExpense),
            "3" => Some(Choice::ShowBalance),
            "4" => Some(Choice::ShowReport),
            "5" => Some(Choice::Export),
            "6" => Some(Choice::Reset),
            "7" => Some(Choice::Quit),
            _ => None,
        }
    }
}

/// Interactive numbered menu driving a [`Session`].
pub struct Menu<'a, R, W> {
    session: &'a mut Session,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(session: &'a mut Session, input: R, output: W) -> Self {
        Menu { session, input, output }
    }

    /// Runs until the user quits or the input is exhausted.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.print_menu()?;
            let Some(input) = self.prompt("Choose an option: ")? else {
                break;
            };

            match Choice::parse(&input) {
                Some(Choice::AddIncome) => self.add_income()?,
                Some(Choice::AddExpense) => self.add_expense()?,
                Some(Choice::ShowBalance) => {
                    let balance = render_balance(self.session.ledger());
                    write!(self.output, "{}", balance)?;
                },
                Some(Choice::ShowReport) => self.show_report()?,
                Some(Choice::Export) => self.export()?,
                Some(Choice::Reset) => self.reset()?,
                Some(Choice::Quit) => {
                    writeln!(self.output, "Thank you!")?;
                    break;
                },
                None => writeln!(self.output, "Invalid option")?,
            }
        }

        Ok(())
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output, "{}", "=== Pocket Money Manager 💰 ===".blue().bold())?;
        writeln!(self.output, "1. ➕ Add income")?;
        writeln!(self.output, "2. ➖ Add expense")?;
        writeln!(self.output, "3. 🧾 Show balance")?;
        writeln!(self.output, "4. 📊 Show report (with filter)")?;
        writeln!(self.output, "5. 📤 Export report to CSV")?;
        writeln!(self.output, "6. 🗑️  Reset data")?;
        writeln!(self.output, "7. 🚪 Quit")?;

        Ok(())
    }

    /// Prints a label and reads one line without its line ending. `None` once
    /// the input is exhausted.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn error(&mut self, message: impl std::fmt::Display) -> Result<()> {
        writeln!(self.output, "{}", format!("⚠️  {}", message).red())?;
        Ok(())
    }

    fn add_income(&mut self) -> Result<()> {
        let Some(amount) = self.prompt("Income amount: ")? else {
            return Ok(());
        };
        if let Err(err) = parse_amount(&amount) {
            return self.error(err);
        }
        let Some(note) = self.prompt("Description / note (optional): ")? else {
            return Ok(());
        };
        let Some(date) = self.prompt("Transaction date (YYYY-MM-DD, empty = today): ")? else {
            return Ok(());
        };

        match self.session.record_income(&amount, &note, Some(&date)) {
            Ok(transaction) => {
                let message = format!("✅ Income added: {}", format_money(transaction.amount));
                writeln!(self.output, "{}", message.green())?;
            },
            Err(err) => self.error(err)?,
        }

        Ok(())
    }

    fn add_expense(&mut self) -> Result<()> {
        let Some(amount) = self.prompt("Expense amount: ")? else {
            return Ok(());
        };
        let checked = parse_amount(&amount).and_then(|amount| self.session.ledger().ensure_funds(amount));
        if let Err(err) = checked {
            return self.error(err);
        }
        let Some(note) = self.prompt("Description / note (optional): ")? else {
            return Ok(());
        };
        let Some(date) = self.prompt("Transaction date (YYYY-MM-DD, empty = today): ")? else {
            return Ok(());
        };

        match self.session.record_expense(&amount, &note, Some(&date)) {
            Ok(transaction) => {
                let message = format!("✅ Expense added: {}", format_money(transaction.amount));
                writeln!(self.output, "{}", message.red())?;
            },
            Err(err) => self.error(err)?,
        }

        Ok(())
    }

    fn show_report(&mut self) -> Result<()> {
        writeln!(self.output, "--- Financial Report ---")?;
        if self.session.ledger().is_empty() {
            writeln!(self.output, "No transactions yet.")?;
            return Ok(());
        }

        writeln!(self.output, "(Filter by year and month. Leave empty for all)")?;
        let Some(year) = self.prompt("Year (YYYY, empty = all): ")? else {
            return Ok(());
        };
        let Some(month) = self.prompt("Month (1-12, empty = all): ")? else {
            return Ok(());
        };

        let filter = match ReportFilter::parse(&year, &month) {
            Ok(filter) => filter,
            Err(err) => return self.error(err),
        };

        let report = self.session.report(&filter);
        if report.is_empty() {
            writeln!(self.output, "No transactions match the filter.")?;
            return Ok(());
        }

        write!(self.output, "{}", render_report(&report))?;

        Ok(())
    }

    fn export(&mut self) -> Result<()> {
        if self.session.ledger().is_empty() {
            writeln!(self.output, "No transactions to export.")?;
            return Ok(());
        }

        let label = format!("CSV file name (default {}): ", DEFAULT_EXPORT_FILE);
        let Some(file_name) = self.prompt(&label)? else {
            return Ok(());
        };
        let file_name = match file_name.trim() {
            "" => DEFAULT_EXPORT_FILE,
            name => name,
        };

        match self.session.export(Path::new(file_name)) {
            Ok(rows) => writeln!(self.output, "Exported {} transactions to {}", rows, file_name)?,
            Err(err) => self.error(err)?,
        }

        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        let label = format!("Reset all data? Type '{}' to confirm: ", RESET_CONFIRMATION_WORD);
        let Some(answer) = self.prompt(&label)? else {
            return Ok(());
        };

        match ResetConfirmation::from_input(&answer) {
            Some(confirmation) => match self.session.reset(confirmation) {
                Ok(()) => writeln!(self.output, "Data has been reset.")?,
                Err(err) => self.error(err)?,
            },
            None => writeln!(self.output, "Reset cancelled.")?,
        }

        Ok(())
    }
}
