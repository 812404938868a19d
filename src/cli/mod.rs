use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;

pub mod display;
pub mod menu;

use crate::accounting::report::ReportFilter;
use crate::data::DEFAULT_EXPORT_FILE;
use crate::session::Session;
use crate::store::{ResetConfirmation, SnapshotStore};
use display::{format_money, render_balance, render_report};
use menu::Menu;

/// Saku - pocket money ledger
#[derive(Debug, Parser)]
#[command(name = "saku")]
#[command(about = "Record income and expenses, keep a running balance and report by month")]
#[command(version)]
pub struct Cli {
    /// Snapshot file holding the ledger
    #[arg(short, long, env = "SAKU_DATA_FILE", default_value = "data.json")]
    pub data_file: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Runs the interactive menu when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Record income
    Income {
        /// Amount received (e.g. "1500" or "12.50")
        #[arg(allow_hyphen_values = true)]
        amount: String,

        /// Description of the income
        #[arg(short, long, default_value = "")]
        note: String,

        /// Date of the transaction (YYYY-MM-DD, defaults to now)
        #[arg(long)]
        date: Option<String>,
    },

    /// Record an expense, refused when the balance is insufficient
    Expense {
        /// Amount spent
        #[arg(allow_hyphen_values = true)]
        amount: String,

        /// Description of the expense
        #[arg(short, long, default_value = "")]
        note: String,

        /// Date of the transaction (YYYY-MM-DD, defaults to now)
        #[arg(long)]
        date: Option<String>,
    },

    /// Show the current balance
    Balance,

    /// List transactions, optionally filtered by year and month
    Report {
        #[arg(long)]
        year: Option<i32>,

        /// Month number, 1-12
        #[arg(long)]
        month: Option<u32>,
    },

    /// Export every transaction to a CSV file
    Export {
        #[arg(default_value = DEFAULT_EXPORT_FILE)]
        path: PathBuf,
    },

    /// Wipe all data, requires --confirm YES
    Reset {
        #[arg(long)]
        confirm: Option<String>,
    },

    /// Interactive menu
    Menu,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let mut session = Session::open(SnapshotStore::new(self.data_file));

        match self.command.unwrap_or(Commands::Menu) {
            Commands::Menu => {
                let stdin = io::stdin();
                let stdout = io::stdout();
                Menu::new(&mut session, stdin.lock(), stdout.lock()).run()?;
            },
            Commands::Income { amount, note, date } => {
                let transaction = session.record_income(&amount, &note, date.as_deref())?;
                let message = format!("Income added: {}", format_money(transaction.amount));
                println!("{}", message.green());
            },
            Commands::Expense { amount, note, date } => {
                let transaction = session.record_expense(&amount, &note, date.as_deref())?;
                let message = format!("Expense added: {}", format_money(transaction.amount));
                println!("{}", message.red());
            },
            Commands::Balance => print!("{}", render_balance(session.ledger())),
            Commands::Report { year, month } => {
                if session.ledger().is_empty() {
                    println!("No transactions yet.");
                    return Ok(());
                }

                let report = session.report(&ReportFilter::new(year, month)?);
                if report.is_empty() {
                    println!("No transactions match the filter.");
                } else {
                    print!("{}", render_report(&report));
                }
            },
            Commands::Export { path } => {
                let rows = session.export(&path)?;
                println!("Exported {} transactions to {}", rows, path.display());
            },
            Commands::Reset { confirm } => match confirm.as_deref().and_then(ResetConfirmation::from_input) {
                Some(confirmation) => {
                    session.reset(confirmation)?;
                    println!("Data has been reset.");
                },
                None => println!("Reset cancelled."),
            },
        }

        Ok(())
    }
}
