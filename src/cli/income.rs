//! Income CLI commands
//!
//! Implements CLI commands for the income figure.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::error::FinbotResult;
use crate::services::LedgerService;
use crate::storage::Storage;

/// Income subcommands
#[derive(Subcommand)]
pub enum IncomeCommands {
    /// Set monthly income
    Set {
        /// Income amount (e.g., "30000" or "₹30,000.00")
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Show current income and savings
    Show,
}

/// Handle an income command
pub fn handle_income_command(
    storage: &Storage,
    settings: &Settings,
    cmd: IncomeCommands,
) -> FinbotResult<()> {
    let service = LedgerService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        IncomeCommands::Set { amount } => {
            let income = service.set_income(&amount)?;
            let totals = service.compute_totals()?;

            println!("Income set to {}", income.format_with_symbol(symbol));
            println!("Savings: {}", totals.savings.format_with_symbol(symbol));
            if totals.savings.is_negative() {
                println!("Warning: expenses exceed income!");
            }
        }

        IncomeCommands::Show => {
            let totals = service.compute_totals()?;

            println!("Income:         {:>16}", totals.income.format_with_symbol(symbol));
            println!(
                "Total Expenses: {:>16}",
                totals.total_expenses.format_with_symbol(symbol)
            );
            println!("Savings:        {:>16}", totals.savings.format_with_symbol(symbol));

            if totals.income.is_zero() {
                println!();
                println!("Tip: Set your income with 'finbot income set <amount>'");
            }
        }
    }

    Ok(())
}
