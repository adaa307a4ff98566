//! Expense CLI commands
//!
//! Implements CLI commands for the expense ledger.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::expense::{format_expense_details, format_expense_list};
use crate::error::{FinbotError, FinbotResult};
use crate::services::LedgerService;
use crate::storage::Storage;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record an expense
    Add {
        /// What the money went on
        name: String,
        /// Amount (e.g., "5000" or "49.99"); negative for refunds
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    /// List all expenses
    #[command(alias = "ls")]
    List,
    /// Edit an expense in place
    Edit {
        /// Expense name or ID
        expense: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New amount
        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,
    },
    /// Delete an expense
    #[command(alias = "rm")]
    Delete {
        /// Expense name or ID
        expense: String,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> FinbotResult<()> {
    let service = LedgerService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ExpenseCommands::Add { name, amount } => {
            let expense = service.add_expense(&name, &amount)?;
            let totals = service.compute_totals()?;

            println!("Added expense:");
            print!("{}", format_expense_details(&expense, symbol));
            println!(
                "Total expenses: {}",
                totals.total_expenses.format_with_symbol(symbol)
            );
        }

        ExpenseCommands::List => {
            let expenses = service.list_expenses()?;
            print!("{}", format_expense_list(&expenses, symbol));
        }

        ExpenseCommands::Edit {
            expense,
            name,
            amount,
        } => {
            if name.is_none() && amount.is_none() {
                return Err(FinbotError::Validation(
                    "Nothing to change; pass --name and/or --amount".into(),
                ));
            }

            let found = service
                .resolve_expense(&expense)?
                .ok_or_else(|| FinbotError::expense_not_found(&expense))?;
            let updated = service.update_expense(found.id, name.as_deref(), amount.as_deref())?;

            println!("Updated expense:");
            print!("{}", format_expense_details(&updated, symbol));
        }

        ExpenseCommands::Delete { expense } => {
            let found = service
                .resolve_expense(&expense)?
                .ok_or_else(|| FinbotError::expense_not_found(&expense))?;

            if let Some(removed) = service.delete_expense(found.id)? {
                println!(
                    "Deleted expense: {} ({})",
                    removed.name,
                    removed.amount.format_with_symbol(symbol)
                );
            }
        }
    }

    Ok(())
}
