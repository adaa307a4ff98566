//! Goal CLI commands
//!
//! Implements CLI commands for savings goals.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::goal::{format_goal_details, format_goal_list};
use crate::error::{FinbotError, FinbotResult};
use crate::services::GoalService;
use crate::storage::Storage;

/// Goal subcommands
#[derive(Subcommand)]
pub enum GoalCommands {
    /// Create a savings goal
    Add {
        /// Goal name
        name: String,
        /// Target amount
        target: String,
        /// Amount already saved
        #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
        saved: String,
    },
    /// List goals with progress
    #[command(alias = "ls")]
    List,
    /// Set how much has been saved toward a goal
    Save {
        /// Goal name or ID
        goal: String,
        /// New saved amount; unparseable input counts as zero
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    /// Delete a goal
    #[command(alias = "rm")]
    Delete {
        /// Goal name or ID
        goal: String,
    },
}

/// Handle a goal command
pub fn handle_goal_command(
    storage: &Storage,
    settings: &Settings,
    cmd: GoalCommands,
) -> FinbotResult<()> {
    let service = GoalService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        GoalCommands::Add {
            name,
            target,
            saved,
        } => {
            let goal = service.add_goal(&name, &target, &saved)?;
            println!("Created goal:");
            print!("{}", format_goal_details(&goal, symbol));
        }

        GoalCommands::List => {
            let goals = service.list_goals()?;
            print!("{}", format_goal_list(&goals, symbol));
        }

        GoalCommands::Save { goal, amount } => {
            let found = service
                .resolve_goal(&goal)?
                .ok_or_else(|| FinbotError::goal_not_found(&goal))?;
            let updated = service
                .update_saved_text(found.id, &amount)?
                .ok_or_else(|| FinbotError::goal_not_found(&goal))?;

            print!("{}", format_goal_details(&updated, symbol));
        }

        GoalCommands::Delete { goal } => {
            let found = service
                .resolve_goal(&goal)?
                .ok_or_else(|| FinbotError::goal_not_found(&goal))?;

            if let Some(removed) = service.delete_goal(found.id)? {
                println!("Deleted goal: {}", removed.name);
            }
        }
    }

    Ok(())
}
