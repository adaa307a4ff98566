//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod audit;
pub mod contact;
pub mod dashboard;
pub mod expense;
pub mod goal;
pub mod income;
pub mod plan;

pub use audit::handle_audit_command;
pub use contact::{handle_contact_command, ContactArgs};
pub use dashboard::handle_dashboard_command;
pub use expense::{handle_expense_command, ExpenseCommands};
pub use goal::{handle_goal_command, GoalCommands};
pub use income::{handle_income_command, IncomeCommands};
pub use plan::handle_plan_command;
