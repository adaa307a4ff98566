//! Display formatting for terminal output
//!
//! Plain-text tables and progress bars for the one-shot CLI commands.

pub mod expense;
pub mod goal;
pub mod plan;

pub use expense::{format_expense_details, format_expense_list};
pub use goal::{format_goal_details, format_goal_list, progress_bar};
pub use plan::format_plan;
