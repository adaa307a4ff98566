//! Goal display formatting
//!
//! Formats savings goals with text progress bars.

use crate::models::Goal;

use super::expense::truncate;

const BAR_WIDTH: usize = 20;

/// Render a progress percentage as a fixed-width bar
pub fn progress_bar(percent: u8) -> String {
    let filled = usize::from(percent.min(100)) * BAR_WIDTH / 100;
    format!("[{}{}]", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

/// Format goals as a table with progress
pub fn format_goal_list(goals: &[Goal], symbol: &str) -> String {
    if goals.is_empty() {
        return "No goals yet. Add one with 'finbot goal add'.\n".to_string();
    }

    let name_width = goals
        .iter()
        .map(|g| g.name.chars().count())
        .max()
        .unwrap_or(4)
        .clamp(4, 24);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<13}  {:<name_width$}  {:>14}  {:>14}  {}\n",
        "ID",
        "Name",
        "Saved",
        "Target",
        "Progress",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<13}  {:-<name_width$}  {:->14}  {:->14}  {:-<27}\n",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for goal in goals {
        let percent = goal.progress_percent();
        output.push_str(&format!(
            "{:<13}  {:<name_width$}  {:>14}  {:>14}  {} {:>3}%\n",
            goal.id.to_string(),
            truncate(&goal.name, name_width),
            goal.saved.format_with_symbol(symbol),
            goal.target.format_with_symbol(symbol),
            progress_bar(percent),
            percent,
            name_width = name_width,
        ));
    }

    output
}

/// Format a single goal
pub fn format_goal_details(goal: &Goal, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Goal: {}\n", goal.name));
    output.push_str(&format!("  ID:        {}\n", goal.id));
    output.push_str(&format!(
        "  Target:    {}\n",
        goal.target.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Saved:     {}\n",
        goal.saved.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Progress:  {} {}%\n",
        progress_bar(goal.progress_percent()),
        goal.progress_percent()
    ));

    if goal.is_complete() {
        output.push_str("  Status:    Reached\n");
    } else {
        output.push_str(&format!(
            "  Remaining: {}\n",
            goal.remaining().format_with_symbol(symbol)
        ));
    }

    output
}
