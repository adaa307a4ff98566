//! Plan CLI command
//!
//! Runs the planner once and waits for its delay to elapse.

use std::io::Write;
use std::thread;
use std::time::Instant;

use crate::config::settings::Settings;
use crate::display::plan::format_plan;
use crate::error::{FinbotError, FinbotResult};
use crate::planner::MockPlanner;

/// Handle the plan command
pub fn handle_plan_command(settings: &Settings, text: &str) -> FinbotResult<()> {
    let mut planner = MockPlanner::new(settings.planner_delay());

    if planner.submit(text, Instant::now()).is_none() {
        return Err(FinbotError::Validation(
            "Describe your income, expenses or goals to get a plan".into(),
        ));
    }

    print!("Generating plan...");
    std::io::stdout().flush()?;

    loop {
        let Some(ready_at) = planner.ready_at() else {
            break;
        };
        thread::sleep(ready_at.saturating_duration_since(Instant::now()));

        if let Some(plan) = planner.poll(Instant::now()) {
            println!(" done.");
            println!();
            print!("{}", format_plan(plan, &settings.currency_symbol));
            break;
        }
    }

    Ok(())
}
