//! Dashboard CLI command

use std::io;

use crate::config::settings::Settings;
use crate::error::FinbotResult;
use crate::models::Session;
use crate::reports::DashboardReport;
use crate::storage::Storage;

/// Print the dashboard report
pub fn handle_dashboard_command(
    storage: &Storage,
    settings: &Settings,
    session: &Session,
) -> FinbotResult<()> {
    let report = DashboardReport::generate(storage)?;

    if session.is_authenticated() {
        println!("Signed in as {}", session.display_email());
        println!();
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    report.format_terminal(&mut handle, &settings.currency_symbol)
}
