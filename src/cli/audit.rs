//! Audit CLI command
//!
//! Shows the most recent entries of the audit log.

use crate::error::FinbotResult;
use crate::storage::Storage;

/// Handle the audit command
pub fn handle_audit_command(storage: &Storage, count: usize) -> FinbotResult<()> {
    let Some(audit) = storage.audit() else {
        println!("This session keeps no audit log.");
        return Ok(());
    };

    let entries = audit.read_recent(count)?;
    if entries.is_empty() {
        println!("No audit entries yet.");
        return Ok(());
    }

    println!("Audit log: {}", audit.path().display());
    println!("{}", "-".repeat(60));
    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}
