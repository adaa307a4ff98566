//! Audit logging system for FinBot
//!
//! Records every create, update and delete of income, expenses and goals in
//! an append-only, line-delimited JSON log.
//!
//! - `AuditEntry`: a timestamp plus typed `Snapshot`s of the entity before
//!   and after the operation.
//! - `AuditLogger`: appends entries to the log file and reads them back.
//!
//! ```rust,ignore
//! use finbot::audit::{AuditEntry, AuditLogger, Snapshot};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.append(&AuditEntry::created(Snapshot::Expense(expense.clone())))?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation, Snapshot};
pub use logger::AuditLogger;
