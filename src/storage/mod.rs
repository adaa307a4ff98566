//! Storage layer for FinBot
//!
//! Income, expenses and goals live in memory inside their repositories and
//! are mirrored to a local key-value store whenever they change. Startup
//! never fails on bad stored data: anything unreadable is replaced by its
//! default and reported as a [`LoadWarning`].

pub mod bridge;
pub mod expenses;
pub mod goals;
pub mod income;
pub mod kv;

pub use bridge::{LoadWarning, EXPENSES_KEY, GOALS_KEY, INCOME_KEY};
pub use expenses::ExpenseRepository;
pub use goals::GoalRepository;
pub use income::IncomeRepository;
pub use kv::{JsonFileStore, KeyValueStore, MemoryStore};

use std::sync::{Arc, Mutex};

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::paths::FinbotPaths;
use crate::error::FinbotError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    store: Arc<dyn KeyValueStore>,
    audit: Option<AuditLogger>,
    audit_failures: Mutex<Vec<String>>,
    warnings: Vec<LoadWarning>,
    pub income: IncomeRepository,
    pub expenses: ExpenseRepository,
    pub goals: GoalRepository,
}

impl Storage {
    /// Create file-backed storage under the given paths
    pub fn new(paths: &FinbotPaths) -> Result<Self, FinbotError> {
        paths.ensure_directories()?;

        let (store, warning) = JsonFileStore::open(paths.local_store_file());
        let mut storage = Self::with_store(Arc::new(store));
        storage.audit = Some(AuditLogger::new(paths.audit_log()));
        storage.warnings.extend(warning);

        Ok(storage)
    }

    /// Create storage over an arbitrary store, without an audit log
    pub fn with_store(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            income: IncomeRepository::new(store.clone()),
            expenses: ExpenseRepository::new(store.clone()),
            goals: GoalRepository::new(store.clone()),
            store,
            audit: None,
            audit_failures: Mutex::new(Vec::new()),
            warnings: Vec::new(),
        }
    }

    /// Ephemeral storage that forgets everything on drop
    pub fn in_memory() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    /// The underlying key-value store
    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Load all data from the store
    ///
    /// Returns every value that had to be discarded, including any problem
    /// found while opening the store itself.
    pub fn load_all(&mut self) -> Result<&[LoadWarning], FinbotError> {
        let loaded = [self.income.load()?, self.expenses.load()?, self.goals.load()?];
        self.warnings.extend(loaded.into_iter().flatten());
        Ok(&self.warnings)
    }

    /// Warnings collected while opening and loading
    pub fn warnings(&self) -> &[LoadWarning] {
        &self.warnings
    }

    /// The audit logger, when this storage keeps one
    pub fn audit(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    /// Append an entry to the audit log
    ///
    /// Called after a change is already committed to the store, so a failed
    /// append never undoes or fails the change. The failure is kept for the
    /// host to report through [`Storage::take_audit_failures`].
    pub fn record(&self, entry: AuditEntry) {
        let Some(audit) = &self.audit else {
            return;
        };
        if let Err(e) = audit.append(&entry) {
            if let Ok(mut failures) = self.audit_failures.lock() {
                failures.push(e.to_string());
            }
        }
    }

    /// Drain the audit append failures seen so far
    pub fn take_audit_failures(&self) -> Vec<String> {
        self.audit_failures
            .lock()
            .map(|mut failures| std::mem::take(&mut *failures))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Snapshot;
    use crate::models::{Expense, Money};
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinbotPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(&paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(storage.load_all().unwrap().is_empty());
        assert!(storage.audit().is_some());
    }

    #[test]
    fn test_reload_from_disk() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinbotPaths::with_base_dir(temp_dir.path().to_path_buf());

        {
            let mut storage = Storage::new(&paths).unwrap();
            storage.load_all().unwrap();
            storage.income.set(Money::from_units(5000)).unwrap();
            storage
                .expenses
                .push(Expense::new("Rent", Money::from_units(1000)))
                .unwrap();
        }

        let mut storage = Storage::new(&paths).unwrap();
        storage.load_all().unwrap();
        assert_eq!(storage.income.get().unwrap(), Money::from_units(5000));
        assert_eq!(storage.expenses.count().unwrap(), 1);
        assert!(storage.goals.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_store_file_starts_empty() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinbotPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        std::fs::write(paths.local_store_file(), "garbage").unwrap();

        let mut storage = Storage::new(&paths).unwrap();
        let warnings = storage.load_all().unwrap();

        assert_eq!(warnings.len(), 1);
        assert_eq!(storage.income.get().unwrap(), Money::zero());
    }

    #[test]
    fn test_in_memory_has_no_audit() {
        let storage = Storage::in_memory();
        assert!(storage.audit().is_none());
        storage.record(AuditEntry::created(Snapshot::Income(Money::zero())));
        assert!(storage.take_audit_failures().is_empty());
    }

    #[test]
    fn test_record_keeps_failures_for_the_host() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinbotPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(&paths).unwrap();
        std::fs::create_dir(paths.audit_log()).unwrap();

        storage.record(AuditEntry::created(Snapshot::Income(Money::zero())));

        assert_eq!(storage.take_audit_failures().len(), 1);
        assert!(storage.take_audit_failures().is_empty());
    }
}
