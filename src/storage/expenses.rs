//! Expense repository
//!
//! Keeps the expense collection in insertion order. Every mutation writes the
//! whole collection through to the key-value store while the write lock is
//! held; if the store rejects the write, the in-memory change is undone so
//! memory never runs ahead of what is stored.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::FinbotError;
use crate::models::{Expense, ExpenseId};

use super::bridge::{decode_collection, encode_collection, load_or_default, LoadWarning, EXPENSES_KEY};
use super::kv::KeyValueStore;

/// Repository for expense persistence
pub struct ExpenseRepository {
    store: Arc<dyn KeyValueStore>,
    data: RwLock<Vec<Expense>>,
}

impl ExpenseRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            data: RwLock::new(Vec::new()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Expense>>, FinbotError> {
        self.data
            .read()
            .map_err(|e| FinbotError::Storage(format!("Expense list lock poisoned: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Expense>>, FinbotError> {
        self.data
            .write()
            .map_err(|e| FinbotError::Storage(format!("Expense list lock poisoned: {}", e)))
    }

    fn persist(&self, expenses: &[Expense]) -> Result<(), FinbotError> {
        self.store.set(EXPENSES_KEY, &encode_collection(expenses)?)
    }

    /// Load expenses from the store, defaulting to an empty collection
    pub fn load(&self) -> Result<Option<LoadWarning>, FinbotError> {
        let (expenses, warning) =
            load_or_default(self.store.as_ref(), EXPENSES_KEY, decode_collection::<Expense>);
        *self.write()? = expenses;
        Ok(warning)
    }

    /// Leave the list lock poisoned, as a writer panicking mid-update would
    #[cfg(test)]
    pub(crate) fn poison_for_test(&self) {
        let data = &self.data;
        std::thread::scope(|s| {
            let _ = s
                .spawn(|| {
                    let _guard = data.write();
                    panic!("writer panicked");
                })
                .join();
        });
    }

    /// Get an expense by ID
    pub fn get(&self, id: ExpenseId) -> Result<Option<Expense>, FinbotError> {
        Ok(self.read()?.iter().find(|e| e.id == id).cloned())
    }

    /// Get all expenses in insertion order
    pub fn get_all(&self) -> Result<Vec<Expense>, FinbotError> {
        Ok(self.read()?.clone())
    }

    /// Append an expense
    pub fn push(&self, expense: Expense) -> Result<(), FinbotError> {
        let mut data = self.write()?;
        data.push(expense);

        if let Err(e) = self.persist(&data) {
            data.pop();
            return Err(e);
        }
        Ok(())
    }

    /// Replace an existing expense in place, keeping its position
    ///
    /// Returns the previous version, or `None` if no expense has that id.
    pub fn replace(&self, expense: Expense) -> Result<Option<Expense>, FinbotError> {
        let mut data = self.write()?;
        let Some(index) = data.iter().position(|e| e.id == expense.id) else {
            return Ok(None);
        };

        let previous = std::mem::replace(&mut data[index], expense);
        if let Err(e) = self.persist(&data) {
            data[index] = previous;
            return Err(e);
        }
        Ok(Some(previous))
    }

    /// Remove an expense, returning it if it existed
    pub fn remove(&self, id: ExpenseId) -> Result<Option<Expense>, FinbotError> {
        let mut data = self.write()?;
        let Some(index) = data.iter().position(|e| e.id == id) else {
            return Ok(None);
        };

        let removed = data.remove(index);
        if let Err(e) = self.persist(&data) {
            data.insert(index, removed);
            return Err(e);
        }
        Ok(Some(removed))
    }

    pub fn count(&self) -> Result<usize, FinbotError> {
        Ok(self.read()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use crate::storage::kv::{test_support::RejectingStore, MemoryStore};

    fn repo() -> (Arc<dyn KeyValueStore>, ExpenseRepository) {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let repo = ExpenseRepository::new(store.clone());
        (store, repo)
    }

    #[test]
    fn test_insertion_order_preserved() {
        let (_store, repo) = repo();
        for name in ["Rent", "Food", "Travel"] {
            repo.push(Expense::new(name, Money::from_units(1))).unwrap();
        }

        let names: Vec<_> = repo.get_all().unwrap().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["Rent", "Food", "Travel"]);
    }

    #[test]
    fn test_remove_and_replace() {
        let (_store, repo) = repo();
        let rent = Expense::new("Rent", Money::from_units(10000));
        let food = Expense::new("Food", Money::from_units(5000));
        repo.push(rent.clone()).unwrap();
        repo.push(food.clone()).unwrap();

        let mut cheaper = rent.clone();
        cheaper.amount = Money::from_units(9000);
        assert_eq!(repo.replace(cheaper).unwrap(), Some(rent.clone()));
        assert_eq!(repo.get_all().unwrap()[0].amount, Money::from_units(9000));

        assert!(repo.remove(food.id).unwrap().is_some());
        assert!(repo.remove(food.id).unwrap().is_none());
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_replace_unknown_is_none() {
        let (_store, repo) = repo();
        let stray = Expense::new("Ghost", Money::zero());
        assert!(repo.replace(stray).unwrap().is_none());
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_push_writes_through() {
        let (store, repo) = repo();
        let rent = Expense::new("Rent", Money::from_units(10000));
        repo.push(rent.clone()).unwrap();

        let reloaded = ExpenseRepository::new(store);
        reloaded.load().unwrap();
        assert_eq!(reloaded.get_all().unwrap(), vec![rent]);
    }

    #[test]
    fn test_failed_write_leaves_memory_unchanged() {
        let store = Arc::new(RejectingStore::default());
        let repo = ExpenseRepository::new(store.clone());
        let rent = Expense::new("Rent", Money::from_units(10000));
        repo.push(rent.clone()).unwrap();

        store.reject_writes(true);
        assert!(repo.push(Expense::new("Food", Money::from_units(5000))).is_err());

        let mut cheaper = rent.clone();
        cheaper.amount = Money::from_units(1);
        assert!(repo.replace(cheaper).is_err());
        assert!(repo.remove(rent.id).is_err());

        assert_eq!(repo.get_all().unwrap(), vec![rent]);
    }

    #[test]
    fn test_reload_sees_pushed_data() {
        let (store, repo) = repo();
        let rent = Expense::new("Rent", Money::from_units(10000));
        repo.push(rent.clone()).unwrap();

        let reloaded = ExpenseRepository::new(store);
        assert!(reloaded.load().unwrap().is_none());
        assert_eq!(reloaded.get(rent.id).unwrap(), Some(rent));
    }

    #[test]
    fn test_corrupt_collection_loads_empty() {
        let (store, repo) = repo();
        store.set(EXPENSES_KEY, r#"{"not": "a list"}"#).unwrap();

        let warning = repo.load().unwrap();
        assert!(warning.is_some());
        assert_eq!(repo.count().unwrap(), 0);
    }
}
