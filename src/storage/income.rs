//! Income repository
//!
//! Holds the single income scalar and writes it through to the key-value
//! store whenever it changes.

use std::sync::{Arc, RwLock};

use crate::error::FinbotError;
use crate::models::Money;

use super::bridge::{decode_income, encode_income, load_or_default, LoadWarning, INCOME_KEY};
use super::kv::KeyValueStore;

/// Repository for the income scalar
pub struct IncomeRepository {
    store: Arc<dyn KeyValueStore>,
    income: RwLock<Money>,
}

impl IncomeRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            income: RwLock::new(Money::zero()),
        }
    }

    fn lock_error(e: impl std::fmt::Display) -> FinbotError {
        FinbotError::Storage(format!("Income lock poisoned: {}", e))
    }

    /// Load income from the store, defaulting to zero
    pub fn load(&self) -> Result<Option<LoadWarning>, FinbotError> {
        let (value, warning) = load_or_default(self.store.as_ref(), INCOME_KEY, decode_income);
        *self.income.write().map_err(Self::lock_error)? = value;
        Ok(warning)
    }

    pub fn get(&self) -> Result<Money, FinbotError> {
        Ok(*self.income.read().map_err(Self::lock_error)?)
    }

    /// Replace and store the income, returning the previous value
    ///
    /// A rejected store write leaves the previous value in place.
    pub fn set(&self, value: Money) -> Result<Money, FinbotError> {
        let mut income = self.income.write().map_err(Self::lock_error)?;
        self.store.set(INCOME_KEY, &encode_income(value))?;
        Ok(std::mem::replace(&mut *income, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::kv::{test_support::RejectingStore, MemoryStore};

    #[test]
    fn test_set_and_get() {
        let repo = IncomeRepository::new(Arc::new(MemoryStore::new()));
        assert_eq!(repo.get().unwrap(), Money::zero());

        let previous = repo.set(Money::from_units(30000)).unwrap();
        assert_eq!(previous, Money::zero());
        assert_eq!(repo.get().unwrap(), Money::from_units(30000));
    }

    #[test]
    fn test_set_writes_through() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());

        let repo = IncomeRepository::new(store.clone());
        repo.set(Money::from_units(5000)).unwrap();

        let reloaded = IncomeRepository::new(store.clone());
        assert!(reloaded.load().unwrap().is_none());
        assert_eq!(reloaded.get().unwrap(), Money::from_units(5000));
        assert_eq!(store.get(INCOME_KEY).unwrap().as_deref(), Some("5000.00"));
    }

    #[test]
    fn test_unparseable_income_defaults_to_zero() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let repo = IncomeRepository::new(store.clone());
        repo.set(Money::from_units(1)).unwrap();

        store.set(INCOME_KEY, "NaN").unwrap();
        let warning = repo.load().unwrap();

        assert!(warning.is_some());
        assert_eq!(repo.get().unwrap(), Money::zero());
    }

    #[test]
    fn test_rejected_write_keeps_previous_income() {
        let store = Arc::new(RejectingStore::default());
        let repo = IncomeRepository::new(store.clone());
        repo.set(Money::from_units(100)).unwrap();

        store.reject_writes(true);
        assert!(repo.set(Money::from_units(999)).is_err());
        assert_eq!(repo.get().unwrap(), Money::from_units(100));
    }
}
