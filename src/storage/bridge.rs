//! Persistence bridge
//!
//! Mirrors in-memory state into a [`KeyValueStore`](super::KeyValueStore)
//! under fixed keys. Income is stored as its plain decimal string; collections
//! are stored as JSON arrays. There is no schema version: a value that cannot
//! be decoded is dropped in favour of the default and reported as a
//! [`LoadWarning`].

use serde::{de::DeserializeOwned, Serialize};

use crate::error::FinbotError;
use crate::models::Money;

use super::kv::KeyValueStore;

/// Key holding the income scalar
pub const INCOME_KEY: &str = "finbot.income";

/// Key holding the expense collection
pub const EXPENSES_KEY: &str = "finbot.expenses";

/// Key holding the savings goals
pub const GOALS_KEY: &str = "finbot.goals";

/// A stored value that was discarded during startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadWarning {
    /// Key (or file) whose contents were discarded
    pub source: String,
    /// Why it could not be used
    pub reason: String,
}

impl LoadWarning {
    pub fn new(source: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ignored stored '{}': {}", self.source, self.reason)
    }
}

pub fn encode_income(income: Money) -> String {
    income.to_string()
}

pub fn decode_income(raw: &str) -> Result<Money, String> {
    Money::parse(raw).map_err(|e| e.to_string())
}

pub fn encode_collection<T: Serialize>(items: &[T]) -> Result<String, FinbotError> {
    serde_json::to_string(items)
        .map_err(|e| FinbotError::Storage(format!("Failed to serialize collection: {}", e)))
}

pub fn decode_collection<T: DeserializeOwned>(raw: &str) -> Result<Vec<T>, String> {
    serde_json::from_str(raw).map_err(|e| e.to_string())
}

/// Read `key` and decode it, falling back to `T::default()`
///
/// Never fails. A missing key is a fresh start and yields the default
/// silently; a store or decode error yields the default plus a warning.
pub fn load_or_default<T, F>(store: &dyn KeyValueStore, key: &str, decode: F) -> (T, Option<LoadWarning>)
where
    T: Default,
    F: FnOnce(&str) -> Result<T, String>,
{
    match store.get(key) {
        Ok(None) => (T::default(), None),
        Ok(Some(raw)) => match decode(&raw) {
            Ok(value) => (value, None),
            Err(reason) => (T::default(), Some(LoadWarning::new(key, reason))),
        },
        Err(e) => (T::default(), Some(LoadWarning::new(key, e.to_string()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::kv::MemoryStore;

    #[test]
    fn test_income_round_trip() {
        let income = Money::from_units(5000);
        let raw = encode_income(income);
        assert_eq!(raw, "5000.00");
        assert_eq!(decode_income(&raw).unwrap(), income);
    }

    #[test]
    fn test_load_missing_key_is_default_without_warning() {
        let store = MemoryStore::new();
        let (income, warning) = load_or_default(&store, INCOME_KEY, decode_income);
        assert_eq!(income, Money::zero());
        assert!(warning.is_none());
    }

    #[test]
    fn test_load_garbage_is_default_with_warning() {
        let store = MemoryStore::new();
        store.set(INCOME_KEY, "lots").unwrap();
        store.set(EXPENSES_KEY, "[{broken").unwrap();

        let (income, warning) = load_or_default(&store, INCOME_KEY, decode_income);
        assert_eq!(income, Money::zero());
        assert_eq!(warning.unwrap().source, INCOME_KEY);

        let (items, warning): (Vec<crate::models::Expense>, _) =
            load_or_default(&store, EXPENSES_KEY, decode_collection);
        assert!(items.is_empty());
        assert!(warning.is_some());
    }
}
