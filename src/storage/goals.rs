//! Goal repository
//!
//! Savings goals are persisted under their own key next to the ledger, with
//! the same write-through and undo-on-failure rules as expenses.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::FinbotError;
use crate::models::{Goal, GoalId};

use super::bridge::{decode_collection, encode_collection, load_or_default, LoadWarning, GOALS_KEY};
use super::kv::KeyValueStore;

/// Repository for savings goals
pub struct GoalRepository {
    store: Arc<dyn KeyValueStore>,
    data: RwLock<Vec<Goal>>,
}

impl GoalRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            data: RwLock::new(Vec::new()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Goal>>, FinbotError> {
        self.data
            .read()
            .map_err(|e| FinbotError::Storage(format!("Goal list lock poisoned: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Goal>>, FinbotError> {
        self.data
            .write()
            .map_err(|e| FinbotError::Storage(format!("Goal list lock poisoned: {}", e)))
    }

    fn persist(&self, goals: &[Goal]) -> Result<(), FinbotError> {
        self.store.set(GOALS_KEY, &encode_collection(goals)?)
    }

    /// Load goals from the store, defaulting to none
    pub fn load(&self) -> Result<Option<LoadWarning>, FinbotError> {
        let (goals, warning) =
            load_or_default(self.store.as_ref(), GOALS_KEY, decode_collection::<Goal>);
        *self.write()? = goals;
        Ok(warning)
    }

    pub fn get(&self, id: GoalId) -> Result<Option<Goal>, FinbotError> {
        Ok(self.read()?.iter().find(|g| g.id == id).cloned())
    }

    /// Get all goals in creation order
    pub fn get_all(&self) -> Result<Vec<Goal>, FinbotError> {
        Ok(self.read()?.clone())
    }

    pub fn push(&self, goal: Goal) -> Result<(), FinbotError> {
        let mut data = self.write()?;
        data.push(goal);

        if let Err(e) = self.persist(&data) {
            data.pop();
            return Err(e);
        }
        Ok(())
    }

    /// Apply `f` to the goal with `id`
    ///
    /// Returns the goal before and after the change, or `None` if absent.
    pub fn modify<F>(&self, id: GoalId, f: F) -> Result<Option<(Goal, Goal)>, FinbotError>
    where
        F: FnOnce(&mut Goal),
    {
        let mut data = self.write()?;
        let Some(index) = data.iter().position(|g| g.id == id) else {
            return Ok(None);
        };

        let before = data[index].clone();
        f(&mut data[index]);
        let after = data[index].clone();

        if let Err(e) = self.persist(&data) {
            data[index] = before;
            return Err(e);
        }
        Ok(Some((before, after)))
    }

    pub fn remove(&self, id: GoalId) -> Result<Option<Goal>, FinbotError> {
        let mut data = self.write()?;
        let Some(index) = data.iter().position(|g| g.id == id) else {
            return Ok(None);
        };

        let removed = data.remove(index);
        if let Err(e) = self.persist(&data) {
            data.insert(index, removed);
            return Err(e);
        }
        Ok(Some(removed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use crate::storage::kv::{test_support::RejectingStore, MemoryStore};

    #[test]
    fn test_modify_goal() {
        let repo = GoalRepository::new(Arc::new(MemoryStore::new()));
        let goal = Goal::new("iPhone", Money::from_units(50000), Money::zero());
        repo.push(goal.clone()).unwrap();

        let (before, after) = repo
            .modify(goal.id, |g| g.set_saved(Money::from_units(25000)))
            .unwrap()
            .unwrap();
        assert_eq!(before.saved, Money::zero());
        assert_eq!(after.saved, Money::from_units(25000));
        assert_eq!(repo.get(goal.id).unwrap().unwrap().saved, Money::from_units(25000));

        assert!(repo.modify(GoalId::new(), |_| {}).unwrap().is_none());
    }

    #[test]
    fn test_failed_write_restores_goal() {
        let store = Arc::new(RejectingStore::default());
        let repo = GoalRepository::new(store.clone());
        let goal = Goal::new("Bike", Money::from_units(200), Money::zero());
        repo.push(goal.clone()).unwrap();

        store.reject_writes(true);
        assert!(repo
            .modify(goal.id, |g| g.set_saved(Money::from_units(150)))
            .is_err());
        assert!(repo.remove(goal.id).is_err());
        assert!(repo.push(Goal::new("Car", Money::from_units(1), Money::zero())).is_err());

        assert_eq!(repo.get_all().unwrap(), vec![goal]);
    }

    #[test]
    fn test_remove_twice() {
        let repo = GoalRepository::new(Arc::new(MemoryStore::new()));
        let goal = Goal::new("Car", Money::from_units(1), Money::zero());
        repo.push(goal.clone()).unwrap();

        assert!(repo.remove(goal.id).unwrap().is_some());
        assert!(repo.remove(goal.id).unwrap().is_none());
    }

    #[test]
    fn test_reload_sees_pushed_data() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let repo = GoalRepository::new(store.clone());
        repo.push(Goal::new("Laptop", Money::from_units(80000), Money::from_units(100)))
            .unwrap();

        let reloaded = GoalRepository::new(store);
        reloaded.load().unwrap();
        let goals = reloaded.get_all().unwrap();
        assert_eq!(goals.len(), 1);
        assert_eq!(goals[0].name, "Laptop");
    }
}
