//! Goal service
//!
//! Manages savings goals: creation from the goal form, deletion, and
//! updates to the saved amount. Progress is never stored; it is read off
//! each goal with [`Goal::progress_percent`].

use crate::audit::{AuditEntry, Snapshot};
use crate::error::{FinbotError, FinbotResult};
use crate::models::{Goal, GoalForm, GoalId, Money};
use crate::storage::Storage;

use super::parse_money_field;

/// Service for savings goal management
pub struct GoalService<'a> {
    storage: &'a Storage,
}

impl<'a> GoalService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a goal from raw input
    ///
    /// A blank `saved_text` starts the goal at zero.
    pub fn add_goal(&self, name: &str, target_text: &str, saved_text: &str) -> FinbotResult<Goal> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FinbotError::Validation("Goal name cannot be empty".into()));
        }
        let target = parse_money_field("target", target_text)?;
        let saved = if saved_text.trim().is_empty() {
            Money::zero()
        } else {
            parse_money_field("saved", saved_text)?
        };

        let goal = Goal::new(name, target, saved);
        goal.validate()
            .map_err(|e| FinbotError::Validation(e.to_string()))?;

        self.storage.goals.push(goal.clone())?;
        self.storage
            .record(AuditEntry::created(Snapshot::Goal(goal.clone())));

        Ok(goal)
    }

    /// Submit the goal form, clearing it on success
    pub fn submit_goal_form(&self, form: &mut GoalForm) -> FinbotResult<Goal> {
        let goal = self.add_goal(&form.name, &form.target, &form.saved)?;
        form.clear();
        Ok(goal)
    }

    /// Delete a goal; an unknown id is a no-op returning `None`
    pub fn delete_goal(&self, id: GoalId) -> FinbotResult<Option<Goal>> {
        let Some(removed) = self.storage.goals.remove(id)? else {
            return Ok(None);
        };
        self.storage
            .record(AuditEntry::deleted(Snapshot::Goal(removed.clone())));

        Ok(Some(removed))
    }

    /// Replace a goal's saved amount
    ///
    /// The amount is stored as given, even past the target or below zero.
    /// An unknown id changes nothing and returns `None`.
    pub fn update_saved(&self, id: GoalId, saved: Money) -> FinbotResult<Option<Goal>> {
        let Some((before, after)) = self.storage.goals.modify(id, |g| g.set_saved(saved))? else {
            return Ok(None);
        };
        self.storage.record(AuditEntry::updated(
            Snapshot::Goal(before),
            Snapshot::Goal(after.clone()),
        ));

        Ok(Some(after))
    }

    /// Update the saved amount from a text field
    ///
    /// Unparseable text counts as zero, matching an inline number field
    /// that has been cleared.
    pub fn update_saved_text(&self, id: GoalId, text: &str) -> FinbotResult<Option<Goal>> {
        let saved = Money::parse(text).unwrap_or_default();
        self.update_saved(id, saved)
    }

    /// All goals in insertion order
    pub fn list_goals(&self) -> FinbotResult<Vec<Goal>> {
        self.storage.goals.get_all()
    }

    /// Find a goal by full id, unique name, or id prefix
    pub fn resolve_goal(&self, identifier: &str) -> FinbotResult<Option<Goal>> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Ok(None);
        }

        if let Ok(id) = identifier.parse::<GoalId>() {
            return self.storage.goals.get(id);
        }

        let goals = self.storage.goals.get_all()?;
        let prefix = identifier
            .strip_prefix("goal-")
            .unwrap_or(identifier)
            .to_lowercase();

        let by_name: Vec<_> = goals
            .iter()
            .filter(|g| g.name.eq_ignore_ascii_case(identifier))
            .collect();
        let candidates = if !by_name.is_empty() {
            by_name
        } else if prefix.is_empty() {
            Vec::new()
        } else {
            goals
                .iter()
                .filter(|g| g.id.as_uuid().to_string().starts_with(&prefix))
                .collect()
        };

        match candidates.as_slice() {
            [] => Ok(None),
            [only] => Ok(Some((*only).clone())),
            _ => Err(FinbotError::Validation(format!(
                "'{}' matches more than one goal; use its id",
                identifier
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FinbotPaths;
    use crate::storage::kv::test_support::RejectingStore;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinbotPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(&paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_iphone_goal_progress() {
        let (_temp_dir, storage) = create_test_storage();
        let service = GoalService::new(&storage);

        let goal = service.add_goal("iPhone", "50000", "").unwrap();
        assert_eq!(goal.saved, Money::zero());
        assert_eq!(goal.progress_percent(), 0);

        let goal = service
            .update_saved(goal.id, Money::from_units(25000))
            .unwrap()
            .unwrap();
        assert_eq!(goal.progress_percent(), 50);
    }

    #[test]
    fn test_overshoot_is_stored_but_clamped() {
        let (_temp_dir, storage) = create_test_storage();
        let service = GoalService::new(&storage);
        let goal = service.add_goal("Trip", "100", "0").unwrap();

        let goal = service
            .update_saved(goal.id, Money::from_units(150))
            .unwrap()
            .unwrap();
        assert_eq!(goal.saved, Money::from_units(150));
        assert_eq!(goal.progress_percent(), 100);
    }

    #[test]
    fn test_add_goal_validation() {
        let (_temp_dir, storage) = create_test_storage();
        let service = GoalService::new(&storage);

        for (name, target, saved) in [
            ("", "100", "0"),
            ("Car", "", "0"),
            ("Car", "lots", "0"),
            ("Car", "0", "0"),
            ("Car", "-5", "0"),
            ("Car", "100", "some"),
        ] {
            assert!(service.add_goal(name, target, saved).unwrap_err().is_validation());
        }
        assert!(service.list_goals().unwrap().is_empty());
    }

    #[test]
    fn test_submit_form() {
        let (_temp_dir, storage) = create_test_storage();
        let service = GoalService::new(&storage);

        let mut form = GoalForm::new("Laptop", "80000", "1000");
        let goal = service.submit_goal_form(&mut form).unwrap();

        assert_eq!(goal.saved, Money::from_units(1000));
        assert_eq!(form, GoalForm::default());
    }

    #[test]
    fn test_update_saved_text_falls_back_to_zero() {
        let (_temp_dir, storage) = create_test_storage();
        let service = GoalService::new(&storage);
        let goal = service.add_goal("Bike", "200", "50").unwrap();

        let goal = service.update_saved_text(goal.id, "").unwrap().unwrap();
        assert_eq!(goal.saved, Money::zero());

        let goal = service.update_saved_text(goal.id, "12.5").unwrap().unwrap();
        assert_eq!(goal.saved, Money::from_cents(1250));
    }

    #[test]
    fn test_unknown_goal_is_noop() {
        let (_temp_dir, storage) = create_test_storage();
        let service = GoalService::new(&storage);
        service.add_goal("Bike", "200", "").unwrap();

        let missing = GoalId::new();
        assert!(service.update_saved(missing, Money::from_units(1)).unwrap().is_none());
        assert!(service.delete_goal(missing).unwrap().is_none());
        assert_eq!(service.list_goals().unwrap().len(), 1);
    }

    #[test]
    fn test_delete_goal() {
        let (_temp_dir, storage) = create_test_storage();
        let service = GoalService::new(&storage);
        let goal = service.add_goal("Bike", "200", "").unwrap();

        assert!(service.delete_goal(goal.id).unwrap().is_some());
        assert!(service.list_goals().unwrap().is_empty());
    }

    #[test]
    fn test_goals_survive_reload() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinbotPaths::with_base_dir(temp_dir.path().to_path_buf());
        let id = {
            let mut storage = Storage::new(&paths).unwrap();
            storage.load_all().unwrap();
            GoalService::new(&storage)
                .add_goal("iPhone", "50000", "25000")
                .unwrap()
                .id
        };

        let mut storage = Storage::new(&paths).unwrap();
        storage.load_all().unwrap();
        let goal = GoalService::new(&storage)
            .resolve_goal(&id.to_string())
            .unwrap()
            .unwrap();
        assert_eq!(goal.progress_percent(), 50);
    }

    #[test]
    fn test_resolve_goal_by_name() {
        let (_temp_dir, storage) = create_test_storage();
        let service = GoalService::new(&storage);
        let goal = service.add_goal("iPhone", "50000", "").unwrap();

        assert_eq!(service.resolve_goal("iphone").unwrap().map(|g| g.id), Some(goal.id));
        assert!(service.resolve_goal("Car").unwrap().is_none());
        assert!(service.resolve_goal("goal-").unwrap().is_none());
    }

    #[test]
    fn test_rejected_write_keeps_saved_amount() {
        let store = Arc::new(RejectingStore::default());
        let storage = Storage::with_store(store.clone());
        let service = GoalService::new(&storage);
        let goal = service.add_goal("Bike", "200", "50").unwrap();

        store.reject_writes(true);
        assert!(service.update_saved(goal.id, Money::from_units(80)).is_err());
        assert!(service.add_goal("Car", "100", "").is_err());

        assert_eq!(service.list_goals().unwrap(), vec![goal]);
    }

    #[test]
    fn test_goal_change_survives_audit_failure() {
        let (temp_dir, storage) = create_test_storage();
        std::fs::create_dir(temp_dir.path().join("audit.log")).unwrap();
        let service = GoalService::new(&storage);

        let goal = service.add_goal("Bike", "200", "").unwrap();
        service.update_saved(goal.id, Money::from_units(20)).unwrap();

        assert_eq!(service.list_goals().unwrap()[0].saved, Money::from_units(20));
        assert_eq!(storage.take_audit_failures().len(), 2);
    }
}
