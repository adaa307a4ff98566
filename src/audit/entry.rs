//! Audit entries
//!
//! An entry is a timestamp plus the state of one income value, expense or
//! goal before and/or after an operation. The snapshots are the ledger's own
//! types, so reading the log back gives real `Money`, `Expense` and `Goal`
//! values. Which of `before` and `after` is present decides the operation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Expense, Goal, Money};

/// What happened to the entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityType {
    Income,
    Expense,
    Goal,
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityType::Income => write!(f, "Income"),
            EntityType::Expense => write!(f, "Expense"),
            EntityType::Goal => write!(f, "Goal"),
        }
    }
}

/// The recorded state of one entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "entity", content = "value", rename_all = "lowercase")]
pub enum Snapshot {
    Income(Money),
    Expense(Expense),
    Goal(Goal),
}

impl Snapshot {
    pub fn entity_type(&self) -> EntityType {
        match self {
            Snapshot::Income(_) => EntityType::Income,
            Snapshot::Expense(_) => EntityType::Expense,
            Snapshot::Goal(_) => EntityType::Goal,
        }
    }

    /// Display id of the entity; income is a singleton
    pub fn entity_id(&self) -> String {
        match self {
            Snapshot::Income(_) => "income".to_string(),
            Snapshot::Expense(expense) => expense.id.to_string(),
            Snapshot::Goal(goal) => goal.id.to_string(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Snapshot::Income(_) => None,
            Snapshot::Expense(expense) => Some(&expense.name),
            Snapshot::Goal(goal) => Some(&goal.name),
        }
    }
}

/// One line of the audit log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<Snapshot>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<Snapshot>,
}

impl AuditEntry {
    pub fn created(after: Snapshot) -> Self {
        Self {
            timestamp: Utc::now(),
            before: None,
            after: Some(after),
        }
    }

    pub fn updated(before: Snapshot, after: Snapshot) -> Self {
        Self {
            timestamp: Utc::now(),
            before: Some(before),
            after: Some(after),
        }
    }

    pub fn deleted(before: Snapshot) -> Self {
        Self {
            timestamp: Utc::now(),
            before: Some(before),
            after: None,
        }
    }

    pub fn operation(&self) -> Operation {
        match (&self.before, &self.after) {
            (None, _) => Operation::Create,
            (Some(_), Some(_)) => Operation::Update,
            (Some(_), None) => Operation::Delete,
        }
    }

    /// The newest known state of the entity
    fn subject(&self) -> Option<&Snapshot> {
        self.after.as_ref().or(self.before.as_ref())
    }

    pub fn entity_type(&self) -> Option<EntityType> {
        self.subject().map(Snapshot::entity_type)
    }

    /// Field-by-field description of an update, e.g. `amount: 10.00 -> 12.00`
    pub fn changes(&self) -> Option<String> {
        let (Some(before), Some(after)) = (&self.before, &self.after) else {
            return None;
        };

        let mut parts = Vec::new();
        match (before, after) {
            (Snapshot::Income(old), Snapshot::Income(new)) => {
                parts.push(format!("{} -> {}", old, new));
            }
            (Snapshot::Expense(old), Snapshot::Expense(new)) => {
                if old.name != new.name {
                    parts.push(format!("name: {} -> {}", old.name, new.name));
                }
                if old.amount != new.amount {
                    parts.push(format!("amount: {} -> {}", old.amount, new.amount));
                }
            }
            (Snapshot::Goal(old), Snapshot::Goal(new)) => {
                if old.name != new.name {
                    parts.push(format!("name: {} -> {}", old.name, new.name));
                }
                if old.target != new.target {
                    parts.push(format!("target: {} -> {}", old.target, new.target));
                }
                if old.saved != new.saved {
                    parts.push(format!("saved: {} -> {}", old.saved, new.saved));
                }
            }
            _ => return None,
        }

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation()
        );

        if let Some(subject) = self.subject() {
            output.push_str(&format!(
                " {} {}",
                subject.entity_type(),
                subject.entity_id()
            ));
            if let Some(name) = subject.name() {
                output.push_str(&format!(" ({})", name));
            }
        }

        match self.changes() {
            Some(changes) => output.push_str(&format!("\n  Changes: {}", changes)),
            None => {
                if let Some(Snapshot::Income(value) | Snapshot::Expense(Expense { amount: value, .. })) =
                    self.subject()
                {
                    output.push_str(&format!("\n  Amount: {}", value));
                }
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rent() -> Expense {
        Expense::new("Rent", Money::from_units(10000))
    }

    #[test]
    fn test_operation_follows_snapshots() {
        let expense = rent();
        assert_eq!(
            AuditEntry::created(Snapshot::Expense(expense.clone())).operation(),
            Operation::Create
        );
        assert_eq!(
            AuditEntry::updated(
                Snapshot::Expense(expense.clone()),
                Snapshot::Expense(expense.clone())
            )
            .operation(),
            Operation::Update
        );
        assert_eq!(
            AuditEntry::deleted(Snapshot::Expense(expense)).operation(),
            Operation::Delete
        );
    }

    #[test]
    fn test_snapshot_json_shape() {
        let json = serde_json::to_value(Snapshot::Income(Money::from_units(5000))).unwrap();
        assert_eq!(json["entity"], "income");
        assert_eq!(json["value"], 500000);
    }

    #[test]
    fn test_entry_reads_back_typed() {
        let goal = Goal::new("iPhone", Money::from_units(50000), Money::zero());
        let entry = AuditEntry::deleted(Snapshot::Goal(goal.clone()));

        let line = serde_json::to_string(&entry).unwrap();
        assert!(!line.contains("\"after\""));

        let parsed: AuditEntry = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed.before, Some(Snapshot::Goal(goal)));
        assert_eq!(parsed.entity_type(), Some(EntityType::Goal));
    }

    #[test]
    fn test_expense_changes() {
        let before = rent();
        let mut after = before.clone();
        after.amount = Money::from_units(9500);

        let entry = AuditEntry::updated(Snapshot::Expense(before), Snapshot::Expense(after));
        assert_eq!(
            entry.changes().as_deref(),
            Some("amount: 10000.00 -> 9500.00")
        );
    }

    #[test]
    fn test_goal_and_income_changes() {
        let before = Goal::new("Bike", Money::from_units(200), Money::zero());
        let mut after = before.clone();
        after.set_saved(Money::from_units(50));
        let entry = AuditEntry::updated(Snapshot::Goal(before), Snapshot::Goal(after));
        assert_eq!(entry.changes().as_deref(), Some("saved: 0.00 -> 50.00"));

        let entry = AuditEntry::updated(
            Snapshot::Income(Money::zero()),
            Snapshot::Income(Money::from_units(30000)),
        );
        assert_eq!(entry.changes().as_deref(), Some("0.00 -> 30000.00"));
    }

    #[test]
    fn test_human_readable_format() {
        let expense = rent();
        let entry = AuditEntry::created(Snapshot::Expense(expense.clone()));

        let formatted = entry.format_human_readable();
        assert!(formatted.contains(&format!("CREATE Expense {} (Rent)", expense.id)));
        assert!(formatted.contains("Amount: 10000.00"));
    }
}
