//! Expense model
//!
//! An expense is a named amount recorded against the ledger. Expenses are
//! kept in insertion order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::ExpenseId;
use super::money::Money;

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyName,
}

impl std::fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Expense name cannot be empty"),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

/// A single expense entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub name: String,
    pub amount: Money,
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Create a new expense with a fresh id
    pub fn new(name: impl Into<String>, amount: Money) -> Self {
        Self {
            id: ExpenseId::new(),
            name: name.into().trim().to_string(),
            amount,
            created_at: Utc::now(),
        }
    }

    /// Validate the expense
    ///
    /// Any amount is accepted, including negative ones (refunds).
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.name.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyName);
        }
        Ok(())
    }
}

impl std::fmt::Display for Expense {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_expense() {
        let expense = Expense::new("  Rent ", Money::from_units(10000));
        assert_eq!(expense.name, "Rent");
        assert_eq!(expense.amount.cents(), 1_000_000);
        assert!(expense.validate().is_ok());
    }

    #[test]
    fn test_unique_ids() {
        let a = Expense::new("Food", Money::from_units(1));
        let b = Expense::new("Food", Money::from_units(1));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_validation_empty_name() {
        let expense = Expense::new("   ", Money::from_units(5));
        assert_eq!(expense.validate(), Err(ExpenseValidationError::EmptyName));
    }

    #[test]
    fn test_negative_amount_is_valid() {
        let expense = Expense::new("Refund", Money::from_cents(-500));
        assert!(expense.validate().is_ok());
    }

    #[test]
    fn test_serialization() {
        let expense = Expense::new("Food", Money::from_units(5000));
        let json = serde_json::to_string(&expense).unwrap();
        let deserialized: Expense = serde_json::from_str(&json).unwrap();
        assert_eq!(expense, deserialized);
    }
}
