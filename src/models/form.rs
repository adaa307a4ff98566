//! Raw input forms
//!
//! Forms hold the text a user typed before it is parsed. Services clear them
//! after a successful submit and prefill them when an entry is taken back for
//! editing.

use super::expense::Expense;

/// Input fields for adding an expense
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseForm {
    pub name: String,
    pub amount: String,
}

impl ExpenseForm {
    pub fn new(name: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            amount: amount.into(),
        }
    }

    /// Load an existing expense into the fields
    pub fn prefill(&mut self, expense: &Expense) {
        self.name = expense.name.clone();
        self.amount = expense.amount.to_string();
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.amount.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.amount.is_empty()
    }
}

/// Input fields for adding a savings goal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalForm {
    pub name: String,
    pub target: String,
    pub saved: String,
}

impl GoalForm {
    pub fn new(
        name: impl Into<String>,
        target: impl Into<String>,
        saved: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            saved: saved.into(),
        }
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.target.clear();
        self.saved.clear();
    }
}
