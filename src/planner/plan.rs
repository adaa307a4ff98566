//! Plan result types

use serde::{Deserialize, Serialize};

use crate::models::Money;

/// One category of a suggested budget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetLine {
    pub category: String,
    pub amount: Money,
}

impl BudgetLine {
    pub fn new(category: impl Into<String>, amount: Money) -> Self {
        Self {
            category: category.into(),
            amount,
        }
    }
}

/// A finished plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanResult {
    pub budget_breakdown: Vec<BudgetLine>,
    pub goal_timeline: String,
    pub tips: Vec<String>,
}

impl PlanResult {
    /// Sum of every breakdown line
    pub fn total_budgeted(&self) -> Money {
        self.budget_breakdown.iter().map(|line| line.amount).sum()
    }
}
