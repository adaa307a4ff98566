//! Savings goal model
//!
//! A goal is a named target amount with an independently mutable saved
//! amount. Progress is derived and clamped only at read time; the stored
//! `saved` value may be negative or exceed the target.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::GoalId;
use super::money::Money;

/// Validation errors for goals
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalValidationError {
    EmptyName,
    NonPositiveTarget,
}

impl std::fmt::Display for GoalValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Goal name cannot be empty"),
            Self::NonPositiveTarget => write!(f, "Goal target must be greater than zero"),
        }
    }
}

impl std::error::Error for GoalValidationError {}

/// A savings goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: GoalId,
    pub name: String,
    pub target: Money,
    pub saved: Money,
    pub created_at: DateTime<Utc>,
}

impl Goal {
    /// Create a new goal with a fresh id
    pub fn new(name: impl Into<String>, target: Money, saved: Money) -> Self {
        Self {
            id: GoalId::new(),
            name: name.into().trim().to_string(),
            target,
            saved,
            created_at: Utc::now(),
        }
    }

    /// Replace the saved amount. No clamping is applied.
    pub fn set_saved(&mut self, saved: Money) {
        self.saved = saved;
    }

    /// Validate the goal
    pub fn validate(&self) -> Result<(), GoalValidationError> {
        if self.name.trim().is_empty() {
            return Err(GoalValidationError::EmptyName);
        }
        if !self.target.is_positive() {
            return Err(GoalValidationError::NonPositiveTarget);
        }
        Ok(())
    }

    /// Progress toward the target as a whole percentage in `0..=100`
    ///
    /// Rounds half away from zero. A non-positive target reports 0.
    pub fn progress_percent(&self) -> u8 {
        let target = i128::from(self.target.cents());
        let saved = i128::from(self.saved.cents());

        if target <= 0 || saved <= 0 {
            return 0;
        }
        if saved >= target {
            return 100;
        }

        let rounded = (saved * 200 + target) / (2 * target);
        rounded.min(100) as u8
    }

    /// Amount still missing to reach the target (zero once reached)
    pub fn remaining(&self) -> Money {
        let remaining = self.target - self.saved;
        if remaining.is_negative() {
            Money::zero()
        } else {
            remaining
        }
    }

    pub fn is_complete(&self) -> bool {
        self.saved >= self.target
    }
}
