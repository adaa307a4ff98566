//! Core data models for FinBot
//!
//! This module contains the data structures of the finance domain: money,
//! expenses, savings goals, input forms and the session context.

pub mod expense;
pub mod form;
pub mod goal;
pub mod ids;
pub mod money;
pub mod session;

pub use expense::{Expense, ExpenseValidationError};
pub use form::{ExpenseForm, GoalForm};
pub use goal::{Goal, GoalValidationError};
pub use ids::{ExpenseId, GoalId};
pub use money::{Money, MoneyParseError};
pub use session::Session;
