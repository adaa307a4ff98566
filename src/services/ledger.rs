//! Ledger service
//!
//! Business logic for the income scalar and the expense list. Every
//! successful mutation is written through to storage and then recorded in
//! the audit log. Rejected input, or a store that refuses the write, returns
//! an error and changes nothing. An audit append that fails after the write
//! is kept on [`Storage`] as a warning and does not fail the mutation.

use crate::audit::{AuditEntry, Snapshot};
use crate::error::{FinbotError, FinbotResult};
use crate::models::{Expense, ExpenseForm, ExpenseId, Money};
use crate::reports::LedgerTotals;
use crate::storage::Storage;

use super::parse_money_field;

/// Service for income and expense management
pub struct LedgerService<'a> {
    storage: &'a Storage,
}

impl<'a> LedgerService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Current income
    pub fn income(&self) -> FinbotResult<Money> {
        self.storage.income.get()
    }

    /// Parse and replace the income
    pub fn set_income(&self, text: &str) -> FinbotResult<Money> {
        let income = parse_money_field("income", text)?;

        let before = self.storage.income.set(income)?;
        self.storage.record(AuditEntry::updated(
            Snapshot::Income(before),
            Snapshot::Income(income),
        ));

        Ok(income)
    }

    /// Add an expense from raw input
    pub fn add_expense(&self, name: &str, amount_text: &str) -> FinbotResult<Expense> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FinbotError::Validation(
                "Expense name cannot be empty".into(),
            ));
        }
        let amount = parse_money_field("amount", amount_text)?;

        let expense = Expense::new(name, amount);
        expense
            .validate()
            .map_err(|e| FinbotError::Validation(e.to_string()))?;

        self.storage.expenses.push(expense.clone())?;
        self.storage
            .record(AuditEntry::created(Snapshot::Expense(expense.clone())));

        Ok(expense)
    }

    /// Submit the expense form, clearing it on success
    pub fn submit_expense_form(&self, form: &mut ExpenseForm) -> FinbotResult<Expense> {
        let expense = self.add_expense(&form.name, &form.amount)?;
        form.clear();
        Ok(expense)
    }

    /// Delete an expense; an unknown id is a no-op returning `None`
    pub fn delete_expense(&self, id: ExpenseId) -> FinbotResult<Option<Expense>> {
        let Some(removed) = self.storage.expenses.remove(id)? else {
            return Ok(None);
        };
        self.storage
            .record(AuditEntry::deleted(Snapshot::Expense(removed.clone())));

        Ok(Some(removed))
    }

    /// Take an expense out of the ledger and load it into `form`
    ///
    /// The expense only comes back if the form is submitted again; an
    /// abandoned edit loses it. Use [`update_expense`](Self::update_expense)
    /// for a non-destructive edit.
    pub fn begin_edit_expense(
        &self,
        id: ExpenseId,
        form: &mut ExpenseForm,
    ) -> FinbotResult<Option<Expense>> {
        let removed = self.delete_expense(id)?;
        if let Some(expense) = &removed {
            form.prefill(expense);
        }
        Ok(removed)
    }

    /// Edit an expense in place, keeping its id and position
    pub fn update_expense(
        &self,
        id: ExpenseId,
        name: Option<&str>,
        amount_text: Option<&str>,
    ) -> FinbotResult<Expense> {
        let before = self
            .storage
            .expenses
            .get(id)?
            .ok_or_else(|| FinbotError::expense_not_found(id.to_string()))?;

        let mut updated = before.clone();
        if let Some(name) = name {
            updated.name = name.trim().to_string();
        }
        if let Some(text) = amount_text {
            updated.amount = parse_money_field("amount", text)?;
        }
        updated
            .validate()
            .map_err(|e| FinbotError::Validation(e.to_string()))?;

        self.storage.expenses.replace(updated.clone())?;
        self.storage.record(AuditEntry::updated(
            Snapshot::Expense(before),
            Snapshot::Expense(updated.clone()),
        ));

        Ok(updated)
    }

    /// All expenses in insertion order
    pub fn list_expenses(&self) -> FinbotResult<Vec<Expense>> {
        self.storage.expenses.get_all()
    }

    /// Find an expense by full id, unique name, or id prefix
    pub fn resolve_expense(&self, identifier: &str) -> FinbotResult<Option<Expense>> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Ok(None);
        }

        if let Ok(id) = identifier.parse::<ExpenseId>() {
            return self.storage.expenses.get(id);
        }

        let expenses = self.storage.expenses.get_all()?;
        let prefix = identifier
            .strip_prefix("exp-")
            .unwrap_or(identifier)
            .to_lowercase();

        let by_name: Vec<_> = expenses
            .iter()
            .filter(|e| e.name.eq_ignore_ascii_case(identifier))
            .collect();
        let candidates = if !by_name.is_empty() {
            by_name
        } else if prefix.is_empty() {
            // a bare "exp-" names nothing
            Vec::new()
        } else {
            expenses
                .iter()
                .filter(|e| e.id.as_uuid().to_string().starts_with(&prefix))
                .collect()
        };

        match candidates.as_slice() {
            [] => Ok(None),
            [only] => Ok(Some((*only).clone())),
            _ => Err(FinbotError::Validation(format!(
                "'{}' matches more than one expense; use its id",
                identifier
            ))),
        }
    }

    /// Income, total expenses and savings
    pub fn compute_totals(&self) -> FinbotResult<LedgerTotals> {
        let income = self.storage.income.get()?;
        let expenses = self.storage.expenses.get_all()?;
        LedgerTotals::compute(income, &expenses)
    }
}
