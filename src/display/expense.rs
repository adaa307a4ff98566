//! Expense display formatting
//!
//! Formats the expense ledger for terminal output.

use crate::models::{Expense, Money};

/// Format the expense list as a table with a total row
pub fn format_expense_list(expenses: &[Expense], symbol: &str) -> String {
    if expenses.is_empty() {
        return "No expenses recorded.\n".to_string();
    }

    let name_width = expenses
        .iter()
        .map(|e| e.name.chars().count())
        .max()
        .unwrap_or(4)
        .clamp(4, 32);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<name_width$}  {:>14}\n",
        "ID",
        "Name",
        "Amount",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<12}  {:-<name_width$}  {:->14}\n",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for expense in expenses {
        output.push_str(&format!(
            "{:<12}  {:<name_width$}  {:>14}\n",
            expense.id.to_string(),
            truncate(&expense.name, name_width),
            expense.amount.format_with_symbol(symbol),
            name_width = name_width,
        ));
    }

    let total = Money::checked_sum(expenses.iter().map(|e| e.amount))
        .map(|total| total.format_with_symbol(symbol))
        .unwrap_or_else(|| "overflow".to_string());
    output.push_str(&format!(
        "{:<12}  {:<name_width$}  {:>14}\n",
        "",
        "Total",
        total,
        name_width = name_width,
    ));

    output
}

/// Format a single expense
pub fn format_expense_details(expense: &Expense, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense: {}\n", expense.name));
    output.push_str(&format!("  ID:      {}\n", expense.id));
    output.push_str(&format!(
        "  Amount:  {}\n",
        expense.amount.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Added:   {}\n",
        expense.created_at.format("%Y-%m-%d %H:%M")
    ));

    output
}

/// Shorten a string to at most `max_len` characters
pub(crate) fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_expense_list() {
        let expenses = vec![
            Expense::new("Rent", Money::from_units(10000)),
            Expense::new("Food", Money::from_units(5000)),
        ];

        let formatted = format_expense_list(&expenses, "₹");
        assert!(formatted.contains("Rent"));
        assert!(formatted.contains("₹10,000.00"));
        assert!(formatted.contains("₹15,000.00"));
        assert!(formatted.contains(&expenses[0].id.to_string()));
    }

    #[test]
    fn test_format_empty_list() {
        assert!(format_expense_list(&[], "$").contains("No expenses recorded"));
    }

    #[test]
    fn test_format_expense_details() {
        let expense = Expense::new("Coffee", Money::from_cents(-250));
        let formatted = format_expense_details(&expense, "$");
        assert!(formatted.contains("Coffee"));
        assert!(formatted.contains("-$2.50"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Short", 10), "Short");
        let result = truncate("A very long string", 10);
        assert_eq!(result.chars().count(), 10);
        assert!(result.ends_with("..."));
        assert_eq!(truncate("₹₹₹₹₹₹", 5), "₹₹...");
    }
}
