//! Dashboard Report
//!
//! Derived metrics over the ledger: total expenses, savings, and the
//! three-bar dataset handed to a chart renderer. Nothing here is stored;
//! every value is recomputed from the current income and expenses.

use std::io::Write;

use crate::error::{FinbotError, FinbotResult};
use crate::models::{Expense, Money};
use crate::storage::Storage;

/// Number of axis steps a chart should span
const AXIS_DIVISIONS: i64 = 5;

/// Income, total expenses and what is left over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerTotals {
    pub income: Money,
    pub total_expenses: Money,
    /// `income - total_expenses`; may be negative
    pub savings: Money,
}

impl LedgerTotals {
    /// Compute totals from income and the expense list
    ///
    /// Fails rather than wrapping when a total leaves the i64 range, which
    /// only hand-edited or very long ledgers can reach.
    pub fn compute(income: Money, expenses: &[Expense]) -> FinbotResult<Self> {
        let overflow = || {
            FinbotError::Validation(
                "Totals are too large to compute; check for oversized amounts".into(),
            )
        };

        let total_expenses =
            Money::checked_sum(expenses.iter().map(|e| e.amount)).ok_or_else(overflow)?;
        let savings = income.checked_sub(total_expenses).ok_or_else(overflow)?;

        Ok(Self {
            income,
            total_expenses,
            savings,
        })
    }

    /// Savings as a share of income, when income is positive
    pub fn savings_rate(&self) -> Option<f64> {
        if self.income.is_positive() {
            Some(self.savings.as_units_f64() / self.income.as_units_f64())
        } else {
            None
        }
    }
}

/// One labeled bar of the chart dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartPoint {
    pub label: &'static str,
    pub value: Money,
}

/// Chart-ready view of the ledger totals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartDataset {
    pub points: [ChartPoint; 3],
    /// Suggested axis step in whole currency units, at least 1
    pub step_size: i64,
}

impl ChartDataset {
    pub fn from_totals(totals: &LedgerTotals) -> Self {
        let points = [
            ChartPoint {
                label: "Income",
                value: totals.income,
            },
            ChartPoint {
                label: "Expenses",
                value: totals.total_expenses,
            },
            ChartPoint {
                label: "Savings",
                value: totals.savings,
            },
        ];

        let max = points
            .iter()
            .map(|p| p.value)
            .max()
            .unwrap_or_default();

        Self {
            points,
            step_size: step_size_for(max),
        }
    }

    /// Largest plotted value, never below zero
    pub fn max_value(&self) -> Money {
        self.points
            .iter()
            .map(|p| p.value)
            .max()
            .filter(|m| m.is_positive())
            .unwrap_or_default()
    }
}

/// `ceil(max / 5)` in whole units, at least 1
fn step_size_for(max: Money) -> i64 {
    if !max.is_positive() {
        return 1;
    }
    let cents = i128::from(max.cents());
    let divisor = i128::from(AXIS_DIVISIONS) * 100;
    let step = (cents + divisor - 1) / divisor;
    step.clamp(1, i128::from(i64::MAX)) as i64
}

/// Everything the dashboard screen shows
#[derive(Debug, Clone)]
pub struct DashboardReport {
    pub totals: LedgerTotals,
    pub chart: ChartDataset,
    pub expenses: Vec<Expense>,
}

impl DashboardReport {
    /// Build the report from the current storage contents
    pub fn generate(storage: &Storage) -> FinbotResult<Self> {
        let income = storage.income.get()?;
        let expenses = storage.expenses.get_all()?;
        Self::from_parts(income, expenses)
    }

    pub fn from_parts(income: Money, expenses: Vec<Expense>) -> FinbotResult<Self> {
        let totals = LedgerTotals::compute(income, &expenses)?;
        Ok(Self {
            chart: ChartDataset::from_totals(&totals),
            totals,
            expenses,
        })
    }

    /// Write the report to a terminal
    pub fn format_terminal<W: Write>(&self, writer: &mut W, symbol: &str) -> FinbotResult<()> {
        writeln!(writer, "Financial Dashboard")?;
        writeln!(writer, "{}", "=".repeat(40))?;
        writeln!(
            writer,
            "Income:          {:>20}",
            self.totals.income.format_with_symbol(symbol)
        )?;
        writeln!(
            writer,
            "Total Expenses:  {:>20}",
            self.totals.total_expenses.format_with_symbol(symbol)
        )?;
        writeln!(
            writer,
            "Savings:         {:>20}",
            self.totals.savings.format_with_symbol(symbol)
        )?;

        if let Some(rate) = self.totals.savings_rate() {
            writeln!(writer, "Savings Rate:    {:>19.1}%", rate * 100.0)?;
        }

        writeln!(writer)?;
        self.write_bars(writer, symbol)?;

        writeln!(writer)?;
        writeln!(writer, "Expenses")?;
        writeln!(writer, "{}", "-".repeat(40))?;
        if self.expenses.is_empty() {
            writeln!(writer, "No expenses recorded.")?;
        } else {
            for expense in &self.expenses {
                writeln!(
                    writer,
                    "{:<14} {:<20} {:>16}",
                    expense.id.to_string(),
                    expense.name,
                    expense.amount.format_with_symbol(symbol)
                )?;
            }
        }

        Ok(())
    }

    fn write_bars<W: Write>(&self, writer: &mut W, symbol: &str) -> FinbotResult<()> {
        const WIDTH: f64 = 24.0;
        let max = self.chart.max_value().as_units_f64();

        for point in &self.chart.points {
            let len = if max > 0.0 && point.value.is_positive() {
                ((point.value.as_units_f64() / max) * WIDTH).round() as usize
            } else {
                0
            };
            writeln!(
                writer,
                "{:<9} {:<24} {}",
                point.label,
                "#".repeat(len),
                point.value.format_with_symbol(symbol)
            )?;
        }
        writeln!(writer, "(axis step: {}{})", symbol, self.chart.step_size)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expenses(amounts: &[(&str, i64)]) -> Vec<Expense> {
        amounts
            .iter()
            .map(|(name, units)| Expense::new(*name, Money::from_units(*units)))
            .collect()
    }

    #[test]
    fn test_totals_scenario() {
        let list = expenses(&[("Rent", 10000), ("Food", 5000)]);
        let totals = LedgerTotals::compute(Money::from_units(30000), &list).unwrap();

        assert_eq!(totals.total_expenses, Money::from_units(15000));
        assert_eq!(totals.savings, Money::from_units(15000));
        assert_eq!(totals.savings_rate(), Some(0.5));
    }

    #[test]
    fn test_negative_savings_not_clamped() {
        let list = expenses(&[("Rent", 10000)]);
        let totals = LedgerTotals::compute(Money::from_units(4000), &list).unwrap();
        assert_eq!(totals.savings, Money::from_units(-6000));
    }

    #[test]
    fn test_empty_ledger() {
        let totals = LedgerTotals::compute(Money::zero(), &[]).unwrap();
        assert_eq!(totals.total_expenses, Money::zero());
        assert_eq!(totals.savings, Money::zero());
        assert_eq!(totals.savings_rate(), None);
    }

    #[test]
    fn test_totals_overflow_is_an_error() {
        let huge = Money::from_cents(i64::MAX / 2 + 1);
        let list = vec![Expense::new("A", huge), Expense::new("B", huge)];

        let err = LedgerTotals::compute(Money::zero(), &list).unwrap_err();
        assert!(err.is_validation());

        // the subtraction is checked too
        let list = vec![Expense::new("A", Money::from_cents(i64::MAX))];
        assert!(LedgerTotals::compute(Money::from_cents(-100), &list).is_err());
    }

    #[test]
    fn test_chart_dataset_labels_and_values() {
        let list = expenses(&[("Rent", 10000), ("Food", 5000)]);
        let totals = LedgerTotals::compute(Money::from_units(30000), &list).unwrap();
        let chart = ChartDataset::from_totals(&totals);

        let labels: Vec<_> = chart.points.iter().map(|p| p.label).collect();
        assert_eq!(labels, vec!["Income", "Expenses", "Savings"]);
        assert_eq!(chart.points[1].value, Money::from_units(15000));
        assert_eq!(chart.step_size, 6000);
    }

    #[test]
    fn test_step_size_rounds_up_and_has_floor() {
        assert_eq!(step_size_for(Money::from_units(11)), 3);
        assert_eq!(step_size_for(Money::from_cents(1)), 1);
        assert_eq!(step_size_for(Money::zero()), 1);
        assert_eq!(step_size_for(Money::from_units(-50)), 1);
    }

    #[test]
    fn test_report_from_storage() {
        let storage = Storage::in_memory();
        storage.income.set(Money::from_units(100)).unwrap();
        storage
            .expenses
            .push(Expense::new("Snacks", Money::from_units(40)))
            .unwrap();

        let report = DashboardReport::generate(&storage).unwrap();
        assert_eq!(report.totals.savings, Money::from_units(60));
        assert_eq!(report.expenses.len(), 1);
    }

    #[test]
    fn test_format_terminal() {
        let report = DashboardReport::from_parts(
            Money::from_units(30000),
            expenses(&[("Rent", 10000), ("Food", 5000)]),
        )
        .unwrap();

        let mut out = Vec::new();
        report.format_terminal(&mut out, "₹").unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("₹30,000.00"));
        assert!(text.contains("₹15,000.00"));
        assert!(text.contains("Rent"));
        assert!(text.contains("axis step: ₹6000"));
    }
}
