//! Plan display formatting

use crate::planner::PlanResult;

/// Format a finished plan for the terminal
pub fn format_plan(plan: &PlanResult, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str("Budget Breakdown\n");
    for line in &plan.budget_breakdown {
        output.push_str(&format!(
            "  {:<12} {:>14}\n",
            line.category,
            line.amount.format_with_symbol(symbol)
        ));
    }

    output.push_str("\nGoal Timeline\n");
    output.push_str(&format!("  {}\n", plan.goal_timeline));

    output.push_str("\nTips\n");
    for tip in &plan.tips {
        output.push_str(&format!("  - {}\n", tip));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::{CannedPlanEngine, PlanEngine};

    #[test]
    fn test_format_plan() {
        let plan = CannedPlanEngine.plan("anything");
        let formatted = format_plan(&plan, "₹");

        assert!(formatted.contains("Grocery"));
        assert!(formatted.contains("₹10,000.00"));
        assert_eq!(formatted.matches("  - ").count(), 3);
    }
}
