//! Planning engines
//!
//! [`PlanEngine`] is where a real planner would plug in. The only engine
//! shipped is [`CannedPlanEngine`], which ignores the request entirely.

use crate::models::Money;

use super::plan::{BudgetLine, PlanResult};

/// Turns a free-text request into a plan
pub trait PlanEngine {
    fn plan(&self, request: &str) -> PlanResult;
}

/// Returns the same placeholder plan for every request
#[derive(Debug, Clone, Copy, Default)]
pub struct CannedPlanEngine;

impl CannedPlanEngine {
    const BREAKDOWN: [(&'static str, i64); 4] = [
        ("Rent", 10_000),
        ("Grocery", 5_000),
        ("Savings", 7_000),
        ("Others", 3_000),
    ];

    const GOAL_TIMELINE: &'static str = "Save ₹50,000 in 6 months for your new iPhone";

    const TIPS: [&'static str; 3] = [
        "Try automating your savings monthly.",
        "Reduce dining out to save more.",
        "Consider a high-yield savings account.",
    ];
}

impl PlanEngine for CannedPlanEngine {
    fn plan(&self, _request: &str) -> PlanResult {
        PlanResult {
            budget_breakdown: Self::BREAKDOWN
                .iter()
                .map(|(category, units)| BudgetLine::new(*category, Money::from_units(*units)))
                .collect(),
            goal_timeline: Self::GOAL_TIMELINE.to_string(),
            tips: Self::TIPS.iter().map(|tip| tip.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canned_plan_shape() {
        let plan = CannedPlanEngine.plan("I earn 40000 and want a phone");

        assert_eq!(plan.budget_breakdown.len(), 4);
        assert_eq!(plan.tips.len(), 3);
        assert!(!plan.goal_timeline.is_empty());
        assert_eq!(plan.total_budgeted(), Money::from_units(25_000));
    }
}
