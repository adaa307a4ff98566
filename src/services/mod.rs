//! Service layer for FinBot
//!
//! The service layer provides business logic on top of the storage layer:
//! parsing raw input, validation, and write-through persistence with an
//! audit trail.

pub mod goals;
pub mod ledger;

pub use goals::GoalService;
pub use ledger::LedgerService;

use crate::error::{FinbotError, FinbotResult};
use crate::models::Money;

/// Parse a user-entered amount, naming the field in the error
pub(crate) fn parse_money_field(field: &str, text: &str) -> FinbotResult<Money> {
    Money::parse(text)
        .map_err(|e| FinbotError::Validation(format!("Invalid {}: {}", field, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_money_field() {
        assert_eq!(
            parse_money_field("amount", "₹1,250.50").unwrap(),
            Money::from_cents(125050)
        );

        let err = parse_money_field("amount", "abc").unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("Invalid amount"));
    }
}
