//! Inference data types.

use ledgerwise_shared::types::CategoryId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::budget::Budget;

/// Expense history of one category over the lookback window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpendingPattern {
    /// Category ID.
    pub category_id: CategoryId,
    /// Category name.
    pub category_name: String,
    /// Mean of the monthly sums over months that have spending.
    pub avg_monthly_spending: Decimal,
    /// Largest monthly sum (informational).
    pub max_monthly_spending: Decimal,
    /// Number of calendar months with spending.
    pub months_with_spending: usize,
    /// Cap that would be proposed: `ceil(avg * 1.2)`.
    pub suggested_amount: Decimal,
}

/// A category that did not get a budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferenceSkip {
    /// Category ID.
    pub category_id: CategoryId,
    /// Category name.
    pub category_name: String,
    /// Why no budget was created.
    pub reason: String,
}

/// Result of an inference run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferenceOutcome {
    /// Number of budgets created.
    pub created_count: usize,
    /// The budgets created.
    pub created: Vec<Budget>,
    /// Categories that already had a budget this month.
    pub skipped: Vec<InferenceSkip>,
    /// Categories whose budget could not be created.
    pub failed: Vec<InferenceSkip>,
    /// Every pattern considered, highest average first.
    pub patterns: Vec<SpendingPattern>,
}

impl InferenceOutcome {
    /// Display message summarising the run.
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "Created {} automatic budgets based on spending patterns",
            self.created_count
        )
    }
}
