//! Budget usage, derived on every read and never stored.

use ledgerwise_shared::types::percentage_of;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::Budget;
use crate::ledger::TransactionType;
use crate::store::{LedgerStore, StoreError, TransactionFilter};

/// Budget health classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    /// Spending at or below the threshold.
    OnTrack,
    /// Spending above the threshold but not above the cap.
    Warning,
    /// Spending above the cap.
    OverBudget,
}

impl BudgetStatus {
    /// Classifies spending against a cap and a threshold percentage.
    ///
    /// `over_budget` if `current > amount`, else `warning` if
    /// `current > amount * threshold / 100`, else `on_track`.
    #[must_use]
    pub fn classify(current: Decimal, amount: Decimal, threshold: Decimal) -> Self {
        if current > amount {
            Self::OverBudget
        } else if current > threshold_amount(amount, threshold) {
            Self::Warning
        } else {
            Self::OnTrack
        }
    }

    /// Returns the string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OnTrack => "on_track",
            Self::Warning => "warning",
            Self::OverBudget => "over_budget",
        }
    }
}

/// `amount * threshold / 100`, saturating at `Decimal::MAX`.
#[must_use]
pub fn threshold_amount(amount: Decimal, threshold: Decimal) -> Decimal {
    amount
        .checked_mul(threshold)
        .map(|scaled| scaled / Decimal::ONE_HUNDRED)
        .or_else(|| (amount / Decimal::ONE_HUNDRED).checked_mul(threshold))
        .unwrap_or(Decimal::MAX)
}

/// Usage of a budget at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetUsage {
    /// Expense total inside the interval.
    pub current_spending: Decimal,
    /// `budget_amount - current_spending` (negative when over).
    pub remaining_amount: Decimal,
    /// `current_spending / budget_amount * 100`, two places.
    pub usage_percentage: Decimal,
    /// Classification.
    pub status: BudgetStatus,
}

impl BudgetUsage {
    /// Derives usage from a spending total.
    #[must_use]
    pub fn compute(budget_amount: Decimal, alert_threshold: Decimal, current: Decimal) -> Self {
        Self {
            current_spending: current,
            remaining_amount: budget_amount.saturating_sub(current),
            usage_percentage: percentage_of(current, budget_amount),
            status: BudgetStatus::classify(current, budget_amount, alert_threshold),
        }
    }

    /// Derives usage of `budget` for a spending total.
    #[must_use]
    pub fn for_budget(budget: &Budget, current: Decimal) -> Self {
        Self::compute(budget.budget_amount, budget.alert_threshold, current)
    }
}

/// Filter selecting the expenses a budget counts.
pub(crate) fn spending_filter(budget: &Budget) -> TransactionFilter {
    TransactionFilter::for_user(budget.user_id)
        .category(budget.category_id)
        .of_type(TransactionType::Expense)
        .between(budget.start_date, budget.end_date)
}

/// Sums the expenses counted against `budget` and derives its usage.
pub(crate) async fn measure<S: LedgerStore>(
    store: &S,
    budget: &Budget,
) -> Result<BudgetUsage, StoreError> {
    let current = store.sum_amount(&spending_filter(budget)).await?;
    Ok(BudgetUsage::for_budget(budget, current))
}
