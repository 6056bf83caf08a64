//! Budget data types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use ledgerwise_shared::types::{BudgetId, CategoryId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::BudgetError;
use super::interval::BudgetInterval;
use super::usage::{BudgetStatus, BudgetUsage};

/// Period label of a budget.
///
/// The label never drives date arithmetic; the interval is always explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetPeriod {
    /// Weekly.
    Weekly,
    /// Monthly.
    Monthly,
    /// Quarterly.
    Quarterly,
    /// Yearly.
    Yearly,
}

impl BudgetPeriod {
    /// All labels in display order.
    pub const ALL: [Self; 4] = [Self::Weekly, Self::Monthly, Self::Quarterly, Self::Yearly];

    /// Returns the stored string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
        }
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BudgetPeriod {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or(BudgetError::InvalidPeriod)
    }
}

/// A stored budget, enriched with its category's display fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    /// Budget ID.
    pub id: BudgetId,
    /// Owning user.
    pub user_id: UserId,
    /// Category the budget caps.
    pub category_id: CategoryId,
    /// Category name.
    pub category_name: String,
    /// Category icon.
    pub category_icon: Option<String>,
    /// Category color.
    pub category_color: Option<String>,
    /// Cap, two decimal places.
    pub budget_amount: Decimal,
    /// Period label.
    pub period: BudgetPeriod,
    /// First day in effect.
    pub start_date: NaiveDate,
    /// Last day in effect.
    pub end_date: NaiveDate,
    /// Warning threshold as a percentage of the cap (0-100).
    pub alert_threshold: Decimal,
    /// Cleared on soft delete.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Budget {
    /// The closed interval `[start_date, end_date]`.
    #[must_use]
    pub const fn interval(&self) -> BudgetInterval {
        BudgetInterval::from_stored(self.start_date, self.end_date)
    }

    /// Spending level at which the budget enters `warning`.
    #[must_use]
    pub fn threshold_amount(&self) -> Decimal {
        super::usage::threshold_amount(self.budget_amount, self.alert_threshold)
    }
}

/// A budget ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBudget {
    /// Owning user.
    pub user_id: UserId,
    /// Category the budget caps.
    pub category_id: CategoryId,
    /// Cap, already rounded.
    pub budget_amount: Decimal,
    /// Period label.
    pub period: BudgetPeriod,
    /// Validated interval.
    pub interval: BudgetInterval,
    /// Clamped threshold.
    pub alert_threshold: Decimal,
}

/// Input for creating a budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBudgetInput {
    /// Category to cap.
    pub category_id: CategoryId,
    /// Cap; must be positive.
    pub budget_amount: Decimal,
    /// Period label (`weekly`, `monthly`, `quarterly`, `yearly`).
    pub period: String,
    /// First day in effect.
    pub start_date: NaiveDate,
    /// Last day in effect.
    pub end_date: NaiveDate,
    /// Threshold percentage; the configured default when omitted.
    #[serde(default)]
    pub alert_threshold: Option<Decimal>,
}

/// Partial update of a budget. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BudgetPatch {
    /// New cap.
    #[serde(default)]
    pub budget_amount: Option<Decimal>,
    /// New period label.
    #[serde(default)]
    pub period: Option<String>,
    /// New first day.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// New last day.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// New threshold percentage.
    #[serde(default)]
    pub alert_threshold: Option<Decimal>,
}

impl BudgetPatch {
    /// Whether no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.budget_amount.is_none()
            && self.period.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.alert_threshold.is_none()
    }

    /// Whether the patch can move the budget's interval or period label.
    #[must_use]
    pub const fn touches_interval(&self) -> bool {
        self.period.is_some() || self.start_date.is_some() || self.end_date.is_some()
    }
}

/// A budget joined with usage computed at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetWithUsage {
    /// The budget.
    #[serde(flatten)]
    pub budget: Budget,
    /// Usage derived from the current transaction set.
    #[serde(flatten)]
    pub usage: BudgetUsage,
}

/// One row of [`UsageStatistics::categories`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryUsage {
    /// Category name.
    pub name: String,
    /// Category icon.
    pub icon: Option<String>,
    /// Cap.
    pub budget_amount: Decimal,
    /// Spent so far.
    pub spent_amount: Decimal,
    /// Spent as a percentage of the cap.
    pub usage_percentage: Decimal,
    /// Classification.
    pub status: BudgetStatus,
}

/// Aggregate usage over a user's active budgets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageStatistics {
    /// Number of budgets.
    pub total_budgets: usize,
    /// Sum of caps.
    pub total_allocated: Decimal,
    /// Sum of spending.
    pub total_spent: Decimal,
    /// `total_allocated - total_spent`.
    pub total_remaining: Decimal,
    /// `total_spent / total_allocated * 100`, zero when nothing is allocated.
    pub overall_usage: Decimal,
    /// Budgets on track.
    pub on_track: usize,
    /// Budgets in warning.
    pub warning: usize,
    /// Budgets over their cap.
    pub over_budget: usize,
    /// Per-budget rows.
    pub categories: Vec<CategoryUsage>,
}
