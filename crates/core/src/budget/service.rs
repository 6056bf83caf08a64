//! Budget lifecycle: validation, persistence and usage enrichment.

use std::sync::Arc;

use futures::future::try_join_all;
use ledgerwise_shared::types::{BudgetId, MAX_AMOUNT, UserId, percentage_of, round_money};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::error::BudgetError;
use super::interval::BudgetInterval;
use super::types::{
    Budget, BudgetPatch, BudgetPeriod, BudgetWithUsage, CategoryUsage, CreateBudgetInput,
    NewBudget, UsageStatistics,
};
use super::usage::{BudgetStatus, measure};
use crate::store::{BudgetQuery, LedgerStore};

/// Threshold applied when a request omits one.
pub const DEFAULT_ALERT_THRESHOLD: Decimal = dec!(80);

/// Success message for [`BudgetService::create`].
pub const BUDGET_CREATED: &str = "Budget created successfully";
/// Success message for [`BudgetService::update`].
pub const BUDGET_UPDATED: &str = "Budget updated successfully";
/// Success message for [`BudgetService::delete`].
pub const BUDGET_DELETED: &str = "Budget deleted successfully";

/// Budget service for business logic.
pub struct BudgetService<S: LedgerStore> {
    store: Arc<S>,
    default_threshold: Decimal,
}

impl<S: LedgerStore> BudgetService<S> {
    /// Create a new budget service.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            default_threshold: DEFAULT_ALERT_THRESHOLD,
        }
    }

    /// Overrides the threshold used when a request omits one.
    #[must_use]
    pub fn with_default_threshold(mut self, threshold: Decimal) -> Self {
        self.default_threshold = clamp_threshold(threshold);
        self
    }

    /// Creates a budget.
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if the amount is not positive after rounding
    /// - `InvalidPeriod` if the label is not in the fixed set
    /// - `InvalidDateRange` unless `start_date < end_date`
    /// - `Overlap` if an active sibling budget intersects the interval
    /// - `InvalidCategory` if the category is foreign, unknown or inactive
    pub async fn create(
        &self,
        user_id: UserId,
        input: CreateBudgetInput,
    ) -> Result<BudgetWithUsage, BudgetError> {
        let budget_amount = validate_amount(input.budget_amount)?;
        let period: BudgetPeriod = input.period.parse()?;
        let interval = BudgetInterval::new(input.start_date, input.end_date)?;

        if self
            .store
            .exists_overlapping_budget(user_id, input.category_id, period, &interval, None)
            .await?
        {
            return Err(BudgetError::Overlap);
        }

        let category = self
            .store
            .find_category(user_id, input.category_id)
            .await?
            .filter(|c| c.is_active)
            .ok_or(BudgetError::InvalidCategory)?;

        let alert_threshold = input
            .alert_threshold
            .map_or(self.default_threshold, clamp_threshold);

        let budget = self
            .store
            .insert_budget(NewBudget {
                user_id,
                category_id: category.id,
                budget_amount,
                period,
                interval,
                alert_threshold,
            })
            .await?;

        tracing::info!(
            budget_id = %budget.id,
            category = %budget.category_name,
            amount = %budget.budget_amount,
            period = %budget.period,
            "budget created"
        );

        self.enrich(budget).await
    }

    /// Applies a partial update.
    ///
    /// Any change to a date or the period label re-runs overlap detection
    /// against the user's other active budgets for the category.
    ///
    /// # Errors
    ///
    /// `NotFound` for unknown or foreign budgets, `EmptyPatch` when no field is
    /// set, plus the validation and overlap errors of [`Self::create`].
    pub async fn update(
        &self,
        user_id: UserId,
        id: BudgetId,
        patch: BudgetPatch,
    ) -> Result<BudgetWithUsage, BudgetError> {
        let mut budget = self
            .store
            .find_budget(user_id, id)
            .await?
            .ok_or(BudgetError::NotFound)?;

        if patch.is_empty() {
            return Err(BudgetError::EmptyPatch);
        }

        if let Some(amount) = patch.budget_amount {
            budget.budget_amount = validate_amount(amount)?;
        }
        if let Some(period) = patch.period.as_deref() {
            budget.period = period.parse()?;
        }
        if let Some(threshold) = patch.alert_threshold {
            budget.alert_threshold = clamp_threshold(threshold);
        }

        let interval = BudgetInterval::new(
            patch.start_date.unwrap_or(budget.start_date),
            patch.end_date.unwrap_or(budget.end_date),
        )?;
        budget.start_date = interval.start_date();
        budget.end_date = interval.end_date();

        if patch.touches_interval()
            && self
                .store
                .exists_overlapping_budget(
                    user_id,
                    budget.category_id,
                    budget.period,
                    &interval,
                    Some(budget.id),
                )
                .await?
        {
            return Err(BudgetError::Overlap);
        }

        let budget = self.store.update_budget(&budget).await?;
        tracing::info!(budget_id = %budget.id, "budget updated");

        self.enrich(budget).await
    }

    /// Soft-deletes a budget.
    ///
    /// # Errors
    ///
    /// `NotFound` for unknown, foreign or already deleted budgets.
    pub async fn delete(&self, user_id: UserId, id: BudgetId) -> Result<(), BudgetError> {
        if !self.store.deactivate_budget(user_id, id).await? {
            return Err(BudgetError::NotFound);
        }
        tracing::info!(budget_id = %id, "budget deactivated");
        Ok(())
    }

    /// Fetches one active budget with usage.
    ///
    /// # Errors
    ///
    /// `NotFound` for unknown, foreign or deleted budgets.
    pub async fn get(&self, user_id: UserId, id: BudgetId) -> Result<BudgetWithUsage, BudgetError> {
        let budget = self
            .store
            .find_budget(user_id, id)
            .await?
            .ok_or(BudgetError::NotFound)?;
        self.enrich(budget).await
    }

    /// Lists a user's budgets with usage, newest first.
    pub async fn get_for_user(
        &self,
        user_id: UserId,
        period: Option<BudgetPeriod>,
        active_only: bool,
    ) -> Result<Vec<BudgetWithUsage>, BudgetError> {
        let query = BudgetQuery {
            category_id: None,
            period,
            active_only,
        };
        let mut budgets = self.store.find_budgets(user_id, &query).await?;
        budgets.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        try_join_all(budgets.into_iter().map(|budget| self.enrich(budget))).await
    }

    /// Aggregates usage over the user's active budgets.
    pub async fn usage_statistics(
        &self,
        user_id: UserId,
        period: Option<BudgetPeriod>,
    ) -> Result<UsageStatistics, BudgetError> {
        let budgets = self.get_for_user(user_id, period, true).await?;
        Ok(summarize_usage(&budgets))
    }

    async fn enrich(&self, budget: Budget) -> Result<BudgetWithUsage, BudgetError> {
        let usage = measure(self.store.as_ref(), &budget).await?;
        Ok(BudgetWithUsage { budget, usage })
    }
}

/// Rounds an amount to two places and requires it to be positive and storable.
pub(crate) fn validate_amount(amount: Decimal) -> Result<Decimal, BudgetError> {
    let rounded = round_money(amount);
    if rounded <= Decimal::ZERO {
        return Err(BudgetError::InvalidAmount);
    }
    if rounded > MAX_AMOUNT {
        return Err(BudgetError::AmountTooLarge);
    }
    Ok(rounded)
}

/// Clamps a threshold percentage into `[0, 100]`.
#[must_use]
pub fn clamp_threshold(threshold: Decimal) -> Decimal {
    round_money(threshold.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED))
}

/// Folds per-budget usage into totals and status counts.
#[must_use]
pub fn summarize_usage(budgets: &[BudgetWithUsage]) -> UsageStatistics {
    let mut stats = UsageStatistics {
        total_budgets: budgets.len(),
        total_allocated: Decimal::ZERO,
        total_spent: Decimal::ZERO,
        total_remaining: Decimal::ZERO,
        overall_usage: Decimal::ZERO,
        on_track: 0,
        warning: 0,
        over_budget: 0,
        categories: Vec::with_capacity(budgets.len()),
    };

    for entry in budgets {
        stats.total_allocated += entry.budget.budget_amount;
        stats.total_spent += entry.usage.current_spending;
        match entry.usage.status {
            BudgetStatus::OnTrack => stats.on_track += 1,
            BudgetStatus::Warning => stats.warning += 1,
            BudgetStatus::OverBudget => stats.over_budget += 1,
        }
        stats.categories.push(CategoryUsage {
            name: entry.budget.category_name.clone(),
            icon: entry.budget.category_icon.clone(),
            budget_amount: entry.budget.budget_amount,
            spent_amount: entry.usage.current_spending,
            usage_percentage: entry.usage.usage_percentage,
            status: entry.usage.status,
        });
    }

    stats.total_remaining = stats.total_allocated - stats.total_spent;
    stats.overall_usage = percentage_of(stats.total_spent, stats.total_allocated);
    stats
}
