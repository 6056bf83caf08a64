//! Budget inference service.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Datelike, Months, NaiveDate};
use ledgerwise_shared::types::{CategoryId, UserId, round_money};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::error::InferenceError;
use super::types::{InferenceOutcome, InferenceSkip, SpendingPattern};
use crate::budget::{BudgetPeriod, BudgetService, CreateBudgetInput, DEFAULT_ALERT_THRESHOLD};
use crate::ledger::TransactionType;
use crate::reports::window::{calendar_month, today};
use crate::store::{LedgerStore, MonthlyTotal, TransactionFilter};

/// Multiplier applied to the average to leave room for normal variation.
pub const INFERENCE_BUFFER: Decimal = dec!(1.2);

/// Shortest accepted lookback.
pub const MIN_LOOKBACK_MONTHS: u32 = 1;

/// Longest accepted lookback.
pub const MAX_LOOKBACK_MONTHS: u32 = 12;

/// Derives monthly budgets from trailing spending history.
pub struct BudgetInference<S: LedgerStore> {
    store: Arc<S>,
    budgets: BudgetService<S>,
}

impl<S: LedgerStore> BudgetInference<S> {
    /// Create a new inference service.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        let budgets = BudgetService::new(Arc::clone(&store));
        Self { store, budgets }
    }

    /// Computes spending patterns without creating anything.
    pub async fn patterns(
        &self,
        user_id: UserId,
        months_lookback: u32,
    ) -> Result<Vec<SpendingPattern>, InferenceError> {
        self.patterns_as_of(user_id, months_lookback, today())
            .await
    }

    /// [`Self::patterns`] evaluated as if today were `today`.
    pub async fn patterns_as_of(
        &self,
        user_id: UserId,
        months_lookback: u32,
        today: NaiveDate,
    ) -> Result<Vec<SpendingPattern>, InferenceError> {
        if !(MIN_LOOKBACK_MONTHS..=MAX_LOOKBACK_MONTHS).contains(&months_lookback) {
            return Err(InferenceError::InvalidLookback(months_lookback));
        }
        let since = today
            .checked_sub_months(Months::new(months_lookback))
            .ok_or(InferenceError::InvalidWindow(today))?;

        let filter = TransactionFilter::for_user(user_id)
            .of_type(TransactionType::Expense)
            .since(since);
        let rows = self.store.monthly_totals(&filter).await?;

        Ok(spending_patterns(&rows))
    }

    /// Creates a monthly budget for the current month for every category with
    /// positive average spending that does not already have one.
    ///
    /// A failure for one category is logged and the batch continues.
    pub async fn infer(
        &self,
        user_id: UserId,
        months_lookback: u32,
    ) -> Result<InferenceOutcome, InferenceError> {
        self.infer_as_of(user_id, months_lookback, today())
            .await
    }

    /// [`Self::infer`] evaluated as if today were `today`.
    pub async fn infer_as_of(
        &self,
        user_id: UserId,
        months_lookback: u32,
        today: NaiveDate,
    ) -> Result<InferenceOutcome, InferenceError> {
        let patterns = self.patterns_as_of(user_id, months_lookback, today).await?;
        let (start_date, end_date) = calendar_month(today.year(), today.month())
            .ok_or(InferenceError::InvalidWindow(today))?;

        let mut outcome = InferenceOutcome {
            created_count: 0,
            created: Vec::new(),
            skipped: Vec::new(),
            failed: Vec::new(),
            patterns: Vec::with_capacity(patterns.len()),
        };

        for pattern in patterns {
            let skip = |reason: String| InferenceSkip {
                category_id: pattern.category_id,
                category_name: pattern.category_name.clone(),
                reason,
            };

            match self
                .store
                .exists_budget_starting(
                    user_id,
                    pattern.category_id,
                    BudgetPeriod::Monthly,
                    start_date,
                )
                .await
            {
                Ok(true) => {
                    outcome
                        .skipped
                        .push(skip("monthly budget already exists".to_string()));
                }
                Ok(false) => {
                    let input = CreateBudgetInput {
                        category_id: pattern.category_id,
                        budget_amount: pattern.suggested_amount,
                        period: BudgetPeriod::Monthly.as_str().to_string(),
                        start_date,
                        end_date,
                        alert_threshold: Some(DEFAULT_ALERT_THRESHOLD),
                    };
                    match self.budgets.create(user_id, input).await {
                        Ok(created) => {
                            outcome.created_count += 1;
                            outcome.created.push(created.budget);
                        }
                        Err(err) => {
                            tracing::warn!(
                                category_id = %pattern.category_id,
                                error = %err,
                                "inferred budget not created"
                            );
                            outcome.failed.push(skip(err.to_string()));
                        }
                    }
                }
                Err(err) => {
                    tracing::warn!(
                        category_id = %pattern.category_id,
                        error = %err,
                        "existing budget check failed"
                    );
                    outcome.failed.push(skip(err.to_string()));
                }
            }

            outcome.patterns.push(pattern);
        }

        tracing::info!(
            user_id = %user_id,
            created = outcome.created_count,
            skipped = outcome.skipped.len(),
            failed = outcome.failed.len(),
            "budget inference finished"
        );
        Ok(outcome)
    }
}

/// Folds (category, month) expense totals into per-category patterns.
///
/// Categories whose average is not positive are dropped; the rest are ordered
/// by average, highest first.
#[must_use]
pub fn spending_patterns(rows: &[MonthlyTotal]) -> Vec<SpendingPattern> {
    let mut by_category: BTreeMap<CategoryId, (String, BTreeMap<(i32, u32), Decimal>)> =
        BTreeMap::new();

    for row in rows
        .iter()
        .filter(|r| r.transaction_type == TransactionType::Expense)
    {
        let (_, months) = by_category
            .entry(row.category_id)
            .or_insert_with(|| (row.category_name.clone(), BTreeMap::new()));
        *months.entry((row.year, row.month)).or_default() += row.total_amount;
    }

    let mut patterns: Vec<SpendingPattern> = by_category
        .into_iter()
        .filter_map(|(category_id, (category_name, months))| {
            let count = months.len();
            let total: Decimal = months.values().copied().sum();
            let max = months.values().copied().max().unwrap_or_default();
            let avg = total / Decimal::from(count.max(1));
            (avg > Decimal::ZERO).then(|| SpendingPattern {
                category_id,
                category_name,
                avg_monthly_spending: round_money(avg),
                max_monthly_spending: max,
                months_with_spending: count,
                suggested_amount: suggested_amount(avg),
            })
        })
        .collect();

    patterns.sort_by(|a, b| b.avg_monthly_spending.cmp(&a.avg_monthly_spending));
    patterns
}

/// `ceil(avg * 1.2)`.
#[must_use]
pub fn suggested_amount(avg_monthly_spending: Decimal) -> Decimal {
    avg_monthly_spending.saturating_mul(INFERENCE_BUFFER).ceil()
}
