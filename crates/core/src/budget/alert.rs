//! Budget alerting: pre-commit preview, alert listing and post-commit notifications.

use std::sync::Arc;

use chrono::NaiveDate;
use futures::future::try_join_all;
use ledgerwise_shared::AppError;
use ledgerwise_shared::types::{BudgetId, CategoryId, UserId, format_amount, percentage_of};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::Budget;
use super::usage::{BudgetStatus, measure};
use crate::ledger::{
    NewNotification, Notification, NotificationKind, NotificationPriority, Transaction,
    TransactionType,
};
use crate::store::{BudgetQuery, LedgerStore, StoreError};

/// Alerting errors.
#[derive(Debug, Error)]
pub enum AlertError {
    /// Store failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<AlertError> for AppError {
    fn from(err: AlertError) -> Self {
        match err {
            AlertError::Store(inner) => inner.into(),
        }
    }
}

/// Projected effect of a transaction on the budget in effect for its date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetImpact {
    /// Budget in effect.
    pub budget_id: BudgetId,
    /// Category name.
    pub category_name: String,
    /// Cap.
    pub budget_amount: Decimal,
    /// Spending before the transaction.
    pub current_spending: Decimal,
    /// Spending including the transaction.
    pub new_total: Decimal,
    /// `new_total / budget_amount * 100`.
    pub percentage_used: Decimal,
    /// `new_total > budget_amount`.
    pub exceeded: bool,
    /// Above the threshold without exceeding the cap.
    pub near_limit: bool,
    /// `budget_amount - new_total`.
    pub remaining: Decimal,
}

impl BudgetImpact {
    fn project(budget: &Budget, current_spending: Decimal, amount: Decimal) -> Self {
        let new_total = current_spending.saturating_add(amount);
        let exceeded = new_total > budget.budget_amount;
        Self {
            budget_id: budget.id,
            category_name: budget.category_name.clone(),
            budget_amount: budget.budget_amount,
            current_spending,
            new_total,
            percentage_used: percentage_of(new_total, budget.budget_amount),
            exceeded,
            near_limit: !exceeded && new_total > budget.threshold_amount(),
            remaining: budget.budget_amount.saturating_sub(new_total),
        }
    }
}

/// Kind of alert raised for a budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    /// Spending above the threshold.
    BudgetWarning,
    /// Spending above the cap.
    OverBudget,
}

/// Figures attached to an alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertDetails {
    /// Cap.
    pub budget_amount: Decimal,
    /// Spent so far.
    pub spent_amount: Decimal,
    /// Left before the cap (warnings only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining: Option<Decimal>,
    /// Usage percentage (warnings only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<Decimal>,
    /// Amount over the cap (over-budget only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overage: Option<Decimal>,
}

/// An alert for a budget in `warning` or `over_budget`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetAlert {
    /// Alert kind.
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    /// `medium` for warnings, `high` when over budget.
    pub severity: NotificationPriority,
    /// Category name.
    pub category: String,
    /// Display message.
    pub message: String,
    /// Figures.
    pub details: AlertDetails,
}

/// Budget alert evaluator.
pub struct AlertService<S: LedgerStore> {
    store: Arc<S>,
    currency_symbol: String,
}

impl<S: LedgerStore> AlertService<S> {
    /// Create a new alert service.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            currency_symbol: String::new(),
        }
    }

    /// Sets the currency symbol used in notification messages.
    #[must_use]
    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    /// Projects the effect of an expense on the budget in effect for `date`.
    ///
    /// Returns `None` when no active budget covers the date. Never blocks the
    /// transaction; the figures can be stale by the time it is written.
    pub async fn preview_transaction_impact(
        &self,
        user_id: UserId,
        category_id: CategoryId,
        amount: Decimal,
        date: NaiveDate,
    ) -> Result<Option<BudgetImpact>, AlertError> {
        let Some(budget) = self.budget_in_effect(user_id, category_id, date).await? else {
            return Ok(None);
        };
        let usage = measure(self.store.as_ref(), &budget).await?;
        Ok(Some(BudgetImpact::project(
            &budget,
            usage.current_spending,
            amount,
        )))
    }

    /// Lists an alert for every active budget in `warning` or `over_budget`.
    pub async fn get_alerts(&self, user_id: UserId) -> Result<Vec<BudgetAlert>, AlertError> {
        let mut budgets = self
            .store
            .find_budgets(user_id, &BudgetQuery::default())
            .await?;
        budgets.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let store = self.store.as_ref();
        let usages = try_join_all(budgets.iter().map(|b| measure(store, b))).await?;

        Ok(budgets
            .iter()
            .zip(usages)
            .filter_map(|(budget, usage)| match usage.status {
                BudgetStatus::OnTrack => None,
                BudgetStatus::Warning => Some(BudgetAlert {
                    alert_type: AlertType::BudgetWarning,
                    severity: NotificationPriority::Medium,
                    category: budget.category_name.clone(),
                    message: format!("Approaching budget limit for {}", budget.category_name),
                    details: AlertDetails {
                        budget_amount: budget.budget_amount,
                        spent_amount: usage.current_spending,
                        remaining: Some(usage.remaining_amount),
                        percentage: Some(usage.usage_percentage),
                        overage: None,
                    },
                }),
                BudgetStatus::OverBudget => Some(BudgetAlert {
                    alert_type: AlertType::OverBudget,
                    severity: NotificationPriority::High,
                    category: budget.category_name.clone(),
                    message: format!("Budget exceeded for {}", budget.category_name),
                    details: AlertDetails {
                        budget_amount: budget.budget_amount,
                        spent_amount: usage.current_spending,
                        remaining: None,
                        percentage: None,
                        overage: Some(usage.current_spending - budget.budget_amount),
                    },
                }),
            })
            .collect())
    }

    /// Re-checks the budget in effect after `transaction` has been written and
    /// records a `budget_alert` notification when it is exceeded or near its limit.
    ///
    /// Returns the notification written, if any. Income is ignored.
    pub async fn alert_after_commit(
        &self,
        transaction: &Transaction,
    ) -> Result<Option<Notification>, AlertError> {
        if transaction.transaction_type != TransactionType::Expense {
            return Ok(None);
        }

        let Some(budget) = self
            .budget_in_effect(
                transaction.user_id,
                transaction.category_id,
                transaction.transaction_date,
            )
            .await?
        else {
            return Ok(None);
        };

        // Spending already includes the committed transaction.
        let usage = measure(self.store.as_ref(), &budget).await?;
        let impact = BudgetImpact::project(&budget, usage.current_spending, Decimal::ZERO);
        if !impact.exceeded && !impact.near_limit {
            return Ok(None);
        }

        let notification = self.notification_for(transaction, &impact);
        let stored = self.store.insert_notification(notification).await?;

        tracing::info!(
            budget_id = %budget.id,
            transaction_id = %transaction.id,
            exceeded = impact.exceeded,
            "budget alert recorded"
        );
        Ok(Some(stored))
    }

    fn notification_for(&self, transaction: &Transaction, impact: &BudgetImpact) -> NewNotification {
        let (title, message, priority) = if impact.exceeded {
            (
                "Budget Exceeded",
                format!(
                    "Budget exceeded! You have spent {} out of {}",
                    format_amount(&self.currency_symbol, impact.new_total),
                    format_amount(&self.currency_symbol, impact.budget_amount),
                ),
                NotificationPriority::High,
            )
        } else {
            (
                "Budget Warning",
                "Budget warning! You are approaching your budget limit.".to_string(),
                NotificationPriority::Medium,
            )
        };

        NewNotification {
            user_id: transaction.user_id,
            kind: NotificationKind::BudgetAlert,
            title: title.to_string(),
            message,
            related_id: Some(transaction.id),
            related_type: Some("transaction".to_string()),
            priority,
        }
    }

    /// Newest active budget for the category whose interval contains `date`.
    async fn budget_in_effect(
        &self,
        user_id: UserId,
        category_id: CategoryId,
        date: NaiveDate,
    ) -> Result<Option<Budget>, StoreError> {
        let query = BudgetQuery {
            category_id: Some(category_id),
            ..BudgetQuery::default()
        };
        let budgets = self.store.find_budgets(user_id, &query).await?;
        Ok(budgets
            .into_iter()
            .filter(|b| b.interval().contains(date))
            .max_by_key(|b| b.created_at))
    }
}
