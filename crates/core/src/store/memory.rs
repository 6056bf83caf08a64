//! In-memory [`LedgerStore`] for tests and local tooling.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use ledgerwise_shared::types::{
    BudgetId, CategoryId, NotificationId, TransactionId, UserId,
};
use rust_decimal::Decimal;

use super::error::StoreError;
use super::types::{BudgetQuery, CategoryTotal, DailyTotal, MonthlyTotal, TransactionFilter};
use super::LedgerStore;
use crate::budget::{Budget, BudgetInterval, BudgetPeriod, NewBudget};
use crate::ledger::{
    Category, CategoryType, NewNotification, Notification, Transaction, TransactionStatus,
    TransactionType,
};

#[derive(Debug, Clone)]
struct StoredTransaction {
    transaction: Transaction,
    is_deleted: bool,
}

#[derive(Debug, Default)]
struct State {
    categories: Vec<Category>,
    transactions: Vec<StoredTransaction>,
    budgets: Vec<Budget>,
    notifications: Vec<Notification>,
    fail_notifications: bool,
    unavailable: bool,
}

/// Ledger store kept entirely in memory.
///
/// Behaves like the SQL implementation: user-scoped lookups, soft deletes,
/// and aggregates that skip deleted transactions.
#[derive(Debug, Default)]
pub struct MemoryLedgerStore {
    state: RwLock<State>,
}

impl MemoryLedgerStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, State>, StoreError> {
        let state = self
            .state
            .read()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".into()))?;
        if state.unavailable {
            return Err(StoreError::Unavailable("memory store offline".into()));
        }
        Ok(state)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, State>, StoreError> {
        let state = self
            .state
            .write()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".into()))?;
        if state.unavailable {
            return Err(StoreError::Unavailable("memory store offline".into()));
        }
        Ok(state)
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut State) -> T) -> T {
        let mut guard = match self.state.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut guard)
    }

    /// Adds an active category and returns it.
    pub fn add_category(
        &self,
        user_id: UserId,
        name: &str,
        category_type: CategoryType,
    ) -> Category {
        let category = Category {
            id: CategoryId::new(),
            user_id,
            name: name.to_string(),
            icon: None,
            color: None,
            category_type,
            budget_limit: None,
            sort_order: 0,
            is_active: true,
        };
        self.insert_category(category.clone());
        category
    }

    /// Stores a category as given.
    pub fn insert_category(&self, category: Category) {
        self.with_state(|s| s.categories.push(category));
    }

    /// Adds a completed transaction without any validation or alerting.
    pub fn add_transaction(
        &self,
        user_id: UserId,
        category_id: CategoryId,
        transaction_type: TransactionType,
        amount: Decimal,
        transaction_date: NaiveDate,
    ) -> Transaction {
        let transaction = Transaction {
            id: TransactionId::new(),
            user_id,
            category_id,
            transaction_type,
            amount,
            description: format!("{transaction_type} on {transaction_date}"),
            transaction_date,
            payment_method: "cash".to_string(),
            reference_number: None,
            notes: None,
            status: TransactionStatus::Completed,
            created_at: Utc::now(),
        };
        self.with_state(|s| {
            s.transactions.push(StoredTransaction {
                transaction: transaction.clone(),
                is_deleted: false,
            });
        });
        transaction
    }

    /// Soft-deletes a transaction.
    pub fn delete_transaction(&self, id: TransactionId) {
        self.with_state(|s| {
            for stored in &mut s.transactions {
                if stored.transaction.id == id {
                    stored.is_deleted = true;
                }
            }
        });
    }

    /// Overrides the creation timestamp of a budget.
    pub fn set_budget_created_at(&self, id: BudgetId, created_at: DateTime<Utc>) {
        self.with_state(|s| {
            for budget in &mut s.budgets {
                if budget.id == id {
                    budget.created_at = created_at;
                }
            }
        });
    }

    /// Makes every notification write fail.
    pub fn fail_notifications(&self, fail: bool) {
        self.with_state(|s| s.fail_notifications = fail);
    }

    /// Makes every store call fail as if the database were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.with_state(|s| s.unavailable = unavailable);
    }

    /// Notifications written for `user_id`, oldest first.
    pub fn notifications(&self, user_id: UserId) -> Vec<Notification> {
        self.with_state(|s| {
            s.notifications
                .iter()
                .filter(|n| n.user_id == user_id)
                .cloned()
                .collect()
        })
    }

    /// Every budget of `user_id`, including deactivated ones.
    pub fn budgets(&self, user_id: UserId) -> Vec<Budget> {
        self.with_state(|s| {
            s.budgets
                .iter()
                .filter(|b| b.user_id == user_id)
                .cloned()
                .collect()
        })
    }
}

impl State {
    fn live<'a>(
        &'a self,
        filter: &'a TransactionFilter,
    ) -> impl Iterator<Item = &'a Transaction> + 'a {
        self.transactions
            .iter()
            .filter(|s| !s.is_deleted && filter.matches(&s.transaction))
            .map(|s| &s.transaction)
    }

    fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    fn category_name(&self, id: CategoryId) -> String {
        self.category(id).map(|c| c.name.clone()).unwrap_or_default()
    }

    fn sibling_budgets(
        &self,
        user_id: UserId,
        category_id: CategoryId,
        period: BudgetPeriod,
    ) -> impl Iterator<Item = &Budget> {
        self.budgets.iter().filter(move |b| {
            b.is_active && b.user_id == user_id && b.category_id == category_id && b.period == period
        })
    }
}

impl LedgerStore for MemoryLedgerStore {
    async fn find_category(
        &self,
        user_id: UserId,
        id: CategoryId,
    ) -> Result<Option<Category>, StoreError> {
        let state = self.read()?;
        Ok(state
            .category(id)
            .filter(|c| c.user_id == user_id)
            .cloned())
    }

    async fn sum_amount(&self, filter: &TransactionFilter) -> Result<Decimal, StoreError> {
        let state = self.read()?;
        Ok(state.live(filter).map(|t| t.amount).sum())
    }

    async fn category_totals(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<CategoryTotal>, StoreError> {
        let state = self.read()?;
        let mut groups: BTreeMap<(CategoryId, TransactionType), CategoryTotal> = BTreeMap::new();

        for tx in state.live(filter) {
            let entry = groups
                .entry((tx.category_id, tx.transaction_type))
                .or_insert_with(|| {
                    let category = state.category(tx.category_id);
                    CategoryTotal {
                        category_id: tx.category_id,
                        category_name: category.map(|c| c.name.clone()).unwrap_or_default(),
                        category_icon: category.and_then(|c| c.icon.clone()),
                        category_color: category.and_then(|c| c.color.clone()),
                        transaction_type: tx.transaction_type,
                        total_amount: Decimal::ZERO,
                        transaction_count: 0,
                        min_amount: tx.amount,
                        max_amount: tx.amount,
                    }
                });
            entry.total_amount += tx.amount;
            entry.transaction_count += 1;
            entry.min_amount = entry.min_amount.min(tx.amount);
            entry.max_amount = entry.max_amount.max(tx.amount);
        }

        let mut rows: Vec<_> = groups.into_values().collect();
        rows.sort_by(|a, b| b.total_amount.cmp(&a.total_amount));
        Ok(rows)
    }

    async fn monthly_totals(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<MonthlyTotal>, StoreError> {
        let state = self.read()?;
        let mut groups: BTreeMap<(i32, u32, CategoryId, TransactionType), MonthlyTotal> =
            BTreeMap::new();

        for tx in state.live(filter) {
            let (year, month) = (tx.transaction_date.year(), tx.transaction_date.month());
            let entry = groups
                .entry((year, month, tx.category_id, tx.transaction_type))
                .or_insert_with(|| MonthlyTotal {
                    category_id: tx.category_id,
                    category_name: state.category_name(tx.category_id),
                    transaction_type: tx.transaction_type,
                    year,
                    month,
                    total_amount: Decimal::ZERO,
                    transaction_count: 0,
                });
            entry.total_amount += tx.amount;
            entry.transaction_count += 1;
        }

        Ok(groups.into_values().collect())
    }

    async fn daily_totals(&self, filter: &TransactionFilter) -> Result<Vec<DailyTotal>, StoreError> {
        let state = self.read()?;
        let mut groups: BTreeMap<(NaiveDate, TransactionType), DailyTotal> = BTreeMap::new();

        for tx in state.live(filter) {
            let entry = groups
                .entry((tx.transaction_date, tx.transaction_type))
                .or_insert_with(|| DailyTotal {
                    date: tx.transaction_date,
                    transaction_type: tx.transaction_type,
                    total_amount: Decimal::ZERO,
                    transaction_count: 0,
                });
            entry.total_amount += tx.amount;
            entry.transaction_count += 1;
        }

        Ok(groups.into_values().collect())
    }

    async fn find_budgets(
        &self,
        user_id: UserId,
        query: &BudgetQuery,
    ) -> Result<Vec<Budget>, StoreError> {
        let state = self.read()?;
        let mut budgets: Vec<Budget> = state
            .budgets
            .iter()
            .filter(|b| b.user_id == user_id)
            .filter(|b| !query.active_only || b.is_active)
            .filter(|b| query.category_id.is_none_or(|c| b.category_id == c))
            .filter(|b| query.period.is_none_or(|p| b.period == p))
            .cloned()
            .collect();
        budgets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(budgets)
    }

    async fn find_budget(
        &self,
        user_id: UserId,
        id: BudgetId,
    ) -> Result<Option<Budget>, StoreError> {
        let state = self.read()?;
        Ok(state
            .budgets
            .iter()
            .find(|b| b.id == id && b.user_id == user_id && b.is_active)
            .cloned())
    }

    async fn exists_overlapping_budget(
        &self,
        user_id: UserId,
        category_id: CategoryId,
        period: BudgetPeriod,
        interval: &BudgetInterval,
        exclude: Option<BudgetId>,
    ) -> Result<bool, StoreError> {
        let state = self.read()?;
        Ok(state
            .sibling_budgets(user_id, category_id, period)
            .filter(|b| exclude != Some(b.id))
            .any(|b| b.interval().overlaps(interval)))
    }

    async fn exists_budget_starting(
        &self,
        user_id: UserId,
        category_id: CategoryId,
        period: BudgetPeriod,
        start: NaiveDate,
    ) -> Result<bool, StoreError> {
        let state = self.read()?;
        Ok(state
            .sibling_budgets(user_id, category_id, period)
            .any(|b| b.start_date == start))
    }

    async fn insert_budget(&self, budget: NewBudget) -> Result<Budget, StoreError> {
        let mut state = self.write()?;
        let category = state
            .category(budget.category_id)
            .cloned()
            .ok_or_else(|| StoreError::RecordNotFound(format!("category {}", budget.category_id)))?;
        let now = Utc::now();
        let stored = Budget {
            id: BudgetId::new(),
            user_id: budget.user_id,
            category_id: budget.category_id,
            category_name: category.name,
            category_icon: category.icon,
            category_color: category.color,
            budget_amount: budget.budget_amount,
            period: budget.period,
            start_date: budget.interval.start_date(),
            end_date: budget.interval.end_date(),
            alert_threshold: budget.alert_threshold,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        state.budgets.push(stored.clone());
        Ok(stored)
    }

    async fn update_budget(&self, budget: &Budget) -> Result<Budget, StoreError> {
        let mut state = self.write()?;
        let stored = state
            .budgets
            .iter_mut()
            .find(|b| b.id == budget.id && b.user_id == budget.user_id && b.is_active)
            .ok_or_else(|| StoreError::RecordNotFound(format!("budget {}", budget.id)))?;
        stored.budget_amount = budget.budget_amount;
        stored.period = budget.period;
        stored.start_date = budget.start_date;
        stored.end_date = budget.end_date;
        stored.alert_threshold = budget.alert_threshold;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn deactivate_budget(&self, user_id: UserId, id: BudgetId) -> Result<bool, StoreError> {
        let mut state = self.write()?;
        let Some(budget) = state
            .budgets
            .iter_mut()
            .find(|b| b.id == id && b.user_id == user_id && b.is_active)
        else {
            return Ok(false);
        };
        budget.is_active = false;
        budget.updated_at = Utc::now();
        Ok(true)
    }

    async fn insert_transaction(&self, transaction: Transaction) -> Result<Transaction, StoreError> {
        let mut state = self.write()?;
        state.transactions.push(StoredTransaction {
            transaction: transaction.clone(),
            is_deleted: false,
        });
        Ok(transaction)
    }

    async fn insert_notification(
        &self,
        notification: NewNotification,
    ) -> Result<Notification, StoreError> {
        let mut state = self.write()?;
        if state.fail_notifications {
            return Err(StoreError::Query("notifications table rejected the write".into()));
        }
        let stored = Notification {
            id: NotificationId::new(),
            user_id: notification.user_id,
            kind: notification.kind,
            title: notification.title,
            message: notification.message,
            related_id: notification.related_id,
            related_type: notification.related_type,
            priority: notification.priority,
            is_read: false,
            created_at: Utc::now(),
        };
        state.notifications.push(stored.clone());
        Ok(stored)
    }
}
