//! The query interface the engine needs from the relational store.
//!
//! [`LedgerStore`] is implemented by the db crate against PostgreSQL and by
//! [`memory::MemoryLedgerStore`] for tests. Every method is scoped by user;
//! soft-deleted transactions never appear in any aggregate.

pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod memory;
pub mod types;

use std::future::Future;

use chrono::NaiveDate;
use ledgerwise_shared::types::{BudgetId, CategoryId, UserId};
use rust_decimal::Decimal;

use crate::budget::{Budget, BudgetInterval, BudgetPeriod, NewBudget};
use crate::ledger::{Category, NewNotification, Notification, Transaction};

pub use error::StoreError;
#[cfg(any(test, feature = "test-utils"))]
pub use memory::MemoryLedgerStore;
pub use types::{BudgetQuery, CategoryTotal, DailyTotal, MonthlyTotal, TransactionFilter};

/// Repository trait for ledger persistence.
///
/// This trait is implemented by the db crate to provide actual database operations.
pub trait LedgerStore: Send + Sync {
    /// Finds a category owned by `user_id`, active or not.
    fn find_category(
        &self,
        user_id: UserId,
        id: CategoryId,
    ) -> impl Future<Output = Result<Option<Category>, StoreError>> + Send;

    /// Sums the amounts of matching transactions (zero when none match).
    fn sum_amount(
        &self,
        filter: &TransactionFilter,
    ) -> impl Future<Output = Result<Decimal, StoreError>> + Send;

    /// Groups matching transactions by (category, type).
    fn category_totals(
        &self,
        filter: &TransactionFilter,
    ) -> impl Future<Output = Result<Vec<CategoryTotal>, StoreError>> + Send;

    /// Groups matching transactions by (category, type, calendar month).
    fn monthly_totals(
        &self,
        filter: &TransactionFilter,
    ) -> impl Future<Output = Result<Vec<MonthlyTotal>, StoreError>> + Send;

    /// Groups matching transactions by (date, type).
    fn daily_totals(
        &self,
        filter: &TransactionFilter,
    ) -> impl Future<Output = Result<Vec<DailyTotal>, StoreError>> + Send;

    /// Lists a user's budgets enriched with category display fields.
    fn find_budgets(
        &self,
        user_id: UserId,
        query: &BudgetQuery,
    ) -> impl Future<Output = Result<Vec<Budget>, StoreError>> + Send;

    /// Finds one active budget owned by `user_id`.
    fn find_budget(
        &self,
        user_id: UserId,
        id: BudgetId,
    ) -> impl Future<Output = Result<Option<Budget>, StoreError>> + Send;

    /// Whether an active budget with the same (user, category, period) has an
    /// interval intersecting `interval`, ignoring `exclude`.
    fn exists_overlapping_budget(
        &self,
        user_id: UserId,
        category_id: CategoryId,
        period: BudgetPeriod,
        interval: &BudgetInterval,
        exclude: Option<BudgetId>,
    ) -> impl Future<Output = Result<bool, StoreError>> + Send;

    /// Whether an active budget with the same (user, category, period) starts on `start`.
    fn exists_budget_starting(
        &self,
        user_id: UserId,
        category_id: CategoryId,
        period: BudgetPeriod,
        start: NaiveDate,
    ) -> impl Future<Output = Result<bool, StoreError>> + Send;

    /// Persists a new budget and returns it enriched.
    fn insert_budget(
        &self,
        budget: NewBudget,
    ) -> impl Future<Output = Result<Budget, StoreError>> + Send;

    /// Writes the mutable fields of `budget` and returns the stored row.
    fn update_budget(
        &self,
        budget: &Budget,
    ) -> impl Future<Output = Result<Budget, StoreError>> + Send;

    /// Clears the active flag. Returns `false` if no active budget matched.
    fn deactivate_budget(
        &self,
        user_id: UserId,
        id: BudgetId,
    ) -> impl Future<Output = Result<bool, StoreError>> + Send;

    /// Persists a transaction.
    fn insert_transaction(
        &self,
        transaction: Transaction,
    ) -> impl Future<Output = Result<Transaction, StoreError>> + Send;

    /// Persists a notification.
    fn insert_notification(
        &self,
        notification: NewNotification,
    ) -> impl Future<Output = Result<Notification, StoreError>> + Send;
}
