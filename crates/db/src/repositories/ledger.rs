//! PostgreSQL ledger store.

use chrono::{NaiveDate, Utc};
use ledgerwise_core::budget::{Budget, BudgetInterval, BudgetPeriod, NewBudget};
use ledgerwise_core::ledger::{Category, NewNotification, Notification, Transaction};
use ledgerwise_core::store::{
    BudgetQuery, CategoryTotal, DailyTotal, LedgerStore, MonthlyTotal, StoreError,
    TransactionFilter,
};
use ledgerwise_shared::types::{BudgetId, CategoryId, NotificationId, UserId};
use rust_decimal::Decimal;
use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Unchanged, ColumnTrait, DatabaseConnection, EntityTrait,
    JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, Set,
};

use super::mapping::{BudgetRow, CategoryTotalRow, DailyTotalRow, MonthlyTotalRow, store_error};
use crate::entities::{
    budgets, categories, notifications,
    sea_orm_active_enums::{
        BudgetPeriod as DbBudgetPeriod, NotificationPriority, NotificationType, TransactionStatus,
        TransactionType,
    },
    transactions,
};

const YEAR_EXPR: &str = "CAST(EXTRACT(YEAR FROM transactions.transaction_date) AS INTEGER)";
const MONTH_EXPR: &str = "CAST(EXTRACT(MONTH FROM transactions.transaction_date) AS INTEGER)";

fn amount() -> Expr {
    Expr::col((transactions::Entity, transactions::Column::Amount))
}

fn transaction_count() -> SimpleExpr {
    Expr::col((transactions::Entity, transactions::Column::Id)).count()
}

/// Non-deleted transactions matching `filter`.
fn filtered(filter: &TransactionFilter) -> Select<transactions::Entity> {
    let mut query = transactions::Entity::find()
        .filter(transactions::Column::UserId.eq(filter.user_id.into_inner()))
        .filter(transactions::Column::IsDeleted.eq(false));

    if let Some(category_id) = filter.category_id {
        query = query.filter(transactions::Column::CategoryId.eq(category_id.into_inner()));
    }
    if let Some(transaction_type) = filter.transaction_type {
        query = query
            .filter(transactions::Column::TransactionType.eq(TransactionType::from(transaction_type)));
    }
    if let Some(from) = filter.from {
        query = query.filter(transactions::Column::TransactionDate.gte(from));
    }
    if let Some(to) = filter.to {
        query = query.filter(transactions::Column::TransactionDate.lte(to));
    }
    query
}

/// Budgets joined with their category's display fields.
fn budgets_with_category() -> Select<budgets::Entity> {
    budgets::Entity::find()
        .join(JoinType::InnerJoin, budgets::Relation::Categories.def())
        .column_as(categories::Column::Name, "category_name")
        .column_as(categories::Column::Icon, "category_icon")
        .column_as(categories::Column::Color, "category_color")
}

/// Active budgets sharing the (user, category, period) key.
fn active_siblings(
    user_id: UserId,
    category_id: CategoryId,
    period: BudgetPeriod,
) -> Select<budgets::Entity> {
    budgets::Entity::find()
        .filter(budgets::Column::UserId.eq(user_id.into_inner()))
        .filter(budgets::Column::CategoryId.eq(category_id.into_inner()))
        .filter(budgets::Column::Period.eq(DbBudgetPeriod::from(period)))
        .filter(budgets::Column::IsActive.eq(true))
}

fn count(value: i64) -> u64 {
    value.unsigned_abs()
}

/// [`LedgerStore`] backed by PostgreSQL through `SeaORM`.
#[derive(Debug, Clone)]
pub struct SeaLedgerStore {
    db: DatabaseConnection,
}

impl SeaLedgerStore {
    /// Creates a new ledger store.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// The underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    async fn budget_by_id(&self, id: uuid::Uuid) -> Result<Budget, StoreError> {
        budgets_with_category()
            .filter(budgets::Column::Id.eq(id))
            .into_model::<BudgetRow>()
            .one(&self.db)
            .await
            .map_err(store_error)?
            .map(Budget::from)
            .ok_or_else(|| StoreError::RecordNotFound(format!("budget {id}")))
    }
}

impl LedgerStore for SeaLedgerStore {
    async fn find_category(
        &self,
        user_id: UserId,
        id: CategoryId,
    ) -> Result<Option<Category>, StoreError> {
        let model = categories::Entity::find_by_id(id.into_inner())
            .filter(categories::Column::UserId.eq(user_id.into_inner()))
            .one(&self.db)
            .await
            .map_err(store_error)?;
        Ok(model.map(Category::from))
    }

    async fn sum_amount(&self, filter: &TransactionFilter) -> Result<Decimal, StoreError> {
        let total: Option<Option<Decimal>> = filtered(filter)
            .select_only()
            .column_as(amount().sum(), "total")
            .into_tuple()
            .one(&self.db)
            .await
            .map_err(store_error)?;
        Ok(total.flatten().unwrap_or_default())
    }

    async fn category_totals(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<CategoryTotal>, StoreError> {
        let rows = filtered(filter)
            .select_only()
            .join(JoinType::InnerJoin, transactions::Relation::Categories.def())
            .column(transactions::Column::CategoryId)
            .column_as(categories::Column::Name, "category_name")
            .column_as(categories::Column::Icon, "category_icon")
            .column_as(categories::Column::Color, "category_color")
            .column(transactions::Column::TransactionType)
            .column_as(amount().sum(), "total_amount")
            .column_as(transaction_count(), "transaction_count")
            .column_as(amount().min(), "min_amount")
            .column_as(amount().max(), "max_amount")
            .group_by(transactions::Column::CategoryId)
            .group_by(categories::Column::Name)
            .group_by(categories::Column::Icon)
            .group_by(categories::Column::Color)
            .group_by(transactions::Column::TransactionType)
            .order_by_desc(Expr::cust("total_amount"))
            .into_model::<CategoryTotalRow>()
            .all(&self.db)
            .await
            .map_err(store_error)?;

        Ok(rows
            .into_iter()
            .map(|row| CategoryTotal {
                category_id: row.category_id.into(),
                category_name: row.category_name,
                category_icon: row.category_icon,
                category_color: row.category_color,
                transaction_type: row.transaction_type.into(),
                total_amount: row.total_amount,
                transaction_count: count(row.transaction_count),
                min_amount: row.min_amount,
                max_amount: row.max_amount,
            })
            .collect())
    }

    async fn monthly_totals(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<MonthlyTotal>, StoreError> {
        let rows = filtered(filter)
            .select_only()
            .join(JoinType::InnerJoin, transactions::Relation::Categories.def())
            .column(transactions::Column::CategoryId)
            .column_as(categories::Column::Name, "category_name")
            .column(transactions::Column::TransactionType)
            .column_as(Expr::cust(YEAR_EXPR), "year")
            .column_as(Expr::cust(MONTH_EXPR), "month")
            .column_as(amount().sum(), "total_amount")
            .column_as(transaction_count(), "transaction_count")
            .group_by(transactions::Column::CategoryId)
            .group_by(categories::Column::Name)
            .group_by(transactions::Column::TransactionType)
            .group_by(Expr::cust(YEAR_EXPR))
            .group_by(Expr::cust(MONTH_EXPR))
            .order_by_asc(Expr::cust("year"))
            .order_by_asc(Expr::cust("month"))
            .into_model::<MonthlyTotalRow>()
            .all(&self.db)
            .await
            .map_err(store_error)?;

        rows.into_iter()
            .map(|row| {
                let month = u32::try_from(row.month)
                    .map_err(|_| StoreError::InvalidData(format!("month {}", row.month)))?;
                Ok(MonthlyTotal {
                    category_id: row.category_id.into(),
                    category_name: row.category_name,
                    transaction_type: row.transaction_type.into(),
                    year: row.year,
                    month,
                    total_amount: row.total_amount,
                    transaction_count: count(row.transaction_count),
                })
            })
            .collect()
    }

    async fn daily_totals(&self, filter: &TransactionFilter) -> Result<Vec<DailyTotal>, StoreError> {
        let rows = filtered(filter)
            .select_only()
            .column_as(transactions::Column::TransactionDate, "date")
            .column(transactions::Column::TransactionType)
            .column_as(amount().sum(), "total_amount")
            .column_as(transaction_count(), "transaction_count")
            .group_by(transactions::Column::TransactionDate)
            .group_by(transactions::Column::TransactionType)
            .order_by_asc(transactions::Column::TransactionDate)
            .into_model::<DailyTotalRow>()
            .all(&self.db)
            .await
            .map_err(store_error)?;

        Ok(rows
            .into_iter()
            .map(|row| DailyTotal {
                date: row.date,
                transaction_type: row.transaction_type.into(),
                total_amount: row.total_amount,
                transaction_count: count(row.transaction_count),
            })
            .collect())
    }

    async fn find_budgets(
        &self,
        user_id: UserId,
        query: &BudgetQuery,
    ) -> Result<Vec<Budget>, StoreError> {
        let mut select =
            budgets_with_category().filter(budgets::Column::UserId.eq(user_id.into_inner()));
        if let Some(category_id) = query.category_id {
            select = select.filter(budgets::Column::CategoryId.eq(category_id.into_inner()));
        }
        if let Some(period) = query.period {
            select = select.filter(budgets::Column::Period.eq(DbBudgetPeriod::from(period)));
        }
        if query.active_only {
            select = select.filter(budgets::Column::IsActive.eq(true));
        }

        let rows = select
            .order_by_desc(budgets::Column::CreatedAt)
            .into_model::<BudgetRow>()
            .all(&self.db)
            .await
            .map_err(store_error)?;
        Ok(rows.into_iter().map(Budget::from).collect())
    }

    async fn find_budget(
        &self,
        user_id: UserId,
        id: BudgetId,
    ) -> Result<Option<Budget>, StoreError> {
        let row = budgets_with_category()
            .filter(budgets::Column::Id.eq(id.into_inner()))
            .filter(budgets::Column::UserId.eq(user_id.into_inner()))
            .filter(budgets::Column::IsActive.eq(true))
            .into_model::<BudgetRow>()
            .one(&self.db)
            .await
            .map_err(store_error)?;
        Ok(row.map(Budget::from))
    }

    async fn exists_overlapping_budget(
        &self,
        user_id: UserId,
        category_id: CategoryId,
        period: BudgetPeriod,
        interval: &BudgetInterval,
        exclude: Option<BudgetId>,
    ) -> Result<bool, StoreError> {
        // Closed intervals intersect iff each starts before the other ends.
        let mut query = active_siblings(user_id, category_id, period)
            .filter(budgets::Column::StartDate.lte(interval.end_date()))
            .filter(budgets::Column::EndDate.gte(interval.start_date()));
        if let Some(exclude) = exclude {
            query = query.filter(budgets::Column::Id.ne(exclude.into_inner()));
        }
        let matches = query.count(&self.db).await.map_err(store_error)?;
        Ok(matches > 0)
    }

    async fn exists_budget_starting(
        &self,
        user_id: UserId,
        category_id: CategoryId,
        period: BudgetPeriod,
        start: NaiveDate,
    ) -> Result<bool, StoreError> {
        let matches = active_siblings(user_id, category_id, period)
            .filter(budgets::Column::StartDate.eq(start))
            .count(&self.db)
            .await
            .map_err(store_error)?;
        Ok(matches > 0)
    }

    async fn insert_budget(&self, budget: NewBudget) -> Result<Budget, StoreError> {
        let now = Utc::now();
        let model = budgets::ActiveModel {
            id: Set(BudgetId::new().into_inner()),
            user_id: Set(budget.user_id.into_inner()),
            category_id: Set(budget.category_id.into_inner()),
            budget_amount: Set(budget.budget_amount),
            period: Set(budget.period.into()),
            start_date: Set(budget.interval.start_date()),
            end_date: Set(budget.interval.end_date()),
            alert_threshold: Set(budget.alert_threshold),
            is_active: Set(true),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&self.db)
        .await
        .map_err(store_error)?;

        self.budget_by_id(model.id).await
    }

    async fn update_budget(&self, budget: &Budget) -> Result<Budget, StoreError> {
        let active = budgets::ActiveModel {
            id: Unchanged(budget.id.into_inner()),
            budget_amount: Set(budget.budget_amount),
            period: Set(budget.period.into()),
            start_date: Set(budget.start_date),
            end_date: Set(budget.end_date),
            alert_threshold: Set(budget.alert_threshold),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        };
        let model = budgets::Entity::update(active)
            .filter(budgets::Column::UserId.eq(budget.user_id.into_inner()))
            .exec(&self.db)
            .await
            .map_err(store_error)?;

        self.budget_by_id(model.id).await
    }

    async fn deactivate_budget(&self, user_id: UserId, id: BudgetId) -> Result<bool, StoreError> {
        let result = budgets::Entity::update_many()
            .col_expr(budgets::Column::IsActive, Expr::value(false))
            .col_expr(budgets::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(budgets::Column::Id.eq(id.into_inner()))
            .filter(budgets::Column::UserId.eq(user_id.into_inner()))
            .filter(budgets::Column::IsActive.eq(true))
            .exec(&self.db)
            .await
            .map_err(store_error)?;
        Ok(result.rows_affected > 0)
    }

    async fn insert_transaction(&self, transaction: Transaction) -> Result<Transaction, StoreError> {
        let model = transactions::ActiveModel {
            id: Set(transaction.id.into_inner()),
            user_id: Set(transaction.user_id.into_inner()),
            category_id: Set(transaction.category_id.into_inner()),
            transaction_type: Set(transaction.transaction_type.into()),
            amount: Set(transaction.amount),
            description: Set(transaction.description),
            transaction_date: Set(transaction.transaction_date),
            payment_method: Set(transaction.payment_method),
            reference_number: Set(transaction.reference_number),
            notes: Set(transaction.notes),
            status: Set(TransactionStatus::from(transaction.status)),
            is_deleted: Set(false),
            created_at: Set(transaction.created_at.into()),
            updated_at: Set(transaction.created_at.into()),
        }
        .insert(&self.db)
        .await
        .map_err(store_error)?;

        Ok(model.into())
    }

    async fn insert_notification(
        &self,
        notification: NewNotification,
    ) -> Result<Notification, StoreError> {
        let model = notifications::ActiveModel {
            id: Set(NotificationId::new().into_inner()),
            user_id: Set(notification.user_id.into_inner()),
            notification_type: Set(NotificationType::from(notification.kind)),
            title: Set(notification.title),
            message: Set(notification.message),
            related_id: Set(notification.related_id.map(|id| id.into_inner())),
            related_type: Set(notification.related_type),
            priority: Set(NotificationPriority::from(notification.priority)),
            is_read: Set(false),
            created_at: Set(Utc::now().into()),
        }
        .insert(&self.db)
        .await
        .map_err(store_error)?;

        Ok(model.into())
    }
}
