//! Conversions between entity models and domain records.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use ledgerwise_core::budget::Budget;
use ledgerwise_core::ledger::{Category, Notification, Transaction};
use ledgerwise_core::store::StoreError;
use rust_decimal::Decimal;
use sea_orm::{DbErr, FromQueryResult};
use uuid::Uuid;

use crate::entities::{
    categories, notifications,
    sea_orm_active_enums::{BudgetPeriod, TransactionType},
    transactions,
};

/// Classifies a database error for the engine.
pub(crate) fn store_error(err: DbErr) -> StoreError {
    match &err {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => {
            tracing::warn!(error = %err, "database unreachable");
            StoreError::Unavailable(err.to_string())
        }
        DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => {
            StoreError::RecordNotFound(err.to_string())
        }
        DbErr::Type(_) | DbErr::TryIntoErr { .. } => StoreError::InvalidData(err.to_string()),
        _ => StoreError::Query(err.to_string()),
    }
}

fn utc(ts: DateTime<FixedOffset>) -> DateTime<Utc> {
    ts.with_timezone(&Utc)
}

/// Budget joined with its category's display fields.
#[derive(Debug, FromQueryResult)]
pub(crate) struct BudgetRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category_id: Uuid,
    pub budget_amount: Decimal,
    pub period: BudgetPeriod,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub alert_threshold: Decimal,
    pub is_active: bool,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
    pub category_name: String,
    pub category_icon: Option<String>,
    pub category_color: Option<String>,
}

impl From<BudgetRow> for Budget {
    fn from(row: BudgetRow) -> Self {
        Self {
            id: row.id.into(),
            user_id: row.user_id.into(),
            category_id: row.category_id.into(),
            category_name: row.category_name,
            category_icon: row.category_icon,
            category_color: row.category_color,
            budget_amount: row.budget_amount,
            period: row.period.into(),
            start_date: row.start_date,
            end_date: row.end_date,
            alert_threshold: row.alert_threshold,
            is_active: row.is_active,
            created_at: utc(row.created_at),
            updated_at: utc(row.updated_at),
        }
    }
}

/// One (category, type) aggregate.
#[derive(Debug, FromQueryResult)]
pub(crate) struct CategoryTotalRow {
    pub category_id: Uuid,
    pub category_name: String,
    pub category_icon: Option<String>,
    pub category_color: Option<String>,
    pub transaction_type: TransactionType,
    pub total_amount: Decimal,
    pub transaction_count: i64,
    pub min_amount: Decimal,
    pub max_amount: Decimal,
}

/// One (category, type, month) aggregate.
#[derive(Debug, FromQueryResult)]
pub(crate) struct MonthlyTotalRow {
    pub category_id: Uuid,
    pub category_name: String,
    pub transaction_type: TransactionType,
    pub year: i32,
    pub month: i32,
    pub total_amount: Decimal,
    pub transaction_count: i64,
}

/// One (date, type) aggregate.
#[derive(Debug, FromQueryResult)]
pub(crate) struct DailyTotalRow {
    pub date: NaiveDate,
    pub transaction_type: TransactionType,
    pub total_amount: Decimal,
    pub transaction_count: i64,
}

impl From<categories::Model> for Category {
    fn from(model: categories::Model) -> Self {
        Self {
            id: model.id.into(),
            user_id: model.user_id.into(),
            name: model.name,
            icon: model.icon,
            color: model.color,
            category_type: model.category_type.into(),
            budget_limit: model.budget_limit,
            sort_order: model.sort_order,
            is_active: model.is_active,
        }
    }
}

impl From<transactions::Model> for Transaction {
    fn from(model: transactions::Model) -> Self {
        Self {
            id: model.id.into(),
            user_id: model.user_id.into(),
            category_id: model.category_id.into(),
            transaction_type: model.transaction_type.into(),
            amount: model.amount,
            description: model.description,
            transaction_date: model.transaction_date,
            payment_method: model.payment_method,
            reference_number: model.reference_number,
            notes: model.notes,
            status: model.status.into(),
            created_at: utc(model.created_at),
        }
    }
}

impl From<notifications::Model> for Notification {
    fn from(model: notifications::Model) -> Self {
        Self {
            id: model.id.into(),
            user_id: model.user_id.into(),
            kind: model.notification_type.into(),
            title: model.title,
            message: model.message,
            related_id: model.related_id.map(Into::into),
            related_type: model.related_type,
            priority: model.priority.into(),
            is_read: model.is_read,
            created_at: utc(model.created_at),
        }
    }
}
