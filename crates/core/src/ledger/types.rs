//! Ledger record types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use ledgerwise_shared::types::{CategoryId, NotificationId, TransactionId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of money flow for a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// Money coming in.
    Income,
    /// Money going out.
    Expense,
}

impl TransactionType {
    /// Returns the stored string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(format!("unknown transaction type: {other}")),
        }
    }
}

/// Which transaction types a category accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryType {
    /// Income transactions only.
    Income,
    /// Expense transactions only.
    Expense,
    /// Either direction.
    Both,
}

impl CategoryType {
    /// Whether a transaction of type `tx_type` may be filed under this category.
    #[must_use]
    pub const fn supports(self, tx_type: TransactionType) -> bool {
        matches!(
            (self, tx_type),
            (Self::Both, _)
                | (Self::Income, TransactionType::Income)
                | (Self::Expense, TransactionType::Expense)
        )
    }
}

/// Lifecycle state of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    /// Not yet settled.
    Pending,
    /// Settled.
    #[default]
    Completed,
    /// Voided by the user.
    Cancelled,
}

/// A user-owned category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category ID.
    pub id: CategoryId,
    /// Owning user.
    pub user_id: UserId,
    /// Display name, unique per user.
    pub name: String,
    /// Icon identifier.
    pub icon: Option<String>,
    /// Display color.
    pub color: Option<String>,
    /// Accepted transaction types.
    pub category_type: CategoryType,
    /// Optional informational spending limit.
    pub budget_limit: Option<Decimal>,
    /// Display order.
    pub sort_order: i32,
    /// Whether the category is active.
    pub is_active: bool,
}

/// A recorded transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction ID.
    pub id: TransactionId,
    /// Owning user.
    pub user_id: UserId,
    /// Category the transaction is filed under.
    pub category_id: CategoryId,
    /// Income or expense.
    pub transaction_type: TransactionType,
    /// Positive amount, two decimal places.
    pub amount: Decimal,
    /// Free-text description.
    pub description: String,
    /// Date the transaction happened.
    pub transaction_date: NaiveDate,
    /// Payment method (`cash` by default).
    pub payment_method: String,
    /// External reference number.
    pub reference_number: Option<String>,
    /// Notes.
    pub notes: Option<String>,
    /// Lifecycle state.
    pub status: TransactionStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Input for recording a transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTransaction {
    /// Owning user.
    pub user_id: UserId,
    /// Category to file under.
    pub category_id: CategoryId,
    /// Income or expense.
    pub transaction_type: TransactionType,
    /// Amount; must be positive.
    pub amount: Decimal,
    /// Description.
    pub description: String,
    /// Date the transaction happened.
    pub transaction_date: NaiveDate,
    /// Payment method; `cash` when omitted.
    #[serde(default)]
    pub payment_method: Option<String>,
    /// External reference number.
    #[serde(default)]
    pub reference_number: Option<String>,
    /// Notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Lifecycle state; `completed` when omitted.
    #[serde(default)]
    pub status: Option<TransactionStatus>,
}

/// Default payment method.
pub const DEFAULT_PAYMENT_METHOD: &str = "cash";

/// Kind of a persisted notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Raised when spending crosses a budget threshold.
    BudgetAlert,
}

impl NotificationKind {
    /// Returns the stored string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BudgetAlert => "budget_alert",
        }
    }
}

/// Notification priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationPriority {
    /// Informational.
    Low,
    /// Needs attention.
    Medium,
    /// Urgent.
    High,
}

impl NotificationPriority {
    /// Returns the stored string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// A notification to persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNotification {
    /// Recipient.
    pub user_id: UserId,
    /// Notification kind.
    pub kind: NotificationKind,
    /// Short title.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Transaction that triggered the notification.
    pub related_id: Option<TransactionId>,
    /// Type of the related record (`transaction`).
    pub related_type: Option<String>,
    /// Priority.
    pub priority: NotificationPriority,
}

/// A persisted notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Notification ID.
    pub id: NotificationId,
    /// Recipient.
    pub user_id: UserId,
    /// Notification kind.
    pub kind: NotificationKind,
    /// Short title.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Related record ID.
    pub related_id: Option<TransactionId>,
    /// Related record type.
    pub related_type: Option<String>,
    /// Priority.
    pub priority: NotificationPriority,
    /// Whether the user has read it.
    pub is_read: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
