//! Query filters and aggregate rows exchanged with the ledger store.

use chrono::NaiveDate;
use ledgerwise_shared::types::{CategoryId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::budget::BudgetPeriod;
use crate::ledger::{Transaction, TransactionType};

/// Filter over a user's non-deleted transactions.
///
/// Date bounds are inclusive; `None` leaves that side open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionFilter {
    /// Owning user (always required).
    pub user_id: UserId,
    /// Restrict to one category.
    pub category_id: Option<CategoryId>,
    /// Restrict to one direction.
    pub transaction_type: Option<TransactionType>,
    /// Earliest transaction date.
    pub from: Option<NaiveDate>,
    /// Latest transaction date.
    pub to: Option<NaiveDate>,
}

impl TransactionFilter {
    /// Every transaction of `user_id`.
    #[must_use]
    pub const fn for_user(user_id: UserId) -> Self {
        Self {
            user_id,
            category_id: None,
            transaction_type: None,
            from: None,
            to: None,
        }
    }

    /// Restricts to a category.
    #[must_use]
    pub const fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Restricts to a transaction type.
    #[must_use]
    pub const fn of_type(mut self, transaction_type: TransactionType) -> Self {
        self.transaction_type = Some(transaction_type);
        self
    }

    /// Restricts to dates on or after `from`.
    #[must_use]
    pub const fn since(mut self, from: NaiveDate) -> Self {
        self.from = Some(from);
        self
    }

    /// Restricts to dates in `[from, to]`.
    #[must_use]
    pub const fn between(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    /// Whether a transaction passes this filter (deletion is the store's concern).
    #[must_use]
    pub fn matches(&self, tx: &Transaction) -> bool {
        tx.user_id == self.user_id
            && self.category_id.is_none_or(|c| tx.category_id == c)
            && self
                .transaction_type
                .is_none_or(|t| tx.transaction_type == t)
            && self.from.is_none_or(|d| tx.transaction_date >= d)
            && self.to.is_none_or(|d| tx.transaction_date <= d)
    }
}

/// Which budgets to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetQuery {
    /// Restrict to one category.
    pub category_id: Option<CategoryId>,
    /// Restrict to one period label.
    pub period: Option<BudgetPeriod>,
    /// Only active budgets.
    pub active_only: bool,
}

impl Default for BudgetQuery {
    fn default() -> Self {
        Self {
            category_id: None,
            period: None,
            active_only: true,
        }
    }
}

/// Totals for one (category, type) group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// Category ID.
    pub category_id: CategoryId,
    /// Category display name.
    pub category_name: String,
    /// Category icon.
    pub category_icon: Option<String>,
    /// Category color.
    pub category_color: Option<String>,
    /// Direction.
    pub transaction_type: TransactionType,
    /// Sum of amounts.
    pub total_amount: Decimal,
    /// Number of transactions.
    pub transaction_count: u64,
    /// Smallest single amount.
    pub min_amount: Decimal,
    /// Largest single amount.
    pub max_amount: Decimal,
}

/// Totals for one (category, type, calendar month) group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    /// Category ID.
    pub category_id: CategoryId,
    /// Category display name.
    pub category_name: String,
    /// Direction.
    pub transaction_type: TransactionType,
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: u32,
    /// Sum of amounts.
    pub total_amount: Decimal,
    /// Number of transactions.
    pub transaction_count: u64,
}

/// Totals for one (date, type) group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTotal {
    /// Calendar date.
    pub date: NaiveDate,
    /// Direction.
    pub transaction_type: TransactionType,
    /// Sum of amounts.
    pub total_amount: Decimal,
    /// Number of transactions.
    pub transaction_count: u64,
}
