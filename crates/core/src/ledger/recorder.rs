//! Transaction write path with the post-commit budget check.

use std::sync::Arc;

use chrono::Utc;
use ledgerwise_shared::types::{MAX_AMOUNT, TransactionId, round_money};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::RecordError;
use super::types::{
    DEFAULT_PAYMENT_METHOD, NewTransaction, Notification, Transaction, TransactionType,
};
use crate::budget::AlertService;
use crate::store::LedgerStore;

/// Success message for [`TransactionRecorder::record`].
pub const TRANSACTION_RECORDED: &str = "Transaction created successfully";

/// Outcome of recording a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedTransaction {
    /// The stored transaction.
    pub transaction: Transaction,
    /// Budget alert written after the commit, if any.
    pub notification: Option<Notification>,
}

/// Records transactions and raises late budget alerts.
///
/// The transaction is written first and the budget is re-checked afterwards,
/// so a concurrent writer can only delay an alert, never lose the transaction.
pub struct TransactionRecorder<S: LedgerStore> {
    store: Arc<S>,
    alerts: AlertService<S>,
}

impl<S: LedgerStore> TransactionRecorder<S> {
    /// Create a new recorder sharing `store` with its alert evaluator.
    #[must_use]
    pub fn new(store: Arc<S>, alerts: AlertService<S>) -> Self {
        Self { store, alerts }
    }

    /// Validates and stores a transaction, then checks its budget.
    ///
    /// # Errors
    ///
    /// Validation and category errors, or a store failure while writing the
    /// transaction. A failed notification write is logged and swallowed.
    pub async fn record(&self, input: NewTransaction) -> Result<RecordedTransaction, RecordError> {
        let amount = round_money(input.amount);
        if amount <= Decimal::ZERO {
            return Err(RecordError::InvalidAmount);
        }
        if amount > MAX_AMOUNT {
            return Err(RecordError::AmountTooLarge);
        }
        let description = input.description.trim();
        if description.is_empty() {
            return Err(RecordError::MissingDescription);
        }

        let category = self
            .store
            .find_category(input.user_id, input.category_id)
            .await?
            .filter(|c| c.is_active)
            .ok_or(RecordError::InvalidCategory)?;
        if !category.category_type.supports(input.transaction_type) {
            return Err(RecordError::IncompatibleCategory);
        }

        let transaction = self
            .store
            .insert_transaction(Transaction {
                id: TransactionId::new(),
                user_id: input.user_id,
                category_id: category.id,
                transaction_type: input.transaction_type,
                amount,
                description: description.to_string(),
                transaction_date: input.transaction_date,
                payment_method: input
                    .payment_method
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_PAYMENT_METHOD.to_string()),
                reference_number: input.reference_number,
                notes: input.notes,
                status: input.status.unwrap_or_default(),
                created_at: Utc::now(),
            })
            .await?;

        tracing::debug!(
            transaction_id = %transaction.id,
            transaction_type = %transaction.transaction_type,
            amount = %transaction.amount,
            "transaction recorded"
        );

        let notification = if transaction.transaction_type == TransactionType::Expense {
            match self.alerts.alert_after_commit(&transaction).await {
                Ok(notification) => notification,
                Err(err) => {
                    tracing::warn!(
                        transaction_id = %transaction.id,
                        error = %err,
                        "post-commit budget check failed"
                    );
                    None
                }
            }
        } else {
            None
        };

        Ok(RecordedTransaction {
            transaction,
            notification,
        })
    }
}
