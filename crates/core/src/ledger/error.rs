//! Transaction write path errors.

use ledgerwise_shared::AppError;
use thiserror::Error;

use crate::store::StoreError;

/// Errors raised while recording a transaction.
#[derive(Debug, Error)]
pub enum RecordError {
    /// Amount is zero or negative after rounding.
    #[error("Amount must be a positive number")]
    InvalidAmount,

    /// Amount does not fit the ledger's amount column.
    #[error("Amount is too large")]
    AmountTooLarge,

    /// Description is blank.
    #[error("Description is required")]
    MissingDescription,

    /// Category is unknown, foreign, or inactive.
    #[error("Invalid category")]
    InvalidCategory,

    /// Category does not accept the transaction's type.
    #[error("Category does not support this transaction type")]
    IncompatibleCategory,

    /// Store failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<RecordError> for AppError {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::InvalidAmount
            | RecordError::AmountTooLarge
            | RecordError::MissingDescription
            | RecordError::IncompatibleCategory => Self::Validation(err.to_string()),
            RecordError::InvalidCategory => Self::NotFound(err.to_string()),
            RecordError::Store(inner) => inner.into(),
        }
    }
}
