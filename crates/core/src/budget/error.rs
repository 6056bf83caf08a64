//! Budget error types.

use ledgerwise_shared::AppError;
use thiserror::Error;

use crate::store::StoreError;

/// Budget-related errors.
///
/// Display strings are shown to end users verbatim.
#[derive(Debug, Error)]
pub enum BudgetError {
    /// Amount is zero, negative, or missing.
    #[error("Budget amount must be a positive number")]
    InvalidAmount,

    /// Amount does not fit the ledger's amount column.
    #[error("Budget amount is too large")]
    AmountTooLarge,

    /// Period label is not one of the fixed set.
    #[error("Invalid period")]
    InvalidPeriod,

    /// Start is not strictly before end.
    #[error("End date must be after start date")]
    InvalidDateRange,

    /// An active sibling budget overlaps the requested interval.
    #[error("Budget already exists for this category and period")]
    Overlap,

    /// Category is unknown, foreign, or inactive.
    #[error("Invalid category")]
    InvalidCategory,

    /// Budget is unknown, foreign, or already deleted.
    #[error("Budget not found")]
    NotFound,

    /// Patch carried no fields.
    #[error("No valid fields to update")]
    EmptyPatch,

    /// Store failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<BudgetError> for AppError {
    fn from(err: BudgetError) -> Self {
        match err {
            BudgetError::InvalidAmount
            | BudgetError::AmountTooLarge
            | BudgetError::InvalidPeriod
            | BudgetError::InvalidDateRange
            | BudgetError::EmptyPatch => Self::Validation(err.to_string()),
            BudgetError::Overlap => Self::Conflict(err.to_string()),
            BudgetError::InvalidCategory | BudgetError::NotFound => {
                Self::NotFound(err.to_string())
            }
            BudgetError::Store(inner) => inner.into(),
        }
    }
}
