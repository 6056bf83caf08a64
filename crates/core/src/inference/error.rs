//! Inference error types.

use ledgerwise_shared::AppError;
use thiserror::Error;

use crate::store::StoreError;

/// Inference errors.
#[derive(Debug, Error)]
pub enum InferenceError {
    /// Lookback outside `[1, 12]` months.
    #[error("Lookback must be between 1 and 12 months, got {0}")]
    InvalidLookback(u32),

    /// The history window could not be computed for today's date.
    #[error("Cannot compute the inference window for {0}")]
    InvalidWindow(chrono::NaiveDate),

    /// Store failure while reading spending history.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<InferenceError> for AppError {
    fn from(err: InferenceError) -> Self {
        match err {
            InferenceError::InvalidLookback(_) | InferenceError::InvalidWindow(_) => {
                Self::Validation(err.to_string())
            }
            InferenceError::Store(inner) => inner.into(),
        }
    }
}
