//! Ledger store error types.

use ledgerwise_shared::AppError;
use thiserror::Error;

/// Failures reported by a [`LedgerStore`](super::LedgerStore) implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store could not be reached.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A query or write failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// A record expected to exist was missing.
    #[error("Record not found: {0}")]
    RecordNotFound(String),

    /// A stored value could not be mapped onto a domain type.
    #[error("Invalid stored value: {0}")]
    InvalidData(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        Self::Persistence(err.to_string())
    }
}
