//! Report error types.

use chrono::NaiveDate;
use ledgerwise_shared::AppError;
use thiserror::Error;

use crate::store::StoreError;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Date string is not `YYYY-MM-DD`.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Invalid date range.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// End date more than a year ahead.
    #[error("End date {0} is more than one year in the future")]
    EndTooFarAhead(NaiveDate),

    /// Year outside 2000-2100 or month outside 1-12.
    #[error("Invalid year or month: {year}-{month}")]
    InvalidMonth {
        /// Requested year.
        year: i32,
        /// Requested month.
        month: u32,
    },

    /// Trend lookback outside 1-36 months.
    #[error("Trend analysis covers 1 to 36 months, got {0}")]
    InvalidTrendMonths(u32),

    /// Unknown relative window label.
    #[error("Invalid period: {0}")]
    InvalidWindow(String),

    /// Unknown report type.
    #[error("Invalid report type: {0}")]
    InvalidReportType(String),

    /// Unknown export format.
    #[error("Invalid export format: {0}")]
    InvalidFormat(String),

    /// Store failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Export file could not be written.
    #[error("Export failed: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization failed.
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization failed.
    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::Store(inner) => inner.into(),
            ReportError::Io(_) | ReportError::Csv(_) | ReportError::Json(_) => {
                Self::Internal(err.to_string())
            }
            _ => Self::Validation(err.to_string()),
        }
    }
}
