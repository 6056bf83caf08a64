//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Generic message shown to callers for server-side failures.
pub const GENERIC_FAILURE_MESSAGE: &str = "An internal error occurred. Please try again later.";

/// Application error taxonomy.
///
/// Every domain error in the workspace converts into one of these variants
/// before crossing the API boundary.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad or missing input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Conflict (e.g., overlapping budget interval, duplicate name).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Unknown id or cross-user access attempt.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Store unavailable or write failed.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Internal error (serialization, file output).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Persistence(_) => "PERSISTENCE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether this error is a system fault rather than a caller mistake.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        matches!(self, Self::Persistence(_) | Self::Internal(_))
    }

    /// Message safe to display to an end user.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Validation(msg) | Self::Conflict(msg) | Self::NotFound(msg) => msg.clone(),
            Self::Persistence(_) | Self::Internal(_) => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}
