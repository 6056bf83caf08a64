//! The `{success, message, data}` envelope returned across the API boundary.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Discriminated result handed to the (external) API layer.
///
/// Failures never carry internal detail: persistence and internal errors are
/// replaced by a generic message, see [`AppError::public_message`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the operation succeeded.
    pub success: bool,
    /// Human-readable message suitable for direct display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Error code for failures (e.g. `VALIDATION_ERROR`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Payload on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Successful response with a payload and no message.
    #[must_use]
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            code: None,
            data: Some(data),
        }
    }

    /// Successful response with a message and a payload.
    #[must_use]
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            code: None,
            data: Some(data),
        }
    }

    /// Failed response built from an application error.
    #[must_use]
    pub fn failure(error: &AppError) -> Self {
        Self {
            success: false,
            message: Some(error.public_message()),
            code: Some(error.error_code().to_string()),
            data: None,
        }
    }
}

/// Converts a domain result into an envelope.
///
/// Server-side failures are logged here, once, with their original detail;
/// client errors are not logged as faults.
pub fn respond<T, E>(result: Result<T, E>, success_message: &str) -> ApiResponse<T>
where
    E: Into<AppError>,
{
    match result {
        Ok(data) => ApiResponse::ok(success_message, data),
        Err(err) => {
            let err = err.into();
            if err.is_server_error() {
                tracing::error!(error = %err, code = err.error_code(), "operation failed");
            }
            ApiResponse::failure(&err)
        }
    }
}
