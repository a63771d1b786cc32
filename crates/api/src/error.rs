use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use hdtrades_core::error::CoreError;
use hdtrades_core::submission::{PersistenceError, SUBMIT_ERROR_MESSAGE};
use hdtrades_core::validation::ValidationErrors;
use hdtrades_notify::NotifyError;

/// Application-level error type for HTTP handlers.
///
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
/// Server-side failures never expose their detail to the client; it is
/// logged instead.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `hdtrades_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The booking draft failed field validation.
    #[error("Validation failed")]
    Validation(ValidationErrors),

    /// The booking could not be recorded.
    #[error("Submission failed: {0}")]
    Submission(#[from] PersistenceError),

    /// The send-email contract failed. Its body has no `code`.
    #[error(transparent)]
    Notify(#[from] NotifyError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

const INTERNAL_MESSAGE: &str = "An internal error occurred";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => coded(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    coded(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        INTERNAL_MESSAGE,
                    )
                }
            },

            // --- Booking pipeline ---
            AppError::Validation(fields) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({
                    "error": "Validation failed",
                    "code": "VALIDATION_ERROR",
                    "fields": fields,
                }),
            ),
            AppError::Submission(err) => {
                tracing::error!(error = %err, "Booking could not be recorded");
                coded(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "SUBMISSION_FAILED",
                    SUBMIT_ERROR_MESSAGE,
                )
            }

            // --- Send-email contract ---
            AppError::Notify(NotifyError::MissingFields) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": NotifyError::MissingFields.to_string() }),
            ),
            AppError::Notify(err) => {
                tracing::error!(error = %err, "Error sending email");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Failed to send email" }),
                )
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => coded(StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                coded(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    INTERNAL_MESSAGE,
                )
            }
        };

        (status, axum::Json(body)).into_response()
    }
}

/// The common `{ "error", "code" }` body.
fn coded(status: StatusCode, code: &str, message: &str) -> (StatusCode, serde_json::Value) {
    (status, json!({ "error": message, "code": code }))
}
