//! Tests for `AppError` to HTTP response mapping.
//!
//! These call `IntoResponse` directly; no server is needed.

use std::time::Duration;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use serde_json::json;

use hdtrades_api::error::AppError;
use hdtrades_core::error::CoreError;
use hdtrades_core::submission::PersistenceError;
use hdtrades_core::validation::ValidationErrors;
use hdtrades_notify::{NotifyError, ProviderError};

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn bad_request_error_returns_400() {
    let (status, json) = error_to_response(AppError::BadRequest("invalid field value".into())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "invalid field value");
}

#[tokio::test]
async fn core_validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation("Unknown preferred time: Midnight".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn field_errors_return_422_with_fields() {
    let mut fields = ValidationErrors::new();
    fields.set("email", "Please enter a valid email address");

    let (status, json) = error_to_response(AppError::Validation(fields)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"], "Validation failed");
    assert_eq!(json["fields"]["email"], "Please enter a valid email address");
}

// ---------------------------------------------------------------------------
// Server-side failures never leak their detail
// ---------------------------------------------------------------------------

#[tokio::test]
async fn internal_error_returns_500_and_sanitizes_message() {
    let err = AppError::InternalError("secret database credentials leaked".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert!(!json["error"].as_str().unwrap().contains("secret"));
}

#[tokio::test]
async fn submission_failure_uses_generic_message() {
    let err = AppError::Submission(PersistenceError::TimedOut(Duration::from_secs(10)));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "SUBMISSION_FAILED");
    assert_eq!(
        json["error"],
        "There was an error submitting your booking. Please try again."
    );
}

#[tokio::test]
async fn provider_failure_hides_provider_body() {
    let err = AppError::Notify(NotifyError::Provider(ProviderError::HttpStatus {
        status: 401,
        body: "invalid api key re_live_123".into(),
    }));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json, json!({ "error": "Failed to send email" }));
}
