//! Handler for server-side booking submission.
//!
//! Runs the same validate, persist, notify pipeline as the booking form
//! against a JSON draft.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use hdtrades_core::booking::BookingDraft;
use hdtrades_core::error::CoreError;
use hdtrades_core::form::BookingForm;
use hdtrades_core::submission::SubmitOutcome;
use hdtrades_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Payload of a `201 Created` booking response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingCreated {
    pub status: &'static str,
    pub show_thank_you: bool,
    /// `None` when the submission key had already been recorded.
    pub booking_id: Option<DbId>,
}

// ---------------------------------------------------------------------------
// POST /bookings
// ---------------------------------------------------------------------------

/// Validate, persist and notify a booking draft.
pub async fn create_booking(
    State(state): State<AppState>,
    payload: Result<Json<BookingDraft>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(draft) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected booking body");
        AppError::BadRequest("Invalid request body".to_string())
    })?;

    let submission_key = draft.submission_key;
    let mut form = BookingForm::from_draft(draft);

    match state.coordinator.submit(&mut form).await {
        SubmitOutcome::Submitted {
            booking_id,
            notified,
        } => {
            tracing::info!(%submission_key, ?booking_id, notified, "Booking accepted");
            Ok((
                StatusCode::CREATED,
                Json(DataResponse {
                    data: BookingCreated {
                        status: form.state().as_str(),
                        show_thank_you: form.show_thank_you(),
                        booking_id,
                    },
                }),
            ))
        }
        SubmitOutcome::Invalid => Err(AppError::Validation(form.errors().clone())),
        SubmitOutcome::Failed(err) => Err(AppError::Submission(err)),
        SubmitOutcome::InFlight => Err(AppError::Core(CoreError::Internal(format!(
            "submission {submission_key} already in progress"
        )))),
    }
}
