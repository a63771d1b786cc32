//! Handler for the booking notification endpoint.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use hdtrades_notify::{BookingEmailReceipt, SendEmailRequest};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Body of a successful send.
#[derive(Debug, Serialize)]
pub struct SendEmailResponse {
    pub success: bool,
    #[serde(flatten)]
    pub receipt: BookingEmailReceipt,
}

// ---------------------------------------------------------------------------
// POST /api/send-email
// ---------------------------------------------------------------------------

/// Send the customer confirmation and the staff alert for one booking.
pub async fn send_email(
    State(state): State<AppState>,
    payload: Result<Json<SendEmailRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected send-email body");
        AppError::BadRequest("Invalid request body".to_string())
    })?;

    let receipt = state.notifications.send_booking_emails(&input).await?;

    Ok(Json(SendEmailResponse {
        success: true,
        receipt,
    }))
}
