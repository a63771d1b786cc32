use axum::routing::post;
use axum::Router;

use crate::handlers::send_email;
use crate::state::AppState;

/// Mount the notification endpoint at `/api/send-email` (outside `/api/v1`,
/// where the booking form has always posted it).
pub fn router() -> Router<AppState> {
    Router::new().route("/api/send-email", post(send_email::send_email))
}
