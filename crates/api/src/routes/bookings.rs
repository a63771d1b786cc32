//! Mounted at `/bookings` by `api_routes()`.

use axum::routing::post;
use axum::Router;

use crate::handlers::bookings;
use crate::state::AppState;

/// ```text
/// POST   /                  -> create_booking
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(bookings::create_booking))
}
