pub mod bookings;
pub mod health;
pub mod send_email;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /bookings                                        submit a booking (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/bookings", bookings::router())
}
