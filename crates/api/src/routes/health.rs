use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Readiness of the two booking collaborators.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// `ok` when bookings can be both recorded and emailed, else `degraded`.
    pub status: &'static str,
    pub version: &'static str,
    /// `reachable` or `unreachable`.
    pub booking_store: &'static str,
    /// Configured email provider label; `disabled` when none is set up.
    pub email_provider: &'static str,
}

/// GET /health
///
/// Always answers 200. A down store or a disabled provider only degrades the
/// service: bookings still fail or still record, respectively.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let store_reachable = hdtrades_db::health_check(&state.pool).await.is_ok();
    let email_enabled = state.notifications.is_enabled();

    Json(HealthResponse {
        status: overall_status(store_reachable, email_enabled),
        version: env!("CARGO_PKG_VERSION"),
        booking_store: if store_reachable {
            "reachable"
        } else {
            "unreachable"
        },
        email_provider: state.notifications.provider_name(),
    })
}

fn overall_status(store_reachable: bool, email_enabled: bool) -> &'static str {
    if store_reachable && email_enabled {
        "ok"
    } else {
        "degraded"
    }
}

/// Mount health check routes (root level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_only_when_store_and_email_are_both_up() {
        assert_eq!(overall_status(true, true), "ok");
        assert_eq!(overall_status(false, true), "degraded");
        assert_eq!(overall_status(true, false), "degraded");
    }
}
