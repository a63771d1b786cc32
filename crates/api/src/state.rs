use std::sync::Arc;

use hdtrades_core::submission::SubmissionCoordinator;
use hdtrades_notify::NotificationService;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: everything is behind `Arc` or is a pool handle.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: hdtrades_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Renders and sends the two booking emails for `/api/send-email`.
    pub notifications: Arc<NotificationService>,
    /// Persist-then-notify pipeline behind `/api/v1/bookings`.
    pub coordinator: Arc<SubmissionCoordinator>,
}
