use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hdtrades_api::config::ServerConfig;
use hdtrades_api::router::build_app_router;
use hdtrades_api::state::AppState;
use hdtrades_core::submission::{BookingNotifier, SubmissionConfig, SubmissionCoordinator};
use hdtrades_db::PgBookingStore;
use hdtrades_notify::config::{DEFAULT_FROM_ADDRESS, DEFAULT_STAFF_ADDRESS};
use hdtrades_notify::delivery::{build_provider, DisabledProvider, EmailProvider};
use hdtrades_notify::{EmailConfig, NotificationService, SendEmailClient};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hdtrades_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = hdtrades_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    hdtrades_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    hdtrades_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Email ---
    let notifications = Arc::new(match EmailConfig::from_env() {
        Some(email_config) => {
            let provider =
                build_provider(&email_config.provider).expect("Failed to build email provider");
            tracing::info!(staff = %email_config.staff_address, "Email delivery configured");
            NotificationService::from_config(provider, &email_config)
        }
        None => {
            tracing::warn!(
                "Neither RESEND_API_KEY nor SMTP_HOST is set, booking emails will not be sent"
            );
            let provider: Arc<dyn EmailProvider> = Arc::new(DisabledProvider);
            NotificationService::new(provider, DEFAULT_FROM_ADDRESS, DEFAULT_STAFF_ADDRESS)
        }
    });

    let notifier: Arc<dyn BookingNotifier> = match &config.send_email_url {
        Some(url) => {
            tracing::info!(%url, "Bookings notify through remote send-email endpoint");
            Arc::new(SendEmailClient::new(url.clone()).expect("Failed to build HTTP client"))
        }
        None => notifications.clone(),
    };

    // --- Submission pipeline ---
    let submission_config = SubmissionConfig::from_env();
    tracing::info!(
        persistence_timeout = ?submission_config.persistence_timeout,
        notification_timeout = ?submission_config.notification_timeout,
        "Submission pipeline configured",
    );
    let coordinator = Arc::new(SubmissionCoordinator::new(
        Arc::new(PgBookingStore::new(pool.clone())),
        notifier,
        submission_config,
    ));

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        notifications,
        coordinator,
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT or SIGTERM to initiate graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
