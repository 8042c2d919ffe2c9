use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use lumen_core::retry::RetryPolicy;
use lumen_db::{BackendClient, RestBackend};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lumen_api::config::ServerConfig;
use lumen_api::router::build_app_router;
use lumen_api::sessions::EditorSessions;
use lumen_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lumen_api=debug,lumen_db=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        backend_url = %config.backend_url,
        "Loaded server configuration",
    );

    // --- Backend ---
    let client = BackendClient::new(config.backend_url.clone(), config.backend_anon_key.clone());
    match lumen_db::health_check(&client).await {
        Ok(()) => tracing::info!("Backend health check passed"),
        Err(e) => tracing::warn!(error = %e, "Backend health check failed, starting anyway"),
    }

    let role_lookup = RetryPolicy::default().with_max_attempts(config.role_lookup_max_attempts);
    let backend = Arc::new(RestBackend::new(client, role_lookup));

    // --- App state ---
    let sessions = Arc::new(EditorSessions::new());
    let state = AppState {
        config: Arc::new(config.clone()),
        backend,
        sessions: Arc::clone(&sessions),
    };

    // --- Background tasks ---
    let sweep_cancel = tokio_util::sync::CancellationToken::new();
    let sweep_handle = tokio::spawn(lumen_api::background::session_sweep::run(
        Arc::clone(&sessions),
        Duration::from_secs(config.session_idle_timeout_secs),
        Duration::from_secs(config.session_sweep_interval_secs),
        sweep_cancel.clone(),
    ));

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

    sweep_cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), sweep_handle).await;

    let open_sessions = sessions.session_count().await;
    if open_sessions > 0 {
        tracing::warn!(open_sessions, "Discarding open editing sessions");
    }
    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
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
        () = ctrl_c => tracing::info!("Received Ctrl-C, starting graceful shutdown"),
        () = terminate => tracing::info!("Received SIGTERM, starting graceful shutdown"),
    }
}
