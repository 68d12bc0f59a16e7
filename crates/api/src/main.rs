use std::net::SocketAddr;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use voicematch_api::config::ServerConfig;
use voicematch_api::router::build_app_router;
use voicematch_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "voicematch_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        store = ?config.store,
        "Loaded server configuration"
    );

    // --- Data store ---
    let store = config.store.build();
    match store.health_check().await {
        Ok(()) => tracing::info!("Data store health check passed"),
        Err(e) => tracing::warn!(error = %e, "Data store health check failed, starting anyway"),
    }

    // --- App state and router ---
    let state = AppState::new(store);
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

    let drain = Duration::from_secs(config.shutdown_timeout_secs);
    let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());
    let served = tokio::spawn(async move { server.await });

    // Wait for the server to finish, bounding the drain once a signal arrives.
    tokio::select! {
        result = served => {
            result.expect("Server task panicked").expect("Server error");
        }
        () = async {
            shutdown_signal().await;
            tokio::time::sleep(drain).await;
        } => {
            tracing::warn!(drain_secs = drain.as_secs(), "Shutdown drain timed out, exiting");
        }
    }

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
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
