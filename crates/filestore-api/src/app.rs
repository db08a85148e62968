//! Application builder: wires services into state and state into an Axum app.

use std::sync::Arc;

use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use filestore_auth::{AuthService, JwtDecoder};
use filestore_core::config::AppConfig;
use filestore_core::error::AppError;
use filestore_core::traits::{Clock, Mailer, Notifier, StorageProvider, SystemClock};
use filestore_database::Stores;
use filestore_realtime::NotificationHub;
use filestore_service::{CommentService, FileService, FileShareService, LogMailer};
use filestore_storage::LocalStorageProvider;

use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);
    build_router(state)
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Constructs every service over the given stores, storage and clock.
pub fn build_state(
    config: AppConfig,
    stores: Stores,
    storage: Arc<dyn StorageProvider>,
    clock: Arc<dyn Clock>,
) -> AppState {
    let notification_hub = Arc::new(NotificationHub::new(
        &config.notifications,
        Arc::clone(&clock),
    ));
    let notifier: Arc<dyn Notifier> = notification_hub.clone();
    let mailer: Arc<dyn Mailer> = Arc::new(LogMailer);

    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&stores.users),
        Arc::clone(&stores.tokens),
        &config.auth,
        Arc::clone(&clock),
    ));
    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

    let file_service = Arc::new(FileService::new(
        Arc::clone(&stores.files),
        Arc::clone(&storage),
        Arc::clone(&clock),
    ));

    let share_service = Arc::new(FileShareService::new(
        Arc::clone(&stores.files),
        Arc::clone(&stores.shares),
        Arc::clone(&stores.users),
        mailer,
        Arc::clone(&notifier),
        Arc::clone(&clock),
        &config.share,
    ));

    let comment_service = Arc::new(CommentService::new(
        Arc::clone(&stores.comments),
        Arc::clone(&stores.files),
        Arc::clone(&stores.users),
        notifier,
        Arc::clone(&clock),
    ));

    AppState {
        config: Arc::new(config),
        stores,
        storage,
        clock,
        jwt_decoder,
        auth_service,
        file_service,
        share_service,
        comment_service,
        notification_hub,
    }
}

/// Runs the FileStore server until Ctrl-C or SIGTERM.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    info!("Starting FileStore server...");

    let stores = Stores::open(&config.database).await?;

    let storage = LocalStorageProvider::new(&config.storage.upload_root).await?;
    info!(root = %storage.root().display(), "Upload storage ready");

    let addr = config.server.bind_address();
    let state = build_state(
        config,
        stores.clone(),
        Arc::new(storage),
        Arc::new(SystemClock),
    );
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!("FileStore server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    stores.close().await;
    info!("FileStore server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
