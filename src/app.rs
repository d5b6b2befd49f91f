use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::info;

use crate::{admin, backend::BackendClient, certificate, config::Config, entry, feedback};

/// Shared application state: the configuration and the backend client.
pub struct AppState {
    pub config: Config,
    pub backend: BackendClient,
}

impl AppState {
    pub fn new(config: Config) -> Arc<Self> {
        let backend = BackendClient::new(config.backend_url.clone());
        Arc::new(Self { config, backend })
    }
}

/// Build the portal router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(entry::show))
        .route("/verify", post(entry::verify))
        .route("/feedback", get(feedback::show).post(feedback::submit))
        .route("/certificate", get(certificate::show))
        .route("/certificate/download", post(certificate::download))
        .route("/admin", get(admin::login_page))
        .route("/admin/login", post(admin::login))
        .route("/admin/logout", post(admin::logout))
        .route("/admin/dashboard", get(admin::dashboard))
        .route("/admin/chart.png", get(admin::chart_png))
        .route("/admin/feedback/:email/delete", post(admin::delete))
        .nest_service("/static", ServeDir::new("static"))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the portal and serve until shutdown.
pub async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState::new(config);
    let app = router(state.clone());

    let address = format!("0.0.0.0:{}", state.config.port);
    let listener = TcpListener::bind(&address).await?;
    info!("portal listening on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
