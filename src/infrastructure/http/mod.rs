use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::controllers::{awesome::AwesomeController, health, solo::SoloController};
use crate::infrastructure::config::Config;

/// Build the application router
pub fn create_router(
    config: &Config,
    solo_controller: Arc<SoloController>,
    awesome_controller: Arc<AwesomeController>,
) -> Router {
    // Solo upload (body limit sized for backup archives)
    let solo_routes = Router::new()
        .route("/github/repos/solo", post(SoloController::push_repos))
        .with_state(solo_controller)
        .layer(DefaultBodyLimit::max(config.max_upload_bytes));

    // Awesome list refresh
    let awesome_routes = Router::new()
        .route("/awesome-solo", get(AwesomeController::refresh))
        .with_state(awesome_controller);

    Router::new()
        .route("/health", get(health::health))
        .merge(solo_routes)
        .merge(awesome_routes)
        .fallback(health::banner)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

/// Start the HTTP server, draining in-flight requests once `shutdown` fires
pub async fn start_http_server(
    config: Arc<Config>,
    app: Router,
    shutdown: CancellationToken,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    Ok(())
}
