pub mod request_id;

use axum::{middleware, routing::get, routing::post, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::controllers::{health, narration::NarrationController};
use crate::infrastructure::config::Config;
use crate::infrastructure::db::DbPool;
use self::request_id::request_id_middleware;

/// Assemble the application router. Split out from server startup so
/// endpoint tests can drive the router directly.
pub fn build_router(
    pool: Arc<DbPool>,
    narration_controller: Arc<NarrationController>,
) -> Router {
    // Narration route (consumed by the playback client)
    let narration_routes = Router::new()
        .route("/api/narrations", post(NarrationController::generate))
        .with_state(narration_controller);

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(pool)
        .merge(narration_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    pool: Arc<DbPool>,
    config: Arc<Config>,
    narration_controller: Arc<NarrationController>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(pool, narration_controller);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
