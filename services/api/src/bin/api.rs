//! services/api/src/bin/api.rs

use api_lib::{
    adapters::InMemorySnapshotAdapter,
    config::Config,
    error::ApiError,
    web::{
        build_notification_handler, get_access_handler, get_header_handler, health_handler,
        list_rooms_handler, list_suggestions_handler, put_snapshot_handler, rest::ApiDoc,
        state::AppState,
    },
};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Build the Shared AppState ---
    // The snapshot store starts empty; the hosting layer pushes the first
    // snapshot via PUT /snapshot before querying.
    let app_state = Arc::new(AppState {
        snapshot: Arc::new(InMemorySnapshotAdapter::default()),
        config: config.clone(),
    });

    // --- 3. Create the Web Router ---
    let api_router = Router::new()
        .route("/health", get(health_handler))
        .route("/snapshot", put(put_snapshot_handler))
        .route(
            "/users/{user_id}/courses/{course_id}/access",
            get(get_access_handler),
        )
        .route("/users/{user_id}/rooms", get(list_rooms_handler))
        .route("/users/{user_id}/suggestions", get(list_suggestions_handler))
        .route("/users/{user_id}/header", get(get_header_handler))
        .route("/notifications", post(build_notification_handler))
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024))
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 4. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
