mod routes;
mod controllers;
mod services;
mod models;
mod api_docs;
mod shared_state;
mod config;
mod data;
mod error;
mod repository;

use std::net::SocketAddr;
use std::sync::Arc;
use axum::{Router, routing::get, response::Html};
use crate::routes::location_routes::api_routes;
use utoipa::OpenApi;
use utoipa_scalar::Scalar;
use crate::api_docs::ApiDoc;
use crate::config::Config;
use crate::data::india_locations::catalog;
use crate::repository::{InMemoryRepository, JsonFileRepository, LocationRepository};
use crate::shared_state::{AppState, SharedState};

use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // 1. Logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "solar_potential_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 2. Load configuration
    let config = match Config::load_or_default() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "failed to load configuration");
            return;
        }
    };

    // 3. Saved-location store
    let saved: Arc<dyn LocationRepository> = match &config.storage.saved_locations_path {
        Some(path) => match JsonFileRepository::open(path) {
            Ok(repo) => {
                tracing::info!(%path, "saved locations backed by file");
                Arc::new(repo)
            }
            Err(e) => {
                tracing::error!(%path, error = %e, "failed to open saved-locations file");
                return;
            }
        },
        None => Arc::new(InMemoryRepository::new()),
    };

    // 4. Shared state: the catalog is derived once here
    let app_state = AppState::new(
        catalog(),
        saved,
        config.live.seed,
        config.live.noise_amplitude,
    );
    tracing::info!(locations = app_state.catalog.len(), "reference catalog derived");

    // 5. Start Axum HTTP server
    let server_port = config.server.port;
    let shared = SharedState { app: app_state, config };
    let app = Router::new()
        .nest("/api", api_routes(shared))
        .route("/scalar", get(|| async {
            Html(Scalar::new(ApiDoc::openapi()).to_html())
        }))
        .fallback_service(ServeDir::new("static"))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::from(([0, 0, 0, 0], server_port));
    tracing::info!("API server listening on http://{}", addr);
    tracing::info!("Scalar UI: http://{}/scalar", addr);

    if let Err(e) = axum_server::bind(addr)
        .serve(app.into_make_service())
        .await
    {
        tracing::error!(error = %e, "server error");
    }
}
