//! Geotag Server
//!
//! Stores short text tags pinned to map coordinates in a single JSON file and
//! serves them over a small HTTP API. Optionally serves the browser client's
//! static files for any path the API does not claim.
//!
//! ## Usage
//!
//! ```bash
//! # Run with default settings (0.0.0.0:3000, ./tags.json)
//! geotag-server
//!
//! # Custom port and store location
//! PORT=8080 TAGS_FILE=/var/lib/geotag/tags.json geotag-server
//!
//! # Serve the client from ./public
//! geotag-server --static-dir public
//!
//! # Enable debug logging
//! RUST_LOG=debug geotag-server
//! ```

mod config;
mod handlers;
mod legacy;
#[cfg(test)]
mod test_support;

use axum::{routing::get, Router};
use config::ServerConfig;
use geotag::storage::TagStore;
use handlers::SharedTagStore;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Builds the application router over a shared store.
pub fn build_router(store: SharedTagStore, static_dir: Option<PathBuf>) -> Router {
    let api = Router::new()
        .route(
            "/api/tags",
            get(handlers::list_tags)
                .post(handlers::create_tag)
                .delete(handlers::clear_tags),
        )
        .route(
            "/api/recording",
            get(legacy::list_recording)
                .post(legacy::create_recording)
                .delete(legacy::clear_recording),
        )
        .route("/health", get(handlers::health_check))
        .with_state(store);

    let app = match static_dir {
        Some(dir) => api.fallback_service(ServeDir::new(dir)),
        None => api,
    };

    app.layer(TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "geotag_server=info,geotag=info,tower_http=debug".into()),
        )
        .init();

    let config = ServerConfig::from_env();
    let store: SharedTagStore = Arc::new(TagStore::open(&config.tags_file));
    info!("Tag store: {}", store.path().display());

    if let Some(dir) = &config.static_dir {
        info!("Serving static files from {}", dir.display());
    }

    let app = build_router(store, config.static_dir.clone());

    let listener = TcpListener::bind(&config.bind_addr).await?;
    info!("Geotag Server running on http://{}", config.bind_addr);
    info!("");
    info!("Endpoints:");
    info!("  GET    /api/tags          - List all tags");
    info!("  POST   /api/tags          - Create a tag");
    info!("  DELETE /api/tags          - Clear all tags");
    info!("  GET    /api/recording     - List all tags (legacy wrapper)");
    info!("  POST   /api/recording     - Create a tag (legacy JSON or multipart)");
    info!("  DELETE /api/recording     - Clear all tags (legacy)");
    info!("  GET    /health            - Health check");

    axum::serve(listener, app).await?;

    Ok(())
}
