//! Geotag Client
//!
//! Headless map client for a geotag server. Polls the tag list, keeps markers
//! and the per-user legend in sync with it, and logs what a map view would
//! show. Can add one tag at the given position on startup.
//!
//! ## Usage
//!
//! ```bash
//! # Watch the default server (http://127.0.0.1:3000)
//! geotag-client --position 51.5,-0.12
//!
//! # Post a tag and keep watching
//! geotag-client --position 51.5,-0.12 --post "Hello London"
//!
//! # Another server, faster polling
//! geotag-client --server http://tags.example.com --interval 5
//! ```

mod config;
mod terminal;

use config::ClientConfig;
use geotag::client::runtime::{event_channel, run, spawn_poller};
use geotag::client::session::UserSession;
use geotag::client::{ClientEvent, GeoFailure, HttpTagBackend, MapClient};
use std::sync::Arc;
use terminal::{TerminalMap, TerminalView};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "geotag_client=info,geotag=info".into()),
        )
        .init();

    let config = ClientConfig::from_env()?;
    let session = UserSession::load_or_create(&config.session_file);
    info!("Signed in as {}", session.user_id);

    let backend = Arc::new(HttpTagBackend::with_url(&config.server_url));
    info!("Tag service: {}", backend.base_url());

    let mut client = MapClient::new(&session.user_id, TerminalMap::new(), TerminalView::new());
    let (events, inbox) = event_channel();

    match config.position {
        Some(position) => events.send(ClientEvent::Position(position))?,
        None => {
            warn!("No --position given, map opens at 0,0");
            events.send(ClientEvent::PositionUnavailable(GeoFailure::Unsupported))?;
        }
    }

    let poller = spawn_poller(config.poll_interval, events.clone());

    if let Some(text) = config.post {
        events.send(ClientEvent::Submit(text))?;
    }

    let shutdown = events.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown.send(ClientEvent::Shutdown);
        }
    });

    run(&mut client, backend, events, inbox).await;
    poller.abort();

    info!(
        "{} tags known at exit, {} markers drawn",
        client.state().tags.len(),
        client.map().live_markers()
    );
    Ok(())
}
