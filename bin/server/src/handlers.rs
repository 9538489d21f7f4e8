//! HTTP handlers for the canonical tag routes.
//!
//! - `GET /api/tags` returns the stored records verbatim
//! - `POST /api/tags` validates, stamps and appends one tag
//! - `DELETE /api/tags` clears the store
//!
//! Validation failures answer 400 with a fixed message and never touch the
//! store.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use geotag::storage::TagStore;
use geotag::tag::{CanonicalTagRequest, NewTag};
use geotag::wire::{CreateTagResponse, ErrorResponse, SuccessResponse};
use geotag::TagError;
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// Tag store shared by all handlers.
pub type SharedTagStore = Arc<TagStore>;

/// List every stored tag
#[instrument(skip(store))]
pub async fn list_tags(State(store): State<SharedTagStore>) -> impl IntoResponse {
    let records = store.load_records();
    info!("Listed {} tags", records.len());
    Json(records)
}

/// Create a tag from a canonical JSON body
#[instrument(skip(store, payload))]
pub async fn create_tag(
    State(store): State<SharedTagStore>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            warn!("Rejected tag body: {}", rejection.body_text());
            return invalid_tag_data();
        }
    };

    persist_new_tag(&store, CanonicalTagRequest::from_json(&body))
}

/// Clear every stored tag
#[instrument(skip(store))]
pub async fn clear_tags(State(store): State<SharedTagStore>) -> Response {
    clear_store(&store)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "geotag-server",
        "version": geotag::VERSION
    }))
}

// ============================================================================
// Shared by the canonical and legacy surfaces
// ============================================================================

/// Appends a normalized tag, or answers 400 if normalization failed.
pub fn persist_new_tag(store: &TagStore, parsed: Result<NewTag, TagError>) -> Response {
    let tag = match parsed {
        Ok(tag) => tag,
        Err(e) => {
            warn!("Rejected tag submission: {}", e);
            return invalid_tag_data();
        }
    };

    match store.append(tag) {
        Ok(stored) => (StatusCode::OK, Json(CreateTagResponse::created(stored))).into_response(),
        Err(e) => {
            error!("Failed to persist tag to {:?}: {}", store.path(), e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to save tags")),
            )
                .into_response()
        }
    }
}

/// Clears the store and answers `{"success": true}`.
pub fn clear_store(store: &TagStore) -> Response {
    match store.clear() {
        Ok(()) => (StatusCode::OK, Json(SuccessResponse::ok())).into_response(),
        Err(e) => {
            error!("Failed to clear {:?}: {}", store.path(), e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to clear tags")),
            )
                .into_response()
        }
    }
}

/// 400 `{"error": "Invalid tag data"}`
pub fn invalid_tag_data() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::invalid_tag_data()),
    )
        .into_response()
}
