//! Handlers for the legacy `/api/recording` routes.
//!
//! Same store and record schema as the canonical routes, with older request
//! and response shapes:
//!
//! - `GET` wraps the list as `{"tags": [...]}`
//! - `POST` accepts JSON or `multipart/form-data`, with `latitude`/`longitude`
//!   aliases and a `file` field that supplies the text when `text` is absent
//! - `DELETE` clears the store

use crate::handlers::{clear_store, invalid_tag_data, persist_new_tag, SharedTagStore};
use axum::{
    extract::{FromRequest, Multipart, Request, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use geotag::tag::{LegacyForm, LegacyTagRequest, NewTag};
use geotag::wire::LegacyTagList;
use geotag::TagError;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

/// List every stored tag in the legacy wrapper
#[instrument(skip(store))]
pub async fn list_recording(State(store): State<SharedTagStore>) -> impl IntoResponse {
    let tags = store.load_records();
    info!("Listed {} tags (legacy)", tags.len());
    Json(LegacyTagList { tags })
}

/// Create a tag from a legacy JSON or multipart body
#[instrument(skip(store, request))]
pub async fn create_recording(State(store): State<SharedTagStore>, request: Request) -> Response {
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();

    let parsed = if content_type.starts_with("multipart/form-data") {
        parse_multipart(request).await
    } else if content_type.starts_with("application/json") {
        parse_json(request).await
    } else {
        warn!("Unsupported legacy content type: {:?}", content_type);
        return invalid_tag_data();
    };

    persist_new_tag(&store, parsed)
}

/// Clear every stored tag
#[instrument(skip(store))]
pub async fn clear_recording(State(store): State<SharedTagStore>) -> Response {
    clear_store(&store)
}

async fn parse_json(request: Request) -> Result<NewTag, TagError> {
    let Json(body) = Json::<Value>::from_request(request, &())
        .await
        .map_err(|rejection| {
            warn!("Rejected legacy JSON body: {}", rejection.body_text());
            TagError::InvalidTagData
        })?;

    LegacyTagRequest::from_json(&body)
}

async fn parse_multipart(request: Request) -> Result<NewTag, TagError> {
    let multipart = Multipart::from_request(request, &())
        .await
        .map_err(|rejection| {
            warn!("Rejected legacy multipart body: {}", rejection.body_text());
            TagError::InvalidTagData
        })?;

    let form = read_legacy_form(multipart).await?;
    LegacyTagRequest::from_form(&form)
}

/// Collects the recognized fields of a legacy form as text.
///
/// Uploaded files are read as text too; that is how the `file` field carries
/// the tag body.
async fn read_legacy_form(mut multipart: Multipart) -> Result<LegacyForm, TagError> {
    let mut form = LegacyForm::default();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        warn!("Failed to read multipart field: {}", e);
        TagError::InvalidTagData
    })? {
        let name = field.name().unwrap_or_default().to_string();
        if !LegacyForm::recognizes(&name) {
            debug!("Skipping unknown multipart field {:?}", name);
            continue;
        }

        let value = field.text().await.map_err(|e| {
            warn!("Failed to read multipart field {:?}: {}", name, e);
            TagError::InvalidTagData
        })?;
        form.set(&name, value);
    }

    Ok(form)
}
