//! Request-shape adapters.
//!
//! Each external request shape gets one adapter that maps its fields onto
//! [`NewTag::validate`]. Field aliases and fallbacks are resolved here so the
//! store never sees anything but a validated record.

use super::{coerce_number, coerce_str, NewTag};
use crate::error::TagError;
use serde_json::{Map, Value};

/// The canonical `POST /api/tags` body: `{lat, lng, text, userId?}`.
pub struct CanonicalTagRequest;

impl CanonicalTagRequest {
    /// Normalizes a canonical JSON body.
    pub fn from_json(body: &Value) -> Result<NewTag, TagError> {
        let fields = body.as_object().ok_or(TagError::InvalidTagData)?;

        NewTag::validate(
            coerce_number(fields.get("lat")),
            coerce_number(fields.get("lng")),
            string_field(fields.get("text")),
            fields.get("userId"),
        )
    }
}

/// The legacy `POST /api/recording` body, either JSON or multipart.
///
/// `latitude`/`longitude` stand in for `lat`/`lng` when those are absent,
/// and `file` supplies the text when `text` is absent.
pub struct LegacyTagRequest;

impl LegacyTagRequest {
    /// Normalizes a legacy JSON body.
    pub fn from_json(body: &Value) -> Result<NewTag, TagError> {
        let fields = body.as_object().ok_or(TagError::InvalidTagData)?;

        NewTag::validate(
            coerce_number(aliased(fields, "lat", "latitude")),
            coerce_number(aliased(fields, "lng", "longitude")),
            string_field(aliased(fields, "text", "file")),
            fields.get("userId"),
        )
    }

    /// Normalizes fields collected from a legacy multipart form.
    pub fn from_form(form: &LegacyForm) -> Result<NewTag, TagError> {
        let lat = form.lat.as_deref().or(form.latitude.as_deref());
        let lng = form.lng.as_deref().or(form.longitude.as_deref());
        let text = form.text.as_deref().or(form.file.as_deref());
        let user_id = form.user_id.clone().map(Value::String);

        NewTag::validate(
            lat.map(coerce_str).unwrap_or(f64::NAN),
            lng.map(coerce_str).unwrap_or(f64::NAN),
            text,
            user_id.as_ref(),
        )
    }
}

/// String values of the recognized fields of a legacy multipart form.
///
/// Unknown fields are ignored by the collector; a field that appears more
/// than once keeps its last value.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LegacyForm {
    pub lat: Option<String>,
    pub lng: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub text: Option<String>,
    pub file: Option<String>,
    pub user_id: Option<String>,
}

impl LegacyForm {
    const FIELDS: [&'static str; 7] = [
        "lat",
        "lng",
        "latitude",
        "longitude",
        "text",
        "file",
        "userId",
    ];

    /// Whether a form field name is one the legacy surface reads.
    pub fn recognizes(name: &str) -> bool {
        Self::FIELDS.contains(&name)
    }

    /// Records one form field. Returns false if the name is not recognized.
    pub fn set(&mut self, name: &str, value: String) -> bool {
        let slot = match name {
            "lat" => &mut self.lat,
            "lng" => &mut self.lng,
            "latitude" => &mut self.latitude,
            "longitude" => &mut self.longitude,
            "text" => &mut self.text,
            "file" => &mut self.file,
            "userId" => &mut self.user_id,
            _ => return false,
        };
        *slot = Some(value);
        true
    }
}

/// Returns the primary field, falling back to the alias when the primary is
/// missing or null.
fn aliased<'a>(fields: &'a Map<String, Value>, primary: &str, alias: &str) -> Option<&'a Value> {
    match fields.get(primary) {
        Some(Value::Null) | None => fields.get(alias),
        present => present,
    }
}

/// Text fields must be JSON strings; any other type is treated as absent.
fn string_field(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str)
}
