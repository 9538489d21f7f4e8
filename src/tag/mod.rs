//! Tag records and the normalization boundary.
//!
//! A tag is a geolocated text note. Requests arrive in several shapes (the
//! canonical JSON body, the legacy JSON body with field aliases, and the
//! legacy multipart form); each shape has its own adapter in [`normalize`],
//! and every adapter produces the same validated [`NewTag`].

pub mod normalize;

use crate::error::TagError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use normalize::{CanonicalTagRequest, LegacyForm, LegacyTagRequest};

/// Maximum length of a sanitized user id, in characters.
pub const MAX_USER_ID_LENGTH: usize = 50;

/// User id substituted when none (or a blank one) is supplied.
pub const ANONYMOUS_USER_ID: &str = "anonymous";

/// A persisted tag record, exactly as stored and served.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lng: f64,
    /// Trimmed, non-empty note text
    pub text: String,
    /// Sanitized author id. Records written before user ids existed lack it.
    #[serde(
        rename = "userId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub user_id: Option<String>,
    /// Server-side creation time in epoch milliseconds
    pub timestamp: i64,
}

/// A tag that passed validation but has not been stamped or stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTag {
    pub lat: f64,
    pub lng: f64,
    pub text: String,
    pub user_id: String,
}

impl NewTag {
    /// Validates already-coerced fields.
    ///
    /// Coordinates must be finite numbers and the text must be a string that
    /// is non-empty after trimming. The user id is sanitized, never rejected.
    pub fn validate(
        lat: f64,
        lng: f64,
        text: Option<&str>,
        user_id: Option<&Value>,
    ) -> Result<Self, TagError> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(TagError::InvalidTagData);
        }

        let text = text.map(str::trim).unwrap_or_default();
        if text.is_empty() {
            return Err(TagError::InvalidTagData);
        }

        Ok(Self {
            lat,
            lng,
            text: text.to_string(),
            user_id: sanitize_user_id(user_id),
        })
    }

    /// Attaches the server timestamp, producing the stored record.
    pub fn stamp(self, timestamp: i64) -> Tag {
        Tag {
            lat: self.lat,
            lng: self.lng,
            text: self.text,
            user_id: Some(self.user_id),
            timestamp,
        }
    }
}

/// Sanitizes a user id taken from an untyped request field.
///
/// Anything that is not a JSON string becomes `"anonymous"`.
pub fn sanitize_user_id(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => sanitize_user_id_str(s),
        _ => ANONYMOUS_USER_ID.to_string(),
    }
}

/// Trims a user id, defaults blanks to `"anonymous"`, and truncates it to
/// [`MAX_USER_ID_LENGTH`] characters.
pub fn sanitize_user_id_str(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return ANONYMOUS_USER_ID.to_string();
    }
    trimmed.chars().take(MAX_USER_ID_LENGTH).collect()
}

/// Coerces an untyped field to a number the way a browser's `Number(x)` does.
///
/// Missing fields, arrays and objects become NaN; `null` and `false` become
/// 0; `true` becomes 1; strings go through [`coerce_str`].
pub fn coerce_number(value: Option<&Value>) -> f64 {
    match value {
        None => f64::NAN,
        Some(Value::Null) => 0.0,
        Some(Value::Bool(b)) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => coerce_str(s),
        Some(Value::Array(_)) | Some(Value::Object(_)) => f64::NAN,
    }
}

/// Numeric string coercion: blank is 0, `Infinity` is accepted with an
/// optional sign, `0x`/`0o`/`0b` prefixes parse unsigned integers, anything
/// else must be a plain decimal literal.
pub fn coerce_str(raw: &str) -> f64 {
    let s = raw.trim();
    if s.is_empty() {
        return 0.0;
    }

    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = s.strip_prefix(prefix) {
            return u64::from_str_radix(digits, radix)
                .map(|v| v as f64)
                .unwrap_or(f64::NAN);
        }
    }

    // Rust accepts "inf" and "nan" spellings that are not numeric literals here.
    let lowered = s.to_ascii_lowercase();
    if lowered.contains("inf") || lowered.contains("nan") {
        return f64::NAN;
    }

    s.parse::<f64>().unwrap_or(f64::NAN)
}
