//! HTTP body types shared by the tag service and the map client.

use crate::tag::Tag;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Message returned with every 400 response from the tag routes.
pub const INVALID_TAG_DATA: &str = "Invalid tag data";

/// Body the client sends to `POST /api/tags`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTagPayload {
    pub lat: f64,
    pub lng: f64,
    pub text: String,
    #[serde(rename = "userId")]
    pub user_id: String,
}

/// Response to a successful tag submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTagResponse {
    pub success: bool,
    /// The record as persisted. Older servers answer with `success` only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<Tag>,
}

impl CreateTagResponse {
    pub fn created(tag: Tag) -> Self {
        Self {
            success: true,
            tag: Some(tag),
        }
    }
}

/// Response to a successful clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Error body: `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    pub fn invalid_tag_data() -> Self {
        Self::new(INVALID_TAG_DATA)
    }
}

/// The legacy list wrapper returned by `GET /api/recording`.
///
/// Carries the stored records unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyTagList {
    pub tags: Vec<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_uses_camel_case_user_id() {
        let payload = NewTagPayload {
            lat: 1.0,
            lng: 2.0,
            text: "hi".into(),
            user_id: "me".into(),
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"lat": 1.0, "lng": 2.0, "text": "hi", "userId": "me"})
        );
    }

    #[test]
    fn test_create_response_accepts_bare_success() {
        let response: CreateTagResponse = serde_json::from_value(json!({"success": true})).unwrap();
        assert!(response.success);
        assert!(response.tag.is_none());
    }

    #[test]
    fn test_error_body_shape() {
        assert_eq!(
            serde_json::to_value(ErrorResponse::invalid_tag_data()).unwrap(),
            json!({"error": "Invalid tag data"})
        );
    }
}
