//! # geotag
//!
//! Geolocated text notes ("tags") dropped on a map and attributed to
//! color-coded users.
//!
//! The crate has two halves:
//!
//! - **Tag store**: [`tag`] normalizes the request shapes the service accepts
//!   into one validated record, and [`storage`] persists records in a flat
//!   JSON file. The `geotag-server` binary exposes both over HTTP.
//! - **Map client**: [`client`] polls the service, holds the tag list, and
//!   keeps map markers and the user legend in step with it. The
//!   `geotag-client` binary runs it headless.
//!
//! ## Example
//!
//! ```rust
//! use geotag::tag::CanonicalTagRequest;
//! use serde_json::json;
//!
//! let tag = CanonicalTagRequest::from_json(&json!({
//!     "lat": "51.5",
//!     "lng": -0.12,
//!     "text": "  Hello London ",
//!     "userId": "  example-user  ",
//! }))
//! .unwrap();
//!
//! assert_eq!(tag.text, "Hello London");
//! assert_eq!(tag.user_id, "example-user");
//! ```

pub mod client;
pub mod error;
pub mod storage;
pub mod tag;
pub mod wire;

pub use error::{GeotagError, Result, TagError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
