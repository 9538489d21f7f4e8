//! Map client.
//!
//! Keeps a polled tag list, the markers drawn for it, and a per-user color
//! legend consistent with each other. Rendering is delegated to the
//! [`surface`] traits so the same controller can drive a browser map or a
//! terminal.
//!
//! ## Modules
//!
//! - `geo`: haversine distance and the nearby-thread lookup
//! - `palette`: first-seen user color assignment
//! - `notice`: transient success/error banners
//! - `surface`: map and panel collaborator traits
//! - `state`: the client state object and tag normalization
//! - `controller`: state transitions and rendering
//! - `api`: HTTP backend for the tag service
//! - `session`: persistent user id
//! - `runtime`: event loop and poll timer

pub mod api;
pub mod controller;
pub mod geo;
pub mod notice;
pub mod palette;
pub mod runtime;
pub mod session;
pub mod state;
pub mod surface;

pub use api::{HttpTagBackend, TagBackend};
pub use controller::{Effect, GeoFailure, MapClient, SubmitRejection};
pub use geo::{distance_meters, find_nearby, Position};
pub use notice::{Notice, NoticeKind, NOTICE_DURATION};
pub use runtime::{ClientEvent, POLL_INTERVAL};
pub use state::{ClientState, ClientTag, LoadState};
pub use surface::{ClientView, MapSurface};
