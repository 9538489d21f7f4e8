//! Storage for persisted tags.
//!
//! ## Modules
//!
//! - `tag_file`: Flat JSON file holding the whole tag array, rewritten on
//!   every mutation

pub mod tag_file;

pub use tag_file::{TagStore, DEFAULT_TAGS_FILE, TAGS_FILE_ENV};
