//! Flat-file tag persistence.
//!
//! The store is a single JSON document: an array of [`Tag`] records in
//! submission order. Every mutation reads the whole file, modifies the array
//! in memory, and overwrites the file.
//!
//! Records are kept as raw JSON values, so whatever a record holds is served
//! and rewritten unchanged. A missing file, unparseable JSON, or a document
//! that is not an array reads as empty. Corruption is logged and never
//! surfaced to callers; the next write replaces the file.

use crate::error::Result;
use crate::tag::{NewTag, Tag};
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info, warn};

/// Environment variable overriding the store path.
pub const TAGS_FILE_ENV: &str = "TAGS_FILE";

/// Store path used when [`TAGS_FILE_ENV`] is unset.
pub const DEFAULT_TAGS_FILE: &str = "tags.json";

/// JSON-file-backed tag store.
///
/// Writes from one process are serialized; separate processes sharing the
/// file can still lose each other's updates.
#[derive(Debug)]
pub struct TagStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl TagStore {
    /// Opens a store at the given path. The file is created on first write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Opens the store named by `TAGS_FILE`, or `tags.json` in the working
    /// directory.
    pub fn from_env() -> Self {
        let path = std::env::var(TAGS_FILE_ENV).unwrap_or_else(|_| DEFAULT_TAGS_FILE.to_string());
        Self::open(path)
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads every stored record in submission order, exactly as stored.
    ///
    /// Records are not checked against the [`Tag`] schema; extra fields and
    /// off-shape values survive reads and later appends. Only a document that
    /// is not a JSON array reads as empty.
    pub fn load_records(&self) -> Vec<Value> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = ?self.path, "load: store file absent, treating as empty");
                return Vec::new();
            }
            Err(e) => {
                warn!("Failed to read tag store {:?}: {}", self.path, e);
                return Vec::new();
            }
        };

        match serde_json::from_slice::<Value>(&raw) {
            Ok(Value::Array(records)) => {
                debug!(records = records.len(), "load: read tag store");
                records
            }
            Ok(other) => {
                warn!(
                    "Tag store {:?} is not an array ({}), treating as empty",
                    self.path,
                    json_kind(&other)
                );
                Vec::new()
            }
            Err(e) => {
                warn!(
                    "Tag store {:?} is corrupt, treating as empty: {}",
                    self.path, e
                );
                Vec::new()
            }
        }
    }

    /// Stored records that fit the [`Tag`] schema. Others are skipped here
    /// but stay in the file.
    pub fn load(&self) -> Vec<Tag> {
        self.load_records()
            .into_iter()
            .filter_map(|record| match serde_json::from_value::<Tag>(record) {
                Ok(tag) => Some(tag),
                Err(e) => {
                    debug!("load: skipping off-schema record: {}", e);
                    None
                }
            })
            .collect()
    }

    /// Stamps a validated tag with the current time and appends it.
    ///
    /// Returns the record as persisted.
    pub fn append(&self, tag: NewTag) -> Result<Tag> {
        let timestamp = chrono::Utc::now().timestamp_millis();
        self.append_stamped(tag.stamp(timestamp))
    }

    /// Appends an already-stamped record.
    pub fn append_stamped(&self, tag: Tag) -> Result<Tag> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut records = self.load_records();
        records.push(serde_json::to_value(&tag)?);
        self.save(&records)?;

        info!(
            "Stored tag from {} ({} total)",
            tag.user_id.as_deref().unwrap_or("anonymous"),
            records.len()
        );
        Ok(tag)
    }

    /// Removes every stored tag.
    pub fn clear(&self) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        self.save(&[])?;
        info!("Cleared tag store {:?}", self.path);
        Ok(())
    }

    /// Overwrites the file with the given records, pretty-printed.
    fn save(&self, records: &[Value]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, json)?;
        debug!(records = records.len(), path = ?self.path, "save: wrote tag store");
        Ok(())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
