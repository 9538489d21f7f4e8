//! Persistent client identity.
//!
//! Each client keeps a generated user id in a small file so that its tags
//! stay attributed to the same user across restarts.

use rand::Rng;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable overriding the session file path.
pub const SESSION_FILE_ENV: &str = "GEOTAG_SESSION_FILE";

/// Session file used when [`SESSION_FILE_ENV`] is unset.
pub const DEFAULT_SESSION_FILE: &str = ".geotag_user_id";

const ID_PREFIX: &str = "user_";
const ID_SUFFIX_LEN: usize = 7;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// The client's user identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSession {
    pub user_id: String,
    pub path: PathBuf,
}

impl UserSession {
    /// Reads the stored id, or generates and stores a new one.
    ///
    /// A session that cannot be written is still usable for this run.
    pub fn load_or_create(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();

        if let Ok(existing) = fs::read_to_string(&path) {
            let existing = existing.trim();
            if !existing.is_empty() {
                return Self {
                    user_id: existing.to_string(),
                    path,
                };
            }
        }

        let user_id = generate_user_id();
        match fs::write(&path, &user_id) {
            Ok(()) => info!("Created user id {} in {:?}", user_id, path),
            Err(e) => warn!("Failed to persist user id to {:?}: {}", path, e),
        }

        Self { user_id, path }
    }
}

/// `user_` followed by seven random base-36 characters.
pub fn generate_user_id() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("{}{}", ID_PREFIX, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_generated_id_shape() {
        let id = generate_user_id();
        assert!(id.starts_with("user_"));
        assert_eq!(id.len(), 12);
        assert!(id[5..]
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_session_persists_across_loads() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session");

        let first = UserSession::load_or_create(&path);
        let second = UserSession::load_or_create(&path);
        assert_eq!(first.user_id, second.user_id);
    }

    #[test]
    fn test_blank_session_file_is_replaced() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session");
        fs::write(&path, "  \n").unwrap();

        let session = UserSession::load_or_create(&path);
        assert!(session.user_id.starts_with("user_"));
        assert_eq!(fs::read_to_string(&path).unwrap(), session.user_id);
    }

    #[test]
    fn test_unwritable_session_still_usable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing-dir").join("session");

        let session = UserSession::load_or_create(&path);
        assert!(session.user_id.starts_with("user_"));
    }
}
