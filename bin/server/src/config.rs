//! Server configuration from the environment and command line.
//!
//! ## Options
//!
//! - `--bind <addr>` - Listen address (default `0.0.0.0:$PORT`, `PORT` default 3000)
//! - `--tags-file <path>` - Tag store file (default `$TAGS_FILE` or `tags.json`)
//! - `--static-dir <dir>` - Serve files from this directory for unmatched paths
//!   (default `$GEOTAG_STATIC_DIR`, disabled when unset)

use geotag::storage::{DEFAULT_TAGS_FILE, TAGS_FILE_ENV};
use std::path::PathBuf;

/// Port used when `PORT` is unset or unparseable.
pub const DEFAULT_PORT: u16 = 3000;

/// Environment variable naming the static file directory.
pub const STATIC_DIR_ENV: &str = "GEOTAG_STATIC_DIR";

/// Resolved server settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub tags_file: PathBuf,
    pub static_dir: Option<PathBuf>,
}

impl ServerConfig {
    /// Reads the process environment and arguments.
    pub fn from_env() -> Self {
        let args: Vec<String> = std::env::args().collect();
        Self::resolve(&args, |key| std::env::var(key).ok())
    }

    /// Resolves settings from explicit arguments and an environment lookup.
    /// Arguments win over environment variables.
    pub fn resolve(args: &[String], env: impl Fn(&str) -> Option<String>) -> Self {
        let port = env("PORT")
            .and_then(|p| p.trim().parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let bind_addr = arg_value(args, "--bind").unwrap_or_else(|| format!("0.0.0.0:{}", port));

        let tags_file = arg_value(args, "--tags-file")
            .or_else(|| env(TAGS_FILE_ENV))
            .unwrap_or_else(|| DEFAULT_TAGS_FILE.to_string());

        let static_dir = arg_value(args, "--static-dir")
            .or_else(|| env(STATIC_DIR_ENV))
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);

        Self {
            bind_addr,
            tags_file: PathBuf::from(tags_file),
            static_dir,
        }
    }
}

/// Value following `flag`, if both are present.
fn arg_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|pos| args.get(pos + 1))
        .cloned()
}
