//! Client configuration from the environment and command line.
//!
//! ## Options
//!
//! - `--server <url>` - Tag service URL (default `$GEOTAG_SERVER_URL` or `http://127.0.0.1:3000`)
//! - `--position <lat,lng>` - Device position; without it the map opens at 0,0
//! - `--post <text>` - Submit one tag once the position is known
//! - `--session-file <path>` - User id file (default `$GEOTAG_SESSION_FILE` or `.geotag_user_id`)
//! - `--interval <secs>` - Poll interval (default 30)

use geotag::client::api::DEFAULT_SERVER_URL;
use geotag::client::session::{DEFAULT_SESSION_FILE, SESSION_FILE_ENV};
use geotag::client::{Position, POLL_INTERVAL};
use geotag::{GeotagError, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable naming the tag service.
pub const SERVER_URL_ENV: &str = "GEOTAG_SERVER_URL";

#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    pub server_url: String,
    pub position: Option<Position>,
    pub post: Option<String>,
    pub session_file: PathBuf,
    pub poll_interval: Duration,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self> {
        let args: Vec<String> = std::env::args().collect();
        Self::resolve(&args, |key| std::env::var(key).ok())
    }

    /// Arguments win over environment variables.
    pub fn resolve(args: &[String], env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let server_url = arg_value(args, "--server")
            .or_else(|| env(SERVER_URL_ENV))
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());

        let position = arg_value(args, "--position")
            .map(|raw| parse_position(&raw))
            .transpose()?;

        let session_file = arg_value(args, "--session-file")
            .or_else(|| env(SESSION_FILE_ENV))
            .unwrap_or_else(|| DEFAULT_SESSION_FILE.to_string());

        let poll_interval = match arg_value(args, "--interval") {
            Some(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .map_err(|_| GeotagError::config(format!("Invalid interval: {}", raw)))?;
                if secs == 0 {
                    return Err(GeotagError::config("Interval must be at least 1 second"));
                }
                Duration::from_secs(secs)
            }
            None => POLL_INTERVAL,
        };

        Ok(Self {
            server_url,
            position,
            post: arg_value(args, "--post"),
            session_file: PathBuf::from(session_file),
            poll_interval,
        })
    }
}

/// Parses `"lat,lng"`.
fn parse_position(raw: &str) -> Result<Position> {
    let invalid = || GeotagError::config(format!("Invalid position {:?}, expected lat,lng", raw));

    let (lat, lng) = raw.split_once(',').ok_or_else(invalid)?;
    let latitude: f64 = lat.trim().parse().map_err(|_| invalid())?;
    let longitude: f64 = lng.trim().parse().map_err(|_| invalid())?;

    if !latitude.is_finite() || !longitude.is_finite() {
        return Err(invalid());
    }

    Ok(Position::new(latitude, longitude))
}

fn arg_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|pos| args.get(pos + 1))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::resolve(&args(&["geotag-client"]), |_| None).unwrap();
        assert_eq!(config.server_url, "http://127.0.0.1:3000");
        assert_eq!(config.position, None);
        assert_eq!(config.post, None);
        assert_eq!(config.session_file, PathBuf::from(".geotag_user_id"));
        assert_eq!(config.poll_interval, Duration::from_secs(30));
    }

    #[test]
    fn test_arguments() {
        let config = ClientConfig::resolve(
            &args(&[
                "geotag-client",
                "--server",
                "http://tags.example.com",
                "--position",
                "51.5, -0.12",
                "--post",
                "Hello London",
                "--interval",
                "5",
            ]),
            |key| (key == SERVER_URL_ENV).then(|| "http://ignored".to_string()),
        )
        .unwrap();

        assert_eq!(config.server_url, "http://tags.example.com");
        assert_eq!(config.position, Some(Position::new(51.5, -0.12)));
        assert_eq!(config.post.as_deref(), Some("Hello London"));
        assert_eq!(config.poll_interval, Duration::from_secs(5));
    }

    #[test]
    fn test_environment() {
        let config = ClientConfig::resolve(&args(&["geotag-client"]), |key| match key {
            "GEOTAG_SERVER_URL" => Some("http://env.example.com".into()),
            "GEOTAG_SESSION_FILE" => Some("/tmp/geotag-session".into()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.server_url, "http://env.example.com");
        assert_eq!(config.session_file, PathBuf::from("/tmp/geotag-session"));
    }

    #[test]
    fn test_rejects_bad_position() {
        for raw in ["51.5", "north,south", "1,inf"] {
            let result =
                ClientConfig::resolve(&args(&["geotag-client", "--position", raw]), |_| None);
            assert!(matches!(result, Err(GeotagError::Config(_))), "{}", raw);
        }
    }

    #[test]
    fn test_rejects_zero_interval() {
        let result = ClientConfig::resolve(&args(&["geotag-client", "--interval", "0"]), |_| None);
        assert!(result.is_err());
    }
}
