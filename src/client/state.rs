//! Client-side state: the tag list, colors, markers and flags.
//!
//! All of it lives in one [`ClientState`] owned by the controller; render
//! helpers borrow it rather than reaching for globals.

use super::geo::Position;
use super::notice::Notices;
use super::palette::UserColors;
use crate::tag::{coerce_number, sanitize_user_id, ANONYMOUS_USER_ID};
use serde_json::Value;

/// A tag as the client holds it, after normalizing the server's record.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientTag {
    pub latitude: f64,
    pub longitude: f64,
    pub text: String,
    /// Epoch milliseconds. Client-stamped for optimistic entries.
    pub timestamp: i64,
    /// Sanitized user id
    pub user_id: String,
}

impl ClientTag {
    pub fn position(&self) -> Position {
        Position::new(self.latitude, self.longitude)
    }

    /// Normalizes one record from `GET /api/tags`.
    ///
    /// Returns `None` for records with unusable coordinates or no text.
    /// Records without a timestamp get `now`.
    pub fn from_remote(record: &Value, now: i64) -> Option<Self> {
        let latitude = coerce_number(record.get("lat"));
        let longitude = coerce_number(record.get("lng"));
        if !latitude.is_finite() || !longitude.is_finite() {
            return None;
        }

        let text = display_text(record.get("text"));
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let timestamp = match record.get("timestamp").and_then(Value::as_f64) {
            Some(ts) if ts != 0.0 && ts.is_finite() => ts as i64,
            _ => now,
        };

        Some(Self {
            latitude,
            longitude,
            text: text.to_string(),
            timestamp,
            user_id: sanitize_user_id(record.get("userId")),
        })
    }
}

/// Normalizes a whole `GET /api/tags` response body.
///
/// Anything other than a JSON array yields an empty list; unusable records
/// are dropped.
pub fn tags_from_response(body: &Value, now: i64) -> Vec<ClientTag> {
    match body {
        Value::Array(records) => records
            .iter()
            .filter_map(|record| ClientTag::from_remote(record, now))
            .collect(),
        _ => Vec::new(),
    }
}

/// Text of a record: strings as-is, non-zero numbers and `true` in their
/// display form, everything else empty.
fn display_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => match n.as_f64() {
            Some(f) if f == 0.0 => String::new(),
            // `1.0` displays as `1`, as in a browser
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => format!("{:.0}", f),
            _ => n.to_string(),
        },
        Some(Value::Bool(true)) => "true".to_string(),
        _ => String::new(),
    }
}

/// Progress of the most recent tag poll.
///
/// Drives the loading indicator only. It does not stop a new poll from
/// starting while one is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Error,
}

/// Per-user tag count and color.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub user_id: String,
    pub count: usize,
    pub color: &'static str,
}

impl LegendEntry {
    /// Display label; the anonymous id is capitalized.
    pub fn label(&self) -> String {
        let name = if self.user_id == ANONYMOUS_USER_ID {
            "Anonymous"
        } else {
            self.user_id.as_str()
        };
        format!("{} ({})", name, self.count)
    }
}

/// Builds the legend in first-seen order, assigning colors as needed.
pub fn compute_legend(tags: &[ClientTag], colors: &mut UserColors) -> Vec<LegendEntry> {
    let mut legend: Vec<LegendEntry> = Vec::new();

    for tag in tags {
        match legend.iter_mut().find(|entry| entry.user_id == tag.user_id) {
            Some(entry) => entry.count += 1,
            None => legend.push(LegendEntry {
                user_id: tag.user_id.clone(),
                count: 1,
                color: colors.color_for(&tag.user_id),
            }),
        }
    }

    legend
}

/// Everything the map client knows.
///
/// `K` is the marker handle type of the map surface in use.
#[derive(Debug)]
pub struct ClientState<K> {
    /// This client's sanitized user id
    pub user_id: String,
    /// Authoritative local list, replaced on each successful poll
    pub tags: Vec<ClientTag>,
    pub colors: UserColors,
    /// One handle per rendered tag marker
    pub markers: Vec<K>,
    pub legend: Vec<LegendEntry>,
    /// Last known device position
    pub position: Option<Position>,
    pub load_state: LoadState,
    pub map_ready: bool,
    pub notices: Notices,
}

impl<K> ClientState<K> {
    pub fn new(user_id: &str) -> Self {
        Self {
            user_id: crate::tag::sanitize_user_id_str(user_id),
            tags: Vec::new(),
            colors: UserColors::new(),
            markers: Vec::new(),
            legend: Vec::new(),
            position: None,
            load_state: LoadState::Idle,
            map_ready: false,
            notices: Notices::new(),
        }
    }

    /// Replaces the tag list wholesale and forgets color assignments.
    pub fn replace_tags(&mut self, tags: Vec<ClientTag>) {
        self.tags = tags;
        self.colors.reset();
    }
}
