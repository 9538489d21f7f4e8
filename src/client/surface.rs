//! Rendering collaborators.
//!
//! The map client never draws anything itself. Markers and the camera go
//! through a [`MapSurface`]; lists, labels and banners go through a
//! [`ClientView`]. A browser build would back these with the map library and
//! the DOM; the headless binary backs them with log output.

use super::geo::Position;
use super::notice::NoticeKind;

/// Zoom level used when centering on a tag or a fresh map.
pub const DEFAULT_ZOOM: f64 = 15.0;

/// Everything a surface needs to draw one tag marker.
#[derive(Debug, Clone, PartialEq)]
pub struct TagMarker {
    pub position: Position,
    pub text: String,
    pub color: &'static str,
}

/// One row of the tag list panel.
#[derive(Debug, Clone, PartialEq)]
pub struct TagListItem {
    pub text: String,
    pub color: &'static str,
    /// Coordinates as displayed, three decimals each
    pub coordinates: String,
}

/// One row of the legend panel.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendItem {
    pub color: &'static str,
    /// `"{label} ({count})"`
    pub label: String,
}

/// Map library operations used by the client.
pub trait MapSurface {
    /// Handle to a placed tag marker.
    type Marker;

    fn add_tag_marker(&mut self, marker: &TagMarker) -> Self::Marker;
    fn remove_marker(&mut self, marker: Self::Marker);
    /// Places the device marker, or moves it if already placed.
    fn place_user_marker(&mut self, position: Position);
    fn fly_to(&mut self, center: Position, zoom: f64);
}

/// Panel and banner operations used by the client.
pub trait ClientView {
    fn set_location_text(&mut self, text: &str);
    fn set_count_label(&mut self, text: &str);
    fn render_tag_list(&mut self, items: &[TagListItem]);
    /// An empty slice means "No users yet".
    fn render_legend(&mut self, items: &[LegendItem]);
    fn set_loading(&mut self, loading: bool);
    fn set_no_tags_visible(&mut self, visible: bool);
    fn show_notice(&mut self, kind: NoticeKind, message: &str);
    fn hide_notice(&mut self, kind: NoticeKind);
}

/// `"Your position: 51.50000, -0.12000"`
pub fn location_text(position: Position) -> String {
    format!(
        "Your position: {:.5}, {:.5}",
        position.latitude, position.longitude
    )
}

/// `"No text tags yet"`, `"1 total tag"`, `"N total tags"`
pub fn count_label(count: usize) -> String {
    match count {
        0 => "No text tags yet".to_string(),
        1 => "1 total tag".to_string(),
        n => format!("{} total tags", n),
    }
}

/// Coordinates as shown in the tag list.
pub fn list_coordinates(position: Position) -> String {
    format!("{:.3}, {:.3}", position.latitude, position.longitude)
}
