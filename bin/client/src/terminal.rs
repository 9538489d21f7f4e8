//! Map surface and panels rendered as log output.

use geotag::client::surface::{LegendItem, TagListItem, TagMarker};
use geotag::client::{ClientView, MapSurface, NoticeKind, Position};
use tracing::{debug, info, warn};

/// Marker ids are handed out in placement order and never reused.
#[derive(Debug, Default)]
pub struct TerminalMap {
    next_marker: u64,
    live_markers: usize,
    user_marker: Option<Position>,
}

impl TerminalMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_markers(&self) -> usize {
        self.live_markers
    }
}

impl MapSurface for TerminalMap {
    type Marker = u64;

    fn add_tag_marker(&mut self, marker: &TagMarker) -> u64 {
        let id = self.next_marker;
        self.next_marker += 1;
        self.live_markers += 1;
        debug!(
            "marker #{} at {:.5}, {:.5} [{}] {}",
            id, marker.position.latitude, marker.position.longitude, marker.color, marker.text
        );
        id
    }

    fn remove_marker(&mut self, marker: u64) {
        self.live_markers = self.live_markers.saturating_sub(1);
        debug!("removed marker #{}", marker);
    }

    fn place_user_marker(&mut self, position: Position) {
        let verb = if self.user_marker.is_some() { "moved" } else { "placed" };
        self.user_marker = Some(position);
        debug!(
            "user marker {} at {:.5}, {:.5}",
            verb, position.latitude, position.longitude
        );
    }

    fn fly_to(&mut self, center: Position, zoom: f64) {
        info!(
            "Map centered on {:.5}, {:.5} (zoom {})",
            center.latitude, center.longitude, zoom
        );
    }
}

/// Panels that log only when their content changes.
#[derive(Debug, Default)]
pub struct TerminalView {
    count_label: String,
    legend: Vec<LegendItem>,
    loading: bool,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClientView for TerminalView {
    fn set_location_text(&mut self, text: &str) {
        info!("{}", text);
    }

    fn set_count_label(&mut self, text: &str) {
        if self.count_label != text {
            self.count_label = text.to_string();
            info!("{}", text);
        }
    }

    fn render_tag_list(&mut self, items: &[TagListItem]) {
        for (index, item) in items.iter().enumerate() {
            info!("  {:>3}. [{}] {} ({})", index, item.color, item.text, item.coordinates);
        }
    }

    fn render_legend(&mut self, items: &[LegendItem]) {
        if self.legend == items {
            return;
        }
        self.legend = items.to_vec();

        if items.is_empty() {
            info!("Legend: No users yet");
            return;
        }
        let entries: Vec<String> = items
            .iter()
            .map(|item| format!("[{}] {}", item.color, item.label))
            .collect();
        info!("Legend: {}", entries.join(", "));
    }

    fn set_loading(&mut self, loading: bool) {
        if loading && !self.loading {
            debug!("Loading tags...");
        }
        self.loading = loading;
    }

    fn set_no_tags_visible(&mut self, visible: bool) {
        if visible {
            info!("No tags yet. Be the first to add one!");
        }
    }

    fn show_notice(&mut self, kind: NoticeKind, message: &str) {
        match kind {
            NoticeKind::Success => info!("{}", message),
            NoticeKind::Error => warn!("{}", message),
        }
    }

    fn hide_notice(&mut self, kind: NoticeKind) {
        debug!("{:?} notice dismissed", kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_ids_are_unique() {
        let mut map = TerminalMap::new();
        let marker = TagMarker {
            position: Position::new(1.0, 2.0),
            text: "hi".to_string(),
            color: "#FF6B6B",
        };

        let first = map.add_tag_marker(&marker);
        let second = map.add_tag_marker(&marker);
        assert_ne!(first, second);
        assert_eq!(map.live_markers(), 2);

        map.remove_marker(first);
        map.remove_marker(second);
        assert_eq!(map.live_markers(), 0);
        assert_eq!(map.add_tag_marker(&marker), 2);
    }

    #[test]
    fn test_view_tracks_legend() {
        let mut view = TerminalView::new();
        let legend = vec![LegendItem {
            color: "#FF6B6B",
            label: "Anonymous (1)".to_string(),
        }];
        view.render_legend(&legend);
        assert_eq!(view.legend, legend);

        view.render_legend(&[]);
        assert!(view.legend.is_empty());
    }
}
