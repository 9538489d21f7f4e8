//! Recording fakes for the map client's collaborators.

#![allow(dead_code)]

use geotag::client::surface::{LegendItem, TagListItem, TagMarker};
use geotag::client::{ClientView, MapSurface, NoticeKind, Position};

/// Map surface that remembers what is currently drawn.
#[derive(Debug, Default)]
pub struct RecordingMap {
    next_id: usize,
    /// Markers currently on the map, by handle
    pub live: Vec<(usize, TagMarker)>,
    pub user_marker: Option<Position>,
    pub flights: Vec<(Position, f64)>,
}

impl RecordingMap {
    pub fn live_texts(&self) -> Vec<String> {
        self.live.iter().map(|(_, m)| m.text.clone()).collect()
    }
}

impl MapSurface for RecordingMap {
    type Marker = usize;

    fn add_tag_marker(&mut self, marker: &TagMarker) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        self.live.push((id, marker.clone()));
        id
    }

    fn remove_marker(&mut self, marker: usize) {
        self.live.retain(|(id, _)| *id != marker);
    }

    fn place_user_marker(&mut self, position: Position) {
        self.user_marker = Some(position);
    }

    fn fly_to(&mut self, center: Position, zoom: f64) {
        self.flights.push((center, zoom));
    }
}

/// View that keeps the latest content of every panel.
#[derive(Debug, Default)]
pub struct RecordingView {
    pub location: Option<String>,
    pub count_label: Option<String>,
    pub list: Vec<TagListItem>,
    pub legend: Vec<LegendItem>,
    pub loading: bool,
    pub no_tags_visible: bool,
    pub shown: Vec<(NoticeKind, String)>,
    pub hidden: Vec<NoticeKind>,
}

impl RecordingView {
    pub fn last_notice(&self, kind: NoticeKind) -> Option<&str> {
        self.shown
            .iter()
            .rev()
            .find(|(k, _)| *k == kind)
            .map(|(_, message)| message.as_str())
    }
}

impl ClientView for RecordingView {
    fn set_location_text(&mut self, text: &str) {
        self.location = Some(text.to_string());
    }

    fn set_count_label(&mut self, text: &str) {
        self.count_label = Some(text.to_string());
    }

    fn render_tag_list(&mut self, items: &[TagListItem]) {
        self.list = items.to_vec();
    }

    fn render_legend(&mut self, items: &[LegendItem]) {
        self.legend = items.to_vec();
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    fn set_no_tags_visible(&mut self, visible: bool) {
        self.no_tags_visible = visible;
    }

    fn show_notice(&mut self, kind: NoticeKind, message: &str) {
        self.shown.push((kind, message.to_string()));
    }

    fn hide_notice(&mut self, kind: NoticeKind) {
        self.hidden.push(kind);
    }
}
