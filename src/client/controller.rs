//! The map client controller.
//!
//! [`MapClient`] owns the [`ClientState`] and both rendering collaborators.
//! Every method runs to completion synchronously; work that needs the network
//! or a timer is queued as an [`Effect`] for the runtime to carry out, and the
//! outcome comes back through another method call.

use super::geo::{find_nearby, Position};
use super::notice::NoticeKind;
use super::state::{compute_legend, tags_from_response, ClientState, ClientTag, LoadState};
use super::surface::{
    count_label, list_coordinates, location_text, ClientView, LegendItem, MapSurface, TagListItem,
    TagMarker, DEFAULT_ZOOM,
};
use crate::error::GeotagError;
use crate::wire::{CreateTagResponse, NewTagPayload};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Work requested by the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch the full tag list
    FetchTags,
    /// Persist a locally added tag
    Upload(NewTagPayload),
    /// Hide a banner once its display time has passed
    ScheduleDismiss(NoticeKind),
}

/// Why a local submission was refused before reaching the network.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejection {
    #[error("Wait for location.")]
    NoPosition,
    #[error("Enter text.")]
    EmptyText,
}

/// Why no device position is available.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GeoFailure {
    #[error("Location access denied.")]
    Denied,
    #[error("Geolocation unsupported.")]
    Unsupported,
}

const FAILED_TO_LOAD: &str = "Failed to load tags";
const FAILED_TO_SAVE: &str = "Failed to save tag";

/// Controller tying the tag list to the map and panels.
pub struct MapClient<M: MapSurface, V: ClientView> {
    state: ClientState<M::Marker>,
    map: M,
    view: V,
    effects: Vec<Effect>,
}

impl<M: MapSurface, V: ClientView> MapClient<M, V> {
    pub fn new(user_id: &str, map: M, view: V) -> Self {
        Self {
            state: ClientState::new(user_id),
            map,
            view,
            effects: Vec::new(),
        }
    }

    pub fn state(&self) -> &ClientState<M::Marker> {
        &self.state
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Drains the queued effects.
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    // ------------------------------------------------------------------
    // Polling
    // ------------------------------------------------------------------

    /// Starts a poll. A poll already in flight is left alone.
    pub fn begin_poll(&mut self) {
        if self.state.load_state == LoadState::Loading {
            debug!("begin_poll: previous poll still in flight");
        }
        self.state.load_state = LoadState::Loading;
        self.view.set_loading(true);
        self.view.set_no_tags_visible(false);
        self.effects.push(Effect::FetchTags);
    }

    /// Applies the outcome of a poll.
    ///
    /// On success the local list is replaced wholesale, which also discards
    /// optimistic entries the server has not returned yet.
    pub fn apply_poll(&mut self, result: Result<Value, GeotagError>, now: i64) {
        match result {
            Ok(body) => {
                let tags = tags_from_response(&body, now);
                debug!(tags = tags.len(), "apply_poll: replacing tag list");
                self.state.replace_tags(tags);
                self.state.load_state = LoadState::Idle;
                self.update_count();
                self.render_tags();
                self.update_legend();
            }
            Err(e) => {
                warn!("Failed to load tags: {}", e);
                self.state.load_state = LoadState::Error;
                self.notify(NoticeKind::Error, FAILED_TO_LOAD);
            }
        }

        self.view.set_loading(false);
        if self.state.tags.is_empty() {
            self.view.set_no_tags_visible(true);
        }
        self.update_legend();
    }

    // ------------------------------------------------------------------
    // Submission
    // ------------------------------------------------------------------

    /// Adds a tag at the current position.
    ///
    /// The tag is shown immediately and an upload is queued. Neither a failed
    /// upload nor a differing server timestamp changes the local copy.
    pub fn submit_text(&mut self, text: &str, now: i64) -> Result<(), SubmitRejection> {
        let position = match self.state.position {
            Some(position) => position,
            None => return Err(self.reject(SubmitRejection::NoPosition)),
        };
        if text.trim().is_empty() {
            return Err(self.reject(SubmitRejection::EmptyText));
        }

        let tag = ClientTag {
            latitude: position.latitude,
            longitude: position.longitude,
            text: text.trim().to_string(),
            timestamp: now,
            user_id: self.state.user_id.clone(),
        };
        let payload = NewTagPayload {
            lat: tag.latitude,
            lng: tag.longitude,
            text: tag.text.clone(),
            user_id: tag.user_id.clone(),
        };

        self.state.tags.push(tag);
        self.update_count();
        self.render_tags();
        self.update_legend();
        self.notify(NoticeKind::Success, "Tag added!");

        info!("Queued upload of tag at {:.5}, {:.5}", payload.lat, payload.lng);
        self.effects.push(Effect::Upload(payload));
        Ok(())
    }

    fn reject(&mut self, rejection: SubmitRejection) -> SubmitRejection {
        self.notify(NoticeKind::Error, &rejection.to_string());
        rejection
    }

    /// Applies the outcome of an upload.
    pub fn apply_upload(&mut self, result: Result<CreateTagResponse, GeotagError>) {
        match result {
            Ok(response) if response.success => {
                self.notify(NoticeKind::Success, "Tag saved!");
            }
            Ok(_) => {
                warn!("Tag service did not confirm the upload");
                self.notify(NoticeKind::Error, FAILED_TO_SAVE);
            }
            Err(e) => {
                warn!("Failed to save tag: {}", e);
                self.notify(NoticeKind::Error, FAILED_TO_SAVE);
            }
        }
    }

    // ------------------------------------------------------------------
    // Position and map
    // ------------------------------------------------------------------

    /// Records a new device position. The first fix also brings up the map
    /// centered on it.
    pub fn update_position(&mut self, position: Position) {
        self.state.position = Some(position);
        self.view.set_location_text(&location_text(position));

        if !self.state.map_ready {
            self.map_loaded(position);
        } else {
            self.map.place_user_marker(position);
        }
    }

    /// No position can be obtained. The map comes up at (0, 0) and
    /// submission stays blocked until a later fix arrives.
    pub fn position_unavailable(&mut self, failure: GeoFailure) {
        warn!("{}", failure);
        self.notify(NoticeKind::Error, &failure.to_string());
        if !self.state.map_ready {
            self.map_loaded(Position::origin());
        }
    }

    /// The map finished loading around `center`.
    pub fn map_loaded(&mut self, center: Position) {
        self.map.fly_to(center, DEFAULT_ZOOM);
        self.state.map_ready = true;
        self.map.place_user_marker(center);
        self.render_tags();
    }

    /// Centers the camera on the tag at `index` in the list.
    pub fn focus_tag(&mut self, index: usize) {
        if !self.state.map_ready {
            return;
        }
        if let Some(tag) = self.state.tags.get(index) {
            self.map.fly_to(tag.position(), DEFAULT_ZOOM);
        }
    }

    /// First tag in list order within 200 m of the current position.
    pub fn find_nearby_thread(&self) -> Option<&ClientTag> {
        let position = self.state.position?;
        find_nearby(position, &self.state.tags)
    }

    // ------------------------------------------------------------------
    // Banners
    // ------------------------------------------------------------------

    pub fn dismiss_notice(&mut self, kind: NoticeKind) {
        self.state.notices.dismiss(kind);
        self.view.hide_notice(kind);
    }

    fn notify(&mut self, kind: NoticeKind, message: &str) {
        self.state.notices.show(kind, message);
        self.view.show_notice(kind, message);
        self.effects.push(Effect::ScheduleDismiss(kind));
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    fn update_count(&mut self) {
        self.view.set_count_label(&count_label(self.state.tags.len()));
    }

    /// Rebuilds the tag list panel and every tag marker.
    fn render_tags(&mut self) {
        for marker in self.state.markers.drain(..) {
            self.map.remove_marker(marker);
        }

        if self.state.tags.is_empty() {
            self.view.render_tag_list(&[]);
            self.view.set_no_tags_visible(true);
            return;
        }
        self.view.set_no_tags_visible(false);

        let mut items = Vec::with_capacity(self.state.tags.len());
        for tag in &self.state.tags {
            let color = self.state.colors.color_for(&tag.user_id);
            items.push(TagListItem {
                text: tag.text.clone(),
                color,
                coordinates: list_coordinates(tag.position()),
            });

            if self.state.map_ready {
                let marker = self.map.add_tag_marker(&TagMarker {
                    position: tag.position(),
                    text: tag.text.clone(),
                    color,
                });
                self.state.markers.push(marker);
            }
        }

        self.view.render_tag_list(&items);
    }

    fn update_legend(&mut self) {
        self.state.legend = compute_legend(&self.state.tags, &mut self.state.colors);
        let items: Vec<LegendItem> = self
            .state
            .legend
            .iter()
            .map(|entry| LegendItem {
                color: entry.color,
                label: entry.label(),
            })
            .collect();
        self.view.render_legend(&items);
    }
}
