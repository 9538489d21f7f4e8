//! Event loop driving a [`MapClient`].
//!
//! The controller is owned by one loop and mutated one event at a time.
//! Network calls run as spawned tasks that post their results back as events,
//! so a poll and an upload can overlap freely: nothing waits for anything
//! else and nothing in flight is cancelled.

use super::api::TagBackend;
use super::controller::{Effect, GeoFailure, MapClient};
use super::geo::Position;
use super::notice::{NoticeKind, NOTICE_DURATION};
use super::surface::{ClientView, MapSurface};
use crate::error::GeotagError;
use crate::wire::CreateTagResponse;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Interval between full tag list refreshes.
pub const POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Inputs to the client event loop.
#[derive(Debug)]
pub enum ClientEvent {
    /// Time to refresh the tag list
    PollTick,
    /// New device position
    Position(Position),
    /// No device position can be obtained
    PositionUnavailable(GeoFailure),
    /// The map finished loading around a center
    MapLoaded(Position),
    /// The user asked to add a tag with this text
    Submit(String),
    /// The user picked a tag from the list
    FocusTag(usize),
    TagsFetched(Result<Value, GeotagError>),
    UploadFinished(Result<CreateTagResponse, GeotagError>),
    DismissNotice(NoticeKind),
    Shutdown,
}

pub type EventSender = UnboundedSender<ClientEvent>;
pub type EventReceiver = UnboundedReceiver<ClientEvent>;

/// Creates the event channel for [`run`].
pub fn event_channel() -> (EventSender, EventReceiver) {
    tokio::sync::mpsc::unbounded_channel()
}

/// Sends a poll tick immediately and then once per `interval`.
///
/// A tick is sent even if the previous poll has not answered yet. The task
/// ends when the event loop goes away.
pub fn spawn_poller(interval: Duration, events: EventSender) -> JoinHandle<()> {
    info!("Polling tags every {}s", interval.as_secs());

    tokio::spawn(async move {
        let mut timer = tokio::time::interval(interval);
        loop {
            timer.tick().await;
            if events.send(ClientEvent::PollTick).is_err() {
                debug!("Event loop closed, stopping poller");
                break;
            }
        }
    })
}

/// Runs the client until a [`ClientEvent::Shutdown`] arrives or every
/// sender is gone.
pub async fn run<M, V, B>(
    client: &mut MapClient<M, V>,
    backend: Arc<B>,
    events: EventSender,
    mut inbox: EventReceiver,
) where
    M: MapSurface,
    V: ClientView,
    B: TagBackend,
{
    while let Some(event) = inbox.recv().await {
        let now = chrono::Utc::now().timestamp_millis();

        match event {
            ClientEvent::PollTick => client.begin_poll(),
            ClientEvent::Position(position) => client.update_position(position),
            ClientEvent::PositionUnavailable(failure) => client.position_unavailable(failure),
            ClientEvent::MapLoaded(center) => client.map_loaded(center),
            ClientEvent::Submit(text) => {
                if let Err(rejection) = client.submit_text(&text, now) {
                    debug!("Submission rejected: {}", rejection);
                }
            }
            ClientEvent::FocusTag(index) => client.focus_tag(index),
            ClientEvent::TagsFetched(result) => client.apply_poll(result, now),
            ClientEvent::UploadFinished(result) => client.apply_upload(result),
            ClientEvent::DismissNotice(kind) => client.dismiss_notice(kind),
            ClientEvent::Shutdown => {
                info!("Client shutting down");
                break;
            }
        }

        for effect in client.take_effects() {
            dispatch(effect, &backend, &events);
        }
    }
}

/// Starts the task for one effect. Results come back through `events`.
fn dispatch<B: TagBackend>(effect: Effect, backend: &Arc<B>, events: &EventSender) {
    let events = events.clone();

    match effect {
        Effect::FetchTags => {
            let backend = Arc::clone(backend);
            tokio::spawn(async move {
                let result = backend.fetch_tags().await;
                let _ = events.send(ClientEvent::TagsFetched(result));
            });
        }
        Effect::Upload(payload) => {
            let backend = Arc::clone(backend);
            tokio::spawn(async move {
                let result = backend.upload_tag(&payload).await;
                let _ = events.send(ClientEvent::UploadFinished(result));
            });
        }
        Effect::ScheduleDismiss(kind) => {
            tokio::spawn(async move {
                tokio::time::sleep(NOTICE_DURATION).await;
                let _ = events.send(ClientEvent::DismissNotice(kind));
            });
        }
    }
}
