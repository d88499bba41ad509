//! `GET /api/events`: state changes pushed to the open page.
//!
//! Each `AppEvent` goes out as a named SSE event (`event: document_loaded`,
//! `event: analysis_complete`, ...) whose data is the event as JSON.

use std::convert::Infallible;
use std::time::Duration;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures_core::Stream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;
use tracing::{debug, warn};

use crate::state::{AppEvent, SharedState};

const KEEP_ALIVE: Duration = Duration::from_secs(15);

pub async fn sse_handler(
    State(state): State<SharedState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    debug!("SSE subscriber connected");
    let stream = BroadcastStream::new(state.subscribe())
        .filter_map(|received| match received {
            Ok(event) => to_sse_event(&event).map(Ok),
            Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                warn!(skipped, "SSE subscriber lagged, events dropped");
                None
            }
        });

    Sse::new(stream).keep_alive(KeepAlive::new().interval(KEEP_ALIVE).text("ping"))
}

fn to_sse_event(event: &AppEvent) -> Option<Event> {
    match serde_json::to_string(event) {
        Ok(data) => Some(Event::default().event(event.kind()).data(data)),
        Err(e) => {
            warn!("Failed to serialize {} event: {}", event.kind(), e);
            None
        }
    }
}
