//! Server-Sent Events (SSE) streaming for live demo and alert updates.

use axum::response::sse::{Event, KeepAlive, Sse};
use axum::extract::State;
use futures_core::Stream;
use std::convert::Infallible;
use std::time::Duration;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

use crate::state::SharedState;

/// SSE endpoint. Clients subscribe here for real-time updates.
///
/// The first message reports the monitoring status; every later one is an
/// `AgentEvent`, named by its `type`. Lagged messages are skipped.
pub async fn sse_handler(
    State(state): State<SharedState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.subscribe();
    let greeting = Event::default()
        .event("monitoring_status")
        .data(serde_json::json!({ "status": "monitoring", "viewOpen": state.view_open() }).to_string());

    let updates = BroadcastStream::new(rx)
        .filter_map(|result| {
            result.ok().and_then(|event| {
                serde_json::to_string(&event).ok().map(|data| {
                    Ok::<Event, Infallible>(Event::default().event(event.kind()).data(data))
                })
            })
        });

    Sse::new(tokio_stream::once(Ok::<Event, Infallible>(greeting)).chain(updates)).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}
