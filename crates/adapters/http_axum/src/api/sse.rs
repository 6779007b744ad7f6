//! Server-Sent Events (SSE) stream for real-time updates.

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;

use scenepad_app::ports::ActionNotifier;

use crate::state::AppState;

/// `GET /api/events/stream`: SSE stream of domain events.
///
/// Every event is sent as a JSON `data:` frame whose SSE event name is the
/// event's `type` (`light_changed`, `gesture_detected`, …). The stream
/// continues until the client disconnects.
pub async fn stream<N>(
    State(state): State<AppState<N>>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, std::convert::Infallible>>>
where
    N: ActionNotifier + Send + Sync + 'static,
{
    let event_rx = state.event_bus.subscribe();
    let event_stream = BroadcastStream::new(event_rx).filter_map(|result| match result {
        Ok(event) => match to_sse(&event) {
            Ok(sse) => Some(Ok(sse)),
            Err(err) => {
                tracing::warn!(%err, "failed to serialize event to JSON for SSE stream");
                None
            }
        },
        Err(BroadcastStreamRecvError::Lagged(skipped)) => {
            tracing::warn!(skipped, "SSE subscriber lagged, some events were dropped");
            None
        }
    });

    Sse::new(event_stream).keep_alive(KeepAlive::default())
}

fn to_sse(event: &scenepad_domain::event::Event) -> Result<Event, serde_json::Error> {
    let value = serde_json::to_value(event)?;
    let name = value
        .get("type")
        .and_then(serde_json::Value::as_str)
        .unwrap_or("event")
        .to_string();
    Ok(Event::default().event(name).data(value.to_string()))
}
