//! Server-sent revalidation events.

use std::convert::Infallible;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::{self, Stream};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

use storeit_core::events::DomainEvent;

use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/events
///
/// Streams every event whose audience contains the caller. Each SSE
/// message is named `revalidate` and carries the [`DomainEvent`] as JSON.
pub async fn events(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let user_id = auth.user_id().to_string();
    let email = auth.email().to_string();
    let rx = state.events.subscribe();
    debug!(user_id = %user_id, "Event stream opened");

    let stream = stream::unfold(rx, move |mut rx| {
        let user_id = user_id.clone();
        let email = email.clone();
        async move {
            loop {
                match rx.recv().await {
                    Ok(event) if event.is_visible_to(&user_id, &email) => {
                        return Some((Ok::<Event, Infallible>(to_sse(&event)), rx));
                    }
                    Ok(_) => continue,
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(user_id = %user_id, skipped, "Event stream lagged");
                        continue;
                    }
                    Err(RecvError::Closed) => return None,
                }
            }
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

fn to_sse(event: &DomainEvent) -> Event {
    let sse = Event::default()
        .event("revalidate")
        .id(event.id.to_string());
    match serde_json::to_string(event) {
        Ok(json) => sse.data(json),
        Err(e) => {
            warn!(event_id = %event.id, error = %e, "Failed to encode event");
            sse.data(event.id.to_string())
        }
    }
}
