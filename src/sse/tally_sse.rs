use crate::candidates::load_tally;
use crate::sse::models::{SseEvent, SseSender};
use crate::startup::AppState;
use axum::{
    extract::Extension,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::Stream;
use serde_json::json;
use std::{convert::Infallible, time::Duration};
use tokio::sync::broadcast::error::RecvError;

/// Pushes the full tally once on connect (`init`) and again after every
/// candidate or vote change (`tally`).
pub async fn tally_sse(
    Extension(app_state): Extension<AppState>,
    Extension(sse_tx): Extension<SseSender>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let mut rx = sse_tx.subscribe();

    let stream = async_stream::stream! {
        yield Ok(tally_event(&app_state, "init").await);

        loop {
            match rx.recv().await {
                Ok(SseEvent::CandidateCreated(candidate_id)) => {
                    debug!("candidate {} created, pushing tally", candidate_id);
                    yield Ok(tally_event(&app_state, "tally").await);
                }
                Ok(SseEvent::VotesUpdated { candidate_id, votes }) => {
                    debug!("candidate {} set to {} votes, pushing tally", candidate_id, votes);
                    yield Ok(tally_event(&app_state, "tally").await);
                }
                // A fresh snapshot covers whatever was skipped.
                Err(RecvError::Lagged(skipped)) => {
                    warn!("tally stream lagged by {} events", skipped);
                    yield Ok(tally_event(&app_state, "tally").await);
                }
                Err(RecvError::Closed) => break,
            }
        }
    };

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(30))
            .text("keep-alive"),
    )
}

async fn tally_event(app_state: &AppState, name: &str) -> Event {
    match load_tally(app_state).await {
        Ok((candidates, summary)) => Event::default().event(name).data(
            json!({
                "candidates": candidates,
                "total_votes": summary.total_votes,
                "percent": summary.percent_label(),
            })
            .to_string(),
        ),
        Err(e) => {
            error!("failed to load tally for stream: {}", e);
            Event::default()
                .event("error")
                .data(json!({"error": "Failed to load tally"}).to_string())
        }
    }
}
