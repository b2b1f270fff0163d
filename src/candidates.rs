use crate::db::{self, Candidate, NewCandidate};
use crate::error::TallyError;
use crate::sse::{SseEvent, SseSender};
use crate::startup::AppState;
use crate::tally::TallySummary;
use crate::uploads;
use crate::views;
use axum::{
    body::Bytes,
    extract::{Extension, Form, Multipart},
    response::{Html, Redirect},
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct UpdateVotesRequest {
    pub id: i64,
    pub votes: i64,
}

/// Current rows plus the totals derived from them.
pub async fn load_tally(
    app_state: &AppState,
) -> Result<(Vec<Candidate>, TallySummary), TallyError> {
    let candidates = db::get_all_candidates(&app_state.db).await?;
    let summary = TallySummary::from_candidates(&candidates, app_state.config.total_max);
    Ok((candidates, summary))
}

async fn render_page(app_state: &AppState, template: &str) -> Result<Html<String>, TallyError> {
    let (candidates, summary) = load_tally(app_state).await?;
    app_state.views.render_tally(template, &candidates, &summary)
}

/// Public tally board
pub async fn tally_page(
    Extension(app_state): Extension<AppState>,
) -> Result<Html<String>, TallyError> {
    render_page(&app_state, views::INDEX).await
}

/// Intermission screen, same data as the board
pub async fn break_page(
    Extension(app_state): Extension<AppState>,
) -> Result<Html<String>, TallyError> {
    render_page(&app_state, views::BREAK).await
}

pub async fn admin_page(
    Extension(app_state): Extension<AppState>,
) -> Result<Html<String>, TallyError> {
    render_page(&app_state, views::ADMIN).await
}

/// Create a candidate from the admin form (`name`, optional `partner`, optional `photo` file)
pub async fn add_candidate(
    Extension(app_state): Extension<AppState>,
    Extension(sse_tx): Extension<SseSender>,
    mut multipart: Multipart,
) -> Result<Redirect, TallyError> {
    let mut name: Option<String> = None;
    let mut partner: Option<String> = None;
    let mut photo_upload: Option<(String, Bytes)> = None;

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().map(str::to_owned);
        match field_name.as_deref() {
            Some("name") => name = Some(field.text().await?),
            Some("partner") => partner = Some(field.text().await?),
            Some("photo") => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                // Browsers send an empty part when no file was chosen.
                if !file_name.is_empty() && !bytes.is_empty() {
                    photo_upload = Some((file_name, bytes));
                }
            }
            _ => {}
        }
    }

    let name = name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| TallyError::InvalidRequest("Candidate name is required".to_string()))?;
    let partner = partner
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty());

    let photo = match photo_upload {
        Some((file_name, bytes)) => {
            Some(uploads::save_photo(&app_state.config.uploads_dir(), &file_name, &bytes).await?)
        }
        None => None,
    };

    let candidate_id = db::create_candidate(
        &app_state.db,
        &NewCandidate {
            name,
            partner,
            photo,
        },
    )
    .await?;

    info!("created candidate {}", candidate_id);
    let _ = sse_tx.send(SseEvent::CandidateCreated(candidate_id));

    Ok(Redirect::to("/admin"))
}

/// Overwrite one candidate's vote count
pub async fn update_votes(
    Extension(app_state): Extension<AppState>,
    Extension(sse_tx): Extension<SseSender>,
    Form(payload): Form<UpdateVotesRequest>,
) -> Result<Redirect, TallyError> {
    let updated = db::set_votes(&app_state.db, payload.id, payload.votes).await?;

    if updated == 0 {
        warn!("vote update for unknown candidate {}", payload.id);
    } else {
        info!("candidate {} now has {} votes", payload.id, payload.votes);
        let _ = sse_tx.send(SseEvent::VotesUpdated {
            candidate_id: payload.id,
            votes: payload.votes,
        });
    }

    Ok(Redirect::to("/admin"))
}
