use crate::candidates::{add_candidate, admin_page, break_page, tally_page, update_votes};
use crate::config::AppConfig;
use crate::db::connection::DbPool;
use crate::error::{TallyError, handle_panic};
use crate::sse::{SseSender, tally_sse};
use crate::views::Views;
use axum::{
    Router,
    extract::{DefaultBodyLimit, Extension},
    handler::HandlerWithoutStateExt,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, services::ServeDir, trace::TraceLayer};

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub views: Views,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(db: DbPool, config: AppConfig) -> Result<Self, TallyError> {
        Ok(AppState {
            db,
            views: Views::new()?,
            config: Arc::new(config),
        })
    }
}

pub fn build_router(app_state: AppState, sse_tx: SseSender) -> Router {
    // Uploaded photos live under the public dir, so they are served from here too.
    let static_files =
        ServeDir::new(&app_state.config.public_dir).not_found_service(handler_404.into_service());
    let body_limit = app_state.config.upload_max_bytes;

    Router::new()
        .route("/", get(tally_page))
        .route("/break", get(break_page))
        .route("/admin", get(admin_page))
        .route("/add-candidate", post(add_candidate))
        .route("/update", post(update_votes))
        .route("/events", get(tally_sse))
        .fallback_service(static_files)
        .layer(
            ServiceBuilder::new()
                .layer(CatchPanicLayer::custom(handle_panic))
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(body_limit))
                .layer(Extension(app_state))
                .layer(Extension(sse_tx)),
        )
}

async fn handler_404() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "nothing to see here")
}
