use crate::config::AppConfig;
use crate::sse::create_sse_broadcaster;
use crate::startup::{AppState, build_router};
use tracing_subscriber::EnvFilter;

#[macro_use]
extern crate tracing;

mod candidates;
mod config;
mod db;
mod error;
mod sse;
mod startup;
mod tally;
mod uploads;
mod views;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // initialize tracing, INFO unless RUST_LOG says otherwise
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().expect("Invalid configuration");

    let db = db::init_db(&config.database_url)
        .await
        .expect("Unable to open the candidates database");
    info!("database ready at {}", config.database_url);

    let addr = config.bind_addr();
    let total_max = config.total_max;
    let app_state = AppState::new(db, config).expect("Unable to load page templates");
    let app = build_router(app_state, create_sse_broadcaster());

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Unable to spawn tcp listener");

    info!("quick count running at http://{addr} (expected total {total_max})");
    axum::serve(listener, app).await.unwrap();
}
