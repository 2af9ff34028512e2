pub mod handlers;
mod prompt;
pub mod types;

pub use prompt::DEFAULT_PROMPT;

use crate::{Result, config::Config, llm::OpenAiVisionClient};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

pub fn router(state: handlers::AppState, body_limit_bytes: usize) -> Router {
    Router::new()
        .route("/", get(handlers::health))
        .route("/vision", post(handlers::vision))
        .layer(DefaultBodyLimit::max(body_limit_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    let client = OpenAiVisionClient::new(config.upstream.clone());
    let app_state = handlers::AppState::new(Arc::new(client), &config);

    let app = router(app_state, config.server.body_limit_bytes);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!(
        "Vision proxy live on {} (model {})",
        addr, config.upstream.model
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
