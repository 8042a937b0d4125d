use axum::{
    http::{HeaderName, HeaderValue},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer};

pub mod handlers;
pub mod state;

pub use state::AppState;

/// Response header that stops ngrok's interstitial page from replacing JSON replies.
pub const NGROK_SKIP_WARNING: &str = "ngrok-skip-browser-warning";

pub async fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/generate-news", post(handlers::generate_news))
        .route("/health", get(handlers::health_check))
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static(NGROK_SKIP_WARNING),
            HeaderValue::from_static("true"),
        ))
        .with_state(Arc::new(state))
}

pub mod prelude {
    pub use crate::AppState;
    pub use dn_core::{Article, Error, PipelineResult, Result};
}
