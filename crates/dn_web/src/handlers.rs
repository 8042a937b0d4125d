use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use dn_core::PipelineResult;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct TopicInput {
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub message: &'static str,
}

pub async fn generate_news(
    State(state): State<Arc<AppState>>,
    Json(input): Json<TopicInput>,
) -> Json<PipelineResult> {
    info!("📨 /generate-news for \"{}\"", input.prompt);
    Json(state.pipeline.run(&input.prompt).await)
}

pub async fn health_check() -> impl IntoResponse {
    Json(Health {
        status: "healthy",
        message: "DevNewsCopilot backend is running",
    })
}
