use axum::{routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub alive: bool,
}

/// GET /health
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { alive: true })
}

pub fn router<S: Clone + Send + Sync + 'static>() -> Router<S> {
    Router::new().route("/health", get(health_check))
}
