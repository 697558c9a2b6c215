//! HTTP surfaces for abv: the JSON inventory API and the front-end page
//! that displays it.

pub mod error;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use error::{ApiError, ApiResult};
pub use state::{ApiState, WebState};

/// Inventory API router. Any origin may call it.
pub fn api_router(state: ApiState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::inventory::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Front-end router: the rendered front page plus static and image files.
pub fn web_router(state: WebState) -> Router {
    routes::frontend::router(&state)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `host:port` and serve `app` until the process is stopped.
pub async fn serve(app: Router, host: &str, port: u16) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    tracing::info!("Starting server on {}", listener.local_addr()?);
    axum::serve(listener, app).await
}
