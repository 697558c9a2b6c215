use axum::extract::State;
use axum::response::Html;
use axum::{routing::get, Router};
use tower_http::services::ServeDir;

use crate::state::WebState;

/// GET /
async fn front_page(State(state): State<WebState>) -> Html<String> {
    Html(state.render_front_page())
}

pub fn router(state: &WebState) -> Router<WebState> {
    Router::new()
        .route("/", get(front_page))
        .nest_service("/images", ServeDir::new(&state.images_dir))
        .nest_service("/static", ServeDir::new(&state.static_dir))
}
