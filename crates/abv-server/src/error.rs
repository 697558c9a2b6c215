use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use abv_core::AbvError;

/// Error type for HTTP handlers.
///
/// Renders as a JSON body of the form `{"error": ..., "code": ...}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] AbvError),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::Core(core) => match core {
                AbvError::InvalidSortField(_) => {
                    (StatusCode::BAD_REQUEST, "INVALID_SORT_FIELD", core.to_string())
                }
                AbvError::DrinkNotFound(_) | AbvError::MovementNotFound(..) => {
                    (StatusCode::NOT_FOUND, "NOT_FOUND", core.to_string())
                }
                other => {
                    tracing::error!(error = %other, "inventory request failed");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
