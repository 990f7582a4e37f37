//! HTTP mapping for `ApiError`

use std::sync::atomic::{AtomicBool, Ordering};

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::application::error::ApiError;

/// Debug detail on 500 bodies is off until the startup code opts in.
static EXPOSE_ERROR_DETAIL: AtomicBool = AtomicBool::new(false);

/// Set once at startup from [`AppConfig`](crate::infrastructure::config::AppConfig);
/// only a development deployment should enable it.
pub fn expose_error_detail(enabled: bool) {
    EXPOSE_ERROR_DETAIL.store(enabled, Ordering::Relaxed);
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(message) | ApiError::BadReference(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(json!({ "message": message }))).into_response()
            }
            ApiError::Conflict(message) => {
                (StatusCode::CONFLICT, Json(json!({ "error": message }))).into_response()
            }
            ApiError::DeleteBlocked {
                message,
                characters_count,
            } => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": message, "charactersCount": characters_count })),
            )
                .into_response(),
            ApiError::Internal(e) => {
                tracing::error!("Internal error: {e:#}");
                let body = if EXPOSE_ERROR_DETAIL.load(Ordering::Relaxed) {
                    json!({ "error": "Internal server error", "detail": format!("{e:#}") })
                } else {
                    json!({ "error": "Internal server error" })
                };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    // Single test so toggling the flag cannot race a parallel reader.
    #[tokio::test]
    async fn test_internal_detail_gated_by_startup_flag() {
        let response = ApiError::Internal(anyhow!("pool exhausted")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Internal server error");
        assert!(body.get("detail").is_none());

        expose_error_detail(true);
        let response = ApiError::Internal(anyhow!("pool exhausted")).into_response();
        let body = body_json(response).await;
        assert_eq!(body["detail"], "pool exhausted");
        expose_error_detail(false);
    }
}
