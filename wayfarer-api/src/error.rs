use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use wayfarer_core::Error as CoreError;

/// Transport wrapper mapping the core taxonomy onto status codes.
/// `Internal` details are logged and never reach the client.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct AppError(#[from] pub CoreError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            CoreError::Unauthenticated => (StatusCode::UNAUTHORIZED, self.0.to_string()),
            CoreError::InvalidCredentials => (StatusCode::UNAUTHORIZED, self.0.to_string()),
            CoreError::Forbidden => (StatusCode::FORBIDDEN, self.0.to_string()),
            CoreError::NotFound(_) => (StatusCode::NOT_FOUND, self.0.to_string()),
            CoreError::InvalidInput(_) => (StatusCode::BAD_REQUEST, self.0.to_string()),
            CoreError::Conflict(_) => (StatusCode::CONFLICT, self.0.to_string()),
            CoreError::Internal(detail) => {
                tracing::error!("Internal Server Error: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
