use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use skyops_common::error::SkyopsError;

pub struct ApiError(pub SkyopsError);

impl From<SkyopsError> for ApiError {
    fn from(err: SkyopsError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            SkyopsError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            SkyopsError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
        };

        let body = serde_json::json!({ "error": message });
        (status, Json(body)).into_response()
    }
}
