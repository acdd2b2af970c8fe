use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Tenant scope for every data route.
pub struct OwnerId(pub i64);

#[derive(Debug)]
pub struct HeaderRejection(String);

impl IntoResponse for HeaderRejection {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.0 });
        (StatusCode::BAD_REQUEST, axum::Json(body)).into_response()
    }
}

impl<S: Send + Sync> FromRequestParts<S> for OwnerId {
    type Rejection = HeaderRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get("X-Owner-Id")
            .ok_or_else(|| HeaderRejection("missing X-Owner-Id header".to_string()))?;

        let value = header
            .to_str()
            .map_err(|_| HeaderRejection("invalid X-Owner-Id header value".to_string()))?;

        let owner_id = value
            .parse::<i64>()
            .map_err(|_| HeaderRejection(format!("invalid id in X-Owner-Id: {value}")))?;

        Ok(OwnerId(owner_id))
    }
}

/// Caller identity for the dashboard route. Both headers are optional:
/// a missing user id reads as 0 and a missing profile as empty, which
/// the dashboard treats as a non-pilot caller.
pub struct UserContext {
    pub user_id: i64,
    pub profile: String,
}

impl<S: Send + Sync> FromRequestParts<S> for UserContext {
    type Rejection = HeaderRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = match parts.headers.get("X-User-Id") {
            None => 0,
            Some(header) => header
                .to_str()
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .ok_or_else(|| HeaderRejection("invalid X-User-Id header value".to_string()))?,
        };

        let profile = parts
            .headers
            .get("X-User-Profile")
            .and_then(|h| h.to_str().ok())
            .unwrap_or_default()
            .to_string();

        Ok(UserContext { user_id, profile })
    }
}
