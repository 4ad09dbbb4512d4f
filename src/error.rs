// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::services::ServiceError;
use crate::store::StoreError;

/// HTTP API error with appropriate status codes and client-facing messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    ValidationError(String),
    InvalidJson(String),

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error
    InternalServerError(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::ValidationError(msg) => msg,
            ApiError::InvalidJson(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::ValidationError(_) => "VALIDATION_ERROR",
            ApiError::InvalidJson(_) => "INVALID_JSON",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    /// `{data: null, error: <message>, code: <CODE>}`
    pub fn to_json(&self) -> Value {
        json!({
            "data": null,
            "error": self.message(),
            "code": self.error_code()
        })
    }
}

impl ApiError {
    pub fn validation_error(message: impl Into<String>) -> Self {
        ApiError::ValidationError(message.into())
    }

    pub fn invalid_json(message: impl Into<String>) -> Self {
        ApiError::InvalidJson(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }
}

// Store failures are surfaced verbatim so callers see the upstream reason
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        tracing::error!("Store error: {}", err);
        ApiError::internal_server_error(err.to_string())
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(msg) => ApiError::not_found(msg),
            ServiceError::Validation(msg) => ApiError::validation_error(msg),
            ServiceError::CreationFailed(_) => {
                tracing::error!("{}", err);
                ApiError::internal_server_error(err.to_string())
            }
            ServiceError::Store(store_err) => store_err.into(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_status_codes() {
        let cases = [
            (ServiceError::NotFound("Style x not found".into()), StatusCode::NOT_FOUND),
            (ServiceError::Validation("No valid fields to update".into()), StatusCode::BAD_REQUEST),
            (ServiceError::CreationFailed("style"), StatusCode::INTERNAL_SERVER_ERROR),
            (
                ServiceError::Store(StoreError::upstream(401, "Invalid API key")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status_code(), status);
        }
    }

    #[test]
    fn upstream_text_is_surfaced() {
        let err: ApiError = ServiceError::Store(StoreError::upstream(401, "Invalid API key")).into();
        let body = err.to_json();
        assert_eq!(body["error"], "Invalid API key");
        assert_eq!(body["code"], "INTERNAL_SERVER_ERROR");
        assert!(body["data"].is_null());
    }
}
