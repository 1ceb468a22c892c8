//! API error handling.
//!
//! Maps gateway failures onto HTTP status codes with a consistent body:
//! `{ "success": false, "error": <message>, "category": <category> }`.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use psnlink_domain::{ErrorCategory, PsnError};
use serde::Serialize;

/// API error response body.
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub success: bool,
    pub error: String,
    pub category: ErrorCategory,
    /// Stable error code for programmatic handling
    pub code: &'static str,
}

/// API error type that can be converted to HTTP responses.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub category: ErrorCategory,
    pub message: String,
}

impl ApiError {
    pub fn new(
        status: StatusCode,
        code: &'static str,
        category: ErrorCategory,
        message: impl Into<String>,
    ) -> Self {
        Self { status, code, category, message: message.into() }
    }

    /// Create a 400 Bad Request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "invalid_input", ErrorCategory::Input, message)
    }
}

/// Status code for each failure kind.
#[must_use]
pub fn status_for(err: &PsnError) -> StatusCode {
    match err {
        PsnError::Unauthenticated(_) | PsnError::RefreshFailed(_) => StatusCode::UNAUTHORIZED,
        PsnError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        PsnError::UnsupportedVariant(_) => StatusCode::NOT_IMPLEMENTED,
        PsnError::AcquisitionFailed(_)
        | PsnError::RemoteRejected { .. }
        | PsnError::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
        PsnError::TransportFailure(_) => StatusCode::GATEWAY_TIMEOUT,
        PsnError::IoFailure(_) | PsnError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<PsnError> for ApiError {
    fn from(err: PsnError) -> Self {
        let status = status_for(&err);
        if status.is_server_error() {
            tracing::error!(error = %err, kind = err.label(), "request failed");
        } else {
            tracing::warn!(error = %err, kind = err.label(), "request rejected");
        }
        Self::new(status, err.label(), err.category(), err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorResponse {
            success: false,
            error: self.message,
            category: self.category,
            code: self.code,
        };
        (self.status, Json(body)).into_response()
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_failures_are_unauthorized() {
        assert_eq!(status_for(&PsnError::Unauthenticated("x".into())), StatusCode::UNAUTHORIZED);
        assert_eq!(status_for(&PsnError::RefreshFailed("x".into())), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn upstream_and_transport_failures_are_gateway_errors() {
        assert_eq!(status_for(&PsnError::rejected(404, "gone")), StatusCode::BAD_GATEWAY);
        assert_eq!(status_for(&PsnError::AcquisitionFailed("x".into())), StatusCode::BAD_GATEWAY);
        assert_eq!(
            status_for(&PsnError::TransportFailure("timeout".into())),
            StatusCode::GATEWAY_TIMEOUT
        );
    }

    #[test]
    fn unsupported_variant_is_not_implemented() {
        let err = ApiError::from(PsnError::UnsupportedVariant("video".into()));
        assert_eq!(err.status, StatusCode::NOT_IMPLEMENTED);
        assert_eq!(err.code, "unsupported_variant");
        assert_eq!(err.category, ErrorCategory::Unsupported);
    }

    #[test]
    fn local_failures_are_internal() {
        assert_eq!(
            status_for(&PsnError::IoFailure("disk".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(status_for(&PsnError::Config("x".into())), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
