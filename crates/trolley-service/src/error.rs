//! API error types and responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use trolley_core::CartError;

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Bad request - invalid input.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Conflict - the user already has an active cart.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Cart validation failed; the message is the validator's reason.
    #[error("validation failed: {0}")]
    ValidationFailed(String),
}

/// JSON error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            Self::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg),
            Self::ValidationFailed(msg) => (StatusCode::BAD_REQUEST, "validation_failed", msg),
        };

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<CartError> for ApiError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::CartNotFound { cart_id } => Self::NotFound(format!("cart {cart_id} not found")),
            CartError::TrackingNotFound { tracking_id } => {
                Self::NotFound(format!("tracking record {tracking_id} not found"))
            }
            CartError::DuplicateCart { user_id } => {
                Self::Conflict(format!("user {user_id} already has an active cart"))
            }
            CartError::InvalidInput(msg) => Self::BadRequest(msg),
            CartError::Validation(violation) => Self::ValidationFailed(violation.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trolley_core::{CartId, Violation};

    #[test]
    fn validation_failure_carries_the_exact_reason() {
        let api: ApiError = CartError::from(Violation::InactivityTimeout).into();
        match api {
            ApiError::ValidationFailed(msg) => assert_eq!(msg, "inactivity timeout"),
            other => panic!("unexpected mapping: {other:?}"),
        }
    }

    #[test]
    fn not_found_maps_to_not_found() {
        let api: ApiError = CartError::CartNotFound {
            cart_id: CartId::new(3),
        }
        .into();
        assert!(matches!(api, ApiError::NotFound(_)));
    }

    #[test]
    fn duplicate_cart_maps_to_conflict() {
        let api: ApiError = CartError::DuplicateCart {
            user_id: "user-1".into(),
        }
        .into();
        assert!(matches!(api, ApiError::Conflict(_)));
    }
}
