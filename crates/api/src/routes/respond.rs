//! Shared error-response helpers.
//!
//! Routes with domain-specific error codes (e.g. `invalid_credentials`,
//! `tax_id_taken`) build their bodies inline; everything else goes through
//! the `AppError` status/code mapping here.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use caixa_shared::AppError;

/// Renders an `AppError` with its mapped HTTP status and error code.
#[must_use]
pub fn error_response(err: &AppError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(json!({
            "error": err.error_code().to_ascii_lowercase(),
            "message": err.to_string(),
        })),
    )
        .into_response()
}

/// Generic 500 with a context-specific message.
#[must_use]
pub fn internal_error(message: &str) -> Response {
    error_response(&AppError::Internal(message.to_string()))
}

/// Generic 404 for a missing resource.
#[must_use]
pub fn not_found(what: &str) -> Response {
    error_response(&AppError::NotFound(what.to_string()))
}

/// 400 with a domain-specific error code.
#[must_use]
pub fn bad_request(error: &str, message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": error, "message": message })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_status_mapping() {
        let response = error_response(&AppError::NotFound("thing".into()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = internal_error("boom");
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = bad_request("invalid_filter", "bad");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
