//! Domain error to HTTP response mapping

use crate::errors::WagerError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Wrapper giving `WagerError` an HTTP representation
pub struct ApiError(pub WagerError);

impl From<WagerError> for ApiError {
    fn from(e: WagerError) -> Self {
        Self(e)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            WagerError::Validation(_)
            | WagerError::BelowMinimum { .. }
            | WagerError::InsufficientFunds { .. } => StatusCode::BAD_REQUEST,
            WagerError::AccountNotFound(_)
            | WagerError::CaseNotFound(_)
            | WagerError::SessionNotFound(_)
            | WagerError::PromoNotFound => StatusCode::NOT_FOUND,
            WagerError::AccountExists(_)
            | WagerError::InvalidState(_)
            | WagerError::PromoExhausted => StatusCode::CONFLICT,
            WagerError::Forbidden => StatusCode::FORBIDDEN,
            WagerError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (WagerError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (
                WagerError::InsufficientFunds { balance: 1, required: 2 },
                StatusCode::BAD_REQUEST,
            ),
            (WagerError::AccountNotFound(5), StatusCode::NOT_FOUND),
            (WagerError::PromoExhausted, StatusCode::CONFLICT),
            (
                WagerError::InvalidState("crashed"),
                StatusCode::CONFLICT,
            ),
            (WagerError::Forbidden, StatusCode::FORBIDDEN),
        ];
        for (err, expected) in cases {
            assert_eq!(ApiError(err).status(), expected);
        }
    }
}
