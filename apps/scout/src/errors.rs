use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::dataset::GatewayError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// Not a failure of this service: the user has to run the scraper first.
    #[error("No scraped dataset found. Run the scraper first.")]
    DatasetMissing,

    #[error("Dataset response was malformed: {0}")]
    DatasetMalformed(String),

    #[error("Upstream service error: {0}")]
    Upstream(String),
}

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Malformed(msg) => AppError::DatasetMalformed(msg),
            other => AppError::Upstream(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::DatasetMissing => (StatusCode::CONFLICT, "DATASET_MISSING", self.to_string()),
            AppError::DatasetMalformed(msg) => {
                tracing::error!("Malformed dataset: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "DATASET_MALFORMED",
                    "The dataset service returned an unreadable job list".to_string(),
                )
            }
            AppError::Upstream(msg) => {
                tracing::error!("Upstream error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM_ERROR",
                    "The scraper service is unavailable".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_gateway_error_maps_to_dataset_malformed() {
        let err: AppError = GatewayError::Malformed("no jobs array".to_string()).into();
        assert!(matches!(err, AppError::DatasetMalformed(_)));
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_status_gateway_error_maps_to_upstream() {
        let err: AppError = GatewayError::Status {
            status: 503,
            body: "down".to_string(),
        }
        .into();
        assert!(matches!(err, AppError::Upstream(_)));
    }

    #[test]
    fn test_dataset_missing_is_conflict() {
        let response = AppError::DatasetMissing.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_validation_is_bad_request() {
        let response = AppError::Validation("preferences".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
