//! Axum route handlers for dataset presence and scraper control.

use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::models::job::{DatasetStatus, ScrapeStatus, ScrapeTrigger};
use crate::state::AppState;

/// GET /api/v1/dataset
///
/// Always answers; an unreachable dataset service reads as "no dataset".
pub async fn handle_dataset_status(State(state): State<AppState>) -> Json<DatasetStatus> {
    Json(state.gateway.check_availability().await)
}

/// POST /api/v1/scrape
///
/// Starts the external scraper. A refusal (already running) is passed through as-is.
pub async fn handle_trigger_scrape(
    State(state): State<AppState>,
) -> Result<Json<ScrapeTrigger>, AppError> {
    Ok(Json(state.gateway.trigger_scrape().await?))
}

/// GET /api/v1/scrape/status
///
/// Polled by the front-end while a scrape runs.
pub async fn handle_scrape_status(
    State(state): State<AppState>,
) -> Result<Json<ScrapeStatus>, AppError> {
    Ok(Json(state.gateway.scrape_status().await?))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use mockito::Server;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::analysis::orchestrator::BulkAnalyzer;
    use crate::dataset::DatasetGateway;
    use crate::llm_client::{GenerationRequest, GenerativeModel, LlmError};
    use crate::routes::build_router;
    use crate::state::AppState;

    struct UnusedModel;

    #[async_trait]
    impl GenerativeModel for UnusedModel {
        async fn generate(&self, _request: &GenerationRequest) -> Result<String, LlmError> {
            Err(LlmError::EmptyContent)
        }
    }

    fn app(base_url: String) -> axum::Router {
        build_router(AppState {
            gateway: DatasetGateway::new(base_url).unwrap(),
            analyzer: BulkAnalyzer::new(Arc::new(UnusedModel)),
        })
    }

    async fn get(app: axum::Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_dataset_status_degrades_when_service_is_down() {
        let (status, body) = get(app("http://127.0.0.1:9".to_string()), "/api/v1/dataset").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"exists": false, "count": 0, "filename": null}));
    }

    #[tokio::test]
    async fn test_scrape_status_is_relayed() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/scrape-status")
            .with_status(200)
            .with_body(r#"{"isRunning":false,"current":20,"total":20,"message":"Completed"}"#)
            .create_async()
            .await;

        let (status, body) = get(app(server.url()), "/api/v1/scrape/status").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["isRunning"], false);
        assert_eq!(body["message"], "Completed");
    }

    #[tokio::test]
    async fn test_scrape_trigger_failure_is_bad_gateway() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/trigger-scrape")
            .with_status(500)
            .create_async()
            .await;

        let response = app(server.url())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/scrape")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get(app("http://127.0.0.1:9".to_string()), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["service"], "scout-api");
    }
}
