pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::dataset::handlers as dataset;
use crate::state::AppState;

/// Request cap for the analyze routes. The résumé attachment rides inside the
/// JSON body as base64, and the language service accepts up to 20 MB of inline
/// data per request, so leave room for that plus the preferences text.
pub const ANALYZE_BODY_LIMIT: usize = 24 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Dataset & scraper control
        .route("/api/v1/dataset", get(dataset::handle_dataset_status))
        .route("/api/v1/scrape", post(dataset::handle_trigger_scrape))
        .route("/api/v1/scrape/status", get(dataset::handle_scrape_status))
        // Bulk analysis
        .route(
            "/api/v1/analyze",
            post(analysis::handle_analyze).layer(DefaultBodyLimit::max(ANALYZE_BODY_LIMIT)),
        )
        .route(
            "/api/v1/analyze/stream",
            post(analysis::handle_analyze_stream)
                .layer(DefaultBodyLimit::max(ANALYZE_BODY_LIMIT)),
        )
        .with_state(state)
}
