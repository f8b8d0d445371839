use crate::analysis::orchestrator::BulkAnalyzer;
use crate::dataset::DatasetGateway;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub gateway: DatasetGateway,
    /// Wraps the pluggable `GenerativeModel`. Default: the Gemini `LlmClient`.
    pub analyzer: BulkAnalyzer,
}
