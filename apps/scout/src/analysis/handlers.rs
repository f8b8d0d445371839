//! Axum route handlers for the Analysis API.

use std::convert::Infallible;

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use futures::{channel::mpsc, Stream, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

use crate::analysis::review::{build_review, summarize, ReviewSummary, ScoredJob};
use crate::dataset::DatasetFetch;
use crate::errors::AppError;
use crate::models::job::JobPosting;
use crate::models::user::UserConfiguration;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub resume_text: Option<String>,
    /// Base64 file contents. Wins over `resume_text` when both are sent.
    pub resume_base64: Option<String>,
    pub resume_mime_type: Option<String>,
    #[serde(default)]
    pub preferences: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub run_id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    pub summary: ReviewSummary,
    pub jobs: Vec<ScoredJob>,
}

/// Payload of a `progress` event on the streaming route.
#[derive(Debug, Serialize)]
pub struct ProgressUpdate {
    pub completed: usize,
    pub total: usize,
}

impl AnalyzeRequest {
    fn into_user_configuration(self) -> Result<UserConfiguration, AppError> {
        if let Some(data) = self.resume_base64.filter(|d| !d.trim().is_empty()) {
            STANDARD
                .decode(data.trim())
                .map_err(|e| AppError::Validation(format!("resumeBase64 is not valid base64: {e}")))?;
            return Ok(UserConfiguration::with_attachment(
                self.resume_mime_type,
                data.trim(),
                self.preferences,
            ));
        }

        match self.resume_text.filter(|t| !t.trim().is_empty()) {
            Some(text) => Ok(UserConfiguration::with_resume_text(text, self.preferences)),
            None => Err(AppError::Validation(
                "either resumeText or resumeBase64 is required".to_string(),
            )),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyze
///
/// Fetches the scraped dataset, scores every job against the résumé and
/// preferences, and returns the ranked review. A missing dataset answers 409
/// without touching the language service.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let user_config = request.into_user_configuration()?;
    let jobs = load_jobs(&state).await?;

    let response = run_review(&state, &jobs, &user_config, |_, _| {}).await;
    Ok(Json(response))
}

/// POST /api/v1/analyze/stream
///
/// Same input and checks as `/api/v1/analyze`, but answers with Server-Sent
/// Events: one `progress` event (`{completed, total}`) per settled batch, then
/// a single `result` event carrying the full review. Request and dataset
/// errors are still plain JSON responses because they happen before the
/// stream opens.
pub async fn handle_analyze_stream(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    let user_config = request.into_user_configuration()?;
    let jobs = load_jobs(&state).await?;

    let (tx, rx) = mpsc::unbounded();
    tokio::spawn(async move {
        let progress_tx = tx.clone();
        let response = run_review(&state, &jobs, &user_config, move |completed, total| {
            // A closed channel only means the client went away; the run finishes regardless.
            let update = ProgressUpdate { completed, total };
            let _ = progress_tx.unbounded_send(sse_event("progress", &update));
        })
        .await;
        let _ = tx.unbounded_send(sse_event("result", &response));
    });

    Ok(Sse::new(rx.map(Ok::<_, Infallible>)).keep_alive(KeepAlive::default()))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

async fn load_jobs(state: &AppState) -> Result<Vec<JobPosting>, AppError> {
    match state.gateway.fetch_all().await? {
        DatasetFetch::Missing => Err(AppError::DatasetMissing),
        DatasetFetch::Ready(jobs) => Ok(jobs),
    }
}

/// Runs one analysis pass inside a `run_id` span and turns the result map into
/// the ranked review.
async fn run_review<F>(
    state: &AppState,
    jobs: &[JobPosting],
    user_config: &UserConfiguration,
    on_progress: F,
) -> AnalyzeResponse
where
    F: Fn(usize, usize) + Sync,
{
    let run_id = Uuid::new_v4();
    let span = info_span!("analysis_run", %run_id, jobs = jobs.len());

    let results = state
        .analyzer
        .analyze(jobs, user_config, |done, total| {
            info!(done, total, "Analysis progress");
            on_progress(done, total);
        })
        .instrument(span)
        .await;

    let review = build_review(jobs, &results);
    let summary = summarize(jobs, &results, &review);
    info!(
        "Run {run_id}: {} of {} jobs analyzed, {} selected",
        summary.analyzed, summary.total, summary.selected
    );

    AnalyzeResponse {
        run_id,
        analyzed_at: Utc::now(),
        summary,
        jobs: review,
    }
}

fn sse_event<T: Serialize>(name: &str, payload: &T) -> Event {
    match Event::default().event(name).json_data(payload) {
        Ok(event) => event,
        Err(e) => {
            error!("Failed to encode {name} event: {e}");
            let body = json!({
                "error": {
                    "code": "ENCODE_ERROR",
                    "message": format!("Could not encode the {name} event")
                }
            });
            Event::default().event("error").data(body.to_string())
        }
    }
}
