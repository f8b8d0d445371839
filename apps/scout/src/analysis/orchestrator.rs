//! Bulk Analysis Orchestrator — fans a job list out to the language service in
//! fixed-size batches and merges the answers into one job-id-keyed map.
//!
//! Flow: partition → build one request per batch → dispatch every batch at once
//!       → per batch: parse, keep entries for that batch's ids, bump progress
//!       → after all settle: merge into a ResultMap.
//!
//! Best effort: a failed batch is never retried and never raised. It still
//! counts toward progress and simply contributes no entries.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::analysis::batching::partition;
use crate::analysis::prompts::build_batch_request;
use crate::analysis::schema::BulkAnalysisResponse;
use crate::llm_client::{generate_json, GenerativeModel, LlmError};
use crate::models::analysis::{AnalysisResult, ResultMap};
use crate::models::job::JobPosting;
use crate::models::user::UserConfiguration;

/// What one batch produced. Keeps "answered with nothing" apart from "errored".
#[derive(Debug, Clone, PartialEq)]
pub enum BatchOutcome {
    Completed { entries: Vec<(String, AnalysisResult)> },
    Failed { reason: String },
}

#[derive(Clone)]
pub struct BulkAnalyzer {
    model: Arc<dyn GenerativeModel>,
}

impl BulkAnalyzer {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    /// Scores every job against the candidate's résumé and preferences.
    ///
    /// `on_progress(completed, total)` fires once per settled batch, failed or
    /// not, so the last call always reports `total`. An empty job list makes no
    /// requests and never calls `on_progress`.
    ///
    /// Jobs absent from the returned map got no analysis.
    pub async fn analyze<F>(
        &self,
        jobs: &[JobPosting],
        config: &UserConfiguration,
        on_progress: F,
    ) -> ResultMap
    where
        F: Fn(usize, usize) + Sync,
    {
        let batches = partition(jobs);
        if batches.is_empty() {
            return ResultMap::new();
        }

        let total = jobs.len();
        let completed = AtomicUsize::new(0);
        info!(
            "Dispatching {} jobs in {} batches",
            total,
            batches.len()
        );

        let pending = batches.iter().enumerate().map(|(index, batch)| {
            let completed = &completed;
            let on_progress = &on_progress;
            async move {
                let outcome = self.process_batch(index, batch, config).await;
                let done = completed.fetch_add(batch.len(), Ordering::SeqCst) + batch.len();
                on_progress(done, total);
                outcome
            }
        });

        let outcomes = join_all(pending).await;
        merge_outcomes(outcomes)
    }

    async fn process_batch(
        &self,
        index: usize,
        batch: &[JobPosting],
        config: &UserConfiguration,
    ) -> BatchOutcome {
        let request = match build_batch_request(batch, config) {
            Ok(request) => request,
            Err(e) => return failed(index, LlmError::Parse(e)),
        };

        match generate_json::<BulkAnalysisResponse>(self.model.as_ref(), &request).await {
            Ok(response) => {
                let entries = accept_entries(index, batch, response);
                debug!("Batch {index}: {} of {} jobs analyzed", entries.len(), batch.len());
                BatchOutcome::Completed { entries }
            }
            Err(e) => failed(index, e),
        }
    }
}

fn failed(index: usize, err: LlmError) -> BatchOutcome {
    warn!("Batch {index} failed: {err}");
    BatchOutcome::Failed {
        reason: err.to_string(),
    }
}

/// Keeps entries that carry both an id and an analysis, and whose id belongs to
/// the batch that produced them.
fn accept_entries(
    index: usize,
    batch: &[JobPosting],
    response: BulkAnalysisResponse,
) -> Vec<(String, AnalysisResult)> {
    let ids: HashSet<&str> = batch.iter().map(|j| j.id.as_str()).collect();

    response
        .results
        .into_iter()
        .filter_map(|entry| match (entry.job_id, entry.analysis) {
            (Some(id), Some(analysis)) => Some((id, analysis)),
            _ => None,
        })
        .filter(|(id, _)| {
            let known = ids.contains(id.as_str());
            if !known {
                warn!("Batch {index}: dropping result for unknown job id {id}");
            }
            known
        })
        .collect()
}

/// Inserts entries without overwriting ids that are already present.
pub fn merge_entries(map: &mut ResultMap, entries: Vec<(String, AnalysisResult)>) {
    for (id, analysis) in entries {
        map.entry(id).or_insert(analysis);
    }
}

/// Folds settled batches into one map. Failed batches contribute nothing.
pub fn merge_outcomes(outcomes: Vec<BatchOutcome>) -> ResultMap {
    let mut map = ResultMap::new();
    let mut failed_batches = 0usize;
    let mut empty_batches = 0usize;

    for outcome in outcomes {
        match outcome {
            BatchOutcome::Completed { entries } if entries.is_empty() => empty_batches += 1,
            BatchOutcome::Completed { entries } => merge_entries(&mut map, entries),
            BatchOutcome::Failed { reason } => {
                failed_batches += 1;
                debug!("Skipping failed batch: {reason}");
            }
        }
    }

    info!(
        "Analysis merged: {} results, {} failed batches, {} empty batches",
        map.len(),
        failed_batches,
        empty_batches
    );
    map
}
