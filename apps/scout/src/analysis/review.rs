//! Review — turns a ResultMap back into the ranked job list the front-end shows.

use serde::Serialize;

use crate::models::analysis::{AnalysisResult, ResultMap};
use crate::models::job::JobPosting;

/// Jobs scoring at or above this are pre-selected for export.
pub const SELECTION_THRESHOLD: i64 = 80;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredJob {
    #[serde(flatten)]
    pub job: JobPosting,
    pub analysis: AnalysisResult,
    pub is_selected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReviewSummary {
    pub total: usize,
    pub analyzed: usize,
    pub selected: usize,
}

/// Attaches each job's analysis (or the fallback), marks high scorers as
/// selected and orders by descending score. Ties keep input order.
pub fn build_review(jobs: &[JobPosting], results: &ResultMap) -> Vec<ScoredJob> {
    let mut scored: Vec<ScoredJob> = jobs
        .iter()
        .map(|job| {
            let analysis = results
                .get(&job.id)
                .cloned()
                .unwrap_or_else(AnalysisResult::fallback);
            ScoredJob {
                is_selected: analysis.score >= SELECTION_THRESHOLD,
                job: job.clone(),
                analysis,
            }
        })
        .collect();

    scored.sort_by(|a, b| b.analysis.score.cmp(&a.analysis.score));
    scored
}

pub fn summarize(jobs: &[JobPosting], results: &ResultMap, review: &[ScoredJob]) -> ReviewSummary {
    ReviewSummary {
        total: jobs.len(),
        analyzed: jobs.iter().filter(|j| results.contains_key(&j.id)).count(),
        selected: review.iter().filter(|j| j.is_selected).count(),
    }
}
