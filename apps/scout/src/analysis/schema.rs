//! Declared response schema for bulk analysis and the typed view of its output.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::models::analysis::{AnalysisResult, RecommendationTier};

/// Schema of one job's analysis object.
pub fn analysis_schema() -> Value {
    let tiers: Vec<&str> = RecommendationTier::ALL.iter().map(|t| t.label()).collect();
    json!({
        "type": "OBJECT",
        "properties": {
            "score": {"type": "INTEGER", "description": "匹配度评分 0-100"},
            "recommendation": {"type": "STRING", "enum": tiers},
            "reasoning": {"type": "STRING", "description": "一句话简短评价 (中文)"},
            "pros": {"type": "ARRAY", "items": {"type": "STRING"}, "description": "优点 (中文)"},
            "cons": {"type": "ARRAY", "items": {"type": "STRING"}, "description": "缺点/风险 (中文)"}
        },
        "required": ["score", "recommendation", "reasoning", "pros", "cons"]
    })
}

/// Schema of a whole batch answer: `{ results: [{ jobId, analysis }] }`.
pub fn bulk_analysis_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "results": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "jobId": {"type": "STRING"},
                        "analysis": analysis_schema()
                    },
                    "required": ["jobId", "analysis"]
                }
            }
        }
    })
}

#[derive(Debug, Deserialize)]
pub struct BulkAnalysisResponse {
    #[serde(default)]
    pub results: Vec<BatchEntry>,
}

/// One item of `results`. Either field may be absent; such items are skipped.
/// A present but malformed `analysis` fails the whole batch.
#[derive(Debug, Deserialize)]
pub struct BatchEntry {
    #[serde(rename = "jobId")]
    pub job_id: Option<String>,
    pub analysis: Option<AnalysisResult>,
}
