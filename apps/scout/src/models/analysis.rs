use std::collections::HashMap;

use serde::{de, Deserialize, Deserializer, Serialize};

/// The language service's suitability verdict, best to worst.
/// Wire values are the four labels enumerated in the response schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecommendationTier {
    #[serde(rename = "强烈推荐")]
    StronglyRecommended,
    #[serde(rename = "值得考虑")]
    WorthConsidering,
    #[serde(rename = "勉强匹配")]
    MarginalMatch,
    #[serde(rename = "不推荐")]
    NotRecommended,
}

impl RecommendationTier {
    pub const ALL: [RecommendationTier; 4] = [
        RecommendationTier::StronglyRecommended,
        RecommendationTier::WorthConsidering,
        RecommendationTier::MarginalMatch,
        RecommendationTier::NotRecommended,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RecommendationTier::StronglyRecommended => "强烈推荐",
            RecommendationTier::WorthConsidering => "值得考虑",
            RecommendationTier::MarginalMatch => "勉强匹配",
            RecommendationTier::NotRecommended => "不推荐",
        }
    }
}

pub const FALLBACK_REASONING: &str = "分析失败或已跳过。";

/// Per-job verdict produced by the language service.
///
/// `score` is nominally 0–100 but is not clamped: the model is trusted.
/// Whole-valued floats such as `85.0` are read as integers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(deserialize_with = "deserialize_score")]
    pub score: i64,
    pub recommendation: RecommendationTier,
    pub reasoning: String,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
}

impl AnalysisResult {
    /// Stand-in for a job the run produced nothing for.
    pub fn fallback() -> Self {
        Self {
            score: 0,
            recommendation: RecommendationTier::NotRecommended,
            reasoning: FALLBACK_REASONING.to_string(),
            pros: vec![],
            cons: vec![],
        }
    }
}

fn deserialize_score<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawScore {
        Int(i64),
        Float(f64),
    }

    match RawScore::deserialize(deserializer)? {
        RawScore::Int(score) => Ok(score),
        RawScore::Float(score) if score.fract() == 0.0 && score.abs() < i64::MAX as f64 => {
            Ok(score as i64)
        }
        RawScore::Float(score) => Err(de::Error::custom(format!(
            "score must be a whole number, got {score}"
        ))),
    }
}

/// Job id → analysis for one run. Absence of an id means no analysis was produced.
pub type ResultMap = HashMap<String, AnalysisResult>;
