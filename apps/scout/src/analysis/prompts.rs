// Prompt construction for bulk analysis. Output language is Chinese throughout;
// the recommendation labels in the schema are Chinese as well.

use serde::Serialize;

use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::{GenerationRequest, Part};
use crate::models::job::JobPosting;
use crate::models::user::{ResumeSource, UserConfiguration};

use super::schema::bulk_analysis_schema;

/// Characters of plain-text résumé sent when there is no attachment.
pub const RESUME_TEXT_BUDGET: usize = 3000;

/// Follows the inline attachment so the model knows what it is looking at.
pub const RESUME_ATTACHED_NOTE: &str = "候选人简历 (见上文附件)。";

const RESUME_TEXT_HEADER: &str = "候选人简历内容:";

/// Compact per-job payload embedded in the prompt.
#[derive(Debug, Serialize)]
struct PromptJob<'a> {
    id: &'a str,
    title: &'a str,
    company: &'a str,
    description: &'a str,
    location: &'a str,
    date: &'a str,
}

impl<'a> From<&'a JobPosting> for PromptJob<'a> {
    fn from(job: &'a JobPosting) -> Self {
        Self {
            id: &job.id,
            title: &job.title,
            company: &job.company,
            description: &job.description,
            location: &job.location,
            date: &job.posted_date,
        }
    }
}

/// First `max_chars` characters of `text`, never splitting a code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

fn resume_parts(resume: &ResumeSource) -> Vec<Part> {
    match resume {
        ResumeSource::Attachment { mime_type, data } => vec![
            Part::inline(mime_type.as_str(), data.as_str()),
            Part::text(RESUME_ATTACHED_NOTE),
        ],
        ResumeSource::Text(text) => vec![Part::text(format!(
            "{RESUME_TEXT_HEADER}\n{}",
            truncate_chars(text, RESUME_TEXT_BUDGET)
        ))],
    }
}

fn instruction_prompt(preferences: &str, job_count: usize, jobs_json: &str) -> String {
    format!(
        r#"你是一位拥有20年经验的高级猎头顾问。

候选人偏好 (Preferences): "{preferences}"

以下是 {job_count} 个职位 (JSON 格式):
{jobs_json}

任务:
结合简历与偏好，逐一分析上面的每一个职位。
返回一个包含 "results" 数组的 JSON 对象，每个职位对应一项。
每一项必须包含 'jobId' (与输入的 id 相同) 和 'analysis' 对象 (score, recommendation, reasoning, pros, cons)。

要求:
1. 评分标准要严格。
2. reasoning、pros、cons 必须全部使用中文。
3. reasoning 要犀利、专业、简练。
{JSON_ONLY_INSTRUCTION}"#
    )
}

/// Builds the single schema-constrained request for one batch.
pub fn build_batch_request(
    batch: &[JobPosting],
    config: &UserConfiguration,
) -> Result<GenerationRequest, serde_json::Error> {
    let jobs: Vec<PromptJob<'_>> = batch.iter().map(PromptJob::from).collect();
    let jobs_json = serde_json::to_string(&jobs)?;

    let mut parts = resume_parts(&config.resume);
    parts.push(Part::text(instruction_prompt(
        &config.preferences,
        batch.len(),
        &jobs_json,
    )));

    Ok(GenerationRequest {
        parts,
        response_schema: bulk_analysis_schema(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(id: &str) -> JobPosting {
        JobPosting {
            id: id.to_string(),
            title: "Data Engineer".to_string(),
            company: "Acme".to_string(),
            location: "Shanghai".to_string(),
            posted_date: "3 hours ago".to_string(),
            url: "https://example.com/secret-url".to_string(),
            description: "Spark, Kafka".to_string(),
        }
    }

    fn text_of(part: &Part) -> &str {
        match part {
            Part::Text { text } => text,
            Part::InlineData { .. } => panic!("expected text part"),
        }
    }

    #[test]
    fn test_truncate_chars_respects_code_points() {
        assert_eq!(truncate_chars("简历内容", 2), "简历");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn test_text_resume_is_truncated_to_budget() {
        let long_resume = "字".repeat(RESUME_TEXT_BUDGET + 500);
        let config = UserConfiguration::with_resume_text(long_resume, "remote");

        let request = build_batch_request(&[job("a")], &config).unwrap();

        assert_eq!(request.parts.len(), 2);
        let resume_part = text_of(&request.parts[0]);
        let body = resume_part.strip_prefix(RESUME_TEXT_HEADER).unwrap().trim_start_matches('\n');
        assert_eq!(body.chars().count(), RESUME_TEXT_BUDGET);
    }

    #[test]
    fn test_attachment_resume_is_inlined_with_note() {
        let config = UserConfiguration::with_attachment(None, "JVBERi0=", "remote");
        let request = build_batch_request(&[job("a")], &config).unwrap();

        assert_eq!(request.parts.len(), 3);
        assert_eq!(request.parts[0], Part::inline("application/pdf", "JVBERi0="));
        assert_eq!(text_of(&request.parts[1]), RESUME_ATTACHED_NOTE);
    }

    #[test]
    fn test_prompt_embeds_preferences_and_compact_jobs() {
        let config = UserConfiguration::with_resume_text("Rust dev", "只看远程, 薪资 > 30k");
        let request = build_batch_request(&[job("job-1"), job("job-2")], &config).unwrap();

        let prompt = text_of(request.parts.last().unwrap());
        assert!(prompt.contains("\"只看远程, 薪资 > 30k\""));
        assert!(prompt.contains("2 个职位"));
        assert!(prompt.contains(r#""id":"job-1""#));
        assert!(prompt.contains(r#""date":"3 hours ago""#));
        assert!(!prompt.contains("secret-url"), "urls are not sent to the model");
    }

    #[test]
    fn test_request_carries_bulk_schema() {
        let config = UserConfiguration::with_resume_text("cv", "any");
        let request = build_batch_request(&[job("a")], &config).unwrap();
        assert_eq!(request.response_schema, bulk_analysis_schema());
    }
}
