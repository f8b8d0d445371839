use serde::{Deserialize, Serialize};

/// A scraped job posting as served by the dataset service.
/// Immutable once fetched; the `id` is unique within one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    /// Display string only, e.g. "2 hours ago". Never parsed.
    pub posted_date: String,
    pub url: String,
    pub description: String,
}

/// Presence report for the persisted dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetStatus {
    pub exists: bool,
    pub count: u64,
    pub filename: Option<String>,
}

impl DatasetStatus {
    /// The degraded answer used whenever the dataset service cannot be read.
    pub fn absent() -> Self {
        Self::default()
    }
}

/// Progress snapshot of the external scraper.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeStatus {
    #[serde(alias = "is_running")]
    pub is_running: bool,
    #[serde(default)]
    pub current: u64,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub message: String,
}

/// Acknowledgement returned when a scrape is requested.
/// `status` is `"started"` or `"error"` when a scrape is already running.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeTrigger {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

impl ScrapeTrigger {
    pub fn started(&self) -> bool {
        self.status == "started"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_job_posting_uses_camel_case_wire_names() {
        let job: JobPosting = serde_json::from_value(json!({
            "id": "job-0",
            "title": "Rust Engineer",
            "company": "Acme",
            "location": "Remote",
            "postedDate": "1 day ago",
            "url": "https://example.com/job-0",
            "description": "Build things"
        }))
        .unwrap();

        assert_eq!(job.posted_date, "1 day ago");
        let back = serde_json::to_value(&job).unwrap();
        assert_eq!(back["postedDate"], "1 day ago");
    }

    #[test]
    fn test_scrape_status_accepts_both_running_spellings() {
        let camel: ScrapeStatus =
            serde_json::from_value(json!({"isRunning": true, "current": 3, "total": 10, "message": "Page 1"}))
                .unwrap();
        let snake: ScrapeStatus =
            serde_json::from_value(json!({"is_running": true, "current": 3, "total": 10, "message": "Page 1"}))
                .unwrap();
        assert_eq!(camel, snake);
        assert!(camel.is_running);
    }

    #[test]
    fn test_absent_dataset_status() {
        let status = DatasetStatus::absent();
        assert!(!status.exists);
        assert_eq!(status.count, 0);
        assert!(status.filename.is_none());
    }

    #[test]
    fn test_scrape_trigger_started() {
        let ack: ScrapeTrigger =
            serde_json::from_value(json!({"status": "error", "message": "Scraper is already running"}))
                .unwrap();
        assert!(!ack.started());
    }
}
