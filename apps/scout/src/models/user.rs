pub const DEFAULT_ATTACHMENT_MIME_TYPE: &str = "application/pdf";

/// How the résumé reaches the language service. Only one form is ever sent.
#[derive(Debug, Clone, PartialEq)]
pub enum ResumeSource {
    Text(String),
    /// Binary attachment, `data` already base64-encoded.
    Attachment { mime_type: String, data: String },
}

/// Caller-owned settings for one analysis run. Read-only to the orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub struct UserConfiguration {
    pub resume: ResumeSource,
    pub preferences: String,
}

impl UserConfiguration {
    pub fn with_resume_text(text: impl Into<String>, preferences: impl Into<String>) -> Self {
        Self {
            resume: ResumeSource::Text(text.into()),
            preferences: preferences.into(),
        }
    }

    pub fn with_attachment(
        mime_type: Option<String>,
        data: impl Into<String>,
        preferences: impl Into<String>,
    ) -> Self {
        Self {
            resume: ResumeSource::Attachment {
                mime_type: mime_type
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_ATTACHMENT_MIME_TYPE.to_string()),
                data: data.into(),
            },
            preferences: preferences.into(),
        }
    }
}
