use serde::Deserialize;
use serde_json::Value;

/// Sentinel shown when there is nothing to summarize or no credential configured.
pub const NOT_PROCESSED_MESSAGE: &str = "No email chain provided or OPENAI_API_KEY not set";

/// Form body posted by the page.
#[derive(Debug, Default, Deserialize)]
pub struct SubmissionRequest {
    #[serde(default)]
    pub email_chain: String,
}

/// The two-message prompt sent to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelQuery {
    pub system_instruction: String,
    pub user_prompt: String,
}

/// A `people` / `actions` value as returned by the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    /// Interpret a JSON value; `null` is treated as absent.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Array(items) => Some(Self::List(items.iter().map(json_text).collect())),
            other => Some(Self::Text(other.to_string())),
        }
    }
}

/// Render a JSON value as display text: strings verbatim, everything else as JSON.
pub fn json_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryResult {
    pub summary: Option<String>,
    pub people: Option<FieldValue>,
    pub actions: Option<FieldValue>,
    pub response_template: Option<String>,
}

/// Result of handling one request, before rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryOutcome {
    /// Nothing submitted yet.
    Idle,
    /// Empty input or missing credential; no call was made.
    NotProcessed,
    /// User-visible error, already prefixed with `Error: `.
    Failed(String),
    Completed(SummaryResult),
}

impl SummaryOutcome {
    pub fn failed(error: impl std::fmt::Display) -> Self {
        Self::Failed(format!("Error: {error}"))
    }

    /// The result string shown to the user, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::NotProcessed => Some(NOT_PROCESSED_MESSAGE),
            Self::Failed(message) => Some(message),
            Self::Completed(result) => result.summary.as_deref(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::NotProcessed => "not_processed",
            Self::Failed(_) => "failed",
            Self::Completed(_) => "completed",
        }
    }
}
