//! Best-effort interpretation of the model reply.

use serde_json::{Map, Value};

use crate::core::config::JsonFallback;
use crate::core::models::{FieldValue, SummaryResult, json_text};
use crate::errors::SummarizerError;

/// Parse the reply as a JSON object, falling back to the span between the
/// first `{` and the last `}` when the whole text is not valid JSON.
pub fn load_json(content: &str) -> Option<Map<String, Value>> {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(content) {
        return Some(map);
    }

    let start = content.find('{')?;
    let end = content.rfind('}')?;
    if end <= start {
        return None;
    }

    match serde_json::from_str::<Value>(&content[start..=end]) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Pick the four known keys out of a parsed reply.
pub fn extract_fields(data: &Map<String, Value>) -> SummaryResult {
    let text = |key: &str| data.get(key).filter(|v| !v.is_null()).map(json_text);
    let field = |key: &str| data.get(key).and_then(FieldValue::from_json);

    SummaryResult {
        summary: text("summary"),
        people: field("people"),
        actions: field("actions"),
        response_template: text("response"),
    }
}

/// Turn the raw reply into a result, applying `fallback` when no object can be parsed.
pub fn interpret_reply(
    content: &str,
    fallback: JsonFallback,
) -> Result<SummaryResult, SummarizerError> {
    match (load_json(content), fallback) {
        (Some(data), _) => Ok(extract_fields(&data)),
        (None, JsonFallback::RawText) => Ok(SummaryResult {
            summary: Some(content.to_string()),
            ..SummaryResult::default()
        }),
        (None, JsonFallback::Error) => Err(SummarizerError::InvalidJson),
    }
}
