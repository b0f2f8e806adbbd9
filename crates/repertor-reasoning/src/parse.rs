//! Tolerant extraction of a JSON object from free-form model output.

use serde::Deserialize;

use crate::error::ReasoningError;

/// The JSON portion of a reply: a fenced ```json block if present, else the
/// span from the first `{` to the last `}`, else the whole reply.
pub fn extract_json(reply: &str) -> &str {
    const FENCE: &str = "```json";
    if let Some(start) = reply.find(FENCE) {
        let body = &reply[start + FENCE.len()..];
        let end = body.find("```").unwrap_or(body.len());
        return body[..end].trim();
    }
    if let (Some(start), Some(end)) = (reply.find('{'), reply.rfind('}'))
        && start < end
    {
        return &reply[start..=end];
    }
    reply.trim()
}

pub fn parse_reply<T: for<'de> Deserialize<'de>>(reply: &str) -> Result<T, ReasoningError> {
    let json = extract_json(reply);
    if json.is_empty() {
        return Err(ReasoningError::ResponseParse("empty reply".to_string()));
    }
    serde_json::from_str(json)
        .map_err(|e| ReasoningError::SchemaViolation(format!("{e}. Response: {reply}")))
}
