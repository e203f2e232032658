//! Parse model output into study elements

use crate::error::ExtractorError;
use serde_json::Value;
use studypack_domain::{ElementField, StudyElements};
use tracing::debug;

/// Parse a JSON-object model response into [`StudyElements`]
///
/// Missing fields and fields that are not arrays become empty. Array items
/// that are not strings are kept in their JSON form rather than dropped.
pub fn parse_elements(response: &str) -> Result<StudyElements, ExtractorError> {
    let json_str = extract_json(response)?;
    let json: Value = serde_json::from_str(json_str)?;

    let obj = json
        .as_object()
        .ok_or_else(|| ExtractorError::InvalidFormat("Expected JSON object".to_string()))?;

    for field in ElementField::ALL {
        if let Some(value) = obj.get(field.key()).filter(|v| !v.is_array()) {
            debug!(field = field.key(), value = %value, "Field is not a list, treating as empty");
        }
    }

    Ok(StudyElements::from_json_object(obj))
}

/// Extract JSON from response, handling markdown code blocks
fn extract_json(response: &str) -> Result<&str, ExtractorError> {
    let trimmed = response.trim();

    if let Some(fenced) = trimmed.strip_prefix("```") {
        // Drop the opening fence line (```json or ```) and the closing fence
        let body = fenced
            .split_once('\n')
            .map(|(_, rest)| rest)
            .ok_or_else(|| ExtractorError::InvalidFormat("Empty code block".to_string()))?;
        let body = body.trim_end();
        let body = body.strip_suffix("```").unwrap_or(body);
        Ok(body.trim())
    } else {
        Ok(trimmed)
    }
}
