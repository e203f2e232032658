//! Normalization of stored artifact payloads
//!
//! Three payload formats exist in the wild:
//! - a JSON object with `structured_data` (current format; extra keys such
//!   as `original_filename` or `doc_type` are ignored and missing lengths are
//!   filled in)
//! - a JSON object holding only `compressed_text`
//! - a bare digest string that is not JSON at all

use crate::StoreError;
use serde_json::{Map, Value};
use studypack_domain::{CompressedArtifact, StoredArtifact, StudyElements};

/// Normalize a raw payload into a [`StoredArtifact`]
pub fn normalize_artifact(payload: &str) -> Result<StoredArtifact, StoreError> {
    let value: Value = match serde_json::from_str(payload) {
        Ok(value) => value,
        Err(_) => return Ok(StoredArtifact::LegacyText(payload.to_string())),
    };

    let obj = value.as_object().ok_or_else(|| {
        StoreError::InvalidData(format!("artifact payload is JSON but not an object: {}", value))
    })?;

    if obj.contains_key("structured_data") {
        return Ok(StoredArtifact::Structured(structured(obj)));
    }

    match obj.get("compressed_text") {
        Some(Value::String(text)) => Ok(StoredArtifact::LegacyText(text.clone())),
        _ => Err(StoreError::InvalidData(
            "artifact payload has neither structured_data nor compressed_text".to_string(),
        )),
    }
}

fn structured(obj: &Map<String, Value>) -> CompressedArtifact {
    let structured_data = obj
        .get("structured_data")
        .and_then(Value::as_object)
        .map(StudyElements::from_json_object)
        .unwrap_or_default();

    let compressed_text = obj
        .get("compressed_text")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let length = |key: &str| obj.get(key).and_then(Value::as_u64).map(|n| n as usize);

    CompressedArtifact {
        original_length: length("original_length").unwrap_or(0),
        compressed_length: length("compressed_length")
            .unwrap_or_else(|| compressed_text.chars().count()),
        structured_data,
        compressed_text,
    }
}
