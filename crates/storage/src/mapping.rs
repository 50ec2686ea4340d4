use stepwise_core::model::{GuideId, ProgressMap};

use crate::repository::StorageError;

const PROGRESS_KEY_PREFIX: &str = "step-progress-";

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

/// Storage key for a guide's progress: `step-progress-<id>`.
#[must_use]
pub fn progress_key(guide_id: &GuideId) -> String {
    format!("{PROGRESS_KEY_PREFIX}{guide_id}")
}

/// Encode progress as a JSON object of string-encoded indices to booleans.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if encoding fails.
pub fn encode_progress(progress: &ProgressMap) -> Result<String, StorageError> {
    serde_json::to_string(progress).map_err(ser)
}

/// Decode a stored progress value.
///
/// # Errors
///
/// Returns `StorageError::Serialization` unless the value is a JSON object
/// whose keys are non-negative integers and whose values are booleans.
pub fn decode_progress(raw: &str) -> Result<ProgressMap, StorageError> {
    serde_json::from_str(raw).map_err(ser)
}
