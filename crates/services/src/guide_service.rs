use std::path::Path;

use stepwise_core::model::{Guide, GuideDraft};

use crate::error::GuideLoadError;

/// Parse and validate a guide document.
///
/// # Errors
///
/// Returns `GuideLoadError::Json` for malformed JSON and
/// `GuideLoadError::Guide` when validation fails.
pub fn parse_guide(raw: &str) -> Result<Guide, GuideLoadError> {
    let draft: GuideDraft = serde_json::from_str(raw)?;
    Ok(draft.validate()?)
}

/// Read a guide document from disk.
///
/// # Errors
///
/// Returns `GuideLoadError::Io` if the file cannot be read, otherwise the
/// errors of [`parse_guide`].
pub fn load_guide(path: impl AsRef<Path>) -> Result<Guide, GuideLoadError> {
    let raw = std::fs::read_to_string(path)?;
    parse_guide(&raw)
}
