//! Shared error types for the services crate.

use thiserror::Error;

use stepwise_core::model::GuideError;

/// Errors emitted while reading a guide document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GuideLoadError {
    #[error("cannot read guide file: {0}")]
    Io(#[from] std::io::Error),
    #[error("guide is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Guide(#[from] GuideError),
}
