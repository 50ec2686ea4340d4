use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

//
// ─── ERRORS (domain validation) ────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ImageRefError {
    #[error("Image reference cannot be empty.")]
    Empty,

    #[error("Image URL is not valid: {0}")]
    InvalidUrl(String),
}

//
// ─── IMAGE REFERENCE ───────────────────────────────────────────────────────────
//

/// Where a step illustration lives: a remote URL or a local file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRef {
    FilePath(PathBuf),
    Url(Url),
}

impl ImageRef {
    /// Parse a raw reference. Anything with a `scheme://` prefix must be a
    /// valid URL; everything else is treated as a file path.
    ///
    /// # Errors
    ///
    /// Returns `ImageRefError::Empty` for blank input and
    /// `ImageRefError::InvalidUrl` when a URL-looking value does not parse.
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, ImageRefError> {
        let s = raw.as_ref().trim();
        if s.is_empty() {
            return Err(ImageRefError::Empty);
        }
        if s.contains("://") {
            let u = Url::parse(s).map_err(|_| ImageRefError::InvalidUrl(s.to_owned()))?;
            return Ok(ImageRef::Url(u));
        }
        Ok(ImageRef::FilePath(PathBuf::from(s)))
    }

    pub fn as_path(&self) -> Option<&Path> {
        match self {
            ImageRef::FilePath(p) => Some(p.as_path()),
            ImageRef::Url(_) => None,
        }
    }

    pub fn as_url(&self) -> Option<&Url> {
        match self {
            ImageRef::Url(u) => Some(u),
            ImageRef::FilePath(_) => None,
        }
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageRef::FilePath(p) => write!(f, "{}", p.display()),
            ImageRef::Url(u) => write!(f, "{u}"),
        }
    }
}
