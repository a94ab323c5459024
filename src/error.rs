// Error types shared by the library modules. The binaries wrap these in
// `anyhow` at the edge; inside the library we keep them typed so callers
// (and tests) can match on the specific failure.

use std::path::PathBuf;
use thiserror::Error;

/// Library-wide error enum.
///
/// The first three variants are the terminal conditions a run can hit:
/// a target path outside the mount root, a path segment with no matching
/// Drive folder, and a missing `Gdrive.list` sidecar. The rest wrap the
/// usual I/O and HTTP failure modes.
#[derive(Debug, Error)]
pub enum Error {
    #[error("path '{path}' is not under mount root '{root}'")]
    PathNotUnderRoot { path: PathBuf, root: PathBuf },

    #[error("folder '{segment}' not found under parent ID '{parent}'")]
    SegmentNotFound { segment: String, parent: String },

    #[error("sidecar list not found: {0}")]
    SidecarMissing(PathBuf),

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("API request rejected: {0}")]
    Api(String),

    #[error("HTTP request failed")]
    Http(#[from] reqwest::Error),

    #[error("JSON error")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
