//! Extraction errors

use std::path::PathBuf;

/// Errors from the extraction client, proxy and backend
///
/// The `Display` text of [`ExtractError::Remote`] is the server's own message,
/// so it can be shown to the user unchanged.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// Request never produced a response
    #[error("extraction request failed: {0}")]
    Transport(String),

    /// Server answered with a non-success status
    #[error("{message}")]
    Remote { status: u16, message: String },

    /// Response body was not the expected JSON
    #[error("could not decode extraction response: {0}")]
    Decode(String),

    /// Image file could not be read
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File extension does not name a supported image type
    #[error("unsupported image type: {0}")]
    UnsupportedImage(PathBuf),

    /// Server could not bind its listening address
    #[error("failed to bind proxy: {0}")]
    Bind(String),
}

impl ExtractError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// HTTP status of a remote failure
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ExtractError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}
