//! Error types for loading lookup tables

use std::path::PathBuf;

/// Errors while loading or validating a lookup table
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// IO error during file read
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File extension has no known format
    #[error("unsupported lookup table format: '{0}' (expected .json, .yaml or .yml)")]
    UnsupportedFormat(String),

    /// Document could not be parsed
    #[error("lookup table parse error: {0}")]
    Parse(String),

    /// Document parsed but describes an unusable table
    #[error("invalid lookup table: {0}")]
    Invalid(String),
}

impl CatalogError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<serde_yaml::Error> for CatalogError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
