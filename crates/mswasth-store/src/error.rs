//! Store errors

use mswasth_record::RecordId;
use std::path::PathBuf;

/// Errors from persistence backends and the record repository
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Filesystem failure
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Value could not be serialized
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Key cannot be mapped to a storage location
    #[error("invalid storage key: '{0}'")]
    InvalidKey(String),

    /// Stored value could neither be read nor backed up, so it is not overwritten
    #[error("refusing to overwrite unreadable value under '{0}'")]
    Unreadable(String),

    /// No record with this identifier
    #[error("record not found: {0}")]
    NotFound(RecordId),
}

impl StoreError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
