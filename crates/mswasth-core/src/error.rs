//! Error types for the policy desk
//!
//! Every library error converts into [`PortalError`], so application code
//! can use `?` across crate boundaries.

use mswasth_catalog::CatalogError;
use mswasth_export::ExportError;
use mswasth_extract::ExtractError;
use mswasth_form::FormError;
use mswasth_record::{FieldError, RecordId};
use mswasth_store::StoreError;
use std::path::PathBuf;

/// Main application error type
#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    /// Field value rejected
    #[error(transparent)]
    Field(#[from] FieldError),

    /// Lookup table could not be loaded
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Form rejected the operation
    #[error("form error: {0}")]
    Form(#[from] FormError),

    /// Persistence failed
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Export failed
    #[error("export error: {0}")]
    Export(#[from] ExportError),

    /// Extraction failed
    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// Configuration file unreadable or invalid
    #[error("config error in {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// No record with this identifier
    #[error("no policy with id {0}")]
    UnknownRecord(RecordId),

    /// Operation needs an open form
    #[error("no form is open")]
    NoFormOpen,

    /// Theme is not in the theme list
    #[error("unknown theme: '{0}'")]
    UnknownTheme(String),
}

impl PortalError {
    /// Create config error
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }
}
