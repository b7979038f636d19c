//! Portal configuration
//!
//! Loaded from an optional TOML file, then overridden by environment:
//!
//! | Variable              | Field          |
//! |-----------------------|----------------|
//! | `MSWASTH_DATA_DIR`    | `data_dir`     |
//! | `MSWASTH_EXTRACT_URL` | `extract_url`  |
//!
//! The model API key is read from `API_KEY` by the proxy only and is never
//! part of this struct.

use crate::PortalError;
use mswasth_catalog::LookupTable;
use mswasth_extract::{DEFAULT_GEMINI_BASE_URL, DEFAULT_MODEL};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding the data directory
pub const ENV_DATA_DIR: &str = "MSWASTH_DATA_DIR";
/// Environment variable overriding the extraction endpoint
pub const ENV_EXTRACT_URL: &str = "MSWASTH_EXTRACT_URL";
/// Environment variable holding the model API key (proxy only)
pub const ENV_API_KEY: &str = "API_KEY";

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    /// Directory holding the stored keys
    pub data_dir: PathBuf,
    /// Extraction proxy endpoint used by the client
    pub extract_url: String,
    /// Extraction request timeout in seconds
    pub request_timeout_secs: u64,
    /// Lookup table file replacing the built-in table
    pub lookup_table: Option<PathBuf>,
    /// Address the proxy listens on
    pub proxy_bind: String,
    /// Model used by the proxy
    pub gemini_model: String,
    /// Model API root used by the proxy
    pub gemini_base_url: String,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("mswasth-data"),
            extract_url: "http://127.0.0.1:8787/extract".to_string(),
            request_timeout_secs: 60,
            lookup_table: None,
            proxy_bind: "127.0.0.1:8787".to_string(),
            gemini_model: DEFAULT_MODEL.to_string(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
        }
    }
}

impl PortalConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With data directory
    #[inline]
    #[must_use]
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// With extraction endpoint
    #[inline]
    #[must_use]
    pub fn with_extract_url(mut self, url: impl Into<String>) -> Self {
        self.extract_url = url.into();
        self
    }

    /// With lookup table override
    #[inline]
    #[must_use]
    pub fn with_lookup_table(mut self, path: impl Into<PathBuf>) -> Self {
        self.lookup_table = Some(path.into());
        self
    }

    /// With proxy bind address
    #[inline]
    #[must_use]
    pub fn with_proxy_bind(mut self, addr: impl Into<String>) -> Self {
        self.proxy_bind = addr.into();
        self
    }

    /// Parse TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, PortalError> {
        toml::from_str(text).map_err(|e| PortalError::config("<inline>", e.to_string()))
    }

    /// Read a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PortalError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| PortalError::config(path, e.to_string()))?;
        toml::from_str(&text).map_err(|e| PortalError::config(path, e.to_string()))
    }

    /// Apply overrides from a variable lookup; empty values are ignored
    #[must_use]
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name| lookup(name).filter(|v: &String| !v.trim().is_empty());
        if let Some(dir) = get(ENV_DATA_DIR) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(url) = get(ENV_EXTRACT_URL) {
            self.extract_url = url;
        }
        self
    }

    /// Apply overrides from the process environment
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Extraction request timeout
    #[inline]
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// The configured lookup table, or the built-in one
    pub fn load_lookup_table(&self) -> Result<LookupTable, PortalError> {
        match &self.lookup_table {
            Some(path) => Ok(LookupTable::from_path(path)?),
            None => Ok(LookupTable::builtin()),
        }
    }
}

/// Model API key from the process environment, if set and non-blank
#[must_use]
pub fn api_key_from_env() -> Option<String> {
    std::env::var(ENV_API_KEY).ok().filter(|k| !k.trim().is_empty())
}
