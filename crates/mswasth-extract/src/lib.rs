//! Mswasth Extract - AI-assisted document extraction
//!
//! Two halves of one HTTP contract:
//!
//! ```text
//!  HttpExtractor ──POST {imageB64, mimeType}──▶ proxy ──generateContent──▶ GeminiBackend
//!        ◀────── 200 partial record JSON ──────┘
//!        ◀────── 4xx/5xx {error} ──────────────┘
//! ```
//!
//! - [`Extractor`] / [`HttpExtractor`]: the client used by the portal
//! - [`proxy`]: the server that holds the API key and forwards to a backend
//! - [`GenerativeBackend`] / [`GeminiBackend`]: the model call itself
//!
//! The client never retries and never sees the API key.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod backend;
pub mod client;
pub mod error;
pub mod mime;
pub mod proxy;
pub mod wire;

pub use backend::{
    response_schema, GeminiBackend, GenerativeBackend, DEFAULT_GEMINI_BASE_URL, DEFAULT_MODEL,
    EXTRACTABLE_FIELDS, EXTRACTION_PROMPT,
};
pub use client::{Extractor, HttpExtractor, DEFAULT_TIMEOUT};
pub use error::ExtractError;
pub use mime::mime_for_path;
pub use proxy::{ProxyState, PROXY_PATH};
pub use wire::{ErrorBody, ExtractRequest};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type for extraction operations
pub type Result<T> = std::result::Result<T, ExtractError>;
