//! Mswasth Store - Persistent store adapter
//!
//! Values live under string keys as JSON text:
//! - [`KeyValueStore`] backends: [`FileStore`] and [`MemoryStore`]
//! - [`read_or_default`] / [`write_value`] for typed access
//! - [`Persisted`] keeps an in-memory mirror of one key, writing through
//! - [`PolicyRepository`] for the record collection
//!
//! A missing or unreadable value is never an error on read: the caller's
//! default is used and the problem is logged. Undecodable text is copied to
//! [`backup_key`] before a [`Persisted`] mirror may overwrite it.
//!
//! # Example
//!
//! ```rust
//! use mswasth_store::{MemoryStore, Persisted, THEME_KEY};
//! use std::sync::Arc;
//!
//! let store = Arc::new(MemoryStore::new());
//! let mut theme = Persisted::load(store.clone(), THEME_KEY, "light".to_string());
//! theme.replace("dracula".to_string()).unwrap();
//!
//! let reloaded = Persisted::load(store, THEME_KEY, "light".to_string());
//! assert_eq!(reloaded.get(), "dracula");
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod backend;
pub mod error;
pub mod persisted;
pub mod repository;

pub use backend::{FileStore, KeyValueStore, MemoryStore};
pub use error::StoreError;
pub use persisted::{backup_key, read_or_default, write_value, Persisted};
pub use repository::PolicyRepository;

/// Storage key of the record collection
pub const POLICIES_KEY: &str = "mswasth-policies";

/// Storage key of the theme preference
pub const THEME_KEY: &str = "mswasth-theme";

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;
