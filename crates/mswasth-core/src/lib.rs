//! Mswasth Core - Policy desk controller
//!
//! Ties the record crates together into one application:
//! - [`App`] owns the persisted collection, theme and transient UI state
//! - [`PortalConfig`] loads TOML configuration with environment overrides
//! - [`Toast`] notifications with a fixed lifetime
//! - [`PortalError`] unifies every library error
//!
//! ```text
//!   ┌──────────┐   ┌──────────┐   ┌──────────┐
//!   │ catalog  │──▶│   form   │──▶│          │
//!   └──────────┘   └──────────┘   │          │──▶ store
//!   ┌──────────┐   ┌──────────┐   │   App    │
//!   │ extract  │──▶│ autofill │──▶│          │──▶ export
//!   └──────────┘   └──────────┘   └──────────┘
//!                                      │
//!                                      ▼
//!                                    view
//! ```
//!
//! # Example
//!
//! ```rust
//! use mswasth_catalog::LookupTable;
//! use mswasth_core::App;
//! use mswasth_store::MemoryStore;
//! use std::sync::Arc;
//!
//! let mut app = App::new(Arc::new(MemoryStore::new()), Arc::new(LookupTable::builtin()));
//! app.add_new();
//! assert!(app.form().is_some());
//! app.close_form();
//! assert!(app.records().is_empty());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod app;
pub mod config;
pub mod error;
pub mod toast;

pub use app::{
    App, PendingConfirmation, ViewMode, MSG_ADDED, MSG_DELETED, MSG_DELETED_ALL, MSG_EXTRACTED, MSG_NO_IMAGE,
    MSG_UPDATED,
};
pub use config::{api_key_from_env, PortalConfig, ENV_API_KEY, ENV_DATA_DIR, ENV_EXTRACT_URL};
pub use error::PortalError;
pub use toast::{Severity, Toast, TOAST_TTL};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving the policy desk
    pub use crate::{App, PendingConfirmation, PortalConfig, PortalError, Severity, Toast, ViewMode};
    pub use mswasth_record::prelude::*;
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
