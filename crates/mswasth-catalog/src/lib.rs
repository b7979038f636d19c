//! Mswasth Catalog - static reference data
//!
//! The lookup table that drives cascading selection:
//!
//! ```text
//! partner ──► product ──► [ (premium, tenure, agent), ... ]
//! ```
//!
//! plus the fixed choice lists used by the form (nominee relationships)
//! and the application shell (themes).
//!
//! The table is read-only at runtime. Deployments may replace the built-in
//! data with a JSON or YAML file of the same shape.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod choices;
pub mod error;
pub mod table;

pub use choices::{is_known_theme, DEFAULT_THEME, NOMINEE_RELATIONSHIPS, THEMES};
pub use error::CatalogError;
pub use table::{LookupTable, PremiumPlan};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
