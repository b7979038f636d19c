//! Mswasth Form - cascading form engine
//!
//! Owns the record being created or edited and keeps its dependent
//! selections consistent with the lookup table:
//!
//! ```text
//! partner ──(reset product, premium, tenure, agent; reload products)
//!    └─ product ──(reset premium, tenure, agent; reload premiums)
//!          └─ premium ──(derive tenure + agent from the matching plan)
//! ```
//!
//! Derivations run explicitly inside the named transitions
//! ([`FormEngine::select_partner`], [`FormEngine::select_product`],
//! [`FormEngine::select_premium`]); nothing is re-evaluated implicitly.
//!
//! # Example
//!
//! ```rust
//! use mswasth_catalog::LookupTable;
//! use mswasth_form::FormEngine;
//! use std::sync::Arc;
//!
//! let mut form = FormEngine::create(Arc::new(LookupTable::builtin()));
//! form.select_partner("PBGB");
//! form.select_product("Combo");
//! form.select_premium("690");
//!
//! assert_eq!(form.record().tenure, Some(1));
//! assert_eq!(form.record().cse_name, "Aditya");
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod autofill;
pub mod engine;
pub mod error;
pub mod required;

pub use autofill::{AutofillOutcome, AutofillTicket};
pub use engine::{FormEngine, FormMode, LookupConflict, PremiumInput};
pub use error::FormError;
pub use required::REQUIRED_FIELDS;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
