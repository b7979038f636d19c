//! Mswasth Record - Policy record model
//!
//! The central entity of the policy desk and everything needed to address
//! its fields generically:
//! - [`PolicyRecord`] with the persisted JSON shape
//! - [`Field`] catalogue (names, labels, input kinds)
//! - [`PartialRecord`] as returned by document extraction
//! - [`RecordId`] generation
//!
//! # Example
//!
//! ```rust
//! use mswasth_record::{Field, PolicyRecord, RecordId};
//!
//! let mut record = PolicyRecord::with_id(RecordId::generate());
//! record.set_text(Field::CustomerName, "Asha Das").unwrap();
//! record.set_text(Field::Premium, "490").unwrap();
//!
//! assert_eq!(record.display(Field::Premium), "490");
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod field;
pub mod gender;
pub mod id;
mod numeric;
pub mod partial;
pub mod record;
mod text;

pub use error::FieldError;
pub use field::{Field, FieldKind};
pub use gender::Gender;
pub use id::RecordId;
pub use partial::PartialRecord;
pub use record::PolicyRecord;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with policy records
    pub use crate::{Field, FieldError, FieldKind, Gender, PartialRecord, PolicyRecord, RecordId};
}
