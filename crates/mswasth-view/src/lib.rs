//! Mswasth View - record list pipeline
//!
//! Three independent, composable stages over the full record collection:
//!
//! 1. [`filter`] - case-insensitive substring search across every field
//! 2. [`sort`] - stable single-field sort, ascending or descending
//! 3. [`paginate`] - fixed pages of [`PAGE_SIZE`]
//!
//! [`ListView`] holds the view state (search term, sort, page) and runs the
//! pipeline on demand.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod list;
pub mod pipeline;
pub mod sorting;

pub use list::{ListView, PageView, TABLE_COLUMNS};
pub use pipeline::{clamp_page, filter, page_count, paginate, sort, PAGE_SIZE};
pub use sorting::{compare_by, SortConfig, SortDirection};
