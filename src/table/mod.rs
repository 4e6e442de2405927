//! Table Module
//!
//! The append-only table on top of the pager.
//!
//! ## Responsibilities
//! - Map a logical row index to a page and in-page byte offset
//! - Append rows, enforcing the configured capacity
//! - Scan rows back in insertion order
//! - Flush every touched page on close, the last one partially
//!
//! ## Row Placement
//! ```text
//! row r  →  page  r / ROWS_PER_PAGE
//!           bytes (r % ROWS_PER_PAGE) * ROW_SIZE .. + ROW_SIZE
//!
//! ┌──────────────────────── page 0 ────────────────────────┐
//! │ row 0 │ row 1 │ ... │ row 12 │ unused tail (287 bytes) │
//! └────────────────────────────────────────────────────────┘
//! ┌──────────────────────── page 1 ────────────────────────┐
//! │ row 13 │ ...                                           │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lifecycle
//! `Table::open` → (`append` | `scan`)* → `Table::close`. Close consumes the
//! table, so nothing can run after it.

mod cursor;
mod heap;

pub use cursor::Cursor;
pub use heap::{CloseSummary, Table};

use crate::row::ROWS_PER_PAGE;

/// Default page limit for a table file
pub const TABLE_MAX_PAGES: usize = 100;

/// Row capacity under the default page limit
pub const TABLE_MAX_ROWS: usize = ROWS_PER_PAGE * TABLE_MAX_PAGES;
