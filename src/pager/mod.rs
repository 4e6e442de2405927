//! Pager Module
//!
//! Page cache over the table's backing file.
//!
//! ## Responsibilities
//! - Materialize pages lazily on first reference (cache miss)
//! - Keep materialized pages in memory until released
//! - Write back exactly the meaningful bytes of a page on flush
//!
//! ## File Format
//! ```text
//! ┌──────────────┬──────────────┬─────┬──────────────────┐
//! │ Page 0 (4096)│ Page 1 (4096)│ ... │ Page N (<= 4096) │
//! └──────────────┴──────────────┴─────┴──────────────────┘
//! offset of page i = i * PAGE_SIZE
//! ```
//!
//! No header, magic or version. The last page may be short when it was
//! flushed with a partial byte count; reads past the end of the file are
//! zero-filled.

mod cache;

pub use cache::{Pager, PagerStats};

/// Size of one page, in memory and on disk
pub const PAGE_SIZE: usize = 4096;

/// One materialized page
pub type PageBuf = Box<[u8; PAGE_SIZE]>;
