//! # pagestore
//!
//! A minimal single-file, single-table row store:
//! - Fixed-width records (`id`, `username`, `email`)
//! - Append-only table scanned back in insertion order
//! - Flat backing file split into 4 KB pages, cached lazily in memory
//! - Line-oriented shell (`insert`, `select`, `.exit`)
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Shell (bin/repl)                         │
//! │              db > insert 1 alice a@b.c                       │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                    Statement                                 │
//! │            (prepare line → execute on Table)                 │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      Table                                   │
//! │       (row index → page + offset, append / scan / close)     │
//! └──────────┬──────────────────────────────┬───────────────────┘
//!            │                              │
//!            ▼                              ▼
//!   ┌─────────────────┐            ┌─────────────────┐
//!   │   Row codec     │            │      Pager      │
//!   │ (fixed layout)  │            │ (page cache +   │
//!   └─────────────────┘            │   backing file) │
//!                                  └─────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;

pub mod pager;
pub mod row;
pub mod statement;
pub mod table;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use config::Config;
pub use error::{Result, StoreError};
pub use pager::{Pager, PAGE_SIZE};
pub use row::{Row, ROWS_PER_PAGE, ROW_SIZE};
pub use statement::{Input, MetaCommand, Outcome, Statement};
pub use table::{Table, TABLE_MAX_PAGES, TABLE_MAX_ROWS};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of pagestore
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
