//! Error types for pagestore
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

/// Unified error type for pagestore operations
#[derive(Debug, Error)]
pub enum StoreError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Capacity Errors
    // -------------------------------------------------------------------------
    #[error("Table full.")]
    TableFull { capacity: usize },

    #[error("File holds {rows} rows but the table capacity is {capacity}")]
    ExceedsCapacity { rows: usize, capacity: usize },

    // -------------------------------------------------------------------------
    // Pager Errors
    // -------------------------------------------------------------------------
    #[error("Tried to fetch page number out of bounds. {page} >= {max_pages}")]
    PageOutOfBounds { page: usize, max_pages: usize },

    #[error("Tried to flush page {page} which was never loaded")]
    FlushUnmaterialized { page: usize },

    #[error("Cannot flush {bytes} bytes of page {page}: larger than a page")]
    InvalidFlushLength { page: usize, bytes: usize },

    // -------------------------------------------------------------------------
    // Codec Errors
    // -------------------------------------------------------------------------
    #[error("Row slot at offset {offset} does not fit in a {len}-byte buffer")]
    SlotOutOfBounds { offset: usize, len: usize },

    // -------------------------------------------------------------------------
    // Statement Errors
    // -------------------------------------------------------------------------
    #[error("ID must be positive.")]
    NegativeId,

    #[error("String is too long.")]
    StringTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("String must not contain a zero byte.")]
    EmbeddedNul { field: &'static str },

    #[error("ID is too large.")]
    IdTooLarge,

    #[error("Syntax error. Could not parse statement.")]
    Syntax,

    #[error("Unrecognized keyword at start of '{0}'.")]
    UnrecognizedStatement(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StoreError {
    /// Whether the current table should be considered unusable after this error.
    ///
    /// Recoverable errors (a full table, a rejected statement) leave the table
    /// untouched. Everything else points at broken I/O or a broken index
    /// mapping, and the caller should stop using the table.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            StoreError::TableFull { .. }
                | StoreError::NegativeId
                | StoreError::StringTooLong { .. }
                | StoreError::EmbeddedNul { .. }
                | StoreError::IdTooLarge
                | StoreError::Syntax
                | StoreError::UnrecognizedStatement(_)
        )
    }
}
