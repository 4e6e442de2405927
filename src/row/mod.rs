//! Row Module
//!
//! The fixed-schema record and its on-page byte layout.
//!
//! ## Responsibilities
//! - Validate user values before they become a `Row`
//! - Fix the byte offsets of every column
//! - Encode/decode rows into page buffers (see `codec`)
//!
//! ## Row Layout (293 bytes)
//! ```text
//! ┌──────────┬────────────────────┬──────────────────────────────┐
//! │  id (4)  │   username (33)    │          email (256)         │
//! │  u32 LE  │ zero-padded bytes  │       zero-padded bytes      │
//! └──────────┴────────────────────┴──────────────────────────────┘
//! 0          4                    37                             293
//! ```
//!
//! There is no header in the file: writer and reader share this layout by
//! construction.

mod codec;

use std::fmt;

use crate::error::{Result, StoreError};
use crate::pager::PAGE_SIZE;

pub use codec::{decode, encode, RowSlot, RowView};

// =============================================================================
// Layout Constants
// =============================================================================

/// Longest username accepted, in bytes
pub const COLUMN_USERNAME_SIZE: usize = 32;

/// Longest email accepted, in bytes
pub const COLUMN_EMAIL_SIZE: usize = 255;

pub const ID_SIZE: usize = std::mem::size_of::<u32>();
/// Username slot width, one byte reserved for the terminator
pub const USERNAME_SIZE: usize = COLUMN_USERNAME_SIZE + 1;
/// Email slot width, one byte reserved for the terminator
pub const EMAIL_SIZE: usize = COLUMN_EMAIL_SIZE + 1;

pub const ID_OFFSET: usize = 0;
pub const USERNAME_OFFSET: usize = ID_OFFSET + ID_SIZE;
pub const EMAIL_OFFSET: usize = USERNAME_OFFSET + USERNAME_SIZE;

/// Total encoded width of one row
pub const ROW_SIZE: usize = ID_SIZE + USERNAME_SIZE + EMAIL_SIZE;

/// Whole rows per page; the tail of each page is unused
pub const ROWS_PER_PAGE: usize = PAGE_SIZE / ROW_SIZE;

// =============================================================================
// Row
// =============================================================================

/// One fixed-schema record
///
/// Construction goes through [`Row::new`], so string lengths always fit
/// their slots with room for a terminator, and no string holds a zero byte
/// that would end it early on decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    id: u32,
    username: String,
    email: String,
}

impl Row {
    /// Build a row, rejecting strings longer than their column or containing
    /// a zero byte
    pub fn new(id: u32, username: impl Into<String>, email: impl Into<String>) -> Result<Self> {
        let username = username.into();
        let email = email.into();

        check_str("username", &username, COLUMN_USERNAME_SIZE)?;
        check_str("email", &email, COLUMN_EMAIL_SIZE)?;

        Ok(Self {
            id,
            username,
            email,
        })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Decoded rows skip validation: the slot width already bounds them.
    pub(crate) fn from_parts(id: u32, username: String, email: String) -> Self {
        Self {
            id,
            username,
            email,
        }
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.id, self.username, self.email)
    }
}

fn check_str(field: &'static str, value: &str, max: usize) -> Result<()> {
    if value.len() > max {
        return Err(StoreError::StringTooLong {
            field,
            len: value.len(),
            max,
        });
    }
    if value.contains('\0') {
        return Err(StoreError::EmbeddedNul { field });
    }
    Ok(())
}
