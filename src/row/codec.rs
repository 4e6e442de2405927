//! Row codec
//!
//! Converts rows to and from their fixed-width byte layout.
//!
//! Access into a page always goes through a `RowSlot` (write) or `RowView`
//! (read). Both are bounds-checked when built, so the codec itself can only
//! ever touch the `ROW_SIZE` bytes that belong to one row.

use crate::error::{Result, StoreError};

use super::{
    Row, EMAIL_OFFSET, EMAIL_SIZE, ID_OFFSET, ID_SIZE, ROW_SIZE, USERNAME_OFFSET, USERNAME_SIZE,
};

// =============================================================================
// Slot Views
// =============================================================================

/// Mutable view over exactly one row's bytes inside a larger buffer
pub struct RowSlot<'a> {
    bytes: &'a mut [u8],
}

impl<'a> RowSlot<'a> {
    /// Borrow `ROW_SIZE` bytes of `buf` starting at `offset`
    pub fn new(buf: &'a mut [u8], offset: usize) -> Result<Self> {
        let len = buf.len();
        let end = slot_end(offset, len)?;
        Ok(Self {
            bytes: &mut buf[offset..end],
        })
    }

    fn field_mut(&mut self, offset: usize, width: usize) -> &mut [u8] {
        &mut self.bytes[offset..offset + width]
    }
}

/// Read-only view over exactly one row's bytes inside a larger buffer
pub struct RowView<'a> {
    bytes: &'a [u8],
}

impl<'a> RowView<'a> {
    /// Borrow `ROW_SIZE` bytes of `buf` starting at `offset`
    pub fn new(buf: &'a [u8], offset: usize) -> Result<Self> {
        let end = slot_end(offset, buf.len())?;
        Ok(Self {
            bytes: &buf[offset..end],
        })
    }

    fn field(&self, offset: usize, width: usize) -> &'a [u8] {
        let bytes: &'a [u8] = self.bytes;
        &bytes[offset..offset + width]
    }
}

fn slot_end(offset: usize, len: usize) -> Result<usize> {
    offset
        .checked_add(ROW_SIZE)
        .filter(|&end| end <= len)
        .ok_or(StoreError::SlotOutOfBounds { offset, len })
}

// =============================================================================
// Encode / Decode
// =============================================================================

/// Write `row` into `buf` at `offset`
///
/// Strings are left-aligned and zero-padded to their slot width.
pub fn encode(row: &Row, buf: &mut [u8], offset: usize) -> Result<()> {
    let mut slot = RowSlot::new(buf, offset)?;
    write_slot(row, &mut slot);
    Ok(())
}

/// Read the row stored in `buf` at `offset`
pub fn decode(buf: &[u8], offset: usize) -> Result<Row> {
    let view = RowView::new(buf, offset)?;
    Ok(read_slot(&view))
}

fn write_slot(row: &Row, slot: &mut RowSlot<'_>) {
    slot.field_mut(ID_OFFSET, ID_SIZE)
        .copy_from_slice(&row.id().to_le_bytes());
    write_str(slot.field_mut(USERNAME_OFFSET, USERNAME_SIZE), row.username());
    write_str(slot.field_mut(EMAIL_OFFSET, EMAIL_SIZE), row.email());
}

fn read_slot(view: &RowView<'_>) -> Row {
    let mut id = [0u8; ID_SIZE];
    id.copy_from_slice(view.field(ID_OFFSET, ID_SIZE));

    Row::from_parts(
        u32::from_le_bytes(id),
        read_str(view.field(USERNAME_OFFSET, USERNAME_SIZE)),
        read_str(view.field(EMAIL_OFFSET, EMAIL_SIZE)),
    )
}

fn write_str(field: &mut [u8], value: &str) {
    let bytes = value.as_bytes();
    let n = bytes.len().min(field.len());
    field[..n].copy_from_slice(&bytes[..n]);
    field[n..].fill(0);
}

/// The first zero byte terminates the string; a full-width slot has none.
fn read_str(field: &[u8]) -> String {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    String::from_utf8_lossy(&field[..end]).into_owned()
}
