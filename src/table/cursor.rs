//! Table cursor
//!
//! Sequential iteration over all rows of a table.

use crate::error::Result;
use crate::row::Row;

use super::Table;

/// Iterator over table rows in insertion order
pub struct Cursor<'a> {
    table: &'a mut Table,
    /// Next row to read
    row: usize,
    /// Stop before this row (row count when the scan started)
    end: usize,
}

impl<'a> Cursor<'a> {
    pub(super) fn new(table: &'a mut Table, end: usize) -> Self {
        Self { table, row: 0, end }
    }

    /// True once every row has been yielded
    pub fn end_of_table(&self) -> bool {
        self.row >= self.end
    }
}

impl<'a> Iterator for Cursor<'a> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.end_of_table() {
            return None;
        }

        let result = self.table.read_row(self.row);
        self.row += 1;
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end.saturating_sub(self.row);
        (remaining, Some(remaining))
    }
}
