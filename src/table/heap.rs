//! Table implementation
//!
//! Owns the pager and the row count. All page access goes through the pager;
//! a page is never borrowed beyond one row read or write.

use std::path::Path;

use tracing::{debug, info, trace, warn};

use crate::config::Config;
use crate::error::{Result, StoreError};
use crate::pager::{Pager, PagerStats, PAGE_SIZE};
use crate::row::{self, Row, ROWS_PER_PAGE, ROW_SIZE};
use crate::statement::{Outcome, Statement};

use super::Cursor;

/// What `close()` wrote back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloseSummary {
    /// Rows in the table at close
    pub rows: usize,
    /// Pages written to the file
    pub pages_flushed: usize,
    /// Bytes written to the file
    pub bytes_flushed: usize,
}

/// An append-only table backed by a single file
pub struct Table {
    config: Config,
    pager: Pager,
    /// Rows appended so far; the only mutable table-level state
    num_rows: usize,
    /// `ROWS_PER_PAGE * config.max_pages`
    max_rows: usize,
}

impl Table {
    /// Open or create the table file described by `config`
    ///
    /// The row count is derived from the file length. Trailing bytes that do
    /// not form a whole row are never exposed.
    pub fn open(config: Config) -> Result<Self> {
        let pager = Pager::open(&config.path, config.max_pages)?;
        let file_length = pager.file_length() as usize;

        let (num_rows, fragment) = rows_in_file(file_length);
        // The pager bounds max_pages * PAGE_SIZE, and ROWS_PER_PAGE < PAGE_SIZE
        let max_rows = ROWS_PER_PAGE * config.max_pages;

        if fragment != 0 {
            warn!(
                path = %config.path.display(),
                bytes = fragment,
                "ignoring trailing partial row"
            );
        }

        if num_rows > max_rows {
            return Err(StoreError::ExceedsCapacity {
                rows: num_rows,
                capacity: max_rows,
            });
        }

        info!(path = %config.path.display(), rows = num_rows, "table opened");

        Ok(Self {
            config,
            pager,
            num_rows,
            max_rows,
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified file
    pub fn open_path(path: &Path) -> Result<Self> {
        Self::open(Config::with_path(path))
    }

    /// Execute a prepared statement
    pub fn execute(&mut self, statement: Statement) -> Result<Outcome> {
        match statement {
            Statement::Insert(row) => {
                self.append(&row)?;
                Ok(Outcome::Inserted)
            }
            Statement::Select => Ok(Outcome::Selected(self.rows()?)),
        }
    }

    /// Append a row at the end of the table
    ///
    /// Fails with `TableFull` once capacity is reached, leaving the table
    /// unchanged.
    pub fn append(&mut self, row: &Row) -> Result<()> {
        if self.num_rows >= self.max_rows {
            return Err(StoreError::TableFull {
                capacity: self.max_rows,
            });
        }

        let (page, offset) = Self::locate(self.num_rows);
        let buf = self.pager.fetch(page)?;
        row::encode(row, buf, offset)?;

        trace!(row = self.num_rows, page, offset, id = row.id(), "row appended");
        self.num_rows += 1;

        Ok(())
    }

    /// Iterate over every row in insertion order
    ///
    /// The cursor covers the rows present when it was created. Each call
    /// starts again from row 0.
    pub fn scan(&mut self) -> Cursor<'_> {
        let end = self.num_rows;
        Cursor::new(self, end)
    }

    /// Collect every row
    pub fn rows(&mut self) -> Result<Vec<Row>> {
        self.scan().collect()
    }

    /// Flush all touched pages and close the file
    ///
    /// Full pages are written whole. The last page, if partially filled, is
    /// written only up to its last row. Pages never brought into the cache
    /// hold nothing new and are skipped.
    pub fn close(mut self) -> Result<CloseSummary> {
        let full_pages = self.num_rows / ROWS_PER_PAGE;
        let remainder = self.num_rows % ROWS_PER_PAGE;

        let mut summary = CloseSummary {
            rows: self.num_rows,
            pages_flushed: 0,
            bytes_flushed: 0,
        };

        for page in 0..full_pages {
            self.flush_page(page, PAGE_SIZE, &mut summary)?;
        }

        if remainder > 0 {
            self.flush_page(full_pages, remainder * ROW_SIZE, &mut summary)?;
        }

        self.pager.close(self.config.sync_on_close)?;

        info!(
            path = %self.config.path.display(),
            rows = summary.rows,
            pages = summary.pages_flushed,
            bytes = summary.bytes_flushed,
            "table closed"
        );

        Ok(summary)
    }

    // =========================================================================
    // Row Mapping
    // =========================================================================

    /// Page index and in-page byte offset of a row
    pub fn locate(row: usize) -> (usize, usize) {
        (row / ROWS_PER_PAGE, (row % ROWS_PER_PAGE) * ROW_SIZE)
    }

    /// Decode the row at `index`, loading its page if needed
    pub(crate) fn read_row(&mut self, index: usize) -> Result<Row> {
        let (page, offset) = Self::locate(index);
        let buf = self.pager.fetch(page)?;
        row::decode(buf, offset)
    }

    fn flush_page(&mut self, page: usize, bytes: usize, summary: &mut CloseSummary) -> Result<()> {
        if !self.pager.is_cached(page) {
            debug!(page, "page never loaded, skipping flush");
            return Ok(());
        }

        self.pager.flush(page, bytes)?;
        self.pager.release(page);

        summary.pages_flushed += 1;
        summary.bytes_flushed += bytes;
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Number of rows in the table
    pub fn len(&self) -> usize {
        self.num_rows
    }

    pub fn is_empty(&self) -> bool {
        self.num_rows == 0
    }

    /// Maximum number of rows this table accepts
    pub fn capacity(&self) -> usize {
        self.max_rows
    }

    pub fn is_full(&self) -> bool {
        self.num_rows >= self.max_rows
    }

    /// Get the backing file path
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the pager's cache and flush counters
    pub fn pager_stats(&self) -> PagerStats {
        self.pager.stats()
    }

    /// Number of pages currently held in memory
    pub fn cached_pages(&self) -> usize {
        self.pager.cached_pages()
    }
}

/// Whole rows held by a file of `file_length` bytes, and the leftover bytes
///
/// Full pages always hold `ROWS_PER_PAGE` rows; their unused tails are not
/// rows. Only the short last page is divided by `ROW_SIZE`. Below one page
/// this is exactly `file_length / ROW_SIZE`.
fn rows_in_file(file_length: usize) -> (usize, usize) {
    let full_pages = file_length / PAGE_SIZE;
    let tail = file_length % PAGE_SIZE;
    let tail_rows = (tail / ROW_SIZE).min(ROWS_PER_PAGE);

    (
        full_pages * ROWS_PER_PAGE + tail_rows,
        tail - tail_rows * ROW_SIZE,
    )
}
