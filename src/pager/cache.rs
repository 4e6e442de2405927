//! Page cache
//!
//! Maps page indices to in-memory buffers, loading from the backing file on
//! a miss.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use tracing::{debug, trace};

use crate::config::check_max_pages;
use crate::error::{Result, StoreError};

use super::{PageBuf, PAGE_SIZE};

/// Counters describing cache and flush activity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PagerStats {
    /// Fetches served from memory
    pub hits: u64,
    /// Fetches that allocated a page (and possibly read the file)
    pub misses: u64,
    /// Number of flush calls that reached the file
    pub pages_flushed: u64,
    /// Total bytes written by flushes
    pub bytes_flushed: u64,
}

/// Lazily populated page cache over one file
///
/// The pager exclusively owns every page buffer. Callers borrow a page for
/// the duration of a single row access through [`Pager::fetch`].
pub struct Pager {
    /// Backing file, opened read/write
    file: File,
    /// Length of the file in bytes; grows as flushes extend it
    file_length: u64,
    /// Materialized pages keyed by page index
    pages: HashMap<usize, PageBuf>,
    /// Page indices at or above this are rejected
    max_pages: usize,
    stats: PagerStats,
}

impl Pager {
    /// Open or create the backing file
    ///
    /// `max_pages` is checked before the file is touched, so every page index
    /// the pager accepts has a representable file offset.
    pub fn open(path: &Path, max_pages: usize) -> Result<Self> {
        check_max_pages(max_pages)?;

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;

        let file_length = file.metadata()?.len();
        debug!(path = %path.display(), file_length, max_pages, "pager opened");

        Ok(Self {
            file,
            file_length,
            pages: HashMap::new(),
            max_pages,
            stats: PagerStats::default(),
        })
    }

    /// Get a page, loading it from the file on first reference
    ///
    /// A page that starts before the end of the file is read up to the end of
    /// the file; the rest of the buffer stays zero. A page entirely past the
    /// end is returned zeroed without touching the file.
    pub fn fetch(&mut self, page: usize) -> Result<&mut [u8; PAGE_SIZE]> {
        if page >= self.max_pages {
            return Err(StoreError::PageOutOfBounds {
                page,
                max_pages: self.max_pages,
            });
        }

        match self.pages.entry(page) {
            Entry::Occupied(entry) => {
                self.stats.hits += 1;
                trace!(page, "page cache hit");
                Ok(&mut **entry.into_mut())
            }
            Entry::Vacant(entry) => {
                self.stats.misses += 1;
                let buf = load_page(&mut self.file, self.file_length, page)?;
                Ok(&mut **entry.insert(buf))
            }
        }
    }

    /// Write the first `byte_count` bytes of a cached page to its file position
    ///
    /// The last page of a table is flushed with only the bytes that hold rows.
    pub fn flush(&mut self, page: usize, byte_count: usize) -> Result<()> {
        if byte_count > PAGE_SIZE {
            return Err(StoreError::InvalidFlushLength {
                page,
                bytes: byte_count,
            });
        }

        let buf = self
            .pages
            .get(&page)
            .ok_or(StoreError::FlushUnmaterialized { page })?;

        let offset = page_offset(page);
        self.file.seek(SeekFrom::Start(offset))?;
        self.file.write_all(&buf[..byte_count])?;

        self.file_length = self.file_length.max(offset + byte_count as u64);
        self.stats.pages_flushed += 1;
        self.stats.bytes_flushed += byte_count as u64;
        debug!(page, byte_count, "page flushed");

        Ok(())
    }

    /// Drop a cached page without writing it
    pub fn release(&mut self, page: usize) {
        self.pages.remove(&page);
    }

    /// Release every remaining page and close the file
    ///
    /// With `sync`, the file is fsynced first so flushed bytes reach disk.
    pub fn close(mut self, sync: bool) -> Result<()> {
        if sync {
            self.file.sync_all()?;
        }
        self.pages.clear();
        debug!(file_length = self.file_length, "pager closed");
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Length of the backing file in bytes, including flushes made since open
    pub fn file_length(&self) -> u64 {
        self.file_length
    }

    /// Pages the file covers, counting a short last page
    pub fn num_pages(&self) -> usize {
        self.file_length.div_ceil(PAGE_SIZE as u64) as usize
    }

    pub fn is_cached(&self, page: usize) -> bool {
        self.pages.contains_key(&page)
    }

    pub fn cached_pages(&self) -> usize {
        self.pages.len()
    }

    pub fn max_pages(&self) -> usize {
        self.max_pages
    }

    pub fn stats(&self) -> PagerStats {
        self.stats
    }
}

// =============================================================================
// Private Helpers
// =============================================================================

fn page_offset(page: usize) -> u64 {
    page as u64 * PAGE_SIZE as u64
}

/// Allocate a zeroed page and fill it from whatever the file holds there
fn load_page(file: &mut File, file_length: u64, page: usize) -> Result<PageBuf> {
    let mut buf: PageBuf = Box::new([0u8; PAGE_SIZE]);
    let offset = page_offset(page);

    if offset < file_length {
        let available = (file_length - offset).min(PAGE_SIZE as u64) as usize;
        file.seek(SeekFrom::Start(offset))?;
        file.read_exact(&mut buf[..available])?;
        debug!(page, bytes = available, "page loaded from file");
    } else {
        debug!(page, "page allocated past end of file");
    }

    Ok(buf)
}
