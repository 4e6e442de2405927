//! Tests for Pager
//!
//! These tests verify:
//! - Opening/creating the backing file
//! - Lazy page materialization and cache hits
//! - Short reads at the end of the file
//! - Partial and full flushes
//! - Bounds and misuse errors

use std::fs;
use std::path::PathBuf;

use pagestore::pager::{Pager, PagerStats};
use pagestore::{StoreError, PAGE_SIZE};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_file() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("pager.db");
    (temp_dir, path)
}

// =============================================================================
// Open Tests
// =============================================================================

#[test]
fn test_open_creates_file() {
    let (_temp, path) = setup_temp_file();
    assert!(!path.exists());

    let pager = Pager::open(&path, 10).unwrap();

    assert!(path.exists());
    assert_eq!(pager.file_length(), 0);
    assert_eq!(pager.num_pages(), 0);
    assert_eq!(pager.cached_pages(), 0);
    assert_eq!(pager.max_pages(), 10);
}

#[test]
fn test_open_existing_file_records_length() {
    let (_temp, path) = setup_temp_file();
    fs::write(&path, vec![1u8; PAGE_SIZE + 10]).unwrap();

    let pager = Pager::open(&path, 10).unwrap();

    assert_eq!(pager.file_length(), (PAGE_SIZE + 10) as u64);
    assert_eq!(pager.num_pages(), 2);
}

#[test]
fn test_open_does_not_truncate() {
    let (_temp, path) = setup_temp_file();
    fs::write(&path, b"keep me").unwrap();

    let pager = Pager::open(&path, 10).unwrap();
    pager.close(false).unwrap();

    assert_eq!(fs::read(&path).unwrap(), b"keep me");
}

// =============================================================================
// Fetch Tests
// =============================================================================

#[test]
fn test_fetch_new_page_is_zeroed() {
    let (_temp, path) = setup_temp_file();
    let mut pager = Pager::open(&path, 10).unwrap();

    let page = pager.fetch(3).unwrap();

    assert!(page.iter().all(|&b| b == 0));
    assert!(pager.is_cached(3));
    assert!(!pager.is_cached(0));
}

#[test]
fn test_fetch_reads_full_page_from_file() {
    let (_temp, path) = setup_temp_file();
    let mut data = vec![1u8; PAGE_SIZE];
    data.extend(vec![2u8; PAGE_SIZE]);
    fs::write(&path, &data).unwrap();

    let mut pager = Pager::open(&path, 10).unwrap();

    assert!(pager.fetch(0).unwrap().iter().all(|&b| b == 1));
    assert!(pager.fetch(1).unwrap().iter().all(|&b| b == 2));
}

#[test]
fn test_fetch_short_last_page_is_zero_filled() {
    let (_temp, path) = setup_temp_file();
    let mut data = vec![1u8; PAGE_SIZE];
    data.extend(vec![7u8; 100]);
    fs::write(&path, &data).unwrap();

    let mut pager = Pager::open(&path, 10).unwrap();
    let page = pager.fetch(1).unwrap();

    assert!(page[..100].iter().all(|&b| b == 7));
    assert!(page[100..].iter().all(|&b| b == 0));
}

#[test]
fn test_fetch_page_past_end_of_file_is_zeroed() {
    let (_temp, path) = setup_temp_file();
    fs::write(&path, vec![9u8; 50]).unwrap();

    let mut pager = Pager::open(&path, 10).unwrap();

    // Page 1 starts past the 50 persisted bytes
    assert!(pager.fetch(1).unwrap().iter().all(|&b| b == 0));
    assert!(pager.fetch(0).unwrap()[..50].iter().all(|&b| b == 9));
}

#[test]
fn test_fetch_out_of_bounds() {
    let (_temp, path) = setup_temp_file();
    let mut pager = Pager::open(&path, 4).unwrap();

    assert!(pager.fetch(3).is_ok());

    let result = pager.fetch(4);
    assert!(matches!(
        result,
        Err(StoreError::PageOutOfBounds { page: 4, max_pages: 4 })
    ));
    assert!(result.unwrap_err().is_fatal());
    assert!(!pager.is_cached(4));
}

#[test]
fn test_fetch_hit_returns_same_buffer() {
    let (_temp, path) = setup_temp_file();
    let mut pager = Pager::open(&path, 10).unwrap();

    pager.fetch(0).unwrap()[10] = 0x5A;

    assert_eq!(pager.fetch(0).unwrap()[10], 0x5A);
}

#[test]
fn test_hit_and_miss_accounting() {
    let (_temp, path) = setup_temp_file();
    let mut pager = Pager::open(&path, 10).unwrap();

    pager.fetch(0).unwrap();
    pager.fetch(0).unwrap();
    pager.fetch(1).unwrap();
    pager.fetch(0).unwrap();

    let stats = pager.stats();
    assert_eq!(stats.misses, 2);
    assert_eq!(stats.hits, 2);
    assert_eq!(pager.cached_pages(), 2);
}

#[test]
fn test_cached_page_is_not_reloaded_from_file() {
    let (_temp, path) = setup_temp_file();
    fs::write(&path, vec![1u8; PAGE_SIZE]).unwrap();
    let mut pager = Pager::open(&path, 10).unwrap();

    pager.fetch(0).unwrap()[0] = 99;
    fs::write(&path, vec![3u8; PAGE_SIZE]).unwrap();

    assert_eq!(pager.fetch(0).unwrap()[0], 99);
}

// =============================================================================
// Flush Tests
// =============================================================================

#[test]
fn test_flush_full_page() {
    let (_temp, path) = setup_temp_file();
    let mut pager = Pager::open(&path, 10).unwrap();

    pager.fetch(0).unwrap().fill(4);
    pager.flush(0, PAGE_SIZE).unwrap();
    pager.close(true).unwrap();

    let data = fs::read(&path).unwrap();
    assert_eq!(data.len(), PAGE_SIZE);
    assert!(data.iter().all(|&b| b == 4));
}

#[test]
fn test_flush_writes_exactly_byte_count() {
    let (_temp, path) = setup_temp_file();
    let mut pager = Pager::open(&path, 10).unwrap();

    pager.fetch(0).unwrap().fill(1);
    pager.fetch(1).unwrap().fill(2);
    pager.flush(0, PAGE_SIZE).unwrap();
    pager.flush(1, 293).unwrap();

    assert_eq!(pager.file_length(), (PAGE_SIZE + 293) as u64);
    pager.close(false).unwrap();

    let data = fs::read(&path).unwrap();
    assert_eq!(data.len(), PAGE_SIZE + 293);
    assert!(data[PAGE_SIZE..].iter().all(|&b| b == 2));
}

#[test]
fn test_flush_updates_stats() {
    let (_temp, path) = setup_temp_file();
    let mut pager = Pager::open(&path, 10).unwrap();

    pager.fetch(0).unwrap();
    pager.fetch(1).unwrap();
    pager.flush(0, PAGE_SIZE).unwrap();
    pager.flush(1, 586).unwrap();

    assert_eq!(
        pager.stats(),
        PagerStats {
            hits: 0,
            misses: 2,
            pages_flushed: 2,
            bytes_flushed: (PAGE_SIZE + 586) as u64,
        }
    );
}

#[test]
fn test_flush_unmaterialized_page_fails() {
    let (_temp, path) = setup_temp_file();
    let mut pager = Pager::open(&path, 10).unwrap();

    let result = pager.flush(2, PAGE_SIZE);

    assert!(matches!(
        result,
        Err(StoreError::FlushUnmaterialized { page: 2 })
    ));
    assert!(result.unwrap_err().is_fatal());
    assert_eq!(pager.file_length(), 0);
}

#[test]
fn test_flush_more_than_a_page_fails() {
    let (_temp, path) = setup_temp_file();
    let mut pager = Pager::open(&path, 10).unwrap();
    pager.fetch(0).unwrap();

    let result = pager.flush(0, PAGE_SIZE + 1);

    assert!(matches!(
        result,
        Err(StoreError::InvalidFlushLength { page: 0, bytes: 4097 })
    ));
}

#[test]
fn test_flush_overwrites_in_place() {
    let (_temp, path) = setup_temp_file();
    fs::write(&path, vec![1u8; PAGE_SIZE * 2]).unwrap();
    let mut pager = Pager::open(&path, 10).unwrap();

    pager.fetch(0).unwrap()[..10].fill(8);
    pager.flush(0, 10).unwrap();
    pager.close(false).unwrap();

    let data = fs::read(&path).unwrap();
    assert_eq!(data.len(), PAGE_SIZE * 2);
    assert!(data[..10].iter().all(|&b| b == 8));
    assert!(data[10..].iter().all(|&b| b == 1));
}

// =============================================================================
// Release Tests
// =============================================================================

#[test]
fn test_release_drops_page_and_refetch_reads_file() {
    let (_temp, path) = setup_temp_file();
    let mut pager = Pager::open(&path, 10).unwrap();

    pager.fetch(0).unwrap()[0] = 11;
    pager.flush(0, 1).unwrap();
    pager.release(0);
    assert!(!pager.is_cached(0));

    // Reloaded from the flushed byte, not from memory
    assert_eq!(pager.fetch(0).unwrap()[0], 11);
    assert_eq!(pager.stats().misses, 2);
}

#[test]
fn test_release_without_flush_discards_changes() {
    let (_temp, path) = setup_temp_file();
    let mut pager = Pager::open(&path, 10).unwrap();

    pager.fetch(0).unwrap()[0] = 11;
    pager.release(0);
    pager.close(false).unwrap();

    assert_eq!(fs::metadata(&path).unwrap().len(), 0);
}
