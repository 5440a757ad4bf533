//! Sliding window of decoded rows.
//!
//! The cache holds one contiguous run of rows for every column, widened to
//! `f64`. A read outside the window relocates the whole window so that it
//! starts at the requested row; there is no per-row eviction.

use tracing::{debug, warn};

use super::column_store::ColumnStore;
use crate::error::{Error, Result};

/// Cache statistics.
///
/// Counters are plain integers: the cache is only reached through `&mut`, and
/// the table serializes access with its own lock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    hits: u64,
    misses: u64,
    refills: u64,
}

impl CacheStats {
    /// Reads served from the window.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Reads that fell outside the window (or bypassed it).
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Number of window relocations.
    pub fn refills(&self) -> u64 {
        self.refills
    }

    /// Fraction of reads served from the window.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Reset all counters.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn record_hit(&mut self) {
        self.hits += 1;
    }

    fn record_miss(&mut self) {
        self.misses += 1;
    }

    fn record_refill(&mut self) {
        self.refills += 1;
    }
}

/// Position of the active window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheWindow {
    /// First cached row.
    pub start_row: usize,
    /// Number of cached rows.
    pub row_count: usize,
}

impl CacheWindow {
    /// Check whether `row` is served by this window.
    pub fn contains(&self, row: usize) -> bool {
        row >= self.start_row && row - self.start_row < self.row_count
    }
}

/// Row window over a [`ColumnStore`].
#[derive(Debug, Default)]
pub struct RowCache {
    enabled: bool,
    byte_budget: u64,
    /// Maximum rows per window: `min(byte_budget / bytes_per_row, total rows)`.
    capacity: usize,
    window: Option<CacheWindow>,
    columns: Vec<Vec<f64>>,
    stats: CacheStats,
}

impl RowCache {
    /// Create a disabled cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn caching on with a budget of `byte_budget` bytes.
    ///
    /// A budget of zero disables caching. The current window is dropped.
    pub fn configure(&mut self, byte_budget: u64, bytes_per_row: usize, total_rows: usize) {
        self.invalidate();
        self.byte_budget = byte_budget;

        if byte_budget == 0 {
            self.enabled = false;
            self.capacity = 0;
            return;
        }

        let per_row = bytes_per_row.max(1) as u64;
        let rows = (byte_budget / per_row).min(total_rows as u64) as usize;
        self.enabled = true;
        self.capacity = rows;

        if rows == 0 && total_rows > 0 {
            warn!(
                byte_budget,
                bytes_per_row, "Cache budget is smaller than one row; reads bypass the cache"
            );
        }

        debug!(byte_budget, bytes_per_row, capacity = rows, "Configured row cache");
    }

    /// Turn caching off. Subsequent reads go straight to the column store.
    pub fn disable(&mut self) {
        self.enabled = false;
    }

    /// Drop the window and reset the budget.
    pub fn clear(&mut self) {
        self.invalidate();
        self.byte_budget = 0;
        self.capacity = 0;
    }

    /// Check whether reads go through the window.
    pub fn is_enabled(&self) -> bool {
        self.enabled && self.capacity > 0
    }

    /// Configured budget in bytes.
    pub fn byte_budget(&self) -> u64 {
        self.byte_budget
    }

    /// Maximum rows per window.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current window, if one has been filled.
    pub fn window(&self) -> Option<CacheWindow> {
        self.window
    }

    /// Cache statistics.
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Zero the cache statistics.
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    /// Read `column` at `row`, refilling the window on a miss.
    pub fn get(&mut self, store: &mut ColumnStore, row: usize, column: usize) -> Result<f64> {
        let rows = store.num_rows();
        if row >= rows {
            return Err(Error::RowOutOfBounds { row, rows });
        }
        let columns = store.num_columns();
        if column >= columns {
            return Err(Error::ColumnOutOfBounds { column, columns });
        }

        if !self.is_enabled() {
            self.stats.record_miss();
            return store.read_one(column, row);
        }

        match self.window {
            Some(window) if window.contains(row) => {
                self.stats.record_hit();
            }
            _ => {
                self.stats.record_miss();
                self.refill(store, row)?;
            }
        }

        // The window is present and contains `row` at this point.
        let start = self.window.map_or(row, |w| w.start_row);
        Ok(self.columns[column][row - start])
    }

    /// Move the window to start at `row` and decode one run per column.
    fn refill(&mut self, store: &mut ColumnStore, row: usize) -> Result<()> {
        // Leave no stale window behind if a column read fails part way.
        self.invalidate();

        let row_count = self.capacity.min(store.num_rows() - row);
        let mut columns = Vec::with_capacity(store.num_columns());
        for column in 0..store.num_columns() {
            columns.push(store.read_run(column, row, row_count)?);
        }

        self.columns = columns;
        self.window = Some(CacheWindow {
            start_row: row,
            row_count,
        });
        self.stats.record_refill();

        debug!(start_row = row, row_count, "Refilled row cache window");
        Ok(())
    }

    fn invalidate(&mut self) {
        self.window = None;
        self.columns.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::column::{ColumnDescriptor, ColumnFormat, ColumnType};

    fn store_with_rows(dir: &std::path::Path, rows: usize) -> ColumnStore {
        let mut columns = Vec::new();
        for (c, ty) in [ColumnType::Float64, ColumnType::Int32].into_iter().enumerate() {
            let path = dir.join(format!("c{}.bin", c));
            let mut bytes = Vec::new();
            for r in 0..rows {
                ty.encode((r * 10 + c) as f64, &mut bytes);
            }
            std::fs::write(&path, bytes).unwrap();
            columns.push(ColumnDescriptor::new(ty, ColumnFormat::Binary, path));
        }
        let mut store = ColumnStore::new(columns, rows);
        store.open().unwrap();
        store
    }

    #[test]
    fn test_window_capacity() {
        let mut cache = RowCache::new();
        // 12 bytes per row, 120 byte budget -> 10 rows.
        cache.configure(120, 12, 100);
        assert!(cache.is_enabled());
        assert_eq!(cache.capacity(), 10);

        // Capped at the table size.
        cache.configure(1 << 20, 12, 100);
        assert_eq!(cache.capacity(), 100);

        cache.configure(0, 12, 100);
        assert!(!cache.is_enabled());
    }

    #[test]
    fn test_hit_and_refill() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_with_rows(dir.path(), 50);
        let mut cache = RowCache::new();
        cache.configure(12 * 8, 12, 50);

        assert_eq!(cache.get(&mut store, 3, 1).unwrap(), 31.0);
        assert_eq!(
            cache.window(),
            Some(CacheWindow { start_row: 3, row_count: 8 })
        );
        assert_eq!(cache.get(&mut store, 10, 0).unwrap(), 100.0);
        assert_eq!(cache.stats().refills(), 1);
        assert_eq!(cache.stats().hits(), 1);

        // Row 11 is one past the window end.
        assert_eq!(cache.get(&mut store, 11, 0).unwrap(), 110.0);
        assert_eq!(cache.window().unwrap().start_row, 11);

        // Backwards access relocates as well.
        assert_eq!(cache.get(&mut store, 2, 1).unwrap(), 21.0);
        assert_eq!(cache.window().unwrap().start_row, 2);
        assert_eq!(cache.stats().refills(), 3);
    }

    #[test]
    fn test_window_truncated_at_end() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_with_rows(dir.path(), 20);
        let mut cache = RowCache::new();
        cache.configure(12 * 8, 12, 20);

        assert_eq!(cache.get(&mut store, 17, 0).unwrap(), 170.0);
        assert_eq!(
            cache.window(),
            Some(CacheWindow { start_row: 17, row_count: 3 })
        );
        assert_eq!(cache.get(&mut store, 19, 1).unwrap(), 191.0);
        assert!(matches!(
            cache.get(&mut store, 20, 0),
            Err(Error::RowOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_budget_below_one_row_bypasses() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_with_rows(dir.path(), 5);
        let mut cache = RowCache::new();
        cache.configure(4, 12, 5);

        assert!(!cache.is_enabled());
        assert_eq!(cache.get(&mut store, 4, 0).unwrap(), 40.0);
        assert!(cache.window().is_none());
    }

    #[test]
    fn test_disable_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_with_rows(dir.path(), 10);
        let mut cache = RowCache::new();
        cache.configure(1024, 12, 10);
        cache.get(&mut store, 0, 0).unwrap();
        assert!(cache.window().is_some());

        cache.disable();
        assert_eq!(cache.get(&mut store, 5, 1).unwrap(), 51.0);

        cache.clear();
        assert!(cache.window().is_none());
        assert_eq!(cache.byte_budget(), 0);
    }

    #[test]
    fn test_failed_refill_leaves_no_window() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_with_rows(dir.path(), 10);
        let mut cache = RowCache::new();
        cache.configure(1024, 12, 10);
        cache.get(&mut store, 0, 0).unwrap();

        store.close();
        cache.configure(12 * 2, 12, 10);
        assert!(cache.get(&mut store, 5, 0).is_err());
        assert!(cache.window().is_none());

        store.open().unwrap();
        assert_eq!(cache.get(&mut store, 5, 0).unwrap(), 50.0);
    }

    #[test]
    fn test_stats_snapshot_and_reset() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_with_rows(dir.path(), 10);
        let mut cache = RowCache::new();
        cache.configure(12 * 4, 12, 10);

        cache.get(&mut store, 0, 0).unwrap();
        cache.get(&mut store, 1, 1).unwrap();
        let snapshot = *cache.stats();
        cache.get(&mut store, 2, 0).unwrap();

        assert_eq!(
            (snapshot.hits(), snapshot.misses(), snapshot.refills()),
            (1, 1, 1)
        );
        assert_eq!(cache.stats().hits(), 2);

        cache.reset_stats();
        assert_eq!(*cache.stats(), CacheStats::default());
    }

    #[test]
    fn test_hit_rate() {
        let mut stats = CacheStats::default();
        assert_eq!(stats.hit_rate(), 0.0);
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        assert!((stats.hit_rate() - 0.75).abs() < 1e-9);
        stats.reset();
        assert_eq!(stats.hits(), 0);
    }
}
