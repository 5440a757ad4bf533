//! Out-of-core table.
//!
//! Column data stays on disk; values are fetched per request either directly
//! from the column files or through the row cache window.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::{debug, info};

use super::range::AxisRanges;
use super::source::{extrema, TableSource};
use crate::error::{Error, Result};
use crate::storage::{
    CacheStats, CacheWindow, ColumnDescriptor, ColumnFormat, ColumnStore, ColumnType, RowCache,
    TableConfig, TableDescriptor,
};

/// Column files plus the cache in front of them.
struct TableIo {
    store: ColumnStore,
    cache: RowCache,
}

/// Table backed by per-column files.
///
/// Reads take `&self`; the file handles and the cache window sit behind a
/// mutex, so concurrent readers are serialized.
pub struct OutOfCoreTable {
    labels: Vec<String>,
    rows: usize,
    ranges: AxisRanges,
    io: Mutex<TableIo>,
}

impl OutOfCoreTable {
    /// Open every column file of `descriptor`.
    ///
    /// Columns whose descriptor carries no extrema are scanned once to compute
    /// them when `config.compute_extrema` is set.
    pub fn open(descriptor: TableDescriptor, config: &TableConfig) -> Result<Self> {
        let labels: Vec<String> = (0..descriptor.num_columns())
            .map(|i| descriptor.label(i))
            .collect();

        let mut store = ColumnStore::new(descriptor.columns, descriptor.row_count);
        store.open()?;

        let mut min_values = Vec::with_capacity(store.num_columns());
        let mut max_values = Vec::with_capacity(store.num_columns());
        for index in 0..store.num_columns() {
            let known = &store.columns()[index];
            let known = (known.min_value, known.max_value);
            let (min, max) = match known {
                (Some(min), Some(max)) => (min, max),
                _ if config.compute_extrema => {
                    let values = store.read_column(index)?;
                    let (min, max) = extrema(&values);
                    debug!(column = index, min, max, "Computed column extrema");
                    (min, max)
                }
                _ => (0.0, 0.0),
            };
            min_values.push(min);
            max_values.push(max);
        }

        let mut cache = RowCache::new();
        if config.has_cache() {
            cache.configure(config.cache_capacity, store.bytes_per_row(), store.num_rows());
        }

        info!(
            columns = store.num_columns(),
            rows = store.num_rows(),
            bytes_per_row = store.bytes_per_row(),
            cache_capacity = config.cache_capacity,
            "Opened out-of-core table"
        );

        Ok(Self {
            labels,
            rows: store.num_rows(),
            ranges: AxisRanges::new(min_values, max_values),
            io: Mutex::new(TableIo { store, cache }),
        })
    }

    /// Load a JSON descriptor from `path` and open the table it describes.
    pub fn open_path(path: impl AsRef<Path>, config: &TableConfig) -> Result<Self> {
        let descriptor = TableDescriptor::from_json_file(path)?;
        Self::open(descriptor, config)
    }

    /// Turn on the row cache with a budget of `bytes`. Zero disables it.
    pub fn enable_cache(&self, bytes: u64) {
        let mut io = self.io.lock();
        let TableIo { store, cache } = &mut *io;
        cache.configure(bytes, store.bytes_per_row(), store.num_rows());
    }

    /// Turn off the row cache; reads go straight to the column files.
    pub fn disable_cache(&self) {
        self.io.lock().cache.disable();
    }

    /// Drop the cached window and reset the budget.
    pub fn clear_cache(&self) {
        self.io.lock().cache.clear();
    }

    /// Check whether reads go through the row cache.
    pub fn is_cache_enabled(&self) -> bool {
        self.io.lock().cache.is_enabled()
    }

    /// Current cache window, if any.
    pub fn cache_window(&self) -> Option<CacheWindow> {
        self.io.lock().cache.window()
    }

    /// Maximum rows the cache window holds.
    pub fn cache_capacity_rows(&self) -> usize {
        self.io.lock().cache.capacity()
    }

    /// Snapshot of the cache counters.
    pub fn cache_stats(&self) -> CacheStats {
        *self.io.lock().cache.stats()
    }

    /// Zero the cache counters.
    pub fn reset_cache_stats(&self) {
        self.io.lock().cache.reset_stats();
    }

    /// Element type of `column`.
    pub fn column_type(&self, column: usize) -> Result<ColumnType> {
        self.with_column(column, |c| c.column_type)
    }

    /// File format of `column`.
    pub fn column_format(&self, column: usize) -> Result<ColumnFormat> {
        self.with_column(column, |c| c.format)
    }

    /// File path of `column`.
    pub fn column_path(&self, column: usize) -> Result<PathBuf> {
        self.with_column(column, |c| c.path.clone())
    }

    fn with_column<R>(&self, column: usize, f: impl FnOnce(&ColumnDescriptor) -> R) -> Result<R> {
        let io = self.io.lock();
        let columns = io.store.columns();
        columns.get(column).map(f).ok_or(Error::ColumnOutOfBounds {
            column,
            columns: columns.len(),
        })
    }

    /// Sum of the element sizes of all columns.
    pub fn bytes_per_row(&self) -> usize {
        self.io.lock().store.bytes_per_row()
    }

    /// Release the column file handles.
    ///
    /// Reads not served by the cache window fail until [`reopen`](Self::reopen).
    pub fn close(&self) {
        self.io.lock().store.close();
    }

    /// Re-open any closed column files.
    pub fn reopen(&self) -> Result<()> {
        self.io.lock().store.open()
    }

    /// Mutable access to the active ranges.
    pub fn ranges_mut(&mut self) -> &mut AxisRanges {
        &mut self.ranges
    }
}

impl TableSource for OutOfCoreTable {
    fn num_columns(&self) -> usize {
        self.labels.len()
    }

    fn num_rows(&self) -> usize {
        self.rows
    }

    fn labels(&self) -> &[String] {
        &self.labels
    }

    fn ranges(&self) -> &AxisRanges {
        &self.ranges
    }

    fn read_value(&self, row: usize, column: usize) -> Result<f64> {
        let mut io = self.io.lock();
        let TableIo { store, cache } = &mut *io;
        cache.get(store, row, column)
    }

    fn column(&self, column: usize) -> Result<Vec<f64>> {
        self.io.lock().store.read_column(column)
    }
}
