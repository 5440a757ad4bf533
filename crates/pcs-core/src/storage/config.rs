//! Table configuration.

/// Default cache budget used by [`TableConfig::cached`] (64 MB).
pub const DEFAULT_CACHE_CAPACITY: u64 = 64 * 1024 * 1024;

/// Configuration for opening an out-of-core table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    /// Row cache budget in bytes. Zero disables the cache.
    pub cache_capacity: u64,

    /// Scan columns whose descriptor carries no min/max to compute their extrema.
    /// When disabled such columns get `[0, 0]`.
    pub compute_extrema: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            cache_capacity: 0,
            compute_extrema: true,
        }
    }
}

impl TableConfig {
    /// Create a configuration with caching disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration with the default cache budget.
    pub fn cached() -> Self {
        Self::default().with_cache_capacity(DEFAULT_CACHE_CAPACITY)
    }

    /// Set the row cache budget in bytes.
    pub fn with_cache_capacity(mut self, bytes: u64) -> Self {
        self.cache_capacity = bytes;
        self
    }

    /// Disable the row cache.
    pub fn without_cache(mut self) -> Self {
        self.cache_capacity = 0;
        self
    }

    /// Set whether missing extrema are computed on open.
    pub fn with_compute_extrema(mut self, compute: bool) -> Self {
        self.compute_extrema = compute;
        self
    }

    /// Check if the row cache is enabled.
    pub fn has_cache(&self) -> bool {
        self.cache_capacity > 0
    }
}
