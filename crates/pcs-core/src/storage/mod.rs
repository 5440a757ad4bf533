//! Storage layer.
//!
//! Per-column files, the row cache window in front of them, and the
//! descriptor/config types needed to open a table.

mod column;
mod column_store;
mod config;
mod descriptor;
mod row_cache;

pub use column::{ColumnDescriptor, ColumnFormat, ColumnType};
pub use column_store::ColumnStore;
pub use config::{TableConfig, DEFAULT_CACHE_CAPACITY};
pub use descriptor::TableDescriptor;
pub use row_cache::{CacheStats, CacheWindow, RowCache};
