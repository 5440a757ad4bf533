//! PCS Core - Out-of-core tables, bin mapping and cluster mapping.
//!
//! This crate provides the data side of density-based parallel coordinates:
//! random-access reads against per-column files through a sliding row cache,
//! and the histogram and cluster summaries derived from them.

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

pub mod binning;
pub mod cluster;
pub mod error;
pub mod storage;
pub mod table;

pub use binning::{
    Bin, BinCountRule, BinMap, BinMapObject, BinMapping, MultiBinMapObject, MultiBinMapping,
};
pub use cluster::{Cluster, ClusterMapObject, ClusterMapping};
pub use error::{Error, Result};
pub use storage::{
    CacheStats, CacheWindow, ColumnDescriptor, ColumnFormat, ColumnStore, ColumnType, RowCache,
    TableConfig, TableDescriptor,
};
pub use table::{AxisRanges, MemoryTable, OutOfCoreTable, TableSource};
