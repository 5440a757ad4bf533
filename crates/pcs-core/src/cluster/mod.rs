//! Cluster summaries from a precomputed cluster-ID column.
//!
//! The last column of the input table holds an integer cluster ID per row,
//! dense over `[0, nclusters)`. One streaming pass collects, per cluster, the
//! row count and per-axis bounds over the remaining columns.

mod mapping;

pub use mapping::{Cluster, ClusterMapObject, ClusterMapping};
