//! PCS Benchmark Suite
//!
//! Criterion benchmarks for the out-of-core table and the mapping transforms.
//!
//! # Benchmark Categories
//!
//! - **Table**: Random and sequential reads, with and without the row cache
//! - **Binning**: Pairwise bin maps and multi-dimensional bins
//! - **Cluster**: Cluster summaries over an ID column

pub mod fixtures;
pub mod harness;

pub use fixtures::{generate_rows, Scale};
pub use harness::TestContext;
