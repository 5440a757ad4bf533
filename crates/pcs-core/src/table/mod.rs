//! Table abstractions.
//!
//! [`OutOfCoreTable`] reads column files on demand through the row cache;
//! [`MemoryTable`] holds its columns in memory. Both implement [`TableSource`],
//! the interface the mapping transforms consume.

mod memory;
mod out_of_core;
mod range;
mod source;

pub use memory::MemoryTable;
pub use out_of_core::OutOfCoreTable;
pub use range::AxisRanges;
pub use source::TableSource;
