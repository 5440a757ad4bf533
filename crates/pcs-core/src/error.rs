//! Core error types.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Core table and transform errors.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error while opening, seeking or reading a column file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Requested row lies beyond the readable data of a column.
    #[error("row {row} out of bounds (table has {rows} rows)")]
    RowOutOfBounds {
        /// Requested row index.
        row: usize,
        /// Number of readable rows.
        rows: usize,
    },

    /// Requested column does not exist.
    #[error("column {column} out of bounds (table has {columns} columns)")]
    ColumnOutOfBounds {
        /// Requested column index.
        column: usize,
        /// Number of columns.
        columns: usize,
    },

    /// Read issued against a column whose file handle has been closed.
    #[error("column {0} is closed")]
    ColumnClosed(usize),

    /// Ascii token that is not a number.
    #[error("cannot parse '{token}' in column {column} as a number")]
    Parse {
        /// Column index.
        column: usize,
        /// Offending token.
        token: String,
    },

    /// Input rejected by a transform.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Zero-width active range on an axis that must be binned.
    #[error("degenerate range on column {column}: [{min}, {max}]")]
    DegenerateRange {
        /// Column index.
        column: usize,
        /// Active range minimum.
        min: f64,
        /// Active range maximum.
        max: f64,
    },

    /// Malformed table descriptor.
    #[error("descriptor error: {0}")]
    Descriptor(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Descriptor(err.to_string())
    }
}
