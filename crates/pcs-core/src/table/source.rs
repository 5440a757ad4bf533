//! Read-side table abstraction consumed by the mapping transforms.

use super::range::AxisRanges;
use crate::error::Result;

/// A table the binning and clustering transforms can stream over.
///
/// Implementations decide where values come from; transforms only see rows,
/// columns, extrema and active ranges.
///
/// # Panics
///
/// The per-column metadata accessors (`label`, `min_value`, `max_value`,
/// `min_range`, `max_range`) index like a slice and panic when `column` is not
/// below [`num_columns`](Self::num_columns). `read_value` and `column` return
/// [`Error::ColumnOutOfBounds`](crate::Error::ColumnOutOfBounds) instead.
pub trait TableSource {
    /// Number of columns.
    fn num_columns(&self) -> usize;

    /// Number of rows.
    fn num_rows(&self) -> usize;

    /// Column labels in table order.
    fn labels(&self) -> &[String];

    /// Extrema and active ranges of every column.
    fn ranges(&self) -> &AxisRanges;

    /// Read one value, widened to `f64`.
    fn read_value(&self, row: usize, column: usize) -> Result<f64>;

    /// Decode every row of a column.
    fn column(&self, column: usize) -> Result<Vec<f64>>;

    /// Label of `column`.
    fn label(&self, column: usize) -> &str {
        &self.labels()[column]
    }

    /// Data minimum of `column`.
    fn min_value(&self, column: usize) -> f64 {
        self.ranges().min_value(column)
    }

    /// Data maximum of `column`.
    fn max_value(&self, column: usize) -> f64 {
        self.ranges().max_value(column)
    }

    /// Active range minimum of `column`.
    fn min_range(&self, column: usize) -> f64 {
        self.ranges().min_range(column)
    }

    /// Active range maximum of `column`.
    fn max_range(&self, column: usize) -> f64 {
        self.ranges().max_range(column)
    }
}

/// Fold a column into its `(min, max)`, skipping NaN. Empty input yields `(0, 0)`.
pub(crate) fn extrema(values: &[f64]) -> (f64, f64) {
    let (min, max) = values
        .iter()
        .filter(|v| !v.is_nan())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if min > max {
        (0.0, 0.0)
    } else {
        (min, max)
    }
}
