//! Bin count rules.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::table::TableSource;

/// Upper bound on bins per axis. Multi-dimensional bins store `u16` indices.
pub const MAX_BINS: usize = u16::MAX as usize + 1;

/// Rule used to choose the number of bins on an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinCountRule {
    /// `ceil(log2(n) + 1)`; depends only on the row count.
    #[default]
    Sturges,
    /// Bin width `3.49 * sigma * n^(-1/3)`; needs a full scan of the column.
    Scott,
}

impl BinCountRule {
    /// Number of bins for `column` of `table`, in `[1, MAX_BINS]`.
    pub fn nbins<T: TableSource + ?Sized>(self, table: &T, column: usize) -> Result<usize> {
        let n = match self {
            BinCountRule::Sturges => sturges(table.num_rows()),
            BinCountRule::Scott => {
                let values = table.column(column)?;
                scott(&values, table.min_value(column), table.max_value(column))
            }
        };
        Ok(n.clamp(1, MAX_BINS))
    }
}

/// Sturges' formula.
pub fn sturges(n: usize) -> usize {
    if n == 0 {
        return 1;
    }
    ((n as f64).log2() + 1.0).ceil() as usize
}

/// Scott's normal reference rule over `[min, max]`.
///
/// A zero or non-finite bin width (constant column, fewer than two values)
/// yields a single bin.
pub fn scott(values: &[f64], min: f64, max: f64) -> usize {
    let width = scott_bin_width(values);
    if !(width.is_finite() && width > 0.0) {
        return 1;
    }
    let bins = ((max - min) / width).ceil();
    if bins.is_finite() && bins >= 1.0 {
        bins.min(MAX_BINS as f64) as usize
    } else {
        1
    }
}

/// Scott bin width `3.49 * sigma * n^(-1/3)`.
pub fn scott_bin_width(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    3.49 * standard_deviation(values) * n.powf(-1.0 / 3.0)
}

/// Arithmetic mean. Zero for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (`n - 1` denominator). Zero for fewer than two values.
pub fn standard_deviation(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let sum_sq: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    (sum_sq / (values.len() - 1) as f64).sqrt()
}
