//! Per-axis data extrema and active ranges.
//!
//! Every axis carries its data extrema `[min_value, max_value]` and an active
//! sub-interval `[min_range, max_range]` selected by the user. All mutators keep
//! `min_value <= min_range <= max_range <= max_value`.

/// Float equality up to one ulp-scale step, relative to the operands.
///
/// There is no absolute floor, so axes whose data lives near zero still see
/// every real change.
pub(crate) fn approx_eq(a: f64, b: f64) -> bool {
    a == b || (a - b).abs() <= f64::EPSILON * a.abs().max(b.abs())
}

fn clamp(value: f64, lo: f64, hi: f64) -> f64 {
    value.max(lo).min(hi)
}

/// Extrema and active ranges of a set of axes.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisRanges {
    min_values: Vec<f64>,
    max_values: Vec<f64>,
    min_ranges: Vec<f64>,
    max_ranges: Vec<f64>,
}

impl AxisRanges {
    /// Create ranges spanning the full data extent of every axis.
    ///
    /// # Panics
    ///
    /// Panics if the two vectors differ in length.
    pub fn new(min_values: Vec<f64>, max_values: Vec<f64>) -> Self {
        assert_eq!(
            min_values.len(),
            max_values.len(),
            "extrema length mismatch"
        );
        Self {
            min_ranges: min_values.clone(),
            max_ranges: max_values.clone(),
            min_values,
            max_values,
        }
    }

    /// Number of axes.
    pub fn len(&self) -> usize {
        self.min_values.len()
    }

    /// Check if there are no axes.
    pub fn is_empty(&self) -> bool {
        self.min_values.is_empty()
    }

    /// Data minimum of `column`.
    pub fn min_value(&self, column: usize) -> f64 {
        self.min_values[column]
    }

    /// Data maximum of `column`.
    pub fn max_value(&self, column: usize) -> f64 {
        self.max_values[column]
    }

    /// Active range minimum of `column`.
    pub fn min_range(&self, column: usize) -> f64 {
        self.min_ranges[column]
    }

    /// Active range maximum of `column`.
    pub fn max_range(&self, column: usize) -> f64 {
        self.max_ranges[column]
    }

    /// Data minima of all axes.
    pub fn min_values(&self) -> &[f64] {
        &self.min_values
    }

    /// Data maxima of all axes.
    pub fn max_values(&self) -> &[f64] {
        &self.max_values
    }

    /// Active range minima of all axes.
    pub fn min_ranges(&self) -> &[f64] {
        &self.min_ranges
    }

    /// Active range maxima of all axes.
    pub fn max_ranges(&self) -> &[f64] {
        &self.max_ranges
    }

    /// Set the active minimum, clamped into `[min_value, max_range]`.
    ///
    /// Returns `false` when the clamped value equals the current one.
    pub fn set_min_range(&mut self, column: usize, value: f64) -> bool {
        if value.is_nan() {
            return false;
        }
        let new = clamp(value, self.min_values[column], self.max_ranges[column]);
        if approx_eq(self.min_ranges[column], new) {
            return false;
        }
        self.min_ranges[column] = new;
        true
    }

    /// Set the active maximum, clamped into `[min_range, max_value]`.
    ///
    /// Returns `false` when the clamped value equals the current one.
    pub fn set_max_range(&mut self, column: usize, value: f64) -> bool {
        if value.is_nan() {
            return false;
        }
        let new = clamp(value, self.min_ranges[column], self.max_values[column]);
        if approx_eq(self.max_ranges[column], new) {
            return false;
        }
        self.max_ranges[column] = new;
        true
    }

    /// Set both ends of the active range.
    pub fn set_range(&mut self, column: usize, min: f64, max: f64) -> bool {
        // Apply the end that widens first so the other is not clamped by a stale bound.
        if min <= self.max_ranges[column] {
            let a = self.set_min_range(column, min);
            let b = self.set_max_range(column, max);
            a || b
        } else {
            let b = self.set_max_range(column, max);
            let a = self.set_min_range(column, min);
            a || b
        }
    }

    /// Shift the active minimum by `delta`.
    pub fn move_min_range(&mut self, column: usize, delta: f64) -> bool {
        let current = self.min_ranges[column];
        self.set_min_range(column, current + delta)
    }

    /// Shift the active maximum by `delta`.
    pub fn move_max_range(&mut self, column: usize, delta: f64) -> bool {
        let current = self.max_ranges[column];
        self.set_max_range(column, current + delta)
    }

    /// Translate the active range by `delta`, keeping its width.
    ///
    /// If the shift would carry an edge past the data extrema the window is
    /// pinned flush against that bound instead.
    pub fn move_range(&mut self, column: usize, delta: f64) -> bool {
        if delta.is_nan() {
            return false;
        }

        let min_value = self.min_values[column];
        let max_value = self.max_values[column];
        let min_range = self.min_ranges[column];
        let max_range = self.max_ranges[column];
        let width = max_range - min_range;

        let (lo, hi) = if max_range + delta > max_value {
            (max_value - width, max_value)
        } else if min_range + delta < min_value {
            (min_value, min_value + width)
        } else {
            (min_range + delta, max_range + delta)
        };

        let lo = clamp(lo, min_value, max_value);
        let hi = clamp(hi, lo, max_value);

        let changed = !approx_eq(min_range, lo) || !approx_eq(max_range, hi);
        self.min_ranges[column] = lo;
        self.max_ranges[column] = hi;
        changed
    }

    /// Restore the active range of `column` to its data extrema.
    pub fn reset_range(&mut self, column: usize) {
        self.min_ranges[column] = self.min_values[column];
        self.max_ranges[column] = self.max_values[column];
    }

    /// Restore the active ranges of all axes to their data extrema.
    pub fn reset_ranges(&mut self) {
        self.min_ranges.copy_from_slice(&self.min_values);
        self.max_ranges.copy_from_slice(&self.max_values);
    }

    /// Check whether `value` lies inside the active range of `column`.
    pub fn in_range(&self, column: usize, value: f64) -> bool {
        value >= self.min_ranges[column] && value <= self.max_ranges[column]
    }
}
