//! Bin mapping over adjacent axis pairs.

use tracing::{debug, info};

use super::bin_map::{BinMap, BinMapObject};
use super::rule::BinCountRule;
use crate::error::{Error, Result};
use crate::table::TableSource;

/// Map `value` to a bin of the active range `[min, max]` split into `nbins`.
///
/// Returns `None` for values outside the range (including NaN). The caller
/// guarantees `max > min`.
pub(crate) fn bin_index(value: f64, min: f64, max: f64, nbins: usize) -> Option<usize> {
    if !(value >= min && value <= max) {
        return None;
    }
    let index = ((nbins - 1) as f64 * (value - min) / (max - min)).floor() as usize;
    Some(index.min(nbins - 1))
}

/// Reject zero-width active ranges before any grid is allocated.
pub(crate) fn check_ranges<T: TableSource + ?Sized>(table: &T, axes: usize) -> Result<()> {
    for column in 0..axes {
        let (min, max) = (table.min_range(column), table.max_range(column));
        if !(max > min) {
            return Err(Error::DegenerateRange { column, min, max });
        }
    }
    Ok(())
}

/// Check that a table has rows and columns to bin.
pub(crate) fn check_shape<T: TableSource + ?Sized>(table: &T) -> Result<()> {
    if table.num_columns() == 0 {
        return Err(Error::InvalidInput("table has no columns".into()));
    }
    if table.num_rows() == 0 {
        return Err(Error::InvalidInput("table has no rows".into()));
    }
    Ok(())
}

/// Builds a [`BinMapObject`] from a table.
#[derive(Debug, Clone, Default)]
pub struct BinMapping {
    rule: BinCountRule,
    axis_rules: Vec<Option<BinCountRule>>,
}

impl BinMapping {
    /// Create a mapping that uses `rule` on every axis.
    pub fn new(rule: BinCountRule) -> Self {
        Self {
            rule,
            axis_rules: Vec::new(),
        }
    }

    /// Override the rule for one axis.
    pub fn with_axis_rule(mut self, axis: usize, rule: BinCountRule) -> Self {
        if self.axis_rules.len() <= axis {
            self.axis_rules.resize(axis + 1, None);
        }
        self.axis_rules[axis] = Some(rule);
        self
    }

    /// Rule applied to `axis`.
    pub fn rule_for(&self, axis: usize) -> BinCountRule {
        self.axis_rules
            .get(axis)
            .copied()
            .flatten()
            .unwrap_or(self.rule)
    }

    /// Bin count of every axis of `table`.
    pub fn nbins<T: TableSource + ?Sized>(&self, table: &T) -> Result<Vec<u32>> {
        (0..table.num_columns())
            .map(|axis| self.rule_for(axis).nbins(table, axis).map(|n| n as u32))
            .collect()
    }

    /// Stream every row of `table` once and count it into the grid of every
    /// adjacent axis pair.
    ///
    /// Values are binned against each axis's active range. A row whose value
    /// on an axis lies outside that range is left out of the grids touching
    /// that axis.
    pub fn exec<T: TableSource + ?Sized>(&self, table: &T) -> Result<BinMapObject> {
        check_shape(table)?;

        let naxes = table.num_columns();
        let nrows = table.num_rows();
        if naxes > 1 {
            check_ranges(table, naxes)?;
        }

        let nbins = self.nbins(table)?;
        debug!(axes = naxes, rows = nrows, nbins = ?nbins, "Computed bin counts");

        let mut maps: Vec<BinMap> = nbins
            .windows(2)
            .map(|pair| BinMap::new(pair[0] as usize, pair[1] as usize))
            .collect();

        let mut indices: Vec<Option<usize>> = vec![None; naxes];
        for row in 0..nrows {
            for (axis, slot) in indices.iter_mut().enumerate() {
                let value = table.read_value(row, axis)?;
                *slot = bin_index(
                    value,
                    table.min_range(axis),
                    table.max_range(axis),
                    nbins[axis] as usize,
                );
            }

            for (axis, map) in maps.iter_mut().enumerate() {
                if let (Some(x), Some(y)) = (indices[axis], indices[axis + 1]) {
                    map.increment(x, y);
                }
            }
        }

        info!(axes = naxes, rows = nrows, maps = maps.len(), "Bin mapping complete");
        Ok(BinMapObject::new(nbins, maps, nrows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::MemoryTable;

    fn table() -> MemoryTable {
        let x: Vec<f64> = (0..64).map(|i| i as f64).collect();
        let y: Vec<f64> = (0..64).map(|i| (63 - i) as f64 * 0.5).collect();
        let z: Vec<f64> = (0..64).map(|i| ((i * 7) % 13) as f64).collect();
        MemoryTable::new(vec![x, y, z]).unwrap()
    }

    #[test]
    fn test_bin_index() {
        assert_eq!(bin_index(0.0, 0.0, 10.0, 5), Some(0));
        assert_eq!(bin_index(10.0, 0.0, 10.0, 5), Some(4));
        assert_eq!(bin_index(5.0, 0.0, 10.0, 5), Some(2));
        assert_eq!(bin_index(2.4, 0.0, 10.0, 5), Some(0));
        assert_eq!(bin_index(2.5, 0.0, 10.0, 5), Some(1));
        assert_eq!(bin_index(-0.1, 0.0, 10.0, 5), None);
        assert_eq!(bin_index(f64::NAN, 0.0, 10.0, 5), None);
        assert_eq!(bin_index(3.0, 0.0, 10.0, 1), Some(0));
    }

    #[test]
    fn test_grid_totals_match_rows() {
        let table = table();
        let object = BinMapping::default().exec(&table).unwrap();

        assert_eq!(object.num_axes(), 3);
        assert_eq!(object.num_maps(), 2);
        assert_eq!(object.npoints(), 64);
        // ceil(log2(64) + 1) = 7
        assert_eq!(object.nbins_all(), &[7, 7, 7]);
        for map in object.bin_maps() {
            assert_eq!(map.total(), 64);
            assert_eq!(map.x_bins(), 7);
        }
    }

    #[test]
    fn test_extreme_corners() {
        let table =
            MemoryTable::from_rows(&[vec![0.0, 10.0], vec![4.0, 0.0], vec![4.0, 0.0]]).unwrap();
        let object = BinMapping::default().exec(&table).unwrap();
        // Sturges for 3 rows: ceil(log2(3) + 1) = 3
        let map = object.bin_map(0);
        assert_eq!(map.count(0, 2), 1);
        assert_eq!(map.count(2, 0), 2);
        assert_eq!(map.total(), 3);
    }

    #[test]
    fn test_active_range_excludes_rows() {
        let mut table = table();
        table.ranges_mut().set_range(0, 0.0, 31.0);
        let object = BinMapping::default().exec(&table).unwrap();

        assert_eq!(object.bin_map(0).total(), 32);
        // Grid (1, 2) does not involve axis 0.
        assert_eq!(object.bin_map(1).total(), 64);
    }

    #[test]
    fn test_degenerate_range() {
        let table = MemoryTable::new(vec![vec![1.0, 2.0], vec![3.0, 3.0]]).unwrap();
        let err = BinMapping::default().exec(&table).unwrap_err();
        assert!(matches!(err, Error::DegenerateRange { column: 1, .. }));
    }

    #[test]
    fn test_single_column_has_no_maps() {
        let table = MemoryTable::new(vec![vec![5.0; 8]]).unwrap();
        let object = BinMapping::default().exec(&table).unwrap();
        assert_eq!(object.num_maps(), 0);
        assert_eq!(object.nbins(0), 4);
    }

    #[test]
    fn test_empty_table_rejected() {
        let table = MemoryTable::new(Vec::new()).unwrap();
        assert!(matches!(
            BinMapping::default().exec(&table),
            Err(Error::InvalidInput(_))
        ));
        let table = MemoryTable::new(vec![Vec::new(), Vec::new()]).unwrap();
        assert!(matches!(
            BinMapping::default().exec(&table),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_axis_rule_override() {
        let table = table();
        let mapping = BinMapping::new(BinCountRule::Sturges).with_axis_rule(2, BinCountRule::Scott);
        assert_eq!(mapping.rule_for(0), BinCountRule::Sturges);
        assert_eq!(mapping.rule_for(2), BinCountRule::Scott);
        assert_eq!(mapping.rule_for(9), BinCountRule::Sturges);

        let object = mapping.exec(&table).unwrap();
        let expected = BinCountRule::Scott.nbins(&table, 2).unwrap() as u32;
        assert_eq!(object.nbins(2), expected);
        assert_eq!(object.bin_map(1).y_bins(), expected as usize);
    }
}
