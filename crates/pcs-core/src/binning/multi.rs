//! Multi-dimensional binning.
//!
//! Every row is mapped to a tuple of per-axis bin indices over all axes, and
//! identical tuples are merged into a single counted [`Bin`].

use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use tracing::info;

use super::mapping::{bin_index, check_ranges, check_shape};
use super::rule::BinCountRule;
use crate::error::{Error, Result};
use crate::table::{AxisRanges, TableSource};

/// A populated cell of the multi-dimensional grid.
///
/// Equality and hashing consider only the index tuple. Ranking by density
/// uses [`Bin::cmp_density`], which looks only at the counter.
#[derive(Debug, Clone)]
pub struct Bin {
    indices: Vec<u16>,
    counter: usize,
}

impl Bin {
    /// Create a bin observed once.
    pub fn new(indices: Vec<u16>) -> Self {
        Self {
            indices,
            counter: 1,
        }
    }

    /// Per-axis bin indices.
    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    /// Number of rows that fell into this bin.
    pub fn counter(&self) -> usize {
        self.counter
    }

    /// Record one more occurrence.
    pub fn count(&mut self) {
        self.counter += 1;
    }

    /// Order two bins by occurrence count.
    pub fn cmp_density(&self, other: &Self) -> Ordering {
        self.counter.cmp(&other.counter)
    }
}

impl PartialEq for Bin {
    fn eq(&self, other: &Self) -> bool {
        self.indices == other.indices
    }
}

impl Eq for Bin {}

impl Hash for Bin {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.indices.hash(state);
    }
}

/// De-duplicated multi-dimensional bins plus the active-range state of the
/// axes they were built over.
#[derive(Debug, Clone)]
pub struct MultiBinMapObject {
    nbins: Vec<u32>,
    bins: Vec<Bin>,
    lookup: HashMap<Vec<u16>, usize>,
    npoints: usize,
    labels: Vec<String>,
    ranges: AxisRanges,
}

impl MultiBinMapObject {
    /// Create an empty object for axes with the given bin counts.
    ///
    /// # Panics
    ///
    /// Panics if `nbins`, `labels` and `ranges` disagree on the number of axes.
    pub fn new(nbins: Vec<u32>, labels: Vec<String>, ranges: AxisRanges) -> Self {
        assert_eq!(nbins.len(), labels.len(), "label count mismatch");
        assert_eq!(nbins.len(), ranges.len(), "range count mismatch");
        Self {
            nbins,
            bins: Vec::new(),
            lookup: HashMap::new(),
            npoints: 0,
            labels,
            ranges,
        }
    }

    /// Count one point into the bin identified by `indices`.
    ///
    /// A tuple seen before increments the existing bin's counter.
    pub fn insert(&mut self, indices: Vec<u16>) -> Result<()> {
        if indices.len() != self.nbins.len() {
            return Err(Error::InvalidInput(format!(
                "bin has {} indices, expected {}",
                indices.len(),
                self.nbins.len()
            )));
        }
        if let Some(axis) = indices
            .iter()
            .zip(&self.nbins)
            .position(|(&i, &n)| i as u32 >= n)
        {
            return Err(Error::InvalidInput(format!(
                "bin index {} on axis {} exceeds {} bins",
                indices[axis], axis, self.nbins[axis]
            )));
        }

        match self.lookup.get(&indices) {
            Some(&position) => self.bins[position].count(),
            None => {
                self.lookup.insert(indices.clone(), self.bins.len());
                self.bins.push(Bin::new(indices));
            }
        }
        self.npoints += 1;
        Ok(())
    }

    /// Bins in first-seen order.
    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    /// Bins ordered from least to most populated. Ties keep first-seen order.
    pub fn bins_by_density(&self) -> Vec<&Bin> {
        let mut bins: Vec<&Bin> = self.bins.iter().collect();
        bins.sort_by(|a, b| a.cmp_density(b));
        bins
    }

    /// Look up the bin with the given index tuple.
    pub fn find(&self, indices: &[u16]) -> Option<&Bin> {
        self.lookup.get(indices).map(|&position| &self.bins[position])
    }

    /// Number of distinct bins.
    pub fn num_bins(&self) -> usize {
        self.bins.len()
    }

    /// Bin counts of all axes.
    pub fn nbins(&self) -> &[u32] {
        &self.nbins
    }

    /// Number of axes.
    pub fn num_axes(&self) -> usize {
        self.nbins.len()
    }

    /// Points counted into bins.
    pub fn npoints(&self) -> usize {
        self.npoints
    }

    /// Axis labels.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Extrema and active ranges.
    pub fn ranges(&self) -> &AxisRanges {
        &self.ranges
    }

    /// Mutable access to the active ranges.
    pub fn ranges_mut(&mut self) -> &mut AxisRanges {
        &mut self.ranges
    }
}

/// Builds a [`MultiBinMapObject`] from a table.
#[derive(Debug, Clone, Default)]
pub struct MultiBinMapping {
    rule: BinCountRule,
}

impl MultiBinMapping {
    /// Create a mapping that uses `rule` on every axis.
    pub fn new(rule: BinCountRule) -> Self {
        Self { rule }
    }

    /// Map every row of `table` to its bin-index tuple across all axes.
    ///
    /// Rows with a value outside the active range of any axis are skipped.
    pub fn exec<T: TableSource + ?Sized>(&self, table: &T) -> Result<MultiBinMapObject> {
        check_shape(table)?;
        let naxes = table.num_columns();
        let nrows = table.num_rows();
        check_ranges(table, naxes)?;

        let nbins = (0..naxes)
            .map(|axis| self.rule.nbins(table, axis).map(|n| n as u32))
            .collect::<Result<Vec<u32>>>()?;

        let mut object =
            MultiBinMapObject::new(nbins.clone(), table.labels().to_vec(), table.ranges().clone());

        'rows: for row in 0..nrows {
            let mut indices = Vec::with_capacity(naxes);
            for axis in 0..naxes {
                let value = table.read_value(row, axis)?;
                match bin_index(
                    value,
                    table.min_range(axis),
                    table.max_range(axis),
                    nbins[axis] as usize,
                ) {
                    Some(index) => indices.push(index as u16),
                    None => continue 'rows,
                }
            }
            object.insert(indices)?;
        }

        info!(
            axes = naxes,
            rows = nrows,
            points = object.npoints(),
            bins = object.num_bins(),
            "Multi-dimensional bin mapping complete"
        );
        Ok(object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::MemoryTable;

    fn object() -> MultiBinMapObject {
        MultiBinMapObject::new(
            vec![4, 4],
            vec!["a".into(), "b".into()],
            AxisRanges::new(vec![0.0, 0.0], vec![1.0, 1.0]),
        )
    }

    #[test]
    fn test_duplicate_tuple_increments() {
        let mut object = object();
        object.insert(vec![1, 2]).unwrap();
        object.insert(vec![1, 2]).unwrap();

        assert_eq!(object.num_bins(), 1);
        assert_eq!(object.bins()[0].counter(), 2);
        assert_eq!(object.npoints(), 2);
    }

    #[test]
    fn test_distinct_tuples() {
        let mut object = object();
        object.insert(vec![0, 0]).unwrap();
        object.insert(vec![3, 1]).unwrap();
        object.insert(vec![3, 1]).unwrap();
        object.insert(vec![3, 1]).unwrap();
        object.insert(vec![2, 2]).unwrap();
        object.insert(vec![2, 2]).unwrap();

        assert_eq!(object.num_bins(), 3);
        let ranked: Vec<usize> = object.bins_by_density().iter().map(|b| b.counter()).collect();
        assert_eq!(ranked, vec![1, 2, 3]);
        assert_eq!(object.find(&[3, 1]).unwrap().counter(), 3);
        assert!(object.find(&[1, 1]).is_none());
    }

    #[test]
    fn test_insert_validation() {
        let mut object = object();
        assert!(matches!(object.insert(vec![1]), Err(Error::InvalidInput(_))));
        assert!(matches!(object.insert(vec![1, 4]), Err(Error::InvalidInput(_))));
        assert_eq!(object.npoints(), 0);
    }

    #[test]
    fn test_bin_equality_ignores_counter() {
        let mut a = Bin::new(vec![1, 2, 3]);
        let b = Bin::new(vec![1, 2, 3]);
        a.count();
        assert_eq!(a, b);
        assert_eq!(a.cmp_density(&b), Ordering::Greater);
        assert_ne!(Bin::new(vec![1, 2]), Bin::new(vec![2, 1]));
    }

    #[test]
    fn test_mapping_counts_all_rows() {
        let table = MemoryTable::from_rows(&[
            vec![0.0, 0.0, 0.0],
            vec![0.0, 0.0, 0.0],
            vec![1.0, 1.0, 1.0],
            vec![0.5, 0.1, 0.9],
        ])
        .unwrap()
        .with_labels(["x", "y", "z"]);

        let object = MultiBinMapping::default().exec(&table).unwrap();
        assert_eq!(object.num_axes(), 3);
        assert_eq!(object.npoints(), 4);
        assert_eq!(object.num_bins(), 3);
        assert_eq!(object.find(&[0, 0, 0]).unwrap().counter(), 2);
        let total: usize = object.bins().iter().map(Bin::counter).sum();
        assert_eq!(total, 4);
        assert_eq!(object.labels()[2], "z");
    }

    #[test]
    fn test_mapping_skips_rows_outside_selection() {
        let mut table = MemoryTable::from_rows(&[
            vec![0.0, 0.0],
            vec![5.0, 1.0],
            vec![10.0, 2.0],
        ])
        .unwrap();
        table.ranges_mut().set_max_range(0, 6.0);

        let object = MultiBinMapping::default().exec(&table).unwrap();
        assert_eq!(object.npoints(), 2);
        assert_eq!(object.ranges().max_range(0), 6.0);
    }

    #[test]
    fn test_object_range_mutators() {
        let mut object = object();
        assert!(object.ranges_mut().set_range(0, 0.25, 0.5));
        object.ranges_mut().move_range(0, 1.0);
        assert_eq!(object.ranges().min_range(0), 0.75);
        assert_eq!(object.ranges().max_range(0), 1.0);
        object.ranges_mut().reset_ranges();
        assert_eq!(object.ranges().min_range(0), 0.0);
    }
}
