//! Cluster mapping transform and its result.

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::table::{AxisRanges, TableSource};

/// Summary of the rows sharing one cluster ID.
///
/// A cluster with no member rows keeps bounds of `+inf` / `-inf`.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    id: usize,
    counter: usize,
    min_values: Vec<f64>,
    max_values: Vec<f64>,
}

impl Cluster {
    fn empty(id: usize, naxes: usize) -> Self {
        Self {
            id,
            counter: 0,
            min_values: vec![f64::INFINITY; naxes],
            max_values: vec![f64::NEG_INFINITY; naxes],
        }
    }

    fn observe(&mut self, axis: usize, value: f64) {
        self.min_values[axis] = self.min_values[axis].min(value);
        self.max_values[axis] = self.max_values[axis].max(value);
    }

    /// Cluster ID.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Number of member rows.
    pub fn counter(&self) -> usize {
        self.counter
    }

    /// Per-axis minimum among member rows.
    pub fn min_values(&self) -> &[f64] {
        &self.min_values
    }

    /// Per-axis maximum among member rows.
    pub fn max_values(&self) -> &[f64] {
        &self.max_values
    }

    /// Check whether any row belongs to this cluster.
    pub fn is_empty(&self) -> bool {
        self.counter == 0
    }
}

/// Result of [`ClusterMapping::exec`].
#[derive(Debug, Clone)]
pub struct ClusterMapObject {
    clusters: Vec<Cluster>,
    positions: Vec<usize>,
    npoints: usize,
    labels: Vec<String>,
    ranges: AxisRanges,
}

impl ClusterMapObject {
    /// Clusters ordered by ascending row count; ties keep ascending ID.
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    /// Cluster with the given ID.
    pub fn cluster(&self, id: usize) -> Option<&Cluster> {
        self.positions.get(id).map(|&position| &self.clusters[position])
    }

    /// Number of clusters.
    pub fn num_clusters(&self) -> usize {
        self.clusters.len()
    }

    /// Number of axes (table columns minus the ID column).
    pub fn num_axes(&self) -> usize {
        self.labels.len()
    }

    /// Number of rows mapped.
    pub fn npoints(&self) -> usize {
        self.npoints
    }

    /// Axis labels copied from the source table.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Axis extrema copied from the source table and their active ranges.
    pub fn ranges(&self) -> &AxisRanges {
        &self.ranges
    }

    /// Mutable access to the active ranges.
    pub fn ranges_mut(&mut self) -> &mut AxisRanges {
        &mut self.ranges
    }
}

/// Partitions rows by the cluster ID in the table's last column.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClusterMapping;

impl ClusterMapping {
    /// Create a cluster mapping.
    pub fn new() -> Self {
        Self
    }

    /// Stream every row of `table` once and summarize each cluster.
    ///
    /// The number of clusters is `floor(max ID) + 1`, taken from the data
    /// maximum of the ID column. IDs may leave gaps, but the maximum must be
    /// below the row count; anything larger is rejected before the per-cluster
    /// storage is allocated.
    pub fn exec<T: TableSource + ?Sized>(&self, table: &T) -> Result<ClusterMapObject> {
        let ncolumns = table.num_columns();
        if ncolumns < 2 {
            return Err(Error::InvalidInput(format!(
                "cluster mapping needs an ID column and at least one axis, table has {} columns",
                ncolumns
            )));
        }

        let id_column = ncolumns - 1;
        let naxes = id_column;
        let nrows = table.num_rows();

        let max_id = table.max_value(id_column);
        if !(max_id.is_finite() && max_id >= 0.0 && max_id < nrows as f64) {
            return Err(Error::InvalidInput(format!(
                "cluster ID column has maximum {} for {} rows",
                max_id, nrows
            )));
        }
        let nclusters = max_id.floor() as usize + 1;
        debug!(clusters = nclusters, axes = naxes, rows = nrows, "Starting cluster mapping");

        let mut clusters: Vec<Cluster> =
            (0..nclusters).map(|id| Cluster::empty(id, naxes)).collect();

        for row in 0..nrows {
            let raw = table.read_value(row, id_column)?;
            let id = cluster_id(raw, nclusters).ok_or_else(|| {
                Error::InvalidInput(format!("row {} has invalid cluster ID {}", row, raw))
            })?;

            let cluster = &mut clusters[id];
            for axis in 0..naxes {
                cluster.observe(axis, table.read_value(row, axis)?);
            }
            cluster.counter += 1;
        }

        let empty = clusters.iter().filter(|c| c.is_empty()).count();
        clusters.sort_by_key(|c| c.counter);

        let mut positions = vec![0; nclusters];
        for (position, cluster) in clusters.iter().enumerate() {
            positions[cluster.id] = position;
        }

        let ranges = AxisRanges::new(
            table.ranges().min_values()[..naxes].to_vec(),
            table.ranges().max_values()[..naxes].to_vec(),
        );

        info!(clusters = nclusters, empty, rows = nrows, "Cluster mapping complete");

        Ok(ClusterMapObject {
            clusters,
            positions,
            npoints: nrows,
            labels: table.labels()[..naxes].to_vec(),
            ranges,
        })
    }
}

/// Interpret a stored value as a cluster ID in `[0, nclusters)`.
fn cluster_id(value: f64, nclusters: usize) -> Option<usize> {
    if value >= 0.0 && value.fract() == 0.0 && value < nclusters as f64 {
        Some(value as usize)
    } else {
        None
    }
}
