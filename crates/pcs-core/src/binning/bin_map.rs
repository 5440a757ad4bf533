//! Two-dimensional bin maps over adjacent axis pairs.

/// Histogram grid for the axis pair `(i, i + 1)`.
///
/// The grid is `x_bins` wide (axis `i`) and `y_bins` tall (axis `i + 1`);
/// cell `(x, y)` is stored at `x + y * x_bins`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinMap {
    x_bins: usize,
    y_bins: usize,
    counts: Vec<u32>,
}

impl BinMap {
    /// Create a zeroed grid.
    pub fn new(x_bins: usize, y_bins: usize) -> Self {
        Self {
            x_bins,
            y_bins,
            counts: vec![0; x_bins * y_bins],
        }
    }

    /// Bins along axis `i`.
    pub fn x_bins(&self) -> usize {
        self.x_bins
    }

    /// Bins along axis `i + 1`.
    pub fn y_bins(&self) -> usize {
        self.y_bins
    }

    /// Count in cell `(x, y)`.
    pub fn count(&self, x: usize, y: usize) -> u32 {
        self.counts[x + y * self.x_bins]
    }

    /// All cells in storage order.
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    /// Sum over all cells.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| c as u64).sum()
    }

    /// Largest cell count.
    pub fn max_count(&self) -> u32 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    pub(crate) fn increment(&mut self, x: usize, y: usize) {
        self.counts[x + y * self.x_bins] += 1;
    }
}

/// Result of a bin mapping pass: one grid per adjacent axis pair plus the
/// bin count of every axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinMapObject {
    nbins: Vec<u32>,
    maps: Vec<BinMap>,
    npoints: usize,
}

impl BinMapObject {
    pub(crate) fn new(nbins: Vec<u32>, maps: Vec<BinMap>, npoints: usize) -> Self {
        Self {
            nbins,
            maps,
            npoints,
        }
    }

    /// Grid for the axis pair `(index, index + 1)`.
    pub fn bin_map(&self, index: usize) -> &BinMap {
        &self.maps[index]
    }

    /// All grids in axis order.
    pub fn bin_maps(&self) -> &[BinMap] {
        &self.maps
    }

    /// Bin count of axis `index`.
    pub fn nbins(&self, index: usize) -> u32 {
        self.nbins[index]
    }

    /// Bin counts of all axes.
    pub fn nbins_all(&self) -> &[u32] {
        &self.nbins
    }

    /// Number of grids (axes - 1).
    pub fn num_maps(&self) -> usize {
        self.maps.len()
    }

    /// Number of axes.
    pub fn num_axes(&self) -> usize {
        self.nbins.len()
    }

    /// Rows streamed to build the grids.
    pub fn npoints(&self) -> usize {
        self.npoints
    }
}
