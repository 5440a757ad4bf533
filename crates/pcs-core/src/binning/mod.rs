//! Histogram binning for density rendering.
//!
//! [`BinMapping`] builds 2D grids over adjacent axis pairs; [`MultiBinMapping`]
//! builds de-duplicated bins over all axes at once. Both bin against the
//! active range of each axis.

mod bin_map;
mod mapping;
mod multi;
mod rule;

pub use bin_map::{BinMap, BinMapObject};
pub use mapping::BinMapping;
pub use multi::{Bin, MultiBinMapObject, MultiBinMapping};
pub use rule::{mean, scott, scott_bin_width, standard_deviation, sturges, BinCountRule, MAX_BINS};
