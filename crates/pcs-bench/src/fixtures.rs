//! Data generation for benchmarks.
//!
//! Generators are seeded so repeated runs see identical tables.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SEED: u64 = 12345;

/// Scale factor for benchmark data generation.
#[derive(Clone, Copy, Debug, Default)]
pub enum Scale {
    /// Tiny scale: 1,000 rows. Use for quick tests and development iteration.
    Tiny,
    /// Small scale: 10,000 rows
    #[default]
    Small,
    /// Medium scale: 100,000 rows
    Medium,
    /// Large scale: 1,000,000 rows
    Large,
}

impl Scale {
    /// Get the row count for this scale.
    pub fn rows(&self) -> usize {
        match self {
            Scale::Tiny => 1_000,
            Scale::Small => 10_000,
            Scale::Medium => 100_000,
            Scale::Large => 1_000_000,
        }
    }

    /// Short name used in benchmark IDs.
    pub fn name(&self) -> &'static str {
        match self {
            Scale::Tiny => "tiny",
            Scale::Small => "small",
            Scale::Medium => "medium",
            Scale::Large => "large",
        }
    }
}

/// Generate `count` rows of `axes` values followed by a cluster ID.
///
/// Each row belongs to one of `clusters` clusters; its axis values scatter
/// around a per-cluster center so the bin maps show distinct dense regions.
pub fn generate_rows(count: usize, axes: usize, clusters: usize) -> Vec<Vec<f64>> {
    let mut rng = StdRng::seed_from_u64(SEED);
    let clusters = clusters.max(1);

    let centers: Vec<Vec<f64>> = (0..clusters)
        .map(|_| (0..axes).map(|_| rng.gen_range(0.0..100.0)).collect())
        .collect();

    (0..count)
        .map(|_| {
            let id = rng.gen_range(0..clusters);
            let mut row: Vec<f64> = centers[id]
                .iter()
                .map(|&center| center + rng.gen_range(-8.0..8.0) + rng.gen_range(-8.0..8.0))
                .collect();
            row.push(id as f64);
            row
        })
        .collect()
}

/// Random row indices for scattered-read benchmarks.
pub fn random_rows(count: usize, rows: usize) -> Vec<usize> {
    let mut rng = StdRng::seed_from_u64(SEED ^ 0x5eed);
    (0..count).map(|_| rng.gen_range(0..rows)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_rows_is_deterministic() {
        let a = generate_rows(50, 3, 4);
        let b = generate_rows(50, 3, 4);
        assert_eq!(a, b);
        assert!(a.iter().all(|row| row.len() == 4));
        assert!(a.iter().all(|row| row[3] >= 0.0 && row[3] < 4.0));
    }

    #[test]
    fn test_random_rows_in_bounds() {
        assert!(random_rows(100, 7).iter().all(|&r| r < 7));
    }
}
