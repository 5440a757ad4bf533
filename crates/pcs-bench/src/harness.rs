//! Benchmark harness helpers.
//!
//! This module writes generated rows to column files in a temporary directory
//! and opens them as an out-of-core table.

use pcs_core::{
    ColumnDescriptor, ColumnFormat, ColumnType, MemoryTable, OutOfCoreTable, TableConfig,
    TableDescriptor,
};

use crate::fixtures::{generate_rows, Scale};

/// Axis columns in generated tables; a cluster ID column follows them.
pub const AXES: usize = 4;

/// Clusters in generated tables.
pub const CLUSTERS: usize = 8;

/// Test context for benchmarks.
///
/// Manages the temporary column files for isolated benchmark runs.
pub struct TestContext {
    pub table: OutOfCoreTable,
    pub rows: Vec<Vec<f64>>,
    _dir: tempfile::TempDir,
}

impl TestContext {
    /// Create a context with generated data at `scale`.
    pub fn with_scale(scale: Scale, config: &TableConfig) -> Self {
        let rows = generate_rows(scale.rows(), AXES, CLUSTERS);
        let dir = tempfile::tempdir().unwrap();

        let mut columns = Vec::with_capacity(AXES + 1);
        for axis in 0..=AXES {
            let ty = if axis == AXES {
                ColumnType::UInt16
            } else if axis % 2 == 0 {
                ColumnType::Float32
            } else {
                ColumnType::Float64
            };
            let file = format!("axis{}.bin", axis);

            let mut bytes = Vec::with_capacity(rows.len() * ty.size());
            for row in &rows {
                ty.encode(row[axis], &mut bytes);
            }
            std::fs::write(dir.path().join(&file), bytes).unwrap();

            let label = if axis == AXES {
                "cluster".to_string()
            } else {
                format!("axis{}", axis)
            };
            columns.push(ColumnDescriptor::new(ty, ColumnFormat::Binary, file).with_label(label));
        }

        // Relative paths resolve against the descriptor's directory.
        let descriptor = TableDescriptor::new(columns, rows.len());
        let path = dir.path().join("table.json");
        std::fs::write(&path, serde_json::to_string_pretty(&descriptor).unwrap()).unwrap();

        let table = OutOfCoreTable::open_path(&path, config).unwrap();
        Self {
            table,
            rows,
            _dir: dir,
        }
    }

    /// The same rows held in memory, for comparison runs.
    pub fn memory_table(&self) -> MemoryTable {
        MemoryTable::from_rows(&self.rows).unwrap()
    }
}
