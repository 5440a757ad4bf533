//! Table descriptor supplied by the metadata importer.
//!
//! ```json
//! {
//!   "rowCount": 1024,
//!   "columns": [
//!     { "label": "depth", "type": "float", "format": "binary", "path": "depth.dat" },
//!     { "label": "temp", "type": "double", "format": "ascii", "path": "temp.txt",
//!       "minValue": -2.0, "maxValue": 31.5 }
//!   ]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::column::ColumnDescriptor;
use crate::error::{Error, Result};

/// Ordered column descriptors plus the row count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDescriptor {
    /// Columns in table order.
    pub columns: Vec<ColumnDescriptor>,
    /// Number of rows in every column.
    pub row_count: usize,
}

impl TableDescriptor {
    /// Create a descriptor.
    pub fn new(columns: Vec<ColumnDescriptor>, row_count: usize) -> Self {
        Self { columns, row_count }
    }

    /// Parse a descriptor from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let descriptor: Self = serde_json::from_str(json)?;
        descriptor.validate()?;
        Ok(descriptor)
    }

    /// Load a descriptor from a JSON file.
    ///
    /// Relative column paths are resolved against the descriptor's directory.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let mut descriptor = Self::from_json(&text)?;

        if let Some(base) = path.parent() {
            for column in descriptor.columns.iter_mut() {
                if column.path.is_relative() {
                    column.path = base.join(&column.path);
                }
            }
        }
        Ok(descriptor)
    }

    /// Number of columns.
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Label of column `index`, falling back to `column{index}`.
    pub fn label(&self, index: usize) -> String {
        self.columns
            .get(index)
            .and_then(|c| c.label.clone())
            .unwrap_or_else(|| format!("column{}", index))
    }

    fn validate(&self) -> Result<()> {
        for (index, column) in self.columns.iter().enumerate() {
            if let (Some(min), Some(max)) = (column.min_value, column.max_value) {
                if min > max {
                    return Err(Error::Descriptor(format!(
                        "column {} has minValue {} greater than maxValue {}",
                        index, min, max
                    )));
                }
            }
        }
        Ok(())
    }
}
