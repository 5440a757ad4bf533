//! In-memory table.

use super::range::AxisRanges;
use super::source::{extrema, TableSource};
use crate::error::{Error, Result};

/// Table whose columns are fully resident in memory.
#[derive(Debug, Clone)]
pub struct MemoryTable {
    columns: Vec<Vec<f64>>,
    labels: Vec<String>,
    ranges: AxisRanges,
    rows: usize,
}

impl MemoryTable {
    /// Build a table from column vectors. Extrema are computed from the data.
    pub fn new(columns: Vec<Vec<f64>>) -> Result<Self> {
        let rows = columns.first().map_or(0, Vec::len);
        if let Some(index) = columns.iter().position(|c| c.len() != rows) {
            return Err(Error::InvalidInput(format!(
                "column {} has {} rows, expected {}",
                index,
                columns[index].len(),
                rows
            )));
        }

        let (min_values, max_values): (Vec<f64>, Vec<f64>) =
            columns.iter().map(|c| extrema(c)).unzip();
        let labels = (0..columns.len()).map(|i| format!("column{}", i)).collect();

        Ok(Self {
            columns,
            labels,
            ranges: AxisRanges::new(min_values, max_values),
            rows,
        })
    }

    /// Build a table from row tuples.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let width = rows.first().map_or(0, Vec::len);
        let mut columns = vec![Vec::with_capacity(rows.len()); width];
        for (index, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(Error::InvalidInput(format!(
                    "row {} has {} values, expected {}",
                    index,
                    row.len(),
                    width
                )));
            }
            for (column, &value) in columns.iter_mut().zip(row) {
                column.push(value);
            }
        }
        Self::new(columns)
    }

    /// Replace the column labels.
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        labels.resize_with(self.columns.len(), String::new);
        self.labels = labels;
        self
    }

    /// Mutable access to the active ranges.
    pub fn ranges_mut(&mut self) -> &mut AxisRanges {
        &mut self.ranges
    }
}

impl TableSource for MemoryTable {
    fn num_columns(&self) -> usize {
        self.columns.len()
    }

    fn num_rows(&self) -> usize {
        self.rows
    }

    fn labels(&self) -> &[String] {
        &self.labels
    }

    fn ranges(&self) -> &AxisRanges {
        &self.ranges
    }

    fn read_value(&self, row: usize, column: usize) -> Result<f64> {
        let columns = self.columns.len();
        let values = self
            .columns
            .get(column)
            .ok_or(Error::ColumnOutOfBounds { column, columns })?;
        values.get(row).copied().ok_or(Error::RowOutOfBounds {
            row,
            rows: self.rows,
        })
    }

    fn column(&self, column: usize) -> Result<Vec<f64>> {
        let columns = self.columns.len();
        self.columns
            .get(column)
            .cloned()
            .ok_or(Error::ColumnOutOfBounds { column, columns })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows() {
        let table = MemoryTable::from_rows(&[vec![1.0, 2.0], vec![3.0, -4.0], vec![5.0, 6.0]])
            .unwrap()
            .with_labels(["a", "b"]);

        assert_eq!(table.num_columns(), 2);
        assert_eq!(table.num_rows(), 3);
        assert_eq!(table.read_value(1, 1).unwrap(), -4.0);
        assert_eq!(table.column(0).unwrap(), vec![1.0, 3.0, 5.0]);
        assert_eq!(table.label(1), "b");
        assert_eq!(table.min_value(1), -4.0);
        assert_eq!(table.max_value(0), 5.0);
        assert_eq!(table.min_range(0), 1.0);
    }

    #[test]
    fn test_ragged_input_rejected() {
        assert!(matches!(
            MemoryTable::new(vec![vec![1.0], vec![1.0, 2.0]]),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            MemoryTable::from_rows(&[vec![1.0, 2.0], vec![1.0]]),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    #[should_panic]
    fn test_label_out_of_range_panics() {
        let table = MemoryTable::new(vec![vec![1.0]]).unwrap();
        table.label(1);
    }

    #[test]
    fn test_out_of_bounds_reads() {
        let table = MemoryTable::new(vec![vec![1.0, 2.0]]).unwrap();
        assert!(matches!(table.read_value(2, 0), Err(Error::RowOutOfBounds { .. })));
        assert!(matches!(table.read_value(0, 1), Err(Error::ColumnOutOfBounds { .. })));
    }
}
