//! In-memory dense matrix
//!
//! Values are stored column-major, the order of an array body, so a write
//! chunk is a contiguous slice and a general body fills storage front to
//! back.

use mtx_core::{MatrixElement, MatrixIndex};

use crate::chunk::ChunkSink;
use crate::error::{Error, Result};
use crate::parser::ParsedBatch;

/// Dense matrix in column-major order
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix<V> {
    nrows: u64,
    ncols: u64,
    values: Vec<V>,
}

fn element_count(nrows: u64, ncols: u64) -> Result<usize> {
    nrows
        .checked_mul(ncols)
        .and_then(|count| usize::try_from(count).ok())
        .ok_or_else(|| Error::InvalidArgument(format!("{nrows} x {ncols} dense matrix does not fit in memory")))
}

impl<V: MatrixElement> DenseMatrix<V> {
    /// Create a zero-filled matrix
    ///
    /// Fails instead of aborting when the storage cannot be allocated.
    pub fn zeros(nrows: u64, ncols: u64) -> Result<Self> {
        let count = element_count(nrows, ncols)?;
        let mut values = Vec::new();
        values.try_reserve_exact(count).map_err(|e| {
            Error::InvalidArgument(format!("cannot allocate {nrows} x {ncols} dense matrix: {e}"))
        })?;
        values.resize(count, V::zero());
        Ok(Self { nrows, ncols, values })
    }

    /// Wrap column-major values
    pub fn from_column_major(nrows: u64, ncols: u64, values: Vec<V>) -> Result<Self> {
        let count = element_count(nrows, ncols)?;
        if values.len() != count {
            return Err(Error::InvalidArgument(format!(
                "{nrows} x {ncols} dense matrix needs {count} values, found {}",
                values.len()
            )));
        }
        Ok(Self { nrows, ncols, values })
    }

    pub fn nrows(&self) -> u64 {
        self.nrows
    }

    pub fn ncols(&self) -> u64 {
        self.ncols
    }

    /// Column-major values
    pub fn values(&self) -> &[V] {
        &self.values
    }

    fn index(&self, row: u64, col: u64) -> Option<usize> {
        if row >= self.nrows || col >= self.ncols {
            return None;
        }
        usize::try_from(col * self.nrows + row).ok()
    }

    /// Value at 0-based `(row, col)`
    pub fn get(&self, row: u64, col: u64) -> Option<V> {
        self.index(row, col).map(|i| self.values[i])
    }

    /// Overwrite the value at 0-based `(row, col)`
    ///
    /// Returns `false` when the position is outside the matrix.
    pub fn set(&mut self, row: u64, col: u64, value: V) -> bool {
        match self.index(row, col) {
            Some(i) => {
                self.values[i] = value;
                true
            }
            None => false,
        }
    }

    pub fn into_values(self) -> Vec<V> {
        self.values
    }
}

/// Reassembly stores each parsed entry at its position
///
/// A repeated coordinate keeps the last value.
impl<I: MatrixIndex, V: MatrixElement> ChunkSink<ParsedBatch<I, V>> for DenseMatrix<V> {
    fn consume(&mut self, batch: ParsedBatch<I, V>) -> Result<()> {
        let entries = batch.rows.iter().zip(&batch.cols).zip(&batch.vals);
        for ((row, col), &value) in entries {
            let position = row.as_u64().zip(col.as_u64());
            let stored = position.map_or(false, |(r, c)| self.set(r, c, value));
            if !stored {
                return Err(Error::InvalidArgument(format!(
                    "entry ({row}, {col}) lies outside the {} x {} matrix",
                    self.nrows, self.ncols
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros_and_set() {
        let mut m = DenseMatrix::<i32>::zeros(2, 3).unwrap();
        assert_eq!(m.values(), &[0; 6]);
        assert!(m.set(1, 2, 7));
        assert!(!m.set(2, 0, 1));
        assert_eq!(m.get(1, 2), Some(7));
        assert_eq!(m.get(0, 3), None);
        assert_eq!(m.values()[5], 7);
    }

    #[test]
    fn test_from_column_major_checks_length() {
        assert!(DenseMatrix::from_column_major(2, 2, vec![1.0f64; 4]).is_ok());
        assert!(matches!(
            DenseMatrix::from_column_major(2, 2, vec![1.0f64; 3]),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            DenseMatrix::<f64>::zeros(u64::MAX, 2),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_consume_places_entries() {
        let mut m = DenseMatrix::<i64>::zeros(2, 2).unwrap();
        let batch = ParsedBatch {
            rows: vec![1u32, 0],
            cols: vec![0u32, 1],
            vals: vec![5, -5],
            entry_lines: 1,
        };
        m.consume(batch).unwrap();
        assert_eq!(m.values(), &[0, 5, -5, 0]);

        let outside = ParsedBatch {
            rows: vec![2u32],
            cols: vec![0u32],
            vals: vec![1],
            entry_lines: 1,
        };
        assert!(m.consume(outside).is_err());
    }
}
