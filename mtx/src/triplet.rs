//! In-memory coordinate (triplet) matrix
//!
//! Parallel row, column and value vectors with 0-based indices. The three
//! vectors always have the same length.

use mtx_core::{MatrixElement, MatrixIndex, SparseMatrix};

use crate::chunk::ChunkSink;
use crate::error::{Error, Result};
use crate::parser::ParsedBatch;

/// Sparse matrix stored as coordinate triplets
#[derive(Debug, Clone, PartialEq)]
pub struct TripletMatrix<I, V> {
    nrows: u64,
    ncols: u64,
    rows: Vec<I>,
    cols: Vec<I>,
    vals: Vec<V>,
}

impl<I: MatrixIndex, V: MatrixElement> TripletMatrix<I, V> {
    /// Create an empty matrix with the given shape
    pub fn new(nrows: u64, ncols: u64) -> Self {
        Self::with_capacity(nrows, ncols, 0)
    }

    /// Create an empty matrix with room for `capacity` entries
    pub fn with_capacity(nrows: u64, ncols: u64, capacity: usize) -> Self {
        Self {
            nrows,
            ncols,
            rows: Vec::with_capacity(capacity),
            cols: Vec::with_capacity(capacity),
            vals: Vec::with_capacity(capacity),
        }
    }

    /// Build from existing vectors
    ///
    /// Fails if the three vectors differ in length.
    pub fn from_parts(nrows: u64, ncols: u64, rows: Vec<I>, cols: Vec<I>, vals: Vec<V>) -> Result<Self> {
        if rows.len() != cols.len() || rows.len() != vals.len() {
            return Err(Error::InvalidArgument(format!(
                "row, column and value vectors must have equal length ({}, {}, {})",
                rows.len(),
                cols.len(),
                vals.len()
            )));
        }
        Ok(Self {
            nrows,
            ncols,
            rows,
            cols,
            vals,
        })
    }

    /// Append one entry
    pub fn push(&mut self, row: I, col: I, val: V) {
        self.rows.push(row);
        self.cols.push(col);
        self.vals.push(val);
    }

    pub fn nrows(&self) -> u64 {
        self.nrows
    }

    pub fn ncols(&self) -> u64 {
        self.ncols
    }

    pub fn rows(&self) -> &[I] {
        &self.rows
    }

    pub fn cols(&self) -> &[I] {
        &self.cols
    }

    pub fn vals(&self) -> &[V] {
        &self.vals
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.vals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vals.is_empty()
    }

    /// Iterate over `(row, col, value)` entries in storage order
    pub fn iter(&self) -> impl Iterator<Item = (I, I, V)> + '_ {
        self.rows
            .iter()
            .zip(&self.cols)
            .zip(&self.vals)
            .map(|((&r, &c), &v)| (r, c, v))
    }

    /// Split into `(nrows, ncols, rows, cols, vals)`
    pub fn into_parts(self) -> (u64, u64, Vec<I>, Vec<I>, Vec<V>) {
        (self.nrows, self.ncols, self.rows, self.cols, self.vals)
    }
}

impl<I: MatrixIndex, V: MatrixElement> SparseMatrix for TripletMatrix<I, V> {
    type Element = V;

    fn dimensions(&self) -> (u64, u64) {
        (self.nrows, self.ncols)
    }

    fn nnz(&self) -> usize {
        self.len()
    }
}

/// Reassembly appends each parsed batch in order
impl<I: MatrixIndex, V: MatrixElement> ChunkSink<ParsedBatch<I, V>> for TripletMatrix<I, V> {
    fn consume(&mut self, batch: ParsedBatch<I, V>) -> Result<()> {
        self.rows.extend_from_slice(&batch.rows);
        self.cols.extend_from_slice(&batch.cols);
        self.vals.extend_from_slice(&batch.vals);
        Ok(())
    }
}
