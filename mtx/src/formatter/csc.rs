//! Compressed sparse column formatter
//!
//! Writes a CSC structure as coordinate lines without first expanding it to
//! triplets. Chunks always hold whole columns. With `transpose` set, each
//! entry is written as `(col, row)`, so a CSR matrix can be written by
//! passing it as the CSC structure of its transpose.

use std::ops::Range;

use mtx_core::{validate_chunk_range, MatrixElement, MatrixIndex, SparseMatrix};

use super::{entries_per_chunk, write_entry};
use crate::chunk::{ChunkSource, ChunkTask};
use crate::error::{Error, Result};
use crate::options::Options;

/// Borrowed compressed sparse column arrays
#[derive(Debug, Clone, Copy)]
pub struct CscParts<'a, I, V> {
    nrows: u64,
    ncols: u64,
    col_ptr: &'a [I],
    row_ind: &'a [I],
    vals: &'a [V],
}

impl<'a, I: MatrixIndex, V: MatrixElement> CscParts<'a, I, V> {
    /// Validate and wrap CSC arrays
    ///
    /// `col_ptr` must hold `ncols + 1` non-decreasing offsets starting at 0
    /// and ending at `row_ind.len()`, which must equal `vals.len()`.
    pub fn new(nrows: u64, ncols: u64, col_ptr: &'a [I], row_ind: &'a [I], vals: &'a [V]) -> Result<Self> {
        if row_ind.len() != vals.len() {
            return Err(Error::InvalidArgument(format!(
                "row index and value arrays differ in length ({}, {})",
                row_ind.len(),
                vals.len()
            )));
        }
        if col_ptr.len() as u64 != ncols.saturating_add(1) {
            return Err(Error::InvalidArgument(format!(
                "column pointer array must hold {} offsets, found {}",
                ncols.saturating_add(1),
                col_ptr.len()
            )));
        }

        let mut previous = 0usize;
        for (col, ptr) in col_ptr.iter().enumerate() {
            let ptr = to_offset(*ptr)?;
            if (col == 0 && ptr != 0) || ptr < previous {
                return Err(Error::InvalidArgument(format!(
                    "column pointers must be non-decreasing from 0 (column {col})"
                )));
            }
            previous = ptr;
        }
        if previous != vals.len() {
            return Err(Error::InvalidArgument(format!(
                "last column pointer {previous} does not match {} entries",
                vals.len()
            )));
        }

        Ok(Self {
            nrows,
            ncols,
            col_ptr,
            row_ind,
            vals,
        })
    }

    pub fn nrows(&self) -> u64 {
        self.nrows
    }

    pub fn ncols(&self) -> u64 {
        self.ncols
    }
}

impl<I: MatrixIndex, V: MatrixElement> SparseMatrix for CscParts<'_, I, V> {
    type Element = V;

    fn dimensions(&self) -> (u64, u64) {
        (self.nrows, self.ncols)
    }

    fn nnz(&self) -> usize {
        self.vals.len()
    }
}

fn to_offset<I: MatrixIndex>(ptr: I) -> Result<usize> {
    ptr.as_usize()
        .ok_or_else(|| Error::InvalidArgument(format!("column pointer {ptr} is not a valid offset")))
}

/// Cursor over the columns of a CSC matrix
#[derive(Debug, Clone)]
pub struct CscFormatter<'a, I, V> {
    parts: CscParts<'a, I, V>,
    transpose: bool,
    column: usize,
}

impl<'a, I: MatrixIndex, V: MatrixElement> CscFormatter<'a, I, V> {
    pub fn new(parts: CscParts<'a, I, V>, transpose: bool) -> Self {
        Self {
            parts,
            transpose,
            column: 0,
        }
    }

    /// Rewind to the first column
    pub fn reset(&mut self) {
        self.column = 0;
    }

    fn columns_per_chunk(&self, chunk_size_bytes: usize) -> usize {
        let ncols = (self.parts.col_ptr.len() - 1).max(1);
        let nnz_per_column = (self.parts.nnz() / ncols).max(1);
        (entries_per_chunk::<V>(chunk_size_bytes) / nnz_per_column).max(1)
    }
}

impl<'a, I: MatrixIndex, V: MatrixElement> ChunkSource for CscFormatter<'a, I, V> {
    type Task = CscChunk<'a, I, V>;

    fn has_next(&mut self) -> bool {
        self.column + 1 < self.parts.col_ptr.len()
    }

    fn next_chunk(&mut self, options: &Options) -> Result<Self::Task> {
        if !self.has_next() {
            return Err(Error::InvalidArgument("no columns left to format".into()));
        }

        let ncols = self.parts.col_ptr.len() - 1;
        let first = self.column;
        let last = first
            .saturating_add(self.columns_per_chunk(options.chunk_size_bytes))
            .min(ncols);
        validate_chunk_range(first, last, ncols)?;
        self.column = last;

        let start = to_offset(self.parts.col_ptr[first])?;
        let end = to_offset(self.parts.col_ptr[last])?;
        log::trace!("format columns {first}..{last} (entries {start}..{end})");
        Ok(CscChunk {
            first_column: first,
            start,
            col_ptr: &self.parts.col_ptr[first..=last],
            row_ind: &self.parts.row_ind[start..end],
            vals: &self.parts.vals[start..end],
            transpose: self.transpose,
        })
    }
}

/// Deferred formatting of a run of whole columns
#[derive(Debug, Clone, Copy)]
pub struct CscChunk<'a, I, V> {
    first_column: usize,
    start: usize,
    col_ptr: &'a [I],
    row_ind: &'a [I],
    vals: &'a [V],
    transpose: bool,
}

impl<I, V> CscChunk<'_, I, V> {
    /// Entry indices covered by this chunk
    pub fn range(&self) -> Range<usize> {
        self.start..self.start + self.vals.len()
    }

    /// Columns covered by this chunk
    pub fn columns(&self) -> Range<usize> {
        self.first_column..self.first_column + self.col_ptr.len() - 1
    }
}

impl<I: MatrixIndex, V: MatrixElement> ChunkTask for CscChunk<'_, I, V> {
    type Output = String;

    fn execute(self) -> Result<String> {
        let mut out = String::with_capacity(self.vals.len() * V::KIND.estimated_entry_width());

        for (offset, bounds) in self.col_ptr.windows(2).enumerate() {
            let column = self.first_column + offset;
            let begin = to_offset(bounds[0])? - self.start;
            let end = to_offset(bounds[1])? - self.start;

            for k in begin..end {
                let row = self.row_ind[k];
                let val = self.vals[k];
                let written = if self.transpose {
                    write_entry(&mut out, column, row, val)
                } else {
                    write_entry(&mut out, row, column, val)
                };
                written.map_err(|_| Error::Format {
                    entry: (self.start + k) as u64,
                })?;
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // [[1, 0, 4],
    //  [0, 0, 5],
    //  [2, 3, 0]]
    const COL_PTR: [u32; 4] = [0, 2, 3, 5];
    const ROW_IND: [u32; 5] = [0, 2, 2, 0, 1];
    const VALS: [i64; 5] = [1, 2, 3, 4, 5];

    fn format_all(formatter: &mut CscFormatter<'_, u32, i64>, options: &Options) -> String {
        let mut text = String::new();
        while formatter.has_next() {
            text.push_str(&formatter.next_chunk(options).unwrap().execute().unwrap());
        }
        text
    }

    #[test]
    fn test_csc_lines_in_column_order() {
        let parts = CscParts::new(3, 3, &COL_PTR, &ROW_IND, &VALS).unwrap();
        let mut formatter = CscFormatter::new(parts, false);
        let expected = "1 1 1\n3 1 2\n3 2 3\n1 3 4\n2 3 5\n";
        assert_eq!(format_all(&mut formatter, &Options::sequential()), expected);

        // one column per chunk gives the same text
        formatter.reset();
        assert_eq!(
            format_all(&mut formatter, &Options::sequential().with_chunk_size_bytes(1)),
            expected
        );
    }

    #[test]
    fn test_csc_transpose() {
        let parts = CscParts::new(3, 3, &COL_PTR, &ROW_IND, &VALS).unwrap();
        let mut formatter = CscFormatter::new(parts, true);
        assert_eq!(
            format_all(&mut formatter, &Options::sequential()),
            "1 1 1\n1 3 2\n2 3 3\n3 1 4\n3 2 5\n"
        );
    }

    #[test]
    fn test_chunks_hold_whole_columns() {
        let parts = CscParts::new(3, 3, &COL_PTR, &ROW_IND, &VALS).unwrap();
        let mut formatter = CscFormatter::new(parts, false);
        let options = Options::sequential().with_chunk_size_bytes(1);
        let mut columns = Vec::new();
        let mut entries = Vec::new();
        while formatter.has_next() {
            let chunk = formatter.next_chunk(&options).unwrap();
            columns.push(chunk.columns());
            entries.push(chunk.range());
        }
        assert_eq!(columns, vec![0..1, 1..2, 2..3]);
        assert_eq!(entries, vec![0..2, 2..3, 3..5]);
    }

    #[test]
    fn test_invalid_parts() {
        assert!(CscParts::new(3, 3, &[0u32, 2, 3], &ROW_IND, &VALS).is_err());
        assert!(CscParts::new(3, 3, &[1u32, 2, 3, 5], &ROW_IND, &VALS).is_err());
        assert!(CscParts::new(3, 3, &[0u32, 3, 2, 5], &ROW_IND, &VALS).is_err());
        assert!(CscParts::new(3, 3, &[0u32, 2, 3, 4], &ROW_IND, &VALS).is_err());
        assert!(CscParts::new(3, 3, &COL_PTR, &ROW_IND[..4], &VALS).is_err());
    }

    #[test]
    fn test_empty_matrix_has_no_chunks() {
        let parts = CscParts::<u32, f64>::new(0, 0, &[0], &[], &[]).unwrap();
        let mut formatter = CscFormatter::new(parts, false);
        assert!(!formatter.has_next());
    }
}
