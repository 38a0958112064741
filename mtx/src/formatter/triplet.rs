//! Coordinate triplet formatter

use std::ops::Range;

use mtx_core::{validate_chunk_range, MatrixElement, MatrixIndex};

use super::{entries_per_chunk, write_entry};
use crate::chunk::{ChunkSource, ChunkTask};
use crate::error::{Error, Result};
use crate::options::Options;
use crate::triplet::TripletMatrix;

/// Cursor over the entries of a coordinate matrix
///
/// Produces chunks covering `[0, len)` in order. [`reset`](Self::reset)
/// rewinds it so the same sequence can be produced again.
#[derive(Debug, Clone)]
pub struct TripletFormatter<'a, I, V> {
    rows: &'a [I],
    cols: &'a [I],
    vals: &'a [V],
    position: usize,
}

impl<'a, I: MatrixIndex, V: MatrixElement> TripletFormatter<'a, I, V> {
    /// Create a formatter over parallel slices
    pub fn new(rows: &'a [I], cols: &'a [I], vals: &'a [V]) -> Result<Self> {
        if rows.len() != cols.len() || rows.len() != vals.len() {
            return Err(Error::InvalidArgument(format!(
                "row, column and value slices must have equal length ({}, {}, {})",
                rows.len(),
                cols.len(),
                vals.len()
            )));
        }
        Ok(Self {
            rows,
            cols,
            vals,
            position: 0,
        })
    }

    /// Create a formatter over a whole matrix
    pub fn from_matrix(matrix: &'a TripletMatrix<I, V>) -> Self {
        Self {
            rows: matrix.rows(),
            cols: matrix.cols(),
            vals: matrix.vals(),
            position: 0,
        }
    }

    /// Total number of entries
    pub fn len(&self) -> usize {
        self.vals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vals.is_empty()
    }

    /// Index of the first entry of the next chunk
    pub fn position(&self) -> usize {
        self.position
    }

    /// Rewind to the first entry
    pub fn reset(&mut self) {
        self.position = 0;
    }
}

impl<'a, I: MatrixIndex, V: MatrixElement> ChunkSource for TripletFormatter<'a, I, V> {
    type Task = TripletChunk<'a, I, V>;

    fn has_next(&mut self) -> bool {
        self.position < self.vals.len()
    }

    fn next_chunk(&mut self, options: &Options) -> Result<Self::Task> {
        if !self.has_next() {
            return Err(Error::InvalidArgument("no entries left to format".into()));
        }

        let start = self.position;
        let end = start
            .saturating_add(entries_per_chunk::<V>(options.chunk_size_bytes))
            .min(self.vals.len());
        validate_chunk_range(start, end, self.vals.len())?;
        self.position = end;

        log::trace!("format chunk entries {start}..{end}");
        Ok(TripletChunk {
            start,
            rows: &self.rows[start..end],
            cols: &self.cols[start..end],
            vals: &self.vals[start..end],
        })
    }
}

/// Deferred formatting of one contiguous entry range
#[derive(Debug, Clone, Copy)]
pub struct TripletChunk<'a, I, V> {
    start: usize,
    rows: &'a [I],
    cols: &'a [I],
    vals: &'a [V],
}

impl<I, V> TripletChunk<'_, I, V> {
    /// Entry indices covered by this chunk
    pub fn range(&self) -> Range<usize> {
        self.start..self.start + self.vals.len()
    }
}

impl<I: MatrixIndex, V: MatrixElement> ChunkTask for TripletChunk<'_, I, V> {
    type Output = String;

    fn execute(self) -> Result<String> {
        let mut out = String::with_capacity(self.vals.len() * V::KIND.estimated_entry_width());
        let entries = self.rows.iter().zip(self.cols).zip(self.vals);
        for (offset, ((&row, &col), &val)) in entries.enumerate() {
            write_entry(&mut out, row, col, val).map_err(|_| Error::Format {
                entry: (self.start + offset) as u64,
            })?;
        }
        Ok(out)
    }
}
