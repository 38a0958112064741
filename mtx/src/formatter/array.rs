//! Dense array formatter
//!
//! Writes column-major values one per line. Values carry no coordinates, so
//! any contiguous range is a valid chunk.

use std::fmt::Write;
use std::ops::Range;

use mtx_core::format::constants::NEWLINE;
use mtx_core::{validate_chunk_range, MatrixElement};

use crate::chunk::{ChunkSource, ChunkTask};
use crate::dense::DenseMatrix;
use crate::error::{Error, Result};
use crate::options::Options;

/// Number of values in one array write chunk, at least 1
fn values_per_chunk<V: MatrixElement>(chunk_size_bytes: usize) -> usize {
    (chunk_size_bytes / (V::KIND.estimated_width() + NEWLINE.len())).max(1)
}

/// Cursor over the values of a dense matrix
#[derive(Debug, Clone)]
pub struct ArrayFormatter<'a, V> {
    vals: &'a [V],
    position: usize,
}

impl<'a, V: MatrixElement> ArrayFormatter<'a, V> {
    /// Create a formatter over column-major values
    pub fn new(vals: &'a [V]) -> Self {
        Self { vals, position: 0 }
    }

    pub fn from_matrix(matrix: &'a DenseMatrix<V>) -> Self {
        Self::new(matrix.values())
    }

    /// Rewind to the first value
    pub fn reset(&mut self) {
        self.position = 0;
    }
}

impl<'a, V: MatrixElement> ChunkSource for ArrayFormatter<'a, V> {
    type Task = ArrayChunk<'a, V>;

    fn has_next(&mut self) -> bool {
        self.position < self.vals.len()
    }

    fn next_chunk(&mut self, options: &Options) -> Result<Self::Task> {
        if !self.has_next() {
            return Err(Error::InvalidArgument("no values left to format".into()));
        }

        let start = self.position;
        let end = start
            .saturating_add(values_per_chunk::<V>(options.chunk_size_bytes))
            .min(self.vals.len());
        validate_chunk_range(start, end, self.vals.len())?;
        self.position = end;

        log::trace!("format array values {start}..{end}");
        Ok(ArrayChunk {
            start,
            vals: &self.vals[start..end],
        })
    }
}

/// Deferred formatting of a contiguous run of values
#[derive(Debug, Clone, Copy)]
pub struct ArrayChunk<'a, V> {
    start: usize,
    vals: &'a [V],
}

impl<V> ArrayChunk<'_, V> {
    /// Value indices covered by this chunk
    pub fn range(&self) -> Range<usize> {
        self.start..self.start + self.vals.len()
    }
}

impl<V: MatrixElement> ChunkTask for ArrayChunk<'_, V> {
    type Output = String;

    fn execute(self) -> Result<String> {
        let mut out = String::with_capacity(self.vals.len() * (V::KIND.estimated_width() + 1));
        for (offset, val) in self.vals.iter().enumerate() {
            val.write_value(&mut out)
                .and_then(|()| out.write_str(NEWLINE))
                .map_err(|_| Error::Format {
                    entry: (self.start + offset) as u64,
                })?;
        }
        Ok(out)
    }
}
