//! Write-path chunk cursors
//!
//! A formatter walks an in-memory matrix and carves it into contiguous entry
//! ranges. Each range becomes a task that renders its entries as Matrix
//! Market body lines. The matrix is only borrowed, so tasks share it
//! read-only across worker threads.

pub mod array;
pub mod csc;
pub mod triplet;

pub use array::{ArrayChunk, ArrayFormatter};
pub use csc::{CscChunk, CscFormatter, CscParts};
pub use triplet::{TripletChunk, TripletFormatter};

use core::fmt::Write;

use mtx_core::format::constants::{NEWLINE, SPACE};
use mtx_core::{MatrixElement, MatrixIndex};

/// Number of entries in one write chunk
///
/// Derived from the estimated width of a formatted line. Always at least 1.
pub fn entries_per_chunk<V: MatrixElement>(chunk_size_bytes: usize) -> usize {
    (chunk_size_bytes / V::KIND.estimated_entry_width()).max(1)
}

/// Write one `row col value` line with 1-based coordinates
pub(crate) fn write_entry<R, C, V, W>(out: &mut W, row: R, col: C, val: V) -> core::fmt::Result
where
    R: MatrixIndex,
    C: MatrixIndex,
    V: MatrixElement,
    W: Write,
{
    row.write_one_based(out)?;
    out.write_str(SPACE)?;
    col.write_one_based(out)?;
    out.write_str(SPACE)?;
    val.write_value(out)?;
    out.write_str(NEWLINE)
}
