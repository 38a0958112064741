//! Whole-stream reading and writing
//!
//! These functions combine header I/O with the chunked body codec. Every
//! call builds its own driver from the [`Options`] it is given and keeps no
//! state after it returns. Sparse matrices are written as coordinate bodies
//! and dense matrices as array bodies; either body reads into either kind.

use std::io::{BufRead, Write};

use mtx_core::{
    FieldType, FormatType, MatrixElement, MatrixIndex, MatrixMarketHeader, ObjectType, SparseMatrix, SymmetryType,
    ValueKind,
};

use crate::chunk::{ChunkSink, ChunkSource, ChunkTask, WriteSink};
use crate::dense::DenseMatrix;
use crate::driver::drive;
use crate::error::{Error, Result};
use crate::formatter::{ArrayFormatter, CscFormatter, CscParts, TripletFormatter};
use crate::header::{read_header, write_header};
use crate::options::Options;
use crate::parser::{ChunkParser, ParsedBatch};
use crate::triplet::TripletMatrix;

/// Upper bound on entries reserved up front from the declared count
const MAX_PREALLOCATED_ENTRIES: u64 = 1 << 24;

/// Reject headers whose body this reader cannot interpret
fn check_readable<V: MatrixElement>(header: &MatrixMarketHeader) -> Result<()> {
    if header.format == FormatType::Array && header.field == FieldType::Pattern {
        return Err(Error::NotImplemented("pattern arrays"));
    }
    if header.object == ObjectType::Vector && header.symmetry != SymmetryType::General {
        return Err(Error::NotImplemented("non-general vectors"));
    }
    if header.field == FieldType::Complex && V::KIND != ValueKind::Complex {
        return Err(Error::ComplexIncompatible);
    }
    Ok(())
}

/// Sink that forwards parsed batches and counts body lines
struct EntryCounter<'s, K> {
    inner: &'s mut K,
    expected: u64,
    found: u64,
}

impl<I, V, K> ChunkSink<ParsedBatch<I, V>> for EntryCounter<'_, K>
where
    K: ChunkSink<ParsedBatch<I, V>>,
{
    fn consume(&mut self, batch: ParsedBatch<I, V>) -> Result<()> {
        self.found += batch.entry_lines();
        if self.found > self.expected {
            return Err(Error::TooManyEntries {
                expected: self.expected,
            });
        }
        self.inner.consume(batch)
    }
}

/// Parse a coordinate or array body into `sink`
///
/// `reader` must be positioned at the first body line and `body_offset` is
/// the absolute offset of that line, used in error reports.
pub fn read_body<R, I, V, K>(
    reader: R,
    header: &MatrixMarketHeader,
    body_offset: u64,
    options: &Options,
    sink: &mut K,
) -> Result<()>
where
    R: BufRead,
    I: MatrixIndex,
    V: MatrixElement,
    K: ChunkSink<ParsedBatch<I, V>>,
{
    check_readable::<V>(header)?;
    let mut parser = ChunkParser::<R, I, V>::new(reader, header, body_offset)?;
    drive(&mut parser, options, sink)
}

/// Parse a body into `sink`, checking the entry count against the header
fn read_counted<R, I, V, K>(
    reader: R,
    header: &MatrixMarketHeader,
    body_offset: u64,
    options: &Options,
    sink: &mut K,
) -> Result<()>
where
    R: BufRead,
    I: MatrixIndex,
    V: MatrixElement,
    K: ChunkSink<ParsedBatch<I, V>>,
{
    let mut counter = EntryCounter {
        inner: sink,
        expected: header.nnz,
        found: 0,
    };
    read_body(reader, header, body_offset, options, &mut counter)?;
    if counter.found < header.nnz {
        return Err(Error::Truncated {
            expected: header.nnz,
            found: counter.found,
        });
    }
    Ok(())
}

/// Read a whole Matrix Market stream into a triplet matrix
///
/// On success the returned header describes the file, except that its
/// symmetry is `general` when symmetric entries were expanded. Fails if the
/// body holds fewer or more entry lines than the header declares. Array
/// bodies yield one entry per stored value.
pub fn read_triplet<I, V, R>(mut reader: R, options: &Options) -> Result<(MatrixMarketHeader, TripletMatrix<I, V>)>
where
    I: MatrixIndex,
    V: MatrixElement,
    R: BufRead,
{
    let (mut header, body_offset) = read_header(&mut reader)?;
    check_readable::<V>(&header)?;

    let options = options.normalized();
    let capacity = header
        .storage_nnz(options.generalize_symmetry)
        .min(MAX_PREALLOCATED_ENTRIES) as usize;
    let mut matrix = TripletMatrix::with_capacity(header.nrows, header.ncols, capacity);
    read_counted(&mut reader, &header, body_offset, &options, &mut matrix)?;

    if options.generalize_symmetry {
        header.symmetry = SymmetryType::General;
    }
    log::debug!("read {} entries", matrix.len());
    Ok((header, matrix))
}

/// Read a whole Matrix Market stream into a dense matrix
///
/// Array bodies fill the matrix in column-major order. Coordinate bodies
/// set the listed entries and leave the rest zero. Symmetry handling and
/// the entry count check match [`read_triplet`]; without generalization a
/// symmetric file fills only its stored triangle.
pub fn read_array<V, R>(mut reader: R, options: &Options) -> Result<(MatrixMarketHeader, DenseMatrix<V>)>
where
    V: MatrixElement,
    R: BufRead,
{
    let (mut header, body_offset) = read_header(&mut reader)?;
    check_readable::<V>(&header)?;

    let options = options.normalized();
    let mut matrix = DenseMatrix::zeros(header.nrows, header.ncols)?;
    read_counted::<_, u64, V, _>(&mut reader, &header, body_offset, &options, &mut matrix)?;

    if options.generalize_symmetry {
        header.symmetry = SymmetryType::General;
    }
    log::debug!("read {} x {} dense matrix", matrix.nrows(), matrix.ncols());
    Ok((header, matrix))
}

/// Format every chunk of `source` to `writer`
///
/// Returns the number of body bytes written.
pub fn write_body<S, W>(source: &mut S, writer: W, options: &Options) -> Result<u64>
where
    S: ChunkSource,
    S::Task: ChunkTask<Output = String>,
    W: Write,
{
    let mut sink = WriteSink::new(writer);
    drive(source, options, &mut sink)?;
    Ok(sink.bytes_written())
}

/// Write a triplet matrix as a coordinate Matrix Market stream
///
/// `header` supplies the symmetry and comment. Object, format, field, shape
/// and entry count are taken from the matrix.
pub fn write_triplet<I, V, W>(
    mut writer: W,
    header: &MatrixMarketHeader,
    matrix: &TripletMatrix<I, V>,
    options: &Options,
) -> Result<()>
where
    I: MatrixIndex,
    V: MatrixElement,
    W: Write,
{
    let header = coordinate_header(header, matrix, false);
    write_header(&mut writer, &header)?;

    let mut formatter = TripletFormatter::from_matrix(matrix);
    let written = write_body(&mut formatter, &mut writer, options)?;
    writer.flush()?;
    log::debug!("wrote {} entries ({written} body bytes)", matrix.len());
    Ok(())
}

/// Write a compressed sparse column matrix as a coordinate stream
///
/// With `transpose` set the file describes the transpose of `parts`: shape
/// and coordinates are swapped.
pub fn write_csc<I, V, W>(
    mut writer: W,
    header: &MatrixMarketHeader,
    parts: CscParts<'_, I, V>,
    transpose: bool,
    options: &Options,
) -> Result<()>
where
    I: MatrixIndex,
    V: MatrixElement,
    W: Write,
{
    let header = coordinate_header(header, &parts, transpose);
    write_header(&mut writer, &header)?;

    let mut formatter = CscFormatter::new(parts, transpose);
    write_body(&mut formatter, &mut writer, options)?;
    writer.flush()?;
    Ok(())
}

/// Write a dense matrix as an array Matrix Market stream
///
/// Every value is written, so the file is always `general`. `header`
/// supplies the comment only.
pub fn write_array<V, W>(
    mut writer: W,
    header: &MatrixMarketHeader,
    matrix: &DenseMatrix<V>,
    options: &Options,
) -> Result<()>
where
    V: MatrixElement,
    W: Write,
{
    let header = MatrixMarketHeader {
        object: ObjectType::Matrix,
        format: FormatType::Array,
        field: V::field_type(),
        symmetry: SymmetryType::General,
        nrows: matrix.nrows(),
        ncols: matrix.ncols(),
        vector_length: 0,
        nnz: matrix.values().len() as u64,
        ..header.clone()
    };
    write_header(&mut writer, &header)?;

    let mut formatter = ArrayFormatter::from_matrix(matrix);
    let written = write_body(&mut formatter, &mut writer, options)?;
    writer.flush()?;
    log::debug!("wrote {} values ({written} body bytes)", matrix.values().len());
    Ok(())
}

/// Coordinate header for `matrix`, keeping symmetry and comment of `header`
///
/// With `transpose` set the shape is swapped.
fn coordinate_header<M>(header: &MatrixMarketHeader, matrix: &M, transpose: bool) -> MatrixMarketHeader
where
    M: SparseMatrix,
{
    let (nrows, ncols) = matrix.dimensions();
    let (nrows, ncols) = if transpose { (ncols, nrows) } else { (nrows, ncols) };
    MatrixMarketHeader {
        object: ObjectType::Matrix,
        format: FormatType::Coordinate,
        field: <M::Element as MatrixElement>::field_type(),
        nrows,
        ncols,
        vector_length: 0,
        nnz: matrix.nnz() as u64,
        ..header.clone()
    }
}
