//! File-path helpers for `.mtx` files
//!
//! Reading maps the file into memory and parses straight from the mapped
//! bytes. Writing goes through a `BufWriter`.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use memmap2::MmapOptions;
use mtx_core::{MatrixElement, MatrixIndex, MatrixMarketHeader};

use crate::dense::DenseMatrix;
use crate::error::Result;
use crate::io::{read_array, read_triplet, write_array, write_triplet};
use crate::options::Options;
use crate::triplet::TripletMatrix;

/// Read a Matrix Market file into a triplet matrix
pub fn read_triplet_file<I, V, P>(path: P, options: &Options) -> Result<(MatrixMarketHeader, TripletMatrix<I, V>)>
where
    I: MatrixIndex,
    V: MatrixElement,
    P: AsRef<Path>,
{
    with_file_bytes(path.as_ref(), |bytes| read_triplet(bytes, options))
}

/// Read a Matrix Market file into a dense matrix
pub fn read_array_file<V, P>(path: P, options: &Options) -> Result<(MatrixMarketHeader, DenseMatrix<V>)>
where
    V: MatrixElement,
    P: AsRef<Path>,
{
    with_file_bytes(path.as_ref(), |bytes| read_array(bytes, options))
}

/// Map `path` into memory and hand its bytes to `read`
fn with_file_bytes<T>(path: &Path, read: impl FnOnce(&[u8]) -> Result<T>) -> Result<T> {
    let file = File::open(path)?;
    if file.metadata()?.len() == 0 {
        // zero-length files cannot be mapped on every platform
        return read(&b""[..]);
    }

    // SAFETY: read-only mapping, dropped before this function returns
    let mmap = unsafe { MmapOptions::new().map(&file)? };
    log::debug!("mapped {} ({} bytes)", path.display(), mmap.len());
    read(&mmap[..])
}

/// Write a triplet matrix to a Matrix Market file, replacing it if present
pub fn write_triplet_file<I, V, P>(
    path: P,
    header: &MatrixMarketHeader,
    matrix: &TripletMatrix<I, V>,
    options: &Options,
) -> Result<()>
where
    I: MatrixIndex,
    V: MatrixElement,
    P: AsRef<Path>,
{
    let writer = BufWriter::new(File::create(path)?);
    write_triplet(writer, header, matrix, options)
}

/// Write a dense matrix to a Matrix Market array file, replacing it if present
pub fn write_array_file<V, P>(
    path: P,
    header: &MatrixMarketHeader,
    matrix: &DenseMatrix<V>,
    options: &Options,
) -> Result<()>
where
    V: MatrixElement,
    P: AsRef<Path>,
{
    let writer = BufWriter::new(File::create(path)?);
    write_array(writer, header, matrix, options)
}
