//! mtx - Chunked Matrix Market Reader and Writer
//!
//! This library reads and writes matrices in the Matrix Market text format:
//! sparse matrices as coordinate bodies and dense matrices as array bodies. Bodies are split into chunks that never split an
//! entry. Chunks can be formatted or parsed on a per-call worker pool, and
//! results are reassembled in input order, so output is identical for any
//! worker count.
//!
//! ## Architecture
//!
//! - **mtx-core**: header model, value-kind classifier, token parsing and
//!   validation (no I/O, `no_std`)
//! - **mtx**: chunk cursors, sequential and parallel drivers, stream and
//!   file I/O
//!
//! ## Quick Start
//!
//! ```rust
//! use mtx::{read_triplet, write_triplet, MatrixMarketHeader, Options, TripletMatrix};
//!
//! fn example() -> mtx::Result<()> {
//!     let mut matrix = TripletMatrix::<u32, f64>::new(3, 3);
//!     matrix.push(0, 0, 1.5);
//!     matrix.push(1, 2, -2.0);
//!     matrix.push(2, 1, 3.0);
//!
//!     let options = Options::default().with_worker_count(4);
//!     let mut text = Vec::new();
//!     write_triplet(&mut text, &MatrixMarketHeader::default(), &matrix, &options)?;
//!
//!     let (_header, back) = read_triplet::<u32, f64, _>(text.as_slice(), &options)?;
//!     assert_eq!(back, matrix);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod chunk;
pub mod dense;
pub mod driver;
pub mod error;
#[cfg(feature = "mmap")]
pub mod file_io;
pub mod formatter;
pub mod header;
pub mod io;
pub mod options;
pub mod parser;
pub mod triplet;

// Re-export core abstractions and format definitions
pub use mtx_core::{
    FieldType, FormatType, MatrixElement, MatrixIndex, MatrixMarketHeader, MtxError, ObjectType, SparseMatrix,
    SymmetryType, ValueKind,
};

pub use chunk::{ChunkSink, ChunkSource, ChunkTask, WriteSink};
pub use dense::DenseMatrix;
pub use driver::{drive, ParallelDriver, SequentialDriver};
pub use error::{Error, Result};
pub use formatter::{ArrayFormatter, CscFormatter, CscParts, TripletFormatter};
pub use header::{read_header, write_header};
pub use io::{read_array, read_body, read_triplet, write_array, write_body, write_csc, write_triplet};
pub use options::Options;
pub use parser::{ChunkParser, ParsedBatch};
pub use triplet::TripletMatrix;

#[cfg(feature = "mmap")]
pub use file_io::{read_array_file, read_triplet_file, write_array_file, write_triplet_file};
