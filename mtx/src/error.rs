//! Error types for reading and writing Matrix Market bodies
//!
//! Every failure of a read or write call is surfaced as a single [`Error`];
//! no partial result accompanies it. The type is `Clone` so the first error
//! captured by a worker can be handed back to the caller after the pool
//! shuts down.

use std::io;
use std::sync::Arc;

use mtx_core::MtxError;

/// Result type for `mtx` operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading or writing Matrix Market data
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Low-level I/O failure on the byte source or sink
    #[error("I/O error: {0}")]
    Io(Arc<io::Error>),

    /// The header is missing, malformed or inconsistent
    #[error("invalid Matrix Market header at line {line}: {message}")]
    InvalidHeader { line: u64, message: String },

    /// A body line could not be parsed
    ///
    /// `offset` is the absolute byte offset of the line start within the
    /// stream, `line` its 1-based line number, `content` the raw text.
    #[error("parse error at byte {offset} (line {line}): {reason}: {content:?}")]
    Parse {
        offset: u64,
        line: u64,
        content: String,
        reason: String,
    },

    /// A value could not be rendered as text
    #[error("failed to format entry {entry}")]
    Format { entry: u64 },

    /// A chunk boundary split an entry
    #[error("chunk ending before byte {offset} does not end on an entry boundary")]
    Boundary { offset: u64 },

    /// A caller-supplied structure is inconsistent
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The file holds complex values but the target type cannot
    #[error("Matrix Market file has complex fields but the value type cannot hold complex values")]
    ComplexIncompatible,

    /// Part of the format this reader does not handle
    #[error("not implemented: {0}")]
    NotImplemented(&'static str),

    /// The body ended before the declared number of entries
    #[error("truncated body: expected {expected} entries, found {found}")]
    Truncated { expected: u64, found: u64 },

    /// The body holds more entries than declared
    #[error("body holds more than the {expected} declared entries")]
    TooManyEntries { expected: u64 },

    /// The per-call worker pool could not be started
    #[error("failed to start worker pool: {0}")]
    ThreadPool(String),

    /// Format-level failure outside a body line
    #[error("{0}")]
    Core(MtxError),
}

impl From<MtxError> for Error {
    fn from(err: MtxError) -> Self {
        Self::Core(err)
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io(Arc::new(err))
    }
}

impl Error {
    /// Build a parse error for one body line
    pub(crate) fn parse(offset: u64, line: u64, raw: &[u8], reason: impl ToString) -> Self {
        Self::Parse {
            offset,
            line,
            content: String::from_utf8_lossy(raw).into_owned(),
            reason: reason.to_string(),
        }
    }

    /// Byte offset of the offending line for parse errors
    pub fn offset(&self) -> Option<u64> {
        match self {
            Self::Parse { offset, .. } | Self::Boundary { offset } => Some(*offset),
            _ => None,
        }
    }
}
