//! Format constants for the Matrix Market text format

/// Banner that starts every Matrix Market file
pub const BANNER: &str = "%%MatrixMarket";

/// Single-percent banner emitted by some packages; accepted on read only
pub const BANNER_LENIENT: &str = "%MatrixMarket";

/// Comment lines start with this byte
pub const COMMENT_PREFIX: u8 = b'%';

/// Field separator used when writing
pub const SPACE: &str = " ";

/// Line terminator used when writing
pub const NEWLINE: &str = "\n";

/// Default chunk size for both read and write paths (1 MiB)
pub const DEFAULT_CHUNK_SIZE_BYTES: usize = 1 << 20;

/// Formatted width assumed for one index column when sizing write chunks
pub const ESTIMATED_INDEX_WIDTH: usize = 8;

/// Largest chunk size honoured (1 GiB); larger requests are clamped
pub const MAX_CHUNK_SIZE_BYTES: usize = 1 << 30;
