//! Chunk layout validation
//!
//! Pure functions that locate and check entry boundaries in body text and
//! validate index ranges handed out by chunk cursors.

use crate::MtxError;

/// Check whether a chunk of body text ends on an entry boundary
///
/// A chunk that is not the last one must end with `\n`. The last chunk may
/// end without one.
pub fn ends_on_entry_boundary(chunk: &[u8], is_last: bool) -> bool {
    is_last || chunk.last() == Some(&b'\n')
}

/// Number of lines in `bytes` holding anything besides whitespace
///
/// A final line without a terminator counts too.
pub fn count_entry_lines(bytes: &[u8]) -> usize {
    let mut count = 0;
    let mut start = 0;
    for end in memchr::memchr_iter(b'\n', bytes).chain(core::iter::once(bytes.len())) {
        if !bytes[start..end].iter().all(u8::is_ascii_whitespace) {
            count += 1;
        }
        start = end + 1;
    }
    count
}

/// Number of line terminators in `bytes`
pub fn count_lines(bytes: &[u8]) -> usize {
    memchr::memchr_iter(b'\n', bytes).count()
}

/// Validate chunk range constraints
///
/// Ensures that `[start, end)` is ordered and inside `[0, total)`.
pub const fn validate_chunk_range(start: usize, end: usize, total: usize) -> Result<(), MtxError> {
    if start > end || end > total {
        return Err(MtxError::InvalidRange);
    }
    Ok(())
}
