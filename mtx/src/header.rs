//! Header reading and writing over byte streams
//!
//! Text-level parsing lives in `mtx_core`; this module pulls lines from a
//! reader and counts the bytes and lines consumed so body errors can report
//! absolute positions.

use std::io::{BufRead, Write};

use mtx_core::{MatrixMarketHeader, MtxError};

use crate::error::{Error, Result};

fn invalid(line: u64, err: MtxError) -> Error {
    Error::InvalidHeader {
        line,
        message: err.to_string(),
    }
}

/// Read one line, returning its text without the line terminator
///
/// Returns `None` at end of input.
fn next_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>, consumed: &mut u64, line: u64) -> Result<Option<String>> {
    buf.clear();
    let n = reader.read_until(b'\n', buf)?;
    if n == 0 {
        return Ok(None);
    }
    *consumed += n as u64;

    let bytes: &[u8] = buf;
    let text = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    let text = text.strip_suffix(b"\r").unwrap_or(text);
    match std::str::from_utf8(text) {
        Ok(text) => Ok(Some(text.to_owned())),
        Err(_) => Err(invalid(line, MtxError::InvalidEncoding)),
    }
}

/// Read banner, comments and dimension line
///
/// Returns the header and the number of bytes consumed, which is the byte
/// offset of the first body line. Blank lines before the dimension line are
/// skipped.
pub fn read_header<R: BufRead>(reader: &mut R) -> Result<(MatrixMarketHeader, u64)> {
    let mut header = MatrixMarketHeader::default();
    let mut buf = Vec::new();
    let mut consumed = 0u64;
    let mut line = 1u64;

    let banner = next_line(reader, &mut buf, &mut consumed, line)?.ok_or(Error::InvalidHeader {
        line,
        message: "empty input".into(),
    })?;
    header.parse_banner(&banner).map_err(|e| invalid(line, e))?;

    loop {
        line += 1;
        let text = next_line(reader, &mut buf, &mut consumed, line)?
            .ok_or_else(|| invalid(line, MtxError::PrematureEof))?;
        if header.push_comment(&text) || text.trim().is_empty() {
            continue;
        }
        header.parse_dimensions(&text).map_err(|e| invalid(line, e))?;
        break;
    }

    header.header_line_count = line;
    log::debug!(
        "read header: {} {} {} {}, {}x{} with {} entries",
        header.object,
        header.format,
        header.field,
        header.symmetry,
        header.nrows,
        header.ncols,
        header.nnz
    );
    Ok((header, consumed))
}

/// Write banner, comments and dimension line
///
/// Returns the number of bytes written.
pub fn write_header<W: Write>(writer: &mut W, header: &MatrixMarketHeader) -> Result<u64> {
    let mut text = String::new();
    header
        .write_to(&mut text)
        .map_err(|_| Error::InvalidArgument("header could not be formatted".into()))?;
    writer.write_all(text.as_bytes())?;
    Ok(text.len() as u64)
}
