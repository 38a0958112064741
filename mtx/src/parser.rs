//! Read-path chunk cursor
//!
//! [`ChunkParser`] reads a body from a buffered byte stream. Each chunk is
//! `chunk_size_bytes` long, extended to the next line terminator, so no
//! entry ever straddles two chunks. Parsing the chunk is deferred to a
//! [`ParseChunk`] task that owns its bytes and needs nothing from the
//! stream.
//!
//! Array bodies carry no coordinates. The cursor counts the values it hands
//! out, so each chunk knows the ordinal of its first value and derives its
//! positions from that alone.

use std::io::{BufRead, Read};
use std::marker::PhantomData;
use std::ops::Range;

use mtx_core::format::constants::MAX_CHUNK_SIZE_BYTES;
use mtx_core::{
    count_entry_lines, count_lines, ends_on_entry_boundary, parse_value, parse_value_tokens, tokenize_array_value,
    tokenize_entry, validate_coordinate, ArrayCursor, FieldType, FormatType, MatrixElement, MatrixIndex,
    MatrixMarketHeader, MtxError, ObjectType, SymmetryType, ValueKind,
};

use crate::chunk::{ChunkSource, ChunkTask};
use crate::error::{Error, Result};
use crate::options::Options;

/// Upper bound on bytes reserved up front for one chunk
const MAX_PREALLOCATED_CHUNK_BYTES: usize = 1 << 22;

/// Entries parsed from one chunk, 0-based
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedBatch<I, V> {
    pub(crate) rows: Vec<I>,
    pub(crate) cols: Vec<I>,
    pub(crate) vals: Vec<V>,
    pub(crate) entry_lines: u64,
}

impl<I, V> ParsedBatch<I, V> {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            rows: Vec::with_capacity(capacity),
            cols: Vec::with_capacity(capacity),
            vals: Vec::with_capacity(capacity),
            entry_lines: 0,
        }
    }

    fn push(&mut self, row: I, col: I, val: V) {
        self.rows.push(row);
        self.cols.push(col);
        self.vals.push(val);
    }

    /// Number of entries, including mirrored ones
    pub fn len(&self) -> usize {
        self.vals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vals.is_empty()
    }

    /// Number of body lines that held an entry
    pub fn entry_lines(&self) -> u64 {
        self.entry_lines
    }
}

/// Header fields a body chunk needs to interpret its lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BodyLayout {
    nrows: u64,
    ncols: u64,
    format: FormatType,
    field: FieldType,
    symmetry: SymmetryType,
    has_col: bool,
}

impl BodyLayout {
    fn from_header(header: &MatrixMarketHeader) -> Self {
        Self {
            nrows: header.nrows,
            ncols: header.ncols,
            format: header.format,
            field: header.field,
            symmetry: header.symmetry,
            has_col: header.object == ObjectType::Matrix,
        }
    }
}

/// Cursor over the body of a coordinate Matrix Market stream
pub struct ChunkParser<R, I, V> {
    reader: R,
    layout: BodyLayout,
    offset: u64,
    line: u64,
    values: u64,
    _types: PhantomData<fn() -> (I, V)>,
}

impl<R: BufRead, I: MatrixIndex, V: MatrixElement> ChunkParser<R, I, V> {
    /// Create a parser positioned at the first body line
    ///
    /// `body_offset` is the absolute byte offset of the body within the
    /// stream and is used only for error reporting. Line numbers continue
    /// after the header's lines.
    pub fn new(reader: R, header: &MatrixMarketHeader, body_offset: u64) -> Result<Self> {
        if header.field == FieldType::Complex && V::KIND != ValueKind::Complex {
            return Err(Error::ComplexIncompatible);
        }
        Ok(Self {
            reader,
            layout: BodyLayout::from_header(header),
            offset: body_offset,
            line: header.header_line_count + 1,
            values: 0,
            _types: PhantomData,
        })
    }

    /// Absolute byte offset of the next chunk
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Line number of the first line of the next chunk
    pub fn line(&self) -> u64 {
        self.line
    }

    /// Recover the reader
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: BufRead, I: MatrixIndex, V: MatrixElement> ChunkSource for ChunkParser<R, I, V> {
    type Task = ParseChunk<I, V>;

    fn has_next(&mut self) -> bool {
        // a read error counts as remaining input so next_chunk can report it
        self.reader.fill_buf().map_or(true, |buf| !buf.is_empty())
    }

    fn next_chunk(&mut self, options: &Options) -> Result<Self::Task> {
        let target = options.chunk_size_bytes.clamp(1, MAX_CHUNK_SIZE_BYTES);
        let capacity = target
            .min(MAX_PREALLOCATED_CHUNK_BYTES)
            .saturating_add(V::KIND.estimated_entry_width());
        let mut bytes = Vec::with_capacity(capacity);

        self.reader.by_ref().take(target as u64).read_to_end(&mut bytes)?;
        if bytes.last() != Some(&b'\n') {
            self.reader.read_until(b'\n', &mut bytes)?;
        }
        if bytes.is_empty() {
            return Err(Error::InvalidArgument("no body text left to parse".into()));
        }
        let is_last = self.reader.fill_buf()?.is_empty();

        let chunk = ParseChunk {
            bytes,
            offset: self.offset,
            first_line: self.line,
            first_value: self.values,
            is_last,
            layout: self.layout,
            generalize_symmetry: options.generalize_symmetry,
            _types: PhantomData,
        };
        log::trace!(
            "parse chunk bytes {}..{} from line {}",
            chunk.offset,
            chunk.offset + chunk.bytes.len() as u64,
            chunk.first_line
        );

        self.offset += chunk.bytes.len() as u64;
        self.line += count_lines(&chunk.bytes) as u64;
        if self.layout.format == FormatType::Array {
            self.values += count_entry_lines(&chunk.bytes) as u64;
        }
        Ok(chunk)
    }
}

/// Deferred parsing of one boundary-aligned run of body lines
pub struct ParseChunk<I, V> {
    bytes: Vec<u8>,
    offset: u64,
    first_line: u64,
    first_value: u64,
    is_last: bool,
    layout: BodyLayout,
    generalize_symmetry: bool,
    _types: PhantomData<fn() -> (I, V)>,
}

impl<I, V> ParseChunk<I, V> {
    /// Absolute byte range covered by this chunk
    pub fn range(&self) -> Range<u64> {
        self.offset..self.offset + self.bytes.len() as u64
    }

    /// Raw chunk text
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn is_last(&self) -> bool {
        self.is_last
    }
}

impl<I: MatrixIndex, V: MatrixElement> ParseChunk<I, V> {
    /// Read one coordinate line as a 0-based `(row, col, value)`
    fn read_coordinate(&self, text: &str) -> std::result::Result<(I, I, V), MtxError> {
        let layout = &self.layout;
        let tokens = tokenize_entry(text, layout.field, layout.has_col)?;
        validate_coordinate(tokens.row, tokens.col, layout.nrows, layout.ncols)?;
        let value = parse_value(&tokens, layout.field)?;

        let row = I::from_one_based(tokens.row).ok_or(MtxError::InvalidIndex)?;
        let col = I::from_one_based(tokens.col).ok_or(MtxError::InvalidIndex)?;
        Ok((row, col, value))
    }

    /// Read one array line at the cursor position and advance the cursor
    fn read_array_value(&self, text: &str, cursor: &mut ArrayCursor) -> std::result::Result<(I, I, V), MtxError> {
        let values = tokenize_array_value(text, self.layout.field)?;
        let value = parse_value_tokens(values, self.layout.field)?;

        let (row, col) = cursor.position().ok_or(MtxError::TooManyValues)?;
        cursor.advance();
        let row = I::from_zero_based(row).ok_or(MtxError::InvalidIndex)?;
        let col = I::from_zero_based(col).ok_or(MtxError::InvalidIndex)?;
        Ok((row, col, value))
    }

    fn parse_line(
        &self,
        text: &str,
        cursor: Option<&mut ArrayCursor>,
        batch: &mut ParsedBatch<I, V>,
    ) -> std::result::Result<(), MtxError> {
        let (row, col, value) = match cursor {
            Some(cursor) => self.read_array_value(text, cursor)?,
            None => self.read_coordinate(text)?,
        };
        batch.push(row, col, value);
        batch.entry_lines += 1;

        let layout = &self.layout;
        if self.generalize_symmetry && row != col {
            let mirrored = match layout.symmetry {
                SymmetryType::General => return Ok(()),
                SymmetryType::Symmetric => value,
                SymmetryType::SkewSymmetric if layout.field == FieldType::Pattern => value,
                SymmetryType::SkewSymmetric => value.negate(),
                SymmetryType::Hermitian => value.conjugate(),
            };
            batch.push(col, row, mirrored);
        }
        Ok(())
    }
}

impl<I: MatrixIndex, V: MatrixElement> ChunkTask for ParseChunk<I, V> {
    type Output = ParsedBatch<I, V>;

    fn execute(self) -> Result<ParsedBatch<I, V>> {
        let end = self.offset + self.bytes.len() as u64;
        if !ends_on_entry_boundary(&self.bytes, self.is_last) {
            return Err(Error::Boundary { offset: end });
        }

        let mut batch = ParsedBatch::with_capacity(self.bytes.len() / V::KIND.estimated_entry_width() + 1);
        let mut line_start = self.offset;
        let mut line_number = self.first_line;
        let mut cursor = (self.layout.format == FormatType::Array).then(|| {
            ArrayCursor::at(self.layout.nrows, self.layout.ncols, self.layout.symmetry, self.first_value)
        });

        for raw in self.bytes.split_inclusive(|&b| b == b'\n') {
            let content = raw.strip_suffix(b"\n").unwrap_or(raw);
            let content = content.strip_suffix(b"\r").unwrap_or(content);

            let parsed = std::str::from_utf8(content)
                .map_err(|_| MtxError::InvalidEncoding)
                .and_then(|text| {
                    if text.bytes().all(|b| b.is_ascii_whitespace()) {
                        Ok(())
                    } else {
                        self.parse_line(text, cursor.as_mut(), &mut batch)
                    }
                });
            if let Err(reason) = parsed {
                return Err(Error::parse(line_start, line_number, content, reason));
            }

            line_start += raw.len() as u64;
            line_number += 1;
        }
        Ok(batch)
    }
}
