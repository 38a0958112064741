//! Token parsing for Matrix Market body lines
//!
//! Pure functions that turn the text of one body line into 1-based
//! coordinates and value tokens. Array lines carry value tokens only. No I/O and no allocation.

use crate::format::FieldType;
use crate::traits::MatrixElement;
use crate::MtxError;

/// Coordinate and value tokens of one body line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryTokens<'a> {
    /// 1-based row (index for vectors)
    pub row: u64,
    /// 1-based column, 1 for vectors
    pub col: u64,
    /// Value tokens, `None` past the field's token count
    pub values: [Option<&'a str>; 2],
}

/// Parse a 1-based index token
pub fn parse_index(token: &str) -> Result<u64, MtxError> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MtxError::InvalidIndex);
    }
    token.parse::<u64>().map_err(|_| MtxError::InvalidIndex)
}

/// Split a body line into coordinates and value tokens
///
/// `has_col` is false for vector objects, whose lines carry a single index.
pub fn tokenize_entry(line: &str, field: FieldType, has_col: bool) -> Result<EntryTokens<'_>, MtxError> {
    let mut tokens = line.split_ascii_whitespace();

    let row = parse_index(tokens.next().ok_or(MtxError::MissingField)?)?;
    let col = if has_col {
        parse_index(tokens.next().ok_or(MtxError::MissingField)?)?
    } else {
        1
    };

    let values = take_value_tokens(&mut tokens, field)?;
    Ok(EntryTokens { row, col, values })
}

/// Split an array body line into its value tokens
pub fn tokenize_array_value(line: &str, field: FieldType) -> Result<[Option<&str>; 2], MtxError> {
    let mut tokens = line.split_ascii_whitespace();
    take_value_tokens(&mut tokens, field)
}

fn take_value_tokens<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    field: FieldType,
) -> Result<[Option<&'a str>; 2], MtxError> {
    let mut values = [None, None];
    for slot in values.iter_mut().take(field.value_token_count()) {
        *slot = Some(tokens.next().ok_or(MtxError::MissingField)?);
    }

    if tokens.next().is_some() {
        return Err(MtxError::TrailingData);
    }
    Ok(values)
}

/// Read the value of a tokenized line as `T`
///
/// Real and integer fields read into complex types with a zero imaginary
/// part; pattern fields yield [`MatrixElement::pattern`].
pub fn parse_value<T: MatrixElement>(tokens: &EntryTokens<'_>, field: FieldType) -> Result<T, MtxError> {
    parse_value_tokens(tokens.values, field)
}

/// Read value tokens as `T`, with the same adapters as [`parse_value`]
pub fn parse_value_tokens<T: MatrixElement>(values: [Option<&str>; 2], field: FieldType) -> Result<T, MtxError> {
    let value = match (field, values) {
        (FieldType::Pattern, _) => Some(T::pattern()),
        (FieldType::Real | FieldType::Integer, [Some(token), _]) => T::parse_scalar(token),
        (FieldType::Complex, [Some(re), Some(im)]) => T::parse_complex(re, im),
        _ => return Err(MtxError::MissingField),
    };
    value.ok_or(MtxError::InvalidValue)
}
