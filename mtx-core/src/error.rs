//! Error types for Matrix Market format operations

/// Errors that can occur while interpreting Matrix Market text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MtxError {
    /// First line does not start with the `%%MatrixMarket` banner
    MissingBanner,
    /// Banner has fewer than four keywords
    IncompleteBanner,
    /// Unknown object keyword (expected matrix or vector)
    InvalidObject,
    /// Unknown format keyword (expected coordinate or array)
    InvalidFormat,
    /// Unknown field keyword
    InvalidField,
    /// Unknown symmetry keyword
    InvalidSymmetry,
    /// Dimension line is missing or not numeric
    InvalidDimensions,
    /// Dimension line declares a negative size
    NegativeDimension,
    /// Header ended before the dimension line
    PrematureEof,
    /// Index token is not a valid non-negative integer
    InvalidIndex,
    /// Row index outside `1..=nrows`
    RowOutOfBounds,
    /// Column index outside `1..=ncols`
    ColumnOutOfBounds,
    /// Value token could not be parsed as the field type
    InvalidValue,
    /// Line ended before all fields were read
    MissingField,
    /// Line has more tokens than the field type allows
    TrailingData,
    /// Line is not valid UTF-8
    InvalidEncoding,
    /// Chunk range is reversed or past the end of its input
    InvalidRange,
    /// Array body holds more values than its shape stores
    TooManyValues,
}

impl core::fmt::Display for MtxError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            MtxError::MissingBanner => "Not a Matrix Market file, missing banner",
            MtxError::IncompleteBanner => "Banner must name object, format, field and symmetry",
            MtxError::InvalidObject => "Invalid object keyword",
            MtxError::InvalidFormat => "Invalid format keyword",
            MtxError::InvalidField => "Invalid field keyword",
            MtxError::InvalidSymmetry => "Invalid symmetry keyword",
            MtxError::InvalidDimensions => "Invalid dimension line",
            MtxError::NegativeDimension => "Dimensions can't be negative",
            MtxError::PrematureEof => "Premature end of header",
            MtxError::InvalidIndex => "Error reading index value",
            MtxError::RowOutOfBounds => "Row index out of bounds",
            MtxError::ColumnOutOfBounds => "Column index out of bounds",
            MtxError::InvalidValue => "Error reading value",
            MtxError::MissingField => "Line has too few fields",
            MtxError::TrailingData => "Line has unexpected trailing data",
            MtxError::InvalidEncoding => "Line is not valid UTF-8",
            MtxError::InvalidRange => "Invalid chunk range",
            MtxError::TooManyValues => "Too many values in array",
        };
        write!(f, "{msg}")
    }
}

/// Result type for Matrix Market format operations
pub type Result<T> = core::result::Result<T, MtxError>;
