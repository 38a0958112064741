//! Coordinate bounds validation
//!
//! Pure checks of 1-based file coordinates against the declared shape.

use crate::MtxError;

/// Validate a 1-based row index against `nrows`
pub const fn validate_row(row: u64, nrows: u64) -> Result<u64, MtxError> {
    if row == 0 || row > nrows {
        return Err(MtxError::RowOutOfBounds);
    }
    Ok(row)
}

/// Validate a 1-based column index against `ncols`
pub const fn validate_col(col: u64, ncols: u64) -> Result<u64, MtxError> {
    if col == 0 || col > ncols {
        return Err(MtxError::ColumnOutOfBounds);
    }
    Ok(col)
}

/// Validate a 1-based coordinate pair against the matrix shape
pub const fn validate_coordinate(row: u64, col: u64, nrows: u64, ncols: u64) -> Result<(), MtxError> {
    if let Err(e) = validate_row(row, nrows) {
        return Err(e);
    }
    if let Err(e) = validate_col(col, ncols) {
        return Err(e);
    }
    Ok(())
}
