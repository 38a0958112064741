//! Storage order of array (dense) bodies
//!
//! Array bodies list one value per line in column-major order. General
//! matrices store every element. Symmetric and hermitian matrices store the
//! lower triangle including the diagonal, skew-symmetric matrices the lower
//! triangle without it.

use super::header::SymmetryType;

/// First stored row of `col` for the given symmetry
const fn first_stored_row(symmetry: SymmetryType, col: u64) -> u64 {
    match symmetry {
        SymmetryType::General => 0,
        SymmetryType::Symmetric | SymmetryType::Hermitian => col,
        SymmetryType::SkewSymmetric => col.saturating_add(1),
    }
}

/// Number of values stored in an array body of the given shape
///
/// Returns `None` when the count does not fit in `u64`.
pub fn array_value_count(nrows: u64, ncols: u64, symmetry: SymmetryType) -> Option<u64> {
    match symmetry {
        SymmetryType::General => nrows.checked_mul(ncols),
        _ => {
            // column lengths shrink by one per column: an arithmetic series
            let first = nrows.saturating_sub(first_stored_row(symmetry, 0));
            let stored_cols = ncols.min(first);
            if stored_cols == 0 {
                return Some(0);
            }
            let last = first - (stored_cols - 1);
            let pair_sum = u128::from(first) + u128::from(last);
            u64::try_from(pair_sum * u128::from(stored_cols) / 2).ok()
        }
    }
}

/// Position of the next stored value in an array body
///
/// Positions are 0-based `(row, col)`. The cursor needs no state from
/// earlier lines besides its own, so a chunk can start one from the ordinal
/// of its first value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrayCursor {
    nrows: u64,
    ncols: u64,
    symmetry: SymmetryType,
    row: u64,
    col: u64,
}

impl ArrayCursor {
    /// Cursor at the first stored value
    pub fn new(nrows: u64, ncols: u64, symmetry: SymmetryType) -> Self {
        let mut cursor = Self {
            nrows,
            ncols,
            symmetry,
            row: first_stored_row(symmetry, 0),
            col: 0,
        };
        cursor.skip_empty_columns();
        cursor
    }

    /// Cursor at the value with 0-based ordinal `ordinal`
    pub fn at(nrows: u64, ncols: u64, symmetry: SymmetryType, ordinal: u64) -> Self {
        let mut cursor = Self::new(nrows, ncols, symmetry);
        if symmetry == SymmetryType::General {
            if nrows > 0 {
                cursor.col = (ordinal / nrows).min(ncols);
                cursor.row = if cursor.col == ncols { 0 } else { ordinal % nrows };
            }
            return cursor;
        }

        let mut remaining = ordinal;
        while cursor.col < ncols {
            let column_len = nrows - cursor.row;
            if remaining < column_len {
                cursor.row += remaining;
                return cursor;
            }
            remaining -= column_len;
            cursor.next_column();
        }
        cursor
    }

    /// Current position, `None` once every stored value has been visited
    pub fn position(&self) -> Option<(u64, u64)> {
        (self.col < self.ncols && self.row < self.nrows).then_some((self.row, self.col))
    }

    /// Move to the next stored value
    pub fn advance(&mut self) {
        if self.position().is_none() {
            return;
        }
        self.row += 1;
        self.skip_empty_columns();
    }

    fn next_column(&mut self) {
        self.col += 1;
        self.row = first_stored_row(self.symmetry, self.col);
        self.skip_empty_columns();
    }

    fn skip_empty_columns(&mut self) {
        while self.col < self.ncols && self.row >= self.nrows {
            self.col += 1;
            self.row = first_stored_row(self.symmetry, self.col);
        }
    }
}
