//! Core matrix abstraction traits
//!
//! This module defines the minimal interface shared by the in-memory
//! structures the codec reads into and writes from.

use super::element::MatrixElement;

/// Core sparse matrix trait for format-agnostic access
///
/// This trait provides the minimal interface that all sparse matrix
/// containers must provide to be written as a Matrix Market body.
pub trait SparseMatrix {
    /// The element type stored in this matrix
    type Element: MatrixElement;

    /// Get matrix dimensions as (rows, cols)
    fn dimensions(&self) -> (u64, u64);

    /// Get number of stored entries
    fn nnz(&self) -> usize;
}
