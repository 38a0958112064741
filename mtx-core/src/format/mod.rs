//! Matrix Market format definitions
//!
//! Pure definitions of the header keywords, array storage order and
//! constants. No I/O.

pub mod array;
pub mod constants;
pub mod header;

pub use array::{array_value_count, ArrayCursor};
pub use header::{FieldType, FormatType, MatrixMarketHeader, ObjectType, SymmetryType};
