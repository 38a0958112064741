//! Abstract interfaces for matrix values, indices and containers
//!
//! Traits are pure interfaces; the implementations for primitive and complex
//! types live next to them.

pub mod element;
pub mod index;
pub mod matrix;

pub use element::{MatrixElement, ValueKind};
pub use index::MatrixIndex;
pub use matrix::SparseMatrix;
