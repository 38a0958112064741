#![cfg_attr(not(test), no_std)]

//! mtx-core - Matrix Market Format Definitions
//!
//! This crate provides the format definitions, value-kind classifier and
//! pure validation for the Matrix Market coordinate text format. It performs
//! no I/O; the `mtx` crate builds the chunked readers and writers on top.

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod error;
pub mod format;
pub mod traits;
pub mod validation;

pub use error::*;
pub use format::*;
pub use traits::*;
pub use validation::*;
