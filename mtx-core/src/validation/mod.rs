//! Validation and token parsing utilities
//!
//! This module contains pure validation functions with no I/O dependencies.

pub mod bounds;
pub mod format;
pub mod parsing;

pub use bounds::{validate_col, validate_coordinate, validate_row};
pub use format::{count_entry_lines, count_lines, ends_on_entry_boundary, validate_chunk_range};
pub use parsing::{parse_index, parse_value, parse_value_tokens, tokenize_array_value, tokenize_entry, EntryTokens};
