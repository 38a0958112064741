//! Matrix Market header definitions
//!
//! This module contains the header model (banner keywords, dimensions and
//! comment) together with the pure text parsing and formatting for it. Line
//! reading is left to the caller.

#[cfg(feature = "alloc")]
extern crate alloc;
#[cfg(feature = "alloc")]
use alloc::string::String;

use super::array::array_value_count;
use super::constants::{BANNER, BANNER_LENIENT, COMMENT_PREFIX};
use crate::error::{MtxError, Result};

/// Matrix Market object keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObjectType {
    #[default]
    Matrix,
    Vector,
}

/// Matrix Market format keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FormatType {
    Array,
    #[default]
    Coordinate,
}

/// Matrix Market field keyword
///
/// The keyword `double` is read as [`FieldType::Real`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldType {
    #[default]
    Real,
    Complex,
    Integer,
    Pattern,
}

/// Matrix Market symmetry keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SymmetryType {
    #[default]
    General,
    Symmetric,
    SkewSymmetric,
    Hermitian,
}

impl ObjectType {
    /// Parse a keyword, ignoring ASCII case
    pub fn from_keyword(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("matrix") {
            Ok(ObjectType::Matrix)
        } else if s.eq_ignore_ascii_case("vector") {
            Ok(ObjectType::Vector)
        } else {
            Err(MtxError::InvalidObject)
        }
    }

    pub const fn keyword(&self) -> &'static str {
        match self {
            ObjectType::Matrix => "matrix",
            ObjectType::Vector => "vector",
        }
    }
}

impl FormatType {
    /// Parse a keyword, ignoring ASCII case
    pub fn from_keyword(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("coordinate") {
            Ok(FormatType::Coordinate)
        } else if s.eq_ignore_ascii_case("array") {
            Ok(FormatType::Array)
        } else {
            Err(MtxError::InvalidFormat)
        }
    }

    pub const fn keyword(&self) -> &'static str {
        match self {
            FormatType::Array => "array",
            FormatType::Coordinate => "coordinate",
        }
    }
}

impl FieldType {
    /// Parse a keyword, ignoring ASCII case
    pub fn from_keyword(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("real") || s.eq_ignore_ascii_case("double") {
            Ok(FieldType::Real)
        } else if s.eq_ignore_ascii_case("complex") {
            Ok(FieldType::Complex)
        } else if s.eq_ignore_ascii_case("integer") {
            Ok(FieldType::Integer)
        } else if s.eq_ignore_ascii_case("pattern") {
            Ok(FieldType::Pattern)
        } else {
            Err(MtxError::InvalidField)
        }
    }

    pub const fn keyword(&self) -> &'static str {
        match self {
            FieldType::Real => "real",
            FieldType::Complex => "complex",
            FieldType::Integer => "integer",
            FieldType::Pattern => "pattern",
        }
    }

    /// Number of value tokens each body line carries for this field
    pub const fn value_token_count(&self) -> usize {
        match self {
            FieldType::Pattern => 0,
            FieldType::Real | FieldType::Integer => 1,
            FieldType::Complex => 2,
        }
    }
}

impl SymmetryType {
    /// Parse a keyword, ignoring ASCII case
    ///
    /// Both `skew-symmetric` and `skew_symmetric` are accepted.
    pub fn from_keyword(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("general") {
            Ok(SymmetryType::General)
        } else if s.eq_ignore_ascii_case("symmetric") {
            Ok(SymmetryType::Symmetric)
        } else if s.eq_ignore_ascii_case("skew-symmetric") || s.eq_ignore_ascii_case("skew_symmetric")
        {
            Ok(SymmetryType::SkewSymmetric)
        } else if s.eq_ignore_ascii_case("hermitian") {
            Ok(SymmetryType::Hermitian)
        } else {
            Err(MtxError::InvalidSymmetry)
        }
    }

    pub const fn keyword(&self) -> &'static str {
        match self {
            SymmetryType::General => "general",
            SymmetryType::Symmetric => "symmetric",
            SymmetryType::SkewSymmetric => "skew-symmetric",
            SymmetryType::Hermitian => "hermitian",
        }
    }
}

macro_rules! impl_keyword_display {
    ($($ty:ty),*) => {
        $(
            impl core::fmt::Display for $ty {
                fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                    f.write_str(self.keyword())
                }
            }
        )*
    };
}

impl_keyword_display!(ObjectType, FormatType, FieldType, SymmetryType);

/// Parsed Matrix Market header
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatrixMarketHeader {
    pub object: ObjectType,
    pub format: FormatType,
    pub field: FieldType,
    pub symmetry: SymmetryType,
    /// Number of rows (vector length for vectors)
    pub nrows: u64,
    /// Number of columns (1 for vectors)
    pub ncols: u64,
    /// Vector length, 0 for matrices
    pub vector_length: u64,
    /// Number of body lines (entries) in the file
    pub nnz: u64,
    /// Comment text, lines joined by `\n`, without the leading `%`
    #[cfg(feature = "alloc")]
    pub comment: String,
    /// Lines taken by banner, comments and dimension line
    pub header_line_count: u64,
}

impl MatrixMarketHeader {
    /// Create a general real coordinate matrix header with the given shape
    pub fn new(nrows: u64, ncols: u64) -> Self {
        Self {
            nrows,
            ncols,
            header_line_count: 1,
            ..Self::default()
        }
    }

    /// Parse the banner line into object, format, field and symmetry
    pub fn parse_banner(&mut self, line: &str) -> Result<()> {
        let mut tokens = line.split_ascii_whitespace();
        match tokens.next() {
            Some(banner) if banner == BANNER || banner == BANNER_LENIENT => {}
            _ => return Err(MtxError::MissingBanner),
        }

        let mut keyword = || tokens.next().ok_or(MtxError::IncompleteBanner);
        self.object = ObjectType::from_keyword(keyword()?)?;
        self.format = FormatType::from_keyword(keyword()?)?;
        self.field = FieldType::from_keyword(keyword()?)?;
        self.symmetry = SymmetryType::from_keyword(keyword()?)?;
        Ok(())
    }

    /// Record a comment line if `line` is one
    ///
    /// Returns `false` for anything that is not a comment.
    #[cfg(feature = "alloc")]
    pub fn push_comment(&mut self, line: &str) -> bool {
        if line.as_bytes().first() != Some(&COMMENT_PREFIX) {
            return false;
        }
        if !self.comment.is_empty() {
            self.comment.push('\n');
        }
        self.comment.push_str(&line[1..]);
        true
    }

    /// Check whether a line is a comment without recording it
    pub fn is_comment(line: &str) -> bool {
        line.as_bytes().first() == Some(&COMMENT_PREFIX)
    }

    /// Parse the dimension line that follows banner and comments
    pub fn parse_dimensions(&mut self, line: &str) -> Result<()> {
        let mut tokens = line.split_ascii_whitespace();
        let mut next = || -> Result<u64> {
            let token = tokens.next().ok_or(MtxError::InvalidDimensions)?;
            if token.starts_with('-') {
                return Err(MtxError::NegativeDimension);
            }
            token.parse::<u64>().map_err(|_| MtxError::InvalidDimensions)
        };

        match self.object {
            ObjectType::Vector => {
                self.vector_length = next()?;
                self.nnz = match self.format {
                    FormatType::Coordinate => next()?,
                    FormatType::Array => self.vector_length,
                };
                self.nrows = self.vector_length;
                self.ncols = 1;
            }
            ObjectType::Matrix => {
                self.nrows = next()?;
                self.ncols = next()?;
                self.nnz = match self.format {
                    FormatType::Coordinate => next()?,
                    FormatType::Array => array_value_count(self.nrows, self.ncols, self.symmetry)
                        .ok_or(MtxError::InvalidDimensions)?,
                };
                self.vector_length = 0;
            }
        }
        Ok(())
    }

    /// Write the header text: banner, comment lines and dimension line
    pub fn write_to<W: core::fmt::Write>(&self, out: &mut W) -> core::fmt::Result {
        writeln!(
            out,
            "{BANNER} {} {} {} {}",
            self.object, self.format, self.field, self.symmetry
        )?;

        #[cfg(feature = "alloc")]
        for line in self.comment.lines() {
            writeln!(out, "%{line}")?;
        }

        match (self.object, self.format) {
            (ObjectType::Vector, FormatType::Coordinate) => {
                writeln!(out, "{} {}", self.vector_length, self.nnz)
            }
            (ObjectType::Vector, FormatType::Array) => writeln!(out, "{}", self.vector_length),
            (ObjectType::Matrix, FormatType::Coordinate) => {
                writeln!(out, "{} {} {}", self.nrows, self.ncols, self.nnz)
            }
            (ObjectType::Matrix, FormatType::Array) => writeln!(out, "{} {}", self.nrows, self.ncols),
        }
    }

    /// Number of entries a fully generalized body will hold
    pub fn storage_nnz(&self, generalize_symmetry: bool) -> u64 {
        if generalize_symmetry && self.symmetry != SymmetryType::General {
            self.nnz.saturating_mul(2)
        } else {
            self.nnz
        }
    }
}
