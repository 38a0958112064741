//! Matrix element type constraints
//!
//! This module defines the value-kind classifier and the trait that
//! constrains what types can be stored as matrix values. The set of kinds
//! is closed: integer, real and complex. A type outside the implemented set
//! fails the trait bound at compile time.

use crate::format::FieldType;
use crate::format::constants::ESTIMATED_INDEX_WIDTH;
use core::fmt::Write;
use num_complex::Complex;

/// Numeric kind of a value type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Integer,
    Real,
    Complex,
}

impl ValueKind {
    /// Header field tag for this kind
    pub const fn field_type(&self) -> FieldType {
        match self {
            ValueKind::Integer => FieldType::Integer,
            ValueKind::Real => FieldType::Real,
            ValueKind::Complex => FieldType::Complex,
        }
    }

    /// Estimated formatted width of one value, in bytes
    ///
    /// This is a tuning estimate for chunk sizing, not a bound.
    pub const fn estimated_width(&self) -> usize {
        match self {
            ValueKind::Integer => 8,
            ValueKind::Real => 18,
            ValueKind::Complex => 36,
        }
    }

    /// Estimated formatted width of one coordinate line, in bytes
    pub const fn estimated_entry_width(&self) -> usize {
        // two indices, two separators, newline
        2 * ESTIMATED_INDEX_WIDTH + 3 + self.estimated_width()
    }
}

/// Trait for types that can be stored as matrix values
///
/// Formatting writes the shortest text that parses back to the same value.
/// Parsing reads the tokens of one body line after the coordinates.
pub trait MatrixElement: Copy + PartialEq + Send + Sync + Sized + 'static {
    /// Static numeric kind of this type
    const KIND: ValueKind;

    /// Header field tag for this type
    fn field_type() -> FieldType {
        Self::KIND.field_type()
    }

    /// Additive identity, used to fill dense matrices
    fn zero() -> Self;

    /// Value stored for entries of a `pattern` file
    fn pattern() -> Self;

    /// Parse a single real or integer token
    ///
    /// Complex types read it as the real part with a zero imaginary part.
    fn parse_scalar(token: &str) -> Option<Self>;

    /// Parse a real and imaginary token pair
    ///
    /// Returns `None` for non-complex types.
    fn parse_complex(re: &str, im: &str) -> Option<Self>;

    /// Write the value text, without separators
    fn write_value<W: Write>(&self, out: &mut W) -> core::fmt::Result;

    /// Additive inverse, used for skew-symmetric expansion
    fn negate(self) -> Self;

    /// Complex conjugate, identity for real kinds
    fn conjugate(self) -> Self {
        self
    }
}

/// Write a float using the shortest round-trip representation
///
/// Plain notation inside `[1e-5, 1e16)`, exponent notation outside it, so
/// very large or small magnitudes do not expand into long digit strings.
macro_rules! write_float {
    ($out:expr, $value:expr) => {{
        let value = $value;
        let magnitude = if value < 0.0 { -value } else { value };
        if value == 0.0 || !value.is_finite() || (1e-5..1e16).contains(&magnitude) {
            write!($out, "{}", value)
        } else {
            write!($out, "{:e}", value)
        }
    }};
}

macro_rules! impl_integer_element {
    ($($type:ty),*) => {
        $(
            impl MatrixElement for $type {
                const KIND: ValueKind = ValueKind::Integer;

                fn zero() -> Self {
                    0
                }

                fn pattern() -> Self {
                    1
                }

                fn parse_scalar(token: &str) -> Option<Self> {
                    token.parse().ok()
                }

                fn parse_complex(_re: &str, _im: &str) -> Option<Self> {
                    None
                }

                fn write_value<W: Write>(&self, out: &mut W) -> core::fmt::Result {
                    write!(out, "{}", self)
                }

                fn negate(self) -> Self {
                    self.wrapping_neg()
                }
            }
        )*
    };
}

macro_rules! impl_real_element {
    ($($type:ty),*) => {
        $(
            impl MatrixElement for $type {
                const KIND: ValueKind = ValueKind::Real;

                fn zero() -> Self {
                    0.0
                }

                fn pattern() -> Self {
                    1.0
                }

                fn parse_scalar(token: &str) -> Option<Self> {
                    token.parse().ok()
                }

                fn parse_complex(_re: &str, _im: &str) -> Option<Self> {
                    None
                }

                fn write_value<W: Write>(&self, out: &mut W) -> core::fmt::Result {
                    write_float!(out, *self)
                }

                fn negate(self) -> Self {
                    -self
                }
            }
        )*
    };
}

macro_rules! impl_complex_element {
    ($($type:ty),*) => {
        $(
            impl MatrixElement for Complex<$type> {
                const KIND: ValueKind = ValueKind::Complex;

                fn zero() -> Self {
                    Complex::new(0.0, 0.0)
                }

                fn pattern() -> Self {
                    Complex::new(1.0, 0.0)
                }

                fn parse_scalar(token: &str) -> Option<Self> {
                    token.parse::<$type>().ok().map(|re| Complex::new(re, 0.0))
                }

                fn parse_complex(re: &str, im: &str) -> Option<Self> {
                    Some(Complex::new(re.parse().ok()?, im.parse().ok()?))
                }

                fn write_value<W: Write>(&self, out: &mut W) -> core::fmt::Result {
                    write_float!(out, self.re)?;
                    out.write_char(' ')?;
                    write_float!(out, self.im)
                }

                fn negate(self) -> Self {
                    -self
                }

                fn conjugate(self) -> Self {
                    self.conj()
                }
            }
        )*
    };
}

impl_integer_element!(i32, i64);
impl_real_element!(f32, f64);
impl_complex_element!(f32, f64);
