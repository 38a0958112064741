//! Coordinate index type constraints
//!
//! Indices are 0-based in memory and 1-based in Matrix Market text. Any
//! primitive integer can serve as an index type.

use core::fmt::{Display, Write};
use num_traits::{FromPrimitive, PrimInt, ToPrimitive};

/// Trait for types that can hold row and column coordinates
pub trait MatrixIndex: PrimInt + FromPrimitive + ToPrimitive + Display + Send + Sync + 'static {
    /// Convert a validated 1-based file index into a 0-based index
    fn from_one_based(index: u64) -> Option<Self> {
        index.checked_sub(1).and_then(Self::from_u64)
    }

    /// Convert a 0-based position into an index
    fn from_zero_based(index: u64) -> Option<Self> {
        Self::from_u64(index)
    }

    /// Write this 0-based index as 1-based text
    fn write_one_based<W: Write>(&self, out: &mut W) -> core::fmt::Result {
        match self.to_u64().and_then(|index| index.checked_add(1)) {
            Some(index) => write!(out, "{index}"),
            None => Err(core::fmt::Error),
        }
    }

    /// Index as `u64`, `None` for negative values
    fn as_u64(&self) -> Option<u64> {
        self.to_u64()
    }

    /// Index as `usize`, used for pointer arrays
    fn as_usize(&self) -> Option<usize> {
        self.to_usize()
    }
}

impl<T> MatrixIndex for T where
    T: PrimInt + FromPrimitive + ToPrimitive + Display + Send + Sync + 'static
{
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_one_based() {
        assert_eq!(i32::from_one_based(1), Some(0));
        assert_eq!(u64::from_one_based(42), Some(41));
        assert_eq!(i64::from_one_based(0), None);
        assert_eq!(u8::from_one_based(300), None);
        assert_eq!(u16::from_zero_based(0), Some(0));
        assert_eq!(i8::from_zero_based(200), None);
    }

    #[test]
    fn test_negative_index_is_not_writable() {
        struct Sink;
        impl Write for Sink {
            fn write_str(&mut self, _s: &str) -> core::fmt::Result {
                Ok(())
            }
        }
        assert!((-1i32).write_one_based(&mut Sink).is_err());
        assert!(7usize.write_one_based(&mut Sink).is_ok());
    }
}
