//! Fixed-width reinterpretation of byte sequences.
//!
//! All layouts use the host byte order, so a value encoded here decodes to the
//! same value on the same machine. Decoding demands the exact width: a 3-byte
//! sequence never becomes an `i32`.

use crate::BufferError;

/// A primitive with a fixed byte layout.
pub trait FixedWidth: Sized + Copy {
    /// Width of the layout in bytes.
    const WIDTH: usize;

    /// Writes the layout of `self`, or `None` when the value has no layout.
    fn write_bytes(self) -> Option<Vec<u8>>;

    /// Reads a value from exactly [`Self::WIDTH`] bytes.
    fn read_bytes(bytes: &[u8]) -> Option<Self>;
}

macro_rules! impl_fixed_width {
    ($($t:ty),* $(,)?) => {
        $(
            impl FixedWidth for $t {
                const WIDTH: usize = std::mem::size_of::<$t>();

                #[inline]
                fn write_bytes(self) -> Option<Vec<u8>> {
                    Some(self.to_ne_bytes().to_vec())
                }

                #[inline]
                fn read_bytes(bytes: &[u8]) -> Option<Self> {
                    let buf: [u8; std::mem::size_of::<$t>()] = bytes.try_into().ok()?;
                    Some(<$t>::from_ne_bytes(buf))
                }
            }
        )*
    };
}

impl_fixed_width!(i8, u8, i16, u16, i32, u32, i64, u64, isize, usize, f32, f64);

impl FixedWidth for bool {
    const WIDTH: usize = 1;

    fn write_bytes(self) -> Option<Vec<u8>> {
        Some(vec![self as u8])
    }

    fn read_bytes(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [b] => Some(*b != 0),
            _ => None,
        }
    }
}

/// Characters are laid out as a single UTF-16 code unit.
impl FixedWidth for char {
    const WIDTH: usize = 2;

    fn write_bytes(self) -> Option<Vec<u8>> {
        let unit = u16::try_from(self as u32).ok()?;
        Some(unit.to_ne_bytes().to_vec())
    }

    fn read_bytes(bytes: &[u8]) -> Option<Self> {
        let unit = u16::read_bytes(bytes)?;
        char::from_u32(unit as u32)
    }
}

/// Decodes a primitive from a byte sequence of exactly its width.
///
/// # Example
///
/// ```
/// use convertkit_buffers::{decode, BufferError};
///
/// let bytes = 513_u16.to_ne_bytes();
/// assert_eq!(decode::<u16>(&bytes), Ok(513));
/// assert_eq!(
///     decode::<u32>(&bytes),
///     Err(BufferError::LengthMismatch { expected: 4, actual: 2 })
/// );
/// ```
pub fn decode<T: FixedWidth>(bytes: &[u8]) -> Result<T, BufferError> {
    if bytes.len() != T::WIDTH {
        return Err(BufferError::LengthMismatch {
            expected: T::WIDTH,
            actual: bytes.len(),
        });
    }
    T::read_bytes(bytes).ok_or(BufferError::OutOfRange)
}

/// Encodes a primitive into its host byte order layout.
pub fn encode<T: FixedWidth>(value: T) -> Result<Vec<u8>, BufferError> {
    value.write_bytes().ok_or(BufferError::OutOfRange)
}
