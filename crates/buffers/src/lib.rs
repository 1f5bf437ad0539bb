//! Byte layout utilities for convertkit.
//!
//! This crate reinterprets byte sequences as fixed-width primitives (and back),
//! and renders or parses the textual byte encodings the conversion engine
//! understands.
//!
//! # Overview
//!
//! - [`decode`] / [`encode`] - exact-length, host byte order reinterpretation
//! - [`to_hex_string`] / [`from_hex_string`] - compact hex text
//! - [`parse_byte_list`] - `"1, 2, 0xFF"` style byte lists
//! - [`to_hex_dump`] - multi-line diagnostic dump with an ASCII gutter
//!
//! # Example
//!
//! ```
//! use convertkit_buffers::{decode, encode, from_hex_string, to_hex_string};
//!
//! let bytes = encode(0x0102_0304_i32).unwrap();
//! assert_eq!(decode::<i32>(&bytes).unwrap(), 0x0102_0304);
//! assert!(decode::<i32>(&bytes[..3]).is_err());
//!
//! assert_eq!(from_hex_string("0xCAFE"), vec![0xCA, 0xFE]);
//! assert_eq!(to_hex_string(&[0xCA, 0xFE]), "CAFE");
//! ```

mod hex;
mod hex_dump;
mod layout;

pub use hex::{from_hex_string, normalize_hex_prefix, parse_byte_list, to_hex_string};
pub use hex_dump::{to_hex_dump, DEFAULT_COLUMNS, MAX_COLUMNS};
pub use layout::{decode, encode, FixedWidth};

use thiserror::Error;

/// Error type for byte layout operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// The byte sequence does not have the exact width of the target.
    #[error("expected exactly {expected} bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    /// The value cannot be represented in the requested layout.
    #[error("value out of range for the target layout")]
    OutOfRange,
    /// A token of a delimited byte list is not a byte.
    #[error("invalid byte token `{0}`")]
    InvalidToken(String),
}
