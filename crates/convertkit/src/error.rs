//! Error type for the conversion engine.
//!
//! Unparsable values are not errors: [`try_convert`](crate::try_convert) and
//! [`change_type`](crate::change_type) resolve them to a fallback value. This
//! type covers strict conversions, converter failures and invalid arguments
//! raised by the helper crates.

use convertkit_buffers::BufferError;
use convertkit_util::StringError;
use thiserror::Error;

use crate::type_tag::TypeKey;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("cannot convert `{value}` to {target}")]
    Unconvertible { value: String, target: TypeKey },
    #[error("converter error: {0}")]
    Converter(String),
    #[error(transparent)]
    Buffer(#[from] BufferError),
    #[error(transparent)]
    String(#[from] StringError),
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}
