//! Runtime value conversion.
//!
//! [`convert`] turns a [`Value`] into the kind named by a [`TypeTag`] by
//! trying a fixed chain of strategies: identity, null handling, nullable
//! unwrap, enum codec, byte layouts, dedicated semantic types, numeric casts
//! and culture-aware parsing, registered converters, and finally registered
//! parsers. A failed conversion still yields a usable fallback value.
//!
//! # Example
//!
//! ```
//! use convertkit::{change_type, try_convert, ConversionContext, TypeTag, Value};
//!
//! let ctx = ConversionContext::default();
//! assert_eq!(try_convert(&Value::from("0x1F"), &TypeTag::I32, &ctx).into_value(), Value::I32(31));
//! assert_eq!(try_convert(&Value::I16(-1), &TypeTag::U16, &ctx).into_value(), Value::U16(65535));
//! assert_eq!(change_type(&Value::from("nope"), &TypeTag::Bool, Value::Bool(true), &ctx), Value::Bool(true));
//! ```

mod context;
mod culture;
mod dispatcher;
mod error;
mod format;
mod known;
mod layout;
mod numeric;
mod outcome;
mod registry;
mod type_tag;
mod typed;
mod value;
mod version;

pub mod enums;
pub mod parse;

pub use context::{ConversionContext, DateTimeStyles, NumberStyles};
pub use culture::{Culture, CUSTOM_LCID};
pub use dispatcher::{change_type, convert, convert_strict, try_convert};
pub use enums::{
    enum_descriptor, format_enum, format_flags, parse_enum, EnumDescriptor, EnumDescriptorBuilder,
    EnumMember, EnumType, EnumValue, EnumWidth,
};
pub use error::ConvertError;
pub use format::to_culture_string;
pub use known::NEW_GUID_SENTINEL;
pub use outcome::ConversionOutcome;
pub use parse::boolean::parse_bool;
pub use parse::temporal::format_duration;
pub use registry::{
    register_converter, register_from_str, register_parser, resolve_converter, resolve_parser,
    unregister_converter, ParserFn, TypeConverter,
};
pub use type_tag::{OpaqueType, TypeKey, TypeTag};
pub use typed::{
    change_enum, change_type_to, split_to_list, try_convert_enum, try_convert_opaque,
    try_convert_to, FromValue,
};
pub use value::{OpaqueValue, Value};
pub use version::{ParseVersionError, Version};

pub use convertkit_buffers::{to_hex_dump, BufferError};
pub use convertkit_util::{decamelize, DecamelizeOptions, SpaceReplacement, StringError};
