//! Typed front end: convert straight into Rust types.

use std::any::Any;

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeDelta};
use convertkit_util::split_trimmed;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::context::ConversionContext;
use crate::culture::Culture;
use crate::dispatcher::{convert, describe};
use crate::enums::EnumType;
use crate::error::ConvertError;
use crate::type_tag::TypeTag;
use crate::value::Value;
use crate::version::Version;

/// A Rust type with a [`TypeTag`] that can be taken out of a [`Value`].
pub trait FromValue: Sized {
    fn type_tag() -> TypeTag;
    fn from_value(value: Value) -> Option<Self>;
}

macro_rules! impl_from_value {
    ($($t:ty => $tag:ident),* $(,)?) => {
        $(
            impl FromValue for $t {
                fn type_tag() -> TypeTag {
                    TypeTag::$tag
                }

                fn from_value(value: Value) -> Option<Self> {
                    match value {
                        Value::$tag(v) => Some(v),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_from_value!(
    bool => Bool,
    i8 => I8,
    u8 => U8,
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    i64 => I64,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    Decimal => Decimal,
    char => Char,
    String => String,
    NaiveDateTime => DateTime,
    DateTime<FixedOffset> => DateTimeOffset,
    TimeDelta => Duration,
    Uuid => Guid,
    isize => IntPtr,
    Culture => Culture,
    Version => Version,
);

impl FromValue for Vec<u8> {
    fn type_tag() -> TypeTag {
        TypeTag::Bytes
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }
}

/// `Option<T>` targets the nullable form of `T`; null becomes `None`.
impl<T: FromValue> FromValue for Option<T> {
    fn type_tag() -> TypeTag {
        TypeTag::nullable(T::type_tag())
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Null => Some(None),
            other => T::from_value(other).map(Some),
        }
    }
}

pub fn try_convert_to<T: FromValue>(value: &Value, context: &ConversionContext) -> Option<T> {
    convert(value, &T::type_tag(), context, None)
        .ok()
        .and_then(T::from_value)
}

pub fn change_type_to<T: FromValue>(value: &Value, default: T, context: &ConversionContext) -> T {
    try_convert_to(value, context).unwrap_or(default)
}

pub fn try_convert_enum<T: EnumType>(value: &Value, context: &ConversionContext) -> Option<T> {
    match convert(value, &TypeTag::enumeration::<T>(), context, None).ok()? {
        Value::Enum(e) => e.to_enum::<T>(),
        _ => None,
    }
}

pub fn change_enum<T: EnumType>(value: &Value, default: T, context: &ConversionContext) -> T {
    try_convert_enum(value, context).unwrap_or(default)
}

/// Converts to a type only reachable through the registries.
pub fn try_convert_opaque<T: Any + Clone>(value: &Value, context: &ConversionContext) -> Option<T> {
    match convert(value, &TypeTag::opaque::<T>(), context, None).ok()? {
        Value::Opaque(o) => o.downcast_ref::<T>().cloned(),
        _ => None,
    }
}

/// Splits `text` on any of `separators` and converts each trimmed,
/// non-empty item.
pub fn split_to_list<T: FromValue>(
    text: &str,
    separators: &[char],
    context: &ConversionContext,
) -> Result<Vec<T>, ConvertError> {
    split_trimmed(text, separators)?
        .into_iter()
        .map(|item| {
            let value = Value::String(item);
            try_convert_to(&value, context).ok_or_else(|| ConvertError::Unconvertible {
                value: describe(&value, context),
                target: T::type_tag().key(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_map_null_and_blank_to_none() {
        let ctx = ConversionContext::default();
        assert_eq!(try_convert_to::<Option<i32>>(&Value::from(""), &ctx), Some(None));
        assert_eq!(try_convert_to::<Option<i32>>(&Value::from("4"), &ctx), Some(Some(4)));
        assert_eq!(try_convert_to::<Option<i32>>(&Value::from("x"), &ctx), None);
    }

    #[test]
    fn lists_convert_every_item() {
        let ctx = ConversionContext::default();
        assert_eq!(
            split_to_list::<u16>("1, 2;; 0x10", &[',', ';'], &ctx).unwrap(),
            vec![1, 2, 16]
        );
        assert!(matches!(
            split_to_list::<u16>("1, x", &[','], &ctx),
            Err(ConvertError::Unconvertible { .. })
        ));
        assert!(matches!(
            split_to_list::<u16>("1", &[], &ctx),
            Err(ConvertError::String(_))
        ));
    }
}
