//! The runtime value the engine converts from and to.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeDelta};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::culture::Culture;
use crate::enums::{EnumType, EnumValue};
use crate::type_tag::{OpaqueType, TypeTag};
use crate::version::Version;

/// A dynamically typed value.
///
/// There is one variant per built-in [`TypeTag`] plus [`Value::Null`].
/// Values of types the engine does not know are carried as [`OpaqueValue`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
    Decimal(Decimal),
    Char(char),
    String(String),
    Bytes(Vec<u8>),
    DateTime(NaiveDateTime),
    DateTimeOffset(DateTime<FixedOffset>),
    Duration(TimeDelta),
    Guid(Uuid),
    IntPtr(isize),
    Culture(Culture),
    Version(Version),
    Enum(EnumValue),
    Opaque(OpaqueValue),
}

impl Value {
    /// Wraps any displayable Rust value the engine has no variant for.
    pub fn opaque<T: Any + Send + Sync + fmt::Display>(value: T) -> Self {
        Value::Opaque(OpaqueValue::new(value))
    }

    pub fn from_enum<T: EnumType>(value: &T) -> Self {
        Value::Enum(EnumValue::of(value))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// `true` for strings that are empty or whitespace only.
    pub fn is_blank_text(&self) -> bool {
        self.as_str().is_some_and(|s| s.trim().is_empty())
    }

    /// The tag of this value's own kind; `None` for [`Value::Null`].
    pub fn type_tag(&self) -> Option<TypeTag> {
        let tag = match self {
            Value::Null => return None,
            Value::Bool(_) => TypeTag::Bool,
            Value::I8(_) => TypeTag::I8,
            Value::U8(_) => TypeTag::U8,
            Value::I16(_) => TypeTag::I16,
            Value::U16(_) => TypeTag::U16,
            Value::I32(_) => TypeTag::I32,
            Value::U32(_) => TypeTag::U32,
            Value::I64(_) => TypeTag::I64,
            Value::U64(_) => TypeTag::U64,
            Value::F32(_) => TypeTag::F32,
            Value::F64(_) => TypeTag::F64,
            Value::Decimal(_) => TypeTag::Decimal,
            Value::Char(_) => TypeTag::Char,
            Value::String(_) => TypeTag::String,
            Value::Bytes(_) => TypeTag::Bytes,
            Value::DateTime(_) => TypeTag::DateTime,
            Value::DateTimeOffset(_) => TypeTag::DateTimeOffset,
            Value::Duration(_) => TypeTag::Duration,
            Value::Guid(_) => TypeTag::Guid,
            Value::IntPtr(_) => TypeTag::IntPtr,
            Value::Culture(_) => TypeTag::Culture,
            Value::Version(_) => TypeTag::Version,
            Value::Enum(e) => TypeTag::Enum(e.descriptor().clone()),
            Value::Opaque(o) => TypeTag::Opaque(o.ty()),
        };
        Some(tag)
    }

    /// Whether this value can be handed out unchanged as a `target`.
    pub fn is_assignable_to(&self, target: &TypeTag) -> bool {
        let Some(own) = self.type_tag() else {
            return false;
        };
        match target {
            TypeTag::Nullable(inner) => own == **inner,
            _ => own == *target,
        }
    }
}

/// A value of a type unknown to the engine, with its textual form.
#[derive(Clone)]
pub struct OpaqueValue {
    ty: OpaqueType,
    text: String,
    inner: Arc<dyn Any + Send + Sync>,
}

impl OpaqueValue {
    pub fn new<T: Any + Send + Sync + fmt::Display>(value: T) -> Self {
        Self {
            ty: OpaqueType::of::<T>(),
            text: value.to_string(),
            inner: Arc::new(value),
        }
    }

    pub fn ty(&self) -> OpaqueType {
        self.ty
    }

    /// The `Display` form captured at construction.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }
}

impl fmt::Debug for OpaqueValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpaqueValue")
            .field("ty", &self.ty.name())
            .field("text", &self.text)
            .finish()
    }
}

impl PartialEq for OpaqueValue {
    fn eq(&self, other: &Self) -> bool {
        self.ty == other.ty && (Arc::ptr_eq(&self.inner, &other.inner) || self.text == other.text)
    }
}

macro_rules! impl_from_for_value {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_from_for_value!(
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
    Vec<u8> => Bytes,
    NaiveDateTime => DateTime,
    DateTime<FixedOffset> => DateTimeOffset,
    TimeDelta => Duration,
    Uuid => Guid,
    isize => IntPtr,
    Culture => Culture,
    Version => Version,
    EnumValue => Enum,
);

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Bytes(v.to_vec())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// Loads a value from JSON: numbers become `I64`, `U64` or `F64`, arrays of
/// bytes become [`Value::Bytes`], and objects are kept as their JSON text.
impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as Json;
        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::I64(i)
                } else if let Some(u) = n.as_u64() {
                    Value::U64(u)
                } else {
                    Value::F64(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Json::String(s) => Value::String(s),
            Json::Array(items) => {
                let bytes: Option<Vec<u8>> = items
                    .iter()
                    .map(|item| item.as_u64().and_then(|b| u8::try_from(b).ok()))
                    .collect();
                match bytes {
                    Some(bytes) => Value::Bytes(bytes),
                    None => Value::String(Json::Array(items).to_string()),
                }
            }
            Json::Object(_) => Value::String(json.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn identity_includes_nullable_wrapper() {
        let v = Value::I32(5);
        assert!(v.is_assignable_to(&TypeTag::I32));
        assert!(v.is_assignable_to(&TypeTag::nullable(TypeTag::I32)));
        assert!(!v.is_assignable_to(&TypeTag::I64));
        assert!(!Value::Null.is_assignable_to(&TypeTag::String));
    }

    #[test]
    fn opaque_values_keep_text_and_payload() {
        let v = OpaqueValue::new(std::net::Ipv4Addr::LOCALHOST);
        assert_eq!(v.text(), "127.0.0.1");
        assert_eq!(
            v.downcast_ref::<std::net::Ipv4Addr>(),
            Some(&std::net::Ipv4Addr::LOCALHOST)
        );
        assert!(v.downcast_ref::<String>().is_none());
        assert_eq!(v.clone(), v);
    }

    #[test]
    fn json_values_map_to_variants() {
        assert_eq!(Value::from(json!(null)), Value::Null);
        assert_eq!(Value::from(json!(-3)), Value::I64(-3));
        assert_eq!(Value::from(json!(u64::MAX)), Value::U64(u64::MAX));
        assert_eq!(Value::from(json!(1.5)), Value::F64(1.5));
        assert_eq!(Value::from(json!([1, 2, 255])), Value::Bytes(vec![1, 2, 255]));
        assert_eq!(
            Value::from(json!([1, "a"])),
            Value::String("[1,\"a\"]".to_string())
        );
    }

    #[test]
    fn options_map_to_null() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::String("x".to_string()));
    }
}
