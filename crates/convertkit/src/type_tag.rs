//! Conversion target identification.

use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

use crate::enums::{enum_descriptor, EnumDescriptor, EnumType, EnumValue};
use crate::parse::temporal::{min_datetime, min_datetime_offset};
use crate::value::Value;

/// A Rust type the engine has no built-in knowledge of.
///
/// Opaque targets are only reachable through the converter and parser
/// registries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OpaqueType {
    id: TypeId,
    name: &'static str,
}

impl OpaqueType {
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// The semantic kind of a conversion target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Bool,
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
    Decimal,
    Char,
    String,
    Bytes,
    DateTime,
    DateTimeOffset,
    Duration,
    Guid,
    /// Pointer-sized signed integer.
    IntPtr,
    Culture,
    Version,
    Enum(Arc<EnumDescriptor>),
    Nullable(Box<TypeTag>),
    Opaque(OpaqueType),
}

impl TypeTag {
    pub fn nullable(inner: TypeTag) -> Self {
        TypeTag::Nullable(Box::new(inner))
    }

    /// Tag of a Rust enum implementing [`EnumType`].
    pub fn enumeration<T: EnumType>() -> Self {
        TypeTag::Enum(enum_descriptor::<T>())
    }

    pub fn opaque<T: 'static>() -> Self {
        TypeTag::Opaque(OpaqueType::of::<T>())
    }

    /// Reference-like targets accept null and default to it.
    pub fn is_reference_like(&self) -> bool {
        matches!(
            self,
            TypeTag::String
                | TypeTag::Bytes
                | TypeTag::Culture
                | TypeTag::Version
                | TypeTag::Opaque(_)
        )
    }

    pub fn is_nullable(&self) -> bool {
        matches!(self, TypeTag::Nullable(_))
    }

    pub fn is_integer(&self) -> bool {
        self.int_layout().is_some()
    }

    pub fn is_numeric(&self) -> bool {
        self.is_integer() || matches!(self, TypeTag::F32 | TypeTag::F64 | TypeTag::Decimal)
    }

    /// Bit width and signedness of integer targets.
    pub(crate) fn int_layout(&self) -> Option<(u32, bool)> {
        match self {
            TypeTag::I8 => Some((8, true)),
            TypeTag::U8 => Some((8, false)),
            TypeTag::I16 => Some((16, true)),
            TypeTag::U16 => Some((16, false)),
            TypeTag::I32 => Some((32, true)),
            TypeTag::U32 => Some((32, false)),
            TypeTag::I64 => Some((64, true)),
            TypeTag::U64 => Some((64, false)),
            TypeTag::IntPtr => Some((isize::BITS, true)),
            _ => None,
        }
    }

    /// The value a failed conversion falls back to when no default is given.
    pub fn default_value(&self) -> Value {
        match self {
            TypeTag::Bool => Value::Bool(false),
            TypeTag::I8 => Value::I8(0),
            TypeTag::U8 => Value::U8(0),
            TypeTag::I16 => Value::I16(0),
            TypeTag::U16 => Value::U16(0),
            TypeTag::I32 => Value::I32(0),
            TypeTag::U32 => Value::U32(0),
            TypeTag::I64 => Value::I64(0),
            TypeTag::U64 => Value::U64(0),
            TypeTag::F32 => Value::F32(0.0),
            TypeTag::F64 => Value::F64(0.0),
            TypeTag::Decimal => Value::Decimal(rust_decimal::Decimal::ZERO),
            TypeTag::Char => Value::Char('\0'),
            TypeTag::DateTime => Value::DateTime(min_datetime()),
            TypeTag::DateTimeOffset => Value::DateTimeOffset(min_datetime_offset()),
            TypeTag::Duration => Value::Duration(chrono::TimeDelta::zero()),
            TypeTag::Guid => Value::Guid(uuid::Uuid::nil()),
            TypeTag::IntPtr => Value::IntPtr(0),
            TypeTag::Enum(descriptor) => Value::Enum(EnumValue::new(descriptor.clone(), 0)),
            TypeTag::String
            | TypeTag::Bytes
            | TypeTag::Culture
            | TypeTag::Version
            | TypeTag::Nullable(_)
            | TypeTag::Opaque(_) => Value::Null,
        }
    }

    /// Registry key for this tag.
    ///
    /// Enum keys carry the descriptor identity so that same-named enums of
    /// different types never share a registry slot.
    pub fn key(&self) -> TypeKey {
        match self {
            TypeTag::Enum(descriptor) => TypeKey(format!(
                "enum:{}#{:016x}",
                descriptor.name(),
                descriptor.identity()
            )),
            TypeTag::Nullable(inner) => TypeKey(format!("nullable:{}", inner.key())),
            other => TypeKey(other.to_string()),
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeTag::Bool => "bool",
            TypeTag::I8 => "i8",
            TypeTag::U8 => "u8",
            TypeTag::I16 => "i16",
            TypeTag::U16 => "u16",
            TypeTag::I32 => "i32",
            TypeTag::U32 => "u32",
            TypeTag::I64 => "i64",
            TypeTag::U64 => "u64",
            TypeTag::F32 => "f32",
            TypeTag::F64 => "f64",
            TypeTag::Decimal => "decimal",
            TypeTag::Char => "char",
            TypeTag::String => "string",
            TypeTag::Bytes => "bytes",
            TypeTag::DateTime => "datetime",
            TypeTag::DateTimeOffset => "datetimeoffset",
            TypeTag::Duration => "duration",
            TypeTag::Guid => "guid",
            TypeTag::IntPtr => "intptr",
            TypeTag::Culture => "culture",
            TypeTag::Version => "version",
            TypeTag::Enum(descriptor) => return write!(f, "enum:{}", descriptor.name()),
            TypeTag::Nullable(inner) => return write!(f, "nullable:{}", inner),
            TypeTag::Opaque(ty) => return write!(f, "opaque:{}", ty.name()),
        };
        f.write_str(name)
    }
}

/// Stable registry key derived from a [`TypeTag`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeKey(String);

impl TypeKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&TypeTag> for TypeKey {
    fn from(tag: &TypeTag) -> Self {
        tag.key()
    }
}
