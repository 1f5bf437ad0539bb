//! Byte layouts of values, on top of the fixed-width codec.
//!
//! Decimals use their 16-byte serialized form, date-times and durations
//! their 8-byte tick count, GUIDs the 16-byte mixed-endian layout, and enums
//! the width of their underlying integer.

use convertkit_buffers::{decode, encode, from_hex_string, parse_byte_list};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::enums::EnumWidth;
use crate::parse::temporal::{
    datetime_to_ticks, duration_to_ticks, ticks_to_datetime, ticks_to_duration,
};
use crate::type_tag::TypeTag;
use crate::value::Value;

/// The byte form of `value`; strings are read as a byte list when they
/// contain a comma, else as hex text.
pub(crate) fn encode_value(value: &Value) -> Option<Vec<u8>> {
    let bytes = match value {
        Value::Bool(v) => encode(*v).ok()?,
        Value::I8(v) => encode(*v).ok()?,
        Value::U8(v) => encode(*v).ok()?,
        Value::I16(v) => encode(*v).ok()?,
        Value::U16(v) => encode(*v).ok()?,
        Value::I32(v) => encode(*v).ok()?,
        Value::U32(v) => encode(*v).ok()?,
        Value::I64(v) => encode(*v).ok()?,
        Value::U64(v) => encode(*v).ok()?,
        Value::F32(v) => encode(*v).ok()?,
        Value::F64(v) => encode(*v).ok()?,
        Value::Char(v) => encode(*v).ok()?,
        Value::IntPtr(v) => encode(*v).ok()?,
        Value::Decimal(d) => d.serialize().to_vec(),
        Value::DateTime(dt) => encode(datetime_to_ticks(*dt)?).ok()?,
        Value::DateTimeOffset(dt) => encode(datetime_to_ticks(dt.naive_utc())?).ok()?,
        Value::Duration(d) => encode(duration_to_ticks(*d)?).ok()?,
        Value::Guid(g) => g.to_bytes_le().to_vec(),
        Value::Enum(e) => match e.descriptor().width() {
            EnumWidth::W8 => encode(e.bits() as u8).ok()?,
            EnumWidth::W16 => encode(e.bits() as u16).ok()?,
            EnumWidth::W32 => encode(e.bits() as u32).ok()?,
            EnumWidth::W64 => encode(e.bits()).ok()?,
        },
        Value::String(s) if s.contains(',') => parse_byte_list(s).ok()?,
        Value::String(s) => from_hex_string(s),
        Value::Bytes(b) => b.clone(),
        Value::Null
        | Value::Culture(_)
        | Value::Version(_)
        | Value::Opaque(_) => return None,
    };
    Some(bytes)
}

/// Reads a fixed-width `target` from exactly its number of bytes.
pub(crate) fn decode_value(bytes: &[u8], target: &TypeTag) -> Option<Value> {
    let value = match target {
        TypeTag::Bool => Value::Bool(decode(bytes).ok()?),
        TypeTag::I8 => Value::I8(decode(bytes).ok()?),
        TypeTag::U8 => Value::U8(decode(bytes).ok()?),
        TypeTag::I16 => Value::I16(decode(bytes).ok()?),
        TypeTag::U16 => Value::U16(decode(bytes).ok()?),
        TypeTag::I32 => Value::I32(decode(bytes).ok()?),
        TypeTag::U32 => Value::U32(decode(bytes).ok()?),
        TypeTag::I64 => Value::I64(decode(bytes).ok()?),
        TypeTag::U64 => Value::U64(decode(bytes).ok()?),
        TypeTag::F32 => Value::F32(decode(bytes).ok()?),
        TypeTag::F64 => Value::F64(decode(bytes).ok()?),
        TypeTag::Char => Value::Char(decode(bytes).ok()?),
        TypeTag::IntPtr => Value::IntPtr(decode(bytes).ok()?),
        TypeTag::Decimal => Value::Decimal(Decimal::deserialize(bytes.try_into().ok()?)),
        TypeTag::DateTime => Value::DateTime(ticks_to_datetime(decode(bytes).ok()?)?),
        TypeTag::DateTimeOffset => {
            Value::DateTimeOffset(ticks_to_datetime(decode(bytes).ok()?)?.and_utc().fixed_offset())
        }
        TypeTag::Duration => Value::Duration(ticks_to_duration(decode(bytes).ok()?)?),
        TypeTag::Guid => Value::Guid(Uuid::from_slice_le(bytes).ok()?),
        _ => return None,
    };
    Some(value)
}
