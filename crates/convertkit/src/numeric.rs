//! Value-to-value numeric casts.
//!
//! Same-width signed/unsigned casts keep the bit pattern. Every other
//! integer result is range-checked, and floats round half to even first.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::parse::number::int_range;
use crate::parse::temporal::{duration_to_ticks, ticks_to_duration};
use crate::type_tag::TypeTag;
use crate::value::Value;

enum Num {
    /// `bits == 0` marks sources that never reinterpret (bool, char, ticks).
    Int { value: i128, bits: u32, signed: bool },
    Single(f32),
    Float(f64),
    Decimal(Decimal),
}

/// Value, width and signedness of a plain integer value.
pub(crate) fn int_parts(value: &Value) -> Option<(i128, u32, bool)> {
    let parts = match *value {
        Value::I8(v) => (v as i128, 8, true),
        Value::U8(v) => (v as i128, 8, false),
        Value::I16(v) => (v as i128, 16, true),
        Value::U16(v) => (v as i128, 16, false),
        Value::I32(v) => (v as i128, 32, true),
        Value::U32(v) => (v as i128, 32, false),
        Value::I64(v) => (v as i128, 64, true),
        Value::U64(v) => (v as i128, 64, false),
        Value::IntPtr(v) => (v as i128, isize::BITS, true),
        _ => return None,
    };
    Some(parts)
}

/// Reads `bits` low bits of `raw` as two's complement.
pub(crate) fn sign_extend(raw: u128, bits: u32) -> i128 {
    if bits == 0 || bits >= 128 {
        return raw as i128;
    }
    let shift = 128 - bits;
    ((raw << shift) as i128) >> shift
}

fn num_of(value: &Value) -> Option<Num> {
    if let Some((value, bits, signed)) = int_parts(value) {
        return Some(Num::Int { value, bits, signed });
    }
    let num = match value {
        Value::Bool(b) => Num::Int {
            value: *b as i128,
            bits: 0,
            signed: false,
        },
        Value::Char(c) => Num::Int {
            value: *c as u32 as i128,
            bits: 0,
            signed: false,
        },
        Value::Enum(e) => Num::Int {
            value: e.numeric(),
            bits: e.descriptor().width().bits(),
            signed: e.descriptor().is_signed(),
        },
        Value::Duration(d) => Num::Int {
            value: duration_to_ticks(*d)? as i128,
            bits: 0,
            signed: true,
        },
        Value::F32(f) => Num::Single(*f),
        Value::F64(f) => Num::Float(*f),
        Value::Decimal(d) => Num::Decimal(*d),
        _ => return None,
    };
    Some(num)
}

/// Builds an integer value of `tag`, if `n` fits.
pub(crate) fn int_value(tag: &TypeTag, n: i128) -> Option<Value> {
    let value = match tag {
        TypeTag::I8 => Value::I8(i8::try_from(n).ok()?),
        TypeTag::U8 => Value::U8(u8::try_from(n).ok()?),
        TypeTag::I16 => Value::I16(i16::try_from(n).ok()?),
        TypeTag::U16 => Value::U16(u16::try_from(n).ok()?),
        TypeTag::I32 => Value::I32(i32::try_from(n).ok()?),
        TypeTag::U32 => Value::U32(u32::try_from(n).ok()?),
        TypeTag::I64 => Value::I64(i64::try_from(n).ok()?),
        TypeTag::U64 => Value::U64(u64::try_from(n).ok()?),
        TypeTag::IntPtr => Value::IntPtr(isize::try_from(n).ok()?),
        _ => return None,
    };
    Some(value)
}

fn round_float(f: f64) -> Option<i128> {
    if !f.is_finite() {
        return None;
    }
    let rounded = f.round_ties_even();
    // Outside this range `as` would saturate.
    if rounded.abs() >= 1.7e38 {
        return None;
    }
    Some(rounded as i128)
}

fn to_integer(num: &Num, bits: u32, signed: bool) -> Option<i128> {
    let value = match *num {
        Num::Int {
            value,
            bits: source_bits,
            signed: source_signed,
        } => {
            if source_bits == bits && source_signed != signed {
                let raw = (value as u128) & ((1u128 << bits) - 1);
                if signed {
                    sign_extend(raw, bits)
                } else {
                    raw as i128
                }
            } else {
                value
            }
        }
        Num::Single(f) => round_float(f as f64)?,
        Num::Float(f) => round_float(f)?,
        Num::Decimal(d) => d
            .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
            .to_i128()?,
    };
    let (min, max) = int_range(bits, signed);
    (min..=max).contains(&value).then_some(value)
}

/// Casts a numeric-like value (integers, floats, decimal, bool, char, enum,
/// duration ticks) to a numeric-like target.
pub(crate) fn convert_numeric(value: &Value, target: &TypeTag) -> Option<Value> {
    let num = num_of(value)?;
    if let Some((bits, signed)) = target.int_layout() {
        return int_value(target, to_integer(&num, bits, signed)?);
    }
    let converted = match target {
        TypeTag::F32 => Value::F32(match num {
            Num::Int { value, .. } => value as f32,
            Num::Single(f) => f,
            Num::Float(f) => f as f32,
            Num::Decimal(d) => d.to_f32()?,
        }),
        TypeTag::F64 => Value::F64(match num {
            Num::Int { value, .. } => value as f64,
            Num::Single(f) => f as f64,
            Num::Float(f) => f,
            Num::Decimal(d) => d.to_f64()?,
        }),
        TypeTag::Decimal => Value::Decimal(match num {
            Num::Int { value, .. } => Decimal::try_from_i128_with_scale(value, 0).ok()?,
            Num::Single(f) => Decimal::from_f32(f)?,
            Num::Float(f) => Decimal::from_f64(f)?,
            Num::Decimal(d) => d,
        }),
        TypeTag::Bool => Value::Bool(match num {
            Num::Int { value, .. } => value != 0,
            Num::Single(f) => f != 0.0,
            Num::Float(f) => f != 0.0,
            Num::Decimal(d) => !d.is_zero(),
        }),
        TypeTag::Char => match num {
            Num::Int { value, .. } => Value::Char(char::from_u32(u32::try_from(value).ok()?)?),
            _ => return None,
        },
        TypeTag::Duration => match num {
            Num::Int { value, .. } => Value::Duration(ticks_to_duration(i64::try_from(value).ok()?)?),
            _ => return None,
        },
        _ => return None,
    };
    Some(converted)
}
