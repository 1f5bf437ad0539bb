use std::sync::Arc;

use convertkit_buffers::decode;

use super::descriptor::{EnumDescriptor, EnumWidth};
use super::EnumValue;
use crate::numeric::int_parts;
use crate::outcome::ConversionOutcome;
use crate::value::Value;

const FLAG_SEPARATORS: [char; 4] = [',', ';', '+', '|'];

/// Parses enum text: member names, numeric literals, or for flags enums any
/// combination of both joined by `, ; + |` or whitespace.
///
/// `0x`-prefixed input is read as the whole underlying integer. Anything
/// unresolvable fails with the enum's zero value; a flags parse never
/// returns a partial combination.
pub fn parse_enum(text: &str, descriptor: &Arc<EnumDescriptor>) -> ConversionOutcome {
    let text = text.trim();
    let bits = if text.is_empty() {
        None
    } else if let Some(digits) = hex_digits(text) {
        parse_hex(digits, descriptor.width())
    } else if descriptor.is_flags() {
        parse_flag_tokens(text, descriptor)
    } else {
        parse_single(text, descriptor)
    };

    match bits {
        Some(bits) => ConversionOutcome::Success(Value::Enum(EnumValue::new(
            descriptor.clone(),
            bits,
        ))),
        None => {
            log::trace!("`{}` is not a {} value", text, descriptor.name());
            ConversionOutcome::Failure(Value::Enum(EnumValue::new(descriptor.clone(), 0)))
        }
    }
}

/// Every member with whether it is set in `value`.
///
/// A zero-valued member is set only when `value` is zero.
pub fn format_flags(value: u64, descriptor: &EnumDescriptor) -> Vec<(String, bool)> {
    descriptor
        .members()
        .iter()
        .map(|m| {
            let set = if m.bits == 0 {
                value == 0
            } else {
                value & m.bits != 0
            };
            (m.name.clone(), set)
        })
        .collect()
}

/// The display text of `bits`: a member name, a `", "`-joined flag list, or
/// the plain number when neither covers the value.
pub fn format_enum(bits: u64, descriptor: &EnumDescriptor) -> String {
    if let Some(member) = descriptor.member_by_bits(bits) {
        return member.name.clone();
    }
    if descriptor.is_flags() && bits != 0 {
        let mut members: Vec<_> = descriptor.members().iter().filter(|m| m.bits != 0).collect();
        members.sort_by(|a, b| b.bits.cmp(&a.bits));

        let mut remaining = bits;
        let mut chosen = Vec::new();
        for member in members {
            if remaining & member.bits == member.bits {
                remaining &= !member.bits;
                chosen.push(member);
            }
        }
        if remaining == 0 {
            chosen.sort_by_key(|m| m.bits);
            return chosen
                .iter()
                .map(|m| m.name.as_str())
                .collect::<Vec<_>>()
                .join(", ");
        }
    }
    descriptor.to_signed(bits).to_string()
}

/// Converts strings, integers, other enums and width-sized byte sequences
/// into a value of `descriptor`.
pub(crate) fn enum_from_value(value: &Value, descriptor: &Arc<EnumDescriptor>) -> Option<Value> {
    let bits = match value {
        Value::String(text) => return parse_enum(text, descriptor).ok(),
        Value::Enum(other) => descriptor
            .member_by_name(&format_enum(other.bits(), other.descriptor()))
            .map(|m| m.bits)
            .or_else(|| descriptor.bits_from_literal(other.numeric()))?,
        Value::Bytes(bytes) => bits_from_bytes(bytes, descriptor.width())?,
        other => {
            let (n, bits, _) = int_parts(other)?;
            if bits == descriptor.width().bits() {
                (n as u64) & descriptor.width().mask()
            } else {
                descriptor.bits_from_literal(n)?
            }
        }
    };
    Some(Value::Enum(EnumValue::new(descriptor.clone(), bits)))
}

fn bits_from_bytes(bytes: &[u8], width: EnumWidth) -> Option<u64> {
    let bits = match width {
        EnumWidth::W8 => decode::<u8>(bytes).ok()? as u64,
        EnumWidth::W16 => decode::<u16>(bytes).ok()? as u64,
        EnumWidth::W32 => decode::<u32>(bytes).ok()? as u64,
        EnumWidth::W64 => decode::<u64>(bytes).ok()?,
    };
    Some(bits)
}

fn hex_digits(text: &str) -> Option<&str> {
    text.strip_prefix("0x").or_else(|| text.strip_prefix("0X"))
}

fn parse_hex(digits: &str, width: EnumWidth) -> Option<u64> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let value = u64::from_str_radix(digits.trim_start_matches('0'), 16)
        .ok()
        .or_else(|| digits.bytes().all(|b| b == b'0').then_some(0))?;
    (value <= width.mask()).then_some(value)
}

/// Name first, then a decimal or hex literal within the underlying range.
fn token_bits(token: &str, descriptor: &EnumDescriptor) -> Option<u64> {
    if let Some(member) = descriptor.member_by_name(token) {
        return Some(member.bits);
    }
    if let Some(digits) = hex_digits(token) {
        return parse_hex(digits, descriptor.width());
    }
    let literal = token.parse::<i128>().ok()?;
    descriptor.bits_from_literal(literal)
}

fn parse_flag_tokens(text: &str, descriptor: &EnumDescriptor) -> Option<u64> {
    let mut tokens = text
        .split(|c: char| FLAG_SEPARATORS.contains(&c) || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .peekable();
    tokens.peek()?;
    tokens.try_fold(0u64, |acc, token| Some(acc | token_bits(token, descriptor)?))
}

fn parse_single(text: &str, descriptor: &EnumDescriptor) -> Option<u64> {
    if let Some(member) = descriptor.member_by_name(text) {
        return Some(member.bits);
    }
    let literal = text.parse::<i128>().ok()?;
    let bits = descriptor.bits_from_literal(literal)?;
    descriptor.member_by_bits(bits).map(|m| m.bits)
}
