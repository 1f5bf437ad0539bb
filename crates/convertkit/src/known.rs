//! Dedicated conversions for GUIDs, pointer-sized integers, versions,
//! cultures, durations and date-times with offsets.

use uuid::Uuid;

use crate::context::ConversionContext;
use crate::culture::Culture;
use crate::numeric::{convert_numeric, int_parts};
use crate::parse::number::parse_int_text;
use crate::parse::temporal::{parse_datetime_offset, parse_duration, ticks_to_duration};
use crate::type_tag::TypeTag;
use crate::value::Value;

/// Text that asks for a freshly generated GUID.
pub const NEW_GUID_SENTINEL: &str = "new";

pub(crate) fn known_value(value: &Value, target: &TypeTag, context: &ConversionContext) -> Option<Value> {
    match target {
        TypeTag::Guid => guid(value),
        TypeTag::IntPtr => match value {
            Value::String(s) => {
                let n = parse_int_text(s, isize::BITS, true, context.number_styles, context.culture())?;
                Some(Value::IntPtr(isize::try_from(n).ok()?))
            }
            other => convert_numeric(other, target),
        },
        TypeTag::Version => match value {
            Value::String(s) => s.parse().ok().map(Value::Version),
            _ => None,
        },
        TypeTag::Culture => culture(value),
        TypeTag::Duration => match value {
            Value::String(s) => parse_duration(s).map(Value::Duration),
            other => {
                let (ticks, _, _) = int_parts(other)?;
                ticks_to_duration(i64::try_from(ticks).ok()?).map(Value::Duration)
            }
        },
        TypeTag::DateTimeOffset => match value {
            Value::String(s) => {
                parse_datetime_offset(s, context.culture(), context.date_styles)
                    .map(Value::DateTimeOffset)
            }
            Value::DateTime(dt) => Some(Value::DateTimeOffset(dt.and_utc().fixed_offset())),
            _ => None,
        },
        TypeTag::DateTime => match value {
            Value::DateTimeOffset(dt) => Some(Value::DateTime(dt.naive_local())),
            _ => None,
        },
        _ => None,
    }
}

fn guid(value: &Value) -> Option<Value> {
    let Value::String(text) = value else {
        return None;
    };
    let text = text.trim();
    if text.eq_ignore_ascii_case(NEW_GUID_SENTINEL) {
        return Some(Value::Guid(Uuid::new_v4()));
    }
    Uuid::parse_str(text).ok().map(Value::Guid)
}

/// Cultures resolve from a name or from an LCID, given as text or number.
fn culture(value: &Value) -> Option<Value> {
    let found = match value {
        Value::String(text) => {
            let text = text.trim();
            match text.parse::<u32>() {
                Ok(lcid) => Culture::from_lcid(lcid),
                Err(_) => Culture::lookup(text),
            }
        }
        other => {
            let (lcid, _, _) = int_parts(other)?;
            Culture::from_lcid(u32::try_from(lcid).ok()?)
        }
    };
    found.map(Value::Culture)
}
