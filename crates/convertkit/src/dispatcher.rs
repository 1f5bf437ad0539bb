//! The conversion dispatcher.
//!
//! A conversion tries, in order: identity, null handling, nullable unwrap,
//! then the strategies of [`STRATEGIES`]. The first strategy producing a
//! value wins; when none does, the result is a failure carrying the
//! caller's default or the target's zero value.

use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::context::ConversionContext;
use crate::enums::enum_from_value;
use crate::error::ConvertError;
use crate::format::to_culture_string;
use crate::known::known_value;
use crate::layout::{decode_value, encode_value};
use crate::numeric::convert_numeric;
use crate::outcome::ConversionOutcome;
use crate::parse::parse_value;
use crate::registry::{resolve_converter, resolve_parser};
use crate::type_tag::TypeTag;
use crate::value::Value;

type Strategy = fn(&Value, &TypeTag, &ConversionContext) -> Option<Value>;

const STRATEGIES: [(&str, Strategy); 6] = [
    ("enum", enum_strategy),
    ("bytes", byte_strategy),
    ("known", known_value),
    ("primitive", primitive_strategy),
    ("converter", converter_strategy),
    ("parser", parser_strategy),
];

/// Converts `value` to `target`.
///
/// A null value succeeds as null for nullable and reference-like targets,
/// and as `default` when one is given. Otherwise it fails with the target's
/// zero value.
pub fn convert(
    value: &Value,
    target: &TypeTag,
    context: &ConversionContext,
    default: Option<&Value>,
) -> ConversionOutcome {
    if value.is_assignable_to(target) {
        return ConversionOutcome::Success(value.clone());
    }

    if value.is_null() {
        if target.is_nullable() || target.is_reference_like() {
            return ConversionOutcome::Success(Value::Null);
        }
        return match default {
            Some(default) => ConversionOutcome::Success(default.clone()),
            None => ConversionOutcome::Failure(target.default_value()),
        };
    }

    if let TypeTag::Nullable(inner) = target {
        if value.is_blank_text() {
            return ConversionOutcome::Success(Value::Null);
        }
        return match convert(value, inner, context, None) {
            ConversionOutcome::Success(v) => ConversionOutcome::Success(v),
            ConversionOutcome::Failure(_) => {
                ConversionOutcome::Failure(default.cloned().unwrap_or(Value::Null))
            }
        };
    }

    for (name, strategy) in STRATEGIES {
        if let Some(converted) = strategy(value, target, context) {
            log::trace!("{name} strategy converted {value:?} to {target}");
            return ConversionOutcome::Success(converted);
        }
    }

    log::trace!("no strategy converts {value:?} to {target}");
    ConversionOutcome::Failure(default.cloned().unwrap_or_else(|| target.default_value()))
}

/// [`convert`] without a default.
pub fn try_convert(value: &Value, target: &TypeTag, context: &ConversionContext) -> ConversionOutcome {
    convert(value, target, context, None)
}

/// Converts `value`, answering `default` whenever the conversion fails.
pub fn change_type(
    value: &Value,
    target: &TypeTag,
    default: Value,
    context: &ConversionContext,
) -> Value {
    match convert(value, target, context, Some(&default)) {
        ConversionOutcome::Success(v) => v,
        ConversionOutcome::Failure(_) => default,
    }
}

/// Converts `value`, reporting failure as [`ConvertError::Unconvertible`].
pub fn convert_strict(
    value: &Value,
    target: &TypeTag,
    context: &ConversionContext,
) -> Result<Value, ConvertError> {
    convert(value, target, context, None)
        .into_result()
        .map_err(|_| ConvertError::Unconvertible {
            value: describe(value, context),
            target: target.key(),
        })
}

pub(crate) fn describe(value: &Value, context: &ConversionContext) -> String {
    to_culture_string(value, context.culture()).unwrap_or_else(|| format!("{value:?}"))
}

fn enum_strategy(value: &Value, target: &TypeTag, _context: &ConversionContext) -> Option<Value> {
    if let TypeTag::Enum(descriptor) = target {
        return enum_from_value(value, descriptor);
    }
    let Value::Enum(e) = value else {
        return None;
    };
    match target {
        TypeTag::String => Some(Value::String(e.to_string())),
        TypeTag::Bool => convert_numeric(value, target),
        t if t.is_numeric() => convert_numeric(value, t),
        _ => None,
    }
}

fn byte_strategy(value: &Value, target: &TypeTag, _context: &ConversionContext) -> Option<Value> {
    if *target == TypeTag::Bytes {
        return encode_value(value).map(Value::Bytes);
    }
    match value {
        Value::Bytes(bytes) => decode_value(bytes, target),
        _ => None,
    }
}

fn primitive_strategy(value: &Value, target: &TypeTag, context: &ConversionContext) -> Option<Value> {
    let parsable = target.is_numeric()
        || matches!(
            target,
            TypeTag::Bool | TypeTag::Char | TypeTag::String | TypeTag::DateTime
        );
    if !parsable {
        return None;
    }
    // Byte sequences only become non-text values through their exact layout.
    if matches!(value, Value::Bytes(_)) && *target != TypeTag::String {
        return None;
    }
    if *target != TypeTag::String {
        if let Some(cast) = convert_numeric(value, target) {
            return Some(cast);
        }
    }
    let text = to_culture_string(value, context.culture())?;
    parse_value(&text, target, context)
}

fn converter_strategy(value: &Value, target: &TypeTag, context: &ConversionContext) -> Option<Value> {
    let source = value.type_tag()?;

    if let Some(converter) = resolve_converter(target) {
        if converter.can_convert_from(&source) {
            let converted = contained(target, || converter.convert_from(value, context));
            if converted.is_some() {
                return converted;
            }
        }
    }

    let converter = resolve_converter(&source)?;
    if !converter.can_convert_to(target) {
        return None;
    }
    contained(target, || converter.convert_to(value, target, context))
}

/// Runs a registered converter, treating errors, panics and values of the
/// wrong type as "not converted".
fn contained<F>(target: &TypeTag, run: F) -> Option<Value>
where
    F: FnOnce() -> Result<Value, ConvertError>,
{
    match catch_unwind(AssertUnwindSafe(run)) {
        Ok(Ok(v)) if v.is_assignable_to(target) => Some(v),
        Ok(Ok(v)) => {
            log::debug!("converter for {target} returned {v:?}");
            None
        }
        Ok(Err(err)) => {
            log::debug!("converter for {target} failed: {err}");
            None
        }
        Err(_) => {
            log::debug!("converter for {target} panicked");
            None
        }
    }
}

fn parser_strategy(value: &Value, target: &TypeTag, context: &ConversionContext) -> Option<Value> {
    let parser = resolve_parser(target)?;
    let text = to_culture_string(value, context.culture())?;
    parser(&text, context).filter(|v| v.is_assignable_to(target))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> ConversionContext {
        ConversionContext::default()
    }

    #[test]
    fn null_handling_by_target_kind() {
        assert_eq!(
            try_convert(&Value::Null, &TypeTag::I32, &ctx()),
            ConversionOutcome::Failure(Value::I32(0))
        );
        assert_eq!(
            convert(&Value::Null, &TypeTag::I32, &ctx(), Some(&Value::I32(7))),
            ConversionOutcome::Success(Value::I32(7))
        );
        assert_eq!(
            try_convert(&Value::Null, &TypeTag::String, &ctx()),
            ConversionOutcome::Success(Value::Null)
        );
        assert_eq!(
            try_convert(&Value::Null, &TypeTag::nullable(TypeTag::I32), &ctx()),
            ConversionOutcome::Success(Value::Null)
        );
    }

    #[test]
    fn nullable_targets_unwrap() {
        let target = TypeTag::nullable(TypeTag::I32);
        assert_eq!(
            try_convert(&Value::from("  "), &target, &ctx()),
            ConversionOutcome::Success(Value::Null)
        );
        assert_eq!(
            try_convert(&Value::from("12"), &target, &ctx()),
            ConversionOutcome::Success(Value::I32(12))
        );
        assert_eq!(
            try_convert(&Value::from("twelve"), &target, &ctx()),
            ConversionOutcome::Failure(Value::Null)
        );
    }

    #[test]
    fn failures_carry_the_default() {
        assert_eq!(
            change_type(&Value::from("abc"), &TypeTag::I32, Value::I32(-1), &ctx()),
            Value::I32(-1)
        );
        assert_eq!(
            try_convert(&Value::from("abc"), &TypeTag::Guid, &ctx()),
            ConversionOutcome::Failure(Value::Guid(uuid::Uuid::nil()))
        );
    }

    #[test]
    fn strict_conversion_names_the_target() {
        let err = convert_strict(&Value::from("abc"), &TypeTag::U8, &ctx()).unwrap_err();
        assert_eq!(err.to_string(), "cannot convert `abc` to u8");
    }
}
