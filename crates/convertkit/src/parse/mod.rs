//! Text parsing into primitive targets.

pub mod boolean;
pub(crate) mod number;
pub mod temporal;

use crate::context::ConversionContext;
use crate::numeric::int_value;
use crate::outcome::ConversionOutcome;
use crate::type_tag::TypeTag;
use crate::value::Value;

use self::boolean::parse_bool;
use self::number::{parse_decimal_text, parse_f32_text, parse_f64_text, parse_int_text};
use self::temporal::parse_datetime;

/// Parses `text` as a boolean, integer, float, decimal, char, string or
/// date-time `target`, honoring the context's culture and styles.
///
/// Other targets, and unparsable text, fail with the target's zero value.
pub fn parse(text: &str, target: &TypeTag, context: &ConversionContext) -> ConversionOutcome {
    match parse_value(text, target, context) {
        Some(value) => ConversionOutcome::Success(value),
        None => ConversionOutcome::Failure(target.default_value()),
    }
}

pub(crate) fn parse_value(text: &str, target: &TypeTag, context: &ConversionContext) -> Option<Value> {
    let culture = context.culture();
    let styles = context.number_styles;
    if let Some((bits, signed)) = target.int_layout() {
        let n = parse_int_text(text, bits, signed, styles, culture)?;
        return int_value(target, n);
    }
    match target {
        TypeTag::Bool => parse_bool(text).map(Value::Bool),
        TypeTag::F32 => parse_f32_text(text, styles, culture).map(Value::F32),
        TypeTag::F64 => parse_f64_text(text, styles, culture).map(Value::F64),
        TypeTag::Decimal => parse_decimal_text(text, styles, culture).map(Value::Decimal),
        TypeTag::Char => {
            let mut chars = text.chars();
            let c = chars.next()?;
            chars.next().is_none().then_some(Value::Char(c))
        }
        TypeTag::String => Some(Value::String(text.to_string())),
        TypeTag::DateTime => {
            parse_datetime(text, culture, context.date_styles).map(Value::DateTime)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::NumberStyles;
    use crate::culture::Culture;

    #[test]
    fn integers_by_target_width() {
        let ctx = ConversionContext::default();
        assert_eq!(parse("0x1F", &TypeTag::I32, &ctx), ConversionOutcome::Success(Value::I32(31)));
        assert_eq!(parse("x10", &TypeTag::U8, &ctx), ConversionOutcome::Success(Value::U8(16)));
        assert_eq!(parse("0xFF", &TypeTag::I8, &ctx), ConversionOutcome::Success(Value::I8(-1)));
        assert_eq!(parse("256", &TypeTag::U8, &ctx), ConversionOutcome::Failure(Value::U8(0)));
    }

    #[test]
    fn caller_styles_apply() {
        let ctx = ConversionContext::default()
            .with_number_styles(NumberStyles::INTEGER | NumberStyles::ALLOW_THOUSANDS);
        assert_eq!(
            parse("12,345", &TypeTag::I64, &ctx),
            ConversionOutcome::Success(Value::I64(12345))
        );
    }

    #[test]
    fn culture_drives_float_separators() {
        let ctx = ConversionContext::default().with_culture(Culture::lookup("de-DE").unwrap());
        assert_eq!(
            parse("1.234,25", &TypeTag::F64, &ctx),
            ConversionOutcome::Success(Value::F64(1234.25))
        );
    }

    #[test]
    fn chars_need_exactly_one() {
        let ctx = ConversionContext::default();
        assert_eq!(parse("é", &TypeTag::Char, &ctx), ConversionOutcome::Success(Value::Char('é')));
        assert!(!parse("ab", &TypeTag::Char, &ctx).is_success());
        assert!(!parse("", &TypeTag::Char, &ctx).is_success());
    }

    #[test]
    fn unsupported_targets_fail() {
        let ctx = ConversionContext::default();
        assert_eq!(parse("x", &TypeTag::Bytes, &ctx), ConversionOutcome::Failure(Value::Null));
    }
}
