//! Conversion dispatcher behaviour matrix.

use std::fmt;
use std::net::Ipv6Addr;
use std::sync::{Arc, Barrier};
use std::thread;

use chrono::{NaiveDate, TimeDelta};
use convertkit::{
    change_type, change_type_to, convert, register_converter, register_from_str, register_parser,
    try_convert, try_convert_opaque, try_convert_to, ConversionContext, ConversionOutcome,
    ConvertError, Culture, NumberStyles, TypeConverter, TypeTag, Value, Version,
};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn ctx() -> ConversionContext {
    ConversionContext::default()
}

fn success(value: impl Into<Value>) -> ConversionOutcome {
    ConversionOutcome::Success(value.into())
}

// ---------------------------------------------------------------------------
// Booleans
// ---------------------------------------------------------------------------

#[test]
fn boolean_literal_table() {
    let cases = [
        ("yes", success(true)),
        ("F", success(false)),
        ("-1", success(true)),
        ("true story", success(true)),
        ("n", success(false)),
        ("", ConversionOutcome::Failure(Value::Bool(false))),
        ("perhaps", ConversionOutcome::Failure(Value::Bool(false))),
    ];
    for (text, expected) in cases {
        assert_eq!(try_convert(&Value::from(text), &TypeTag::Bool, &ctx()), expected, "{text:?}");
    }
    assert_eq!(
        change_type(&Value::from(""), &TypeTag::Bool, Value::Bool(true), &ctx()),
        Value::Bool(true)
    );
}

#[test]
fn single_byte_is_a_zero_test() {
    assert_eq!(try_convert(&Value::Bytes(vec![2]), &TypeTag::Bool, &ctx()), success(true));
    assert_eq!(try_convert(&Value::Bytes(vec![0]), &TypeTag::Bool, &ctx()), success(false));
    assert!(!try_convert(&Value::Bytes(vec![0, 1]), &TypeTag::Bool, &ctx()).is_success());
}

// ---------------------------------------------------------------------------
// Integers
// ---------------------------------------------------------------------------

#[test]
fn hex_prefixed_integers() {
    assert_eq!(try_convert(&Value::from("0x1F"), &TypeTag::I32, &ctx()), success(31_i32));
    assert_eq!(try_convert(&Value::from("x10"), &TypeTag::I32, &ctx()), success(16_i32));
    assert_eq!(try_convert(&Value::from("0XFFFF"), &TypeTag::I16, &ctx()), success(-1_i16));
    assert_eq!(try_convert(&Value::from("X7f"), &TypeTag::U8, &ctx()), success(127_u8));
}

#[test]
fn same_width_signedness_changes_reinterpret() {
    assert_eq!(try_convert(&Value::I16(-1), &TypeTag::U16, &ctx()), success(65535_u16));
    assert_eq!(try_convert(&Value::U32(u32::MAX), &TypeTag::I32, &ctx()), success(-1_i32));
    assert_eq!(try_convert(&Value::I8(-128), &TypeTag::U8, &ctx()), success(128_u8));
}

#[test]
fn narrowing_across_widths_is_range_checked() {
    assert_eq!(
        try_convert(&Value::I32(-1), &TypeTag::U16, &ctx()),
        ConversionOutcome::Failure(Value::U16(0))
    );
    assert_eq!(
        try_convert(&Value::I64(70_000), &TypeTag::I16, &ctx()),
        ConversionOutcome::Failure(Value::I16(0))
    );
    assert_eq!(try_convert(&Value::F64(2.5), &TypeTag::I64, &ctx()), success(2_i64));
    assert_eq!(try_convert(&Value::from("2.5"), &TypeTag::F32, &ctx()), success(2.5_f32));
}

#[test]
fn caller_number_styles_widen_integer_syntax() {
    let strict = try_convert(&Value::from("1,024"), &TypeTag::U32, &ctx());
    assert!(!strict.is_success());
    let lenient = ctx().with_number_styles(NumberStyles::NUMBER);
    assert_eq!(try_convert(&Value::from("1,024"), &TypeTag::U32, &lenient), success(1024_u32));
}

// ---------------------------------------------------------------------------
// Bytes
// ---------------------------------------------------------------------------

#[test]
fn byte_sequences_decode_only_at_exact_width() {
    assert_eq!(
        try_convert(&Value::Bytes(vec![1, 2, 3]), &TypeTag::I32, &ctx()),
        ConversionOutcome::Failure(Value::I32(0))
    );
    assert_eq!(
        try_convert(&Value::Bytes(vec![1, 2, 3, 4]), &TypeTag::I32, &ctx()),
        success(i32::from_ne_bytes([1, 2, 3, 4]))
    );
}

#[test]
fn values_encode_to_bytes() {
    assert_eq!(
        try_convert(&Value::U16(0x0102), &TypeTag::Bytes, &ctx()),
        success(0x0102_u16.to_ne_bytes().to_vec())
    );
    assert_eq!(
        try_convert(&Value::from("0xDEAD"), &TypeTag::Bytes, &ctx()),
        success(vec![0xDE_u8, 0xAD])
    );
    assert_eq!(
        try_convert(&Value::from("7, 0x08, 9"), &TypeTag::Bytes, &ctx()),
        success(vec![7_u8, 8, 9])
    );
    assert_eq!(
        try_convert(&Value::Bytes(vec![0xAB, 0xCD]), &TypeTag::String, &ctx()),
        success("ABCD")
    );
}

// ---------------------------------------------------------------------------
// Culture-aware text
// ---------------------------------------------------------------------------

#[test]
fn decimal_targets_strip_currency() {
    let us = ctx().with_culture(Culture::lookup("en-US").unwrap());
    assert_eq!(
        try_convert(&Value::from("$1,250.75"), &TypeTag::Decimal, &us),
        success(Decimal::new(125075, 2))
    );
    let fr = ConversionContext::from_json(r#"{"culture": "fr-FR"}"#).unwrap();
    assert_eq!(
        try_convert(&Value::from("1 250,75 €"), &TypeTag::Decimal, &fr),
        success(Decimal::new(125075, 2))
    );
}

#[test]
fn numbers_format_with_the_culture() {
    let de = ctx().with_culture(Culture::lookup("de-DE").unwrap());
    assert_eq!(try_convert(&Value::F64(0.5), &TypeTag::String, &de), success("0,5"));
    assert_eq!(try_convert(&Value::I32(42), &TypeTag::String, &de), success("42"));
}

#[test]
fn dates_parse_with_the_culture() {
    let gb = ctx().with_culture(Culture::lookup("en-GB").unwrap());
    let expected = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
    assert_eq!(try_convert(&Value::from("01/02/2024"), &TypeTag::DateTime, &gb), success(expected));
    assert_eq!(try_convert(&Value::from("2024-02-01"), &TypeTag::DateTime, &gb), success(expected));

    let offset = try_convert(&Value::DateTime(expected), &TypeTag::DateTimeOffset, &ctx());
    assert_eq!(offset, success(expected.and_utc().fixed_offset()));
}

// ---------------------------------------------------------------------------
// Known semantic types
// ---------------------------------------------------------------------------

#[test]
fn guid_sentinel_generates_fresh_values() {
    let a = try_convert(&Value::from("NEW"), &TypeTag::Guid, &ctx()).into_value();
    let b = try_convert(&Value::from("new"), &TypeTag::Guid, &ctx()).into_value();
    assert!(matches!(a, Value::Guid(g) if !g.is_nil()));
    assert_ne!(a, b);
}

#[test]
fn guid_from_sixteen_bytes() {
    let g = uuid::Uuid::from_u128(42);
    let bytes = Value::Bytes(g.to_bytes_le().to_vec());
    assert_eq!(try_convert(&bytes, &TypeTag::Guid, &ctx()), success(g));
}

#[test]
fn versions_cultures_and_durations() {
    assert_eq!(
        try_convert(&Value::from("4.0.30319"), &TypeTag::Version, &ctx()),
        success(Version::new(4, 0).with_build(30319))
    );
    assert_eq!(
        try_convert(&Value::from("de-de"), &TypeTag::Culture, &ctx()),
        success(Culture::lookup("de-DE").unwrap())
    );
    assert_eq!(
        try_convert(&Value::from("1.00:00:30"), &TypeTag::Duration, &ctx()),
        success(TimeDelta::seconds(86_430))
    );
    assert_eq!(
        try_convert(&Value::I64(50_000_000), &TypeTag::Duration, &ctx()),
        success(TimeDelta::seconds(5))
    );
    assert_eq!(
        try_convert(&Value::Duration(TimeDelta::minutes(90)), &TypeTag::String, &ctx()),
        success("01:30:00")
    );
}

// ---------------------------------------------------------------------------
// Null and nullable
// ---------------------------------------------------------------------------

#[test]
fn null_inputs() {
    assert_eq!(
        try_convert(&Value::Null, &TypeTag::Guid, &ctx()),
        ConversionOutcome::Failure(Value::Guid(uuid::Uuid::nil()))
    );
    assert_eq!(
        convert(&Value::Null, &TypeTag::U8, &ctx(), Some(&Value::U8(9))),
        success(9_u8)
    );
    assert_eq!(try_convert(&Value::Null, &TypeTag::Version, &ctx()), success(Value::Null));
}

#[test]
fn nullable_targets() {
    let target = TypeTag::nullable(TypeTag::F64);
    assert_eq!(try_convert(&Value::from(""), &target, &ctx()), success(Value::Null));
    assert_eq!(try_convert(&Value::I32(3), &target, &ctx()), success(3.0_f64));
    assert_eq!(try_convert(&Value::F64(1.5), &target, &ctx()), success(1.5_f64));
    assert_eq!(
        convert(&Value::from("?"), &target, &ctx(), Some(&Value::F64(-1.0))),
        ConversionOutcome::Failure(Value::F64(-1.0))
    );
}

// ---------------------------------------------------------------------------
// Registered converters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
struct Celsius(f64);

impl fmt::Display for Celsius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°C", self.0)
    }
}

struct CelsiusConverter;

impl TypeConverter for CelsiusConverter {
    fn can_convert_from(&self, source: &TypeTag) -> bool {
        source.is_numeric() || *source == TypeTag::String
    }

    fn can_convert_to(&self, target: &TypeTag) -> bool {
        *target == TypeTag::F64
    }

    fn convert_from(&self, value: &Value, context: &ConversionContext) -> Result<Value, ConvertError> {
        let degrees = try_convert_to::<f64>(value, context)
            .ok_or_else(|| ConvertError::Converter("not a temperature".into()))?;
        Ok(Value::opaque(Celsius(degrees)))
    }

    fn convert_to(
        &self,
        value: &Value,
        _target: &TypeTag,
        _context: &ConversionContext,
    ) -> Result<Value, ConvertError> {
        match value {
            Value::Opaque(o) => o
                .downcast_ref::<Celsius>()
                .map(|c| Value::F64(c.0))
                .ok_or_else(|| ConvertError::Converter("not Celsius".into())),
            _ => Err(ConvertError::Converter("not Celsius".into())),
        }
    }
}

#[test]
fn converters_work_in_both_directions() {
    register_converter(&TypeTag::opaque::<Celsius>(), Arc::new(CelsiusConverter));

    assert_eq!(try_convert_opaque::<Celsius>(&Value::I32(21), &ctx()), Some(Celsius(21.0)));
    assert_eq!(try_convert_opaque::<Celsius>(&Value::from("frosty"), &ctx()), None);
    assert_eq!(
        try_convert(&Value::opaque(Celsius(3.5)), &TypeTag::F64, &ctx()),
        success(3.5_f64)
    );
    assert_eq!(
        try_convert(&Value::opaque(Celsius(3.5)), &TypeTag::String, &ctx()),
        success("3.5°C")
    );
}

struct PanickingConverter;

impl TypeConverter for PanickingConverter {
    fn can_convert_from(&self, _source: &TypeTag) -> bool {
        true
    }

    fn convert_from(&self, _value: &Value, _context: &ConversionContext) -> Result<Value, ConvertError> {
        panic!("converter bug");
    }
}

#[test]
fn converter_panics_are_contained() {
    register_converter(&TypeTag::opaque::<std::net::SocketAddr>(), Arc::new(PanickingConverter));
    let outcome = try_convert(&Value::I32(1), &TypeTag::opaque::<std::net::SocketAddr>(), &ctx());
    assert_eq!(outcome, ConversionOutcome::Failure(Value::Null));
    let fallback = change_type(
        &Value::I32(1),
        &TypeTag::opaque::<std::net::SocketAddr>(),
        Value::from("fallback"),
        &ctx(),
    );
    assert_eq!(fallback, Value::from("fallback"));
}

struct WrongTypeConverter;

impl TypeConverter for WrongTypeConverter {
    fn can_convert_from(&self, _source: &TypeTag) -> bool {
        true
    }

    fn convert_from(&self, _value: &Value, _context: &ConversionContext) -> Result<Value, ConvertError> {
        Ok(Value::I32(0))
    }
}

#[test]
fn converter_results_must_match_the_target() {
    register_converter(&TypeTag::opaque::<std::path::PathBuf>(), Arc::new(WrongTypeConverter));
    assert!(!try_convert(&Value::from("x"), &TypeTag::opaque::<std::path::PathBuf>(), &ctx()).is_success());
}

// ---------------------------------------------------------------------------
// Registered parsers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
struct Percent(u8);

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[test]
fn parsers_cover_opaque_targets() {
    register_from_str::<Ipv6Addr>();
    assert_eq!(
        try_convert_opaque::<Ipv6Addr>(&Value::from("::1"), &ctx()),
        Some(Ipv6Addr::LOCALHOST)
    );

    register_parser(&TypeTag::opaque::<Percent>(), |text, _| {
        let n = text.trim().strip_suffix('%')?.trim().parse::<u8>().ok()?;
        (n <= 100).then(|| Value::opaque(Percent(n)))
    });
    assert_eq!(try_convert_opaque::<Percent>(&Value::from("45 %"), &ctx()), Some(Percent(45)));
    assert_eq!(try_convert_opaque::<Percent>(&Value::from("145%"), &ctx()), None);
}

// ---------------------------------------------------------------------------
// Typed front end
// ---------------------------------------------------------------------------

#[test]
fn typed_conversions() {
    assert_eq!(change_type_to::<u8>(&Value::from("0x2A"), 0, &ctx()), 42);
    assert_eq!(change_type_to::<u8>(&Value::from("-1"), 7, &ctx()), 7);
    assert_eq!(
        try_convert_to::<Option<String>>(&Value::Null, &ctx()),
        Some(None)
    );
    assert_eq!(try_convert_to::<char>(&Value::U16(0x41), &ctx()), Some('A'));
}

// ---------------------------------------------------------------------------
// Concurrency
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
struct Kelvin(f64);

impl fmt::Display for Kelvin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}K", self.0)
    }
}

struct KelvinConverter;

impl TypeConverter for KelvinConverter {
    fn can_convert_from(&self, source: &TypeTag) -> bool {
        source.is_numeric()
    }

    fn convert_from(&self, value: &Value, context: &ConversionContext) -> Result<Value, ConvertError> {
        let degrees = try_convert_to::<f64>(value, context)
            .ok_or_else(|| ConvertError::Converter("not a temperature".into()))?;
        Ok(Value::opaque(Kelvin(degrees)))
    }
}

#[test]
fn registries_serve_concurrent_callers() {
    let target = TypeTag::opaque::<Kelvin>();
    let barrier = Barrier::new(8);
    thread::scope(|scope| {
        for worker in 0..8 {
            let (barrier, target) = (&barrier, &target);
            scope.spawn(move || {
                barrier.wait();
                for round in 0..200 {
                    register_converter(target, Arc::new(KelvinConverter));
                    let n: i32 = worker * 1000 + round;
                    assert_eq!(
                        try_convert_opaque::<Kelvin>(&Value::I32(n), &ctx()),
                        Some(Kelvin(n as f64))
                    );
                    assert_eq!(
                        try_convert(&Value::String(n.to_string()), &TypeTag::I32, &ctx()),
                        success(n)
                    );
                }
            });
        }
    });
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

fn cultures() -> impl Strategy<Value = Culture> {
    prop_oneof![
        Just(Culture::invariant()),
        Just(Culture::lookup("de-DE").unwrap()),
        Just(Culture::lookup("fr-FR").unwrap()),
    ]
}

proptest! {
    #[test]
    fn integers_survive_their_string_form(n in any::<i64>(), culture in cultures()) {
        let context = ctx().with_culture(culture);
        let text = try_convert(&Value::I64(n), &TypeTag::String, &context).into_value();
        prop_assert_eq!(try_convert(&text, &TypeTag::I64, &context), success(n));
    }

    #[test]
    fn floats_survive_their_string_form(
        f in prop::num::f64::NORMAL | prop::num::f64::ZERO | prop::num::f64::SUBNORMAL,
        culture in cultures(),
    ) {
        let context = ctx().with_culture(culture);
        let text = try_convert(&Value::F64(f), &TypeTag::String, &context).into_value();
        prop_assert_eq!(try_convert(&text, &TypeTag::F64, &context), success(f));
    }

    #[test]
    fn integers_survive_their_byte_form(n in any::<i64>()) {
        let bytes = try_convert(&Value::I64(n), &TypeTag::Bytes, &ctx()).into_value();
        prop_assert_eq!(try_convert(&bytes, &TypeTag::I64, &ctx()), success(n));
    }
}
