//! Culture-aware string forms of values.

use std::fmt::Write;

use convertkit_buffers::to_hex_string;

use crate::culture::Culture;
use crate::parse::temporal::format_duration;
use crate::value::Value;

/// The text a value is parsed from when a string-based strategy needs it.
///
/// Numbers use the culture's decimal separator and no grouping, so the
/// result parses back under the same culture. `None` for null, and for
/// dates whose culture pattern cannot be rendered.
pub fn to_culture_string(value: &Value, culture: &Culture) -> Option<String> {
    let text = match value {
        Value::Null => return None,
        Value::Bool(b) => b.to_string(),
        Value::I8(v) => v.to_string(),
        Value::U8(v) => v.to_string(),
        Value::I16(v) => v.to_string(),
        Value::U16(v) => v.to_string(),
        Value::I32(v) => v.to_string(),
        Value::U32(v) => v.to_string(),
        Value::I64(v) => v.to_string(),
        Value::U64(v) => v.to_string(),
        Value::IntPtr(v) => v.to_string(),
        Value::F32(v) => localize_point(v.to_string(), culture),
        Value::F64(v) => localize_point(v.to_string(), culture),
        Value::Decimal(v) => localize_point(v.to_string(), culture),
        Value::Char(c) => c.to_string(),
        Value::String(s) => s.clone(),
        Value::Bytes(b) => to_hex_string(b),
        Value::DateTime(dt) => {
            let mut out = String::new();
            write!(out, "{}", dt.format(&culture.datetime_pattern())).ok()?;
            out
        }
        Value::DateTimeOffset(dt) => {
            let pattern = format!("{} %:z", culture.datetime_pattern());
            let mut out = String::new();
            write!(out, "{}", dt.format(&pattern)).ok()?;
            out
        }
        Value::Duration(d) => format_duration(*d),
        Value::Guid(g) => g.hyphenated().to_string(),
        Value::Culture(c) => c.name().to_string(),
        Value::Version(v) => v.to_string(),
        Value::Enum(e) => e.to_string(),
        Value::Opaque(o) => o.text().to_string(),
    };
    Some(text)
}

fn localize_point(text: String, culture: &Culture) -> String {
    match culture.decimal_separator() {
        '.' => text,
        sep => text.replacen('.', &sep.to_string(), 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn numbers_use_the_decimal_separator() {
        let de = Culture::lookup("de-DE").unwrap();
        assert_eq!(to_culture_string(&Value::F64(1234.5), &de).as_deref(), Some("1234,5"));
        assert_eq!(to_culture_string(&Value::I32(-7), &de).as_deref(), Some("-7"));
        assert_eq!(
            to_culture_string(&Value::F64(0.25), &Culture::invariant()).as_deref(),
            Some("0.25")
        );
    }

    #[test]
    fn dates_follow_the_culture_pattern() {
        let dt = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(13, 30, 0)
            .unwrap();
        let gb = Culture::lookup("en-GB").unwrap();
        assert_eq!(
            to_culture_string(&Value::DateTime(dt), &gb).as_deref(),
            Some("05/03/2024 13:30:00")
        );
        assert_eq!(
            to_culture_string(&Value::DateTimeOffset(dt.and_utc().fixed_offset()), &gb).as_deref(),
            Some("05/03/2024 13:30:00 +00:00")
        );
    }

    #[test]
    fn bytes_and_null() {
        assert_eq!(
            to_culture_string(&Value::Bytes(vec![0xAB, 1]), &Culture::invariant()).as_deref(),
            Some("AB01")
        );
        assert_eq!(to_culture_string(&Value::Null, &Culture::invariant()), None);
    }
}
