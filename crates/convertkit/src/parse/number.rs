//! Culture-aware numeric text parsing.

use std::str::FromStr;

use convertkit_buffers::normalize_hex_prefix;
use rust_decimal::Decimal;

use crate::context::NumberStyles;
use crate::culture::Culture;
use crate::numeric::sign_extend;

/// Largest power of ten applied when scaling an integer by its exponent.
const MAX_EXPONENT: i64 = 40;

/// Parses an integer of the given layout.
///
/// A `0x`/`x` prefix, or the hex specifier style, reads hex digits as the
/// raw bit pattern of the width (`"FFFF"` is `-1` for 16-bit signed). Decimal
/// input must fit the layout.
pub(crate) fn parse_int_text(
    text: &str,
    bits: u32,
    signed: bool,
    styles: Option<NumberStyles>,
    culture: &Culture,
) -> Option<i128> {
    let styles = styles.unwrap_or(NumberStyles::INTEGER);
    let (body, prefixed) = normalize_hex_prefix(text);
    if prefixed || styles.contains(NumberStyles::ALLOW_HEX_SPECIFIER) {
        return parse_hex_bits(body, bits, signed);
    }

    let number = normalize_number(text, styles, culture)?;
    let value = integral_value(&number)?;
    let (min, max) = int_range(bits, signed);
    (min..=max).contains(&value).then_some(value)
}

pub(crate) fn parse_f64_text(
    text: &str,
    styles: Option<NumberStyles>,
    culture: &Culture,
) -> Option<f64> {
    if let Some(special) = special_float(text) {
        return Some(special);
    }
    let styles = styles.unwrap_or(NumberStyles::FLOAT | NumberStyles::ALLOW_THOUSANDS);
    f64::from_str(&normalize_number(text, styles, culture)?).ok()
}

pub(crate) fn parse_f32_text(
    text: &str,
    styles: Option<NumberStyles>,
    culture: &Culture,
) -> Option<f32> {
    if let Some(special) = special_float(text) {
        return Some(special as f32);
    }
    let styles = styles.unwrap_or(NumberStyles::FLOAT | NumberStyles::ALLOW_THOUSANDS);
    f32::from_str(&normalize_number(text, styles, culture)?).ok()
}

/// Like the float parse, and the culture's currency symbol is always
/// stripped.
pub(crate) fn parse_decimal_text(
    text: &str,
    styles: Option<NumberStyles>,
    culture: &Culture,
) -> Option<Decimal> {
    let styles = styles.unwrap_or(NumberStyles::FLOAT | NumberStyles::ALLOW_THOUSANDS)
        | NumberStyles::ALLOW_CURRENCY_SYMBOL;
    let number = normalize_number(text, styles, culture)?;
    if number.contains('e') {
        Decimal::from_scientific(&number).ok()
    } else {
        Decimal::from_str(&number).ok()
    }
}

fn parse_hex_bits(digits: &str, bits: u32, signed: bool) -> Option<i128> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let significant = digits.trim_start_matches('0');
    if significant.len() > (bits / 4) as usize {
        return None;
    }
    if significant.is_empty() {
        return Some(0);
    }
    let raw = u128::from_str_radix(significant, 16).ok()?;
    Some(if signed {
        sign_extend(raw, bits)
    } else {
        raw as i128
    })
}

fn special_float(text: &str) -> Option<f64> {
    let t = text.trim();
    let (negative, word) = match t.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, t.strip_prefix('+').unwrap_or(t)),
    };
    let value = match word.to_ascii_lowercase().as_str() {
        "nan" => f64::NAN,
        "inf" | "infinity" | "∞" => f64::INFINITY,
        _ => return None,
    };
    Some(if negative { -value } else { value })
}

pub(crate) fn int_range(bits: u32, signed: bool) -> (i128, i128) {
    if signed {
        (-(1i128 << (bits - 1)), (1i128 << (bits - 1)) - 1)
    } else {
        (0, (1i128 << bits) - 1)
    }
}

/// Rewrites culture-formatted text as `[-]digits[.digits][e[-]digits]`,
/// checking each element against `styles`.
pub(crate) fn normalize_number(text: &str, styles: NumberStyles, culture: &Culture) -> Option<String> {
    let mut s = text;
    if styles.contains(NumberStyles::ALLOW_LEADING_WHITE) {
        s = s.trim_start();
    }
    if styles.contains(NumberStyles::ALLOW_TRAILING_WHITE) {
        s = s.trim_end();
    }

    let symbol = culture.currency_symbol();
    let stripped;
    if styles.contains(NumberStyles::ALLOW_CURRENCY_SYMBOL) && !symbol.is_empty() {
        stripped = strip_currency(s, symbol);
        s = &stripped;
    }

    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    if let Some(&c) = chars.peek() {
        if c == '-' || c == '+' {
            if !styles.contains(NumberStyles::ALLOW_LEADING_SIGN) {
                return None;
            }
            if c == '-' {
                out.push('-');
            }
            chars.next();
        }
    }

    let mut digits = 0usize;
    let mut seen_point = false;
    while let Some(&c) = chars.peek() {
        if c.is_ascii_digit() {
            out.push(c);
            digits += 1;
        } else if c == culture.decimal_separator()
            && !seen_point
            && styles.contains(NumberStyles::ALLOW_DECIMAL_POINT)
        {
            out.push('.');
            seen_point = true;
        } else if seen_point
            || digits == 0
            || !styles.contains(NumberStyles::ALLOW_THOUSANDS)
            || !culture.is_group_separator(c)
        {
            break;
        }
        chars.next();
    }
    if digits == 0 {
        return None;
    }

    if let Some(&c) = chars.peek() {
        if (c == 'e' || c == 'E') && styles.contains(NumberStyles::ALLOW_EXPONENT) {
            chars.next();
            out.push('e');
            if let Some(&sign) = chars.peek() {
                if sign == '-' || sign == '+' {
                    if sign == '-' {
                        out.push('-');
                    }
                    chars.next();
                }
            }
            let mut exp_digits = 0;
            while let Some(&d) = chars.peek() {
                if !d.is_ascii_digit() {
                    break;
                }
                out.push(d);
                exp_digits += 1;
                chars.next();
            }
            if exp_digits == 0 {
                return None;
            }
        }
    }

    chars.next().is_none().then_some(out)
}

/// Removes the currency symbol once, at either end of the number or right
/// after its sign, with the whitespace next to it.
fn strip_currency(text: &str, symbol: &str) -> String {
    if let Some(rest) = text.strip_prefix(symbol) {
        return rest.trim_start().to_string();
    }
    if let Some(rest) = text.strip_suffix(symbol) {
        return rest.trim_end().to_string();
    }
    for sign in ['-', '+'] {
        if let Some(rest) = text.strip_prefix(sign) {
            if let Some(rest) = rest.strip_prefix(symbol) {
                return format!("{sign}{}", rest.trim_start());
            }
        }
    }
    text.to_string()
}

/// The exact integer a normalized number denotes, if it has no fractional
/// part.
fn integral_value(number: &str) -> Option<i128> {
    let (mantissa, exponent) = match number.split_once('e') {
        Some((m, e)) => (m, e.parse::<i64>().ok()?),
        None => (number, 0),
    };
    let (negative, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, mantissa),
    };
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let mut digits = format!("{int_part}{frac_part}");
    let scale = exponent.checked_sub(frac_part.len() as i64)?;

    if scale < 0 {
        let cut = digits.len().checked_sub(scale.unsigned_abs() as usize)?;
        if !digits[cut..].bytes().all(|b| b == b'0') {
            return None;
        }
        digits.truncate(cut);
    }
    let digits = digits.trim_start_matches('0');
    let mut value = if digits.is_empty() {
        0
    } else {
        digits.parse::<i128>().ok()?
    };
    if scale > 0 {
        if scale > MAX_EXPONENT {
            return (value == 0).then_some(0);
        }
        value = value.checked_mul(10i128.checked_pow(scale as u32)?)?;
    }
    Some(if negative { -value } else { value })
}
