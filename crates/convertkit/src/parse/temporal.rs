//! Date, date-with-offset and duration parsing, plus 100 ns tick helpers.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeDelta, Utc};

use crate::context::DateTimeStyles;
use crate::culture::Culture;

pub const TICKS_PER_SECOND: i64 = 10_000_000;
pub const TICKS_PER_DAY: i64 = TICKS_PER_SECOND * 86_400;

const ISO_DATETIME_PATTERNS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const OFFSET_PATTERNS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S%.f %:z",
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];

/// `0001-01-01T00:00:00`, the zero of date-time targets.
pub fn min_datetime() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

pub fn min_datetime_offset() -> DateTime<FixedOffset> {
    min_datetime().and_utc().fixed_offset()
}

pub fn duration_to_ticks(duration: TimeDelta) -> Option<i64> {
    duration
        .num_seconds()
        .checked_mul(TICKS_PER_SECOND)?
        .checked_add(duration.subsec_nanos() as i64 / 100)
}

pub fn ticks_to_duration(ticks: i64) -> Option<TimeDelta> {
    let seconds = TimeDelta::try_seconds(ticks.div_euclid(TICKS_PER_SECOND))?;
    seconds.checked_add(&TimeDelta::nanoseconds(
        ticks.rem_euclid(TICKS_PER_SECOND) * 100,
    ))
}

/// Ticks since `0001-01-01T00:00:00`.
pub fn datetime_to_ticks(value: NaiveDateTime) -> Option<i64> {
    duration_to_ticks(value.signed_duration_since(min_datetime()))
}

pub fn ticks_to_datetime(ticks: i64) -> Option<NaiveDateTime> {
    min_datetime().checked_add_signed(ticks_to_duration(ticks)?)
}

fn apply_white_space_style(text: &str, styles: DateTimeStyles) -> Option<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    if styles.contains(DateTimeStyles::ALLOW_WHITE_SPACES) || trimmed.len() == text.len() {
        Some(trimmed)
    } else {
        None
    }
}

/// Parses a date-time in the culture's patterns or ISO 8601.
///
/// Text carrying an offset keeps its local clock time unless
/// [`DateTimeStyles::ADJUST_TO_UNIVERSAL`] is set.
pub(crate) fn parse_datetime(
    text: &str,
    culture: &Culture,
    styles: Option<DateTimeStyles>,
) -> Option<NaiveDateTime> {
    let styles = styles.unwrap_or_default();
    let text = apply_white_space_style(text, styles)?;

    if let Some(with_offset) = parse_offset_forms(text, culture) {
        return Some(if styles.contains(DateTimeStyles::ADJUST_TO_UNIVERSAL) {
            with_offset.naive_utc()
        } else {
            with_offset.naive_local()
        });
    }
    parse_naive(text, culture)
}

pub(crate) fn parse_datetime_offset(
    text: &str,
    culture: &Culture,
    styles: Option<DateTimeStyles>,
) -> Option<DateTime<FixedOffset>> {
    let styles = styles.unwrap_or_default();
    let text = apply_white_space_style(text, styles)?;

    let parsed = parse_offset_forms(text, culture)
        .or_else(|| Some(parse_naive(text, culture)?.and_utc().fixed_offset()))?;
    Some(if styles.contains(DateTimeStyles::ADJUST_TO_UNIVERSAL) {
        parsed.with_timezone(&Utc).fixed_offset()
    } else {
        parsed
    })
}

fn parse_offset_forms(text: &str, culture: &Culture) -> Option<DateTime<FixedOffset>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed);
    }
    let culture_pattern = format!("{} %:z", culture.datetime_pattern());
    DateTime::parse_from_str(text, &culture_pattern)
        .ok()
        .or_else(|| {
            OFFSET_PATTERNS
                .into_iter()
                .find_map(|pattern| DateTime::parse_from_str(text, pattern).ok())
        })
}

fn parse_naive(text: &str, culture: &Culture) -> Option<NaiveDateTime> {
    let datetime_pattern = culture.datetime_pattern();
    let short_pattern = format!("{} %H:%M", culture.date_pattern());
    let found = [datetime_pattern.as_str(), short_pattern.as_str()]
        .into_iter()
        .chain(ISO_DATETIME_PATTERNS)
        .find_map(|pattern| NaiveDateTime::parse_from_str(text, pattern).ok());
    if found.is_some() {
        return found;
    }
    [culture.date_pattern(), "%Y-%m-%d"]
        .into_iter()
        .find_map(|pattern| NaiveDate::parse_from_str(text, pattern).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Formats a duration as `[-][d.]hh:mm:ss[.fffffff]`.
pub fn format_duration(duration: TimeDelta) -> String {
    let Some(ticks) = duration_to_ticks(duration) else {
        return duration.to_string();
    };
    let sign = if ticks < 0 { "-" } else { "" };
    let ticks = ticks.unsigned_abs();
    let days = ticks / TICKS_PER_DAY as u64;
    let rest = ticks % TICKS_PER_DAY as u64;
    let seconds = rest / TICKS_PER_SECOND as u64;
    let fraction = rest % TICKS_PER_SECOND as u64;

    let mut out = String::from(sign);
    if days > 0 {
        out.push_str(&format!("{days}."));
    }
    out.push_str(&format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        seconds / 60 % 60,
        seconds % 60
    ));
    if fraction > 0 {
        out.push_str(&format!(".{fraction:07}"));
    }
    out
}

/// Parses `[-][d.]hh:mm[:ss[.fffffff]]` or a plain day count.
pub(crate) fn parse_duration(text: &str) -> Option<TimeDelta> {
    let text = text.trim();
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    if body.is_empty() {
        return None;
    }

    let ticks = if body.contains(':') {
        clock_ticks(body)?
    } else {
        digits_value(body)?.checked_mul(TICKS_PER_DAY)?
    };
    ticks_to_duration(if negative { -ticks } else { ticks })
}

fn clock_ticks(body: &str) -> Option<i64> {
    let mut parts = body.split(':');
    let first = parts.next()?;
    let (days, hours) = match first.split_once('.') {
        Some((d, h)) => (digits_value(d)?, digits_value(h)?),
        None => (0, digits_value(first)?),
    };
    let minutes = digits_value(parts.next()?)?;
    let (seconds, fraction) = match parts.next() {
        Some(sec) => match sec.split_once('.') {
            Some((s, f)) => (digits_value(s)?, fraction_ticks(f)?),
            None => (digits_value(sec)?, 0),
        },
        None => (0, 0),
    };
    if parts.next().is_some() || hours > 23 || minutes > 59 || seconds > 59 {
        return None;
    }
    let clock = (hours * 3600 + minutes * 60 + seconds) * TICKS_PER_SECOND + fraction;
    days.checked_mul(TICKS_PER_DAY)?.checked_add(clock)
}

fn digits_value(text: &str) -> Option<i64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Up to seven fractional digits, right-padded to ticks.
fn fraction_ticks(text: &str) -> Option<i64> {
    if text.len() > 7 {
        return None;
    }
    let value = digits_value(text)?;
    Some(value * 10i64.pow(7 - text.len() as u32))
}
