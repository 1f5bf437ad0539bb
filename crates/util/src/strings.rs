//! Character classification and string helpers.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StringError {
    #[error("separator set must not be empty")]
    EmptySeparators,
}

/// Coarse Unicode category of a character.
///
/// This folds the Unicode general categories into the buckets that matter
/// for word splitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    /// Upper-case letter.
    Upper,
    /// Lower-case letter.
    Lower,
    /// Any other letter (title-case, modifier, letters without case).
    OtherLetter,
    /// Any numeric character.
    Digit,
    /// Currency, math and modifier symbols.
    Symbol,
    /// Punctuation and invisible format characters.
    Punctuation,
    /// Whitespace.
    Separator,
    /// C0/C1 control characters.
    Control,
}

/// Classifies a character.
///
/// # Example
///
/// ```
/// use convertkit_util::{classify, CharClass};
///
/// assert_eq!(classify('A'), CharClass::Upper);
/// assert_eq!(classify('7'), CharClass::Digit);
/// assert_eq!(classify(','), CharClass::Punctuation);
/// assert_eq!(classify('$'), CharClass::Symbol);
/// ```
pub fn classify(c: char) -> CharClass {
    if c.is_whitespace() {
        CharClass::Separator
    } else if c.is_control() {
        CharClass::Control
    } else if c.is_uppercase() {
        CharClass::Upper
    } else if c.is_lowercase() {
        CharClass::Lower
    } else if c.is_alphabetic() {
        CharClass::OtherLetter
    } else if c.is_numeric() {
        CharClass::Digit
    } else if is_punctuation(c) {
        CharClass::Punctuation
    } else {
        CharClass::Symbol
    }
}

pub fn is_whitespace(c: char) -> bool {
    c.is_whitespace()
}

pub fn is_letter(c: char) -> bool {
    c.is_alphabetic()
}

/// Returns `true` for punctuation and format characters.
pub fn is_punctuation(c: char) -> bool {
    if c.is_ascii() {
        return c.is_ascii_punctuation()
            && !matches!(c, '$' | '+' | '<' | '=' | '>' | '^' | '`' | '|' | '~');
    }
    is_format(c)
        || matches!(
            c as u32,
            0x00A1
                | 0x00A7
                | 0x00AB
                | 0x00B6
                | 0x00B7
                | 0x00BB
                | 0x00BF
                | 0x037E
                | 0x0387
                | 0x055A..=0x055F
                | 0x0589
                | 0x05BE
                | 0x05C0
                | 0x05F3
                | 0x05F4
                | 0x060C
                | 0x061B
                | 0x061F
                | 0x06D4
                | 0x2010..=0x2027
                | 0x2030..=0x2043
                | 0x2045..=0x2051
                | 0x2053..=0x205E
                | 0x3001..=0x3003
                | 0x3008..=0x3011
                | 0x3014..=0x301F
        )
}

fn is_format(c: char) -> bool {
    matches!(
        c as u32,
        0x00AD | 0x200B..=0x200F | 0x202A..=0x202E | 0x2060..=0x2064 | 0xFEFF
    )
}

/// Returns `None` for empty text, optionally trimming first.
///
/// # Example
///
/// ```
/// use convertkit_util::nullify;
///
/// assert_eq!(nullify("  ", true), None);
/// assert_eq!(nullify("  ", false), Some("  "));
/// assert_eq!(nullify(" a ", true), Some("a"));
/// ```
pub fn nullify(text: &str, trim: bool) -> Option<&str> {
    let text = if trim { text.trim() } else { text };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Splits `text` on any of `separators`, trimming items and dropping empty ones.
///
/// # Example
///
/// ```
/// use convertkit_util::split_trimmed;
///
/// assert_eq!(split_trimmed(" a, b ;;c ", &[',', ';']).unwrap(), vec!["a", "b", "c"]);
/// assert!(split_trimmed("a", &[]).is_err());
/// ```
pub fn split_trimmed(text: &str, separators: &[char]) -> Result<Vec<String>, StringError> {
    if separators.is_empty() {
        return Err(StringError::EmptySeparators);
    }
    Ok(text
        .split(separators)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect())
}
