//! Hex string and delimited byte list codecs.

use crate::BufferError;

/// Strips a hex prefix from `text`.
///
/// Both `0x`/`0X` and a bare `x`/`X` are recognized. Returns the remaining
/// text and whether a prefix was found. Surrounding whitespace is trimmed.
///
/// # Example
///
/// ```
/// use convertkit_buffers::normalize_hex_prefix;
///
/// assert_eq!(normalize_hex_prefix("0x1F"), ("1F", true));
/// assert_eq!(normalize_hex_prefix(" X10 "), ("10", true));
/// assert_eq!(normalize_hex_prefix("42"), ("42", false));
/// ```
pub fn normalize_hex_prefix(text: &str) -> (&str, bool) {
    let text = text.trim();
    if let Some(rest) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        return (rest, true);
    }
    if let Some(rest) = text.strip_prefix('x').or_else(|| text.strip_prefix('X')) {
        return (rest, true);
    }
    (text, false)
}

/// Formats bytes as upper-case hex digits without separators.
pub fn to_hex_string(bytes: &[u8]) -> String {
    const DIGITS: &[u8; 16] = b"0123456789ABCDEF";
    let mut out = String::with_capacity(bytes.len() * 2);
    for &b in bytes {
        out.push(DIGITS[(b >> 4) as usize] as char);
        out.push(DIGITS[(b & 0x0F) as usize] as char);
    }
    out
}

/// Decodes hex text into bytes.
///
/// An optional `0x`/`0X` prefix is accepted, every character that is not a
/// hex digit is skipped, and an odd digit count is padded with a leading
/// zero nibble. This never fails.
///
/// # Example
///
/// ```
/// use convertkit_buffers::from_hex_string;
///
/// assert_eq!(from_hex_string("0xDE-AD be:ef"), vec![0xDE, 0xAD, 0xBE, 0xEF]);
/// assert_eq!(from_hex_string("ABC"), vec![0x0A, 0xBC]);
/// assert_eq!(from_hex_string("zz"), Vec::<u8>::new());
/// ```
pub fn from_hex_string(text: &str) -> Vec<u8> {
    let trimmed = text.trim_start();
    let body = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    let nibbles: Vec<u8> = body
        .chars()
        .filter_map(|c| c.to_digit(16).map(|d| d as u8))
        .collect();

    let mut out = Vec::with_capacity(nibbles.len().div_ceil(2));
    let mut iter = nibbles.iter();
    if nibbles.len() % 2 == 1 {
        if let Some(&first) = iter.next() {
            out.push(first);
        }
    }
    while let (Some(&hi), Some(&lo)) = (iter.next(), iter.next()) {
        out.push((hi << 4) | lo);
    }
    out
}

/// Parses a delimited list of byte tokens.
///
/// Tokens are separated by `,` or `;`, may be decimal (`255`) or hex
/// (`0xFF`), and blank tokens are ignored.
///
/// # Example
///
/// ```
/// use convertkit_buffers::parse_byte_list;
///
/// assert_eq!(parse_byte_list("1, 0x10 ,255").unwrap(), vec![1, 16, 255]);
/// assert!(parse_byte_list("1, 256").is_err());
/// ```
pub fn parse_byte_list(text: &str) -> Result<Vec<u8>, BufferError> {
    text.split([',', ';'])
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(parse_byte_token)
        .collect()
}

fn parse_byte_token(token: &str) -> Result<u8, BufferError> {
    let parsed = match token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
    {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => token.parse::<u8>(),
    };
    parsed.map_err(|_| BufferError::InvalidToken(token.to_string()))
}
