use crate::culture::Culture;
use crate::parse::number::parse_int_text;

/// Reads a boolean literal.
///
/// `y`, `yes`, `t` and anything starting with `true` are true; `n`, `no`,
/// `f` and anything starting with `false` are false (all ignoring case).
/// Other text is accepted as a 64-bit integer, non-zero meaning true.
pub fn parse_bool(text: &str) -> Option<bool> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let lower = text.to_lowercase();
    match lower.as_str() {
        "y" | "yes" | "t" => Some(true),
        "n" | "no" | "f" => Some(false),
        s if s.starts_with("true") => Some(true),
        s if s.starts_with("false") => Some(false),
        _ => parse_int_text(text, 64, true, None, &Culture::invariant()).map(|n| n != 0),
    }
}

#[cfg(test)]
mod tests {
    use super::parse_bool;

    #[test]
    fn literal_table() {
        for (text, expected) in [
            ("yes", Some(true)),
            ("Y", Some(true)),
            ("t", Some(true)),
            ("TRUE", Some(true)),
            ("trueish", Some(true)),
            ("F", Some(false)),
            ("no", Some(false)),
            ("False", Some(false)),
            ("-1", Some(true)),
            ("0", Some(false)),
            ("0x10", Some(true)),
            ("", None),
            ("   ", None),
            ("ye", None),
            ("maybe", None),
        ] {
            assert_eq!(parse_bool(text), expected, "{text:?}");
        }
    }
}
