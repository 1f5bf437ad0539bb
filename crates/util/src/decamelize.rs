//! Identifier to display-label conversion.
//!
//! `LoadByWhateverStuff` becomes `Load By Whatever Stuff`, `LoadBy25Years`
//! becomes `Load By 25 Years`, and acronyms such as `BBKing` stay glued
//! because a boundary is only inserted on a transition *into* an upper-case
//! letter or a digit.

use serde::{Deserialize, Serialize};

use crate::strings::{classify, CharClass};

/// Character substituted for every space once the label is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpaceReplacement {
    #[default]
    None,
    Underscore,
    Minus,
    Dot,
}

impl SpaceReplacement {
    pub fn as_char(self) -> Option<char> {
        match self {
            SpaceReplacement::None => None,
            SpaceReplacement::Underscore => Some('_'),
            SpaceReplacement::Minus => Some('-'),
            SpaceReplacement::Dot => Some('.'),
        }
    }
}

/// Options for [`decamelize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecamelizeOptions {
    /// Upper-case the first emitted letter.
    pub force_first_upper: bool,
    /// Lower-case everything after the first emitted letter.
    pub force_rest_lower: bool,
    /// Decode `\uXXXX` sequences.
    pub unescape_unicode: bool,
    /// Decode `_xXXXX_` sequences.
    pub unescape_hex_escape: bool,
    pub space_replacement: SpaceReplacement,
    /// Keep a leading run of `_` verbatim instead of turning it into spaces.
    pub keep_leading_underscores: bool,
    /// Do not start a new word when a digit follows a letter.
    pub treat_digits_as_letters: bool,
    /// Copy `{...}` spans verbatim, so `{0}` placeholders survive.
    pub keep_formatting_indices: bool,
}

impl Default for DecamelizeOptions {
    fn default() -> Self {
        Self {
            force_first_upper: true,
            force_rest_lower: false,
            unescape_unicode: false,
            unescape_hex_escape: false,
            space_replacement: SpaceReplacement::None,
            keep_leading_underscores: false,
            treat_digits_as_letters: false,
            keep_formatting_indices: false,
        }
    }
}

/// Converts an identifier-like string into spaced display text.
///
/// The scan never fails: characters it has no rule for are copied through.
/// No leading, trailing or doubled spaces are produced, so running the
/// function on its own output changes nothing.
///
/// # Example
///
/// ```
/// use convertkit_util::{decamelize, DecamelizeOptions};
///
/// let options = DecamelizeOptions::default();
/// assert_eq!(decamelize("LoadByWhateverStuff", options), "Load By Whatever Stuff");
/// assert_eq!(decamelize("BBKing", options), "BBKing");
/// assert_eq!(decamelize("LoadBy25Years", options), "Load By 25 Years");
/// ```
pub fn decamelize(text: &str, options: DecamelizeOptions) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut scan = Scan {
        out: String::with_capacity(text.len() + text.len() / 4),
        last: CharClass::Separator,
        separated: true,
        leading_underscores: true,
        first_pending: true,
        options,
    };

    // Set once a `{` finds no `}` after it; no later `{` can find one either.
    let mut unclosed_brace = false;
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];

        if options.unescape_unicode {
            if let Some(decoded) = unicode_escape(&chars[i..]) {
                scan.escaped(decoded);
                i += 6;
                continue;
            }
        }
        if options.unescape_hex_escape {
            if let Some(decoded) = hex_escape(&chars[i..]) {
                scan.escaped(decoded);
                i += 7;
                continue;
            }
        }

        if c == '_' {
            if scan.leading_underscores && options.keep_leading_underscores {
                scan.out.push('_');
            } else {
                scan.leading_underscores = false;
                scan.space();
            }
            i += 1;
            continue;
        }
        scan.leading_underscores = false;

        match classify(c) {
            CharClass::Separator => scan.space(),
            CharClass::Punctuation => {
                if options.keep_formatting_indices && c == '{' && !unclosed_brace {
                    let close = chars[i..].iter().position(|&x| x == '}');
                    unclosed_brace = close.is_none();
                    if let Some(len) = close {
                        scan.out.extend(&chars[i..=i + len]);
                        scan.first_pending = false;
                        scan.separated = false;
                        scan.last = CharClass::Punctuation;
                        i += len + 1;
                        continue;
                    }
                }
                scan.push_cased(c);
                if chars.get(i + 1).is_some_and(|next| !next.is_whitespace()) {
                    scan.out.push(' ');
                }
                scan.separated = true;
                scan.last = CharClass::Punctuation;
            }
            CharClass::Control => {
                scan.out.push(c);
                scan.separated = false;
                scan.last = CharClass::Control;
            }
            class => scan.word_char(c, class),
        }
        i += 1;
    }

    let trimmed_len = scan.out.trim_end_matches(' ').len();
    scan.out.truncate(trimmed_len);

    match options.space_replacement.as_char() {
        Some(replacement) => scan.out.replace(' ', &replacement.to_string()),
        None => scan.out,
    }
}

struct Scan {
    out: String,
    last: CharClass,
    /// A boundary was just emitted, so the next word needs no extra space.
    separated: bool,
    leading_underscores: bool,
    /// Nothing but spaces or leading underscores has been emitted yet.
    first_pending: bool,
    options: DecamelizeOptions,
}

impl Scan {
    fn space(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with(' ') {
            self.out.push(' ');
        }
        self.separated = true;
        self.last = CharClass::Separator;
    }

    /// Pushes `c` with the case policy for its position.
    fn push_cased(&mut self, c: char) {
        if self.first_pending {
            self.first_pending = false;
            if self.options.force_first_upper {
                self.out.extend(c.to_uppercase());
            } else {
                self.out.push(c);
            }
        } else if self.options.force_rest_lower {
            self.out.extend(c.to_lowercase());
        } else {
            self.out.push(c);
        }
    }

    fn word_char(&mut self, c: char, class: CharClass) {
        let starts_word = class == CharClass::Upper
            || (class == CharClass::Digit && !self.options.treat_digits_as_letters);
        if starts_word && !self.first_pending && !self.separated && class != self.last {
            self.out.push(' ');
        }
        self.push_cased(c);
        self.separated = false;
        self.last = class;
    }

    fn escaped(&mut self, decoded: char) {
        self.leading_underscores = false;
        match classify(decoded) {
            CharClass::Separator => self.space(),
            class => {
                self.out.push(decoded);
                self.first_pending = false;
                self.separated = false;
                self.last = class;
            }
        }
    }
}

fn unescape_hex4(digits: &[char]) -> Option<char> {
    if digits.len() < 4 {
        return None;
    }
    let mut code = 0u32;
    for d in &digits[..4] {
        code = (code << 4) | d.to_digit(16)?;
    }
    char::from_u32(code)
}

/// Decodes `\uXXXX` at the start of `chars`.
fn unicode_escape(chars: &[char]) -> Option<char> {
    match chars {
        ['\\', 'u', rest @ ..] => unescape_hex4(rest),
        _ => None,
    }
}

/// Decodes `_xXXXX_` at the start of `chars`.
fn hex_escape(chars: &[char]) -> Option<char> {
    match chars {
        ['_', 'x', rest @ ..] if rest.get(4) == Some(&'_') => unescape_hex4(rest),
        _ => None,
    }
}
