//! Culture-specific number and date formatting data.

use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// LCID given to cultures built with [`Culture::new`].
pub const CUSTOM_LCID: u32 = 0x1000;

/// The formatting conventions of a locale.
///
/// Only the data the conversion engine reads is carried: separators, the
/// currency symbol and chrono date/time patterns.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "CultureRepr")]
pub struct Culture {
    name: String,
    lcid: u32,
    decimal_separator: char,
    group_separator: char,
    currency_symbol: String,
    date_pattern: String,
    time_pattern: String,
}

static BUILTINS: Lazy<Vec<Culture>> = Lazy::new(|| {
    vec![
        Culture::invariant(),
        Culture {
            name: "en-US".into(),
            lcid: 1033,
            decimal_separator: '.',
            group_separator: ',',
            currency_symbol: "$".into(),
            date_pattern: "%m/%d/%Y".into(),
            time_pattern: "%I:%M:%S%.f %p".into(),
        },
        Culture {
            name: "en-GB".into(),
            lcid: 2057,
            decimal_separator: '.',
            group_separator: ',',
            currency_symbol: "£".into(),
            date_pattern: "%d/%m/%Y".into(),
            time_pattern: "%H:%M:%S%.f".into(),
        },
        Culture {
            name: "fr-FR".into(),
            lcid: 1036,
            decimal_separator: ',',
            group_separator: '\u{202F}',
            currency_symbol: "€".into(),
            date_pattern: "%d/%m/%Y".into(),
            time_pattern: "%H:%M:%S%.f".into(),
        },
        Culture {
            name: "de-DE".into(),
            lcid: 1031,
            decimal_separator: ',',
            group_separator: '.',
            currency_symbol: "€".into(),
            date_pattern: "%d.%m.%Y".into(),
            time_pattern: "%H:%M:%S%.f".into(),
        },
    ]
});

impl Culture {
    /// The culture-neutral conventions, named `""`.
    pub fn invariant() -> Self {
        Self {
            name: String::new(),
            lcid: 127,
            decimal_separator: '.',
            group_separator: ',',
            currency_symbol: "¤".into(),
            date_pattern: "%m/%d/%Y".into(),
            time_pattern: "%H:%M:%S%.f".into(),
        }
    }

    /// A custom culture starting from the invariant conventions.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lcid: CUSTOM_LCID,
            ..Self::invariant()
        }
    }

    pub fn with_separators(mut self, decimal: char, group: char) -> Self {
        self.decimal_separator = decimal;
        self.group_separator = group;
        self
    }

    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    pub fn with_patterns(mut self, date: impl Into<String>, time: impl Into<String>) -> Self {
        self.date_pattern = date.into();
        self.time_pattern = time.into();
        self
    }

    /// Finds a built-in culture by name, ignoring case.
    pub fn lookup(name: &str) -> Option<Culture> {
        let name = name.trim();
        BUILTINS
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
            .cloned()
    }

    pub fn from_lcid(lcid: u32) -> Option<Culture> {
        BUILTINS.iter().find(|c| c.lcid == lcid).cloned()
    }

    pub fn builtins() -> &'static [Culture] {
        &BUILTINS
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lcid(&self) -> u32 {
        self.lcid
    }

    pub fn is_invariant(&self) -> bool {
        self.name.is_empty()
    }

    pub fn decimal_separator(&self) -> char {
        self.decimal_separator
    }

    pub fn group_separator(&self) -> char {
        self.group_separator
    }

    /// Whether `c` separates digit groups in this culture.
    ///
    /// Cultures grouping with a space variant accept every space variant.
    pub fn is_group_separator(&self, c: char) -> bool {
        c == self.group_separator || (self.group_separator.is_whitespace() && c.is_whitespace())
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    pub fn date_pattern(&self) -> &str {
        &self.date_pattern
    }

    pub fn time_pattern(&self) -> &str {
        &self.time_pattern
    }

    /// Date and time joined by a space.
    pub fn datetime_pattern(&self) -> String {
        format!("{} {}", self.date_pattern, self.time_pattern)
    }
}

impl Default for Culture {
    fn default() -> Self {
        Self::invariant()
    }
}

impl fmt::Display for Culture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Configuration form: a built-in name, a built-in LCID, or full data.
#[derive(Deserialize)]
#[serde(untagged)]
enum CultureRepr {
    Name(String),
    Lcid(u32),
    Custom(CustomCulture),
}

#[derive(Deserialize)]
#[serde(default)]
struct CustomCulture {
    name: String,
    lcid: u32,
    decimal_separator: char,
    group_separator: char,
    currency_symbol: String,
    date_pattern: String,
    time_pattern: String,
}

impl Default for CustomCulture {
    fn default() -> Self {
        let base = Culture::invariant();
        Self {
            name: base.name,
            lcid: CUSTOM_LCID,
            decimal_separator: base.decimal_separator,
            group_separator: base.group_separator,
            currency_symbol: base.currency_symbol,
            date_pattern: base.date_pattern,
            time_pattern: base.time_pattern,
        }
    }
}

impl TryFrom<CultureRepr> for Culture {
    type Error = String;

    fn try_from(repr: CultureRepr) -> Result<Self, Self::Error> {
        match repr {
            CultureRepr::Name(name) => {
                Culture::lookup(&name).ok_or_else(|| format!("unknown culture `{name}`"))
            }
            CultureRepr::Lcid(lcid) => {
                Culture::from_lcid(lcid).ok_or_else(|| format!("unknown culture id {lcid}"))
            }
            CultureRepr::Custom(c) => {
                if c.decimal_separator == c.group_separator {
                    return Err("decimal and group separators must differ".to_string());
                }
                Ok(Culture {
                    name: c.name,
                    lcid: c.lcid,
                    decimal_separator: c.decimal_separator,
                    group_separator: c.group_separator,
                    currency_symbol: c.currency_symbol,
                    date_pattern: c.date_pattern,
                    time_pattern: c.time_pattern,
                })
            }
        }
    }
}
