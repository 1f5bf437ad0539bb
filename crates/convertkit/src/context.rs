//! Per-call formatting context: culture plus number and date styles.

use std::ops::BitOr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::culture::Culture;
use crate::error::ConvertError;

/// Which syntax elements a numeric parse accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NumberStyles(u32);

impl NumberStyles {
    pub const NONE: Self = Self(0);
    pub const ALLOW_LEADING_WHITE: Self = Self(0x0001);
    pub const ALLOW_TRAILING_WHITE: Self = Self(0x0002);
    pub const ALLOW_LEADING_SIGN: Self = Self(0x0004);
    pub const ALLOW_DECIMAL_POINT: Self = Self(0x0020);
    pub const ALLOW_THOUSANDS: Self = Self(0x0040);
    pub const ALLOW_EXPONENT: Self = Self(0x0080);
    pub const ALLOW_CURRENCY_SYMBOL: Self = Self(0x0100);
    pub const ALLOW_HEX_SPECIFIER: Self = Self(0x0200);

    pub const INTEGER: Self = Self(0x0007);
    pub const HEX_NUMBER: Self = Self(0x0203);
    pub const NUMBER: Self = Self(0x0067);
    pub const FLOAT: Self = Self(0x00A7);
    pub const CURRENCY: Self = Self(0x0167);
    pub const ANY: Self = Self(0x01E7);

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl BitOr for NumberStyles {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

/// Options for date/time parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateTimeStyles(u32);

impl DateTimeStyles {
    pub const NONE: Self = Self(0);
    /// Ignore whitespace around the text.
    pub const ALLOW_WHITE_SPACES: Self = Self(0x0001);
    /// Shift parsed offsets to UTC.
    pub const ADJUST_TO_UNIVERSAL: Self = Self(0x0010);

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for DateTimeStyles {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

static INVARIANT: Lazy<Culture> = Lazy::new(Culture::invariant);

/// Formatting context of a conversion. Never mutated by the engine.
///
/// Missing fields fall back to the invariant culture and to the default
/// style of each target kind.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionContext {
    pub culture: Option<Culture>,
    pub number_styles: Option<NumberStyles>,
    pub date_styles: Option<DateTimeStyles>,
}

impl ConversionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invariant() -> Self {
        Self::default()
    }

    pub fn with_culture(mut self, culture: Culture) -> Self {
        self.culture = Some(culture);
        self
    }

    pub fn with_number_styles(mut self, styles: NumberStyles) -> Self {
        self.number_styles = Some(styles);
        self
    }

    pub fn with_date_styles(mut self, styles: DateTimeStyles) -> Self {
        self.date_styles = Some(styles);
        self
    }

    pub fn culture(&self) -> &Culture {
        self.culture.as_ref().unwrap_or(&INVARIANT)
    }

    /// Loads a context from JSON, e.g.
    /// `{"culture": "fr-FR", "number_styles": 103}`.
    pub fn from_json(text: &str) -> Result<Self, ConvertError> {
        Ok(serde_json::from_str(text)?)
    }
}
