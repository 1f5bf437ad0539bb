//! Text utilities for convertkit.
//!
//! - [`decamelize`] turns identifiers such as `LoadByWhateverStuff` into
//!   display labels (`Load By Whatever Stuff`).
//! - [`strings`] holds the character classification the decamelizer runs on,
//!   plus small helpers used by the conversion engine.

pub mod decamelize;
pub mod strings;

pub use decamelize::{decamelize, DecamelizeOptions, SpaceReplacement};
pub use strings::{classify, nullify, split_trimmed, CharClass, StringError};
