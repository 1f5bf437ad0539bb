//! Process-wide converter and parser registries.
//!
//! Both are keyed by [`TypeKey`] and hold immutable `Arc` entries. A
//! registration replaces the previous entry for its key; it never merges.

use std::any::Any;
use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::context::ConversionContext;
use crate::error::ConvertError;
use crate::type_tag::{TypeKey, TypeTag};
use crate::value::Value;

/// A bidirectional converter for one type, consulted after the built-in
/// strategies fail.
///
/// Registered under its own type: the dispatcher asks the target type's
/// converter to convert *from* the source, then the source type's converter
/// to convert *to* the target.
pub trait TypeConverter: Send + Sync {
    fn can_convert_from(&self, _source: &TypeTag) -> bool {
        false
    }

    fn can_convert_to(&self, _target: &TypeTag) -> bool {
        false
    }

    fn convert_from(&self, value: &Value, _context: &ConversionContext) -> Result<Value, ConvertError> {
        Err(ConvertError::Converter(format!("cannot convert from {value:?}")))
    }

    fn convert_to(
        &self,
        _value: &Value,
        target: &TypeTag,
        _context: &ConversionContext,
    ) -> Result<Value, ConvertError> {
        Err(ConvertError::Converter(format!("cannot convert to {target}")))
    }
}

/// Typed parse function: text to a value of the registered type.
pub type ParserFn = Arc<dyn Fn(&str, &ConversionContext) -> Option<Value> + Send + Sync>;

static CONVERTERS: Lazy<RwLock<HashMap<TypeKey, Arc<dyn TypeConverter>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

static PARSERS: Lazy<RwLock<HashMap<TypeKey, ParserFn>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Registers `converter` for `ty`, returning the converter it replaced.
pub fn register_converter(
    ty: &TypeTag,
    converter: Arc<dyn TypeConverter>,
) -> Option<Arc<dyn TypeConverter>> {
    let key = ty.key();
    let replaced = CONVERTERS.write().insert(key.clone(), converter);
    if replaced.is_some() {
        log::debug!("replaced converter for {key}");
    }
    replaced
}

pub fn unregister_converter(ty: &TypeTag) -> Option<Arc<dyn TypeConverter>> {
    CONVERTERS.write().remove(&ty.key())
}

pub fn resolve_converter(ty: &TypeTag) -> Option<Arc<dyn TypeConverter>> {
    CONVERTERS.read().get(&ty.key()).cloned()
}

/// Registers a parse function for `ty`, replacing any previous one.
pub fn register_parser<F>(ty: &TypeTag, parser: F)
where
    F: Fn(&str, &ConversionContext) -> Option<Value> + Send + Sync + 'static,
{
    let key = ty.key();
    if PARSERS.write().insert(key.clone(), Arc::new(parser)).is_some() {
        log::debug!("replaced parser for {key}");
    }
}

/// Registers [`FromStr`] as the parser of the opaque type `T`.
pub fn register_from_str<T>()
where
    T: FromStr + Display + Any + Send + Sync,
{
    register_parser(&TypeTag::opaque::<T>(), |text, _| {
        text.trim().parse::<T>().ok().map(Value::opaque)
    });
}

pub fn resolve_parser(ty: &TypeTag) -> Option<ParserFn> {
    PARSERS.read().get(&ty.key()).cloned()
}
