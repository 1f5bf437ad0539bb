//! Enum metadata, enum values and the enum text codec.

mod codec;
mod descriptor;

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

pub use codec::{format_enum, format_flags, parse_enum};
pub(crate) use codec::enum_from_value;
pub use descriptor::{EnumDescriptor, EnumDescriptorBuilder, EnumMember, EnumWidth};

/// A Rust enum the engine can parse and format.
///
/// `to_bits` returns the member's bit pattern; `from_bits` accepts any
/// combination a flags enum can hold.
pub trait EnumType: Sized + 'static {
    fn describe() -> EnumDescriptor;
    fn from_bits(bits: u64) -> Option<Self>;
    fn to_bits(&self) -> u64;
}

static DESCRIPTORS: Lazy<RwLock<HashMap<TypeId, Arc<EnumDescriptor>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// The cached descriptor of `T`, built on first use.
pub fn enum_descriptor<T: EnumType>() -> Arc<EnumDescriptor> {
    let id = TypeId::of::<T>();
    if let Some(found) = DESCRIPTORS.read().get(&id) {
        return found.clone();
    }
    // `describe` runs outside the lock; a racing insert wins.
    let built = Arc::new(T::describe().with_origin(id));
    let mut cache = DESCRIPTORS.write();
    let entry = cache.entry(id).or_insert_with(|| {
        log::debug!("cached enum descriptor for {}", built.name());
        built.clone()
    });
    entry.clone()
}

/// A value of some enum, as its bit pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumValue {
    descriptor: Arc<EnumDescriptor>,
    bits: u64,
}

impl EnumValue {
    pub fn new(descriptor: Arc<EnumDescriptor>, bits: u64) -> Self {
        let bits = bits & descriptor.width().mask();
        Self { descriptor, bits }
    }

    pub fn of<T: EnumType>(value: &T) -> Self {
        Self::new(enum_descriptor::<T>(), value.to_bits())
    }

    pub fn bits(&self) -> u64 {
        self.bits
    }

    pub fn descriptor(&self) -> &Arc<EnumDescriptor> {
        &self.descriptor
    }

    /// The numeric value under the enum's underlying type.
    pub fn numeric(&self) -> i128 {
        self.descriptor.to_signed(self.bits)
    }

    /// Back to `T`, if this value belongs to `T`'s descriptor.
    pub fn to_enum<T: EnumType>(&self) -> Option<T> {
        if *self.descriptor != *enum_descriptor::<T>() {
            return None;
        }
        T::from_bits(self.bits)
    }
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_enum(self.bits, &self.descriptor))
    }
}
