use std::any::TypeId;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Underlying integer width of an enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumWidth {
    W8,
    W16,
    W32,
    W64,
}

impl EnumWidth {
    pub fn bits(self) -> u32 {
        match self {
            EnumWidth::W8 => 8,
            EnumWidth::W16 => 16,
            EnumWidth::W32 => 32,
            EnumWidth::W64 => 64,
        }
    }

    pub fn bytes(self) -> usize {
        self.bits() as usize / 8
    }

    pub fn mask(self) -> u64 {
        match self {
            EnumWidth::W64 => u64::MAX,
            w => (1u64 << w.bits()) - 1,
        }
    }

    pub fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            8 => Some(EnumWidth::W8),
            16 => Some(EnumWidth::W16),
            32 => Some(EnumWidth::W32),
            64 => Some(EnumWidth::W64),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumMember {
    pub name: String,
    /// Bit pattern masked to the enum width.
    pub bits: u64,
}

/// Metadata of an enum type: its members in declaration order, whether it
/// is a flag set, and its underlying integer layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumDescriptor {
    name: String,
    members: Vec<EnumMember>,
    is_flags: bool,
    width: EnumWidth,
    signed: bool,
    /// The Rust type this descriptor was built for, when there is one.
    origin: Option<TypeId>,
}

impl EnumDescriptor {
    /// Starts a descriptor with a signed 32-bit underlying type.
    pub fn builder(name: impl Into<String>) -> EnumDescriptorBuilder {
        EnumDescriptorBuilder {
            inner: EnumDescriptor {
                name: name.into(),
                members: Vec::new(),
                is_flags: false,
                width: EnumWidth::W32,
                signed: true,
                origin: None,
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> &[EnumMember] {
        &self.members
    }

    pub fn is_flags(&self) -> bool {
        self.is_flags
    }

    pub fn width(&self) -> EnumWidth {
        self.width
    }

    pub fn is_signed(&self) -> bool {
        self.signed
    }

    /// Case-insensitive lookup, Unicode case folding included.
    pub fn member_by_name(&self, name: &str) -> Option<&EnumMember> {
        let wanted = name.to_lowercase();
        self.members
            .iter()
            .find(|m| m.name == name || m.name.to_lowercase() == wanted)
    }

    /// First declared member with exactly these bits.
    pub fn member_by_bits(&self, bits: u64) -> Option<&EnumMember> {
        self.members.iter().find(|m| m.bits == bits)
    }

    /// Masks a numeric literal to the width if it fits the underlying type.
    ///
    /// Signed enums accept the whole signed range, unsigned ones the
    /// unsigned range.
    pub fn bits_from_literal(&self, literal: i128) -> Option<u64> {
        let bits = self.width.bits();
        let (min, max) = if self.signed {
            (-(1i128 << (bits - 1)), (1i128 << (bits - 1)) - 1)
        } else {
            (0, (1i128 << bits) - 1)
        };
        if literal < min || literal > max {
            return None;
        }
        Some((literal as u64) & self.width.mask())
    }

    /// The numeric value of `bits` under the underlying type.
    pub fn to_signed(&self, bits: u64) -> i128 {
        let bits = bits & self.width.mask();
        if !self.signed {
            return bits as i128;
        }
        let shift = 64 - self.width.bits();
        (((bits << shift) as i64) >> shift) as i128
    }

    /// Identity of the enum type: its `TypeId` when built for a Rust type,
    /// otherwise its full content. Same-named enums never share it.
    pub fn identity(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        match self.origin {
            Some(id) => id.hash(&mut hasher),
            None => self.hash(&mut hasher),
        }
        hasher.finish()
    }

    pub(crate) fn with_origin(mut self, id: TypeId) -> Self {
        self.origin = Some(id);
        self
    }

    /// Union of every member's bits.
    pub fn all_bits(&self) -> u64 {
        self.members.iter().fold(0, |acc, m| acc | m.bits)
    }
}

pub struct EnumDescriptorBuilder {
    inner: EnumDescriptor,
}

impl EnumDescriptorBuilder {
    pub fn flags(mut self, is_flags: bool) -> Self {
        self.inner.is_flags = is_flags;
        self
    }

    pub fn width(mut self, width: EnumWidth, signed: bool) -> Self {
        self.inner.width = width;
        self.inner.signed = signed;
        self
    }

    /// Adds a member. Its value is masked to the final width by [`build`].
    ///
    /// [`build`]: EnumDescriptorBuilder::build
    pub fn member(self, name: impl Into<String>, value: i64) -> Self {
        self.member_bits(name, value as u64)
    }

    pub fn member_bits(mut self, name: impl Into<String>, bits: u64) -> Self {
        self.inner.members.push(EnumMember {
            name: name.into(),
            bits,
        });
        self
    }

    pub fn build(mut self) -> EnumDescriptor {
        let mask = self.inner.width.mask();
        for member in &mut self.inner.members {
            member.bits &= mask;
        }
        self.inner
    }
}
