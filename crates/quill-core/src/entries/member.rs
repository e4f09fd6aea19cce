//! Field, property and method entries.

use bitflags::bitflags;

use crate::TypeHash;

bitflags! {
    /// Binding flags for a host member.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MemberFlags: u8 {
        /// Member belongs to the type rather than to instances.
        const STATIC = 1 << 0;
        /// Member is publicly visible.
        const PUBLIC = 1 << 1;
        /// Property has a getter.
        const READ = 1 << 2;
        /// Property has a setter.
        const WRITE = 1 << 3;
    }
}

impl MemberFlags {
    /// Whether these flags match a static/instance lookup.
    #[inline]
    pub fn matches_binding(self, is_static: bool) -> bool {
        self.contains(MemberFlags::PUBLIC) && self.contains(MemberFlags::STATIC) == is_static
    }
}

/// A host field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEntry {
    pub name: String,
    pub field_type: TypeHash,
    pub flags: MemberFlags,
}

impl FieldEntry {
    pub fn new(name: impl Into<String>, field_type: TypeHash, is_static: bool) -> Self {
        let mut flags = MemberFlags::PUBLIC;
        flags.set(MemberFlags::STATIC, is_static);
        Self {
            name: name.into(),
            field_type,
            flags,
        }
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.flags.contains(MemberFlags::STATIC)
    }
}

/// A host property (accessor pair).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyEntry {
    pub name: String,
    pub property_type: TypeHash,
    pub flags: MemberFlags,
}

impl PropertyEntry {
    /// A readable property; add `MemberFlags::WRITE` for read/write.
    pub fn new(name: impl Into<String>, property_type: TypeHash, is_static: bool) -> Self {
        let mut flags = MemberFlags::PUBLIC | MemberFlags::READ;
        flags.set(MemberFlags::STATIC, is_static);
        Self {
            name: name.into(),
            property_type,
            flags,
        }
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.flags.contains(MemberFlags::STATIC)
    }

    #[inline]
    pub fn is_readable(&self) -> bool {
        self.flags.contains(MemberFlags::READ)
    }
}

/// One possible method shape considered during overload resolution.
///
/// Read-only once discovered from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSignature {
    /// Method identity (owner + name + parameter types + static flag).
    pub method_hash: TypeHash,
    pub name: String,
    /// Declaring type.
    pub owner: TypeHash,
    /// Formal parameter types, in order.
    pub params: Vec<TypeHash>,
    pub return_type: TypeHash,
    pub flags: MemberFlags,
}

impl CandidateSignature {
    pub fn new(
        owner: TypeHash,
        name: impl Into<String>,
        params: Vec<TypeHash>,
        return_type: TypeHash,
        is_static: bool,
    ) -> Self {
        let name = name.into();
        let mut flags = MemberFlags::PUBLIC;
        flags.set(MemberFlags::STATIC, is_static);
        Self {
            method_hash: TypeHash::from_method(owner, &name, &params, is_static),
            name,
            owner,
            params,
            return_type,
            flags,
        }
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.flags.contains(MemberFlags::STATIC)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives;

    #[test]
    fn binding_flags_discriminate_static_and_instance() {
        let field = FieldEntry::new("Count", primitives::INT32, false);
        assert!(field.flags.matches_binding(false));
        assert!(!field.flags.matches_binding(true));

        let pi = FieldEntry::new("PI", primitives::DOUBLE, true);
        assert!(pi.is_static());
        assert!(pi.flags.matches_binding(true));
    }

    #[test]
    fn signature_identity_follows_shape() {
        let owner = TypeHash::from_name("System.Math");
        let a = CandidateSignature::new(owner, "Abs", vec![primitives::INT32], primitives::INT32, true);
        let b = CandidateSignature::new(owner, "Abs", vec![primitives::DOUBLE], primitives::DOUBLE, true);
        assert_ne!(a.method_hash, b.method_hash);
        assert_eq!(a.arity(), 1);
        assert!(a.is_static());
    }
}
