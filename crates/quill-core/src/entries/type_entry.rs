//! Host type entry.

use crate::TypeHash;

use super::{CandidateSignature, FieldEntry, PropertyEntry};

/// What kind of host type an entry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostTypeKind {
    Class,
    Interface,
    /// A primitive value type (see [`crate::PrimitiveKind`]).
    Primitive,
}

/// A host type with its declared members.
///
/// Only members declared directly on this type are listed; inherited members
/// are found by the registry walking `base`.
#[derive(Debug, Clone, PartialEq)]
pub struct HostTypeEntry {
    /// Unqualified name (`StringBuilder`).
    pub name: String,
    /// Fully qualified name (`System.Text.StringBuilder`).
    pub qualified_name: String,
    pub type_hash: TypeHash,
    pub kind: HostTypeKind,
    /// Base class, for classes.
    pub base: Option<TypeHash>,
    /// Directly implemented (or, for interfaces, extended) interfaces.
    pub interfaces: Vec<TypeHash>,
    pub fields: Vec<FieldEntry>,
    pub properties: Vec<PropertyEntry>,
    pub methods: Vec<CandidateSignature>,
}

impl HostTypeEntry {
    /// Create an entry whose hash is derived from its qualified name.
    pub fn new(qualified_name: impl Into<String>, kind: HostTypeKind) -> Self {
        let qualified_name = qualified_name.into();
        let type_hash = TypeHash::from_name(&qualified_name);
        Self::with_hash(qualified_name, type_hash, kind)
    }

    /// Create an entry with an explicit (reserved) hash.
    pub fn with_hash(qualified_name: impl Into<String>, type_hash: TypeHash, kind: HostTypeKind) -> Self {
        let qualified_name = qualified_name.into();
        let name = qualified_name
            .rsplit('.')
            .next()
            .unwrap_or(&qualified_name)
            .to_string();
        Self {
            name,
            qualified_name,
            type_hash,
            kind,
            base: None,
            interfaces: Vec::new(),
            fields: Vec::new(),
            properties: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn class(qualified_name: impl Into<String>) -> Self {
        Self::new(qualified_name, HostTypeKind::Class)
    }

    pub fn interface(qualified_name: impl Into<String>) -> Self {
        Self::new(qualified_name, HostTypeKind::Interface)
    }

    #[inline]
    pub fn is_interface(&self) -> bool {
        self.kind == HostTypeKind::Interface
    }

    // ==========================================================================
    // Builders
    // ==========================================================================

    pub fn with_base(mut self, base: TypeHash) -> Self {
        self.base = Some(base);
        self
    }

    pub fn implementing(mut self, interface: TypeHash) -> Self {
        self.interfaces.push(interface);
        self
    }

    pub fn with_field(mut self, name: &str, field_type: TypeHash, is_static: bool) -> Self {
        self.fields.push(FieldEntry::new(name, field_type, is_static));
        self
    }

    pub fn with_property(mut self, name: &str, property_type: TypeHash, is_static: bool) -> Self {
        self.properties
            .push(PropertyEntry::new(name, property_type, is_static));
        self
    }

    pub fn with_method(
        mut self,
        name: &str,
        params: Vec<TypeHash>,
        return_type: TypeHash,
        is_static: bool,
    ) -> Self {
        self.methods.push(CandidateSignature::new(
            self.type_hash,
            name,
            params,
            return_type,
            is_static,
        ));
        self
    }

    // ==========================================================================
    // Declared-member queries
    // ==========================================================================

    pub fn declared_field(&self, name: &str, is_static: bool) -> Option<&FieldEntry> {
        self.fields
            .iter()
            .find(|f| f.name == name && f.flags.matches_binding(is_static))
    }

    pub fn declared_property(&self, name: &str, is_static: bool) -> Option<&PropertyEntry> {
        self.properties
            .iter()
            .find(|p| p.name == name && p.is_readable() && p.flags.matches_binding(is_static))
    }

    /// Declared methods filtered by name, parameter count and binding.
    pub fn declared_methods<'a>(
        &'a self,
        name: &str,
        arity: usize,
        is_static: bool,
    ) -> impl Iterator<Item = &'a CandidateSignature> {
        self.methods.iter().filter(move |m| {
            m.name == name && m.arity() == arity && m.flags.matches_binding(is_static)
        })
    }
}
