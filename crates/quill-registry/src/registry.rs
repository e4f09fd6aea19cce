//! HostRegistry - storage for discovered host types.
//!
//! # Storage Model
//!
//! - **Types**: every [`HostTypeEntry`] stored by `TypeHash`
//! - **Names**: qualified name -> hash, for static-target and type-hint resolution
//! - **Hierarchy**: a [`TypeHierarchy`] graph built from each entry's base and interfaces
//!
//! # Thread Safety
//!
//! The registry is populated single-threaded before compilation and is only
//! read afterwards, so a `&HostRegistry` can be shared by compilations
//! running on different threads.
//!
//! # Example
//!
//! ```
//! use quill_core::{HostTypeEntry, primitives};
//! use quill_registry::HostRegistry;
//!
//! let mut registry = HostRegistry::with_primitives();
//! let hash = registry
//!     .register_type(HostTypeEntry::class("System.Math").with_field("PI", primitives::DOUBLE, true))
//!     .unwrap();
//! assert_eq!(registry.resolve_type_name("System.Math"), Some(hash));
//! assert_eq!(registry.resolve_type_name("long"), Some(primitives::INT64));
//! ```

use rustc_hash::FxHashMap;

use quill_core::{
    HostTypeEntry, HostTypeKind, PrimitiveKind, RegistrationError, TypeHash, primitives,
};

use crate::hierarchy::TypeHierarchy;

/// Catalog of host types.
#[derive(Debug, Default, Clone)]
pub struct HostRegistry {
    types: FxHashMap<TypeHash, HostTypeEntry>,
    by_name: FxHashMap<String, TypeHash>,
    pub(crate) hierarchy: TypeHierarchy,
}

impl HostRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the object type, string, the sequence
    /// interface, and every primitive kind pre-registered.
    pub fn with_primitives() -> Self {
        let mut registry = Self::new();
        registry.register_builtins();
        registry
    }

    fn register_builtins(&mut self) {
        let builtins = [
            HostTypeEntry::with_hash(primitives::OBJECT_NAME, primitives::OBJECT, HostTypeKind::Class),
            HostTypeEntry::with_hash(primitives::STRING_NAME, primitives::STRING, HostTypeKind::Class)
                .with_base(primitives::OBJECT),
            HostTypeEntry::with_hash(primitives::SEQ_NAME, primitives::SEQ, HostTypeKind::Interface),
            HostTypeEntry::with_hash("System.Void", primitives::VOID, HostTypeKind::Primitive),
        ];
        let prims = PrimitiveKind::ALL.into_iter().map(|kind| {
            HostTypeEntry::with_hash(kind.host_name(), kind.type_hash(), HostTypeKind::Primitive)
        });
        for entry in builtins.into_iter().chain(prims) {
            self.insert(entry);
        }
    }

    // ==========================================================================
    // Registration
    // ==========================================================================

    /// Register a host type.
    ///
    /// The base class and interfaces must already be registered.
    pub fn register_type(&mut self, entry: HostTypeEntry) -> Result<TypeHash, RegistrationError> {
        if self.by_name.contains_key(&entry.qualified_name) || self.types.contains_key(&entry.type_hash) {
            return Err(RegistrationError::DuplicateType {
                name: entry.qualified_name,
            });
        }
        for sup in entry.base.iter().chain(entry.interfaces.iter()) {
            if !self.types.contains_key(sup) {
                return Err(RegistrationError::UnknownSupertype {
                    name: entry.qualified_name.clone(),
                    supertype: sup.to_string(),
                });
            }
        }
        tracing::trace!(name = %entry.qualified_name, "register host type");
        Ok(self.insert(entry))
    }

    fn insert(&mut self, entry: HostTypeEntry) -> TypeHash {
        let hash = entry.type_hash;
        self.hierarchy.add_type(hash);
        for &sup in entry.base.iter().chain(entry.interfaces.iter()) {
            self.hierarchy.add_supertype(hash, sup);
        }
        self.by_name.insert(entry.qualified_name.clone(), hash);
        self.types.insert(hash, entry);
        hash
    }

    // ==========================================================================
    // Lookup
    // ==========================================================================

    pub fn get(&self, hash: TypeHash) -> Option<&HostTypeEntry> {
        self.types.get(&hash)
    }

    pub fn get_by_name(&self, qualified_name: &str) -> Option<&HostTypeEntry> {
        self.by_name
            .get(qualified_name)
            .and_then(|hash| self.types.get(hash))
    }

    pub fn contains(&self, hash: TypeHash) -> bool {
        self.types.contains_key(&hash)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Resolve a type-hint or qualified type name.
    ///
    /// Primitive hint names (`long`, `double`, ...) resolve to their kind;
    /// anything else must be a registered qualified name. Import aliases are
    /// resolved by the caller's [`ImportTable`](crate::ImportTable).
    pub fn resolve_type_name(&self, name: &str) -> Option<TypeHash> {
        if let Some(kind) = PrimitiveKind::from_tag(name) {
            return Some(kind.type_hash());
        }
        self.by_name.get(name).copied()
    }

    /// A readable name for a type, for diagnostics.
    pub fn type_name(&self, hash: TypeHash) -> String {
        if let Some(kind) = PrimitiveKind::from_hash(hash) {
            return kind.tag_name().to_string();
        }
        self.types
            .get(&hash)
            .map(|e| e.qualified_name.clone())
            .unwrap_or_else(|| hash.to_string())
    }

    /// Iterate a class and its base classes, most derived first.
    pub fn base_chain(&self, hash: TypeHash) -> impl Iterator<Item = &HostTypeEntry> {
        std::iter::successors(self.types.get(&hash), move |entry| {
            entry.base.and_then(|base| self.types.get(&base))
        })
    }
}
