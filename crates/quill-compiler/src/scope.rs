//! Lexical environment of a method being compiled.
//!
//! [`LocalEnv`] tracks the bindings visible inside one method frame:
//! - the implicit `this` binding of instance functions
//! - parameters, in declaration order
//! - stack slot allocation
//!
//! A later binding with the same name shadows an earlier one; both keep
//! their slots.

use quill_core::{PrimitiveKind, TypeHash};
use rustc_hash::FxHashMap;

// ============================================================================
// Types
// ============================================================================

/// A named local binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalBinding {
    /// Binding name
    pub name: String,
    /// Declared host type, from a type hint
    pub tag: Option<TypeHash>,
    /// Local slot index
    pub slot: u32,
    /// Whether the binding is a method argument
    pub is_arg: bool,
    /// Unboxed kind, for primitive parameters of static functions
    pub primitive: Option<PrimitiveKind>,
}

impl LocalBinding {
    /// The statically known type of the binding, if any.
    pub fn static_type(&self) -> Option<TypeHash> {
        self.primitive.map(PrimitiveKind::type_hash).or(self.tag)
    }
}

// ============================================================================
// LocalEnv
// ============================================================================

#[derive(Debug, Default, Clone)]
pub struct LocalEnv {
    /// All bindings in declaration order
    bindings: Vec<LocalBinding>,

    /// Visible binding index by name
    by_name: FxHashMap<String, usize>,

    /// Next available slot
    next_slot: u32,
}

impl LocalEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a binding at the next free slot.
    pub fn declare(
        &mut self,
        name: &str,
        tag: Option<TypeHash>,
        is_arg: bool,
        primitive: Option<PrimitiveKind>,
    ) -> LocalBinding {
        let binding = LocalBinding {
            name: name.to_string(),
            tag,
            slot: self.next_slot,
            is_arg,
            primitive,
        };
        self.next_slot += 1;
        self.by_name.insert(binding.name.clone(), self.bindings.len());
        self.bindings.push(binding.clone());
        binding
    }

    pub fn lookup(&self, name: &str) -> Option<&LocalBinding> {
        self.by_name.get(name).map(|&index| &self.bindings[index])
    }

    pub fn bindings(&self) -> &[LocalBinding] {
        &self.bindings
    }

    pub fn next_slot(&self) -> u32 {
        self.next_slot
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::primitives;

    #[test]
    fn slots_are_sequential() {
        let mut env = LocalEnv::new();
        let this = env.declare("this", None, false, None);
        let a = env.declare("a", None, true, None);
        let b = env.declare("b", Some(primitives::STRING), true, None);
        assert_eq!((this.slot, a.slot, b.slot), (0, 1, 2));
        assert_eq!(env.next_slot(), 3);
        assert_eq!(env.lookup("b").and_then(LocalBinding::static_type), Some(primitives::STRING));
    }

    #[test]
    fn later_binding_shadows() {
        let mut env = LocalEnv::new();
        env.declare("x", None, true, None);
        env.declare("x", None, true, Some(PrimitiveKind::Int64));
        let x = env.lookup("x").unwrap();
        assert_eq!(x.slot, 1);
        assert_eq!(x.static_type(), Some(primitives::INT64));
        assert_eq!(env.len(), 2);
    }

    #[test]
    fn missing_name() {
        let env = LocalEnv::new();
        assert!(env.lookup("nope").is_none());
        assert!(env.is_empty());
    }
}
