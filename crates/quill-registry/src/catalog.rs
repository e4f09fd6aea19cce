//! Member lookup and type compatibility over the registry.
//!
//! All queries are pure. An empty result is not an error: callers treat "no
//! candidates" as "fall back to dynamic dispatch" or report it themselves.

use quill_core::{
    CandidateSignature, FieldEntry, PrimitiveKind, PropertyEntry, TypeHash, primitives,
};

use crate::HostRegistry;

/// Assignability and argument compatibility between host types.
///
/// The overload resolver is written against this trait so that it can be
/// driven by literal fixtures as well as by the registry.
pub trait TypeRelation {
    /// Whether a value of type `from` can be stored in a location of type `to`
    /// without conversion.
    fn is_assignable(&self, from: TypeHash, to: TypeHash) -> bool;

    /// Whether an argument of static type `arg` is acceptable for a parameter
    /// of type `param`. An argument whose type is unknown at compile time
    /// (`None`) is an object, so it only matches parameters accepting objects.
    fn param_arg_type_match(&self, param: TypeHash, arg: Option<TypeHash>) -> bool {
        let arg = arg.unwrap_or(primitives::OBJECT);
        param == arg || self.is_assignable(arg, param) || primitive_arg_match(param, arg)
    }

    /// Whether parameter list `a` is strictly more specific than `b`: every
    /// differing position of `a` is assignable to the one in `b`, and at
    /// least one position differs.
    fn subsumes(&self, a: &[TypeHash], b: &[TypeHash]) -> bool {
        let mut better = false;
        for (&pa, &pb) in a.iter().zip(b.iter()) {
            if pa != pb {
                if self.is_assignable(pa, pb) {
                    better = true;
                } else {
                    return false;
                }
            }
        }
        better
    }
}

/// Numeric arguments that the host converts implicitly at a call site.
fn primitive_arg_match(param: TypeHash, arg: TypeHash) -> bool {
    use PrimitiveKind::*;

    let (Some(param), Some(arg)) = (PrimitiveKind::from_hash(param), PrimitiveKind::from_hash(arg))
    else {
        return false;
    };
    match param {
        Int32 => matches!(arg, Int64 | Int16 | UInt16 | Byte | SByte),
        Int64 => matches!(arg, Int32 | UInt32 | Int16 | UInt16 | Byte | SByte),
        Int16 => matches!(arg, Byte | SByte),
        Double => matches!(arg, Single),
        Single => matches!(arg, Double),
        _ => false,
    }
}

impl TypeRelation for HostRegistry {
    fn is_assignable(&self, from: TypeHash, to: TypeHash) -> bool {
        from == to || to == primitives::OBJECT || self.hierarchy.is_subtype(from, to)
    }
}

impl HostRegistry {
    /// Candidate methods named `name` taking exactly `arity` parameters.
    ///
    /// Instance lookups on an interface gather the interface and every
    /// interface it transitively extends; overloads declared independently on
    /// several interfaces are all returned. Other lookups walk the base-class
    /// chain, and a signature redeclared in a derived class hides the base one.
    pub fn lookup_members(
        &self,
        target: TypeHash,
        name: &str,
        arity: usize,
        is_static: bool,
    ) -> Vec<&CandidateSignature> {
        let Some(entry) = self.get(target) else {
            return Vec::new();
        };

        if entry.is_interface() && !is_static {
            let mut found: Vec<&CandidateSignature> =
                entry.declared_methods(name, arity, false).collect();
            for sup in self.hierarchy.supertypes(target) {
                if let Some(iface) = self.get(sup).filter(|e| e.is_interface()) {
                    found.extend(iface.declared_methods(name, arity, false));
                }
            }
            return found;
        }

        let mut found: Vec<&CandidateSignature> = Vec::new();
        for class in self.base_chain(target) {
            for method in class.declared_methods(name, arity, is_static) {
                if !found.iter().any(|m| m.params == method.params) {
                    found.push(method);
                }
            }
        }
        found
    }

    /// A field by name, searching base classes.
    pub fn lookup_field(&self, target: TypeHash, name: &str, is_static: bool) -> Option<&FieldEntry> {
        self.base_chain(target)
            .find_map(|class| class.declared_field(name, is_static))
    }

    /// A readable property by name, searching base classes.
    pub fn lookup_property(
        &self,
        target: TypeHash,
        name: &str,
        is_static: bool,
    ) -> Option<&PropertyEntry> {
        self.base_chain(target)
            .find_map(|class| class.declared_property(name, is_static))
    }

    /// A method named `name` taking no arguments.
    pub fn lookup_zero_arity_method(
        &self,
        target: TypeHash,
        name: &str,
        is_static: bool,
    ) -> Option<&CandidateSignature> {
        self.lookup_members(target, name, 0, is_static)
            .into_iter()
            .next()
    }
}
