//! Host catalog entries.
//!
//! These describe the host platform's types and members as discovered by
//! introspection. They are populated once into the registry and never
//! mutated afterwards.

mod member;
mod type_entry;

pub use member::{CandidateSignature, FieldEntry, MemberFlags, PropertyEntry};
pub use type_entry::{HostTypeEntry, HostTypeKind};
