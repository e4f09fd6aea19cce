//! Host type catalog for the quill compiler.
//!
//! [`HostRegistry`] wraps the host platform's type introspection: it stores
//! the discovered [`HostTypeEntry`](quill_core::HostTypeEntry)s, answers
//! member queries (fields, properties, methods by name and arity), and
//! decides assignability through the inheritance graph.
//!
//! The registry is populated once, before compilation, and is read-only while
//! forms are being compiled. Per-namespace imports live in an [`ImportTable`]
//! owned by the compilation context.

mod catalog;
mod hierarchy;
mod imports;
mod registry;

pub use catalog::TypeRelation;
pub use hierarchy::TypeHierarchy;
pub use imports::ImportTable;
pub use registry::HostRegistry;
