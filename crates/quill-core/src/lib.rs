//! Core types for the quill host-interop compiler.
//!
//! This crate holds everything shared between the host catalog
//! (`quill-registry`) and the compiler (`quill-compiler`):
//!
//! - [`Span`] and [`Form`]: source locations and the syntax forms produced by the reader
//! - [`TypeHash`] and [`primitives`]: host type identity and the primitive kinds
//! - [`entries`]: host types, fields, properties and candidate method signatures
//! - [`error`]: registration and compilation errors
//! - [`diagnostics`]: non-fatal diagnostics and their sinks

pub mod diagnostics;
pub mod entries;
pub mod error;
pub mod form;
pub mod primitives;
mod span;
mod type_hash;

pub use diagnostics::{Diagnostic, DiagnosticSink, Diagnostics, WriterSink};
pub use entries::{
    CandidateSignature, FieldEntry, HostTypeEntry, HostTypeKind, MemberFlags, PropertyEntry,
};
pub use error::{CompilationError, RegistrationError};
pub use form::{Form, FormKind, Literal, Symbol};
pub use primitives::PrimitiveKind;
pub use span::Span;
pub use type_hash::{TypeHash, hash_constants};
