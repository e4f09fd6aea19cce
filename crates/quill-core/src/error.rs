//! Error types for catalog population and compilation.
//!
//! ## Error Hierarchy
//!
//! ```text
//! RegistrationError   - populating the host catalog
//! CompilationError    - compiling function methods and host access forms
//! ├── Syntax            malformed parameter list or member form
//! ├── TypeConstraint    unsupported primitive parameter/return kind
//! ├── ArityLimit        too many parameters
//! ├── AmbiguousOverload tie among widened candidates
//! ├── UnresolvedMember  static target with no matching member
//! └── ...
//! ```
//!
//! Every compilation error is fatal for the form being compiled. Accesses
//! that cannot be resolved against an instance of unknown type are not
//! errors: they degrade to dynamic dispatch and a warning.

use thiserror::Error;

use crate::Span;

// ============================================================================
// Registration Errors
// ============================================================================

/// Errors raised while populating the host catalog.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistrationError {
    /// A type with the same qualified name was already registered.
    #[error("duplicate host type '{name}'")]
    DuplicateType { name: String },

    /// A base class or interface was referenced before being registered.
    #[error("type '{name}' references unregistered supertype {supertype}")]
    UnknownSupertype { name: String, supertype: String },

    /// An import alias is already bound to a different type.
    #[error("import '{alias}' already refers to '{existing}'")]
    ConflictingImport { alias: String, existing: String },
}

// ============================================================================
// Compilation Errors
// ============================================================================

/// Errors raised while compiling a form.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompilationError {
    /// A form does not have the expected shape.
    #[error("at {span}: {message}")]
    Syntax { message: String, span: Span },

    /// A primitive type hint names an unsupported kind.
    #[error("at {span}: {message}")]
    TypeConstraint { message: String, span: Span },

    /// A parameter list binds more than the maximum positional arity.
    #[error("at {span}: can't specify more than {limit} parameters")]
    ArityLimit { limit: usize, span: Span },

    /// More than one widened candidate matches equally well.
    #[error("at {span}: more than one matching method found: {name}")]
    AmbiguousOverload { name: String, span: Span },

    /// A statically known type has no member by this name and shape.
    #[error("at {span}: no member '{member}' found on type '{type_name}'")]
    UnresolvedMember {
        member: String,
        type_name: String,
        span: Span,
    },

    /// Candidates exist but none accepts the argument types.
    #[error("at {span}: no overload of '{name}' on '{type_name}' accepts ({args})")]
    NoMatchingMethod {
        name: String,
        type_name: String,
        args: String,
        span: Span,
    },

    /// A type hint or import names a type the catalog does not know.
    #[error("at {span}: unable to resolve type '{name}'")]
    UnknownType { name: String, span: Span },

    /// A symbol is not bound in the lexical environment.
    #[error("at {span}: unable to resolve symbol '{name}' in this context")]
    UnknownVariable { name: String, span: Span },

    /// Internal compiler invariant violated.
    #[error("internal compiler error: {message}")]
    Internal { message: String },
}

impl CompilationError {
    pub fn syntax(message: impl Into<String>, span: Span) -> Self {
        CompilationError::Syntax {
            message: message.into(),
            span,
        }
    }

    pub fn type_constraint(message: impl Into<String>, span: Span) -> Self {
        CompilationError::TypeConstraint {
            message: message.into(),
            span,
        }
    }

    /// Get the span where this error occurred, if it has one.
    pub fn span(&self) -> Option<Span> {
        match self {
            CompilationError::Syntax { span, .. }
            | CompilationError::TypeConstraint { span, .. }
            | CompilationError::ArityLimit { span, .. }
            | CompilationError::AmbiguousOverload { span, .. }
            | CompilationError::UnresolvedMember { span, .. }
            | CompilationError::NoMatchingMethod { span, .. }
            | CompilationError::UnknownType { span, .. }
            | CompilationError::UnknownVariable { span, .. } => Some(*span),
            CompilationError::Internal { .. } => None,
        }
    }
}
