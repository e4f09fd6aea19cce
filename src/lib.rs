//! quill: host interop and function method compilation.
//!
//! The workspace is split the same way the compiler is layered:
//!
//! - [`quill_core`]: forms, spans, type hashes, host entries, errors and
//!   diagnostics
//! - [`quill_registry`]: the host type catalog and import table
//! - [`quill_compiler`]: overload resolution, argument coercion, member
//!   access resolution and function method compilation
//!
//! # Example
//!
//! ```
//! use quill::prelude::*;
//!
//! let registry = HostRegistry::with_primitives();
//! let mut ctx = CompilationContext::new(&registry);
//!
//! // ([a & more] a)
//! let form = Form::list(vec![
//!     Form::vector(vec![Form::symbol("a"), Form::symbol("&"), Form::symbol("more")]),
//!     Form::symbol("a"),
//! ]);
//! let unit = compile_fn_method(&mut ctx, &mut Analyzer, &form, &FnMethodOptions::instance())?;
//! assert!(unit.is_variadic());
//! assert_eq!(unit.call_shape().method_name(), "do_invoke");
//! # Ok::<(), CompilationError>(())
//! ```

pub use quill_compiler as compiler;
pub use quill_core as core;
pub use quill_registry as registry;

pub mod prelude {
    pub use quill_compiler::{
        Analyzer, CallShape, CompilationContext, CompiledMethodUnit, CompilerOptions, Expr,
        FnMethodOptions, FormCompiler, GenContext, LocalBinding, MemberAccess, MemberExpr,
        MethodFrame, Op, OverloadResolution, ParameterList, Position, compile_fn_method,
        resolve_access, resolve_overload,
    };
    pub use quill_core::{
        CandidateSignature, CompilationError, Diagnostic, DiagnosticSink, Diagnostics, Form,
        HostTypeEntry, Literal, PrimitiveKind, RegistrationError, Span, Symbol, TypeHash,
        WriterSink, primitives,
    };
    pub use quill_registry::{HostRegistry, ImportTable, TypeRelation};
}
