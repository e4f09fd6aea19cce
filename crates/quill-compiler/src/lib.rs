//! quill compiler core
//!
//! Compiles host interop forms and function methods into an analyzed
//! expression tree that lowers to backend-agnostic [`Op`]s.
//!
//! ## Modules
//!
//! - [`analyzer`]: The [`FormCompiler`] seam and the core form [`Analyzer`]
//! - [`call_shape`]: Invocation shapes (`invoke`, `do_invoke`, `invoke_static`)
//! - [`context`]: Compilation context with method frames and diagnostics
//! - [`conversion`]: Argument coercion at host call sites
//! - [`expr`]: Analyzed expressions
//! - [`fn_method`]: Function method compilation
//! - [`member`]: Host member access resolution
//! - [`ops`]: Operation tree and generation context
//! - [`overload`]: Overload resolution for host method calls
//! - [`scope`]: Lexical environment of a method

pub mod analyzer;
pub mod call_shape;
pub mod context;
pub mod conversion;
pub mod expr;
pub mod fn_method;
pub mod member;
pub mod ops;
pub mod overload;
pub mod scope;

pub use analyzer::{Analyzer, FormCompiler};
pub use call_shape::CallShape;
pub use context::{CompilationContext, CompilerOptions, MethodFrame};
pub use conversion::{ArgCoercion, Coercion, TypedArg, coerce, plan_typed_arg};
pub use expr::{BodyExpr, ConstantExpr, Expr, ImportExpr, LocalExpr, RecurExpr};
pub use fn_method::{CompiledMethodUnit, FnMethodOptions, ParameterList, compile_fn_method};
pub use member::{MemberAccess, MemberExpr, resolve_access};
pub use ops::{GenContext, Op, Position};
pub use overload::{OverloadResolution, resolve_overload};
pub use scope::{LocalBinding, LocalEnv};

// Re-export CompilationError from core for convenience
pub use quill_core::CompilationError;

/// Maximum number of required positional parameters of a function method.
pub const MAX_POSITIONAL_ARITY: usize = 20;
