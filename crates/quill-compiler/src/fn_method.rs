//! Function method compiler.
//!
//! Compiles one arity of a function, `([params*] body*)`, into a
//! [`CompiledMethodUnit`]. It handles:
//!
//! - Parsing the parameter vector, including at most one `& rest` binding
//! - Adding the implicit `this` binding for instance functions
//! - Primitive (`^long`, `^double`) parameters and return types for static
//!   functions; instance functions take and return objects only
//! - Compiling the body in return position with a `recur` target at its head
//!
//! # Example
//!
//! ```ignore
//! let unit = compile_fn_method(&mut ctx, &mut Analyzer, &form, &FnMethodOptions::default())?;
//! let op = unit.generate(&mut gen_ctx);
//! ```

use quill_core::{CompilationError, Form, PrimitiveKind, Span, Symbol, TypeHash, primitives};

use crate::analyzer::FormCompiler;
use crate::call_shape::CallShape;
use crate::context::{CompilationContext, MethodFrame};
use crate::expr::BodyExpr;
use crate::ops::{GenContext, Op, Position};
use crate::scope::LocalBinding;

type Result<T> = std::result::Result<T, CompilationError>;

// ============================================================================
// Types
// ============================================================================

/// How a function method is compiled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FnMethodOptions {
    /// Static functions may take and return `long` and `double` unboxed.
    pub is_static: bool,
    /// Name of the `this` binding; a fresh `fn__N` name when absent.
    pub this_name: Option<String>,
}

impl FnMethodOptions {
    pub fn instance() -> Self {
        Self::default()
    }

    pub fn static_fn() -> Self {
        Self {
            is_static: true,
            this_name: None,
        }
    }

    pub fn with_this_name(mut self, name: impl Into<String>) -> Self {
        self.this_name = Some(name.into());
        self
    }
}

/// Parsed parameters: required bindings, then at most one rest binding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterList {
    pub required: Vec<LocalBinding>,
    pub rest: Option<LocalBinding>,
}

impl ParameterList {
    pub fn is_variadic(&self) -> bool {
        self.rest.is_some()
    }

    pub fn required_arity(&self) -> usize {
        self.required.len()
    }

    pub fn num_params(&self) -> usize {
        self.required.len() + usize::from(self.is_variadic())
    }

    /// All parameter bindings in order.
    pub fn bindings(&self) -> impl Iterator<Item = &LocalBinding> {
        self.required.iter().chain(self.rest.as_ref())
    }
}

/// One compiled arity of a function.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledMethodUnit {
    pub this_binding: Option<LocalBinding>,
    pub params: ParameterList,
    /// Per-parameter types; only static functions have typed parameters.
    pub arg_types: Option<Vec<TypeHash>>,
    pub return_type: TypeHash,
    pub body: BodyExpr,
    pub loop_label: u32,
    pub is_static: bool,
    /// Number of local slots the method uses.
    pub max_locals: u32,
}

impl CompiledMethodUnit {
    pub fn is_variadic(&self) -> bool {
        self.params.is_variadic()
    }

    pub fn required_arity(&self) -> usize {
        self.params.required_arity()
    }

    pub fn num_params(&self) -> usize {
        self.params.num_params()
    }

    pub fn call_shape(&self) -> CallShape {
        CallShape::select(self.required_arity(), self.is_variadic(), self.is_static)
    }

    /// Generate the method definition.
    pub fn generate(&self, gen_ctx: &mut GenContext) -> Op {
        let shape = self.call_shape();
        let body = if primitives::is_primitive(self.return_type) {
            self.body.generate_unboxed(Position::Return, gen_ctx)
        } else {
            self.body.generate(Position::Return, gen_ctx)
        };
        let param_types = self
            .arg_types
            .clone()
            .unwrap_or_else(|| shape.object_arg_types());

        Op::Method {
            name: shape.method_name().to_string(),
            shape,
            helper: shape.helper_name(),
            param_types,
            return_type: self.return_type,
            body: Box::new(Op::Block(vec![Op::Label(self.loop_label), body])),
        }
    }
}

// ============================================================================
// Compilation
// ============================================================================

/// Compile `([params*] body*)`.
///
/// The method frame pushed for the body is popped again on every exit, so a
/// failed compilation leaves the context as it found it.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn compile_fn_method<C>(
    ctx: &mut CompilationContext<'_>,
    compiler: &mut C,
    form: &Form,
    options: &FnMethodOptions,
) -> Result<CompiledMethodUnit>
where
    C: FormCompiler + ?Sized,
{
    let items = form.as_list().unwrap_or_default();
    let Some((params_form, body_forms)) = items.split_first() else {
        return Err(malformed(form));
    };
    let Some(param_forms) = params_form.as_vector() else {
        return Err(malformed(form));
    };

    let is_static = options.is_static;
    let declared_return = declared_return_type(ctx, params_form)?;
    let return_type = match declared_return {
        Some(ty) if is_static => ty,
        _ => primitives::OBJECT,
    };
    let max_positional_arity = ctx.options().max_positional_arity;

    let ((this_binding, params, body, loop_label), frame) =
        ctx.with_method_frame(MethodFrame::new(is_static), |ctx| {
            let this_binding = if is_static {
                None
            } else {
                let name = match &options.this_name {
                    Some(name) => name.clone(),
                    None => ctx.next_fn_name(),
                };
                Some(ctx.declare_local(&name, None, false, None)?)
            };

            let params = parse_parameters(ctx, param_forms, is_static)?;
            if params.num_params() > max_positional_arity {
                return Err(CompilationError::ArityLimit {
                    limit: max_positional_arity,
                    span: params_form.span,
                });
            }

            let loop_label = ctx.allocate_label();
            ctx.enter_loop(loop_label, params.bindings().cloned().collect())?;

            let body = compiler.compile_body(ctx, body_forms, Position::Return)?;
            Ok((this_binding, params, body, loop_label))
        })?;

    let arg_types = is_static.then(|| params.bindings().map(param_type).collect());

    tracing::debug!(
        required = params.required_arity(),
        variadic = params.is_variadic(),
        is_static,
        "compiled fn method"
    );

    Ok(CompiledMethodUnit {
        this_binding,
        params,
        arg_types,
        return_type,
        body,
        loop_label,
        is_static,
        max_locals: frame.locals.next_slot(),
    })
}

fn malformed(form: &Form) -> CompilationError {
    CompilationError::syntax(
        format!("Malformed fn method, expecting ([params*] body*): {}", form),
        form.span,
    )
}

fn param_type(binding: &LocalBinding) -> TypeHash {
    binding.static_type().unwrap_or(primitives::OBJECT)
}

/// The return type hinted on the parameter vector.
fn declared_return_type(
    ctx: &CompilationContext<'_>,
    params_form: &Form,
) -> Result<Option<TypeHash>> {
    let Some(tag) = &params_form.tag else {
        return Ok(None);
    };
    if let Some(kind) = primitive_hint(tag, params_form.span)? {
        return Ok(Some(kind.type_hash()));
    }
    ctx.resolve_tag(tag, params_form.span).map(Some)
}

/// A primitive type hint, rejecting kinds functions can't take or return.
fn primitive_hint(tag: &Symbol, span: Span) -> Result<Option<PrimitiveKind>> {
    match PrimitiveKind::from_tag(&tag.name) {
        Some(kind) if !kind.is_fn_primitive() => Err(CompilationError::type_constraint(
            format!("Only long and double primitives are supported: {}", tag),
            span,
        )),
        kind => Ok(kind),
    }
}

// ============================================================================
// Parameter parsing
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParamParseState {
    Required,
    Rest,
    Done,
}

fn parse_parameters(
    ctx: &mut CompilationContext<'_>,
    param_forms: &[Form],
    is_static: bool,
) -> Result<ParameterList> {
    let mut params = ParameterList::default();
    let mut state = ParamParseState::Required;

    for param in param_forms {
        let span = param.span;
        let symbol = param
            .as_symbol()
            .ok_or_else(|| CompilationError::syntax("fn params must be Symbols", span))?;
        if symbol.is_qualified() {
            return Err(CompilationError::syntax(
                format!("Can't use qualified name as parameter: {}", symbol),
                span,
            ));
        }

        if symbol.name == "&" {
            if state != ParamParseState::Required {
                return Err(CompilationError::syntax("Invalid parameter list", span));
            }
            state = ParamParseState::Rest;
            continue;
        }

        match state {
            ParamParseState::Done => {
                return Err(CompilationError::syntax(
                    format!("Unexpected parameter: {}", symbol),
                    span,
                ));
            }
            ParamParseState::Rest => {
                if param.tag.is_some() {
                    return Err(CompilationError::syntax("& arg cannot have type hint", span));
                }
                params.rest =
                    Some(ctx.declare_local(&symbol.name, Some(primitives::SEQ), true, None)?);
                state = ParamParseState::Done;
            }
            ParamParseState::Required => {
                let (tag, primitive) = match &param.tag {
                    None => (None, None),
                    Some(hint) => match primitive_hint(hint, span)? {
                        // Unboxed parameters need a static method; widen to object.
                        Some(kind) => (None, is_static.then_some(kind)),
                        None => (Some(ctx.resolve_tag(hint, span)?), None),
                    },
                };
                params
                    .required
                    .push(ctx.declare_local(&symbol.name, tag, true, primitive)?);
            }
        }
    }

    Ok(params)
}
