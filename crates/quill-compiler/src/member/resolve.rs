//! Resolution of `.` forms against the host catalog.
//!
//! ## Forms
//!
//! ```text
//! (. Type member)           static field, property or zero-argument method
//! (. instance member)       instance field, property or zero-argument method
//! (. target (method args*)) method call
//! (. target method args+)   method call
//! ```
//!
//! In the nested call form the method list must be the last item: forms
//! after `(method args*)` are rejected rather than dropped.
//!
//! A symbol target names a type when it resolves through the imports or the
//! registry and is not shadowed by a local. Anything else is compiled as an
//! instance expression. Instance accesses that cannot be resolved at compile
//! time fall back to run-time lookup and report a reflection warning; static
//! accesses must resolve.

use quill_core::{CandidateSignature, CompilationError, Form, Span, Symbol, TypeHash};
use quill_registry::HostRegistry;

use super::{MemberAccess, MemberExpr};
use crate::analyzer::FormCompiler;
use crate::context::CompilationContext;
use crate::conversion::TypedArg;
use crate::expr::Expr;
use crate::ops::Position;
use crate::overload::{OverloadResolution, resolve_overload};

type Result<T> = std::result::Result<T, CompilationError>;

const MALFORMED: &str = "Malformed member expression, expecting (. target member ...)";

/// Resolve a `(. target member args*)` form.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn resolve_access<C>(
    ctx: &mut CompilationContext<'_>,
    compiler: &mut C,
    form: &Form,
) -> Result<MemberExpr>
where
    C: FormCompiler + ?Sized,
{
    let span = form.span;
    let items = form.as_list().unwrap_or_default();
    if items.len() < 3 {
        return Err(CompilationError::syntax(MALFORMED, span));
    }

    let tag = form
        .tag
        .as_ref()
        .map(|tag| ctx.resolve_tag(tag, span))
        .transpose()?;
    let target_form = &items[1];
    let static_target = target_form.as_symbol().and_then(|sym| ctx.maybe_type(sym));

    let access = match (&items[2..], items[2].as_symbol()) {
        ([_], Some(member)) => {
            let member = member_name(member, span)?;
            match static_target {
                Some(owner) => resolve_static_member(ctx, owner, member, span)?,
                None => {
                    let target = compiler.compile(ctx, target_form, Position::Expression)?;
                    resolve_instance_member(ctx, target, member, span)
                }
            }
        }
        (rest, _) => {
            let (method_form, arg_forms) = match rest {
                [call] if call.as_list().is_some() => match call.as_list() {
                    Some([head, args @ ..]) => (head, args),
                    _ => return Err(CompilationError::syntax(MALFORMED, span)),
                },
                [head, args @ ..] => (head, args),
                [] => return Err(CompilationError::syntax(MALFORMED, span)),
            };
            let method = method_form
                .as_symbol()
                .ok_or_else(|| {
                    CompilationError::syntax(
                        format!("Malformed member expression, method name must be a symbol: {}", method_form),
                        method_form.span,
                    )
                })
                .and_then(|sym| member_name(sym, method_form.span))?;

            match static_target {
                Some(owner) => {
                    let args = compile_args(ctx, compiler, arg_forms)?;
                    resolve_static_call(ctx, owner, method, args, span)?
                }
                None => {
                    let target = compiler.compile(ctx, target_form, Position::Expression)?;
                    let args = compile_args(ctx, compiler, arg_forms)?;
                    resolve_instance_call(ctx, target, method, args, span)?
                }
            }
        }
    };

    tracing::trace!(dynamic = access.is_dynamic(), "resolved member access");
    Ok(MemberExpr::new(access, tag, span))
}

fn member_name(symbol: &Symbol, span: Span) -> Result<&str> {
    if symbol.is_qualified() {
        return Err(CompilationError::syntax(
            format!("Malformed member expression, member name can't be qualified: {}", symbol),
            span,
        ));
    }
    Ok(symbol.name.as_str())
}

fn compile_args<C>(
    ctx: &mut CompilationContext<'_>,
    compiler: &mut C,
    forms: &[Form],
) -> Result<Vec<Expr>>
where
    C: FormCompiler + ?Sized,
{
    forms
        .iter()
        .map(|form| compiler.compile(ctx, form, Position::Expression))
        .collect()
}

// ============================================================================
// Bare member names
// ============================================================================

fn resolve_static_member(
    ctx: &CompilationContext<'_>,
    owner: TypeHash,
    name: &str,
    span: Span,
) -> Result<MemberAccess> {
    let registry = ctx.registry();
    if let Some(field) = registry.lookup_field(owner, name, true) {
        return Ok(MemberAccess::StaticField {
            owner,
            field: field.clone(),
        });
    }
    if let Some(property) = registry.lookup_property(owner, name, true) {
        return Ok(MemberAccess::StaticProperty {
            owner,
            property: property.clone(),
        });
    }
    if let Some(method) = registry.lookup_zero_arity_method(owner, name, true) {
        return Ok(MemberAccess::StaticMethod {
            method: method.clone(),
            args: Vec::new(),
        });
    }
    Err(unresolved(registry, owner, name, span))
}

fn resolve_instance_member(
    ctx: &mut CompilationContext<'_>,
    target: Expr,
    name: &str,
    span: Span,
) -> MemberAccess {
    let registry = ctx.registry();
    let Some(owner) = target.static_type() else {
        ctx.warn_reflection(
            format!("reference to field/property {} can't be resolved (target class is unknown).", name),
            span,
        );
        return dynamic(target, name, Vec::new(), false);
    };

    if let Some(field) = registry.lookup_field(owner, name, false) {
        return MemberAccess::InstanceField {
            target,
            owner,
            field: field.clone(),
        };
    }
    if let Some(property) = registry.lookup_property(owner, name, false) {
        return MemberAccess::InstanceProperty {
            target,
            owner,
            property: property.clone(),
        };
    }
    if let Some(method) = registry.lookup_zero_arity_method(owner, name, false) {
        return MemberAccess::InstanceMethod {
            target,
            method: method.clone(),
            args: Vec::new(),
        };
    }

    ctx.warn_reflection(
        format!(
            "reference to field/property {} on {} can't be resolved.",
            name,
            registry.type_name(owner)
        ),
        span,
    );
    dynamic(target, name, Vec::new(), false)
}

// ============================================================================
// Method calls
// ============================================================================

fn resolve_static_call(
    ctx: &CompilationContext<'_>,
    owner: TypeHash,
    name: &str,
    args: Vec<Expr>,
    span: Span,
) -> Result<MemberAccess> {
    let registry = ctx.registry();
    let candidates = registry.lookup_members(owner, name, args.len(), true);
    if candidates.is_empty() {
        return Err(unresolved(registry, owner, name, span));
    }

    match select_candidate(registry, &candidates, &args) {
        OverloadResolution::Resolved(index) => {
            let method = candidates[index].clone();
            let args = typed_args(registry, &method, args);
            Ok(MemberAccess::StaticMethod { method, args })
        }
        OverloadResolution::Ambiguous => Err(CompilationError::AmbiguousOverload {
            name: name.to_string(),
            span,
        }),
        OverloadResolution::NoMatch => Err(CompilationError::NoMatchingMethod {
            name: name.to_string(),
            type_name: registry.type_name(owner),
            args: describe_args(registry, &args),
            span,
        }),
    }
}

fn resolve_instance_call(
    ctx: &mut CompilationContext<'_>,
    target: Expr,
    name: &str,
    args: Vec<Expr>,
    span: Span,
) -> Result<MemberAccess> {
    let registry = ctx.registry();
    let Some(owner) = target.static_type() else {
        ctx.warn_reflection(
            format!("call to method {} can't be resolved (target class is unknown).", name),
            span,
        );
        return Ok(dynamic(target, name, args, true));
    };

    let candidates = registry.lookup_members(owner, name, args.len(), false);
    match select_candidate(registry, &candidates, &args) {
        OverloadResolution::Resolved(index) => {
            let method = candidates[index].clone();
            let args = typed_args(registry, &method, args);
            Ok(MemberAccess::InstanceMethod {
                target,
                method,
                args,
            })
        }
        OverloadResolution::Ambiguous => Err(CompilationError::AmbiguousOverload {
            name: name.to_string(),
            span,
        }),
        OverloadResolution::NoMatch => {
            ctx.warn_reflection(
                format!(
                    "call to method {} on {} can't be resolved (argument types: {}).",
                    name,
                    registry.type_name(owner),
                    describe_args(registry, &args)
                ),
                span,
            );
            Ok(dynamic(target, name, args, true))
        }
    }
}

/// A lone candidate is taken as is; its arguments are coerced rather than
/// checked.
fn select_candidate(
    registry: &HostRegistry,
    candidates: &[&CandidateSignature],
    args: &[Expr],
) -> OverloadResolution {
    if candidates.len() == 1 {
        return OverloadResolution::Resolved(0);
    }
    let arg_types: Vec<Option<TypeHash>> = args.iter().map(Expr::static_type).collect();
    resolve_overload(registry, candidates, &arg_types)
}

fn typed_args(registry: &HostRegistry, method: &CandidateSignature, args: Vec<Expr>) -> Vec<TypedArg> {
    method
        .params
        .iter()
        .zip(args)
        .map(|(&param, arg)| TypedArg::new(registry, param, arg))
        .collect()
}

fn dynamic(target: Expr, name: &str, args: Vec<Expr>, is_call: bool) -> MemberAccess {
    MemberAccess::DynamicUnresolved {
        target,
        name: name.to_string(),
        args,
        is_call,
    }
}

fn unresolved(registry: &HostRegistry, owner: TypeHash, name: &str, span: Span) -> CompilationError {
    CompilationError::UnresolvedMember {
        member: name.to_string(),
        type_name: registry.type_name(owner),
        span,
    }
}

fn describe_args(registry: &HostRegistry, args: &[Expr]) -> String {
    args.iter()
        .map(|arg| match arg.static_type() {
            Some(ty) => registry.type_name(ty),
            None => "unknown".to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}
