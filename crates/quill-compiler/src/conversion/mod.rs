//! Argument coercion at host call sites.
//!
//! Once an overload is selected, each argument is adapted to its parameter
//! type. The decision is made at resolution time (against the registry) and
//! recorded as an [`ArgCoercion`]; applying it at generation time only
//! needs the argument expression.
//!
//! ## Policy
//!
//! 1. An argument whose unboxed kind equals the parameter type is passed
//!    unboxed
//! 2. Otherwise the boxed value is passed through when it is already
//!    assignable, or when both sides are primitive numeric
//! 3. Otherwise a primitive parameter gets its named conversion helper
//! 4. Anything else is passed through unchanged; assignability is not
//!    re-validated here

use quill_core::{PrimitiveKind, TypeHash, primitives};
use quill_registry::TypeRelation;

use crate::expr::Expr;
use crate::ops::{GenContext, Op, Position};

/// How a boxed value reaches a location of some target type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    PassThrough,
    /// Call the runtime conversion helper for the kind.
    Convert(PrimitiveKind),
}

impl Coercion {
    pub fn apply(self, value: Op) -> Op {
        match self {
            Coercion::PassThrough => value,
            Coercion::Convert(kind) => Op::Convert {
                kind,
                helper: kind.conversion_helper(),
                value: Box::new(value),
            },
        }
    }
}

/// Decide how a value of `value_type` is adapted to `target`.
pub fn coerce(relation: &impl TypeRelation, target: TypeHash, value_type: TypeHash) -> Coercion {
    if value_type == target || relation.is_assignable(value_type, target) {
        return Coercion::PassThrough;
    }
    if primitives::is_primitive_numeric(target) && primitives::is_primitive_numeric(value_type) {
        return Coercion::PassThrough;
    }
    match PrimitiveKind::from_hash(target) {
        Some(kind) => Coercion::Convert(kind),
        None => Coercion::PassThrough,
    }
}

/// How one call argument is generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgCoercion {
    /// Generate the argument's unboxed form.
    Unboxed,
    /// Generate the boxed form, then coerce.
    Boxed(Coercion),
}

/// Plan the coercion of `arg` to a parameter of type `param`.
pub fn plan_typed_arg(relation: &impl TypeRelation, param: TypeHash, arg: &Expr) -> ArgCoercion {
    if arg.maybe_primitive().map(PrimitiveKind::type_hash) == Some(param) {
        return ArgCoercion::Unboxed;
    }
    ArgCoercion::Boxed(coerce(relation, param, boxed_type(arg)))
}

/// The type of an expression's boxed value as seen by the host.
///
/// Primitive-typed values are boxed into objects; unknown types are objects.
pub fn boxed_type(expr: &Expr) -> TypeHash {
    match expr.static_type() {
        Some(ty) if !primitives::is_primitive(ty) => ty,
        _ => primitives::OBJECT,
    }
}

/// A call argument with its planned coercion.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedArg {
    pub expr: Expr,
    pub coercion: ArgCoercion,
}

impl TypedArg {
    pub fn new(relation: &impl TypeRelation, param: TypeHash, expr: Expr) -> Self {
        let coercion = plan_typed_arg(relation, param, &expr);
        Self { expr, coercion }
    }

    pub fn generate(&self, gen_ctx: &mut GenContext) -> Op {
        match self.coercion {
            ArgCoercion::Unboxed => self.expr.generate_unboxed(Position::Expression, gen_ctx),
            ArgCoercion::Boxed(coercion) => {
                coercion.apply(self.expr.generate(Position::Expression, gen_ctx))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::ConstantExpr;
    use quill_core::primitives::{DOUBLE, INT32, INT64, OBJECT, STRING};
    use quill_core::{HostTypeEntry, Literal, Span};
    use quill_registry::HostRegistry;

    fn constant(literal: Literal) -> Expr {
        Expr::Constant(ConstantExpr::new(literal, None, Span::default()))
    }

    #[test]
    fn assignable_values_pass_through() {
        let registry = HostRegistry::with_primitives();
        assert_eq!(coerce(&registry, OBJECT, STRING), Coercion::PassThrough);
        assert_eq!(coerce(&registry, STRING, STRING), Coercion::PassThrough);
        assert_eq!(coerce(&registry, INT32, INT64), Coercion::PassThrough);
    }

    #[test]
    fn boxed_values_are_converted_for_primitive_targets() {
        let registry = HostRegistry::with_primitives();
        assert_eq!(
            coerce(&registry, INT32, OBJECT),
            Coercion::Convert(PrimitiveKind::Int32)
        );
        // Unrelated, non-convertible argument: still only a conversion call.
        assert_eq!(
            coerce(&registry, DOUBLE, STRING),
            Coercion::Convert(PrimitiveKind::Double)
        );
    }

    #[test]
    fn reference_targets_are_not_revalidated() {
        let mut registry = HostRegistry::with_primitives();
        let widget = registry
            .register_type(HostTypeEntry::class("Ui.Widget").with_base(OBJECT))
            .unwrap();
        assert_eq!(coerce(&registry, widget, STRING), Coercion::PassThrough);
    }

    #[test]
    fn matching_primitive_is_passed_unboxed() {
        let registry = HostRegistry::with_primitives();
        let long = constant(Literal::Long(4));
        assert_eq!(plan_typed_arg(&registry, INT64, &long), ArgCoercion::Unboxed);
        assert_eq!(
            plan_typed_arg(&registry, INT32, &long),
            ArgCoercion::Boxed(Coercion::Convert(PrimitiveKind::Int32))
        );
        let text = constant(Literal::Str("x".into()));
        assert_eq!(
            plan_typed_arg(&registry, OBJECT, &text),
            ArgCoercion::Boxed(Coercion::PassThrough)
        );
    }

    #[test]
    fn typed_arg_generation() {
        let registry = HostRegistry::with_primitives();
        let mut gen_ctx = GenContext::new();
        let arg = TypedArg::new(&registry, INT32, constant(Literal::Double(1.5.into())));
        assert_eq!(
            arg.generate(&mut gen_ctx),
            Op::Convert {
                kind: PrimitiveKind::Int32,
                helper: "convert_to_int",
                value: Box::new(Op::Const(Literal::Double(1.5.into()))),
            }
        );
    }
}
