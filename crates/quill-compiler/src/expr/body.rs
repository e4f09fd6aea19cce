//! Sequenced bodies (`do` forms and method bodies).

use quill_core::{PrimitiveKind, Span, TypeHash};

use super::Expr;
use crate::ops::{GenContext, Op, Position};

/// A sequence of expressions; the last one provides the value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BodyExpr {
    pub exprs: Vec<Expr>,
}

impl BodyExpr {
    pub fn new(exprs: Vec<Expr>) -> Self {
        Self { exprs }
    }

    pub fn static_type(&self) -> Option<TypeHash> {
        self.exprs.last().and_then(Expr::static_type)
    }

    pub fn maybe_primitive(&self) -> Option<PrimitiveKind> {
        self.exprs.last().and_then(Expr::maybe_primitive)
    }

    pub fn span(&self) -> Span {
        self.exprs.first().map(Expr::span).unwrap_or_default()
    }

    pub fn generate(&self, position: Position, gen_ctx: &mut GenContext) -> Op {
        self.generate_with(position, gen_ctx, Expr::generate)
    }

    pub fn generate_unboxed(&self, position: Position, gen_ctx: &mut GenContext) -> Op {
        self.generate_with(position, gen_ctx, Expr::generate_unboxed)
    }

    fn generate_with(
        &self,
        position: Position,
        gen_ctx: &mut GenContext,
        last: fn(&Expr, Position, &mut GenContext) -> Op,
    ) -> Op {
        let Some((tail, init)) = self.exprs.split_last() else {
            return Op::Const(quill_core::Literal::Nil).in_position(position);
        };
        let mut ops: Vec<Op> = init
            .iter()
            .map(|expr| expr.generate(Position::Statement, gen_ctx))
            .collect();
        ops.push(last(tail, position, gen_ctx));
        Op::Block(ops)
    }
}
