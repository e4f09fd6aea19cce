//! `(recur args*)`: rebind the loop locals and jump back to the loop head.

use quill_core::{CompilationError, Form, Span};

use super::Expr;
use crate::analyzer::FormCompiler;
use crate::context::CompilationContext;
use crate::ops::{GenContext, Op, Position};
use crate::scope::LocalBinding;

type Result<T> = std::result::Result<T, CompilationError>;

#[derive(Debug, Clone, PartialEq)]
pub struct RecurExpr {
    pub label: u32,
    pub stores: Vec<(LocalBinding, Expr)>,
    pub span: Span,
}

impl RecurExpr {
    pub fn parse<C>(
        ctx: &mut CompilationContext<'_>,
        compiler: &mut C,
        form: &Form,
        position: Position,
    ) -> Result<Self>
    where
        C: FormCompiler + ?Sized,
    {
        let span = form.span;
        let (label, locals) = match ctx.current_frame() {
            Some(frame) => match frame.loop_label {
                Some(label) => (label, frame.loop_locals.clone()),
                None => return Err(CompilationError::syntax("No recursion point for recur", span)),
            },
            None => return Err(CompilationError::syntax("No recursion point for recur", span)),
        };
        if position != Position::Return {
            return Err(CompilationError::syntax("Can only recur from tail position", span));
        }

        let args = form
            .as_list()
            .and_then(|items| items.get(1..))
            .unwrap_or_default();
        if args.len() != locals.len() {
            return Err(CompilationError::syntax(
                format!(
                    "Mismatched argument count to recur, expected: {} args, got: {}",
                    locals.len(),
                    args.len()
                ),
                span,
            ));
        }

        let mut stores = Vec::with_capacity(args.len());
        for (local, arg) in locals.into_iter().zip(args) {
            let expr = compiler.compile(ctx, arg, Position::Expression)?;
            if let Some(kind) = local.primitive {
                if expr.maybe_primitive() != Some(kind) {
                    return Err(CompilationError::type_constraint(
                        format!(
                            "recur arg for primitive local: {} is not matching primitive, needed: {}",
                            local.name, kind
                        ),
                        arg.span,
                    ));
                }
            }
            stores.push((local, expr));
        }

        Ok(Self { label, stores, span })
    }

    pub fn generate(&self, gen_ctx: &mut GenContext) -> Op {
        let stores = self
            .stores
            .iter()
            .map(|(local, expr)| {
                let value = if local.primitive.is_some() {
                    expr.generate_unboxed(Position::Expression, gen_ctx)
                } else {
                    expr.generate(Position::Expression, gen_ctx)
                };
                (local.slot, value)
            })
            .collect();
        Op::Recur {
            label: self.label,
            stores,
        }
    }
}
