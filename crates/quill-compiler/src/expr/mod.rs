//! Analyzed expressions.
//!
//! [`Expr`] is what the form compiler produces: a tree annotated with static
//! types, bound locals and resolved host members. Every expression can
//! generate its boxed value and, when [`Expr::maybe_primitive`] says so, an
//! unboxed one.

mod body;
mod identifiers;
mod import;
mod literals;
mod recur;

pub use body::BodyExpr;
pub use identifiers::LocalExpr;
pub use import::ImportExpr;
pub use literals::ConstantExpr;
pub use recur::RecurExpr;

use quill_core::{PrimitiveKind, Span, TypeHash};

use crate::member::MemberExpr;
use crate::ops::{GenContext, Op, Position};

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Constant(ConstantExpr),
    Local(LocalExpr),
    Member(Box<MemberExpr>),
    Body(BodyExpr),
    Import(ImportExpr),
    Recur(RecurExpr),
}

impl Expr {
    /// The host type of the value, when known at compile time.
    pub fn static_type(&self) -> Option<TypeHash> {
        match self {
            Expr::Constant(e) => e.static_type(),
            Expr::Local(e) => e.static_type(),
            Expr::Member(e) => e.static_type(),
            Expr::Body(e) => e.static_type(),
            Expr::Import(_) | Expr::Recur(_) => None,
        }
    }

    /// The primitive kind this expression can produce without boxing.
    pub fn maybe_primitive(&self) -> Option<PrimitiveKind> {
        match self {
            Expr::Constant(e) => e.maybe_primitive(),
            Expr::Local(e) => e.maybe_primitive(),
            Expr::Member(e) => e.maybe_primitive(),
            Expr::Body(e) => e.maybe_primitive(),
            Expr::Import(_) | Expr::Recur(_) => None,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Expr::Constant(e) => e.span,
            Expr::Local(e) => e.span,
            Expr::Member(e) => e.span,
            Expr::Body(e) => e.span(),
            Expr::Import(e) => e.span,
            Expr::Recur(e) => e.span,
        }
    }

    /// Generate the boxed value in `position`.
    pub fn generate(&self, position: Position, gen_ctx: &mut GenContext) -> Op {
        match self {
            Expr::Constant(e) => e.generate(position),
            Expr::Local(e) => e.generate(position),
            Expr::Member(e) => e.generate(position, gen_ctx),
            Expr::Body(e) => e.generate(position, gen_ctx),
            Expr::Import(e) => e.generate(position),
            Expr::Recur(e) => e.generate(gen_ctx),
        }
    }

    /// Generate the unboxed value in `position`.
    ///
    /// Falls back to the boxed value for expressions without a primitive kind.
    pub fn generate_unboxed(&self, position: Position, gen_ctx: &mut GenContext) -> Op {
        match self {
            Expr::Constant(e) => e.generate(position),
            Expr::Local(e) => e.generate_unboxed(position),
            Expr::Member(e) => e.generate_unboxed(position, gen_ctx),
            Expr::Body(e) => e.generate_unboxed(position, gen_ctx),
            Expr::Import(_) | Expr::Recur(_) => self.generate(position, gen_ctx),
        }
    }
}
