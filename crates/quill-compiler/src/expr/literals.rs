//! Constant expressions.

use quill_core::{Literal, PrimitiveKind, Span, TypeHash, primitives};

use crate::ops::{Op, Position};

/// A self-evaluating literal, optionally tagged with a host type.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantExpr {
    pub literal: Literal,
    pub tag: Option<TypeHash>,
    pub span: Span,
}

impl ConstantExpr {
    pub fn new(literal: Literal, tag: Option<TypeHash>, span: Span) -> Self {
        Self { literal, tag, span }
    }

    pub fn static_type(&self) -> Option<TypeHash> {
        self.tag.or(match self.literal {
            Literal::Long(_) => Some(primitives::INT64),
            Literal::Double(_) => Some(primitives::DOUBLE),
            Literal::Bool(_) => Some(primitives::BOOL),
            Literal::Char(_) => Some(primitives::CHAR),
            Literal::Str(_) => Some(primitives::STRING),
            Literal::Nil | Literal::Keyword(_) => None,
        })
    }

    /// Numeric literals are available unboxed.
    pub fn maybe_primitive(&self) -> Option<PrimitiveKind> {
        match self.literal {
            Literal::Long(_) => Some(PrimitiveKind::Int64),
            Literal::Double(_) => Some(PrimitiveKind::Double),
            _ => None,
        }
    }

    pub fn generate(&self, position: Position) -> Op {
        Op::Const(self.literal.clone()).in_position(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_types() {
        let long = ConstantExpr::new(Literal::Long(1), None, Span::default());
        assert_eq!(long.static_type(), Some(primitives::INT64));
        assert_eq!(long.maybe_primitive(), Some(PrimitiveKind::Int64));

        let nil = ConstantExpr::new(Literal::Nil, None, Span::default());
        assert_eq!(nil.static_type(), None);

        let tagged = ConstantExpr::new(Literal::Nil, Some(primitives::STRING), Span::default());
        assert_eq!(tagged.static_type(), Some(primitives::STRING));
        assert_eq!(tagged.maybe_primitive(), None);
    }
}
