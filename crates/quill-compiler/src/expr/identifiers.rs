//! References to local bindings.

use quill_core::{PrimitiveKind, Span, TypeHash};

use crate::ops::{Op, Position};
use crate::scope::LocalBinding;

#[derive(Debug, Clone, PartialEq)]
pub struct LocalExpr {
    pub binding: LocalBinding,
    /// Tag on the reference itself, overriding the binding's type.
    pub tag: Option<TypeHash>,
    pub span: Span,
}

impl LocalExpr {
    pub fn new(binding: LocalBinding, tag: Option<TypeHash>, span: Span) -> Self {
        Self { binding, tag, span }
    }

    pub fn static_type(&self) -> Option<TypeHash> {
        self.tag.or_else(|| self.binding.static_type())
    }

    pub fn maybe_primitive(&self) -> Option<PrimitiveKind> {
        self.binding.primitive
    }

    fn load(&self) -> Op {
        Op::LoadLocal {
            slot: self.binding.slot,
            name: self.binding.name.clone(),
        }
    }

    pub fn generate(&self, position: Position) -> Op {
        let load = match self.binding.primitive {
            Some(kind) => Op::BoxPrimitive {
                kind,
                value: Box::new(self.load()),
            },
            None => self.load(),
        };
        load.in_position(position)
    }

    pub fn generate_unboxed(&self, position: Position) -> Op {
        self.load().in_position(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::primitives;

    fn binding(primitive: Option<PrimitiveKind>) -> LocalBinding {
        LocalBinding {
            name: "n".into(),
            tag: None,
            slot: 1,
            is_arg: true,
            primitive,
        }
    }

    #[test]
    fn primitive_local_is_boxed_on_demand() {
        let local = LocalExpr::new(binding(Some(PrimitiveKind::Int64)), None, Span::default());
        let load = Op::LoadLocal {
            slot: 1,
            name: "n".into(),
        };
        assert_eq!(local.generate_unboxed(Position::Expression), load);
        assert_eq!(
            local.generate(Position::Expression),
            Op::BoxPrimitive {
                kind: PrimitiveKind::Int64,
                value: Box::new(load),
            }
        );
        assert_eq!(local.static_type(), Some(primitives::INT64));
    }

    #[test]
    fn reference_tag_overrides_binding() {
        let local = LocalExpr::new(binding(None), Some(primitives::STRING), Span::default());
        assert_eq!(local.static_type(), Some(primitives::STRING));
        assert_eq!(local.maybe_primitive(), None);
    }
}
