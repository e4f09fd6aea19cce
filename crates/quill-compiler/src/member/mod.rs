//! Host member access: `(. target member args*)`.
//!
//! [`resolve_access`] turns a member form into a [`MemberExpr`] naming
//! exactly which field, property or method is used, or into a
//! [`MemberAccess::DynamicUnresolved`] access that the runtime resolves by
//! name.

mod resolve;

pub use resolve::resolve_access;

use quill_core::{
    CandidateSignature, FieldEntry, PrimitiveKind, PropertyEntry, Span, TypeHash, primitives,
};

use crate::conversion::TypedArg;
use crate::expr::Expr;
use crate::ops::{GenContext, Op, Position};

/// The member a `.` form resolved to.
#[derive(Debug, Clone, PartialEq)]
pub enum MemberAccess {
    StaticField {
        owner: TypeHash,
        field: FieldEntry,
    },
    StaticProperty {
        owner: TypeHash,
        property: PropertyEntry,
    },
    StaticMethod {
        method: CandidateSignature,
        args: Vec<TypedArg>,
    },
    InstanceField {
        target: Expr,
        owner: TypeHash,
        field: FieldEntry,
    },
    InstanceProperty {
        target: Expr,
        owner: TypeHash,
        property: PropertyEntry,
    },
    InstanceMethod {
        target: Expr,
        method: CandidateSignature,
        args: Vec<TypedArg>,
    },
    /// Looked up by name at run time.
    DynamicUnresolved {
        target: Expr,
        name: String,
        args: Vec<Expr>,
        /// `(. x (m))` invokes; `(. x m)` reads a field, property or
        /// zero-argument method.
        is_call: bool,
    },
}

impl MemberAccess {
    /// Declared type of the accessed member.
    pub fn value_type(&self) -> Option<TypeHash> {
        match self {
            MemberAccess::StaticField { field, .. } | MemberAccess::InstanceField { field, .. } => {
                Some(field.field_type)
            }
            MemberAccess::StaticProperty { property, .. }
            | MemberAccess::InstanceProperty { property, .. } => Some(property.property_type),
            MemberAccess::StaticMethod { method, .. }
            | MemberAccess::InstanceMethod { method, .. } => Some(method.return_type),
            MemberAccess::DynamicUnresolved { .. } => None,
        }
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, MemberAccess::DynamicUnresolved { .. })
    }

    /// The host operation, producing unboxed values for primitive members.
    fn generate_raw(&self, gen_ctx: &mut GenContext) -> Op {
        match self {
            MemberAccess::StaticField { owner, field } => Op::GetStaticField {
                owner: *owner,
                name: field.name.clone(),
            },
            MemberAccess::StaticProperty { owner, property } => Op::GetStaticProperty {
                owner: *owner,
                name: property.name.clone(),
            },
            MemberAccess::StaticMethod { method, args } => Op::CallStatic {
                method: method.method_hash,
                name: method.name.clone(),
                args: args.iter().map(|arg| arg.generate(gen_ctx)).collect(),
            },
            MemberAccess::InstanceField {
                target,
                owner,
                field,
            } => Op::GetInstanceField {
                target: Box::new(target.generate(Position::Expression, gen_ctx)),
                owner: *owner,
                name: field.name.clone(),
            },
            MemberAccess::InstanceProperty {
                target,
                owner,
                property,
            } => Op::GetInstanceProperty {
                target: Box::new(target.generate(Position::Expression, gen_ctx)),
                owner: *owner,
                name: property.name.clone(),
            },
            MemberAccess::InstanceMethod {
                target,
                method,
                args,
            } => {
                let target = Box::new(target.generate(Position::Expression, gen_ctx));
                Op::CallInstance {
                    target,
                    method: method.method_hash,
                    name: method.name.clone(),
                    args: args.iter().map(|arg| arg.generate(gen_ctx)).collect(),
                }
            }
            MemberAccess::DynamicUnresolved {
                target,
                name,
                args,
                is_call,
            } => {
                let site = gen_ctx.register_dynamic_site(name);
                let target = Box::new(target.generate(Position::Expression, gen_ctx));
                if *is_call {
                    Op::DynamicInvoke {
                        site,
                        target,
                        name: name.clone(),
                        args: args
                            .iter()
                            .map(|arg| arg.generate(Position::Expression, gen_ctx))
                            .collect(),
                    }
                } else {
                    Op::DynamicGetMember {
                        site,
                        target,
                        name: name.clone(),
                    }
                }
            }
        }
    }
}

/// A resolved member access with its tag and location.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberExpr {
    pub access: MemberAccess,
    /// Tag on the `.` form, overriding the member's declared type.
    pub tag: Option<TypeHash>,
    pub span: Span,
}

impl MemberExpr {
    pub fn new(access: MemberAccess, tag: Option<TypeHash>, span: Span) -> Self {
        Self { access, tag, span }
    }

    pub fn static_type(&self) -> Option<TypeHash> {
        self.tag
            .or_else(|| self.access.value_type())
            .filter(|&ty| ty != primitives::VOID)
    }

    pub fn maybe_primitive(&self) -> Option<PrimitiveKind> {
        self.access.value_type().and_then(PrimitiveKind::from_hash)
    }

    fn returns_void(&self) -> bool {
        self.access.value_type() == Some(primitives::VOID)
    }

    /// Generate the boxed value. Void methods yield nil outside statement
    /// position.
    pub fn generate(&self, position: Position, gen_ctx: &mut GenContext) -> Op {
        let raw = self.access.generate_raw(gen_ctx);
        if self.returns_void() {
            return match position {
                Position::Statement => raw,
                _ => Op::Block(vec![raw, Op::Const(quill_core::Literal::Nil)]),
            };
        }
        let value = match self.maybe_primitive() {
            Some(kind) => Op::BoxPrimitive {
                kind,
                value: Box::new(raw),
            },
            None => raw,
        };
        value.in_position(position)
    }

    pub fn generate_unboxed(&self, position: Position, gen_ctx: &mut GenContext) -> Op {
        if self.maybe_primitive().is_none() {
            return self.generate(position, gen_ctx);
        }
        self.access.generate_raw(gen_ctx).in_position(position)
    }
}
