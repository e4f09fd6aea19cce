//! Backend-agnostic operation tree.
//!
//! Resolved expressions and compiled method units lower to [`Op`] trees. The
//! emitter for a concrete host backend walks the tree; nothing in this crate
//! depends on how the operations are finally encoded.

use quill_core::{Literal, PrimitiveKind, TypeHash};

use crate::CallShape;

/// Where the value of an expression goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    /// The value is the result of the enclosing method.
    Return,
    /// The value is discarded.
    Statement,
    /// The value is consumed by an enclosing expression.
    Expression,
}

/// One operation in a lowered expression or method body.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Const(Literal),
    LoadLocal {
        slot: u32,
        name: String,
    },

    // ==========================================================================
    // Host member access
    // ==========================================================================
    GetStaticField {
        owner: TypeHash,
        name: String,
    },
    GetInstanceField {
        target: Box<Op>,
        owner: TypeHash,
        name: String,
    },
    GetStaticProperty {
        owner: TypeHash,
        name: String,
    },
    GetInstanceProperty {
        target: Box<Op>,
        owner: TypeHash,
        name: String,
    },
    CallStatic {
        method: TypeHash,
        name: String,
        args: Vec<Op>,
    },
    CallInstance {
        target: Box<Op>,
        method: TypeHash,
        name: String,
        args: Vec<Op>,
    },

    // ==========================================================================
    // Conversions
    // ==========================================================================
    /// Call the runtime conversion helper for `kind` on a boxed value.
    Convert {
        kind: PrimitiveKind,
        helper: &'static str,
        value: Box<Op>,
    },
    BoxPrimitive {
        kind: PrimitiveKind,
        value: Box<Op>,
    },
    UnboxPrimitive {
        kind: PrimitiveKind,
        value: Box<Op>,
    },

    // ==========================================================================
    // Dynamic dispatch
    // ==========================================================================
    /// Read a field or property by name at run time.
    DynamicGetMember {
        site: u32,
        target: Box<Op>,
        name: String,
    },
    /// Invoke a method by name at run time.
    DynamicInvoke {
        site: u32,
        target: Box<Op>,
        name: String,
        args: Vec<Op>,
    },

    /// Import a host type into the current namespace at run time.
    ImportClass {
        type_hash: TypeHash,
        qualified_name: String,
    },

    // ==========================================================================
    // Control
    // ==========================================================================
    Label(u32),
    Block(Vec<Op>),
    /// Evaluate and drop the value.
    Discard(Box<Op>),
    /// Store new values into the loop locals and jump to `label`.
    Recur {
        label: u32,
        stores: Vec<(u32, Op)>,
    },

    /// A complete method body with its invocation shape.
    Method {
        name: String,
        shape: CallShape,
        /// Static helper entry point.
        helper: String,
        param_types: Vec<TypeHash>,
        return_type: TypeHash,
        body: Box<Op>,
    },
}

impl Op {
    /// Place a value-producing operation in `position`.
    pub fn in_position(self, position: Position) -> Op {
        match position {
            Position::Statement => Op::Discard(Box::new(self)),
            Position::Return | Position::Expression => self,
        }
    }

    /// Whether this operation produces no value.
    pub fn is_void(&self) -> bool {
        matches!(
            self,
            Op::Discard(_) | Op::Label(_) | Op::Recur { .. }
        )
    }
}

/// Mutable state owned by the code emitter while operations are generated.
#[derive(Debug, Default)]
pub struct GenContext {
    sites: Vec<String>,
}

impl GenContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a call site for a runtime member lookup.
    ///
    /// Each dynamic access gets its own site, even for repeated names, so
    /// the runtime can cache per site.
    pub fn register_dynamic_site(&mut self, member: &str) -> u32 {
        let site = self.sites.len() as u32;
        self.sites.push(member.to_string());
        site
    }

    /// Member names of the allocated dynamic sites, indexed by site.
    pub fn dynamic_sites(&self) -> &[String] {
        &self.sites
    }
}
