//! Invocation shapes for compiled function methods.
//!
//! A function object answers positional calls through one entry point per
//! fixed arity (`invoke`) and a single variadic entry point (`do_invoke`)
//! receiving the trailing arguments as a sequence. Static functions are
//! reached through `invoke_static` instead.

use std::fmt;

use quill_core::{TypeHash, primitives};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallShape {
    /// `invoke` taking exactly `arity` arguments.
    Fixed { arity: usize },
    /// `do_invoke` taking `required` arguments plus a rest sequence.
    Variadic { required: usize },
    /// The static entry point of a static function.
    Static { required: usize, variadic: bool },
}

impl CallShape {
    /// Choose the shape for a method with `required` positional parameters.
    pub fn select(required: usize, variadic: bool, is_static: bool) -> CallShape {
        match (is_static, variadic) {
            (true, _) => CallShape::Static { required, variadic },
            (false, true) => CallShape::Variadic { required },
            (false, false) => CallShape::Fixed { arity: required },
        }
    }

    pub fn required_arity(self) -> usize {
        match self {
            CallShape::Fixed { arity } => arity,
            CallShape::Variadic { required } | CallShape::Static { required, .. } => required,
        }
    }

    pub fn is_variadic(self) -> bool {
        matches!(
            self,
            CallShape::Variadic { .. } | CallShape::Static { variadic: true, .. }
        )
    }

    /// Parameter count including the rest sequence.
    pub fn num_params(self) -> usize {
        self.required_arity() + usize::from(self.is_variadic())
    }

    /// Name of the entry point.
    pub fn method_name(self) -> &'static str {
        match self {
            CallShape::Fixed { .. } => "invoke",
            CallShape::Variadic { .. } => "do_invoke",
            CallShape::Static { .. } => "invoke_static",
        }
    }

    /// Name of the static helper the entry point delegates to.
    pub fn helper_name(self) -> String {
        match self {
            CallShape::Static { .. } => "invoke_static".to_string(),
            _ => format!(
                "__invoke_helper_{}{}",
                self.required_arity(),
                if self.is_variadic() { "v" } else { "" }
            ),
        }
    }

    /// Boxed parameter types of the entry point, the rest sequence last.
    pub fn object_arg_types(self) -> Vec<TypeHash> {
        vec![primitives::OBJECT; self.num_params()]
    }
}

impl fmt::Display for CallShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.method_name(), self.required_arity())?;
        if self.is_variadic() {
            f.write_str("+")?;
        }
        Ok(())
    }
}
