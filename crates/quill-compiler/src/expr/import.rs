//! `(import Qualified.TypeName)` forms.

use quill_core::{CompilationError, Form, FormKind, Literal, Span, TypeHash};

use crate::context::CompilationContext;
use crate::ops::{Op, Position};

type Result<T> = std::result::Result<T, CompilationError>;

/// Imports a host type into the current namespace.
///
/// Compiling the form makes the simple name available to later forms
/// ([`ImportExpr::eval`]); the generated operation repeats the import when
/// the code is loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportExpr {
    pub type_hash: TypeHash,
    pub qualified_name: String,
    pub span: Span,
}

impl ImportExpr {
    pub fn parse(ctx: &CompilationContext<'_>, form: &Form) -> Result<Self> {
        let items = form.as_list().unwrap_or_default();
        let name = match items {
            [_, target] => match &target.kind {
                FormKind::Symbol(symbol) if !symbol.is_qualified() => symbol.name.as_str(),
                FormKind::Literal(Literal::Str(name)) => name.as_str(),
                _ => return Err(malformed(form.span)),
            },
            _ => return Err(malformed(form.span)),
        };

        let entry = ctx
            .registry()
            .get_by_name(name)
            .ok_or_else(|| CompilationError::UnknownType {
                name: name.to_string(),
                span: form.span,
            })?;

        Ok(Self {
            type_hash: entry.type_hash,
            qualified_name: entry.qualified_name.clone(),
            span: form.span,
        })
    }

    /// Bind the type's simple name in the context's import table.
    pub fn eval(&self, ctx: &mut CompilationContext<'_>) -> Result<()> {
        let registry = ctx.registry();
        let entry = registry
            .get(self.type_hash)
            .ok_or_else(|| CompilationError::UnknownType {
                name: self.qualified_name.clone(),
                span: self.span,
            })?;
        ctx.imports_mut()
            .import(entry)
            .map_err(|err| CompilationError::syntax(err.to_string(), self.span))
    }

    pub fn generate(&self, position: Position) -> Op {
        Op::ImportClass {
            type_hash: self.type_hash,
            qualified_name: self.qualified_name.clone(),
        }
        .in_position(position)
    }
}

fn malformed(span: Span) -> CompilationError {
    CompilationError::syntax("Malformed import, expecting (import Qualified.TypeName)", span)
}
