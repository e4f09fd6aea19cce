//! Form compiler seam.
//!
//! Host interop and method compilation recurse into the general form
//! compiler for targets, arguments and bodies through [`FormCompiler`].
//! [`Analyzer`] is the compiler for the core special forms:
//!
//! - literals and local symbols (with `^Tag` hints)
//! - `(do forms*)`
//! - `(. target member args*)`
//! - `(import Qualified.TypeName)`
//! - `(recur args*)`

use quill_core::{CompilationError, Form, FormKind, Symbol};

use crate::context::CompilationContext;
use crate::expr::{BodyExpr, ConstantExpr, Expr, ImportExpr, LocalExpr, RecurExpr};
use crate::member::resolve_access;
use crate::ops::Position;

type Result<T> = std::result::Result<T, CompilationError>;

/// Compiles a form into an analyzed expression.
pub trait FormCompiler {
    fn compile(
        &mut self,
        ctx: &mut CompilationContext<'_>,
        form: &Form,
        position: Position,
    ) -> Result<Expr>;

    /// Compile a sequence of forms as a body: every form but the last in
    /// statement position, the last one in `position`.
    fn compile_body(
        &mut self,
        ctx: &mut CompilationContext<'_>,
        forms: &[Form],
        position: Position,
    ) -> Result<BodyExpr> {
        let mut exprs = Vec::with_capacity(forms.len());
        for (index, form) in forms.iter().enumerate() {
            let form_position = if index + 1 == forms.len() {
                position
            } else {
                Position::Statement
            };
            exprs.push(self.compile(ctx, form, form_position)?);
        }
        Ok(BodyExpr::new(exprs))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Analyzer;

impl Analyzer {
    pub fn new() -> Self {
        Self
    }

    fn compile_symbol(
        &self,
        ctx: &CompilationContext<'_>,
        form: &Form,
        symbol: &Symbol,
    ) -> Result<Expr> {
        let binding = (!symbol.is_qualified())
            .then(|| ctx.lookup_local(&symbol.name))
            .flatten()
            .ok_or_else(|| CompilationError::UnknownVariable {
                name: symbol.to_string(),
                span: form.span,
            })?;
        let tag = resolve_form_tag(ctx, form)?;
        Ok(Expr::Local(LocalExpr::new(binding.clone(), tag, form.span)))
    }

    fn compile_list(
        &mut self,
        ctx: &mut CompilationContext<'_>,
        form: &Form,
        items: &[Form],
        position: Position,
    ) -> Result<Expr> {
        let head = items
            .first()
            .and_then(Form::as_symbol)
            .filter(|sym| !sym.is_qualified())
            .map(|sym| sym.name.as_str());

        match head {
            Some("do") => Ok(Expr::Body(self.compile_body(ctx, &items[1..], position)?)),
            Some(".") => Ok(Expr::Member(Box::new(resolve_access(ctx, self, form)?))),
            Some("import") => {
                let import = ImportExpr::parse(ctx, form)?;
                import.eval(ctx)?;
                Ok(Expr::Import(import))
            }
            Some("recur") => Ok(Expr::Recur(RecurExpr::parse(ctx, self, form, position)?)),
            _ => Err(CompilationError::syntax(
                format!("Unsupported form: {}", form),
                form.span,
            )),
        }
    }
}

impl FormCompiler for Analyzer {
    fn compile(
        &mut self,
        ctx: &mut CompilationContext<'_>,
        form: &Form,
        position: Position,
    ) -> Result<Expr> {
        match &form.kind {
            FormKind::Literal(literal) => {
                let tag = resolve_form_tag(ctx, form)?;
                Ok(Expr::Constant(ConstantExpr::new(
                    literal.clone(),
                    tag,
                    form.span,
                )))
            }
            FormKind::Symbol(symbol) => self.compile_symbol(ctx, form, symbol),
            FormKind::List(items) => self.compile_list(ctx, form, items, position),
            FormKind::Vector(_) => Err(CompilationError::syntax(
                format!("Unsupported form: {}", form),
                form.span,
            )),
        }
    }
}

fn resolve_form_tag(
    ctx: &CompilationContext<'_>,
    form: &Form,
) -> Result<Option<quill_core::TypeHash>> {
    form.tag
        .as_ref()
        .map(|tag| ctx.resolve_tag(tag, form.span))
        .transpose()
}
