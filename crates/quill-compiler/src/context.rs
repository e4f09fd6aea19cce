//! CompilationContext - state shared by every step of one compilation unit.
//!
//! The context replaces ambient dynamic bindings: the method frame stack,
//! label and name counters, import table and diagnostics all live here and
//! are threaded through compilation as `&mut CompilationContext`. Nested
//! method compilation goes through [`CompilationContext::with_method_frame`],
//! which restores the stack on every exit path.

use quill_core::{
    CompilationError, Diagnostic, DiagnosticSink, Diagnostics, PrimitiveKind, Span, Symbol,
    TypeHash,
};
use quill_registry::{HostRegistry, ImportTable};

use crate::MAX_POSITIONAL_ARITY;
use crate::scope::{LocalBinding, LocalEnv};

type Result<T> = std::result::Result<T, CompilationError>;

// ============================================================================
// Options
// ============================================================================

/// User-facing compiler settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerOptions {
    /// Report accesses that fall back to run-time member lookup.
    pub warn_on_reflection: bool,
    /// Path of the source being compiled, used in diagnostics.
    pub source_path: Option<String>,
    pub max_positional_arity: usize,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            warn_on_reflection: false,
            source_path: None,
            max_positional_arity: MAX_POSITIONAL_ARITY,
        }
    }
}

impl CompilerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_warn_on_reflection(mut self, warn: bool) -> Self {
        self.warn_on_reflection = warn;
        self
    }

    pub fn with_source_path(mut self, path: impl Into<String>) -> Self {
        self.source_path = Some(path.into());
        self
    }

    pub fn with_max_positional_arity(mut self, arity: usize) -> Self {
        self.max_positional_arity = arity;
        self
    }
}

// ============================================================================
// Method frames
// ============================================================================

/// Per-method compilation state.
#[derive(Debug, Clone, Default)]
pub struct MethodFrame {
    pub locals: LocalEnv,
    /// Target of `recur` inside this method.
    pub loop_label: Option<u32>,
    /// Bindings rebound by `recur`.
    pub loop_locals: Vec<LocalBinding>,
    /// Whether the method may take and return unboxed primitives.
    pub is_static: bool,
}

impl MethodFrame {
    pub fn new(is_static: bool) -> Self {
        Self {
            is_static,
            ..Self::default()
        }
    }
}

// ============================================================================
// CompilationContext
// ============================================================================

pub struct CompilationContext<'reg> {
    registry: &'reg HostRegistry,
    imports: ImportTable,
    options: CompilerOptions,
    diagnostics: Diagnostics,
    /// Extra sink each diagnostic is forwarded to.
    sink: Option<Box<dyn DiagnosticSink + Send>>,
    frames: Vec<MethodFrame>,
    next_label: u32,
    next_fn_id: u32,
}

impl<'reg> CompilationContext<'reg> {
    pub fn new(registry: &'reg HostRegistry) -> Self {
        Self::with_options(registry, CompilerOptions::default())
    }

    pub fn with_options(registry: &'reg HostRegistry, options: CompilerOptions) -> Self {
        Self {
            registry,
            imports: ImportTable::new(),
            options,
            diagnostics: Diagnostics::new(),
            sink: None,
            frames: Vec::new(),
            next_label: 0,
            next_fn_id: 0,
        }
    }

    pub fn registry(&self) -> &'reg HostRegistry {
        self.registry
    }

    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    pub fn imports(&self) -> &ImportTable {
        &self.imports
    }

    pub fn imports_mut(&mut self) -> &mut ImportTable {
        &mut self.imports
    }

    // ==========================================================================
    // Diagnostics
    // ==========================================================================

    /// Forward diagnostics to `sink` in addition to collecting them.
    pub fn set_sink(&mut self, sink: Box<dyn DiagnosticSink + Send>) {
        self.sink = Some(sink);
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Report an access that will be resolved at run time.
    pub fn warn_reflection(&mut self, message: String, span: Span) {
        tracing::debug!(line = span.line, "{}", message);
        if !self.options.warn_on_reflection {
            return;
        }
        let diagnostic = Diagnostic::warning(
            message,
            self.options.source_path.clone(),
            span.line,
            span.col,
        );
        if let Some(sink) = self.sink.as_mut() {
            sink.report(&diagnostic);
        }
        self.diagnostics.add_diagnostic(diagnostic);
    }

    // ==========================================================================
    // Method frames
    // ==========================================================================

    /// Run `f` with `frame` pushed as the current method.
    ///
    /// The frame is popped whether `f` succeeds or fails; the popped frame is
    /// returned alongside a successful result.
    pub fn with_method_frame<T>(
        &mut self,
        frame: MethodFrame,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<(T, MethodFrame)> {
        let depth = self.frames.len();
        self.frames.push(frame);
        let result = f(self);
        self.frames.truncate(depth + 1);
        let frame = self.frames.pop().ok_or_else(|| CompilationError::Internal {
            message: "method frame stack underflow".to_string(),
        })?;
        result.map(|value| (value, frame))
    }

    pub fn frame_depth(&self) -> usize {
        self.frames.len()
    }

    pub fn current_frame(&self) -> Option<&MethodFrame> {
        self.frames.last()
    }

    fn current_frame_mut(&mut self) -> Result<&mut MethodFrame> {
        self.frames.last_mut().ok_or_else(|| CompilationError::Internal {
            message: "no method is being compiled".to_string(),
        })
    }

    /// Declare a binding in the current method.
    pub fn declare_local(
        &mut self,
        name: &str,
        tag: Option<TypeHash>,
        is_arg: bool,
        primitive: Option<PrimitiveKind>,
    ) -> Result<LocalBinding> {
        let frame = self.current_frame_mut()?;
        Ok(frame.locals.declare(name, tag, is_arg, primitive))
    }

    /// A binding visible in the current method.
    pub fn lookup_local(&self, name: &str) -> Option<&LocalBinding> {
        self.current_frame()
            .and_then(|frame| frame.locals.lookup(name))
    }

    /// Set the `recur` target of the current method.
    pub fn enter_loop(&mut self, label: u32, locals: Vec<LocalBinding>) -> Result<()> {
        let frame = self.current_frame_mut()?;
        frame.loop_label = Some(label);
        frame.loop_locals = locals;
        Ok(())
    }

    pub fn allocate_label(&mut self) -> u32 {
        let label = self.next_label;
        self.next_label += 1;
        label
    }

    /// A fresh name for an anonymous function.
    pub fn next_fn_name(&mut self) -> String {
        let id = self.next_fn_id;
        self.next_fn_id += 1;
        format!("fn__{}", id)
    }

    // ==========================================================================
    // Type names
    // ==========================================================================

    /// The host type a symbol denotes, if it denotes one.
    ///
    /// A local binding shadows a type of the same name.
    pub fn maybe_type(&self, symbol: &Symbol) -> Option<TypeHash> {
        if symbol.is_qualified() || self.lookup_local(&symbol.name).is_some() {
            return None;
        }
        self.imports
            .resolve(&symbol.name)
            .or_else(|| self.registry.get_by_name(&symbol.name).map(|e| e.type_hash))
    }

    /// Resolve a type hint (`^long`, `^StringBuilder`, `^System.String`).
    pub fn resolve_tag(&self, tag: &Symbol, span: Span) -> Result<TypeHash> {
        if !tag.is_qualified() {
            if let Some(hash) = self.imports.resolve(&tag.name) {
                return Ok(hash);
            }
            if let Some(hash) = self.registry.resolve_type_name(&tag.name) {
                return Ok(hash);
            }
        }
        Err(CompilationError::UnknownType {
            name: tag.to_string(),
            span,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::{HostTypeEntry, Symbol, primitives};
    use std::sync::{Arc, Mutex};

    struct SharedSink(Arc<Mutex<Vec<String>>>);

    impl DiagnosticSink for SharedSink {
        fn report(&mut self, diagnostic: &Diagnostic) {
            self.0.lock().unwrap().push(diagnostic.to_string());
        }
    }

    #[test]
    fn frame_is_popped_on_error() {
        let registry = HostRegistry::with_primitives();
        let mut ctx = CompilationContext::new(&registry);

        let result: Result<((), MethodFrame)> =
            ctx.with_method_frame(MethodFrame::new(false), |ctx| {
                ctx.declare_local("a", None, true, None)?;
                ctx.with_method_frame(MethodFrame::new(false), |_| -> Result<()> {
                    Err(CompilationError::syntax("boom", Span::default()))
                })?;
                Ok(())
            });

        assert!(result.is_err());
        assert_eq!(ctx.frame_depth(), 0);
        assert!(ctx.lookup_local("a").is_none());
    }

    #[test]
    fn frame_is_returned_on_success() {
        let registry = HostRegistry::with_primitives();
        let mut ctx = CompilationContext::new(&registry);

        let (slot, frame) = ctx
            .with_method_frame(MethodFrame::new(true), |ctx| {
                Ok(ctx.declare_local("x", None, true, Some(PrimitiveKind::Int64))?.slot)
            })
            .unwrap();
        assert_eq!(slot, 0);
        assert!(frame.is_static);
        assert_eq!(frame.locals.len(), 1);
    }

    #[test]
    fn declare_without_frame_is_internal_error() {
        let registry = HostRegistry::with_primitives();
        let mut ctx = CompilationContext::new(&registry);
        assert!(matches!(
            ctx.declare_local("x", None, true, None),
            Err(CompilationError::Internal { .. })
        ));
    }

    #[test]
    fn locals_shadow_imported_types() {
        let mut registry = HostRegistry::with_primitives();
        let entry = HostTypeEntry::class("System.Math");
        let math = registry.register_type(entry.clone()).unwrap();
        let mut ctx = CompilationContext::new(&registry);
        ctx.imports_mut().import(&entry).unwrap();

        assert_eq!(ctx.maybe_type(&Symbol::simple("Math")), Some(math));
        assert_eq!(ctx.maybe_type(&Symbol::simple("System.Math")), Some(math));

        ctx.with_method_frame(MethodFrame::new(false), |ctx| {
            ctx.declare_local("Math", None, true, None)?;
            assert_eq!(ctx.maybe_type(&Symbol::simple("Math")), None);
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn resolve_tags() {
        let registry = HostRegistry::with_primitives();
        let ctx = CompilationContext::new(&registry);
        assert_eq!(
            ctx.resolve_tag(&Symbol::simple("long"), Span::default()),
            Ok(primitives::INT64)
        );
        assert_eq!(
            ctx.resolve_tag(&Symbol::simple("System.String"), Span::default()),
            Ok(primitives::STRING)
        );
        assert!(matches!(
            ctx.resolve_tag(&Symbol::simple("Nope"), Span::default()),
            Err(CompilationError::UnknownType { .. })
        ));
    }

    #[test]
    fn reflection_warnings_respect_option() {
        let registry = HostRegistry::with_primitives();
        let mut ctx = CompilationContext::new(&registry);
        ctx.warn_reflection("call to Foo can't be resolved.".into(), Span::point(3, 1));
        assert!(ctx.diagnostics().is_empty());

        let lines = Arc::new(Mutex::new(Vec::new()));
        let options = CompilerOptions::new()
            .with_warn_on_reflection(true)
            .with_source_path("user.qlj");
        let mut ctx = CompilationContext::with_options(&registry, options);
        ctx.set_sink(Box::new(SharedSink(lines.clone())));
        ctx.warn_reflection("call to Foo can't be resolved.".into(), Span::point(3, 1));

        assert_eq!(ctx.diagnostics().len(), 1);
        assert_eq!(
            lines.lock().unwrap().as_slice(),
            &["user.qlj:3:1: warning: call to Foo can't be resolved.".to_string()]
        );
    }

    #[test]
    fn counters() {
        let registry = HostRegistry::with_primitives();
        let mut ctx = CompilationContext::new(&registry);
        assert_eq!(ctx.allocate_label(), 0);
        assert_eq!(ctx.allocate_label(), 1);
        assert_eq!(ctx.next_fn_name(), "fn__0");
        assert_eq!(ctx.next_fn_name(), "fn__1");
    }
}
