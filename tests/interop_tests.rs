//! Integration tests for host interop through the `quill` facade.
//!
//! A small host catalog is registered up front; forms are compiled with the
//! core [`Analyzer`] and lowered to operations.

use quill::prelude::*;
use quill::core::primitives::{DOUBLE, INT32, INT64, OBJECT, STRING, VOID};
use std::sync::{Arc, Mutex};

/// Host catalog shared by the tests.
fn host_registry() -> HostRegistry {
    let mut registry = HostRegistry::with_primitives();
    let enumerable = registry
        .register_type(
            HostTypeEntry::interface("System.Collections.IEnumerable")
                .with_method("GetEnumerator", vec![], OBJECT, false),
        )
        .unwrap();
    registry
        .register_type(
            HostTypeEntry::interface("System.Collections.IList")
                .implementing(enumerable)
                .with_property("Count", INT32, false)
                .with_method("Add", vec![OBJECT], INT32, false),
        )
        .unwrap();
    registry
        .register_type(
            HostTypeEntry::class("System.Console")
                .with_base(OBJECT)
                .with_method("WriteLine", vec![STRING], VOID, true)
                .with_method("WriteLine", vec![OBJECT], VOID, true)
                .with_method("WriteLine", vec![INT64], VOID, true),
        )
        .unwrap();
    registry
        .register_type(
            HostTypeEntry::class("System.Math")
                .with_base(OBJECT)
                .with_field("PI", DOUBLE, true)
                .with_method("Max", vec![INT32, INT32], INT32, true)
                .with_method("Max", vec![OBJECT, OBJECT], OBJECT, true)
                .with_method("Max", vec![DOUBLE, DOUBLE], DOUBLE, true)
                .with_method("Abs", vec![INT32], INT32, true)
                .with_method("Abs", vec![INT64], INT64, true)
                .with_method("Abs", vec![DOUBLE], DOUBLE, true),
        )
        .unwrap();
    registry
}

fn dot(items: Vec<Form>) -> Form {
    let mut all = vec![Form::symbol(".")];
    all.extend(items);
    Form::list(all)
}

fn call(name: &str, args: Vec<Form>) -> Form {
    let mut items = vec![Form::symbol(name)];
    items.extend(args);
    Form::list(items)
}

fn import(name: &str) -> Form {
    Form::list(vec![Form::symbol("import"), Form::symbol(name)])
}

struct SharedSink(Arc<Mutex<Vec<u8>>>);

impl DiagnosticSink for SharedSink {
    fn report(&mut self, diagnostic: &Diagnostic) {
        let mut out = self.0.lock().unwrap();
        out.extend_from_slice(diagnostic.to_string().as_bytes());
        out.push(b'\n');
    }
}

// =============================================================================
// Static access
// =============================================================================

#[test]
fn test_import_then_static_field() {
    let registry = host_registry();
    let mut ctx = CompilationContext::new(&registry);
    let mut analyzer = Analyzer::new();

    let body = Form::list(vec![
        Form::symbol("do"),
        import("System.Math"),
        dot(vec![Form::symbol("Math"), Form::symbol("PI")]),
    ]);
    let expr = analyzer.compile(&mut ctx, &body, Position::Return).unwrap();
    assert_eq!(expr.static_type(), Some(DOUBLE));

    let mut gen_ctx = GenContext::new();
    let Op::Block(ops) = expr.generate(Position::Return, &mut gen_ctx) else {
        panic!("expected a block");
    };
    assert!(matches!(ops[0], Op::Discard(ref op) if matches!(**op, Op::ImportClass { .. })));
    assert!(matches!(
        ops[1],
        Op::BoxPrimitive { kind: PrimitiveKind::Double, ref value }
            if matches!(**value, Op::GetStaticField { ref name, .. } if name == "PI")
    ));
}

#[test]
fn test_exact_overload_wins() {
    let registry = host_registry();
    let mut ctx = CompilationContext::new(&registry);

    // (. System.Math (Max ^int x ^int y)) with typed locals
    let form = dot(vec![
        Form::symbol("System.Math"),
        call(
            "Max",
            vec![Form::symbol("x").with_tag("int"), Form::symbol("y").with_tag("int")],
        ),
    ]);
    let (expr, _) = ctx
        .with_method_frame(MethodFrame::new(false), |ctx| {
            ctx.declare_local("x", None, true, None)?;
            ctx.declare_local("y", None, true, None)?;
            resolve_access(ctx, &mut Analyzer, &form)
        })
        .unwrap();

    let MemberAccess::StaticMethod { method, .. } = &expr.access else {
        panic!("expected a static method");
    };
    assert_eq!(method.params, vec![INT32, INT32]);
}

#[test]
fn test_untyped_arguments_select_object_overload() {
    let registry = host_registry();
    let mut ctx = CompilationContext::new(&registry);
    let form = dot(vec![
        Form::symbol("System.Math"),
        call("Max", vec![Form::nil(), Form::nil()]),
    ]);
    let expr = resolve_access(&mut ctx, &mut Analyzer, &form).unwrap();
    let MemberAccess::StaticMethod { method, .. } = &expr.access else {
        panic!("expected a static method");
    };
    assert_eq!(method.params, vec![OBJECT, OBJECT]);
}

#[test]
fn test_untyped_argument_to_numeric_overloads_is_rejected() {
    let registry = host_registry();
    let mut ctx = CompilationContext::new(&registry);
    let form = dot(vec![
        Form::symbol("System.Math"),
        call("Abs", vec![Form::symbol("x")]),
    ]);
    let err = ctx
        .with_method_frame(MethodFrame::new(false), |ctx| {
            ctx.declare_local("x", None, true, None)?;
            resolve_access(ctx, &mut Analyzer, &form)
        })
        .unwrap_err();
    assert!(matches!(err, CompilationError::NoMatchingMethod { ref name, .. } if name == "Abs"));
}

#[test]
fn test_static_member_must_exist() {
    let registry = host_registry();
    let mut ctx = CompilationContext::new(&registry);
    let form = dot(vec![Form::symbol("System.Math"), Form::symbol("E")]);
    let err = resolve_access(&mut ctx, &mut Analyzer, &form).unwrap_err();
    assert_eq!(
        err.to_string(),
        "at 0:0: no member 'E' found on type 'System.Math'"
    );
}

#[test]
fn test_void_static_call_in_statement_position() {
    let registry = host_registry();
    let mut ctx = CompilationContext::new(&registry);
    let body = Form::list(vec![
        Form::symbol("do"),
        dot(vec![Form::symbol("System.Console"), call("WriteLine", vec![Form::long(42)])]),
        Form::long(0),
    ]);
    let expr = Analyzer.compile(&mut ctx, &body, Position::Return).unwrap();

    let mut gen_ctx = GenContext::new();
    let Op::Block(ops) = expr.generate(Position::Return, &mut gen_ctx) else {
        panic!("expected a block");
    };
    let Op::CallStatic { name, args, .. } = &ops[0] else {
        panic!("void call is emitted bare in statement position");
    };
    assert_eq!(name, "WriteLine");
    // Exact long overload takes the literal unboxed.
    assert_eq!(args, &vec![Op::Const(Literal::Long(42))]);
}

// =============================================================================
// Instance access
// =============================================================================

#[test]
fn test_interface_members_include_inherited_interfaces() {
    let registry = host_registry();
    let mut ctx = CompilationContext::new(&registry);
    let form = dot(vec![
        Form::symbol("xs").with_tag("System.Collections.IList"),
        Form::symbol("GetEnumerator"),
    ]);
    let (expr, _) = ctx
        .with_method_frame(MethodFrame::new(false), |ctx| {
            ctx.declare_local("xs", None, true, None)?;
            resolve_access(ctx, &mut Analyzer, &form)
        })
        .unwrap();
    assert!(matches!(
        expr.access,
        MemberAccess::InstanceMethod { ref method, .. } if method.name == "GetEnumerator"
    ));
}

#[test]
fn test_reflection_warnings_reach_sink() {
    let registry = host_registry();
    let options = CompilerOptions::new()
        .with_warn_on_reflection(true)
        .with_source_path("src/user.qlj");
    let mut ctx = CompilationContext::with_options(&registry, options);
    let out = Arc::new(Mutex::new(Vec::new()));
    ctx.set_sink(Box::new(SharedSink(out.clone())));

    let form = dot(vec![Form::symbol("o"), call("Frobnicate", vec![Form::long(1)])])
        .at(Span::point(12, 5));
    let (expr, _) = ctx
        .with_method_frame(MethodFrame::new(false), |ctx| {
            ctx.declare_local("o", None, true, None)?;
            resolve_access(ctx, &mut Analyzer, &form)
        })
        .unwrap();
    assert!(expr.access.is_dynamic());

    let text = String::from_utf8(out.lock().unwrap().clone()).unwrap();
    assert_eq!(
        text,
        "src/user.qlj:12:5: warning: call to method Frobnicate can't be resolved (target class is unknown).\n"
    );
    assert_eq!(ctx.diagnostics().len(), 1);
}

#[test]
fn test_reflection_warnings_off_by_default() {
    let registry = host_registry();
    let mut ctx = CompilationContext::new(&registry);
    let form = dot(vec![Form::symbol("o"), Form::symbol("Count")]);
    ctx.with_method_frame(MethodFrame::new(false), |ctx| {
        ctx.declare_local("o", None, true, None)?;
        resolve_access(ctx, &mut Analyzer, &form)
    })
    .unwrap();
    assert!(ctx.diagnostics().is_empty());
}

#[test]
fn test_overload_resolution_against_fixtures() {
    let registry = host_registry();
    let owner = TypeHash::from_name("Fixture");
    let int_int = CandidateSignature::new(owner, "f", vec![INT32, INT32], OBJECT, true);
    let obj_obj = CandidateSignature::new(owner, "f", vec![OBJECT, OBJECT], OBJECT, true);
    let int_obj = CandidateSignature::new(owner, "f", vec![INT32, OBJECT], OBJECT, true);
    let obj_int = CandidateSignature::new(owner, "f", vec![OBJECT, INT32], OBJECT, true);

    assert_eq!(
        resolve_overload(&registry, &[&obj_obj, &int_int], &[Some(INT32), Some(INT32)]),
        OverloadResolution::Resolved(1)
    );
    assert_eq!(
        resolve_overload(&registry, &[&int_obj, &obj_int], &[Some(INT32), Some(INT32)]),
        OverloadResolution::Ambiguous
    );
    assert_eq!(
        resolve_overload(&registry, &[&int_obj, &obj_int], &[None, None]),
        OverloadResolution::NoMatch
    );
}
