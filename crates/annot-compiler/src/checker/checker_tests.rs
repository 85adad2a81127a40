use annot_core::TypeAnnotation;
use indoc::indoc;
use rowan::TextRange;

use crate::test_utils::{errors, expect_compiled, expect_failed, warnings, warnings_with};
use crate::{Config, DiagnosticKind, Error, compile};

#[test]
fn local_initializer_mismatch() {
    let source = indoc! {r#"
        fn f() {
          var x: Num = "hello"
        }
    "#};

    assert_eq!(
        warnings(source),
        vec!["type mismatch: `x` is declared as `Num` but initialized with `String`"]
    );
}

#[test]
fn matching_initializer_is_silent() {
    let source = indoc! {r#"
        var a: Num = 1
        var b: String = "b"
        var c: Bool = false
        var d: Null = null
    "#};

    assert!(warnings(source).is_empty());
}

#[test]
fn unannotated_declarations_never_warn() {
    let source = indoc! {r#"
        var a = 1
        a = "now a string"
        fn f() {
          var b = true
          b = 2
          return b
        }
    "#};

    assert!(warnings(source).is_empty());
}

#[test]
fn annotation_without_initializer() {
    let compiled = expect_compiled("var x: Num");

    assert!(compiled.diagnostics().is_empty());
    let x = compiled.summary().variable("x").unwrap();
    assert_eq!(x.declared_type, Some(TypeAnnotation::new("Num")));
}

#[test]
fn types_are_nominal() {
    assert_eq!(
        warnings("var x: Int = 1"),
        vec!["type mismatch: `x` is declared as `Int` but initialized with `Num`"]
    );
}

#[test]
fn warning_points_at_value_and_annotation() {
    let source = r#"var x: Num = "hi""#;
    let compiled = expect_compiled(source);

    let warning = compiled.diagnostics().iter().next().unwrap();
    assert_eq!(warning.kind(), DiagnosticKind::VariableTypeMismatch);
    assert_eq!(warning.range(), TextRange::new(13.into(), 17.into()));
    insta::assert_snapshot!(warning.to_string(), @"warning at 13..17: type mismatch: `x` is declared as `Num` but initialized with `String` (related: declared as `Num` here at 7..10)");

    let rendered = compiled.diagnostics().render(source);
    assert!(rendered.contains("warning: type mismatch"));
    assert!(rendered.contains("declared as `Num` here"));
}

#[test]
fn local_assignment_mismatch() {
    let source = indoc! {r#"
        fn f() {
          var x: Num = 1
          x = "s"
        }
    "#};

    assert_eq!(
        warnings(source),
        vec!["type mismatch: `x` is declared as `Num` but assigned `String`"]
    );
}

#[test]
fn module_variable_assigned_in_function() {
    let source = indoc! {r#"
        var count: Num = 0
        fn bump() {
          count = true
        }
    "#};

    assert_eq!(
        warnings(source),
        vec!["type mismatch: `count` is declared as `Num` but assigned `Bool`"]
    );
}

#[test]
fn variable_read_carries_declared_type() {
    let source = indoc! {r#"
        var name: String = "a"
        var n: Num = name
    "#};

    assert_eq!(
        warnings(source),
        vec!["type mismatch: `n` is declared as `Num` but initialized with `String`"]
    );
}

#[test]
fn parameter_annotations() {
    let source = indoc! {r#"
        fn f(a: Num) {
          a = "s"
        }
    "#};

    assert_eq!(
        warnings(source),
        vec!["type mismatch: `a` is declared as `Num` but assigned `String`"]
    );
}

#[test]
fn return_mismatch() {
    let source = indoc! {r#"
        fn f(a: Num): String {
          return a
        }
    "#};

    assert_eq!(
        warnings(source),
        vec!["return type mismatch: `f` is declared to return `String` but returns `Num`"]
    );
}

#[test]
fn bare_return_is_silent() {
    let source = indoc! {r#"
        fn f(): Num {
          return
        }
        fn g(): Num { return }
    "#};

    assert!(warnings(source).is_empty());
}

#[test]
fn unannotated_return_is_silent() {
    assert!(warnings("fn f() { return 1 }").is_empty());
}

#[test]
fn nested_function_names_are_qualified() {
    let source = indoc! {r#"
        fn outer() {
          fn inner(): Num {
            return true
          }
        }
    "#};

    assert_eq!(
        warnings(source),
        vec!["return type mismatch: `outer.inner` is declared to return `Num` but returns `Bool`"]
    );
}

#[test]
fn upvalues_are_unknown() {
    let source = indoc! {r#"
        fn outer() {
          var x: Num = 1
          fn inner() {
            var y: String = x
            x = "s"
          }
        }
    "#};

    assert!(warnings(source).is_empty());
}

#[test]
fn reused_slot_forgets_previous_annotation() {
    let source = indoc! {r#"
        fn f() {
          {
            var a: Num = 1
          }
          {
            var b = 1
            b = "s"
          }
        }
    "#};

    assert!(warnings(source).is_empty());
}

#[test]
fn shadowing_uses_innermost_declaration() {
    let source = indoc! {r#"
        fn f() {
          var a: Num = 1
          {
            var a: String = "s"
            a = "t"
          }
          a = 2
        }
    "#};

    assert!(warnings(source).is_empty());
}

#[test]
fn module_body_block_locals() {
    let source = indoc! {r#"
        {
          var a: Num = "s"
        }
    "#};
    let compiled = expect_compiled(source);

    assert_eq!(compiled.diagnostics().warning_count(), 1);
    let body = compiled.summary().function("<module>").unwrap();
    assert_eq!(body.locals.len(), 1);
    assert_eq!(body.locals[0].slot, 0);
    assert_eq!(body.locals[0].declared_type, Some(TypeAnnotation::new("Num")));
}

const TOGGLES: &str = indoc! {r#"
    var m: Num = "a"
    fn f(): Num {
      var l: Num = "b"
      return "c"
    }
"#};

#[test]
fn all_checks_on_by_default() {
    assert_eq!(
        warnings(TOGGLES),
        vec![
            "type mismatch: `m` is declared as `Num` but initialized with `String`",
            "type mismatch: `l` is declared as `Num` but initialized with `String`",
            "return type mismatch: `f` is declared to return `Num` but returns `String`",
        ]
    );
}

#[test]
fn local_checks_can_be_disabled() {
    let config = Config::new().check_locals(false);
    let found = warnings_with(TOGGLES, &config);

    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|w| !w.contains("`l`")));
}

#[test]
fn module_checks_can_be_disabled() {
    let config = Config::new().check_module_variables(false);
    let found = warnings_with(TOGGLES, &config);

    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|w| !w.contains("`m`")));
}

#[test]
fn return_checks_can_be_disabled() {
    let config = Config::new().check_returns(false);
    let found = warnings_with(TOGGLES, &config);

    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|w| !w.starts_with("return")));
}

#[test]
fn disabled_checks_still_record_types() {
    let config = Config::new()
        .check_locals(false)
        .check_module_variables(false)
        .check_returns(false);
    let compiled = compile(TOGGLES, &config).unwrap();

    assert!(compiled.diagnostics().is_empty());
    let m = compiled.summary().variable("m").unwrap();
    assert_eq!(m.declared_type, Some(TypeAnnotation::new("Num")));
    let f = compiled.summary().function("f").unwrap();
    assert_eq!(f.return_type, Some(TypeAnnotation::new("Num")));
}

#[test]
fn forward_references_resolve() {
    let source = indoc! {r#"
        fn f() {
          return g()
        }
        fn g() {}
    "#};

    assert!(expect_compiled(source).diagnostics().is_empty());
}

#[test]
fn prelude_is_defined() {
    let compiled = expect_compiled(r#"print("hi")"#);

    assert!(compiled.diagnostics().is_empty());
    assert!(compiled.summary().variables.is_empty());
}

#[test]
fn undefined_variable() {
    assert_eq!(errors("var x = y"), vec!["`y` is used but not defined"]);
}

#[test]
fn undefined_variable_hides_behind_syntax_errors() {
    assert_eq!(
        errors("var x = y +"),
        vec!["expected an expression: found end of input"]
    );
}

#[test]
fn duplicate_local() {
    let source = indoc! {r#"
        fn f() {
          var a = 1
          var a = 2
        }
    "#};

    assert_eq!(errors(source), vec!["`a` is already declared in this scope"]);
}

#[test]
fn duplicate_module_variable() {
    assert_eq!(
        errors("var a = 1\nvar a = 2"),
        vec!["`a` is already declared in this scope"]
    );
    assert_eq!(
        errors("var print = 1"),
        vec!["`print` is already declared in this scope"]
    );
}

fn many_locals(count: usize) -> String {
    let mut source = String::from("fn f() {\n");
    for i in 0..count {
        source.push_str(&format!("  var v{i} = 0\n"));
    }
    source.push('}');
    source
}

#[test]
fn locals_up_to_limit() {
    let source = many_locals(annot_core::MAX_LOCALS);
    let compiled = expect_compiled(&source);

    let f = compiled.summary().function("f").unwrap();
    assert_eq!(f.locals.len(), annot_core::MAX_LOCALS);
}

#[test]
fn too_many_locals() {
    let source = many_locals(annot_core::MAX_LOCALS + 1);

    assert_eq!(
        errors(&source),
        vec!["too many local variables in one function: at most 256 are allowed"]
    );
}

#[test]
fn module_type_table_overflow_drops_annotations() {
    let mut source = String::new();
    for i in 0..=annot_core::MAX_MODULE_TYPES {
        source.push_str(&format!("var v{i}: Num = 0\n"));
    }
    source.push_str("v0 = \"s\"\n");
    source.push_str("v512 = \"s\"\n");

    let compiled = expect_compiled(&source);
    let found: Vec<_> = compiled
        .diagnostics()
        .iter()
        .map(|d| d.message().to_string())
        .collect();
    assert_eq!(
        found,
        vec!["type mismatch: `v0` is declared as `Num` but assigned `String`"]
    );

    let summary = compiled.summary();
    assert_eq!(
        summary.variable("v511").unwrap().declared_type,
        Some(TypeAnnotation::new("Num"))
    );
    assert_eq!(summary.variable("v512").unwrap().declared_type, None);
}

#[test]
fn syntax_errors() {
    assert_eq!(errors("var = 1"), vec!["expected an identifier: found `=`"]);
    assert_eq!(errors("var x: = 1"), vec!["expected type name: found `=`"]);
    assert_eq!(
        errors("fn f() {"),
        vec!["missing closing `}`; block starts here"]
    );
    assert_eq!(errors("print(1"), vec!["missing closing `)`; opened here"]);
    assert_eq!(errors(")"), vec!["expected an expression: found `)`"]);
    assert_eq!(errors("}"), vec!["unexpected token: unmatched `}`"]);
    assert_eq!(
        errors("fn (a) {}"),
        vec!["expected an identifier: found `(`"]
    );
}

#[test]
fn garbage_input() {
    assert_eq!(
        errors("var x = @"),
        vec!["unexpected token: found unrecognized input"]
    );
}

#[test]
fn recovery_keeps_checking() {
    let source = indoc! {r#"
        var = 1
        var x: Num = "s"
    "#};
    let diagnostics = expect_failed(source);

    assert_eq!(diagnostics.error_count(), 1);
    assert_eq!(diagnostics.warning_count(), 1);
}

#[test]
fn unclosed_paren_keeps_mismatch_warning() {
    let diagnostics = expect_failed("var x: Num = (\"s\"\n");

    assert_eq!(diagnostics.error_count(), 1);
    assert_eq!(diagnostics.warning_count(), 1);
}

#[test]
fn recursion_limit() {
    let source = "var x = ((1))";

    assert!(compile(source, &Config::new().recursion_limit(3)).is_ok());
    assert!(matches!(
        compile(source, &Config::new().recursion_limit(2)),
        Err(Error::RecursionLimitExceeded)
    ));
}

#[test]
fn deep_nesting_fails_cleanly() {
    let source = format!("var x = {}1{}", "(".repeat(300), ")".repeat(300));

    assert!(matches!(
        compile(&source, &Config::default()),
        Err(Error::RecursionLimitExceeded)
    ));
}

#[test]
fn compile_failed_error_message() {
    let err = compile("var = 1", &Config::default()).unwrap_err();
    assert_eq!(err.to_string(), "compilation failed with 1 errors");
}

#[test]
fn summary_contents() {
    let source = indoc! {r#"
        var count: Num = 0
        var name = "x"
        fn greet(who: String, times): String {
          var line: String = who
          return line
        }
    "#};
    let compiled = expect_compiled(source);
    let summary = compiled.summary();

    assert!(compiled.diagnostics().is_empty());

    let names: Vec<_> = summary.variables.iter().map(|v| (v.name, v.symbol)).collect();
    assert_eq!(names, vec![("count", 1), ("name", 2), ("greet", 3)]);
    assert_eq!(summary.variables[1].declared_type, None);

    let functions: Vec<_> = summary.functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(functions, vec!["greet", "<module>"]);

    let greet = summary.function("greet").unwrap();
    assert_eq!(greet.return_type, Some(TypeAnnotation::new("String")));
    assert_eq!(greet.parameters.len(), 2);
    assert_eq!(greet.parameters[0].name, "who");
    assert_eq!(greet.parameters[0].declared_type, Some(TypeAnnotation::new("String")));
    assert_eq!(greet.parameters[1].slot, 1);
    assert_eq!(greet.parameters[1].declared_type, None);
    assert_eq!(greet.locals.len(), 1);
    assert_eq!(greet.locals[0].slot, 2);
}

#[test]
fn nested_summary_order() {
    let source = indoc! {r#"
        fn outer() {
          fn inner(): Bool {
            return true
          }
        }
    "#};
    let compiled = expect_compiled(source);

    let functions: Vec<_> = compiled
        .summary()
        .functions
        .iter()
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(functions, vec!["outer.inner", "outer", "<module>"]);

    let outer = compiled.summary().function("outer").unwrap();
    assert_eq!(outer.locals[0].name, "inner");
    assert_eq!(outer.locals[0].declared_type, None);
}

#[test]
fn summary_serializes_to_json() {
    let source = indoc! {r#"
        var count: Num = 0
        fn f(a): Bool { return true }
    "#};
    let compiled = expect_compiled(source);
    let json = serde_json::to_value(compiled.summary()).unwrap();

    assert_eq!(
        json["variables"][0],
        serde_json::json!({ "name": "count", "symbol": 1, "declared_type": "Num" })
    );
    assert_eq!(json["variables"][1]["declared_type"], serde_json::Value::Null);
    assert_eq!(json["functions"][0]["name"], "f");
    assert_eq!(json["functions"][0]["return_type"], "Bool");
    assert_eq!(
        json["functions"][0]["parameters"][0],
        serde_json::json!({ "name": "a", "slot": 0, "declared_type": null })
    );
}
