use crate::{FunctionTypeScope, MAX_LOCALS, TypeAnnotation, types_match};

#[test]
fn fresh_scope_is_empty() {
    let scope = FunctionTypeScope::new();

    assert_eq!(scope.local_type(0), None);
    assert_eq!(scope.local_type(MAX_LOCALS - 1), None);
    assert_eq!(scope.return_type(), None);
    assert_eq!(scope.expression_type(), None);
    assert_eq!(scope.annotated_locals().count(), 0);
}

#[test]
fn local_type_roundtrip_every_slot() {
    let names: Vec<String> = (0..MAX_LOCALS).map(|i| format!("T{i}")).collect();
    let mut scope = FunctionTypeScope::new();

    for (slot, name) in names.iter().enumerate() {
        scope.set_local_type(slot, TypeAnnotation::new(name));
    }

    for (slot, name) in names.iter().enumerate() {
        let ty = scope.local_type(slot).unwrap();
        assert_eq!(ty.as_str(), name);
        assert_eq!(ty.len(), name.len());
    }
}

#[test]
fn out_of_range_slots_are_ignored() {
    let mut scope = FunctionTypeScope::new();
    scope.set_local_type(MAX_LOCALS, TypeAnnotation::new("Num"));
    scope.set_local_type(usize::MAX, TypeAnnotation::new("Num"));

    assert_eq!(scope.local_type(MAX_LOCALS), None);
    assert_eq!(scope.local_type(usize::MAX), None);
    assert_eq!(scope.annotated_locals().count(), 0);
    assert_eq!(scope, FunctionTypeScope::new());
}

#[test]
fn set_local_type_overwrites() {
    let mut scope = FunctionTypeScope::new();
    scope.set_local_type(1, TypeAnnotation::new("Num"));
    scope.set_local_type(1, TypeAnnotation::new("String"));

    assert_eq!(scope.local_type(1), Some(TypeAnnotation::new("String")));
}

#[test]
fn return_type_later_call_wins() {
    let mut scope = FunctionTypeScope::new();
    scope.set_return_type(TypeAnnotation::new("Num"));
    scope.set_return_type(TypeAnnotation::new("Bool"));

    assert_eq!(scope.return_type(), Some(TypeAnnotation::new("Bool")));
}

#[test]
fn expression_type_set_and_clear() {
    let mut scope = FunctionTypeScope::new();
    scope.set_expression_type(TypeAnnotation::new("String"));
    assert_eq!(scope.expression_type(), Some(TypeAnnotation::new("String")));

    scope.clear_expression_type();
    assert_eq!(scope.expression_type(), None);
}

#[test]
fn reset_matches_fresh_scope() {
    let mut scope = FunctionTypeScope::new();
    scope.set_local_type(0, TypeAnnotation::new("Num"));
    scope.set_local_type(7, TypeAnnotation::new("Bool"));
    scope.set_return_type(TypeAnnotation::new("Null"));
    scope.set_expression_type(TypeAnnotation::new("String"));

    scope.reset();
    assert_eq!(scope, FunctionTypeScope::new());

    scope.reset();
    assert_eq!(scope, FunctionTypeScope::default());
}

#[test]
fn annotated_locals_in_slot_order() {
    let mut scope = FunctionTypeScope::new();
    scope.set_local_type(5, TypeAnnotation::new("B"));
    scope.set_local_type(2, TypeAnnotation::new("A"));

    let locals: Vec<_> = scope
        .annotated_locals()
        .map(|(slot, ty)| (slot, ty.as_str()))
        .collect();
    assert_eq!(locals, vec![(2, "A"), (5, "B")]);
}

#[test]
fn declaration_checks_against_last_expression() {
    let mut scope = FunctionTypeScope::new();

    // var s: String = "hi"
    scope.set_local_type(2, TypeAnnotation::new("String"));
    scope.set_expression_type(TypeAnnotation::new("String"));
    assert!(types_match(scope.local_type(2), scope.expression_type()));

    // var i: Int = "hi"
    scope.set_local_type(3, TypeAnnotation::new("Int"));
    scope.set_expression_type(TypeAnnotation::new("String"));
    assert!(!types_match(scope.local_type(3), scope.expression_type()));

    // var b: Bool = f(x)
    scope.set_local_type(4, TypeAnnotation::new("Bool"));
    scope.clear_expression_type();
    assert!(types_match(scope.local_type(4), scope.expression_type()));
}

#[test]
fn clear_local_type_forgets_one_slot() {
    let mut scope = FunctionTypeScope::new();
    scope.set_local_type(0, TypeAnnotation::new("Num"));
    scope.set_local_type(1, TypeAnnotation::new("Bool"));

    scope.clear_local_type(0);
    scope.clear_local_type(MAX_LOCALS);

    assert_eq!(scope.local_type(0), None);
    assert_eq!(scope.local_type(1), Some(TypeAnnotation::new("Bool")));
}
