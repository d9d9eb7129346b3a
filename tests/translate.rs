//! Translation tests - typed formulas to evaluable expressions

mod common;

use common::{seq, type_keys};
use formula_editor::editable::EditorState;
use formula_editor::structure::Horizontal;
use formula_editor::translate::{translate, translate_expression, AngleMode, NotTranslatable};

fn typed(symbols: &[&str]) -> EditorState {
    let mut editor = EditorState::new();
    type_keys(&mut editor, symbols);
    editor
}

// ========================================================================
// Typed Formulas
// ========================================================================

#[test]
fn test_cube_root() {
    let editor = typed(&["\\sqrt[3]", "8"]);
    assert_eq!(translate_expression(&editor.tokens).unwrap(), "nthRoot(8,3)");
}

#[test]
fn test_fraction_with_sum_in_denominator() {
    let editor = typed(&["1", "/", "2", "+", "3"]);
    assert_eq!(translate_expression(&editor.tokens).unwrap(), "(1)/(2+3)");
}

#[test]
fn test_log_with_base() {
    let mut editor = typed(&["\\log", "2"]);
    editor.move_horizontal(Horizontal::Right);
    type_keys(&mut editor, &["8"]);

    assert_eq!(
        formula_editor::render::source_markup(&editor.tokens),
        "\\log_{2}(8)"
    );
    assert_eq!(translate_expression(&editor.tokens).unwrap(), "log(8,2)");
}

#[test]
fn test_exponential_key() {
    let editor = typed(&["e^", "2"]);
    assert_eq!(translate_expression(&editor.tokens).unwrap(), "e^(2)");
}

#[test]
fn test_half_typed_formula_still_translates() {
    // \frac { 1 } { } while the denominator is being typed
    let editor = typed(&["1", "/"]);
    assert_eq!(translate_expression(&editor.tokens).unwrap(), "(1)/()");
}

// ========================================================================
// Declined Formulas
// ========================================================================

#[test]
fn test_integral_is_not_translatable() {
    let editor = typed(&["\\int", "0"]);
    assert_eq!(
        translate_expression(&editor.tokens),
        Err(NotTranslatable::Denylisted("\\int".to_string()))
    );
}

#[test]
fn test_differential_is_not_translatable() {
    let editor = typed(&["x", "dx"]);
    assert!(matches!(
        translate_expression(&editor.tokens),
        Err(NotTranslatable::Denylisted(_))
    ));
}

#[test]
fn test_empty_formula() {
    assert_eq!(translate_expression(&[]), Err(NotTranslatable::Empty));
    let error = translate(&[], AngleMode::Radian).unwrap_err();
    assert_eq!(error.to_string(), "Nothing to evaluate");
}

// ========================================================================
// Scope
// ========================================================================

#[test]
fn test_degree_scope() {
    let translation = translate(&seq("\\sin ( 9 0 )"), AngleMode::Degree).unwrap();
    assert_eq!(translation.expression, "sin(90)");

    let sin = translation.scope.call("sin", &[90.0]).unwrap();
    assert!((sin - 1.0).abs() < 1e-12);
    let asin = translation.scope.call("asin", &[1.0]).unwrap();
    assert!((asin - 90.0).abs() < 1e-9);
}

#[test]
fn test_radian_scope() {
    let translation = translate(&seq("\\cos ( \\pi )"), AngleMode::Radian).unwrap();
    assert_eq!(translation.expression, "cos(pi)");

    let pi = translation.scope.constant("pi").unwrap();
    let cos = translation.scope.call("cos", &[pi]).unwrap();
    assert!((cos + 1.0).abs() < 1e-12);
}

#[test]
fn test_scope_functions_reject_bad_arity_and_domain() {
    let translation = translate(&seq("1"), AngleMode::Radian).unwrap();
    let scope = translation.scope;

    assert_eq!(scope.call("nthRoot", &[8.0, 3.0]).map(|v| v.round()), Some(2.0));
    assert_eq!(scope.call("sin", &[1.0, 2.0]), None);
    assert_eq!(scope.call("log", &[-1.0]), None);
    assert_eq!(scope.call("pi", &[]), None);
}
