//! Editing tests - templates, division, reciprocal and structural backspace

mod common;

use common::{editor_with, key, text, type_keys};
use formula_editor::editable::{is_valid_position, EditorState, Selection};
use formula_editor::model::scan::is_balanced;
use formula_editor::structure::{Horizontal, Vertical};

// ========================================================================
// Insertion
// ========================================================================

#[test]
fn test_fraction_template_into_empty() {
    let mut editor = EditorState::new();
    type_keys(&mut editor, &["\\frac"]);

    assert_eq!(text(&editor), "\\frac { } { }");
    assert_eq!(editor.cursor, 2, "cursor right after the numerator's brace");
}

#[test]
fn test_typing_a_fraction_by_division() {
    let mut editor = EditorState::new();
    type_keys(&mut editor, &["1", "2", "/", "5"]);

    assert_eq!(text(&editor), "\\frac { 1 2 } { 5 }");
    assert_eq!(editor.cursor, 7);
}

#[test]
fn test_division_takes_whole_function_call() {
    let mut editor = EditorState::new();
    type_keys(&mut editor, &["2", "+", "\\sin", "x"]);
    editor.move_horizontal(Horizontal::Right);
    assert_eq!(text(&editor), "2 + \\sin ( x )");
    assert_eq!(editor.cursor, 6);

    type_keys(&mut editor, &["/"]);
    assert_eq!(text(&editor), "2 + \\frac { \\sin ( x ) } { }");
    assert_eq!(editor.cursor, 10);
}

#[test]
fn test_division_after_operator_starts_empty_fraction() {
    let mut editor = EditorState::new();
    type_keys(&mut editor, &["1", "+", "/"]);

    assert_eq!(text(&editor), "1 + \\frac { } { }");
    assert_eq!(editor.cursor, 4, "cursor in the empty numerator");
}

#[test]
fn test_flat_brackets_pair_and_step_over() {
    let mut editor = EditorState::new();
    type_keys(&mut editor, &["(", "2", ")", "+"]);

    assert_eq!(text(&editor), "( 2 ) +");
    assert_eq!(editor.cursor, 4);
}

#[test]
fn test_variant_key_inserts_its_own_template() {
    let mut editor = EditorState::new();
    type_keys(&mut editor, &["\\sqrt[3]", "8"]);

    assert_eq!(text(&editor), "\\sqrt [ 3 ] { 8 }");
    assert_eq!(editor.cursor, 6);
}

#[test]
fn test_division_after_power_takes_base_and_exponent() {
    let mut editor = EditorState::new();
    type_keys(&mut editor, &["1", "+", "x", "^", "2"]);
    editor.move_horizontal(Horizontal::Right);
    assert_eq!(editor.cursor, 7);

    type_keys(&mut editor, &["/"]);
    assert_eq!(text(&editor), "1 + \\frac { x ^ { 2 } } { }");
    assert_eq!(editor.cursor, 11, "cursor in the empty denominator");
}

// ========================================================================
// Reciprocal
// ========================================================================

#[test]
fn test_reciprocal_flips_unit_fraction() {
    let mut editor = EditorState::new();
    type_keys(&mut editor, &["1", "/", "9"]);
    assert_eq!(text(&editor), "\\frac { 1 } { 9 }");

    type_keys(&mut editor, &["reciprocal"]);
    assert_eq!(text(&editor), "9");
    assert_eq!(editor.cursor, 1);
}

#[test]
fn test_reciprocal_swaps_fraction() {
    let mut editor = editor_with("\\frac { 3 } { 9 }", 7);
    type_keys(&mut editor, &["reciprocal"]);

    assert_eq!(text(&editor), "\\frac { 9 } { 3 }");
    assert_eq!(editor.cursor, 7);
}

#[test]
fn test_reciprocal_twice_restores_fraction() {
    let mut editor = editor_with("\\frac { a + 1 } { b }", 9);
    type_keys(&mut editor, &["reciprocal", "reciprocal"]);

    assert_eq!(text(&editor), "\\frac { a + 1 } { b }");
}

#[test]
fn test_reciprocal_wraps_variable() {
    let mut editor = editor_with("2 x", 2);
    type_keys(&mut editor, &["reciprocal"]);

    assert_eq!(text(&editor), "2 \\frac { 1 } { x }");
    assert_eq!(editor.cursor, 8);
}

#[test]
fn test_reciprocal_from_exponent_swaps_enclosing_fraction() {
    let mut editor = editor_with("\\frac { x ^ { 2 } } { 3 }", 6);
    type_keys(&mut editor, &["reciprocal"]);

    assert_eq!(text(&editor), "\\frac { 3 } { x ^ { 2 } }");
    assert_eq!(editor.cursor, 11);
}

// ========================================================================
// Structural Backspace
// ========================================================================

#[test]
fn test_backspace_unwraps_square_root() {
    let mut editor = EditorState::new();
    type_keys(&mut editor, &["\\sqrt", "6", "6"]);
    assert_eq!(text(&editor), "\\sqrt { 6 6 }");

    editor.move_horizontal(Horizontal::Left);
    editor.move_horizontal(Horizontal::Left);
    assert_eq!(editor.cursor, 2);

    assert!(editor.backspace());
    assert_eq!(text(&editor), "6 6");
    assert_eq!(editor.cursor, 0, "cursor where the structure started");
}

#[test]
fn test_backspace_empties_then_removes_power() {
    let mut editor = EditorState::new();
    type_keys(&mut editor, &["x", "^", "2"]);

    assert!(editor.backspace());
    assert_eq!(text(&editor), "x ^ { }");
    assert_eq!(editor.cursor, 3);

    assert!(editor.backspace());
    assert_eq!(text(&editor), "x");
    assert_eq!(editor.cursor, 1);
}

#[test]
fn test_backspace_at_denominator_start_collapses_fraction() {
    let mut editor = editor_with("\\frac { a b } { c }", 6);
    assert!(editor.backspace());

    assert_eq!(text(&editor), "a b c");
    assert_eq!(editor.cursor, 2, "cursor after the former numerator");
}

#[test]
fn test_backspace_at_numerator_start_is_blocked() {
    let mut editor = editor_with("\\frac { a } { b }", 2);

    assert!(!editor.backspace());
    assert_eq!(text(&editor), "\\frac { a } { b }");
    assert_eq!(editor.cursor, 2);
    assert!(!editor.can_undo());
}

#[test]
fn test_backspace_in_root_degree() {
    let mut editor = editor_with("\\sqrt [ 3 ] { 8 }", 2);

    assert!(editor.backspace());
    assert_eq!(text(&editor), "3 \\sqrt { 8 }");
    assert_eq!(editor.cursor, 1);
}

#[test]
fn test_backspace_removes_empty_integral() {
    let mut editor = EditorState::new();
    type_keys(&mut editor, &["\\int"]);
    assert_eq!(text(&editor), "\\int _ { } ^ { }");
    assert_eq!(editor.cursor, 3);

    assert!(editor.backspace());
    assert!(editor.is_empty());
    assert_eq!(editor.cursor, 0);
}

#[test]
fn test_backspace_enters_closing_bracket_first() {
    let mut editor = editor_with("( 1 + 2 )", 5);

    assert!(!editor.backspace());
    assert_eq!(editor.cursor, 4);
    assert!(editor.backspace());
    assert_eq!(text(&editor), "( 1 + )");
}

#[test]
fn test_backspace_everything_leaves_empty_sequence() {
    let mut editor = EditorState::new();
    type_keys(&mut editor, &["1", "/", "\\sqrt", "2"]);
    assert_eq!(text(&editor), "\\frac { 1 } { \\sqrt { 2 } }");

    let mut presses = 0;
    while !editor.is_empty() && presses < 16 {
        editor.backspace();
        presses += 1;
        assert!(is_balanced(&editor.tokens), "unbalanced: {}", text(&editor));
        editor.assert_invariants();
    }
    assert!(editor.is_empty(), "left over: {}", text(&editor));
    // 2, the root, the fraction, then 1
    assert_eq!(presses, 4);
}

// ========================================================================
// Selection Edits and History
// ========================================================================

#[test]
fn test_division_of_selection_then_undo() {
    let mut editor = editor_with("a + b", 3);
    editor.selection = Some(Selection::new(0, 3));

    editor.insert(&key("/"));
    assert_eq!(text(&editor), "\\frac { a + b } { }");
    assert_eq!(editor.cursor, 7);

    assert!(editor.undo());
    assert_eq!(text(&editor), "a + b");
    assert_eq!(editor.selection, Some(Selection::new(0, 3)));
}

#[test]
fn test_backspace_deletes_balanced_selection() {
    let mut editor = editor_with("1 + \\sqrt { 2 }", 0);
    editor.selection = Some(Selection::new(1, 6));

    assert!(editor.backspace());
    assert_eq!(text(&editor), "1");
    assert_eq!(editor.cursor, 1);
}

#[test]
fn test_clear_then_redo_cycle() {
    let mut editor = EditorState::new();
    type_keys(&mut editor, &["4", "2"]);

    assert!(editor.clear());
    assert!(editor.is_empty());
    assert!(editor.undo());
    assert_eq!(text(&editor), "4 2");
    assert!(editor.redo());
    assert!(editor.is_empty());
}

// ========================================================================
// Invariants Across Key Sequences
// ========================================================================

const TEMPLATES: &[&str] = &[
    "\\frac",
    "/",
    "reciprocal",
    "\\sqrt",
    "\\sqrt[3]",
    "\\sqrt[n]",
    "^",
    "e^",
    "\\int",
    "\\sum",
    "\\log",
    "\\sin",
    "(",
];

const PREFIXES: &[&[&str]] = &[&[], &["1", "+"], &["\\frac"], &["\\sqrt"], &["x", "^"]];

/// Typing, moving and selecting around a freshly inserted structure
const SCRIPT: &[&str] = &[
    "2", "up", "down", "right", "x", "left", "left", "down", "up", "expand", "3", "expand",
    "expand", "backspace", "undo", "redo", "undo", "right", "up", "left",
];

fn press(editor: &mut EditorState, symbol: &str) {
    match symbol {
        "up" => editor.move_vertical(Vertical::Up),
        "down" => editor.move_vertical(Vertical::Down),
        "left" => editor.move_horizontal(Horizontal::Left),
        "right" => editor.move_horizontal(Horizontal::Right),
        "expand" => editor.expand_selection(),
        "backspace" => {
            editor.backspace();
        }
        "undo" => {
            editor.undo();
        }
        "redo" => {
            editor.redo();
        }
        other => {
            editor.insert(&key(other));
        }
    }
}

fn check(editor: &EditorState, trail: &[&str]) {
    editor.assert_invariants();
    assert!(is_balanced(&editor.tokens), "unbalanced after {:?}: {}", trail, text(editor));
    assert!(
        editor.cursor <= editor.tokens.len(),
        "cursor {} out of range after {:?}: {}",
        editor.cursor,
        trail,
        text(editor)
    );
    assert!(
        is_valid_position(&editor.tokens, editor.cursor),
        "invalid cursor {} after {:?}: {}",
        editor.cursor,
        trail,
        text(editor)
    );
    if let Some(selection) = editor.selection {
        assert!(selection.start <= selection.end && selection.end <= editor.tokens.len());
    }
}

#[test]
fn test_every_structure_survives_editing_and_deletion() {
    for prefix in PREFIXES {
        for template in TEMPLATES {
            let mut editor = EditorState::new();
            let mut trail: Vec<&str> = Vec::new();

            for symbol in prefix.iter().chain([template]).chain(SCRIPT) {
                press(&mut editor, symbol);
                trail.push(*symbol);
                check(&editor, &trail);
            }

            // Backspace until nothing changes any more
            for _ in 0..64 {
                let before = (text(&editor), editor.cursor);
                press(&mut editor, "backspace");
                trail.push("backspace");
                check(&editor, &trail);
                if (text(&editor), editor.cursor) == before {
                    break;
                }
            }
        }
    }
}

#[test]
fn test_expansion_reaches_select_all_then_clears() {
    for prefix in PREFIXES {
        for template in TEMPLATES {
            let mut editor = EditorState::new();
            for symbol in prefix.iter().chain([template]) {
                press(&mut editor, symbol);
            }
            press(&mut editor, "2");
            let len = editor.tokens.len();

            let mut steps = 0;
            loop {
                editor.expand_selection();
                steps += 1;
                let selection = editor.selection.expect("expansion never clears early");
                if selection.spans_all(len) {
                    break;
                }
                assert!(steps < 32, "no select-all for {:?} {}", prefix, template);
            }

            editor.expand_selection();
            assert_eq!(editor.selection, None, "{}", text(&editor));
        }
    }
}
