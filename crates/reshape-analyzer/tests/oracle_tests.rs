use reshape_analyzer::oracle::{
    numeric_literal_value, provably_array_or_string, provably_iterable,
};
use reshape_parser::parser::{NodeArena, NodeId, NodeKind, ParserState};

fn parse_expr(source: &str) -> (NodeArena, NodeId) {
    let mut parser = ParserState::new(source);
    let root = parser
        .parse_source_file()
        .unwrap_or_else(|e| panic!("parse failed for {source:?}: {e}"));
    let arena = parser.into_arena();
    let Some(NodeKind::SourceFile { statements }) = arena.kind(root) else {
        panic!("expected source file");
    };
    let Some(NodeKind::ExprStmt { expr }) = arena.kind(statements[0]) else {
        panic!("expected expression statement in {source:?}");
    };
    let expr = *expr;
    (arena, expr)
}

fn iterable(source: &str) -> bool {
    let (arena, expr) = parse_expr(source);
    provably_iterable(&arena, expr)
}

fn array_or_string(source: &str) -> bool {
    let (arena, expr) = parse_expr(source);
    provably_array_or_string(&arena, expr)
}

fn numeric(source: &str) -> Option<f64> {
    let (arena, expr) = parse_expr(source);
    numeric_literal_value(&arena, expr)
}

// =============================================================================
// Provably iterable
// =============================================================================

#[test]
fn array_literals_are_iterable() {
    assert!(iterable("[1, 2];"));
    assert!(iterable("[];"));
}

#[test]
fn array_constructing_statics_are_iterable() {
    assert!(iterable("Array.of(1, 2);"));
    assert!(iterable("Array.from(x);"));
    assert!(iterable("Object.keys(o);"));
    assert!(iterable("Object.values(o);"));
    assert!(iterable("Object.entries(o);"));
}

#[test]
fn new_array_is_iterable() {
    assert!(iterable("new Array(3);"));
    assert!(!iterable("new Thing(3);"));
}

#[test]
fn split_on_a_string_literal_is_iterable() {
    assert!(iterable("'a,b'.split(',');"));
}

#[test]
fn split_on_an_identifier_is_not_provable() {
    // The receiver could be anything at runtime.
    assert!(!iterable("s.split(',');"));
}

#[test]
fn match_on_a_string_literal_is_not_provable() {
    // `match` can return null, so it never proves iterability.
    assert!(!iterable("'ab'.match(r);"));
}

#[test]
fn bare_identifiers_are_never_iterable() {
    assert!(!iterable("someVar;"));
    assert!(!iterable("arguments;"));
}

#[test]
fn other_expressions_are_not_provable() {
    assert!(!iterable("f();"));
    assert!(!iterable("a.b;"));
    assert!(!iterable("a + b;"));
    assert!(!iterable("`a${x}`;"));
}

// =============================================================================
// Provably array-or-string (position search + membership test)
// =============================================================================

#[test]
fn literals_support_search_and_membership() {
    assert!(array_or_string("[1, 2];"));
    assert!(array_or_string("'abc';"));
    assert!(array_or_string("`a${x}b`;"));
    assert!(array_or_string("Array.of(1);"));
    assert!(array_or_string("new Array(3);"));
}

#[test]
fn preserving_chain_over_a_provable_base_passes() {
    assert!(array_or_string("[1, 2].concat(x);"));
    assert!(array_or_string("'a b'.split(' ').map(f).slice(1);"));
    assert!(array_or_string("'abc'.toUpperCase().trim();"));
}

#[test]
fn chain_over_an_unverified_base_fails() {
    // Same methods, but the base is an identifier: no proof.
    assert!(!array_or_string("arr.concat(x);"));
    assert!(!array_or_string("s.split(' ').map(f);"));
}

#[test]
fn non_preserving_methods_break_the_chain() {
    assert!(!array_or_string("[1, 2].pop();"));
    assert!(!array_or_string("'ab'.charCodeAt(0);"));
}

#[test]
fn bare_identifiers_never_support_search_and_membership() {
    assert!(!array_or_string("someVar;"));
}

// =============================================================================
// Numeric literal extraction
// =============================================================================

#[test]
fn plain_and_negated_literals_extract() {
    assert_eq!(numeric("42;"), Some(42.0));
    assert_eq!(numeric("2.5;"), Some(2.5));
    assert_eq!(numeric("-7;"), Some(-7.0));
    assert_eq!(numeric("-0.5;"), Some(-0.5));
}

#[test]
fn anything_else_is_not_a_number() {
    assert_eq!(numeric("x;"), None);
    assert_eq!(numeric("-x;"), None);
    assert_eq!(numeric("+7;"), None);
    assert_eq!(numeric("1 + 2;"), None);
    assert_eq!(numeric("'1';"), None);
}
