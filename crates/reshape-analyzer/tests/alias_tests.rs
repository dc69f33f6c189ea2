use reshape_analyzer::{AnalyzerState, RewriteOptions};
use reshape_common::Atom;
use reshape_parser::parser::{NodeArena, NodeId, ParserState};

fn parse(source: &str) -> (NodeArena, NodeId) {
    let mut parser = ParserState::new(source);
    let root = parser
        .parse_source_file()
        .unwrap_or_else(|e| panic!("parse failed for {source:?}: {e}"));
    (parser.into_arena(), root)
}

fn atom(arena: &NodeArena, name: &str) -> Atom {
    arena
        .interner()
        .lookup(name)
        .unwrap_or_else(|| panic!("{name} never appears in the source"))
}

fn wrap_options() -> RewriteOptions {
    RewriteOptions {
        wrapper_callees: vec!["wrap".to_string()],
    }
}

/// Resolve `name` under a wrapper set containing `wrap`.
fn resolve(source: &str, name: &str) -> Option<String> {
    let (arena, root) = parse(source);
    let mut state = AnalyzerState::with_options(&arena, root, wrap_options());
    state
        .resolve_wrapper_alias(atom(&arena, name))
        .map(|id| format!("{:?}", arena.kind(id).expect("resolved node")))
}

#[test]
fn resolves_through_member_access_usages() {
    let (arena, root) = parse("let el = wrap(node); use(el.prop);");
    let mut state = AnalyzerState::with_options(&arena, root, wrap_options());
    let resolved = state
        .resolve_wrapper_alias(atom(&arena, "el"))
        .expect("el should resolve");
    assert_eq!(arena.ident_text(resolved), Some("node"));
}

#[test]
fn disagreeing_wrapper_arguments_fail() {
    assert_eq!(resolve("let el = wrap(node); el = wrap(other);", "el"), None);
}

#[test]
fn agreeing_reassignment_still_resolves() {
    let (arena, root) = parse("let el = wrap(node); el = wrap(node); use(el.prop);");
    let mut state = AnalyzerState::with_options(&arena, root, wrap_options());
    let resolved = state
        .resolve_wrapper_alias(atom(&arena, "el"))
        .expect("agreeing definitions should resolve");
    assert_eq!(arena.ident_text(resolved), Some("node"));
}

#[test]
fn assignment_only_definition_resolves() {
    let (arena, root) = parse("el = wrap(node); el.show();");
    let mut state = AnalyzerState::with_options(&arena, root, wrap_options());
    let resolved = state
        .resolve_wrapper_alias(atom(&arena, "el"))
        .expect("assignment-only definition should resolve");
    assert_eq!(arena.ident_text(resolved), Some("node"));
}

#[test]
fn structural_agreement_spans_member_arguments() {
    let source = "function f() { let el = wrap(a.b); el.show(); }\n\
                  function g() { el = wrap(a.b); }";
    let (arena, root) = parse(source);
    let mut state = AnalyzerState::with_options(&arena, root, wrap_options());
    assert!(state.resolve_wrapper_alias(atom(&arena, "el")).is_some());
}

#[test]
fn bare_usage_as_argument_fails() {
    assert_eq!(resolve("let el = wrap(node); use(el);", "el"), None);
}

#[test]
fn comparison_usage_fails() {
    assert_eq!(
        resolve("let el = wrap(node); if (el === other) { f(); }", "el"),
        None
    );
}

#[test]
fn returned_usage_fails() {
    assert_eq!(
        resolve("let el = wrap(node); function f() { return el; }", "el"),
        None
    );
}

#[test]
fn update_anywhere_fails() {
    assert_eq!(resolve("let el = wrap(node); el++;", "el"), None);
}

#[test]
fn compound_assignment_fails() {
    assert_eq!(resolve("let el = wrap(node); el += x;", "el"), None);
}

#[test]
fn non_wrapper_initializer_fails() {
    assert_eq!(resolve("let el = make(node); el.show();", "el"), None);
}

#[test]
fn wrong_arity_fails() {
    assert_eq!(resolve("let el = wrap(node, extra); el.show();", "el"), None);
    assert_eq!(resolve("let el = wrap(); el.show();", "el"), None);
    assert_eq!(resolve("let el = wrap(...nodes); el.show();", "el"), None);
}

#[test]
fn destructured_declaration_fails() {
    assert_eq!(resolve("let {el} = wrap(node); el.show();", "el"), None);
}

#[test]
fn member_property_mentions_are_not_usages() {
    // `a.el` mentions the name as a property; that alone neither helps
    // nor breaks resolution - there is just nothing to alias.
    assert_eq!(resolve("a.el = 1; use(a.el);", "el"), None);
}

#[test]
fn dollar_names_at_top_level_never_resolve() {
    let (arena, root) = parse("let $nav = $(node); $nav.hide();");
    let mut state = AnalyzerState::new(&arena, root);
    assert_eq!(state.resolve_wrapper_alias(atom(&arena, "$nav")), None);
}

#[test]
fn dollar_names_inside_functions_resolve() {
    let (arena, root) = parse("function f() { let $nav = $(node); $nav.hide(); }");
    let mut state = AnalyzerState::new(&arena, root);
    let resolved = state
        .resolve_wrapper_alias(atom(&arena, "$nav"))
        .expect("non-top-level $ name should resolve");
    assert_eq!(arena.ident_text(resolved), Some("node"));
}

#[test]
fn parameter_of_same_name_anywhere_fails() {
    assert_eq!(
        resolve("let el = wrap(node); function f(el) { g(); }", "el"),
        None
    );
}

#[test]
fn repeated_queries_are_memoized_consistently() {
    let (arena, root) = parse("let el = wrap(node); el.show();");
    let mut state = AnalyzerState::with_options(&arena, root, wrap_options());
    let name = atom(&arena, "el");
    let first = state.resolve_wrapper_alias(name);
    let second = state.resolve_wrapper_alias(name);
    assert!(first.is_some());
    assert_eq!(first, second);
}
