use reshape_parser::parser::{
    BinaryOp, FunctionKind, NodeArena, NodeId, NodeKind, ParserState, UnaryOp, UpdateOp,
    VarFlavor,
};

fn parse(source: &str) -> (NodeArena, NodeId) {
    let mut parser = ParserState::new(source);
    let root = parser
        .parse_source_file()
        .unwrap_or_else(|e| panic!("parse failed for {source:?}: {e}"));
    (parser.into_arena(), root)
}

fn parse_err(source: &str) {
    let mut parser = ParserState::new(source);
    assert!(
        parser.parse_source_file().is_err(),
        "expected parse error for {source:?}"
    );
}

fn statements(arena: &NodeArena, root: NodeId) -> Vec<NodeId> {
    match arena.kind(root) {
        Some(NodeKind::SourceFile { statements }) => statements.clone(),
        other => panic!("expected source file root, got {other:?}"),
    }
}

fn stmt_expr(arena: &NodeArena, root: NodeId, index: usize) -> NodeId {
    let stmts = statements(arena, root);
    match arena.kind(stmts[index]) {
        Some(NodeKind::ExprStmt { expr }) => *expr,
        other => panic!("expected expression statement, got {other:?}"),
    }
}

#[test]
fn variable_statement_shape() {
    let (arena, root) = parse("let x = 1;");
    let stmts = statements(&arena, root);
    assert_eq!(stmts.len(), 1);
    let Some(NodeKind::VarDecl { flavor, declarators }) = arena.kind(stmts[0]) else {
        panic!("expected variable declaration");
    };
    assert_eq!(*flavor, VarFlavor::Let);
    assert_eq!(declarators.len(), 1);
    let (pattern, init) = arena.declarator_parts(declarators[0]).expect("declarator");
    assert_eq!(arena.ident_text(pattern), Some("x"));
    assert!(matches!(
        arena.kind(init),
        Some(NodeKind::NumberLit { value }) if *value == 1.0
    ));
    // Parent back-references point child -> parent all the way up.
    assert_eq!(arena.parent(pattern), declarators[0]);
    assert_eq!(arena.parent(declarators[0]), stmts[0]);
    assert_eq!(arena.parent(stmts[0]), root);
    assert!(arena.parent(root).is_none());
}

#[test]
fn member_and_call_chain_shape() {
    let (arena, root) = parse("a.b(c)[d];");
    let expr = stmt_expr(&arena, root, 0);
    // Outermost: computed member [d] over the call.
    let Some(NodeKind::Member { object, property, computed: true }) = arena.kind(expr) else {
        panic!("expected computed member access");
    };
    assert_eq!(arena.ident_text(*property), Some("d"));
    let Some(NodeKind::Call { callee, args }) = arena.kind(*object) else {
        panic!("expected call");
    };
    assert_eq!(args.len(), 1);
    let Some(NodeKind::Member { object, property, computed: false }) = arena.kind(*callee) else {
        panic!("expected member callee");
    };
    assert_eq!(arena.ident_text(*object), Some("a"));
    assert_eq!(arena.ident_text(*property), Some("b"));
}

#[test]
fn binary_precedence() {
    let (arena, root) = parse("1 + 2 * 3;");
    let expr = stmt_expr(&arena, root, 0);
    let Some(NodeKind::Binary { op: BinaryOp::Add, right, .. }) = arena.kind(expr) else {
        panic!("expected addition at the top");
    };
    assert!(matches!(
        arena.kind(*right),
        Some(NodeKind::Binary { op: BinaryOp::Mul, .. })
    ));
}

#[test]
fn logical_precedence() {
    let (arena, root) = parse("a || b && c;");
    let expr = stmt_expr(&arena, root, 0);
    let Some(NodeKind::Binary { op: BinaryOp::LogicalOr, right, .. }) = arena.kind(expr) else {
        panic!("expected || at the top");
    };
    assert!(matches!(
        arena.kind(*right),
        Some(NodeKind::Binary { op: BinaryOp::LogicalAnd, .. })
    ));
}

#[test]
fn exponentiation_is_right_associative() {
    let (arena, root) = parse("2 ** 3 ** 2;");
    let expr = stmt_expr(&arena, root, 0);
    let Some(NodeKind::Binary { op: BinaryOp::Exp, left, right }) = arena.kind(expr) else {
        panic!("expected ** at the top");
    };
    assert!(matches!(arena.kind(*left), Some(NodeKind::NumberLit { .. })));
    assert!(matches!(
        arena.kind(*right),
        Some(NodeKind::Binary { op: BinaryOp::Exp, .. })
    ));
}

#[test]
fn parenthesized_expressions_do_not_materialize() {
    let (arena, root) = parse("(a + b) * c;");
    let expr = stmt_expr(&arena, root, 0);
    let Some(NodeKind::Binary { op: BinaryOp::Mul, left, .. }) = arena.kind(expr) else {
        panic!("expected * at the top");
    };
    assert!(matches!(
        arena.kind(*left),
        Some(NodeKind::Binary { op: BinaryOp::Add, .. })
    ));
}

#[test]
fn conditional_expression_shape() {
    let (arena, root) = parse("a ? b : c;");
    let expr = stmt_expr(&arena, root, 0);
    assert!(matches!(arena.kind(expr), Some(NodeKind::Cond { .. })));
}

#[test]
fn unary_and_update_shapes() {
    let (arena, root) = parse("-x; ++y; z--;");
    assert!(matches!(
        arena.kind(stmt_expr(&arena, root, 0)),
        Some(NodeKind::Unary { op: UnaryOp::Minus, .. })
    ));
    assert!(matches!(
        arena.kind(stmt_expr(&arena, root, 1)),
        Some(NodeKind::Update { op: UpdateOp::Increment, prefix: true, .. })
    ));
    assert!(matches!(
        arena.kind(stmt_expr(&arena, root, 2)),
        Some(NodeKind::Update { op: UpdateOp::Decrement, prefix: false, .. })
    ));
}

#[test]
fn newline_blocks_postfix_update() {
    // ASI: `a` ends at the line break; `++b` is a fresh statement.
    let (arena, root) = parse("a\n++b");
    let stmts = statements(&arena, root);
    assert_eq!(stmts.len(), 2);
    assert!(matches!(
        arena.kind(stmt_expr(&arena, root, 1)),
        Some(NodeKind::Update { prefix: true, .. })
    ));
}

#[test]
fn automatic_semicolon_insertion_between_declarations() {
    let (arena, root) = parse("let x = 1\nlet y = 2");
    assert_eq!(statements(&arena, root).len(), 2);
}

#[test]
fn return_is_a_restricted_production() {
    let (arena, root) = parse("function f() { return\n1; }");
    let stmts = statements(&arena, root);
    let Some(NodeKind::Function { body, .. }) = arena.kind(stmts[0]) else {
        panic!("expected function declaration");
    };
    let Some(NodeKind::Block { statements }) = arena.kind(*body) else {
        panic!("expected block body");
    };
    assert_eq!(statements.len(), 2);
    assert!(matches!(
        arena.kind(statements[0]),
        Some(NodeKind::Return { argument }) if argument.is_none()
    ));
}

#[test]
fn arrow_function_with_expression_body() {
    let (arena, root) = parse("let f = x => x + 1;");
    let stmts = statements(&arena, root);
    let Some(NodeKind::VarDecl { declarators, .. }) = arena.kind(stmts[0]) else {
        panic!("expected declaration");
    };
    let (_, init) = arena.declarator_parts(declarators[0]).expect("declarator");
    let Some(NodeKind::Function { kind: FunctionKind::Arrow, params, body, .. }) =
        arena.kind(init)
    else {
        panic!("expected arrow function");
    };
    assert_eq!(params.len(), 1);
    assert!(matches!(arena.kind(*body), Some(NodeKind::Binary { .. })));
}

#[test]
fn arrow_function_with_parenthesized_params() {
    let (arena, root) = parse("let f = (a, b) => { return a; };");
    let stmts = statements(&arena, root);
    let Some(NodeKind::VarDecl { declarators, .. }) = arena.kind(stmts[0]) else {
        panic!("expected declaration");
    };
    let (_, init) = arena.declarator_parts(declarators[0]).expect("declarator");
    let Some(NodeKind::Function { kind: FunctionKind::Arrow, params, body, .. }) =
        arena.kind(init)
    else {
        panic!("expected arrow function");
    };
    assert_eq!(params.len(), 2);
    assert!(matches!(arena.kind(*body), Some(NodeKind::Block { .. })));
}

#[test]
fn for_of_declares_a_loop_variable() {
    let (arena, root) = parse("for (const x of xs) {}");
    let stmts = statements(&arena, root);
    let Some(NodeKind::ForOf { left, .. }) = arena.kind(stmts[0]) else {
        panic!("expected for-of");
    };
    let Some(NodeKind::VarDecl { flavor: VarFlavor::Const, declarators }) = arena.kind(*left)
    else {
        panic!("expected const declaration list");
    };
    let (_, init) = arena.declarator_parts(declarators[0]).expect("declarator");
    assert!(init.is_none());
    assert!(arena.is_loop_declarator(declarators[0]));
}

#[test]
fn classic_for_declarator_is_not_a_loop_declarator() {
    let (arena, root) = parse("for (let i = 0; i < n; i++) {}");
    let stmts = statements(&arena, root);
    let Some(NodeKind::For { init, .. }) = arena.kind(stmts[0]) else {
        panic!("expected classic for");
    };
    let Some(NodeKind::VarDecl { declarators, .. }) = arena.kind(*init) else {
        panic!("expected declaration list");
    };
    assert!(!arena.is_loop_declarator(declarators[0]));
}

#[test]
fn for_in_with_expression_head() {
    let (arena, root) = parse("for (k in obj) {}");
    let stmts = statements(&arena, root);
    let Some(NodeKind::ForIn { left, .. }) = arena.kind(stmts[0]) else {
        panic!("expected for-in");
    };
    assert_eq!(arena.ident_text(*left), Some("k"));
}

#[test]
fn template_literal_shape() {
    let (arena, root) = parse("`a${x}b`;");
    let expr = stmt_expr(&arena, root, 0);
    let Some(NodeKind::TemplateLit { quasis, exprs }) = arena.kind(expr) else {
        panic!("expected template literal");
    };
    assert_eq!(quasis.len(), 2);
    assert_eq!(exprs.len(), 1);
}

#[test]
fn new_expression_binds_before_call() {
    let (arena, root) = parse("new Foo(1).bar();");
    let expr = stmt_expr(&arena, root, 0);
    let Some(NodeKind::Call { callee, .. }) = arena.kind(expr) else {
        panic!("expected call");
    };
    let Some(NodeKind::Member { object, .. }) = arena.kind(*callee) else {
        panic!("expected member");
    };
    assert!(matches!(arena.kind(*object), Some(NodeKind::New { .. })));
}

#[test]
fn object_literal_member_forms() {
    let (arena, root) = parse("let o = {a, b: 2, [k]: 3, ...rest};");
    let stmts = statements(&arena, root);
    let Some(NodeKind::VarDecl { declarators, .. }) = arena.kind(stmts[0]) else {
        panic!("expected declaration");
    };
    let (_, init) = arena.declarator_parts(declarators[0]).expect("declarator");
    let Some(NodeKind::ObjectLit { properties }) = arena.kind(init) else {
        panic!("expected object literal");
    };
    assert_eq!(properties.len(), 4);
    assert!(matches!(
        arena.kind(properties[0]),
        Some(NodeKind::Property { shorthand: true, .. })
    ));
    assert!(matches!(
        arena.kind(properties[1]),
        Some(NodeKind::Property { shorthand: false, computed: false, .. })
    ));
    assert!(matches!(
        arena.kind(properties[2]),
        Some(NodeKind::Property { computed: true, .. })
    ));
    assert!(matches!(
        arena.kind(properties[3]),
        Some(NodeKind::Spread { .. })
    ));
}

#[test]
fn destructuring_assignment_targets_reinterpret_as_patterns() {
    let (arena, root) = parse("[a, b] = xs; ({x} = o);");
    let first = stmt_expr(&arena, root, 0);
    let Some(NodeKind::Assign { target, .. }) = arena.kind(first) else {
        panic!("expected assignment");
    };
    assert!(matches!(
        arena.kind(*target),
        Some(NodeKind::ArrayPattern { .. })
    ));
    let second = stmt_expr(&arena, root, 1);
    let Some(NodeKind::Assign { target, .. }) = arena.kind(second) else {
        panic!("expected assignment");
    };
    assert!(matches!(
        arena.kind(*target),
        Some(NodeKind::ObjectPattern { .. })
    ));
}

#[test]
fn out_of_subset_constructs_fail_the_parse() {
    parse_err("class A {}");
    parse_err("switch (x) { }");
    parse_err("try { f(); } catch (e) { }");
    parse_err("throw x;");
}

#[test]
fn malformed_inputs_fail_the_parse() {
    parse_err("let x = ;");
    parse_err("function () {}");
    parse_err("a +");
    parse_err("1 = 2;");
    parse_err("x++ = 3;");
}
