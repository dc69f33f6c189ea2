//! Shadow resolver: does a nearer declaration of the same name intercept
//! a usage before the original binding is reached?
//!
//! The answer feeds the mutability classifier, which *discounts* shadowed
//! reassignments. That fixes the direction of conservatism: `true` must be
//! certain, `false` is always safe.

use crate::catalog::collect_bound_names;
use reshape_common::Atom;
use reshape_parser::parser::{FunctionKind, NodeArena, NodeId, NodeKind, VarFlavor};
use smallvec::SmallVec;

/// Whether `usage` of `name` is intercepted by a declaration other than
/// `original_decl` on the way out to the original binding.
///
/// Walks outward from the usage across *function* boundaries. At each
/// boundary crossed:
///
/// 1. A parameter binding `name` shadows the usage - unless that
///    parameter is the original declaration itself, in which case the
///    usage belongs to the home binding.
/// 2. Otherwise the function body is scanned (without descending into
///    nested functions) for declarations of `name`. Finding the original
///    ends the walk: home scope, not shadowed. A different declaration
///    intercepts if it is function-scoped (hoisted over the whole body)
///    or if its block encloses the usage.
///
/// No verdict at any boundary means not shadowed.
pub fn is_shadowed(
    arena: &NodeArena,
    usage: NodeId,
    name: Atom,
    original_decl: NodeId,
) -> bool {
    let mut names: SmallVec<[(Atom, NodeId); 4]> = SmallVec::new();
    for boundary in arena.ancestors(usage) {
        let Some(node) = arena.get(boundary) else { continue };
        let NodeKind::Function { params, .. } = &node.kind else {
            continue;
        };

        for &param in params {
            names.clear();
            collect_bound_names(arena, param, &mut names);
            for &(bound, name_node) in &names {
                if bound == name {
                    return name_node != original_decl;
                }
            }
        }

        let found = declarations_in_function_body(arena, boundary, name);
        if found.iter().any(|d| d.node == original_decl) {
            return false;
        }
        for decl in &found {
            if decl.function_scoped {
                return true;
            }
            // Block-scoped: only certain to intercept when its block
            // contains the usage.
            let scope = block_scope_of(arena, decl.node);
            if scope.is_some() && (scope == usage || arena.is_ancestor(scope, usage)) {
                return true;
            }
        }
    }
    false
}

struct BodyDeclaration {
    /// `Declarator` or `Function` declaration node.
    node: NodeId,
    function_scoped: bool,
}

/// Declarations of `name` directly inside `function_id`'s own scope:
/// the body is scanned iteratively and nested functions are not entered
/// (their declarations bind their own scope, not this one - a nested
/// function *declaration's name* does bind here and is recorded).
fn declarations_in_function_body(
    arena: &NodeArena,
    function_id: NodeId,
    name: Atom,
) -> Vec<BodyDeclaration> {
    let body = match arena.kind(function_id) {
        Some(NodeKind::Function { body, .. }) => *body,
        _ => return Vec::new(),
    };
    let mut found = Vec::new();
    let mut names: SmallVec<[(Atom, NodeId); 4]> = SmallVec::new();
    let mut stack = vec![body];
    while let Some(id) = stack.pop() {
        let Some(node) = arena.get(id) else { continue };
        match &node.kind {
            NodeKind::Function { kind, name: fn_name, .. } => {
                if *kind == FunctionKind::Declaration && arena.ident_atom(*fn_name) == Some(name) {
                    found.push(BodyDeclaration { node: id, function_scoped: true });
                }
                // Do not descend: inner bindings do not affect this scope.
            }
            NodeKind::VarDecl { flavor, declarators } => {
                let function_scoped = *flavor == VarFlavor::Var;
                for &declarator in declarators {
                    if let Some((pattern, _)) = arena.declarator_parts(declarator) {
                        names.clear();
                        collect_bound_names(arena, pattern, &mut names);
                        if names.iter().any(|&(bound, _)| bound == name) {
                            found.push(BodyDeclaration { node: declarator, function_scoped });
                        }
                    }
                }
                arena.push_children(id, &mut stack);
            }
            _ => arena.push_children(id, &mut stack),
        }
    }
    found
}

/// The scope a block-scoped declaration binds: its nearest enclosing
/// block, loop head, function, or the unit root.
fn block_scope_of(arena: &NodeArena, decl_node: NodeId) -> NodeId {
    for ancestor in arena.ancestors(decl_node) {
        match arena.kind(ancestor) {
            Some(
                NodeKind::Block { .. }
                | NodeKind::SourceFile { .. }
                | NodeKind::Function { .. }
                | NodeKind::For { .. }
                | NodeKind::ForIn { .. }
                | NodeKind::ForOf { .. },
            ) => return ancestor,
            _ => {}
        }
    }
    NodeId::NONE
}
