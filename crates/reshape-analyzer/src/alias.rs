//! Wrapper-alias resolver.
//!
//! A name initialized exclusively from a recognized single-argument
//! wrapper call (`let el = $(node)`) is, for analysis purposes,
//! interchangeable with the wrapped argument - provided nothing in the
//! unit can make the wrapper escape or diverge. Every reaching definition
//! (declaration initializer or plain assignment) must be the wrapper call
//! shape with structurally identical arguments, the name must never be
//! incremented, and every appearance of the name must be one of the three
//! enumerated safe roles. Anything else fails the resolution: a usage
//! pattern this resolver cannot enumerate might mutate or compare the
//! wrapper in a way that breaks the one-argument-equals-the-target
//! assumption.

use crate::catalog::{BindingCatalog, DeclarationKind};
use crate::equiv::nodes_equivalent;
use crate::options::RewriteOptions;
use reshape_common::Atom;
use reshape_parser::parser::{NodeArena, NodeId, NodeKind};

/// Resolve `name` to the single agreed-upon wrapper argument, or `None`
/// when that cannot be proven. Memoization lives in the analyzer state.
pub(crate) fn resolve_wrapper_alias_uncached(
    arena: &NodeArena,
    root: NodeId,
    catalog: &BindingCatalog,
    options: &RewriteOptions,
    name: Atom,
) -> Option<NodeId> {
    // Every declaration must be a simple-identifier declarator whose
    // initializer is a recognized wrapper call.
    let mut args: Vec<NodeId> = Vec::new();
    for decl in catalog.declarations_of(name) {
        if matches!(decl.kind, DeclarationKind::Param | DeclarationKind::Function) {
            return None;
        }
        let (pattern, init) = arena.declarator_parts(decl.node)?;
        if pattern != decl.name_node {
            // Destructured binding: no single initializer to trust.
            return None;
        }
        args.push(wrapper_argument(arena, options, init)?);
    }

    // `$`-prefixed names at unit top level are categorically
    // unresolvable. The convention is preserved as-is from the original
    // rule set; no further semantics are attached to it.
    if dollar_prefixed_at_top_level(arena, catalog, name) {
        return None;
    }

    // Plain assignments are reaching definitions too and join the
    // agreement set. A compound or destructuring assignment is not the
    // wrapper shape and fails outright.
    for &assign in catalog.assignments_of(name) {
        let Some(NodeKind::Assign { op, target, value }) = arena.kind(assign) else {
            return None;
        };
        if !op.is_plain() || arena.ident_atom(*target) != Some(name) {
            return None;
        }
        args.push(wrapper_argument(arena, options, *value)?);
    }

    // All reaching definitions must agree on one argument, structurally.
    for pair in args.windows(2) {
        if !nodes_equivalent(arena, pair[0], pair[1]) {
            return None;
        }
    }

    // An increment/decrement anywhere disqualifies the name.
    if !catalog.updates_of(name).is_empty() {
        return None;
    }

    // Closed usage whitelist: declarator identifier, plain-assignment
    // target, or member-access base. Everything else (argument, return
    // value, comparison operand, pattern binding, ...) fails.
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        let Some(node) = arena.get(id) else { continue };
        if let NodeKind::Ident { name: id_name } = &node.kind {
            if *id_name == name && !usage_is_safe(arena, id) {
                return None;
            }
        }
        arena.push_children(id, &mut stack);
    }

    // Zero reaching definitions is not an error; there is simply nothing
    // to alias.
    args.first().copied()
}

/// The single argument of a recognized wrapper call, if `init` is one.
fn wrapper_argument(
    arena: &NodeArena,
    options: &RewriteOptions,
    init: NodeId,
) -> Option<NodeId> {
    let (callee, args) = arena.ident_call_parts(init)?;
    if !options.is_wrapper_callee(arena.resolve_atom(callee)) {
        return None;
    }
    if args.len() != 1 {
        return None;
    }
    let arg = args[0];
    if matches!(arena.kind(arg), Some(NodeKind::Spread { .. })) {
        return None;
    }
    Some(arg)
}

fn dollar_prefixed_at_top_level(
    arena: &NodeArena,
    catalog: &BindingCatalog,
    name: Atom,
) -> bool {
    if !arena.resolve_atom(name).starts_with('$') {
        return false;
    }
    catalog
        .declarations_of(name)
        .iter()
        .any(|d| arena.enclosing_function(d.node).is_none())
        || catalog
            .assignments_of(name)
            .iter()
            .any(|&a| arena.enclosing_function(a).is_none())
}

/// Classify one appearance of the aliased name by its parent.
///
/// Non-computed member properties and non-computed object keys are name
/// mentions, not usages of the binding, and are ignored rather than
/// rejected.
fn usage_is_safe(arena: &NodeArena, id: NodeId) -> bool {
    let parent = arena.parent(id);
    match arena.kind(parent) {
        Some(NodeKind::Declarator { pattern, .. }) => *pattern == id,
        Some(NodeKind::Assign { op, target, .. }) => *target == id && op.is_plain(),
        Some(NodeKind::Member { object, property, computed }) => {
            // Base position is safe; a non-computed property is a mere
            // mention; a computed property is an expression usage.
            *object == id || (*property == id && !*computed)
        }
        Some(NodeKind::Property { key, computed, .. }) => *key == id && !*computed,
        _ => false,
    }
}
