//! Capability oracle: syntactic proofs of runtime capabilities.
//!
//! Each predicate returns `true` only for a finite, explicitly enumerated
//! set of shapes guaranteed to carry the capability regardless of runtime
//! value. Nothing is ever inferred: extending an enumeration is a code
//! change, reviewed against the capability it claims. A bare identifier
//! proves nothing and always answers `false`.

use once_cell::sync::Lazy;
use reshape_parser::parser::{NodeArena, NodeId, NodeKind, UnaryOp};
use rustc_hash::FxHashSet;

/// Static operations that construct a real array from their arguments.
const ARRAY_STATIC_CONSTRUCTORS: &[(&str, &str)] = &[
    ("Array", "of"),
    ("Array", "from"),
    ("Object", "keys"),
    ("Object", "values"),
    ("Object", "entries"),
];

/// Methods that, invoked on a string literal, return an iterable.
/// `match` is deliberately absent: it can return `null`.
static STRING_LITERAL_ITERABLE_METHODS: Lazy<FxHashSet<&'static str>> =
    Lazy::new(|| ["split"].into_iter().collect());

/// Methods that map an array-or-string receiver to an array-or-string
/// result, so a chain of them preserves the capability of its base.
static ARRAY_OR_STRING_PRESERVING_METHODS: Lazy<FxHashSet<&'static str>> = Lazy::new(|| {
    [
        "concat",
        "slice",
        "filter",
        "map",
        "flat",
        "sort",
        "reverse",
        "split",
        "join",
        "trim",
        "trimStart",
        "trimEnd",
        "toLowerCase",
        "toUpperCase",
        "repeat",
        "replace",
        "substring",
    ]
    .into_iter()
    .collect()
});

/// A call like `Array.of(..)` / `Object.keys(..)`: both sides of the
/// callee must be plain identifiers.
fn is_array_constructing_call(arena: &NodeArena, id: NodeId) -> bool {
    let Some((callee, _)) = arena.call_parts(id) else {
        return false;
    };
    match arena.static_path_texts(callee) {
        Some((ns, method)) => ARRAY_STATIC_CONSTRUCTORS
            .iter()
            .any(|&(n, m)| n == ns && m == method),
        None => false,
    }
}

fn is_new_array(arena: &NodeArena, id: NodeId) -> bool {
    match arena.kind(id) {
        Some(NodeKind::New { callee, .. }) => arena.ident_text(*callee) == Some("Array"),
        _ => false,
    }
}

/// Provably iterable: an array literal, an array-constructing static
/// call, `new Array(..)`, or an iterable-returning method on a string
/// literal.
pub fn provably_iterable(arena: &NodeArena, id: NodeId) -> bool {
    match arena.kind(id) {
        Some(NodeKind::ArrayLit { .. }) => true,
        Some(NodeKind::New { .. }) => is_new_array(arena, id),
        Some(NodeKind::Call { .. }) => {
            if is_array_constructing_call(arena, id) {
                return true;
            }
            match arena.method_call_parts(id) {
                Some((base, method, _)) => {
                    matches!(arena.kind(base), Some(NodeKind::StringLit { .. }))
                        && STRING_LITERAL_ITERABLE_METHODS
                            .contains(arena.resolve_atom(method))
                }
                None => false,
            }
        }
        _ => false,
    }
}

/// Provably an array or a string - the shapes on which both a position
/// search (`indexOf`) and a membership test (`includes`) are guaranteed to
/// exist and agree. Gates rewriting linear searches into membership tests.
///
/// A chain of capability-preserving methods is walked iteratively down to
/// its base, which must itself pass.
pub fn provably_array_or_string(arena: &NodeArena, id: NodeId) -> bool {
    let mut current = id;
    loop {
        match arena.kind(current) {
            Some(NodeKind::ArrayLit { .. })
            | Some(NodeKind::StringLit { .. })
            | Some(NodeKind::TemplateLit { .. }) => return true,
            Some(NodeKind::New { .. }) => return is_new_array(arena, current),
            Some(NodeKind::Call { .. }) => {
                if is_array_constructing_call(arena, current) {
                    return true;
                }
                match arena.method_call_parts(current) {
                    Some((base, method, _))
                        if ARRAY_OR_STRING_PRESERVING_METHODS
                            .contains(arena.resolve_atom(method)) =>
                    {
                        // Children precede parents in the arena, so this
                        // walk strictly descends and terminates.
                        current = base;
                    }
                    _ => return false,
                }
            }
            _ => return false,
        }
    }
}

/// The numeric value of a literal, allowing one leading unary minus.
/// Anything else is "not a number" rather than an error.
pub fn numeric_literal_value(arena: &NodeArena, id: NodeId) -> Option<f64> {
    match arena.kind(id)? {
        NodeKind::NumberLit { value } => Some(*value),
        NodeKind::Unary { op: UnaryOp::Minus, operand } => match arena.kind(*operand)? {
            NodeKind::NumberLit { value } => Some(-value),
            _ => None,
        },
        _ => None,
    }
}
