//! Structural equivalence of expression subtrees.
//!
//! Purely syntactic: `1 + 1` is never equivalent to `2`. Only the shapes a
//! wrapper argument can usefully take are compared structurally
//! (identifiers, literals, member accesses, calls); every other kind pair
//! answers `false`, which only ever declines a rewrite.

use reshape_parser::parser::{NodeArena, NodeId, NodeKind};

/// Whether `a` and `b` are syntactically identical subtrees.
///
/// The same node is equivalent to itself regardless of kind. Traversal
/// uses an explicit pair stack, so depth is bounded by heap, not the call
/// stack.
pub fn nodes_equivalent(arena: &NodeArena, a: NodeId, b: NodeId) -> bool {
    let mut stack = vec![(a, b)];
    while let Some((a, b)) = stack.pop() {
        if a == b {
            // Identity (also covers two absent children).
            continue;
        }
        if a.is_none() || b.is_none() {
            return false;
        }
        let (Some(na), Some(nb)) = (arena.get(a), arena.get(b)) else {
            return false;
        };
        match (&na.kind, &nb.kind) {
            (NodeKind::Ident { name: x }, NodeKind::Ident { name: y }) => {
                if x != y {
                    return false;
                }
            }
            (NodeKind::NumberLit { value: x }, NodeKind::NumberLit { value: y }) => {
                if x != y {
                    return false;
                }
            }
            (NodeKind::StringLit { value: x }, NodeKind::StringLit { value: y }) => {
                if x != y {
                    return false;
                }
            }
            (NodeKind::BoolLit { value: x }, NodeKind::BoolLit { value: y }) => {
                if x != y {
                    return false;
                }
            }
            (NodeKind::NullLit, NodeKind::NullLit) => {}
            (
                NodeKind::Member { object: o1, property: p1, computed: c1 },
                NodeKind::Member { object: o2, property: p2, computed: c2 },
            ) => {
                if c1 != c2 {
                    return false;
                }
                stack.push((*o1, *o2));
                stack.push((*p1, *p2));
            }
            (
                NodeKind::Call { callee: f1, args: a1 },
                NodeKind::Call { callee: f2, args: a2 },
            ) => {
                if a1.len() != a2.len() {
                    return false;
                }
                stack.push((*f1, *f2));
                for (&x, &y) in a1.iter().zip(a2.iter()) {
                    stack.push((x, y));
                }
            }
            // Any other kind pair: not comparable, conservatively unequal.
            _ => return false,
        }
    }
    true
}
