//! Arena storage for syntax tree nodes.
//!
//! Nodes are created bottom-up (children before parents); `add` records
//! the parent back-reference for every child the new node mentions. The
//! parent links are navigation-only: ownership always flows root-to-leaf
//! through the `NodeKind` child ids.

use super::node::{Node, NodeId, NodeKind, for_each_child};
use reshape_common::limits::{MAX_NODE_PREALLOC, MAX_TREE_WALK_ITERATIONS};
use reshape_common::{Atom, Interner, Span};
use smallvec::SmallVec;

#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
    parents: Vec<NodeId>,
    interner: Interner,
}

impl NodeArena {
    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    /// Create an arena with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> NodeArena {
        let safe_capacity = capacity.min(MAX_NODE_PREALLOC);
        NodeArena {
            nodes: Vec::with_capacity(safe_capacity),
            parents: Vec::with_capacity(safe_capacity),
            interner: Interner::default(),
        }
    }

    /// Set the interner (called after scanning to transfer ownership from
    /// the scanner).
    pub fn set_interner(&mut self, interner: Interner) {
        self.interner = interner;
    }

    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    #[inline]
    pub fn resolve_atom(&self, atom: Atom) -> &str {
        self.interner.resolve(atom)
    }

    /// Add a node. Parent pointers of all children mentioned by `kind` are
    /// set to the new node.
    pub fn add(&mut self, kind: NodeKind, span: Span) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        let mut children: SmallVec<[NodeId; 8]> = SmallVec::new();
        for_each_child(&kind, |child| children.push(child));
        self.nodes.push(Node::new(kind, span));
        self.parents.push(NodeId::NONE);
        for child in children {
            self.set_parent(child, id);
        }
        id
    }

    #[inline]
    fn set_parent(&mut self, child: NodeId, parent: NodeId) {
        if let Some(slot) = self.parents.get_mut(child.0 as usize) {
            *slot = parent;
        }
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    #[inline]
    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.get(id).map(|n| &n.kind)
    }

    #[inline]
    pub fn span(&self, id: NodeId) -> Span {
        self.get(id).map(|n| n.span).unwrap_or_default()
    }

    /// Parent of `id`, or `NodeId::NONE` for the root and unknown ids.
    #[inline]
    pub fn parent(&self, id: NodeId) -> NodeId {
        self.parents
            .get(id.0 as usize)
            .copied()
            .unwrap_or(NodeId::NONE)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append the present direct children of `id` to `out`.
    pub fn push_children(&self, id: NodeId, out: &mut Vec<NodeId>) {
        if let Some(node) = self.get(id) {
            for_each_child(&node.kind, |child| out.push(child));
        }
    }

    /// Walk the parent chain starting *above* `id`. The walk is capped so
    /// a corrupted (cyclic) parent link terminates instead of spinning.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            arena: self,
            current: self.parent(id),
            steps: 0,
        }
    }

    /// Whether `ancestor` lies on the parent chain of `node` (a node is
    /// not its own ancestor here).
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        if ancestor.is_none() {
            return false;
        }
        self.ancestors(node).any(|a| a == ancestor)
    }
}

pub struct Ancestors<'a> {
    arena: &'a NodeArena,
    current: NodeId,
    steps: u32,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        if self.current.is_none() || self.steps >= MAX_TREE_WALK_ITERATIONS {
            return None;
        }
        self.steps += 1;
        let current = self.current;
        self.current = self.arena.parent(current);
        Some(current)
    }
}
