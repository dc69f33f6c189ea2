//! Typed accessor helpers over the arena.
//!
//! These keep analysis code free of repeated `match` boilerplate for the
//! handful of shapes it digs into constantly.

use super::node::{NodeId, NodeKind};
use super::node_arena::NodeArena;
use reshape_common::Atom;

impl NodeArena {
    /// The atom of an identifier node, if `id` is one.
    pub fn ident_atom(&self, id: NodeId) -> Option<Atom> {
        match self.kind(id)? {
            NodeKind::Ident { name } => Some(*name),
            _ => None,
        }
    }

    /// The identifier text of `id`, if it is an identifier node.
    pub fn ident_text(&self, id: NodeId) -> Option<&str> {
        self.ident_atom(id).map(|a| self.resolve_atom(a))
    }

    pub fn is_function_like(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(|n| n.is_function_like())
    }

    /// Nearest enclosing function-like ancestor, or `NONE` when `id` sits
    /// at source-file level.
    pub fn enclosing_function(&self, id: NodeId) -> NodeId {
        self.ancestors(id)
            .find(|&a| self.is_function_like(a))
            .unwrap_or(NodeId::NONE)
    }

    /// Callee and arguments of a call expression.
    pub fn call_parts(&self, id: NodeId) -> Option<(NodeId, &[NodeId])> {
        match self.kind(id)? {
            NodeKind::Call { callee, args } => Some((*callee, args.as_slice())),
            _ => None,
        }
    }

    /// For a call whose callee is a bare identifier (`wrap(x)`), the
    /// callee atom and the arguments.
    pub fn ident_call_parts(&self, id: NodeId) -> Option<(Atom, &[NodeId])> {
        let (callee, args) = self.call_parts(id)?;
        Some((self.ident_atom(callee)?, args))
    }

    /// For a call whose callee is a non-computed member access with an
    /// identifier property (`base.method(args)`), the base, the method
    /// atom, and the arguments.
    pub fn method_call_parts(&self, id: NodeId) -> Option<(NodeId, Atom, &[NodeId])> {
        let (callee, args) = self.call_parts(id)?;
        match self.kind(callee)? {
            NodeKind::Member {
                object,
                property,
                computed: false,
            } => Some((*object, self.ident_atom(*property)?, args)),
            _ => None,
        }
    }

    /// For a callee shaped `Namespace.method` with both sides plain
    /// identifiers (`Array.of`, `Object.keys`), the two atoms as text.
    pub fn static_path_texts(&self, callee: NodeId) -> Option<(&str, &str)> {
        match self.kind(callee)? {
            NodeKind::Member {
                object,
                property,
                computed: false,
            } => {
                let ns = self.ident_atom(*object)?;
                let method = self.ident_atom(*property)?;
                Some((self.resolve_atom(ns), self.resolve_atom(method)))
            }
            _ => None,
        }
    }

    /// Pattern and initializer of a declarator node.
    pub fn declarator_parts(&self, id: NodeId) -> Option<(NodeId, NodeId)> {
        match self.kind(id)? {
            NodeKind::Declarator { pattern, init } => Some((*pattern, *init)),
            _ => None,
        }
    }

    /// Whether `declarator` is the loop variable of a `for-in`/`for-of`
    /// statement (its declaration list is the loop's left side).
    pub fn is_loop_declarator(&self, declarator: NodeId) -> bool {
        let decl_list = self.parent(declarator);
        if !matches!(self.kind(decl_list), Some(NodeKind::VarDecl { .. })) {
            return false;
        }
        match self.kind(self.parent(decl_list)) {
            Some(NodeKind::ForIn { left, .. }) | Some(NodeKind::ForOf { left, .. }) => {
                *left == decl_list
            }
            _ => false,
        }
    }
}
