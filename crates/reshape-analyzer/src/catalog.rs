//! Binding catalog: one scan of the unit, indexed by name.
//!
//! The catalog records where every name is declared, assigned, and
//! incremented/decremented. It is built once per analyzer state with an
//! explicit work stack (no native recursion) and never mutated afterwards.

use reshape_common::Atom;
use reshape_parser::parser::{FunctionKind, NodeArena, NodeId, NodeKind, VarFlavor};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// How a name was introduced. Function-scoped kinds hoist to the whole
/// enclosing function; block-scoped kinds bind only their block.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Var,
    Let,
    Const,
    Function,
    Param,
}

impl DeclarationKind {
    #[inline]
    pub const fn is_function_scoped(self) -> bool {
        matches!(
            self,
            DeclarationKind::Var | DeclarationKind::Function | DeclarationKind::Param
        )
    }
}

/// One declaration of a name.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    /// The declaring node: a `Declarator`, a `Function` declaration, or
    /// (for parameters) the binding identifier itself.
    pub node: NodeId,
    /// The identifier node inside the declaration that binds the name.
    pub name_node: NodeId,
    pub kind: DeclarationKind,
}

/// Per-name index over one unit. An absent entry is a valid answer: the
/// name is never declared/assigned/updated in this unit.
#[derive(Debug, Default)]
pub struct BindingCatalog {
    declarations: FxHashMap<Atom, Vec<Declaration>>,
    /// `Assign` nodes (plain or compound) whose target binds the name.
    assignments: FxHashMap<Atom, Vec<NodeId>>,
    /// `Update` (`++`/`--`) nodes whose target is the name.
    updates: FxHashMap<Atom, Vec<NodeId>>,
}

impl BindingCatalog {
    /// Scan the unit rooted at `root`.
    pub fn build(arena: &NodeArena, root: NodeId) -> BindingCatalog {
        let mut catalog = BindingCatalog::default();
        let mut stack = vec![root];
        let mut names: SmallVec<[(Atom, NodeId); 4]> = SmallVec::new();
        while let Some(id) = stack.pop() {
            let Some(node) = arena.get(id) else { continue };
            match &node.kind {
                NodeKind::VarDecl { flavor, declarators } => {
                    let kind = match flavor {
                        VarFlavor::Var => DeclarationKind::Var,
                        VarFlavor::Let => DeclarationKind::Let,
                        VarFlavor::Const => DeclarationKind::Const,
                    };
                    for &declarator in declarators {
                        if let Some((pattern, _)) = arena.declarator_parts(declarator) {
                            names.clear();
                            collect_bound_names(arena, pattern, &mut names);
                            for &(name, name_node) in &names {
                                catalog.declarations.entry(name).or_default().push(
                                    Declaration { node: declarator, name_node, kind },
                                );
                            }
                        }
                    }
                }
                NodeKind::Function { kind, name, params, .. } => {
                    // Only declaration names bind in the enclosing scope; a
                    // function expression's name is visible inside itself
                    // only.
                    if *kind == FunctionKind::Declaration && name.is_some() {
                        if let Some(atom) = arena.ident_atom(*name) {
                            catalog.declarations.entry(atom).or_default().push(Declaration {
                                node: id,
                                name_node: *name,
                                kind: DeclarationKind::Function,
                            });
                        }
                    }
                    for &param in params {
                        names.clear();
                        collect_bound_names(arena, param, &mut names);
                        for &(name, name_node) in &names {
                            catalog.declarations.entry(name).or_default().push(Declaration {
                                node: name_node,
                                name_node,
                                kind: DeclarationKind::Param,
                            });
                        }
                    }
                }
                NodeKind::Assign { target, .. } => {
                    names.clear();
                    collect_bound_names(arena, *target, &mut names);
                    for &(name, _) in &names {
                        catalog.assignments.entry(name).or_default().push(id);
                    }
                }
                NodeKind::Update { target, .. } => {
                    if let Some(name) = arena.ident_atom(*target) {
                        catalog.updates.entry(name).or_default().push(id);
                    }
                }
                _ => {}
            }
            arena.push_children(id, &mut stack);
        }
        tracing::debug!(
            declared_names = catalog.declarations.len(),
            assigned_names = catalog.assignments.len(),
            updated_names = catalog.updates.len(),
            "binding catalog built"
        );
        catalog
    }

    pub fn declarations_of(&self, name: Atom) -> &[Declaration] {
        self.declarations.get(&name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn assignments_of(&self, name: Atom) -> &[NodeId] {
        self.assignments.get(&name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn updates_of(&self, name: Atom) -> &[NodeId] {
        self.updates.get(&name).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Append every `(name, identifier node)` bound by `pattern` to `out`.
///
/// Handles plain identifiers, array/object patterns, defaults, and rest
/// elements, iteratively. Member-expression targets (`[a.b] = xs`) write a
/// property, not a name, and contribute nothing. Property keys are name
/// mentions, not bindings.
pub fn pattern_bound_names(arena: &NodeArena, pattern: NodeId) -> Vec<(Atom, NodeId)> {
    let mut out = SmallVec::new();
    collect_bound_names(arena, pattern, &mut out);
    out.into_vec()
}

pub(crate) fn collect_bound_names(
    arena: &NodeArena,
    pattern: NodeId,
    out: &mut SmallVec<[(Atom, NodeId); 4]>,
) {
    let mut stack: SmallVec<[NodeId; 8]> = SmallVec::new();
    stack.push(pattern);
    while let Some(id) = stack.pop() {
        let Some(node) = arena.get(id) else { continue };
        match &node.kind {
            NodeKind::Ident { name } => out.push((*name, id)),
            NodeKind::ArrayPattern { elements } => {
                stack.extend(elements.iter().copied().filter(|e| e.is_some()));
            }
            NodeKind::ObjectPattern { properties } => {
                stack.extend(properties.iter().copied().filter(|p| p.is_some()));
            }
            NodeKind::Property { value, .. } => stack.push(*value),
            NodeKind::RestElement { argument } => stack.push(*argument),
            NodeKind::AssignPattern { target, .. } => stack.push(*target),
            // `[a.b] = xs` assigns a property, not a name.
            NodeKind::Member { .. } => {}
            _ => {}
        }
    }
}
