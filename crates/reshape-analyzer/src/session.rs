//! Per-unit analyzer state.
//!
//! One `AnalyzerState` per tree per pass. It owns the lazily built
//! binding catalog and the alias memo table; both are valid only while
//! the tree is untouched, so a pass that mutates the tree must construct
//! a fresh state before querying again. There is deliberately no
//! process-wide cache: concurrent analysis of independent units is safe
//! because nothing is shared.

use crate::alias::resolve_wrapper_alias_uncached;
use crate::catalog::{BindingCatalog, Declaration};
use crate::equiv::nodes_equivalent;
use crate::mutability::{Mutability, classify_declarator};
use crate::options::RewriteOptions;
use crate::oracle;
use crate::shadow;
use reshape_common::Atom;
use reshape_parser::parser::{NodeArena, NodeId};
use rustc_hash::FxHashMap;

pub struct AnalyzerState<'a> {
    arena: &'a NodeArena,
    root: NodeId,
    options: RewriteOptions,
    catalog: Option<BindingCatalog>,
    alias_cache: FxHashMap<Atom, Option<NodeId>>,
}

impl<'a> AnalyzerState<'a> {
    pub fn new(arena: &'a NodeArena, root: NodeId) -> AnalyzerState<'a> {
        AnalyzerState::with_options(arena, root, RewriteOptions::default())
    }

    pub fn with_options(
        arena: &'a NodeArena,
        root: NodeId,
        options: RewriteOptions,
    ) -> AnalyzerState<'a> {
        AnalyzerState {
            arena,
            root,
            options,
            catalog: None,
            alias_cache: FxHashMap::default(),
        }
    }

    pub fn arena(&self) -> &'a NodeArena {
        self.arena
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn options(&self) -> &RewriteOptions {
        &self.options
    }

    fn ensure_catalog(&mut self) -> &BindingCatalog {
        if self.catalog.is_none() {
            self.catalog = Some(BindingCatalog::build(self.arena, self.root));
        }
        self.catalog.as_ref().expect("catalog built above")
    }

    /// The binding catalog for this unit, built on first use.
    pub fn catalog(&mut self) -> &BindingCatalog {
        self.ensure_catalog()
    }

    /// Declarations of `name` anywhere in the unit. Empty is a valid
    /// answer, not an error.
    pub fn bindings_of(&mut self, name: Atom) -> &[Declaration] {
        self.ensure_catalog();
        let catalog = self.catalog.as_ref().expect("catalog built above");
        catalog.declarations_of(name)
    }

    /// Whether a usage of `name` is intercepted by a declaration other
    /// than `original_decl` before the original binding is reached.
    pub fn is_shadowed(&mut self, usage: NodeId, name: Atom, original_decl: NodeId) -> bool {
        shadow::is_shadowed(self.arena, usage, name, original_decl)
    }

    /// May this declarator be declared immutably? See
    /// [`Mutability`] for the direction of conservatism.
    pub fn classify_declarator(&mut self, declarator: NodeId) -> Mutability {
        self.ensure_catalog();
        let arena = self.arena;
        let catalog = self.catalog.as_ref().expect("catalog built above");
        let verdict = classify_declarator(arena, catalog, declarator);
        tracing::trace!(declarator = declarator.0, ?verdict, "classified declarator");
        verdict
    }

    /// Resolve `name` to the argument of the wrapper call it is always
    /// initialized from, or `None` when that cannot be proven. Memoized
    /// per state: at most one resolution per name per unit.
    pub fn resolve_wrapper_alias(&mut self, name: Atom) -> Option<NodeId> {
        if let Some(&cached) = self.alias_cache.get(&name) {
            return cached;
        }
        self.ensure_catalog();
        let arena = self.arena;
        let root = self.root;
        let catalog = self.catalog.as_ref().expect("catalog built above");
        let resolved = resolve_wrapper_alias_uncached(arena, root, catalog, &self.options, name);
        tracing::debug!(
            name = %arena.resolve_atom(name),
            resolved = ?resolved.map(|n| n.0),
            "wrapper alias resolution"
        );
        self.alias_cache.insert(name, resolved);
        resolved
    }

    /// Purely syntactic equality of two subtrees.
    pub fn equivalent(&self, a: NodeId, b: NodeId) -> bool {
        nodes_equivalent(self.arena, a, b)
    }

    pub fn provably_iterable(&self, id: NodeId) -> bool {
        oracle::provably_iterable(self.arena, id)
    }

    pub fn provably_array_or_string(&self, id: NodeId) -> bool {
        oracle::provably_array_or_string(self.arena, id)
    }

    pub fn numeric_literal_value(&self, id: NodeId) -> Option<f64> {
        oracle::numeric_literal_value(self.arena, id)
    }
}
