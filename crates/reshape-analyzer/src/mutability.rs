//! Mutability classifier: may a declarator be declared immutably?

use crate::catalog::{BindingCatalog, collect_bound_names};
use crate::shadow::is_shadowed;
use reshape_parser::parser::{NodeArena, NodeId};
use smallvec::SmallVec;

/// Verdict for one declarator. `NeverReassigned` is the proof obligation:
/// it must be correct, because a rule will rewrite the declaration to an
/// immutable form on its strength. `Reassigned` is always safe.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mutability {
    NeverReassigned,
    Reassigned,
}

impl Mutability {
    #[inline]
    pub const fn is_const_safe(self) -> bool {
        matches!(self, Mutability::NeverReassigned)
    }
}

/// Classify one `Declarator` node.
///
/// A declarator without an initializer cannot be immutable - except a
/// `for-in`/`for-of` loop declarator, which receives a value every
/// iteration. Otherwise the declarator is immutable-safe iff every
/// assignment and every `++`/`--` targeting any name it binds is shadowed
/// relative to it. For destructuring declarators one reassigned name
/// poisons the whole declarator.
pub fn classify_declarator(
    arena: &NodeArena,
    catalog: &BindingCatalog,
    declarator: NodeId,
) -> Mutability {
    let Some((pattern, init)) = arena.declarator_parts(declarator) else {
        // Not a declarator (or malformed): never prove immutability.
        return Mutability::Reassigned;
    };
    if init.is_none() && !arena.is_loop_declarator(declarator) {
        return Mutability::Reassigned;
    }

    let mut names: SmallVec<[(reshape_common::Atom, NodeId); 4]> = SmallVec::new();
    collect_bound_names(arena, pattern, &mut names);
    if names.is_empty() {
        return Mutability::Reassigned;
    }

    for &(name, _) in &names {
        let reassigned = catalog
            .assignments_of(name)
            .iter()
            .chain(catalog.updates_of(name))
            .any(|&site| !is_shadowed(arena, site, name, declarator));
        if reassigned {
            return Mutability::Reassigned;
        }
    }
    Mutability::NeverReassigned
}
