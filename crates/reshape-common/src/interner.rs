//! String interning for identifier and literal deduplication.
//!
//! Identifiers repeat constantly in real source text; interning them once
//! lets the rest of the pipeline compare names with a `u32` comparison and
//! key hash tables by `Atom` instead of by string.

use rustc_hash::FxHashMap;

/// A handle to an interned string.
///
/// Atoms are only meaningful together with the [`Interner`] that produced
/// them. Two atoms from the same interner are equal iff their strings are
/// equal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Atom(pub u32);

impl Atom {
    /// Sentinel for "no atom". Never returned by `Interner::intern`.
    pub const NONE: Atom = Atom(u32::MAX);

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }
}

/// Append-only string interner.
#[derive(Debug, Default)]
pub struct Interner {
    strings: Vec<String>,
    map: FxHashMap<String, Atom>,
}

impl Interner {
    pub fn new() -> Interner {
        Interner::default()
    }

    /// Intern a string, returning the existing atom if it was seen before.
    pub fn intern(&mut self, text: &str) -> Atom {
        if let Some(&atom) = self.map.get(text) {
            return atom;
        }
        let atom = Atom(self.strings.len() as u32);
        self.strings.push(text.to_string());
        self.map.insert(text.to_string(), atom);
        atom
    }

    /// Look up an already-interned string without inserting.
    pub fn lookup(&self, text: &str) -> Option<Atom> {
        self.map.get(text).copied()
    }

    /// Resolve an atom back to its string.
    ///
    /// `Atom::NONE` and out-of-range atoms resolve to the empty string;
    /// callers treat an empty name as "no name" rather than an error.
    pub fn resolve(&self, atom: Atom) -> &str {
        self.strings
            .get(atom.0 as usize)
            .map(|s| s.as_str())
            .unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_deduplicates() {
        let mut interner = Interner::new();
        let a = interner.intern("foo");
        let b = interner.intern("bar");
        let c = interner.intern("foo");
        assert_eq!(a, c);
        assert_ne!(a, b);
        assert_eq!(interner.resolve(a), "foo");
        assert_eq!(interner.resolve(b), "bar");
    }

    #[test]
    fn none_resolves_to_empty() {
        let interner = Interner::new();
        assert_eq!(interner.resolve(Atom::NONE), "");
        assert!(Atom::NONE.is_none());
    }

    #[test]
    fn lookup_does_not_insert() {
        let mut interner = Interner::new();
        assert_eq!(interner.lookup("x"), None);
        let a = interner.intern("x");
        assert_eq!(interner.lookup("x"), Some(a));
        assert_eq!(interner.len(), 1);
    }
}
