//! Conservative static-safety analysis for the reshape rewriter.
//!
//! Rewrite rules must prove, from tree shape alone, that a transformation
//! cannot change observable behavior before they fire. This crate answers
//! those questions:
//!
//! - [`AnalyzerState::classify_declarator`] - can a binding be declared
//!   immutably?
//! - [`AnalyzerState::resolve_wrapper_alias`] - which node is a wrapper
//!   variable interchangeable with?
//! - [`equiv::nodes_equivalent`] - are two expression subtrees
//!   syntactically identical?
//! - [`oracle`] - is an expression guaranteed by its syntax to expose a
//!   runtime capability (iteration, membership testing)?
//!
//! Every query is total and sound-but-incomplete: an answer of `false` /
//! `None` means "not provable" and is always safe, because the caller's
//! fallback is to decline the rewrite. Nothing here ever executes code,
//! folds constants, or looks across files.
//!
//! All per-unit state lives in an explicit [`AnalyzerState`] created for
//! one tree and discarded with it; there is no ambient cache. Callers that
//! mutate the tree must build a fresh state before querying again.

pub mod alias;
pub mod catalog;
pub mod equiv;
pub mod mutability;
pub mod options;
pub mod oracle;
pub mod session;
pub mod shadow;

pub use catalog::{BindingCatalog, Declaration, DeclarationKind, pattern_bound_names};
pub use equiv::nodes_equivalent;
pub use mutability::Mutability;
pub use options::RewriteOptions;
pub use session::AnalyzerState;
pub use shadow::is_shadowed;
