//! JavaScript parser and AST types for the reshape rewriter.
//!
//! This crate provides:
//! - `NodeArena` - Arena storage for syntax tree nodes with parent
//!   back-references
//! - `NodeKind` - The closed sum type of node shapes; every analysis
//!   predicate matches it exhaustively, so adding a node kind forces each
//!   predicate to be revisited at compile time
//! - `ParserState` - Recursive-descent parser producing `SourceFile` roots
//!
//! The tree is immutable once built: the parser is the only writer, and
//! everything downstream takes `&NodeArena`.

pub mod parser;
