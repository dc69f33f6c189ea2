//! Parser internals: node model, arena storage, and the parser state
//! machine (split by production family, one file per area).

pub mod node;
pub mod node_access;
pub mod node_arena;
mod state_core;
mod state_expressions;
mod state_patterns;
mod state_statements;

pub use node::{
    AssignOp, BinaryOp, FunctionKind, Node, NodeId, NodeKind, UnaryOp, UpdateOp, VarFlavor,
};
pub use node_arena::NodeArena;
pub use state_core::{ParseError, ParserState};
