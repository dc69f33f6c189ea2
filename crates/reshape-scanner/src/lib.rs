//! JavaScript scanner/tokenizer for the reshape rewriter.
//!
//! This crate provides the lexical analysis phase:
//! - `TokenKind` - Token types
//! - `Token` - One scanned token with its span and payload
//! - `ScannerState` - Tokenizer state machine
//!
//! The scanner owns the string interner while scanning; the parser takes
//! it over afterwards so the arena can resolve identifier atoms.

mod scanner;
mod token;

pub use scanner::{ScanError, ScannerState};
pub use token::{Token, TokenKind};
