//! Parser state: token cursor, error type, and the source-file entry
//! point. Statement, expression and pattern productions live in the
//! sibling `state_*` files.

use super::node::{NodeId, NodeKind};
use super::node_arena::NodeArena;
use reshape_common::Span;
use reshape_common::limits::MAX_PARSE_DEPTH;
use reshape_scanner::{ScanError, ScannerState, Token, TokenKind};
use std::fmt;

/// Parse failure. The rewriter declines whole files it cannot parse;
/// analyzing a misparsed tree could prove the wrong program safe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}..{}", self.message, self.span.start, self.span.end)
    }
}

impl std::error::Error for ParseError {}

impl From<ScanError> for ParseError {
    fn from(e: ScanError) -> ParseError {
        ParseError {
            message: e.message,
            span: e.span,
        }
    }
}

pub struct ParserState {
    source: String,
    pub(super) tokens: Vec<Token>,
    pub(super) pos: usize,
    pub(super) arena: NodeArena,
    pub(super) depth: u32,
    /// `in` is not a binary operator while parsing a `for (...)` head.
    pub(super) allow_in: bool,
    pub(super) prev_span: Span,
}

impl ParserState {
    pub fn new(source: impl Into<String>) -> ParserState {
        let source = source.into();
        ParserState {
            arena: NodeArena::with_capacity(source.len() / 8),
            source,
            tokens: Vec::new(),
            pos: 0,
            depth: 0,
            allow_in: true,
            prev_span: Span::default(),
        }
    }

    pub fn get_arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn into_arena(self) -> NodeArena {
        self.arena
    }

    /// Tokenize and parse the whole input, returning the `SourceFile`
    /// root.
    pub fn parse_source_file(&mut self) -> Result<NodeId, ParseError> {
        let mut scanner = ScannerState::new(&self.source);
        self.tokens = scanner.scan_all()?;
        self.arena.set_interner(scanner.take_interner());
        self.pos = 0;

        let mut statements = Vec::new();
        while !self.at(TokenKind::EndOfFile) {
            statements.push(self.parse_statement()?);
        }
        let span = Span::new(0, self.source.len() as u32);
        let root = self.arena.add(NodeKind::SourceFile { statements }, span);
        tracing::debug!(nodes = self.arena.len(), "parsed source file");
        Ok(root)
    }

    // =========================================================================
    // Token cursor
    // =========================================================================

    #[inline]
    pub(super) fn cur(&self) -> Token {
        self.tokens
            .get(self.pos)
            .copied()
            .unwrap_or_else(|| *self.tokens.last().expect("token stream has EOF"))
    }

    #[inline]
    pub(super) fn peek(&self, ahead: usize) -> Token {
        self.tokens
            .get(self.pos + ahead)
            .copied()
            .unwrap_or_else(|| *self.tokens.last().expect("token stream has EOF"))
    }

    #[inline]
    pub(super) fn at(&self, kind: TokenKind) -> bool {
        self.cur().kind == kind
    }

    /// Contextual keyword check (`of`).
    pub(super) fn at_contextual(&self, word: &str) -> bool {
        let tok = self.cur();
        tok.kind == TokenKind::Identifier && self.arena.resolve_atom(tok.atom) == word
    }

    pub(super) fn bump(&mut self) -> Token {
        let tok = self.cur();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        self.prev_span = tok.span;
        tok
    }

    pub(super) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.bump();
            return true;
        }
        false
    }

    pub(super) fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.at(kind) {
            return Ok(self.bump());
        }
        Err(self.error_here(format!("expected {kind:?}, found {:?}", self.cur().kind)))
    }

    pub(super) fn error_here(&self, message: impl Into<String>) -> ParseError {
        ParseError {
            message: message.into(),
            span: self.cur().span,
        }
    }

    // =========================================================================
    // Spans and guards
    // =========================================================================

    #[inline]
    pub(super) fn cur_span(&self) -> Span {
        self.cur().span
    }

    /// Span from `start` through the last consumed token.
    #[inline]
    pub(super) fn finish_span(&self, start: Span) -> Span {
        start.merge(self.prev_span)
    }

    /// Nesting guard: the parser recurses with input depth, so cap it.
    pub(super) fn enter(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > MAX_PARSE_DEPTH {
            return Err(self.error_here("input nesting too deep"));
        }
        Ok(())
    }

    #[inline]
    pub(super) fn exit(&mut self) {
        self.depth -= 1;
    }

    /// Automatic semicolon insertion: a statement may end at an explicit
    /// `;`, before `}`, at end of input, or at a line break.
    pub(super) fn semicolon(&mut self) -> Result<(), ParseError> {
        if self.eat(TokenKind::Semicolon) {
            return Ok(());
        }
        let tok = self.cur();
        if tok.kind == TokenKind::CloseBrace
            || tok.kind == TokenKind::EndOfFile
            || tok.newline_before
        {
            return Ok(());
        }
        Err(self.error_here("expected `;`"))
    }

    /// Parse a full sub-expression in a bracketed context where the `in`
    /// restriction does not apply.
    pub(super) fn parse_expression_allow_in(&mut self) -> Result<NodeId, ParseError> {
        let saved = std::mem::replace(&mut self.allow_in, true);
        let result = self.parse_expression();
        self.allow_in = saved;
        result
    }
}
