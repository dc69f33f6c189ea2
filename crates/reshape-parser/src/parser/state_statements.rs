//! Statement and declaration productions.

use super::node::{FunctionKind, NodeId, NodeKind, VarFlavor};
use super::state_core::{ParseError, ParserState};
use reshape_scanner::TokenKind;

impl ParserState {
    pub(super) fn parse_statement(&mut self) -> Result<NodeId, ParseError> {
        self.enter()?;
        let result = match self.cur().kind {
            TokenKind::VarKeyword | TokenKind::LetKeyword | TokenKind::ConstKeyword => {
                self.parse_variable_statement()
            }
            TokenKind::FunctionKeyword => self.parse_function(FunctionKind::Declaration),
            TokenKind::OpenBrace => self.parse_block(),
            TokenKind::IfKeyword => self.parse_if_statement(),
            TokenKind::ForKeyword => self.parse_for_statement(),
            TokenKind::WhileKeyword => self.parse_while_statement(),
            TokenKind::DoKeyword => self.parse_do_statement(),
            TokenKind::ReturnKeyword => self.parse_return_statement(),
            TokenKind::BreakKeyword => self.parse_jump_statement(NodeKind::Break),
            TokenKind::ContinueKeyword => self.parse_jump_statement(NodeKind::Continue),
            TokenKind::Semicolon => {
                let span = self.bump().span;
                Ok(self.arena.add(NodeKind::EmptyStmt, span))
            }
            _ => self.parse_expression_statement(),
        };
        self.exit();
        result
    }

    fn parse_expression_statement(&mut self) -> Result<NodeId, ParseError> {
        let start = self.cur_span();
        let expr = self.parse_expression()?;
        self.semicolon()?;
        let span = self.finish_span(start);
        Ok(self.arena.add(NodeKind::ExprStmt { expr }, span))
    }

    pub(super) fn parse_block(&mut self) -> Result<NodeId, ParseError> {
        let start = self.expect(TokenKind::OpenBrace)?.span;
        let mut statements = Vec::new();
        while !self.at(TokenKind::CloseBrace) && !self.at(TokenKind::EndOfFile) {
            statements.push(self.parse_statement()?);
        }
        self.expect(TokenKind::CloseBrace)?;
        let span = self.finish_span(start);
        Ok(self.arena.add(NodeKind::Block { statements }, span))
    }

    // =========================================================================
    // Variable declarations
    // =========================================================================

    fn var_flavor(&mut self) -> VarFlavor {
        match self.bump().kind {
            TokenKind::VarKeyword => VarFlavor::Var,
            TokenKind::ConstKeyword => VarFlavor::Const,
            _ => VarFlavor::Let,
        }
    }

    fn parse_variable_statement(&mut self) -> Result<NodeId, ParseError> {
        let start = self.cur_span();
        let flavor = self.var_flavor();
        let mut declarators = vec![self.parse_declarator()?];
        while self.eat(TokenKind::Comma) {
            declarators.push(self.parse_declarator()?);
        }
        self.semicolon()?;
        let span = self.finish_span(start);
        Ok(self.arena.add(NodeKind::VarDecl { flavor, declarators }, span))
    }

    fn parse_declarator(&mut self) -> Result<NodeId, ParseError> {
        let start = self.cur_span();
        let pattern = self.parse_binding_pattern()?;
        let init = if self.eat(TokenKind::Equals) {
            self.parse_assignment_expr()?
        } else {
            NodeId::NONE
        };
        let span = self.finish_span(start);
        Ok(self.arena.add(NodeKind::Declarator { pattern, init }, span))
    }

    // =========================================================================
    // Functions
    // =========================================================================

    /// `function` declarations and expressions (arrows are parsed in the
    /// expression file).
    pub(super) fn parse_function(&mut self, kind: FunctionKind) -> Result<NodeId, ParseError> {
        let start = self.expect(TokenKind::FunctionKeyword)?.span;
        let name = if self.at(TokenKind::Identifier) {
            let tok = self.bump();
            self.arena
                .add(NodeKind::Ident { name: tok.atom }, tok.span)
        } else if kind == FunctionKind::Declaration {
            return Err(self.error_here("function declaration requires a name"));
        } else {
            NodeId::NONE
        };
        self.expect(TokenKind::OpenParen)?;
        let params = self.parse_param_list()?;
        self.expect(TokenKind::CloseParen)?;
        let body = self.parse_block()?;
        let span = self.finish_span(start);
        Ok(self
            .arena
            .add(NodeKind::Function { kind, name, params, body }, span))
    }

    pub(super) fn parse_param_list(&mut self) -> Result<Vec<NodeId>, ParseError> {
        let mut params = Vec::new();
        while !self.at(TokenKind::CloseParen) && !self.at(TokenKind::EndOfFile) {
            if self.at(TokenKind::DotDotDot) {
                let start = self.bump().span;
                let argument = self.parse_binding_pattern()?;
                let span = self.finish_span(start);
                params.push(self.arena.add(NodeKind::RestElement { argument }, span));
            } else {
                params.push(self.parse_pattern_with_default()?);
            }
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(params)
    }

    // =========================================================================
    // Control flow
    // =========================================================================

    fn parse_if_statement(&mut self) -> Result<NodeId, ParseError> {
        let start = self.expect(TokenKind::IfKeyword)?.span;
        self.expect(TokenKind::OpenParen)?;
        let test = self.parse_expression_allow_in()?;
        self.expect(TokenKind::CloseParen)?;
        let cons = self.parse_statement()?;
        let alt = if self.eat(TokenKind::ElseKeyword) {
            self.parse_statement()?
        } else {
            NodeId::NONE
        };
        let span = self.finish_span(start);
        Ok(self.arena.add(NodeKind::If { test, cons, alt }, span))
    }

    fn parse_while_statement(&mut self) -> Result<NodeId, ParseError> {
        let start = self.expect(TokenKind::WhileKeyword)?.span;
        self.expect(TokenKind::OpenParen)?;
        let test = self.parse_expression_allow_in()?;
        self.expect(TokenKind::CloseParen)?;
        let body = self.parse_statement()?;
        let span = self.finish_span(start);
        Ok(self.arena.add(NodeKind::While { test, body }, span))
    }

    fn parse_do_statement(&mut self) -> Result<NodeId, ParseError> {
        let start = self.expect(TokenKind::DoKeyword)?.span;
        let body = self.parse_statement()?;
        self.expect(TokenKind::WhileKeyword)?;
        self.expect(TokenKind::OpenParen)?;
        let test = self.parse_expression_allow_in()?;
        self.expect(TokenKind::CloseParen)?;
        self.semicolon()?;
        let span = self.finish_span(start);
        Ok(self.arena.add(NodeKind::DoWhile { body, test }, span))
    }

    fn parse_return_statement(&mut self) -> Result<NodeId, ParseError> {
        let start = self.expect(TokenKind::ReturnKeyword)?.span;
        // Restricted production: a line break after `return` ends it.
        let tok = self.cur();
        let argument = if tok.kind == TokenKind::Semicolon
            || tok.kind == TokenKind::CloseBrace
            || tok.kind == TokenKind::EndOfFile
            || tok.newline_before
        {
            NodeId::NONE
        } else {
            self.parse_expression()?
        };
        self.semicolon()?;
        let span = self.finish_span(start);
        Ok(self.arena.add(NodeKind::Return { argument }, span))
    }

    fn parse_jump_statement(&mut self, kind: NodeKind) -> Result<NodeId, ParseError> {
        let start = self.bump().span;
        self.semicolon()?;
        let span = self.finish_span(start);
        Ok(self.arena.add(kind, span))
    }

    // =========================================================================
    // for / for-in / for-of
    // =========================================================================

    fn parse_for_statement(&mut self) -> Result<NodeId, ParseError> {
        let start = self.expect(TokenKind::ForKeyword)?.span;
        self.expect(TokenKind::OpenParen)?;

        if self.eat(TokenKind::Semicolon) {
            return self.parse_classic_for_rest(start, NodeId::NONE);
        }

        if matches!(
            self.cur().kind,
            TokenKind::VarKeyword | TokenKind::LetKeyword | TokenKind::ConstKeyword
        ) {
            let decl_start = self.cur_span();
            let flavor = self.var_flavor();
            let pattern_start = self.cur_span();
            let pattern = self.parse_binding_pattern()?;

            // `for (let x of xs)` / `for (let x in obj)`: the single
            // declarator has no initializer.
            if self.at(TokenKind::InKeyword) || self.at_contextual("of") {
                let of = self.at_contextual("of");
                let declarator = self.arena.add(
                    NodeKind::Declarator { pattern, init: NodeId::NONE },
                    self.finish_span(pattern_start),
                );
                let left = self.arena.add(
                    NodeKind::VarDecl { flavor, declarators: vec![declarator] },
                    self.finish_span(decl_start),
                );
                self.bump();
                return self.parse_for_each_rest(start, left, of);
            }

            // Classic `for (let i = 0, n = xs.length; ...)`.
            let saved = std::mem::replace(&mut self.allow_in, false);
            let init = if self.eat(TokenKind::Equals) {
                self.parse_assignment_expr()?
            } else {
                NodeId::NONE
            };
            let mut declarators = vec![self
                .arena
                .add(NodeKind::Declarator { pattern, init }, self.finish_span(pattern_start))];
            while self.eat(TokenKind::Comma) {
                declarators.push(self.parse_declarator()?);
            }
            self.allow_in = saved;
            let decl = self.arena.add(
                NodeKind::VarDecl { flavor, declarators },
                self.finish_span(decl_start),
            );
            self.expect(TokenKind::Semicolon)?;
            return self.parse_classic_for_rest(start, decl);
        }

        // Expression head: `for (x of xs)`, `for (k in obj)`, or a classic
        // init expression.
        let saved = std::mem::replace(&mut self.allow_in, false);
        let head = self.parse_expression();
        self.allow_in = saved;
        let head = head?;

        if self.at(TokenKind::InKeyword) || self.at_contextual("of") {
            let of = self.at_contextual("of");
            self.bump();
            let left = self.to_assignment_target(head)?;
            return self.parse_for_each_rest(start, left, of);
        }
        self.expect(TokenKind::Semicolon)?;
        self.parse_classic_for_rest(start, head)
    }

    fn parse_classic_for_rest(
        &mut self,
        start: reshape_common::Span,
        init: NodeId,
    ) -> Result<NodeId, ParseError> {
        let test = if self.at(TokenKind::Semicolon) {
            NodeId::NONE
        } else {
            self.parse_expression_allow_in()?
        };
        self.expect(TokenKind::Semicolon)?;
        let update = if self.at(TokenKind::CloseParen) {
            NodeId::NONE
        } else {
            self.parse_expression_allow_in()?
        };
        self.expect(TokenKind::CloseParen)?;
        let body = self.parse_statement()?;
        let span = self.finish_span(start);
        Ok(self
            .arena
            .add(NodeKind::For { init, test, update, body }, span))
    }

    fn parse_for_each_rest(
        &mut self,
        start: reshape_common::Span,
        left: NodeId,
        of: bool,
    ) -> Result<NodeId, ParseError> {
        let right = self.parse_expression_allow_in()?;
        self.expect(TokenKind::CloseParen)?;
        let body = self.parse_statement()?;
        let span = self.finish_span(start);
        let kind = if of {
            NodeKind::ForOf { left, right, body }
        } else {
            NodeKind::ForIn { left, right, body }
        };
        Ok(self.arena.add(kind, span))
    }
}
