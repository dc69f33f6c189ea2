//! Expression productions: precedence climbing for binary operators,
//! member/call chains, and the literal forms.

use super::node::{
    AssignOp, BinaryOp, FunctionKind, NodeId, NodeKind, UnaryOp, UpdateOp,
};
use super::state_core::{ParseError, ParserState};
use reshape_scanner::TokenKind;

impl ParserState {
    pub(super) fn parse_expression(&mut self) -> Result<NodeId, ParseError> {
        self.parse_assignment_expr()
    }

    pub(super) fn parse_assignment_expr(&mut self) -> Result<NodeId, ParseError> {
        self.enter()?;
        let result = self.parse_assignment_expr_inner();
        self.exit();
        result
    }

    fn parse_assignment_expr_inner(&mut self) -> Result<NodeId, ParseError> {
        // Arrow functions: `x => ...` and `(a, b) => ...`.
        if self.at(TokenKind::Identifier)
            && self.peek(1).kind == TokenKind::Arrow
            && !self.peek(1).newline_before
        {
            return self.parse_arrow_function();
        }
        if self.at(TokenKind::OpenParen) && self.paren_starts_arrow_params() {
            return self.parse_arrow_function();
        }

        let start = self.cur_span();
        let left = self.parse_conditional_expr()?;
        let op_kind = self.cur().kind;
        if !op_kind.is_assignment_operator() {
            return Ok(left);
        }
        self.bump();
        let op = assign_op(op_kind);
        let target = if op.is_plain() {
            // Plain `=` accepts destructuring targets.
            self.to_assignment_target(left)?
        } else {
            self.require_simple_target(left)?
        };
        let value = self.parse_assignment_expr()?;
        let span = self.finish_span(start);
        Ok(self.arena.add(NodeKind::Assign { op, target, value }, span))
    }

    fn parse_conditional_expr(&mut self) -> Result<NodeId, ParseError> {
        let start = self.cur_span();
        let test = self.parse_binary_expr(1)?;
        if !self.eat(TokenKind::Question) {
            return Ok(test);
        }
        let saved = std::mem::replace(&mut self.allow_in, true);
        let cons = self.parse_assignment_expr();
        self.allow_in = saved;
        let cons = cons?;
        self.expect(TokenKind::Colon)?;
        let alt = self.parse_assignment_expr()?;
        let span = self.finish_span(start);
        Ok(self.arena.add(NodeKind::Cond { test, cons, alt }, span))
    }

    fn parse_binary_expr(&mut self, min_prec: u8) -> Result<NodeId, ParseError> {
        let start = self.cur_span();
        let mut left = self.parse_unary_expr()?;
        loop {
            let Some((prec, op, right_assoc)) = binary_op_info(self.cur().kind) else {
                break;
            };
            if op == BinaryOp::In && !self.allow_in {
                break;
            }
            if prec < min_prec {
                break;
            }
            self.bump();
            let next_min = if right_assoc { prec } else { prec + 1 };
            let right = self.parse_binary_expr(next_min)?;
            let span = self.finish_span(start);
            left = self.arena.add(NodeKind::Binary { op, left, right }, span);
        }
        Ok(left)
    }

    fn parse_unary_expr(&mut self) -> Result<NodeId, ParseError> {
        self.enter()?;
        let result = self.parse_unary_expr_inner();
        self.exit();
        result
    }

    fn parse_unary_expr_inner(&mut self) -> Result<NodeId, ParseError> {
        let start = self.cur_span();
        let unary = match self.cur().kind {
            TokenKind::Minus => Some(UnaryOp::Minus),
            TokenKind::Plus => Some(UnaryOp::Plus),
            TokenKind::Exclamation => Some(UnaryOp::Not),
            TokenKind::Tilde => Some(UnaryOp::BitNot),
            TokenKind::TypeofKeyword => Some(UnaryOp::Typeof),
            TokenKind::VoidKeyword => Some(UnaryOp::Void),
            TokenKind::DeleteKeyword => Some(UnaryOp::Delete),
            _ => None,
        };
        if let Some(op) = unary {
            self.bump();
            let operand = self.parse_unary_expr()?;
            let span = self.finish_span(start);
            return Ok(self.arena.add(NodeKind::Unary { op, operand }, span));
        }

        if matches!(self.cur().kind, TokenKind::PlusPlus | TokenKind::MinusMinus) {
            let op = update_op(self.bump().kind);
            let target = self.parse_unary_expr()?;
            let target = self.require_simple_target(target)?;
            let span = self.finish_span(start);
            return Ok(self
                .arena
                .add(NodeKind::Update { op, prefix: true, target }, span));
        }

        self.parse_postfix_expr()
    }

    fn parse_postfix_expr(&mut self) -> Result<NodeId, ParseError> {
        let start = self.cur_span();
        let base = self.parse_primary_or_new()?;
        let expr = self.parse_call_chain(base, start)?;
        // Restricted production: no line break before postfix `++`/`--`.
        let tok = self.cur();
        if matches!(tok.kind, TokenKind::PlusPlus | TokenKind::MinusMinus) && !tok.newline_before {
            let op = update_op(self.bump().kind);
            let target = self.require_simple_target(expr)?;
            let span = self.finish_span(start);
            return Ok(self
                .arena
                .add(NodeKind::Update { op, prefix: false, target }, span));
        }
        Ok(expr)
    }

    // =========================================================================
    // Member/call chains and `new`
    // =========================================================================

    fn parse_call_chain(
        &mut self,
        mut expr: NodeId,
        start: reshape_common::Span,
    ) -> Result<NodeId, ParseError> {
        loop {
            match self.cur().kind {
                TokenKind::Dot => {
                    self.bump();
                    let tok = self.expect(TokenKind::Identifier)?;
                    let property = self
                        .arena
                        .add(NodeKind::Ident { name: tok.atom }, tok.span);
                    let span = self.finish_span(start);
                    expr = self.arena.add(
                        NodeKind::Member { object: expr, property, computed: false },
                        span,
                    );
                }
                TokenKind::OpenBracket => {
                    self.bump();
                    let property = self.parse_expression_allow_in()?;
                    self.expect(TokenKind::CloseBracket)?;
                    let span = self.finish_span(start);
                    expr = self.arena.add(
                        NodeKind::Member { object: expr, property, computed: true },
                        span,
                    );
                }
                TokenKind::OpenParen => {
                    let args = self.parse_arguments()?;
                    let span = self.finish_span(start);
                    expr = self
                        .arena
                        .add(NodeKind::Call { callee: expr, args }, span);
                }
                _ => return Ok(expr),
            }
        }
    }

    fn parse_primary_or_new(&mut self) -> Result<NodeId, ParseError> {
        if self.at(TokenKind::NewKeyword) {
            return self.parse_new_expr();
        }
        self.parse_primary_expr()
    }

    fn parse_new_expr(&mut self) -> Result<NodeId, ParseError> {
        let start = self.expect(TokenKind::NewKeyword)?.span;
        let mut callee = self.parse_primary_or_new()?;
        // Member accesses bind to the callee; the first `(` ends it.
        loop {
            match self.cur().kind {
                TokenKind::Dot => {
                    self.bump();
                    let tok = self.expect(TokenKind::Identifier)?;
                    let property = self
                        .arena
                        .add(NodeKind::Ident { name: tok.atom }, tok.span);
                    let span = self.finish_span(start);
                    callee = self.arena.add(
                        NodeKind::Member { object: callee, property, computed: false },
                        span,
                    );
                }
                TokenKind::OpenBracket => {
                    self.bump();
                    let property = self.parse_expression_allow_in()?;
                    self.expect(TokenKind::CloseBracket)?;
                    let span = self.finish_span(start);
                    callee = self.arena.add(
                        NodeKind::Member { object: callee, property, computed: true },
                        span,
                    );
                }
                _ => break,
            }
        }
        let args = if self.at(TokenKind::OpenParen) {
            self.parse_arguments()?
        } else {
            Vec::new()
        };
        let span = self.finish_span(start);
        Ok(self.arena.add(NodeKind::New { callee, args }, span))
    }

    fn parse_arguments(&mut self) -> Result<Vec<NodeId>, ParseError> {
        self.expect(TokenKind::OpenParen)?;
        let saved = std::mem::replace(&mut self.allow_in, true);
        let mut args = Vec::new();
        let result = loop {
            if self.at(TokenKind::CloseParen) {
                break Ok(());
            }
            let arg = if self.at(TokenKind::DotDotDot) {
                let spread_start = self.bump().span;
                match self.parse_assignment_expr() {
                    Ok(argument) => {
                        let span = self.finish_span(spread_start);
                        self.arena.add(NodeKind::Spread { argument }, span)
                    }
                    Err(e) => break Err(e),
                }
            } else {
                match self.parse_assignment_expr() {
                    Ok(a) => a,
                    Err(e) => break Err(e),
                }
            };
            args.push(arg);
            if !self.eat(TokenKind::Comma) {
                break Ok(());
            }
        };
        self.allow_in = saved;
        result?;
        self.expect(TokenKind::CloseParen)?;
        Ok(args)
    }

    // =========================================================================
    // Primary expressions
    // =========================================================================

    fn parse_primary_expr(&mut self) -> Result<NodeId, ParseError> {
        let tok = self.cur();
        match tok.kind {
            TokenKind::Identifier => {
                self.bump();
                Ok(self.arena.add(NodeKind::Ident { name: tok.atom }, tok.span))
            }
            TokenKind::NumberLiteral => {
                self.bump();
                Ok(self
                    .arena
                    .add(NodeKind::NumberLit { value: tok.number }, tok.span))
            }
            TokenKind::StringLiteral => {
                self.bump();
                Ok(self
                    .arena
                    .add(NodeKind::StringLit { value: tok.atom }, tok.span))
            }
            TokenKind::TrueKeyword => {
                self.bump();
                Ok(self.arena.add(NodeKind::BoolLit { value: true }, tok.span))
            }
            TokenKind::FalseKeyword => {
                self.bump();
                Ok(self.arena.add(NodeKind::BoolLit { value: false }, tok.span))
            }
            TokenKind::NullKeyword => {
                self.bump();
                Ok(self.arena.add(NodeKind::NullLit, tok.span))
            }
            TokenKind::ThisKeyword => {
                self.bump();
                Ok(self.arena.add(NodeKind::ThisExpr, tok.span))
            }
            TokenKind::NoSubstitutionTemplate => {
                self.bump();
                Ok(self.arena.add(
                    NodeKind::TemplateLit { quasis: vec![tok.atom], exprs: Vec::new() },
                    tok.span,
                ))
            }
            TokenKind::TemplateHead => self.parse_template_literal(),
            TokenKind::OpenBracket => self.parse_array_literal(),
            TokenKind::OpenBrace => self.parse_object_literal(),
            TokenKind::OpenParen => {
                self.bump();
                let expr = self.parse_expression_allow_in()?;
                self.expect(TokenKind::CloseParen)?;
                // Parenthesized expressions do not materialize a node.
                Ok(expr)
            }
            TokenKind::FunctionKeyword => self.parse_function(FunctionKind::Expression),
            _ => Err(self.error_here(format!("unexpected token {:?}", tok.kind))),
        }
    }

    fn parse_template_literal(&mut self) -> Result<NodeId, ParseError> {
        let head = self.expect(TokenKind::TemplateHead)?;
        let start = head.span;
        let mut quasis = vec![head.atom];
        let mut exprs = Vec::new();
        loop {
            exprs.push(self.parse_expression_allow_in()?);
            let tok = self.cur();
            match tok.kind {
                TokenKind::TemplateMiddle => {
                    self.bump();
                    quasis.push(tok.atom);
                }
                TokenKind::TemplateTail => {
                    self.bump();
                    quasis.push(tok.atom);
                    let span = self.finish_span(start);
                    return Ok(self.arena.add(NodeKind::TemplateLit { quasis, exprs }, span));
                }
                _ => return Err(self.error_here("unterminated template literal")),
            }
        }
    }

    fn parse_array_literal(&mut self) -> Result<NodeId, ParseError> {
        let start = self.expect(TokenKind::OpenBracket)?.span;
        let saved = std::mem::replace(&mut self.allow_in, true);
        let mut elements = Vec::new();
        let result = loop {
            if self.at(TokenKind::CloseBracket) {
                break Ok(());
            }
            if self.at(TokenKind::Comma) {
                // Elision: `[a, , b]`.
                self.bump();
                elements.push(NodeId::NONE);
                continue;
            }
            let elem = if self.at(TokenKind::DotDotDot) {
                let spread_start = self.bump().span;
                match self.parse_assignment_expr() {
                    Ok(argument) => {
                        let span = self.finish_span(spread_start);
                        self.arena.add(NodeKind::Spread { argument }, span)
                    }
                    Err(e) => break Err(e),
                }
            } else {
                match self.parse_assignment_expr() {
                    Ok(e) => e,
                    Err(e) => break Err(e),
                }
            };
            elements.push(elem);
            if !self.eat(TokenKind::Comma) {
                break Ok(());
            }
        };
        self.allow_in = saved;
        result?;
        self.expect(TokenKind::CloseBracket)?;
        let span = self.finish_span(start);
        Ok(self.arena.add(NodeKind::ArrayLit { elements }, span))
    }

    fn parse_object_literal(&mut self) -> Result<NodeId, ParseError> {
        let start = self.expect(TokenKind::OpenBrace)?.span;
        let saved = std::mem::replace(&mut self.allow_in, true);
        let mut properties = Vec::new();
        let result = loop {
            if self.at(TokenKind::CloseBrace) {
                break Ok(());
            }
            match self.parse_object_member() {
                Ok(p) => properties.push(p),
                Err(e) => break Err(e),
            }
            if !self.eat(TokenKind::Comma) {
                break Ok(());
            }
        };
        self.allow_in = saved;
        result?;
        self.expect(TokenKind::CloseBrace)?;
        let span = self.finish_span(start);
        Ok(self.arena.add(NodeKind::ObjectLit { properties }, span))
    }

    fn parse_object_member(&mut self) -> Result<NodeId, ParseError> {
        if self.at(TokenKind::DotDotDot) {
            let start = self.bump().span;
            let argument = self.parse_assignment_expr()?;
            let span = self.finish_span(start);
            return Ok(self.arena.add(NodeKind::Spread { argument }, span));
        }

        let start = self.cur_span();
        let (key, computed) = self.parse_property_key()?;
        if computed || self.at(TokenKind::Colon) {
            self.expect(TokenKind::Colon)?;
            let value = self.parse_assignment_expr()?;
            let span = self.finish_span(start);
            return Ok(self.arena.add(
                NodeKind::Property { key, value, computed, shorthand: false },
                span,
            ));
        }

        // Shorthand `{a}`: the value is a fresh identifier node with the
        // key's name.
        let name = self
            .arena
            .ident_atom(key)
            .ok_or_else(|| self.error_here("expected `:` after property key"))?;
        let key_span = self.arena.span(key);
        let value = self.arena.add(NodeKind::Ident { name }, key_span);
        let span = self.finish_span(start);
        Ok(self.arena.add(
            NodeKind::Property { key, value, computed: false, shorthand: true },
            span,
        ))
    }

    pub(super) fn parse_property_key(&mut self) -> Result<(NodeId, bool), ParseError> {
        let tok = self.cur();
        match tok.kind {
            TokenKind::Identifier => {
                self.bump();
                Ok((self.arena.add(NodeKind::Ident { name: tok.atom }, tok.span), false))
            }
            TokenKind::StringLiteral => {
                self.bump();
                Ok((
                    self.arena
                        .add(NodeKind::StringLit { value: tok.atom }, tok.span),
                    false,
                ))
            }
            TokenKind::NumberLiteral => {
                self.bump();
                Ok((
                    self.arena
                        .add(NodeKind::NumberLit { value: tok.number }, tok.span),
                    false,
                ))
            }
            TokenKind::OpenBracket => {
                self.bump();
                let key = self.parse_expression_allow_in()?;
                self.expect(TokenKind::CloseBracket)?;
                Ok((key, true))
            }
            _ => Err(self.error_here("expected property key")),
        }
    }

    // =========================================================================
    // Arrow functions
    // =========================================================================

    /// Look ahead from an `(` to decide whether it opens an arrow
    /// parameter list: find the matching `)` and check for `=>`.
    fn paren_starts_arrow_params(&self) -> bool {
        let mut depth = 0usize;
        let mut i = self.pos;
        while let Some(tok) = self.tokens.get(i) {
            match tok.kind {
                TokenKind::OpenParen | TokenKind::OpenBracket | TokenKind::OpenBrace => depth += 1,
                TokenKind::CloseParen | TokenKind::CloseBracket | TokenKind::CloseBrace => {
                    if depth == 0 {
                        return false;
                    }
                    depth -= 1;
                    if depth == 0 && tok.kind == TokenKind::CloseParen {
                        return self
                            .tokens
                            .get(i + 1)
                            .is_some_and(|t| t.kind == TokenKind::Arrow);
                    }
                }
                TokenKind::EndOfFile => return false,
                _ => {}
            }
            i += 1;
        }
        false
    }

    fn parse_arrow_function(&mut self) -> Result<NodeId, ParseError> {
        let start = self.cur_span();
        let params = if self.at(TokenKind::Identifier) {
            let tok = self.bump();
            vec![self.arena.add(NodeKind::Ident { name: tok.atom }, tok.span)]
        } else {
            self.expect(TokenKind::OpenParen)?;
            let params = self.parse_param_list()?;
            self.expect(TokenKind::CloseParen)?;
            params
        };
        self.expect(TokenKind::Arrow)?;
        let body = if self.at(TokenKind::OpenBrace) {
            self.parse_block()?
        } else {
            self.parse_assignment_expr()?
        };
        let span = self.finish_span(start);
        Ok(self.arena.add(
            NodeKind::Function {
                kind: FunctionKind::Arrow,
                name: NodeId::NONE,
                params,
                body,
            },
            span,
        ))
    }

    // =========================================================================
    // Assignment targets
    // =========================================================================

    /// Identifiers and member accesses; everything else is rejected.
    pub(super) fn require_simple_target(&self, expr: NodeId) -> Result<NodeId, ParseError> {
        match self.arena.kind(expr) {
            Some(NodeKind::Ident { .. }) | Some(NodeKind::Member { .. }) => Ok(expr),
            _ => Err(ParseError {
                message: "invalid assignment target".to_string(),
                span: self.arena.span(expr),
            }),
        }
    }
}

const fn assign_op(kind: TokenKind) -> AssignOp {
    match kind {
        TokenKind::Equals => AssignOp::Assign,
        TokenKind::PlusEquals => AssignOp::AddAssign,
        TokenKind::MinusEquals => AssignOp::SubAssign,
        TokenKind::AsteriskEquals => AssignOp::MulAssign,
        TokenKind::AsteriskAsteriskEquals => AssignOp::ExpAssign,
        TokenKind::SlashEquals => AssignOp::DivAssign,
        TokenKind::PercentEquals => AssignOp::ModAssign,
        TokenKind::AmpersandEquals => AssignOp::BitAndAssign,
        TokenKind::BarEquals => AssignOp::BitOrAssign,
        TokenKind::CaretEquals => AssignOp::BitXorAssign,
        TokenKind::LessThanLessThanEquals => AssignOp::ShlAssign,
        TokenKind::GreaterThanGreaterThanEquals => AssignOp::ShrAssign,
        TokenKind::GreaterThanGreaterThanGreaterThanEquals => AssignOp::UShrAssign,
        TokenKind::AmpersandAmpersandEquals => AssignOp::AndAssign,
        TokenKind::BarBarEquals => AssignOp::OrAssign,
        _ => AssignOp::CoalesceAssign,
    }
}

const fn update_op(kind: TokenKind) -> UpdateOp {
    match kind {
        TokenKind::PlusPlus => UpdateOp::Increment,
        _ => UpdateOp::Decrement,
    }
}

/// Precedence and associativity for binary operators; `None` for tokens
/// that do not continue a binary expression.
const fn binary_op_info(kind: TokenKind) -> Option<(u8, BinaryOp, bool)> {
    let info = match kind {
        TokenKind::QuestionQuestion => (1, BinaryOp::Coalesce, false),
        TokenKind::BarBar => (1, BinaryOp::LogicalOr, false),
        TokenKind::AmpersandAmpersand => (2, BinaryOp::LogicalAnd, false),
        TokenKind::Bar => (3, BinaryOp::BitOr, false),
        TokenKind::Caret => (4, BinaryOp::BitXor, false),
        TokenKind::Ampersand => (5, BinaryOp::BitAnd, false),
        TokenKind::EqualsEquals => (6, BinaryOp::Eq, false),
        TokenKind::ExclamationEquals => (6, BinaryOp::NotEq, false),
        TokenKind::EqualsEqualsEquals => (6, BinaryOp::StrictEq, false),
        TokenKind::ExclamationEqualsEquals => (6, BinaryOp::StrictNotEq, false),
        TokenKind::LessThan => (7, BinaryOp::Lt, false),
        TokenKind::LessThanEquals => (7, BinaryOp::LtEq, false),
        TokenKind::GreaterThan => (7, BinaryOp::Gt, false),
        TokenKind::GreaterThanEquals => (7, BinaryOp::GtEq, false),
        TokenKind::InKeyword => (7, BinaryOp::In, false),
        TokenKind::InstanceofKeyword => (7, BinaryOp::Instanceof, false),
        TokenKind::LessThanLessThan => (8, BinaryOp::Shl, false),
        TokenKind::GreaterThanGreaterThan => (8, BinaryOp::Shr, false),
        TokenKind::GreaterThanGreaterThanGreaterThan => (8, BinaryOp::UShr, false),
        TokenKind::Plus => (9, BinaryOp::Add, false),
        TokenKind::Minus => (9, BinaryOp::Sub, false),
        TokenKind::Asterisk => (10, BinaryOp::Mul, false),
        TokenKind::Slash => (10, BinaryOp::Div, false),
        TokenKind::Percent => (10, BinaryOp::Mod, false),
        TokenKind::AsteriskAsterisk => (11, BinaryOp::Exp, true),
        _ => return None,
    };
    Some(info)
}
