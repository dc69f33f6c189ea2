//! Binding patterns (declarations, parameters) and the ESTree-style
//! reinterpretation of array/object literals as destructuring assignment
//! targets.

use super::node::{AssignOp, NodeId, NodeKind};
use super::state_core::{ParseError, ParserState};
use reshape_scanner::TokenKind;

impl ParserState {
    /// Identifier, array pattern, or object pattern.
    pub(super) fn parse_binding_pattern(&mut self) -> Result<NodeId, ParseError> {
        self.enter()?;
        let result = match self.cur().kind {
            TokenKind::Identifier => {
                let tok = self.bump();
                Ok(self.arena.add(NodeKind::Ident { name: tok.atom }, tok.span))
            }
            TokenKind::OpenBracket => self.parse_array_pattern(),
            TokenKind::OpenBrace => self.parse_object_pattern(),
            _ => Err(self.error_here("expected binding pattern")),
        };
        self.exit();
        result
    }

    /// A binding pattern with an optional `= default`.
    pub(super) fn parse_pattern_with_default(&mut self) -> Result<NodeId, ParseError> {
        let start = self.cur_span();
        let target = self.parse_binding_pattern()?;
        if !self.eat(TokenKind::Equals) {
            return Ok(target);
        }
        let default = self.parse_assignment_expr()?;
        let span = self.finish_span(start);
        Ok(self.arena.add(NodeKind::AssignPattern { target, default }, span))
    }

    fn parse_array_pattern(&mut self) -> Result<NodeId, ParseError> {
        let start = self.expect(TokenKind::OpenBracket)?.span;
        let mut elements = Vec::new();
        loop {
            if self.at(TokenKind::CloseBracket) {
                break;
            }
            if self.at(TokenKind::Comma) {
                // Elision: `[, x]`.
                self.bump();
                elements.push(NodeId::NONE);
                continue;
            }
            let elem = if self.at(TokenKind::DotDotDot) {
                let rest_start = self.bump().span;
                let argument = self.parse_binding_pattern()?;
                let span = self.finish_span(rest_start);
                self.arena.add(NodeKind::RestElement { argument }, span)
            } else {
                self.parse_pattern_with_default()?
            };
            elements.push(elem);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::CloseBracket)?;
        let span = self.finish_span(start);
        Ok(self.arena.add(NodeKind::ArrayPattern { elements }, span))
    }

    fn parse_object_pattern(&mut self) -> Result<NodeId, ParseError> {
        let start = self.expect(TokenKind::OpenBrace)?.span;
        let mut properties = Vec::new();
        loop {
            if self.at(TokenKind::CloseBrace) {
                break;
            }
            let prop = if self.at(TokenKind::DotDotDot) {
                let rest_start = self.bump().span;
                let argument = self.parse_binding_pattern()?;
                let span = self.finish_span(rest_start);
                self.arena.add(NodeKind::RestElement { argument }, span)
            } else {
                self.parse_object_pattern_member()?
            };
            properties.push(prop);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::CloseBrace)?;
        let span = self.finish_span(start);
        Ok(self.arena.add(NodeKind::ObjectPattern { properties }, span))
    }

    fn parse_object_pattern_member(&mut self) -> Result<NodeId, ParseError> {
        let start = self.cur_span();
        let (key, computed) = self.parse_property_key()?;
        if computed || self.at(TokenKind::Colon) {
            self.expect(TokenKind::Colon)?;
            let value = self.parse_pattern_with_default()?;
            let span = self.finish_span(start);
            return Ok(self.arena.add(
                NodeKind::Property { key, value, computed, shorthand: false },
                span,
            ));
        }

        // Shorthand `{a}` / `{a = default}` binds the key's name.
        let name = self
            .arena
            .ident_atom(key)
            .ok_or_else(|| self.error_here("expected `:` after property key"))?;
        let key_span = self.arena.span(key);
        let binding = self.arena.add(NodeKind::Ident { name }, key_span);
        let value = if self.eat(TokenKind::Equals) {
            let default = self.parse_assignment_expr()?;
            let span = self.finish_span(start);
            self.arena
                .add(NodeKind::AssignPattern { target: binding, default }, span)
        } else {
            binding
        };
        let span = self.finish_span(start);
        Ok(self.arena.add(
            NodeKind::Property { key, value, computed: false, shorthand: true },
            span,
        ))
    }

    // =========================================================================
    // Expression -> assignment-target reinterpretation
    // =========================================================================

    /// Reinterpret an already-parsed expression as an assignment target.
    ///
    /// `[a, b] = xs` and `({x} = o)` parse their left side as a literal
    /// first; this converts the literal into the corresponding pattern.
    /// Identifiers and member accesses pass through unchanged.
    pub(super) fn to_assignment_target(&mut self, expr: NodeId) -> Result<NodeId, ParseError> {
        let invalid = |arena: &super::node_arena::NodeArena| ParseError {
            message: "invalid assignment target".to_string(),
            span: arena.span(expr),
        };
        let kind = match self.arena.kind(expr) {
            Some(k) => k.clone(),
            None => return Err(invalid(&self.arena)),
        };
        let span = self.arena.span(expr);
        match kind {
            NodeKind::Ident { .. } | NodeKind::Member { .. } => Ok(expr),
            NodeKind::ArrayLit { elements } => {
                let mut converted = Vec::with_capacity(elements.len());
                for elem in elements {
                    if elem.is_none() {
                        converted.push(NodeId::NONE);
                        continue;
                    }
                    converted.push(self.to_target_element(elem)?);
                }
                Ok(self
                    .arena
                    .add(NodeKind::ArrayPattern { elements: converted }, span))
            }
            NodeKind::ObjectLit { properties } => {
                let mut converted = Vec::with_capacity(properties.len());
                for prop in properties {
                    converted.push(self.to_target_property(prop)?);
                }
                Ok(self
                    .arena
                    .add(NodeKind::ObjectPattern { properties: converted }, span))
            }
            _ => Err(invalid(&self.arena)),
        }
    }

    /// One array element: spreads become rest elements, `a = d` becomes a
    /// default pattern, nested literals convert recursively.
    fn to_target_element(&mut self, elem: NodeId) -> Result<NodeId, ParseError> {
        let span = self.arena.span(elem);
        match self.arena.kind(elem).cloned() {
            Some(NodeKind::Spread { argument }) => {
                let argument = self.to_assignment_target(argument)?;
                Ok(self.arena.add(NodeKind::RestElement { argument }, span))
            }
            Some(NodeKind::Assign { op: AssignOp::Assign, target, value }) => {
                let target = self.to_assignment_target(target)?;
                Ok(self
                    .arena
                    .add(NodeKind::AssignPattern { target, default: value }, span))
            }
            _ => self.to_assignment_target(elem),
        }
    }

    fn to_target_property(&mut self, prop: NodeId) -> Result<NodeId, ParseError> {
        let span = self.arena.span(prop);
        match self.arena.kind(prop).cloned() {
            Some(NodeKind::Spread { argument }) => {
                let argument = self.to_assignment_target(argument)?;
                Ok(self.arena.add(NodeKind::RestElement { argument }, span))
            }
            Some(NodeKind::Property { key, value, computed, shorthand }) => {
                let value = self.to_target_element(value)?;
                Ok(self.arena.add(
                    NodeKind::Property { key, value, computed, shorthand },
                    span,
                ))
            }
            _ => Err(ParseError {
                message: "invalid assignment target".to_string(),
                span,
            }),
        }
    }
}
