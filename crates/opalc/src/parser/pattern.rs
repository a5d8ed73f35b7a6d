//! Pattern parsing
//!
//! One production serves match clauses, destructuring `let`/`var`/`for`
//! binders, and `if` conditions. Dispatch is by lookahead: a bare name
//! binds, a name followed by something that extends an expression falls
//! through to the expression grammar, `Type(..)` destructures, and `..`
//! is only legal as the trailing element of an aggregate.

use crate::ast::{BinOp, Pattern, PatternKind};
use crate::common::{ParseResult, SyntaxError};
use crate::token::TokenKind;

use super::Parser;

impl Parser {
    /// Parse a pattern with the full expression grammar available to
    /// expression patterns.
    pub(crate) fn parse_pattern(&mut self) -> ParseResult<Pattern> {
        self.parse_pattern_min(1)
    }

    /// Parse a match-clause alternative. Expression patterns stop below
    /// the `|` tier so the alternation separator stays visible to the
    /// clause parser.
    pub(crate) fn parse_match_pattern(&mut self) -> ParseResult<Pattern> {
        self.parse_pattern_min(BinOp::BitAnd.precedence())
    }

    fn parse_pattern_min(&mut self, min_prec: u8) -> ParseResult<Pattern> {
        let pattern = self.parse_pattern_element(min_prec)?;
        if pattern.kind.is_rest() {
            return Err(SyntaxError::TrailingRestMisplaced { span: pattern.span });
        }
        Ok(pattern)
    }

    /// One element of a pattern; `..` is accepted here and validated by
    /// the enclosing aggregate (or rejected by `parse_pattern_min`).
    fn parse_pattern_element(&mut self, min_prec: u8) -> ParseResult<Pattern> {
        let start = self.peek().span;

        if self.check(&TokenKind::Underscore) {
            self.advance()?;
            return Ok(Pattern::wildcard(start));
        }

        if self.check(&TokenKind::DotDot) {
            self.advance()?;
            return Ok(Pattern::new(PatternKind::IgnoringRest, start));
        }

        if self.check(&TokenKind::LParen) {
            return self.parse_tuple_pattern();
        }

        if (self.check(&TokenKind::Vector) || self.check(&TokenKind::Array))
            && self.check_at(1, &TokenKind::LBracket)
        {
            return self.parse_collection_pattern();
        }

        let leading_type_name = match &self.peek().kind {
            TokenKind::Ident(name) => {
                Some(name.chars().next().is_some_and(char::is_uppercase))
            }
            _ => None,
        };
        if let Some(is_type_name) = leading_type_name {
            // Type(sub, ..) destructures; a lowercase call is equality.
            if is_type_name && self.check_at(1, &TokenKind::LParen) {
                return self.parse_destructuring_pattern();
            }
            // Only a lowercase name binds; a bare uppercase name is a
            // constant reference and matches by value.
            if !is_type_name && !self.ident_continues_expression(min_prec) {
                let (name, _) = self.expect_ident()?;
                let sub = if self.eat(&TokenKind::At)? {
                    Some(Box::new(self.parse_pattern_min(min_prec)?))
                } else {
                    None
                };
                return Ok(Pattern::new(
                    PatternKind::Identifier {
                        name,
                        ty: crate::ast::AstType::placeholder(),
                        sub,
                    },
                    self.span_from(start),
                ));
            }
        }

        // Everything else matches by value: literals, ranges, scoped
        // names, arithmetic over them.
        let expr = self.parse_operand_min(min_prec)?;
        let span = expr.span;
        Ok(Pattern::new(PatternKind::Expression(expr), span))
    }

    /// Whether the identifier at the cursor starts an expression rather
    /// than a binding, judged by the token after it.
    fn ident_continues_expression(&self, min_prec: u8) -> bool {
        let next = &self.peek_at(1).kind;
        if matches!(
            next,
            TokenKind::Dot
                | TokenKind::ColonColon
                | TokenKind::LParen
                | TokenKind::LBracket
                | TokenKind::DotDot
                | TokenKind::DotDotEq
                | TokenKind::As
        ) {
            return true;
        }
        Self::binary_op_of(next).is_some_and(|op| op.precedence() >= min_prec)
    }

    /// ( p1, p2, .. ) — a single element without a comma is plain
    /// grouping and yields the inner pattern unchanged.
    fn parse_tuple_pattern(&mut self) -> ParseResult<Pattern> {
        let start = self.expect(TokenKind::LParen)?.span;
        let mut items = Vec::new();
        let mut saw_comma = false;

        if !self.check(&TokenKind::RParen) {
            loop {
                items.push(self.parse_pattern_element(1)?);
                if !self.eat(&TokenKind::Comma)? {
                    break;
                }
                saw_comma = true;
                if self.check(&TokenKind::RParen) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen)?;

        if items.len() == 1 && !saw_comma {
            let only = items.pop().expect("one element");
            if only.kind.is_rest() {
                return Err(SyntaxError::TrailingRestMisplaced { span: only.span });
            }
            return Ok(only);
        }

        Self::validate_rest_positions(&items)?;
        Ok(Pattern::new(
            PatternKind::Tuple(items),
            self.span_from(start),
        ))
    }

    /// vector [ p1, p2, .. ] or array [ p1, p2 ]
    fn parse_collection_pattern(&mut self) -> ParseResult<Pattern> {
        let discriminator = self.advance()?;
        let vector = matches!(discriminator.kind, TokenKind::Vector);
        self.expect(TokenKind::LBracket)?;

        let mut items = Vec::new();
        if !self.check(&TokenKind::RBracket) {
            loop {
                items.push(self.parse_pattern_element(1)?);
                if !self.eat(&TokenKind::Comma)? {
                    break;
                }
                if self.check(&TokenKind::RBracket) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RBracket)?;

        Self::validate_rest_positions(&items)?;
        Ok(Pattern::new(
            PatternKind::Collection { vector, items },
            self.span_from(discriminator.span),
        ))
    }

    /// Type ( p1, p2, .. )
    fn parse_destructuring_pattern(&mut self) -> ParseResult<Pattern> {
        let (name, name_span) = self.expect_ident()?;
        let ty = crate::ast::AstType::named(name, name_span);
        self.expect(TokenKind::LParen)?;

        let mut fields = Vec::new();
        if !self.check(&TokenKind::RParen) {
            loop {
                fields.push(self.parse_pattern_element(1)?);
                if !self.eat(&TokenKind::Comma)? {
                    break;
                }
                if self.check(&TokenKind::RParen) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen)?;

        Self::validate_rest_positions(&fields)?;
        Ok(Pattern::new(
            PatternKind::Destructuring { ty, fields },
            self.span_from(name_span),
        ))
    }

    /// Arity discipline, checked the moment the aggregate closes: `..`
    /// may only be the final element.
    fn validate_rest_positions(items: &[Pattern]) -> ParseResult<()> {
        for (i, item) in items.iter().enumerate() {
            if item.kind.is_rest() && i + 1 != items.len() {
                return Err(SyntaxError::TrailingRestMisplaced { span: item.span });
            }
        }
        Ok(())
    }
}
