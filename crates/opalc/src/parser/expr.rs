//! Expression parsing
//!
//! Precedence climbing over the binding-strength ladder, loosest to
//! tightest: assignment, comma sequence, `||`, `&&`, `|`, `&`, equality,
//! relational, range, shift, additive, multiplicative, power, prefix,
//! postfix, primary. Assignment and power chain to the right; ranges sit
//! between the relational and shift tiers so `x..y` works both as a
//! value and as a loop source.

use crate::ast::{
    AstType, AstTypeKind, BinOp, CompFor, CompIf, CompNext, Constant, Expr, ExprKind, SeqEntry,
    SeqKind, UnaryOp,
};
use crate::common::{ParseResult, Span};
use crate::token::TokenKind;

use super::Parser;

/// Pseudo-precedence of range construction, between relational and shift.
const RANGE_PREC: u8 = 7;

impl Parser {
    /// Full expression: comma sequence under right-associative
    /// assignment.
    pub(crate) fn parse_expr(&mut self) -> ParseResult<Expr> {
        let first = self.parse_operand()?;
        self.finish_expr(first)
    }

    /// Single expression without the comma and assignment tiers; the
    /// shape used by arguments, elements, conditions, and initializers.
    pub(crate) fn parse_operand(&mut self) -> ParseResult<Expr> {
        self.parse_binary(1)
    }

    /// Operand with a raised floor, for contexts that reserve an
    /// operator for themselves (match alternatives reserve `|`).
    pub(crate) fn parse_operand_min(&mut self, min_prec: u8) -> ParseResult<Expr> {
        self.parse_binary(min_prec)
    }

    /// Continue an already-parsed first operand through the comma and
    /// assignment tiers.
    pub(crate) fn finish_expr(&mut self, first: Expr) -> ParseResult<Expr> {
        let sequence = self.finish_sequence(first)?;
        self.finish_assignment(sequence)
    }

    fn finish_sequence(&mut self, first: Expr) -> ParseResult<Expr> {
        if !self.check(&TokenKind::Comma) {
            return Ok(first);
        }
        let start = first.span;
        let mut parts = vec![first];
        while self.eat(&TokenKind::Comma)? {
            parts.push(self.parse_operand()?);
        }
        Ok(Expr::new(
            ExprKind::SequenceExpression(parts),
            self.span_from(start),
        ))
    }

    fn finish_assignment(&mut self, target: Expr) -> ParseResult<Expr> {
        if self.check(&TokenKind::Eq) {
            self.advance()?;
            let value = self.parse_expr()?;
            let span = target.span.merge(value.span);
            // A chain keeps its leftmost target here and nests the rest.
            let kind = if matches!(
                value.kind,
                ExprKind::SingleAssignment { .. } | ExprKind::MultipleAssignment { .. }
            ) {
                ExprKind::MultipleAssignment {
                    target: Box::new(target),
                    assignment: Box::new(value),
                }
            } else {
                ExprKind::SingleAssignment {
                    target: Box::new(target),
                    value: Box::new(value),
                }
            };
            return Ok(Expr::new(kind, span));
        }

        if let Some(op) = Self::augmented_op_of(&self.peek().kind) {
            self.advance()?;
            let first = self.parse_operand()?;
            let value = self.finish_sequence(first)?;
            let span = target.span.merge(value.span);
            return Ok(Expr::new(
                ExprKind::AugmentedAssignment {
                    op,
                    targets: target.into_sequence_parts(),
                    values: value.into_sequence_parts(),
                },
                span,
            ));
        }

        Ok(target)
    }

    pub(crate) fn binary_op_of(kind: &TokenKind) -> Option<BinOp> {
        Some(match kind {
            TokenKind::PipePipe => BinOp::Or,
            TokenKind::AmpAmp => BinOp::And,
            TokenKind::Pipe => BinOp::BitOr,
            TokenKind::Amp => BinOp::BitAnd,
            TokenKind::EqEq => BinOp::Eq,
            TokenKind::NotEq => BinOp::Ne,
            TokenKind::Lt => BinOp::Lt,
            TokenKind::LtEq => BinOp::Le,
            TokenKind::Gt => BinOp::Gt,
            TokenKind::GtEq => BinOp::Ge,
            TokenKind::Shl => BinOp::Shl,
            TokenKind::Shr => BinOp::Shr,
            TokenKind::Plus => BinOp::Add,
            TokenKind::Minus => BinOp::Sub,
            TokenKind::Star => BinOp::Mul,
            TokenKind::Slash => BinOp::Div,
            TokenKind::Percent => BinOp::Rem,
            TokenKind::Caret => BinOp::Pow,
            _ => return None,
        })
    }

    fn augmented_op_of(kind: &TokenKind) -> Option<BinOp> {
        Some(match kind {
            TokenKind::PlusEq => BinOp::Add,
            TokenKind::MinusEq => BinOp::Sub,
            TokenKind::StarEq => BinOp::Mul,
            TokenKind::SlashEq => BinOp::Div,
            TokenKind::PercentEq => BinOp::Rem,
            TokenKind::ShlEq => BinOp::Shl,
            TokenKind::ShrEq => BinOp::Shr,
            TokenKind::AmpEq => BinOp::BitAnd,
            TokenKind::PipeEq => BinOp::BitOr,
            _ => return None,
        })
    }

    fn parse_binary(&mut self, min_prec: u8) -> ParseResult<Expr> {
        let mut left = self.parse_unary()?;

        loop {
            if RANGE_PREC >= min_prec
                && (self.check(&TokenKind::DotDot) || self.check(&TokenKind::DotDotEq))
            {
                let inclusive = self.check(&TokenKind::DotDotEq);
                self.advance()?;
                let end = self.parse_binary(RANGE_PREC + 1)?;
                let step = if self.eat(&TokenKind::By)? {
                    Some(Box::new(self.parse_binary(RANGE_PREC + 1)?))
                } else {
                    None
                };
                let span = self.span_from(left.span);
                left = Expr::new(
                    ExprKind::IntSeq {
                        start: Box::new(left),
                        end: Box::new(end),
                        step,
                        inclusive,
                    },
                    span,
                );
                continue;
            }

            let Some(op) = Self::binary_op_of(&self.peek().kind) else {
                break;
            };
            let prec = op.precedence();
            if prec < min_prec {
                break;
            }
            self.advance()?;

            let next_min = if op.is_right_assoc() { prec } else { prec + 1 };
            let right = self.parse_binary(next_min)?;
            let span = left.span.merge(right.span);
            left = Expr::new(
                ExprKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
            );
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> ParseResult<Expr> {
        let start = self.peek().span;
        let op = match self.peek().kind {
            TokenKind::Minus => Some(UnaryOp::Neg),
            TokenKind::Bang => Some(UnaryOp::Not),
            TokenKind::Tilde => Some(UnaryOp::BitNot),
            _ => None,
        };
        if let Some(op) = op {
            self.advance()?;
            let operand = self.parse_unary()?;
            let span = start.merge(operand.span);
            return Ok(Expr::new(
                ExprKind::Unary {
                    op,
                    operand: Box::new(operand),
                },
                span,
            ));
        }
        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_primary()?;

        loop {
            if self.eat(&TokenKind::Dot)? {
                let (member, _) = self.expect_ident()?;
                let span = self.span_from(expr.span);
                expr = Expr::new(
                    ExprKind::MemberReference {
                        target: Box::new(expr),
                        member,
                    },
                    span,
                );
            } else if self.eat(&TokenKind::LBracket)? {
                let index = self.parse_operand()?;
                self.expect(TokenKind::RBracket)?;
                let span = self.span_from(expr.span);
                expr = Expr::new(
                    ExprKind::Indexer {
                        target: Box::new(expr),
                        index: Box::new(index),
                    },
                    span,
                );
            } else if self.eat(&TokenKind::LParen)? {
                expr = self.parse_call_like(expr, Vec::new())?;
            } else if self.eat(&TokenKind::As)? {
                let ty = self.parse_type()?;
                let span = self.span_from(expr.span);
                expr = Expr::new(
                    ExprKind::Cast {
                        expr: Box::new(expr),
                        ty,
                    },
                    span,
                );
            } else if self.check(&TokenKind::Lt)
                && matches!(expr.kind, ExprKind::IdentifierPath(_))
            {
                // `sort<int>(xs)` or a plain comparison: scan a
                // type-argument list speculatively, commit only when a
                // call argument list follows.
                let checkpoint = self.checkpoint();
                self.advance()?;
                match self.parse_generic_args() {
                    Ok(type_args) if self.check(&TokenKind::LParen) => {
                        self.advance()?;
                        expr = self.parse_call_like(expr, type_args)?;
                    }
                    _ => {
                        self.rewind(checkpoint);
                        break;
                    }
                }
            } else {
                break;
            }
        }

        Ok(expr)
    }

    /// Finish a call whose `(` has been consumed. A leading `name:`
    /// switches to object creation; field order is preserved as written.
    fn parse_call_like(&mut self, callee: Expr, type_args: Vec<AstType>) -> ParseResult<Expr> {
        let creates_object = match &callee.kind {
            ExprKind::IdentifierPath(segments) => {
                segments.len() == 1
                    && self.check(&TokenKind::Ident(String::new()))
                    && self.check_at(1, &TokenKind::Colon)
            }
            _ => false,
        };

        if creates_object {
            let ExprKind::IdentifierPath(segments) = &callee.kind else {
                unreachable!("checked above");
            };
            let ty = AstType::new(
                AstTypeKind::Generic {
                    name: segments[0].clone(),
                    args: type_args,
                },
                callee.span,
            );

            let mut fields = Vec::new();
            let mut values = Vec::new();
            loop {
                let (field, _) = self.expect_ident()?;
                self.expect(TokenKind::Colon)?;
                fields.push(field);
                values.push(self.parse_operand()?);
                if !self.eat(&TokenKind::Comma)? {
                    break;
                }
            }
            self.expect(TokenKind::RParen)?;
            let span = self.span_from(callee.span);
            return Ok(Expr::new(
                ExprKind::ObjectCreation { ty, fields, values },
                span,
            ));
        }

        let mut args = Vec::new();
        if !self.check(&TokenKind::RParen) {
            loop {
                args.push(self.parse_operand()?);
                if !self.eat(&TokenKind::Comma)? {
                    break;
                }
                if self.check(&TokenKind::RParen) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen)?;
        let span = self.span_from(callee.span);
        Ok(Expr::new(
            ExprKind::Call {
                callee: Box::new(callee),
                type_args,
                args,
            },
            span,
        ))
    }

    fn parse_primary(&mut self) -> ParseResult<Expr> {
        let token = self.peek().clone();

        if token.kind.is_literal() {
            self.advance()?;
            let constant = match token.kind {
                TokenKind::Int(v) => Constant::Int(v),
                TokenKind::UInt(v) => Constant::UInt(v),
                TokenKind::Float(v) => Constant::Float(v),
                TokenKind::Double(v) => Constant::Double(v),
                TokenKind::BigInt(digits) => Constant::BigInt(digits),
                TokenKind::Char(c) => Constant::Char(c),
                TokenKind::Str { value, raw } => Constant::Str { value, raw },
                TokenKind::True => Constant::Bool(true),
                TokenKind::False => Constant::Bool(false),
                _ => unreachable!("is_literal covers these kinds"),
            };
            return Ok(Expr::new(ExprKind::Constant(constant), token.span));
        }

        match token.kind {
            TokenKind::Null => {
                self.advance()?;
                Ok(Expr::new(ExprKind::NullReference, token.span))
            }
            TokenKind::SelfValue => {
                self.advance()?;
                Ok(Expr::new(ExprKind::SelfReference, token.span))
            }
            TokenKind::Ident(_) => self.parse_identifier_path(),
            TokenKind::LParen => self.parse_paren_expr(),
            TokenKind::LBracket => self.parse_bracket_expr(),
            TokenKind::LBrace => self.parse_brace_expr(),
            TokenKind::Array | TokenKind::Vector => self.parse_discriminated_list(),
            TokenKind::Dictionary => self.parse_discriminated_dict(),
            TokenKind::Closure => self.parse_closure_expr(),
            _ => Err(self.unexpected("an expression")),
        }
    }

    fn parse_identifier_path(&mut self) -> ParseResult<Expr> {
        let (first, start) = self.expect_ident()?;
        let mut segments = vec![first];
        while self.check(&TokenKind::ColonColon)
            && self.check_at(1, &TokenKind::Ident(String::new()))
        {
            self.advance()?;
            segments.push(self.expect_ident()?.0);
        }
        Ok(Expr::new(
            ExprKind::IdentifierPath(segments),
            self.span_from(start),
        ))
    }

    /// `( .. )`: explicit grouping around a full expression (a comma
    /// builds the tuple sequence inside), or a tuple comprehension.
    fn parse_paren_expr(&mut self) -> ParseResult<Expr> {
        let start = self.expect(TokenKind::LParen)?.span;

        if self.eat(&TokenKind::RParen)? {
            let span = self.span_from(start);
            return Ok(Expr::new(
                ExprKind::Paren(Box::new(Expr::new(
                    ExprKind::SequenceExpression(Vec::new()),
                    span,
                ))),
                span,
            ));
        }

        let first = self.parse_operand()?;

        if self.check(&TokenKind::For) {
            let head = self.parse_comp_for()?;
            self.expect(TokenKind::RParen)?;
            let span = self.span_from(start);
            return Ok(Expr::new(
                ExprKind::Comprehension {
                    container: SeqKind::Tuple,
                    element: Box::new(first),
                    head: Box::new(head),
                },
                span,
            ));
        }

        let inner = self.finish_expr(first)?;
        self.expect(TokenKind::RParen)?;
        let span = self.span_from(start);
        Ok(Expr::new(ExprKind::Paren(Box::new(inner)), span))
    }

    /// `[ .. ]`: a vector-tagged literal, or a list comprehension.
    fn parse_bracket_expr(&mut self) -> ParseResult<Expr> {
        let start = self.expect(TokenKind::LBracket)?.span;

        if self.eat(&TokenKind::RBracket)? {
            let span = self.span_from(start);
            return Ok(self.sequence_initializer("vector", 1, Vec::new(), span));
        }

        let first = self.parse_operand()?;

        if self.check(&TokenKind::For) {
            let head = self.parse_comp_for()?;
            self.expect(TokenKind::RBracket)?;
            let span = self.span_from(start);
            return Ok(Expr::new(
                ExprKind::Comprehension {
                    container: SeqKind::List,
                    element: Box::new(first),
                    head: Box::new(head),
                },
                span,
            ));
        }

        let mut entries = vec![SeqEntry::Item(first)];
        while self.eat(&TokenKind::Comma)? {
            if self.check(&TokenKind::RBracket) {
                break;
            }
            entries.push(SeqEntry::Item(self.parse_operand()?));
        }
        self.expect(TokenKind::RBracket)?;
        let span = self.span_from(start);
        Ok(self.sequence_initializer("vector", 1, entries, span))
    }

    /// `{ k: v, .. }`: a dictionary literal, or a dictionary
    /// comprehension whose element is the key-value pair.
    fn parse_brace_expr(&mut self) -> ParseResult<Expr> {
        let start = self.expect(TokenKind::LBrace)?.span;

        if self.eat(&TokenKind::RBrace)? {
            let span = self.span_from(start);
            return Ok(self.sequence_initializer("dictionary", 2, Vec::new(), span));
        }

        let key = self.parse_operand()?;
        self.expect(TokenKind::Colon)?;
        let value = self.parse_operand()?;

        if self.check(&TokenKind::For) {
            let pair_span = key.span.merge(value.span);
            let element = Expr::new(ExprKind::SequenceExpression(vec![key, value]), pair_span);
            let head = self.parse_comp_for()?;
            self.expect(TokenKind::RBrace)?;
            let span = self.span_from(start);
            return Ok(Expr::new(
                ExprKind::Comprehension {
                    container: SeqKind::Dictionary,
                    element: Box::new(element),
                    head: Box::new(head),
                },
                span,
            ));
        }

        let mut entries = vec![SeqEntry::Pair { key, value }];
        while self.eat(&TokenKind::Comma)? {
            if self.check(&TokenKind::RBrace) {
                break;
            }
            let key = self.parse_operand()?;
            self.expect(TokenKind::Colon)?;
            let value = self.parse_operand()?;
            entries.push(SeqEntry::Pair { key, value });
        }
        self.expect(TokenKind::RBrace)?;
        let span = self.span_from(start);
        Ok(self.sequence_initializer("dictionary", 2, entries, span))
    }

    /// `array [ .. ]` / `vector [ .. ]` with an explicit discriminator.
    fn parse_discriminated_list(&mut self) -> ParseResult<Expr> {
        let discriminator = self.advance()?;
        let name = if matches!(discriminator.kind, TokenKind::Array) {
            "array"
        } else {
            "vector"
        };
        self.expect(TokenKind::LBracket)?;

        let mut entries = Vec::new();
        if !self.check(&TokenKind::RBracket) {
            loop {
                entries.push(SeqEntry::Item(self.parse_operand()?));
                if !self.eat(&TokenKind::Comma)? {
                    break;
                }
                if self.check(&TokenKind::RBracket) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RBracket)?;
        let span = self.span_from(discriminator.span);
        Ok(self.sequence_initializer(name, 1, entries, span))
    }

    /// `dictionary { k: v, .. }` with an explicit discriminator.
    fn parse_discriminated_dict(&mut self) -> ParseResult<Expr> {
        let start = self.expect(TokenKind::Dictionary)?.span;
        self.expect(TokenKind::LBrace)?;

        let mut entries = Vec::new();
        if !self.check(&TokenKind::RBrace) {
            loop {
                let key = self.parse_operand()?;
                self.expect(TokenKind::Colon)?;
                let value = self.parse_operand()?;
                entries.push(SeqEntry::Pair { key, value });
                if !self.eat(&TokenKind::Comma)? {
                    break;
                }
                if self.check(&TokenKind::RBrace) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RBrace)?;
        let span = self.span_from(start);
        Ok(self.sequence_initializer("dictionary", 2, entries, span))
    }

    /// Container literals always defer their element types: the tag is a
    /// Generic over Placeholder arguments.
    fn sequence_initializer(
        &self,
        container: &str,
        arity: usize,
        entries: Vec<SeqEntry>,
        span: Span,
    ) -> Expr {
        let ty = AstType::new(
            AstTypeKind::Generic {
                name: container.to_string(),
                args: vec![AstType::placeholder(); arity],
            },
            span,
        );
        Expr::new(ExprKind::SequenceInitializer { ty, entries }, span)
    }

    /// closure [caps] (params) -> R { .. }
    fn parse_closure_expr(&mut self) -> ParseResult<Expr> {
        let start = self.expect(TokenKind::Closure)?.span;

        let mut captures = Vec::new();
        if self.eat(&TokenKind::LBracket)? {
            if !self.check(&TokenKind::RBracket) {
                loop {
                    captures.push(self.expect_ident()?.0);
                    if !self.eat(&TokenKind::Comma)? {
                        break;
                    }
                }
            }
            self.expect(TokenKind::RBracket)?;
        }

        self.expect(TokenKind::LParen)?;
        let params = self.parse_params()?;
        self.expect(TokenKind::RParen)?;

        let return_type = if self.eat(&TokenKind::Arrow)? {
            self.parse_type()?
        } else {
            AstType::placeholder()
        };

        let body = self.parse_block()?;
        let span = self.span_from(start);
        Ok(Expr::new(
            ExprKind::Closure {
                return_type,
                body,
                params,
                captures,
            },
            span,
        ))
    }

    // ==================== Comprehensions ====================

    fn parse_comp_for(&mut self) -> ParseResult<CompFor> {
        self.expect(TokenKind::For)?;
        let pattern = self.parse_pattern()?;
        self.expect(TokenKind::In)?;
        let source = self.parse_operand()?;
        let next = self.parse_comp_next()?;
        Ok(CompFor {
            pattern,
            source: Box::new(source),
            next: next.map(Box::new),
        })
    }

    fn parse_comp_next(&mut self) -> ParseResult<Option<CompNext>> {
        if self.check(&TokenKind::For) {
            return Ok(Some(CompNext::For(self.parse_comp_for()?)));
        }
        if self.eat(&TokenKind::If)? {
            let condition = self.parse_operand()?;
            let next = self.parse_comp_next()?;
            return Ok(Some(CompNext::If(CompIf {
                condition: Box::new(condition),
                next: next.map(Box::new),
            })));
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::fixtures::{ident, stream};
    use crate::token::TokenKind as T;
    use pretty_assertions::assert_eq;

    fn parse_expr(kinds: Vec<T>) -> Expr {
        Parser::new(stream(kinds)).parse_expr().unwrap()
    }

    fn path(expr: &Expr) -> &[String] {
        match &expr.kind {
            ExprKind::IdentifierPath(segments) => segments,
            other => panic!("expected identifier path, got {other:?}"),
        }
    }

    #[test]
    fn test_multiplication_binds_tighter_than_addition() {
        let expr = parse_expr(vec![ident("a"), T::Plus, ident("b"), T::Star, ident("c")]);
        let ExprKind::Binary { op: BinOp::Add, right, .. } = expr.kind else {
            panic!("expected addition at the root");
        };
        assert!(matches!(right.kind, ExprKind::Binary { op: BinOp::Mul, .. }));
    }

    #[test]
    fn test_power_is_right_associative() {
        let expr = parse_expr(vec![T::Int(2), T::Caret, T::Int(3), T::Caret, T::Int(2)]);
        let ExprKind::Binary { op: BinOp::Pow, left, right } = expr.kind else {
            panic!("expected power at the root");
        };
        assert!(matches!(left.kind, ExprKind::Constant(Constant::Int(2))));
        assert!(matches!(right.kind, ExprKind::Binary { op: BinOp::Pow, .. }));
    }

    #[test]
    fn test_power_binds_tighter_than_multiplication() {
        let expr = parse_expr(vec![ident("a"), T::Star, ident("b"), T::Caret, T::Int(2)]);
        let ExprKind::Binary { op: BinOp::Mul, right, .. } = expr.kind else {
            panic!("expected multiplication at the root");
        };
        assert!(matches!(right.kind, ExprKind::Binary { op: BinOp::Pow, .. }));
    }

    #[test]
    fn test_bitwise_or_is_looser_than_equality() {
        let expr = parse_expr(vec![ident("a"), T::Pipe, ident("b"), T::EqEq, ident("c")]);
        let ExprKind::Binary { op: BinOp::BitOr, right, .. } = expr.kind else {
            panic!("expected bitwise or at the root");
        };
        assert!(matches!(right.kind, ExprKind::Binary { op: BinOp::Eq, .. }));
    }

    #[test]
    fn test_range_with_step() {
        let expr = parse_expr(vec![T::Int(0), T::DotDot, T::Int(10), T::By, T::Int(2)]);
        let ExprKind::IntSeq { step, inclusive, .. } = expr.kind else {
            panic!("expected range");
        };
        assert!(!inclusive);
        assert!(matches!(
            step.unwrap().kind,
            ExprKind::Constant(Constant::Int(2))
        ));
    }

    #[test]
    fn test_range_binds_tighter_than_comparison() {
        // x == 0..10 compares x against the whole range value.
        let expr = parse_expr(vec![ident("x"), T::EqEq, T::Int(0), T::DotDot, T::Int(10)]);
        let ExprKind::Binary { op: BinOp::Eq, right, .. } = expr.kind else {
            panic!("expected equality at the root");
        };
        assert!(matches!(right.kind, ExprKind::IntSeq { .. }));
    }

    #[test]
    fn test_range_bounds_take_arithmetic() {
        let expr = parse_expr(vec![
            ident("a"),
            T::Plus,
            T::Int(1),
            T::DotDot,
            ident("b"),
            T::Star,
            T::Int(2),
        ]);
        let ExprKind::IntSeq { start, end, .. } = expr.kind else {
            panic!("expected range");
        };
        assert!(matches!(start.kind, ExprKind::Binary { op: BinOp::Add, .. }));
        assert!(matches!(end.kind, ExprKind::Binary { op: BinOp::Mul, .. }));
    }

    #[test]
    fn test_chained_assignment_nests_right() {
        let expr = parse_expr(vec![ident("a"), T::Eq, ident("b"), T::Eq, ident("c")]);
        let ExprKind::MultipleAssignment { target, assignment } = expr.kind else {
            panic!("expected chained assignment");
        };
        assert_eq!(path(&target), ["a"]);
        let ExprKind::SingleAssignment { target, value } = assignment.kind else {
            panic!("expected inner assignment");
        };
        assert_eq!(path(&target), ["b"]);
        assert_eq!(path(&value), ["c"]);
    }

    #[test]
    fn test_tuple_parallel_assignment() {
        let expr = parse_expr(vec![
            ident("a"),
            T::Comma,
            ident("b"),
            T::Eq,
            T::Int(1),
            T::Comma,
            T::Int(2),
        ]);
        let ExprKind::SingleAssignment { target, value } = expr.kind else {
            panic!("expected assignment");
        };
        assert!(matches!(
            &target.kind,
            ExprKind::SequenceExpression(parts) if parts.len() == 2
        ));
        assert!(matches!(
            &value.kind,
            ExprKind::SequenceExpression(parts) if parts.len() == 2
        ));
    }

    #[test]
    fn test_augmented_assignment_flattens_sequences() {
        let expr = parse_expr(vec![
            ident("a"),
            T::Comma,
            ident("b"),
            T::PlusEq,
            T::Int(1),
            T::Comma,
            T::Int(2),
        ]);
        let ExprKind::AugmentedAssignment { op, targets, values } = expr.kind else {
            panic!("expected augmented assignment");
        };
        assert_eq!(op, BinOp::Add);
        assert_eq!(targets.len(), 2);
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn test_scalar_augmented_assignment() {
        let expr = parse_expr(vec![ident("sum"), T::PlusEq, ident("p")]);
        let ExprKind::AugmentedAssignment { targets, values, .. } = expr.kind else {
            panic!("expected augmented assignment");
        };
        assert_eq!(targets.len(), 1);
        assert_eq!(values.len(), 1);
    }

    #[test]
    fn test_postfix_chain() {
        // shapes[0].area()
        let expr = parse_expr(vec![
            ident("shapes"),
            T::LBracket,
            T::Int(0),
            T::RBracket,
            T::Dot,
            ident("area"),
            T::LParen,
            T::RParen,
        ]);
        let ExprKind::Call { callee, args, .. } = expr.kind else {
            panic!("expected call");
        };
        assert!(args.is_empty());
        let ExprKind::MemberReference { target, member } = callee.kind else {
            panic!("expected member access");
        };
        assert_eq!(member, "area");
        assert!(matches!(target.kind, ExprKind::Indexer { .. }));
    }

    #[test]
    fn test_indexing_by_range() {
        let expr = parse_expr(vec![
            ident("xs"),
            T::LBracket,
            T::Int(1),
            T::DotDot,
            T::Int(3),
            T::RBracket,
        ]);
        let ExprKind::Indexer { index, .. } = expr.kind else {
            panic!("expected indexer");
        };
        assert!(matches!(index.kind, ExprKind::IntSeq { .. }));
    }

    #[test]
    fn test_cast_is_postfix() {
        let expr = parse_expr(vec![ident("x"), T::As, ident("double"), T::Plus, ident("y")]);
        let ExprKind::Binary { op: BinOp::Add, left, .. } = expr.kind else {
            panic!("expected addition at the root");
        };
        assert!(matches!(left.kind, ExprKind::Cast { .. }));
    }

    #[test]
    fn test_generic_call_disambiguation() {
        let expr = parse_expr(vec![
            ident("sort"),
            T::Lt,
            ident("int"),
            T::Gt,
            T::LParen,
            ident("xs"),
            T::RParen,
        ]);
        let ExprKind::Call { type_args, args, .. } = expr.kind else {
            panic!("expected call");
        };
        assert_eq!(type_args.len(), 1);
        assert_eq!(args.len(), 1);
    }

    #[test]
    fn test_less_than_stays_a_comparison() {
        let expr = parse_expr(vec![ident("a"), T::Lt, ident("b"), T::Semi]);
        assert!(matches!(expr.kind, ExprKind::Binary { op: BinOp::Lt, .. }));
    }

    #[test]
    fn test_object_creation_preserves_field_order() {
        let expr = parse_expr(vec![
            ident("Point"),
            T::LParen,
            ident("x"),
            T::Colon,
            T::Int(1),
            T::Comma,
            ident("y"),
            T::Colon,
            T::Int(2),
            T::RParen,
        ]);
        let ExprKind::ObjectCreation { ty, fields, values } = expr.kind else {
            panic!("expected object creation");
        };
        assert!(matches!(&ty.kind, AstTypeKind::Generic { name, .. } if name == "Point"));
        assert_eq!(fields, vec!["x".to_string(), "y".to_string()]);
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn test_positional_call_stays_a_call() {
        let expr = parse_expr(vec![
            ident("Point"),
            T::LParen,
            T::Int(1),
            T::Comma,
            T::Int(2),
            T::RParen,
        ]);
        assert!(matches!(expr.kind, ExprKind::Call { .. }));
    }

    #[test]
    fn test_void_and_grouping_parens() {
        let void = parse_expr(vec![T::LParen, T::RParen]);
        let ExprKind::Paren(inner) = void.kind else {
            panic!("expected paren");
        };
        assert!(matches!(
            &inner.kind,
            ExprKind::SequenceExpression(parts) if parts.is_empty()
        ));

        let grouped = parse_expr(vec![T::LParen, ident("a"), T::RParen]);
        let ExprKind::Paren(inner) = grouped.kind else {
            panic!("expected paren");
        };
        // A single grouped scalar stays the inner expression, not a
        // one-element sequence.
        assert!(matches!(inner.kind, ExprKind::IdentifierPath(_)));
    }

    #[test]
    fn test_paren_tuple_is_paren_wrapped_sequence() {
        let expr = parse_expr(vec![
            T::LParen,
            ident("a"),
            T::Comma,
            ident("b"),
            T::Comma,
            ident("c"),
            T::RParen,
        ]);
        let ExprKind::Paren(inner) = expr.kind else {
            panic!("expected paren");
        };
        assert!(matches!(
            &inner.kind,
            ExprKind::SequenceExpression(parts) if parts.len() == 3
        ));
    }

    #[test]
    fn test_bare_bracket_literal_is_vector_tagged() {
        let expr = parse_expr(vec![T::LBracket, T::Int(1), T::Comma, T::Int(2), T::RBracket]);
        let ExprKind::SequenceInitializer { ty, entries } = expr.kind else {
            panic!("expected sequence initializer");
        };
        let AstTypeKind::Generic { name, args } = ty.kind else {
            panic!("expected container tag");
        };
        assert_eq!(name, "vector");
        assert!(matches!(args[0].kind, AstTypeKind::Placeholder));
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_array_discriminator() {
        let expr = parse_expr(vec![T::Array, T::LBracket, T::Int(1), T::RBracket]);
        let ExprKind::SequenceInitializer { ty, .. } = expr.kind else {
            panic!("expected sequence initializer");
        };
        assert!(matches!(&ty.kind, AstTypeKind::Generic { name, .. } if name == "array"));
    }

    #[test]
    fn test_dictionary_literal_pairs() {
        let expr = parse_expr(vec![
            T::Dictionary,
            T::LBrace,
            T::Str { value: "a".into(), raw: false },
            T::Colon,
            T::Int(1),
            T::Comma,
            T::Str { value: "b".into(), raw: false },
            T::Colon,
            T::Int(2),
            T::RBrace,
        ]);
        let ExprKind::SequenceInitializer { ty, entries } = expr.kind else {
            panic!("expected sequence initializer");
        };
        let AstTypeKind::Generic { name, args } = ty.kind else {
            panic!("expected container tag");
        };
        assert_eq!(name, "dictionary");
        assert_eq!(args.len(), 2);
        assert!(matches!(entries[0], SeqEntry::Pair { .. }));
    }

    #[test]
    fn test_dictionary_comprehension_element_is_pair_sequence() {
        // { k: v * 2 for k in keys }
        let expr = parse_expr(vec![
            T::LBrace,
            ident("k"),
            T::Colon,
            ident("v"),
            T::Star,
            T::Int(2),
            T::For,
            ident("k"),
            T::In,
            ident("keys"),
            T::RBrace,
        ]);
        let ExprKind::Comprehension { container, element, head } = expr.kind else {
            panic!("expected comprehension");
        };
        assert_eq!(container, SeqKind::Dictionary);
        assert!(matches!(
            &element.kind,
            ExprKind::SequenceExpression(parts) if parts.len() == 2
        ));
        assert!(head.next.is_none());
    }

    #[test]
    fn test_closure_with_captures() {
        let expr = parse_expr(vec![
            T::Closure,
            T::LBracket,
            ident("base"),
            T::RBracket,
            T::LParen,
            ident("x"),
            T::Colon,
            ident("int"),
            T::RParen,
            T::Arrow,
            ident("int"),
            T::LBrace,
            T::Return,
            ident("base"),
            T::Plus,
            ident("x"),
            T::Semi,
            T::RBrace,
        ]);
        let ExprKind::Closure { return_type, params, captures, body } = expr.kind else {
            panic!("expected closure");
        };
        assert_eq!(captures, vec!["base".to_string()]);
        assert_eq!(params.len(), 1);
        assert!(matches!(
            return_type.kind,
            AstTypeKind::Primitive(crate::ast::PrimitiveType::Int)
        ));
        assert_eq!(body.stmts.len(), 1);
    }

    #[test]
    fn test_closure_without_annotations() {
        let expr = parse_expr(vec![
            T::Closure,
            T::LParen,
            ident("x"),
            T::RParen,
            T::LBrace,
            T::RBrace,
        ]);
        let ExprKind::Closure { return_type, params, captures, .. } = expr.kind else {
            panic!("expected closure");
        };
        assert!(captures.is_empty());
        assert!(matches!(return_type.kind, AstTypeKind::Placeholder));
        assert!(matches!(params[0].ty.kind, AstTypeKind::Placeholder));
    }

    #[test]
    fn test_self_and_null_references() {
        let expr = parse_expr(vec![T::SelfValue, T::Dot, ident("radius")]);
        let ExprKind::MemberReference { target, .. } = expr.kind else {
            panic!("expected member access");
        };
        assert!(matches!(target.kind, ExprKind::SelfReference));

        let expr = parse_expr(vec![ident("x"), T::EqEq, T::Null]);
        let ExprKind::Binary { right, .. } = expr.kind else {
            panic!("expected comparison");
        };
        assert!(matches!(right.kind, ExprKind::NullReference));
    }

    #[test]
    fn test_unary_nesting() {
        let expr = parse_expr(vec![T::Minus, T::Tilde, ident("x")]);
        let ExprKind::Unary { op: UnaryOp::Neg, operand } = expr.kind else {
            panic!("expected negation");
        };
        assert!(matches!(
            operand.kind,
            ExprKind::Unary { op: UnaryOp::BitNot, .. }
        ));
    }

    #[test]
    fn test_string_interpolation_markers_kept_verbatim() {
        let expr = parse_expr(vec![T::Str {
            value: "r = ${radius}".into(),
            raw: false,
        }]);
        let ExprKind::Constant(Constant::Str { value, raw }) = expr.kind else {
            panic!("expected string constant");
        };
        assert_eq!(value, "r = ${radius}");
        assert!(!raw);
    }
}
