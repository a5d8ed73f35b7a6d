//! Recursive descent parser for Opal
//!
//! The parser consumes a finite, pre-classified token stream and produces
//! one immutable [`Module`] tree per invocation. Parsing is synchronous
//! and purely CPU-bound; there is no recovery — the first syntax error
//! aborts the parse and no partial tree is returned.

mod decl;
mod expr;
mod pattern;
mod stmt;
mod types;

use crate::ast::Module;
use crate::common::{ParseResult, Span, SyntaxError};
use crate::token::{Token, TokenKind};

/// Opal parser over an externally-produced token stream.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    eof: Token,
    /// Generic-parameter names of the enclosing declarations, innermost
    /// scope last. Consulted by the type parser to classify bare names.
    type_param_scopes: Vec<Vec<String>>,
    /// Unconsumed halves of `>>` tokens split while closing nested
    /// type-argument lists.
    gt_debt: u8,
    /// How many type-argument lists are currently open. A `>>` may only
    /// be split when two of them are.
    generic_depth: u8,
}

/// A saved cursor position for speculative parses.
#[derive(Clone, Copy)]
pub(crate) struct Checkpoint {
    pos: usize,
    gt_debt: u8,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        let end = tokens.last().map_or(0, |t| t.span.end);
        Self {
            tokens,
            pos: 0,
            eof: Token::eof(end),
            type_param_scopes: Vec::new(),
            gt_debt: 0,
            generic_depth: 0,
        }
    }

    /// Parse the whole stream as one module. The module name comes from
    /// the caller; file resolution is not the parser's concern.
    ///
    /// Consumes the parser: one tree per parse invocation.
    pub fn parse_module(mut self, name: impl Into<String>) -> ParseResult<Module> {
        self.parse_module_decls(name.into())
    }

    // ==================== Cursor ====================

    pub(crate) fn peek(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&self.eof)
    }

    pub(crate) fn peek_at(&self, offset: usize) -> &Token {
        self.tokens.get(self.pos + offset).unwrap_or(&self.eof)
    }

    /// Span of the most recently consumed token; empty before the first.
    pub(crate) fn prev_span(&self) -> Span {
        if self.pos == 0 {
            Span::EMPTY
        } else {
            self.tokens[self.pos - 1].span
        }
    }

    /// Span from `start` through the last consumed token.
    pub(crate) fn span_from(&self, start: Span) -> Span {
        start.merge(self.prev_span())
    }

    /// Consume and return the next token. An unterminated literal in the
    /// stream surfaces here, the moment it is reached.
    pub(crate) fn advance(&mut self) -> ParseResult<Token> {
        let token = self.peek().clone();
        if matches!(token.kind, TokenKind::UnterminatedLiteral) {
            return Err(SyntaxError::UnterminatedLiteral { span: token.span });
        }
        if !matches!(token.kind, TokenKind::Eof) {
            self.pos += 1;
        }
        Ok(token)
    }

    /// Kind check by variant, ignoring payloads.
    pub(crate) fn check(&self, expected: &TokenKind) -> bool {
        std::mem::discriminant(&self.peek().kind) == std::mem::discriminant(expected)
    }

    pub(crate) fn check_at(&self, offset: usize, expected: &TokenKind) -> bool {
        std::mem::discriminant(&self.peek_at(offset).kind) == std::mem::discriminant(expected)
    }

    /// Consume the next token if it matches; report whether it did.
    pub(crate) fn eat(&mut self, expected: &TokenKind) -> ParseResult<bool> {
        if self.check(expected) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub(crate) fn expect(&mut self, expected: TokenKind) -> ParseResult<Token> {
        if self.check(&expected) {
            self.advance()
        } else {
            Err(self.unexpected(&format!("`{expected}`")))
        }
    }

    pub(crate) fn expect_ident(&mut self) -> ParseResult<(String, Span)> {
        let token = self.advance()?;
        match token.kind {
            TokenKind::Ident(name) => Ok((name, token.span)),
            kind => Err(SyntaxError::unexpected(
                "identifier",
                format!("`{kind}`"),
                token.span,
            )),
        }
    }

    /// Error for the current lookahead against a human-readable
    /// expectation. An unterminated literal keeps its own error kind no
    /// matter what was expected.
    pub(crate) fn unexpected(&self, expected: &str) -> SyntaxError {
        let token = self.peek();
        if matches!(token.kind, TokenKind::UnterminatedLiteral) {
            return SyntaxError::UnterminatedLiteral { span: token.span };
        }
        SyntaxError::unexpected(expected, format!("`{}`", token.kind), token.span)
    }

    // ==================== Speculation ====================

    pub(crate) fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pos: self.pos,
            gt_debt: self.gt_debt,
        }
    }

    pub(crate) fn rewind(&mut self, checkpoint: Checkpoint) {
        self.pos = checkpoint.pos;
        self.gt_debt = checkpoint.gt_debt;
    }

    // ==================== Generic-parameter scope ====================

    pub(crate) fn push_type_params(&mut self, names: Vec<String>) {
        self.type_param_scopes.push(names);
    }

    pub(crate) fn pop_type_params(&mut self) {
        self.type_param_scopes.pop();
    }

    pub(crate) fn is_type_param(&self, name: &str) -> bool {
        self.type_param_scopes
            .iter()
            .any(|scope| scope.iter().any(|p| p == name))
    }

    /// Close one `>` of a type-argument list. A `>>` token closes two
    /// nested lists; the second half is carried as debt so the inner and
    /// outer callers each consume one.
    pub(crate) fn close_generic_list(&mut self) -> ParseResult<()> {
        if self.gt_debt > 0 {
            self.gt_debt -= 1;
            return Ok(());
        }
        if self.check(&TokenKind::Gt) {
            self.advance()?;
            return Ok(());
        }
        if self.check(&TokenKind::Shr) && self.generic_depth > 1 {
            self.advance()?;
            self.gt_debt += 1;
            return Ok(());
        }
        Err(SyntaxError::type_syntax(
            format!("mismatched `<`: expected `>`, found `{}`", self.peek().kind),
            self.peek().span,
        ))
    }

    /// Balanced depth bookkeeping around a type-argument list, kept
    /// accurate on the error path so speculative rewinds stay sound.
    pub(crate) fn with_generic_list<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        self.generic_depth += 1;
        let result = parse(self);
        self.generic_depth -= 1;
        result
    }
}
