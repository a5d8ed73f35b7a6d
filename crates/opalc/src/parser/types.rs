//! Type-annotation parsing

use crate::ast::{AstType, AstTypeKind, PrimitiveType};
use crate::common::{ParseResult, SyntaxError};
use crate::token::TokenKind;

use super::Parser;

impl Parser {
    /// Parse a type reference at the cursor.
    ///
    /// Bare names classify in order: reserved primitive, then an
    /// enclosing declaration's generic parameter, then a Generic with
    /// zero type arguments. `Outer.Inner` chains into Member types.
    pub(crate) fn parse_type(&mut self) -> ParseResult<AstType> {
        let start = self.peek().span;
        let mut ty = self.parse_type_atom()?;

        while self.eat(&TokenKind::Dot)? {
            let member = self.parse_type_atom()?;
            ty = AstType::new(
                AstTypeKind::Member {
                    owner: Box::new(ty),
                    member: Box::new(member),
                },
                self.span_from(start),
            );
        }

        Ok(ty)
    }

    /// Parse `: T` if present, Placeholder otherwise.
    pub(crate) fn parse_type_annotation(&mut self) -> ParseResult<AstType> {
        if self.eat(&TokenKind::Colon)? {
            self.parse_type()
        } else {
            Ok(AstType::placeholder())
        }
    }

    fn parse_type_atom(&mut self) -> ParseResult<AstType> {
        if self.check(&TokenKind::Closure) {
            return self.parse_closure_type();
        }
        if self.check(&TokenKind::Underscore) {
            let token = self.advance()?;
            return Ok(AstType::new(AstTypeKind::Placeholder, token.span));
        }

        let token = self.peek().clone();
        let TokenKind::Ident(name) = token.kind else {
            return Err(SyntaxError::type_syntax(
                format!("expected a type, found `{}`", token.kind),
                token.span,
            ));
        };
        self.advance()?;

        if let Some(primitive) = PrimitiveType::from_name(&name) {
            return Ok(AstType::primitive(primitive, token.span));
        }

        if self.check(&TokenKind::Lt) {
            self.advance()?;
            let args = self.parse_generic_args()?;
            return Ok(AstType::new(
                AstTypeKind::Generic { name, args },
                self.span_from(token.span),
            ));
        }

        if self.is_type_param(&name) {
            return Ok(AstType::new(AstTypeKind::Parameter(name), token.span));
        }

        Ok(AstType::named(name, token.span))
    }

    /// Parse the arguments of a generic type reference. The opening `<`
    /// has been consumed; the list must close with `>` (one half of a
    /// `>>` counts, the other half is left as debt for the outer list).
    pub(crate) fn parse_generic_args(&mut self) -> ParseResult<Vec<AstType>> {
        self.with_generic_list(|parser| {
            let mut args = Vec::new();
            loop {
                args.push(parser.parse_type()?);
                if parser.eat(&TokenKind::Comma)? {
                    continue;
                }
                parser.close_generic_list()?;
                break;
            }
            Ok(args)
        })
    }

    /// closure(T1, .., Tn) -> R
    fn parse_closure_type(&mut self) -> ParseResult<AstType> {
        let start = self.expect(TokenKind::Closure)?.span;
        self.expect(TokenKind::LParen)?;

        let mut params = Vec::new();
        if !self.check(&TokenKind::RParen) {
            loop {
                params.push(self.parse_type()?);
                if !self.eat(&TokenKind::Comma)? {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen)?;
        self.expect(TokenKind::Arrow)?;
        let ret = self.parse_type()?;

        Ok(AstType::new(
            AstTypeKind::Function {
                params,
                ret: Box::new(ret),
            },
            self.span_from(start),
        ))
    }
}
