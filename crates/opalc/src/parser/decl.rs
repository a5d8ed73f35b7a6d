//! Declaration parsing
//!
//! Top-level entities (functions, classes, interfaces, field groups) and
//! import declarations, assembled into the Module in source order.

use crate::ast::{
    ClassDecl, EntityDecl, EntityKind, Expr, FieldDecl, FunctionDecl, ImportDecl, ImportSymbol,
    InterfaceDecl, Modifiers, Module, ParamDecl,
};
use crate::common::{ParseResult, Span, SyntaxError};
use crate::token::TokenKind;

use super::Parser;

impl Parser {
    pub(crate) fn parse_module_decls(&mut self, name: String) -> ParseResult<Module> {
        let start = self.peek().span;
        let mut entities = Vec::new();
        let mut imports = Vec::new();

        while !self.check(&TokenKind::Eof) {
            if self.check(&TokenKind::Import) {
                imports.push(self.parse_import()?);
            } else {
                entities.push(self.parse_entity(false)?);
            }
        }

        Ok(Module::new(name, entities, imports, self.span_from(start)))
    }

    // ==================== Entities ====================

    fn parse_entity(&mut self, in_interface: bool) -> ParseResult<EntityDecl> {
        let start = self.peek().span;
        let modifiers = self.parse_modifiers()?;

        let kind = if self.check(&TokenKind::Fn) {
            self.parse_function(modifiers, in_interface)?
        } else if self.check(&TokenKind::Class) {
            self.parse_class(modifiers)?
        } else if self.check(&TokenKind::Interface) {
            self.parse_interface(modifiers)?
        } else if self.check(&TokenKind::Let) || self.check(&TokenKind::Var) {
            self.parse_field_group(modifiers, in_interface)?
        } else {
            return Err(self.unexpected("a declaration"));
        };

        Ok(EntityDecl::new(kind, self.span_from(start)))
    }

    fn parse_modifiers(&mut self) -> ParseResult<Modifiers> {
        let mut modifiers = Modifiers::empty();
        loop {
            if self.eat(&TokenKind::Pub)? {
                modifiers |= Modifiers::PUBLIC;
            } else if self.eat(&TokenKind::Priv)? {
                modifiers |= Modifiers::PRIVATE;
            } else if self.eat(&TokenKind::Export)? {
                modifiers |= Modifiers::EXPORT;
            } else {
                return Ok(modifiers);
            }
        }
    }

    /// `<T, U>` on a function or class. Plain names only, so a bare `>`
    /// always closes the list.
    fn parse_type_params(&mut self) -> ParseResult<Vec<String>> {
        let mut params = Vec::new();
        if self.eat(&TokenKind::Lt)? {
            loop {
                params.push(self.expect_ident()?.0);
                if !self.eat(&TokenKind::Comma)? {
                    break;
                }
            }
            self.expect(TokenKind::Gt)?;
        }
        Ok(params)
    }

    fn parse_function(
        &mut self,
        mut modifiers: Modifiers,
        in_interface: bool,
    ) -> ParseResult<EntityKind> {
        let start = self.expect(TokenKind::Fn)?.span;
        let (name, _) = self.expect_ident()?;

        let type_params = self.parse_type_params()?;
        self.push_type_params(type_params.clone());

        self.expect(TokenKind::LParen)?;
        let params = self.parse_params()?;
        self.expect(TokenKind::RParen)?;

        let return_type = if self.eat(&TokenKind::Arrow)? {
            self.parse_type()?
        } else {
            crate::ast::AstType::placeholder()
        };

        let body = if self.check(&TokenKind::LBrace) {
            if in_interface {
                return Err(self.unexpected("`;`"));
            }
            Some(self.parse_block()?)
        } else {
            self.expect(TokenKind::Semi)?;
            None
        };

        self.pop_type_params();

        if in_interface && !modifiers.intersects(Modifiers::PUBLIC | Modifiers::PRIVATE) {
            modifiers |= Modifiers::PUBLIC;
        }

        Ok(EntityKind::Function(FunctionDecl {
            name,
            type_params,
            params,
            return_type,
            body,
            modifiers,
            span: self.span_from(start),
        }))
    }

    /// The parameter list between the parentheses. `..name` marks a
    /// variadic parameter; only the last position may carry it.
    pub(crate) fn parse_params(&mut self) -> ParseResult<Vec<ParamDecl>> {
        let mut params = Vec::new();
        while !self.check(&TokenKind::RParen) {
            let start = self.peek().span;
            let variadic = self.eat(&TokenKind::DotDot)?;
            let (name, _) = self.expect_ident()?;
            let ty = self.parse_type_annotation()?;
            let default = if self.eat(&TokenKind::Eq)? {
                Some(self.parse_operand()?)
            } else {
                None
            };
            params.push(ParamDecl {
                name,
                ty,
                default,
                variadic,
                span: self.span_from(start),
            });
            if !self.eat(&TokenKind::Comma)? {
                break;
            }
        }

        for (i, param) in params.iter().enumerate() {
            if param.variadic && i + 1 != params.len() {
                return Err(SyntaxError::MisplacedVariadic { span: param.span });
            }
        }
        Ok(params)
    }

    fn parse_class(&mut self, modifiers: Modifiers) -> ParseResult<EntityKind> {
        let start = self.expect(TokenKind::Class)?.span;
        let (name, _) = self.expect_ident()?;

        let type_params = self.parse_type_params()?;
        self.push_type_params(type_params.clone());

        let mut interfaces = Vec::new();
        if self.eat(&TokenKind::Colon)? {
            loop {
                interfaces.push(self.parse_type()?);
                if !self.eat(&TokenKind::Comma)? {
                    break;
                }
            }
        }

        self.expect(TokenKind::LBrace)?;
        let mut members = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.check(&TokenKind::Eof) {
            members.push(self.parse_entity(false)?);
        }
        self.expect(TokenKind::RBrace)?;

        self.pop_type_params();

        Ok(EntityKind::Class(ClassDecl {
            name,
            type_params,
            interfaces,
            members,
            modifiers,
            span: self.span_from(start),
        }))
    }

    fn parse_interface(&mut self, modifiers: Modifiers) -> ParseResult<EntityKind> {
        let start = self.expect(TokenKind::Interface)?.span;
        let (name, _) = self.expect_ident()?;

        let type_params = self.parse_type_params()?;
        self.push_type_params(type_params.clone());

        self.expect(TokenKind::LBrace)?;
        let mut members = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.check(&TokenKind::Eof) {
            members.push(self.parse_entity(true)?);
        }
        self.expect(TokenKind::RBrace)?;

        self.pop_type_params();

        Ok(EntityKind::Interface(InterfaceDecl {
            name,
            type_params,
            members,
            modifiers,
            span: self.span_from(start),
        }))
    }

    /// A `let`/`var` declarator group sharing one modifier set. The
    /// declared type lives in the (pattern, type) pair; an uninitialized
    /// slot gets the null sentinel so both lists stay parallel.
    fn parse_field_group(
        &mut self,
        modifiers: Modifiers,
        in_interface: bool,
    ) -> ParseResult<EntityKind> {
        let start = self.peek().span;
        let immutable = self.check(&TokenKind::Let);
        self.advance()?;
        let modifiers = if immutable {
            modifiers | Modifiers::IMMUTABLE
        } else {
            modifiers
        };

        let mut decls = Vec::new();
        let mut inits = Vec::new();
        loop {
            let pattern = self.parse_pattern()?;
            let ty = self.parse_type_annotation()?;
            if self.check(&TokenKind::Eq) {
                if in_interface {
                    return Err(self.unexpected("`;`"));
                }
                self.advance()?;
                inits.push(self.parse_operand()?);
            } else {
                inits.push(Expr::null_sentinel());
            }
            decls.push((pattern, ty));
            if !self.eat(&TokenKind::Comma)? {
                break;
            }
        }
        self.expect(TokenKind::Semi)?;

        Ok(EntityKind::Field(FieldDecl {
            decls,
            inits,
            modifiers,
            span: self.span_from(start),
        }))
    }

    // ==================== Imports ====================

    /// `import "path" as Alias;` or `import "path"::{Sym, Sym as A};`,
    /// either form optionally followed by `from "file"`.
    fn parse_import(&mut self) -> ParseResult<ImportDecl> {
        let start = self.expect(TokenKind::Import)?.span;
        let (path, _) = self.expect_string()?;

        let mut symbols = Vec::new();
        if self.eat(&TokenKind::As)? {
            let (name, span) = self.expect_ident()?;
            symbols.push(ImportSymbol {
                name,
                alias: None,
                span,
            });
        } else if self.eat(&TokenKind::ColonColon)? {
            self.expect(TokenKind::LBrace)?;
            loop {
                let (name, name_span) = self.expect_ident()?;
                let alias = if self.eat(&TokenKind::As)? {
                    Some(self.expect_ident()?.0)
                } else {
                    None
                };
                symbols.push(ImportSymbol {
                    name,
                    alias,
                    span: self.span_from(name_span),
                });
                if !self.eat(&TokenKind::Comma)? {
                    break;
                }
            }
            self.expect(TokenKind::RBrace)?;
        } else {
            return Err(self.unexpected("`as` or `::`"));
        }

        let source = if self.eat(&TokenKind::From)? {
            Some(self.expect_string()?.0)
        } else {
            None
        };
        self.expect(TokenKind::Semi)?;

        Ok(ImportDecl {
            path,
            symbols,
            source,
            span: self.span_from(start),
        })
    }

    fn expect_string(&mut self) -> ParseResult<(String, Span)> {
        if !self.check(&TokenKind::Str {
            value: String::new(),
            raw: false,
        }) {
            return Err(self.unexpected("string literal"));
        }
        let token = self.advance()?;
        let TokenKind::Str { value, .. } = token.kind else {
            unreachable!("checked above");
        };
        Ok((value, token.span))
    }
}
