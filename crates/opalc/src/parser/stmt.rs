//! Statement parsing
//!
//! Dispatch is on the leading keyword. `if` conditions run through the
//! pattern production so boolean tests and pattern guards share one
//! shape; `for` is the single production for range- and
//! collection-driven loops.

use crate::ast::{
    Block, CatchClause, MatchClause, Modifiers, Pattern, PatternKind, Stmt, StmtKind,
};
use crate::common::{ParseResult, SyntaxError};
use crate::token::TokenKind;

use super::Parser;

impl Parser {
    pub(crate) fn parse_block(&mut self) -> ParseResult<Block> {
        let start = self.expect(TokenKind::LBrace)?.span;
        let mut stmts = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.check(&TokenKind::Eof) {
            stmts.push(self.parse_stmt()?);
        }
        let end = self.expect(TokenKind::RBrace)?.span;
        Ok(Block::new(stmts, start.merge(end)))
    }

    pub(crate) fn parse_stmt(&mut self) -> ParseResult<Stmt> {
        if self.check(&TokenKind::LBrace) {
            let block = self.parse_block()?;
            let span = block.span;
            return Ok(Stmt::new(StmtKind::Block(block), span));
        }
        if self.check(&TokenKind::Let) || self.check(&TokenKind::Var) {
            return self.parse_var_decl_stmt();
        }
        if self.check(&TokenKind::If) {
            return self.parse_if_stmt();
        }
        if self.check(&TokenKind::While) {
            return self.parse_while_stmt();
        }
        if self.check(&TokenKind::Do) {
            return self.parse_do_while_stmt();
        }
        if self.check(&TokenKind::For) {
            return self.parse_for_stmt();
        }
        if self.check(&TokenKind::Match) {
            return self.parse_match_stmt();
        }
        if self.check(&TokenKind::Try) {
            return self.parse_try_stmt();
        }
        if self.check(&TokenKind::Throw) {
            return self.parse_throw_stmt();
        }
        if self.check(&TokenKind::Break) {
            return self.parse_break_stmt();
        }
        if self.check(&TokenKind::Continue) {
            return self.parse_continue_stmt();
        }
        if self.check(&TokenKind::Return) {
            return self.parse_return_stmt();
        }

        let start = self.peek().span;
        let expr = self.parse_expr()?;
        self.expect(TokenKind::Semi)?;
        Ok(Stmt::new(StmtKind::ExprStmt(expr), self.span_from(start)))
    }

    // ==================== Bindings ====================

    fn parse_var_decl_stmt(&mut self) -> ParseResult<Stmt> {
        let start = self.peek().span;
        let immutable = self.check(&TokenKind::Let);
        self.advance()?;
        let modifiers = if immutable {
            Modifiers::IMMUTABLE
        } else {
            Modifiers::empty()
        };

        let mut decls = vec![self.parse_var_declarator()?];
        while self.eat(&TokenKind::Comma)? {
            decls.push(self.parse_var_declarator()?);
        }
        self.expect(TokenKind::Semi)?;

        // Either every declarator is initialized or none is, so the
        // pattern and initializer lists stay parallel by construction.
        let initialized = decls.iter().filter(|(_, init)| init.is_some()).count();
        if initialized != 0 && initialized != decls.len() {
            let (pattern, _) = decls
                .iter()
                .find(|(_, init)| init.is_none())
                .expect("mixed initialization");
            return Err(SyntaxError::unexpected(
                "`=`",
                "uninitialized declarator",
                pattern.span,
            ));
        }

        let mut patterns = Vec::with_capacity(decls.len());
        let mut inits = Vec::with_capacity(initialized);
        for (pattern, init) in decls {
            patterns.push(pattern);
            if let Some(init) = init {
                inits.push(init);
            }
        }

        Ok(Stmt::new(
            StmtKind::VarDecl {
                patterns,
                inits,
                modifiers,
            },
            self.span_from(start),
        ))
    }

    /// One declarator: pattern, optional `: type` (folded into an
    /// identifier pattern), optional `= init`.
    fn parse_var_declarator(&mut self) -> ParseResult<(Pattern, Option<crate::ast::Expr>)> {
        let mut pattern = self.parse_pattern()?;
        if self.check(&TokenKind::Colon) {
            let PatternKind::Identifier { ty, .. } = &mut pattern.kind else {
                return Err(self.unexpected("`=`, `,`, or `;`"));
            };
            self.advance()?;
            *ty = self.parse_type()?;
            pattern.span = self.span_from(pattern.span);
        }
        let init = if self.eat(&TokenKind::Eq)? {
            Some(self.parse_operand()?)
        } else {
            None
        };
        Ok((pattern, init))
    }

    // ==================== Control flow ====================

    fn parse_if_stmt(&mut self) -> ParseResult<Stmt> {
        let start = self.expect(TokenKind::If)?.span;
        let condition = self.parse_pattern()?;
        let then_block = self.parse_block()?;

        let else_branch = if self.eat(&TokenKind::Else)? {
            if self.check(&TokenKind::If) {
                Some(Box::new(self.parse_if_stmt()?))
            } else {
                let block = self.parse_block()?;
                let span = block.span;
                Some(Box::new(Stmt::new(StmtKind::Block(block), span)))
            }
        } else {
            None
        };

        Ok(Stmt::new(
            StmtKind::If {
                condition,
                then_block,
                else_branch,
            },
            self.span_from(start),
        ))
    }

    fn parse_while_stmt(&mut self) -> ParseResult<Stmt> {
        let start = self.expect(TokenKind::While)?.span;
        let condition = self.parse_operand()?;
        let body = self.parse_block()?;
        Ok(Stmt::new(
            StmtKind::While { condition, body },
            self.span_from(start),
        ))
    }

    fn parse_do_while_stmt(&mut self) -> ParseResult<Stmt> {
        let start = self.expect(TokenKind::Do)?.span;
        let body = self.parse_block()?;
        self.expect(TokenKind::While)?;
        let condition = self.parse_operand()?;
        self.expect(TokenKind::Semi)?;
        Ok(Stmt::new(
            StmtKind::DoWhile { condition, body },
            self.span_from(start),
        ))
    }

    fn parse_for_stmt(&mut self) -> ParseResult<Stmt> {
        let start = self.expect(TokenKind::For)?.span;

        let modifiers = if self.eat(&TokenKind::Let)? {
            Modifiers::IMMUTABLE
        } else {
            self.eat(&TokenKind::Var)?;
            Modifiers::empty()
        };

        let pattern = self.parse_pattern()?;
        self.expect(TokenKind::In)?;
        let source = self.parse_operand()?;
        let body = self.parse_block()?;

        Ok(Stmt::new(
            StmtKind::For {
                modifiers,
                pattern,
                source,
                body,
            },
            self.span_from(start),
        ))
    }

    fn parse_match_stmt(&mut self) -> ParseResult<Stmt> {
        let start = self.expect(TokenKind::Match)?.span;
        let subject = self.parse_operand()?;
        self.expect(TokenKind::LBrace)?;

        let mut clauses = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.check(&TokenKind::Eof) {
            clauses.push(self.parse_match_clause()?);
        }
        if clauses.is_empty() {
            return Err(self.unexpected("a match clause"));
        }
        self.expect(TokenKind::RBrace)?;

        Ok(Stmt::new(
            StmtKind::Match { subject, clauses },
            self.span_from(start),
        ))
    }

    /// pat1, pat2 | pat3 [if guard] => body
    ///
    /// The guard gates the whole clause, not individual alternatives.
    fn parse_match_clause(&mut self) -> ParseResult<MatchClause> {
        let start = self.peek().span;

        let mut patterns = vec![self.parse_match_pattern()?];
        while self.check(&TokenKind::Comma) || self.check(&TokenKind::Pipe) {
            self.advance()?;
            patterns.push(self.parse_match_pattern()?);
        }

        let guard = if self.eat(&TokenKind::If)? {
            Some(self.parse_operand()?)
        } else {
            None
        };

        self.expect(TokenKind::FatArrow)?;
        let body = if self.check(&TokenKind::LBrace) {
            self.parse_block()?
        } else {
            Block::single(self.parse_stmt()?)
        };

        Ok(MatchClause {
            patterns,
            guard,
            body,
            span: self.span_from(start),
        })
    }

    fn parse_try_stmt(&mut self) -> ParseResult<Stmt> {
        let start = self.expect(TokenKind::Try)?.span;
        let body = self.parse_block()?;

        let mut catches = Vec::new();
        while self.check(&TokenKind::Catch) {
            let catch_start = self.advance()?.span;
            let (name, _) = self.expect_ident()?;
            self.expect(TokenKind::Colon)?;
            let ty = self.parse_type()?;
            let handler = self.parse_block()?;
            catches.push(CatchClause {
                name,
                ty,
                body: handler,
                span: self.span_from(catch_start),
            });
        }

        let finally = if self.eat(&TokenKind::Finally)? {
            Some(self.parse_block()?)
        } else {
            None
        };

        if catches.is_empty() && finally.is_none() {
            return Err(SyntaxError::DanglingTry { span: start });
        }

        Ok(Stmt::new(
            StmtKind::Try {
                body,
                catches,
                finally,
            },
            self.span_from(start),
        ))
    }

    fn parse_throw_stmt(&mut self) -> ParseResult<Stmt> {
        let start = self.expect(TokenKind::Throw)?.span;
        let expr = self.parse_operand()?;
        self.expect(TokenKind::Semi)?;
        Ok(Stmt::new(StmtKind::Throw(expr), self.span_from(start)))
    }

    fn parse_break_stmt(&mut self) -> ParseResult<Stmt> {
        let start = self.expect(TokenKind::Break)?.span;
        let levels = self.parse_unwind_levels()?;
        self.expect(TokenKind::Semi)?;
        Ok(Stmt::new(StmtKind::Break { levels }, self.span_from(start)))
    }

    fn parse_continue_stmt(&mut self) -> ParseResult<Stmt> {
        let start = self.expect(TokenKind::Continue)?.span;
        let levels = self.parse_unwind_levels()?;
        self.expect(TokenKind::Semi)?;
        Ok(Stmt::new(
            StmtKind::Continue { levels },
            self.span_from(start),
        ))
    }

    /// Optional trailing integer literal; absence means one level. The
    /// count is recorded opaquely for the control-flow resolver.
    fn parse_unwind_levels(&mut self) -> ParseResult<u32> {
        if !self.check(&TokenKind::Int(0)) {
            return Ok(1);
        }
        let token = self.advance()?;
        let TokenKind::Int(value) = token.kind else {
            unreachable!("checked above");
        };
        u32::try_from(value)
            .ok()
            .filter(|&levels| levels >= 1)
            .ok_or_else(|| {
                SyntaxError::unexpected("a positive level count", format!("`{value}`"), token.span)
            })
    }

    fn parse_return_stmt(&mut self) -> ParseResult<Stmt> {
        let start = self.expect(TokenKind::Return)?.span;
        let mut values = Vec::new();
        if !self.check(&TokenKind::Semi) {
            loop {
                values.push(self.parse_operand()?);
                if !self.eat(&TokenKind::Comma)? {
                    break;
                }
            }
        }
        self.expect(TokenKind::Semi)?;
        Ok(Stmt::new(StmtKind::Return(values), self.span_from(start)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinOp, Constant, ExprKind};
    use crate::token::fixtures::{ident, stream};
    use crate::token::TokenKind as T;
    use pretty_assertions::assert_eq;

    fn parse_stmt(kinds: Vec<T>) -> Stmt {
        Parser::new(stream(kinds)).parse_stmt().unwrap()
    }

    fn parse_stmt_err(kinds: Vec<T>) -> SyntaxError {
        Parser::new(stream(kinds)).parse_stmt().unwrap_err()
    }

    #[test]
    fn test_else_if_chains_nest() {
        let stmt = parse_stmt(vec![
            T::If,
            ident("a"),
            T::LBrace,
            T::RBrace,
            T::Else,
            T::If,
            ident("b"),
            T::LBrace,
            T::RBrace,
            T::Else,
            T::LBrace,
            T::RBrace,
        ]);
        let StmtKind::If { else_branch, .. } = stmt.kind else {
            panic!("expected if");
        };
        let inner = else_branch.unwrap();
        let StmtKind::If { else_branch, .. } = inner.kind else {
            panic!("expected nested if for else-if");
        };
        assert!(matches!(else_branch.unwrap().kind, StmtKind::Block(_)));
    }

    #[test]
    fn test_if_condition_is_a_pattern() {
        let stmt = parse_stmt(vec![
            T::If,
            ident("x"),
            T::At,
            T::Int(0),
            T::DotDot,
            T::Int(10),
            T::LBrace,
            T::RBrace,
        ]);
        let StmtKind::If { condition, .. } = stmt.kind else {
            panic!("expected if");
        };
        assert!(matches!(condition.kind, PatternKind::Identifier { sub: Some(_), .. }));
    }

    #[test]
    fn test_boolean_condition_stays_an_expression_pattern() {
        let stmt = parse_stmt(vec![
            T::If,
            ident("x"),
            T::Gt,
            T::Int(0),
            T::LBrace,
            T::RBrace,
        ]);
        let StmtKind::If { condition, .. } = stmt.kind else {
            panic!("expected if");
        };
        let PatternKind::Expression(expr) = condition.kind else {
            panic!("expected expression condition");
        };
        assert!(matches!(expr.kind, ExprKind::Binary { op: BinOp::Gt, .. }));
    }

    #[test]
    fn test_while_and_do_while_differ_structurally() {
        let pre = parse_stmt(vec![T::While, ident("go"), T::LBrace, T::RBrace]);
        assert!(matches!(pre.kind, StmtKind::While { .. }));

        let post = parse_stmt(vec![
            T::Do,
            T::LBrace,
            T::RBrace,
            T::While,
            ident("go"),
            T::Semi,
        ]);
        assert!(matches!(post.kind, StmtKind::DoWhile { .. }));
    }

    #[test]
    fn test_for_with_binding_modifier() {
        let stmt = parse_stmt(vec![
            T::For,
            T::Let,
            ident("x"),
            T::In,
            ident("items"),
            T::LBrace,
            T::RBrace,
        ]);
        let StmtKind::For { modifiers, .. } = stmt.kind else {
            panic!("expected for");
        };
        assert!(modifiers.contains(Modifiers::IMMUTABLE));
    }

    #[test]
    fn test_match_guard_gates_whole_clause() {
        let stmt = parse_stmt(vec![
            T::Match,
            ident("x"),
            T::LBrace,
            T::Int(1),
            T::Pipe,
            T::Int(2),
            T::If,
            ident("ready"),
            T::FatArrow,
            T::LBrace,
            T::RBrace,
            T::RBrace,
        ]);
        let StmtKind::Match { clauses, .. } = stmt.kind else {
            panic!("expected match");
        };
        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0].patterns.len(), 2);
        assert!(clauses[0].guard.is_some());
    }

    #[test]
    fn test_match_clause_single_statement_body() {
        let stmt = parse_stmt(vec![
            T::Match,
            ident("x"),
            T::LBrace,
            T::Underscore,
            T::FatArrow,
            T::Return,
            T::Semi,
            T::RBrace,
        ]);
        let StmtKind::Match { clauses, .. } = stmt.kind else {
            panic!("expected match");
        };
        assert_eq!(clauses[0].body.stmts.len(), 1);
        assert!(matches!(clauses[0].body.stmts[0].kind, StmtKind::Return(_)));
    }

    #[test]
    fn test_empty_match_is_rejected() {
        let err = parse_stmt_err(vec![T::Match, ident("x"), T::LBrace, T::RBrace]);
        assert!(matches!(err, SyntaxError::UnexpectedToken { .. }));
    }

    #[test]
    fn test_try_catch_finally_order() {
        let stmt = parse_stmt(vec![
            T::Try,
            T::LBrace,
            T::RBrace,
            T::Catch,
            ident("e"),
            T::Colon,
            ident("IoError"),
            T::LBrace,
            T::RBrace,
            T::Catch,
            ident("e"),
            T::Colon,
            ident("Error"),
            T::LBrace,
            T::RBrace,
            T::Finally,
            T::LBrace,
            T::RBrace,
        ]);
        let StmtKind::Try { catches, finally, .. } = stmt.kind else {
            panic!("expected try");
        };
        assert_eq!(catches.len(), 2);
        assert_eq!(catches[0].name, "e");
        assert!(finally.is_some());
    }

    #[test]
    fn test_finally_alone_satisfies_try() {
        let stmt = parse_stmt(vec![
            T::Try,
            T::LBrace,
            T::RBrace,
            T::Finally,
            T::LBrace,
            T::RBrace,
        ]);
        let StmtKind::Try { catches, finally, .. } = stmt.kind else {
            panic!("expected try");
        };
        assert!(catches.is_empty());
        assert!(finally.is_some());
    }

    #[test]
    fn test_break_levels_default_and_explicit() {
        let stmt = parse_stmt(vec![T::Break, T::Semi]);
        assert!(matches!(stmt.kind, StmtKind::Break { levels: 1 }));

        let stmt = parse_stmt(vec![T::Break, T::Int(2), T::Semi]);
        assert!(matches!(stmt.kind, StmtKind::Break { levels: 2 }));

        let stmt = parse_stmt(vec![T::Continue, T::Int(3), T::Semi]);
        assert!(matches!(stmt.kind, StmtKind::Continue { levels: 3 }));
    }

    #[test]
    fn test_zero_break_levels_rejected() {
        let err = parse_stmt_err(vec![T::Break, T::Int(0), T::Semi]);
        assert!(matches!(err, SyntaxError::UnexpectedToken { .. }));
    }

    #[test]
    fn test_return_value_lists() {
        let stmt = parse_stmt(vec![T::Return, T::Semi]);
        assert!(matches!(&stmt.kind, StmtKind::Return(values) if values.is_empty()));

        let stmt = parse_stmt(vec![T::Return, ident("a"), T::Comma, ident("b"), T::Semi]);
        assert!(matches!(&stmt.kind, StmtKind::Return(values) if values.len() == 2));
    }

    #[test]
    fn test_multi_declarator_binding() {
        let stmt = parse_stmt(vec![
            T::Let,
            ident("a"),
            T::Eq,
            T::Int(1),
            T::Comma,
            ident("b"),
            T::Eq,
            T::Int(2),
            T::Semi,
        ]);
        let StmtKind::VarDecl { patterns, inits, modifiers } = stmt.kind else {
            panic!("expected var decl");
        };
        assert_eq!(patterns.len(), 2);
        assert_eq!(inits.len(), 2);
        assert!(modifiers.contains(Modifiers::IMMUTABLE));
        assert!(matches!(inits[1].kind, ExprKind::Constant(Constant::Int(2))));
    }

    #[test]
    fn test_partial_initialization_rejected() {
        let err = parse_stmt_err(vec![
            T::Let,
            ident("a"),
            T::Eq,
            T::Int(1),
            T::Comma,
            ident("b"),
            T::Semi,
        ]);
        assert!(matches!(err, SyntaxError::UnexpectedToken { .. }));
    }

    #[test]
    fn test_destructuring_binding() {
        let stmt = parse_stmt(vec![
            T::Let,
            T::LParen,
            ident("a"),
            T::Comma,
            ident("b"),
            T::RParen,
            T::Eq,
            ident("pair"),
            T::Semi,
        ]);
        let StmtKind::VarDecl { patterns, .. } = stmt.kind else {
            panic!("expected var decl");
        };
        assert!(matches!(&patterns[0].kind, PatternKind::Tuple(items) if items.len() == 2));
    }

    #[test]
    fn test_expression_statement_requires_semicolon() {
        let err = parse_stmt_err(vec![ident("f"), T::LParen, T::RParen]);
        assert!(matches!(err, SyntaxError::UnexpectedToken { .. }));
    }

    #[test]
    fn test_throw_statement() {
        let stmt = parse_stmt(vec![
            T::Throw,
            ident("Error"),
            T::LParen,
            ident("msg"),
            T::Colon,
            T::Str { value: "boom".into(), raw: false },
            T::RParen,
            T::Semi,
        ]);
        let StmtKind::Throw(expr) = stmt.kind else {
            panic!("expected throw");
        };
        assert!(matches!(expr.kind, ExprKind::ObjectCreation { .. }));
    }
}
