//! Opal statement AST nodes

use super::{AstType, Expr, Modifiers, Pattern};
use crate::common::Span;

/// A braced sequence of statements.
#[derive(Debug, Clone)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

impl Block {
    pub fn new(stmts: Vec<Stmt>, span: Span) -> Self {
        Self { stmts, span }
    }

    /// Wraps a lone statement, as match clause bodies written without
    /// braces require.
    pub fn single(stmt: Stmt) -> Self {
        let span = stmt.span;
        Self::new(vec![stmt], span)
    }
}

/// A statement
#[derive(Debug, Clone)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Statement kinds
#[derive(Debug, Clone)]
pub enum StmtKind {
    /// Nested block: { .. }
    Block(Block),

    /// Local binding: let x = 5; or var a = 1, b = 2;
    ///
    /// One pattern per declarator. The initializer list is either empty
    /// (no declarator initialized) or exactly parallel to the pattern
    /// list; both come out of the same declarator production, so no other
    /// shape can be built.
    VarDecl {
        patterns: Vec<Pattern>,
        inits: Vec<Expr>,
        modifiers: Modifiers,
    },

    /// Expression statement: f(x);
    ExprStmt(Expr),

    /// Conditional. The condition runs through the pattern production, so
    /// boolean tests and pattern guards share one shape; else-if chains
    /// nest as an If in `else_branch`.
    If {
        condition: Pattern,
        then_block: Block,
        else_branch: Option<Box<Stmt>>,
    },

    /// Pre-tested loop: while cond { .. }
    While { condition: Expr, body: Block },
    /// Post-tested loop, body always runs at least once:
    /// do { .. } while cond;
    DoWhile { condition: Expr, body: Block },

    /// Value-binding loop over a range or any iterable expression; one
    /// body execution per produced element. The range/iterable
    /// distinction is resolved by a later pass, not syntactically.
    For {
        modifiers: Modifiers,
        pattern: Pattern,
        source: Expr,
        body: Block,
    },

    /// Multi-clause match; clauses keep written order, first match wins
    /// at execution time (enforced by the evaluator, not re-validated
    /// here).
    Match {
        subject: Expr,
        clauses: Vec<MatchClause>,
    },

    /// try { .. } catch e: E { .. } finally { .. }
    /// At least one catch clause or the finally block is present.
    Try {
        body: Block,
        catches: Vec<CatchClause>,
        finally: Option<Block>,
    },

    /// throw expr;
    Throw(Expr),

    /// break; or break 2; — the level count is recorded opaquely,
    /// interpretation belongs to the control-flow resolver.
    Break { levels: u32 },
    /// continue; or continue 2;
    Continue { levels: u32 },

    /// return; or return a, b; — an empty list returns no value.
    Return(Vec<Expr>),
}

/// One clause of a match statement: one or more alternative patterns, an
/// optional guard gating the whole clause, and a body.
#[derive(Debug, Clone)]
pub struct MatchClause {
    pub patterns: Vec<Pattern>,
    pub guard: Option<Expr>,
    pub body: Block,
    pub span: Span,
}

/// One catch clause: the typed identifier binding the caught value, and
/// the handler block.
#[derive(Debug, Clone)]
pub struct CatchClause {
    pub name: String,
    pub ty: AstType,
    pub body: Block,
    pub span: Span,
}
