//! Opal AST node model
//!
//! Every node is a `{ kind, span }` record. The tree is built once by the
//! parser, is immutable afterwards, and is owned top-down: a parent record
//! directly contains its children and no node stores a back-reference.
//! Traversal-time parent tracking is the caller's responsibility.

pub mod decl;
pub mod equiv;
pub mod expr;
pub mod pattern;
pub mod stmt;
pub mod types;

pub use decl::{
    ClassDecl, EntityDecl, EntityKind, FieldDecl, FunctionDecl, ImportDecl, ImportSymbol,
    InterfaceDecl, Modifiers, ParamDecl,
};
pub use expr::{
    BinOp, CompFor, CompIf, CompNext, Constant, Expr, ExprKind, SeqEntry, SeqKind, UnaryOp,
};
pub use pattern::{Pattern, PatternKind};
pub use stmt::{Block, CatchClause, MatchClause, Stmt, StmtKind};
pub use types::{AstType, AstTypeKind, PrimitiveType};

use crate::common::Span;

/// A parsed source module.
///
/// Entity and import declarations keep their source order; later passes
/// rely on that order being exactly what was written.
#[derive(Debug, Clone)]
pub struct Module {
    pub name: String,
    pub entities: Vec<EntityDecl>,
    pub imports: Vec<ImportDecl>,
    pub span: Span,
}

impl Module {
    pub fn new(
        name: String,
        entities: Vec<EntityDecl>,
        imports: Vec<ImportDecl>,
        span: Span,
    ) -> Self {
        Self {
            name,
            entities,
            imports,
            span,
        }
    }
}
