//! Opal pattern AST nodes

use super::{AstType, Expr};
use crate::common::Span;

/// A pattern, as used by match clauses, destructuring bindings, for-loop
/// binders, and if conditions.
#[derive(Debug, Clone)]
pub struct Pattern {
    pub kind: PatternKind,
    pub span: Span,
}

impl Pattern {
    pub fn new(kind: PatternKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn wildcard(span: Span) -> Self {
        Self::new(PatternKind::Wildcard, span)
    }

    /// A bare name binding with no annotation and no sub-pattern.
    pub fn binding(name: impl Into<String>, span: Span) -> Self {
        Self::new(
            PatternKind::Identifier {
                name: name.into(),
                ty: AstType::placeholder(),
                sub: None,
            },
            span,
        )
    }
}

/// Pattern kinds
#[derive(Debug, Clone)]
pub enum PatternKind {
    /// Matches by equality, or by membership when the expression is a
    /// range: 0, "done", 3..=10
    Expression(Expr),

    /// Binds the matched value (or the sub-pattern's match) to a name:
    /// x, total: int, i @ 3..=10
    Identifier {
        name: String,
        ty: AstType,
        sub: Option<Box<Pattern>>,
    },

    /// Matches a value of the named type and destructures its fields
    /// positionally: Point(x, y), Circle(center, ..)
    Destructuring { ty: AstType, fields: Vec<Pattern> },

    /// Exact-arity tuple: (a, b, c)
    Tuple(Vec<Pattern>),

    /// Collection with a vector/array discriminator. Arity is exact
    /// unless the final element is IgnoringRest: vector [first, ..]
    Collection { vector: bool, items: Vec<Pattern> },

    /// Matches anything, binds nothing: _
    Wildcard,

    /// Skips the remaining elements; legal only as the trailing element
    /// of a tuple, collection, or destructuring pattern: ..
    IgnoringRest,
}

impl PatternKind {
    pub fn is_rest(&self) -> bool {
        matches!(self, PatternKind::IgnoringRest)
    }
}
