//! Opal expression AST nodes

use super::{AstType, Block, ParamDecl, Pattern};
use crate::common::Span;
use std::fmt;

/// An Opal expression
#[derive(Debug, Clone)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// The implicit null initializer slotted in for uninitialized fields.
    /// Synthesized, so it carries the empty span.
    pub fn null_sentinel() -> Self {
        Self::new(ExprKind::NullReference, Span::EMPTY)
    }

    /// Splits a comma sequence into its elements; any other expression
    /// becomes a one-element list. Used by the tuple-parallel assignment
    /// forms.
    pub fn into_sequence_parts(self) -> Vec<Expr> {
        match self.kind {
            ExprKind::SequenceExpression(parts) => parts,
            _ => vec![self],
        }
    }
}

/// Expression kinds
#[derive(Debug, Clone)]
pub enum ExprKind {
    /// Literal with its decoded value: 255, 0xff, 2.5, "text"
    Constant(Constant),

    /// Unresolved scoped name, resolution deferred to the binder:
    /// count, Color::Red
    IdentifierPath(Vec<String>),

    /// Binary operation: a + b
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Prefix operation: -x, !x, ~x
    Unary { op: UnaryOp, operand: Box<Expr> },

    /// Plain assignment: x = 5, (a, b) = pair
    SingleAssignment { target: Box<Expr>, value: Box<Expr> },
    /// Chained assignment: a = b = c. The node's own target is the
    /// leftmost link; the rest of the chain nests in `assignment`.
    MultipleAssignment {
        target: Box<Expr>,
        assignment: Box<Expr>,
    },
    /// Compound assignment, scalar or tuple-parallel:
    /// x += 1, or a, b += 1, 2
    AugmentedAssignment {
        op: BinOp,
        targets: Vec<Expr>,
        values: Vec<Expr>,
    },

    /// Call: f(x), sort<int>(xs)
    Call {
        callee: Box<Expr>,
        type_args: Vec<AstType>,
        args: Vec<Expr>,
    },
    /// Indexing by a scalar or a range: xs[0], xs[1..3]
    Indexer { target: Box<Expr>, index: Box<Expr> },
    /// Member access: point.x
    MemberReference { target: Box<Expr>, member: String },
    /// Named-field construction, field order as written:
    /// Point(x: 1, y: 2)
    ObjectCreation {
        ty: AstType,
        fields: Vec<String>,
        values: Vec<Expr>,
    },

    /// Comma sequence. Zero, one, or many elements denote void, a
    /// grouped scalar, and a tuple respectively.
    SequenceExpression(Vec<Expr>),
    /// Container literal; element types stay Placeholder for inference:
    /// vector [1, 2], dictionary { "a": 1 }
    SequenceInitializer { ty: AstType, entries: Vec<SeqEntry> },

    /// Arithmetic progression, usable as a value or a loop source:
    /// 0..n, 1..=10 by 2. The step is recorded only when written.
    IntSeq {
        start: Box<Expr>,
        end: Box<Expr>,
        step: Option<Box<Expr>>,
        inclusive: bool,
    },

    /// Explicit grouping: (expr). Distinct from a one-element
    /// SequenceExpression.
    Paren(Box<Expr>),

    /// Closure literal: closure [cap] (x: int) -> int { .. }.
    /// The capture list stays empty unless written literally.
    Closure {
        return_type: AstType,
        body: Block,
        params: Vec<ParamDecl>,
        captures: Vec<String>,
    },

    /// Comprehension: [x * x for x in 0..n if x % 2 == 0]
    Comprehension {
        container: SeqKind,
        element: Box<Expr>,
        head: Box<CompFor>,
    },

    /// Cast: x as double
    Cast { expr: Box<Expr>, ty: AstType },

    /// The receiver of the enclosing method: self
    SelfReference,
    /// The null literal
    NullReference,
}

/// A decoded literal value tagged with its subtype.
#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    Int(i64),
    UInt(u64),
    Float(f32),
    Double(f64),
    BigInt(String),
    Bool(bool),
    Char(char),
    Str { value: String, raw: bool },
}

/// Which literal form enclosed a sequence or comprehension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeqKind {
    List,
    Dictionary,
    Tuple,
}

/// One entry of a sequence initializer: a plain element, or a key-value
/// pair inside a dictionary literal.
#[derive(Debug, Clone)]
pub enum SeqEntry {
    Item(Expr),
    Pair { key: Expr, value: Expr },
}

/// One `for` clause of a comprehension.
#[derive(Debug, Clone)]
pub struct CompFor {
    pub pattern: Pattern,
    pub source: Box<Expr>,
    pub next: Option<Box<CompNext>>,
}

/// One `if` clause of a comprehension.
#[derive(Debug, Clone)]
pub struct CompIf {
    pub condition: Box<Expr>,
    pub next: Option<Box<CompNext>>,
}

/// Continuation of a comprehension clause chain, nesting left to right
/// in written order.
#[derive(Debug, Clone)]
pub enum CompNext {
    For(CompFor),
    If(CompIf),
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Logical
    Or,  // ||
    And, // &&

    // Bitwise
    BitOr,  // |
    BitAnd, // &

    // Comparison
    Eq, // ==
    Ne, // !=
    Lt, // <
    Le, // <=
    Gt, // >
    Ge, // >=

    // Shift
    Shl, // <<
    Shr, // >>

    // Arithmetic
    Add, // +
    Sub, // -
    Mul, // *
    Div, // /
    Rem, // %
    Pow, // ^
}

impl BinOp {
    /// Binding strength, loosest = 1. Range construction sits between the
    /// relational and shift tiers and is handled structurally by the
    /// parser rather than through this table.
    pub fn precedence(self) -> u8 {
        match self {
            BinOp::Or => 1,
            BinOp::And => 2,
            BinOp::BitOr => 3,
            BinOp::BitAnd => 4,
            BinOp::Eq | BinOp::Ne => 5,
            BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge => 6,
            BinOp::Shl | BinOp::Shr => 8,
            BinOp::Add | BinOp::Sub => 9,
            BinOp::Mul | BinOp::Div | BinOp::Rem => 10,
            BinOp::Pow => 11,
        }
    }

    /// Power chains to the right; everything else to the left.
    pub fn is_right_assoc(self) -> bool {
        matches!(self, BinOp::Pow)
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinOp::Eq | BinOp::Ne | BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge
        )
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinOp::Or => write!(f, "||"),
            BinOp::And => write!(f, "&&"),
            BinOp::BitOr => write!(f, "|"),
            BinOp::BitAnd => write!(f, "&"),
            BinOp::Eq => write!(f, "=="),
            BinOp::Ne => write!(f, "!="),
            BinOp::Lt => write!(f, "<"),
            BinOp::Le => write!(f, "<="),
            BinOp::Gt => write!(f, ">"),
            BinOp::Ge => write!(f, ">="),
            BinOp::Shl => write!(f, "<<"),
            BinOp::Shr => write!(f, ">>"),
            BinOp::Add => write!(f, "+"),
            BinOp::Sub => write!(f, "-"),
            BinOp::Mul => write!(f, "*"),
            BinOp::Div => write!(f, "/"),
            BinOp::Rem => write!(f, "%"),
            BinOp::Pow => write!(f, "^"),
        }
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,    // -
    Not,    // !
    BitNot, // ~
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOp::Neg => write!(f, "-"),
            UnaryOp::Not => write!(f, "!"),
            UnaryOp::BitNot => write!(f, "~"),
        }
    }
}
