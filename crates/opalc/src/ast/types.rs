//! Opal type annotations

use crate::common::Span;
use std::fmt;

/// A parsed type annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct AstType {
    pub kind: AstTypeKind,
    pub span: Span,
}

impl AstType {
    pub fn new(kind: AstTypeKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// The explicit defer-to-inference marker. Synthesized, so it carries
    /// the empty span.
    pub fn placeholder() -> Self {
        Self::new(AstTypeKind::Placeholder, Span::EMPTY)
    }

    pub fn primitive(primitive: PrimitiveType, span: Span) -> Self {
        Self::new(AstTypeKind::Primitive(primitive), span)
    }

    /// A named type with no type arguments.
    pub fn named(name: impl Into<String>, span: Span) -> Self {
        Self::new(
            AstTypeKind::Generic {
                name: name.into(),
                args: Vec::new(),
            },
            span,
        )
    }
}

/// Type annotation kinds
#[derive(Debug, Clone, PartialEq)]
pub enum AstTypeKind {
    /// Built-in primitive: int, bool, string
    Primitive(PrimitiveType),
    /// Named type with zero or more type arguments: Shape, List<int>
    Generic { name: String, args: Vec<AstType> },
    /// A generic type variable declared by an enclosing function or class
    Parameter(String),
    /// Nested type qualified by its owner: Outer.Inner
    Member {
        owner: Box<AstType>,
        member: Box<AstType>,
    },
    /// Closure type: closure(int, string) -> bool
    Function {
        params: Vec<AstType>,
        ret: Box<AstType>,
    },
    /// Type slot left to a later inference pass, distinct from any
    /// absence of annotation
    Placeholder,
}

/// The reserved primitive type set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveType {
    Int,
    Uint,
    Float,
    Double,
    BigInt,
    Bool,
    Char,
    String,
    Void,
}

impl PrimitiveType {
    /// Looks a bare name up in the reserved primitive set.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "int" => Some(Self::Int),
            "uint" => Some(Self::Uint),
            "float" => Some(Self::Float),
            "double" => Some(Self::Double),
            "bigint" => Some(Self::BigInt),
            "bool" => Some(Self::Bool),
            "char" => Some(Self::Char),
            "string" => Some(Self::String),
            "void" => Some(Self::Void),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Uint => "uint",
            Self::Float => "float",
            Self::Double => "double",
            Self::BigInt => "bigint",
            Self::Bool => "bool",
            Self::Char => "char",
            Self::String => "string",
            Self::Void => "void",
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl fmt::Display for AstType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            AstTypeKind::Primitive(p) => write!(f, "{p}"),
            AstTypeKind::Generic { name, args } => {
                write!(f, "{name}")?;
                if !args.is_empty() {
                    write!(f, "<")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    write!(f, ">")?;
                }
                Ok(())
            }
            AstTypeKind::Parameter(name) => write!(f, "{name}"),
            AstTypeKind::Member { owner, member } => write!(f, "{owner}.{member}"),
            AstTypeKind::Function { params, ret } => {
                write!(f, "closure(")?;
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{param}")?;
                }
                write!(f, ") -> {ret}")
            }
            AstTypeKind::Placeholder => write!(f, "_"),
        }
    }
}
