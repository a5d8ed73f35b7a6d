//! Opal declaration AST nodes (module-level entities)

use super::{AstType, Block, Expr, Pattern};
use crate::common::Span;

bitflags::bitflags! {
    /// Combinable declaration modifiers. `let` sets IMMUTABLE, `var`
    /// leaves it clear; interface method signatures default to PUBLIC.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Modifiers: u8 {
        const PUBLIC = 1 << 0;
        const PRIVATE = 1 << 1;
        const IMMUTABLE = 1 << 2;
        const EXPORT = 1 << 3;
    }
}

/// A top-level or member entity declaration.
#[derive(Debug, Clone)]
pub struct EntityDecl {
    pub kind: EntityKind,
    pub span: Span,
}

impl EntityDecl {
    pub fn new(kind: EntityKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Entity declaration kinds
#[derive(Debug, Clone)]
pub enum EntityKind {
    /// fn area(r: double) -> double { .. }
    Function(FunctionDecl),
    /// class Circle: Shape { .. }
    Class(ClassDecl),
    /// interface Shape { fn area() -> double; }
    Interface(InterfaceDecl),
    /// let width: int = 0, height: int = 0;
    Field(FieldDecl),
}

/// Function declaration.
///
/// A missing body marks an interface signature; a Placeholder return type
/// marks an unwritten annotation.
#[derive(Debug, Clone)]
pub struct FunctionDecl {
    pub name: String,
    pub type_params: Vec<String>,
    pub params: Vec<ParamDecl>,
    pub return_type: AstType,
    pub body: Option<Block>,
    pub modifiers: Modifiers,
    pub span: Span,
}

/// Function parameter. The type is Placeholder when omitted; only the
/// last parameter of a declaration may set `variadic`.
#[derive(Debug, Clone)]
pub struct ParamDecl {
    pub name: String,
    pub ty: AstType,
    pub default: Option<Expr>,
    pub variadic: bool,
    pub span: Span,
}

/// Class declaration: implemented interfaces and members in source order.
#[derive(Debug, Clone)]
pub struct ClassDecl {
    pub name: String,
    pub type_params: Vec<String>,
    pub interfaces: Vec<AstType>,
    pub members: Vec<EntityDecl>,
    pub modifiers: Modifiers,
    pub span: Span,
}

/// Interface declaration: same shape as a class, but members carry no
/// bodies or initializers.
#[derive(Debug, Clone)]
pub struct InterfaceDecl {
    pub name: String,
    pub type_params: Vec<String>,
    pub members: Vec<EntityDecl>,
    pub modifiers: Modifiers,
    pub span: Span,
}

/// A field group sharing one modifier set.
///
/// The declarator pairs and the initializer list are always the same
/// length: an uninitialized slot holds an explicit null-literal sentinel,
/// never an absent entry.
#[derive(Debug, Clone)]
pub struct FieldDecl {
    pub decls: Vec<(Pattern, AstType)>,
    pub inits: Vec<Expr>,
    pub modifiers: Modifiers,
    pub span: Span,
}

/// An import declaration. Both surface forms share this shape:
///
/// - `import "geo/shapes" as Shapes;` — one symbol, the module alias
/// - `import "math"::{Sin, Cos as Cosine};` — one symbol per braced entry
///
/// `source` holds the explicit external file/library path when one is
/// named with `from`.
#[derive(Debug, Clone)]
pub struct ImportDecl {
    pub path: String,
    pub symbols: Vec<ImportSymbol>,
    pub source: Option<String>,
    pub span: Span,
}

/// One imported symbol with its optional alias.
#[derive(Debug, Clone)]
pub struct ImportSymbol {
    pub name: String,
    pub alias: Option<String>,
    pub span: Span,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifiers_combine_freely() {
        let m = Modifiers::PUBLIC | Modifiers::IMMUTABLE | Modifiers::EXPORT;
        assert!(m.contains(Modifiers::PUBLIC));
        assert!(m.contains(Modifiers::IMMUTABLE));
        assert!(!m.contains(Modifiers::PRIVATE));
    }

    #[test]
    fn test_modifiers_default_is_none() {
        assert!(Modifiers::default().is_empty());
    }
}
