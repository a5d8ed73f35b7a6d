//! Span-ignoring structural equality over the AST
//!
//! The grammar is validated by exact-tree-shape tests, so two parses must
//! be comparable for shape and decoded values while their source spans
//! differ. Derived `PartialEq` would drag spans into the comparison;
//! these impls walk the same structure and skip them.

use super::{
    AstType, AstTypeKind, Block, CatchClause, ClassDecl, CompFor, CompIf, CompNext, EntityDecl,
    EntityKind, Expr, ExprKind, FieldDecl, FunctionDecl, ImportDecl, ImportSymbol, InterfaceDecl,
    MatchClause, Module, ParamDecl, Pattern, PatternKind, SeqEntry, Stmt, StmtKind,
};

/// Deep shape-and-value comparison that ignores source spans.
pub trait TreeEq {
    fn tree_eq(&self, other: &Self) -> bool;
}

impl<T: TreeEq> TreeEq for Box<T> {
    fn tree_eq(&self, other: &Self) -> bool {
        (**self).tree_eq(other)
    }
}

impl<T: TreeEq> TreeEq for Option<T> {
    fn tree_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (None, None) => true,
            (Some(a), Some(b)) => a.tree_eq(b),
            _ => false,
        }
    }
}

impl<T: TreeEq> TreeEq for Vec<T> {
    fn tree_eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other).all(|(a, b)| a.tree_eq(b))
    }
}

impl TreeEq for Module {
    fn tree_eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.entities.tree_eq(&other.entities)
            && self.imports.tree_eq(&other.imports)
    }
}

impl TreeEq for EntityDecl {
    fn tree_eq(&self, other: &Self) -> bool {
        match (&self.kind, &other.kind) {
            (EntityKind::Function(a), EntityKind::Function(b)) => a.tree_eq(b),
            (EntityKind::Class(a), EntityKind::Class(b)) => a.tree_eq(b),
            (EntityKind::Interface(a), EntityKind::Interface(b)) => a.tree_eq(b),
            (EntityKind::Field(a), EntityKind::Field(b)) => a.tree_eq(b),
            _ => false,
        }
    }
}

impl TreeEq for FunctionDecl {
    fn tree_eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.type_params == other.type_params
            && self.params.tree_eq(&other.params)
            && self.return_type.tree_eq(&other.return_type)
            && self.body.tree_eq(&other.body)
            && self.modifiers == other.modifiers
    }
}

impl TreeEq for ParamDecl {
    fn tree_eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.ty.tree_eq(&other.ty)
            && self.default.tree_eq(&other.default)
            && self.variadic == other.variadic
    }
}

impl TreeEq for ClassDecl {
    fn tree_eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.type_params == other.type_params
            && self.interfaces.tree_eq(&other.interfaces)
            && self.members.tree_eq(&other.members)
            && self.modifiers == other.modifiers
    }
}

impl TreeEq for InterfaceDecl {
    fn tree_eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.type_params == other.type_params
            && self.members.tree_eq(&other.members)
            && self.modifiers == other.modifiers
    }
}

impl TreeEq for FieldDecl {
    fn tree_eq(&self, other: &Self) -> bool {
        self.decls.len() == other.decls.len()
            && self
                .decls
                .iter()
                .zip(&other.decls)
                .all(|((pa, ta), (pb, tb))| pa.tree_eq(pb) && ta.tree_eq(tb))
            && self.inits.tree_eq(&other.inits)
            && self.modifiers == other.modifiers
    }
}

impl TreeEq for ImportDecl {
    fn tree_eq(&self, other: &Self) -> bool {
        self.path == other.path
            && self.symbols.tree_eq(&other.symbols)
            && self.source == other.source
    }
}

impl TreeEq for ImportSymbol {
    fn tree_eq(&self, other: &Self) -> bool {
        self.name == other.name && self.alias == other.alias
    }
}

impl TreeEq for Block {
    fn tree_eq(&self, other: &Self) -> bool {
        self.stmts.tree_eq(&other.stmts)
    }
}

impl TreeEq for Stmt {
    fn tree_eq(&self, other: &Self) -> bool {
        match (&self.kind, &other.kind) {
            (StmtKind::Block(a), StmtKind::Block(b)) => a.tree_eq(b),
            (
                StmtKind::VarDecl {
                    patterns: pa,
                    inits: ia,
                    modifiers: ma,
                },
                StmtKind::VarDecl {
                    patterns: pb,
                    inits: ib,
                    modifiers: mb,
                },
            ) => pa.tree_eq(pb) && ia.tree_eq(ib) && ma == mb,
            (StmtKind::ExprStmt(a), StmtKind::ExprStmt(b)) => a.tree_eq(b),
            (
                StmtKind::If {
                    condition: ca,
                    then_block: ta,
                    else_branch: ea,
                },
                StmtKind::If {
                    condition: cb,
                    then_block: tb,
                    else_branch: eb,
                },
            ) => ca.tree_eq(cb) && ta.tree_eq(tb) && ea.tree_eq(eb),
            (
                StmtKind::While {
                    condition: ca,
                    body: ba,
                },
                StmtKind::While {
                    condition: cb,
                    body: bb,
                },
            ) => ca.tree_eq(cb) && ba.tree_eq(bb),
            (
                StmtKind::DoWhile {
                    condition: ca,
                    body: ba,
                },
                StmtKind::DoWhile {
                    condition: cb,
                    body: bb,
                },
            ) => ca.tree_eq(cb) && ba.tree_eq(bb),
            (
                StmtKind::For {
                    modifiers: ma,
                    pattern: pa,
                    source: sa,
                    body: ba,
                },
                StmtKind::For {
                    modifiers: mb,
                    pattern: pb,
                    source: sb,
                    body: bb,
                },
            ) => ma == mb && pa.tree_eq(pb) && sa.tree_eq(sb) && ba.tree_eq(bb),
            (
                StmtKind::Match {
                    subject: sa,
                    clauses: ca,
                },
                StmtKind::Match {
                    subject: sb,
                    clauses: cb,
                },
            ) => sa.tree_eq(sb) && ca.tree_eq(cb),
            (
                StmtKind::Try {
                    body: ba,
                    catches: ca,
                    finally: fa,
                },
                StmtKind::Try {
                    body: bb,
                    catches: cb,
                    finally: fb,
                },
            ) => ba.tree_eq(bb) && ca.tree_eq(cb) && fa.tree_eq(fb),
            (StmtKind::Throw(a), StmtKind::Throw(b)) => a.tree_eq(b),
            (StmtKind::Break { levels: a }, StmtKind::Break { levels: b }) => a == b,
            (StmtKind::Continue { levels: a }, StmtKind::Continue { levels: b }) => a == b,
            (StmtKind::Return(a), StmtKind::Return(b)) => a.tree_eq(b),
            _ => false,
        }
    }
}

impl TreeEq for MatchClause {
    fn tree_eq(&self, other: &Self) -> bool {
        self.patterns.tree_eq(&other.patterns)
            && self.guard.tree_eq(&other.guard)
            && self.body.tree_eq(&other.body)
    }
}

impl TreeEq for CatchClause {
    fn tree_eq(&self, other: &Self) -> bool {
        self.name == other.name && self.ty.tree_eq(&other.ty) && self.body.tree_eq(&other.body)
    }
}

impl TreeEq for Expr {
    fn tree_eq(&self, other: &Self) -> bool {
        match (&self.kind, &other.kind) {
            (ExprKind::Constant(a), ExprKind::Constant(b)) => a == b,
            (ExprKind::IdentifierPath(a), ExprKind::IdentifierPath(b)) => a == b,
            (
                ExprKind::Binary {
                    op: oa,
                    left: la,
                    right: ra,
                },
                ExprKind::Binary {
                    op: ob,
                    left: lb,
                    right: rb,
                },
            ) => oa == ob && la.tree_eq(lb) && ra.tree_eq(rb),
            (
                ExprKind::Unary {
                    op: oa,
                    operand: a,
                },
                ExprKind::Unary {
                    op: ob,
                    operand: b,
                },
            ) => oa == ob && a.tree_eq(b),
            (
                ExprKind::SingleAssignment {
                    target: ta,
                    value: va,
                },
                ExprKind::SingleAssignment {
                    target: tb,
                    value: vb,
                },
            ) => ta.tree_eq(tb) && va.tree_eq(vb),
            (
                ExprKind::MultipleAssignment {
                    target: ta,
                    assignment: aa,
                },
                ExprKind::MultipleAssignment {
                    target: tb,
                    assignment: ab,
                },
            ) => ta.tree_eq(tb) && aa.tree_eq(ab),
            (
                ExprKind::AugmentedAssignment {
                    op: oa,
                    targets: ta,
                    values: va,
                },
                ExprKind::AugmentedAssignment {
                    op: ob,
                    targets: tb,
                    values: vb,
                },
            ) => oa == ob && ta.tree_eq(tb) && va.tree_eq(vb),
            (
                ExprKind::Call {
                    callee: ca,
                    type_args: ga,
                    args: aa,
                },
                ExprKind::Call {
                    callee: cb,
                    type_args: gb,
                    args: ab,
                },
            ) => ca.tree_eq(cb) && ga.tree_eq(gb) && aa.tree_eq(ab),
            (
                ExprKind::Indexer {
                    target: ta,
                    index: ia,
                },
                ExprKind::Indexer {
                    target: tb,
                    index: ib,
                },
            ) => ta.tree_eq(tb) && ia.tree_eq(ib),
            (
                ExprKind::MemberReference {
                    target: ta,
                    member: ma,
                },
                ExprKind::MemberReference {
                    target: tb,
                    member: mb,
                },
            ) => ta.tree_eq(tb) && ma == mb,
            (
                ExprKind::ObjectCreation {
                    ty: ta,
                    fields: fa,
                    values: va,
                },
                ExprKind::ObjectCreation {
                    ty: tb,
                    fields: fb,
                    values: vb,
                },
            ) => ta.tree_eq(tb) && fa == fb && va.tree_eq(vb),
            (ExprKind::SequenceExpression(a), ExprKind::SequenceExpression(b)) => a.tree_eq(b),
            (
                ExprKind::SequenceInitializer {
                    ty: ta,
                    entries: ea,
                },
                ExprKind::SequenceInitializer {
                    ty: tb,
                    entries: eb,
                },
            ) => ta.tree_eq(tb) && ea.tree_eq(eb),
            (
                ExprKind::IntSeq {
                    start: sa,
                    end: ea,
                    step: pa,
                    inclusive: ia,
                },
                ExprKind::IntSeq {
                    start: sb,
                    end: eb,
                    step: pb,
                    inclusive: ib,
                },
            ) => sa.tree_eq(sb) && ea.tree_eq(eb) && pa.tree_eq(pb) && ia == ib,
            (ExprKind::Paren(a), ExprKind::Paren(b)) => a.tree_eq(b),
            (
                ExprKind::Closure {
                    return_type: ra,
                    body: ba,
                    params: pa,
                    captures: ca,
                },
                ExprKind::Closure {
                    return_type: rb,
                    body: bb,
                    params: pb,
                    captures: cb,
                },
            ) => ra.tree_eq(rb) && ba.tree_eq(bb) && pa.tree_eq(pb) && ca == cb,
            (
                ExprKind::Comprehension {
                    container: ca,
                    element: ea,
                    head: ha,
                },
                ExprKind::Comprehension {
                    container: cb,
                    element: eb,
                    head: hb,
                },
            ) => ca == cb && ea.tree_eq(eb) && ha.tree_eq(hb),
            (ExprKind::Cast { expr: ea, ty: ta }, ExprKind::Cast { expr: eb, ty: tb }) => {
                ea.tree_eq(eb) && ta.tree_eq(tb)
            }
            (ExprKind::SelfReference, ExprKind::SelfReference) => true,
            (ExprKind::NullReference, ExprKind::NullReference) => true,
            _ => false,
        }
    }
}

impl TreeEq for SeqEntry {
    fn tree_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (SeqEntry::Item(a), SeqEntry::Item(b)) => a.tree_eq(b),
            (
                SeqEntry::Pair { key: ka, value: va },
                SeqEntry::Pair { key: kb, value: vb },
            ) => ka.tree_eq(kb) && va.tree_eq(vb),
            _ => false,
        }
    }
}

impl TreeEq for CompFor {
    fn tree_eq(&self, other: &Self) -> bool {
        self.pattern.tree_eq(&other.pattern)
            && self.source.tree_eq(&other.source)
            && self.next.tree_eq(&other.next)
    }
}

impl TreeEq for CompIf {
    fn tree_eq(&self, other: &Self) -> bool {
        self.condition.tree_eq(&other.condition) && self.next.tree_eq(&other.next)
    }
}

impl TreeEq for CompNext {
    fn tree_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CompNext::For(a), CompNext::For(b)) => a.tree_eq(b),
            (CompNext::If(a), CompNext::If(b)) => a.tree_eq(b),
            _ => false,
        }
    }
}

impl TreeEq for Pattern {
    fn tree_eq(&self, other: &Self) -> bool {
        match (&self.kind, &other.kind) {
            (PatternKind::Expression(a), PatternKind::Expression(b)) => a.tree_eq(b),
            (
                PatternKind::Identifier {
                    name: na,
                    ty: ta,
                    sub: sa,
                },
                PatternKind::Identifier {
                    name: nb,
                    ty: tb,
                    sub: sb,
                },
            ) => na == nb && ta.tree_eq(tb) && sa.tree_eq(sb),
            (
                PatternKind::Destructuring { ty: ta, fields: fa },
                PatternKind::Destructuring { ty: tb, fields: fb },
            ) => ta.tree_eq(tb) && fa.tree_eq(fb),
            (PatternKind::Tuple(a), PatternKind::Tuple(b)) => a.tree_eq(b),
            (
                PatternKind::Collection {
                    vector: va,
                    items: ia,
                },
                PatternKind::Collection {
                    vector: vb,
                    items: ib,
                },
            ) => va == vb && ia.tree_eq(ib),
            (PatternKind::Wildcard, PatternKind::Wildcard) => true,
            (PatternKind::IgnoringRest, PatternKind::IgnoringRest) => true,
            _ => false,
        }
    }
}

impl TreeEq for AstType {
    fn tree_eq(&self, other: &Self) -> bool {
        match (&self.kind, &other.kind) {
            (AstTypeKind::Primitive(a), AstTypeKind::Primitive(b)) => a == b,
            (
                AstTypeKind::Generic { name: na, args: aa },
                AstTypeKind::Generic { name: nb, args: ab },
            ) => na == nb && aa.tree_eq(ab),
            (AstTypeKind::Parameter(a), AstTypeKind::Parameter(b)) => a == b,
            (
                AstTypeKind::Member {
                    owner: oa,
                    member: ma,
                },
                AstTypeKind::Member {
                    owner: ob,
                    member: mb,
                },
            ) => oa.tree_eq(ob) && ma.tree_eq(mb),
            (
                AstTypeKind::Function {
                    params: pa,
                    ret: ra,
                },
                AstTypeKind::Function {
                    params: pb,
                    ret: rb,
                },
            ) => pa.tree_eq(pb) && ra.tree_eq(rb),
            (AstTypeKind::Placeholder, AstTypeKind::Placeholder) => true,
            _ => false,
        }
    }
}
