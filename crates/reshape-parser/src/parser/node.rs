//! Node model: `NodeId`, `Node`, and the closed `NodeKind` sum type.

use reshape_common::{Atom, Span};

/// Index of a node in its [`NodeArena`](super::NodeArena).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel for "no node" (absent initializer, elided array element,
    /// missing else branch, and so on).
    pub const NONE: NodeId = NodeId(u32::MAX);

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    #[inline]
    pub const fn is_some(self) -> bool {
        self.0 != u32::MAX
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Minus,
    Plus,
    Not,
    BitNot,
    Typeof,
    Void,
    Delete,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UpdateOp {
    Increment,
    Decrement,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Exp,
    Eq,
    NotEq,
    StrictEq,
    StrictNotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Shl,
    Shr,
    UShr,
    BitAnd,
    BitOr,
    BitXor,
    LogicalAnd,
    LogicalOr,
    Coalesce,
    In,
    Instanceof,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AssignOp {
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    ModAssign,
    ExpAssign,
    ShlAssign,
    ShrAssign,
    UShrAssign,
    BitAndAssign,
    BitOrAssign,
    BitXorAssign,
    AndAssign,
    OrAssign,
    CoalesceAssign,
}

impl AssignOp {
    /// Plain `=`, as opposed to the compound read-modify-write forms.
    #[inline]
    pub const fn is_plain(self) -> bool {
        matches!(self, AssignOp::Assign)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum VarFlavor {
    Var,
    Let,
    Const,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    Declaration,
    Expression,
    Arrow,
}

/// The closed set of node shapes.
///
/// Child fields hold `NodeId`s into the owning arena; `NodeId::NONE` marks
/// an absent child. Lists own their element ids in source order.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    // =========================================================================
    // Expressions
    // =========================================================================
    Ident {
        name: Atom,
    },
    NumberLit {
        value: f64,
    },
    StringLit {
        value: Atom,
    },
    BoolLit {
        value: bool,
    },
    NullLit,
    ThisExpr,
    /// `quasis` has exactly one more entry than `exprs` (the cooked text
    /// chunks around each substitution).
    TemplateLit {
        quasis: Vec<Atom>,
        exprs: Vec<NodeId>,
    },
    /// Elided elements (`[a, , b]`) are `NodeId::NONE`.
    ArrayLit {
        elements: Vec<NodeId>,
    },
    ObjectLit {
        properties: Vec<NodeId>,
    },
    /// Object literal / object pattern member. In pattern position `value`
    /// is a binding pattern (possibly an `AssignPattern`).
    Property {
        key: NodeId,
        value: NodeId,
        computed: bool,
        shorthand: bool,
    },
    Member {
        object: NodeId,
        property: NodeId,
        computed: bool,
    },
    Call {
        callee: NodeId,
        args: Vec<NodeId>,
    },
    New {
        callee: NodeId,
        args: Vec<NodeId>,
    },
    Unary {
        op: UnaryOp,
        operand: NodeId,
    },
    Update {
        op: UpdateOp,
        prefix: bool,
        target: NodeId,
    },
    Binary {
        op: BinaryOp,
        left: NodeId,
        right: NodeId,
    },
    Assign {
        op: AssignOp,
        target: NodeId,
        value: NodeId,
    },
    Cond {
        test: NodeId,
        cons: NodeId,
        alt: NodeId,
    },
    Spread {
        argument: NodeId,
    },
    /// Function declaration, function expression, or arrow function.
    /// `name` is `NONE` for anonymous forms; an arrow body may be a
    /// `Block` or a bare expression.
    Function {
        kind: FunctionKind,
        name: NodeId,
        params: Vec<NodeId>,
        body: NodeId,
    },

    // =========================================================================
    // Patterns
    // =========================================================================
    /// Elided elements are `NodeId::NONE`.
    ArrayPattern {
        elements: Vec<NodeId>,
    },
    ObjectPattern {
        properties: Vec<NodeId>,
    },
    RestElement {
        argument: NodeId,
    },
    /// `target = default` inside a pattern or parameter list.
    AssignPattern {
        target: NodeId,
        default: NodeId,
    },

    // =========================================================================
    // Statements and declarations
    // =========================================================================
    VarDecl {
        flavor: VarFlavor,
        declarators: Vec<NodeId>,
    },
    Declarator {
        pattern: NodeId,
        init: NodeId,
    },
    Block {
        statements: Vec<NodeId>,
    },
    If {
        test: NodeId,
        cons: NodeId,
        alt: NodeId,
    },
    For {
        init: NodeId,
        test: NodeId,
        update: NodeId,
        body: NodeId,
    },
    ForIn {
        left: NodeId,
        right: NodeId,
        body: NodeId,
    },
    ForOf {
        left: NodeId,
        right: NodeId,
        body: NodeId,
    },
    While {
        test: NodeId,
        body: NodeId,
    },
    DoWhile {
        body: NodeId,
        test: NodeId,
    },
    Return {
        argument: NodeId,
    },
    Break,
    Continue,
    ExprStmt {
        expr: NodeId,
    },
    EmptyStmt,
    SourceFile {
        statements: Vec<NodeId>,
    },
}

/// One syntax tree node: its shape plus the source span it covers.
#[derive(Clone, Debug)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
}

impl Node {
    pub fn new(kind: NodeKind, span: Span) -> Node {
        Node { kind, span }
    }

    /// Function-like nodes establish a new binding surface for the shadow
    /// rules (declarations, parameters, hoisting).
    #[inline]
    pub const fn is_function_like(&self) -> bool {
        matches!(self.kind, NodeKind::Function { .. })
    }

    #[inline]
    pub const fn is_pattern(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::ArrayPattern { .. }
                | NodeKind::ObjectPattern { .. }
                | NodeKind::RestElement { .. }
                | NodeKind::AssignPattern { .. }
        )
    }
}

/// Invoke `f` for every present (non-`NONE`) direct child of `kind`, in
/// source order. The match is exhaustive on purpose: a new node kind will
/// not compile until its children are enumerated here.
pub fn for_each_child(kind: &NodeKind, mut f: impl FnMut(NodeId)) {
    let mut one = |id: NodeId| {
        if id.is_some() {
            f(id);
        }
    };
    match kind {
        NodeKind::Ident { .. }
        | NodeKind::NumberLit { .. }
        | NodeKind::StringLit { .. }
        | NodeKind::BoolLit { .. }
        | NodeKind::NullLit
        | NodeKind::ThisExpr
        | NodeKind::Break
        | NodeKind::Continue
        | NodeKind::EmptyStmt => {}
        NodeKind::TemplateLit { exprs, .. } => exprs.iter().for_each(|&e| one(e)),
        NodeKind::ArrayLit { elements } | NodeKind::ArrayPattern { elements } => {
            elements.iter().for_each(|&e| one(e));
        }
        NodeKind::ObjectLit { properties } | NodeKind::ObjectPattern { properties } => {
            properties.iter().for_each(|&p| one(p));
        }
        NodeKind::Property { key, value, .. } => {
            one(*key);
            one(*value);
        }
        NodeKind::Member {
            object, property, ..
        } => {
            one(*object);
            one(*property);
        }
        NodeKind::Call { callee, args } | NodeKind::New { callee, args } => {
            one(*callee);
            args.iter().for_each(|&a| one(a));
        }
        NodeKind::Unary { operand, .. } => one(*operand),
        NodeKind::Update { target, .. } => one(*target),
        NodeKind::Binary { left, right, .. } => {
            one(*left);
            one(*right);
        }
        NodeKind::Assign { target, value, .. } => {
            one(*target);
            one(*value);
        }
        NodeKind::Cond { test, cons, alt } | NodeKind::If { test, cons, alt } => {
            one(*test);
            one(*cons);
            one(*alt);
        }
        NodeKind::Spread { argument } | NodeKind::RestElement { argument } => one(*argument),
        NodeKind::Function {
            name, params, body, ..
        } => {
            one(*name);
            params.iter().for_each(|&p| one(p));
            one(*body);
        }
        NodeKind::AssignPattern { target, default } => {
            one(*target);
            one(*default);
        }
        NodeKind::VarDecl { declarators, .. } => declarators.iter().for_each(|&d| one(d)),
        NodeKind::Declarator { pattern, init } => {
            one(*pattern);
            one(*init);
        }
        NodeKind::Block { statements } | NodeKind::SourceFile { statements } => {
            statements.iter().for_each(|&s| one(s));
        }
        NodeKind::For {
            init,
            test,
            update,
            body,
        } => {
            one(*init);
            one(*test);
            one(*update);
            one(*body);
        }
        NodeKind::ForIn { left, right, body } | NodeKind::ForOf { left, right, body } => {
            one(*left);
            one(*right);
            one(*body);
        }
        NodeKind::While { test, body } => {
            one(*test);
            one(*body);
        }
        NodeKind::DoWhile { body, test } => {
            one(*body);
            one(*test);
        }
        NodeKind::Return { argument } => one(*argument),
        NodeKind::ExprStmt { expr } => one(*expr),
    }
}
