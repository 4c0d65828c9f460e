use vigil_core::{Name, TextRange};

use crate::arena::{Arena, DeclId, NodeId};
use crate::decl::TypeRef;

/// Statement/expression tree of one method body.
///
/// Nodes are stored in an arena; the root is always a [`NodeKind::Block`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Body {
    root: NodeId,
    nodes: Arena<Node>,
}

impl Body {
    pub(crate) fn new(root: NodeId, nodes: Arena<Node>) -> Self {
        Body { root, nodes }
    }

    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.idx())
    }

    /// Top-level statements of the body block.
    #[must_use]
    pub fn statements(&self) -> &[NodeId] {
        self.node(self.root)
            .map(|root| root.children.as_slice())
            .unwrap_or(&[])
    }

    /// Skips any number of redundant parentheses around `id`.
    #[must_use]
    pub fn strip_parens(&self, mut id: NodeId) -> NodeId {
        while let Some(node) = self.node(id) {
            match (node.kind, node.children.as_slice()) {
                (NodeKind::Paren, [inner]) => id = *inner,
                _ => break,
            }
        }
        id
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// A tagged syntax node: kind, ordered children and an optional leaf payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub payload: Payload,
    pub children: Vec<NodeId>,
    pub range: TextRange,
}

impl Node {
    #[must_use]
    pub fn reference(&self) -> Option<&Reference> {
        match &self.payload {
            Payload::Ref(reference) => Some(reference),
            _ => None,
        }
    }

    #[must_use]
    pub fn resolved(&self) -> Option<DeclId> {
        self.reference().and_then(|reference| reference.target)
    }

    /// The declaration this node introduces, if it is a declaration site.
    #[must_use]
    pub fn declared(&self) -> Option<DeclId> {
        match self.payload {
            Payload::Declares(decl) => Some(decl),
            _ => None,
        }
    }
}

/// Node kinds.
///
/// Child layout per kind (positions are significant for comparison):
///
/// - `Block`: statements
/// - `ExprStmt`: `[expr]`
/// - `Return`: `[]` or `[value]`
/// - `If`: `[cond, then]` or `[cond, then, else]`
/// - `While` / `DoWhile`: `[cond, body]` / `[body, cond]`
/// - `For`: `[ForInit, cond or Empty, ForUpdate, body]`
/// - `ForEach`: `[VarDecl, iterable, body]`
/// - `Try`: `[ResourceList, Block, Catch*, Finally?]`
/// - `Catch`: `[VarDecl, Block]`
/// - `VarDecl`: `[]` or `[initializer]`, payload `Declares`
/// - `MethodCall`: `[receiver, args...]` where receiver is `This`, `Super`,
///   `ImplicitReceiver` or an expression; payload `Ref`
/// - `Lambda`: `[VarDecl*, body]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Block,
    ExprStmt,
    Return,
    If,
    While,
    DoWhile,
    For,
    ForInit,
    ForUpdate,
    ForEach,
    Try,
    ResourceList,
    Catch,
    Finally,
    Throw,
    Break,
    Continue,
    Labeled,
    Switch,
    SwitchCase,
    Synchronized,
    Yield,
    Assert,
    Empty,
    VarDecl,

    Literal,
    NameRef,
    FieldAccess,
    MethodCall,
    MethodRef,
    New,
    NewArray,
    ArrayInit,
    ArrayAccess,
    Assign(AssignOp),
    Binary(BinaryOp),
    Unary(UnaryOp),
    Conditional,
    Cast,
    InstanceOf,
    Lambda,
    Paren,
    This,
    Super,
    ImplicitReceiver,
    ClassLiteral,
    TypeNode,

    /// A construct the host could not lower. Never equal to anything.
    Error,
}

impl NodeKind {
    /// Kinds whose node introduces a new local-like declaration.
    #[must_use]
    pub fn is_declaration_site(self) -> bool {
        matches!(self, NodeKind::VarDecl)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    None,
    Literal(Literal),
    Ref(Reference),
    Declares(DeclId),
    Type(TypeRef),
    Label(Name),
}

/// A name occurrence and the declaration it resolved to, if resolution succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub name: Name,
    pub target: Option<DeclId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Int(i64),
    Long(i64),
    /// Floating point literals keep their source text so equality stays exact.
    Float(Name),
    Double(Name),
    Char(char),
    String(Name),
    Bool(bool),
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Shl,
    Shr,
    UShr,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
    BitAnd,
    BitOr,
    BitXor,
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Plus,
    Neg,
    Not,
    BitNot,
    PreInc,
    PreDec,
    PostInc,
    PostDec,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignOp {
    Assign,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    UShr,
}
