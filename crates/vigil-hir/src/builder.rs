//! Incremental construction of a [`Model`].
//!
//! Hosts lower their own syntax trees through these builders; tests use them to describe
//! small programs directly.

use std::collections::BTreeSet;

use vigil_core::{FileId, Name, PackageName, TextRange};

use crate::arena::{Arena, DeclId, NodeId};
use crate::body::{AssignOp, BinaryOp, Body, Literal, Node, NodeKind, Payload, Reference, UnaryOp};
use crate::decl::{
    Annotation, Decl, FieldDecl, MethodDecl, Modifier, SourceFile, TypeDecl, TypeKind, TypeRef,
    VarDecl, VarKind, Visibility,
};
use crate::model::Model;

#[derive(Debug, Default)]
pub struct ModelBuilder {
    files: Vec<SourceFile>,
    decls: Arena<Decl>,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a compilation unit. `package` is `None` when the package statement did not
    /// resolve; use `Some("")` for the default package.
    pub fn add_file(&mut self, path: impl Into<String>, package: Option<&str>) -> FileId {
        let id = FileId::from_raw(self.files.len() as u32);
        self.files.push(SourceFile {
            path: path.into(),
            package: package.map(PackageName::new),
        });
        id
    }

    pub fn add_type(&mut self, file: FileId, name: &str, kind: TypeKind) -> TypeBuilder<'_> {
        TypeBuilder {
            builder: self,
            decl: TypeDecl {
                name: Name::new(name),
                kind,
                file,
                range: TextRange::default(),
                enclosing: None,
            },
        }
    }

    pub fn add_field(&mut self, owner: DeclId, name: &str, ty: impl Into<TypeRef>) -> DeclId {
        self.alloc(Decl::Field(FieldDecl {
            name: Name::new(name),
            ty: ty.into(),
            owner,
        }))
    }

    /// Starts a method declaration. The method's id is reserved immediately so bodies can
    /// refer to the method itself.
    pub fn add_method(&mut self, owner: DeclId, name: &str) -> MethodBuilder<'_> {
        let decl = MethodDecl {
            name: Name::new(name),
            name_range: Some(TextRange::default()),
            range: TextRange::default(),
            owner,
            params: Vec::new(),
            return_type: TypeRef::void(),
            visibility: Visibility::PackagePrivate,
            modifiers: BTreeSet::new(),
            annotations: Vec::new(),
            throws: Vec::new(),
            is_varargs: false,
            is_constructor: false,
            body: None,
            super_methods: Vec::new(),
        };
        let id = self.alloc(Decl::Method(decl.clone()));
        MethodBuilder {
            builder: self,
            id,
            decl,
        }
    }

    pub fn build(self) -> Model {
        Model {
            files: self.files,
            decls: self.decls,
        }
    }

    fn alloc(&mut self, decl: Decl) -> DeclId {
        DeclId::from_raw(self.decls.alloc(decl))
    }
}

pub struct TypeBuilder<'a> {
    builder: &'a mut ModelBuilder,
    decl: TypeDecl,
}

impl TypeBuilder<'_> {
    pub fn range(mut self, range: TextRange) -> Self {
        self.decl.range = range;
        self
    }

    pub fn nested_in(mut self, outer: DeclId) -> Self {
        self.decl.enclosing = Some(outer);
        self
    }

    pub fn finish(self) -> DeclId {
        self.builder.alloc(Decl::Type(self.decl))
    }
}

pub struct MethodBuilder<'a> {
    builder: &'a mut ModelBuilder,
    id: DeclId,
    decl: MethodDecl,
}

impl MethodBuilder<'_> {
    pub fn id(&self) -> DeclId {
        self.id
    }

    pub fn param(mut self, name: &str, ty: impl Into<TypeRef>) -> Self {
        let id = self.builder.alloc(Decl::Var(VarDecl {
            name: Name::new(name),
            ty: ty.into(),
            kind: VarKind::Parameter,
            is_final: false,
        }));
        self.decl.params.push(id);
        self
    }

    pub fn varargs(mut self) -> Self {
        self.decl.is_varargs = true;
        self
    }

    pub fn returns(mut self, ty: impl Into<TypeRef>) -> Self {
        self.decl.return_type = ty.into();
        self
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.decl.visibility = visibility;
        self
    }

    pub fn modifier(mut self, modifier: Modifier) -> Self {
        self.decl.modifiers.insert(modifier);
        self
    }

    pub fn annotation(mut self, annotation: Annotation) -> Self {
        self.decl.annotations.push(annotation);
        self
    }

    pub fn throws(mut self, ty: impl Into<TypeRef>) -> Self {
        self.decl.throws.push(ty.into());
        self
    }

    pub fn constructor(mut self) -> Self {
        self.decl.is_constructor = true;
        self
    }

    pub fn range(mut self, range: TextRange) -> Self {
        self.decl.range = range;
        self
    }

    pub fn name_range(mut self, range: Option<TextRange>) -> Self {
        self.decl.name_range = range;
        self
    }

    pub fn overrides(mut self, super_method: DeclId) -> Self {
        self.decl.super_methods.push(super_method);
        self
    }

    /// Builds the method body. The closure returns the statements of the outer block.
    pub fn body(mut self, build: impl FnOnce(&mut BodyBuilder<'_>) -> Vec<NodeId>) -> Self {
        let mut body = BodyBuilder {
            decls: &mut self.builder.decls,
            nodes: Arena::default(),
            method: self.id,
            params: self.decl.params.clone(),
        };
        let statements = build(&mut body);
        let root = body.block(statements);
        self.decl.body = Some(Body::new(root, body.nodes));
        self
    }

    pub fn finish(self) -> DeclId {
        if let Some(slot) = self.builder.decls.get_mut(self.id.idx()) {
            *slot = Decl::Method(self.decl);
        }
        self.id
    }
}

/// Creates nodes of one method body. Every constructor returns the id of the new node.
pub struct BodyBuilder<'a> {
    decls: &'a mut Arena<Decl>,
    nodes: Arena<Node>,
    method: DeclId,
    params: Vec<DeclId>,
}

impl BodyBuilder<'_> {
    /// The method whose body is being built.
    pub fn method(&self) -> DeclId {
        self.method
    }

    pub fn params(&self) -> &[DeclId] {
        &self.params
    }

    pub fn node(&mut self, kind: NodeKind, payload: Payload, children: Vec<NodeId>) -> NodeId {
        NodeId::from_raw(self.nodes.alloc(Node {
            kind,
            payload,
            children,
            range: TextRange::default(),
        }))
    }

    fn composite(&mut self, kind: NodeKind, children: Vec<NodeId>) -> NodeId {
        self.node(kind, Payload::None, children)
    }

    // === statements ===

    pub fn block(&mut self, statements: Vec<NodeId>) -> NodeId {
        self.composite(NodeKind::Block, statements)
    }

    pub fn expr_stmt(&mut self, expr: NodeId) -> NodeId {
        self.composite(NodeKind::ExprStmt, vec![expr])
    }

    pub fn ret(&mut self, value: Option<NodeId>) -> NodeId {
        self.composite(NodeKind::Return, value.into_iter().collect())
    }

    pub fn if_stmt(&mut self, cond: NodeId, then: NodeId, otherwise: Option<NodeId>) -> NodeId {
        let mut children = vec![cond, then];
        children.extend(otherwise);
        self.composite(NodeKind::If, children)
    }

    pub fn while_stmt(&mut self, cond: NodeId, body: NodeId) -> NodeId {
        self.composite(NodeKind::While, vec![cond, body])
    }

    pub fn for_stmt(
        &mut self,
        init: Vec<NodeId>,
        cond: Option<NodeId>,
        update: Vec<NodeId>,
        body: NodeId,
    ) -> NodeId {
        let init = self.composite(NodeKind::ForInit, init);
        let cond = match cond {
            Some(cond) => cond,
            None => self.empty(),
        };
        let update = self.composite(NodeKind::ForUpdate, update);
        self.composite(NodeKind::For, vec![init, cond, update, body])
    }

    pub fn for_each(&mut self, var: NodeId, iterable: NodeId, body: NodeId) -> NodeId {
        self.composite(NodeKind::ForEach, vec![var, iterable, body])
    }

    pub fn try_stmt(
        &mut self,
        resources: Vec<NodeId>,
        block: NodeId,
        catches: Vec<NodeId>,
        finally: Option<NodeId>,
    ) -> NodeId {
        let resources = self.composite(NodeKind::ResourceList, resources);
        let mut children = vec![resources, block];
        children.extend(catches);
        if let Some(finally) = finally {
            let finally = self.composite(NodeKind::Finally, vec![finally]);
            children.push(finally);
        }
        self.composite(NodeKind::Try, children)
    }

    pub fn catch(&mut self, param: NodeId, block: NodeId) -> NodeId {
        self.composite(NodeKind::Catch, vec![param, block])
    }

    pub fn throw(&mut self, expr: NodeId) -> NodeId {
        self.composite(NodeKind::Throw, vec![expr])
    }

    pub fn empty(&mut self) -> NodeId {
        self.composite(NodeKind::Empty, Vec::new())
    }

    /// Declares a local-like variable and returns the declaration node plus its id.
    pub fn declare(
        &mut self,
        name: &str,
        ty: impl Into<TypeRef>,
        kind: VarKind,
        init: Option<NodeId>,
    ) -> (NodeId, DeclId) {
        let decl = DeclId::from_raw(self.decls.alloc(Decl::Var(VarDecl {
            name: Name::new(name),
            ty: ty.into(),
            kind,
            is_final: false,
        })));
        let node = self.node(
            NodeKind::VarDecl,
            Payload::Declares(decl),
            init.into_iter().collect(),
        );
        (node, decl)
    }

    // === expressions ===

    pub fn literal(&mut self, literal: Literal) -> NodeId {
        self.node(NodeKind::Literal, Payload::Literal(literal), Vec::new())
    }

    pub fn int(&mut self, value: i64) -> NodeId {
        self.literal(Literal::Int(value))
    }

    pub fn string(&mut self, value: &str) -> NodeId {
        self.literal(Literal::String(Name::new(value)))
    }

    pub fn name_ref(&mut self, decl: DeclId) -> NodeId {
        let reference = Reference {
            name: self.decl_name(decl),
            target: Some(decl),
        };
        self.node(NodeKind::NameRef, Payload::Ref(reference), Vec::new())
    }

    /// A name the resolver could not bind.
    pub fn unresolved(&mut self, name: &str) -> NodeId {
        let reference = Reference {
            name: Name::new(name),
            target: None,
        };
        self.node(NodeKind::NameRef, Payload::Ref(reference), Vec::new())
    }

    pub fn this(&mut self) -> NodeId {
        self.composite(NodeKind::This, Vec::new())
    }

    pub fn super_ref(&mut self) -> NodeId {
        self.composite(NodeKind::Super, Vec::new())
    }

    pub fn paren(&mut self, expr: NodeId) -> NodeId {
        self.composite(NodeKind::Paren, vec![expr])
    }

    pub fn binary(&mut self, op: BinaryOp, lhs: NodeId, rhs: NodeId) -> NodeId {
        self.composite(NodeKind::Binary(op), vec![lhs, rhs])
    }

    pub fn unary(&mut self, op: UnaryOp, operand: NodeId) -> NodeId {
        self.composite(NodeKind::Unary(op), vec![operand])
    }

    pub fn assign(&mut self, op: AssignOp, target: NodeId, value: NodeId) -> NodeId {
        self.composite(NodeKind::Assign(op), vec![target, value])
    }

    pub fn conditional(&mut self, cond: NodeId, then: NodeId, otherwise: NodeId) -> NodeId {
        self.composite(NodeKind::Conditional, vec![cond, then, otherwise])
    }

    pub fn cast(&mut self, ty: impl Into<TypeRef>, expr: NodeId) -> NodeId {
        let ty = self.type_node(ty);
        self.composite(NodeKind::Cast, vec![ty, expr])
    }

    pub fn type_node(&mut self, ty: impl Into<TypeRef>) -> NodeId {
        self.node(NodeKind::TypeNode, Payload::Type(ty.into()), Vec::new())
    }

    pub fn field(&mut self, receiver: Option<NodeId>, field: DeclId) -> NodeId {
        let receiver = match receiver {
            Some(receiver) => receiver,
            None => self.composite(NodeKind::ImplicitReceiver, Vec::new()),
        };
        let reference = Reference {
            name: self.decl_name(field),
            target: Some(field),
        };
        self.node(NodeKind::FieldAccess, Payload::Ref(reference), vec![receiver])
    }

    /// A call to a resolved method. `receiver == None` is an unqualified call.
    pub fn call(&mut self, receiver: Option<NodeId>, method: DeclId, args: Vec<NodeId>) -> NodeId {
        let reference = Reference {
            name: self.decl_name(method),
            target: Some(method),
        };
        self.call_with(receiver, reference, args)
    }

    /// `super.method(args)`.
    pub fn super_call(&mut self, method: DeclId, args: Vec<NodeId>) -> NodeId {
        let receiver = self.super_ref();
        self.call(Some(receiver), method, args)
    }

    pub fn unresolved_call(
        &mut self,
        receiver: Option<NodeId>,
        name: &str,
        args: Vec<NodeId>,
    ) -> NodeId {
        let reference = Reference {
            name: Name::new(name),
            target: None,
        };
        self.call_with(receiver, reference, args)
    }

    fn call_with(
        &mut self,
        receiver: Option<NodeId>,
        reference: Reference,
        args: Vec<NodeId>,
    ) -> NodeId {
        let receiver = match receiver {
            Some(receiver) => receiver,
            None => self.composite(NodeKind::ImplicitReceiver, Vec::new()),
        };
        let mut children = vec![receiver];
        children.extend(args);
        self.node(NodeKind::MethodCall, Payload::Ref(reference), children)
    }

    pub fn new_object(&mut self, ty: impl Into<TypeRef>, args: Vec<NodeId>) -> NodeId {
        self.node(NodeKind::New, Payload::Type(ty.into()), args)
    }

    pub fn lambda(&mut self, params: Vec<NodeId>, body: NodeId) -> NodeId {
        let mut children = params;
        children.push(body);
        self.composite(NodeKind::Lambda, children)
    }

    pub fn array_access(&mut self, array: NodeId, index: NodeId) -> NodeId {
        self.composite(NodeKind::ArrayAccess, vec![array, index])
    }

    /// A construct that could not be lowered.
    pub fn error(&mut self) -> NodeId {
        self.composite(NodeKind::Error, Vec::new())
    }

    fn decl_name(&self, decl: DeclId) -> Name {
        self.decls
            .get(decl.idx())
            .map(|decl| decl.name().clone())
            .unwrap_or_default()
    }
}
