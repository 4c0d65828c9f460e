//! Resolved program snapshot consumed by vigil inspections.
//!
//! The parse/resolution engine of the host lowers Java sources into a [`Model`]: an arena of
//! declarations (types, methods, variables, fields) plus, for every method with a body, a
//! [`Body`] of tagged syntax [`Node`]s whose leaves link to resolved declarations.
//!
//! The model is an immutable snapshot. Inspections only ever read it, so it can be shared
//! freely across worker threads.

mod arena;
mod body;
mod builder;
mod decl;
mod model;

pub use arena::{Arena, DeclId, NodeId};
pub use body::{
    AssignOp, BinaryOp, Body, Literal, Node, NodeKind, Payload, Reference, UnaryOp,
};
pub use builder::{BodyBuilder, MethodBuilder, ModelBuilder, TypeBuilder};
pub use decl::{
    Annotation, Decl, FieldDecl, MethodDecl, Modifier, SourceFile, TypeDecl, TypeKind, TypeRef,
    VarDecl, VarKind, Visibility,
};
pub use model::Model;
