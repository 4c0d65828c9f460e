use std::collections::BTreeSet;
use std::fmt;

use vigil_core::{FileId, Name, PackageName, TextRange};

use crate::arena::DeclId;
use crate::body::Body;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decl {
    Type(TypeDecl),
    Method(MethodDecl),
    Var(VarDecl),
    Field(FieldDecl),
}

impl Decl {
    #[must_use]
    pub fn name(&self) -> &Name {
        match self {
            Decl::Type(decl) => &decl.name,
            Decl::Method(decl) => &decl.name,
            Decl::Var(decl) => &decl.name,
            Decl::Field(decl) => &decl.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: String,
    /// `None` when the package statement could not be resolved.
    pub package: Option<PackageName>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    Record,
    Annotation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    pub name: Name,
    pub kind: TypeKind,
    pub file: FileId,
    /// Full declaration range, used for lexical containment checks.
    pub range: TextRange,
    pub enclosing: Option<DeclId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDecl {
    pub name: Name,
    /// Range of the name identifier; `None` for synthesized declarations.
    pub name_range: Option<TextRange>,
    pub range: TextRange,
    pub owner: DeclId,
    pub params: Vec<DeclId>,
    pub return_type: TypeRef,
    pub visibility: Visibility,
    pub modifiers: BTreeSet<Modifier>,
    pub annotations: Vec<Annotation>,
    pub throws: Vec<TypeRef>,
    pub is_varargs: bool,
    pub is_constructor: bool,
    /// `None` for abstract and native methods.
    pub body: Option<Body>,
    /// Resolved direct override targets, in resolution order.
    pub super_methods: Vec<DeclId>,
}

impl MethodDecl {
    #[must_use]
    pub fn has_modifier(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarDecl {
    pub name: Name,
    pub ty: TypeRef,
    pub kind: VarKind,
    pub is_final: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarKind {
    Parameter,
    Local,
    LoopVariable,
    CatchParameter,
    Resource,
    LambdaParameter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    pub name: Name,
    pub ty: TypeRef,
    pub owner: DeclId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Visibility {
    Private,
    PackagePrivate,
    Protected,
    Public,
}

/// Non-visibility method modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Modifier {
    Static,
    Final,
    Abstract,
    Synchronized,
    Native,
    Strictfp,
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Annotation {
    /// Name as written or resolved (`Override` or `java.lang.Override`).
    pub name: Name,
    /// Normalized argument text, empty for marker annotations.
    pub args: Name,
}

impl Annotation {
    pub fn marker(name: impl Into<Name>) -> Self {
        Annotation {
            name: name.into(),
            args: Name::default(),
        }
    }

    /// `@Override`, written either simple or fully qualified.
    #[must_use]
    pub fn is_override(&self) -> bool {
        matches!(self.name.as_str(), "Override" | "java.lang.Override")
    }
}

/// A resolved type, in canonical source form (`int`, `java.util.List<String>`, `int[]`).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeRef(Name);

impl TypeRef {
    pub fn new(text: impl Into<Name>) -> Self {
        TypeRef(text.into())
    }

    pub fn void() -> Self {
        TypeRef(Name::new_inline("void"))
    }

    #[must_use]
    pub fn is_void(&self) -> bool {
        self.0 == "void"
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TypeRef {
    fn default() -> Self {
        TypeRef::void()
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeRef({})", self.0)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeRef {
    fn from(value: &str) -> Self {
        TypeRef::new(value)
    }
}
