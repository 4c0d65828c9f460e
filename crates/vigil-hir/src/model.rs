use vigil_core::{FileId, PackageName, TextRange};

use crate::arena::{Arena, DeclId};
use crate::decl::{Decl, MethodDecl, SourceFile, TypeDecl, VarDecl};

/// Immutable snapshot of the resolved program.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Model {
    pub(crate) files: Vec<SourceFile>,
    pub(crate) decls: Arena<Decl>,
}

impl Model {
    #[must_use]
    pub fn decl(&self, id: DeclId) -> Option<&Decl> {
        self.decls.get(id.idx())
    }

    #[must_use]
    pub fn method(&self, id: DeclId) -> Option<&MethodDecl> {
        match self.decl(id)? {
            Decl::Method(method) => Some(method),
            _ => None,
        }
    }

    #[must_use]
    pub fn var(&self, id: DeclId) -> Option<&VarDecl> {
        match self.decl(id)? {
            Decl::Var(var) => Some(var),
            _ => None,
        }
    }

    #[must_use]
    pub fn type_decl(&self, id: DeclId) -> Option<&TypeDecl> {
        match self.decl(id)? {
            Decl::Type(ty) => Some(ty),
            _ => None,
        }
    }

    #[must_use]
    pub fn file(&self, id: FileId) -> Option<&SourceFile> {
        self.files.get(id.to_raw() as usize)
    }

    pub fn methods(&self) -> impl Iterator<Item = (DeclId, &MethodDecl)> {
        self.decls.iter().filter_map(|(raw, decl)| match decl {
            Decl::Method(method) => Some((DeclId::from_raw(raw), method)),
            _ => None,
        })
    }

    /// The file a method is declared in (through its owning type).
    #[must_use]
    pub fn file_of_method(&self, method: DeclId) -> Option<FileId> {
        let owner = self.method(method)?.owner;
        Some(self.type_decl(owner)?.file)
    }

    /// The package of the compilation unit declaring `method`.
    ///
    /// Returns `None` if the method is unknown or its package could not be resolved.
    #[must_use]
    pub fn package_of_method(&self, method: DeclId) -> Option<&PackageName> {
        let file = self.file_of_method(method)?;
        self.file(file)?.package.as_ref()
    }

    /// Whether `range` in `file` lies lexically inside the declaration of type `ty`.
    #[must_use]
    pub fn type_contains(&self, ty: DeclId, file: FileId, range: TextRange) -> bool {
        match self.type_decl(ty) {
            Some(decl) => decl.file == file && decl.range.contains_range(range),
            None => false,
        }
    }
}
