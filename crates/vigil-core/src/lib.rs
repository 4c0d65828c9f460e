//! Core shared types for vigil.
//!
//! Text ranges, file identities, names, diagnostics and text edits. Declarations and syntax
//! live in `vigil-hir`.

mod diagnostic;
mod edit;
mod names;

pub use diagnostic::{Diagnostic, Severity};
pub use edit::{apply_text_edits, normalize_text_edits, EditError, TextEdit, WorkspaceEdit};
pub use names::{Name, PackageName};
pub use text_size::{TextRange, TextSize};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a source file inside one analysed snapshot.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FileId(u32);

impl FileId {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        FileId(raw)
    }

    #[inline]
    pub const fn to_raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FileId({})", self.0)
    }
}

/// Convenience constructor for byte ranges, mostly used by hosts lowering syntax into HIR.
#[inline]
pub fn text_range(start: u32, end: u32) -> TextRange {
    TextRange::new(TextSize::from(start), TextSize::from(end))
}
