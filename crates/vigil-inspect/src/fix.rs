use vigil_core::{FileId, Name, TextEdit, TextRange, TextSize, WorkspaceEdit};
use vigil_hir::{DeclId, Model};

use crate::TRACING_TARGET;

/// Deletes one method declaration, and nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteDeclarationFix {
    pub method: DeclId,
    pub file: FileId,
    /// Full declaration range at analysis time.
    pub range: TextRange,
    pub name: Name,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixOutcome {
    Applied(WorkspaceEdit),
    /// The declaration changed or disappeared since analysis.
    NothingToDo,
}

impl DeleteDeclarationFix {
    pub const TITLE: &'static str = "Remove redundant method";

    pub fn title(&self) -> &'static str {
        Self::TITLE
    }

    /// Builds the edit against the current `model` and the current text of `self.file`.
    ///
    /// The declaration is re-validated first: it must still exist with the same name, file
    /// and range, and the range must still fit `file_text` on character boundaries.
    pub fn apply(&self, model: &Model, file_text: &str) -> FixOutcome {
        if !self.still_valid(model, file_text) {
            tracing::debug!(
                target: TRACING_TARGET,
                method = %self.name,
                file = ?self.file,
                "declaration changed since analysis, nothing to delete"
            );
            return FixOutcome::NothingToDo;
        }

        let mut edit = WorkspaceEdit::default();
        edit.add_edit(self.file, TextEdit::delete(self.range));
        FixOutcome::Applied(edit)
    }

    fn still_valid(&self, model: &Model, file_text: &str) -> bool {
        let Some(method) = model.method(self.method) else {
            return false;
        };
        if method.name != self.name
            || method.range != self.range
            || model.file_of_method(self.method) != Some(self.file)
        {
            return false;
        }
        let Ok(len) = TextSize::try_from(file_text.len()) else {
            return false;
        };
        self.range.end() <= len
            && file_text.is_char_boundary(u32::from(self.range.start()) as usize)
            && file_text.is_char_boundary(u32::from(self.range.end()) as usize)
    }
}
