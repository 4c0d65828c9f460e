//! Text edit primitives used by quick fixes.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::{FileId, TextRange, TextSize};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TextEdit {
    pub range: TextRange,
    pub replacement: String,
}

impl TextEdit {
    pub fn new(range: TextRange, replacement: impl Into<String>) -> Self {
        Self {
            range,
            replacement: replacement.into(),
        }
    }

    pub fn delete(range: TextRange) -> Self {
        Self::new(range, String::new())
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct WorkspaceEdit {
    pub changes: BTreeMap<FileId, Vec<TextEdit>>,
}

impl WorkspaceEdit {
    pub fn is_empty(&self) -> bool {
        self.changes.values().all(Vec::is_empty)
    }

    pub fn add_edit(&mut self, file: FileId, edit: TextEdit) {
        self.changes.entry(file).or_default().push(edit);
    }

    pub fn edits_for(&self, file: FileId) -> &[TextEdit] {
        self.changes.get(&file).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum EditError {
    #[error("edit range {range:?} is out of bounds for text length {text_len:?}")]
    RangeOutOfBounds { range: TextRange, text_len: TextSize },
    #[error("offset {offset:?} is not a UTF-8 character boundary")]
    InvalidUtf8Boundary { offset: TextSize },
    #[error("overlapping edits: {first:?} overlaps {second:?}")]
    OverlappingEdits { first: TextRange, second: TextRange },
}

/// Apply a list of edits to a text snapshot.
///
/// Edits are sorted by `(start, end)` and applied from the end of the text backwards, so the
/// result does not depend on the order the caller produced them in.
pub fn apply_text_edits(text: &str, edits: &[TextEdit]) -> Result<String, EditError> {
    let mut edits = edits.to_vec();
    normalize_text_edits(text, &mut edits)?;

    let mut out = text.to_string();
    for edit in edits.into_iter().rev() {
        let start = usize::from(edit.range.start());
        let end = usize::from(edit.range.end());
        out.replace_range(start..end, &edit.replacement);
    }
    Ok(out)
}

/// Sort edits and reject overlapping, out-of-bounds or mid-character edits.
pub fn normalize_text_edits(text: &str, edits: &mut [TextEdit]) -> Result<(), EditError> {
    edits.sort_by_key(|e| (e.range.start(), e.range.end()));

    let text_len = TextSize::of(text);

    for edit in edits.iter() {
        if edit.range.end() > text_len {
            return Err(EditError::RangeOutOfBounds {
                range: edit.range,
                text_len,
            });
        }
        for offset in [edit.range.start(), edit.range.end()] {
            if !text.is_char_boundary(usize::from(offset)) {
                return Err(EditError::InvalidUtf8Boundary { offset });
            }
        }
    }

    for pair in edits.windows(2) {
        let (first, second) = (&pair[0], &pair[1]);
        let both_inserts_at_same_offset = first.range.is_empty()
            && second.range.is_empty()
            && first.range.start() == second.range.start();
        if first.range.end() > second.range.start() || both_inserts_at_same_offset {
            return Err(EditError::OverlappingEdits {
                first: first.range,
                second: second.range,
            });
        }
    }

    Ok(())
}
