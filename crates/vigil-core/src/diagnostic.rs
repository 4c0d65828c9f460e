use serde::{Deserialize, Serialize};

use crate::{FileId, TextRange};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// A problem reported by an inspection, anchored at a range in one file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: &'static str,
    pub message: String,
    pub file: FileId,
    pub range: TextRange,
}

impl Diagnostic {
    pub fn new(
        severity: Severity,
        code: &'static str,
        message: impl Into<String>,
        file: FileId,
        range: TextRange,
    ) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            file,
            range,
        }
    }
}
