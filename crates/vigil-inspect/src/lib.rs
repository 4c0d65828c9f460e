//! Code inspections over a resolved [`Model`].
//!
//! The only inspection shipped today is [`RedundantMethodOverride`], which reports overriding
//! methods that can be deleted without changing behavior: either their body is structurally
//! identical to the overridden one (modulo parameter and local renaming), or it is a pure
//! `super` forwarding call whose visibility widening nobody relies on.
//!
//! Analysis never fails. Anything that cannot be decided (missing bodies, ambiguous super
//! methods, interrupted usage searches) resolves to "not redundant".

use std::time::Duration;

use vigil_config::{AnalysisConfig, AnalysisMode, SeverityLevel};
use vigil_core::{Diagnostic, Severity};
use vigil_hir::{DeclId, Model};
use vigil_index::{CancellationToken, UsageSearch};

mod binding;
mod delegation;
mod equivalence;
mod fix;
mod redundant_override;
mod runner;
mod signature;
mod widening;

pub use binding::{EquivalenceRegistry, ParameterBindingContext};
pub use delegation::is_delegating_call;
pub use equivalence::TreeEquivalenceChecker;
pub use fix::{DeleteDeclarationFix, FixOutcome};
pub use redundant_override::{RedundantMethodOverride, Verdict};
pub use runner::run_inspection;
pub use signature::{is_comparable, select_super_method};
pub use widening::widening_allows_removal;

pub(crate) const TRACING_TARGET: &str = "vigil.inspect";

/// Everything an inspection may consult while analyzing one method.
///
/// The context is shared read-only between parallel workers.
#[derive(Clone)]
pub struct InspectionContext<'a> {
    pub model: &'a Model,
    pub usages: &'a dyn UsageSearch,
    pub mode: AnalysisMode,
    pub cancel: CancellationToken,
    /// Time budget for each usage enumeration.
    pub usage_search_timeout: Option<Duration>,
}

impl<'a> InspectionContext<'a> {
    pub fn new(model: &'a Model, usages: &'a dyn UsageSearch) -> Self {
        Self {
            model,
            usages,
            mode: AnalysisMode::default(),
            cancel: CancellationToken::new(),
            usage_search_timeout: None,
        }
    }

    pub fn from_config(
        model: &'a Model,
        usages: &'a dyn UsageSearch,
        config: &AnalysisConfig,
    ) -> Self {
        Self::new(model, usages)
            .with_mode(config.mode)
            .with_usage_search_timeout(config.usage_search_timeout())
    }

    pub fn with_mode(mut self, mode: AnalysisMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn with_usage_search_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.usage_search_timeout = timeout;
        self
    }
}

impl std::fmt::Debug for InspectionContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InspectionContext")
            .field("mode", &self.mode)
            .field("cancelled", &self.cancel.is_cancelled())
            .field("usage_search_timeout", &self.usage_search_timeout)
            .finish_non_exhaustive()
    }
}

/// A reported problem and the fix offered for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub diagnostic: Diagnostic,
    pub fix: Option<DeleteDeclarationFix>,
}

/// A rule that examines one method declaration at a time.
pub trait Inspection: Send + Sync {
    /// Stable identifier, also used as the diagnostic code.
    fn id(&self) -> &'static str;

    /// Returns at most one problem for `method`.
    fn check_method(&self, ctx: &InspectionContext<'_>, method: DeclId) -> Option<Problem>;
}

pub(crate) fn severity_for(level: SeverityLevel) -> Severity {
    match level {
        SeverityLevel::Error => Severity::Error,
        SeverityLevel::Warning => Severity::Warning,
        SeverityLevel::Info => Severity::Info,
    }
}
