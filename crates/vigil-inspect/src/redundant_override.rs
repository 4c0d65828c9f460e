use vigil_config::InspectionToggle;
use vigil_core::{Diagnostic, Severity};
use vigil_hir::{DeclId, Visibility};

use crate::binding::ParameterBindingContext;
use crate::delegation::is_delegating_call;
use crate::equivalence::TreeEquivalenceChecker;
use crate::fix::DeleteDeclarationFix;
use crate::signature::{is_comparable, select_super_method};
use crate::widening::widening_allows_removal;
use crate::{severity_for, Inspection, InspectionContext, Problem, TRACING_TARGET};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Redundant,
    NotRedundant,
}

impl Verdict {
    fn from_bool(redundant: bool) -> Self {
        if redundant {
            Verdict::Redundant
        } else {
            Verdict::NotRedundant
        }
    }
}

/// Reports overriding methods that behave exactly like the method they override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedundantMethodOverride {
    severity: Severity,
}

impl Default for RedundantMethodOverride {
    fn default() -> Self {
        Self {
            severity: Severity::Warning,
        }
    }
}

impl RedundantMethodOverride {
    pub const ID: &'static str = "redundant-method-override";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// `None` when the inspection is switched off.
    pub fn from_config(toggle: &InspectionToggle) -> Option<Self> {
        toggle
            .enabled
            .then(|| Self::new().with_severity(severity_for(toggle.severity)))
    }

    /// Decides whether `method_id` can be deleted without changing behavior.
    ///
    /// The override is redundant when it passes the signature gate and either its body is
    /// structurally equal to the super method's under the parameter binding, or it is a pure
    /// forwarding call whose visibility widening nobody depends on.
    pub fn analyze(&self, ctx: &InspectionContext<'_>, method_id: DeclId) -> Verdict {
        let Some(method) = ctx.model.method(method_id) else {
            return Verdict::NotRedundant;
        };
        let _span = tracing::debug_span!(
            target: TRACING_TARGET,
            "redundant_override",
            method = %method.name
        )
        .entered();

        if method.is_constructor {
            return Verdict::NotRedundant;
        }
        if method.name_range.is_none() {
            tracing::debug!(target: TRACING_TARGET, "abstaining: declaration has no name");
            return Verdict::NotRedundant;
        }
        let Some(super_id) = select_super_method(ctx.model, method) else {
            return Verdict::NotRedundant;
        };
        let Some(super_method) = ctx.model.method(super_id) else {
            tracing::debug!(
                target: TRACING_TARGET,
                ?super_id,
                "abstaining: super method is not a method declaration"
            );
            return Verdict::NotRedundant;
        };
        if !is_comparable(method, super_method) {
            tracing::trace!(target: TRACING_TARGET, "signatures differ");
            return Verdict::NotRedundant;
        }
        let Some(binding) = ParameterBindingContext::new(method_id, method, super_id, super_method)
        else {
            return Verdict::NotRedundant;
        };

        let mut registry = binding.seed();
        let bodies_equal = TreeEquivalenceChecker::new(ctx.model, &mut registry)
            .bodies_equal(method.body.as_ref(), super_method.body.as_ref());

        let redundant = bodies_equal
            || (is_delegating_call(method, super_id)
                && (super_method.visibility != Visibility::Protected
                    || widening_allows_removal(ctx, method_id, method)));

        let verdict = Verdict::from_bool(redundant);
        tracing::trace!(target: TRACING_TARGET, bodies_equal, ?verdict, "verdict");
        verdict
    }
}

impl Inspection for RedundantMethodOverride {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn check_method(&self, ctx: &InspectionContext<'_>, method_id: DeclId) -> Option<Problem> {
        if self.analyze(ctx, method_id) != Verdict::Redundant {
            return None;
        }
        let method = ctx.model.method(method_id)?;
        let name_range = method.name_range?;
        let file = ctx.model.file_of_method(method_id)?;

        let diagnostic = Diagnostic::new(
            self.severity,
            Self::ID,
            format!("Method `{}()` is identical to its super method", method.name),
            file,
            name_range,
        );
        let fix = DeleteDeclarationFix {
            method: method_id,
            file,
            range: method.range,
            name: method.name.clone(),
        };
        Some(Problem {
            diagnostic,
            fix: Some(fix),
        })
    }
}
