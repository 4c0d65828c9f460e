use rayon::prelude::*;
use vigil_hir::DeclId;

use crate::{Inspection, InspectionContext, Problem, TRACING_TARGET};

/// Runs `inspection` over every method of the model.
///
/// Methods are analyzed in parallel; each analysis only reads shared state, so the result
/// is the same as a sequential pass. Problems are ordered by file, then by range.
pub fn run_inspection(ctx: &InspectionContext<'_>, inspection: &dyn Inspection) -> Vec<Problem> {
    let methods: Vec<DeclId> = ctx.model.methods().map(|(id, _)| id).collect();

    let mut problems: Vec<Problem> = methods
        .par_iter()
        .filter_map(|&method| {
            if ctx.cancel.is_cancelled() {
                return None;
            }
            inspection.check_method(ctx, method)
        })
        .collect();

    problems.sort_by_key(|problem| {
        let diagnostic = &problem.diagnostic;
        (
            diagnostic.file,
            diagnostic.range.start(),
            diagnostic.range.end(),
        )
    });

    tracing::debug!(
        target: TRACING_TARGET,
        inspection = inspection.id(),
        methods = methods.len(),
        problems = problems.len(),
        cancelled = ctx.cancel.is_cancelled(),
        "inspection finished"
    );
    problems
}
