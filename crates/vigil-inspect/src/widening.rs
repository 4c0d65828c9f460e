//! Usage-based check for overrides that exist only to widen a protected method's visibility.

use std::ops::ControlFlow;
use std::time::Instant;

use vigil_config::AnalysisMode;
use vigil_hir::{DeclId, MethodDecl, Visibility};
use vigil_index::{SearchCost, SearchScope, UsageLocation, UsageQuery};

use crate::{InspectionContext, TRACING_TARGET};

/// Whether deleting a forwarding override of a protected method would leave every caller
/// able to reach it.
///
/// The override is removable only when no usage of it lies outside its own declaring type.
/// A protected override is searched for in its own package; a public override may be called
/// from anywhere, so the whole project is searched. Anything inconclusive (unknown package,
/// too many candidates to probe cheaply, cancellation, an interrupted enumeration) keeps the
/// override.
pub fn widening_allows_removal(
    ctx: &InspectionContext<'_>,
    method_id: DeclId,
    method: &MethodDecl,
) -> bool {
    if ctx.cancel.is_cancelled() {
        tracing::debug!(
            target: TRACING_TARGET,
            method = %method.name,
            "abstaining: analysis was cancelled"
        );
        return false;
    }
    let Some(package) = ctx.model.package_of_method(method_id) else {
        tracing::debug!(
            target: TRACING_TARGET,
            method = %method.name,
            "abstaining: package of override is unknown"
        );
        return false;
    };

    let scope = match method.visibility {
        Visibility::Public => SearchScope::Project,
        _ => SearchScope::package(package.clone()),
    };

    if ctx.mode == AnalysisMode::Interactive {
        match ctx.usages.estimate_cost(&method.name, &scope) {
            SearchCost::Zero => return true,
            SearchCost::TooMany => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    method = %method.name,
                    ?scope,
                    "abstaining: too many candidate usages to search interactively"
                );
                return false;
            }
            SearchCost::Few => {}
        }
    }

    let query = UsageQuery {
        target: method_id,
        name: &method.name,
        scope: &scope,
        cancel: &ctx.cancel,
        deadline: ctx.usage_search_timeout.map(|timeout| Instant::now() + timeout),
    };

    let mut outside: Option<UsageLocation> = None;
    let result = ctx.usages.for_each_usage(&query, &mut |location: &UsageLocation| {
        if ctx
            .model
            .type_contains(method.owner, location.file, location.range)
        {
            ControlFlow::Continue(())
        } else {
            outside = Some(*location);
            ControlFlow::Break(())
        }
    });

    match result {
        Ok(()) => {
            if let Some(location) = outside {
                tracing::trace!(
                    target: TRACING_TARGET,
                    method = %method.name,
                    ?location,
                    "override is reachable from outside its type"
                );
            }
            outside.is_none()
        }
        Err(err) => {
            tracing::debug!(
                target: TRACING_TARGET,
                method = %method.name,
                error = %err,
                "abstaining: usage search did not complete"
            );
            false
        }
    }
}
