use std::ops::ControlFlow;
use std::time::Instant;

use thiserror::Error;
use tokio_util::sync::CancellationToken;
use vigil_core::{FileId, PackageName, TextRange};
use vigil_hir::DeclId;

/// Result of the cheap occurrence probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchCost {
    Zero,
    Few,
    TooMany,
}

/// Where a usage search looks.
///
/// Package scopes never reach into subclasses declared elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SearchScope {
    Package {
        package: PackageName,
        include_subpackages: bool,
    },
    Project,
}

impl SearchScope {
    /// The package itself, without subpackages.
    pub fn package(package: PackageName) -> Self {
        SearchScope::Package {
            package,
            include_subpackages: false,
        }
    }

    #[must_use]
    pub fn contains_package(&self, candidate: &PackageName) -> bool {
        match self {
            SearchScope::Project => true,
            SearchScope::Package {
                package,
                include_subpackages: false,
            } => candidate == package,
            SearchScope::Package {
                package,
                include_subpackages: true,
            } => candidate.is_within(package),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UsageLocation {
    pub file: FileId,
    pub range: TextRange,
}

/// A full-enumeration request.
#[derive(Debug, Clone, Copy)]
pub struct UsageQuery<'a> {
    pub target: DeclId,
    pub name: &'a str,
    pub scope: &'a SearchScope,
    pub cancel: &'a CancellationToken,
    pub deadline: Option<Instant>,
}

impl UsageQuery<'_> {
    /// Implementations call this between candidates.
    pub fn check_interrupted(&self) -> Result<(), SearchInterrupted> {
        if self.cancel.is_cancelled() {
            return Err(SearchInterrupted::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(SearchInterrupted::DeadlineExceeded),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchInterrupted {
    #[error("usage search was cancelled")]
    Cancelled,
    #[error("usage search exceeded its deadline")]
    DeadlineExceeded,
    #[error("usage search exceeded its budget of {0} candidates")]
    BudgetExceeded(usize),
}

/// Read-only reference search over the host's usage index.
pub trait UsageSearch: Send + Sync {
    /// Estimates how many occurrences of `name` exist in `scope` without resolving them.
    fn estimate_cost(&self, name: &str, scope: &SearchScope) -> SearchCost;

    /// Visits every resolved reference to `query.target` inside `query.scope`.
    ///
    /// `visit` may stop the search early by returning [`ControlFlow::Break`]; that is a
    /// successful, complete answer from the caller's point of view. An `Err` means the scan
    /// did not finish and its partial results must not be trusted. A query that is already
    /// cancelled or past its deadline fails even when the scope holds no candidates.
    fn for_each_usage(
        &self,
        query: &UsageQuery<'_>,
        visit: &mut dyn FnMut(&UsageLocation) -> ControlFlow<()>,
    ) -> Result<(), SearchInterrupted>;
}
