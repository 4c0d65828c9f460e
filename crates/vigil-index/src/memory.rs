use std::collections::BTreeMap;
use std::ops::ControlFlow;

use vigil_core::{Name, PackageName};
use vigil_hir::DeclId;

use crate::search::{
    SearchCost, SearchInterrupted, SearchScope, UsageLocation, UsageQuery, UsageSearch,
};

const DEFAULT_FEW_LIMIT: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedUsage {
    /// `None` for textual occurrences that did not resolve to any declaration.
    pub target: Option<DeclId>,
    pub package: PackageName,
    pub location: UsageLocation,
}

/// Name-keyed usage index held entirely in memory.
///
/// The cost probe counts every occurrence of a name in scope, resolved or not, mirroring a
/// word index. Enumeration only reports occurrences resolved to the queried declaration.
#[derive(Debug, Clone)]
pub struct InMemoryUsageIndex {
    occurrences: BTreeMap<Name, Vec<IndexedUsage>>,
    few_limit: usize,
    visit_budget: Option<usize>,
    cost_override: Option<SearchCost>,
}

impl Default for InMemoryUsageIndex {
    fn default() -> Self {
        Self {
            occurrences: BTreeMap::new(),
            few_limit: DEFAULT_FEW_LIMIT,
            visit_budget: None,
            cost_override: None,
        }
    }
}

impl InMemoryUsageIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Occurrence counts above this limit are reported as [`SearchCost::TooMany`].
    pub fn with_few_limit(mut self, limit: usize) -> Self {
        self.few_limit = limit;
        self
    }

    /// Stops enumeration with [`SearchInterrupted::BudgetExceeded`] after visiting this many
    /// candidates.
    pub fn with_visit_budget(mut self, budget: usize) -> Self {
        self.visit_budget = Some(budget);
        self
    }

    /// Forces every cost probe to answer `cost`.
    pub fn with_cost_override(mut self, cost: SearchCost) -> Self {
        self.cost_override = Some(cost);
        self
    }

    pub fn insert(&mut self, name: impl Into<Name>, usage: IndexedUsage) {
        self.occurrences.entry(name.into()).or_default().push(usage);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.occurrences.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }

    fn in_scope<'a>(
        &'a self,
        name: &str,
        scope: &'a SearchScope,
    ) -> impl Iterator<Item = &'a IndexedUsage> + 'a {
        self.occurrences
            .get(name)
            .into_iter()
            .flatten()
            .filter(move |usage| scope.contains_package(&usage.package))
    }
}

impl UsageSearch for InMemoryUsageIndex {
    fn estimate_cost(&self, name: &str, scope: &SearchScope) -> SearchCost {
        if let Some(cost) = self.cost_override {
            return cost;
        }
        match self.in_scope(name, scope).take(self.few_limit + 1).count() {
            0 => SearchCost::Zero,
            n if n <= self.few_limit => SearchCost::Few,
            _ => SearchCost::TooMany,
        }
    }

    fn for_each_usage(
        &self,
        query: &UsageQuery<'_>,
        visit: &mut dyn FnMut(&UsageLocation) -> ControlFlow<()>,
    ) -> Result<(), SearchInterrupted> {
        query.check_interrupted()?;
        let mut visited = 0usize;
        for usage in self.in_scope(query.name, query.scope) {
            query.check_interrupted()?;
            if let Some(budget) = self.visit_budget {
                if visited >= budget {
                    tracing::debug!(
                        target: "vigil.index",
                        name = query.name,
                        budget,
                        "usage enumeration ran out of budget"
                    );
                    return Err(SearchInterrupted::BudgetExceeded(budget));
                }
            }
            visited += 1;

            if usage.target != Some(query.target) {
                continue;
            }
            if visit(&usage.location).is_break() {
                break;
            }
        }
        Ok(())
    }
}
