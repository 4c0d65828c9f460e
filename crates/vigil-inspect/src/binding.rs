use std::collections::HashMap;

use vigil_hir::{DeclId, MethodDecl};

/// Declaration pairs treated as interchangeable while comparing one override with its super
/// method.
///
/// The registry is symmetric and append-only: once a declaration is bound, it stays bound to
/// the same partner. It lives for exactly one comparison.
#[derive(Debug, Clone, Default)]
pub struct EquivalenceRegistry {
    partners: HashMap<DeclId, DeclId>,
}

impl EquivalenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `left` and `right` as equivalent.
    ///
    /// Returns `false` if either side is already bound to a different declaration; the
    /// existing binding is kept.
    pub fn mark(&mut self, left: DeclId, right: DeclId) -> bool {
        if left == right {
            return true;
        }
        match (self.partners.get(&left), self.partners.get(&right)) {
            (None, None) => {
                self.partners.insert(left, right);
                self.partners.insert(right, left);
                true
            }
            (Some(partner), _) => *partner == right,
            (None, Some(partner)) => *partner == left,
        }
    }

    /// Identical declarations are always equivalent.
    #[must_use]
    pub fn are_equivalent(&self, left: DeclId, right: DeclId) -> bool {
        left == right || self.partners.get(&left) == Some(&right)
    }

    /// Number of bound pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.partners.len() / 2
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.partners.is_empty()
    }
}

/// Positional correspondence between an override's parameters and its super method's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterBindingContext {
    methods: (DeclId, DeclId),
    params: Vec<(DeclId, DeclId)>,
}

impl ParameterBindingContext {
    /// Returns `None` when the parameter lists differ in length.
    pub fn new(
        method_id: DeclId,
        method: &MethodDecl,
        super_id: DeclId,
        super_method: &MethodDecl,
    ) -> Option<Self> {
        if method.params.len() != super_method.params.len() {
            return None;
        }
        let params = method
            .params
            .iter()
            .copied()
            .zip(super_method.params.iter().copied())
            .collect();
        Some(Self {
            methods: (method_id, super_id),
            params,
        })
    }

    pub fn params(&self) -> &[(DeclId, DeclId)] {
        &self.params
    }

    /// A fresh registry holding every parameter pair plus the method pair, so a recursive
    /// call in one body matches a recursive call in the other.
    pub fn seed(&self) -> EquivalenceRegistry {
        let mut registry = EquivalenceRegistry::new();
        registry.mark(self.methods.0, self.methods.1);
        for &(left, right) in &self.params {
            registry.mark(left, right);
        }
        registry
    }
}
