//! Structural body comparison that tolerates consistent renaming of parameters and locals.

use vigil_hir::{Body, DeclId, Model, Node, NodeId, NodeKind, Payload};

use crate::binding::EquivalenceRegistry;

/// Compares two bodies node by node.
///
/// Two nodes are equal when they have the same kind, the same payload and pairwise equal
/// children, in order. Resolved references are equal when they point at the same
/// declaration or at declarations bound in the registry. Declaration sites (loop variables,
/// catch parameters, resources, lambda parameters, locals) bind their pair in the registry
/// before the comparison moves on to the subtrees that use them.
pub struct TreeEquivalenceChecker<'a> {
    model: &'a Model,
    registry: &'a mut EquivalenceRegistry,
}

impl<'a> TreeEquivalenceChecker<'a> {
    pub fn new(model: &'a Model, registry: &'a mut EquivalenceRegistry) -> Self {
        Self { model, registry }
    }

    /// Two absent bodies are equal; a present body never equals an absent one.
    pub fn bodies_equal(&mut self, left: Option<&Body>, right: Option<&Body>) -> bool {
        match (left, right) {
            (None, None) => true,
            (Some(left), Some(right)) => self.nodes_equal(left, left.root(), right, right.root()),
            _ => false,
        }
    }

    pub fn nodes_equal(
        &mut self,
        left_body: &Body,
        left: NodeId,
        right_body: &Body,
        right: NodeId,
    ) -> bool {
        let (Some(left_node), Some(right_node)) = (left_body.node(left), right_body.node(right))
        else {
            return false;
        };

        if left_node.kind == NodeKind::Error || right_node.kind == NodeKind::Error {
            return false;
        }
        if left_node.kind != right_node.kind
            || left_node.children.len() != right_node.children.len()
        {
            return false;
        }
        if !self.payloads_equal(left_node, right_node) {
            return false;
        }

        left_node
            .children
            .iter()
            .zip(&right_node.children)
            .all(|(&left, &right)| self.nodes_equal(left_body, left, right_body, right))
    }

    fn payloads_equal(&mut self, left: &Node, right: &Node) -> bool {
        match (&left.payload, &right.payload) {
            (Payload::None, Payload::None) => true,
            (Payload::Literal(left), Payload::Literal(right)) => left == right,
            (Payload::Type(left), Payload::Type(right)) => left == right,
            (Payload::Label(left), Payload::Label(right)) => left == right,
            (Payload::Ref(left), Payload::Ref(right)) => match (left.target, right.target) {
                (Some(left), Some(right)) => self.registry.are_equivalent(left, right),
                // Unresolved on both sides: only the written name is left to compare.
                (None, None) => left.name == right.name,
                _ => false,
            },
            (Payload::Declares(left_decl), Payload::Declares(right_decl)) => {
                left.kind.is_declaration_site() && self.declarations_equal(*left_decl, *right_decl)
            }
            _ => false,
        }
    }

    fn declarations_equal(&mut self, left: DeclId, right: DeclId) -> bool {
        let (Some(left_var), Some(right_var)) = (self.model.var(left), self.model.var(right))
        else {
            return false;
        };
        left_var.ty == right_var.ty
            && left_var.kind == right_var.kind
            && left_var.is_final == right_var.is_final
            && self.registry.mark(left, right)
    }
}
