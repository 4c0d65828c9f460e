//! Override gate: decides whether an overriding method and its super method are comparable
//! at all before any body is looked at.

use std::collections::BTreeSet;

use vigil_hir::{Annotation, DeclId, MethodDecl, Model, Modifier, TypeRef, Visibility};

use crate::TRACING_TARGET;

/// Modifiers that change observable behavior of an override. `abstract`, `native` and
/// `default` describe whether a body exists and are checked through the body instead.
const RELEVANT_MODIFIERS: [Modifier; 4] = [
    Modifier::Static,
    Modifier::Final,
    Modifier::Synchronized,
    Modifier::Strictfp,
];

/// Picks the super method an override is compared against.
///
/// Only the first resolved direct super method is used. When that one is an interface
/// `default` method and several super methods are inherited at once, there is no single
/// behavior to compare against and the analysis abstains.
pub fn select_super_method(model: &Model, method: &MethodDecl) -> Option<DeclId> {
    let first = *method.super_methods.first()?;
    let super_method = model.method(first)?;
    if super_method.has_modifier(Modifier::Default) && method.super_methods.len() > 1 {
        tracing::debug!(
            target: TRACING_TARGET,
            method = %method.name,
            candidates = method.super_methods.len(),
            "abstaining: several default methods inherited"
        );
        return None;
    }
    Some(first)
}

/// Whether `method` may be compared with `super_method`.
///
/// All of the following must hold: `method` has a body, same relevant modifiers, same
/// annotations (ignoring `@Override`), same return type, same set of thrown types, same
/// varargs-ness, same parameter count, and compatible visibility.
#[must_use]
pub fn is_comparable(method: &MethodDecl, super_method: &MethodDecl) -> bool {
    if method.body.is_none() {
        return false;
    }
    relevant_modifiers(method) == relevant_modifiers(super_method)
        && annotation_set(method) == annotation_set(super_method)
        && method.return_type == super_method.return_type
        && thrown_types(method) == thrown_types(super_method)
        && method.is_varargs == super_method.is_varargs
        && method.params.len() == super_method.params.len()
        && visibility_compatible(method.visibility, super_method.visibility)
}

fn relevant_modifiers(method: &MethodDecl) -> BTreeSet<Modifier> {
    RELEVANT_MODIFIERS
        .into_iter()
        .filter(|modifier| method.has_modifier(*modifier))
        .collect()
}

fn annotation_set(method: &MethodDecl) -> BTreeSet<&Annotation> {
    method
        .annotations
        .iter()
        .filter(|annotation| !annotation.is_override())
        .collect()
}

fn thrown_types(method: &MethodDecl) -> BTreeSet<&TypeRef> {
    method.throws.iter().collect()
}

/// Identical visibility, or a public override of a protected method. The latter is the
/// widening case that only usage search can judge.
fn visibility_compatible(overriding: Visibility, overridden: Visibility) -> bool {
    overriding == overridden
        || (overriding == Visibility::Public && overridden == Visibility::Protected)
}
