use std::time::Duration;

use pretty_assertions::assert_eq;
use vigil_config::AnalysisMode;
use vigil_core::{text_range, FileId, PackageName};
use vigil_hir::{DeclId, Model, ModelBuilder, TypeKind, Visibility};
use vigil_index::{
    CancellationToken, InMemoryUsageIndex, IndexedUsage, SearchCost, UsageLocation,
};
use vigil_inspect::{InspectionContext, RedundantMethodOverride, Verdict};

use super::verdict_with;

/// `p.Base` declares `protected void m() { work(); }`; `q.Derived` overrides it with
/// `<visibility> void m() { super.m(); }`. A third file lives in package `r`.
struct Widening {
    model: Model,
    method: DeclId,
    derived_file: FileId,
    other_file: FileId,
}

fn widening(visibility: Visibility, derived_package: Option<&str>) -> Widening {
    let mut builder = ModelBuilder::new();
    let base_file = builder.add_file("p/Base.java", Some("p"));
    let derived_file = builder.add_file("q/Derived.java", derived_package);
    let other_file = builder.add_file("r/Client.java", Some("r"));

    let base = builder
        .add_type(base_file, "Base", TypeKind::Class)
        .range(text_range(0, 80))
        .finish();
    let derived = builder
        .add_type(derived_file, "Derived", TypeKind::Class)
        .range(text_range(0, 120))
        .finish();

    let super_method = builder
        .add_method(base, "m")
        .visibility(Visibility::Protected)
        .body(|b| {
            let call = b.unresolved_call(None, "work", Vec::new());
            vec![b.expr_stmt(call)]
        })
        .finish();
    let method = builder
        .add_method(derived, "m")
        .visibility(visibility)
        .range(text_range(30, 70))
        .name_range(Some(text_range(42, 43)))
        .overrides(super_method)
        .body(|b| {
            let call = b.super_call(super_method, Vec::new());
            vec![b.expr_stmt(call)]
        })
        .finish();

    Widening {
        model: builder.build(),
        method,
        derived_file,
        other_file,
    }
}

impl Widening {
    fn usage(&self, package: &str, file: FileId, start: u32) -> IndexedUsage {
        IndexedUsage {
            target: Some(self.method),
            package: PackageName::new(package),
            location: UsageLocation {
                file,
                range: text_range(start, start + 1),
            },
        }
    }
}

#[test]
fn public_override_without_outside_usages_is_redundant() {
    let fixture = widening(Visibility::Public, Some("q"));
    let mut index = InMemoryUsageIndex::new();
    assert_eq!(
        verdict_with(&fixture.model, &index, fixture.method),
        Verdict::Redundant
    );

    // A usage inside `Derived` itself does not depend on the widening.
    index.insert("m", fixture.usage("q", fixture.derived_file, 100));
    assert_eq!(
        verdict_with(&fixture.model, &index, fixture.method),
        Verdict::Redundant
    );
}

#[test]
fn public_override_used_from_another_package_is_not_redundant() {
    let fixture = widening(Visibility::Public, Some("q"));
    let mut index = InMemoryUsageIndex::new();
    index.insert("m", fixture.usage("r", fixture.other_file, 10));

    assert_eq!(
        verdict_with(&fixture.model, &index, fixture.method),
        Verdict::NotRedundant
    );
}

#[test]
fn protected_override_only_cares_about_its_own_package() {
    let fixture = widening(Visibility::Protected, Some("q"));
    let mut index = InMemoryUsageIndex::new();
    index.insert("m", fixture.usage("r", fixture.other_file, 10));
    assert_eq!(
        verdict_with(&fixture.model, &index, fixture.method),
        Verdict::Redundant
    );

    index.insert("m", fixture.usage("q", FileId::from_raw(9), 10));
    assert_eq!(
        verdict_with(&fixture.model, &index, fixture.method),
        Verdict::NotRedundant
    );
}

#[test]
fn unknown_package_is_not_redundant() {
    let fixture = widening(Visibility::Public, None);
    assert_eq!(
        verdict_with(&fixture.model, &InMemoryUsageIndex::new(), fixture.method),
        Verdict::NotRedundant
    );
}

#[test]
fn too_many_candidates_is_not_redundant_interactively() {
    let fixture = widening(Visibility::Public, Some("q"));
    let index = InMemoryUsageIndex::new().with_cost_override(SearchCost::TooMany);
    assert_eq!(
        verdict_with(&fixture.model, &index, fixture.method),
        Verdict::NotRedundant
    );

    let ctx = InspectionContext::new(&fixture.model, &index).with_mode(AnalysisMode::Batch);
    assert_eq!(
        RedundantMethodOverride::new().analyze(&ctx, fixture.method),
        Verdict::Redundant
    );
}

#[test]
fn cancelled_search_is_not_redundant() {
    let fixture = widening(Visibility::Public, Some("q"));
    let mut index = InMemoryUsageIndex::new();
    index.insert("m", fixture.usage("q", fixture.derived_file, 100));

    let cancel = CancellationToken::new();
    let ctx = InspectionContext::new(&fixture.model, &index).with_cancellation(cancel.clone());
    let inspection = RedundantMethodOverride::new();
    assert_eq!(inspection.analyze(&ctx, fixture.method), Verdict::Redundant);

    cancel.cancel();
    assert_eq!(inspection.analyze(&ctx, fixture.method), Verdict::NotRedundant);
}

#[test]
fn expired_search_budget_is_not_redundant() {
    let fixture = widening(Visibility::Public, Some("q"));
    let mut index = InMemoryUsageIndex::new();
    index.insert("m", fixture.usage("q", fixture.derived_file, 100));

    let ctx = InspectionContext::new(&fixture.model, &index)
        .with_mode(AnalysisMode::Batch)
        .with_usage_search_timeout(Some(Duration::ZERO));
    assert_eq!(
        RedundantMethodOverride::new().analyze(&ctx, fixture.method),
        Verdict::NotRedundant
    );

    let limited = {
        let mut limited = InMemoryUsageIndex::new().with_visit_budget(0);
        limited.insert("m", fixture.usage("q", fixture.derived_file, 100));
        limited
    };
    assert_eq!(
        verdict_with(&fixture.model, &limited, fixture.method),
        Verdict::NotRedundant
    );
}

#[test]
fn cancelled_analysis_is_not_redundant_without_any_candidates() {
    let fixture = widening(Visibility::Public, Some("q"));
    let empty = InMemoryUsageIndex::new();
    let cancel = CancellationToken::new();
    cancel.cancel();

    for mode in [AnalysisMode::Interactive, AnalysisMode::Batch] {
        let ctx = InspectionContext::new(&fixture.model, &empty)
            .with_mode(mode)
            .with_cancellation(cancel.clone());
        assert_eq!(
            RedundantMethodOverride::new().analyze(&ctx, fixture.method),
            Verdict::NotRedundant,
            "{mode:?}"
        );
    }
}

#[test]
fn zero_search_timeout_is_not_redundant_without_any_candidates() {
    let fixture = widening(Visibility::Public, Some("q"));
    let empty = InMemoryUsageIndex::new();
    let ctx = InspectionContext::new(&fixture.model, &empty)
        .with_mode(AnalysisMode::Batch)
        .with_usage_search_timeout(Some(Duration::ZERO));
    assert_eq!(
        RedundantMethodOverride::new().analyze(&ctx, fixture.method),
        Verdict::NotRedundant
    );
}

#[test]
fn non_protected_super_skips_usage_search() {
    let mut builder = ModelBuilder::new();
    let base_file = builder.add_file("p/Base.java", Some("p"));
    let derived_file = builder.add_file("q/Derived.java", Some("q"));
    let base = builder.add_type(base_file, "Base", TypeKind::Class).finish();
    let derived = builder
        .add_type(derived_file, "Derived", TypeKind::Class)
        .finish();
    let super_method = builder
        .add_method(base, "m")
        .visibility(Visibility::Public)
        .body(|_| Vec::new())
        .finish();
    let method = builder
        .add_method(derived, "m")
        .visibility(Visibility::Public)
        .overrides(super_method)
        .body(|b| {
            let call = b.super_call(super_method, Vec::new());
            vec![b.expr_stmt(call)]
        })
        .finish();
    let model = builder.build();

    let mut index = InMemoryUsageIndex::new();
    index.insert(
        "m",
        IndexedUsage {
            target: Some(method),
            package: PackageName::new("r"),
            location: UsageLocation {
                file: FileId::from_raw(5),
                range: text_range(0, 1),
            },
        },
    );
    assert_eq!(verdict_with(&model, &index, method), Verdict::Redundant);
}
