use pretty_assertions::assert_eq;
use vigil_config::{AnalysisMode, VigilConfig};
use vigil_core::{text_range, Severity};
use vigil_hir::{Model, ModelBuilder, TypeKind};
use vigil_index::{CancellationToken, InMemoryUsageIndex};
use vigil_inspect::{run_inspection, Inspection, InspectionContext, RedundantMethodOverride};

/// Two files, each with a base/derived pair; the derived methods alternate between
/// redundant and not.
fn project() -> Model {
    let mut builder = ModelBuilder::new();
    for (index, path) in ["a/A.java", "b/B.java"].into_iter().enumerate() {
        let package = if index == 0 { "a" } else { "b" };
        let file = builder.add_file(path, Some(package));
        let base = builder
            .add_type(file, "Base", TypeKind::Class)
            .range(text_range(0, 100))
            .finish();
        let derived = builder
            .add_type(file, "Derived", TypeKind::Class)
            .range(text_range(100, 400))
            .finish();
        for (slot, name) in ["first", "second", "third"].into_iter().enumerate() {
            let super_method = builder
                .add_method(base, name)
                .returns("int")
                .body(|b| {
                    let value = b.int(slot as i64);
                    vec![b.ret(Some(value))]
                })
                .finish();
            // Declared in reverse so declaration order and source order disagree.
            let start = 300 - 90 * slot as u32;
            builder
                .add_method(derived, name)
                .returns("int")
                .range(text_range(start, start + 80))
                .name_range(Some(text_range(start + 4, start + 4 + name.len() as u32)))
                .overrides(super_method)
                .body(|b| {
                    let value = b.int(if slot == 1 { 42 } else { slot as i64 });
                    vec![b.ret(Some(value))]
                })
                .finish();
        }
    }
    builder.build()
}

#[test]
fn problems_are_sorted_by_file_and_range() {
    let model = project();
    let index = InMemoryUsageIndex::new();
    let ctx = InspectionContext::new(&model, &index);

    let problems = run_inspection(&ctx, &RedundantMethodOverride::new());
    let reported: Vec<_> = problems
        .iter()
        .map(|problem| (problem.diagnostic.file.to_raw(), problem.diagnostic.message.clone()))
        .collect();
    assert_eq!(
        reported,
        vec![
            (0, "Method `third()` is identical to its super method".to_string()),
            (0, "Method `first()` is identical to its super method".to_string()),
            (1, "Method `third()` is identical to its super method".to_string()),
            (1, "Method `first()` is identical to its super method".to_string()),
        ]
    );
}

#[test]
fn parallel_run_matches_sequential_analysis() {
    let model = project();
    let index = InMemoryUsageIndex::new();
    let ctx = InspectionContext::new(&model, &index).with_mode(AnalysisMode::Batch);
    let inspection = RedundantMethodOverride::new();

    let mut sequential: Vec<_> = model
        .methods()
        .filter_map(|(id, _)| inspection.check_method(&ctx, id))
        .collect();
    sequential.sort_by_key(|problem| (problem.diagnostic.file, problem.diagnostic.range.start()));

    assert_eq!(run_inspection(&ctx, &inspection), sequential);
    assert_eq!(run_inspection(&ctx, &inspection), sequential);
}

#[test]
fn cancelled_run_reports_nothing() {
    let model = project();
    let index = InMemoryUsageIndex::new();
    let cancel = CancellationToken::new();
    cancel.cancel();
    let ctx = InspectionContext::new(&model, &index).with_cancellation(cancel);

    assert!(run_inspection(&ctx, &RedundantMethodOverride::new()).is_empty());
}

#[test]
fn configuration_drives_severity_and_mode() {
    let (config, diagnostics) = VigilConfig::load_from_str_with_diagnostics(
        r#"
[analysis]
mode = "batch"

[inspections.redundant_method_override]
severity = "error"
"#,
    )
    .unwrap();
    assert!(diagnostics.is_empty());

    let model = project();
    let index = InMemoryUsageIndex::new();
    let ctx = InspectionContext::from_config(&model, &index, &config.analysis);
    assert_eq!(ctx.mode, AnalysisMode::Batch);

    let inspection =
        RedundantMethodOverride::from_config(&config.inspections.redundant_method_override)
            .unwrap();
    let problems = run_inspection(&ctx, &inspection);
    assert_eq!(problems.len(), 4);
    assert!(problems
        .iter()
        .all(|problem| problem.diagnostic.severity == Severity::Error));

    let (disabled, _) = VigilConfig::load_from_str_with_diagnostics(
        "[inspections.redundant_method_override]\nenabled = false\n",
    )
    .unwrap();
    assert!(
        RedundantMethodOverride::from_config(&disabled.inspections.redundant_method_override)
            .is_none()
    );
}
