use pretty_assertions::assert_eq;
use std::time::Duration;
use vigil_config::{
    discover_config_path, load_for_workspace, AnalysisMode, ConfigError, ConfigWarning,
    SeverityLevel, VigilConfig,
};

#[test]
fn empty_config_uses_defaults() {
    let (config, diagnostics) = VigilConfig::load_from_str_with_diagnostics("").unwrap();
    assert_eq!(config, VigilConfig::default());
    assert!(diagnostics.is_empty());

    let toggle = &config.inspections.redundant_method_override;
    assert!(toggle.enabled);
    assert_eq!(toggle.severity, SeverityLevel::Warning);
    assert_eq!(config.analysis.mode, AnalysisMode::Interactive);
    assert_eq!(config.analysis.usage_search_timeout(), None);
    assert_eq!(config.logging.level, "info");
    assert!(config.logging.stderr);
}

#[test]
fn full_config_round_trips_through_toml() {
    let text = r#"
[logging]
level = "debug"
json = true

[analysis]
mode = "batch"
usage_search_timeout_ms = 250

[inspections.redundant_method_override]
enabled = false
severity = "error"
"#;
    let (config, diagnostics) = VigilConfig::load_from_str_with_diagnostics(text).unwrap();
    assert!(diagnostics.is_empty());
    assert_eq!(config.analysis.mode, AnalysisMode::Batch);
    assert_eq!(
        config.analysis.usage_search_timeout(),
        Some(Duration::from_millis(250))
    );
    assert!(!config.inspections.redundant_method_override.enabled);
    assert_eq!(
        config.inspections.redundant_method_override.severity,
        SeverityLevel::Error
    );
    assert!(config.logging.json);
}

#[test]
fn unknown_keys_are_reported_not_rejected() {
    let text = r#"
[inspections.redundant_method_override]
enabeld = false

[experimental]
fast = true
"#;
    let (config, diagnostics) = VigilConfig::load_from_str_with_diagnostics(text).unwrap();
    assert!(config.inspections.redundant_method_override.enabled);
    assert_eq!(
        diagnostics.unknown_keys,
        vec![
            "experimental".to_string(),
            "inspections.redundant_method_override.enabeld".to_string(),
        ]
    );
}

#[test]
fn suspicious_values_produce_warnings() {
    let text = r#"
[logging]
level = "vigil=[oops"

[analysis]
usage_search_timeout_ms = 0
"#;
    let (_, diagnostics) = VigilConfig::load_from_str_with_diagnostics(text).unwrap();
    assert_eq!(diagnostics.warnings.len(), 2);
    assert!(matches!(
        diagnostics.warnings[0],
        ConfigWarning::LoggingLevelInvalid { .. }
    ));
    assert_eq!(diagnostics.warnings[1], ConfigWarning::UsageSearchTimeoutZero);
}

#[test]
fn invalid_enum_value_is_a_toml_error() {
    let err = VigilConfig::load_from_str_with_diagnostics(
        "[analysis]\nmode = \"sometimes\"\n",
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = VigilConfig::load_from_path(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn discovery_prefers_vigil_toml_over_hidden_file() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(discover_config_path(dir.path()), None);

    std::fs::write(dir.path().join(".vigil.toml"), "").unwrap();
    assert_eq!(
        discover_config_path(dir.path()),
        Some(dir.path().join(".vigil.toml"))
    );

    std::fs::write(
        dir.path().join("vigil.toml"),
        "[analysis]\nmode = \"batch\"\n",
    )
    .unwrap();
    assert_eq!(
        discover_config_path(dir.path()),
        Some(dir.path().join("vigil.toml"))
    );

    let (config, path, diagnostics) = load_for_workspace(dir.path()).unwrap();
    assert_eq!(path, Some(dir.path().join("vigil.toml")));
    assert_eq!(config.analysis.mode, AnalysisMode::Batch);
    assert!(diagnostics.is_empty());
}

#[test]
fn workspace_without_config_gets_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let (config, path, _) = load_for_workspace(dir.path()).unwrap();
    assert_eq!(path, None);
    assert_eq!(config, VigilConfig::default());
}
