use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

mod diagnostics;
mod logging;
mod schema;

pub use diagnostics::{ConfigDiagnostics, ConfigWarning};
pub use logging::init_tracing;
pub use schema::json_schema;

/// Environment variable overriding config discovery.
pub const VIGIL_CONFIG_ENV_VAR: &str = "VIGIL_CONFIG_PATH";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[schemars(deny_unknown_fields)]
/// Top-level `vigil.toml`.
///
/// ```toml
/// [logging]
/// level = "debug"
///
/// [analysis]
/// mode = "batch"
/// usage_search_timeout_ms = 2000
///
/// [inspections.redundant_method_override]
/// enabled = true
/// severity = "warning"
/// ```
pub struct VigilConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    /// How inspections are being run (editor vs. batch) and their search budgets.
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Per-inspection switches.
    #[serde(default)]
    pub inspections: InspectionsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[schemars(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level for all vigil crates: a simple level (`info`, `debug`, ...) or a full
    /// `tracing_subscriber::EnvFilter` directive string.
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,

    /// Emit logs in JSON format.
    #[serde(default)]
    pub json: bool,

    /// Write logs to stderr.
    #[serde(default = "LoggingConfig::default_stderr")]
    pub stderr: bool,

    /// Append logs to the given file path. If the file cannot be opened, file logging is
    /// disabled while other sinks remain active.
    #[serde(default)]
    #[schemars(with = "Option<String>")]
    pub file: Option<PathBuf>,
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_owned()
    }

    fn default_stderr() -> bool {
        true
    }

    /// Maps a bare level (any case, `warning` accepted) to its `EnvFilter` spelling. Anything
    /// else is passed through as a directive string.
    pub(crate) fn normalize_level_directives(input: &str) -> String {
        let level = input.trim();
        if level.is_empty() {
            return Self::default_level();
        }
        let lowered = level.to_ascii_lowercase();
        if lowered == "warning" {
            return "warn".to_owned();
        }
        if matches!(
            lowered.as_str(),
            "off" | "error" | "warn" | "info" | "debug" | "trace"
        ) {
            lowered
        } else {
            level.to_owned()
        }
    }

    /// The effective filter. `RUST_LOG` directives are layered over the configured level; if
    /// the combination does not parse, `RUST_LOG` alone, then the configured level alone, then
    /// `info` are tried in turn.
    pub fn env_filter(&self) -> EnvFilter {
        let configured = Self::normalize_level_directives(&self.level);
        let from_env = std::env::var(EnvFilter::DEFAULT_ENV)
            .ok()
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty());

        let mut candidates = Vec::with_capacity(3);
        if let Some(env) = from_env {
            candidates.push(format!("{configured},{env}"));
            candidates.push(env);
        }
        candidates.push(configured);

        candidates
            .into_iter()
            .find_map(|directives| EnvFilter::try_new(directives).ok())
            .unwrap_or_else(|| EnvFilter::new(Self::default_level()))
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
            json: false,
            stderr: Self::default_stderr(),
            file: None,
        }
    }
}

/// Whether analysis runs while the user edits (cheap probes allowed to short-circuit) or as
/// a batch pass (always exhaustive).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    #[default]
    Interactive,
    Batch,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[schemars(deny_unknown_fields)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub mode: AnalysisMode,

    /// Time budget for one usage enumeration, in milliseconds. A search that runs out of
    /// budget is treated as inconclusive.
    #[serde(default)]
    pub usage_search_timeout_ms: Option<u64>,
}

impl AnalysisConfig {
    pub fn usage_search_timeout(&self) -> Option<Duration> {
        self.usage_search_timeout_ms.map(Duration::from_millis)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[schemars(deny_unknown_fields)]
pub struct InspectionsConfig {
    #[serde(default)]
    pub redundant_method_override: InspectionToggle,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[schemars(deny_unknown_fields)]
pub struct InspectionToggle {
    #[serde(default = "InspectionToggle::default_enabled")]
    pub enabled: bool,

    #[serde(default)]
    pub severity: SeverityLevel,
}

impl InspectionToggle {
    fn default_enabled() -> bool {
        true
    }
}

impl Default for InspectionToggle {
    fn default() -> Self {
        Self {
            enabled: Self::default_enabled(),
            severity: SeverityLevel::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SeverityLevel {
    Error,
    #[default]
    Warning,
    Info,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse toml config: {0}")]
    Toml(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        // The default `Display` embeds a source snippet; keep only the message.
        ConfigError::Toml(err.message().to_owned())
    }
}

impl VigilConfig {
    /// Load a config file from TOML.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let (config, _) = Self::load_from_path_with_diagnostics(path)?;
        Ok(config)
    }

    /// Load a config file from TOML and return diagnostics (unknown keys and recoverable
    /// values).
    pub fn load_from_path_with_diagnostics(
        path: impl AsRef<Path>,
    ) -> Result<(Self, ConfigDiagnostics), ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::load_from_str_with_diagnostics(&text)
    }

    pub fn load_from_str_with_diagnostics(
        text: &str,
    ) -> Result<(Self, ConfigDiagnostics), ConfigError> {
        let (config, unknown_keys) =
            diagnostics::deserialize_toml_with_unknown_keys::<VigilConfig>(text)?;

        let mut diagnostics = ConfigDiagnostics {
            unknown_keys,
            ..ConfigDiagnostics::default()
        };
        diagnostics.warnings.extend(config.validate());

        if !diagnostics.is_empty() {
            tracing::debug!(
                target: "vigil.config",
                unknown_keys = diagnostics.unknown_keys.len(),
                warnings = diagnostics.warnings.len(),
                "config loaded with diagnostics"
            );
        }

        Ok((config, diagnostics))
    }

    fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        let normalized = LoggingConfig::normalize_level_directives(&self.logging.level);
        if EnvFilter::try_new(&normalized).is_err() {
            warnings.push(ConfigWarning::LoggingLevelInvalid {
                value: self.logging.level.clone(),
                normalized,
            });
        }

        if self.analysis.usage_search_timeout_ms == Some(0) {
            warnings.push(ConfigWarning::UsageSearchTimeoutZero);
        }

        warnings
    }
}

/// Discover the vigil configuration file for a workspace root.
///
/// Search order:
/// 1) `VIGIL_CONFIG_PATH` (absolute or relative to `workspace_root`)
/// 2) `vigil.toml` in `workspace_root`
/// 3) `.vigil.toml` in `workspace_root`
pub fn discover_config_path(workspace_root: &Path) -> Option<PathBuf> {
    if let Some(value) = std::env::var_os(VIGIL_CONFIG_ENV_VAR) {
        let candidate = PathBuf::from(value);
        let path = if candidate.is_absolute() {
            candidate
        } else {
            workspace_root.join(candidate)
        };
        return Some(path);
    }

    ["vigil.toml", ".vigil.toml"]
        .into_iter()
        .map(|name| workspace_root.join(name))
        .find(|path| path.is_file())
}

/// Load the configuration for a workspace root.
///
/// If no config is present, returns [`VigilConfig::default`] and `None`.
pub fn load_for_workspace(
    workspace_root: &Path,
) -> Result<(VigilConfig, Option<PathBuf>, ConfigDiagnostics), ConfigError> {
    let Some(path) = discover_config_path(workspace_root) else {
        return Ok((VigilConfig::default(), None, ConfigDiagnostics::default()));
    };

    let (config, diagnostics) = VigilConfig::load_from_path_with_diagnostics(&path)?;
    Ok((config, Some(path), diagnostics))
}
