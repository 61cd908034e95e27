use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::criteria::{PriorityWeights, ScoringDimension};
use crate::risk::RiskDetectorConfig;

const CONFIG_FILE_NAME: &str = "policyscope.toml";
const MAX_CONTEXT_WINDOW_CHARS: usize = 500;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct AppConfig {
    pub scoring: ScoringConfig,
    pub risk: RiskDetectorConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ScoringConfig {
    /// Used when comparison criteria carry no priorities of their own.
    pub default_weights: PriorityWeights,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: LogFormat::Compact }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
    pub context_window_chars: Option<usize>,
    pub min_confidence: Option<f64>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

/// Where the effective values came from, for operator diagnostics.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ConfigProvenance {
    pub file: Option<PathBuf>,
    pub env_vars: Vec<String>,
    pub overrides: Vec<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        Self::load_with_provenance(options).map(|(config, _)| config)
    }

    pub fn load_with_provenance(
        options: LoadOptions,
    ) -> Result<(Self, ConfigProvenance), ConfigError> {
        let mut config = Self::default();
        let mut provenance = ConfigProvenance::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
            provenance.file = Some(path);
        } else if options.require_file {
            let expected =
                options.config_path.unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        provenance.env_vars = config.apply_env_overrides()?;
        provenance.overrides = config.apply_overrides(options.overrides);
        config.validate()?;

        Ok((config, provenance))
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(scoring) = patch.scoring {
            if let Some(weights) = scoring.default_weights {
                for dimension in ScoringDimension::ALL {
                    if let Some(weight) = weights.get(dimension) {
                        self.scoring.default_weights =
                            self.scoring.default_weights.with(dimension, weight);
                    }
                }
            }
        }

        if let Some(risk) = patch.risk {
            if let Some(context_window_chars) = risk.context_window_chars {
                self.risk.context_window_chars = context_window_chars;
            }
            if let Some(mitigation_cost_ratio) = risk.mitigation_cost_ratio {
                self.risk.mitigation_cost_ratio = mitigation_cost_ratio;
            }
            if let Some(min_confidence) = risk.min_confidence {
                self.risk.min_confidence = min_confidence;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<Vec<String>, ConfigError> {
        let mut applied = Vec::new();

        let key = "POLICYSCOPE_RISK_CONTEXT_WINDOW_CHARS";
        if let Some(value) = read_env(key) {
            self.risk.context_window_chars = parse_usize(key, &value)?;
            applied.push(key.to_string());
        }
        let key = "POLICYSCOPE_RISK_MITIGATION_COST_RATIO";
        if let Some(value) = read_env(key) {
            self.risk.mitigation_cost_ratio = parse_f64(key, &value)?;
            applied.push(key.to_string());
        }
        let key = "POLICYSCOPE_RISK_MIN_CONFIDENCE";
        if let Some(value) = read_env(key) {
            self.risk.min_confidence = parse_f64(key, &value)?;
            applied.push(key.to_string());
        }

        if let Some((key, value)) =
            read_first_env(&["POLICYSCOPE_LOGGING_LEVEL", "POLICYSCOPE_LOG_LEVEL"])
        {
            self.logging.level = value;
            applied.push(key.to_string());
        }
        if let Some((key, value)) =
            read_first_env(&["POLICYSCOPE_LOGGING_FORMAT", "POLICYSCOPE_LOG_FORMAT"])
        {
            self.logging.format = value.parse()?;
            applied.push(key.to_string());
        }

        Ok(applied)
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) -> Vec<String> {
        let mut applied = Vec::new();
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
            applied.push("logging.level".to_string());
        }
        if let Some(log_format) = overrides.log_format {
            self.logging.format = log_format;
            applied.push("logging.format".to_string());
        }
        if let Some(context_window_chars) = overrides.context_window_chars {
            self.risk.context_window_chars = context_window_chars;
            applied.push("risk.context_window_chars".to_string());
        }
        if let Some(min_confidence) = overrides.min_confidence {
            self.risk.min_confidence = min_confidence;
            applied.push("risk.min_confidence".to_string());
        }
        applied
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_scoring(&self.scoring)?;
        validate_risk(&self.risk)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from(CONFIG_FILE_NAME), Path::new("config").join(CONFIG_FILE_NAME)]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_scoring(scoring: &ScoringConfig) -> Result<(), ConfigError> {
    scoring.default_weights.validate().map_err(|error| {
        ConfigError::Validation(format!("scoring.default_weights: {error}"))
    })
}

fn validate_risk(risk: &RiskDetectorConfig) -> Result<(), ConfigError> {
    if risk.context_window_chars == 0 || risk.context_window_chars > MAX_CONTEXT_WINDOW_CHARS {
        return Err(ConfigError::Validation(format!(
            "risk.context_window_chars must be in range 1..={MAX_CONTEXT_WINDOW_CHARS}"
        )));
    }

    let ratio = risk.mitigation_cost_ratio;
    if !ratio.is_finite() || ratio <= 0.0 || ratio > 1.0 {
        return Err(ConfigError::Validation(
            "risk.mitigation_cost_ratio must be greater than 0 and at most 1".to_string(),
        ));
    }

    if !(0.0..=1.0).contains(&risk.min_confidence) {
        return Err(ConfigError::Validation(
            "risk.min_confidence must be in range 0..=1".to_string(),
        ));
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn read_first_env<'a>(keys: &[&'a str]) -> Option<(&'a str, String)> {
    keys.iter().find_map(|key| read_env(key).map(|value| (*key, value)))
}

fn parse_usize(key: &str, value: &str) -> Result<usize, ConfigError> {
    value.trim().parse::<usize>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_f64(key: &str, value: &str) -> Result<f64, ConfigError> {
    value.trim().parse::<f64>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    scoring: Option<ScoringPatch>,
    risk: Option<RiskPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct ScoringPatch {
    default_weights: Option<WeightsPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct WeightsPatch {
    premium: Option<f64>,
    coverage: Option<f64>,
    deductible: Option<f64>,
    exclusions: Option<f64>,
    insurer_rating: Option<f64>,
    claims_process: Option<f64>,
    customer_service: Option<f64>,
}

impl WeightsPatch {
    fn get(&self, dimension: ScoringDimension) -> Option<f64> {
        match dimension {
            ScoringDimension::Premium => self.premium,
            ScoringDimension::Coverage => self.coverage,
            ScoringDimension::Deductible => self.deductible,
            ScoringDimension::Exclusions => self.exclusions,
            ScoringDimension::InsurerRating => self.insurer_rating,
            ScoringDimension::ClaimsProcess => self.claims_process,
            ScoringDimension::CustomerService => self.customer_service,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RiskPatch {
    context_window_chars: Option<usize>,
    mitigation_cost_ratio: Option<f64>,
    min_confidence: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::io;
    use std::sync::{Mutex, OnceLock};

    use tempfile::TempDir;

    use super::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};
    use crate::domain::criteria::ScoringDimension;

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn env_lock() -> &'static Mutex<()> {
        ENV_LOCK.get_or_init(|| Mutex::new(()))
    }

    fn clear_vars(vars: &[&str]) {
        for var in vars {
            env::remove_var(var);
        }
    }

    fn ensure(condition: bool, message: &'static str) -> Result<(), String> {
        if condition {
            Ok(())
        } else {
            Err(message.to_string())
        }
    }

    #[test]
    fn defaults_are_valid_without_a_file() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        let config = AppConfig::load(LoadOptions {
            config_path: Some("/nonexistent/policyscope.toml".into()),
            ..LoadOptions::default()
        })
        .map_err(|err| format!("config load failed: {err}"))?;

        ensure(config.risk.context_window_chars == 50, "default window should be 50 chars")?;
        ensure(config.risk.mitigation_cost_ratio == 0.15, "default cost ratio should be 15%")?;
        ensure(
            config.scoring.default_weights.total() == 7.0,
            "default weights should be uniform",
        )?;
        ensure(matches!(config.logging.format, LogFormat::Compact), "default format is compact")
    }

    #[test]
    fn required_file_must_exist() -> Result<(), String> {
        let error = match AppConfig::load(LoadOptions {
            config_path: Some("/nonexistent/policyscope.toml".into()),
            require_file: true,
            ..LoadOptions::default()
        }) {
            Ok(_) => return Err("expected a missing file error".to_string()),
            Err(error) => error,
        };
        ensure(matches!(error, ConfigError::MissingConfigFile(_)), "missing file is reported")
    }

    #[test]
    fn file_load_supports_env_interpolation() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("TEST_POLICYSCOPE_PREMIUM_WEIGHT", "4.5");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = dir.path().join("policyscope.toml");
            fs::write(
                &path,
                r#"
[scoring.default_weights]
premium = ${TEST_POLICYSCOPE_PREMIUM_WEIGHT}
claims_process = 0.0
"#,
            )
            .map_err(|err| err.to_string())?;

            let (config, provenance) = AppConfig::load_with_provenance(LoadOptions {
                config_path: Some(path.clone()),
                ..LoadOptions::default()
            })
            .map_err(|err| format!("config load failed: {err}"))?;

            let weights = config.scoring.default_weights;
            ensure(
                weights.get(ScoringDimension::Premium) == 4.5,
                "premium weight should be interpolated from env",
            )?;
            ensure(weights.get(ScoringDimension::ClaimsProcess) == 0.0, "file weight applies")?;
            ensure(weights.get(ScoringDimension::Coverage) == 1.0, "unset weights keep default")?;
            ensure(provenance.file == Some(path), "provenance should name the file")?;
            Ok(())
        })();

        clear_vars(&["TEST_POLICYSCOPE_PREMIUM_WEIGHT"]);
        result
    }

    #[test]
    fn logging_env_aliases_are_supported() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("POLICYSCOPE_LOG_LEVEL", "warn");
        env::set_var("POLICYSCOPE_LOG_FORMAT", "pretty");

        let result = (|| -> Result<(), String> {
            let (config, provenance) = AppConfig::load_with_provenance(LoadOptions::default())
                .map_err(|err| format!("config load failed: {err}"))?;

            ensure(config.logging.level == "warn", "warning log level should be set from env var")?;
            ensure(
                matches!(config.logging.format, LogFormat::Pretty),
                "pretty logging format should be set from env var",
            )?;
            ensure(
                provenance.env_vars
                    == vec!["POLICYSCOPE_LOG_LEVEL".to_string(), "POLICYSCOPE_LOG_FORMAT".to_string()],
                "provenance should list the alias variables",
            )?;
            Ok(())
        })();

        clear_vars(&["POLICYSCOPE_LOG_LEVEL", "POLICYSCOPE_LOG_FORMAT"]);
        result
    }

    #[test]
    fn precedence_defaults_file_env_overrides() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("POLICYSCOPE_RISK_CONTEXT_WINDOW_CHARS", "80");
        env::set_var("POLICYSCOPE_RISK_MITIGATION_COST_RATIO", "0.2");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = dir.path().join("policyscope.toml");
            fs::write(
                &path,
                r#"
[risk]
context_window_chars = 120
mitigation_cost_ratio = 0.1
min_confidence = 0.25

[logging]
level = "warn"
"#,
            )
            .map_err(|err| err.to_string())?;

            let config = AppConfig::load(LoadOptions {
                config_path: Some(path),
                overrides: ConfigOverrides {
                    context_window_chars: Some(30),
                    log_level: Some("debug".to_string()),
                    ..ConfigOverrides::default()
                },
                ..LoadOptions::default()
            })
            .map_err(|err| format!("config load failed: {err}"))?;

            ensure(config.risk.context_window_chars == 30, "override window should win")?;
            ensure(config.logging.level == "debug", "overridden log level should be debug")?;
            ensure(config.risk.mitigation_cost_ratio == 0.2, "env ratio should win over file")?;
            ensure(config.risk.min_confidence == 0.25, "file value should win over defaults")?;
            Ok(())
        })();

        clear_vars(&[
            "POLICYSCOPE_RISK_CONTEXT_WINDOW_CHARS",
            "POLICYSCOPE_RISK_MITIGATION_COST_RATIO",
        ]);
        result
    }

    #[test]
    fn validation_fails_fast_with_actionable_error() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("POLICYSCOPE_RISK_MITIGATION_COST_RATIO", "0");

        let result = (|| -> Result<(), String> {
            let error = match AppConfig::load(LoadOptions::default()) {
                Ok(_) => {
                    return Err("expected validation failure but config load succeeded".to_string())
                }
                Err(error) => error,
            };
            let has_message = matches!(
                error,
                ConfigError::Validation(ref message) if message.contains("risk.mitigation_cost_ratio")
            );
            ensure(has_message, "validation failure should mention risk.mitigation_cost_ratio")
        })();

        clear_vars(&["POLICYSCOPE_RISK_MITIGATION_COST_RATIO"]);
        result
    }

    #[test]
    fn malformed_env_values_are_rejected() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("POLICYSCOPE_RISK_CONTEXT_WINDOW_CHARS", "wide");

        let result = match AppConfig::load(LoadOptions::default()) {
            Err(ConfigError::InvalidEnvOverride { key, .. }) => ensure(
                key == "POLICYSCOPE_RISK_CONTEXT_WINDOW_CHARS",
                "error should name the variable",
            ),
            _ => Err("expected an invalid env override error".to_string()),
        };

        clear_vars(&["POLICYSCOPE_RISK_CONTEXT_WINDOW_CHARS"]);
        result
    }

    #[test]
    fn negative_default_weight_is_rejected() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
        let path = dir.path().join("policyscope.toml");
        fs::write(&path, "[scoring.default_weights]\ncoverage = -1.0\n")
            .map_err(|err| err.to_string())?;

        let error = match AppConfig::load(LoadOptions { config_path: Some(path), ..LoadOptions::default() }) {
            Ok(_) => return Err("negative weight should fail validation".to_string()),
            Err(error) => error,
        };
        ensure(
            matches!(error, ConfigError::Validation(ref message) if message.contains("scoring.default_weights")),
            "validation failure should mention scoring.default_weights",
        )
    }
}
