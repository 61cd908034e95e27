use std::env;
use std::fs;
use std::path::Path;

use policyscope_core::config::{AppConfig, ConfigProvenance, LoadOptions};
use policyscope_core::domain::criteria::ScoringDimension;
use serde::Serialize;
use toml::Value;

use crate::commands::CommandResult;

const COMMAND: &str = "config";

#[derive(Debug, Serialize)]
struct ConfigField {
    key: String,
    value: String,
    source: String,
}

pub fn run(options: &LoadOptions) -> CommandResult {
    let (config, provenance) = match AppConfig::load_with_provenance(options.clone()) {
        Ok(loaded) => loaded,
        Err(error) => {
            return CommandResult::failure(
                COMMAND,
                "config_validation",
                format!("config validation failed: {error}"),
                2,
            );
        }
    };

    let fields = effective_fields(&config, &provenance);
    let payload = serde_json::json!({
        "file": provenance.file.as_ref().map(|path| path.display().to_string()),
        "fields": fields,
    });
    CommandResult::success_with(
        COMMAND,
        "effective config (source precedence: override > env > file > default)",
        Some(payload),
    )
}

fn effective_fields(config: &AppConfig, provenance: &ConfigProvenance) -> Vec<ConfigField> {
    let file_doc = load_config_file_doc(provenance.file.as_deref());
    let resolver = SourceResolver { provenance, file_doc: file_doc.as_ref() };

    let mut fields: Vec<ConfigField> = ScoringDimension::ALL
        .into_iter()
        .map(|dimension| {
            let key = format!("scoring.default_weights.{}", weight_key(dimension));
            ConfigField {
                value: config.scoring.default_weights.get(dimension).to_string(),
                source: resolver.source(&key, &[]),
                key,
            }
        })
        .collect();

    fields.push(resolver.field(
        "risk.context_window_chars",
        config.risk.context_window_chars.to_string(),
        &["POLICYSCOPE_RISK_CONTEXT_WINDOW_CHARS"],
    ));
    fields.push(resolver.field(
        "risk.mitigation_cost_ratio",
        config.risk.mitigation_cost_ratio.to_string(),
        &["POLICYSCOPE_RISK_MITIGATION_COST_RATIO"],
    ));
    fields.push(resolver.field(
        "risk.min_confidence",
        config.risk.min_confidence.to_string(),
        &["POLICYSCOPE_RISK_MIN_CONFIDENCE"],
    ));
    fields.push(resolver.field(
        "logging.level",
        config.logging.level.clone(),
        &["POLICYSCOPE_LOGGING_LEVEL", "POLICYSCOPE_LOG_LEVEL"],
    ));
    fields.push(resolver.field(
        "logging.format",
        format!("{:?}", config.logging.format).to_lowercase(),
        &["POLICYSCOPE_LOGGING_FORMAT", "POLICYSCOPE_LOG_FORMAT"],
    ));
    fields
}

struct SourceResolver<'a> {
    provenance: &'a ConfigProvenance,
    file_doc: Option<&'a Value>,
}

impl SourceResolver<'_> {
    fn field(&self, key: &str, value: String, env_keys: &[&str]) -> ConfigField {
        ConfigField { key: key.to_string(), value, source: self.source(key, env_keys) }
    }

    fn source(&self, key_path: &str, env_keys: &[&str]) -> String {
        if self.provenance.overrides.iter().any(|key| key == key_path) {
            return "override".to_string();
        }

        if let Some(env_key) = env_keys.iter().find(|env_key| {
            env::var(env_key).map(|value| !value.trim().is_empty()).unwrap_or(false)
        }) {
            return format!("env ({env_key})");
        }

        if let Some(doc) = self.file_doc {
            if contains_path(doc, key_path) {
                let file_path = self
                    .provenance
                    .file
                    .as_ref()
                    .map(|path| path.display().to_string())
                    .unwrap_or_else(|| "config file".to_string());
                return format!("file ({file_path})");
            }
        }

        "default".to_string()
    }
}

fn weight_key(dimension: ScoringDimension) -> &'static str {
    match dimension {
        ScoringDimension::Premium => "premium",
        ScoringDimension::Coverage => "coverage",
        ScoringDimension::Deductible => "deductible",
        ScoringDimension::Exclusions => "exclusions",
        ScoringDimension::InsurerRating => "insurer_rating",
        ScoringDimension::ClaimsProcess => "claims_process",
        ScoringDimension::CustomerService => "customer_service",
    }
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}
