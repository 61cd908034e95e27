pub mod assess;
pub mod compare;
pub mod config;

use std::fs;
use std::path::Path;

use anyhow::Context;
use policyscope_core::config::{AppConfig, LoadOptions};
use policyscope_core::errors::ApplicationError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

pub const EXIT_CONFIG: u8 = 2;
pub const EXIT_INPUT: u8 = 3;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    payload: Option<Value>,
}

impl CommandResult {
    pub fn success_with(
        command: &str,
        message: impl Into<String>,
        payload: Option<Value>,
    ) -> Self {
        let outcome = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            payload,
        };
        Self { exit_code: 0, output: serialize_outcome(outcome) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let outcome = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
            payload: None,
        };
        Self { exit_code, output: serialize_outcome(outcome) }
    }

    pub fn from_error(command: &str, error: &ApplicationError) -> Self {
        let exit_code = match error {
            ApplicationError::Configuration(_) => EXIT_CONFIG,
            ApplicationError::Domain(_) | ApplicationError::Input(_) => EXIT_INPUT,
        };
        Self::failure(command, error.error_class(), error.to_string(), exit_code)
    }
}

pub(crate) fn load_config(options: &LoadOptions) -> Result<AppConfig, ApplicationError> {
    AppConfig::load(options.clone())
        .map_err(|error| ApplicationError::Configuration(format!("configuration issue: {error}")))
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T, ApplicationError> {
    let parsed = fs::read_to_string(path)
        .with_context(|| format!("could not read {what} file `{}`", path.display()))
        .and_then(|raw| {
            serde_json::from_str::<T>(&raw)
                .with_context(|| format!("could not parse {what} file `{}`", path.display()))
        });
    parsed.map_err(|error| ApplicationError::Input(format!("{error:#}")))
}

pub(crate) fn to_payload(value: &impl Serialize) -> Result<Value, ApplicationError> {
    serde_json::to_value(value)
        .map_err(|error| ApplicationError::Input(format!("could not serialize output: {error}")))
}

fn serialize_outcome(outcome: CommandOutcome) -> String {
    serde_json::to_string(&outcome).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}
