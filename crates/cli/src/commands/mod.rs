pub mod classes;
pub mod config;
pub mod destinations;
pub mod quote;
pub mod replay;

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::runtime::Runtime;
use wayfare_core::catalog::{CatalogSource, CatalogStatus, FlightCatalog, JsonFileCatalogSource};
use wayfare_core::config::{AppConfig, CatalogLocation, LoadOptions};
use wayfare_core::errors::ApplicationError;
use wayfare_core::CatalogError;

use crate::http_source::HttpCatalogSource;

pub const EXIT_CONFIG: u8 = 2;
pub const EXIT_CATALOG: u8 = 3;
pub const EXIT_INPUT: u8 = 4;
pub const EXIT_REJECTED: u8 = 5;

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
    data: Option<Value>,
}

impl CommandResult {
    pub fn success(command: &str, message: impl Into<String>) -> Self {
        Self::success_with(command, message, Value::Null)
    }

    pub fn success_with(command: &str, message: impl Into<String>, data: impl Serialize) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            data: to_data(data),
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        Self::failure_with(command, error_class, message, exit_code, Value::Null)
    }

    pub fn failure_with(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
        data: impl Serialize,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
            data: to_data(data),
        };
        Self { exit_code, output: serialize_payload(payload) }
    }

    /// Renders an application failure through its user-facing interface error.
    pub fn from_application(command: &str, error: ApplicationError, exit_code: u8) -> Self {
        let error_class = match &error {
            ApplicationError::Domain(_) => "bad_request",
            ApplicationError::Catalog(_) => "catalog_unavailable",
            ApplicationError::Configuration(_) => "config_validation",
        };
        let interface = error.into_interface(format!("cli-{command}"));
        Self::failure_with(
            command,
            error_class,
            interface.user_message(),
            exit_code,
            serde_json::json!({
                "detail": interface.to_string(),
                "correlation_id": interface.correlation_id(),
            }),
        )
    }
}

fn to_data(data: impl Serialize) -> Option<Value> {
    match serde_json::to_value(data) {
        Ok(Value::Null) | Err(_) => None,
        Ok(value) => Some(value),
    }
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

pub(crate) fn load_config(command: &str) -> Result<AppConfig, CommandResult> {
    AppConfig::load(LoadOptions::default()).map_err(|error| {
        CommandResult::from_application(
            command,
            ApplicationError::Configuration(error.to_string()),
            EXIT_CONFIG,
        )
    })
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("could not read `{}`", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("could not parse `{}`", path.display()))
}

/// Fetches the configured feed, failing when it cannot be loaded.
pub(crate) fn fetch_catalog(config: &AppConfig) -> Result<FlightCatalog, CatalogError> {
    let source = build_source(config)?;
    catalog_runtime()?.block_on(FlightCatalog::fetch(source.as_ref()))
}

/// Fetches the session's catalog snapshot. Failures degrade to an empty catalog.
pub(crate) fn load_catalog(config: &AppConfig) -> (FlightCatalog, CatalogStatus) {
    let prepared = build_source(config)
        .and_then(|source| catalog_runtime().map(|runtime| (source, runtime)));
    match prepared {
        Ok((source, runtime)) => runtime.block_on(FlightCatalog::load(source.as_ref())),
        Err(error) => FlightCatalog::degraded("configured feed", &error),
    }
}

pub(crate) fn catalog_failure(command: &str, error: CatalogError) -> CommandResult {
    CommandResult::from_application(command, ApplicationError::from(error), EXIT_CATALOG)
}

fn catalog_runtime() -> Result<Runtime, CatalogError> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| CatalogError::Transport(format!("failed to initialize runtime: {error}")))
}

fn build_source(config: &AppConfig) -> Result<Box<dyn CatalogSource>, CatalogError> {
    match config.catalog.location() {
        Some(CatalogLocation::Url(url)) => Ok(Box::new(HttpCatalogSource::new(
            url,
            Duration::from_secs(config.catalog.timeout_secs),
            config.catalog.api_token.clone(),
        )?)),
        Some(CatalogLocation::Path(path)) => Ok(Box::new(JsonFileCatalogSource::new(path))),
        None => Err(CatalogError::Transport("no catalog source configured".to_string())),
    }
}
