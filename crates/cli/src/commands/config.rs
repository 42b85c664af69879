use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use toml::Value;
use wayfare_core::config::AppConfig;

use crate::commands::{load_config, CommandResult};

#[derive(Debug, Serialize)]
struct ConfigEntry {
    key: &'static str,
    value: String,
    source: String,
}

struct FieldSpec {
    key: &'static str,
    env_keys: &'static [&'static str],
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec { key: "catalog.url", env_keys: &["WAYFARE_CATALOG_URL"] },
    FieldSpec { key: "catalog.path", env_keys: &["WAYFARE_CATALOG_PATH"] },
    FieldSpec { key: "catalog.timeout_secs", env_keys: &["WAYFARE_CATALOG_TIMEOUT_SECS"] },
    FieldSpec { key: "catalog.api_token", env_keys: &["WAYFARE_CATALOG_API_TOKEN"] },
    FieldSpec { key: "pricing.pet_price", env_keys: &["WAYFARE_PRICING_PET_PRICE"] },
    FieldSpec { key: "pricing.luggage_price", env_keys: &["WAYFARE_PRICING_LUGGAGE_PRICE"] },
    FieldSpec { key: "pricing.insurance_price", env_keys: &["WAYFARE_PRICING_INSURANCE_PRICE"] },
    FieldSpec {
        key: "pricing.preferential_seats_price",
        env_keys: &["WAYFARE_PRICING_PREFERENTIAL_SEATS_PRICE"],
    },
    FieldSpec { key: "logging.level", env_keys: &["WAYFARE_LOGGING_LEVEL", "WAYFARE_LOG_LEVEL"] },
    FieldSpec {
        key: "logging.format",
        env_keys: &["WAYFARE_LOGGING_FORMAT", "WAYFARE_LOG_FORMAT"],
    },
];

pub fn run() -> CommandResult {
    let config = match load_config("config") {
        Ok(config) => config,
        Err(result) => return result,
    };

    let config_file_path = detect_config_path();
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());

    let entries: Vec<ConfigEntry> = FIELDS
        .iter()
        .map(|field| ConfigEntry {
            key: field.key,
            value: render_value(&config, field.key),
            source: field_source(
                field.key,
                field.env_keys,
                config_file_doc.as_ref(),
                config_file_path.as_deref(),
            ),
        })
        .collect();

    let mut lines =
        vec!["effective config (source precedence: env > file > default):".to_string()];
    lines.extend(entries.iter().map(render_line));

    CommandResult::success_with("config", lines.join("\n"), entries)
}

fn render_value(config: &AppConfig, key: &str) -> String {
    match key {
        "catalog.url" => config.catalog.url.clone().unwrap_or_else(|| "<unset>".to_string()),
        "catalog.path" => config
            .catalog
            .path
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "<unset>".to_string()),
        "catalog.timeout_secs" => config.catalog.timeout_secs.to_string(),
        "catalog.api_token" => redact_token(config.catalog.bearer_token()),
        "pricing.pet_price" => config.pricing.pet_price.to_string(),
        "pricing.luggage_price" => config.pricing.luggage_price.to_string(),
        "pricing.insurance_price" => config.pricing.insurance_price.to_string(),
        "pricing.preferential_seats_price" => config.pricing.preferential_seats_price.to_string(),
        "logging.level" => config.logging.level.clone(),
        "logging.format" => format!("{:?}", config.logging.format).to_ascii_lowercase(),
        _ => "<unknown>".to_string(),
    }
}

fn detect_config_path() -> Option<PathBuf> {
    [PathBuf::from("wayfare.toml"), PathBuf::from("config/wayfare.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_keys.iter().find(|key| env::var_os(key).is_some()) {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
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

fn render_line(entry: &ConfigEntry) -> String {
    format!("- {} = {} (source: {})", entry.key, entry.value, entry.source)
}

fn redact_token(token: Option<&str>) -> String {
    match token.map(str::trim) {
        None | Some("") => "<unset>".to_string(),
        Some(token) if token.chars().count() > 4 => {
            format!("{}***", token.chars().take(4).collect::<String>())
        }
        Some(_) => "<redacted>".to_string(),
    }
}
