use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pricing::{
    PriceSchedule, DEFAULT_INSURANCE_PRICE, DEFAULT_PREFERENTIAL_SEATS_PRICE, LUGGAGE_PRICE,
    PET_PRICE,
};

pub const DEFAULT_CATALOG_PATH: &str = "data/flights.json";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub catalog: CatalogConfig,
    pub pricing: PricingConfig,
    pub logging: LoggingConfig,
}

/// Where the flight feed comes from. A URL wins over a path when both are set.
#[derive(Clone, Debug)]
pub struct CatalogConfig {
    pub url: Option<String>,
    pub path: Option<PathBuf>,
    pub timeout_secs: u64,
    pub api_token: Option<SecretString>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PricingConfig {
    pub pet_price: Decimal,
    pub luggage_price: Decimal,
    pub insurance_price: Decimal,
    pub preferential_seats_price: Decimal,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogLocation<'a> {
    Url(&'a str),
    Path(&'a Path),
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub catalog_url: Option<String>,
    pub catalog_path: Option<PathBuf>,
    pub insurance_price: Option<Decimal>,
    pub preferential_seats_price: Option<Decimal>,
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
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

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig {
                url: None,
                path: Some(PathBuf::from(DEFAULT_CATALOG_PATH)),
                timeout_secs: 10,
                api_token: None,
            },
            pricing: PricingConfig::default(),
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            pet_price: Decimal::from(PET_PRICE),
            luggage_price: Decimal::from(LUGGAGE_PRICE),
            insurance_price: Decimal::from(DEFAULT_INSURANCE_PRICE),
            preferential_seats_price: Decimal::from(DEFAULT_PREFERENTIAL_SEATS_PRICE),
        }
    }
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

impl CatalogConfig {
    pub fn location(&self) -> Option<CatalogLocation<'_>> {
        if let Some(url) = self.url.as_deref().filter(|url| !url.trim().is_empty()) {
            return Some(CatalogLocation::Url(url));
        }
        self.path
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
            .map(CatalogLocation::Path)
    }

    pub fn bearer_token(&self) -> Option<&str> {
        self.api_token
            .as_ref()
            .map(|token| token.expose_secret())
            .filter(|token| !token.trim().is_empty())
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("wayfare.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn price_schedule(&self) -> PriceSchedule {
        PriceSchedule {
            pet: self.pricing.pet_price,
            luggage: self.pricing.luggage_price,
            insurance: self.pricing.insurance_price,
            preferential_seats: self.pricing.preferential_seats_price,
        }
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(catalog) = patch.catalog {
            if let Some(url) = catalog.url {
                self.catalog.url = Some(url);
            }
            if let Some(path) = catalog.path {
                self.catalog.path = Some(path);
            }
            if let Some(timeout_secs) = catalog.timeout_secs {
                self.catalog.timeout_secs = timeout_secs;
            }
            if let Some(api_token) = catalog.api_token {
                self.catalog.api_token = Some(SecretString::from(api_token));
            }
        }

        if let Some(pricing) = patch.pricing {
            if let Some(pet_price) = pricing.pet_price {
                self.pricing.pet_price = pet_price;
            }
            if let Some(luggage_price) = pricing.luggage_price {
                self.pricing.luggage_price = luggage_price;
            }
            if let Some(insurance_price) = pricing.insurance_price {
                self.pricing.insurance_price = insurance_price;
            }
            if let Some(preferential_seats_price) = pricing.preferential_seats_price {
                self.pricing.preferential_seats_price = preferential_seats_price;
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

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("WAYFARE_CATALOG_URL") {
            self.catalog.url = Some(value);
        }
        if let Some(value) = read_env("WAYFARE_CATALOG_PATH") {
            self.catalog.path = Some(PathBuf::from(value));
        }
        if let Some(value) = read_env("WAYFARE_CATALOG_TIMEOUT_SECS") {
            self.catalog.timeout_secs = parse_u64("WAYFARE_CATALOG_TIMEOUT_SECS", &value)?;
        }
        if let Some(value) = read_env("WAYFARE_CATALOG_API_TOKEN") {
            self.catalog.api_token = Some(SecretString::from(value));
        }

        if let Some(value) = read_env("WAYFARE_PRICING_PET_PRICE") {
            self.pricing.pet_price = parse_decimal("WAYFARE_PRICING_PET_PRICE", &value)?;
        }
        if let Some(value) = read_env("WAYFARE_PRICING_LUGGAGE_PRICE") {
            self.pricing.luggage_price = parse_decimal("WAYFARE_PRICING_LUGGAGE_PRICE", &value)?;
        }
        if let Some(value) = read_env("WAYFARE_PRICING_INSURANCE_PRICE") {
            self.pricing.insurance_price =
                parse_decimal("WAYFARE_PRICING_INSURANCE_PRICE", &value)?;
        }
        if let Some(value) = read_env("WAYFARE_PRICING_PREFERENTIAL_SEATS_PRICE") {
            self.pricing.preferential_seats_price =
                parse_decimal("WAYFARE_PRICING_PREFERENTIAL_SEATS_PRICE", &value)?;
        }

        let log_level = read_env("WAYFARE_LOGGING_LEVEL").or_else(|| read_env("WAYFARE_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("WAYFARE_LOGGING_FORMAT").or_else(|| read_env("WAYFARE_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(catalog_url) = overrides.catalog_url {
            self.catalog.url = Some(catalog_url);
        }
        if let Some(catalog_path) = overrides.catalog_path {
            self.catalog.path = Some(catalog_path);
        }
        if let Some(insurance_price) = overrides.insurance_price {
            self.pricing.insurance_price = insurance_price;
        }
        if let Some(preferential_seats_price) = overrides.preferential_seats_price {
            self.pricing.preferential_seats_price = preferential_seats_price;
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(log_format) = overrides.log_format {
            self.logging.format = log_format;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_catalog(&self.catalog)?;
        validate_pricing(&self.pricing)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("wayfare.toml"), PathBuf::from("config/wayfare.toml")]
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
        if ch != '$' || !matches!(chars.peek(), Some('{')) {
            output.push(ch);
            continue;
        }

        chars.next();
        let mut key = String::new();
        loop {
            match chars.next() {
                Some('}') => break,
                Some(next) => key.push(next),
                None => return Err(ConfigError::UnterminatedInterpolation),
            }
        }

        let value =
            env::var(&key).map_err(|_| ConfigError::MissingEnvInterpolation { var: key })?;
        output.push_str(&value);
    }

    Ok(output)
}

fn validate_catalog(catalog: &CatalogConfig) -> Result<(), ConfigError> {
    match catalog.location() {
        None => {
            return Err(ConfigError::Validation(
                "catalog requires either catalog.url or catalog.path".to_string(),
            ))
        }
        Some(CatalogLocation::Url(url)) => {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::Validation(
                    "catalog.url must start with http:// or https://".to_string(),
                ));
            }
        }
        Some(CatalogLocation::Path(_)) => {}
    }

    if catalog.timeout_secs == 0 || catalog.timeout_secs > 300 {
        return Err(ConfigError::Validation(
            "catalog.timeout_secs must be in range 1..=300".to_string(),
        ));
    }

    Ok(())
}

fn validate_pricing(pricing: &PricingConfig) -> Result<(), ConfigError> {
    let prices = [
        ("pricing.pet_price", pricing.pet_price),
        ("pricing.luggage_price", pricing.luggage_price),
        ("pricing.insurance_price", pricing.insurance_price),
        ("pricing.preferential_seats_price", pricing.preferential_seats_price),
    ];

    match prices.iter().find(|(_, price)| *price < Decimal::ZERO) {
        Some((key, price)) => {
            Err(ConfigError::Validation(format!("{key} must not be negative, got {price}")))
        }
        None => Ok(()),
    }
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

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse::<u64>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_decimal(key: &str, value: &str) -> Result<Decimal, ConfigError> {
    value.trim().parse::<Decimal>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    catalog: Option<CatalogPatch>,
    pricing: Option<PricingPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct CatalogPatch {
    url: Option<String>,
    path: Option<PathBuf>,
    timeout_secs: Option<u64>,
    api_token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct PricingPatch {
    pet_price: Option<Decimal>,
    luggage_price: Option<Decimal>,
    insurance_price: Option<Decimal>,
    preferential_seats_price: Option<Decimal>,
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
    use std::path::{Path, PathBuf};
    use std::sync::{Mutex, OnceLock};

    use rust_decimal::Decimal;
    use secrecy::ExposeSecret;
    use tempfile::TempDir;

    use super::{AppConfig, CatalogLocation, ConfigError, ConfigOverrides, LoadOptions, LogFormat};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    const WAYFARE_VARS: &[&str] = &[
        "WAYFARE_CATALOG_URL",
        "WAYFARE_CATALOG_PATH",
        "WAYFARE_CATALOG_TIMEOUT_SECS",
        "WAYFARE_CATALOG_API_TOKEN",
        "WAYFARE_PRICING_PET_PRICE",
        "WAYFARE_PRICING_LUGGAGE_PRICE",
        "WAYFARE_PRICING_INSURANCE_PRICE",
        "WAYFARE_PRICING_PREFERENTIAL_SEATS_PRICE",
        "WAYFARE_LOGGING_LEVEL",
        "WAYFARE_LOG_LEVEL",
        "WAYFARE_LOGGING_FORMAT",
        "WAYFARE_LOG_FORMAT",
    ];

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

    fn write_config(dir: &TempDir, body: &str) -> Result<PathBuf, String> {
        let path = dir.path().join("wayfare.toml");
        fs::write(&path, body).map_err(|err| err.to_string())?;
        Ok(path)
    }

    #[test]
    fn defaults_point_at_bundled_feed_with_fixed_add_on_prices() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        clear_vars(WAYFARE_VARS);

        let config = AppConfig::load(LoadOptions::default())
            .map_err(|err| format!("config load failed: {err}"))?;
        let schedule = config.price_schedule();

        ensure(
            config.catalog.location() == Some(CatalogLocation::Path(Path::new("data/flights.json"))),
            "default catalog should be the bundled json feed",
        )?;
        ensure(schedule.pet == Decimal::new(100, 0), "pet price should default to 100")?;
        ensure(schedule.luggage == Decimal::new(50, 0), "luggage price should default to 50")?;
        ensure(
            matches!(config.logging.format, LogFormat::Compact),
            "default logging format should be compact",
        )
    }

    #[test]
    fn file_load_supports_env_interpolation() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        clear_vars(WAYFARE_VARS);
        env::set_var("TEST_WAYFARE_FEED_TOKEN", "feed-token-from-env");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = write_config(
                &dir,
                r#"
[catalog]
url = "https://feeds.example.test/flights.json"
api_token = "${TEST_WAYFARE_FEED_TOKEN}"
"#,
            )?;

            let config =
                AppConfig::load(LoadOptions { config_path: Some(path), ..LoadOptions::default() })
                    .map_err(|err| format!("config load failed: {err}"))?;

            ensure(
                config.catalog.bearer_token() == Some("feed-token-from-env"),
                "api token should be interpolated from environment",
            )?;
            ensure(
                matches!(config.catalog.location(), Some(CatalogLocation::Url(_))),
                "url should win over the default path",
            )
        })();

        clear_vars(&["TEST_WAYFARE_FEED_TOKEN"]);
        result
    }

    #[test]
    fn missing_interpolation_variable_is_reported() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        clear_vars(WAYFARE_VARS);
        clear_vars(&["TEST_WAYFARE_UNSET"]);

        let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
        let path = write_config(&dir, "[catalog]\napi_token = \"${TEST_WAYFARE_UNSET}\"\n")?;

        let error =
            match AppConfig::load(LoadOptions { config_path: Some(path), ..LoadOptions::default() })
            {
                Ok(_) => return Err("expected interpolation failure".to_string()),
                Err(error) => error,
            };
        ensure(
            matches!(error, ConfigError::MissingEnvInterpolation { ref var } if var == "TEST_WAYFARE_UNSET"),
            "error should name the missing variable",
        )
    }

    #[test]
    fn precedence_defaults_file_env_overrides() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        clear_vars(WAYFARE_VARS);
        env::set_var("WAYFARE_PRICING_INSURANCE_PRICE", "45.50");
        env::set_var("WAYFARE_LOG_LEVEL", "warn");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = write_config(
                &dir,
                r#"
[catalog]
path = "from-file.json"
timeout_secs = 20

[pricing]
insurance_price = "30"
preferential_seats_price = "20"

[logging]
level = "error"
format = "json"
"#,
            )?;

            let config = AppConfig::load(LoadOptions {
                config_path: Some(path),
                overrides: ConfigOverrides {
                    preferential_seats_price: Some(Decimal::new(15, 0)),
                    catalog_path: Some(PathBuf::from("from-override.json")),
                    ..ConfigOverrides::default()
                },
                ..LoadOptions::default()
            })
            .map_err(|err| format!("config load failed: {err}"))?;

            ensure(
                config.pricing.insurance_price == Decimal::new(4550, 2),
                "env insurance price should win over file",
            )?;
            ensure(
                config.pricing.preferential_seats_price == Decimal::new(15, 0),
                "override seat price should win over file",
            )?;
            ensure(config.logging.level == "warn", "env log level should win over file")?;
            ensure(matches!(config.logging.format, LogFormat::Json), "file format should apply")?;
            ensure(config.catalog.timeout_secs == 20, "file timeout should apply")?;
            ensure(
                config.catalog.path.as_deref() == Some(Path::new("from-override.json")),
                "override catalog path should win",
            )
        })();

        clear_vars(WAYFARE_VARS);
        result
    }

    #[test]
    fn validation_rejects_negative_prices() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        clear_vars(WAYFARE_VARS);

        let error = match AppConfig::load(LoadOptions {
            overrides: ConfigOverrides {
                insurance_price: Some(Decimal::new(-1, 0)),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        }) {
            Ok(_) => return Err("expected validation failure but config load succeeded".to_string()),
            Err(error) => error,
        };
        ensure(
            matches!(error, ConfigError::Validation(ref message) if message.contains("pricing.insurance_price")),
            "validation failure should mention pricing.insurance_price",
        )
    }

    #[test]
    fn validation_rejects_out_of_range_timeout_and_bad_urls() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        clear_vars(WAYFARE_VARS);

        env::set_var("WAYFARE_CATALOG_TIMEOUT_SECS", "0");
        let timeout = AppConfig::load(LoadOptions::default());
        clear_vars(WAYFARE_VARS);

        env::set_var("WAYFARE_CATALOG_URL", "ftp://feeds.example.test");
        let url = AppConfig::load(LoadOptions::default());
        clear_vars(WAYFARE_VARS);

        ensure(
            matches!(timeout, Err(ConfigError::Validation(ref message)) if message.contains("timeout_secs")),
            "zero timeout should be rejected",
        )?;
        ensure(
            matches!(url, Err(ConfigError::Validation(ref message)) if message.contains("catalog.url")),
            "non-http catalog url should be rejected",
        )
    }

    #[test]
    fn invalid_numeric_env_override_names_the_key() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        clear_vars(WAYFARE_VARS);
        env::set_var("WAYFARE_PRICING_PET_PRICE", "lots");

        let result = AppConfig::load(LoadOptions::default());
        clear_vars(WAYFARE_VARS);

        ensure(
            matches!(result, Err(ConfigError::InvalidEnvOverride { ref key, .. }) if key == "WAYFARE_PRICING_PET_PRICE"),
            "invalid override should name the env var",
        )
    }

    #[test]
    fn unknown_log_level_is_rejected() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        clear_vars(WAYFARE_VARS);

        let result = AppConfig::load(LoadOptions {
            overrides: ConfigOverrides {
                log_level: Some("verbose".to_string()),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        });
        ensure(
            matches!(result, Err(ConfigError::Validation(ref message)) if message.contains("logging.level")),
            "unknown log level should be rejected",
        )
    }

    #[test]
    fn required_file_must_exist() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        clear_vars(WAYFARE_VARS);

        let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
        let missing = dir.path().join("absent.toml");
        let result = AppConfig::load(LoadOptions {
            config_path: Some(missing.clone()),
            require_file: true,
            ..LoadOptions::default()
        });
        ensure(
            matches!(result, Err(ConfigError::MissingConfigFile(ref path)) if path == &missing),
            "missing required file should be reported",
        )
    }

    #[test]
    fn api_token_is_not_leaked_by_debug() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        clear_vars(WAYFARE_VARS);
        env::set_var("WAYFARE_CATALOG_API_TOKEN", "feed-secret-value");

        let result = (|| -> Result<(), String> {
            let config = AppConfig::load(LoadOptions::default())
                .map_err(|err| format!("config load failed: {err}"))?;
            let debug = format!("{config:?}");

            ensure(!debug.contains("feed-secret-value"), "debug output should not contain token")?;
            ensure(
                config.catalog.api_token.as_ref().map(|token| token.expose_secret())
                    == Some("feed-secret-value"),
                "token should still be readable through expose_secret",
            )
        })();

        clear_vars(WAYFARE_VARS);
        result
    }
}
