use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ENV_CONFIG_PATH: &str = "SHOPMATE_CONFIG";
pub const ENV_DATABASE_URL: &str = "SHOPMATE_DATABASE_URL";
pub const ENV_LOG_LEVEL: &str = "SHOPMATE_LOG_LEVEL";
pub const ENV_LOG_FORMAT: &str = "SHOPMATE_LOG_FORMAT";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub chat: ChatConfig,
    pub recommendation: RecommendationDefaults,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub timeout_secs: u64,
}

/// Conversation pacing and the catalog retry policy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatConfig {
    pub typing_delay_ms: u64,
    pub offer_gap_ms: u64,
    pub payment_delay_ms: u64,
    pub catalog_retry_max: u32,
    pub catalog_retry_backoff_ms: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecommendationDefaults {
    pub discount_percent: u8,
    pub gold_discount_percent: u8,
    pub expires_in_minutes: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
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

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    #[serde(default)]
    database: RawDatabase,
    #[serde(default)]
    chat: RawChat,
    #[serde(default)]
    recommendation: RawRecommendation,
    #[serde(default)]
    logging: RawLogging,
}

#[derive(Debug, Default, Deserialize)]
struct RawDatabase {
    url: Option<String>,
    max_connections: Option<u32>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct RawChat {
    typing_delay_ms: Option<u64>,
    offer_gap_ms: Option<u64>,
    payment_delay_ms: Option<u64>,
    catalog_retry_max: Option<u32>,
    catalog_retry_backoff_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct RawRecommendation {
    discount_percent: Option<u8>,
    gold_discount_percent: Option<u8>,
    expires_in_minutes: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
struct RawLogging {
    level: Option<String>,
    format: Option<LogFormat>,
}

impl AppConfig {
    /// Load with defaults, then the TOML file (if present), then environment
    /// overrides, then validate.
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let path = options
            .config_path
            .or_else(|| env::var(ENV_CONFIG_PATH).ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("config/shopmate.toml"));

        let raw = if path.exists() {
            read_raw(&path)?
        } else if options.require_file {
            return Err(ConfigError::MissingConfigFile(path));
        } else {
            RawConfig::default()
        };

        let mut config = Self::from_raw(raw);
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    fn from_raw(raw: RawConfig) -> Self {
        Self {
            database: DatabaseConfig {
                url: raw
                    .database
                    .url
                    .unwrap_or_else(|| "sqlite://shopmate.db?mode=rwc".to_owned()),
                max_connections: raw.database.max_connections.unwrap_or(5),
                timeout_secs: raw.database.timeout_secs.unwrap_or(30),
            },
            chat: ChatConfig {
                typing_delay_ms: raw.chat.typing_delay_ms.unwrap_or(1500),
                offer_gap_ms: raw.chat.offer_gap_ms.unwrap_or(3000),
                payment_delay_ms: raw.chat.payment_delay_ms.unwrap_or(2000),
                catalog_retry_max: raw.chat.catalog_retry_max.unwrap_or(10),
                catalog_retry_backoff_ms: raw.chat.catalog_retry_backoff_ms.unwrap_or(1000),
            },
            recommendation: RecommendationDefaults {
                discount_percent: raw.recommendation.discount_percent.unwrap_or(20),
                gold_discount_percent: raw.recommendation.gold_discount_percent.unwrap_or(30),
                expires_in_minutes: raw.recommendation.expires_in_minutes.unwrap_or(120),
            },
            logging: LoggingConfig {
                level: raw.logging.level.unwrap_or_else(|| "info".to_owned()),
                format: raw.logging.format.unwrap_or(LogFormat::Compact),
            },
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(url) = env::var(ENV_DATABASE_URL) {
            if url.trim().is_empty() {
                return Err(ConfigError::InvalidEnvOverride {
                    key: ENV_DATABASE_URL.to_owned(),
                    value: url,
                });
            }
            self.database.url = url;
        }
        if let Ok(level) = env::var(ENV_LOG_LEVEL) {
            self.logging.level = level;
        }
        if let Ok(format) = env::var(ENV_LOG_FORMAT) {
            self.logging.format = match format.as_str() {
                "compact" => LogFormat::Compact,
                "pretty" => LogFormat::Pretty,
                "json" => LogFormat::Json,
                _ => {
                    return Err(ConfigError::InvalidEnvOverride {
                        key: ENV_LOG_FORMAT.to_owned(),
                        value: format,
                    });
                }
            };
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.recommendation.discount_percent > 100
            || self.recommendation.gold_discount_percent > 100
        {
            return Err(ConfigError::Validation(
                "recommendation discount percent must be at most 100".to_owned(),
            ));
        }
        if self.recommendation.expires_in_minutes == 0 {
            return Err(ConfigError::Validation(
                "recommendation expiry must be at least one minute".to_owned(),
            ));
        }
        if self.chat.catalog_retry_max == 0 {
            return Err(ConfigError::Validation(
                "catalog retry cap must be at least one attempt".to_owned(),
            ));
        }
        Ok(())
    }
}

fn read_raw(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;
    toml::from_str(&contents)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ConfigError, LoadOptions, LogFormat, RawConfig};

    #[test]
    fn defaults_apply_without_a_file() {
        let config = AppConfig::from_raw(RawConfig::default());
        assert_eq!(config.chat.catalog_retry_max, 10);
        assert_eq!(config.chat.catalog_retry_backoff_ms, 1000);
        assert_eq!(config.recommendation.discount_percent, 20);
        assert_eq!(config.logging.format, LogFormat::Compact);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn toml_values_override_defaults() {
        let raw: RawConfig = toml::from_str(
            r#"
            [chat]
            typing_delay_ms = 200
            catalog_retry_max = 3

            [recommendation]
            discount_percent = 25
            "#,
        )
        .expect("parse raw config");
        let config = AppConfig::from_raw(raw);
        assert_eq!(config.chat.typing_delay_ms, 200);
        assert_eq!(config.chat.catalog_retry_max, 3);
        assert_eq!(config.recommendation.discount_percent, 25);
        // Untouched sections keep their defaults.
        assert_eq!(config.chat.payment_delay_ms, 2000);
    }

    #[test]
    fn out_of_range_discount_is_rejected() {
        let raw: RawConfig = toml::from_str(
            r#"
            [recommendation]
            discount_percent = 150
            "#,
        )
        .expect("parse raw config");
        let error = AppConfig::from_raw(raw).validate().expect_err("must reject");
        assert!(matches!(error, ConfigError::Validation(_)));
    }

    #[test]
    fn missing_required_file_errors() {
        let error = AppConfig::load(LoadOptions {
            config_path: Some("does/not/exist.toml".into()),
            require_file: true,
        })
        .expect_err("must report the missing file");
        assert!(matches!(error, ConfigError::MissingConfigFile(_)));
    }
}
