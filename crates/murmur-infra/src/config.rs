//! Configuration loader for Murmur.
//!
//! Reads `murmur.toml` and deserializes it into [`AppConfig`]. Falls back to
//! defaults when the file is missing or malformed, then applies environment
//! overrides. The token signing secret only ever comes from the environment.

use std::path::Path;

use secrecy::SecretString;

use murmur_types::config::{AppConfig, Environment};

/// Environment variable holding the session token signing secret.
pub const API_SECRET_VAR: &str = "MURMUR_API_SECRET";
/// Overrides `database_url`.
pub const DATABASE_URL_VAR: &str = "MURMUR_DATABASE_URL";
/// Overrides `environment` (`development` | `production`).
pub const ENVIRONMENT_VAR: &str = "MURMUR_ENV";

/// Errors raised while assembling runtime configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    MissingSecret(&'static str),
}

/// Load configuration from `path`, then apply environment overrides.
///
/// - If the file does not exist, defaults are used.
/// - If the file exists but fails to parse, logs a warning and uses defaults.
pub async fn load_config(path: &Path) -> AppConfig {
    let config = match tokio::fs::read_to_string(path).await {
        Ok(content) => match toml::from_str::<AppConfig>(&content) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
                AppConfig::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file at {}, using defaults", path.display());
            AppConfig::default()
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            AppConfig::default()
        }
    };

    apply_env_overrides(config, |key| std::env::var(key).ok())
}

/// Apply `MURMUR_*` overrides looked up through `lookup`.
pub fn apply_env_overrides<F>(mut config: AppConfig, lookup: F) -> AppConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(DATABASE_URL_VAR).filter(|v| !v.is_empty()) {
        config.database_url = url;
    }

    if let Some(env) = lookup(ENVIRONMENT_VAR) {
        match env.to_lowercase().as_str() {
            "production" | "prod" => config.environment = Environment::Production,
            "development" | "dev" => config.environment = Environment::Development,
            other => tracing::warn!("Ignoring unknown {ENVIRONMENT_VAR} value '{other}'"),
        }
    }

    config
}

/// Read the signing secret from the process environment.
pub fn load_api_secret() -> Result<SecretString, ConfigError> {
    api_secret_from(|key| std::env::var(key).ok())
}

/// Read the signing secret through `lookup`. Empty values count as missing.
pub fn api_secret_from<F>(lookup: F) -> Result<SecretString, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(API_SECRET_VAR)
        .filter(|v| !v.is_empty())
        .map(SecretString::from)
        .ok_or(ConfigError::MissingSecret(API_SECRET_VAR))
}
