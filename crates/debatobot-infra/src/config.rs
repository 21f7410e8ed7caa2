//! Configuration loading for DebatoBot.
//!
//! Reads `config.toml` from the data directory (`~/.debatobot/` in production)
//! and deserializes it into [`AppConfig`]. Falls back to defaults when the file
//! is missing or malformed, so a first run needs nothing but an API key.

use std::path::{Path, PathBuf};

use secrecy::SecretString;

use debatobot_types::config::{AppConfig, ProviderConfig};

/// Name of the configuration file inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `DEBATOBOT_DATA_DIR` environment variable
/// 2. `~/.debatobot`
/// 3. `./.debatobot` when no home directory is known
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("DEBATOBOT_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".debatobot");
    }

    PathBuf::from(".debatobot")
}

/// `{data_dir}/config.toml`.
pub fn default_config_path() -> PathBuf {
    resolve_data_dir().join(CONFIG_FILE_NAME)
}

/// Load configuration from `config_path`.
///
/// - Missing file: returns [`AppConfig::default()`].
/// - Unreadable or unparsable file: logs a warning and returns the default.
pub async fn load_config(config_path: &Path) -> AppConfig {
    let content = match tokio::fs::read_to_string(config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config found at {}, using defaults", config_path.display());
            return AppConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            AppConfig::default()
        }
    }
}

/// Read the provider's API key from its environment variable.
///
/// Returns `None` when the variable is unset or blank.
pub fn resolve_api_key(provider: &ProviderConfig) -> Option<SecretString> {
    let var = provider.api_key_env();
    match std::env::var(&var) {
        Ok(value) if !value.trim().is_empty() => Some(SecretString::from(value.trim().to_string())),
        _ => {
            tracing::debug!(env_var = %var, "No API key in environment");
            None
        }
    }
}
