//! Configuration loading for draftbox.
//!
//! Reads `config.toml` from the data directory (`~/.draftbox/` by default)
//! and deserializes it into [`DraftboxConfig`]. Falls back to defaults when
//! the file is missing or malformed.

use std::path::{Path, PathBuf};
use std::time::Duration;

use draftbox_types::config::DraftboxConfig;

use crate::sqlite::pool::PoolSettings;

/// Resolve the data directory.
///
/// Priority: `DRAFTBOX_DATA_DIR`, then `~/.draftbox`, then `./.draftbox`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("DRAFTBOX_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".draftbox");
    }

    PathBuf::from(".draftbox")
}

/// Load configuration from `{data_dir}/config.toml`.
///
/// - Missing file: [`DraftboxConfig::default()`].
/// - Unreadable or unparsable file: logs a warning and returns the default.
pub async fn load_config(data_dir: &Path) -> DraftboxConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return DraftboxConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return DraftboxConfig::default();
        }
    };

    match toml::from_str::<DraftboxConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            DraftboxConfig::default()
        }
    }
}

/// SQLite URL for the configured database file inside `data_dir`.
pub fn database_url(data_dir: &Path, config: &DraftboxConfig) -> String {
    format!(
        "sqlite://{}?mode=rwc",
        data_dir.join(&config.database_file).display()
    )
}

pub fn pool_settings(data_dir: &Path, config: &DraftboxConfig) -> PoolSettings {
    PoolSettings {
        database_url: database_url(data_dir, config),
        busy_timeout: Duration::from_secs(config.busy_timeout_secs),
        max_readers: config.max_readers,
    }
}
