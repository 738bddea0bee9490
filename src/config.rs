use crate::core::profile::DEFAULT_PROFILE_NAME;
use crate::utils::get_data_dir;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application preferences shared by the reader UI and the maintenance CLI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_profile")]
    pub active_profile: String,
    /// Remove the whole profile when the reader closes (portable installs)
    #[serde(default)]
    pub purge_profile_on_close: bool,
    /// Ask before the on-close purge; cleared by the dialog's remember-choice
    #[serde(default = "default_true")]
    pub confirm_purge_on_close: bool,
    /// Profile left behind by a previous session, removed at next startup
    #[serde(default)]
    pub profile_to_remove: Option<String>,
    /// UI locale recorded at startup so a fresh profile keeps the language
    #[serde(default)]
    pub locale: Option<String>,
    /// Installation prefix; its `bin/` directory is a fallback location when
    /// resolving helper executables
    #[serde(default)]
    pub install_prefix: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            active_profile: default_profile(),
            purge_profile_on_close: false, // Installed copies keep their data
            confirm_purge_on_close: true,
            profile_to_remove: None,
            locale: None,
            install_prefix: None,
        }
    }
}

fn default_profile() -> String {
    DEFAULT_PROFILE_NAME.to_string()
}

fn default_true() -> bool {
    true
}

/// Saves the preferences to disk using an atomic write pattern.
/// 1. Writes to a temporary file.
/// 2. Sets restrictive permissions (0o600).
/// 3. Atomically renames to the target path.
///
/// # Async
/// Uses `tokio::fs` for non-blocking I/O to avoid blocking the event loop.
pub async fn save_config(config: &AppConfig) -> std::io::Result<()> {
    if let Some(mut path) = get_data_dir() {
        let json = serde_json::to_string_pretty(config)?;

        let mut temp_path = path.clone();
        temp_path.push("config.json.tmp");

        path.push("config.json");

        // Create file with restrictive permissions from the start to prevent
        // race condition where file is briefly world-readable
        #[cfg(unix)]
        {
            use tokio::fs::OpenOptions;
            use tokio::io::AsyncWriteExt;

            let mut file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .mode(0o600) // Set permissions BEFORE any data is written
                .open(&temp_path)
                .await?;

            file.write_all(json.as_bytes()).await?;
            file.sync_all().await?; // Ensure data is flushed to physical media
        }

        #[cfg(not(unix))]
        {
            use tokio::io::AsyncWriteExt;

            let mut file = tokio::fs::File::create(&temp_path).await?;
            file.write_all(json.as_bytes()).await?;
            file.sync_all().await?;
        }

        // Atomic rename
        tokio::fs::rename(temp_path, path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::StorageFull {
                std::io::Error::new(
                    std::io::ErrorKind::StorageFull,
                    "Disk full: cannot save preferences. Free up space and try again.",
                )
            } else {
                e
            }
        })?;
    }
    Ok(())
}

/// Loads the preferences from disk, or returns defaults if not found.
///
/// # Async
/// Uses `tokio::fs` for non-blocking I/O to avoid blocking the event loop.
pub async fn load_config() -> AppConfig {
    if let Some(mut path) = get_data_dir() {
        path.push("config.json");
        if let Ok(json) = tokio::fs::read_to_string(&path).await
            && let Ok(config) = serde_json::from_str::<AppConfig>(&json)
        {
            return config;
        }
    }
    AppConfig::default()
}
