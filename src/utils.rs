//! Utility functions for directory management
//!
//! This module resolves the application's storage locations following the XDG
//! Base Directory specification, with environment overrides for portable
//! installs and tests.
//!
//! # Directory Structure
//!
//! - Data: `~/.local/share/parchment/` - Preferences and reader profiles
//! - State: `~/.local/state/parchment/` - Logs
//!
//! # Environment Variables
//!
//! - `PARCHMENT_DATA_DIR`: overrides the data directory (portable installs
//!   running off removable media point this somewhere writable)
//! - `PARCHMENT_STATE_DIR`: overrides the state directory

use directories::ProjectDirs;
use std::path::PathBuf;

pub fn get_data_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os("PARCHMENT_DATA_DIR") {
        return Some(PathBuf::from(dir));
    }
    ProjectDirs::from("org", "parchment", "parchment").map(|pd| pd.data_dir().to_path_buf())
}

pub fn get_state_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os("PARCHMENT_STATE_DIR") {
        return Some(PathBuf::from(dir));
    }
    ProjectDirs::from("org", "parchment", "parchment")
        .and_then(|pd| pd.state_dir().map(std::path::Path::to_path_buf))
}

pub fn ensure_dirs() -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use std::fs::DirBuilder;
        use std::os::unix::fs::DirBuilderExt;

        let mut builder = DirBuilder::new();
        builder.mode(0o700); // User read/write/execute only
        builder.recursive(true);

        if let Some(dir) = get_data_dir() {
            builder.create(dir)?;
        }
        if let Some(dir) = get_state_dir() {
            builder.create(dir)?;
        }
    }

    #[cfg(not(unix))]
    {
        if let Some(dir) = get_data_dir() {
            std::fs::create_dir_all(dir)?;
        }
        if let Some(dir) = get_state_dir() {
            std::fs::create_dir_all(dir)?;
        }
    }

    Ok(())
}
