//! Reader profile management
//!
//! A profile is a directory under the application data directory holding
//! everything a reading session accumulates: the visit history log, the
//! cookie jar, and the render cache. Profiles are what the on-close cleanup
//! flow removes wholesale on portable installs.

use crate::utils::get_data_dir;
use std::path::{Path, PathBuf};

/// The canonical name for the initial/fallback profile.
/// This profile is protected from deletion to ensure the reader always has
/// a place to store session state.
pub const DEFAULT_PROFILE_NAME: &str = "default";

/// Error type for profile operations
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("Invalid profile name: {0}")]
    InvalidName(String),

    #[error("Profile not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Data directory not available")]
    DataDirUnavailable,
}

/// Validates a profile name for filesystem safety.
///
/// Constraints:
/// - Alphanumeric, underscores, and hyphens only: keeps names portable and
///   shell-safe.
/// - Max 64 chars: stays well within filename limits while allowing
///   descriptive names.
/// - Rejects "." and "..": path traversal protection.
pub fn validate_profile_name(name: &str) -> Result<(), ProfileError> {
    if name.is_empty() {
        return Err(ProfileError::InvalidName("Name cannot be empty".into()));
    }

    if name.len() > 64 {
        return Err(ProfileError::InvalidName(
            "Name too long (max 64 chars)".into(),
        ));
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(ProfileError::InvalidName(
            "Name contains invalid characters (use only a-z, 0-9, _, -)".into(),
        ));
    }

    // Prevent path traversal
    if name == "." || name == ".." {
        return Err(ProfileError::InvalidName("Invalid name".into()));
    }

    Ok(())
}

/// A named profile rooted at a directory on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    name: String,
    root: PathBuf,
}

impl Profile {
    /// Binds a validated profile name to a directory under `profiles_root`.
    ///
    /// Does not touch the filesystem; see [`open_profile`] for the variant
    /// that creates the on-disk layout.
    pub fn at(name: &str, profiles_root: &Path) -> Result<Self, ProfileError> {
        validate_profile_name(name)?;
        Ok(Self {
            name: name.to_string(),
            root: profiles_root.join(name),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the JSON-lines visit history log.
    pub fn history_path(&self) -> PathBuf {
        self.root.join("history.log")
    }

    /// Path of the cookie jar file.
    pub fn cookies_path(&self) -> PathBuf {
        self.root.join("cookies.json")
    }

    /// Directory holding rendered-page cache entries.
    pub fn cache_dir(&self) -> PathBuf {
        self.root.join("cache")
    }

    /// Creates the profile's on-disk layout if it is missing.
    pub async fn ensure_layout(&self) -> Result<(), ProfileError> {
        tokio::fs::create_dir_all(self.cache_dir()).await?;
        Ok(())
    }
}

/// Gets the directory where profiles are stored.
/// Creates the directory if it doesn't exist so subsequent operations succeed.
///
/// # Async
/// Uses `tokio::fs` for non-blocking I/O.
pub async fn profiles_root() -> Result<PathBuf, ProfileError> {
    let mut path = get_data_dir().ok_or(ProfileError::DataDirUnavailable)?;
    path.push("profiles");

    if !tokio::fs::try_exists(&path).await? {
        tokio::fs::create_dir_all(&path).await?;
    }

    Ok(path)
}

/// Opens a profile by name, creating its directory layout on first use.
///
/// # Async
/// Uses `tokio::fs` for non-blocking I/O.
pub async fn open_profile(name: &str) -> Result<Profile, ProfileError> {
    let root = profiles_root().await?;
    let profile = Profile::at(name, &root)?;
    profile.ensure_layout().await?;
    Ok(profile)
}

/// Lists all available profile names.
/// Scans the profiles directory for subdirectories.
///
/// # Async
/// Uses `tokio::fs` for non-blocking directory scanning.
pub async fn list_profiles() -> Result<Vec<String>, ProfileError> {
    let dir = profiles_root().await?;
    let mut profiles = Vec::new();

    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();

        if path.is_dir()
            && let Some(name) = path.file_name().and_then(|s| s.to_str())
            && validate_profile_name(name).is_ok()
        {
            profiles.push(name.to_string());
        }
    }

    profiles.sort();
    Ok(profiles)
}

/// Deletes a profile directory and everything in it.
/// Protects the default profile from deletion so the reader never loses its
/// fallback storage location.
///
/// # Async
/// Uses `tokio::fs` for non-blocking file I/O.
pub async fn delete_profile(name: &str) -> Result<(), ProfileError> {
    if name == DEFAULT_PROFILE_NAME {
        return Err(ProfileError::InvalidName(
            "Cannot delete default profile".into(),
        ));
    }

    validate_profile_name(name)?;
    let mut path = profiles_root().await?;
    path.push(name);

    if tokio::fs::try_exists(&path).await? {
        tokio::fs::remove_dir_all(path).await?;
    }
    Ok(())
}

/// Removes a profile directory left behind by a previous session.
///
/// Used during startup reconciliation: failures are logged and swallowed,
/// since a missing or locked stale profile must not block startup. Returns
/// whether the directory is gone afterwards.
pub async fn remove_stale_profile(name: &str) -> bool {
    match delete_profile(name).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Failed to remove stale profile '{}': {}", name, e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_helpers::scratch_data_dir;

    #[test]
    fn test_validate_profile_name() {
        assert!(validate_profile_name("default").is_ok());
        assert!(validate_profile_name("reading-2024_02").is_ok());

        assert!(validate_profile_name("").is_err());
        assert!(validate_profile_name("..").is_err());
        assert!(validate_profile_name("has space").is_err());
        assert!(validate_profile_name("slash/name").is_err());
        assert!(validate_profile_name(&"x".repeat(65)).is_err());
    }

    #[test]
    fn test_profile_paths() {
        let profile = Profile::at("default", Path::new("/data/profiles")).unwrap();
        assert_eq!(profile.name(), "default");
        assert_eq!(profile.root(), Path::new("/data/profiles/default"));
        assert_eq!(
            profile.history_path(),
            Path::new("/data/profiles/default/history.log")
        );
        assert_eq!(
            profile.cookies_path(),
            Path::new("/data/profiles/default/cookies.json")
        );
        assert_eq!(
            profile.cache_dir(),
            Path::new("/data/profiles/default/cache")
        );
    }

    #[test]
    fn test_profile_at_rejects_bad_name() {
        assert!(Profile::at("../evil", Path::new("/data")).is_err());
    }

    #[tokio::test]
    async fn test_open_list_delete_round_trip() {
        let (_guard, _temp) = scratch_data_dir();

        let profile = open_profile("session-a").await.unwrap();
        assert!(profile.cache_dir().is_dir());

        open_profile("session-b").await.unwrap();

        let names = list_profiles().await.unwrap();
        assert_eq!(names, vec!["session-a".to_string(), "session-b".to_string()]);

        delete_profile("session-a").await.unwrap();
        let names = list_profiles().await.unwrap();
        assert_eq!(names, vec!["session-b".to_string()]);

        // Deleting an already-missing profile is fine
        delete_profile("session-a").await.unwrap();
    }

    #[tokio::test]
    async fn test_default_profile_protected() {
        let (_guard, _temp) = scratch_data_dir();

        open_profile(DEFAULT_PROFILE_NAME).await.unwrap();
        assert!(matches!(
            delete_profile(DEFAULT_PROFILE_NAME).await,
            Err(ProfileError::InvalidName(_))
        ));
    }

    #[tokio::test]
    async fn test_remove_stale_profile_swallows_failure() {
        let (_guard, _temp) = scratch_data_dir();

        open_profile("stale").await.unwrap();
        assert!(remove_stale_profile("stale").await);

        // Invalid names report failure instead of panicking
        assert!(!remove_stale_profile("../evil").await);
    }
}
