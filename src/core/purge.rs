//! Purge flows for profile stores
//!
//! Eviction of the render cache, the visit history and the cookie jar, alone
//! or as one sweep. Every operation treats an already-absent target as done:
//! purging twice is as good as purging once. The combined sweep keeps going
//! past individual failures and reports them at the end instead of aborting
//! half-cleaned.

use crate::core::error::Result;
use crate::core::fsops;
use crate::core::history::HistoryLog;
use crate::core::profile::Profile;
use tracing::{info, warn};

/// Outcome of a combined purge sweep
#[derive(Debug, Default, Clone)]
pub struct PurgeReport {
    /// Number of render cache entries removed
    pub cache_entries_removed: usize,
    pub history_cleared: bool,
    pub cookies_removed: bool,
    /// Human-readable descriptions of steps that failed
    pub failures: Vec<String>,
}

impl PurgeReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Removes every entry under the profile's render cache directory.
///
/// The cache directory itself is kept so the renderer can keep writing into
/// it. Returns the number of entries removed; a missing cache dir counts as
/// zero.
pub async fn purge_cache(profile: &Profile) -> Result<usize> {
    let dir = profile.cache_dir();
    let mut entries = match tokio::fs::read_dir(&dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e.into()),
    };

    let mut removed = 0;
    while let Some(entry) = entries.next_entry().await? {
        fsops::remove_path(&entry.path()).await?;
        removed += 1;
    }

    info!("Purged {} cache entries from '{}'", removed, profile.name());
    Ok(removed)
}

/// Truncates the profile's visit history.
pub async fn purge_history(profile: &Profile) -> Result<()> {
    HistoryLog::new(profile).clear().await?;
    info!("Purged history of '{}'", profile.name());
    Ok(())
}

/// Removes the profile's cookie jar. There rarely is one, but the close-time
/// sweep removes it regardless.
pub async fn purge_cookies(profile: &Profile) -> Result<()> {
    fsops::remove_path(&profile.cookies_path()).await?;
    info!("Purged cookies of '{}'", profile.name());
    Ok(())
}

/// Runs the full sweep: cache, history, cookies.
///
/// Partial failure does not abort the sweep; each failing step is recorded
/// in the report and the remaining steps still run.
pub async fn purge_all(profile: &Profile) -> PurgeReport {
    let mut report = PurgeReport::default();

    match purge_cache(profile).await {
        Ok(removed) => report.cache_entries_removed = removed,
        Err(e) => {
            warn!("Cache purge failed for '{}': {}", profile.name(), e);
            report.failures.push(format!("cache: {e}"));
        }
    }

    match purge_history(profile).await {
        Ok(()) => report.history_cleared = true,
        Err(e) => {
            warn!("History purge failed for '{}': {}", profile.name(), e);
            report.failures.push(format!("history: {e}"));
        }
    }

    match purge_cookies(profile).await {
        Ok(()) => report.cookies_removed = true,
        Err(e) => {
            warn!("Cookie purge failed for '{}': {}", profile.name(), e);
            report.failures.push(format!("cookies: {e}"));
        }
    }

    report
}

/// Removes the whole profile directory, used by the on-close cleanup flow
/// after the stores have been swept.
pub async fn remove_profile_dir(profile: &Profile) -> Result<()> {
    fsops::remove_path(profile.root()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::history::VisitEntry;
    use std::path::Path;

    async fn populated_profile(dir: &Path) -> Profile {
        let profile = Profile::at("default", dir).unwrap();
        profile.ensure_layout().await.unwrap();

        std::fs::write(profile.cache_dir().join("page-1.html"), b"<html>").unwrap();
        std::fs::write(profile.cache_dir().join("page-2.html"), b"<html>").unwrap();
        std::fs::create_dir(profile.cache_dir().join("images")).unwrap();
        std::fs::write(profile.cache_dir().join("images").join("a.png"), b"png").unwrap();

        HistoryLog::new(&profile)
            .append(&VisitEntry::new("A/Main_Page", None))
            .await
            .unwrap();
        std::fs::write(profile.cookies_path(), b"{}").unwrap();

        profile
    }

    #[tokio::test]
    async fn test_purge_cache_removes_entries_keeps_dir() {
        let temp = tempfile::tempdir().unwrap();
        let profile = populated_profile(temp.path()).await;

        let removed = purge_cache(&profile).await.unwrap();
        assert_eq!(removed, 3);
        assert!(profile.cache_dir().is_dir());
        assert_eq!(std::fs::read_dir(profile.cache_dir()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_purge_cache_missing_dir_is_zero() {
        let temp = tempfile::tempdir().unwrap();
        let profile = Profile::at("default", temp.path()).unwrap();

        assert_eq!(purge_cache(&profile).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_purge_all_sweeps_everything() {
        let temp = tempfile::tempdir().unwrap();
        let profile = populated_profile(temp.path()).await;

        let report = purge_all(&profile).await;
        assert!(report.is_clean());
        assert_eq!(report.cache_entries_removed, 3);
        assert!(report.history_cleared);
        assert!(report.cookies_removed);

        assert!(!profile.history_path().exists());
        assert!(!profile.cookies_path().exists());
    }

    #[tokio::test]
    async fn test_purge_all_is_idempotent() {
        let temp = tempfile::tempdir().unwrap();
        let profile = populated_profile(temp.path()).await;

        purge_all(&profile).await;
        let second = purge_all(&profile).await;
        assert!(second.is_clean());
        assert_eq!(second.cache_entries_removed, 0);
    }

    #[tokio::test]
    async fn test_remove_profile_dir() {
        let temp = tempfile::tempdir().unwrap();
        let profile = populated_profile(temp.path()).await;

        remove_profile_dir(&profile).await.unwrap();
        assert!(!profile.root().exists());

        // Removing an already-removed profile is fine
        remove_profile_dir(&profile).await.unwrap();
    }
}
