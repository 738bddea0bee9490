/// Visit history for a reader profile
///
/// The UI records every page navigation here so the history panel and the
/// purge flows have one store to work against. Entries are JSON-lines, one
/// object per line, appended as they happen.
use crate::core::profile::Profile;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;

/// A single page visit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitEntry {
    /// When the visit occurred (UTC)
    pub timestamp: chrono::DateTime<chrono::Utc>,

    /// Internal article URL that was shown
    pub url: String,

    /// Page title, when the renderer reported one
    pub title: Option<String>,
}

impl VisitEntry {
    /// Creates a new visit entry stamped with the current time
    pub fn new(url: impl Into<String>, title: Option<String>) -> Self {
        Self {
            timestamp: chrono::Utc::now(),
            url: url.into(),
            title,
        }
    }
}

/// History log writer/reader bound to one profile
pub struct HistoryLog {
    log_path: PathBuf,
}

impl HistoryLog {
    /// Creates a history log handle for the given profile
    pub fn new(profile: &Profile) -> Self {
        Self {
            log_path: profile.history_path(),
        }
    }

    /// Appends a visit to the log
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file cannot be opened or written
    pub async fn append(&self, entry: &VisitEntry) -> std::io::Result<()> {
        let json = serde_json::to_string(entry)?;

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .await?;

        file.write_all(json.as_bytes()).await?;
        file.write_all(b"\n").await?;
        file.sync_all().await?;

        Ok(())
    }

    /// Reads the most recent visits, newest first
    ///
    /// Corrupt lines are skipped rather than failing the whole read. A
    /// missing log is an empty history, not an error.
    pub async fn read_recent(&self, count: usize) -> std::io::Result<Vec<VisitEntry>> {
        let content = match tokio::fs::read_to_string(&self.log_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };

        let entries: Vec<VisitEntry> = content
            .lines()
            .rev()
            .take(count)
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect();

        Ok(entries)
    }

    /// Number of recorded visits
    pub async fn entry_count(&self) -> std::io::Result<usize> {
        let content = match tokio::fs::read_to_string(&self.log_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e),
        };

        Ok(content.lines().filter(|line| !line.trim().is_empty()).count())
    }

    /// Removes the entire history log
    pub async fn clear(&self) -> std::io::Result<()> {
        match tokio::fs::remove_file(&self.log_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}
