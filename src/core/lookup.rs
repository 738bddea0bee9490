//! Executable lookup on a delimited search path
//!
//! The reader shells out to helper tools (downloader, indexer) and needs to
//! know up front whether they exist. Lookup scans an ordered, delimited list
//! of directories and returns the first entry that contains the requested
//! name. Only existence is checked, not executability, matching what the
//! candidate is later invoked through.
//!
//! The delimiter convention is a [`PathStyle`] value supplied by the caller,
//! not something looked up from the environment at scan time.

use std::path::{Path, PathBuf};

/// Search path delimiter convention
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStyle {
    /// Colon-delimited (`/usr/bin:/bin`)
    Unix,
    /// Semicolon-delimited (`C:\bin;D:\tools`)
    Windows,
}

impl PathStyle {
    /// The convention of the platform this binary was built for
    pub const fn host() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Unix
        }
    }

    pub const fn delimiter(self) -> char {
        match self {
            Self::Unix => ':',
            Self::Windows => ';',
        }
    }
}

/// An ordered list of directories parsed from a delimited string.
///
/// Order is significant: the first directory containing a candidate wins.
/// Entries may name directories that do not exist or cannot be read; those
/// are skipped during the scan rather than aborting it.
#[derive(Debug, Clone)]
pub struct SearchPath {
    dirs: Vec<PathBuf>,
}

impl SearchPath {
    /// Parses a delimited search path string. Empty segments are dropped.
    pub fn parse(raw: &str, style: PathStyle) -> Self {
        let dirs = raw
            .split(style.delimiter())
            .filter(|segment| !segment.is_empty())
            .map(PathBuf::from)
            .collect();
        Self { dirs }
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Returns the full path of the first directory containing `name`.
    ///
    /// The candidate is built with platform path joining, never string
    /// concatenation. A file or a directory both count as a match. Absence
    /// is `None`, not an error; inaccessible directories are skipped and the
    /// scan continues.
    pub fn locate(&self, name: &str) -> Option<PathBuf> {
        // No directory contains an empty name; joining "" would otherwise
        // re-yield the directory itself and match spuriously.
        if name.is_empty() {
            return None;
        }

        for dir in &self.dirs {
            let candidate = dir.join(name);
            match candidate.try_exists() {
                Ok(true) => return Some(candidate),
                Ok(false) => {}
                Err(error) => {
                    tracing::debug!(dir = %dir.display(), %error, "skipping unreadable search path entry");
                }
            }
        }

        None
    }
}

/// One-shot lookup: parse `search_path` with the given convention and locate `name`.
pub fn locate(name: &str, search_path: &str, style: PathStyle) -> Option<PathBuf> {
    SearchPath::parse(search_path, style).locate(name)
}

/// Locates `name` on the process `PATH` using the host platform's convention.
pub fn which(name: &str) -> Option<PathBuf> {
    let raw = std::env::var("PATH").ok()?;
    locate(name, &raw, PathStyle::host())
}
