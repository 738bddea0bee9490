//! Thin file-system operations used across the host layer
//!
//! Absence is an expected outcome for most of these: existence checks return
//! `bool`, removal of a missing path succeeds. Writes that matter go through
//! the atomic temp-file + rename pattern so a crash mid-write never leaves a
//! half-written file behind.

use crate::core::error::{Error, Result};
use std::io::Write;
use std::path::{Component, Path, PathBuf};

/// Returns true if `path` names an existing regular file.
pub fn is_file(path: &Path) -> bool {
    path.is_file()
}

/// Returns true if `path` names an existing directory.
pub fn is_dir(path: &Path) -> bool {
    path.is_dir()
}

/// Returns the size of a file in bytes.
pub async fn file_size(path: &Path) -> Result<u64> {
    Ok(tokio::fs::metadata(path).await?.len())
}

/// Sums the sizes of the regular files under `dir`, recursing into
/// subdirectories.
///
/// A missing directory counts as empty rather than erroring, since callers
/// use this to report on caches that may not have been created yet. The walk
/// keeps an explicit worklist instead of recursing, so nesting depth never
/// grows the call stack.
pub async fn dir_size(dir: &Path) -> Result<u64> {
    let mut total = 0;
    let mut pending = vec![dir.to_path_buf()];

    while let Some(current) = pending.pop() {
        let mut entries = match tokio::fs::read_dir(&current).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(e) => return Err(e.into()),
        };

        while let Some(entry) = entries.next_entry().await? {
            let metadata = entry.metadata().await?;
            if metadata.is_dir() {
                pending.push(entry.path());
            } else if metadata.is_file() {
                total += metadata.len();
            }
        }
    }
    Ok(total)
}

/// Removes a file or a directory tree. Removing a missing path is a no-op.
pub async fn remove_path(path: &Path) -> Result<()> {
    match tokio::fs::metadata(path).await {
        Ok(metadata) if metadata.is_dir() => tokio::fs::remove_dir_all(path).await?,
        Ok(_) => tokio::fs::remove_file(path).await?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

/// Moves `src` into `dest_dir`, optionally under a new name.
///
/// Rename is attempted first; for files that land on a different filesystem
/// the move degrades to copy + remove. Returns the destination path.
pub async fn move_path(src: &Path, dest_dir: &Path, new_name: Option<&str>) -> Result<PathBuf> {
    let file_name = match new_name {
        Some(name) => std::ffi::OsString::from(name),
        None => src
            .file_name()
            .ok_or_else(|| Error::InvalidPath(format!("{} has no file name", src.display())))?
            .to_os_string(),
    };
    let dest = dest_dir.join(file_name);

    match tokio::fs::rename(src, &dest).await {
        Ok(()) => Ok(dest),
        Err(e) if e.kind() == std::io::ErrorKind::CrossesDevices && src.is_file() => {
            tokio::fs::copy(src, &dest).await?;
            tokio::fs::remove_file(src).await?;
            Ok(dest)
        }
        Err(e) => Err(e.into()),
    }
}

/// Reads a file's full contents as bytes.
pub async fn read_to_bytes(path: &Path) -> Result<Vec<u8>> {
    Ok(tokio::fs::read(path).await?)
}

/// Reads a file's full contents as UTF-8 text.
pub async fn read_to_string(path: &Path) -> Result<String> {
    Ok(tokio::fs::read_to_string(path).await?)
}

/// Writes `contents` to `path` atomically.
///
/// The bytes land in a temp file in the same directory (created with 0o600
/// on Unix), are flushed, and the temp file is renamed over the destination.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .ok_or_else(|| Error::InvalidPath(format!("{} has no parent directory", path.display())))?;

    let mut temp = tempfile::NamedTempFile::new_in(parent)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        temp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o600))?;
    }
    temp.write_all(contents)?;
    temp.flush()?;
    temp.as_file().sync_all()?;
    temp.persist(path)
        .map_err(|e| Error::Io(e.error))?;
    Ok(())
}

/// Joins a directory and a relative segment with platform path joining.
///
/// Rejects absolute segments and parent-directory components so a stored
/// name can never escape the directory it is resolved against.
pub fn append_to_path(base: &Path, segment: &str) -> Result<PathBuf> {
    let relative = Path::new(segment);
    if relative.as_os_str().is_empty() {
        return Err(Error::InvalidPath("empty path segment".into()));
    }
    if relative.is_absolute() {
        return Err(Error::InvalidPath(format!("absolute segment: {segment}")));
    }
    if !relative
        .components()
        .all(|c| matches!(c, Component::Normal(_)))
    {
        return Err(Error::InvalidPath(format!(
            "segment escapes its base directory: {segment}"
        )));
    }
    Ok(base.join(relative))
}

/// Converts a `file://` URL into a local path, percent-decoding as needed.
///
/// Anything other than a `file://` URL yields `None`.
pub fn path_from_url(url: &str) -> Option<PathBuf> {
    let rest = url.strip_prefix("file://")?;
    // Drop the authority part ("file://host/path"); an empty authority is
    // the common "file:///path" form.
    let path_part = &rest[rest.find('/')?..];
    let decoded = urlencoding::decode(path_part).ok()?;

    #[cfg(windows)]
    {
        // "/C:/dir" carries a spurious leading slash before the drive
        let trimmed = decoded
            .strip_prefix('/')
            .filter(|p| p.as_bytes().get(1) == Some(&b':'))
            .unwrap_or(decoded.as_ref());
        return Some(PathBuf::from(trimmed));
    }

    #[cfg(not(windows))]
    Some(PathBuf::from(decoded.into_owned()))
}

/// Returns a short random token for scratch file names.
pub fn random_token() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..8].to_string()
}
