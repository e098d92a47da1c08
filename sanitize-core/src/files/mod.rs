/// Uploaded file metadata: names and types

use crate::config::FileCheckConfig;
use crate::error::{Result, SanitizeError};
use std::future::Future;
use std::io;
use std::path::{Component, Path};
use std::time::Duration;
use tokio::fs;
use tracing::{debug, warn};

/// Extensions of executables, scripts and disk images that are never accepted.
pub const BLOCKED_EXTENSIONS: &[&str] = &[
    ".exe", ".bat", ".cmd", ".msix", ".scr", ".pif", ".dll", ".jse", ".vbs", ".vbe", ".wsf",
    ".wsh", ".ps1", ".psm1", ".reg", ".jar", ".dmg", ".iso", ".pkg", ".sh", ".virus",
];

/// Accept a file name only when nothing exists at its path yet.
///
/// "Exists" and "could not tell" are different outcomes: the first is an
/// [`SanitizeError::InvalidFileName`] rejection, the second surfaces as
/// [`SanitizeError::FileCheckFailed`] or [`SanitizeError::FileCheckTimeout`].
/// Names that would resolve outside the upload root (absolute paths or `..`
/// components) are rejected without touching the filesystem.
/// Dropping the returned future abandons the check.
pub async fn validate_file_name(file_name: &str, config: &FileCheckConfig) -> Result<String> {
    let name = file_name.trim();
    if name.is_empty() || name.contains('\0') || escapes_root(name) {
        return Err(SanitizeError::InvalidFileName);
    }

    let path = config.resolve(name);
    check_absent(name, &path, config.timeout(), entry_exists(&path)).await
}

/// Whether anything, including a dangling symlink, occupies `path`.
/// Links are not followed.
async fn entry_exists(path: &Path) -> io::Result<bool> {
    match fs::symlink_metadata(path).await {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

fn escapes_root(name: &str) -> bool {
    Path::new(name)
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
}

async fn check_absent<F>(name: &str, path: &Path, timeout: Duration, probe: F) -> Result<String>
where
    F: Future<Output = io::Result<bool>>,
{
    debug!(path = %path.display(), "checking file name");

    match tokio::time::timeout(timeout, probe).await {
        Ok(Ok(false)) => Ok(name.to_string()),
        Ok(Ok(true)) => Err(SanitizeError::InvalidFileName),
        Ok(Err(e)) => {
            warn!(error = %e, "file existence check failed");
            Err(SanitizeError::FileCheckFailed(e))
        }
        Err(_) => {
            warn!(?timeout, "file existence check timed out");
            Err(SanitizeError::FileCheckTimeout(timeout))
        }
    }
}

/// Lowercased extension of the last path segment of `url`, dot included.
/// Query strings and fragments are ignored. Empty when there is no dot.
pub fn file_extension(url: &str) -> String {
    let path = url.trim().split(['?', '#']).next().unwrap_or_default();
    let segment = path.rsplit('/').next().unwrap_or_default();

    match segment.rfind('.') {
        Some(index) => segment[index..].to_lowercase(),
        None => String::new(),
    }
}

/// Check an uploaded file's extension against the deny-list and, when a
/// content type was declared, against that type.
///
/// Returns the extension, e.g. `".jpeg"`.
pub fn validate_file_type(declared_type: Option<&str>, url: &str) -> Result<String> {
    let ext = file_extension(url);
    let bare = ext.strip_prefix('.').unwrap_or_default();

    if bare.is_empty() || BLOCKED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(SanitizeError::BadFileType);
    }

    if let Some(declared) = declared_type.map(str::trim).filter(|s| !s.is_empty()) {
        if !declared.to_lowercase().contains(bare) {
            return Err(SanitizeError::FileUnmatch);
        }
    }

    Ok(ext)
}
