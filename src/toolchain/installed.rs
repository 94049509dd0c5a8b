//! Installed toolchains under `<root>/versions`
//!
//! Every call reads the directory again: an `install` or `uninstall` running
//! in another shell may change it at any time.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::toolchain::error::ToolchainError;
use crate::version::semver::compare_versions_total;

/// Name of the go binary on this platform
pub fn go_binary_name() -> &'static str {
    if cfg!(windows) { "go.exe" } else { "go" }
}

/// Path where a toolchain's go binary is expected
pub fn expected_go_binary(version_dir: &Path) -> PathBuf {
    version_dir.join("bin").join(go_binary_name())
}

/// Locate the go binary of an installed toolchain.
///
/// On Windows a `go.bat` stand-in is accepted as well.
pub fn find_go_binary(version_dir: &Path) -> Option<PathBuf> {
    let bin_dir = version_dir.join("bin");
    let candidates: &[&str] = if cfg!(windows) {
        &["go.exe", "go.bat"]
    } else {
        &["go"]
    };

    candidates
        .iter()
        .map(|name| bin_dir.join(name))
        .find(|path| path.is_file())
}

/// List installed versions with a present go binary, oldest first.
///
/// A missing versions directory means nothing is installed yet.
pub fn list_installed_versions(versions_dir: &Path) -> Result<Vec<String>, ToolchainError> {
    let entries = match fs::read_dir(versions_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(ToolchainError::ReadVersionsDir {
                path: versions_dir.to_path_buf(),
                source,
            });
        }
    };

    let mut versions = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| ToolchainError::ReadVersionsDir {
            path: versions_dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        if find_go_binary(&path).is_some() {
            versions.push(name);
        } else {
            debug!("Skipping {} without go binary", name);
        }
    }

    versions.sort_by(|a, b| compare_versions_total(a, b));
    Ok(versions)
}

/// Whether a version directory exists but its go binary is missing.
pub fn is_version_corrupted(versions_dir: &Path, version: &str) -> bool {
    let version_dir = versions_dir.join(version);
    version_dir.is_dir() && find_go_binary(&version_dir).is_none()
}
