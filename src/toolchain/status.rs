//! Installation health of a single version

use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::toolchain::error::StatusError;
use crate::toolchain::installed::{is_version_corrupted, list_installed_versions};
use crate::version::alias::AliasResolver;
use crate::version::resolver::resolve_version_spec;
use crate::version::validate::{SYSTEM_VERSION, validate_version_string};

/// Installation state of a version, recomputed on every call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionInstallStatus {
    /// Canonical version after alias and partial-version resolution
    pub version: String,
    pub installed: bool,
    /// Directory exists but the go binary is missing
    pub corrupted: bool,
}

/// Check whether `spec` is installed and intact.
///
/// "Not installed" is a normal result, not an error. Aliases are best-effort:
/// when the alias store cannot be read, `spec` is taken as already canonical.
pub fn check_version_status<A: AliasResolver + ?Sized>(
    versions_dir: &Path,
    spec: &str,
    aliases: &A,
) -> Result<VersionInstallStatus, StatusError> {
    validate_version_string(spec)?;

    let resolved = aliases.resolve_alias(spec).unwrap_or_else(|e| {
        debug!("Alias lookup failed for '{}': {}", spec, e);
        spec.to_string()
    });
    validate_version_string(&resolved)?;

    if resolved == SYSTEM_VERSION {
        return Ok(VersionInstallStatus {
            version: resolved,
            installed: true,
            corrupted: false,
        });
    }

    if versions_dir.join(&resolved).is_dir() {
        let corrupted = is_version_corrupted(versions_dir, &resolved);
        return Ok(VersionInstallStatus {
            version: resolved,
            installed: true,
            corrupted,
        });
    }

    let installed = list_installed_versions(versions_dir)?;
    match resolve_version_spec(&resolved, &installed) {
        // listed versions always have their binary
        Ok(concrete) => Ok(VersionInstallStatus {
            version: concrete,
            installed: true,
            corrupted: false,
        }),
        Err(_) => Ok(VersionInstallStatus {
            version: resolved,
            installed: false,
            corrupted: false,
        }),
    }
}
