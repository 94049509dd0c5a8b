//! Version spec resolution against installed toolchains
//!
//! Maps user input to a concrete installed version:
//! - `system`: the Go on PATH, never checked against the installed set
//! - `latest`: newest installed version
//! - exact: verbatim match, covers suffixed builds like `1.21rc1`
//! - partial: `1.24` picks the newest `1.24.x`; `1` picks the newest `1.x`,
//!   falling back to the newest `x.1.y` when no major version matches

use tracing::debug;

use crate::version::error::ResolveError;
use crate::version::semver::find_max_version;
use crate::version::validate::{LATEST_VERSION, SYSTEM_VERSION};

/// Strip the `go` prefix used by toolchain directives (`go1.22.5` -> `1.22.5`).
pub fn normalize_go_version(version: &str) -> &str {
    version.strip_prefix("go").unwrap_or(version)
}

/// Resolve a spec against the installed versions.
///
/// Aliases must already be expanded by the caller.
pub fn resolve_version_spec<S: AsRef<str>>(
    spec: &str,
    installed: &[S],
) -> Result<String, ResolveError> {
    if spec.is_empty() {
        return Err(ResolveError::NotInstalled(spec.to_string()));
    }

    if spec == SYSTEM_VERSION {
        return Ok(SYSTEM_VERSION.to_string());
    }

    if spec == LATEST_VERSION {
        return find_max_version(installed)
            .map(|v| v.as_ref().to_string())
            .ok_or_else(|| ResolveError::NotInstalled(LATEST_VERSION.to_string()));
    }

    if let Some(exact) = installed.iter().find(|v| v.as_ref() == spec) {
        return Ok(exact.as_ref().to_string());
    }

    let trimmed = normalize_go_version(spec);
    let spec_parts: Vec<&str> = trimmed.split('.').collect();

    let resolved = if spec_parts.len() == 1 {
        let major_matches = filter_versions(installed, |parts| parts.first() == Some(&trimmed));
        if major_matches.is_empty() {
            debug!("No major version match for '{}', trying minor", spec);
            let minor_matches = filter_versions(installed, |parts| parts.get(1) == Some(&trimmed));
            max_of(&minor_matches)
        } else {
            max_of(&major_matches)
        }
    } else {
        let prefix = format!("{}.", trimmed);
        let prefix_matches: Vec<&str> = installed
            .iter()
            .map(|v| v.as_ref())
            .filter(|v| {
                let normalized = normalize_go_version(v);
                normalized == trimmed || normalized.starts_with(&prefix)
            })
            .collect();
        max_of(&prefix_matches)
    };

    match resolved {
        Some(version) => {
            debug!("Resolved '{}' to installed version '{}'", spec, version);
            Ok(version)
        }
        None => Err(ResolveError::NotInstalled(spec.to_string())),
    }
}

fn filter_versions<'a, S, F>(installed: &'a [S], predicate: F) -> Vec<&'a str>
where
    S: AsRef<str>,
    F: Fn(&[&str]) -> bool,
{
    installed
        .iter()
        .map(|v| v.as_ref())
        .filter(|v| {
            let parts: Vec<&str> = normalize_go_version(v).split('.').collect();
            predicate(&parts)
        })
        .collect()
}

fn max_of(versions: &[&str]) -> Option<String> {
    find_max_version(versions).map(|v| v.to_string())
}
