//! Version discovery for a single directory
//!
//! The explicit declaration (`.go-version`, or an asdf `.tool-versions` entry
//! when there is no `.go-version`) and `go.mod` are parsed independently.
//! When both declare a version, the explicit one wins as long as it satisfies
//! the module requirement; a stale, older explicit version loses to `go.mod`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::discovery::error::DiscoveryError;
use crate::parser::go_mod::GoModParser;
use crate::parser::go_version::GoVersionFileParser;
use crate::parser::tool_versions::ToolVersionsParser;
use crate::parser::traits::{ParseError, VersionFileParser};
use crate::parser::types::VersionSource;
use crate::version::semver::satisfies;

/// A version found in a directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveredVersion {
    pub version: String,
    pub source: VersionSource,
    /// Full path to the file that declared the version
    pub path: PathBuf,
}

/// Result of comparing `.go-version` against `go.mod`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct MismatchReport {
    /// Both files declare a version and the strings differ
    pub mismatch: bool,
    pub go_version_file: Option<String>,
    pub go_mod: Option<String>,
}

/// Discover the version that applies to `dir`.
///
/// Returns `Ok(None)` when neither file declares a version. A `go.mod` with
/// no version directive, or a file that exists but cannot be read, is an
/// error.
pub fn discover_version(dir: &Path) -> Result<Option<DiscoveredVersion>, DiscoveryError> {
    let file = read_explicit(dir)?;
    let module = read_declared(dir, &GoModParser::new())?;
    Ok(select_version(file, module))
}

/// Report whether `.go-version` and `go.mod` in `dir` disagree.
///
/// Diagnostic only: unreadable or unparseable files count as absent.
pub fn detect_version_mismatch(dir: &Path) -> MismatchReport {
    let tolerant = |parser: &dyn VersionFileParser| {
        read_declared(dir, parser)
            .inspect_err(|e| debug!("Ignoring {} in mismatch check: {}", parser.file_name(), e))
            .ok()
            .flatten()
            .map(|declared| declared.version)
    };

    let go_version_file = tolerant(&GoVersionFileParser);
    let go_mod = tolerant(&GoModParser::new());

    let mismatch = matches!((&go_version_file, &go_mod), (Some(f), Some(m)) if f != m);

    MismatchReport {
        mismatch,
        go_version_file,
        go_mod,
    }
}

/// Apply the precedence rule to independently parsed declarations.
pub(crate) fn select_version(
    file: Option<DiscoveredVersion>,
    module: Option<DiscoveredVersion>,
) -> Option<DiscoveredVersion> {
    match (file, module) {
        (Some(file), Some(module)) => {
            if satisfies(&file.version, &module.version) {
                debug!(
                    ".go-version {} satisfies go.mod {}, using .go-version",
                    file.version, module.version
                );
                Some(file)
            } else {
                debug!(
                    ".go-version {} is older than go.mod {}, using go.mod",
                    file.version, module.version
                );
                Some(module)
            }
        }
        (Some(only), None) | (None, Some(only)) => Some(only),
        (None, None) => None,
    }
}

/// Read `.go-version`, falling back to `.tool-versions`.
pub(crate) fn read_explicit(dir: &Path) -> Result<Option<DiscoveredVersion>, DiscoveryError> {
    match read_declared(dir, &GoVersionFileParser)? {
        Some(declared) => Ok(Some(declared)),
        None => read_declared(dir, &ToolVersionsParser),
    }
}

/// Read one version file in `dir`. A missing file or an empty declaration is `None`.
pub(crate) fn read_declared(
    dir: &Path,
    parser: &dyn VersionFileParser,
) -> Result<Option<DiscoveredVersion>, DiscoveryError> {
    let path = dir.join(parser.file_name());

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(DiscoveryError::Parse {
                path: path.clone(),
                source: ParseError::Io { path, source },
            });
        }
    };

    let version = parser
        .parse(&content)
        .map_err(|source| DiscoveryError::Parse {
            path: path.clone(),
            source,
        })?;

    Ok(version.map(|version| DiscoveredVersion {
        version,
        source: parser.source(),
        path,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    fn setup(go_version: Option<&str>, go_mod: Option<&str>) -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        if let Some(content) = go_version {
            fs::write(temp_dir.path().join(".go-version"), content).unwrap();
        }
        if let Some(content) = go_mod {
            fs::write(temp_dir.path().join("go.mod"), content).unwrap();
        }
        temp_dir
    }

    #[rstest]
    #[case(Some("1.24.1\n"), None, "1.24.1", VersionSource::GoVersionFile)]
    #[case(None, Some("module test\n\ngo 1.22\n"), "1.22", VersionSource::GoMod)]
    #[case(
        None,
        Some("module test\n\ngo 1.22\n\ntoolchain go1.22.5\n"),
        "1.22.5",
        VersionSource::GoMod
    )]
    // explicit file is newer than the module requirement
    #[case(
        Some("1.24.1\n"),
        Some("module test\n\ngo 1.22\n\ntoolchain go1.22.5\n"),
        "1.24.1",
        VersionSource::GoVersionFile
    )]
    #[case(
        Some("1.24.1\n"),
        Some("module test\n\ngo 1.22\n"),
        "1.24.1",
        VersionSource::GoVersionFile
    )]
    // explicit file is older than the toolchain requirement
    #[case(
        Some("1.21\n"),
        Some("module test\n\ngo 1.21\n\ntoolchain go1.24.1\n"),
        "1.24.1",
        VersionSource::GoMod
    )]
    // equal versions favour the explicit file
    #[case(
        Some("1.22.5\n"),
        Some("module test\n\ntoolchain go1.22.5\n"),
        "1.22.5",
        VersionSource::GoVersionFile
    )]
    // a release candidate does not satisfy the release
    #[case(
        Some("1.25rc1\n"),
        Some("module test\n\ntoolchain go1.25\n"),
        "1.25",
        VersionSource::GoMod
    )]
    #[case(
        Some("\n\n"),
        Some("module test\n\ngo 1.22\n"),
        "1.22",
        VersionSource::GoMod
    )]
    #[case(
        Some("# pinned\n1.23.0\r\n"),
        None,
        "1.23.0",
        VersionSource::GoVersionFile
    )]
    fn discover_version_returns_expected(
        #[case] go_version: Option<&str>,
        #[case] go_mod: Option<&str>,
        #[case] expected_version: &str,
        #[case] expected_source: VersionSource,
    ) {
        let temp_dir = setup(go_version, go_mod);

        let discovered = discover_version(temp_dir.path()).unwrap().unwrap();

        assert_eq!(discovered.version, expected_version);
        assert_eq!(discovered.source, expected_source);
        assert_eq!(
            discovered.path,
            temp_dir.path().join(expected_source.as_str())
        );
    }

    #[test]
    fn discover_version_returns_none_without_files() {
        let temp_dir = setup(None, None);
        assert_eq!(discover_version(temp_dir.path()).unwrap(), None);
    }

    #[test]
    fn discover_version_returns_none_for_comment_only_file() {
        let temp_dir = setup(Some("# nothing here\n"), None);
        assert_eq!(discover_version(temp_dir.path()).unwrap(), None);
    }

    #[test]
    fn discover_version_fails_for_go_mod_without_directive() {
        let temp_dir = setup(Some("1.22.0\n"), Some("module test\n"));

        let result = discover_version(temp_dir.path());

        assert!(matches!(
            result,
            Err(DiscoveryError::Parse {
                source: ParseError::NoVersionDirective,
                ..
            })
        ));
    }

    #[rstest]
    #[case(Some("1.24.1\n"), Some("module test\n\ngo 1.22\n"), true, Some("1.24.1"), Some("1.22"))]
    #[case(
        Some("1.24.1\n"),
        Some("module test\n\ngo 1.22\n\ntoolchain go1.22.5\n"),
        true,
        Some("1.24.1"),
        Some("1.22.5")
    )]
    #[case(Some("1.22\n"), Some("module test\n\ngo 1.22\n"), false, Some("1.22"), Some("1.22"))]
    #[case(Some("1.22\n"), None, false, Some("1.22"), None)]
    #[case(None, Some("module test\n\ngo 1.22\n"), false, None, Some("1.22"))]
    #[case(Some("1.22\n"), Some("module test\n"), false, Some("1.22"), None)]
    #[case(None, None, false, None, None)]
    fn detect_version_mismatch_returns_expected(
        #[case] go_version: Option<&str>,
        #[case] go_mod: Option<&str>,
        #[case] mismatch: bool,
        #[case] file_version: Option<&str>,
        #[case] mod_version: Option<&str>,
    ) {
        let temp_dir = setup(go_version, go_mod);

        let report = detect_version_mismatch(temp_dir.path());

        assert_eq!(
            report,
            MismatchReport {
                mismatch,
                go_version_file: file_version.map(String::from),
                go_mod: mod_version.map(String::from),
            }
        );
    }

    #[rstest]
    #[case(None, None, "1.22.5", VersionSource::ToolVersions)]
    #[case(Some("1.23.0\n"), None, "1.23.0", VersionSource::GoVersionFile)]
    #[case(None, Some("module test\n\ngo 1.22.0\n"), "1.22.5", VersionSource::ToolVersions)]
    #[case(None, Some("module test\n\ngo 1.23.0\n"), "1.23.0", VersionSource::GoMod)]
    fn discover_version_reads_tool_versions(
        #[case] go_version: Option<&str>,
        #[case] go_mod: Option<&str>,
        #[case] expected_version: &str,
        #[case] expected_source: VersionSource,
    ) {
        let temp_dir = setup(go_version, go_mod);
        fs::write(
            temp_dir.path().join(".tool-versions"),
            "nodejs 20.1.0\ngolang 1.22.5\n",
        )
        .unwrap();

        let discovered = discover_version(temp_dir.path()).unwrap().unwrap();

        assert_eq!(discovered.version, expected_version);
        assert_eq!(discovered.source, expected_source);
        assert_eq!(
            discovered.path,
            temp_dir.path().join(expected_source.as_str())
        );
    }

    #[test]
    fn write_then_discover_round_trips() {
        let temp_dir = setup(None, None);
        let path = temp_dir.path().join(".go-version");

        crate::parser::go_version::write_go_version_file(&path, "1.23.4").unwrap();

        let discovered = discover_version(temp_dir.path()).unwrap().unwrap();
        assert_eq!(discovered.version, "1.23.4");
        assert_eq!(discovered.source, VersionSource::GoVersionFile);
    }
}
