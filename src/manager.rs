//! Facade over the goenv root
//!
//! [`Manager`] answers the two questions everything else builds on: which
//! version applies here ([`Manager::current_version`]) and which installed
//! toolchain a spec means ([`Manager::resolve_version_spec`]). Nothing is
//! cached between calls; the versions directory is listed again every time.

use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::config::{Config, GOENV_VERSION_ENV};
use crate::discovery::{DiscoveredVersion, DiscoveryError, discover_version, find_version_dir};
use crate::parser::go_version::{
    WriteError, read_go_version_file, unset_version_file, write_go_version_file,
};
use crate::parser::traits::ParseError;
use crate::parser::types::GO_VERSION_FILE_NAME;
use crate::toolchain::error::{StatusError, ToolchainError};
use crate::toolchain::installed::{expected_go_binary, find_go_binary, list_installed_versions};
use crate::toolchain::status::{VersionInstallStatus, check_version_status};
use crate::version::alias::{AliasFile, AliasResolver};
use crate::version::error::{AliasError, ResolveError, ValidationError};
use crate::version::resolver;
use crate::version::validate::{SYSTEM_VERSION, validate_version_string};

/// Binary looked up on PATH for the `system` version
const SYSTEM_GO_BINARY: &str = "go";

#[derive(Debug, Error)]
pub enum ManagerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("version '{0}' is not installed")]
    NotInstalled(String),

    #[error("version '{version}' is corrupted: {path:?} is missing")]
    Corrupted { version: String, path: PathBuf },

    #[error("no version set; use a .go-version file, .tool-versions, go.mod or the global version")]
    NoVersionSet,

    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error(transparent)]
    Alias(#[from] AliasError),

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<ResolveError> for ManagerError {
    fn from(error: ResolveError) -> Self {
        match error {
            ResolveError::NotInstalled(spec) => ManagerError::NotInstalled(spec),
        }
    }
}

impl From<ToolchainError> for ManagerError {
    fn from(error: ToolchainError) -> Self {
        match error {
            ToolchainError::ReadVersionsDir { path, source } => ManagerError::Io { path, source },
        }
    }
}

impl From<StatusError> for ManagerError {
    fn from(error: StatusError) -> Self {
        match error {
            StatusError::Validation(e) => e.into(),
            StatusError::Toolchain(e) => e.into(),
        }
    }
}

impl From<WriteError> for ManagerError {
    fn from(error: WriteError) -> Self {
        match error {
            WriteError::Invalid(e) => e.into(),
            WriteError::Io { path, source } => ManagerError::Io { path, source },
        }
    }
}

/// Where the current version came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionOrigin {
    /// Environment variable override
    Environment(String),
    /// Local `.go-version`, `.tool-versions` or `go.mod`
    File(PathBuf),
    /// Global version file under the root
    Global(PathBuf),
}

impl fmt::Display for VersionOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionOrigin::Environment(var) => write!(f, "{} environment variable", var),
            VersionOrigin::File(path) | VersionOrigin::Global(path) => {
                write!(f, "{}", path.display())
            }
        }
    }
}

/// The version in effect and its origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentVersion {
    /// Spec as written; may still be partial or an alias
    pub version: String,
    pub origin: VersionOrigin,
}

impl fmt::Display for CurrentVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (set by {})", self.version, self.origin)
    }
}

impl From<DiscoveredVersion> for CurrentVersion {
    fn from(discovered: DiscoveredVersion) -> Self {
        Self {
            version: discovered.version,
            origin: VersionOrigin::File(discovered.path),
        }
    }
}

pub struct Manager<A: AliasResolver = AliasFile> {
    config: Config,
    aliases: A,
}

impl Manager<AliasFile> {
    /// Manager using the alias file under the configured root
    pub fn new(config: Config) -> Self {
        let aliases = AliasFile::new(config.aliases_file());
        Self { config, aliases }
    }
}

impl<A: AliasResolver> Manager<A> {
    pub fn with_aliases(config: Config, aliases: A) -> Self {
        Self { config, aliases }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn aliases(&self) -> &A {
        &self.aliases
    }

    /// Determine the version in effect.
    ///
    /// Order: the `GOENV_VERSION` override, then the nearest `.go-version`,
    /// `.tool-versions` or `go.mod` walking up from `GOENV_DIR` and the working
    /// directory (or only `dir` when given), then the global version files.
    pub fn current_version(&self, dir: Option<&Path>) -> Result<CurrentVersion, ManagerError> {
        if let Some(version) = &self.config.version_override {
            debug!("Using {}={}", GOENV_VERSION_ENV, version);
            return Ok(CurrentVersion {
                version: version.clone(),
                origin: VersionOrigin::Environment(GOENV_VERSION_ENV.to_string()),
            });
        }

        if let Some(discovered) = self.local_version(dir)? {
            debug!(
                "Using {} from {:?}",
                discovered.version, discovered.path
            );
            return Ok(discovered.into());
        }

        self.global_version()
    }

    /// [`Self::current_version`] plus its resolution to an installed version.
    pub fn current_version_resolved(
        &self,
        dir: Option<&Path>,
    ) -> Result<(String, CurrentVersion), ManagerError> {
        let current = self.current_version(dir)?;
        let resolved = self.resolve_version_spec(&current.version)?;
        Ok((resolved, current))
    }

    /// Resolve a spec (exact, partial, alias, `latest` or `system`) to an
    /// installed version.
    pub fn resolve_version_spec(&self, spec: &str) -> Result<String, ManagerError> {
        let expanded = self.expand_alias(spec)?;
        let installed = self.installed_versions()?;
        let version = resolver::resolve_version_spec(&expanded, &installed)?;
        debug!("Resolved '{}' to {}", spec, version);
        Ok(version)
    }

    /// Check that a spec names a usable toolchain.
    pub fn validate_version(&self, spec: &str) -> Result<(), ManagerError> {
        self.go_binary(spec).map(|_| ())
    }

    /// Installation state of a spec. A missing version is not an error.
    pub fn status(&self, spec: &str) -> Result<VersionInstallStatus, ManagerError> {
        Ok(check_version_status(
            &self.config.versions_dir(),
            spec,
            &self.aliases,
        )?)
    }

    /// Path of the go binary a spec selects.
    ///
    /// `system` yields the bare `go` command to be looked up on PATH.
    pub fn go_binary(&self, spec: &str) -> Result<PathBuf, ManagerError> {
        let expanded = self.expand_alias(spec)?;
        if expanded == SYSTEM_VERSION {
            return Ok(PathBuf::from(SYSTEM_GO_BINARY));
        }

        let version = if self.config.version_dir(&expanded).is_dir() {
            expanded
        } else {
            resolver::resolve_version_spec(&expanded, &self.installed_versions()?)?
        };

        let version_dir = self.config.version_dir(&version);
        find_go_binary(&version_dir).ok_or_else(|| ManagerError::Corrupted {
            path: expected_go_binary(&version_dir),
            version,
        })
    }

    /// Installed versions, oldest first.
    pub fn installed_versions(&self) -> Result<Vec<String>, ManagerError> {
        Ok(list_installed_versions(&self.config.versions_dir())?)
    }

    /// Pin `dir` to a version by writing its `.go-version`.
    ///
    /// Aliases are expanded first, so the file holds the target version.
    pub fn set_local_version(&self, dir: &Path, spec: &str) -> Result<PathBuf, ManagerError> {
        self.pin_version(dir.join(GO_VERSION_FILE_NAME), spec)
    }

    /// Remove the `.go-version` of `dir`, if any.
    pub fn unset_local_version(&self, dir: &Path) -> Result<(), ManagerError> {
        Ok(unset_version_file(&dir.join(GO_VERSION_FILE_NAME))?)
    }

    /// Set the version used when no local file applies.
    pub fn set_global_version(&self, spec: &str) -> Result<PathBuf, ManagerError> {
        self.pin_version(self.config.global_version_file(), spec)
    }

    fn pin_version(&self, path: PathBuf, spec: &str) -> Result<PathBuf, ManagerError> {
        let expanded = self.expand_alias(spec)?;
        self.validate_version(&expanded)?;
        write_go_version_file(&path, &expanded)?;
        debug!("Pinned {} in {:?}", expanded, path);
        Ok(path)
    }

    fn expand_alias(&self, spec: &str) -> Result<String, ManagerError> {
        validate_version_string(spec)?;
        let expanded = self.aliases.resolve_alias(spec)?;
        validate_version_string(&expanded)?;
        Ok(expanded)
    }

    fn local_version(&self, dir: Option<&Path>) -> Result<Option<DiscoveredVersion>, ManagerError> {
        if let Some(dir) = dir {
            return match find_version_dir(dir, true) {
                Some(found) => Ok(discover_version(&found)?),
                None => Ok(None),
            };
        }

        let starts = match (&self.config.current_dir, std::env::current_dir()) {
            (None, Err(e)) => return Err(DiscoveryError::CurrentDir(e).into()),
            (goenv_dir, cwd) => search_starts(goenv_dir.as_deref(), cwd.ok()),
        };

        for start in starts {
            if let Some(found) = find_version_dir(&start, false) {
                return Ok(discover_version(&found)?);
            }
        }
        Ok(None)
    }

    fn global_version(&self) -> Result<CurrentVersion, ManagerError> {
        for path in self.config.global_version_files() {
            match read_go_version_file(&path) {
                Ok(Some(version)) => {
                    debug!("Using global {} from {:?}", version, path);
                    return Ok(CurrentVersion {
                        version,
                        origin: VersionOrigin::Global(path),
                    });
                }
                Ok(None) => debug!("Global version file {:?} is empty", path),
                Err(ParseError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {}
                Err(ParseError::Io { path, source }) => {
                    return Err(ManagerError::Io { path, source });
                }
                Err(ParseError::NoVersionDirective) => {}
            }
        }

        Err(ManagerError::NoVersionSet)
    }
}

/// Directories to walk up from, in order: `GOENV_DIR` made absolute against
/// the working directory, then the working directory itself.
fn search_starts(goenv_dir: Option<&Path>, cwd: Option<PathBuf>) -> Vec<PathBuf> {
    let Some(goenv_dir) = goenv_dir else {
        return cwd.into_iter().collect();
    };

    let goenv_dir = match &cwd {
        Some(cwd) if goenv_dir.is_relative() => cwd.join(goenv_dir),
        _ => goenv_dir.to_path_buf(),
    };

    let mut starts = vec![goenv_dir];
    if let Some(cwd) = cwd {
        if cwd != starts[0] {
            starts.push(cwd);
        }
    }
    starts
}
