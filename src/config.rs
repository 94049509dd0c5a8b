use std::path::PathBuf;

// =============================================================================
// Environment variables
// =============================================================================

/// Root of the goenv tree (versions, global version file, aliases)
pub const GOENV_ROOT_ENV: &str = "GOENV_ROOT";

/// Directory to start local version discovery from
pub const GOENV_DIR_ENV: &str = "GOENV_DIR";

/// Version override that beats every file
pub const GOENV_VERSION_ENV: &str = "GOENV_VERSION";

/// Enables debug logging when set to anything non-empty
pub const GOENV_DEBUG_ENV: &str = "GOENV_DEBUG";

// =============================================================================
// Layout under the root
// =============================================================================

const DEFAULT_ROOT_DIR_NAME: &str = ".goenv";
const VERSIONS_DIR_NAME: &str = "versions";
const GLOBAL_VERSION_FILE_NAME: &str = "version";
const ALIASES_FILE_NAME: &str = "aliases";

/// Older global version files, checked after `version` in this order
const LEGACY_GLOBAL_FILE_NAMES: &[&str] = &["global", "default"];

/// Runtime configuration read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub root: PathBuf,
    /// Start of local discovery; the working directory when unset
    pub current_dir: Option<PathBuf>,
    pub version_override: Option<String>,
    pub debug: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            root: root_with_env(env_var(GOENV_ROOT_ENV), dirs::home_dir()),
            current_dir: env_var(GOENV_DIR_ENV).map(PathBuf::from),
            version_override: env_var(GOENV_VERSION_ENV),
            debug: env_var(GOENV_DEBUG_ENV).is_some(),
        }
    }

    /// Configuration rooted at `root` with no overrides
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            current_dir: None,
            version_override: None,
            debug: false,
        }
    }

    /// Directory holding one subdirectory per installed toolchain
    pub fn versions_dir(&self) -> PathBuf {
        self.root.join(VERSIONS_DIR_NAME)
    }

    pub fn version_dir(&self, version: &str) -> PathBuf {
        self.versions_dir().join(version)
    }

    /// File written by `global`
    pub fn global_version_file(&self) -> PathBuf {
        self.root.join(GLOBAL_VERSION_FILE_NAME)
    }

    /// Global version files in lookup order
    pub fn global_version_files(&self) -> Vec<PathBuf> {
        std::iter::once(GLOBAL_VERSION_FILE_NAME)
            .chain(LEGACY_GLOBAL_FILE_NAMES.iter().copied())
            .map(|name| self.root.join(name))
            .collect()
    }

    pub fn aliases_file(&self) -> PathBuf {
        self.root.join(ALIASES_FILE_NAME)
    }
}

/// Empty values count as unset.
fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

/// Returns the goenv root.
/// Uses $GOENV_ROOT if set, otherwise ~/.goenv,
/// or <temp>/.goenv if no home directory is available.
fn root_with_env(goenv_root: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    goenv_root.map(PathBuf::from).unwrap_or_else(|| {
        home_dir
            .unwrap_or_else(std::env::temp_dir)
            .join(DEFAULT_ROOT_DIR_NAME)
    })
}
