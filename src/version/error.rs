use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("version string cannot be empty")]
    Empty,

    #[error("version string too long ({len} bytes, max {max})")]
    TooLong { len: usize, max: usize },

    #[error("version string contains path traversal (..): {0}")]
    PathTraversal(String),

    #[error("version string cannot be an absolute path: {0}")]
    AbsolutePath(String),

    #[error("version string cannot contain drive letter: {0}")]
    DriveLetter(String),

    #[error("version string cannot contain path separators: {0}")]
    PathSeparator(String),

    #[error("version string cannot start with dot: {0}")]
    HiddenFile(String),

    #[error("version string contains invalid character {ch:?}: {version}")]
    InvalidCharacter { version: String, ch: char },

    #[error("alias name '{0}' is reserved")]
    ReservedAlias(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("version '{0}' not installed")]
    NotInstalled(String),
}

#[derive(Debug, Error)]
pub enum AliasError {
    #[error("failed to read aliases file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write aliases file {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid alias name: {0}")]
    InvalidName(#[source] ValidationError),

    #[error("invalid alias target: {0}")]
    InvalidTarget(#[source] ValidationError),

    #[error("alias '{0}' not found")]
    NotFound(String),
}
