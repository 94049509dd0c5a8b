//! .go-version parser
//!
//! The first line that is neither blank nor a `#` comment holds the version.
//! CRLF line endings are accepted.
//!
//! ```text
//! # pinned for the release branch
//! 1.22.5
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::parser::traits::{ParseError, VersionFileParser};
use crate::parser::types::{GO_VERSION_FILE_NAME, VersionSource};
use crate::version::error::ValidationError;
use crate::version::validate::validate_version_string;

/// Parser for .go-version files
pub struct GoVersionFileParser;

impl VersionFileParser for GoVersionFileParser {
    fn file_name(&self) -> &'static str {
        GO_VERSION_FILE_NAME
    }

    fn source(&self) -> VersionSource {
        VersionSource::GoVersionFile
    }

    fn parse(&self, content: &str) -> Result<Option<String>, ParseError> {
        Ok(parse_go_version_content(content))
    }
}

/// Return the first non-empty, non-comment line of a version file.
pub fn parse_go_version_content(content: &str) -> Option<String> {
    content
        .lines()
        .map(|line| line.trim_end_matches('\r').trim())
        .find(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
}

/// Read a version file from disk.
pub fn read_go_version_file(path: &Path) -> Result<Option<String>, ParseError> {
    let content = fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_go_version_content(&content))
}

/// Error returned when writing a version file
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("failed to write version file {path:?}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Write a single version to a version file, creating parent directories.
pub fn write_go_version_file(path: &Path, version: &str) -> Result<(), WriteError> {
    validate_version_string(version)?;

    let to_write_error = |source| WriteError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(to_write_error)?;
    }
    fs::write(path, format!("{}\n", version)).map_err(to_write_error)
}

/// Remove a version file. A file that does not exist is already unset.
pub fn unset_version_file(path: &Path) -> Result<(), WriteError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(source) => Err(WriteError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}
