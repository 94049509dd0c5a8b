//! Parser trait definition

use std::path::PathBuf;

use crate::parser::types::VersionSource;

/// Trait for parsing files that declare a Go version
pub trait VersionFileParser {
    /// File name this parser reads inside a project directory
    fn file_name(&self) -> &'static str;

    /// Source tag attached to versions found by this parser
    fn source(&self) -> VersionSource;

    /// Parse the content and extract the declared version
    ///
    /// `Ok(None)` means the file declares nothing, which is not an error for
    /// every format.
    fn parse(&self, content: &str) -> Result<Option<String>, ParseError>;
}

/// Error type for parsing operations
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// go.mod has neither a `toolchain` nor a `go` directive
    #[error("no go version directive found in go.mod")]
    NoVersionDirective,

    /// Failed to read the file
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
