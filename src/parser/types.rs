//! Common types for version file parsers

use std::fmt;

use serde::Serialize;

/// Per-project version file name
pub const GO_VERSION_FILE_NAME: &str = ".go-version";

/// asdf tool version file name
pub const TOOL_VERSIONS_FILE_NAME: &str = ".tool-versions";

/// Go module file name
pub const GO_MOD_FILE_NAME: &str = "go.mod";

/// Where a version declaration came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub enum VersionSource {
    /// Explicit `.go-version` file
    #[serde(rename = ".go-version")]
    GoVersionFile,
    /// `golang` entry in an asdf `.tool-versions` file
    #[serde(rename = ".tool-versions")]
    ToolVersions,
    /// `go` or `toolchain` directive in `go.mod`
    #[serde(rename = "go.mod")]
    GoMod,
    /// No version file
    #[default]
    #[serde(rename = "none")]
    None,
}

impl VersionSource {
    /// Returns the string representation of the source
    pub fn as_str(&self) -> &'static str {
        match self {
            VersionSource::GoVersionFile => GO_VERSION_FILE_NAME,
            VersionSource::ToolVersions => TOOL_VERSIONS_FILE_NAME,
            VersionSource::GoMod => GO_MOD_FILE_NAME,
            VersionSource::None => "none",
        }
    }

    /// Returns the source matching a file name, if it declares a version
    pub fn from_file_name(name: &str) -> Option<Self> {
        match name {
            GO_VERSION_FILE_NAME => Some(VersionSource::GoVersionFile),
            TOOL_VERSIONS_FILE_NAME => Some(VersionSource::ToolVersions),
            GO_MOD_FILE_NAME => Some(VersionSource::GoMod),
            _ => None,
        }
    }
}

impl fmt::Display for VersionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for VersionSource {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(VersionSource::None),
            name => Self::from_file_name(name).ok_or(()),
        }
    }
}
