//! .tool-versions parser (asdf format)
//!
//! One `tool version` pair per line; the first `golang` or `go` entry with a
//! usable version wins.
//!
//! ```text
//! nodejs 20.1.0
//! golang 1.22.5   # fallbacks after the first version are ignored
//! ```

use tracing::debug;

use crate::parser::traits::{ParseError, VersionFileParser};
use crate::parser::types::{TOOL_VERSIONS_FILE_NAME, VersionSource};
use crate::version::validate::validate_version_string;

/// Tool names asdf uses for Go
const GO_TOOL_NAMES: &[&str] = &["golang", "go"];

/// Parser for .tool-versions files
pub struct ToolVersionsParser;

impl VersionFileParser for ToolVersionsParser {
    fn file_name(&self) -> &'static str {
        TOOL_VERSIONS_FILE_NAME
    }

    fn source(&self) -> VersionSource {
        VersionSource::ToolVersions
    }

    fn parse(&self, content: &str) -> Result<Option<String>, ParseError> {
        Ok(parse_tool_versions_content(content))
    }
}

/// Return the Go version declared in `.tool-versions` content.
///
/// Entries whose version would fail validation are skipped.
pub fn parse_tool_versions_content(content: &str) -> Option<String> {
    content
        .lines()
        .map(|line| strip_comment(line).trim())
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            match (fields.next(), fields.next()) {
                (Some(tool), Some(version)) if GO_TOOL_NAMES.contains(&tool) => Some(version),
                _ => None,
            }
        })
        .find(|version| match validate_version_string(version) {
            Ok(()) => true,
            Err(e) => {
                debug!("Skipping .tool-versions entry '{}': {}", version, e);
                false
            }
        })
        .map(str::to_string)
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(idx) => &line[..idx],
        None => line,
    }
}
