//! go.mod parser
//!
//! Extracts the Go version a module requires. A `toolchain` directive is a
//! hard requirement on the compiler and wins over the `go` language-version
//! directive wherever it appears in the file.
//!
//! Format examples:
//! - Language version: `go 1.22`
//! - Toolchain: `toolchain go1.22.5`
//! - Either may carry an inline comment: `go 1.22 // minimum`

use std::fs;
use std::path::Path;

use regex::Regex;

use crate::parser::traits::{ParseError, VersionFileParser};
use crate::parser::types::{GO_MOD_FILE_NAME, VersionSource};
use crate::version::resolver::normalize_go_version;

/// Toolchain value meaning "whatever the go directive says"
const DEFAULT_TOOLCHAIN: &str = "default";

/// Parser for go.mod files
pub struct GoModParser {
    /// Regex for toolchain directive: `toolchain go1.22.5`
    toolchain_re: Regex,
    /// Regex for go directive: `go 1.22`
    go_re: Regex,
}

impl GoModParser {
    pub fn new() -> Self {
        Self {
            toolchain_re: Regex::new(r"^toolchain\s+(\S+)").unwrap(),
            go_re: Regex::new(r"^go\s+(\S+)").unwrap(),
        }
    }

    /// Return the toolchain version, else the first go directive version.
    pub fn parse_version(&self, content: &str) -> Result<String, ParseError> {
        let mut go_version: Option<String> = None;

        for line in content.lines() {
            let trimmed = line.trim_end_matches('\r').trim();

            if trimmed.is_empty() || trimmed.starts_with("//") {
                continue;
            }

            if let Some(caps) = self.toolchain_re.captures(trimmed) {
                let value = strip_inline_comment(&caps[1]);
                if !value.is_empty() && value != DEFAULT_TOOLCHAIN {
                    return Ok(normalize_go_version(value).to_string());
                }
                continue;
            }

            if go_version.is_some() {
                continue;
            }

            if let Some(caps) = self.go_re.captures(trimmed) {
                let value = strip_inline_comment(&caps[1]);
                if !value.is_empty() {
                    go_version = Some(value.to_string());
                }
            }
        }

        go_version.ok_or(ParseError::NoVersionDirective)
    }
}

impl Default for GoModParser {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionFileParser for GoModParser {
    fn file_name(&self) -> &'static str {
        GO_MOD_FILE_NAME
    }

    fn source(&self) -> VersionSource {
        VersionSource::GoMod
    }

    fn parse(&self, content: &str) -> Result<Option<String>, ParseError> {
        self.parse_version(content).map(Some)
    }
}

/// `1.22//comment` -> `1.22`
fn strip_inline_comment(token: &str) -> &str {
    match token.find("//") {
        Some(idx) => token[..idx].trim(),
        None => token,
    }
}

/// Read a go.mod file and return the version it requires.
pub fn parse_go_mod_file(path: &Path) -> Result<String, ParseError> {
    let content = fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    GoModParser::new().parse_version(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    #[rstest]
    #[case("module example.com/test\n\ngo 1.24.3\n", "1.24.3")]
    #[case("module example.com/test\n\ngo 1.22\n", "1.22")]
    #[case("module example.com/test\n\ngo 1.22\n\ntoolchain go1.22.5\n", "1.22.5")]
    #[case("module example.com/test\n\ngo 1.21 // minimum version\n", "1.21")]
    #[case("module example.com/test\n\ngo 1.21//tight comment\n", "1.21")]
    #[case("// go 1.18\nmodule example.com/test\n\ngo 1.21\n", "1.21")]
    #[case("go 1.21", "1.21")]
    #[case("module example.com/test\n\n   go    1.21.5   \n", "1.21.5")]
    #[case("module example.com/test\r\n\r\ngo 1.22\r\n\r\ntoolchain go1.23.1\r\n", "1.23.1")]
    fn parse_version_returns_expected(#[case] content: &str, #[case] expected: &str) {
        let parser = GoModParser::new();
        assert_eq!(parser.parse_version(content).unwrap(), expected);
    }

    #[test]
    fn parse_version_prefers_toolchain_declared_before_go() {
        let parser = GoModParser::new();
        let content = "module example.com/test\n\ntoolchain go1.24.1\n\ngo 1.22\n";
        assert_eq!(parser.parse_version(content).unwrap(), "1.24.1");
    }

    #[test]
    fn parse_version_uses_first_go_directive() {
        let parser = GoModParser::new();
        let content = "module example.com/test\n\ngo 1.21\ngo 1.22\n";
        assert_eq!(parser.parse_version(content).unwrap(), "1.21");
    }

    #[test]
    fn parse_version_ignores_default_toolchain() {
        let parser = GoModParser::new();
        let content = "module example.com/test\n\ngo 1.22\n\ntoolchain default\n";
        assert_eq!(parser.parse_version(content).unwrap(), "1.22");
    }

    #[test]
    fn parse_version_ignores_require_blocks() {
        let parser = GoModParser::new();
        let content = r#"module example.com/myapp

go 1.21

require (
	golang.org/x/text v0.14.0
	golang.org/x/net v0.20.0 // indirect
)
"#;
        assert_eq!(parser.parse_version(content).unwrap(), "1.21");
    }

    #[rstest]
    #[case("module example.com/test\n")]
    #[case("")]
    #[case("module example.com/test\n\ngo\n")]
    #[case("module example.com/test\n\ngolang 1.21\n")]
    fn parse_version_fails_without_directive(#[case] content: &str) {
        let parser = GoModParser::new();
        assert!(matches!(
            parser.parse_version(content),
            Err(ParseError::NoVersionDirective)
        ));
    }

    #[test]
    fn parse_go_mod_file_reads_from_disk() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("go.mod");
        fs::write(&path, "module test\n\ngo 1.22\n\ntoolchain go1.22.5\n").unwrap();

        assert_eq!(parse_go_mod_file(&path).unwrap(), "1.22.5");
    }

    #[test]
    fn parse_go_mod_file_reports_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = parse_go_mod_file(&temp_dir.path().join("go.mod"));
        assert!(matches!(result, Err(ParseError::Io { .. })));
    }
}
