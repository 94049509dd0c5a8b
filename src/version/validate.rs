//! Version string validation
//!
//! Version specs end up as path segments (`versions/<spec>/bin/go`), so every
//! spec coming from a user, an environment variable or a version file is
//! checked here before it touches the filesystem.
//!
//! Rejected, in order of check:
//! - empty strings
//! - strings longer than 255 bytes
//! - `..` anywhere (path traversal, CVE-2022-35861)
//! - a leading `/` or `\` (absolute path)
//! - a drive-letter prefix such as `C:` (Windows absolute path)
//! - embedded `/` or `\` (path separator injection)
//! - a leading `.` (hidden file collision, e.g. `.go-version`)
//! - ASCII control characters and spaces

use crate::version::error::ValidationError;

/// Longest accepted version string, in bytes
pub const MAX_VERSION_LENGTH: usize = 255;

/// Longest accepted alias name, in bytes
pub const MAX_ALIAS_LENGTH: usize = 64;

/// Keyword for the Go found on PATH
pub const SYSTEM_VERSION: &str = "system";

/// Keyword for the newest installed toolchain
pub const LATEST_VERSION: &str = "latest";

/// Check that a version spec is safe to use as a path segment.
pub fn validate_version_string(version: &str) -> Result<(), ValidationError> {
    if version.is_empty() {
        return Err(ValidationError::Empty);
    }

    if version.len() > MAX_VERSION_LENGTH {
        return Err(ValidationError::TooLong {
            len: version.len(),
            max: MAX_VERSION_LENGTH,
        });
    }

    if version.contains("..") {
        return Err(ValidationError::PathTraversal(version.to_string()));
    }

    if version.starts_with('/') || version.starts_with('\\') {
        return Err(ValidationError::AbsolutePath(version.to_string()));
    }

    if has_drive_letter(version) {
        return Err(ValidationError::DriveLetter(version.to_string()));
    }

    if version.contains('/') || version.contains('\\') {
        return Err(ValidationError::PathSeparator(version.to_string()));
    }

    if version.starts_with('.') {
        return Err(ValidationError::HiddenFile(version.to_string()));
    }

    if let Some(ch) = version.chars().find(|&c| is_forbidden_char(c)) {
        return Err(ValidationError::InvalidCharacter {
            version: version.escape_default().to_string(),
            ch,
        });
    }

    Ok(())
}

/// Check that an alias name is usable as a key in the aliases file.
pub fn validate_alias_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::Empty);
    }

    if name == SYSTEM_VERSION || name == LATEST_VERSION {
        return Err(ValidationError::ReservedAlias(name.to_string()));
    }

    if let Some(ch) = name
        .chars()
        .find(|c| "=/\\:;\"'` \t\n\r".contains(*c) || c.is_ascii_control())
    {
        return Err(ValidationError::InvalidCharacter {
            version: name.escape_default().to_string(),
            ch,
        });
    }

    if name.contains("..") {
        return Err(ValidationError::PathTraversal(name.to_string()));
    }

    if name.starts_with('.') {
        return Err(ValidationError::HiddenFile(name.to_string()));
    }

    if name.len() > MAX_ALIAS_LENGTH {
        return Err(ValidationError::TooLong {
            len: name.len(),
            max: MAX_ALIAS_LENGTH,
        });
    }

    Ok(())
}

fn has_drive_letter(version: &str) -> bool {
    let bytes = version.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

fn is_forbidden_char(c: char) -> bool {
    c.is_ascii_control() || c == ' '
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1.21.0")]
    #[case("1.22.1")]
    #[case("1.21rc1")]
    #[case("1.22beta1")]
    #[case("system")]
    #[case("latest")]
    #[case("1.21.0-custom")]
    #[case("go_1.21")]
    #[case("1.21.0+build")]
    #[case("1")]
    fn validate_version_string_accepts_plain_versions(#[case] version: &str) {
        assert!(validate_version_string(version).is_ok(), "{version}");
    }

    #[rstest]
    #[case("", ValidationError::Empty)]
    #[case("../etc/passwd", ValidationError::PathTraversal("../etc/passwd".into()))]
    #[case("1.21/../../bin", ValidationError::PathTraversal("1.21/../../bin".into()))]
    #[case("1..21", ValidationError::PathTraversal("1..21".into()))]
    #[case("/usr/local/go", ValidationError::AbsolutePath("/usr/local/go".into()))]
    #[case("\\Go", ValidationError::AbsolutePath("\\Go".into()))]
    #[case("C:\\Go", ValidationError::DriveLetter("C:\\Go".into()))]
    #[case("d:go", ValidationError::DriveLetter("d:go".into()))]
    #[case("1.21/bin", ValidationError::PathSeparator("1.21/bin".into()))]
    #[case("1.21\\bin", ValidationError::PathSeparator("1.21\\bin".into()))]
    #[case(".hidden", ValidationError::HiddenFile(".hidden".into()))]
    #[case(".go-version", ValidationError::HiddenFile(".go-version".into()))]
    fn validate_version_string_rejects_hostile_input(
        #[case] version: &str,
        #[case] expected: ValidationError,
    ) {
        assert_eq!(validate_version_string(version), Err(expected));
    }

    #[rstest]
    #[case("1.21\x00", '\x00')]
    #[case("1.21\n", '\n')]
    #[case("1.21\t0", '\t')]
    #[case("1.21\r", '\r')]
    #[case("1.21\x7f", '\x7f')]
    #[case("1.21 0", ' ')]
    #[case("system\n", '\n')]
    fn validate_version_string_rejects_control_characters(
        #[case] version: &str,
        #[case] expected: char,
    ) {
        match validate_version_string(version) {
            Err(ValidationError::InvalidCharacter { ch, .. }) => assert_eq!(ch, expected),
            other => panic!("expected InvalidCharacter for {version:?}, got {other:?}"),
        }
    }

    #[test]
    fn validate_version_string_enforces_length_limit() {
        let max = "1".repeat(MAX_VERSION_LENGTH);
        assert!(validate_version_string(&max).is_ok());

        let too_long = "1".repeat(MAX_VERSION_LENGTH + 1);
        assert_eq!(
            validate_version_string(&too_long),
            Err(ValidationError::TooLong { len: 256, max: 255 })
        );
    }

    #[test]
    fn validate_version_string_checks_traversal_before_separators() {
        // "../" trips both checks; the traversal error is the one reported
        assert!(matches!(
            validate_version_string("../1.21"),
            Err(ValidationError::PathTraversal(_))
        ));
    }

    #[rstest]
    #[case("stable", true)]
    #[case("my-go_1", true)]
    #[case("", false)]
    #[case("system", false)]
    #[case("latest", false)]
    #[case("a=b", false)]
    #[case("a b", false)]
    #[case("a:b", false)]
    #[case("..x", false)]
    #[case(".x", false)]
    fn validate_alias_name_returns_expected(#[case] name: &str, #[case] ok: bool) {
        assert_eq!(validate_alias_name(name).is_ok(), ok, "{name}");
    }

    #[test]
    fn validate_alias_name_enforces_length_limit() {
        assert!(validate_alias_name(&"a".repeat(64)).is_ok());
        assert!(matches!(
            validate_alias_name(&"a".repeat(65)),
            Err(ValidationError::TooLong { .. })
        ));
    }
}
