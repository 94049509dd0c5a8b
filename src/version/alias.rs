//! Version aliases
//!
//! Aliases live in a flat `name=version` file under the goenv root:
//!
//! ```text
//! # goenv aliases
//! # Format: alias_name=target_version
//! stable=1.22.5
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[cfg(test)]
use mockall::automock;
use tracing::debug;

use crate::version::error::AliasError;
use crate::version::validate::{validate_alias_name, validate_version_string};

const ALIASES_HEADER: &str = "# goenv aliases\n# Format: alias_name=target_version\n";

/// Trait for expanding alias names into version specs
#[cfg_attr(test, automock)]
pub trait AliasResolver {
    /// Return the alias target, or the input unchanged when it is not an alias
    fn resolve_alias(&self, name_or_version: &str) -> Result<String, AliasError>;
}

/// Alias store backed by `<root>/aliases`
#[derive(Debug, Clone)]
pub struct AliasFile {
    path: PathBuf,
}

impl AliasFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all aliases. A missing file means no aliases.
    pub fn list(&self) -> Result<BTreeMap<String, String>, AliasError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(AliasError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        Ok(parse_aliases(&content))
    }

    /// Create or update an alias.
    pub fn set(&self, name: &str, version: &str) -> Result<(), AliasError> {
        validate_alias_name(name).map_err(AliasError::InvalidName)?;
        validate_version_string(version).map_err(AliasError::InvalidTarget)?;

        let mut aliases = self.list()?;
        aliases.insert(name.to_string(), version.to_string());
        self.write(&aliases)
    }

    /// Remove an alias, failing when it does not exist.
    pub fn remove(&self, name: &str) -> Result<(), AliasError> {
        let mut aliases = self.list()?;
        if aliases.remove(name).is_none() {
            return Err(AliasError::NotFound(name.to_string()));
        }
        self.write(&aliases)
    }

    fn write(&self, aliases: &BTreeMap<String, String>) -> Result<(), AliasError> {
        let to_write_error = |source| AliasError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(to_write_error)?;
        }

        let mut content = String::from(ALIASES_HEADER);
        for (name, version) in aliases {
            content.push_str(&format!("{}={}\n", name, version));
        }

        fs::write(&self.path, content).map_err(to_write_error)
    }
}

impl AliasResolver for AliasFile {
    fn resolve_alias(&self, name_or_version: &str) -> Result<String, AliasError> {
        let aliases = self.list()?;
        match aliases.get(name_or_version) {
            Some(target) => {
                debug!("Alias '{}' resolves to '{}'", name_or_version, target);
                Ok(target.clone())
            }
            None => Ok(name_or_version.to_string()),
        }
    }
}

fn parse_aliases(content: &str) -> BTreeMap<String, String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(name, version)| (name.trim(), version.trim()))
        .filter(|(name, version)| !name.is_empty() && !version.is_empty())
        .map(|(name, version)| (name.to_string(), version.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn list_returns_empty_when_file_missing() {
        let temp_dir = TempDir::new().unwrap();
        let aliases = AliasFile::new(temp_dir.path().join("aliases"));

        assert!(aliases.list().unwrap().is_empty());
    }

    #[test]
    fn parse_aliases_skips_comments_and_malformed_lines() {
        let content = "# goenv aliases\n\nstable = 1.22.5\r\nbroken\n=1.0\nempty=\nlts=1.21.13\n";
        let aliases = parse_aliases(content);

        assert_eq!(aliases.len(), 2);
        assert_eq!(aliases["stable"], "1.22.5");
        assert_eq!(aliases["lts"], "1.21.13");
    }

    #[test]
    fn set_then_resolve_returns_target() {
        let temp_dir = TempDir::new().unwrap();
        let aliases = AliasFile::new(temp_dir.path().join("aliases"));

        aliases.set("stable", "1.22.5").unwrap();
        aliases.set("lts", "1.21.13").unwrap();

        assert_eq!(aliases.resolve_alias("stable").unwrap(), "1.22.5");
        assert_eq!(aliases.resolve_alias("1.23.0").unwrap(), "1.23.0");

        let written = fs::read_to_string(aliases.path()).unwrap();
        assert_eq!(
            written,
            "# goenv aliases\n# Format: alias_name=target_version\nlts=1.21.13\nstable=1.22.5\n"
        );
    }

    #[test]
    fn set_rejects_reserved_name_and_hostile_target() {
        let temp_dir = TempDir::new().unwrap();
        let aliases = AliasFile::new(temp_dir.path().join("aliases"));

        assert!(matches!(
            aliases.set("system", "1.22.5"),
            Err(AliasError::InvalidName(_))
        ));
        assert!(matches!(
            aliases.set("evil", "../../bin"),
            Err(AliasError::InvalidTarget(_))
        ));
        assert!(!aliases.path().exists());
    }

    #[test]
    fn remove_deletes_existing_alias() {
        let temp_dir = TempDir::new().unwrap();
        let aliases = AliasFile::new(temp_dir.path().join("aliases"));
        aliases.set("stable", "1.22.5").unwrap();

        aliases.remove("stable").unwrap();

        assert!(aliases.list().unwrap().is_empty());
        assert!(matches!(
            aliases.remove("stable"),
            Err(AliasError::NotFound(name)) if name == "stable"
        ));
    }
}
