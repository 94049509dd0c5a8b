//! Project scanning across a directory tree
//!
//! Collects the version declared by every project below a root directory,
//! skipping hidden directories and well-known dependency and build output
//! directories.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::discovery::engine::{DiscoveredVersion, read_declared, read_explicit, select_version};
use crate::discovery::error::DiscoveryError;
use crate::parser::go_mod::GoModParser;
use crate::parser::traits::VersionFileParser;
use crate::parser::types::VersionSource;

/// Directories that never contain projects worth reporting
const SKIP_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    "vendor",
    ".svn",
    ".hg",
    "__pycache__",
    "venv",
    ".env",
    "dist",
    "build",
    "target",
    ".idea",
    ".vscode",
    ".next",
    ".cache",
];

/// A project found during a scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectInfo {
    /// Project directory
    pub path: PathBuf,
    pub version: String,
    pub source: VersionSource,
}

/// Whether the scanner should not descend into a directory with this name.
pub fn should_skip(dir_name: &str) -> bool {
    dir_name.starts_with('.') || SKIP_DIRS.contains(&dir_name)
}

/// Find every project below `root`.
///
/// `max_depth` limits how many levels below `root` are visited; `0` means
/// unlimited. Results follow walk order. Unreadable directories and files
/// that fail to parse are skipped; a missing root yields no projects.
pub fn scan_projects(root: &Path, max_depth: usize) -> Vec<ProjectInfo> {
    let mut walker = WalkDir::new(root);
    if max_depth > 0 {
        walker = walker.max_depth(max_depth);
    }

    let go_mod_parser = GoModParser::new();

    walker
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_skipped_dir(entry))
        .filter_map(|entry| {
            entry
                .inspect_err(|e| debug!("Skipping unreadable entry: {}", e))
                .ok()
        })
        .filter(|entry| entry.file_type().is_dir())
        .filter_map(|entry| project_in(entry.path(), &go_mod_parser))
        .collect()
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() && should_skip(&entry.file_name().to_string_lossy())
}

fn project_in(dir: &Path, go_mod_parser: &GoModParser) -> Option<ProjectInfo> {
    let tolerant = |name: &str, declared: Result<Option<DiscoveredVersion>, DiscoveryError>| {
        declared.unwrap_or_else(|e| {
            warn!("Skipping {} in {:?}: {}", name, dir, e);
            None
        })
    };

    let file = tolerant("explicit version file", read_explicit(dir));
    let module = tolerant(go_mod_parser.file_name(), read_declared(dir, go_mod_parser));

    select_version(file, module).map(|discovered| ProjectInfo {
        path: dir.to_path_buf(),
        version: discovered.version,
        source: discovered.source,
    })
}
