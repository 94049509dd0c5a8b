//! Upward search for the directory that sets the version

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::parser::types::{GO_MOD_FILE_NAME, GO_VERSION_FILE_NAME, TOOL_VERSIONS_FILE_NAME};

/// Find the nearest directory holding `.go-version`, `.tool-versions` or
/// `go.mod`.
///
/// With `pinned`, only `start` itself is considered. Otherwise the search
/// walks toward the filesystem root and stops at the first match. `None`
/// means no local file, so the global version applies.
pub fn find_version_dir(start: &Path, pinned: bool) -> Option<PathBuf> {
    if pinned {
        return has_version_file(start).then(|| start.to_path_buf());
    }

    let found = start.ancestors().find(|dir| has_version_file(dir));
    match found {
        Some(dir) => {
            debug!("Found version file in {:?}", dir);
            Some(dir.to_path_buf())
        }
        None => {
            debug!("No version file above {:?}", start);
            None
        }
    }
}

fn has_version_file(dir: &Path) -> bool {
    [GO_VERSION_FILE_NAME, TOOL_VERSIONS_FILE_NAME, GO_MOD_FILE_NAME]
        .iter()
        .any(|name| dir.join(name).is_file())
}
