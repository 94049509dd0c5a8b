use std::path::PathBuf;

use thiserror::Error;

use crate::parser::traits::ParseError;

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("failed to get current directory: {0}")]
    CurrentDir(#[source] std::io::Error),
}
