use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

use crate::version::error::ValidationError;

#[derive(Debug, Error)]
pub enum ToolchainError {
    #[error("failed to read versions directory {path:?}: {source}")]
    ReadVersionsDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum StatusError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Toolchain(#[from] ToolchainError),
}

#[derive(Debug, Error)]
pub enum AbiError {
    #[error("failed to run {binary:?}: {source}")]
    Spawn {
        binary: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{binary:?} env -json exited with {status}")]
    Failed { binary: PathBuf, status: ExitStatus },

    #[error("invalid go env output: {0}")]
    InvalidOutput(#[from] serde_json::Error),
}
