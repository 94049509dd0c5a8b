//! Installed toolchains
//!
//! # Modules
//!
//! - [`installed`]: Listing of `<root>/versions` and binary lookup
//! - [`status`]: Installed / corrupted check for a single spec
//! - [`abi`]: ABI variables reported by a toolchain, memoized per binary
//! - [`error`]: Toolchain error types

pub mod abi;
pub mod error;
pub mod installed;
pub mod status;

pub use abi::{AbiCache, AbiVariable, CommandProbe, GoEnvProbe};
pub use error::{AbiError, StatusError, ToolchainError};
pub use installed::{find_go_binary, is_version_corrupted, list_installed_versions};
pub use status::{VersionInstallStatus, check_version_status};
