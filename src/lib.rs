//! Go toolchain version resolution for goenv
//!
//! Decides which Go version applies to a directory (`.go-version`, `go.mod`
//! `go`/`toolchain` directives, global files) and maps version specs onto the
//! toolchains installed under `<root>/versions`.

pub mod config;
pub mod discovery;
pub mod logging;
pub mod manager;
pub mod parser;
pub mod toolchain;
pub mod version;

pub use config::Config;
pub use manager::{CurrentVersion, Manager, ManagerError, VersionOrigin};
