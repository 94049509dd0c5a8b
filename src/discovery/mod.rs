//! Version discovery on disk
//!
//! # Modules
//!
//! - [`engine`]: Precedence between `.go-version` and `go.mod` in one directory
//! - [`finder`]: Upward search for the directory that sets the version
//! - [`scan`]: Tree-wide project scan for fleet audits
//! - [`error`]: Discovery error type

pub mod engine;
pub mod error;
pub mod finder;
pub mod scan;

pub use engine::{DiscoveredVersion, MismatchReport, detect_version_mismatch, discover_version};
pub use error::DiscoveryError;
pub use finder::find_version_dir;
pub use scan::{ProjectInfo, scan_projects};
