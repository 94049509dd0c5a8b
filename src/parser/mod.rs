//! Parser layer
//! - traits.rs: Parser trait definition
//! - types.rs: Common types (VersionSource, file names)
//! - go_version.rs: .go-version parser and writer
//! - tool_versions.rs: asdf .tool-versions parser
//! - go_mod.rs: go.mod parser

pub mod go_mod;
pub mod go_version;
pub mod tool_versions;
pub mod traits;
pub mod types;

pub use go_mod::{GoModParser, parse_go_mod_file};
pub use go_version::{GoVersionFileParser, parse_go_version_content, read_go_version_file};
pub use tool_versions::{ToolVersionsParser, parse_tool_versions_content};
pub use traits::{ParseError, VersionFileParser};
pub use types::{GO_MOD_FILE_NAME, GO_VERSION_FILE_NAME, TOOL_VERSIONS_FILE_NAME, VersionSource};
