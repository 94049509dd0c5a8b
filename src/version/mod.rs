//! Version string handling
//!
//! This module provides the pure, filesystem-free core of version resolution:
//! validating user input, ordering Go version strings, and resolving a spec
//! against a list of installed toolchains.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Validate   │────▶│    Alias    │────▶│  Resolver   │
//! │ (path-safe) │     │  (expand)   │     │ (installed) │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                                                ▼
//!                                         ┌─────────────┐
//!                                         │   Semver    │
//!                                         │ (ordering)  │
//!                                         └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`validate`]: Rejects path-hostile version specs and alias names
//! - [`semver`]: Go version comparison and the `satisfies` predicate
//! - [`resolver`]: Exact, partial, `latest` and `system` spec resolution
//! - [`alias`]: Alias expansion trait and the flat-file alias store
//! - [`error`]: Error types for validation, resolution and aliases

pub mod alias;
pub mod error;
pub mod resolver;
pub mod semver;
pub mod validate;
