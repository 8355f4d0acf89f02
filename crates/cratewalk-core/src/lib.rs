//! Core data types for cratewalk.
//!
//! This crate defines the configuration a walk runs under: the global config
//! file, the validated per-invocation [`options::WalkOptions`], and the
//! substring [`filter::PackageFilter`] shared by the graph builder and the
//! report renderers.
//!
//! This crate is intentionally free of network I/O.

/// Default maximum traversal depth when neither the CLI nor the config set one.
pub const DEFAULT_MAX_DEPTH: i64 = 10;

/// Default crates.io API endpoint used by the live registry source.
pub const DEFAULT_REGISTRY_URL: &str = "https://crates.io/api/v1/crates";

pub mod config;
pub mod filter;
pub mod options;
