//! Dependency sources: where a package's direct normal dependencies come from.
//!
//! The graph builder only sees the [`source::DependencySource`] trait. Two
//! implementations live here: [`crates_io::RegistrySource`] talks to a
//! crates.io-compatible HTTP API, and [`fixture::FixtureSource`] reads canned
//! JSON files for offline and test runs.

pub mod crates_io;
pub mod download;
pub mod fixture;
pub mod source;
