//! Shared utilities for cratewalk.
//!
//! This crate provides cross-cutting concerns used by all other cratewalk
//! crates: the error type, filesystem helpers, and terminal status output.

pub mod errors;
pub mod fs;
pub mod progress;
