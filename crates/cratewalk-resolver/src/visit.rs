//! Per-build visitation state.

use std::collections::HashSet;

/// Packages whose subtree has already been explored in this builder's lifetime.
#[derive(Debug, Default)]
pub struct VisitedSet {
    visited: HashSet<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a package as visited. Returns `false` if it already was.
    pub fn visit(&mut self, package: &str) -> bool {
        self.visited.insert(package.to_string())
    }
}
