//! Offline dependency source reading `<package>.json` fixtures from a directory.
//!
//! A fixture that does not exist yet is created from the built-in example graph
//! and persisted, so later runs read the same data back even if the file is
//! edited by hand in between.

use std::path::{Path, PathBuf};

use cratewalk_util::errors::{CratewalkError, CratewalkResult};
use serde::{Deserialize, Serialize};

use crate::source::DependencySource;

/// Built-in example graph used to seed missing fixtures.
const BUILTIN_GRAPH: &[(&str, &[&str])] = &[
    ("serde", &["serde_derive", "serde_json", "serde_yaml"]),
    ("serde_derive", &["proc-macro2", "quote", "syn"]),
    ("serde_json", &["itoa", "ryu", "serde"]),
    ("tokio", &["tokio-macros", "mio", "num_cpus"]),
    ("A", &["B", "C"]),
    ("B", &["D", "E"]),
    ("C", &["F"]),
    ("D", &[]),
    ("E", &["F"]),
    ("F", &[]),
];

/// Roots that together reach every package of the built-in graph.
const CATALOGUE: &[&str] = &["A", "B", "C", "serde", "tokio"];

/// On-disk shape of one fixture file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureFile {
    pub package: String,
    #[serde(default)]
    pub dependencies: Vec<String>,
}

/// Dependency source backed by a directory of JSON fixtures.
#[derive(Debug, Clone)]
pub struct FixtureSource {
    dir: PathBuf,
}

impl FixtureSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Packages whose builds together cover the whole built-in graph.
    pub fn catalogue() -> Vec<String> {
        CATALOGUE.iter().map(|s| s.to_string()).collect()
    }

    /// Path of the fixture file for `package`.
    pub fn fixture_path(&self, package: &str) -> CratewalkResult<PathBuf> {
        if package.is_empty()
            || package.contains(['/', '\\'])
            || package == "."
            || package == ".."
        {
            return Err(CratewalkError::Fixture {
                message: format!("'{package}' cannot be used as a fixture file name"),
            }
            .into());
        }
        Ok(self.dir.join(format!("{package}.json")))
    }

    /// Load the fixture for `package`, creating it from the built-in graph first if missing.
    pub fn load(&self, package: &str) -> CratewalkResult<FixtureFile> {
        let path = self.fixture_path(package)?;
        if !path.is_file() {
            write_fixture(&path, &builtin_fixture(package))?;
            tracing::info!(path = %path.display(), "created fixture");
        }

        let content = std::fs::read_to_string(&path).map_err(|e| CratewalkError::Fixture {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        serde_json::from_str(&content).map_err(|e| {
            CratewalkError::Fixture {
                message: format!("Failed to parse {}: {e}", path.display()),
            }
            .into()
        })
    }

    /// Write every package of the built-in graph into the fixture directory.
    ///
    /// Existing files are left alone unless `overwrite` is set. Returns the
    /// paths that were written.
    pub fn materialize_builtin(&self, overwrite: bool) -> CratewalkResult<Vec<PathBuf>> {
        let mut written = Vec::new();
        for (package, _) in BUILTIN_GRAPH {
            let path = self.fixture_path(package)?;
            if path.is_file() && !overwrite {
                continue;
            }
            write_fixture(&path, &builtin_fixture(package))?;
            written.push(path);
        }
        Ok(written)
    }
}

impl DependencySource for FixtureSource {
    fn direct_dependencies(
        &self,
        package: &str,
        version: Option<&str>,
    ) -> CratewalkResult<Vec<String>> {
        if let Some(version) = version {
            tracing::debug!(package, version, "fixtures are unversioned, ignoring version");
        }
        Ok(self.load(package)?.dependencies)
    }
}

/// Built-in fixture for `package`; unknown packages have no dependencies.
pub fn builtin_fixture(package: &str) -> FixtureFile {
    let dependencies = BUILTIN_GRAPH
        .iter()
        .find(|(name, _)| *name == package)
        .map(|(_, deps)| deps.iter().map(|d| d.to_string()).collect())
        .unwrap_or_default();
    FixtureFile {
        package: package.to_string(),
        dependencies,
    }
}

fn write_fixture(path: &Path, fixture: &FixtureFile) -> CratewalkResult<()> {
    let json = serde_json::to_string_pretty(fixture).map_err(|e| CratewalkError::Fixture {
        message: format!("Failed to serialize fixture for {}: {e}", fixture.package),
    })?;
    cratewalk_util::fs::write_file(path, &json).map_err(|e| {
        CratewalkError::Fixture {
            message: format!("Failed to write {}: {e}", path.display()),
        }
        .into()
    })
}
