//! Live dependency source backed by a crates.io-compatible HTTP API.

use cratewalk_core::config::RegistryConfig;
use cratewalk_util::errors::{CratewalkError, CratewalkResult};
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::download;
use crate::source::DependencySource;

/// Response of `GET <base>/<name>`.
#[derive(Debug, Deserialize)]
struct CrateResponse {
    #[serde(rename = "crate")]
    krate: CrateInfo,
}

#[derive(Debug, Deserialize)]
struct CrateInfo {
    #[serde(default)]
    newest_version: Option<String>,
    #[serde(default)]
    max_version: Option<String>,
}

/// Response of `GET <base>/<name>/<version>/dependencies`.
#[derive(Debug, Deserialize)]
struct DependenciesResponse {
    #[serde(default)]
    dependencies: Vec<RegistryDependency>,
}

#[derive(Debug, Deserialize)]
struct RegistryDependency {
    crate_id: String,
    #[serde(default)]
    kind: Option<String>,
}

/// Fetches direct normal dependencies from a crates.io-style registry.
#[derive(Debug, Clone)]
pub struct RegistrySource {
    client: Client,
    base_url: String,
    attempts: u32,
}

impl RegistrySource {
    /// Create a source for `base_url` (e.g. `https://crates.io/api/v1/crates`).
    pub fn new(base_url: &str, config: &RegistryConfig) -> miette::Result<Self> {
        Ok(Self {
            client: download::build_client(config)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            attempts: config.retries,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve the version to inspect when the caller did not pin one.
    fn newest_version(&self, package: &str) -> CratewalkResult<String> {
        let url = format!("{}/{package}", self.base_url);
        let info: CrateResponse = download::get_json(&self.client, &url, self.attempts)?
            .ok_or_else(|| CratewalkError::Registry {
                message: format!("crate `{package}` not found"),
            })?;
        info.krate
            .newest_version
            .or(info.krate.max_version)
            .ok_or_else(|| {
                CratewalkError::Registry {
                    message: format!("crate `{package}` has no published version"),
                }
                .into()
            })
    }
}

impl DependencySource for RegistrySource {
    fn direct_dependencies(
        &self,
        package: &str,
        version: Option<&str>,
    ) -> CratewalkResult<Vec<String>> {
        let version = match version {
            Some(v) => v.to_string(),
            None => self.newest_version(package)?,
        };
        tracing::debug!(package, %version, "querying registry");

        let url = format!("{}/{package}/{version}/dependencies", self.base_url);
        let response: DependenciesResponse = download::get_json(&self.client, &url, self.attempts)?
            .ok_or_else(|| CratewalkError::Registry {
                message: format!("version {version} of crate `{package}` not found"),
            })?;

        Ok(normal_dependencies(response))
    }
}

fn normal_dependencies(response: DependenciesResponse) -> Vec<String> {
    response
        .dependencies
        .into_iter()
        .filter(|dep| dep.kind.as_deref() == Some("normal"))
        .map(|dep| dep.crate_id)
        .collect()
}
